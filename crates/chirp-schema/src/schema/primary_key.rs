use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PrimaryKeyDef {
    #[serde(default)]
    pub auto_increment: bool,
}

/// Inline primary key marker: either `true` or `{"auto_increment": true}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", untagged)]
pub enum PrimaryKeySyntax {
    Bool(bool),
    Object(PrimaryKeyDef),
}

impl PrimaryKeySyntax {
    pub fn is_primary_key(&self) -> bool {
        match self {
            PrimaryKeySyntax::Bool(flag) => *flag,
            PrimaryKeySyntax::Object(_) => true,
        }
    }

    pub fn auto_increment(&self) -> bool {
        match self {
            PrimaryKeySyntax::Bool(_) => false,
            PrimaryKeySyntax::Object(def) => def.auto_increment,
        }
    }
}
