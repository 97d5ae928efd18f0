use std::fs;
use std::path::Path;

use chirp_schema::{MigrationPlan, validate_plans};

use crate::error::MigrationError;

/// Migration documents compiled into the binary, in file-name order.
const EMBEDDED: &[(&str, &str)] = &[
    (
        "0001_create_account.json",
        include_str!("../migrations/0001_create_account.json"),
    ),
    (
        "0002_create_tweet.json",
        include_str!("../migrations/0002_create_tweet.json"),
    ),
];

/// Parses, sorts and validates the migrations shipped with the binary.
pub fn embedded_migrations() -> Result<Vec<MigrationPlan>, MigrationError> {
    let documents = EMBEDDED
        .iter()
        .map(|(name, content)| (name.to_string(), content.to_string()));
    parse_all(documents)
}

/// Load every `*.json` plan under `dir`, sorted by version and validated.
///
/// A missing directory yields an empty list.
pub fn load_migrations_from_dir(dir: &Path) -> Result<Vec<MigrationPlan>, MigrationError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let io_err = |source| MigrationError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut documents = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        let content = fs::read_to_string(&path).map_err(|source| MigrationError::Io {
            path: path.clone(),
            source,
        })?;
        documents.push((path.display().to_string(), content));
    }
    parse_all(documents)
}

fn parse_all(
    documents: impl IntoIterator<Item = (String, String)>,
) -> Result<Vec<MigrationPlan>, MigrationError> {
    let mut plans = Vec::new();
    for (name, content) in documents {
        let plan: MigrationPlan = serde_json::from_str(&content)
            .map_err(|source| MigrationError::Parse { name, source })?;
        plans.push(plan);
    }

    plans.sort_by_key(|p| p.version);
    validate_plans(&plans)?;
    Ok(plans)
}
