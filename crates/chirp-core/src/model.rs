use std::fmt;

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: i32,
    pub username: String,
    /// Argon2id PHC string, see [`crate::password`].
    pub password: String,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tweet {
    pub id: i32,
    pub text: String,
    /// Path relative to the media root, e.g. `tweets/<uuid>.png`.
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub author: Option<Account>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTweet {
    pub text: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub author: Option<Account>,
}

impl Tweet {
    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .map(|a| a.username.as_str())
            .unwrap_or("Anonymous")
    }
}

impl fmt::Display for Tweet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let preview: String = self.text.chars().take(50).collect();
        write!(f, "{}: {}...", self.author_name(), preview)
    }
}
