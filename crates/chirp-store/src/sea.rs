use chirp_core::{Account, AccountStore, NewAccount, NewTweet, StoreError, Tweet, TweetStore};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, SqlErr,
};
use tracing::debug;

use crate::entity::{account, tweet};

/// Tweet and account persistence over a sea-orm connection pool.
#[derive(Debug, Clone)]
pub struct SeaStore {
    db: DatabaseConnection,
}

impl SeaStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.db.ping().await.map_err(StoreError::database)
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

impl TweetStore for SeaStore {
    async fn insert(&self, new: NewTweet) -> Result<Tweet, StoreError> {
        let model = tweet::ActiveModel {
            text: Set(new.text),
            image: Set(new.image),
            created_at: Set(new.created_at.into()),
            author_id: Set(new.author.as_ref().map(|a| a.id)),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(StoreError::database)?;

        Ok(model.into_domain(new.author))
    }

    async fn list_all(&self) -> Result<Vec<Tweet>, StoreError> {
        let rows = tweet::Entity::find()
            .find_also_related(account::Entity)
            .order_by_desc(tweet::Column::CreatedAt)
            .order_by_desc(tweet::Column::Id)
            .all(&self.db)
            .await
            .map_err(StoreError::database)?;

        Ok(rows
            .into_iter()
            .map(|(tweet, author)| tweet.into_domain(author.map(Account::from)))
            .collect())
    }
}

impl AccountStore for SeaStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        let found = account::Entity::find()
            .filter(account::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(StoreError::database)?;
        Ok(found.map(Account::from))
    }

    async fn get_or_create(&self, new: NewAccount) -> Result<(Account, bool), StoreError> {
        if let Some(existing) = self.find_by_username(&new.username).await? {
            return Ok((existing, false));
        }

        let inserted = account::ActiveModel {
            username: Set(new.username.clone()),
            password: Set(new.password),
            is_active: Set(new.is_active),
            date_joined: Set(Utc::now().into()),
            ..Default::default()
        }
        .insert(&self.db)
        .await;

        match inserted {
            Ok(model) => Ok((model.into(), true)),
            Err(err) if is_unique_violation(&err) => {
                debug!(username = %new.username, "account created concurrently, re-reading");
                match self.find_by_username(&new.username).await? {
                    Some(existing) => Ok((existing, false)),
                    None => Err(StoreError::database(err)),
                }
            }
            Err(err) => Err(StoreError::database(err)),
        }
    }
}
