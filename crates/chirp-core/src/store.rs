//! Capabilities the tweet service depends on.

use std::future::Future;

use crate::error::StoreError;
use crate::model::{Account, NewAccount, NewTweet, Tweet};

pub trait TweetStore: Send + Sync {
    fn insert(&self, tweet: NewTweet) -> impl Future<Output = Result<Tweet, StoreError>> + Send;

    /// Every tweet, newest first; equal timestamps order by id, highest first.
    fn list_all(&self) -> impl Future<Output = Result<Vec<Tweet>, StoreError>> + Send;
}

pub trait AccountStore: Send + Sync {
    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<Account>, StoreError>> + Send;

    /// Returns the existing account with `account.username`, or creates it.
    /// The flag is `true` when this call inserted the row. Losing a creation
    /// race to another writer resolves to the winner's row.
    fn get_or_create(
        &self,
        account: NewAccount,
    ) -> impl Future<Output = Result<(Account, bool), StoreError>> + Send;
}

pub trait MediaStore: Send + Sync {
    /// Stores `bytes` under a fresh name and returns its media-relative path.
    fn save(
        &self,
        bytes: &[u8],
        extension: &str,
    ) -> impl Future<Output = Result<String, StoreError>> + Send;

    fn remove(&self, path: &str) -> impl Future<Output = Result<(), StoreError>> + Send;
}
