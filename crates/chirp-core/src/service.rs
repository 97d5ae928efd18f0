use chrono::Utc;
use tracing::{info, warn};

use crate::error::{CreateTweetError, StoreError};
use crate::form::TweetForm;
use crate::model::{Account, NewAccount, NewTweet, Tweet};
use crate::password::hash_password;
use crate::store::{AccountStore, MediaStore, TweetStore};

pub const DEMO_USERNAME: &str = "demo";
pub const DEMO_PASSWORD: &str = "demo12345";

/// Create and list operations over a persistence and a media capability.
#[derive(Debug, Clone)]
pub struct TweetService<S, M> {
    store: S,
    media: M,
}

impl<S, M> TweetService<S, M>
where
    S: TweetStore + AccountStore,
    M: MediaStore,
{
    pub fn new(store: S, media: M) -> Self {
        Self { store, media }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolves the well-known demo account, creating it on first use.
    ///
    /// An existing account is returned untouched, so its password is never
    /// reset.
    pub async fn ensure_demo_account(&self) -> Result<Account, StoreError> {
        if let Some(account) = self.store.find_by_username(DEMO_USERNAME).await? {
            return Ok(account);
        }
        let (account, created) = self
            .store
            .get_or_create(NewAccount {
                username: DEMO_USERNAME.to_string(),
                password: hash_password(DEMO_PASSWORD)?,
                is_active: true,
            })
            .await?;
        if created {
            info!(username = %account.username, "created demo account");
        }
        Ok(account)
    }

    pub async fn create_tweet(&self, form: TweetForm) -> Result<Tweet, CreateTweetError> {
        let cleaned = form.validate().map_err(CreateTweetError::Invalid)?;
        let author = self.ensure_demo_account().await?;

        let image = match &cleaned.image {
            Some(img) => Some(self.media.save(&img.bytes, img.extension).await?),
            None => None,
        };

        let new_tweet = NewTweet {
            text: cleaned.text,
            image: image.clone(),
            created_at: Utc::now(),
            author: Some(author),
        };

        match self.store.insert(new_tweet).await {
            Ok(tweet) => {
                info!(id = tweet.id, tweet = %tweet, "tweet created");
                Ok(tweet)
            }
            Err(err) => {
                if let Some(path) = image
                    && let Err(cleanup) = self.media.remove(&path).await
                {
                    warn!(%path, error = %cleanup, "failed to remove orphaned image");
                }
                Err(err.into())
            }
        }
    }

    pub async fn list_tweets(&self) -> Result<Vec<Tweet>, StoreError> {
        self.store.list_all().await
    }
}
