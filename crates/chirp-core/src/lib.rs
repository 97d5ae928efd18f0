pub mod error;
pub mod form;
pub mod model;
pub mod password;
pub mod service;
pub mod store;

pub use error::{CreateTweetError, StoreError};
pub use form::{CleanedTweet, FormErrors, MAX_TWEET_CHARS, TweetForm, Upload, ValidImage};
pub use model::{Account, NewAccount, NewTweet, Tweet};
pub use service::{DEMO_PASSWORD, DEMO_USERNAME, TweetService};
pub use store::{AccountStore, MediaStore, TweetStore};
