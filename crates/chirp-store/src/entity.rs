pub mod account;
pub mod tweet;
