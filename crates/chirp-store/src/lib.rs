pub mod connect;
pub mod entity;
pub mod media;
pub mod sea;

pub use connect::{connect, connect_options};
pub use media::FsMediaStore;
pub use sea::SeaStore;
