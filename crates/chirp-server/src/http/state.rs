use chirp_config::AppConfig;
use chirp_core::TweetService;
use chirp_store::{FsMediaStore, SeaStore};
use sea_orm::DatabaseConnection;

use super::flash::FlashSigner;

pub type Service = TweetService<SeaStore, FsMediaStore>;

pub struct AppState {
    pub service: Service,
    pub flash: FlashSigner,
    pub debug: bool,
}

impl AppState {
    pub fn new(config: &AppConfig, db: DatabaseConnection) -> Self {
        Self {
            service: TweetService::new(
                SeaStore::new(db),
                FsMediaStore::new(&config.media_root),
            ),
            flash: FlashSigner::new(&config.secret_key),
            debug: config.debug,
        }
    }
}
