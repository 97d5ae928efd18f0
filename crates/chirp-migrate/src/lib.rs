pub mod embedded;
pub mod error;
pub mod runner;
pub mod version;

pub use embedded::{embedded_migrations, load_migrations_from_dir};
pub use error::MigrationError;
pub use runner::{MigrationReport, MigrationStatus, migration_status, run_migrations, to_query_backend};
pub use version::VERSION_TABLE;
