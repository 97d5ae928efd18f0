pub mod bootstrap;
pub mod http;
pub mod readiness;
pub mod shutdown;
pub mod telemetry;

pub use bootstrap::{Bootstrapped, startup, wait_for_database};
pub use readiness::ReadinessGate;
