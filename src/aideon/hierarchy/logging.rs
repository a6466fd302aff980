use tracing_subscriber::EnvFilter;

use crate::aideon::hierarchy::error::{HierarchyError, Result};

/// Installs a formatting subscriber filtered by `RUST_LOG`, defaulting to
/// `info`. Fails if a global subscriber is already set.
pub fn init() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|err| HierarchyError::Logging(err.to_string()))
}
