pub mod compact;
pub mod config;
pub mod error;
pub mod flatten;
pub mod io;
pub mod logging;
pub mod model;
pub mod path;
pub mod query;
pub mod reconstruct;
pub mod render;
pub mod sync;
pub mod validate;

pub use error::{HierarchyError, Result};
