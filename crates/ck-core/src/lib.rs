pub mod analytics;
pub mod error;
pub mod logging;
pub mod migration;
pub mod models;
pub mod schedule;

pub use error::{CkError, Result};
pub use logging::{init, init_default, init_from_args};
