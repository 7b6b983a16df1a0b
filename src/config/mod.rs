//! Configuration loading for the Premium Leave Engine.
//!
//! Thresholds and header aliases are read from YAML files once, at the
//! boundary, and then passed explicitly to the classifier and resolver.
//!
//! # Example
//!
//! ```no_run
//! use premium_leave_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Critical band: {} months", config.thresholds().critical_max_months);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{MAX_RETIREMENT_AGE, UrgencyThresholds};
