//! Club Observability
//!
//! Console logging for the club apps and their CLI, driven by
//! [`club_config::LogConfig`].
//!
//! ```no_run
//! use club_config::LogConfig;
//!
//! club_observability::init_logging(&LogConfig::from_env()).ok();
//! tracing::info!("ready");
//! ```

pub mod logging;

pub use logging::{default_filter, init_logging};
