//! Logging for the loader binary
//!
//! - Bracketed event formatting
//! - Dual output (file + stdout)
//! - Timestamped log files

mod formatter;
mod setup;

pub use formatter::BracketedFormatter;
pub use setup::setup_logging;
