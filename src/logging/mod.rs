//! Logging setup for applications that train on the dataset
//!
//! This module provides:
//! - Custom log formatting with bracketed output
//! - Dual logging (file + stdout)
//! - Log file naming with timestamps

mod formatter;
mod setup;

pub use formatter::BracketedFormatter;
pub use setup::setup_logging;
