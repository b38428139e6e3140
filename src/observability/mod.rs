//! Structured logging to a rotating file.
//!
//! Zellij swallows plugin stderr, so the subscriber writes plain-text `fmt`
//! lines to a file under the host data directory instead:
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → FileWriter → bookscope.log
//! ```
//!
//! - **Location**: `~/.local/share/zellij/bookscope/bookscope.log`
//! - **Rotation**: 10MB per file, 3 timestamped backups
//! - **Level**: the `trace_level` config option, default `"info"`
//!
//! # Usage
//!
//! ```rust
//! use bookscope::observability::init_tracing;
//! use bookscope::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("plugin initialized");
//! ```

mod file_writer;
mod init;

pub use file_writer::FileWriter;
pub use init::init_tracing;
