//! Structured logging to a rotating file.
//!
//! All crate modules log through `tracing` macros and spans. This module
//! installs the subscriber that filters them and writes formatted records to
//! `jokebox.log` in the data directory:
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → FileWriter (10 MB, 3 backups)
//! ```
//!
//! Logs never go to stdout, which belongs to the terminal shim.
//!
//! # Modules
//!
//! - `init`: subscriber setup
//! - `file_writer`: size-rotated log file

mod file_writer;
mod init;

pub use file_writer::FileWriter;
pub use init::{init_tracing, LOG_FILE_NAME};
