//! Terminal front end: output formatting, offline record assembly and, behind the
//! `cli` feature, the command line.

pub mod batch;
pub mod format;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod logging;

#[cfg(feature = "cli")]
pub use cli::run;
