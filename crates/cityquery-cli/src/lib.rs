//! CityQuery command-line front end
//!
//! Loads a scene, optionally imports building rows, narrows the selection
//! by camera visibility and a natural-language command, then reports and
//! exports the result.

pub mod app;
pub mod config;

pub use app::{Args, Report, run};
pub use config::CliConfig;
