//! `tm-cli` - driver for the `tiled-matmul` binary: configuration, logging
//! and the generate, multiply, verify pass.

pub mod config;
pub mod error;
pub mod logging;
pub mod run;

pub use config::{Args, RunConfig};
pub use error::{CliError, Result};
pub use run::{run, Outcome, RunContext};
