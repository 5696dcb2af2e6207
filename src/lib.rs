pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, file_config::FileConfig, ExtractorConfig};

#[cfg(feature = "cli")]
pub use config::CliArgs;

pub use core::{etl::EtlEngine, pipeline::BerryPipeline};
pub use utils::error::{EtlError, Result};
