pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{Cli, Command};
pub use config::{toml_config::TomlConfig, EnvConfig, ServiceSettings};

pub use adapters::{FixedClock, SystemClock, TrackingMoreClient};
pub use app::render::OutputFormat;
pub use crate::core::{registry::CarrierRegistry, service::TrackingService};
pub use utils::error::{Result, TrackingError};
