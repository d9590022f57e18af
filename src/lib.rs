pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::http::AicClient;
pub use config::{ApiSettings, ServerConfig};
pub use crate::core::{server::McpServer, tools::ToolService};
pub use utils::error::{AicError, Result};
