use crate::config::ServerConfig;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::builder::FalseyValueParser;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "aic-mcp-server")]
#[command(about = "MCP server exposing the Art Institute of Chicago public API")]
pub struct CliConfig {
    #[arg(long, env = "AIC_CONFIG", help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "AIC_BASE_URL")]
    pub base_url: Option<String>,

    #[arg(long, env = "AIC_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    #[arg(long, env = "AIC_MAX_LIMIT")]
    pub max_limit: Option<u32>,

    #[arg(long, env = "AIC_USER_AGENT")]
    pub user_agent: Option<String>,

    #[arg(long, env = "AIC_LOG_FORMAT", help = "compact or json")]
    pub log_format: Option<String>,

    #[arg(
        long,
        short,
        env = "AIC_VERBOSE",
        value_parser = FalseyValueParser::new(),
        help = "Enable verbose output"
    )]
    pub verbose: bool,
}

impl CliConfig {
    /// 合併設定：命令列參數 > 設定檔 > 預設值
    pub fn resolve(&self) -> Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::from_file(path)?,
            None => ServerConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(timeout) = self.timeout_secs {
            config.api.timeout_seconds = timeout;
        }
        if let Some(max_limit) = self.max_limit {
            config.api.max_limit = max_limit;
        }
        if let Some(user_agent) = &self.user_agent {
            config.api.user_agent = user_agent.clone();
        }
        if let Some(format) = &self.log_format {
            config.logging.format = Some(format.clone());
        }

        config.validate()?;
        Ok(config)
    }
}
