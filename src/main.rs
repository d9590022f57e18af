use aic_mcp_server::adapters::stdio;
use aic_mcp_server::utils::{error::ErrorCategory, logger};
use aic_mcp_server::{AicClient, AicError, CliConfig, McpServer, ServerConfig, ToolService};
use clap::Parser;

fn exit_code(e: &AicError) -> i32 {
    match e.category() {
        ErrorCategory::Configuration | ErrorCategory::Validation => 2,
        _ => 1,
    }
}

async fn run(config: ServerConfig) -> aic_mcp_server::Result<()> {
    let client = AicClient::new(&config.api)?;
    tracing::info!("Using AIC API at {}", client.base_url());

    let server = McpServer::new(ToolService::new(client, config.api.max_limit));
    stdio::serve_stdio(&server).await
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 設定有誤時日誌尚未初始化，直接輸出到 stderr
    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(exit_code(&e));
        }
    };

    let format = config.logging.log_format().unwrap_or_default();
    logger::init_logger(cli.verbose, config.logging.level.as_deref(), format);

    tracing::info!("Starting aic-mcp-server");
    if cli.verbose {
        tracing::debug!("Resolved config: {:?}", config);
    }

    if let Err(e) = run(config).await {
        tracing::error!(
            "❌ Server stopped: {} (Category: {:?})",
            e,
            e.category()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(exit_code(&e));
    }
}
