use chatwidget::core::config::{CliOverrides, load_config, resolve};
use chatwidget::service::HttpChatService;
use chatwidget::tui;
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "chatwidget", about = "Terminal chat widget for a remote chat service")]
struct Args {
    /// Base URL of the chat service (overrides config and env)
    #[arg(long)]
    base_url: Option<String>,

    /// Delay before a submitted message is sent, in milliseconds
    #[arg(long)]
    send_delay_ms: Option<u64>,

    /// Start with the chat panel open
    #[arg(long)]
    open: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to chatwidget.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("chatwidget.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = load_config().map_err(std::io::Error::other)?;
    let config = resolve(
        &file_config,
        &CliOverrides {
            base_url: args.base_url,
            send_delay_ms: args.send_delay_ms,
            open: args.open,
        },
    );

    log::info!("Chat widget starting up against {}", config.base_url);

    let service = HttpChatService::new(config.base_url.clone(), config.request_timeout)
        .map_err(std::io::Error::other)?;

    tui::run(config, Arc::new(service)).await
}
