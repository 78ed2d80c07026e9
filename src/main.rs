use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use teloxide::prelude::*;

use statusboard::cli::{Cli, Commands};
use statusboard::core::{init_logger, Config};
use statusboard::storage::create_pool;
use statusboard::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps, StatusApi};
use statusboard::web::{run_web_server, ApiState};

/// Main entry point
///
/// Parses CLI arguments and dispatches to the selected run mode.
///
/// # Errors
/// Returns an error if initialization fails (logging, database, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Load environment variables from .env if present
    let _ = dotenv();

    let config = Config::from_env()?;

    // Initialize logger (console + file)
    init_logger(&config.log_file_path)?;

    match cli.command {
        Some(Commands::Serve) => {
            log::info!("Running in serve-only mode (no Telegram bot)");
            run_server_only(config).await
        }
        Some(Commands::Run) | None => run(config).await,
    }
}

/// Run the bot and the status API server together.
async fn run(config: Config) -> Result<()> {
    log::info!("Starting status board...");

    let db_pool = Arc::new(create_pool(&config.database_path)?);

    let bot = create_bot(&config.bot_token)?;
    let me = bot.get_me().await?;
    log::info!("Bot username: {:?}, id: {}", me.username.as_deref(), me.id);

    // Register command metadata once at startup
    setup_bot_commands(&bot).await?;

    // The API server runs as a background task; the bot holds the foreground.
    // The server gets a bot handle so status posts can trigger the
    // fire-and-forget confirmation message.
    let state = ApiState::new(Arc::clone(&db_pool), Some(bot.clone()));
    let web_port = config.web_port;
    let allowed_origin = config.allowed_origin.clone();
    tokio::spawn(async move {
        if let Err(e) = run_web_server(web_port, state, &allowed_origin).await {
            log::error!("Status API server error: {}", e);
        }
    });

    let deps = HandlerDeps::new(
        Arc::new(StatusApi::new(config.status_api_url.clone())),
        config.miniapp_url.clone(),
    );

    log::info!("Starting bot in long polling mode");
    Dispatcher::builder(bot, schema(deps))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

/// Run only the status API server.
async fn run_server_only(config: Config) -> Result<()> {
    let db_pool = Arc::new(create_pool(&config.database_path)?);
    let state = ApiState::new(db_pool, None);
    run_web_server(config.web_port, state, &config.allowed_origin).await
}
