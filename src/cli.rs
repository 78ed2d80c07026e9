use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "statusboard")]
#[command(author, version, about = "Status board Telegram bot and Mini App backend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot together with the status API server (default)
    Run,

    /// Run only the status API server, without the Telegram bot
    ///
    /// Useful in development when no bot token is configured; status
    /// notifications are skipped in this mode.
    Serve,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
