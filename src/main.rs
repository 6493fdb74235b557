use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use treid_contact::{
    Config, ContactHandler, EmailService,
    cli::{invoke, server},
};

/// treid-contact - contact form handler for treid.com.br
#[derive(Parser)]
#[command(name = "treid-contact")]
#[command(about = "Forwards contact form submissions by email", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Handle a single event and print the response
    Invoke {
        /// File holding the event JSON, stdin when omitted
        #[arg(long)]
        event: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    treid_contact::observability::init_observability(
        "treid-contact",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    // One sender per process, shared by every invocation
    let sender = Arc::new(EmailService::from_config(&config.email)?);
    let handler = ContactHandler::from_config(sender, &config);

    match cli.command {
        Commands::Serve { host, port } => server::serve(config, handler, host, port).await,
        Commands::Invoke { event } => {
            let stdout = std::io::stdout();
            let response = match event {
                Some(path) => {
                    let file = std::fs::File::open(&path)?;
                    invoke::run(&handler, file, stdout.lock()).await?
                }
                None => invoke::run(&handler, std::io::stdin(), stdout.lock()).await?,
            };
            tracing::info!(status = response.status_code, "Invocation finished");
            Ok(())
        }
    }
}
