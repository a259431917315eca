use clap::{Parser, Subcommand};

use chaindata_bridge::config::schema::{BridgeConfig, ObservabilityConfig};
use chaindata_bridge::observability::logging;
use chaindata_bridge::{Capabilities, ChainDataService};

#[derive(Parser)]
#[command(name = "bridge-cli")]
#[command(about = "Diagnostic CLI for the blockchain data service", long_about = None)]
struct Cli {
    /// Base URL of the data service.
    #[arg(short, long, default_value = "https://api.chaindata.example")]
    url: String,

    /// Bearer token for authenticated endpoints.
    #[arg(short, long)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the verified block height of a blockchain
    Height { blockchain_id: String },
    /// List known blockchains
    Blockchains {
        /// Restrict to mainnet (or testnet with --mainnet=false)
        #[arg(long)]
        mainnet: Option<bool>,
    },
    /// List verified currencies
    Currencies {
        #[arg(long)]
        blockchain_id: Option<String>,
    },
    /// Fetch one transaction by id
    Transaction { transaction_id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging(&ObservabilityConfig::default());

    let cli = Cli::parse();

    let mut config = BridgeConfig::default();
    config.service.base_url = cli.url;
    config.service.auth_token = cli.token;

    let service = ChainDataService::new(&config, Capabilities::CURRENT)?;

    match cli.command {
        Commands::Height { blockchain_id } => {
            let height = service.get_block_height(&blockchain_id).await?;
            println!("{}", height);
        }
        Commands::Blockchains { mainnet } => {
            let blockchains = service.get_blockchains(mainnet).await?;
            println!("{}", serde_json::to_string_pretty(&blockchains)?);
        }
        Commands::Currencies { blockchain_id } => {
            let currencies = service.get_currencies(blockchain_id.as_deref(), true).await?;
            println!("{}", serde_json::to_string_pretty(&currencies)?);
        }
        Commands::Transaction { transaction_id } => {
            let transaction = service.get_transaction(&transaction_id, false, false).await?;
            println!("{}", serde_json::to_string_pretty(&transaction)?);
        }
    }

    Ok(())
}
