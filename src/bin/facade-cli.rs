use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "facade-cli")]
#[command(about = "Command-line client for the token facade", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3001")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the token contract address
    Contract,
    /// Show the server wallet address
    Wallet,
    /// Show the token name
    Name,
    /// Show the total supply
    Supply,
    /// Show the balance of an address
    Balance { address: String },
    /// Check whether an address holds the minter role
    Minter { address: String },
    /// Show the vote weight of an address
    Votes { address: String },
    /// Look up a transaction receipt
    Receipt { hash: String },
    /// Mint whole tokens to an address (waits for confirmation)
    Mint { address: String, amount: u64 },
    /// Delegate the server wallet's votes (waits for confirmation)
    Delegate { address: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let request = match &cli.command {
        Commands::Contract => client.get(format!("{}/contract-address", base)),
        Commands::Wallet => client.get(format!("{}/server-wallet-address", base)),
        Commands::Name => client.get(format!("{}/token-name", base)),
        Commands::Supply => client.get(format!("{}/total-supply", base)),
        Commands::Balance { address } => client.get(format!("{}/token-balance/{}", base, address)),
        Commands::Minter { address } => client.get(format!("{}/minter-role/{}", base, address)),
        Commands::Votes { address } => client.get(format!("{}/votes/{}", base, address)),
        Commands::Receipt { hash } => client.get(format!("{}/transaction-receipt/{}", base, hash)),
        Commands::Mint { address, amount } => client
            .post(format!("{}/mint-tokens", base))
            .json(&json!({ "address": address, "amount": amount })),
        Commands::Delegate { address } => client
            .post(format!("{}/delegate", base))
            .json(&json!({ "address": address })),
    };

    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let json: Value = res.json().await?;

    if !status.is_success() {
        eprintln!("Error: facade returned status {}", status);
        eprintln!("{}", serde_json::to_string_pretty(&json)?);
        std::process::exit(1);
    }

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
