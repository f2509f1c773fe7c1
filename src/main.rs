mod args;
use anyhow::Result;
use args::{Commands, ContractName, CLI};
use clap::Parser;
use item_dna::{cancellable, ChainConfig, EthersClient, Panel};
use tokio::signal::ctrl_c;
use std::num::NonZeroU32;
use std::process::ExitCode;
use tracing::warn;
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = Subscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = CLI::parse();
    let mut config = ChainConfig::from_env()?;
    if let Some(rpc_url) = cli.rpc_url {
        config.rpc_url = rpc_url;
    }
    if let Some(max_attempts) = cli.max_attempts {
        config.confirmation.max_attempts = NonZeroU32::new(max_attempts);
    }

    if let Commands::Abi { contract } = &cli.command {
        let descriptor = match contract {
            ContractName::Ownership => &config.ownership,
            ContractName::ItemManager => &config.item_manager,
        };
        println!("{} at {:?}", descriptor.name, descriptor.address);
        for line in descriptor.describe() {
            println!("  {}", line);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let client = EthersClient::construct(&config.rpc_url, config.chain_id)?;
    let mut panel = Panel::new(&client, &config);

    let outcome = match cli.command {
        Commands::SetDna {
            wallet,
            private_key,
            item_id,
            dna,
        } => {
            panel.inputs.wallet = wallet;
            panel.inputs.private_key = private_key;
            panel.inputs.set_dna_item_id = item_id;
            panel.inputs.set_dna_dna = dna;
            let outcome = cancellable(panel.set_dna(), ctrl_c()).await;
            if !cli.json {
                println!("status: {}", panel.outputs.status);
            }
            outcome
        }
        Commands::GetDna { item_id, address } => {
            panel.inputs.get_dna_item_id = item_id;
            panel.inputs.get_dna_address = address;
            let outcome = cancellable(panel.get_dna(), ctrl_c()).await;
            if !cli.json {
                println!("dna: {}", panel.outputs.dna);
            }
            outcome
        }
        Commands::GetItems { address } => {
            panel.inputs.get_dna_address = address;
            let outcome = cancellable(panel.get_items(), ctrl_c()).await;
            if !cli.json {
                println!("items: {}", panel.outputs.items);
            }
            outcome
        }
        Commands::Abi { .. } => unreachable!("handled above"),
    };
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&panel.outputs)?);
    }

    match outcome {
        Some(Ok(())) => Ok(ExitCode::SUCCESS),
        Some(Err(e)) => {
            eprintln!("{}: {}", e.kind(), e);
            Ok(ExitCode::FAILURE)
        }
        None => {
            warn!("Cancelled");
            Ok(ExitCode::from(130))
        }
    }
}
