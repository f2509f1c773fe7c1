use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[clap(name = "Item DNA", version)]
#[command(disable_help_subcommand = true)]
pub struct CLI {
    /// JSON-RPC endpoint, overrides RPC_URL
    #[arg(long, global = true)]
    pub rpc_url: Option<String>,
    /// Receipt polls before giving up (0 polls forever), overrides RECEIPT_MAX_ATTEMPTS
    #[arg(long, global = true)]
    pub max_attempts: Option<u32>,
    /// Print all output fields as JSON
    #[arg(long, global = true)]
    pub json: bool,
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Estimates gas, sends setDNA and waits for the receipt")]
    SetDna {
        #[arg(long)]
        wallet: String,
        #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
        private_key: String,
        #[arg(long)]
        item_id: String,
        #[arg(long)]
        dna: String,
    },
    #[command(about = "Reads the DNA of an item for a game address")]
    GetDna {
        #[arg(long)]
        item_id: String,
        #[arg(long)]
        address: String,
    },
    #[command(about = "Reads the items owned by an address")]
    GetItems {
        #[arg(long)]
        address: String,
    },
    #[command(about = "Lists the functions of a contract")]
    Abi {
        #[arg(value_enum)]
        contract: ContractName,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ContractName {
    Ownership,
    ItemManager,
}
