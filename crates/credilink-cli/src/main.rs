use anyhow::Result;
use clap::{Parser, Subcommand};
use credilink_core::session::{OAuthProvider, ProfileUpdate, UserRole};
use credilink_core::wallet::WalletConnector;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod bootstrap;
mod commands;

use bootstrap::BootstrapOptions;

#[derive(Parser)]
#[command(name = "credilink")]
#[command(about = "CrediLink+ CLI - wallet and OAuth login for the credential platform", long_about = None)]
struct Cli {
    /// Directory for config.toml and local storage (defaults to the platform dirs)
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    /// Wallet JSON-RPC endpoint, overrides the config file
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Behave as if no wallet provider were installed
    #[arg(long, global = true)]
    no_wallet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with a wallet
    Login {
        /// Wallet connector (injected, walletconnect, coinbase)
        #[arg(short, long, default_value = "injected")]
        connector: WalletConnector,
        /// Role to sign up as (student, recruiter)
        #[arg(short, long)]
        role: UserRole,
    },
    /// Log in with an OAuth provider (mocked)
    Oauth {
        /// Identity provider (google, github)
        #[arg(short, long)]
        provider: OAuthProvider,
        #[arg(short, long)]
        role: UserRole,
    },
    /// Log out and clear the stored session
    Logout,
    /// Show the current session
    Whoami {
        /// Print the stored record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit profile fields of the current session
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        experience: Option<String>,
        /// Replaces the skill list; repeat for several skills
        #[arg(long = "skill")]
        skills: Vec<String>,
    },
    /// Ask the wallet to switch networks
    SwitchChain {
        chain_id: u64,
    },
    /// Resolve an ENS name to an address, or an address to its name
    Resolve {
        /// ENS name (alice.eth) or 0x address
        query: String,
    },
    /// List wallet connectors
    Connectors,
    /// List known networks
    Chains,
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("credilink=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let options = BootstrapOptions {
        home: cli.home,
        rpc_url: cli.rpc_url,
        no_wallet: cli.no_wallet,
    };

    let manager = bootstrap::bootstrap(&options).await?;

    match cli.command {
        Commands::Login { connector, role } => {
            commands::session::login(&manager, connector, role).await?
        }
        Commands::Oauth { provider, role } => {
            commands::session::oauth(&manager, provider, role).await?
        }
        Commands::Logout => commands::session::logout(&manager).await?,
        Commands::Whoami { json } => commands::session::whoami(&manager, json)?,
        Commands::Profile {
            name,
            bio,
            avatar,
            company,
            experience,
            skills,
        } => {
            let update = ProfileUpdate {
                name,
                avatar,
                bio,
                skills: (!skills.is_empty()).then_some(skills),
                company,
                experience,
            };
            commands::session::profile(&manager, update).await?
        }
        Commands::SwitchChain { chain_id } => {
            commands::session::switch_chain(&manager, chain_id).await?
        }
        Commands::Resolve { query } => commands::session::resolve(&manager, &query).await,
        Commands::Connectors => commands::catalog::connectors(manager.has_wallet()),
        Commands::Chains => commands::catalog::chains(manager.current().and_then(|s| s.chain_id())),
    }

    Ok(())
}
