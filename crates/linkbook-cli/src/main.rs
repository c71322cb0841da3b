use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod context;
mod logging;

use context::AppContext;

#[derive(Parser)]
#[command(name = "linkbook")]
#[command(about = "linkbook - self profile links and local contacts", long_about = None)]
struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding contacts.json (overrides the configuration)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Self profile link
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Local contact store
    Contacts {
        #[command(subcommand)]
        action: ContactsAction,
    },
    /// Configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Resolve and print the profile link for a user
    Link {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        domain: String,
        #[arg(long)]
        handle: Option<String>,
    },
}

#[derive(Subcommand)]
enum ContactsAction {
    /// Store one contact (replaces a contact with the same id)
    Add {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
    },
    /// Store a JSON array of {"id", "name"} objects as one batch
    Import { file: PathBuf },
    /// Print all contacts
    List {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default configuration file if none exists
    Init,
    /// Print the effective configuration
    Show,
    /// Fetch server links from a deep-link URL (omit to use static links)
    SetConfigUrl { url: Option<String> },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let context = AppContext::load(cli.config, cli.data_dir)?;
    let _log_guard = logging::init(&context.config.logging.level)?;

    match cli.command {
        Commands::Profile { action } => match action {
            ProfileAction::Link {
                user_id,
                domain,
                handle,
            } => commands::profile::link(&context, user_id, domain, handle).await?,
        },
        Commands::Contacts { action } => match action {
            ContactsAction::Add { id, name } => commands::contacts::add(&context, id, name).await?,
            ContactsAction::Import { file } => commands::contacts::import(&context, &file).await?,
            ContactsAction::List { json } => commands::contacts::list(&context, json).await?,
        },
        Commands::Config { action } => match action {
            ConfigAction::Init => commands::config::init(&context)?,
            ConfigAction::Show => commands::config::show(&context)?,
            ConfigAction::SetConfigUrl { url } => commands::config::set_config_url(&context, url)?,
        },
    }

    Ok(())
}
