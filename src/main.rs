use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use grainflow::config::{ClientConfig, normalize_api_url};
use grainflow::error::{ApiError, ConfigError, FetchError, SubmitError};
use grainflow::net::api::HttpDonationApi;
use grainflow::net::types::{Donation, ListScope};
use grainflow::state::dashboard::{Dashboard, EMPTY_LIST_NOTICE};
use grainflow::state::landing::{Entry, entry_for};
use grainflow::state::submission::DraftField;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("could not load donations: {0}")]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Submit(#[from] SubmitError),
    #[error("listing your own donations requires a token; pass --token or set GRAINFLOW_TOKEN")]
    MissingToken,
}

#[derive(Parser, Debug)]
#[command(name = "grainflow", about = "Donor client for the food-donation service")]
struct Cli {
    #[arg(long, env = "GRAINFLOW_API_URL")]
    api_url: Option<String>,

    #[arg(long, env = "GRAINFLOW_TOKEN")]
    token: Option<String>,

    #[arg(long, env = "GRAINFLOW_FULL_NAME")]
    full_name: Option<String>,

    #[arg(long, value_enum)]
    scope: Option<ScopeArg>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ScopeArg {
    All,
    Mine,
}

impl From<ScopeArg> for ListScope {
    fn from(value: ScopeArg) -> Self {
        match value {
            ScopeArg::All => Self::All,
            ScopeArg::Mine => Self::Mine,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print donations in service order.
    List,
    /// Print impact stats.
    Stats,
    /// Submit a new donation, then print the reloaded list.
    Add {
        #[arg(long)]
        food_type: String,
        #[arg(long)]
        quantity: String,
        #[arg(long, default_value = "")]
        storage: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = resolve_config(&cli)?;
    let session = config.session();
    if config.list_scope == ListScope::Mine && entry_for(&session) != Entry::Dashboard {
        return Err(CliError::MissingToken);
    }

    let api = Arc::new(HttpDonationApi::from_config(&config)?);
    tracing::info!(api_url = %api.base_url(), scope = ?config.list_scope, "grainflow client ready");

    let mut dashboard = Dashboard::mount(api, session, config.list_scope).await;
    println!("{}", dashboard.greeting());

    match cli.command {
        Command::List => {
            if let Some(err) = dashboard.feed_error().await {
                return Err(err.into());
            }
            print_donations(&dashboard.donations().await);
        }
        Command::Stats => {
            if let Some(err) = dashboard.feed_error().await {
                return Err(err.into());
            }
            let stats = dashboard.stats().await;
            println!("KGs donated:  {}", stats.kgs_donated);
            println!("Points:       {}", stats.points);
            println!("NGOs helped:  {}", stats.ngos_helped);
        }
        Command::Add { food_type, quantity, storage, notes } => {
            dashboard.open_new_donation();
            if let Some(form) = dashboard.form_mut() {
                form.update_field(DraftField::FoodType, food_type);
                form.update_field(DraftField::Quantity, quantity);
                form.update_field(DraftField::Storage, storage);
                form.update_field(DraftField::Notes, notes);
            }
            let submitted = dashboard.submit_donation().await?;
            println!("{}", submitted.notice);

            dashboard.reload_settled().await?;
            print_donations(&dashboard.donations().await);
        }
    }
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<ClientConfig, CliError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = &cli.api_url {
        config.api_url = normalize_api_url(url);
    }
    if cli.token.is_some() {
        config.token.clone_from(&cli.token);
    }
    if cli.full_name.is_some() {
        config.full_name.clone_from(&cli.full_name);
    }
    if let Some(scope) = cli.scope {
        config.list_scope = scope.into();
    }
    Ok(config)
}

fn print_donations(items: &[Donation]) {
    if items.is_empty() {
        println!("{EMPTY_LIST_NOTICE}");
        return;
    }
    for d in items {
        let quantity = d.quantity_or_zero();
        let added = d.created_at.as_deref().unwrap_or("unknown");
        println!("{}  {}  +{quantity} qty  added {added}", d.id, d.food_type);
        if let Some(safe_till) = &d.safe_till {
            println!("    safe till {safe_till}");
        }
    }
}
