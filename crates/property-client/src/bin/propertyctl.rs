//! Command-line front end for the property API.
//!
//! Connection settings come from `PROPERTY_CLIENT_*` variables and config
//! files; the subcommand and its arguments come from the command line.

use std::ffi::OsString;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use property_client::api::{HttpPropertyApi, PropertyApi};
use property_client::columns::{ColumnConfig, ColumnLayoutStore};
use property_client::config::ClientSettings;
use property_client::form::PropertyForm;
use property_client::local_store::LocalStore;
use property_client::model::{Property, PropertyStatistics, PropertyStatus};
use property_client::money::format_amount;
use property_client::store::PropertyStore;

#[derive(Debug, Parser)]
#[command(name = "propertyctl", about = "Manage property listings")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Edit the listing column layout.
    Columns {
        #[command(subcommand)]
        action: ColumnAction,
    },
    #[command(flatten)]
    Remote(RemoteCommand),
}

#[derive(Debug, Subcommand)]
enum RemoteCommand {
    /// List one page of properties.
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        take: u32,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Create a property.
    Create(FormArgs),
    /// Replace a property.
    Update {
        id: String,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Delete a property.
    Delete { id: String },
    /// Show collection statistics.
    Stats,
}

#[derive(Debug, clap::Args)]
struct FormArgs {
    #[arg(long)]
    title: String,
    /// Price in major units, e.g. 1250.50.
    #[arg(long)]
    price: String,
    #[arg(long)]
    currency: String,
    #[arg(long)]
    location: String,
    #[arg(long)]
    bedrooms: u32,
    #[arg(long)]
    bathrooms: u32,
    #[arg(long, default_value = "available")]
    status: PropertyStatus,
}

impl From<FormArgs> for PropertyForm {
    fn from(args: FormArgs) -> Self {
        Self {
            title: args.title,
            price: args.price,
            currency: args.currency,
            location: args.location,
            bedrooms: args.bedrooms,
            bathrooms: args.bathrooms,
            status: Some(args.status),
        }
    }
}

#[derive(Debug, Subcommand)]
enum ColumnAction {
    /// Print the layout.
    Show,
    /// Hide a column.
    Hide { key: String },
    /// Unhide a column.
    Unhide { key: String },
    /// Move a column to a one-based position.
    Move { key: String, position: usize },
    /// Restore the default layout.
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(std::io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let settings = ClientSettings::load_from_iter([OsString::from("propertyctl")])
        .wrap_err("failed to load client settings")?;
    let mut columns = ColumnLayoutStore::load(LocalStore::open(&settings.columns_dir())?);

    match cli.command {
        Command::Columns { action } => edit_columns(&mut columns, action),
        Command::Remote(command) => run_remote(command, &settings, &columns).await,
    }
}

async fn run_remote(
    command: RemoteCommand,
    settings: &ClientSettings,
    columns: &ColumnLayoutStore,
) -> Result<()> {
    let api = Arc::new(HttpPropertyApi::from_settings(settings)?);
    let store = PropertyStore::new(api.clone());
    match command {
        RemoteCommand::List { page, take, search } => {
            list(&store, page, take, &search).await?;
            let state = store.snapshot();
            print_table(columns.layout().visible().collect(), &state.items);
            if let Some(meta) = state.meta {
                println!(
                    "page {}/{} ({} of {} properties)",
                    meta.current_page, meta.total_pages, meta.item_count, meta.total_items
                );
            }
        }
        RemoteCommand::Create(form) => {
            let payload = PropertyForm::from(form).validate()?;
            let created = store.create(&payload).await?;
            println!("Property created successfully: {}", created.id);
        }
        RemoteCommand::Update { id, form } => {
            let payload = PropertyForm::from(form).validate()?;
            let updated = store.update(&id, &payload).await?;
            println!("Property updated successfully: {}", updated.id);
        }
        RemoteCommand::Delete { id } => {
            match store.delete(&id).await? {
                Some(deleted) => println!("Property deleted successfully: {}", deleted.title),
                None => println!("Property deleted successfully: {id}"),
            }
        }
        RemoteCommand::Stats => print_statistics(&api.statistics().await?),
    }
    Ok(())
}

/// Drive the store to the requested page, issuing only the fetches needed.
async fn list(store: &PropertyStore, page: u32, take: u32, search: &str) -> Result<()> {
    let defaults = store.snapshot();
    let mut fetched = false;
    if take != defaults.items_per_page {
        store.set_items_per_page(take).await?;
        fetched = true;
    }
    if !search.trim().is_empty() {
        store.set_search_query(search).await?;
        fetched = true;
    }
    if page != defaults.current_page {
        store.set_page(page).await?;
        fetched = true;
    }
    if !fetched {
        store.fetch().await?;
    }
    Ok(())
}

fn edit_columns(columns: &mut ColumnLayoutStore, action: ColumnAction) -> Result<()> {
    match action {
        ColumnAction::Show => {}
        ColumnAction::Hide { key } => columns.set_visible(&key, false)?,
        ColumnAction::Unhide { key } => columns.set_visible(&key, true)?,
        ColumnAction::Move { key, position } => columns.move_column(&key, position)?,
        ColumnAction::Reset => columns.reset(),
    }
    for column in columns.layout().columns() {
        let marker = if column.visible { "x" } else { " " };
        println!("{:>2}. [{marker}] {} ({})", column.order, column.label, column.key);
    }
    Ok(())
}

fn cell(column: &ColumnConfig, property: &Property) -> String {
    match column.key.as_str() {
        "title" => property.title.clone(),
        "price" => format_amount(&property.amount),
        "location" => property.location.clone(),
        "bedrooms" => property.bedrooms.to_string(),
        "bathrooms" => property.bathrooms.to_string(),
        "status" => property.status.to_string(),
        "actions" => property.id.clone(),
        _ => String::new(),
    }
}

fn print_table(columns: Vec<&ColumnConfig>, items: &[Property]) {
    let header: Vec<&str> = columns.iter().map(|column| column.label.as_str()).collect();
    println!("{}", header.join("\t"));
    for property in items {
        let row: Vec<String> = columns.iter().map(|column| cell(column, property)).collect();
        println!("{}", row.join("\t"));
    }
}

fn print_statistics(stats: &PropertyStatistics) {
    println!("Total properties: {}", stats.total_properties);
    println!(
        "Available: {}  Sold: {}",
        stats.status_count.available, stats.status_count.sold
    );
    for (currency, average_minor) in &stats.average_price {
        println!("Average price: {currency} {:.2}", average_minor / 100.0);
    }
    for location in &stats.location_stats {
        println!(
            "{}: {:.2} bedrooms, {:.2} bathrooms",
            location.location, location.average_bedrooms, location.average_bathrooms
        );
    }
}
