use std::{error::Error, fs, path::PathBuf};

use api_types::receipt::{ItemsReplace, LineItem, Receipt};
use clap::{Parser, Subcommand};
use client::{Gateway, config};

#[derive(Parser, Debug)]
#[command(name = "scontrino")]
#[command(about = "Terminal client for the receipt tracker")]
struct Cli {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Force demo mode (serve everything from the local store).
    #[arg(long)]
    demo: bool,
    /// Override the remote base URL (e.g. http://127.0.0.1:8000).
    #[arg(long, env = "RECEIPTS_BASE_URL")]
    base_url: Option<String>,
    /// Override the local state file path.
    #[arg(long)]
    state_path: Option<String>,
    /// Verbose logging.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List receipts, newest first.
    List,
    /// Show one receipt with its line items.
    Show { id: i64 },
    /// List a receipt's line items.
    Items { id: i64 },
    /// Replace a receipt's items from a JSON file ({"items": [...]}).
    SetItems { id: i64, file: PathBuf },
    /// Upload a receipt image.
    Upload { file: PathBuf },
    /// Spending statistics.
    Stats {
        #[command(subcommand)]
        report: StatsReport,
    },
    /// Export the local dataset as CSV files (receipts.csv + items.csv).
    Export { dir: PathBuf },
    /// Clear the local store; the next read re-seeds the demo dataset.
    Reset,
}

#[derive(Subcommand, Debug)]
enum StatsReport {
    /// Total spent per item name.
    Spending,
    /// Totals per category group.
    Categories,
}

fn print_receipt_line(receipt: &Receipt) {
    println!(
        "#{:<5} {:<20} {:<12} {:>12}  {}",
        receipt.id,
        receipt.store_name.as_deref().unwrap_or("-"),
        receipt.date.as_deref().unwrap_or("-"),
        receipt.total_amount.display_text(),
        receipt.category.as_deref().unwrap_or("-"),
    );
}

fn print_item_line(item: &LineItem) {
    println!(
        "  {:<5} {:<24} {:>6} x {:>10} = {:>12}",
        item.id,
        item.item_name.as_deref().unwrap_or("-"),
        item.quantity.display_text(),
        item.unit_price.display_text(),
        item.total_price.display_text(),
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(format!("scontrino={level},client={level},engine={level}"))
        .init();

    let mut settings = match cli.config.as_deref() {
        Some(path) => config::load_from(path)?,
        None => config::load()?,
    };
    if cli.demo {
        settings.demo_mode = "1".to_string();
    }
    if let Some(base_url) = cli.base_url {
        settings.base_url = base_url;
    }
    if let Some(state_path) = cli.state_path {
        settings.state_path = state_path;
    }

    let gateway = Gateway::from_config(&settings)?;

    match cli.command {
        Command::List => {
            for receipt in gateway.list_receipts().await? {
                print_receipt_line(&receipt);
            }
        }
        Command::Show { id } => match gateway.get_receipt(id).await? {
            Some(receipt) => {
                print_receipt_line(&receipt);
                for item in &receipt.items {
                    print_item_line(item);
                }
            }
            None => {
                eprintln!("receipt not found: {id}");
                std::process::exit(1);
            }
        },
        Command::Items { id } => {
            for item in gateway.receipt_items(id).await? {
                print_item_line(&item);
            }
        }
        Command::SetItems { id, file } => {
            let payload = fs::read_to_string(&file)?;
            let body: ItemsReplace = serde_json::from_str(&payload)?;
            match gateway.replace_items(id, body.items).await? {
                Some(items) => {
                    println!("replaced with {} items:", items.len());
                    for item in &items {
                        print_item_line(item);
                    }
                }
                None => {
                    eprintln!("receipt not found: {id}");
                    std::process::exit(1);
                }
            }
        }
        Command::Upload { file } => {
            let bytes = fs::read(&file)?;
            let file_name = file
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("receipt.jpg");
            let receipt = gateway.upload_receipt(file_name, bytes).await?;
            println!("created receipt #{}", receipt.id);
            print_receipt_line(&receipt);
        }
        Command::Stats {
            report: StatsReport::Spending,
        } => {
            for entry in gateway.spending_by_item().await? {
                println!("{:>12}  {}", entry.total_spent, entry.item_name);
            }
        }
        Command::Stats {
            report: StatsReport::Categories,
        } => {
            for bucket in gateway.category_totals().await?.groups {
                println!("{:>12}  {}", bucket.total, bucket.group.label());
            }
        }
        Command::Export { dir } => {
            fs::create_dir_all(&dir)?;
            let receipts = gateway.local_store().list_receipts()?;
            let receipts_file = fs::File::create(dir.join("receipts.csv"))?;
            let items_file = fs::File::create(dir.join("items.csv"))?;
            engine::export_csv(&receipts, receipts_file, items_file)?;
            println!("exported {} receipts to {}", receipts.len(), dir.display());
        }
        Command::Reset => {
            gateway.reset_local()?;
            println!("local store cleared");
        }
    }

    Ok(())
}
