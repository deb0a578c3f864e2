use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use ecopoints_core::RedemptionService;
use ecopoints_core::catalog::{categories, category_icon};
use ecopoints_core::tasks::expiry_sweep::spawn_expiry_sweep_task;
use ecopoints_ml::ImageUpload;

mod context;
use context::AppContext;

#[derive(Parser, Debug, Clone)]
#[command(name = "ecopoints")]
#[command(author, version, about = "EcoPoints - waste classification and rewards marketplace")]
pub struct Args {
    /// Starting point balance (overrides ECOPOINTS_STARTING_BALANCE)
    #[arg(long, global = true)]
    balance: Option<u64>,

    /// JSON voucher catalog to use instead of the built-in one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Simulated redemption service delay in milliseconds
    #[arg(long, global = true)]
    submit_delay_ms: Option<u64>,

    /// Classification endpoint (overrides ECOPOINTS_BACKEND_URL)
    #[arg(long, global = true)]
    backend_url: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true, default_value = "false")]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Send an image to the classification backend
    Classify { path: PathBuf },
    /// List voucher categories
    Categories,
    /// List active vouchers
    Catalog {
        #[arg(long)]
        category: Option<String>,
    },
    /// Redeem one or more vouchers in order
    Redeem {
        #[arg(required = true)]
        voucher_ids: Vec<String>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("ecopoints=info".parse().unwrap_or_default());
    let sub = fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(sub)
        .expect("Failed to set global subscriber");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();
    let args = Args::parse();

    let ctx = AppContext::new(&args).await?;
    let sweep = spawn_expiry_sweep_task(
        ctx.redemption_service.clone(),
        ctx.rewards_config.expiry_sweep_interval,
    );

    let result = run_command(&ctx, &args).await;
    sweep.abort();

    if let Err(e) = &result {
        error!("Command failed: {:?}", e);
    }
    result
}

async fn run_command(ctx: &AppContext, args: &Args) -> anyhow::Result<()> {
    match &args.command {
        Command::Classify { path } => {
            let upload = ImageUpload::from_path(path).await?;
            let result = ctx.classifier.classify(&upload).await?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!(
                    "{} => {} ({}% confidence, {} ms)",
                    upload.file_name, result.category, result.confidence, result.processing_time_ms
                );
            }
        }
        Command::Categories => {
            for c in categories() {
                println!("{} {:<14} {}", c.icon, c.key, c.title);
            }
        }
        Command::Catalog { category } => {
            let service = &ctx.redemption_service;
            let balance = service.balance().await;
            println!("Available eco-points: {}", balance);
            let vouchers = service.catalog(category.as_deref()).await;
            if vouchers.is_empty() {
                println!("No vouchers found in this category.");
            }
            for v in vouchers {
                let low_stock = service.is_low_stock(&v).await;
                let stock = match v.current_stock {
                    Some(s) if low_stock => format!("only {} left!", s),
                    Some(s) => format!("{} in stock", s),
                    None => "unlimited".to_string(),
                };
                let marker = if service.can_redeem(&v.id).await { "*" } else { " " };
                println!(
                    "{} {} [{}] {:<24} {:<12} {:>5} pts  {:<10} {}",
                    marker, category_icon(&v.category), v.id, v.title, v.brand, v.points_required, v.value, stock
                );
            }
        }
        Command::Redeem { voucher_ids } => {
            redeem_batch(&ctx.redemption_service, voucher_ids, args.json).await?;
        }
    }
    Ok(())
}

/// Redeems each id in order. Every id is attempted; the batch fails if any did.
async fn redeem_batch(service: &RedemptionService, voucher_ids: &[String], json: bool) -> anyhow::Result<()> {
    let mut failed = 0usize;
    for id in voucher_ids {
        match service.redeem(id).await {
            Ok(receipt) if json => println!("{}", serde_json::to_string_pretty(&receipt)?),
            Ok(receipt) => println!("{}", receipt.message),
            Err(e) => {
                failed += 1;
                warn!("Redemption of '{}' failed: {}", id, e);
                eprintln!("Could not redeem '{}': {}", id, e);
            }
        }
    }
    let summary = service.summary().await;
    info!("Session finished with {} transaction(s)", summary.total_transactions);
    println!(
        "Balance: {} | spent {} | transactions {}",
        service.balance().await, summary.total_spent, summary.total_transactions
    );

    if failed > 0 {
        anyhow::bail!("{} of {} redemption(s) failed", failed, voucher_ids.len());
    }
    Ok(())
}
