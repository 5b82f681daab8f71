//! SalesPulse CLI
//!
//! Command-line interface for the SalesPulse metrics and alerting pipeline.

use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use rand::Rng;
use std::process::ExitCode;
use tracing::info;

use salespulse::alerting::{Notifier, SlackClient};
use salespulse::db::{MetricsStore, SqlitePool};
use salespulse::models::{Severity, Transaction};
use salespulse::pipeline::Pipeline;
use salespulse::Config;

/// SalesPulse - Daily sales metrics and Slack alerting
#[derive(Parser)]
#[command(name = "salespulse")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "SALESPULSE_CONFIG")]
    config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute one reporting and alerting pass
    Run {
        /// Channel to post to (overrides configuration)
        #[arg(long)]
        channel: Option<String>,

        /// Lookback window in days (overrides configuration)
        #[arg(long)]
        window: Option<u32>,
    },

    /// Open an incident thread in the alert channel
    Incident {
        /// Incident severity
        #[arg(long, value_enum)]
        severity: Severity,

        /// What is going on
        #[arg(long)]
        description: String,

        /// Channel to post to (overrides configuration)
        #[arg(long)]
        channel: Option<String>,
    },

    /// Database management
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum DbCommands {
    /// Run database migrations
    Migrate,

    /// Seed the database with sample transactions
    Seed {
        /// Number of sample transactions to create
        #[arg(long, default_value = "100")]
        transactions: usize,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config, cli.verbose);

    let result = match cli.command {
        Commands::Run { channel, window } => run_pipeline(config, channel, window).await,
        Commands::Incident {
            severity,
            description,
            channel,
        } => run_incident(config, severity, &description, channel).await,
        Commands::Db { command } => run_db(config, command).await,
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(config: &Config, verbose: bool) {
    let default_level = if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    if config.logging.format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn connect(config: &Config) -> anyhow::Result<MetricsStore> {
    let pool = SqlitePool::new(&config.database).await?;
    pool.health_check().await?;
    Ok(MetricsStore::new(&pool))
}

async fn run_pipeline(
    config: Config,
    channel: Option<String>,
    window: Option<u32>,
) -> anyhow::Result<()> {
    let store = connect(&config).await?;
    let notifier = Notifier::new(SlackClient::new(&config.slack));

    let mut alerting = config.alerting.clone();
    if let Some(window) = window {
        alerting.window_days = window;
    }
    let channel = channel.unwrap_or_else(|| config.slack.default_channel.clone());

    let pipeline = Pipeline::new(store, notifier, alerting, channel);
    let summary = pipeline.run().await?;

    println!(
        "Run complete: {} alert(s) triggered, {} message(s) delivered, {} failed",
        summary.alerts_triggered, summary.delivered, summary.failed_deliveries
    );
    Ok(())
}

async fn run_incident(
    config: Config,
    severity: Severity,
    description: &str,
    channel: Option<String>,
) -> anyhow::Result<()> {
    let notifier = Notifier::new(SlackClient::new(&config.slack));
    let channel = channel.unwrap_or_else(|| config.slack.default_channel.clone());

    match notifier.create_incident(&channel, severity, description).await {
        Some(incident) => {
            println!("Incident {} opened in {}", incident.id, incident.channel);
            Ok(())
        }
        None => anyhow::bail!("incident was not created; see logs for the delivery error"),
    }
}

async fn run_db(config: Config, command: DbCommands) -> anyhow::Result<()> {
    let pool = SqlitePool::new(&config.database).await?;

    match command {
        DbCommands::Migrate => {
            pool.migrate().await?;
            info!("Migrations applied");
        }
        DbCommands::Seed { transactions } => {
            pool.migrate().await?;
            let store = MetricsStore::new(&pool);
            seed(&store, transactions).await?;
            println!("Seeded {transactions} sample transaction(s)");
        }
    }
    Ok(())
}

async fn seed(store: &MetricsStore, count: usize) -> anyhow::Result<()> {
    const PRODUCTS: &[(&str, f64)] = &[
        ("widget", 19.99),
        ("gadget", 49.50),
        ("doohickey", 7.25),
        ("gizmo", 120.00),
    ];

    // Generate up front so the thread-local rng is not held across awaits
    let rows: Vec<Transaction> = {
        let mut rng = rand::thread_rng();
        (0..count)
            .map(|_| {
                let (product, price) = PRODUCTS[rng.gen_range(0..PRODUCTS.len())];
                Transaction {
                    id: 0,
                    customer_id: format!("customer-{}", rng.gen_range(1..=25)),
                    product_id: product.to_string(),
                    quantity: rng.gen_range(1..=5),
                    price,
                    transaction_date: Utc::now() - Duration::days(rng.gen_range(0..7)),
                }
            })
            .collect()
    };

    for tx in &rows {
        store.insert_transaction(tx).await?;
    }

    Ok(())
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "salespulse", &mut io::stdout());
}
