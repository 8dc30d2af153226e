use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::application::VoucherService;
use crate::config::Config;
use crate::domain::{Percent, VoucherApplyResult};
use crate::storage::{SqliteVoucherStore, VoucherStore};

/// Vouchers - discount code issuance and redemption
#[derive(Parser)]
#[command(name = "vouchers")]
#[command(about = "Create percentage discount vouchers and redeem them once against an amount")]
#[command(version)]
pub struct Cli {
    /// Database file path (defaults to $VOUCHERS_DATABASE or vouchers.db)
    #[arg(short, long)]
    pub database: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Create a new voucher
    #[command(allow_negative_numbers = true)]
    Create {
        /// Voucher code (must be unique)
        code: String,

        /// Discount percentage, 1 to 100
        discount: Percent,
    },

    /// Apply a voucher to an amount, consuming it
    #[command(allow_negative_numbers = true)]
    Apply {
        /// Voucher code
        code: String,

        /// Order amount (at least 100 for the discount to apply)
        amount: f64,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a stored voucher
    Show {
        /// Voucher code
        code: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = Config::from_env().with_database(self.database);
        init_tracing(&config, self.verbose);

        match self.command {
            Commands::Init => {
                VoucherService::init(&config.database).await?;
                println!("Database initialized: {}", config.database);
            }

            Commands::Create { code, discount } => {
                let service = connect(&config).await?;
                service.create_voucher(&code, discount).await?;
                println!("Created voucher: {} ({}% off)", code, discount);
            }

            Commands::Apply { code, amount, json } => {
                let service = connect(&config).await?;
                let result = service.apply_voucher(&code, amount).await?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                } else {
                    print_apply_result(&code, &result);
                }
            }

            Commands::Show { code } => {
                let service = connect(&config).await?;
                let voucher = service
                    .store()
                    .get_voucher_by_code(&code)
                    .await?
                    .with_context(|| format!("Voucher not found: {}", code))?;

                println!("Voucher: {}", voucher.code);
                println!("  ID:       {}", voucher.id);
                println!("  Discount: {}%", voucher.discount);
                println!("  Used:     {}", if voucher.used { "yes" } else { "no" });
            }
        }

        Ok(())
    }
}

async fn connect(config: &Config) -> Result<VoucherService<SqliteVoucherStore>> {
    VoucherService::connect(&config.database)
        .await
        .with_context(|| format!("Cannot open database {} (run `vouchers init` first)", config.database))
}

fn print_apply_result(code: &str, result: &VoucherApplyResult) {
    println!("Applied voucher: {}", code);
    println!("  Amount:       {:.2}", result.amount);
    println!("  Discount:     {}%", result.discount);
    println!("  Savings:      {:.2}", result.savings());
    println!("  Final amount: {:.2}", result.final_amount);
}

/// Logs go to stderr; `RUST_LOG` takes precedence over `--verbose`.
fn init_tracing(config: &Config, verbose: bool) {
    let fallback = if verbose { "debug" } else { config.log_level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
