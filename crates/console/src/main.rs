//! `qms-console`: command-line front end of the quality-management console.

mod commands;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use qms_console::config::ConsoleConfig;
use qms_console::context::Console;

/// Quality-management console.
#[derive(Parser, Debug)]
#[command(name = "qms-console", about = "Quality-management admin console")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and persist the session token.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },

    /// Forget the persisted session token.
    Logout,

    /// List one page of a management table.
    List {
        resource: Table,
        #[arg(long, default_value = "")]
        keyword: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long = "page-size", default_value_t = 10)]
        page_size: i32,
    },

    /// Delete records of a management table in one request.
    Delete {
        resource: Table,
        #[arg(required = true)]
        ids: Vec<i64>,
    },

    /// Search products by product model description.
    Products {
        #[arg(long)]
        keyword: String,
        /// Product line id.
        #[arg(long)]
        line: Option<i64>,
        #[arg(long)]
        defect: Option<bool>,
        #[arg(long)]
        reason: Option<String>,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long = "page-size", default_value_t = 10)]
        page_size: i32,
    },

    /// Products stored on a pallet.
    PalletProducts {
        pallet_id: i64,
        /// Write the traceability workbook.
        #[arg(long)]
        export: bool,
    },

    /// Defect, inspection or cost report.
    Report {
        kind: ReportKind,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Defect report: supplier id.
        #[arg(long)]
        supplier_id: Option<i64>,
        /// Inspection and cost reports: supplier name.
        #[arg(long, default_value = "")]
        supplier: String,
        /// Defect report: product model description.
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        model_sn: String,
        #[arg(long, default_value = "")]
        batch: String,
        #[arg(long, default_value = "")]
        motor_type: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long = "page-size", default_value_t = 10)]
        page_size: i32,
        /// Export every matching row instead of printing a page.
        #[arg(long)]
        export: bool,
    },

    /// Dashboard chart data.
    Dashboard {
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Production plans active on a date.
    PlansOn { date: NaiveDate },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Table {
    Suppliers,
    ProductModels,
    ProductionPlans,
    ProductLines,
    Pallets,
    Users,
    Apis,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ReportKind {
    Defect,
    Inspection,
    Cost,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qms_console=info,qms_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ConsoleConfig::from_env()?;
    tracing::debug!(base_url = %config.api_base_url, token_file = %config.token_file.display(), "Loaded console configuration");

    let console = Console::from_config(&config)?;

    let mut notices = console.notifier.subscribe();
    let result = commands::run(&console, &config, cli.command).await;
    commands::print_notices(&mut notices);
    result
}
