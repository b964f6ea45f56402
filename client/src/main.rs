//! Scrap ledger report
//!
//! Fetches the scrap ledger of one item (or the per-item summary when no
//! item is configured) and prints it as CSV on stdout.

use std::io::Write;

use scrap_erp_client::services::{LedgerService, ReportingService};
use scrap_erp_client::{ApiClient, Config, Session};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    // Initialize tracing; logs go to stderr so stdout stays CSV
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "scrap_erp_client=debug,reqwest=warn".into());
    if config.logging.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::info!("Environment: {}", config.environment);
    tracing::info!("Backend: {}", config.api.base_url);

    let session = Session::from_config(&config);
    let api = ApiClient::new(&config.api, config.is_production())?;

    if let Some(credentials) = &session.company_credentials {
        api.auth().authenticate_company(&session, credentials).await?;
    }

    let ledger = LedgerService::new(api, config.ledger.replay_order);
    let range = config.report.date_range();

    let csv = match config.report.item_id {
        Some(item_id) => {
            let rows = ledger.item_ledger(&session, Some(item_id), &range).await?;
            ReportingService::ledger_csv(&rows)?
        }
        None => {
            let summaries = ledger.summary(&session, &range).await?;
            ReportingService::summary_csv(&summaries)?
        }
    };

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(csv.as_bytes())?;
    stdout.flush()?;

    Ok(())
}
