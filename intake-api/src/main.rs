//! intake-api - Form Intake & Triage service
//!
//! HTTP service for submitting question/answer forms, rating their urgency
//! from answer sentiment, and progressing them through the review lifecycle.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use intake_api::services::{SentimentClient, UrgencyClassifier};
use intake_api::{build_router, AppState};
use intake_common::config::Settings;
use intake_common::db::init_database;

#[derive(Debug, Parser)]
#[command(name = "intake-api", version, about = "Form intake and triage service")]
struct Args {
    /// Data folder holding the intake database
    #[arg(long)]
    data_folder: Option<String>,

    /// Address to listen on (host:port)
    #[arg(long)]
    listen: Option<String>,

    /// Base URL of the sentiment analysis service
    #[arg(long)]
    sentiment_host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting intake-api (Form Intake & Triage) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let args = Args::parse();

    // Missing sentiment host or an unusable database is startup-fatal;
    // nothing degrades to a per-request error here
    let settings = Settings::resolve(
        args.data_folder.as_deref(),
        args.listen.as_deref(),
        args.sentiment_host.as_deref(),
    )?;

    let db_path = settings.database_path();
    info!("Database path: {}", db_path.display());
    let pool = init_database(&db_path).await?;
    info!("✓ Database ready");

    let sentiment = SentimentClient::new(&settings.sentiment_host)
        .map_err(|e| anyhow::anyhow!("Failed to construct sentiment client: {}", e))?;
    let classifier = UrgencyClassifier::new(sentiment);
    info!("✓ Sentiment client targeting {}", settings.sentiment_host);

    let state = AppState::new(pool, classifier);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(settings.listen_addr).await?;
    info!("intake-api listening on http://{}", settings.listen_addr);
    info!("Health check: http://{}/health", settings.listen_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
