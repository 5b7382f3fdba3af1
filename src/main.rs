//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here; classification lives in the domain, submission in SurveyService.

use dotenv::dotenv;
use ltip_advisor::adapters::auth::ConfigAuthenticator;
use ltip_advisor::adapters::clock::SystemClock;
use ltip_advisor::adapters::documents::FsDocumentStore;
use ltip_advisor::adapters::persistence::{SqliteSink, SupabaseSink};
use ltip_advisor::adapters::ui::tui::TuiInputPort;
use ltip_advisor::domain::CategoryTable;
use ltip_advisor::ports::{Authenticator, Clock, DocumentStore, InputPort, ResponseSink};
use ltip_advisor::shared::config::AppConfig;
use ltip_advisor::usecases::{AuthService, SurveyService};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    CategoryTable::verify().map_err(|e| anyhow::anyhow!("category table invalid: {}", e))?;

    let cfg = AppConfig::load().map_err(|e| anyhow::anyhow!("config load failed: {}", e))?;

    let authenticator = ConfigAuthenticator::new(cfg.credentials.clone());
    if authenticator.is_empty() {
        anyhow::bail!(
            "No accounts configured. Add [credentials.<username>] entries to the file named by LTIP_CONFIG"
        );
    }
    let authenticator: Arc<dyn Authenticator> = Arc::new(authenticator);

    // --- Response sink: Supabase when configured, local SQLite otherwise ---
    let sink: Arc<dyn ResponseSink> = if cfg.is_supabase_configured() {
        info!(
            table = %cfg.supabase_table_or_default(),
            "responses will be stored in Supabase"
        );
        Arc::new(SupabaseSink::new(
            cfg.supabase_url.clone().unwrap_or_default(),
            cfg.supabase_key.clone().unwrap_or_default(),
            cfg.supabase_table_or_default().to_string(),
        ))
    } else {
        warn!("SUPABASE_URL / SUPABASE_KEY not set, storing responses in local SQLite");
        Arc::new(
            SqliteSink::connect(cfg.data_dir_or_default())
                .await
                .map_err(|e| anyhow::anyhow!("SQLite connect failed: {}", e))?,
        )
    };

    let term_sheets_dir = PathBuf::from(cfg.term_sheets_dir_or_default());
    info!(path = %term_sheets_dir.display(), "term sheet directory");
    let documents: Arc<dyn DocumentStore> = Arc::new(FsDocumentStore::new(&term_sheets_dir));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // --- Services ---
    let auth_service = Arc::new(AuthService::new(authenticator));
    let survey_service = Arc::new(SurveyService::new(sink, documents, clock));

    ltip_advisor::adapters::ui::init_ui();

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(
        auth_service,
        survey_service,
        PathBuf::from(cfg.downloads_dir_or_default()),
    ));

    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
