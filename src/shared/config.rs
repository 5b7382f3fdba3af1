//! Application configuration. Paths, Supabase credentials, user accounts.

use serde::Deserialize;
use std::collections::HashMap;

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_TERM_SHEETS_DIR: &str = "./term_sheets";
pub const DEFAULT_DOWNLOADS_DIR: &str = "./downloads";

/// One login account. `password_sha256` is the lowercase hex SHA-256 of the password.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CredentialEntry {
    pub name: String,
    pub password_sha256: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Directory holding the local SQLite database. Read from LTIP_DATA_DIR.
    #[serde(default)]
    pub data_dir: Option<String>,

    /// Directory with the `<Tool_Name>.docx` term sheets. Read from LTIP_TERM_SHEETS_DIR.
    #[serde(default)]
    pub term_sheets_dir: Option<String>,

    /// Where downloaded term sheets are written. Read from LTIP_DOWNLOADS_DIR.
    #[serde(default)]
    pub downloads_dir: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Supabase (remote response sink)
    // ─────────────────────────────────────────────────────────────────────────
    /// Project URL. Read from LTIP_SUPABASE_URL or SUPABASE_URL.
    #[serde(default)]
    pub supabase_url: Option<String>,

    /// API key. Read from LTIP_SUPABASE_KEY or SUPABASE_KEY.
    #[serde(default)]
    pub supabase_key: Option<String>,

    /// Table receiving responses. Defaults to "survey".
    #[serde(default)]
    pub supabase_table: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Accounts (config file only)
    // ─────────────────────────────────────────────────────────────────────────
    /// username -> account.
    #[serde(default)]
    pub credentials: HashMap<String, CredentialEntry>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        if let Ok(path) = std::env::var("LTIP_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c = c.add_source(config::Environment::with_prefix("LTIP"));
        let mut cfg: Self = c.build()?.try_deserialize()?;
        // SUPABASE_URL / SUPABASE_KEY are read without prefix so an existing .env keeps working
        if cfg.supabase_url.is_none() {
            cfg.supabase_url = std::env::var("SUPABASE_URL").ok();
        }
        if cfg.supabase_key.is_none() {
            cfg.supabase_key = std::env::var("SUPABASE_KEY").ok();
        }
        Ok(cfg)
    }

    pub fn data_dir_or_default(&self) -> &str {
        self.data_dir.as_deref().unwrap_or(DEFAULT_DATA_DIR)
    }

    pub fn term_sheets_dir_or_default(&self) -> &str {
        self.term_sheets_dir
            .as_deref()
            .unwrap_or(DEFAULT_TERM_SHEETS_DIR)
    }

    pub fn downloads_dir_or_default(&self) -> &str {
        self.downloads_dir.as_deref().unwrap_or(DEFAULT_DOWNLOADS_DIR)
    }

    pub fn supabase_table_or_default(&self) -> &str {
        self.supabase_table.as_deref().unwrap_or("survey")
    }

    /// Returns true if both Supabase URL and key are present and non-empty.
    pub fn is_supabase_configured(&self) -> bool {
        matches!(
            (&self.supabase_url, &self.supabase_key),
            (Some(url), Some(key)) if !url.is_empty() && !key.is_empty()
        )
    }
}
