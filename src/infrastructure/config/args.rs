use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "zaimu-anki",
    version,
    about = "A terminal flashcard client for financial accounting",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Firebase Web API key.
    #[arg(long, env = "ZAIMU_FIREBASE_API_KEY", hide_env_values = true)]
    pub firebase_api_key: Option<String>,

    /// Firebase auth domain.
    #[arg(long, env = "ZAIMU_FIREBASE_AUTH_DOMAIN")]
    pub firebase_auth_domain: Option<String>,

    /// Firebase project identifier.
    #[arg(long, env = "ZAIMU_FIREBASE_PROJECT_ID")]
    pub firebase_project_id: Option<String>,

    /// Firebase storage bucket.
    #[arg(long, env = "ZAIMU_FIREBASE_STORAGE_BUCKET")]
    pub firebase_storage_bucket: Option<String>,

    /// Firebase messaging sender identifier.
    #[arg(long, env = "ZAIMU_FIREBASE_MESSAGING_SENDER_ID")]
    pub firebase_messaging_sender_id: Option<String>,

    /// Firebase application identifier.
    #[arg(long, env = "ZAIMU_FIREBASE_APP_ID")]
    pub firebase_app_id: Option<String>,

    /// Google OAuth client ID.
    #[arg(long, env = "ZAIMU_GOOGLE_CLIENT_ID")]
    pub google_client_id: Option<String>,

    /// Google OAuth client secret.
    #[arg(long, env = "ZAIMU_GOOGLE_CLIENT_SECRET", hide_env_values = true)]
    pub google_client_secret: Option<String>,

    /// Open the Google verification page in the browser.
    #[arg(long)]
    pub open_browser: Option<bool>,

    /// Keep the session across restarts.
    #[arg(long)]
    pub persist_session: Option<bool>,
}
