//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::args::CliArgs;

const APP_NAME: &str = "zaimu-anki";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "zaimu";

const GOOGLE_DEVICE_CODE_URL: &str = "https://oauth2.googleapis.com/device/code";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";
const SECURE_TOKEN_URL: &str = "https://securetoken.googleapis.com/v1";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Firebase project settings.
    #[serde(default)]
    pub firebase: FirebaseConfig,

    /// Google sign-in settings.
    #[serde(default)]
    pub google: GoogleConfig,

    /// Session handling.
    #[serde(default)]
    pub auth: AuthConfig,

    /// UI configuration.
    #[serde(default)]
    pub ui: UiConfig,
}

/// Firebase project settings, as shown in the Firebase console SDK snippet.
///
/// All values are opaque strings supplied by the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirebaseConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub auth_domain: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub storage_bucket: String,
    #[serde(default)]
    pub messaging_sender_id: String,
    #[serde(default)]
    pub app_id: String,

    /// Identity Toolkit endpoint override (emulators, tests).
    #[serde(default = "default_identity_toolkit_url")]
    pub identity_toolkit_url: String,

    /// Secure Token endpoint override (emulators, tests).
    #[serde(default = "default_secure_token_url")]
    pub secure_token_url: String,
}

impl Default for FirebaseConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            auth_domain: String::new(),
            project_id: String::new(),
            storage_bucket: String::new(),
            messaging_sender_id: String::new(),
            app_id: String::new(),
            identity_toolkit_url: default_identity_toolkit_url(),
            secure_token_url: default_secure_token_url(),
        }
    }
}

/// Google OAuth client used for the device sign-in flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleConfig {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,

    /// Open the verification page in the default browser.
    #[serde(default = "default_true")]
    pub open_browser: bool,

    #[serde(default = "default_device_code_url")]
    pub device_code_url: String,

    #[serde(default = "default_token_url")]
    pub token_url: String,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            open_browser: true,
            device_code_url: default_device_code_url(),
            token_url: default_token_url(),
        }
    }
}

/// Session handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Keep the session across restarts (refresh token in the system keyring).
    #[serde(default = "default_true")]
    pub persist_session: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            persist_session: true,
        }
    }
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Title shown in the header bar.
    #[serde(default = "default_title")]
    pub title: String,

    /// Duration of non-blocking notices in seconds.
    #[serde(default = "default_notice_duration")]
    pub notice_duration: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            notice_duration: default_notice_duration(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_title() -> String {
    "Zaimu Anki".to_string()
}

fn default_notice_duration() -> u64 {
    5
}

fn default_identity_toolkit_url() -> String {
    IDENTITY_TOOLKIT_URL.to_string()
}

fn default_secure_token_url() -> String {
    SECURE_TOKEN_URL.to_string()
}

fn default_device_code_url() -> String {
    GOOGLE_DEVICE_CODE_URL.to_string()
}

fn default_token_url() -> String {
    GOOGLE_TOKEN_URL.to_string()
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(api_key) = args.firebase_api_key {
            self.firebase.api_key = api_key;
        }
        if let Some(auth_domain) = args.firebase_auth_domain {
            self.firebase.auth_domain = auth_domain;
        }
        if let Some(project_id) = args.firebase_project_id {
            self.firebase.project_id = project_id;
        }
        if let Some(storage_bucket) = args.firebase_storage_bucket {
            self.firebase.storage_bucket = storage_bucket;
        }
        if let Some(sender_id) = args.firebase_messaging_sender_id {
            self.firebase.messaging_sender_id = sender_id;
        }
        if let Some(app_id) = args.firebase_app_id {
            self.firebase.app_id = app_id;
        }
        if let Some(client_id) = args.google_client_id {
            self.google.client_id = client_id;
        }
        if let Some(client_secret) = args.google_client_secret {
            self.google.client_secret = client_secret;
        }
        if let Some(open_browser) = args.open_browser {
            self.google.open_browser = open_browser;
        }
        if let Some(persist_session) = args.persist_session {
            self.auth.persist_session = persist_session;
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("zaimu-anki.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            firebase: FirebaseConfig::default(),
            google: GoogleConfig::default(),
            auth: AuthConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_config_sections() {
        let toml_content = r#"
            log_level = "debug"

            [firebase]
            api_key = "AIzaTestKey"
            auth_domain = "demo.firebaseapp.com"
            project_id = "demo"
            storage_bucket = "demo.firebasestorage.app"
            messaging_sender_id = "1234"
            app_id = "1:1234:web:abcd"

            [google]
            client_id = "client.apps.googleusercontent.com"
            open_browser = false

            [auth]
            persist_session = false
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.firebase.project_id, "demo");
        assert_eq!(config.firebase.identity_toolkit_url, IDENTITY_TOOLKIT_URL);
        assert_eq!(config.google.client_id, "client.apps.googleusercontent.com");
        assert!(!config.google.open_browser);
        assert_eq!(config.google.token_url, GOOGLE_TOKEN_URL);
        assert!(!config.auth.persist_session);
        assert_eq!(config.ui.title, "Zaimu Anki");
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert!(config.firebase.api_key.is_empty());
        assert_eq!(config.firebase.secure_token_url, SECURE_TOKEN_URL);
        assert!(config.google.open_browser);
        assert!(config.auth.persist_session);
        assert_eq!(config.ui.notice_duration, 5);
    }

    #[test]
    fn test_args_override_file_values() {
        let mut config = AppConfig::default();
        config.firebase.api_key = "from-file".to_string();

        let args = CliArgs::parse_from([
            "zaimu-anki",
            "--firebase-api-key",
            "from-cli",
            "--persist-session",
            "false",
            "--log-level",
            "warn",
        ]);
        config.merge_with_args(args);

        assert_eq!(config.firebase.api_key, "from-cli");
        assert!(!config.auth.persist_session);
        assert_eq!(config.log_level, LogLevel::Warn);
    }
}
