use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub authorizer: AuthorizerConfig,
    #[serde(default)]
    pub notifier: NotifierConfig,
    /// Seed three demo accounts on an empty store at startup
    #[serde(default = "default_seed")]
    pub seed_demo_data: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

/// External authorization service
///
/// Without a url the service falls back to the always-allow in-process
/// gate, matching the original stub behavior.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthorizerConfig {
    pub url: Option<String>,
    pub timeout_ms: u64,
}

impl Default for AuthorizerConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_ms: 2000,
        }
    }
}

/// External notification service (best-effort, post-commit)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NotifierConfig {
    pub url: Option<String>,
    pub timeout_ms: u64,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_ms: 2000,
        }
    }
}

fn default_seed() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: "./logs".to_string(),
            log_file: "payflow.log".to_string(),
            use_json: false,
            rotation: "daily".to_string(),
            gateway: GatewayConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            authorizer: AuthorizerConfig::default(),
            notifier: NotifierConfig::default(),
            seed_demo_data: true,
        }
    }
}

impl AppConfig {
    pub fn load(env: &str) -> anyhow::Result<Self> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Load `config/{env}.yaml`, falling back to defaults when absent
    pub fn load_or_default(env: &str) -> Self {
        let config_path = format!("config/{}.yaml", env);
        if Path::new(&config_path).exists() {
            match Self::load(env) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Failed to parse {}: {} - using defaults", config_path, e);
                    Self::default()
                }
            }
        } else {
            Self::default()
        }
    }
}
