use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Runtime configuration, loaded from `config.toml` in the working directory
/// with environment variables taking precedence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// LLM API key. Required for the deploy pipeline.
    pub api_key: Option<String>,
    /// Chat-completions base URL.
    pub api_base: String,
    pub model: String,
    /// Development chain node RPC endpoint.
    pub rpc_url: String,
    /// Toolchain project directory holding contracts/ and migrations/.
    pub project_dir: PathBuf,
    /// Full compile-and-deploy shell command. Empty means the default
    /// truffle invocation built from `network`.
    #[serde(default)]
    pub deploy_command: Option<String>,
    pub network: String,
    pub port: u16,
    /// How many blocks the explorer walks back from the chain head.
    pub scan_depth: u64,
    pub deploy_timeout_secs: u64,
}

const CONFIG_FILE_PATH: &str = "config.toml";

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-4".to_string(),
            rpc_url: "http://localhost:7545".to_string(),
            project_dir: PathBuf::from("."),
            deploy_command: None,
            network: "development".to_string(),
            port: 4000,
            scan_depth: 20,
            deploy_timeout_secs: 300,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        let mut config = Config::default();

        if std::path::Path::new(CONFIG_FILE_PATH).exists() {
            if let Ok(content) = std::fs::read_to_string(CONFIG_FILE_PATH) {
                if let Ok(file_config) = toml::from_str::<Config>(&content) {
                    config = file_config;
                }
            }
        }

        if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
            config.api_key = Some(api_key);
        } else if let Ok(api_key) = std::env::var("API_KEY") {
            config.api_key = Some(api_key);
        }
        if let Ok(api_base) = std::env::var("API_BASE") {
            config.api_base = api_base;
        }
        if let Ok(model) = std::env::var("MODEL") {
            config.model = model;
        }
        if let Ok(rpc_url) = std::env::var("CHAIN_RPC_URL") {
            config.rpc_url = rpc_url;
        }
        if let Ok(project_dir) = std::env::var("PROJECT_DIR") {
            config.project_dir = PathBuf::from(project_dir);
        }
        if let Ok(deploy_command) = std::env::var("DEPLOY_COMMAND") {
            config.deploy_command = Some(deploy_command);
        }
        if let Ok(network) = std::env::var("DEPLOY_NETWORK") {
            config.network = network;
        }
        if let Ok(port) = std::env::var("APP_PORT") {
            if let Ok(port) = port.parse() {
                config.port = port;
            }
        }
        if let Ok(depth) = std::env::var("SCAN_DEPTH") {
            if let Ok(depth) = depth.parse() {
                config.scan_depth = depth;
            }
        }
        if let Ok(timeout) = std::env::var("DEPLOY_TIMEOUT_SECS") {
            if let Ok(timeout) = timeout.parse() {
                config.deploy_timeout_secs = timeout;
            }
        }
        config
    }

    /// The shell command the deploy step runs, falling back to the default
    /// truffle invocation for the configured network.
    pub fn resolved_deploy_command(&self) -> String {
        self.deploy_command.clone().unwrap_or_else(|| {
            format!(
                "truffle compile && truffle migrate --reset --network {}",
                self.network
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_local_dev_setup() {
        let config = Config::default();
        assert_eq!(config.rpc_url, "http://localhost:7545");
        assert_eq!(config.port, 4000);
        assert_eq!(config.scan_depth, 20);
        assert_eq!(config.network, "development");
    }

    #[test]
    fn default_deploy_command_targets_network() {
        let config = Config::default();
        assert_eq!(
            config.resolved_deploy_command(),
            "truffle compile && truffle migrate --reset --network development"
        );
    }

    #[test]
    fn explicit_deploy_command_wins() {
        let config = Config {
            deploy_command: Some("echo deployed".to_string()),
            ..Config::default()
        };
        assert_eq!(config.resolved_deploy_command(), "echo deployed");
    }
}
