//! deploy_manager - Artifact emission and toolchain invocation
//!
//! Owns the write-two-files-then-shell-out half of the deploy pipeline:
//! a timestamped `.sol` file under `contracts/`, its paired migration script
//! under `migrations/`, one run of the compile-and-deploy command, and the
//! address scrape over the captured output.

use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;
use tokio::fs;
use tokio::process::Command;
use tokio::time::{timeout, Duration};

use loan_core::{extract_contract_address, rename_contract, BASE_CONTRACT_NAME};

#[derive(Debug, Error)]
pub enum DeployError {
    #[error("Failed to write '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to run deploy command: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Deploy command timed out after {0} seconds")]
    Timeout(u64),

    #[error("Deploy command exited with status {status}: {stderr}")]
    ToolFailed { status: i32, stderr: String },
}

pub type Result<T> = std::result::Result<T, DeployError>;

/// Captured output of one toolchain run.
#[derive(Debug)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    /// stdout followed by stderr, for scraping across both streams.
    pub fn combined(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Result of one deploy attempt. A run whose output carries no address is a
/// soft success, not an error.
#[derive(Debug, PartialEq, Eq)]
pub enum DeployOutcome {
    Deployed(String),
    AddressUnknown,
}

pub struct DeployManager {
    project_dir: PathBuf,
    command: String,
    timeout_secs: u64,
}

impl DeployManager {
    pub fn new(
        project_dir: impl Into<PathBuf>,
        command: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            project_dir: project_dir.into(),
            command: command.into(),
            timeout_secs,
        }
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Timestamped identifier naming both emitted files.
    pub fn unique_contract_name(timestamp_ms: i64) -> String {
        format!("{BASE_CONTRACT_NAME}_{timestamp_ms}")
    }

    /// Write the renamed source under `contracts/`, creating the directory
    /// if absent.
    pub async fn write_contract(&self, name: &str, source: &str) -> Result<PathBuf> {
        let contracts_dir = self.project_dir.join("contracts");
        create_dir(&contracts_dir).await?;

        let path = contracts_dir.join(format!("{name}.sol"));
        write_file(&path, source).await?;
        Ok(path)
    }

    /// Write the migration script instructing the toolchain to deploy the
    /// named contract.
    pub async fn write_migration(&self, name: &str, timestamp_ms: i64) -> Result<PathBuf> {
        let migrations_dir = self.project_dir.join("migrations");
        create_dir(&migrations_dir).await?;

        let path = migrations_dir.join(format!("{timestamp_ms}_deploy_{name}.js"));
        write_file(&path, &migration_script(name)).await?;
        Ok(path)
    }

    /// Run the configured compile-and-deploy shell command in the project
    /// directory and capture its output. Non-zero exit is an error carrying
    /// stderr.
    pub async fn compile_and_migrate(&self) -> Result<ProcessOutput> {
        let mut command = Command::new("sh");
        command
            .arg("-c")
            .arg(&self.command)
            .current_dir(&self.project_dir);

        let output = timeout(Duration::from_secs(self.timeout_secs), command.output())
            .await
            .map_err(|_| DeployError::Timeout(self.timeout_secs))??;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            return Err(DeployError::ToolFailed {
                status: output.status.code().unwrap_or(-1),
                stderr,
            });
        }

        Ok(ProcessOutput { stdout, stderr })
    }

    /// Full single-attempt pipeline: rename, emit both artifacts, run the
    /// tool, scrape the output for the deployed address.
    pub async fn deploy(&self, source: &str) -> Result<DeployOutcome> {
        let timestamp = Utc::now().timestamp_millis();
        let name = Self::unique_contract_name(timestamp);
        let renamed = rename_contract(source, &name);

        let sol_path = self.write_contract(&name, &renamed).await?;
        log::info!("Wrote new Solidity file: {}", sol_path.display());

        let migration_path = self.write_migration(&name, timestamp).await?;
        log::info!("Wrote new migration file: {}", migration_path.display());

        let output = self.compile_and_migrate().await?;
        log::debug!("Deploy tool stdout:\n{}", output.stdout);

        match extract_contract_address(&output.combined()) {
            Some(address) => Ok(DeployOutcome::Deployed(address)),
            None => {
                log::warn!("Deploy output carried no contract address");
                Ok(DeployOutcome::AddressUnknown)
            }
        }
    }
}

fn migration_script(name: &str) -> String {
    format!(
        r#"const {name} = artifacts.require("{name}");

module.exports = function (deployer) {{
  deployer.deploy({name});
}};
"#
    )
}

async fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).await.map_err(|source| DeployError::Io {
        path: path.display().to_string(),
        source,
    })
}

async fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).await.map_err(|source| DeployError::Io {
        path: path.display().to_string(),
        source,
    })
}
