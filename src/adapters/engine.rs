//! Batch-export engine abstraction and the external-command implementation

use crate::config::{EngineConfig, NamingScheme};
use crate::domain::{CustodianName, DocketError, ItemSet, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;

/// Parameters of one partition export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    /// Directory the engine writes into (the job's items directory)
    pub destination: PathBuf,
    /// Custodian whose partition is exported; also the product path
    pub custodian: CustodianName,
    /// Naming scheme for the native product
    pub naming: NamingScheme,
    /// Product type
    pub product: String,
    /// Mail format for message stores
    pub mail_format: String,
}

/// Batch-export engine trait
///
/// One call exports one partition and blocks until the engine has finished
/// writing its files and report document.
#[async_trait]
pub trait ExportEngine: Send + Sync {
    /// Export the given items
    ///
    /// # Errors
    ///
    /// Returns `DocketError::ExportEngine` if the engine fails.
    async fn export_items(&self, items: &ItemSet, request: &ExportRequest) -> Result<()>;
}

/// Export engine that runs a configured external program per partition
///
/// Item ids are written to the program's stdin, one per line.
#[derive(Debug, Clone)]
pub struct CommandExportEngine {
    program: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl CommandExportEngine {
    /// Create an engine from configuration
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
            timeout: config.timeout_secs.map(Duration::from_secs),
        }
    }

    /// Arguments with the request's placeholders filled in
    pub fn render_args(&self, request: &ExportRequest) -> Vec<String> {
        let destination = request.destination.to_string_lossy();
        self.args
            .iter()
            .map(|arg| {
                arg.replace("{destination}", &destination)
                    .replace("{path}", request.custodian.as_str())
                    .replace("{custodian}", request.custodian.as_str())
                    .replace("{naming}", request.naming.as_str())
                    .replace("{product}", &request.product)
                    .replace("{mail_format}", &request.mail_format)
            })
            .collect()
    }
}

#[async_trait]
impl ExportEngine for CommandExportEngine {
    async fn export_items(&self, items: &ItemSet, request: &ExportRequest) -> Result<()> {
        tokio::fs::create_dir_all(&request.destination)
            .await
            .map_err(|e| DocketError::file_system("create", &request.destination, e))?;

        let args = self.render_args(request);
        tracing::debug!(program = %self.program, args = ?args, "Spawning export engine");

        let start = Instant::now();
        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                DocketError::ExportEngine(format!("Failed to spawn {}: {}", self.program, e))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            let mut payload = String::new();
            for id in items {
                payload.push_str(id.as_str());
                payload.push('\n');
            }
            tokio::spawn(async move {
                if let Err(e) = stdin.write_all(payload.as_bytes()).await {
                    tracing::debug!(error = %e, "Export engine closed stdin early");
                }
            });
        }

        let waited = match self.timeout {
            Some(limit) => timeout(limit, child.wait_with_output()).await.map_err(|_| {
                tracing::warn!(custodian = %request.custodian, "Export engine timed out after {:?}", limit);
                DocketError::ExportEngine(format!(
                    "{} timed out after {}s",
                    self.program,
                    limit.as_secs()
                ))
            })?,
            None => child.wait_with_output().await,
        };
        let output = waited.map_err(|e| {
            DocketError::ExportEngine(format!("Failed to wait for {}: {}", self.program, e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DocketError::ExportEngine(format!(
                "{} exited with {} for custodian {}: {}",
                self.program,
                output.status,
                request.custodian,
                stderr.trim()
            )));
        }

        tracing::debug!(
            custodian = %request.custodian,
            duration_secs = start.elapsed().as_secs_f32(),
            "Export engine finished"
        );
        Ok(())
    }
}
