use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use super::features::FeatureVector;
use super::predictor::{Prediction, Predictor, parse_prediction_output};
use crate::engine::errors::PredictionError;
use crate::shared::config::PredictionConfig;

/// Runs the model as a child process: `program [script] [mode] feature...`.
#[derive(Debug, Clone)]
pub struct ProcessPredictor {
    program: PathBuf,
    script: Option<String>,
    mode: Option<String>,
    working_dir: Option<PathBuf>,
    timeout: Duration,
}

impl ProcessPredictor {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            script: None,
            mode: None,
            working_dir: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn from_config(config: &PredictionConfig) -> Self {
        Self {
            program: config.program.clone(),
            script: config.script.clone(),
            mode: config.mode.clone(),
            working_dir: config.working_dir.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.script = Some(script.into());
        self
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn command(&self, features: &FeatureVector) -> Command {
        let mut cmd = Command::new(&self.program);
        if let Some(script) = &self.script {
            cmd.arg(script);
        }
        if let Some(mode) = &self.mode {
            cmd.arg(mode);
        }
        cmd.args(features.to_args());
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl Predictor for ProcessPredictor {
    async fn predict(&self, features: &FeatureVector) -> Result<Prediction, PredictionError> {
        debug!(
            target: "crop_series::predict",
            program = %self.program.display(),
            args = ?features.to_args(),
            "Spawning predictor"
        );
        let child = self.command(features).spawn().map_err(PredictionError::Spawn)?;

        // Dropping the wait future on timeout drops the child, which kills it.
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(PredictionError::Spawn)?,
            Err(_) => return Err(PredictionError::Timeout(self.timeout)),
        };

        if !output.status.success() {
            return Err(PredictionError::ProcessFailed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let prediction = parse_prediction_output(&String::from_utf8_lossy(&output.stdout))?;
        info!(
            target: "crop_series::predict",
            value = prediction.value,
            confidence = ?prediction.confidence,
            "Predictor returned"
        );
        Ok(prediction)
    }
}
