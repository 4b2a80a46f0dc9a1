//! Launch an external program on the URL (e.g. a kiosk browser).

use std::io;
use std::process::Stdio;

use tokio::process::Command;
use tokio::runtime::Handle;
use url::Url;

use crate::error::NavigateError;
use crate::navigation::Navigator;

/// Placeholder replaced by the target URL in launcher arguments.
pub const URL_PLACEHOLDER: &str = "{url}";

/// Spawns `command args...` once the target is reachable.
///
/// The gate does not wait for the child. A background task reaps it and
/// logs its exit status, so launchers that exit early leave no zombie.
/// Must be called from within a tokio runtime.
#[derive(Debug, Clone)]
pub struct SpawnNavigator {
    command: String,
    args: Vec<String>,
}

impl SpawnNavigator {
    pub fn new(command: String, args: Vec<String>) -> Self {
        Self { command, args }
    }

    /// Arguments for a given URL. The URL is appended when no argument
    /// contains the placeholder.
    pub fn render_args(&self, url: &Url) -> Vec<String> {
        let mut substituted = false;
        let mut args: Vec<String> = self
            .args
            .iter()
            .map(|arg| {
                if arg.contains(URL_PLACEHOLDER) {
                    substituted = true;
                    arg.replace(URL_PLACEHOLDER, url.as_str())
                } else {
                    arg.clone()
                }
            })
            .collect();
        if !substituted {
            args.push(url.to_string());
        }
        args
    }
}

impl Navigator for SpawnNavigator {
    fn navigate(&self, url: &Url) -> Result<(), NavigateError> {
        let spawn_error = |source| NavigateError::Spawn {
            command: self.command.clone(),
            source,
        };
        let runtime = Handle::try_current().map_err(|e| spawn_error(io::Error::other(e)))?;

        let args = self.render_args(url);
        let mut child = Command::new(&self.command)
            .args(&args)
            .stdin(Stdio::null())
            .spawn()
            .map_err(spawn_error)?;

        tracing::info!(
            command = %self.command,
            args = ?args,
            pid = ?child.id(),
            "Launcher started"
        );

        let command = self.command.clone();
        runtime.spawn(async move {
            match child.wait().await {
                Ok(status) if status.success() => {
                    tracing::debug!(command = %command, "Launcher exited");
                }
                Ok(status) => {
                    tracing::warn!(command = %command, status = %status, "Launcher exited with failure");
                }
                Err(e) => tracing::warn!(command = %command, error = %e, "Failed to reap launcher"),
            }
        });
        Ok(())
    }
}
