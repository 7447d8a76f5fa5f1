use anyhow::{Result, anyhow, bail};
use log::{debug, error, info, warn};
use std::path::Path;
use std::process::{Child, Command, Stdio};

/// Spawns a command that inherits the launcher's scheduling priority.
pub struct Launcher {
    exec: String,
    args: Vec<String>,
    child: Option<Child>,
}

impl Launcher {
    pub fn new(mut command: Vec<String>) -> Result<Self> {
        if command.is_empty() {
            bail!("No command to launch");
        }

        let exec = command.remove(0);
        debug!("Initializing launcher for '{}' with args: {:?}", exec, command);

        Ok(Launcher {
            exec,
            args: command,
            child: None,
        })
    }

    /// Executable name used to look up per-executable configuration.
    pub fn exe_name(&self) -> String {
        extract_stem(&self.exec)
    }

    /// Spawns the process but does not wait for it.
    /// Returns the PID of the spawned process.
    pub fn spawn(&mut self) -> Result<u32> {
        debug!("Running process '{}' with args: {:?}", self.exec, self.args);

        let child = Command::new(&self.exec)
            .args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| {
                error!("Failed to spawn process {}: {}", self.exec, e);
                anyhow!("Failed to spawn '{}': {}", self.exec, e)
            })?;

        let pid = child.id();
        info!("Spawned process '{}' with PID {}", self.exec, pid);
        self.child = Some(child);
        Ok(pid)
    }

    /// Waits for the spawned process to finish and returns its exit code.
    pub fn wait(&mut self) -> Result<i32> {
        let Some(child) = &mut self.child else {
            bail!("No running process to wait for");
        };

        let pid = child.id();
        debug!("Waiting for process '{}' with PID {}", self.exec, pid);
        let status = child.wait().map_err(|e| {
            error!("Failed waiting on process PID {}: {}", pid, e);
            anyhow!(e)
        })?;
        self.child = None;

        // Killed by a signal
        let exit_code = status.code().unwrap_or(-1);
        if status.success() {
            info!("Process PID {} completed successfully", pid);
        } else {
            warn!("Process PID {} exited with code {}", pid, exit_code);
        }
        Ok(exit_code)
    }

    /// Combined spawn and wait.
    pub fn execute(&mut self) -> Result<i32> {
        self.spawn()?;
        self.wait()
    }
}

fn extract_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| path.to_string())
}
