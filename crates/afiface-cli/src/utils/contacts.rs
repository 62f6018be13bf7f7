use crate::config::defaults::CONTACT_INPUT_PLACEHOLDER;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, error, warn};

/// Runs the external inter-chain contact program on a structure file.
#[derive(Debug, Clone)]
pub struct ContactRunner {
    program: String,
    args: Vec<String>,
}

impl ContactRunner {
    pub fn new(program: String, args: Vec<String>) -> Self {
        Self { program, args }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn args_for(&self, input: &Path) -> Vec<String> {
        let input = input.to_string_lossy();
        self.args
            .iter()
            .map(|arg| arg.replace(CONTACT_INPUT_PLACEHOLDER, &input))
            .collect()
    }

    pub async fn is_available(&self) -> bool {
        match Command::new(&self.program)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
        {
            Ok(_) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                error!("Contact program '{}' not found.", self.program);
                false
            }
            Err(e) => {
                error!("Contact program '{}' cannot be run: {}", self.program, e);
                false
            }
        }
    }

    /// Returns the program's standard output, or `None` when no usable contact data
    /// was produced: the program could not be started or wrote to standard error.
    pub async fn run(&self, input: &Path) -> Option<String> {
        let args = self.args_for(input);
        debug!("Running contact program: {} {}", self.program, args.join(" "));

        let output = match Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
        {
            Ok(output) => output,
            Err(e) => {
                error!("Could not calculate inter-chain contacts: {}", e);
                return None;
            }
        };

        if !output.stderr.is_empty() {
            warn!(
                "Contact program proceeded with errors: {}",
                String::from_utf8_lossy(&output.stderr).trim_end()
            );
            return None;
        }
        if !output.status.success() {
            warn!("Contact program exited with {}", output.status);
            return None;
        }
        Some(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
