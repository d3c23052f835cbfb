//! Scripted command runner for unit tests

use crate::error::{KitError, Result};
use crate::exec::{command_line, CommandRunner, Tool};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Mutex;

enum Reply {
    Out(String),
    Fail { stdout: String, stderr: String },
}

/// Answers command lines from a fixed script and records every call.
///
/// Command lines without a scripted reply fail with a non-zero exit.
#[derive(Default)]
pub(crate) struct ScriptedRunner {
    replies: HashMap<String, Reply>,
    missing: HashSet<Tool>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(mut self, line: &str, stdout: &str) -> Self {
        self.replies
            .insert(line.to_string(), Reply::Out(stdout.to_string()));
        self
    }

    pub(crate) fn fail(mut self, line: &str, stdout: &str, stderr: &str) -> Self {
        self.replies.insert(
            line.to_string(),
            Reply::Fail {
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            },
        );
        self
    }

    /// Every invocation of `tool` fails as if its binary were not deployed
    pub(crate) fn missing(mut self, tool: Tool) -> Self {
        self.missing.insert(tool);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for ScriptedRunner {
    async fn run(&self, tool: Tool, args: &[&str]) -> Result<String> {
        let line = command_line(tool, args);
        self.calls.lock().unwrap().push(line.clone());

        if self.missing.contains(&tool) {
            return Err(KitError::BinaryNotFound {
                name: tool.name().to_string(),
                dev_path: PathBuf::from("bin").join(tool.file_name()),
                prod_path: PathBuf::from("/opt/adbkit/bin").join(tool.file_name()),
            });
        }

        match self.replies.get(&line) {
            Some(Reply::Out(stdout)) => Ok(stdout.trim().to_string()),
            Some(Reply::Fail { stdout, stderr }) => Err(KitError::CommandFailed {
                command: line,
                reason: "exit status: 1".to_string(),
                stdout: stdout.trim().to_string(),
                stderr: stderr.trim().to_string(),
            }),
            None => Err(KitError::CommandFailed {
                command: line,
                reason: "exit status: 1".to_string(),
                stdout: String::new(),
                stderr: "no scripted reply".to_string(),
            }),
        }
    }
}
