//! Detached external actions.
//!
//! Key bindings never spawn processes themselves. They return a
//! [`DetachedAction`] which the event-loop driver hands to an
//! [`ActionRunner`].

use crate::error::{Result, StageError};
use std::fmt;
use std::process::{Command, Stdio};
use tracing::{debug, error, info};

/// A program to start without waiting for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetachedAction {
    pub program: String,
    pub args: Vec<String>,
}

impl DetachedAction {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        DetachedAction {
            program: program.into(),
            args,
        }
    }

    /// Runs `command_line` through `/bin/sh -c`.
    pub fn shell(command_line: &str) -> Self {
        DetachedAction::new("/bin/sh", vec!["-c".to_string(), command_line.to_string()])
    }

    /// Builds an action from a program-then-arguments list.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(DetachedAction::new(program.clone(), args.to_vec()))
    }
}

impl fmt::Display for DetachedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

pub trait ActionRunner {
    fn run(&mut self, action: &DetachedAction) -> Result<()>;
}

/// Spawns actions as child processes with null stdio. A background thread
/// reaps each child so no zombies are left behind.
#[derive(Debug, Default)]
pub struct ProcessSpawner;

impl ActionRunner for ProcessSpawner {
    fn run(&mut self, action: &DetachedAction) -> Result<()> {
        let mut child = Command::new(&action.program)
            .args(&action.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| StageError::Spawn {
                program: action.program.clone(),
                source,
            })?;
        info!("Spawned '{}' (pid {})", action, child.id());
        std::thread::spawn(move || match child.wait() {
            Ok(status) => debug!("Detached child exited: {}", status),
            Err(e) => debug!("Failed to reap detached child: {}", e),
        });
        Ok(())
    }
}

/// Runs `action`, logging instead of propagating a failure.
pub fn run_detached(runner: &mut dyn ActionRunner, action: &DetachedAction) {
    if let Err(e) = runner.run(action) {
        error!("Detached action '{}' failed: {}", action, e);
    }
}
