//! Diagnostic sinks for resolution progress.
//!
//! A registry without a monitor stays silent. Messages carry a `#--# `
//! prefix whose dash count is the resolution depth.

use tracing::Level;

/// Receives one human-readable line per resolution step.
pub trait Monitor: Send + Sync {
  fn log(&self, message: &str);
}

impl<F> Monitor for F
where
  F: Fn(&str) + Send + Sync,
{
  fn log(&self, message: &str) {
    self(message)
  }
}

/// Writes every message to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleMonitor;

impl Monitor for ConsoleMonitor {
  fn log(&self, message: &str) {
    println!("{}", message);
  }
}

/// Forwards messages to the `tracing` dispatcher at a fixed level.
#[derive(Debug, Clone, Copy)]
pub struct TracingMonitor {
  level: Level,
}

impl TracingMonitor {
  pub fn new(level: Level) -> Self {
    Self { level }
  }

  pub fn level(&self) -> Level {
    self.level
  }
}

impl Default for TracingMonitor {
  fn default() -> Self {
    Self::new(Level::INFO)
  }
}

impl Monitor for TracingMonitor {
  fn log(&self, message: &str) {
    // `tracing` macros need the level as a constant.
    match self.level {
      Level::TRACE => tracing::trace!(target: "fibre_inject", "{}", message),
      Level::DEBUG => tracing::debug!(target: "fibre_inject", "{}", message),
      Level::INFO => tracing::info!(target: "fibre_inject", "{}", message),
      Level::WARN => tracing::warn!(target: "fibre_inject", "{}", message),
      Level::ERROR => tracing::error!(target: "fibre_inject", "{}", message),
    }
  }
}

/// `#` + one dash per depth level + `# `.
pub(crate) fn depth_prefix(depth: usize) -> String {
  format!("#{}# ", "-".repeat(depth))
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::{Arc, Mutex};

  #[test]
  fn prefix_grows_with_depth() {
    assert_eq!(depth_prefix(0), "## ");
    assert_eq!(depth_prefix(3), "#---# ");
  }

  #[test]
  fn closures_are_monitors() {
    let lines = Arc::new(Mutex::new(Vec::new()));
    let sink = {
      let lines = Arc::clone(&lines);
      move |msg: &str| lines.lock().unwrap().push(msg.to_owned())
    };

    let monitor: &dyn Monitor = &sink;
    monitor.log("first");
    monitor.log("second");

    assert_eq!(*lines.lock().unwrap(), vec!["first", "second"]);
  }

  #[test]
  fn tracing_monitor_defaults_to_info() {
    let monitor = TracingMonitor::default();
    assert_eq!(monitor.level(), Level::INFO);
    // No subscriber installed: must not panic.
    monitor.log("resolution step");
  }
}
