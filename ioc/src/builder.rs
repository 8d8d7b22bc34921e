//! Configuration for building a `Registry`.

use crate::monitor::Monitor;
use crate::registry::Registry;
use std::fmt;
use std::sync::Arc;

/// A builder for creating a configured [`Registry`].
///
/// ```
/// use fibre_inject::{Registry, TracingMonitor};
///
/// let registry = Registry::builder()
///   .initial_capacity(64)
///   .monitor(TracingMonitor::default())
///   .build();
/// assert!(registry.is_empty());
/// ```
#[derive(Default)]
pub struct RegistryBuilder {
  initial_capacity: usize,
  monitor: Option<Arc<dyn Monitor>>,
}

impl RegistryBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  /// Pre-sizes the binding map. Worth it when thousands of keys are bound.
  pub fn initial_capacity(mut self, capacity: usize) -> Self {
    self.initial_capacity = capacity;
    self
  }

  /// Sets the diagnostic sink. Without one the registry stays silent.
  pub fn monitor(mut self, monitor: impl Monitor + 'static) -> Self {
    self.monitor = Some(Arc::new(monitor));
    self
  }

  /// Like [`monitor`](Self::monitor), for a sink that is already shared.
  pub fn shared_monitor(mut self, monitor: Arc<dyn Monitor>) -> Self {
    self.monitor = Some(monitor);
    self
  }

  pub fn build(self) -> Registry {
    Registry::from_parts(self.initial_capacity, self.monitor)
  }
}

impl fmt::Debug for RegistryBuilder {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RegistryBuilder")
      .field("initial_capacity", &self.initial_capacity)
      .field("has_monitor", &self.monitor.is_some())
      .finish()
  }
}
