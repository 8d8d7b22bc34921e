use fibre_inject::{resolve, BoxError, Component, InjectionPoint, Registry, Wired};
use std::sync::Arc;

// 1. Define the abstraction (the trait)
trait Logger: Send + Sync {
  fn log(&self, message: &str);
}

// 2. Define a concrete implementation
struct ConsoleLogger;

impl Logger for ConsoleLogger {
  fn log(&self, message: &str) {
    println!("[CONSOLE LOG]: {}", message);
  }
}

impl Component for ConsoleLogger {
  fn create() -> Result<Self, BoxError> {
    Ok(ConsoleLogger)
  }
}

// 3. Define a service that depends on the abstraction
#[derive(Default)]
struct ReportService {
  logger: Wired<dyn Logger>,
}

impl ReportService {
  fn generate_report(&self) {
    if let Some(logger) = self.logger.get() {
      logger.log("Starting report generation.");
      // ... logic to generate report ...
      logger.log("Finished report generation.");
    }
  }
}

impl Component for ReportService {
  fn create() -> Result<Self, BoxError> {
    Ok(Self::default())
  }

  // ReportService never names ConsoleLogger; it asks for `dyn Logger`.
  fn injection_points() -> Vec<InjectionPoint<Self>> {
    vec![InjectionPoint::new_trait("logger", |r: &ReportService, l: Arc<dyn Logger>| r.logger.set(l))]
  }
}

fn main() {
  let registry = Registry::new();

  // --- Registration ---

  // Bind the `dyn Logger` interface to ConsoleLogger.
  // The registry builds an Arc<ConsoleLogger> but serves it as Arc<dyn Logger>.
  registry
    .bind_type_as::<dyn Logger, ConsoleLogger>(|logger| logger as Arc<dyn Logger>)
    .unwrap();
  registry.bind_type::<ReportService>().unwrap();

  // --- Resolution and Usage ---
  println!("Resolving the high-level service...");
  let report_service = resolve!(registry, ReportService);

  println!("Using the service...");
  report_service.generate_report();

  // The interface resolves to the same singleton that was injected.
  let logger = resolve!(registry, trait Logger);
  logger.log("Resolved directly through the interface.");
}
