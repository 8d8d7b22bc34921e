use fibre_inject::{resolve, BoxError, Component, ConsoleMonitor, Registry};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// A simple service that gets a unique ID upon creation.
struct RequestTracker {
  id: usize,
}

// A global, thread-safe counter to generate unique IDs.
static ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

impl Component for RequestTracker {
  fn create() -> Result<Self, BoxError> {
    // This factory will only be called ONCE per binding.
    println!("Creating RequestTracker...");
    Ok(RequestTracker {
      id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
    })
  }
}

fn main() {
  let registry = Registry::builder().monitor(ConsoleMonitor).build();

  // --- Registration ---
  registry.bind_type::<RequestTracker>().unwrap();
  registry.bind("audit_tracker").unwrap().to_type::<RequestTracker>();

  println!("--- Resolving by type ---");
  let s1 = resolve!(registry, RequestTracker);
  let s2 = resolve!(registry, RequestTracker);
  println!("Tracker 1 ID: {}, Tracker 2 ID: {}", s1.id, s2.id);
  assert_eq!(s1.id, 0);
  assert!(Arc::ptr_eq(&s1, &s2), "Singleton instances should be identical");

  println!("\n--- Resolving by name ---");
  // Same implementation, different key: a separate singleton.
  let audit = resolve!(registry, RequestTracker, "audit_tracker");
  println!("Audit tracker ID: {}", audit.id);
  assert_eq!(audit.id, 1);
  assert!(!Arc::ptr_eq(&s1, &audit));
}
