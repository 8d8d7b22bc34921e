use fibre_inject::{resolve, Error, Registry};
use std::panic;

struct UnregisteredService;

fn main() {
  let registry = Registry::new();

  // --- Using the panicking `resolve!` macro ---
  println!("Attempting to resolve a service that was never registered...");

  let result = panic::catch_unwind(panic::AssertUnwindSafe(|| {
    // This line will panic!
    let _service = resolve!(registry, UnregisteredService);
  }));

  assert!(result.is_err(), "resolve! should have panicked.");
  println!("Successfully caught the expected panic from resolve!.");

  // --- Using the fallible `get_type()` method ---
  println!("\nNow, attempting to resolve using the fallible `get_type()` method...");

  match registry.get_type::<UnregisteredService>() {
    Ok(_) => panic!("Should not have found the service!"),
    Err(err @ Error::KeyNotBound { .. }) => println!("Correctly received an error: {}", err),
    Err(other) => panic!("Unexpected error: {}", other),
  }
}
