use fibre_inject::{resolve, BoxError, Component, InjectionPoint, Registry, Wired};
use std::sync::Arc;

// --- Abstraction and Implementations ---
trait MessageSender: Send + Sync {
  fn send(&self, to: &str, message: &str) -> String;
}

struct EmailSender;
impl MessageSender for EmailSender {
  fn send(&self, to: &str, message: &str) -> String {
    format!("Sending email to {}: '{}'", to, message)
  }
}

struct SmsSender;
impl MessageSender for SmsSender {
  fn send(&self, to: &str, message: &str) -> String {
    format!("Sending SMS to {}: '{}'", to, message)
  }
}

// A service that picks its sender by name.
#[derive(Default)]
struct Notifier {
  sender: Wired<dyn MessageSender>,
}

impl Component for Notifier {
  fn create() -> Result<Self, BoxError> {
    Ok(Self::default())
  }

  fn injection_points() -> Vec<InjectionPoint<Self>> {
    vec![InjectionPoint::new_trait("sender", |n: &Notifier, s: Arc<dyn MessageSender>| n.sender.set(s)).named("sms")]
  }
}

fn main() {
  let registry = Registry::new();

  // --- Registration ---
  // Trait objects are bound as fixed values under unique names.
  registry.bind_instance("email", Arc::new(EmailSender) as Arc<dyn MessageSender>).unwrap();
  registry.bind_instance("sms", Arc::new(SmsSender) as Arc<dyn MessageSender>).unwrap();
  registry.bind_type::<Notifier>().unwrap();

  // --- Resolution ---
  let email = resolve!(registry, trait MessageSender, "email");
  let result1 = email.send("test@example.com", "Hello from Fibre!");
  println!("{}", result1);
  assert!(result1.contains("email"));

  let notifier = resolve!(registry, Notifier);
  let result2 = notifier
    .sender
    .get()
    .map(|sender| sender.send("+123456789", "Hello from Fibre!"))
    .unwrap_or_default();
  println!("{}", result2);
  assert!(result2.contains("SMS"));
}
