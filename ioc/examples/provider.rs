use fibre_inject::{BoxError, Component, DynProvider, Key, Provider, Registry};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

// Hands out a new ticket number on every resolution.
#[derive(Default)]
struct TicketDispenser {
  next: AtomicU64,
}

struct Ticket(u64);

impl Provider for TicketDispenser {
  type Output = Ticket;

  fn get(&self) -> Result<Arc<Ticket>, BoxError> {
    Ok(Arc::new(Ticket(self.next.fetch_add(1, Ordering::SeqCst) + 1)))
  }
}

impl Component for TicketDispenser {
  fn create() -> Result<Self, BoxError> {
    Ok(Self::default())
  }

  fn as_provider(this: &Arc<Self>) -> Option<Arc<dyn DynProvider>> {
    Some(Arc::clone(this) as Arc<dyn DynProvider>)
  }
}

fn main() {
  let registry = Registry::new();
  registry.bind_type::<TicketDispenser>().unwrap();
  registry
    .bind(Key::of::<Ticket>())
    .unwrap()
    .to_provider(Key::of::<TicketDispenser>());

  for expected in 1..=3 {
    let ticket = registry.get_type::<Ticket>().unwrap();
    println!("Got ticket #{}", ticket.0);
    assert_eq!(ticket.0, expected);
  }

  // The dispenser itself is an ordinary singleton.
  let dispenser = registry.get_type::<TicketDispenser>().unwrap();
  assert_eq!(dispenser.next.load(Ordering::SeqCst), 3);
}
