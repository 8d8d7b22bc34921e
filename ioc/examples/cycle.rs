use fibre_inject::{BoxError, Component, InjectionPoint, Registry, Startable, TracingMonitor, Wired};
use std::sync::Arc;

// Two services that need each other.
#[derive(Default)]
struct Orders {
  billing: Wired<Billing>,
}

#[derive(Default)]
struct Billing {
  orders: Wired<Orders>,
}

impl Component for Orders {
  fn create() -> Result<Self, BoxError> {
    Ok(Self::default())
  }

  fn injection_points() -> Vec<InjectionPoint<Self>> {
    vec![InjectionPoint::new("billing", |o: &Orders, b: Arc<Billing>| o.billing.set(b))]
  }

  fn as_startable(&self) -> Option<&dyn Startable> {
    Some(self)
  }
}

impl Startable for Orders {
  fn start(&self) -> Result<(), BoxError> {
    tracing::info!(billing_wired = self.billing.is_wired(), "orders started");
    Ok(())
  }
}

impl Component for Billing {
  fn create() -> Result<Self, BoxError> {
    Ok(Self::default())
  }

  fn injection_points() -> Vec<InjectionPoint<Self>> {
    vec![InjectionPoint::new("orders", |b: &Billing, o: Arc<Orders>| b.orders.set(o))]
  }
}

fn main() {
  tracing_subscriber::fmt()
    .with_max_level(tracing::Level::DEBUG)
    .init();

  let registry = Registry::builder()
    .monitor(TracingMonitor::new(tracing::Level::DEBUG))
    .build();
  registry.bind_type::<Orders>().unwrap();
  registry.bind_type::<Billing>().unwrap();

  let orders = registry.get_type::<Orders>().unwrap();
  let billing = registry.get_type::<Billing>().unwrap();

  assert!(Arc::ptr_eq(orders.billing.get().unwrap(), &billing));
  assert!(Arc::ptr_eq(billing.orders.get().unwrap(), &orders));
  println!("Orders and Billing reference each other.");
}
