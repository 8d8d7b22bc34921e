#![allow(dead_code)]

use fibre_inject::{BoxError, Component, DynProvider, InjectionPoint, Provider, Registry, Startable, Wired};
use once_cell::sync::OnceCell;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// --- Test Fixtures ---

/// Requires `B` by type and a `String` named "db_name".
#[derive(Debug, Default)]
pub struct A {
  pub b: Wired<B>,
  pub name: Wired<String>,
}

impl Component for A {
  fn create() -> Result<Self, BoxError> {
    Ok(Self::default())
  }

  fn injection_points() -> Vec<InjectionPoint<Self>> {
    vec![
      InjectionPoint::new("b", |a: &A, b: Arc<B>| a.b.set(b)),
      InjectionPoint::new("name", |a: &A, name: Arc<String>| a.name.set(name)).named("db_name"),
    ]
  }
}

/// Requires `A` (a cycle with `A`), optionally takes `C`, and is startable.
#[derive(Debug, Default)]
pub struct B {
  pub a: Wired<A>,
  pub c: Wired<C>,
  pub starts: AtomicUsize,
  pub wired_at_start: OnceCell<bool>,
}

impl Component for B {
  fn create() -> Result<Self, BoxError> {
    Ok(Self::default())
  }

  fn injection_points() -> Vec<InjectionPoint<Self>> {
    vec![
      InjectionPoint::new("a", |b: &B, a: Arc<A>| b.a.set(a)),
      InjectionPoint::new("c", |b: &B, c: Arc<C>| b.c.set(c)).optional(),
    ]
  }

  fn as_startable(&self) -> Option<&dyn Startable> {
    Some(self)
  }
}

impl Startable for B {
  fn start(&self) -> Result<(), BoxError> {
    let _ = self.wired_at_start.set(self.a.is_wired());
    self.starts.fetch_add(1, Ordering::SeqCst);
    Ok(())
  }
}

impl B {
  pub fn start_count(&self) -> usize {
    self.starts.load(Ordering::SeqCst)
  }
}

/// Startable, no dependencies.
#[derive(Debug, Default)]
pub struct C {
  pub starts: AtomicUsize,
}

impl Component for C {
  fn create() -> Result<Self, BoxError> {
    Ok(Self::default())
  }

  fn as_startable(&self) -> Option<&dyn Startable> {
    Some(self)
  }
}

impl Startable for C {
  fn start(&self) -> Result<(), BoxError> {
    self.starts.fetch_add(1, Ordering::SeqCst);
    Ok(())
  }
}

impl C {
  pub fn start_count(&self) -> usize {
    self.starts.load(Ordering::SeqCst)
  }
}

/// Produces "v1", "v2", ... on successive calls.
#[derive(Default)]
pub struct SequenceProvider {
  calls: AtomicUsize,
}

impl Provider for SequenceProvider {
  type Output = String;

  fn get(&self) -> Result<Arc<String>, BoxError> {
    let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
    Ok(Arc::new(format!("v{}", n)))
  }
}

impl Component for SequenceProvider {
  fn create() -> Result<Self, BoxError> {
    Ok(Self::default())
  }

  fn as_provider(this: &Arc<Self>) -> Option<Arc<dyn DynProvider>> {
    Some(Arc::clone(this) as Arc<dyn DynProvider>)
  }
}

/// Provides a fixed message.
#[derive(Default)]
pub struct MessageProvider;

impl Provider for MessageProvider {
  type Output = String;

  fn get(&self) -> Result<Arc<String>, BoxError> {
    Ok(Arc::new(String::from("instance by provider")))
  }
}

impl Component for MessageProvider {
  fn create() -> Result<Self, BoxError> {
    Ok(Self)
  }

  fn as_provider(this: &Arc<Self>) -> Option<Arc<dyn DynProvider>> {
    Some(Arc::clone(this) as Arc<dyn DynProvider>)
  }
}

#[derive(Debug)]
pub struct Simple {
  pub msg: String,
}

/// Builds one `Simple` from the injected "message" and hands out that one.
#[derive(Default)]
pub struct SimpleProvider {
  msg: Wired<String>,
  instance: OnceCell<Arc<Simple>>,
}

impl Provider for SimpleProvider {
  type Output = Simple;

  fn get(&self) -> Result<Arc<Simple>, BoxError> {
    let instance = self.instance.get_or_try_init(|| {
      let msg = self.msg.get().ok_or("message was not injected")?;
      Ok::<_, BoxError>(Arc::new(Simple {
        msg: msg.as_str().to_owned(),
      }))
    })?;
    Ok(Arc::clone(instance))
  }
}

impl Component for SimpleProvider {
  fn create() -> Result<Self, BoxError> {
    Ok(Self::default())
  }

  fn injection_points() -> Vec<InjectionPoint<Self>> {
    vec![InjectionPoint::new("msg", |p: &SimpleProvider, msg: Arc<String>| p.msg.set(msg)).named("message")]
  }

  fn as_provider(this: &Arc<Self>) -> Option<Arc<dyn DynProvider>> {
    Some(Arc::clone(this) as Arc<dyn DynProvider>)
  }
}

/// The standard setup: A, B, C bound by type and "db_name" bound to "db1".
pub fn bind_samples(registry: &Registry) {
  registry.bind_type::<A>().unwrap();
  registry.bind_type::<B>().unwrap();
  registry.bind_type::<C>().unwrap();
  registry.bind_instance("db_name", String::from("db1")).unwrap();
}
