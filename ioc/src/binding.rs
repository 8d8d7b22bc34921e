//! The per-key binding record and its construction algorithm.

use crate::component::{validate_points, Component, DynProvider, Instance, Provider};
use crate::error::{BoxError, Error, Result};
use crate::key::Key;
use crate::registry::Registry;
use once_cell::sync::OnceCell;
use parking_lot::ReentrantMutex;
use std::any::type_name;
use std::fmt;
use std::sync::Arc;

/// A resolved value together with the capabilities the record learned about
/// it when it was built.
#[derive(Clone)]
pub(crate) struct Resolved {
  pub(crate) value: Instance,
  pub(crate) provider: Option<Arc<dyn DynProvider>>,
}

impl Resolved {
  pub(crate) fn plain(value: Instance) -> Self {
    Self {
      value,
      provider: None,
    }
  }

  /// A fixed value that is also usable as a provider.
  pub(crate) fn provider<P: Provider + 'static>(provider: P) -> Self {
    let provider = Arc::new(provider);
    Self {
      value: provider.clone(),
      provider: Some(provider as Arc<dyn DynProvider>),
    }
  }
}

/// Type-erased `ToType` implementation.
///
/// `create` returns the fresh instance without touching dependencies, and
/// `wire` injects and starts it. Splitting the two is what lets the record
/// publish the instance in between.
pub(crate) trait Blueprint: Send + Sync {
  fn type_name(&self) -> &'static str;

  /// The interface the instance is stored as, if not its own type.
  fn exposed_as(&self) -> Option<&'static str>;

  fn create(&self) -> Result<Built, BoxError>;
}

/// An instance fresh out of its factory, not yet injected.
pub(crate) struct Built {
  pub(crate) resolved: Resolved,
  pub(crate) wire: Box<dyn FnOnce(&Registry, &Key, usize) -> Result<()>>,
}

type Expose<T> = Box<dyn Fn(Arc<T>) -> Instance + Send + Sync>;

pub(crate) struct TypeBlueprint<T, F> {
  factory: F,
  // How the instance is stored: `Arc<T>` itself, or an `Arc<Arc<dyn I>>`
  // for an interface binding.
  expose: Expose<T>,
  exposed_as: Option<&'static str>,
}

impl<T, F> TypeBlueprint<T, F>
where
  T: Component,
  F: Fn() -> Result<T, BoxError> + Send + Sync + 'static,
{
  pub(crate) fn new(factory: F) -> Self {
    Self {
      factory,
      expose: Box::new(|instance: Arc<T>| -> Instance { instance }),
      exposed_as: None,
    }
  }

  /// Stores the instance behind the interface `I`.
  pub(crate) fn exposed_as<I, C>(mut self, cast: C) -> Self
  where
    I: ?Sized + Send + Sync + 'static,
    C: Fn(Arc<T>) -> Arc<I> + Send + Sync + 'static,
  {
    self.expose = Box::new(move |instance: Arc<T>| -> Instance { Arc::new(cast(instance)) });
    self.exposed_as = Some(type_name::<I>());
    self
  }
}

impl<T, F> Blueprint for TypeBlueprint<T, F>
where
  T: Component,
  F: Fn() -> Result<T, BoxError> + Send + Sync + 'static,
{
  fn type_name(&self) -> &'static str {
    type_name::<T>()
  }

  fn exposed_as(&self) -> Option<&'static str> {
    self.exposed_as
  }

  fn create(&self) -> Result<Built, BoxError> {
    let instance = Arc::new((self.factory)()?);
    let provider = T::as_provider(&instance);
    let value = (self.expose)(Arc::clone(&instance));

    Ok(Built {
      resolved: Resolved { value, provider },
      wire: Box::new(move |registry: &Registry, key: &Key, depth: usize| {
        wire_instance::<T>(registry, key, &instance, depth)
      }),
    })
  }
}

/// Injects every declared point of `T`, then runs its start hook.
fn wire_instance<T: Component>(
  registry: &Registry,
  key: &Key,
  instance: &T,
  depth: usize,
) -> Result<()> {
  let points = T::injection_points();
  validate_points(&points)?;

  for point in &points {
    let lookup = point.lookup_key();
    registry.log_at(depth, format_args!("Injecting dependencies: {}", lookup));

    match registry.resolve_at(&lookup, depth) {
      Ok(value) => point.inject(instance, &lookup, value)?,
      Err(err) if err.is_not_found() => {
        if !point.is_optional() {
          return Err(Error::InjectionFailed {
            key: lookup,
            point: point.name(),
          });
        }
        registry.log_at(
          depth,
          format_args!("Optional injection skipped: {}", lookup),
        );
      }
      Err(err) => return Err(err),
    }
  }

  if let Some(startable) = instance.as_startable() {
    registry.log_at(depth.saturating_sub(1), format_args!("Call start on {}", key));
    startable.start().map_err(|err| Error::construction(key, err))?;
  }
  Ok(())
}

pub(crate) enum Mode {
  Unbound,
  ToType(Box<dyn Blueprint>),
  ToInstance(Resolved),
  ToProvider(Key),
}

impl fmt::Debug for Mode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Mode::Unbound => f.write_str("Unbound"),
      Mode::ToType(blueprint) => match blueprint.exposed_as() {
        Some(interface) => write!(f, "ToType({} as {})", blueprint.type_name(), interface),
        None => write!(f, "ToType({})", blueprint.type_name()),
      },
      Mode::ToInstance(resolved) if resolved.provider.is_some() => f.write_str("ToInstance(provider)"),
      Mode::ToInstance(_) => f.write_str("ToInstance"),
      Mode::ToProvider(key) => write!(f, "ToProvider({})", key),
    }
  }
}

/// One record per bound key.
pub(crate) struct Binding {
  key: Key,
  mode: Mode,
  cached: OnceCell<Resolved>,
  // Held only while a `ToType` record builds its instance.
  create_lock: ReentrantMutex<()>,
}

impl Binding {
  pub(crate) fn new(key: Key, mode: Mode) -> Self {
    let cached = match &mode {
      Mode::ToInstance(resolved) => OnceCell::with_value(resolved.clone()),
      _ => OnceCell::new(),
    };
    Self {
      key,
      mode,
      cached,
      create_lock: ReentrantMutex::new(()),
    }
  }

  pub(crate) fn get_or_create(&self, registry: &Registry, depth: usize) -> Result<Instance> {
    if let Some(resolved) = self.cached.get() {
      return Ok(resolved.value.clone());
    }

    match &self.mode {
      Mode::ToType(blueprint) => {
        let _guard = self.create_lock.lock();
        if let Some(resolved) = self.cached.get() {
          return Ok(resolved.value.clone());
        }
        self.construct(registry, blueprint.as_ref(), depth)
      }
      // Creates nothing itself, so it takes no guard. The provider's own
      // record serializes the provider's construction.
      Mode::ToProvider(provider_key) => {
        registry.log_at(depth, format_args!("Search provider key={}", provider_key));
        let provider = registry.resolve_provider(&self.key, provider_key, depth)?;
        self.provide(registry, &provider)
      }
      Mode::ToInstance(resolved) => Ok(resolved.value.clone()),
      Mode::Unbound => Err(Error::NoImplementation {
        key: self.key.clone(),
      }),
    }
  }

  /// Provider capability of the cached value. A `ToProvider` record never
  /// caches, so chained indirections have none.
  pub(crate) fn provider(&self) -> Option<Arc<dyn DynProvider>> {
    self.cached.get().and_then(|resolved| resolved.provider.clone())
  }

  fn provide(&self, registry: &Registry, provider: &Arc<dyn DynProvider>) -> Result<Instance> {
    let product = provider
      .provide()
      .map_err(|err| Error::construction(&self.key, err))?;
    registry.log(format_args!(
      "{} is a provider, provide: {}",
      self.key,
      provider.output_type()
    ));
    Ok(product)
  }

  fn construct(&self, registry: &Registry, blueprint: &dyn Blueprint, depth: usize) -> Result<Instance> {
    registry.log_at(
      depth,
      format_args!(
        "Creating instance for key={} with implementation {}",
        self.key,
        blueprint.type_name()
      ),
    );

    let Built { resolved, wire } = blueprint
      .create()
      .map_err(|err| Error::construction(&self.key, err))?;
    let value = resolved.value.clone();

    // Publish before injecting. A dependency that leads back to this key
    // (a cycle) sees this instance instead of recursing. The cell is empty
    // here: it was re-checked under the create lock.
    let _ = self.cached.set(resolved);

    if let Err(err) = wire(registry, &self.key, depth + 1) {
      tracing::warn!(
        key = %self.key,
        error = %err,
        "construction failed after publication; the partially wired instance stays cached"
      );
      return Err(err);
    }
    Ok(value)
  }
}

impl fmt::Debug for Binding {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Binding")
      .field("key", &self.key)
      .field("mode", &self.mode)
      .field("cached", &self.cached.get().is_some())
      .finish()
  }
}
