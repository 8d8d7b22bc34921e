//! The `Registry` and its bind/resolve API.

use crate::binding::{Binding, Mode, Resolved, TypeBlueprint};
use crate::builder::RegistryBuilder;
use crate::component::{Component, DynProvider, Instance, Provider};
use crate::error::{BoxError, Error, Result};
use crate::key::Key;
use crate::monitor::{depth_prefix, Monitor};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::any::type_name;
use std::fmt;
use std::sync::Arc;

/// The Inversion of Control (IoC) container.
///
/// Keys are bound once, during a setup phase, and resolved lazily: the first
/// `resolve` of a key builds its singleton, injects its dependencies and
/// starts it. Resolution is thread-safe, with construction serialized per key.
///
/// # Examples
///
/// ```
/// use fibre_inject::Registry;
/// use std::sync::Arc;
///
/// let registry = Registry::new();
/// registry.bind_instance("db_name", String::from("prod-db")).unwrap();
///
/// let name: Arc<String> = registry.get("db_name").unwrap();
/// assert_eq!(*name, "prod-db");
/// assert!(registry.bind("db_name").is_err());
/// ```
#[derive(Default)]
pub struct Registry {
  bindings: DashMap<Key, Arc<Binding>>,
  monitor: Option<Arc<dyn Monitor>>,
}

impl Registry {
  /// Creates a new, empty `Registry` without a monitor.
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates an empty `Registry` with room for `capacity` bindings.
  pub fn with_capacity(capacity: usize) -> Self {
    Self::builder().initial_capacity(capacity).build()
  }

  pub fn builder() -> RegistryBuilder {
    RegistryBuilder::new()
  }

  pub(crate) fn from_parts(capacity: usize, monitor: Option<Arc<dyn Monitor>>) -> Self {
    Self {
      bindings: DashMap::with_capacity(capacity),
      monitor,
    }
  }

  pub fn set_monitor(&mut self, monitor: impl Monitor + 'static) {
    self.monitor = Some(Arc::new(monitor));
  }

  pub fn clear_monitor(&mut self) {
    self.monitor = None;
  }

  // --- PRIVATE HELPERS ---

  fn insert_new(&self, key: Key, mode: Mode) -> Result<()> {
    match self.bindings.entry(key) {
      Entry::Occupied(entry) => Err(Error::DuplicateBinding {
        key: entry.key().clone(),
      }),
      Entry::Vacant(entry) => {
        let binding = Binding::new(entry.key().clone(), mode);
        tracing::trace!(binding = ?binding, "bound");
        entry.insert(Arc::new(binding));
        Ok(())
      }
    }
  }

  // Clones the record out so no map guard is held while it constructs.
  fn binding(&self, key: &Key) -> Option<Arc<Binding>> {
    self.bindings.get(key).map(|entry| Arc::clone(entry.value()))
  }

  pub(crate) fn log(&self, message: fmt::Arguments<'_>) {
    if let Some(monitor) = &self.monitor {
      monitor.log(&message.to_string());
    }
  }

  pub(crate) fn log_at(&self, depth: usize, message: fmt::Arguments<'_>) {
    if let Some(monitor) = &self.monitor {
      monitor.log(&format!("{}{}", depth_prefix(depth), message));
    }
  }

  // --- Binding ---

  /// Registers an empty binding for `key` and returns a handle to choose its
  /// target.
  ///
  /// Dropping the handle without choosing leaves the key bound but without
  /// an implementation; resolving it then fails with
  /// [`Error::NoImplementation`].
  pub fn bind(&self, key: impl Into<Key>) -> Result<BindingHandle<'_>> {
    let key = key.into();
    self.insert_new(key.clone(), Mode::Unbound)?;
    Ok(BindingHandle {
      registry: self,
      key,
    })
  }

  /// Binds `key` to a fixed value in one step.
  ///
  /// A trait object bound as an `Arc<dyn I>` value is read back with
  /// [`get_trait`](Self::get_trait).
  pub fn bind_instance<V: Send + Sync + 'static>(&self, key: impl Into<Key>, value: V) -> Result<()> {
    self.insert_new(key.into(), Mode::ToInstance(Resolved::plain(Arc::new(value))))
  }

  /// Binds `key` to a fixed provider that `to_provider` indirections may use.
  pub fn bind_provider_instance<P: Provider + 'static>(&self, key: impl Into<Key>, provider: P) -> Result<()> {
    self.insert_new(key.into(), Mode::ToInstance(Resolved::provider(provider)))
  }

  /// Binds the type `T` under its own type key.
  pub fn bind_type<T: Component>(&self) -> Result<()> {
    self.insert_new(
      Key::of::<T>(),
      Mode::ToType(Box::new(TypeBlueprint::new(T::create))),
    )
  }

  /// Binds the interface `I` to the implementation `T`.
  ///
  /// `cast` turns the built `Arc<T>` into an `Arc<I>`; the singleton is then
  /// read with [`get_trait`](Self::get_trait).
  ///
  /// ```
  /// use fibre_inject::{BoxError, Component, Key, Registry};
  /// use std::sync::Arc;
  ///
  /// trait Greeter: Send + Sync {
  ///   fn greet(&self) -> String;
  /// }
  ///
  /// struct English;
  ///
  /// impl Greeter for English {
  ///   fn greet(&self) -> String {
  ///     String::from("hello")
  ///   }
  /// }
  ///
  /// impl Component for English {
  ///   fn create() -> Result<Self, BoxError> {
  ///     Ok(English)
  ///   }
  /// }
  ///
  /// let registry = Registry::new();
  /// registry
  ///   .bind_type_as::<dyn Greeter, English>(|english| english as Arc<dyn Greeter>)
  ///   .unwrap();
  ///
  /// let greeter = registry.get_trait::<dyn Greeter>(Key::of::<dyn Greeter>()).unwrap();
  /// assert_eq!(greeter.greet(), "hello");
  /// ```
  pub fn bind_type_as<I, T>(&self, cast: impl Fn(Arc<T>) -> Arc<I> + Send + Sync + 'static) -> Result<()>
  where
    I: ?Sized + Send + Sync + 'static,
    T: Component,
  {
    self.insert_new(
      Key::of::<I>(),
      Mode::ToType(Box::new(TypeBlueprint::new(T::create).exposed_as(cast))),
    )
  }

  // --- Resolution ---

  /// Returns the singleton for `key`, constructing it on first use.
  ///
  /// For a key bound with `to_provider`, every call asks the provider for a
  /// new value instead.
  pub fn resolve(&self, key: impl Into<Key>) -> Result<Instance> {
    self.resolve_at(&key.into(), 0)
  }

  /// `resolve` followed by a downcast to `T`.
  pub fn get<T: Send + Sync + 'static>(&self, key: impl Into<Key>) -> Result<Arc<T>> {
    let key = key.into();
    self
      .resolve_at(&key, 0)?
      .downcast::<T>()
      .map_err(|_| Error::TypeMismatch {
        key,
        expected: type_name::<T>(),
      })
  }

  /// Resolves the binding registered under the type `T` itself.
  pub fn get_type<T: Send + Sync + 'static>(&self) -> Result<Arc<T>> {
    self.get::<T>(Key::of::<T>())
  }

  /// `resolve` for a key whose value is stored behind the interface `I`,
  /// either bound with `to_type_as` or as an `Arc<I>` instance.
  pub fn get_trait<I: ?Sized + Send + Sync + 'static>(&self, key: impl Into<Key>) -> Result<Arc<I>> {
    let key = key.into();
    let stored = self
      .resolve_at(&key, 0)?
      .downcast::<Arc<I>>()
      .map_err(|_| Error::TypeMismatch {
        key,
        expected: type_name::<Arc<I>>(),
      })?;
    Ok(Arc::clone(&*stored))
  }

  /// `depth` only indents monitor output.
  pub(crate) fn resolve_at(&self, key: &Key, depth: usize) -> Result<Instance> {
    let binding = self
      .binding(key)
      .ok_or_else(|| Error::KeyNotBound { key: key.clone() })?;
    binding.get_or_create(self, depth)
  }

  /// Resolves `provider_key` and returns its provider capability.
  pub(crate) fn resolve_provider(
    &self,
    key: &Key,
    provider_key: &Key,
    depth: usize,
  ) -> Result<Arc<dyn DynProvider>> {
    let binding = self.binding(provider_key).ok_or_else(|| Error::KeyNotBound {
      key: provider_key.clone(),
    })?;
    binding.get_or_create(self, depth)?;
    binding.provider().ok_or_else(|| Error::NotAProvider {
      key: key.clone(),
      provider: provider_key.clone(),
    })
  }

  // --- Introspection ---

  pub fn contains(&self, key: impl Into<Key>) -> bool {
    self.bindings.contains_key(&key.into())
  }

  pub fn len(&self) -> usize {
    self.bindings.len()
  }

  pub fn is_empty(&self) -> bool {
    self.bindings.is_empty()
  }
}

impl fmt::Debug for Registry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Registry")
      .field("bindings", &self.bindings.len())
      .field("has_monitor", &self.monitor.is_some())
      .finish()
  }
}

/// Chooses the target of a freshly bound key.
///
/// Every method consumes the handle, so a key gets at most one target.
#[must_use = "a key bound without a target fails with NoImplementation when resolved"]
pub struct BindingHandle<'r> {
  registry: &'r Registry,
  key: Key,
}

impl BindingHandle<'_> {
  pub fn key(&self) -> &Key {
    &self.key
  }

  /// Builds the key's singleton with `T::create` on first resolution.
  pub fn to_type<T: Component>(self) {
    self.to_type_with(T::create);
  }

  /// Like [`to_type`](Self::to_type), with a custom zero-argument factory.
  /// The injection points and capabilities of `T` still apply.
  pub fn to_type_with<T, F>(self, factory: F)
  where
    T: Component,
    F: Fn() -> Result<T, BoxError> + Send + Sync + 'static,
  {
    self.set(Mode::ToType(Box::new(TypeBlueprint::new(factory))));
  }

  /// Like [`to_type`](Self::to_type), storing the instance behind the
  /// interface `I`. Read it back with [`Registry::get_trait`].
  pub fn to_type_as<I, T>(self, cast: impl Fn(Arc<T>) -> Arc<I> + Send + Sync + 'static)
  where
    I: ?Sized + Send + Sync + 'static,
    T: Component,
  {
    self.set(Mode::ToType(Box::new(TypeBlueprint::new(T::create).exposed_as(cast))));
  }

  /// Resolves the key to `value`, never constructing anything.
  pub fn to_instance<V: Send + Sync + 'static>(self, value: V) {
    self.set(Mode::ToInstance(Resolved::plain(Arc::new(value))));
  }

  /// Resolves the key to a fixed provider, usable as the target of
  /// [`to_provider`](Self::to_provider).
  pub fn to_provider_instance<P: Provider + 'static>(self, provider: P) {
    self.set(Mode::ToInstance(Resolved::provider(provider)));
  }

  /// Resolves the key by calling `get` on the provider bound under
  /// `provider_key`, once per resolution.
  pub fn to_provider(self, provider_key: impl Into<Key>) {
    self.set(Mode::ToProvider(provider_key.into()));
  }

  fn set(self, mode: Mode) {
    let binding = Binding::new(self.key.clone(), mode);
    tracing::trace!(binding = ?binding, "bound");
    self.registry.bindings.insert(self.key, Arc::new(binding));
  }
}

impl fmt::Debug for BindingHandle<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("BindingHandle")
      .field("key", &self.key)
      .finish()
  }
}
