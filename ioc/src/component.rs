//! Contracts between the registry and the types it builds.
//!
//! A type managed through a `ToType` binding implements [`Component`]: it can
//! be created without arguments and declares the setter-style
//! [`InjectionPoint`]s the registry fills in after creation. The optional
//! [`Startable`] and [`Provider`] capabilities are exposed through the
//! `as_startable` and `as_provider` hooks.

use crate::error::{BoxError, Error, Result};
use crate::key::{Key, TypeKey};
use once_cell::sync::OnceCell;
use std::any::{type_name, Any};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// A resolved, type-erased value as stored by the registry.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// One-time initialization, run after every injection point was filled.
pub trait Startable {
  fn start(&self) -> Result<(), BoxError>;
}

/// An object that produces values on demand.
///
/// Bind a key with `to_provider(provider_key)` and every resolution of that
/// key calls [`Provider::get`] on the provider singleton.
pub trait Provider: Send + Sync {
  type Output: Send + Sync + 'static;

  fn get(&self) -> Result<Arc<Self::Output>, BoxError>;
}

/// Object-safe form of [`Provider`], implemented for every provider.
pub trait DynProvider: Send + Sync {
  fn provide(&self) -> Result<Instance, BoxError>;

  fn output_type(&self) -> &'static str;
}

impl<P: Provider> DynProvider for P {
  fn provide(&self) -> Result<Instance, BoxError> {
    let value: Instance = self.get()?;
    Ok(value)
  }

  fn output_type(&self) -> &'static str {
    type_name::<P::Output>()
  }
}

/// A type the registry can create and wire.
///
/// # Examples
///
/// ```
/// use fibre_inject::{BoxError, Component, InjectionPoint, Registry, Wired};
///
/// #[derive(Default)]
/// struct Repository {
///   db_name: Wired<String>,
/// }
///
/// impl Component for Repository {
///   fn create() -> Result<Self, BoxError> {
///     Ok(Self::default())
///   }
///
///   fn injection_points() -> Vec<InjectionPoint<Self>> {
///     vec![InjectionPoint::new("db_name", |repo: &Self, name: std::sync::Arc<String>| {
///       repo.db_name.set(name)
///     })
///     .named("db_name")]
///   }
/// }
///
/// let registry = Registry::new();
/// registry.bind_instance("db_name", String::from("prod-db")).unwrap();
/// registry.bind_type::<Repository>().unwrap();
///
/// let repo = registry.get_type::<Repository>().unwrap();
/// assert_eq!(repo.db_name.get().map(|s| s.as_str()), Some("prod-db"));
/// ```
pub trait Component: Send + Sync + Sized + 'static {
  /// Zero-argument factory.
  fn create() -> Result<Self, BoxError>;

  /// Setter-style dependencies, injected in the returned order.
  fn injection_points() -> Vec<InjectionPoint<Self>> {
    Vec::new()
  }

  fn as_startable(&self) -> Option<&dyn Startable> {
    None
  }

  fn as_provider(_this: &Arc<Self>) -> Option<Arc<dyn DynProvider>> {
    None
  }
}

type Setter<T> = Box<dyn Fn(&T, Instance) -> std::result::Result<(), Instance> + Send + Sync>;

/// A declared dependency slot on `T`.
pub struct InjectionPoint<T> {
  name: &'static str,
  key: Option<Key>,
  value_type: TypeKey,
  optional: bool,
  setter: Setter<T>,
}

impl<T: 'static> InjectionPoint<T> {
  /// Declares a point that receives an `Arc<V>`.
  ///
  /// Without [`named`](Self::named) the lookup key is the type `V` itself.
  pub fn new<V, F>(name: &'static str, setter: F) -> Self
  where
    V: Send + Sync + 'static,
    F: Fn(&T, Arc<V>) + Send + Sync + 'static,
  {
    Self::with_setter(
      name,
      TypeKey::of::<V>(),
      Box::new(move |target, value| {
        let value = value.downcast::<V>()?;
        setter(target, value);
        Ok(())
      }),
    )
  }

  /// Declares a point that receives the interface `I`, bound with
  /// `to_type_as` or as an `Arc<I>` instance.
  ///
  /// Without [`named`](Self::named) the lookup key is `I` itself, the key
  /// `Registry::bind_type_as` binds.
  pub fn new_trait<I, F>(name: &'static str, setter: F) -> Self
  where
    I: ?Sized + Send + Sync + 'static,
    F: Fn(&T, Arc<I>) + Send + Sync + 'static,
  {
    Self::with_setter(
      name,
      TypeKey::of::<I>(),
      Box::new(move |target, value| {
        let value = value.downcast::<Arc<I>>()?;
        setter(target, Arc::clone(&*value));
        Ok(())
      }),
    )
  }

  fn with_setter(name: &'static str, value_type: TypeKey, setter: Setter<T>) -> Self {
    Self {
      name,
      key: None,
      value_type,
      optional: false,
      setter,
    }
  }

  /// Looks the dependency up under `key` instead of the value type.
  pub fn named(mut self, key: impl Into<Key>) -> Self {
    self.key = Some(key.into());
    self
  }

  /// Leaves the slot untouched when the key cannot be resolved.
  pub fn optional(mut self) -> Self {
    self.optional = true;
    self
  }

  pub fn name(&self) -> &'static str {
    self.name
  }

  pub fn is_optional(&self) -> bool {
    self.optional
  }

  /// The explicit key if one was given, otherwise the value type.
  pub fn lookup_key(&self) -> Key {
    self
      .key
      .clone()
      .unwrap_or(Key::Type(self.value_type))
  }

  pub(crate) fn inject(&self, target: &T, key: &Key, value: Instance) -> Result<()> {
    (self.setter)(target, value).map_err(|_| Error::TypeMismatch {
      key: key.clone(),
      expected: self.value_type.name(),
    })
  }
}

impl<T> fmt::Debug for InjectionPoint<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("InjectionPoint")
      .field("name", &self.name)
      .field("key", &self.key)
      .field("value_type", &self.value_type)
      .field("optional", &self.optional)
      .finish_non_exhaustive()
  }
}

/// Rejects declarations no lookup could ever satisfy consistently.
pub(crate) fn validate_points<T: 'static>(points: &[InjectionPoint<T>]) -> Result<()> {
  let invalid = |point: &'static str, reason: &'static str| Error::InvalidInjectionPoint {
    type_name: type_name::<T>(),
    point,
    reason,
  };

  let mut seen = HashSet::with_capacity(points.len());
  for point in points {
    if point.name.is_empty() {
      return Err(invalid(point.name, "point name is empty"));
    }
    if matches!(&point.key, Some(Key::Name(name)) if name.is_empty()) {
      return Err(invalid(point.name, "explicit key is an empty name"));
    }
    if !seen.insert(point.name) {
      return Err(invalid(point.name, "declared more than once"));
    }
  }
  Ok(())
}

/// A write-once slot for an injected dependency.
///
/// Empty until the registry injects into it; an optional point whose key is
/// not bound leaves it empty.
pub struct Wired<T: ?Sized> {
  cell: OnceCell<Arc<T>>,
}

impl<T: ?Sized> Wired<T> {
  pub fn new() -> Self {
    Self {
      cell: OnceCell::new(),
    }
  }

  /// Stores `value`. Only the first call has an effect.
  pub fn set(&self, value: Arc<T>) {
    let _ = self.cell.set(value);
  }

  pub fn get(&self) -> Option<&Arc<T>> {
    self.cell.get()
  }

  pub fn is_wired(&self) -> bool {
    self.cell.get().is_some()
  }
}

impl<T: ?Sized> Default for Wired<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T: ?Sized> fmt::Debug for Wired<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    // Cycles make a recursive Debug unbounded.
    f.debug_struct("Wired")
      .field("wired", &self.is_wired())
      .finish()
  }
}
