//! Binding keys: either a type identity or a free-form name.

use std::any::{type_name, Any, TypeId};
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A type identity used as a key.
///
/// Only the `TypeId` takes part in equality and hashing. The type name is
/// carried along for messages.
#[derive(Clone, Copy)]
pub struct TypeKey {
  id: TypeId,
  name: &'static str,
}

impl TypeKey {
  pub fn of<T: ?Sized + Any>() -> Self {
    Self {
      id: TypeId::of::<T>(),
      name: type_name::<T>(),
    }
  }

  pub fn id(&self) -> TypeId {
    self.id
  }

  pub fn name(&self) -> &'static str {
    self.name
  }
}

impl PartialEq for TypeKey {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
  }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.id.hash(state);
  }
}

impl fmt::Debug for TypeKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "TypeKey({})", self.name)
  }
}

/// The identity under which a binding is registered and looked up.
///
/// ```
/// use fibre_inject::Key;
///
/// struct Database;
///
/// assert_eq!(Key::of::<Database>(), Key::of::<Database>());
/// assert_eq!(Key::named("db_name"), Key::from("db_name"));
/// assert_ne!(Key::named("db_name"), Key::named("db_user"));
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Key {
  Type(TypeKey),
  Name(Cow<'static, str>),
}

impl Key {
  /// Key for the type `T` itself.
  pub fn of<T: ?Sized + Any>() -> Self {
    Key::Type(TypeKey::of::<T>())
  }

  /// Key for an arbitrary name.
  pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
    Key::Name(name.into())
  }

  pub fn as_name(&self) -> Option<&str> {
    match self {
      Key::Name(name) => Some(name),
      Key::Type(_) => None,
    }
  }

  pub fn as_type(&self) -> Option<&TypeKey> {
    match self {
      Key::Type(type_key) => Some(type_key),
      Key::Name(_) => None,
    }
  }
}

impl From<&'static str> for Key {
  fn from(name: &'static str) -> Self {
    Key::Name(Cow::Borrowed(name))
  }
}

impl From<String> for Key {
  fn from(name: String) -> Self {
    Key::Name(Cow::Owned(name))
  }
}

impl From<TypeKey> for Key {
  fn from(type_key: TypeKey) -> Self {
    Key::Type(type_key)
  }
}

impl From<&Key> for Key {
  fn from(key: &Key) -> Self {
    key.clone()
  }
}

impl fmt::Display for Key {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Key::Type(type_key) => f.write_str(type_key.name),
      Key::Name(name) => write!(f, "{:?}", name),
    }
  }
}

impl fmt::Debug for Key {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Key::Type(type_key) => write!(f, "Key(Type({}))", type_key.name),
      Key::Name(name) => write!(f, "Key(Name({}))", name),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashSet;

  struct Alpha;
  struct Beta;

  #[test]
  fn type_keys_compare_by_type_identity() {
    assert_eq!(Key::of::<Alpha>(), Key::of::<Alpha>());
    assert_ne!(Key::of::<Alpha>(), Key::of::<Beta>());
    assert_ne!(Key::of::<String>(), Key::named("alloc::string::String"));
  }

  #[test]
  fn borrowed_and_owned_names_are_the_same_key() {
    let mut set = HashSet::new();
    set.insert(Key::from("db_name"));
    assert!(set.contains(&Key::from(String::from("db_name"))));
    assert!(!set.contains(&Key::named("db_user")));
  }

  #[test]
  fn display_forms() {
    assert_eq!(Key::named("db_name").to_string(), "\"db_name\"");
    assert!(Key::of::<Alpha>().to_string().ends_with("Alpha"));
    assert_eq!(Key::named("x").as_name(), Some("x"));
    assert!(Key::of::<Beta>().as_type().is_some());
  }
}
