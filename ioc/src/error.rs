//! Errors raised while binding and resolving.

use crate::key::Key;
use thiserror::Error;

/// Error type returned by user collaborators: factories, start hooks and providers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for `fibre_inject`.
#[derive(Debug, Error)]
pub enum Error {
  #[error("key {key} is already bound")]
  DuplicateBinding { key: Key },

  #[error("key {key} not bound")]
  KeyNotBound { key: Key },

  #[error("key {key} is bound but has no implementation")]
  NoImplementation { key: Key },

  #[error("invalid injection point '{point}' on {type_name}: {reason}")]
  InvalidInjectionPoint {
    type_name: &'static str,
    point: &'static str,
    reason: &'static str,
  },

  #[error("no instance found for required injection '{point}', key={key}")]
  InjectionFailed { key: Key, point: &'static str },

  #[error("creation of instance for key={key} failed: {source}")]
  ConstructionFailed {
    key: Key,
    #[source]
    source: BoxError,
  },

  #[error("value bound to {key} is not a {expected}")]
  TypeMismatch { key: Key, expected: &'static str },

  #[error("{provider} was resolved as provider for {key} but does not implement Provider")]
  NotAProvider { key: Key, provider: Key },
}

impl Error {
  /// `true` for the failures an optional injection point treats as "absent".
  pub fn is_not_found(&self) -> bool {
    matches!(
      self,
      Error::KeyNotBound { .. } | Error::NoImplementation { .. }
    )
  }

  /// The key the failure is reported against, if any.
  pub fn key(&self) -> Option<&Key> {
    match self {
      Error::DuplicateBinding { key }
      | Error::KeyNotBound { key }
      | Error::NoImplementation { key }
      | Error::InjectionFailed { key, .. }
      | Error::ConstructionFailed { key, .. }
      | Error::TypeMismatch { key, .. }
      | Error::NotAProvider { key, .. } => Some(key),
      Error::InvalidInjectionPoint { .. } => None,
    }
  }

  pub(crate) fn construction(key: &Key, source: impl Into<BoxError>) -> Self {
    Error::ConstructionFailed {
      key: key.clone(),
      source: source.into(),
    }
  }
}

/// A specialized `Result` type for `fibre_inject` operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
