//! # Fibre Inject
//!
//! A minimal, thread-safe Inversion of Control (IoC) container with lazy
//! singletons and setter injection.
//!
//! ## Core Concepts
//!
//! - **Registry**: maps a [`Key`] (a type or a name) to one binding.
//! - **Binding**: a key bound to a type ([`Component`]), to a fixed instance,
//!   or to a [`Provider`] found under another key.
//! - **Resolution**: the first `resolve` of a key creates its singleton,
//!   fills its [`InjectionPoint`]s from the registry and calls
//!   [`Startable::start`]. Later calls return the same instance.
//! - **Cycles**: an instance is published before its dependencies are
//!   injected, so mutually dependent types resolve to each other.
//! - **Interfaces**: `bind_type_as::<dyn Trait, Impl>` stores a singleton
//!   behind a trait object, read back with `get_trait` or injected through
//!   [`InjectionPoint::new_trait`].
//!
//! ## Quick Start
//!
//! ```
//! use fibre_inject::{BoxError, Component, InjectionPoint, Registry, Startable, Wired};
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! struct Database {
//!   name: Wired<String>,
//!   started: AtomicBool,
//! }
//!
//! impl Component for Database {
//!   fn create() -> Result<Self, BoxError> {
//!     Ok(Self::default())
//!   }
//!
//!   fn injection_points() -> Vec<InjectionPoint<Self>> {
//!     vec![
//!       InjectionPoint::new("name", |db: &Self, name: Arc<String>| db.name.set(name))
//!         .named("db_name"),
//!     ]
//!   }
//!
//!   fn as_startable(&self) -> Option<&dyn Startable> {
//!     Some(self)
//!   }
//! }
//!
//! impl Startable for Database {
//!   fn start(&self) -> Result<(), BoxError> {
//!     self.started.store(true, Ordering::SeqCst);
//!     Ok(())
//!   }
//! }
//!
//! let registry = Registry::new();
//! registry.bind_instance("db_name", String::from("prod-db")).unwrap();
//! registry.bind_type::<Database>().unwrap();
//!
//! let db = registry.get_type::<Database>().unwrap();
//! assert_eq!(db.name.get().map(|n| n.as_str()), Some("prod-db"));
//! assert!(db.started.load(Ordering::SeqCst));
//! assert!(Arc::ptr_eq(&db, &registry.get_type::<Database>().unwrap()));
//! ```

mod binding;
mod builder;
mod component;
mod error;
mod key;
mod macros;
mod monitor;
mod registry;

pub use builder::RegistryBuilder;
pub use component::{Component, DynProvider, InjectionPoint, Instance, Provider, Startable, Wired};
pub use error::{BoxError, Error, Result};
pub use key::{Key, TypeKey};
pub use monitor::{ConsoleMonitor, Monitor, TracingMonitor};
pub use registry::{BindingHandle, Registry};
