//! Public macros for ergonomic service resolution.

/// Resolves a service from a registry, panicking if it cannot be resolved.
///
/// Meant for application wiring code where a missing binding is a
/// programming error. For a non-panicking version, use `Registry::get` or
/// `Registry::get_type` directly.
///
/// # Panics
///
/// Panics with the resolution error if the key is not bound, construction
/// fails, or the value is not a `$type`.
///
/// # Examples
///
/// ```
/// use fibre_inject::{resolve, Registry};
///
/// let registry = Registry::new();
/// registry.bind_instance("greeting", String::from("hello")).unwrap();
/// registry.bind_instance(fibre_inject::Key::of::<u32>(), 42u32).unwrap();
///
/// // Resolve by type
/// assert_eq!(*resolve!(registry, u32), 42);
///
/// // Resolve by name
/// let message = resolve!(registry, String, "greeting");
/// assert_eq!(*message, "hello");
/// ```
///
/// Interfaces bound with `bind_type_as` (or as `Arc<dyn Trait>` instances)
/// resolve with the `trait` forms:
///
/// ```
/// use fibre_inject::{resolve, Registry};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync { fn greet(&self) -> String; }
/// struct EnglishGreeter;
/// impl Greeter for EnglishGreeter {
///     fn greet(&self) -> String { "Hello".to_string() }
/// }
///
/// let registry = Registry::new();
/// registry
///     .bind_instance(fibre_inject::Key::of::<dyn Greeter>(), Arc::new(EnglishGreeter) as Arc<dyn Greeter>)
///     .unwrap();
/// registry
///     .bind_instance("polite", Arc::new(EnglishGreeter) as Arc<dyn Greeter>)
///     .unwrap();
///
/// assert_eq!(resolve!(registry, trait Greeter).greet(), "Hello");
/// assert_eq!(resolve!(registry, trait Greeter, "polite").greet(), "Hello");
/// ```
#[macro_export]
macro_rules! resolve {
    // Arm for resolving a trait object: resolve!(registry, trait MyTrait)
    ($registry:expr, trait $trait_ident:ident) => {
        $registry
            .get_trait::<dyn $trait_ident>($crate::Key::of::<dyn $trait_ident>())
            .unwrap_or_else(|err| {
                panic!(
                    "Failed to resolve required trait service {}: {}",
                    std::any::type_name::<dyn $trait_ident>(),
                    err
                )
            })
    };

    // Arm for resolving a trait object under a key: resolve!(registry, trait MyTrait, "name")
    ($registry:expr, trait $trait_ident:ident, $key:expr) => {{
        let key = $crate::Key::from($key);
        $registry
            .get_trait::<dyn $trait_ident>(&key)
            .unwrap_or_else(|err| {
                panic!(
                    "Failed to resolve required trait service {} for key {}: {}",
                    std::any::type_name::<dyn $trait_ident>(),
                    key,
                    err
                )
            })
    }};

    // Arm for resolving by type: resolve!(registry, MyService)
    ($registry:expr, $type:ty) => {
        $registry
            .get_type::<$type>()
            .unwrap_or_else(|err| {
                panic!(
                    "Failed to resolve required service {}: {}",
                    std::any::type_name::<$type>(),
                    err
                )
            })
    };

    // Arm for resolving under a key: resolve!(registry, MyService, "name")
    ($registry:expr, $type:ty, $key:expr) => {{
        let key = $crate::Key::from($key);
        $registry
            .get::<$type>(&key)
            .unwrap_or_else(|err| {
                panic!(
                    "Failed to resolve required service {} for key {}: {}",
                    std::any::type_name::<$type>(),
                    key,
                    err
                )
            })
    }};
}
