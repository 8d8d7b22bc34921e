mod common;

use common::{MessageProvider, SequenceProvider, Simple, SimpleProvider, C};
use fibre_inject::{Error, Key, Registry};
use std::sync::Arc;

#[test]
fn test_provider_is_asked_on_every_resolution() {
  let registry = Registry::new();
  registry.bind_type::<SequenceProvider>().unwrap();
  registry
    .bind("version")
    .unwrap()
    .to_provider(Key::of::<SequenceProvider>());

  let v1 = registry.get::<String>("version").unwrap();
  let v2 = registry.get::<String>("version").unwrap();

  assert_eq!(*v1, "v1");
  assert_eq!(*v2, "v2");
}

#[test]
fn test_provider_itself_is_a_singleton() {
  let registry = Registry::new();
  registry.bind_type::<SequenceProvider>().unwrap();
  registry.bind("version").unwrap().to_provider(Key::of::<SequenceProvider>());

  let p1 = registry.get_type::<SequenceProvider>().unwrap();
  let _ = registry.get::<String>("version").unwrap();
  let p2 = registry.get_type::<SequenceProvider>().unwrap();

  assert!(Arc::ptr_eq(&p1, &p2));
}

#[test]
fn test_provider_products_feed_injection() {
  let registry = Registry::new();
  registry.bind_type::<MessageProvider>().unwrap();
  registry.bind_type::<SimpleProvider>().unwrap();
  registry.bind("message").unwrap().to_provider(Key::of::<MessageProvider>());
  registry
    .bind(Key::of::<Simple>())
    .unwrap()
    .to_provider(Key::of::<SimpleProvider>());

  let o = registry.get_type::<Simple>().unwrap();
  assert_eq!(o.msg, "instance by provider");

  // SimpleProvider memoizes its own product.
  let o2 = registry.get_type::<Simple>().unwrap();
  assert!(Arc::ptr_eq(&o, &o2));
}

#[test]
fn test_provider_key_may_be_bound_after_indirection() {
  let registry = Registry::new();
  registry.bind("version").unwrap().to_provider("sequence");
  registry.bind("sequence").unwrap().to_type::<SequenceProvider>();

  assert_eq!(*registry.get::<String>("version").unwrap(), "v1");
}

#[test]
fn test_unbound_provider_key_is_not_bound() {
  let registry = Registry::new();
  registry.bind("version").unwrap().to_provider("sequence");

  let err = registry.resolve("version").unwrap_err();
  assert!(matches!(err, Error::KeyNotBound { ref key } if *key == Key::named("sequence")));
}

#[test]
fn test_provider_key_without_provider_capability() {
  let registry = Registry::new();
  registry.bind_instance("plain", String::from("not a provider")).unwrap();
  registry.bind_type::<C>().unwrap();
  registry.bind("from_plain").unwrap().to_provider("plain");
  registry.bind("from_c").unwrap().to_provider(Key::of::<C>());

  for key in ["from_plain", "from_c"] {
    let err = registry.resolve(key).unwrap_err();
    assert!(matches!(err, Error::NotAProvider { .. }), "{:?}", err);
  }
}

#[test]
fn test_chained_indirection_is_not_a_provider() {
  let registry = Registry::new();
  registry.bind_type::<SequenceProvider>().unwrap();
  registry.bind("first").unwrap().to_provider(Key::of::<SequenceProvider>());
  registry.bind("second").unwrap().to_provider("first");

  let err = registry.resolve("second").unwrap_err();
  assert!(matches!(
    err,
    Error::NotAProvider { ref provider, .. } if *provider == Key::named("first")
  ));
}

#[test]
fn test_fixed_provider_instance_serves_indirection() {
  let registry = Registry::new();
  registry
    .bind_provider_instance("sequence", SequenceProvider::default())
    .unwrap();
  registry.bind("version").unwrap().to_provider("sequence");
  registry.bind("message").unwrap().to_provider_instance(MessageProvider);
  registry.bind("greeting").unwrap().to_provider("message");

  assert_eq!(*registry.get::<String>("version").unwrap(), "v1");
  assert_eq!(*registry.get::<String>("version").unwrap(), "v2");
  assert_eq!(*registry.get::<String>("greeting").unwrap(), "instance by provider");

  // The provider itself still resolves as the fixed value.
  let p1 = registry.get::<SequenceProvider>("sequence").unwrap();
  let p2 = registry.get::<SequenceProvider>("sequence").unwrap();
  assert!(Arc::ptr_eq(&p1, &p2));
}
