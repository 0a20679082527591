//! Lazy singleton adapter
//!
//! A declared type implements [`Singleton`] and provides the one
//! `instantiate` that builds its long-lived instance. The module-level
//! [`instance`] accessor is the only creation path: the first call for a
//! declared type runs `instantiate` exactly once, caches the instance in
//! the process-wide registry, and every later call reuses it. Entries are
//! never removed.
//!
//! The returned [`SingletonHandle`] exposes the forwarding surface but no
//! public constructor and no duplication, so sealed construction and
//! duplication are rejected at compile time rather than at call time.

use crate::dynamic::Dynamic;
use crate::error::DynResult;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::any::TypeId;
use std::sync::Arc;
use tarn_core::Value;

/// A declared type whose single instance is built on first use.
pub trait Singleton: 'static {
    /// Build the one long-lived instance for this declared type.
    ///
    /// Called at most once per process.
    fn instantiate() -> Box<dyn Dynamic>;
}

// One materialized instance per declared type, for the process lifetime.
// The DashMap entry API serializes the first-access race, so
// `instantiate` runs at most once even under concurrent first use.
static REGISTRY: Lazy<DashMap<TypeId, SingletonHandle>> = Lazy::new(DashMap::new);

/// Handle to a declared type's single instance.
///
/// Clones share the instance. There is no public constructor; handles
/// come only from [`instance`].
#[derive(Clone)]
pub struct SingletonHandle {
    cell: Arc<Mutex<Box<dyn Dynamic>>>,
}

/// Get the handle for a declared type, building its instance on first use
pub fn instance<S: Singleton>() -> SingletonHandle {
    REGISTRY
        .entry(TypeId::of::<S>())
        .or_insert_with(|| SingletonHandle {
            cell: Arc::new(Mutex::new(S::instantiate())),
        })
        .clone()
}

/// Check whether a declared type's instance has been built.
///
/// Pure query; never triggers instantiation.
pub fn is_instantiated<S: Singleton>() -> bool {
    REGISTRY.contains_key(&TypeId::of::<S>())
}

impl SingletonHandle {
    /// Forward a method invocation to the instance
    pub fn call_method(&self, name: &str, args: Vec<Value>) -> DynResult<Value> {
        self.cell.lock().call_method(name, args)
    }

    /// Forward a field read to the instance
    pub fn get_field(&self, name: &str) -> DynResult<Value> {
        self.cell.lock().get_field(name)
    }

    /// Forward a field write to the instance
    pub fn set_field(&self, name: &str, value: Value) -> DynResult<()> {
        self.cell.lock().set_field(name, value)
    }

    /// Forward a field existence check to the instance
    pub fn has_field(&self, name: &str) -> bool {
        self.cell.lock().has_field(name)
    }

    /// Forward a field removal to the instance
    pub fn remove_field(&self, name: &str) -> DynResult<()> {
        self.cell.lock().remove_field(name)
    }

    /// Forward string conversion to the instance
    pub fn stringify(&self) -> String {
        self.cell.lock().stringify()
    }

    /// Forward direct invocation to the instance
    pub fn call(&self, args: Vec<Value>) -> DynResult<Value> {
        self.cell.lock().call(args)
    }

    /// Forward the pre-serialize hook to the instance
    pub fn before_serialize(&self) -> DynResult<()> {
        self.cell.lock().before_serialize()
    }

    /// Forward the post-deserialize hook to the instance
    pub fn after_deserialize(&self) -> DynResult<()> {
        self.cell.lock().after_deserialize()
    }

    /// The instance's type name
    pub fn type_name(&self) -> &'static str {
        self.cell.lock().type_name()
    }
}

impl std::fmt::Debug for SingletonHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingletonHandle")
            .field("type_name", &self.type_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DynError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Store {
        entries: Vec<Value>,
    }

    impl Dynamic for Store {
        fn type_name(&self) -> &'static str {
            "Store"
        }

        fn call_method(&mut self, name: &str, mut args: Vec<Value>) -> DynResult<Value> {
            match name {
                "push" => {
                    self.entries.append(&mut args);
                    Ok(Value::Int(self.entries.len() as i64))
                }
                "len" => Ok(Value::Int(self.entries.len() as i64)),
                _ => Err(DynError::NoSuchMethod {
                    type_name: self.type_name(),
                    name: name.to_string(),
                }),
            }
        }
    }

    // Each test declares its own singleton type: registry entries are
    // process-wide and never removed.
    static STORE_BUILDS: AtomicUsize = AtomicUsize::new(0);

    struct SharedStore;

    impl Singleton for SharedStore {
        fn instantiate() -> Box<dyn Dynamic> {
            STORE_BUILDS.fetch_add(1, Ordering::SeqCst);
            Box::new(Store { entries: vec![] })
        }
    }

    #[test]
    fn test_state_shared_across_operations() {
        let len = instance::<SharedStore>()
            .call_method("push", vec![Value::Int(1)])
            .unwrap();
        assert_eq!(len, Value::Int(1));

        // Second forwarded call observes the first call's mutation
        let len = instance::<SharedStore>()
            .call_method("push", vec![Value::Int(2)])
            .unwrap();
        assert_eq!(len, Value::Int(2));

        // One instantiation across all calls
        assert_eq!(STORE_BUILDS.load(Ordering::SeqCst), 1);
        assert!(is_instantiated::<SharedStore>());
    }

    struct LazySide;

    impl Singleton for LazySide {
        fn instantiate() -> Box<dyn Dynamic> {
            Box::new(Store { entries: vec![] })
        }
    }

    #[test]
    fn test_not_instantiated_until_referenced() {
        assert!(!is_instantiated::<LazySide>());
        let _ = instance::<LazySide>();
        assert!(is_instantiated::<LazySide>());
    }

    static RACE_BUILDS: AtomicUsize = AtomicUsize::new(0);

    struct Raced;

    impl Singleton for Raced {
        fn instantiate() -> Box<dyn Dynamic> {
            RACE_BUILDS.fetch_add(1, Ordering::SeqCst);
            Box::new(Store { entries: vec![] })
        }
    }

    #[test]
    fn test_concurrent_first_access_instantiates_once() {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                std::thread::spawn(|| {
                    instance::<Raced>()
                        .call_method("push", vec![Value::Null])
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(RACE_BUILDS.load(Ordering::SeqCst), 1);
        assert_eq!(
            instance::<Raced>().call_method("len", vec![]).unwrap(),
            Value::Int(8)
        );
    }

    struct Plain;

    impl Singleton for Plain {
        fn instantiate() -> Box<dyn Dynamic> {
            struct Unit;
            impl Dynamic for Unit {
                fn type_name(&self) -> &'static str {
                    "Unit"
                }
            }
            Box::new(Unit)
        }
    }

    #[test]
    fn test_handle_clones_share_instance() {
        let a = instance::<Plain>();
        let b = a.clone();
        assert_eq!(a.type_name(), "Unit");
        assert_eq!(b.type_name(), "Unit");
        assert_eq!(a.stringify(), b.stringify());
    }
}
