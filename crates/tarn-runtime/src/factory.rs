//! Typed constructor registry
//!
//! The "construct an instance of a named type from a positional argument
//! list" capability, keyed by registered [`TypeToken`]s instead of
//! reflective type-name strings. The registry is built once through a
//! builder and shares its constructor table, so handles are cheap to
//! clone into every proxy that needs them.

use crate::dynamic::Dynamic;
use crate::error::ConstructionError;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;
use tarn_core::Value;

/// Stable identifier of a registered constructible type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeToken(&'static str);

impl TypeToken {
    /// Create a token from its registered name
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// The token's registered name
    pub const fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Constructor closure: positional arguments in, boxed target out.
pub type Constructor =
    Arc<dyn Fn(Vec<Value>) -> Result<Box<dyn Dynamic>, ConstructionError> + Send + Sync>;

/// Registry mapping type tokens to constructor closures.
///
/// Cloning shares the underlying table.
#[derive(Clone, Default)]
pub struct TypeRegistry {
    constructors: Arc<FxHashMap<TypeToken, Constructor>>,
}

impl TypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry builder
    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder {
            constructors: FxHashMap::default(),
        }
    }

    /// Check if a type token is registered
    pub fn contains(&self, token: TypeToken) -> bool {
        self.constructors.contains_key(&token)
    }

    /// Get the number of registered types
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    /// Construct an instance of the type behind a token.
    ///
    /// Fails with [`ConstructionError::UnknownType`] for unregistered
    /// tokens; otherwise returns whatever the constructor produces.
    pub fn construct(
        &self,
        token: TypeToken,
        args: Vec<Value>,
    ) -> Result<Box<dyn Dynamic>, ConstructionError> {
        let ctor = self
            .constructors
            .get(&token)
            .ok_or_else(|| ConstructionError::UnknownType(token.name().to_string()))?;
        ctor(args)
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.constructors.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`TypeRegistry`]
pub struct TypeRegistryBuilder {
    constructors: FxHashMap<TypeToken, Constructor>,
}

impl TypeRegistryBuilder {
    /// Register a constructor under a token
    pub fn register<F>(mut self, token: TypeToken, ctor: F) -> Self
    where
        F: Fn(Vec<Value>) -> Result<Box<dyn Dynamic>, ConstructionError> + Send + Sync + 'static,
    {
        self.constructors.insert(token, Arc::new(ctor));
        self
    }

    /// Build the registry
    pub fn build(self) -> TypeRegistry {
        TypeRegistry {
            constructors: Arc::new(self.constructors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DynResult;

    struct Pair {
        left: Value,
        right: Value,
    }

    impl Dynamic for Pair {
        fn type_name(&self) -> &'static str {
            "Pair"
        }

        fn get_field(&self, name: &str) -> DynResult<Value> {
            match name {
                "left" => Ok(self.left.clone()),
                "right" => Ok(self.right.clone()),
                _ => Err(crate::error::DynError::NoSuchField {
                    type_name: self.type_name(),
                    name: name.to_string(),
                }),
            }
        }
    }

    const PAIR: TypeToken = TypeToken::new("Pair");

    fn pair_registry() -> TypeRegistry {
        TypeRegistry::builder()
            .register(PAIR, |mut args| {
                if args.len() != 2 {
                    return Err(ConstructionError::Arity {
                        type_name: "Pair",
                        expected: 2,
                        got: args.len(),
                    });
                }
                let right = args.pop().unwrap();
                let left = args.pop().unwrap();
                Ok(Box::new(Pair { left, right }))
            })
            .build()
    }

    #[test]
    fn test_registry_builder() {
        let registry = pair_registry();
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
        assert!(TypeRegistry::new().is_empty());
        assert!(registry.contains(PAIR));
        assert!(!registry.contains(TypeToken::new("Other")));
        assert_eq!(PAIR.name(), "Pair");
        assert_eq!(format!("{}", PAIR), "Pair");
    }

    #[test]
    fn test_construct() {
        let registry = pair_registry();
        let instance = registry
            .construct(PAIR, vec![Value::Int(1), Value::Int(2)])
            .unwrap();
        assert_eq!(instance.type_name(), "Pair");
        assert_eq!(instance.get_field("left").unwrap(), Value::Int(1));
        assert_eq!(instance.get_field("right").unwrap(), Value::Int(2));
    }

    #[test]
    fn test_construct_unknown_type() {
        let registry = pair_registry();
        let err = registry.construct(TypeToken::new("Ghost"), vec![]).unwrap_err();
        assert_eq!(err, ConstructionError::UnknownType("Ghost".to_string()));
    }

    #[test]
    fn test_construct_arity_mismatch() {
        let registry = pair_registry();
        let err = registry.construct(PAIR, vec![Value::Int(1)]).unwrap_err();
        assert_eq!(
            err,
            ConstructionError::Arity {
                type_name: "Pair",
                expected: 2,
                got: 1,
            }
        );
    }

    #[test]
    fn test_registry_clone_shares_table() {
        let registry = pair_registry();
        let clone = registry.clone();
        assert!(clone.contains(PAIR));
        assert_eq!(clone.len(), registry.len());
    }
}
