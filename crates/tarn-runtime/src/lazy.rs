//! Deferred-instantiation proxy
//!
//! [`LazyProxy`] captures a type token and a constructor argument list,
//! and builds the real instance only when the first operation is
//! forwarded to it. From that point on it is observationally
//! indistinguishable from a directly-constructed instance: every
//! operation of the [`Dynamic`] surface goes through verbatim.
//!
//! The state transition is one-way: `Pending(args)` becomes
//! `Materialized(instance)` at most once per proxy. A failed
//! construction leaves the proxy `Pending` with its arguments intact, so
//! a caller that retries the operation retries the construction too —
//! failures are never cached.

use crate::dynamic::Dynamic;
use crate::error::{ConstructionError, DynResult};
use crate::factory::{TypeRegistry, TypeToken};
use parking_lot::Mutex;
use tarn_core::Value;

enum ProxyState {
    /// Holding the constructor arguments; nothing built yet
    Pending(Vec<Value>),
    /// Owning the one materialized instance
    Materialized(Box<dyn Dynamic>),
}

/// A proxy that constructs its target on first forwarded operation.
pub struct LazyProxy {
    token: TypeToken,
    registry: TypeRegistry,
    state: Mutex<ProxyState>,
}

impl LazyProxy {
    /// Create a proxy for the type behind `token`, capturing the full
    /// constructor argument list.
    pub fn new(registry: TypeRegistry, token: TypeToken, args: Vec<Value>) -> Self {
        Self {
            token,
            registry,
            state: Mutex::new(ProxyState::Pending(args)),
        }
    }

    /// The token of the proxied type
    pub fn token(&self) -> TypeToken {
        self.token
    }

    /// Check whether the target has been constructed.
    ///
    /// Pure state query; never triggers construction.
    pub fn is_instantiated(&self) -> bool {
        matches!(*self.state.lock(), ProxyState::Materialized(_))
    }

    /// Construct the target now if it has not been constructed yet.
    ///
    /// Idempotent: a materialized proxy is left untouched. On failure the
    /// proxy stays pending and the error surfaces to the caller.
    pub fn instantiate(&self) -> Result<(), ConstructionError> {
        let mut state = self.state.lock();
        if let ProxyState::Pending(args) = &*state {
            let instance = self.registry.construct(self.token, args.clone())?;
            *state = ProxyState::Materialized(instance);
        }
        Ok(())
    }

    /// Materialize if needed, then apply one operation to the target.
    ///
    /// The lock is held across the check-then-construct sequence, so
    /// concurrent first accesses still construct at most once.
    fn with_target<R>(&self, f: impl FnOnce(&mut dyn Dynamic) -> DynResult<R>) -> DynResult<R> {
        let mut state = self.state.lock();
        match &mut *state {
            ProxyState::Materialized(instance) => f(instance.as_mut()),
            ProxyState::Pending(args) => {
                let mut instance = self.registry.construct(self.token, args.clone())?;
                let out = f(instance.as_mut());
                *state = ProxyState::Materialized(instance);
                out
            }
        }
    }

    /// Forward a method invocation
    pub fn call_method(&self, name: &str, args: Vec<Value>) -> DynResult<Value> {
        self.with_target(|target| target.call_method(name, args))
    }

    /// Forward a field read
    pub fn get_field(&self, name: &str) -> DynResult<Value> {
        self.with_target(|target| target.get_field(name))
    }

    /// Forward a field write
    pub fn set_field(&self, name: &str, value: Value) -> DynResult<()> {
        self.with_target(|target| target.set_field(name, value))
    }

    /// Forward a field existence check
    pub fn has_field(&self, name: &str) -> DynResult<bool> {
        self.with_target(|target| Ok(target.has_field(name)))
    }

    /// Forward a field removal
    pub fn remove_field(&self, name: &str) -> DynResult<()> {
        self.with_target(|target| target.remove_field(name))
    }

    /// Forward string conversion
    pub fn stringify(&self) -> DynResult<String> {
        self.with_target(|target| Ok(target.stringify()))
    }

    /// Forward duplication
    pub fn duplicate(&self) -> DynResult<Box<dyn Dynamic>> {
        self.with_target(|target| target.duplicate())
    }

    /// Forward direct invocation
    pub fn call(&self, args: Vec<Value>) -> DynResult<Value> {
        self.with_target(|target| target.call(args))
    }

    /// Forward the pre-serialize hook
    pub fn before_serialize(&self) -> DynResult<()> {
        self.with_target(|target| target.before_serialize())
    }

    /// Forward the post-deserialize hook
    pub fn after_deserialize(&self) -> DynResult<()> {
        self.with_target(|target| target.after_deserialize())
    }
}

// A proxy can stand wherever a target can.
impl Dynamic for LazyProxy {
    fn type_name(&self) -> &'static str {
        self.token.name()
    }

    fn call_method(&mut self, name: &str, args: Vec<Value>) -> DynResult<Value> {
        LazyProxy::call_method(self, name, args)
    }

    fn get_field(&self, name: &str) -> DynResult<Value> {
        LazyProxy::get_field(self, name)
    }

    fn set_field(&mut self, name: &str, value: Value) -> DynResult<()> {
        LazyProxy::set_field(self, name, value)
    }

    fn has_field(&self, name: &str) -> bool {
        LazyProxy::has_field(self, name).unwrap_or(false)
    }

    fn remove_field(&mut self, name: &str) -> DynResult<()> {
        LazyProxy::remove_field(self, name)
    }

    fn stringify(&self) -> String {
        LazyProxy::stringify(self).unwrap_or_else(|_| format!("<{}>", self.token))
    }

    fn duplicate(&self) -> DynResult<Box<dyn Dynamic>> {
        LazyProxy::duplicate(self)
    }

    fn call(&mut self, args: Vec<Value>) -> DynResult<Value> {
        LazyProxy::call(self, args)
    }

    fn before_serialize(&mut self) -> DynResult<()> {
        LazyProxy::before_serialize(self)
    }

    fn after_deserialize(&mut self) -> DynResult<()> {
        LazyProxy::after_deserialize(self)
    }
}

impl std::fmt::Debug for LazyProxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyProxy")
            .field("token", &self.token)
            .field("instantiated", &self.is_instantiated())
            .finish()
    }
}
