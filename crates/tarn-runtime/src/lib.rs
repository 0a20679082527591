//! Tarn Runtime Support
//!
//! Create-on-first-reference facilities for the Tarn runtime:
//! - The forwardable capability surface ([`Dynamic`]) and the typed
//!   constructor registry ([`TypeRegistry`]) behind it
//! - The deferred-instantiation proxy ([`LazyProxy`]): captures
//!   constructor arguments, builds the target on first forwarded
//!   operation, forwards everything afterwards
//! - The lazy singleton adapter ([`Singleton`], [`instance`]): one
//!   process-wide instance per declared type, built on first use
//! - The namespace autoloader ([`Autoloader`]): qualified names resolved
//!   to source files through ordered prefix routes, loaded exactly once

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod autoload;
pub mod dynamic;
pub mod error;
pub mod factory;
pub mod lazy;
pub mod singleton;

pub use autoload::{Autoloader, FsLoader, LoadOutcome, NamespaceRoute, SourceLoader};
pub use dynamic::{DynOp, Dynamic};
pub use error::{AutoloadError, ConstructionError, DynError, DynResult};
pub use factory::{Constructor, TypeRegistry, TypeToken};
pub use lazy::LazyProxy;
pub use singleton::{instance, is_instantiated, Singleton, SingletonHandle};
