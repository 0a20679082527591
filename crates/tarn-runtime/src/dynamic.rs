//! Forwardable capability surface
//!
//! [`Dynamic`] is the explicit interface of every operation a proxy or
//! singleton adapter can forward to a target: method invocation by name,
//! field access, existence check, removal, stringification, duplication,
//! direct invocation, and serialization hooks. A target implements the
//! subset it supports; the defaults refuse the rest with
//! [`DynError::Unsupported`], so a stand-in never needs to know which
//! capabilities the concrete target carries.

use crate::error::{DynError, DynResult};
use std::fmt;
use tarn_core::Value;

/// The operations a target can be asked to perform.
///
/// Used in `Unsupported` errors and wherever an operation has to be
/// named rather than performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DynOp {
    /// Method invocation by name
    CallMethod,
    /// Field read
    GetField,
    /// Field write
    SetField,
    /// Field existence check
    HasField,
    /// Field removal
    RemoveField,
    /// String conversion
    Stringify,
    /// Duplication
    Duplicate,
    /// Direct invocation as a callable
    Call,
    /// Pre-serialize hook
    BeforeSerialize,
    /// Post-deserialize hook
    AfterDeserialize,
}

impl fmt::Debug for dyn Dynamic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.type_name())
    }
}

impl fmt::Display for DynOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DynOp::CallMethod => "method invocation",
            DynOp::GetField => "field read",
            DynOp::SetField => "field write",
            DynOp::HasField => "field existence check",
            DynOp::RemoveField => "field removal",
            DynOp::Stringify => "string conversion",
            DynOp::Duplicate => "duplication",
            DynOp::Call => "direct invocation",
            DynOp::BeforeSerialize => "the pre-serialize hook",
            DynOp::AfterDeserialize => "the post-deserialize hook",
        };
        write!(f, "{}", name)
    }
}

/// A target that forwarded operations can be applied to.
///
/// Implement the operations the target supports; the remaining defaults
/// answer with [`DynError::Unsupported`] (or `false` for the existence
/// check, and no-ops for the serialization hooks).
pub trait Dynamic: Send {
    /// Get the target's type name
    fn type_name(&self) -> &'static str;

    /// Invoke a method by name with positional arguments
    fn call_method(&mut self, name: &str, args: Vec<Value>) -> DynResult<Value> {
        let _ = args;
        Err(DynError::NoSuchMethod {
            type_name: self.type_name(),
            name: name.to_string(),
        })
    }

    /// Read a field by name
    fn get_field(&self, name: &str) -> DynResult<Value> {
        Err(DynError::NoSuchField {
            type_name: self.type_name(),
            name: name.to_string(),
        })
    }

    /// Write a field by name
    fn set_field(&mut self, name: &str, value: Value) -> DynResult<()> {
        let _ = value;
        Err(DynError::NoSuchField {
            type_name: self.type_name(),
            name: name.to_string(),
        })
    }

    /// Check whether a field exists
    fn has_field(&self, name: &str) -> bool {
        let _ = name;
        false
    }

    /// Remove a field by name
    fn remove_field(&mut self, name: &str) -> DynResult<()> {
        let _ = name;
        Err(DynError::Unsupported {
            type_name: self.type_name(),
            op: DynOp::RemoveField,
        })
    }

    /// Convert the target to its string form
    fn stringify(&self) -> String {
        format!("<{}>", self.type_name())
    }

    /// Duplicate the target
    fn duplicate(&self) -> DynResult<Box<dyn Dynamic>> {
        Err(DynError::Unsupported {
            type_name: self.type_name(),
            op: DynOp::Duplicate,
        })
    }

    /// Invoke the target itself as a callable
    fn call(&mut self, args: Vec<Value>) -> DynResult<Value> {
        let _ = args;
        Err(DynError::Unsupported {
            type_name: self.type_name(),
            op: DynOp::Call,
        })
    }

    /// Hook run before the target is serialized
    fn before_serialize(&mut self) -> DynResult<()> {
        Ok(())
    }

    /// Hook run after the target is deserialized
    fn after_deserialize(&mut self) -> DynResult<()> {
        Ok(())
    }
}
