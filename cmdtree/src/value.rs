//! Bound value model.
//!
//! Handlers receive their inputs as a slice of [`Value`], one entry per
//! matched parameter in declaration order. The enum covers every built-in
//! converter's output; cloning is cheap (file handles are shared behind an
//! `Arc` and released when the last bound list drops).

use std::collections::BTreeSet;
use std::fmt;
use std::fs::File;
use std::sync::Arc;

use chrono::NaiveDateTime;

/// A single type-converted value produced by binding.
#[derive(Debug, Clone)]
pub enum Value {
    /// Explicit null for an absent optional option without a default.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Materialized half-open integer range, the `IntRange` product.
    Range(Vec<i64>),
    DateTime(NaiveDateTime),
    /// Set of content hashes scanned out of a file, the `Sha256` product.
    Hashes(BTreeSet<String>),
    Json(serde_json::Value),
    /// Open read handle, the `FileParam` product. Scoped: the file closes
    /// when every clone of the bound value has dropped, on success and on
    /// early-error exits alike.
    File(Arc<File>),
    /// Every occurrence of a `multiple` option, occurrence order preserved.
    List(Vec<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_range(&self) -> Option<&[i64]> {
        match self {
            Value::Range(ns) => Some(ns),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(vs) => Some(vs),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Value::Json(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_file(&self) -> Option<&Arc<File>> {
        match self {
            Value::File(f) => Some(f),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Range(a), Value::Range(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::Hashes(a), Value::Hashes(b)) => a == b,
            (Value::Json(a), Value::Json(b)) => a == b,
            // Handle identity, not content
            (Value::File(a), Value::File(b)) => Arc::ptr_eq(a, b),
            (Value::List(a), Value::List(b)) => a == b,
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
            Value::Range(ns) => {
                let parts: Vec<String> = ns.iter().map(|n| n.to_string()).collect();
                write!(f, "{}", parts.join(", "))
            }
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Value::Hashes(hs) => {
                let parts: Vec<&str> = hs.iter().map(String::as_str).collect();
                write!(f, "{}", parts.join(", "))
            }
            Value::Json(v) => write!(f, "{v}"),
            Value::File(_) => f.write_str("<open file>"),
            Value::List(vs) => {
                let parts: Vec<String> = vs.iter().map(|v| v.to_string()).collect();
                write!(f, "{}", parts.join(", "))
            }
        }
    }
}
