//! Pluggable single-token value converters.
//!
//! A converter turns one raw token into one typed [`Value`] or reports why it
//! could not. Converters are attached to parameter declarations once at
//! definition time and must never partially mutate shared state on failure.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use thiserror::Error;

use crate::Value;

/// Date patterns tried in priority order; first success wins.
pub const DATE_PATTERNS: &[&str] = &["%Y-%m-%d", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

const SHA256_HEX: &str = "[0-9a-fA-F]{64}";

/// Reason a converter rejected its input.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ConvertError(String);

impl ConvertError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Capability that turns one raw token into one typed value.
pub trait Convert: Send + Sync {
    /// Short type name shown in help tables.
    fn type_name(&self) -> &str;

    /// Parse one raw token.
    fn convert(&self, raw: &str) -> Result<Value, ConvertError>;
}

/// The default converter used when a parameter declares no type.
pub(crate) fn identity() -> Arc<dyn Convert> {
    Arc::new(Scalar::Str)
}

/// Scalar casts: the identity/string converter and the primitive parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar {
    Str,
    Int,
    Float,
    Bool,
}

impl Convert for Scalar {
    fn type_name(&self) -> &str {
        match self {
            Scalar::Str => "str",
            Scalar::Int => "int",
            Scalar::Float => "float",
            Scalar::Bool => "bool",
        }
    }

    fn convert(&self, raw: &str) -> Result<Value, ConvertError> {
        match self {
            Scalar::Str => Ok(Value::Str(raw.to_string())),
            Scalar::Int => raw
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| ConvertError::new(format!("'{raw}' is not an integer"))),
            Scalar::Float => raw
                .trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| ConvertError::new(format!("'{raw}' is not a number"))),
            Scalar::Bool => raw
                .trim()
                .parse::<bool>()
                .map(Value::Bool)
                .map_err(|_| ConvertError::new(format!("'{raw}' is not 'true' or 'false'"))),
        }
    }
}

/// Case-sensitive membership in a fixed set of allowed values.
#[derive(Debug, Clone)]
pub struct Choices {
    allowed: Vec<String>,
}

impl Choices {
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }
}

impl Convert for Choices {
    fn type_name(&self) -> &str {
        "Choices"
    }

    fn convert(&self, raw: &str) -> Result<Value, ConvertError> {
        if self.allowed.iter().any(|choice| choice == raw) {
            Ok(Value::Str(raw.to_string()))
        } else {
            Err(ConvertError::new(format!(
                "'{raw}' is not one of: {}",
                self.allowed.join(", ")
            )))
        }
    }
}

/// Half-open integer sequence: `"N"` yields `[0,N)`, `"A,B"` yields `[A,B)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntRange;

impl Convert for IntRange {
    fn type_name(&self) -> &str {
        "IntRange"
    }

    fn convert(&self, raw: &str) -> Result<Value, ConvertError> {
        let parse = |segment: &str| {
            segment
                .trim()
                .parse::<i64>()
                .map_err(|_| ConvertError::new(format!("'{segment}' is not an integer")))
        };
        let segments: Vec<&str> = raw.split(',').collect();
        let (start, end) = match segments.as_slice() {
            [end] => (0, parse(end)?),
            [start, end] => (parse(start)?, parse(end)?),
            _ => {
                return Err(ConvertError::new(format!(
                    "'{raw}' must be 'N' or 'A,B'"
                )))
            }
        };
        Ok(Value::Range((start..end).collect()))
    }
}

/// Tries [`DATE_PATTERNS`] in order; no match errors naming all of them.
#[derive(Debug, Clone, Copy, Default)]
pub struct Date;

impl Convert for Date {
    fn type_name(&self) -> &str {
        "Date"
    }

    fn convert(&self, raw: &str) -> Result<Value, ConvertError> {
        for pattern in DATE_PATTERNS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
                return Ok(Value::DateTime(dt));
            }
            if let Ok(date) = NaiveDate::parse_from_str(raw, pattern) {
                if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                    return Ok(Value::DateTime(dt));
                }
            }
        }
        Err(ConvertError::new(format!(
            "'{raw}' matched none of the supported patterns: {}",
            DATE_PATTERNS.join(", ")
        )))
    }
}

/// A 64-hex-digit content hash, given directly or scanned out of a file.
///
/// A raw value naming an existing regular file is read and every hash-shaped
/// substring in it is returned as a set (an empty set is a valid result). A
/// raw value naming a non-regular file is an error. Anything else must match
/// the hash pattern itself.
#[derive(Debug, Clone)]
pub struct Sha256 {
    scan: Regex,
    exact: Regex,
}

impl Sha256 {
    pub fn new() -> Self {
        Self {
            scan: Regex::new(SHA256_HEX).expect("hash pattern compiles"),
            exact: Regex::new(&format!("^{SHA256_HEX}$")).expect("hash pattern compiles"),
        }
    }
}

impl Default for Sha256 {
    fn default() -> Self {
        Self::new()
    }
}

impl Convert for Sha256 {
    fn type_name(&self) -> &str {
        "Sha256"
    }

    fn convert(&self, raw: &str) -> Result<Value, ConvertError> {
        let path = Path::new(raw);
        if path.exists() {
            if !path.is_file() {
                return Err(ConvertError::new(format!(
                    "'{raw}' exists but is not a regular file"
                )));
            }
            let bytes = fs::read(path)
                .map_err(|e| ConvertError::new(format!("failed to read '{raw}': {e}")))?;
            let text = String::from_utf8_lossy(&bytes);
            let hashes: BTreeSet<String> = self
                .scan
                .find_iter(&text)
                .map(|m| m.as_str().to_string())
                .collect();
            return Ok(Value::Hashes(hashes));
        }
        if self.exact.is_match(raw) {
            Ok(Value::Str(raw.to_string()))
        } else {
            Err(ConvertError::new(format!(
                "'{raw}' is not a sha256 hash or a readable file"
            )))
        }
    }
}

/// Regex-validated `scheme://rest` string.
#[derive(Debug, Clone)]
pub struct Url {
    pattern: Regex,
}

impl Url {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*://\S+$").expect("url pattern compiles"),
        }
    }
}

impl Default for Url {
    fn default() -> Self {
        Self::new()
    }
}

impl Convert for Url {
    fn type_name(&self) -> &str {
        "Url"
    }

    fn convert(&self, raw: &str) -> Result<Value, ConvertError> {
        if self.pattern.is_match(raw) {
            Ok(Value::Str(raw.to_string()))
        } else {
            Err(ConvertError::new(format!("'{raw}' is not a valid url")))
        }
    }
}

/// Parses a JSON document into a structured value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json;

impl Convert for Json {
    fn type_name(&self) -> &str {
        "Json"
    }

    fn convert(&self, raw: &str) -> Result<Value, ConvertError> {
        serde_json::from_str::<serde_json::Value>(raw)
            .map(Value::Json)
            .map_err(|e| ConvertError::new(format!("invalid json: {e}")))
    }
}

/// Opens an existing regular file for reading.
///
/// The produced handle lives inside the bound value list and closes when that
/// list drops, whichever way the invocation ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileParam;

impl Convert for FileParam {
    fn type_name(&self) -> &str {
        "File"
    }

    fn convert(&self, raw: &str) -> Result<Value, ConvertError> {
        let path = Path::new(raw);
        if !path.exists() {
            return Err(ConvertError::new(format!("no such file: '{raw}'")));
        }
        if !path.is_file() {
            return Err(ConvertError::new(format!(
                "'{raw}' exists but is not a regular file"
            )));
        }
        let file = fs::File::open(path)
            .map_err(|e| ConvertError::new(format!("failed to open '{raw}': {e}")))?;
        Ok(Value::File(Arc::new(file)))
    }
}
