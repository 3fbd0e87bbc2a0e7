//! Token matching and value binding.
//!
//! Given a node's ordered parameter list and an immutable token slice, [`bind`]
//! produces one converted value per matched parameter, in parameter-list
//! order. Nothing here mutates the token sequence; routing layers slice it
//! and hand each level its own borrow.

use std::sync::Arc;

use tracing::trace;

use crate::convert::Convert;
use crate::param::{Param, Params};
use crate::{Error, Result, Value};

/// Literal token that short-circuits any node to help rendering.
pub const HELP_TOKEN: &str = "--help";

/// Result of binding a parameter list against a token slice.
#[derive(Debug)]
pub struct Binding {
    /// Converted values, parameter-list order. May be shorter than the
    /// parameter list when trailing positional arguments were absent.
    pub values: Vec<Value>,
    /// Which token indices were claimed by a parameter; the router uses the
    /// leftovers to detect unknown commands.
    pub(crate) consumed: Vec<bool>,
}

impl Binding {
    /// First token index no parameter claimed, if any.
    pub(crate) fn first_unconsumed(&self) -> Option<usize> {
        self.consumed.iter().position(|taken| !taken)
    }
}

/// True when the slice carries the literal help token anywhere.
pub fn wants_help(tokens: &[String]) -> bool {
    tokens.iter().any(|token| token == HELP_TOKEN)
}

/// Match a parameter list against a token slice and convert every match.
pub fn bind(params: &Params, tokens: &[String]) -> Result<Binding> {
    let mut values = Vec::with_capacity(params.len());
    let mut consumed = vec![false; tokens.len()];
    // Positional slot of the next Arg; counts Arg declarations only.
    let mut arg_slot = 0usize;

    for param in params.iter() {
        match param {
            Param::Arg(arg) => {
                match tokens.get(arg_slot) {
                    Some(token) if token.starts_with('-') => {
                        return Err(Error::ArgumentPositionConflict {
                            param: arg.name.clone(),
                            token: token.clone(),
                        });
                    }
                    Some(token) if !token.is_empty() => {
                        values.push(converted(&arg.name, &arg.converter, token)?);
                        consumed[arg_slot] = true;
                    }
                    // Absent positionals bind nothing; arguments are
                    // implicitly optional and handlers tolerate a shorter
                    // value list.
                    _ => {}
                }
                arg_slot += 1;
            }
            Param::Opt(opt) => {
                let mut found = Vec::new();
                let mut i = 0;
                while i < tokens.len() {
                    if tokens[i] == opt.name || tokens[i] == opt.short {
                        if let Some(value) = tokens.get(i + 1) {
                            if !value.is_empty() {
                                consumed[i] = true;
                                consumed[i + 1] = true;
                                found.push(converted(&opt.name, &opt.converter, value)?);
                                i += 2;
                                continue;
                            }
                        }
                    }
                    i += 1;
                }

                if found.is_empty() {
                    if opt.required {
                        return Err(Error::MissingRequiredOption {
                            option: opt.name.clone(),
                        });
                    }
                    match &opt.default {
                        Some(raw) => values.push(converted(&opt.name, &opt.converter, raw)?),
                        None => values.push(Value::Null),
                    }
                } else if opt.multiple {
                    values.push(Value::List(found));
                } else {
                    values.push(found.swap_remove(0));
                }
            }
            Param::Flag(flag) => {
                let mut present = false;
                for (i, token) in tokens.iter().enumerate() {
                    if token == &flag.name || token == &flag.short {
                        consumed[i] = true;
                        present = true;
                    }
                }
                values.push(Value::Bool(present));
            }
        }
    }

    trace!(bound = values.len(), tokens = tokens.len(), "bind complete");
    Ok(Binding { values, consumed })
}

fn converted(name: &str, converter: &Arc<dyn Convert>, raw: &str) -> Result<Value> {
    converter.convert(raw).map_err(|e| Error::MalformedValue {
        param: name.to_string(),
        raw: raw.to_string(),
        reason: e.to_string(),
    })
}
