//! # cmdtree: a declarative command-tree CLI framework
//!
//! Declare a CLI as a tree of named command and group nodes, each carrying an
//! ordered list of typed parameter declarations, then hand the process's
//! argument vector to the root: routing walks the tree one name token at a
//! time, binding converts matched raw tokens to typed values, and the
//! terminal command's handler runs with those values.
//!
//! ## Core Principles
//!
//! - **Explicit declaration**: builders accumulate parameters in source
//!   order; no reflection, no attribute magic.
//! - **Typed binding**: every matched token passes through a pluggable
//!   converter before a handler sees it.
//! - **Pure routing**: each dispatch level takes an immutable token slice and
//!   hands its child a sub-slice; nodes hold no per-call state.
//! - **Typed failures**: binding and routing return errors up the call chain;
//!   only `run`/`run_from` print and choose an exit code.
//!
//! ## Quick Start
//!
//! ```
//! use cmdtree::{Arg, Command, Flag, Group, IntRange, Opt, Value};
//!
//! let hello = Command::builder("hello")
//!     .about("Greets NAME for a total of COUNT times.")
//!     .arg(Arg::new("NAME").help("The person to greet"))
//!     .opt(Opt::new("--count", "-c").converter(IntRange).default(1))
//!     .flag(Flag::new("--loud", "-l"))
//!     .build(|values| {
//!         let name = values.first().and_then(Value::as_str).unwrap_or("world");
//!         println!("Hello {name}!");
//!         Ok(())
//!     })
//!     .expect("valid declaration");
//!
//! let mut cli = Group::new("cli", "demo tree");
//! cli.add_command(hello).expect("unique child name");
//!
//! let tokens = vec!["hello".to_string(), "alice".to_string()];
//! cli.run_from(&tokens);
//! ```

pub mod bind;
pub mod convert;
pub mod logging;

mod command;
mod error;
mod group;
mod help;
mod host;
mod param;
mod value;

pub use command::{Command, CommandBuilder, Handler};
pub use convert::{
    Choices, Convert, ConvertError, Date, FileParam, IntRange, Json, Scalar, Sha256, Url,
};
pub use error::{Error, Result};
pub use group::{Group, GroupBuilder, Node};
pub use host::{Discoverable, HostCommand};
pub use param::{Arg, Flag, Opt, Param, Params};
pub use value::Value;

/// Terminal state of one dispatch pass that did not error.
#[derive(Debug)]
pub enum Outcome {
    /// A terminal command's handler ran.
    Completed,
    /// A help terminal was reached; carries the rendered document.
    Help(String),
}

/// Print a dispatch result the way the entry points do and pick the exit
/// code. Help goes to stdout and exits 0; errors go to stderr and exit
/// nonzero, with unknown-command errors also printing their augmented help.
pub(crate) fn report(result: Result<Outcome>) -> i32 {
    match result {
        Ok(Outcome::Completed) => 0,
        Ok(Outcome::Help(text)) => {
            println!("{text}");
            0
        }
        // The carried help is already augmented with the notice.
        Err(Error::UnknownCommand { help, .. }) => {
            println!("{help}");
            1
        }
        Err(err) => {
            eprintln!("{err}");
            err.exit_code()
        }
    }
}
