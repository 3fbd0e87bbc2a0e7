//! Single-command demo: one argument, one converted option, one flag.
//!
//! ```text
//! greeting alice -c 0,3
//! greeting bob --count 5 --no-repeat
//! ```

use cmdtree::{Arg, Command, Flag, IntRange, Opt, Value};

fn main() {
    cmdtree::logging::init_subscriber();

    let hello = Command::builder("greeting")
        .about("Simple program that greets NAME for a total of COUNT times.")
        .arg(Arg::new("NAME").help("The person to greet"))
        .opt(
            Opt::new("--count", "-c")
                .converter(IntRange)
                .default(1)
                .help("Number of greetings: -c 0,5 or -c 5"),
        )
        .flag(Flag::new("--no-repeat", "-nr").help("If given, the greeting will not repeat"))
        .build(|values| {
            let name = values
                .first()
                .and_then(Value::as_str)
                .unwrap_or("world")
                .to_string();
            let (count, no_repeat) = match values {
                [_, count, no_repeat] => (
                    count.as_range().map(<[i64]>::len).unwrap_or(1),
                    no_repeat.as_bool().unwrap_or(false),
                ),
                _ => (1, false),
            };
            for _ in 0..count {
                println!("Hello {name:?}");
                if no_repeat {
                    break;
                }
            }
            Ok(())
        })
        .expect("valid declaration");

    std::process::exit(hello.run());
}
