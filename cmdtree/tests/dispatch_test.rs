//! End-to-end tests for tree dispatch and binding.

use std::sync::{Arc, Mutex};

use cmdtree::{
    Arg, Command, Date, Error, Flag, Group, IntRange, Opt, Outcome, Scalar, Value,
};

fn tokens(strs: &[&str]) -> Vec<String> {
    strs.iter().map(|s| s.to_string()).collect()
}

/// Collects every handler invocation's bound values for later assertions.
#[derive(Clone, Default)]
struct Capture {
    calls: Arc<Mutex<Vec<Vec<Value>>>>,
}

impl Capture {
    fn handler(&self) -> impl Fn(&[Value]) -> cmdtree::Result<()> + Send + Sync + 'static {
        let calls = self.calls.clone();
        move |values| {
            calls.lock().unwrap().push(values.to_vec());
            Ok(())
        }
    }

    fn calls(&self) -> Vec<Vec<Value>> {
        self.calls.lock().unwrap().clone()
    }
}

#[test]
fn grandchild_command_runs_with_no_bound_values() {
    let capture = Capture::default();
    let list = Command::builder("list")
        .about("list users")
        .build(capture.handler())
        .unwrap();

    let mut users = Group::new("users", "user commands");
    users.add_command(list).unwrap();

    let mut cli = Group::new("cli", "root");
    cli.add_group(users).unwrap();
    cli.add_group(Group::new("perms", "permission commands"))
        .unwrap();

    let outcome = cli.dispatch(&tokens(&["users", "list"])).unwrap();
    assert!(matches!(outcome, Outcome::Completed));
    assert_eq!(capture.calls(), vec![Vec::<Value>::new()]);
}

#[test]
fn arg_and_option_bind_in_declaration_order() {
    let capture = Capture::default();
    let greet = Command::builder("greet")
        .arg(Arg::new("name"))
        .opt(Opt::new("--count", "-c").converter(Scalar::Int).default(1))
        .build(capture.handler())
        .unwrap();

    let mut cli = Group::new("cli", "root");
    cli.add_command(greet).unwrap();

    cli.dispatch(&tokens(&["greet", "alice", "--count", "3"]))
        .unwrap();
    assert_eq!(
        capture.calls(),
        vec![vec![Value::from("alice"), Value::Int(3)]]
    );
}

#[test]
fn first_occurrence_wins_without_multiple() {
    let capture = Capture::default();
    let cmd = Command::builder("tagged")
        .opt(Opt::new("--tag", "-t"))
        .build(capture.handler())
        .unwrap();

    cmd.invoke(&tokens(&["--tag", "a", "--tag", "b"])).unwrap();
    assert_eq!(capture.calls(), vec![vec![Value::from("a")]]);
}

#[test]
fn multiple_collects_every_occurrence_in_order() {
    let capture = Capture::default();
    let cmd = Command::builder("tagged")
        .opt(Opt::new("--tag", "-t").multiple())
        .build(capture.handler())
        .unwrap();

    cmd.invoke(&tokens(&["-t", "a", "--tag", "b"])).unwrap();
    assert_eq!(
        capture.calls(),
        vec![vec![Value::List(vec![Value::from("a"), Value::from("b")])]]
    );
}

#[test]
fn missing_required_option_stops_the_handler() {
    let capture = Capture::default();
    let cmd = Command::builder("strict")
        .opt(Opt::new("--count", "-c").required())
        .build(capture.handler())
        .unwrap();

    let err = cmd.invoke(&tokens(&[])).unwrap_err();
    assert!(matches!(err, Error::MissingRequiredOption { option } if option == "--count"));
    assert!(capture.calls().is_empty());
}

#[test]
fn int_range_option_binds_a_materialized_range() {
    let capture = Capture::default();
    let cmd = Command::builder("ranged")
        .opt(Opt::new("--count", "-c").converter(IntRange))
        .build(capture.handler())
        .unwrap();

    cmd.invoke(&tokens(&["--count", "2,5"])).unwrap();
    assert_eq!(capture.calls(), vec![vec![Value::Range(vec![2, 3, 4])]]);
}

#[test]
fn date_option_failure_reports_the_parameter() {
    let cmd = Command::builder("dated")
        .opt(Opt::new("--on", "-o").converter(Date))
        .build(|_| Ok(()))
        .unwrap();

    let err = cmd.invoke(&tokens(&["--on", "not-a-date"])).unwrap_err();
    match err {
        Error::MalformedValue { param, raw, reason } => {
            assert_eq!(param, "--on");
            assert_eq!(raw, "not-a-date");
            assert!(reason.contains("%Y-%m-%d"));
            assert!(reason.contains("%Y-%m-%dT%H:%M:%S"));
            assert!(reason.contains("%Y-%m-%d %H:%M:%S"));
        }
        other => panic!("expected malformed value, got {other}"),
    }
}

#[test]
fn help_at_root_invokes_no_handler() {
    let capture = Capture::default();
    let list = Command::builder("list")
        .build(capture.handler())
        .unwrap();
    let mut cli = Group::new("cli", "root");
    cli.add_command(list).unwrap();

    let outcome = cli.dispatch(&tokens(&["--help"])).unwrap();
    assert!(matches!(outcome, Outcome::Help(_)));
    assert!(capture.calls().is_empty());
}

#[test]
fn unknown_first_token_invokes_no_handler() {
    let capture = Capture::default();
    let list = Command::builder("list")
        .build(capture.handler())
        .unwrap();
    let mut cli = Group::new("cli", "root");
    cli.add_command(list).unwrap();

    let err = cli.dispatch(&tokens(&["bogus"])).unwrap_err();
    assert!(matches!(err, Error::UnknownCommand { name, .. } if name == "bogus"));
    assert!(capture.calls().is_empty());
}

#[test]
fn unknown_command_at_a_nested_level_names_the_stray_token() {
    let mut users = Group::new("users", "user commands");
    users
        .add_command(Command::builder("list").build(|_| Ok(())).unwrap())
        .unwrap();
    let mut cli = Group::new("cli", "root");
    cli.add_group(users).unwrap();

    let err = cli.dispatch(&tokens(&["users", "destroy"])).unwrap_err();
    match err {
        Error::UnknownCommand { name, help } => {
            assert_eq!(name, "destroy");
            assert!(help.contains("destroy"));
            assert!(help.contains("list"));
        }
        other => panic!("expected unknown command, got {other}"),
    }
}

#[test]
fn flags_bind_false_when_absent() {
    let capture = Capture::default();
    let cmd = Command::builder("flagged")
        .flag(Flag::new("--loud", "-l"))
        .build(capture.handler())
        .unwrap();

    cmd.invoke(&tokens(&[])).unwrap();
    cmd.invoke(&tokens(&["-l"])).unwrap();
    assert_eq!(
        capture.calls(),
        vec![vec![Value::Bool(false)], vec![Value::Bool(true)]]
    );
}

#[test]
fn run_from_maps_outcomes_to_exit_codes() {
    let ok = Command::builder("ok").build(|_| Ok(())).unwrap();
    assert_eq!(ok.run_from(&tokens(&[])), 0);
    assert_eq!(ok.run_from(&tokens(&["--help"])), 0);

    let failing = Command::builder("fail")
        .build(|_| Err(Error::failure("handler failed")))
        .unwrap();
    assert_eq!(failing.run_from(&tokens(&[])), 1);

    let cli = Group::new("cli", "root");
    assert_eq!(cli.run_from(&tokens(&["bogus"])), 1);
    assert_eq!(cli.run_from(&tokens(&[])), 0);
}

#[test]
fn deep_nesting_slices_tokens_level_by_level() {
    let capture = Capture::default();
    let show = Command::builder("show")
        .arg(Arg::new("id").converter(Scalar::Int))
        .build(capture.handler())
        .unwrap();

    let mut inner = Group::new("perms", "permissions");
    inner.add_command(show).unwrap();
    let mut middle = Group::new("admin", "admin tools");
    middle.add_group(inner).unwrap();
    let mut cli = Group::new("cli", "root");
    cli.add_group(middle).unwrap();

    cli.dispatch(&tokens(&["admin", "perms", "show", "7"]))
        .unwrap();
    assert_eq!(capture.calls(), vec![vec![Value::Int(7)]]);
}
