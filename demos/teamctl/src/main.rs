//! Nested-tree demo: groups, a group-level flag, and host attachment.
//!
//! ```text
//! teamctl users list
//! teamctl users show user2
//! teamctl admin perms grant dev --role admin
//! teamctl -v users list
//! ```

use std::sync::Arc;

use cmdtree::{
    Arg, Choices, Command, Discoverable, Flag, Group, HostCommand, Opt, Value,
};

/// Host object whose command-shaped members get attached to the tree.
struct UserDirectory {
    users: Vec<String>,
}

impl Discoverable for UserDirectory {
    fn commands(self: Arc<Self>) -> Vec<HostCommand> {
        let host = self.clone();
        let list = HostCommand::new("list", "list every known user", move |_| {
            for user in &host.users {
                println!("{user}");
            }
            Ok(())
        });

        let host = self.clone();
        let show = HostCommand::new("show", "show one user", move |values| {
            let name = values.first().and_then(Value::as_str).unwrap_or("");
            match host.users.iter().find(|user| user == &name) {
                Some(user) => println!("{user}"),
                None => println!("no user named {name:?}"),
            }
            Ok(())
        })
        .arg(Arg::new("name").help("user to show"));

        vec![list, show]
    }
}

fn grant() -> cmdtree::Result<Command> {
    Command::builder("grant")
        .about("grant a role to a user")
        .arg(Arg::new("user").help("user receiving the role"))
        .opt(
            Opt::new("--role", "-r")
                .converter(Choices::new(["admin", "user", "dev"]))
                .required()
                .help("role to grant"),
        )
        .build(|values| {
            let user = values.first().and_then(Value::as_str).unwrap_or("");
            let role = values.get(1).and_then(Value::as_str).unwrap_or("");
            println!("granted {role:?} to {user:?}");
            Ok(())
        })
}

fn build_tree() -> cmdtree::Result<Group> {
    let directory = Arc::new(UserDirectory {
        users: vec!["user1".to_string(), "user2".to_string()],
    });

    let mut users = Group::new("users", "user directory commands");
    users.attach(directory)?;

    let mut perms = Group::new("perms", "permission commands");
    perms.add_command(grant()?)?;

    let mut admin = Group::new("admin", "administrative tools");
    admin.add_group(perms)?;

    let mut cli = Group::builder("teamctl")
        .about("team management demo")
        .flag(Flag::new("--verbose", "-v").help("announce each routing step"))
        .handler(|values| {
            if values.first().and_then(Value::as_bool).unwrap_or(false) {
                eprintln!("verbose mode on");
            }
            Ok(())
        })
        .build()?;
    cli.add_group(users)?;
    cli.add_group(admin)?;
    Ok(cli)
}

fn main() {
    cmdtree::logging::init_subscriber();

    let cli = match build_tree() {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("invalid declaration: {err}");
            std::process::exit(1);
        }
    };
    std::process::exit(cli.run());
}
