//! Help-text rendering.
//!
//! Pure formatting over node metadata: a rendered document carries the node
//! name, its description, a usage line, a parameter table, and for groups a
//! table of non-hidden children. Layout lives entirely in this module.

use std::fmt::Write as _;

use anstyle::{AnsiColor, Style};

use crate::command::Command;
use crate::group::Group;
use crate::param::{Param, Params};

const NAME: Style = AnsiColor::Green.on_default();
const DOC: Style = AnsiColor::Yellow.on_default();
const USAGE: Style = AnsiColor::Blue.on_default();
const HEADING: Style = AnsiColor::Red.on_default();

fn styled(style: Style, text: &str) -> String {
    format!("{}{}{}", style.render(), text, style.render_reset())
}

fn title(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}

/// Render the help document for a leaf command.
pub fn command(cmd: &Command) -> String {
    let mut out = header(cmd.name(), cmd.about());
    out.push_str(&styled(USAGE, &usage_line(cmd.name(), cmd.params(), &[])));
    out.push_str(&param_table(cmd.params()));
    out
}

/// Render the help document for a group, including its child table.
pub fn group(grp: &Group) -> String {
    let mut out = header(grp.name(), grp.about());
    let child_names: Vec<&str> = grp
        .children()
        .filter(|child| !child.hidden())
        .map(|child| child.name())
        .collect();
    out.push_str(&styled(
        USAGE,
        &usage_line(grp.name(), grp.params(), &child_names),
    ));
    out.push_str(&param_table(grp.params()));

    let visible: Vec<_> = grp.children().filter(|child| !child.hidden()).collect();
    if !visible.is_empty() {
        out.push_str(&format!("\n\n{}\n", styled(HEADING, "Commands:")));
        let _ = writeln!(out, "| {:<24} | {:<52} |", "Name", "Description");
        let _ = writeln!(out, "| {} | {} |", "-".repeat(24), "-".repeat(52));
        for child in visible {
            let _ = writeln!(
                out,
                "| {:<24} | {:<52} |",
                child.name(),
                first_line(child.about())
            );
        }
    }
    out
}

/// Group help augmented with an unknown-command notice.
pub fn unknown(grp: &Group, name: &str) -> String {
    let notice = styled(HEADING, &format!("Error: command '{name}' was not found"));
    format!("{notice}\n{}", group(grp))
}

fn header(name: &str, about: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", styled(NAME, &title(name)));
    if !about.is_empty() {
        let _ = writeln!(out, "\n{}", styled(DOC, &format!("\t{about}")));
    }
    out.push('\n');
    out
}

fn usage_line(name: &str, params: &Params, child_names: &[&str]) -> String {
    let mut line = format!("USAGE: {name}");
    for param in params.iter() {
        match param {
            Param::Arg(_) => {
                line.push(' ');
                line.push_str(param.name());
            }
            Param::Opt(_) => {
                let _ = write!(
                    line,
                    " {}|{} [value]",
                    param.name(),
                    param.short_name().unwrap_or_default()
                );
            }
            Param::Flag(_) => {
                let _ = write!(
                    line,
                    " {}|{}",
                    param.name(),
                    param.short_name().unwrap_or_default()
                );
            }
        }
    }
    if !child_names.is_empty() {
        line.push(' ');
        line.push_str(&child_names.join("|"));
    }
    line
}

fn param_table(params: &Params) -> String {
    if params.is_empty() {
        return String::new();
    }
    let mut out = format!("\n\n{}\n", styled(HEADING, "Parameters:"));
    let _ = writeln!(
        out,
        "| {:<18} | {:<8} | {:<16} | {:<54} |",
        "Name", "Short", "Type", "Help"
    );
    let _ = writeln!(
        out,
        "| {} | {} | {} | {} |",
        "-".repeat(18),
        "-".repeat(8),
        "-".repeat(16),
        "-".repeat(54)
    );
    for param in params.iter() {
        let annotated = match param {
            Param::Arg(_) => param.help().to_string(),
            Param::Opt(opt) => match &opt.default {
                Some(default) => format!("[default: {default}] {}", param.help()),
                None => param.help().to_string(),
            },
            Param::Flag(_) => format!("[flag] {}", param.help()),
        };
        let _ = writeln!(
            out,
            "| {:<18} | {:<8} | {:<16} | {:<54} |",
            param.name(),
            param.short_name().unwrap_or_default(),
            param.type_name(),
            annotated
        );
    }
    out
}
