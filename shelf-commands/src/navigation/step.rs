use std::fmt::Write;

use shelf_utils::pagination::{NavAction, nav_control};

use crate::render::render_view;
use crate::{CommandMeta, Session};

pub const FIRST_META: CommandMeta = CommandMeta {
    name: "first",
    desc: "Go to the first page.",
    category: "navigation",
    usage: "first",
};

pub const PREVIOUS_META: CommandMeta = CommandMeta {
    name: "prev",
    desc: "Go to the previous page.",
    category: "navigation",
    usage: "prev",
};

pub const NEXT_META: CommandMeta = CommandMeta {
    name: "next",
    desc: "Go to the next page.",
    category: "navigation",
    usage: "next",
};

pub const LAST_META: CommandMeta = CommandMeta {
    name: "last",
    desc: "Go to the last page.",
    category: "navigation",
    usage: "last",
};

/// Apply one navigation control.
///
/// Disabled controls are refused with a short message instead of moving,
/// so `next` never runs past the known page count.
pub fn run(session: &mut Session, action: NavAction, out: &mut String) -> anyhow::Result<()> {
    let table = &mut session.table;

    if nav_control(&table.view(), action).disabled {
        let reason = match action {
            NavAction::First | NavAction::Previous => "Already on the first page.",
            NavAction::Next | NavAction::Last if table.page_count().known().is_none() => {
                "The page count is not known yet."
            }
            NavAction::Next | NavAction::Last => "Already on the last page.",
        };
        writeln!(out, "{reason}")?;
        return Ok(());
    }

    match action {
        NavAction::First => table.first_page(),
        NavAction::Previous => table.previous_page(),
        NavAction::Next => table.next_page(),
        NavAction::Last => table.last_page(),
    }

    render_view(&table.view(), out)?;
    Ok(())
}
