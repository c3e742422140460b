use crate::render::render_view;
use crate::{CommandMeta, Session};

pub const META: CommandMeta = CommandMeta {
    name: "show",
    desc: "Render the current page again.",
    category: "utility",
    usage: "show",
};

pub fn run(session: &mut Session, out: &mut String) -> anyhow::Result<()> {
    render_view(&session.table.view(), out)?;
    Ok(())
}
