use std::fmt::Write;

use shelf_utils::pagination::{PAGE_SIZE_OPTIONS, parse_page_size_option};

use crate::render::render_view;
use crate::{CommandMeta, Session};

pub const META: CommandMeta = CommandMeta {
    name: "size",
    desc: "Change how many rows are shown per page.",
    category: "navigation",
    usage: "size <10|20|30|40|50>",
};

/// Change the page size. The page index is kept, even if it now points past the end.
pub fn run(session: &mut Session, arg1: Option<&str>, out: &mut String) -> anyhow::Result<()> {
    let Some(raw) = arg1 else {
        writeln!(
            out,
            "Showing {} rows per page. Options: {}",
            session.table.state().page_size,
            size_options()
        )?;
        return Ok(());
    };

    let Some(page_size) = parse_page_size_option(raw) else {
        writeln!(out, "Page size must be one of {}.", size_options())?;
        return Ok(());
    };

    if let Err(error) = session.table.set_page_size(page_size) {
        writeln!(out, "{error}")?;
        return Ok(());
    }

    render_view(&session.table.view(), out)?;
    Ok(())
}

fn size_options() -> String {
    PAGE_SIZE_OPTIONS
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::settled_session;

    #[tokio::test(start_paused = true)]
    async fn test_size_without_argument_lists_options() {
        let mut session = settled_session(25).await;
        let mut out = String::new();

        run(&mut session, None, &mut out).unwrap();

        assert_eq!(
            out,
            "Showing 10 rows per page. Options: 10, 20, 30, 40, 50\n"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_size_rejects_values_outside_options() {
        let mut session = settled_session(25).await;
        let mut out = String::new();

        run(&mut session, Some("25"), &mut out).unwrap();

        assert_eq!(out, "Page size must be one of 10, 20, 30, 40, 50.\n");
        assert_eq!(session.table.state().page_size, 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_size_keeps_page_index() {
        let mut session = settled_session(25).await;
        let mut out = String::new();
        session.table.set_page_index(2);
        session.table.settle().await;

        run(&mut session, Some("50"), &mut out).unwrap();
        session.table.settle().await;

        let view = session.table.view();
        assert_eq!(view.state.page_index, 2);
        assert_eq!(view.state.page_size, 50);
        assert!(view.rows().is_empty());
    }
}
