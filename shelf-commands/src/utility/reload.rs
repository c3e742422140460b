use std::fmt::Write;

use shelf_catalog::fetch_catalog;
use shelf_core::Error;
use tracing::warn;

use crate::render::render_view;
use crate::{CommandMeta, Session};

pub const META: CommandMeta = CommandMeta {
    name: "reload",
    desc: "Download the catalog again and remount the table.",
    category: "utility",
    usage: "reload",
};

/// Re-fetch the catalog. On failure the mounted table is left untouched.
pub async fn run(session: &mut Session, out: &mut String) -> anyhow::Result<()> {
    match fetch_catalog(&session.ctx).await {
        Ok(catalog) => {
            session.remount(catalog)?;
            render_view(&session.table.view(), out)?;
        }
        Err(error) => {
            warn!(%error, "catalog reload failed");
            write_unavailable(&error, out)?;
        }
    }
    Ok(())
}

/// Reply for a catalog download that failed.
pub fn write_unavailable(error: &Error, out: &mut String) -> std::fmt::Result {
    writeln!(out, "Catalog unavailable: {error}")
}
