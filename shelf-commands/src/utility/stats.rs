use std::fmt::Write;

use crate::{CommandMeta, Session};

pub const META: CommandMeta = CommandMeta {
    name: "stats",
    desc: "Show page cache counters.",
    category: "utility",
    usage: "stats",
};

pub fn run(session: &mut Session, out: &mut String) -> anyhow::Result<()> {
    let cache = session.table.cache();
    let stats = cache.stats();

    writeln!(out, "Cached pages: {}", cache.len())?;
    writeln!(
        out,
        "Hits: {}  Misses: {}  Joins: {}  Inserts: {}  Failures: {}",
        stats.hits, stats.misses, stats.joins, stats.inserts, stats.failures
    )?;
    writeln!(out, "Catalog products: {}", session.catalog().len())?;
    Ok(())
}
