use std::fmt::Write as _;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin, Stdout};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use shelf_catalog::{Catalog, Product, fetch_catalog};
use shelf_commands::render::render_view;
use shelf_commands::utility::reload::write_unavailable;
use shelf_commands::{Flow, Session, handle_line, startup_flow};
use shelf_core::{Context, Settings};
use shelf_utils::pagination::{Applied, PageCompletion};

/// What woke the loop up.
enum Event {
    Line(String),
    Completion(PageCompletion<Product>),
    Eof,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the table, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Load the .env file
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;
    let ctx = Context::new(settings)?;
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let Some(catalog) = load_catalog(&ctx, &mut lines, &mut stdout).await? else {
        info!("gave up before the catalog loaded");
        return Ok(());
    };
    let mut session = Session::mount(ctx, catalog)?;

    let mut out = String::new();
    render_view(&session.table.view(), &mut out)?;
    stdout.write_all(out.as_bytes()).await?;
    stdout.flush().await?;

    loop {
        let event = tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => Event::Line(line),
                None => Event::Eof,
            },
            Some(completion) = session.table.next_completion() => Event::Completion(completion),
        };

        out.clear();
        match event {
            Event::Line(line) => match handle_line(&mut session, &line, &mut out).await {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => {
                    info!("quit requested");
                    break;
                }
                Err(source) => {
                    error!(?source, line = %line, "command failed");
                    continue;
                }
            },
            Event::Completion(completion) => {
                if session.table.apply(completion) == Applied::Current {
                    render_view(&session.table.view(), &mut out)?;
                }
            }
            Event::Eof => {
                // Input is closed; show whatever the last request resolves to.
                session.table.settle().await;
                render_view(&session.table.view(), &mut out)?;
                stdout.write_all(out.as_bytes()).await?;
                stdout.flush().await?;
                break;
            }
        }

        if !out.is_empty() {
            stdout.write_all(out.as_bytes()).await?;
            stdout.flush().await?;
        }
    }

    info!("table unmounted, shutting down");
    Ok(()) // Return Success, shutdown cleanly
}

/// Download the catalog, asking whether to try again after each failure.
///
/// Returns `None` when the user quits or input closes first.
async fn load_catalog(
    ctx: &Context,
    lines: &mut Lines<BufReader<Stdin>>,
    stdout: &mut Stdout,
) -> anyhow::Result<Option<Catalog>> {
    loop {
        stdout.write_all(b"Loading...\n").await?;
        stdout.flush().await?;

        info!(url = %ctx.settings.catalog_url, "fetching catalog");
        let error = match fetch_catalog(ctx).await {
            Ok(catalog) => return Ok(Some(catalog)),
            Err(error) => error,
        };
        error!(%error, "catalog download failed");

        let mut out = String::new();
        write_unavailable(&error, &mut out)?;
        writeln!(out, "Press Enter to try again, or type `quit`.")?;
        stdout.write_all(out.as_bytes()).await?;
        stdout.flush().await?;

        match lines.next_line().await? {
            Some(line) if startup_flow(&line) == Flow::Continue => continue,
            _ => return Ok(None),
        }
    }
}
