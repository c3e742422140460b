//! One mounted product table and the context it was mounted with.

use std::sync::Arc;
use std::time::Duration;

use shelf_catalog::{Catalog, Product, SimulatedSource};
use shelf_core::{Context, Result, Settings};
use shelf_utils::pagination::{PaginationState, Paginator, PaginatorOptions};
use tracing::info;

/// Paginator over the loaded catalog.
pub type ProductTable = Paginator<SimulatedSource<Product>>;

/// State owned by the command loop.
pub struct Session {
    pub ctx: Context,
    pub table: ProductTable,
    catalog: Catalog,
}

impl Session {
    /// Mount a table over `catalog`. Must be called inside a Tokio runtime.
    pub fn mount(ctx: Context, catalog: Catalog) -> Result<Self> {
        let table = mount_table(&ctx.settings, &catalog)?;
        Ok(Self {
            ctx,
            table,
            catalog,
        })
    }

    /// Replace the catalog and mount a fresh table; the old one and its cache are dropped.
    pub fn remount(&mut self, catalog: Catalog) -> Result<()> {
        self.table = mount_table(&self.ctx.settings, &catalog)?;
        self.catalog = catalog;
        Ok(())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

fn mount_table(settings: &Settings, catalog: &Catalog) -> Result<ProductTable> {
    let source = SimulatedSource::with_latency(
        Arc::clone(catalog.products()),
        Duration::from_millis(settings.latency_ms),
    )
    .with_failures(settings.simulated_failures);
    let options = PaginatorOptions {
        keep_previous_while_pending: settings.keep_previous_while_pending,
        clamp_page_index: settings.clamp_page_index,
    };
    let initial = PaginationState {
        page_index: 0,
        page_size: settings.page_size,
    };

    info!(
        products = catalog.len(),
        page_size = settings.page_size,
        simulated_failures = settings.simulated_failures,
        "mounting product table"
    );
    Paginator::mount_with_state(Arc::new(source), options, initial)
}
