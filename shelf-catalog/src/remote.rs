//! Remote catalog download.

use shelf_core::{Context, Error, Result};
use tracing::{debug, info};

use crate::Catalog;
use crate::product::ProductsResponse;

/// Download the full product list once from `ctx.settings.catalog_url`.
///
/// Transport failures and non-success statuses map to `SourceUnavailable`;
/// an undecodable body maps to `InvalidResponse`.
pub async fn fetch_catalog(ctx: &Context) -> Result<Catalog> {
    let url = ctx.settings.catalog_url.as_str();
    debug!(url, "fetching catalog");

    let response = ctx
        .http
        .get(url)
        .send()
        .await
        .map_err(|source| Error::unavailable(format!("request to {url} failed: {source}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::unavailable(format!("{url} answered {status}")));
    }

    let body: ProductsResponse = response
        .json()
        .await
        .map_err(|source| Error::invalid_response(format!("catalog body: {source}")))?;

    info!(products = body.products.len(), "catalog loaded");
    Ok(Catalog::new(body.products))
}
