use std::sync::Arc;

/// Product rows as served by the remote catalog.
pub mod product;
/// HTTP download of the full product list.
pub mod remote;
/// Page sources over a loaded catalog.
pub mod source;

pub use product::Product;
pub use remote::fetch_catalog;
pub use source::SimulatedSource;

/// Shared handle to a loaded product list.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Arc<Vec<Product>>,
}

impl Catalog {
    /// Create a catalog handle from an already loaded list.
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(products),
        }
    }

    /// Expose the rows for page sources.
    pub fn products(&self) -> &Arc<Vec<Product>> {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
