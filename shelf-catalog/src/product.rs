use serde::Deserialize;

/// One catalog row. Unknown payload fields are ignored.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rating: f64,
}

/// Envelope returned by the catalog endpoint.
#[derive(Debug, Deserialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}
