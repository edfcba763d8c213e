//! # Product Types
//!
//! Product catalog types and the product lookup capability.
//! Products are loaded from `config/products.toml`.

use crate::error::{CartError, CartResult};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Unique product identifier
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        ProductId(id)
    }
}

/// A product in the catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Short description
    #[serde(default)]
    pub description: String,

    /// Unit price, exact decimal
    pub price: Decimal,

    /// Catalog category (e.g., "Soccer", "Chess")
    #[serde(default)]
    pub category: String,
}

impl Product {
    /// Create a new product
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            category: String::new(),
        }
    }

    /// Builder: set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Builder: set category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Identity comparison used for line merging
    pub fn same_identity(&self, other: &Product) -> bool {
        self.id == other.id
    }
}

/// Format a decimal amount for display (e.g., "$29.99"), rounding half
/// cents away from zero
pub fn format_money(amount: Decimal) -> String {
    format!(
        "${:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// Product lookup capability.
///
/// Controllers resolve a product id into a `Product` through this trait
/// before handing it to the cart. Implementations must be cheap to call
/// per request.
pub trait ProductRepository: Send + Sync {
    /// The current catalog, in catalog order
    fn products(&self) -> Vec<Product>;

    /// Find a product by ID
    fn find(&self, id: ProductId) -> Option<Product> {
        self.products().into_iter().find(|p| p.id == id)
    }

    /// All products in a category
    fn by_category(&self, category: &str) -> Vec<Product> {
        self.products()
            .into_iter()
            .filter(|p| p.category == category)
            .collect()
    }

    /// Distinct categories, sorted
    fn categories(&self) -> Vec<String> {
        self.products()
            .into_iter()
            .map(|p| p.category)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Type alias for a shared product repository (dynamic dispatch)
pub type BoxedProductRepository = Arc<dyn ProductRepository>;

/// In-memory product catalog (loaded from config)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductCatalog {
    #[serde(default)]
    pub products: Vec<Product>,
}

impl ProductCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// Add a product to the catalog
    pub fn add(&mut self, product: Product) {
        self.products.push(product);
    }

    /// Add a product with builder pattern
    pub fn with_product(mut self, product: Product) -> Self {
        self.add(product);
        self
    }

    /// Find a product by ID without cloning
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Number of products
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Load catalog from TOML string
    pub fn from_toml(toml_str: &str) -> CartResult<Self> {
        let catalog: ProductCatalog =
            toml::from_str(toml_str).map_err(|e| CartError::Catalog(e.to_string()))?;

        let mut seen = BTreeSet::new();
        for product in &catalog.products {
            if !seen.insert(product.id) {
                return Err(CartError::Catalog(format!(
                    "duplicate product id {}",
                    product.id
                )));
            }
        }

        Ok(catalog)
    }
}

impl ProductRepository for ProductCatalog {
    fn products(&self) -> Vec<Product> {
        self.products.clone()
    }

    fn find(&self, id: ProductId) -> Option<Product> {
        self.get(id).cloned()
    }
}
