//! In-memory ordered collection of tracked products.
//!
//! The store is the UI's source of truth and has exactly two mutation paths:
//! [`ProductStore::replace`] (full overwrite from an authoritative list
//! response) and [`ProductStore::append`] (a single record from a create
//! response). There is no partial field update, so client-held price data can
//! never diverge from what the backend last reported.

use std::collections::HashSet;

use pricewatch_core::{Product, ProductId};

#[derive(Debug, Default)]
pub struct ProductStore {
    products: Vec<Product>,
}

impl ProductStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The tracked products in backend order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn contains_id(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Exact string match against stored URLs, the best-effort duplicate
    /// check the add workflow runs before issuing a create request.
    #[must_use]
    pub fn contains_url(&self, url: &str) -> bool {
        self.products.iter().any(|p| p.url == url)
    }

    /// Replaces the whole store with a list response.
    ///
    /// The response is authoritative and total: products absent from it are
    /// dropped. A duplicate id within the response should not occur with a
    /// correct backend; when it does, the later occurrence is dropped and the
    /// event is logged, never surfaced.
    pub fn replace(&mut self, products: Vec<Product>) {
        let mut seen = HashSet::with_capacity(products.len());
        let mut deduped = Vec::with_capacity(products.len());
        for product in products {
            if seen.insert(product.id) {
                deduped.push(product);
            } else {
                tracing::warn!(
                    product_id = product.id,
                    url = %product.url,
                    "duplicate product id in list response; dropping later occurrence"
                );
            }
        }
        self.products = deduped;
    }

    /// Appends a newly created product from a create response.
    ///
    /// An id collision here means the backend handed out an id the store
    /// already holds; the record is dropped and the event logged.
    pub fn append(&mut self, product: Product) {
        if self.contains_id(product.id) {
            tracing::warn!(
                product_id = product.id,
                url = %product.url,
                "create response id already tracked; dropping record"
            );
            return;
        }
        self.products.push(product);
    }
}
