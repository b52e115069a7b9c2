//! Catalog storage backends.

use super::{Product, RiskType};
use crate::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Storage seam for the provider catalog.
///
/// `replace_*` swaps the whole stored set in one step — a sync is always a
/// full refresh, never an incremental merge.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn replace_products(&self, products: Vec<Product>) -> Result<()>;
    async fn products(&self) -> Result<Vec<Product>>;
    async fn replace_risk_types(&self, risk_types: Vec<RiskType>) -> Result<()>;
    async fn risk_types(&self) -> Result<Vec<RiskType>>;
}

/// In-memory catalog backend.
pub struct MemoryCatalog {
    products: RwLock<Vec<Product>>,
    risk_types: RwLock<Vec<RiskType>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self {
            products: RwLock::new(Vec::new()),
            risk_types: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn replace_products(&self, products: Vec<Product>) -> Result<()> {
        *self.products.write().await = products;
        Ok(())
    }

    async fn products(&self) -> Result<Vec<Product>> {
        Ok(self.products.read().await.clone())
    }

    async fn replace_risk_types(&self, risk_types: Vec<RiskType>) -> Result<()> {
        *self.risk_types.write().await = risk_types;
        Ok(())
    }

    async fn risk_types(&self) -> Result<Vec<RiskType>> {
        Ok(self.risk_types.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::SystemTime;
    use uuid::Uuid;

    fn product(product_id: i32, name: &str) -> Product {
        Product {
            id: Uuid::new_v4(),
            product_id,
            name: name.into(),
            product_code: format!("P{:03}", product_id),
            description: String::new(),
            created_at: SystemTime::now(),
        }
    }

    #[tokio::test]
    async fn test_replace_is_a_full_refresh() {
        let store = MemoryCatalog::new();
        store
            .replace_products(vec![product(1, "Third Party"), product(2, "Comprehensive")])
            .await
            .unwrap();
        assert_eq!(store.products().await.unwrap().len(), 2);

        store.replace_products(vec![product(3, "Fire & Theft")]).await.unwrap();
        let products = store.products().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Fire & Theft");
    }

    #[tokio::test]
    async fn test_empty_store_reads_empty() {
        let store = MemoryCatalog::new();
        assert!(store.products().await.unwrap().is_empty());
        assert!(store.risk_types().await.unwrap().is_empty());
    }

    #[test]
    fn test_usable_outside_a_runtime_handle() {
        let store = MemoryCatalog::new();
        let products = tokio_test::block_on(async {
            store.replace_products(vec![product(1, "Third Party")]).await.unwrap();
            store.products().await.unwrap()
        });
        assert_eq!(products.len(), 1);
    }
}
