//! Provider lookup-table catalog.
//!
//! The provider publishes two reference lists — insurance products and risk
//! types — that the tools fetch once and serve locally. Storage sits behind
//! the [`CatalogStore`] trait so deployments can plug a durable backend;
//! the shipped backend is [`MemoryCatalog`].

mod store;
mod sync;

pub use store::{CatalogStore, MemoryCatalog};
pub use sync::{sync_products, sync_risk_types};

use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use uuid::Uuid;

/// One insurance product from the provider's catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub product_id: i32,
    pub name: String,
    pub product_code: String,
    pub description: String,
    pub created_at: SystemTime,
}

/// One risk type from the provider's catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskType {
    pub id: Uuid,
    pub risk_type_id: i32,
    pub name: String,
    #[serde(rename = "riskCategory")]
    pub risk_category: String,
    #[serde(rename = "riskTypeCode")]
    pub risk_type_code: String,
    pub description: String,
    #[serde(rename = "createdAt")]
    pub created_at: SystemTime,
}
