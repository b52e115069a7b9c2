//! Catalog sync from the provider.
//!
//! Sync failures are whole-operation errors (unlike batch items): a
//! transport or envelope failure leaves the stored catalog untouched.

use super::{CatalogStore, Product, RiskType};
use crate::transport::NicTransport;
use crate::{Error, Result};
use serde::Deserialize;
use std::time::SystemTime;
use uuid::Uuid;

const PRODUCTS_PATH: &str = "/public-api/products";
const RISK_TYPES_PATH: &str = "/public-api/risk-types";

#[derive(Deserialize)]
struct ProductsEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: ProductsData,
}

#[derive(Deserialize, Default)]
struct ProductsData {
    #[serde(default)]
    products: Vec<ProductEntry>,
}

#[derive(Deserialize)]
struct ProductEntry {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default, rename = "productCode")]
    product_code: String,
    #[serde(default)]
    description: String,
}

/// Fetch the product list and replace the stored set.
///
/// Entries whose numeric id does not parse are skipped with a warning, the
/// provider being the only source of truth for what remains.
pub async fn sync_products(transport: &NicTransport, store: &dyn CatalogStore) -> Result<()> {
    let body = transport.get_json(PRODUCTS_PATH).await?;
    let envelope: ProductsEnvelope = serde_json::from_value(body)
        .map_err(|_| Error::remote("error getting products from NIC"))?;
    if !envelope.success {
        return Err(Error::remote("error getting products from NIC"));
    }

    let now = SystemTime::now();
    let mut products = Vec::with_capacity(envelope.data.products.len());
    for entry in envelope.data.products {
        let product_id = match entry.id.parse::<i32>() {
            Ok(id) => id,
            Err(_) => {
                tracing::warn!(id = %entry.id, name = %entry.name, "skipping product with non-numeric id");
                continue;
            }
        };
        products.push(Product {
            id: Uuid::new_v4(),
            product_id,
            name: entry.name,
            product_code: entry.product_code,
            description: entry.description,
            created_at: now,
        });
    }

    tracing::debug!(count = products.len(), "catalog products synced");
    store.replace_products(products).await
}

#[derive(Deserialize)]
struct RiskTypesEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: RiskTypesData,
}

#[derive(Deserialize, Default)]
struct RiskTypesData {
    #[serde(default, rename = "riskTypes")]
    risk_types: Vec<RiskTypeEntry>,
}

#[derive(Deserialize)]
struct RiskTypeEntry {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default, rename = "riskCategory")]
    risk_category: String,
    #[serde(default, rename = "riskTypeCode")]
    risk_type_code: String,
    #[serde(default)]
    description: String,
}

/// Fetch the risk-type list and replace the stored set.
pub async fn sync_risk_types(transport: &NicTransport, store: &dyn CatalogStore) -> Result<()> {
    let body = transport.get_json(RISK_TYPES_PATH).await?;
    let envelope: RiskTypesEnvelope = serde_json::from_value(body)
        .map_err(|_| Error::remote("error getting risk types from NIC"))?;
    if !envelope.success {
        return Err(Error::remote("error getting risk types from NIC"));
    }

    let now = SystemTime::now();
    let mut risk_types = Vec::with_capacity(envelope.data.risk_types.len());
    for entry in envelope.data.risk_types {
        let risk_type_id = match entry.id.parse::<i32>() {
            Ok(id) => id,
            Err(_) => {
                tracing::warn!(id = %entry.id, name = %entry.name, "skipping risk type with non-numeric id");
                continue;
            }
        };
        risk_types.push(RiskType {
            id: Uuid::new_v4(),
            risk_type_id,
            name: entry.name,
            risk_category: entry.risk_category,
            risk_type_code: entry.risk_type_code,
            description: entry.description,
            created_at: now,
        });
    }

    tracing::debug!(count = risk_types.len(), "catalog risk types synced");
    store.replace_risk_types(risk_types).await
}
