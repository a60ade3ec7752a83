//! # Catalog Lookup for Cart Building
//!
//! Tier-aware part lookup used while a sale is being assembled.
//!
//! ## Lookup Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                search_part_for_sale("BOS-001", "wholesale")     │
//! │                                                                 │
//! │  validate part number                                           │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  parts.get_by_part_number  (active parts only)                  │
//! │       │                                                         │
//! │       ├── None ──► Ok(None)   (unknown part is not an error)    │
//! │       ▼                                                         │
//! │  CustomerTier::parse_tag("wholesale")                           │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  tier_price(base, tier)       (unknown tag → base price)        │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  PartForSale { base price, final price, stock, ... }            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`search_parts`] is the browse counterpart: substring search over
//! the catalog, each hit priced for the same tier.
//!
//! The final price returned here is what the cart carries into
//! [`crate::sale::SaleService::create_sale`] as the line's unit price.

use serde::{Deserialize, Serialize};
use tracing::debug;

use sln_core::{
    pricing::tier_price,
    validation::{validate_part_number, validate_search_query},
    CustomerTier, Part,
};
use sln_db::Database;

use crate::error::SalesResult;

/// A part as presented at the sale counter: catalog details plus the
/// price this specific customer tier pays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartForSale {
    /// Catalog storage key, carried into the cart's line items.
    pub part_id: String,
    pub part_number: String,
    pub part_name: String,
    pub brand: String,
    pub vehicle_compatibility: String,
    pub category: String,
    /// Stock on hand at lookup time. Advisory only; the authoritative
    /// check happens inside the sale transaction.
    pub quantity_in_stock: i64,
    /// List price in cents, before any tier discount.
    pub base_price_cents: i64,
    /// Price this customer pays, in cents.
    pub final_price_cents: i64,
    /// Tier the price was computed for, if the tag was recognized.
    pub tier: Option<CustomerTier>,
}

impl PartForSale {
    fn from_part(part: Part, tier: Option<CustomerTier>) -> Self {
        let base = part.unit_price();
        let final_price = tier_price(base, tier);

        PartForSale {
            part_id: part.id,
            part_number: part.part_number,
            part_name: part.part_name,
            brand: part.brand,
            vehicle_compatibility: part.vehicle_compatibility,
            category: part.category,
            quantity_in_stock: part.quantity_in_stock,
            base_price_cents: base.cents(),
            final_price_cents: final_price.cents(),
            tier,
        }
    }
}

/// Looks up an active part by exact part number and prices it for the
/// given customer tier tag.
///
/// Returns `Ok(None)` when no active part carries that number. An
/// unrecognized tier tag is treated as no discount, not an error.
pub async fn search_part_for_sale(
    db: &Database,
    part_number: &str,
    tier_tag: Option<&str>,
) -> SalesResult<Option<PartForSale>> {
    validate_part_number(part_number).map_err(sln_core::CoreError::from)?;

    let tier = tier_tag.and_then(CustomerTier::parse_tag);

    let Some(part) = db.parts().get_by_part_number(part_number).await? else {
        debug!(part_number, "Part lookup miss");
        return Ok(None);
    };

    debug!(
        part_number,
        ?tier,
        stock = part.quantity_in_stock,
        "Part lookup hit"
    );

    Ok(Some(PartForSale::from_part(part, tier)))
}

/// Searches the active catalog by substring and prices every hit for
/// the given customer tier tag.
///
/// An empty query lists the catalog (up to `limit`); an overlong one
/// is rejected before the database is touched.
pub async fn search_parts(
    db: &Database,
    query: &str,
    tier_tag: Option<&str>,
    limit: u32,
) -> SalesResult<Vec<PartForSale>> {
    let query = validate_search_query(query).map_err(sln_core::CoreError::from)?;

    let tier = tier_tag.and_then(CustomerTier::parse_tag);
    let parts = db.parts().search(&query, limit).await?;

    debug!(query = %query, hits = parts.len(), "Catalog search");

    Ok(parts
        .into_iter()
        .map(|part| PartForSale::from_part(part, tier))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_part(price_cents: i64) -> Part {
        let now = Utc::now();
        Part {
            id: "part-1".to_string(),
            part_number: "BOS-001".to_string(),
            part_name: "Oil Filter".to_string(),
            brand: "Bosch".to_string(),
            vehicle_compatibility: "Toyota Corolla 2015-2022".to_string(),
            category: "Filters".to_string(),
            quantity_in_stock: 25,
            minimum_stock_level: 10,
            unit_price_cents: price_cents,
            supplier: None,
            location_in_shop: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_wholesale_final_price() {
        let for_sale = PartForSale::from_part(sample_part(1250), Some(CustomerTier::Wholesale));
        assert_eq!(for_sale.base_price_cents, 1250);
        assert_eq!(for_sale.final_price_cents, 1062);
    }

    #[test]
    fn test_regular_tier_pays_list_price() {
        let for_sale = PartForSale::from_part(sample_part(1250), Some(CustomerTier::Regular));
        assert_eq!(for_sale.final_price_cents, 1250);
    }

    #[test]
    fn test_no_tier_pays_list_price() {
        let for_sale = PartForSale::from_part(sample_part(875), None);
        assert_eq!(for_sale.final_price_cents, 875);
    }

    #[test]
    fn test_vip_final_price() {
        let for_sale = PartForSale::from_part(sample_part(875), Some(CustomerTier::Vip));
        assert_eq!(for_sale.final_price_cents, 787);
    }

    use sln_db::repository::part::generate_part_id;
    use sln_db::DbConfig;

    async fn seeded_db() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.expect("db");
        let now = Utc::now();
        for (number, name, price) in [
            ("BOS-001", "Oil Filter", 1250),
            ("NGK-002", "Spark Plug", 875),
        ] {
            let part = Part {
                id: generate_part_id(),
                part_number: number.to_string(),
                part_name: name.to_string(),
                brand: "Bosch".to_string(),
                vehicle_compatibility: "Universal".to_string(),
                category: "Filters".to_string(),
                quantity_in_stock: 25,
                minimum_stock_level: 10,
                unit_price_cents: price,
                supplier: None,
                location_in_shop: None,
                is_active: true,
                created_at: now,
                updated_at: now,
            };
            db.parts().insert(&part).await.expect("insert part");
        }
        db
    }

    #[tokio::test]
    async fn test_search_parts_prices_every_hit() {
        let db = seeded_db().await;

        let hits = search_parts(&db, "filter", Some("wholesale"), 10)
            .await
            .expect("search");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].part_number, "BOS-001");
        assert_eq!(hits[0].base_price_cents, 1250);
        assert_eq!(hits[0].final_price_cents, 1062);

        // Empty query lists the catalog at list price.
        let all = search_parts(&db, "  ", None, 10).await.expect("search");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].final_price_cents, all[0].base_price_cents);
    }

    #[tokio::test]
    async fn test_search_parts_rejects_overlong_query() {
        let db = seeded_db().await;

        let err = search_parts(&db, &"x".repeat(150), None, 10)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::SalesError::Core(sln_core::CoreError::Validation(
                sln_core::ValidationError::TooLong { .. }
            ))
        ));
    }
}
