// File: src/catalog.rs
//
// Voucher categories and the built-in voucher fixtures.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use ecopoints_common::Error;
use ecopoints_common::models::{Voucher, VoucherCategory};
use once_cell::sync::Lazy;
use tracing::info;

/// Icon shown for vouchers whose category is not in the table.
pub const FALLBACK_CATEGORY_ICON: &str = "🎁";

static CATEGORIES: Lazy<BTreeMap<&'static str, VoucherCategory>> = Lazy::new(|| {
    [
        ("food", "Food & Dining", "🍕"),
        ("shopping", "Shopping", "🛍️"),
        ("entertainment", "Entertainment", "🎬"),
        ("transport", "Transport", "🚗"),
        ("health", "Health & Wellness", "💊"),
        ("eco", "Eco-Friendly", "🌱"),
    ]
    .into_iter()
    .map(|(key, title, icon)| (key, VoucherCategory { key, title, icon }))
    .collect()
});

pub fn categories() -> impl Iterator<Item = &'static VoucherCategory> {
    CATEGORIES.values()
}

pub fn category(key: &str) -> Option<&'static VoucherCategory> {
    CATEGORIES.get(key)
}

pub fn category_icon(key: &str) -> &'static str {
    category(key).map(|c| c.icon).unwrap_or(FALLBACK_CATEGORY_ICON)
}

#[allow(clippy::too_many_arguments)]
fn voucher(
    id: &str,
    title: &str,
    brand: &str,
    description: &str,
    points_required: u64,
    category: &str,
    color: &str,
    validity_days: u32,
    current_stock: u32,
    value: &str,
) -> Voucher {
    Voucher {
        id: id.to_string(),
        title: title.to_string(),
        brand: brand.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        value: value.to_string(),
        color: color.to_string(),
        points_required,
        validity_days,
        current_stock: Some(current_stock),
        is_active: true,
    }
}

/// The six vouchers the marketplace ships with.
pub fn default_vouchers() -> Vec<Voucher> {
    vec![
        voucher(
            "v1", "20% Off All Items", "Amazon",
            "Get 20% discount on your next purchase. Valid on electronics, books, and home items.",
            500, "shopping", "#FF9900", 30, 50, "₹200 OFF",
        ),
        voucher(
            "v2", "Free Coffee & Pastry", "Starbucks",
            "Enjoy a complimentary coffee of your choice with a fresh pastry.",
            300, "food", "#00704A", 15, 25, "FREE ITEM",
        ),
        voucher(
            "v3", "Movie Ticket BOGO", "PVR Cinemas",
            "Buy one movie ticket and get one free. Valid for all shows except premieres.",
            800, "entertainment", "#E50914", 45, 15, "BOGO",
        ),
        voucher(
            "v4", "₹100 Off Ride", "Uber",
            "Get ₹100 off your next Uber ride. Valid for rides above ₹200.",
            200, "transport", "#000000", 7, 100, "₹100 OFF",
        ),
        voucher(
            "v5", "Eco-Friendly Kit", "GreenLife",
            "Complete eco-friendly starter kit with bamboo products and reusable bags.",
            1000, "eco", "#22C55E", 60, 8, "FREE KIT",
        ),
        voucher(
            "v6", "30% Off Health Products", "HealthKart",
            "Get 30% discount on all health supplements and wellness products.",
            600, "health", "#059669", 30, 30, "30% OFF",
        ),
    ]
}

/// Load a catalog from a JSON array of vouchers. Ids must be unique.
pub async fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<Voucher>, Error> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path).await?;
    let vouchers = parse_catalog(&raw)?;
    info!("Loaded {} vouchers from {}", vouchers.len(), path.display());
    Ok(vouchers)
}

pub fn parse_catalog(raw: &str) -> Result<Vec<Voucher>, Error> {
    let vouchers: Vec<Voucher> = serde_json::from_str(raw)?;
    let mut seen = HashSet::new();
    for v in &vouchers {
        if !seen.insert(v.id.as_str()) {
            return Err(Error::Config(format!("duplicate voucher id '{}' in catalog", v.id)));
        }
        if i64::try_from(v.points_required).is_err() {
            return Err(Error::Config(format!(
                "voucher '{}' costs {} points, above the supported maximum",
                v.id, v.points_required
            )));
        }
    }
    Ok(vouchers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_fixture_has_a_known_category() {
        for v in default_vouchers() {
            assert!(category(&v.category).is_some(), "{} has unknown category", v.id);
        }
        assert_eq!(categories().count(), 6);
    }

    #[test]
    fn unknown_category_gets_fallback_icon() {
        assert_eq!(category_icon("eco"), "🌱");
        assert_eq!(category_icon("pets"), FALLBACK_CATEGORY_ICON);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let raw = r#"[
            {"id":"a","title":"A","brand":"Acme","category":"eco","points_required":10,"validity_days":1,"is_active":true},
            {"id":"a","title":"B","brand":"Acme","category":"eco","points_required":20,"validity_days":1,"is_active":true}
        ]"#;
        assert!(matches!(parse_catalog(raw), Err(Error::Config(_))));
    }

    #[test]
    fn costs_beyond_i64_are_rejected() {
        let raw = r#"[{"id":"gold","title":"Gold","brand":"Acme","category":"eco","points_required":9223372036854775808,"validity_days":1,"is_active":true}]"#;
        assert!(matches!(parse_catalog(raw), Err(Error::Config(_))));

        let raw = r#"[{"id":"gold","title":"Gold","brand":"Acme","category":"eco","points_required":9223372036854775807,"validity_days":1,"is_active":true}]"#;
        assert_eq!(parse_catalog(raw).unwrap()[0].points_required, i64::MAX as u64);
    }

    #[test]
    fn stock_is_optional_in_catalog_files() {
        let raw = r#"[{"id":"a","title":"A","brand":"Acme","category":"eco","points_required":10,"validity_days":1,"is_active":true}]"#;
        let vouchers = parse_catalog(raw).unwrap();
        assert_eq!(vouchers[0].current_stock, None);
        assert_eq!(vouchers[0].description, "");
    }
}
