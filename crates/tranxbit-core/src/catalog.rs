//! Gift-card catalog and the buy-card selection widget.
//!
//! The catalog is fixed: seventeen brands, three USD denominations. A
//! [`PurchaseSelection`] tracks the brand, amount and quantity the user has
//! picked and prices the order.

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// A gift-card brand offered for purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Brand {
    pub slug: &'static str,
    pub label: &'static str,
    pub logo: &'static str,
}

const fn brand(slug: &'static str, label: &'static str, logo: &'static str) -> Brand {
    Brand { slug, label, logo }
}

/// Every brand, in display order.
pub const BRANDS: [Brand; 17] = [
    brand("amazon", "Amazon", "/brands/logo-amazon.svg"),
    brand("apple", "Apple", "/brands/apple-11.svg"),
    brand("apex-legends", "Apex Legends", "/brands/apex-legends-1.svg"),
    brand("att", "AT&T", "/brands/at-t-4.svg"),
    brand("best-buy", "Best Buy", "/brands/best-buy.svg"),
    brand("booking", "Booking.com", "/brands/bookingcom-1.svg"),
    brand("calvin-klein", "Calvin Klein", "/brands/calvin-klein-1.svg"),
    brand("ea-sports", "EA Sports", "/brands/ea-sports-2.svg"),
    brand("ebay", "eBay", "/brands/ebay.svg"),
    brand("google-play", "Google Play", "/brands/google-play-4.svg"),
    brand("itunes", "iTunes", "/brands/itunes-1.svg"),
    brand("playstation", "PlayStation", "/brands/playstation-6.svg"),
    brand("spotify", "Spotify", "/brands/spotify-logo.svg"),
    brand("steam", "Steam", "/brands/steam-1.svg"),
    brand("target", "Target", "/brands/target.svg"),
    brand("uber-eats", "Uber Eats", "/brands/uber-eats.svg"),
    brand("xbox", "Xbox", "/brands/xbox-3.svg"),
];

/// Card face values in whole US dollars.
pub const DENOMINATIONS: [u32; 3] = [25, 30, 50];

/// Look up a brand by slug.
#[must_use]
pub fn find_brand(slug: &str) -> Option<&'static Brand> {
    BRANDS.iter().find(|b| b.slug == slug)
}

/// Brands whose label or slug contains `query`, ignoring case. An empty or
/// blank query matches everything.
#[must_use]
pub fn search_brands(query: &str) -> Vec<&'static Brand> {
    let needle = query.trim().to_lowercase();
    BRANDS
        .iter()
        .filter(|b| {
            needle.is_empty()
                || b.label.to_lowercase().contains(&needle)
                || b.slug.contains(&needle)
        })
        .collect()
}

/// The user's current pick in the buy-card widget.
///
/// Deserializing goes through [`PurchaseSelection::from_parts`], so a stored
/// or posted selection can never name an unknown brand or amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SelectionParts")]
pub struct PurchaseSelection {
    brand: Option<String>,
    amount: Option<u32>,
    quantity: u32,
}

#[derive(Deserialize)]
struct SelectionParts {
    brand: Option<String>,
    amount: Option<u32>,
    #[serde(default)]
    quantity: u32,
}

impl TryFrom<SelectionParts> for PurchaseSelection {
    type Error = CatalogError;

    fn try_from(parts: SelectionParts) -> Result<Self, Self::Error> {
        Self::from_parts(parts.brand.as_deref(), parts.amount, parts.quantity)
    }
}

impl Default for PurchaseSelection {
    fn default() -> Self {
        Self {
            brand: None,
            amount: None,
            quantity: 1,
        }
    }
}

impl PurchaseSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from raw values, validating each one.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] for an unknown brand or amount.
    pub fn from_parts(
        brand: Option<&str>,
        amount: Option<u32>,
        quantity: u32,
    ) -> Result<Self, CatalogError> {
        let mut selection = Self::new();
        if let Some(slug) = brand {
            selection.select_brand(slug)?;
        }
        if let Some(amount) = amount {
            selection.select_amount(amount)?;
        }
        selection.set_quantity(quantity);
        Ok(selection)
    }

    #[must_use]
    pub fn brand(&self) -> Option<&'static Brand> {
        self.brand.as_deref().and_then(find_brand)
    }

    #[must_use]
    pub const fn amount(&self) -> Option<u32> {
        self.amount
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Pick a brand. Picking the brand that is already selected clears it.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownBrand`] if no brand has this slug.
    pub fn select_brand(&mut self, slug: &str) -> Result<(), CatalogError> {
        let brand = find_brand(slug).ok_or_else(|| CatalogError::UnknownBrand {
            slug: slug.to_owned(),
        })?;
        if self.brand.as_deref() == Some(brand.slug) {
            self.brand = None;
        } else {
            self.brand = Some(brand.slug.to_owned());
        }
        Ok(())
    }

    /// Pick a face value.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownDenomination`] if `amount` is not offered.
    pub fn select_amount(&mut self, amount: u32) -> Result<(), CatalogError> {
        if !DENOMINATIONS.contains(&amount) {
            return Err(CatalogError::UnknownDenomination { amount });
        }
        self.amount = Some(amount);
        Ok(())
    }

    /// Set the quantity. Values below one are ignored.
    pub fn set_quantity(&mut self, quantity: u32) {
        if quantity >= 1 {
            self.quantity = quantity;
        }
    }

    pub fn increment(&mut self) {
        self.set_quantity(self.quantity.saturating_add(1));
    }

    pub fn decrement(&mut self) {
        self.set_quantity(self.quantity.saturating_sub(1));
    }

    /// Whether the minus button is usable.
    #[must_use]
    pub const fn can_decrement(&self) -> bool {
        self.quantity > 1
    }

    /// Order total in whole dollars; zero until an amount is picked.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.amount
            .map_or(0, |amount| u64::from(amount) * u64::from(self.quantity))
    }

    /// Total rendered as `$75.00`.
    #[must_use]
    pub fn formatted_total(&self) -> String {
        format!("${}.00", self.total())
    }

    /// Whether the buy button is enabled.
    #[must_use]
    pub const fn can_purchase(&self) -> bool {
        self.brand.is_some() && self.amount.is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn brand_slugs_are_unique() {
        let mut slugs: Vec<&str> = BRANDS.iter().map(|b| b.slug).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), BRANDS.len());
    }

    #[test]
    fn search_is_case_insensitive() {
        let hits: Vec<&str> = search_brands("PLAY").iter().map(|b| b.slug).collect();
        assert_eq!(hits, ["google-play", "playstation"]);
        assert_eq!(search_brands("").len(), 17);
        assert_eq!(search_brands("  ").len(), 17);
        assert!(search_brands("walmart").is_empty());
    }

    #[test]
    fn selecting_same_brand_twice_clears_it() {
        let mut sel = PurchaseSelection::new();
        sel.select_brand("steam").unwrap();
        assert_eq!(sel.brand().map(|b| b.label), Some("Steam"));
        sel.select_brand("xbox").unwrap();
        assert_eq!(sel.brand().map(|b| b.slug), Some("xbox"));
        sel.select_brand("xbox").unwrap();
        assert!(sel.brand().is_none());
    }

    #[test]
    fn unknown_brand_and_amount_are_rejected() {
        let mut sel = PurchaseSelection::new();
        assert_eq!(
            sel.select_brand("walmart"),
            Err(CatalogError::UnknownBrand {
                slug: "walmart".into()
            })
        );
        assert_eq!(
            sel.select_amount(40),
            Err(CatalogError::UnknownDenomination { amount: 40 })
        );
        assert_eq!(sel, PurchaseSelection::new());
    }

    #[test]
    fn quantity_never_drops_below_one() {
        let mut sel = PurchaseSelection::new();
        assert!(!sel.can_decrement());
        sel.decrement();
        assert_eq!(sel.quantity(), 1);
        sel.set_quantity(0);
        assert_eq!(sel.quantity(), 1);
        sel.increment();
        sel.increment();
        assert_eq!(sel.quantity(), 3);
        assert!(sel.can_decrement());
    }

    #[test]
    fn total_needs_an_amount() {
        let mut sel = PurchaseSelection::new();
        sel.set_quantity(4);
        assert_eq!(sel.total(), 0);
        assert_eq!(sel.formatted_total(), "$0.00");

        sel.select_amount(50).unwrap();
        sel.set_quantity(3);
        assert_eq!(sel.total(), 150);
        assert_eq!(sel.formatted_total(), "$150.00");
    }

    #[test]
    fn purchase_needs_brand_and_amount() {
        let mut sel = PurchaseSelection::new();
        sel.select_amount(25).unwrap();
        assert!(!sel.can_purchase());
        sel.select_brand("amazon").unwrap();
        assert!(sel.can_purchase());
    }

    #[test]
    fn from_parts_validates_every_value() {
        let sel = PurchaseSelection::from_parts(Some("apple"), Some(30), 2).unwrap();
        assert_eq!(sel.total(), 60);
        assert!(PurchaseSelection::from_parts(Some("apple"), Some(31), 2).is_err());
    }

    #[test]
    fn deserializing_validates_like_from_parts() {
        let sel: PurchaseSelection =
            serde_json::from_str(r#"{"brand":"steam","amount":100,"quantity":2}"#).unwrap();
        assert_eq!(sel, PurchaseSelection::from_parts(Some("steam"), Some(100), 2).unwrap());

        // missing or zero quantity falls back to one
        let sel: PurchaseSelection = serde_json::from_str(r#"{"brand":null,"amount":null}"#).unwrap();
        assert_eq!(sel, PurchaseSelection::new());

        let err = serde_json::from_str::<PurchaseSelection>(r#"{"brand":"walmart","amount":25}"#)
            .unwrap_err();
        assert!(err.to_string().contains("unknown brand: walmart"));
        assert!(
            serde_json::from_str::<PurchaseSelection>(r#"{"brand":"steam","amount":40,"quantity":1}"#)
                .is_err()
        );
    }
}
