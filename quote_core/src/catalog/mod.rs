//! # Cost Catalog
//!
//! Static reference table of known industrial designations and their
//! unit-cost vectors. Two kinds of entries exist:
//!
//! - **Profiles** (length-based): structural sections rated per kg of
//!   steel, painting rated per m² of surface
//! - **Unit items** (quantity-based): cladding and accessories rated per
//!   m², per metre or per piece
//!
//! The catalog is an ordinary value. Build it once with
//! [`CostCatalog::standard`] and pass `&CostCatalog` to every calculation
//! run; it is never mutated afterwards, so concurrent runs can share it.
//! Tests can build a substitute with [`CostCatalog::empty`] and
//! [`CostCatalog::add_profile`].
//!
//! ## Example
//!
//! ```rust
//! use quote_core::catalog::CostCatalog;
//!
//! let catalog = CostCatalog::standard();
//!
//! // Loose spellings resolve to the catalog designation
//! let heb = catalog.find_profile("heb200").unwrap();
//! assert_eq!(heb.designation, "HEB 200");
//!
//! let gutter = catalog.find_unit_item("caleira dupla isolada", None).unwrap();
//! assert_eq!(gutter.unit, "ml");
//! ```

pub mod designation;
pub mod profiles;
pub mod unit_items;

pub use profiles::SteelProfile;
pub use unit_items::{ItemCategory, UnitItem};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::units::Meters;
use designation::{normalize_item_name, normalize_profile_name, section_size_key};

/// One value per catalog cost component.
///
/// Used both for rates (per kg, per m² or per unit) and for computed costs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostVector {
    pub material: f64,
    pub fabrication: f64,
    pub assembly: f64,
    pub painting: f64,
    pub lifting: f64,
    pub consumables: f64,
    pub transport: f64,
}

impl CostVector {
    /// Sum of all seven components
    pub fn total(&self) -> f64 {
        self.material
            + self.fabrication
            + self.assembly
            + self.painting
            + self.lifting
            + self.consumables
            + self.transport
    }

    /// Every component multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> CostVector {
        CostVector {
            material: self.material * factor,
            fabrication: self.fabrication * factor,
            assembly: self.assembly * factor,
            painting: self.painting * factor,
            lifting: self.lifting * factor,
            consumables: self.consumables * factor,
            transport: self.transport * factor,
        }
    }
}

/// Cost of one catalog entry for a given length or quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogCost {
    /// Catalog designation that was priced
    pub designation: String,
    /// Length in metres (profiles) or quantity in `unit` (items)
    pub quantity: f64,
    /// "m" for profiles, the item's unit otherwise
    pub unit: String,
    /// Steel weight (0 for unit items)
    pub weight_kg: f64,
    /// Painted surface (0 for unit items)
    pub area_m2: f64,
    /// Per-component cost
    pub breakdown: CostVector,
    /// Sum of the breakdown
    pub total_cost: f64,
}

/// A catalog entry of either kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CostCatalogEntry {
    /// Length-based structural profile
    Profile(SteelProfile),
    /// Quantity-based cladding or accessory item
    Unit(UnitItem),
}

impl CostCatalogEntry {
    /// Catalog designation of the entry
    pub fn designation(&self) -> &str {
        match self {
            CostCatalogEntry::Profile(p) => &p.designation,
            CostCatalogEntry::Unit(i) => &i.designation,
        }
    }
}

/// Kind of entry requested in a direct catalog costing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogItemKind {
    #[default]
    Profile,
    Cladding,
}

/// One row of a direct catalog costing request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRequest {
    #[serde(rename = "type", default)]
    pub kind: CatalogItemKind,
    pub name: String,
    /// Metres for profiles, item units for cladding
    #[serde(default)]
    pub quantity: f64,
}

/// Result of [`CostCatalog::cost_items`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogCostReport {
    pub items: Vec<CatalogCost>,
    pub total_items: usize,
    pub total_weight_kg: f64,
    pub total_cost: f64,
}

/// The cost reference table.
#[derive(Debug, Clone, Default)]
pub struct CostCatalog {
    profiles: Vec<SteelProfile>,
    /// Normalized designation and article code -> index into `profiles`
    profile_index: IndexMap<String, usize>,
    items: Vec<UnitItem>,
    /// One index per category, normalized designation -> index into `items`
    facade_index: IndexMap<String, usize>,
    roof_index: IndexMap<String, usize>,
    accessory_index: IndexMap<String, usize>,
}

impl CostCatalog {
    /// Create a catalog with no entries
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create the standard steel-structure and cladding catalog
    pub fn standard() -> Self {
        let mut catalog = Self::empty();
        for profile in profiles::standard_profiles() {
            catalog.add_profile(profile);
        }
        for item in unit_items::standard_items() {
            catalog.add_unit_item(item);
        }
        tracing::debug!(
            profiles = catalog.profiles.len(),
            unit_items = catalog.items.len(),
            "cost catalog loaded"
        );
        catalog
    }

    /// Add a profile, indexed by normalized designation and by article code
    pub fn add_profile(&mut self, profile: SteelProfile) {
        let idx = self.profiles.len();
        self.profile_index
            .insert(normalize_profile_name(&profile.designation), idx);
        if !profile.code.is_empty() {
            self.profile_index.insert(profile.code.clone(), idx);
        }
        self.profiles.push(profile);
    }

    /// Add a quantity-based item under its category
    pub fn add_unit_item(&mut self, item: UnitItem) {
        let idx = self.items.len();
        let key = normalize_item_name(&item.designation);
        let index = match item.category {
            ItemCategory::Facade => &mut self.facade_index,
            ItemCategory::Roof => &mut self.roof_index,
            ItemCategory::Accessories => &mut self.accessory_index,
        };
        index.insert(key, idx);
        self.items.push(item);
    }

    /// Look up a profile by designation or article code.
    ///
    /// Search order: exact normalized key, then the first key (in catalog
    /// order) that contains the term or is contained in it, then the term
    /// re-keyed as "TYPE SIZE" (e.g. "IPE300" -> "IPE 300").
    pub fn find_profile(&self, search_term: &str) -> Option<&SteelProfile> {
        let normalized = normalize_profile_name(search_term);
        if normalized.is_empty() {
            return None;
        }

        if let Some(&idx) = self.profile_index.get(&normalized) {
            return self.profiles.get(idx);
        }

        let partial = self
            .profile_index
            .iter()
            .find(|(key, _)| key.contains(normalized.as_str()) || normalized.contains(key.as_str()))
            .map(|(_, &idx)| idx);
        if let Some(idx) = partial {
            return self.profiles.get(idx);
        }

        section_size_key(&normalized)
            .and_then(|key| self.profile_index.get(&key).copied())
            .and_then(|idx| self.profiles.get(idx))
    }

    /// Look up a cladding or accessory item.
    ///
    /// `category` restricts the search to one section; `None` searches
    /// facade, roof and accessories in that order. Within a section the
    /// search is exact key, then containment either way, then "every word
    /// of the term appears in the key".
    pub fn find_unit_item(&self, search_term: &str, category: Option<ItemCategory>) -> Option<&UnitItem> {
        let normalized = normalize_item_name(search_term);
        if normalized.is_empty() {
            return None;
        }
        let keywords: Vec<&str> = normalized.split(' ').collect();

        let categories: &[ItemCategory] = match category {
            Some(ItemCategory::Facade) => &[ItemCategory::Facade],
            Some(ItemCategory::Roof) => &[ItemCategory::Roof],
            Some(ItemCategory::Accessories) => &[ItemCategory::Accessories],
            None => &ItemCategory::ALL,
        };

        for &cat in categories {
            let index = self.index_for(cat);
            if let Some(&idx) = index.get(&normalized) {
                return self.items.get(idx);
            }
            let hit = index.iter().find(|(key, _)| {
                key.contains(normalized.as_str())
                    || normalized.contains(key.as_str())
                    || keywords.iter().all(|kw| key.contains(kw))
            });
            if let Some((_, &idx)) = hit {
                return self.items.get(idx);
            }
        }
        None
    }

    /// Resolve a free-text description through the item rule table
    pub fn match_unit_item(&self, description: &str) -> Option<&UnitItem> {
        designation::match_item_designation(description).and_then(|key| self.find_unit_item(key, None))
    }

    fn index_for(&self, category: ItemCategory) -> &IndexMap<String, usize> {
        match category {
            ItemCategory::Facade => &self.facade_index,
            ItemCategory::Roof => &self.roof_index,
            ItemCategory::Accessories => &self.accessory_index,
        }
    }

    /// All profiles sorted by designation
    pub fn profiles(&self) -> Vec<&SteelProfile> {
        let mut all: Vec<&SteelProfile> = self.profiles.iter().collect();
        all.sort_by(|a, b| a.designation.cmp(&b.designation));
        all.dedup_by(|a, b| a.designation == b.designation);
        all
    }

    /// Unit items of one category, in catalog order
    pub fn unit_items(&self, category: ItemCategory) -> Vec<&UnitItem> {
        self.items.iter().filter(|i| i.category == category).collect()
    }

    /// Number of profiles and unit items
    pub fn len(&self) -> usize {
        self.profiles.len() + self.items.len()
    }

    /// True when the catalog holds no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find both a profile and an item for a term
    pub fn search(&self, search_term: &str) -> Vec<CostCatalogEntry> {
        let mut results = Vec::new();
        if let Some(profile) = self.find_profile(search_term) {
            results.push(CostCatalogEntry::Profile(profile.clone()));
        }
        if let Some(item) = self.find_unit_item(search_term, None) {
            results.push(CostCatalogEntry::Unit(item.clone()));
        }
        results
    }

    /// Price a list of requests directly against the catalog.
    ///
    /// Requests that do not resolve or have a non-positive quantity are
    /// skipped.
    ///
    /// # Example
    ///
    /// ```rust
    /// use quote_core::catalog::{CatalogItemKind, CatalogRequest, CostCatalog};
    ///
    /// let catalog = CostCatalog::standard();
    /// let report = catalog.cost_items(&[
    ///     CatalogRequest { kind: CatalogItemKind::Profile, name: "IPE 300".into(), quantity: 10.0 },
    ///     CatalogRequest { kind: CatalogItemKind::Cladding, name: "CUME".into(), quantity: 20.0 },
    ///     CatalogRequest { kind: CatalogItemKind::Profile, name: "W14X90".into(), quantity: 5.0 },
    /// ]);
    /// assert_eq!(report.total_items, 2);
    /// assert!((report.total_weight_kg - 422.0).abs() < 1e-9);
    /// ```
    pub fn cost_items(&self, requests: &[CatalogRequest]) -> CatalogCostReport {
        let items: Vec<CatalogCost> = requests
            .iter()
            .filter(|r| r.quantity > 0.0)
            .filter_map(|r| match r.kind {
                CatalogItemKind::Profile => self
                    .find_profile(&r.name)
                    .map(|p| p.calculate_cost(Meters(r.quantity))),
                CatalogItemKind::Cladding => self
                    .find_unit_item(&r.name, None)
                    .map(|i| i.calculate_cost(r.quantity)),
            })
            .collect();

        CatalogCostReport {
            total_items: items.len(),
            total_weight_kg: items.iter().map(|c| c.weight_kg).sum(),
            total_cost: items.iter().map(|c| c.total_cost).sum(),
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_size() {
        let catalog = CostCatalog::standard();
        assert!(!catalog.is_empty());
        assert_eq!(catalog.profiles().len(), catalog.profiles.len());
    }

    #[test]
    fn test_find_profile_exact_and_by_code() {
        let catalog = CostCatalog::standard();
        assert_eq!(catalog.find_profile("IPE 300").unwrap().code, "0480040011");
        assert_eq!(catalog.find_profile("0480030015").unwrap().designation, "HEB 200");
    }

    #[test]
    fn test_find_profile_partial_and_resized() {
        let catalog = CostCatalog::standard();
        // Term contained in a key
        assert_eq!(
            catalog.find_profile("MADRE C 220").unwrap().designation,
            "MADRE C 220*68*18 ESP. 2MM"
        );
        // No separator: resolved through the TYPE SIZE rewrite
        assert_eq!(catalog.find_profile("UPN120").unwrap().designation, "UPN 120");
        assert_eq!(
            catalog.find_profile("tubo red. 88.9x3.2").unwrap().designation,
            "TUBO RED. 88.9*3.2"
        );
    }

    #[test]
    fn test_find_profile_miss() {
        let catalog = CostCatalog::standard();
        assert!(catalog.find_profile("W14X90").is_none());
        assert!(catalog.find_profile("   ").is_none());
    }

    #[test]
    fn test_find_unit_item() {
        let catalog = CostCatalog::standard();
        let item = catalog.find_unit_item("painel fachada pir", None).unwrap();
        assert_eq!(item.designation, "PAINEL FACHADA PIR 50MM");

        // Restricted to the roof section
        let roof = catalog
            .find_unit_item("PARAFUSOS", Some(ItemCategory::Roof))
            .unwrap();
        assert_eq!(roof.designation, "PARAFUSOS COBERTURA");

        assert!(catalog.find_unit_item("escada", None).is_none());
    }

    #[test]
    fn test_match_unit_item_from_description() {
        let catalog = CostCatalog::standard();
        let door = catalog
            .match_unit_item("Porta de emergência 900 x 2150 c/ barra antipânico")
            .unwrap();
        assert_eq!(door.designation, "PORTA EMERGENCIA 900X2150");
    }

    #[test]
    fn test_substitute_catalog() {
        let mut catalog = CostCatalog::empty();
        catalog.add_profile(SteelProfile {
            code: String::new(),
            designation: "TEST 100".to_string(),
            weight_per_meter_kg: 10.0,
            area_per_meter_m2: 0.5,
            rates: CostVector {
                material: 1.0,
                ..CostVector::default()
            },
            is_galvanized: false,
        });
        assert_eq!(catalog.len(), 1);
        assert!(catalog.find_profile("test 100").is_some());
        assert!(catalog.find_profile("IPE 300").is_none());
    }

    #[test]
    fn test_search_returns_both_kinds() {
        let catalog = CostCatalog::standard();
        let hits = catalog.search("IPE 300");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].designation(), "IPE 300");

        let hits = catalog.search("JANELA ALUMINIO");
        assert!(hits.iter().any(|h| matches!(h, CostCatalogEntry::Unit(_))));
    }

    #[test]
    fn test_cost_vector() {
        let v = CostVector {
            material: 1.0,
            fabrication: 2.0,
            assembly: 3.0,
            painting: 4.0,
            lifting: 5.0,
            consumables: 6.0,
            transport: 7.0,
        };
        assert_eq!(v.total(), 28.0);
        assert_eq!(v.scaled(2.0).total(), 56.0);
    }
}
