//! Cladding and Accessory Items
//!
//! Quantity-based catalog entries priced per m², per metre or per unit:
//! facade and roof cladding, flashings, gutters, skylights, doors,
//! intumescent paint and galvanizing.

use serde::{Deserialize, Serialize};

use super::{CatalogCost, CostVector};

/// Catalog section a quantity-based item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    /// Wall cladding and facade flashings
    Facade,
    /// Roof panels, ridges, gutters and skylights
    Roof,
    /// Doors, windows, fire protection, galvanizing
    Accessories,
}

impl ItemCategory {
    /// Search order used by catalog lookups
    pub const ALL: [ItemCategory; 3] = [
        ItemCategory::Facade,
        ItemCategory::Roof,
        ItemCategory::Accessories,
    ];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ItemCategory::Facade => "Facade",
            ItemCategory::Roof => "Roof",
            ItemCategory::Accessories => "Accessories",
        }
    }
}

impl std::fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Quantity-based catalog item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitItem {
    /// Designation (e.g., "PAINEL FACHADA PIR 50MM")
    pub designation: String,

    /// Catalog section
    pub category: ItemCategory,

    /// Pricing unit ("m²", "ml", "un", "kg")
    pub unit: String,

    /// Per-unit rates for each cost component
    pub rates: CostVector,
}

impl UnitItem {
    /// Total price for one unit
    pub fn total_price_per_unit(&self) -> f64 {
        self.rates.total()
    }

    /// Cost breakdown for the given quantity
    pub fn calculate_cost(&self, quantity: f64) -> CatalogCost {
        let breakdown = self.rates.scaled(quantity);
        CatalogCost {
            designation: self.designation.clone(),
            quantity,
            unit: self.unit.clone(),
            weight_kg: 0.0,
            area_m2: 0.0,
            total_cost: quantity * self.total_price_per_unit(),
            breakdown,
        }
    }
}

// (designation, unit, material, fabrication, assembly, painting, lifting, consumables, transport)
type ItemRow = (&'static str, &'static str, f64, f64, f64, f64, f64, f64, f64);

const FACADE_DATA: &[ItemRow] = &[
    ("PAINEL FACHADA LA ROCHA 50MM", "m²", 23.0, 0.0, 5.0, 0.0, 1.3, 0.0, 0.0),
    ("PAINEL FACHADA PIR 50MM", "m²", 22.0, 0.0, 5.0, 0.0, 1.3, 0.0, 0.0),
    ("PAINEL FACHADA POLIURETANO 30MM", "m²", 18.0, 0.0, 5.0, 0.0, 1.3, 0.0, 0.0),
    ("CHAPA SIMPLES FACHADA", "m²", 12.0, 0.0, 4.0, 0.0, 1.0, 0.0, 0.0),
    ("CHAPA SIMPLES PRELACADA", "m²", 14.0, 0.0, 4.0, 0.0, 1.0, 0.0, 0.0),
    ("REMATES FACHADA", "ml", 9.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0),
    ("PARAFUSOS FACHADA", "un", 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0),
    ("CONTRA FACHADA CHAPA SIMPLES", "m²", 10.0, 0.0, 3.0, 0.0, 1.0, 0.0, 0.0),
];

const ROOF_DATA: &[ItemRow] = &[
    ("PAINEL COBERTURA LA ROCHA 50MM", "m²", 23.5, 0.0, 5.0, 0.0, 1.0, 0.0, 0.0),
    ("PAINEL COBERTURA LA ROCHA 80MM", "m²", 28.0, 0.0, 5.0, 0.0, 1.0, 0.0, 0.0),
    ("PAINEL COBERTURA PIR 50MM", "m²", 22.0, 0.0, 5.0, 0.0, 1.0, 0.0, 0.0),
    ("PAINEL COBERTURA POLIURETANO 30MM", "m²", 18.0, 0.0, 5.0, 0.0, 1.0, 0.0, 0.0),
    ("CHAPA SIMPLES COBERTURA", "m²", 10.0, 0.0, 4.0, 0.0, 1.0, 0.0, 0.0),
    ("ANTICUME", "ml", 7.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0),
    ("CUME", "ml", 12.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0),
    ("PARAFUSOS COBERTURA", "un", 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0),
    ("CLARABOIA FIXA 1.0X1.0", "un", 19.0, 0.0, 2.0, 0.0, 0.0, 0.0, 0.0),
    ("CLARABOIA FIXA 1.5X1.5", "un", 35.0, 0.0, 3.0, 0.0, 0.0, 0.0, 0.0),
    ("AREA DE LUZ", "m²", 19.0, 0.0, 2.0, 0.0, 0.0, 0.0, 0.0),
    ("CALEIRA DUPLA ISOLADA", "ml", 35.0, 0.0, 5.0, 0.0, 0.0, 0.0, 0.0),
    ("CALEIRA SIMPLES GALVANIZADA", "ml", 18.0, 0.0, 3.0, 0.0, 0.0, 0.0, 0.0),
];

const ACCESSORY_DATA: &[ItemRow] = &[
    ("PORTA EMERGENCIA 900X2150", "un", 280.0, 0.0, 50.0, 0.0, 0.0, 0.0, 0.0),
    ("PORTA EMERGENCIA 1200X2150", "un", 350.0, 0.0, 50.0, 0.0, 0.0, 0.0, 0.0),
    ("PORTA SECTORIAL 3000X3000", "un", 1800.0, 0.0, 200.0, 0.0, 50.0, 0.0, 0.0),
    ("PORTA SECTORIAL 4000X4000", "un", 2400.0, 0.0, 250.0, 0.0, 50.0, 0.0, 0.0),
    ("PORTAO BASCULANTE 3000X3000", "un", 1200.0, 0.0, 150.0, 0.0, 30.0, 0.0, 0.0),
    ("JANELA ALUMINIO", "m²", 150.0, 0.0, 30.0, 0.0, 0.0, 0.0, 0.0),
    ("PINTURA INTUMESCENTE R30", "m²", 18.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0),
    ("PINTURA INTUMESCENTE R60", "m²", 28.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0),
    ("PINTURA INTUMESCENTE R90", "m²", 40.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0),
    ("GALVANIZACAO", "kg", 0.45, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0),
];

/// Build the standard item list: facade, then roof, then accessories
pub(crate) fn standard_items() -> Vec<UnitItem> {
    let sections = [
        (ItemCategory::Facade, FACADE_DATA),
        (ItemCategory::Roof, ROOF_DATA),
        (ItemCategory::Accessories, ACCESSORY_DATA),
    ];

    sections
        .iter()
        .flat_map(|&(category, rows)| {
            rows.iter().map(
                move |&(designation, unit, material, fabrication, assembly, painting, lifting, consumables, transport)| {
                    UnitItem {
                        designation: designation.to_string(),
                        category,
                        unit: unit.to_string(),
                        rates: CostVector {
                            material,
                            fabrication,
                            assembly,
                            painting,
                            lifting,
                            consumables,
                            transport,
                        },
                    }
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_cost_scales_with_quantity() {
        let items = standard_items();
        let panel = items
            .iter()
            .find(|i| i.designation == "PAINEL FACHADA PIR 50MM")
            .unwrap();

        let cost = panel.calculate_cost(100.0);
        assert_eq!(cost.breakdown.material, 2200.0);
        assert_eq!(cost.breakdown.assembly, 500.0);
        assert!((cost.total_cost - 2830.0).abs() < 1e-9);
        assert_eq!(cost.unit, "m²");
    }

    #[test]
    fn test_sections_in_order() {
        let items = standard_items();
        assert_eq!(items.first().unwrap().category, ItemCategory::Facade);
        assert_eq!(items.last().unwrap().category, ItemCategory::Accessories);
        assert_eq!(items.len(), FACADE_DATA.len() + ROOF_DATA.len() + ACCESSORY_DATA.len());
    }
}
