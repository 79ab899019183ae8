//! Structural Steel Profiles
//!
//! Length-based catalog entries: European hot-rolled sections (IPE, HEA,
//! HEB, UPN), hollow sections (round tube, RHS, SHS), cold-formed purlins,
//! omegas and black plate.
//!
//! ## Rate Basis
//!
//! Every rate is in €/kg except painting, which is in €/m² of painted
//! surface. Weight and painted area both scale with the cut length.

use serde::{Deserialize, Serialize};

use super::{CatalogCost, CostVector};
use crate::units::{Kilograms, Meters, SqM};

/// Steel profile with per-metre properties and cost rates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteelProfile {
    /// Supplier article code (e.g., "0480040011")
    pub code: String,

    /// Designation as written on drawings (e.g., "IPE 300")
    pub designation: String,

    /// Linear mass (kg/m)
    pub weight_per_meter_kg: f64,

    /// Painted surface per metre (m²/m)
    pub area_per_meter_m2: f64,

    /// Cost rates; painting in €/m², all others in €/kg
    pub rates: CostVector,

    /// Pre-galvanized items (purlins) carry no painting or fabrication
    pub is_galvanized: bool,
}

impl SteelProfile {
    /// Weight of a cut of the given length
    pub fn weight(&self, length: Meters) -> Kilograms {
        Kilograms(self.weight_per_meter_kg * length.0)
    }

    /// Painted surface of a cut of the given length
    pub fn painted_area(&self, length: Meters) -> SqM {
        SqM(self.area_per_meter_m2 * length.0)
    }

    /// Cost breakdown for a single cut of the given length.
    ///
    /// # Example
    ///
    /// ```rust
    /// use quote_core::catalog::CostCatalog;
    /// use quote_core::units::Meters;
    ///
    /// let catalog = CostCatalog::standard();
    /// let ipe = catalog.find_profile("IPE 300").unwrap();
    /// let cost = ipe.calculate_cost(Meters(2.0));
    /// assert!((cost.weight_kg - 84.4).abs() < 1e-9);
    /// ```
    pub fn calculate_cost(&self, length: Meters) -> CatalogCost {
        let weight = self.weight(length).0;
        let area = self.painted_area(length).0;
        let r = &self.rates;

        let breakdown = CostVector {
            material: weight * r.material,
            fabrication: weight * r.fabrication,
            assembly: weight * r.assembly,
            painting: area * r.painting,
            lifting: weight * r.lifting,
            consumables: weight * r.consumables,
            transport: weight * r.transport,
        };

        CatalogCost {
            designation: self.designation.clone(),
            quantity: length.0,
            unit: "m".to_string(),
            weight_kg: weight,
            area_m2: area,
            total_cost: breakdown.total(),
            breakdown,
        }
    }
}

impl std::fmt::Display for SteelProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({:.2} kg/m, {:.3} m²/m)",
            self.designation, self.weight_per_meter_kg, self.area_per_meter_m2
        )
    }
}

// (code, designation, kg/m, m²/m, material, fabrication, assembly, painting, lifting, consumables, transport)
type ProfileRow = (&'static str, &'static str, f64, f64, f64, f64, f64, f64, f64, f64, f64);

const PROFILE_DATA: &[ProfileRow] = &[
    // IPE
    ("0480040011", "IPE 300", 42.2, 1.16, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480040009", "IPE 240", 30.7, 0.922, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480040015", "IPE 450", 77.6, 1.61, 0.9, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480040008", "IPE 220", 26.2, 0.848, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480040010", "IPE 270", 30.7, 0.92, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480040004", "IPE 140", 12.9, 0.551, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480040003", "IPE 120", 10.4, 0.475, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480040005", "IPE 160", 15.8, 0.623, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480040006", "IPE 180", 18.8, 0.699, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480040007", "IPE 200", 22.4, 0.773, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480040012", "IPE 330", 49.1, 1.252, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480040013", "IPE 360", 57.1, 1.356, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480040014", "IPE 400", 66.3, 1.467, 0.9, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480040016", "IPE 500", 90.7, 1.782, 0.9, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480040017", "IPE 550", 106.0, 1.944, 0.9, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480040018", "IPE 600", 122.0, 2.106, 0.9, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    // HEB
    ("0480030010", "HEB 100", 20.4, 0.567, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480030011", "HEB 120", 26.7, 0.686, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480030012", "HEB 140", 33.7, 0.805, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480030013", "HEB 160", 42.6, 0.924, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480030014", "HEB 180", 51.2, 1.043, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480030015", "HEB 200", 61.3, 1.162, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480030016", "HEB 220", 71.5, 1.294, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480030017", "HEB 240", 83.2, 1.426, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480030018", "HEB 260", 93.0, 1.545, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480030019", "HEB 280", 103.0, 1.664, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480030020", "HEB 300", 117.0, 1.783, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480030021", "HEB 320", 127.0, 1.889, 0.9, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480030022", "HEB 340", 134.0, 1.969, 0.9, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480030023", "HEB 360", 142.0, 2.049, 0.9, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480030024", "HEB 400", 155.0, 2.196, 0.9, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480030025", "HEB 450", 171.0, 2.396, 0.9, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480030026", "HEB 500", 187.0, 2.596, 0.9, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    // HEA
    ("0480020010", "HEA 100", 16.7, 0.560, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480020011", "HEA 120", 19.9, 0.666, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480020012", "HEA 140", 24.7, 0.772, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480020013", "HEA 160", 30.4, 0.878, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480020014", "HEA 180", 35.5, 0.984, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480020015", "HEA 200", 42.3, 1.090, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480020016", "HEA 220", 50.5, 1.209, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480020017", "HEA 240", 60.3, 1.328, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480020018", "HEA 260", 68.2, 1.447, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480020019", "HEA 280", 76.4, 1.566, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480020020", "HEA 300", 88.3, 1.685, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    // UPN
    ("0480050005", "UPN 80", 8.64, 0.362, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480050006", "UPN 100", 10.6, 0.424, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480050007", "UPN 120", 13.4, 0.494, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480050008", "UPN 140", 16.0, 0.564, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480050009", "UPN 160", 18.8, 0.634, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480050010", "UPN 180", 22.0, 0.710, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480050011", "UPN 200", 25.3, 0.786, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480050012", "UPN 220", 29.4, 0.862, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480050013", "UPN 240", 33.2, 0.938, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480050014", "UPN 260", 37.9, 1.014, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480050015", "UPN 280", 41.8, 1.090, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0480050016", "UPN 300", 46.2, 1.166, 0.85, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    // Round tube
    ("0550010060", "TUBO RED. 88.9*3.2", 6.76, 0.28, 1.25, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0550010050", "TUBO RED. 60.3*3.2", 4.51, 0.19, 1.25, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0550010070", "TUBO RED. 114.3*3.6", 9.83, 0.36, 1.25, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0550010080", "TUBO RED. 139.7*4.0", 13.4, 0.44, 1.25, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0550010090", "TUBO RED. 168.3*4.5", 18.2, 0.53, 1.25, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    // RHS
    ("0550020040", "RHS 100x50x3", 6.71, 0.30, 1.25, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0550020050", "RHS 100x50x4", 8.59, 0.30, 1.25, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0550020060", "RHS 120x60x4", 10.7, 0.36, 1.25, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0550020070", "RHS 150x100x5", 18.6, 0.50, 1.25, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0550020080", "RHS 200x100x5", 23.2, 0.60, 1.25, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0550020090", "RHS 200x100x6", 27.4, 0.60, 1.25, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0550020100", "RHS 250x150x6", 36.6, 0.80, 1.25, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0550020110", "RHS 300x200x8", 60.5, 1.00, 1.25, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    // SHS
    ("0550030040", "SHS 60x60x3", 5.29, 0.24, 1.25, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0550030050", "SHS 80x80x4", 9.22, 0.32, 1.25, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0550030060", "SHS 100x100x4", 11.7, 0.40, 1.25, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0550030070", "SHS 100x100x5", 14.4, 0.40, 1.25, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0550030080", "SHS 120x120x5", 17.5, 0.48, 1.25, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0550030090", "SHS 150x150x6", 26.4, 0.60, 1.25, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0550030100", "SHS 200x200x8", 47.7, 0.80, 1.25, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    // Galvanized purlins (no fabrication, no painting)
    ("0410010013", "MADRE Z 170*56*15 ESP. 1.5MM", 3.54, 0.604, 1.15, 0.0, 0.2, 0.0, 0.05, 0.04, 0.03),
    ("0410010005", "MADRE C 170*56*15 ESP. 1.5MM", 3.54, 0.604, 1.15, 0.0, 0.2, 0.0, 0.05, 0.04, 0.03),
    ("0410010015", "MADRE C 220*68*18 ESP. 2MM", 5.85, 0.75, 1.15, 0.0, 0.2, 0.0, 0.05, 0.04, 0.03),
    ("0410010016", "MADRE Z 200*60*15 ESP. 2MM", 5.10, 0.68, 1.15, 0.0, 0.2, 0.0, 0.05, 0.04, 0.03),
    ("0410010017", "MADRE Z 250*70*20 ESP. 2.5MM", 7.85, 0.82, 1.15, 0.0, 0.2, 0.0, 0.05, 0.04, 0.03),
    // Omegas
    ("0410020001", "OMEGA 50", 2.27, 0.388, 1.2, 0.0, 0.2, 0.0, 0.05, 0.04, 0.03),
    ("0410020002", "OMEGA 80", 3.15, 0.45, 1.2, 0.0, 0.2, 0.0, 0.05, 0.04, 0.03),
    // Black plate, priced per metre of 1 m wide strip
    ("0240120008", "CHAPA PRETA 8MM", 62.8, 1.0, 1.8, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0240120010", "CHAPA PRETA 10MM", 78.5, 1.0, 1.8, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0240120012", "CHAPA PRETA 12MM", 94.2, 1.0, 1.8, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0240120013", "CHAPA PRETA 15MM", 120.0, 2.0, 1.8, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0240120020", "CHAPA PRETA 20MM", 157.0, 2.0, 1.8, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
    ("0240120025", "CHAPA PRETA 25MM", 196.0, 2.0, 1.8, 0.25, 0.2, 13.0, 0.05, 0.04, 0.03),
];

/// Build the standard profile list in table order
pub(crate) fn standard_profiles() -> Vec<SteelProfile> {
    PROFILE_DATA
        .iter()
        .map(
            |&(code, designation, kg_m, m2_m, material, fabrication, assembly, painting, lifting, consumables, transport)| {
                let upper = designation.to_uppercase();
                SteelProfile {
                    code: code.to_string(),
                    designation: designation.to_string(),
                    weight_per_meter_kg: kg_m,
                    area_per_meter_m2: m2_m,
                    rates: CostVector {
                        material,
                        fabrication,
                        assembly,
                        painting,
                        lifting,
                        consumables,
                        transport,
                    },
                    is_galvanized: upper.contains("GALVANIZADA") || upper.contains("MADRE"),
                }
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ipe_300() -> SteelProfile {
        standard_profiles()
            .into_iter()
            .find(|p| p.designation == "IPE 300")
            .unwrap()
    }

    #[test]
    fn test_profile_weight_and_area() {
        let ipe = ipe_300();
        assert!((ipe.weight(Meters(1.5)).0 - 63.3).abs() < 1e-9);
        assert!((ipe.painted_area(Meters(1.5)).0 - 1.74).abs() < 1e-9);
    }

    #[test]
    fn test_profile_cost_breakdown() {
        let ipe = ipe_300();
        let cost = ipe.calculate_cost(Meters(1.0));

        // Weight-based rates apply to 42.2 kg
        assert!((cost.breakdown.material - 42.2 * 0.85).abs() < 1e-9);
        assert!((cost.breakdown.fabrication - 42.2 * 0.25).abs() < 1e-9);
        // Painting applies to 1.16 m² at 13 €/m²
        assert!((cost.breakdown.painting - 1.16 * 13.0).abs() < 1e-9);
        assert!((cost.total_cost - cost.breakdown.total()).abs() < 1e-9);
    }

    #[test]
    fn test_purlins_flagged_galvanized() {
        let profiles = standard_profiles();
        let purlin = profiles.iter().find(|p| p.designation.starts_with("MADRE")).unwrap();
        assert!(purlin.is_galvanized);
        assert_eq!(purlin.rates.painting, 0.0);
        assert!(!ipe_300().is_galvanized);
    }

    #[test]
    fn test_display() {
        assert_eq!(ipe_300().to_string(), "IPE 300 (42.20 kg/m, 1.160 m²/m)");
    }
}
