//! Designation Rule Tables
//!
//! Free text coming out of drawings and bills of materials names catalog
//! items in many shapes ("IPE300", "ipe 300 - pilar", "Tubo red. 88.9*3.2").
//! These ordered rule tables turn that text into catalog search keys.
//! Rules are evaluated top to bottom and the first match wins, so more
//! specific patterns must come before the patterns they overlap with
//! (e.g. "anticume" before "cume").

use once_cell::sync::Lazy;
use regex::Regex;

/// A rule whose first capture group is the catalog search key
#[derive(Debug)]
pub struct ProfileRule {
    /// Section family the rule recognizes
    pub family: &'static str,
    pattern: Regex,
}

/// A rule mapping a description pattern onto a fixed catalog key
#[derive(Debug)]
pub struct ItemRule {
    /// Catalog designation the rule resolves to
    pub key: &'static str,
    pattern: Regex,
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("designation patterns are valid regular expressions")
}

/// Cross-section and plate codes, matched against uppercased text
pub static PROFILE_RULES: Lazy<Vec<ProfileRule>> = Lazy::new(|| {
    [
        ("IPE", r"(IPE\s*\d+)"),
        ("HEB", r"(HEB\s*\d+)"),
        ("HEA", r"(HEA\s*\d+)"),
        ("UPN", r"(UPN\s*\d+)"),
        ("RHS", r"(RHS\s*\d+[xX]\d+[xX]\d+)"),
        ("SHS", r"(SHS\s*\d+[xX]\d+[xX]\d+)"),
        ("TUBO RED", r"(TUBO\s+RED[.\s]+[\d.]+[*xX][\d.]+)"),
        ("MADRE", r"(MADRE\s+[CZ]\s+\d+)"),
        ("OMEGA", r"(OMEGA\s*\d+)"),
        ("CHAPA PRETA", r"(CHAPA\s+PRETA\s+\d+MM)"),
    ]
    .into_iter()
    .map(|(family, pattern)| ProfileRule {
        family,
        pattern: compile(pattern),
    })
    .collect()
});

/// Cladding and accessory descriptions, matched against normalized lowercase text
pub static ITEM_RULES: Lazy<Vec<ItemRule>> = Lazy::new(|| {
    [
        (r"painel.*fachada.*la.*rocha.*50", "PAINEL FACHADA LA ROCHA 50MM"),
        (r"painel.*fachada.*pir.*50", "PAINEL FACHADA PIR 50MM"),
        (r"painel.*fachada.*poliuretano.*30", "PAINEL FACHADA POLIURETANO 30MM"),
        (r"painel.*cobertura.*la.*rocha.*50", "PAINEL COBERTURA LA ROCHA 50MM"),
        (r"painel.*cobertura.*la.*rocha.*80", "PAINEL COBERTURA LA ROCHA 80MM"),
        (r"painel.*cobertura.*poliuretano.*30", "PAINEL COBERTURA POLIURETANO 30MM"),
        (r"caleira.*dupla", "CALEIRA DUPLA ISOLADA"),
        (r"caleira.*simples", "CALEIRA SIMPLES GALVANIZADA"),
        (r"claraboia.*1.0|claraboia.*1x1", "CLARABOIA FIXA 1.0X1.0"),
        (r"claraboia.*1.5|claraboia.*1,5", "CLARABOIA FIXA 1.5X1.5"),
        (r"area.*luz", "AREA DE LUZ"),
        (r"anticume", "ANTICUME"),
        (r"cume", "CUME"),
        (r"porta.*emergencia.*900|porta.*emergencia.*0.9", "PORTA EMERGENCIA 900X2150"),
        (r"porta.*emergencia.*1200|porta.*emergencia.*1.2", "PORTA EMERGENCIA 1200X2150"),
        (r"porta.*sectorial.*3|portao.*3", "PORTA SECTORIAL 3000X3000"),
        (r"porta.*sectorial.*4|portao.*4", "PORTA SECTORIAL 4000X4000"),
        (r"pintura.*intumescente.*r60|intumescente.*r60", "PINTURA INTUMESCENTE R60"),
        (r"pintura.*intumescente.*r30|intumescente.*r30", "PINTURA INTUMESCENTE R30"),
        (r"pintura.*intumescente.*r90|intumescente.*r90", "PINTURA INTUMESCENTE R90"),
        (r"contra.*fachada", "CONTRA FACHADA CHAPA SIMPLES"),
        (r"chapa.*simples.*fachada", "CHAPA SIMPLES FACHADA"),
        (r"remates", "REMATES FACHADA"),
    ]
    .into_iter()
    .map(|(pattern, key)| ItemRule {
        key,
        pattern: compile(pattern),
    })
    .collect()
});

/// Re-keys a loose "IPE300" style term as "IPE 300"
static SECTION_SIZE: Lazy<Regex> = Lazy::new(|| compile(r"^(IPE|HEB|HEA|UPN|RHS|SHS)\s?(\d+)"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| compile(r"\s+"));

/// Normalize a profile designation: uppercase, single spaces, `*`/`×` as `X`
pub fn normalize_profile_name(name: &str) -> String {
    let upper = name.trim().to_uppercase();
    WHITESPACE
        .replace_all(&upper, " ")
        .replace(['*', '×'], "X")
}

/// Normalize an item designation: uppercase, single spaces, accents stripped
pub fn normalize_item_name(name: &str) -> String {
    let upper = name.trim().to_uppercase();
    WHITESPACE
        .replace_all(&upper, " ")
        .chars()
        .map(strip_accent)
        .collect()
}

fn strip_accent(c: char) -> char {
    match c {
        'Ã' | 'Á' | 'À' | 'Â' => 'A',
        'É' | 'È' | 'Ê' => 'E',
        'Í' | 'Ì' | 'Î' => 'I',
        'Ó' | 'Ò' | 'Ô' | 'Õ' => 'O',
        'Ú' | 'Ù' | 'Û' => 'U',
        'Ç' => 'C',
        other => other,
    }
}

/// A designation found in free text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileMatch {
    /// Family of the rule that matched ("IPE", "TUBO RED", ...)
    pub family: &'static str,
    /// Matched text, not yet normalized
    pub text: String,
}

/// Find the first profile designation in the given terms.
///
/// Terms are tried in order; within a term, rules are tried in table order.
///
/// # Example
///
/// ```rust
/// use quote_core::catalog::designation::match_profile_designation;
///
/// let found = match_profile_designation(["Pilar ipe300 galv.", "P1"]).unwrap();
/// assert_eq!(found.family, "IPE");
/// assert_eq!(found.text, "IPE300");
/// ```
pub fn match_profile_designation<'a, I>(terms: I) -> Option<ProfileMatch>
where
    I: IntoIterator<Item = &'a str>,
{
    terms
        .into_iter()
        .filter(|t| !t.is_empty())
        .find_map(|term| {
            let upper = term.to_uppercase();
            PROFILE_RULES.iter().find_map(|rule| {
                rule.pattern
                    .captures(&upper)
                    .and_then(|caps| caps.get(1))
                    .map(|m| ProfileMatch {
                        family: rule.family,
                        text: m.as_str().to_string(),
                    })
            })
        })
}

/// Find the catalog key of the first item rule matching a description
pub fn match_item_designation(description: &str) -> Option<&'static str> {
    let normalized = normalize_item_name(description).to_lowercase();
    ITEM_RULES
        .iter()
        .find(|rule| rule.pattern.is_match(&normalized))
        .map(|rule| rule.key)
}

/// Rewrite "IPE300"/"HEB 200 reinforced" style keys as "TYPE SIZE"
pub(crate) fn section_size_key(normalized: &str) -> Option<String> {
    SECTION_SIZE
        .captures(normalized)
        .map(|caps| format!("{} {}", &caps[1], &caps[2]))
}
