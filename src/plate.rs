//! Ghana vehicle license-plate classifier.
//!
//! Screens registration numbers before they are handed to the batch
//! dispatcher: a plate that fails here gets a synthetic failed output and
//! never produces a provider call. Classification is format-only; a plate
//! that looks personalised still needs DVLA database verification.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Result of classifying one plate: whether the format is acceptable and a
/// human-readable diagnostic either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlateCheck {
    pub valid: bool,
    pub detail: String,
}

impl PlateCheck {
    fn valid(detail: String) -> Self {
        Self {
            valid: true,
            detail,
        }
    }

    fn invalid(detail: impl Into<String>) -> Self {
        Self {
            valid: false,
            detail: detail.into(),
        }
    }
}

/// Region codes assigned by the DVLA, grouped by region.
static REGION_CODES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // Ashanti
        "AC", "AE", "AK", "AP", "AS", "AW", // Bono
        "BA", "BR", "BW", // Bono East
        "BE", "BT", // Central
        "CR", "CW", "CS", // Eastern
        "EN", "ER", "ES", // Greater Accra
        "GB", "GC", "GE", "GG", "GH", "GL", "GM", "GN", "GR", "GT", "GS", "GW", "GX", "GY",
        // Northern
        "NR", "NW", // Upper East
        "UE", "UW", "UD", // Upper West
        "UH", // Volta
        "VA", "VD", "VR", // Western
        "WR", "WT",
    ]
    .into_iter()
    .collect()
});

/// Special plates: armed forces, police, fire, prisons, free zone board.
static SPECIAL_CODES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["GA", "GP", "FS", "PS", "FZB"].into_iter().collect());

static DV_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(DV)(\d{4})(\d{2})$").unwrap());
static MOTORCYCLE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^M(\d{4,5})$").unwrap());
static OLD_FORMAT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z]{2})(\d{1,4})(\d{2})$").unwrap());
static NEW_FORMAT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z]{2})(\d{1,4})([A-Z]{2})$").unwrap());
static SPECIAL_FORMAT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z]{2,3})(\d{1,4})$").unwrap());
static HAS_LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]").unwrap());
static HAS_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]").unwrap());

/// Classify one plate against the known Ghanaian formats.
///
/// Input is trimmed and uppercased; spaces and hyphens are dropped before
/// matching so `GR 1234-22` and `GR123422` classify identically.
pub fn classify(plate: &str) -> PlateCheck {
    let plate = plate.trim().to_uppercase();
    if plate.is_empty() {
        return PlateCheck::invalid("Empty plate number");
    }

    let clean: String = plate.chars().filter(|c| *c != ' ' && *c != '-').collect();

    // DV trade plates with year suffix, e.g. DV123422.
    if let Some(caps) = DV_PATTERN.captures(&clean) {
        return PlateCheck::valid(format!(
            "Valid DV trade plate ({}{}, year 20{})",
            &caps[1], &caps[2], &caps[3]
        ));
    }

    // Motorcycles: M + 4-5 digits.
    if let Some(caps) = MOTORCYCLE_PATTERN.captures(&clean) {
        return PlateCheck::valid(format!(
            "Valid motorcycle plate (blue background, number {})",
            &caps[1]
        ));
    }

    // Old format: region + digits + two-digit year, e.g. GR123422.
    if let Some(caps) = OLD_FORMAT_PATTERN.captures(&clean) {
        let region = &caps[1];
        if REGION_CODES.contains(region) {
            return PlateCheck::valid(format!(
                "Valid old format ({} region, digits {}, year 20{})",
                region, &caps[2], &caps[3]
            ));
        }
        return PlateCheck::invalid(format!("Invalid region code: {}", region));
    }

    // New format: region + digits + zone code, e.g. GR1234AD.
    if let Some(caps) = NEW_FORMAT_PATTERN.captures(&clean) {
        let region = &caps[1];
        if REGION_CODES.contains(region) {
            return PlateCheck::valid(format!(
                "Valid new format ({} region, digits {}, zone {})",
                region, &caps[2], &caps[3]
            ));
        }
        return PlateCheck::invalid(format!("Invalid region code: {}", region));
    }

    // Special plates (GP, GA, FS, PS, FZB) or a bare region code + digits.
    if let Some(caps) = SPECIAL_FORMAT_PATTERN.captures(&clean) {
        let code = &caps[1];
        if SPECIAL_CODES.contains(code) {
            return PlateCheck::valid(format!(
                "Valid special plate ({}, digits {})",
                code, &caps[2]
            ));
        }
        if REGION_CODES.contains(code) {
            return PlateCheck::valid(format!(
                "Valid basic format ({} region, digits {})",
                code, &caps[2]
            ));
        }
        return PlateCheck::invalid(format!("Invalid code: {}", code));
    }

    classify_personalised(&clean)
}

fn classify_personalised(clean: &str) -> PlateCheck {
    if clean.len() < 2 || clean.len() > 15 {
        return PlateCheck::invalid("Does not match any Ghanaian license plate format");
    }

    if !HAS_LETTER.is_match(clean) || !HAS_DIGIT.is_match(clean) {
        return PlateCheck::invalid("Personalised plates typically contain both letters and numbers");
    }

    // Format looks plausible; only a DVLA lookup can confirm it.
    PlateCheck::valid("Possible personalised plate (requires DVLA database verification)".into())
}
