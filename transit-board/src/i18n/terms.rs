//! Localized vocabulary.

use std::borrow::Cow;

use crate::domain::VehicleType;

use super::Language;

/// A piece of vocabulary that appears in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    AirConditioningAbbreviation,
    WheelchairAccessibilityAbbreviation,
    GenerationTime,
}

impl Term {
    /// The term in the given language.
    pub fn text(self, language: Language) -> &'static str {
        match (self, language) {
            (Term::AirConditioningAbbreviation, Language::English) => "A",
            (Term::AirConditioningAbbreviation, Language::Bulgarian) => "К",
            (Term::WheelchairAccessibilityAbbreviation, Language::English) => "W",
            (Term::WheelchairAccessibilityAbbreviation, Language::Bulgarian) => "И",
            (Term::GenerationTime, Language::English) => "generation time",
            (Term::GenerationTime, Language::Bulgarian) => "време на генериране",
        }
    }
}

/// Localized name of a known vehicle type.
fn known_vehicle_name(vehicle_type: &VehicleType, language: Language) -> Option<&'static str> {
    let name = match (vehicle_type, language) {
        (VehicleType::Bus, Language::English) => "bus",
        (VehicleType::Bus, Language::Bulgarian) => "автобус",
        (VehicleType::Trolleybus, Language::English) => "trolleybus",
        (VehicleType::Trolleybus, Language::Bulgarian) => "тролейбус",
        (VehicleType::Tram, Language::English) => "tram",
        (VehicleType::Tram, Language::Bulgarian) => "трамвай",
        (VehicleType::Metro, Language::English) => "metro",
        (VehicleType::Metro, Language::Bulgarian) => "метро",
        (VehicleType::Other(_), _) => return None,
    };
    Some(name)
}

/// Display name of a vehicle type. Unknown types show their wire name.
pub fn vehicle_type_name(vehicle_type: &VehicleType, language: Language) -> Cow<'static, str> {
    match known_vehicle_name(vehicle_type, language) {
        Some(name) => Cow::Borrowed(name),
        None => Cow::Owned(vehicle_type.as_wire().to_string()),
    }
}

/// Parse a vehicle type given by a user.
///
/// Accepts the localized name in any supported language or the upstream wire
/// name, case-insensitively. Returns `None` for anything else.
pub fn parse_vehicle_type(name: &str) -> Option<VehicleType> {
    let name = name.trim().to_lowercase();

    VehicleType::KNOWN.into_iter().find(|vt| {
        vt.as_wire() == name
            || [Language::English, Language::Bulgarian]
                .into_iter()
                .any(|lang| known_vehicle_name(vt, lang) == Some(name.as_str()))
    })
}
