//! Resolved property results.
//!
//! Contains [`ResolvedProperty`], a computed value together with the
//! contributions it was built from, and [`PropertySummary`], every current
//! value of a snapshot in one serializable struct.

use crate::codes::SenseVariant;
use crate::property::{
    Age, Agility, Beauty, BodyWeightInKg, Charisma, Dangerousness, Dignity, Endurance,
    FatigueBoundary, Height, HeightInCm, Intelligence, Knack, PropertyCode, Senses, Size, Speed,
    Strength, Toughness, Will, WoundBoundary,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A computed property value with its breakdown.
///
/// For properties built from a base value and maluses, each contribution
/// is `(name, amount)` and the amounts sum to `value`. For compound
/// properties the contributions are the input properties the formula read.
///
/// # Examples
///
/// ```rust
/// use current_properties::{PropertyCode, ResolvedProperty};
///
/// let mut resolved = ResolvedProperty::new(PropertyCode::Knack, 10);
/// resolved.add_contribution("base", 12);
/// resolved.add_contribution("afflictions", -1);
/// resolved.add_contribution("load", -1);
///
/// assert_eq!(resolved.contributions.len(), 3);
/// assert_eq!(resolved.contribution_sum(), resolved.value);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedProperty {
    pub code: PropertyCode,

    /// Set only for senses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sense_variant: Option<SenseVariant>,

    pub value: i32,

    /// Contributions in the order they were applied.
    pub contributions: Vec<(String, i32)>,
}

impl ResolvedProperty {
    pub fn new(code: PropertyCode, value: i32) -> Self {
        Self {
            code,
            sense_variant: None,
            value,
            contributions: Vec::new(),
        }
    }

    pub fn add_contribution(&mut self, description: impl Into<String>, amount: i32) {
        self.contributions.push((description.into(), amount));
    }

    #[must_use]
    pub fn with_contribution(mut self, description: impl Into<String>, amount: i32) -> Self {
        self.add_contribution(description, amount);
        self
    }

    /// Sum of all contribution amounts.
    pub fn contribution_sum(&self) -> i32 {
        self.contributions
            .iter()
            .fold(0, |sum, (_, amount)| sum.saturating_add(*amount))
    }
}

/// Every current value of one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySummary {
    pub body_strength: Strength,
    pub strength_without_load_malus: Strength,
    pub strength: Strength,
    pub strength_of_offhand: Strength,
    pub agility: Agility,
    pub knack: Knack,
    pub will: Will,
    pub intelligence: Intelligence,
    pub charisma: Charisma,
    pub size: Size,
    pub height: Height,
    pub height_in_cm: HeightInCm,
    pub weight_in_kg: BodyWeightInKg,
    pub age: Age,
    pub toughness: Toughness,
    pub endurance: Endurance,
    pub wound_boundary: WoundBoundary,
    pub fatigue_boundary: FatigueBoundary,
    pub speed: Speed,
    pub beauty: Beauty,
    pub dangerousness: Dangerousness,
    pub dignity: Dignity,
    /// Senses keyed by variant name (`without_remarkable_sense`, `hearing`, ...).
    pub senses: BTreeMap<String, Senses>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::RemarkableSenseCode;

    #[test]
    fn test_resolved_property_creation() {
        let resolved = ResolvedProperty::new(PropertyCode::Strength, 7);
        assert_eq!(resolved.code, PropertyCode::Strength);
        assert_eq!(resolved.value, 7);
        assert!(resolved.contributions.is_empty());
        assert!(resolved.sense_variant.is_none());
    }

    #[test]
    fn test_contributions_keep_order() {
        let resolved = ResolvedProperty::new(PropertyCode::Strength, 7)
            .with_contribution("base", 10)
            .with_contribution("afflictions", -1)
            .with_contribution("load", -2);

        assert_eq!(resolved.contributions[0].0, "base");
        assert_eq!(resolved.contributions[2], ("load".to_string(), -2));
        assert_eq!(resolved.contribution_sum(), 7);
    }

    #[test]
    fn test_serialized_shape() {
        let mut resolved = ResolvedProperty::new(PropertyCode::Senses, 9);
        resolved.sense_variant = Some(SenseVariant::Remarkable(RemarkableSenseCode::Smell));
        resolved.add_contribution("unmodified senses", 8);
        resolved.add_contribution("remarkable sense", 1);

        let json = serde_json::to_value(&resolved).unwrap();
        assert_eq!(json["code"], "senses");
        assert_eq!(json["sense_variant"]["remarkable"], "smell");
        assert_eq!(json["value"], 9);

        let plain = serde_json::to_value(ResolvedProperty::new(PropertyCode::Will, 3)).unwrap();
        assert!(plain.get("sense_variant").is_none());
    }
}
