//! Property identifiers and typed property values.
//!
//! [`PropertyCode`] names every integer property the snapshot knows about
//! and is the key of its cache. Each property also has a small `Copy`
//! newtype so that a strength can never be passed where an agility is
//! expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Identifier of an integer property.
///
/// Codes serialize and display in `snake_case`.
///
/// # Examples
///
/// ```rust
/// use current_properties::PropertyCode;
/// use std::str::FromStr;
///
/// assert_eq!(PropertyCode::StrengthOfOffhand.as_ref(), "strength_of_offhand");
/// assert_eq!(PropertyCode::from_str("dignity").unwrap(), PropertyCode::Dignity);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PropertyCode {
    BodyStrength,
    StrengthWithoutLoadMalus,
    Strength,
    StrengthOfOffhand,
    Agility,
    Knack,
    Will,
    Intelligence,
    Charisma,
    Size,
    Height,
    Age,
    Toughness,
    Endurance,
    WoundBoundary,
    FatigueBoundary,
    Speed,
    Senses,
    Beauty,
    Dangerousness,
    Dignity,
}

impl PropertyCode {
    /// Whether the snapshot computes and caches this property.
    ///
    /// The rest are read straight from the level-based properties.
    pub fn is_derived(self) -> bool {
        !matches!(
            self,
            PropertyCode::BodyStrength
                | PropertyCode::Size
                | PropertyCode::Height
                | PropertyCode::Age
                | PropertyCode::Toughness
                | PropertyCode::Endurance
                | PropertyCode::WoundBoundary
                | PropertyCode::FatigueBoundary
        )
    }
}

macro_rules! integer_property {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            pub const fn new(value: i32) -> Self {
                Self(value)
            }

            pub const fn value(self) -> i32 {
                self.0
            }

            /// Apply a bonus (positive) or malus (negative), saturating at
            /// the bounds of `i32`.
            #[must_use]
            pub const fn add(self, modifier: i32) -> Self {
                Self(self.0.saturating_add(modifier))
            }

            #[must_use]
            pub const fn sub(self, amount: i32) -> Self {
                Self(self.0.saturating_sub(amount))
            }
        }

        impl From<i32> for $name {
            fn from(value: i32) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i32 {
            fn from(property: $name) -> Self {
                property.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

integer_property!(Strength);
integer_property!(Agility);
integer_property!(Knack);
integer_property!(Will);
integer_property!(Intelligence);
integer_property!(Charisma);
integer_property!(
    /// Body size; armaments are checked against it together with strength.
    Size
);
integer_property!(
    /// Height expressed as a rule bonus, not a length.
    Height
);
integer_property!(
    /// Age in years.
    Age
);
integer_property!(Toughness);
integer_property!(Endurance);
integer_property!(WoundBoundary);
integer_property!(FatigueBoundary);
integer_property!(Speed);
integer_property!(Senses);
integer_property!(Beauty);
integer_property!(Dangerousness);
integer_property!(Dignity);

macro_rules! measurement {
    ($(#[$meta:meta])* $name:ident, $unit:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(f64);

        impl $name {
            pub const fn new(value: f64) -> Self {
                Self(value)
            }

            pub const fn value(self) -> f64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{} {}", self.0, $unit)
            }
        }
    };
}

measurement!(
    /// Body height in centimetres.
    HeightInCm,
    "cm"
);
measurement!(
    /// Body weight in kilograms.
    BodyWeightInKg,
    "kg"
);
measurement!(
    /// Weight of carried cargo in kilograms.
    Weight,
    "kg"
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_property_code_names() {
        assert_eq!(PropertyCode::Strength.to_string(), "strength");
        assert_eq!(
            PropertyCode::StrengthWithoutLoadMalus.as_ref(),
            "strength_without_load_malus"
        );
        assert_eq!(
            PropertyCode::from_str("wound_boundary").unwrap(),
            PropertyCode::WoundBoundary
        );
    }

    #[test]
    fn test_derived_codes() {
        let derived: Vec<_> = PropertyCode::iter().filter(|c| c.is_derived()).collect();
        assert_eq!(derived.len(), 13);
        assert!(derived.contains(&PropertyCode::Senses));
        assert!(!derived.contains(&PropertyCode::BodyStrength));
    }

    #[test]
    fn test_modifiers() {
        let strength = Strength::new(10);
        assert_eq!(strength.add(-1), Strength::new(9));
        assert_eq!(strength.sub(2).value(), 8);
        assert_eq!(i32::from(Knack::from(4)), 4);
    }

    #[test]
    fn test_modifiers_saturate() {
        assert_eq!(Strength::new(i32::MIN + 1).add(-2), Strength::new(i32::MIN));
        assert_eq!(Strength::new(i32::MIN).sub(2), Strength::new(i32::MIN));
        assert_eq!(Senses::new(i32::MAX).add(1), Senses::new(i32::MAX));
    }

    #[test]
    fn test_measurement_display() {
        assert_eq!(Weight::new(12.5).to_string(), "12.5 kg");
        assert_eq!(HeightInCm::new(180.0).to_string(), "180 cm");
    }
}
