//! Formulas of the compound derived properties.
//!
//! All functions are pure. Rounding is half away from zero throughout,
//! matching how the rule tables round.

use crate::property::{
    Agility, Beauty, Charisma, Dangerousness, Dignity, Height, Intelligence, Knack, Senses, Speed,
    Strength, Will,
};

/// Round half away from zero.
fn round(value: f64) -> i32 {
    value.round() as i32
}

/// Rounded arithmetic mean of two values.
///
/// # Examples
///
/// ```rust
/// use current_properties::formulas::average;
///
/// assert_eq!(average(3, 4), 4);
/// assert_eq!(average(-3, -4), -4);
/// ```
pub fn average(first: i32, second: i32) -> i32 {
    round((f64::from(first) + f64::from(second)) / 2.0)
}

/// Rounded half of a value.
pub fn half(value: i32) -> i32 {
    round(f64::from(value) / 2.0)
}

/// Speed bonus granted by height.
pub fn speed_bonus_from_height(height: Height) -> i32 {
    (f64::from(height.value()) / 3.0).ceil() as i32 - 2
}

/// `average(strength, agility) + speed_bonus_from_height(height)`.
pub fn speed(strength: Strength, agility: Agility, height: Height) -> Speed {
    Speed::new(average(strength.value(), agility.value())).add(speed_bonus_from_height(height))
}

/// `average(agility, knack) + half(charisma)`.
pub fn beauty(agility: Agility, knack: Knack, charisma: Charisma) -> Beauty {
    Beauty::new(average(agility.value(), knack.value())).add(half(charisma.value()))
}

/// `average(strength, will) + half(charisma)`.
pub fn dangerousness(strength: Strength, will: Will, charisma: Charisma) -> Dangerousness {
    Dangerousness::new(average(strength.value(), will.value())).add(half(charisma.value()))
}

/// `average(intelligence, will) + half(charisma)`.
pub fn dignity(intelligence: Intelligence, will: Will, charisma: Charisma) -> Dignity {
    Dignity::new(average(intelligence.value(), will.value())).add(half(charisma.value()))
}

/// Senses before pains and before any remarkable sense is invoked.
pub fn senses(knack: Knack, race_senses_modifier: i32) -> Senses {
    Senses::new(knack.value()).add(race_senses_modifier)
}
