//! Read-only collaborators consumed by the snapshot.
//!
//! The snapshot never owns or mutates these. Implementations are expected
//! to be deterministic: the same call always returns the same answer for
//! the lifetime of a snapshot.

use crate::codes::{ArmamentCode, RaceCode, SenseCode, SubraceCode};
use crate::error::BoxError;
use crate::property::{
    Age, Agility, BodyWeightInKg, Charisma, Endurance, FatigueBoundary, Height, HeightInCm,
    Intelligence, Knack, Size, Strength, Toughness, Weight, Will, WoundBoundary,
};

/// Properties as given by the character's levels.
///
/// # Examples
///
/// ```rust
/// use current_properties::collaborators::BaseProperties;
/// use current_properties::property::*;
///
/// struct Levels;
///
/// impl BaseProperties for Levels {
///     fn strength(&self) -> Strength { Strength::new(10) }
///     fn agility(&self) -> Agility { Agility::new(8) }
///     fn knack(&self) -> Knack { Knack::new(6) }
///     fn will(&self) -> Will { Will::new(5) }
///     fn intelligence(&self) -> Intelligence { Intelligence::new(4) }
///     fn charisma(&self) -> Charisma { Charisma::new(3) }
///     fn size(&self) -> Size { Size::new(2) }
///     fn height(&self) -> Height { Height::new(3) }
///     fn height_in_cm(&self) -> HeightInCm { HeightInCm::new(180.0) }
///     fn weight_in_kg(&self) -> BodyWeightInKg { BodyWeightInKg::new(80.0) }
///     fn age(&self) -> Age { Age::new(25) }
///     fn toughness(&self) -> Toughness { Toughness::new(1) }
///     fn endurance(&self) -> Endurance { Endurance::new(7) }
///     fn wound_boundary(&self) -> WoundBoundary { WoundBoundary::new(11) }
///     fn fatigue_boundary(&self) -> FatigueBoundary { FatigueBoundary::new(17) }
/// }
///
/// assert_eq!(Levels.strength().value(), 10);
/// ```
pub trait BaseProperties {
    fn strength(&self) -> Strength;
    fn agility(&self) -> Agility;
    fn knack(&self) -> Knack;
    fn will(&self) -> Will;
    fn intelligence(&self) -> Intelligence;
    fn charisma(&self) -> Charisma;
    fn size(&self) -> Size;
    fn height(&self) -> Height;
    fn height_in_cm(&self) -> HeightInCm;
    fn weight_in_kg(&self) -> BodyWeightInKg;
    fn age(&self) -> Age;
    fn toughness(&self) -> Toughness;
    fn endurance(&self) -> Endurance;
    fn wound_boundary(&self) -> WoundBoundary;
    fn fatigue_boundary(&self) -> FatigueBoundary;
}

/// Temporary maluses caused by afflictions and pains.
///
/// Maluses are zero or negative.
pub trait HealthState {
    fn strength_malus_from_afflictions(&self) -> i32;
    fn agility_malus_from_afflictions(&self) -> i32;
    fn knack_malus_from_afflictions(&self) -> i32;
    fn will_malus_from_afflictions(&self) -> i32;
    fn intelligence_malus_from_afflictions(&self) -> i32;
    fn charisma_malus_from_afflictions(&self) -> i32;

    /// Malus from pains significant at the given wound boundary.
    ///
    /// May fail, for example when the wounded character has yet to roll
    /// against the malus from wounds.
    fn significant_malus_from_pains(&self, wound_boundary: WoundBoundary) -> Result<i32, BoxError>;
}

/// Race-specific rule data.
pub trait RacesTable {
    /// Senses modifier of the given race and subrace.
    fn senses(&self, race: RaceCode, subrace: SubraceCode) -> Result<i32, BoxError>;

    /// The innate remarkable sense of the given race and subrace, if any.
    fn remarkable_sense(
        &self,
        race: RaceCode,
        subrace: SubraceCode,
    ) -> Result<Option<SenseCode>, BoxError>;
}

/// The character's race.
pub trait RaceDescriptor {
    fn race_code(&self) -> RaceCode;
    fn subrace_code(&self) -> SubraceCode;

    /// Remarkable sense of this race, looked up in the races table.
    fn remarkable_sense(&self, tables: &dyn RacesTable) -> Result<Option<SenseCode>, BoxError> {
        tables.remarkable_sense(self.race_code(), self.subrace_code())
    }
}

/// Equipment-usability rules.
pub trait Armourer {
    /// Whether a wearer with `strength` and `size` can use `armament`.
    fn can_use_armament(&self, armament: ArmamentCode, strength: Strength, size: Size) -> bool;

    /// Agility malus caused by wearing `armament` with the given strength.
    fn agility_malus_by_strength_with_armor(
        &self,
        armament: ArmamentCode,
        strength: Strength,
        size: Size,
    ) -> i32;
}

/// Maluses from carrying cargo.
pub trait LoadMaluses {
    /// Malus for carrying `cargo` with the given strength.
    ///
    /// Always called with the strength before any load malus.
    fn malus_from_load(&self, strength_without_load_malus: Strength, cargo: &Weight) -> i32;
}
