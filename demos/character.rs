//! Character Example
//!
//! Builds snapshots of one dwarf in three situations:
//! - unarmored with a light pack
//! - in chainmail with a heavy pack
//! - in full plate, which the loaded dwarf can't wear
//!
//! Run with `RUST_LOG=current_properties=trace` to see every resolution.

use current_properties::codes::{
    ArmamentCode, BodyArmorCode, HelmCode, RaceCode, RemarkableSenseCode, SenseCode, SubraceCode,
};
use current_properties::collaborators::{
    Armourer, BaseProperties, HealthState, LoadMaluses, RaceDescriptor, RacesTable,
};
use current_properties::*;
use tracing_subscriber::EnvFilter;

struct Levels;

impl BaseProperties for Levels {
    fn strength(&self) -> Strength {
        Strength::new(4)
    }
    fn agility(&self) -> Agility {
        Agility::new(1)
    }
    fn knack(&self) -> Knack {
        Knack::new(2)
    }
    fn will(&self) -> Will {
        Will::new(3)
    }
    fn intelligence(&self) -> Intelligence {
        Intelligence::new(0)
    }
    fn charisma(&self) -> Charisma {
        Charisma::new(-1)
    }
    fn size(&self) -> Size {
        Size::new(1)
    }
    fn height(&self) -> Height {
        Height::new(2)
    }
    fn height_in_cm(&self) -> HeightInCm {
        HeightInCm::new(135.0)
    }
    fn weight_in_kg(&self) -> BodyWeightInKg {
        BodyWeightInKg::new(70.0)
    }
    fn age(&self) -> Age {
        Age::new(60)
    }
    fn toughness(&self) -> Toughness {
        Toughness::new(2)
    }
    fn endurance(&self) -> Endurance {
        Endurance::new(4)
    }
    fn wound_boundary(&self) -> WoundBoundary {
        WoundBoundary::new(12)
    }
    fn fatigue_boundary(&self) -> FatigueBoundary {
        FatigueBoundary::new(14)
    }
}

/// A cold, nothing worse.
struct Health;

impl HealthState for Health {
    fn strength_malus_from_afflictions(&self) -> i32 {
        0
    }
    fn agility_malus_from_afflictions(&self) -> i32 {
        0
    }
    fn knack_malus_from_afflictions(&self) -> i32 {
        -1
    }
    fn will_malus_from_afflictions(&self) -> i32 {
        0
    }
    fn intelligence_malus_from_afflictions(&self) -> i32 {
        0
    }
    fn charisma_malus_from_afflictions(&self) -> i32 {
        -1
    }
    fn significant_malus_from_pains(&self, _wound_boundary: WoundBoundary) -> Result<i32, BoxError> {
        Ok(0)
    }
}

struct Dwarf;

impl RaceDescriptor for Dwarf {
    fn race_code(&self) -> RaceCode {
        RaceCode::Dwarf
    }
    fn subrace_code(&self) -> SubraceCode {
        SubraceCode::Mountain
    }
}

struct Races;

impl RacesTable for Races {
    fn senses(&self, race: RaceCode, _subrace: SubraceCode) -> Result<i32, BoxError> {
        match race {
            RaceCode::Elf => Ok(1),
            RaceCode::Dwarf | RaceCode::Orc => Ok(-1),
            _ => Ok(0),
        }
    }

    fn remarkable_sense(
        &self,
        race: RaceCode,
        _subrace: SubraceCode,
    ) -> Result<Option<SenseCode>, BoxError> {
        Ok(match race {
            RaceCode::Dwarf => Some(SenseCode::Touch),
            RaceCode::Elf => Some(SenseCode::Sight),
            RaceCode::Orc => Some(SenseCode::Smell),
            _ => Some(SenseCode::Hearing),
        })
    }
}

/// -1 per started 10 kg over twice the strength.
struct Load;

impl LoadMaluses for Load {
    fn malus_from_load(&self, strength: Strength, cargo: &Weight) -> i32 {
        let over = cargo.value() - f64::from(strength.value()) * 2.0;
        if over <= 0.0 {
            0
        } else {
            -((over / 10.0).ceil() as i32)
        }
    }
}

struct Smithy;

impl Armourer for Smithy {
    fn can_use_armament(&self, armament: ArmamentCode, strength: Strength, size: Size) -> bool {
        strength.value() + size.value() >= required_strength(armament)
    }

    fn agility_malus_by_strength_with_armor(
        &self,
        armament: ArmamentCode,
        strength: Strength,
        size: Size,
    ) -> i32 {
        let missing = required_strength(armament) - strength.value() - size.value();
        -missing.max(0)
    }
}

fn required_strength(armament: ArmamentCode) -> i32 {
    match armament {
        ArmamentCode::BodyArmor(BodyArmorCode::WithoutArmor) => 0,
        ArmamentCode::BodyArmor(BodyArmorCode::ChainmailArmor) => 4,
        ArmamentCode::BodyArmor(BodyArmorCode::FullPlateArmor) => 9,
        ArmamentCode::BodyArmor(_) => 3,
        ArmamentCode::Helm(HelmCode::WithoutHelm) => 0,
        ArmamentCode::Helm(_) => 2,
    }
}

fn print_snapshot(title: &str, properties: &CurrentProperties<'_>) -> Result<(), PropertyError> {
    println!("=== {} ===", title);
    for code in [
        PropertyCode::Strength,
        PropertyCode::StrengthOfOffhand,
        PropertyCode::Agility,
        PropertyCode::Knack,
        PropertyCode::Speed,
        PropertyCode::Beauty,
        PropertyCode::Dangerousness,
        PropertyCode::Dignity,
    ] {
        let resolved = properties.resolve(code)?;
        println!("{:<20} {:>3}  {:?}", code, resolved.value, resolved.contributions);
    }
    println!(
        "{:<20} {:>3}  (touch: {})",
        PropertyCode::Senses,
        properties.senses(None)?,
        properties.senses(Some(RemarkableSenseCode::Touch))?
    );
    println!();
    Ok(())
}

fn main() -> Result<(), PropertyError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let (levels, health, dwarf, races, load, armourer) =
        (Levels, Health, Dwarf, Races, Load, Smithy);
    let collaborators = Collaborators {
        properties_by_levels: &levels,
        health: &health,
        race: &dwarf,
        races_table: &races,
        load_maluses: &load,
        armourer: &armourer,
    };

    let travelling = CurrentProperties::new(
        collaborators,
        Equipment::new(
            BodyArmorCode::WithoutArmor,
            HelmCode::WithoutHelm,
            Weight::new(5.0),
        ),
    )?;
    print_snapshot("Travelling", &travelling)?;

    let marching = CurrentProperties::new(
        collaborators,
        Equipment::new(
            BodyArmorCode::ChainmailArmor,
            HelmCode::ConicalHelm,
            Weight::new(12.0),
        ),
    )?;
    marching.warm_up()?;
    print_snapshot("Marching", &marching)?;

    match CurrentProperties::new(
        collaborators,
        Equipment::new(
            BodyArmorCode::FullPlateArmor,
            HelmCode::GreatHelm,
            Weight::new(25.0),
        ),
    ) {
        Ok(_) => println!("Full plate fits"),
        Err(err) => println!("Full plate rejected: {}", err),
    }

    Ok(())
}
