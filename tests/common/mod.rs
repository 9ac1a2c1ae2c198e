//! Counting fakes of every collaborator, shared by the integration tests.

#![allow(dead_code)]

use current_properties::codes::{ArmamentCode, RaceCode, SenseCode, SubraceCode};
use current_properties::collaborators::{
    Armourer, BaseProperties, HealthState, LoadMaluses, RaceDescriptor, RacesTable,
};
use current_properties::*;
use std::cell::RefCell;
use std::collections::HashMap;

/// Call counter keyed by method name.
#[derive(Debug, Default)]
pub struct Calls(RefCell<HashMap<&'static str, u32>>);

impl Calls {
    pub fn hit(&self, name: &'static str) {
        *self.0.borrow_mut().entry(name).or_insert(0) += 1;
    }

    pub fn count(&self, name: &'static str) -> u32 {
        self.0.borrow().get(name).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.0.borrow().values().sum()
    }
}

/// Level-based properties. Values can be changed after a snapshot was
/// built, to check that the snapshot does not follow them.
pub struct Levels {
    values: RefCell<HashMap<PropertyCode, i32>>,
    pub height_in_cm: f64,
    pub weight_in_kg: f64,
}

impl Levels {
    pub fn set(&self, code: PropertyCode, value: i32) {
        self.values.borrow_mut().insert(code, value);
    }

    fn get(&self, code: PropertyCode) -> i32 {
        self.values.borrow().get(&code).copied().unwrap_or(0)
    }
}

impl Default for Levels {
    fn default() -> Self {
        let values = HashMap::from([
            (PropertyCode::Strength, 10),
            (PropertyCode::Agility, 8),
            (PropertyCode::Knack, 12),
            (PropertyCode::Will, 6),
            (PropertyCode::Intelligence, 4),
            (PropertyCode::Charisma, 3),
            (PropertyCode::Size, 3),
            (PropertyCode::Height, 4),
            (PropertyCode::Age, 25),
            (PropertyCode::Toughness, 1),
            (PropertyCode::Endurance, 7),
            (PropertyCode::WoundBoundary, 11),
            (PropertyCode::FatigueBoundary, 17),
        ]);
        Self {
            values: RefCell::new(values),
            height_in_cm: 180.0,
            weight_in_kg: 80.0,
        }
    }
}

impl BaseProperties for Levels {
    fn strength(&self) -> Strength {
        Strength::new(self.get(PropertyCode::Strength))
    }
    fn agility(&self) -> Agility {
        Agility::new(self.get(PropertyCode::Agility))
    }
    fn knack(&self) -> Knack {
        Knack::new(self.get(PropertyCode::Knack))
    }
    fn will(&self) -> Will {
        Will::new(self.get(PropertyCode::Will))
    }
    fn intelligence(&self) -> Intelligence {
        Intelligence::new(self.get(PropertyCode::Intelligence))
    }
    fn charisma(&self) -> Charisma {
        Charisma::new(self.get(PropertyCode::Charisma))
    }
    fn size(&self) -> Size {
        Size::new(self.get(PropertyCode::Size))
    }
    fn height(&self) -> Height {
        Height::new(self.get(PropertyCode::Height))
    }
    fn height_in_cm(&self) -> HeightInCm {
        HeightInCm::new(self.height_in_cm)
    }
    fn weight_in_kg(&self) -> BodyWeightInKg {
        BodyWeightInKg::new(self.weight_in_kg)
    }
    fn age(&self) -> Age {
        Age::new(self.get(PropertyCode::Age))
    }
    fn toughness(&self) -> Toughness {
        Toughness::new(self.get(PropertyCode::Toughness))
    }
    fn endurance(&self) -> Endurance {
        Endurance::new(self.get(PropertyCode::Endurance))
    }
    fn wound_boundary(&self) -> WoundBoundary {
        WoundBoundary::new(self.get(PropertyCode::WoundBoundary))
    }
    fn fatigue_boundary(&self) -> FatigueBoundary {
        FatigueBoundary::new(self.get(PropertyCode::FatigueBoundary))
    }
}

pub struct Health {
    pub strength: i32,
    pub agility: i32,
    pub knack: i32,
    pub will: i32,
    pub intelligence: i32,
    pub charisma: i32,
    pub pains: i32,
    /// When set, pains can't be evaluated yet.
    pub pains_error: Option<&'static str>,
    pub pains_asked_at: RefCell<Vec<WoundBoundary>>,
    pub calls: Calls,
}

impl Default for Health {
    fn default() -> Self {
        Self {
            strength: -1,
            agility: -1,
            knack: -1,
            will: 0,
            intelligence: -2,
            charisma: 0,
            pains: -1,
            pains_error: None,
            pains_asked_at: RefCell::new(Vec::new()),
            calls: Calls::default(),
        }
    }
}

impl HealthState for Health {
    fn strength_malus_from_afflictions(&self) -> i32 {
        self.calls.hit("strength");
        self.strength
    }
    fn agility_malus_from_afflictions(&self) -> i32 {
        self.calls.hit("agility");
        self.agility
    }
    fn knack_malus_from_afflictions(&self) -> i32 {
        self.calls.hit("knack");
        self.knack
    }
    fn will_malus_from_afflictions(&self) -> i32 {
        self.calls.hit("will");
        self.will
    }
    fn intelligence_malus_from_afflictions(&self) -> i32 {
        self.calls.hit("intelligence");
        self.intelligence
    }
    fn charisma_malus_from_afflictions(&self) -> i32 {
        self.calls.hit("charisma");
        self.charisma
    }
    fn significant_malus_from_pains(&self, wound_boundary: WoundBoundary) -> Result<i32, BoxError> {
        self.calls.hit("pains");
        self.pains_asked_at.borrow_mut().push(wound_boundary);
        match self.pains_error {
            Some(message) => Err(message.into()),
            None => Ok(self.pains),
        }
    }
}

pub struct Race {
    pub race: RaceCode,
    pub subrace: SubraceCode,
}

impl Default for Race {
    fn default() -> Self {
        Self {
            race: RaceCode::Elf,
            subrace: SubraceCode::Common,
        }
    }
}

impl RaceDescriptor for Race {
    fn race_code(&self) -> RaceCode {
        self.race
    }
    fn subrace_code(&self) -> SubraceCode {
        self.subrace
    }
}

pub struct Races {
    pub senses: HashMap<RaceCode, i32>,
    pub remarkable_senses: HashMap<RaceCode, SenseCode>,
    pub broken: bool,
    pub calls: Calls,
}

impl Default for Races {
    fn default() -> Self {
        Self {
            senses: HashMap::from([
                (RaceCode::Human, 0),
                (RaceCode::Elf, 1),
                (RaceCode::Dwarf, -1),
            ]),
            remarkable_senses: HashMap::from([
                (RaceCode::Human, SenseCode::Hearing),
                (RaceCode::Elf, SenseCode::Sight),
                (RaceCode::Dwarf, SenseCode::Touch),
            ]),
            broken: false,
            calls: Calls::default(),
        }
    }
}

impl RacesTable for Races {
    fn senses(&self, race: RaceCode, subrace: SubraceCode) -> Result<i32, BoxError> {
        self.calls.hit("senses");
        if self.broken {
            return Err(format!("unknown race {} {}", race, subrace).into());
        }
        Ok(self.senses.get(&race).copied().unwrap_or(0))
    }

    fn remarkable_sense(
        &self,
        race: RaceCode,
        _subrace: SubraceCode,
    ) -> Result<Option<SenseCode>, BoxError> {
        self.calls.hit("remarkable_sense");
        Ok(self.remarkable_senses.get(&race).copied())
    }
}

/// Load table returning the same malus whatever the cargo, remembering
/// which strengths it was asked about.
pub struct LoadTable {
    pub malus: i32,
    pub asked_with: RefCell<Vec<Strength>>,
}

impl LoadTable {
    pub fn constant(malus: i32) -> Self {
        Self {
            malus,
            asked_with: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.asked_with.borrow().len()
    }
}

impl LoadMaluses for LoadTable {
    fn malus_from_load(&self, strength_without_load_malus: Strength, _cargo: &Weight) -> i32 {
        self.asked_with.borrow_mut().push(strength_without_load_malus);
        self.malus
    }
}

/// Armourer with a required strength and an agility malus per armament.
/// Armaments without an entry need no strength and cost no agility.
pub struct Smithy {
    pub required_strength: HashMap<ArmamentCode, i32>,
    pub agility_malus: HashMap<ArmamentCode, i32>,
    pub calls: Calls,
}

impl Default for Smithy {
    fn default() -> Self {
        use current_properties::codes::{BodyArmorCode, HelmCode};

        Self {
            required_strength: HashMap::from([
                (BodyArmorCode::ChainmailArmor.into(), 7),
                (BodyArmorCode::FullPlateArmor.into(), 12),
                (HelmCode::ConicalHelm.into(), 5),
                (HelmCode::GreatHelm.into(), 8),
            ]),
            agility_malus: HashMap::from([
                (BodyArmorCode::ChainmailArmor.into(), -1),
                (HelmCode::ConicalHelm.into(), -1),
            ]),
            calls: Calls::default(),
        }
    }
}

impl Armourer for Smithy {
    fn can_use_armament(&self, armament: ArmamentCode, strength: Strength, _size: Size) -> bool {
        self.calls.hit("can_use_armament");
        strength.value() >= self.required_strength.get(&armament).copied().unwrap_or(0)
    }

    fn agility_malus_by_strength_with_armor(
        &self,
        armament: ArmamentCode,
        _strength: Strength,
        _size: Size,
    ) -> i32 {
        self.calls.hit("agility_malus");
        self.agility_malus.get(&armament).copied().unwrap_or(0)
    }
}

/// Every collaborator of a snapshot, owned in one place.
pub struct World {
    pub levels: Levels,
    pub health: Health,
    pub race: Race,
    pub races: Races,
    pub load: LoadTable,
    pub smithy: Smithy,
}

impl Default for World {
    fn default() -> Self {
        Self {
            levels: Levels::default(),
            health: Health::default(),
            race: Race::default(),
            races: Races::default(),
            load: LoadTable::constant(-2),
            smithy: Smithy::default(),
        }
    }
}

impl World {
    pub fn collaborators(&self) -> Collaborators<'_> {
        Collaborators {
            properties_by_levels: &self.levels,
            health: &self.health,
            race: &self.race,
            races_table: &self.races,
            load_maluses: &self.load,
            armourer: &self.smithy,
        }
    }

    pub fn snapshot(&self, equipment: Equipment) -> Result<CurrentProperties<'_>, PropertyError> {
        CurrentProperties::new(self.collaborators(), equipment)
    }

    pub fn unequipped(&self) -> CurrentProperties<'_> {
        self.snapshot(Equipment::default()).unwrap()
    }
}
