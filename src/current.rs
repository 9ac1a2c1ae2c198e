//! The current-properties snapshot.
//!
//! [`CurrentProperties`] combines level-based properties, health maluses,
//! worn equipment and carried cargo into the values a character has right
//! now. Every derived value is computed on first access and cached for the
//! lifetime of the snapshot; a different situation needs a new snapshot.

use crate::codes::{
    sense_matches, ArmamentCode, BodyArmorCode, HelmCode, RemarkableSenseCode, SenseVariant,
};
use crate::collaborators::{
    Armourer, BaseProperties, HealthState, LoadMaluses, RaceDescriptor, RacesTable,
};
use crate::error::PropertyError;
use crate::formulas;
use crate::graph::PropertyGraph;
use crate::property::{
    Age, Agility, Beauty, BodyWeightInKg, Charisma, Dangerousness, Dignity, Endurance,
    FatigueBoundary, Height, HeightInCm, Intelligence, Knack, PropertyCode, Senses, Size, Speed,
    Strength, Toughness, Weight, Will, WoundBoundary,
};
use crate::resolved::{PropertySummary, ResolvedProperty};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use strum::IntoEnumIterator;
use tracing::{debug, trace, warn};

/// Offhand strength is always this much lower than main-hand strength.
const OFFHAND_STRENGTH_MALUS: i32 = 2;

/// Bonus to senses when the invoked remarkable sense is the race's own.
const REMARKABLE_SENSE_BONUS: i32 = 1;

/// The read-only collaborators a snapshot is built from.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub properties_by_levels: &'a dyn BaseProperties,
    pub health: &'a dyn HealthState,
    pub race: &'a dyn RaceDescriptor,
    pub races_table: &'a dyn RacesTable,
    pub load_maluses: &'a dyn LoadMaluses,
    pub armourer: &'a dyn Armourer,
}

/// What the character wears and carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub body_armor: BodyArmorCode,
    pub helm: HelmCode,
    pub cargo_weight: Weight,
}

impl Equipment {
    /// Equipment from its three parts.
    pub fn new(body_armor: BodyArmorCode, helm: HelmCode, cargo_weight: Weight) -> Self {
        Self {
            body_armor,
            helm,
            cargo_weight,
        }
    }
}

/// Situational properties of a character, as of construction.
///
/// Construction fails if the worn body armor or helm is too heavy for the
/// current strength. Once built, accessors may be called in any order;
/// each derived value is computed at most once. The cache is not
/// synchronized, so a snapshot stays on the thread that uses it.
///
/// The load malus is always derived from the strength *before* load
/// (`strength_without_malus_from_load`) and applied separately to strength,
/// agility and knack. It never compounds through the already loaded
/// strength.
pub struct CurrentProperties<'a> {
    collaborators: Collaborators<'a>,
    equipment: Equipment,

    /// Resolved derived properties, keyed by code.
    cache: RefCell<HashMap<PropertyCode, ResolvedProperty>>,

    /// Resolved senses, keyed by the invoked remarkable sense.
    senses: RefCell<HashMap<SenseVariant, ResolvedProperty>>,
}

impl<'a> CurrentProperties<'a> {
    /// Build a snapshot for the given situation.
    ///
    /// Strength is resolved immediately and both worn armaments are checked
    /// against it and the body size, the body armor first.
    ///
    /// # Errors
    ///
    /// `PropertyError::ArmamentUnwearable` naming the first armament the
    /// armourer rejects.
    pub fn new(
        collaborators: Collaborators<'a>,
        equipment: Equipment,
    ) -> Result<Self, PropertyError> {
        let properties = Self {
            collaborators,
            equipment,
            cache: RefCell::new(HashMap::new()),
            senses: RefCell::new(HashMap::new()),
        };

        let strength = properties.strength();
        let size = properties.size();
        properties.guard_armament_wearable(equipment.body_armor.into(), strength, size)?;
        properties.guard_armament_wearable(equipment.helm.into(), strength, size)?;

        debug!(
            body_armor = %equipment.body_armor,
            helm = %equipment.helm,
            cargo = %equipment.cargo_weight,
            strength = strength.value(),
            "current properties created"
        );

        Ok(properties)
    }

    fn guard_armament_wearable(
        &self,
        armament: ArmamentCode,
        strength: Strength,
        size: Size,
    ) -> Result<(), PropertyError> {
        if self
            .collaborators
            .armourer
            .can_use_armament(armament, strength, size)
        {
            return Ok(());
        }
        warn!(
            %armament,
            size = size.value(),
            strength = strength.value(),
            "armament is too heavy to be worn"
        );
        Err(PropertyError::ArmamentUnwearable {
            armament,
            size,
            strength,
        })
    }

    /// Return the cached value of `code`, computing and caching it first if
    /// needed. `compute` may itself read other cached properties.
    fn cached(&self, code: PropertyCode, compute: impl FnOnce() -> ResolvedProperty) -> i32 {
        if let Some(resolved) = self.cache.borrow().get(&code) {
            return resolved.value;
        }

        let resolved = compute();
        let value = resolved.value;
        trace!(property = %code, value, "property resolved");
        self.cache.borrow_mut().entry(code).or_insert(resolved);
        value
    }

    fn malus_from_load(&self) -> i32 {
        self.collaborators.load_maluses.malus_from_load(
            self.strength_without_malus_from_load(),
            &self.equipment.cargo_weight,
        )
    }

    // ------------------------------------------------------------------
    // Strength
    // ------------------------------------------------------------------

    /// Strength affected by afflictions but not yet by load.
    pub fn strength_without_malus_from_load(&self) -> Strength {
        Strength::new(self.cached(PropertyCode::StrengthWithoutLoadMalus, || {
            let base = self.collaborators.properties_by_levels.strength();
            let afflictions = self.collaborators.health.strength_malus_from_afflictions();
            ResolvedProperty::new(
                PropertyCode::StrengthWithoutLoadMalus,
                base.add(afflictions).value(),
            )
            .with_contribution("base", base.value())
            .with_contribution("afflictions", afflictions)
        }))
    }

    /// Current strength, affected by afflictions and by load.
    ///
    /// This is not the constitutional strength used for body properties;
    /// see [`body_strength`](Self::body_strength).
    pub fn strength(&self) -> Strength {
        Strength::new(self.cached(PropertyCode::Strength, || {
            let unloaded = self.strength_without_malus_from_load();
            let load = self.malus_from_load();
            ResolvedProperty::new(PropertyCode::Strength, unloaded.add(load).value())
                .with_contribution("strength without load malus", unloaded.value())
                .with_contribution("load", load)
        }))
    }

    /// Strength given by levels only, untouched by afflictions or load.
    pub fn body_strength(&self) -> Strength {
        self.collaborators.properties_by_levels.strength()
    }

    /// Main-hand strength; the same as [`strength`](Self::strength).
    pub fn strength_of_main_hand(&self) -> Strength {
        self.strength()
    }

    /// Main-hand strength lowered by 2.
    pub fn strength_of_offhand(&self) -> Strength {
        Strength::new(self.cached(PropertyCode::StrengthOfOffhand, || {
            let strength = self.strength();
            ResolvedProperty::new(
                PropertyCode::StrengthOfOffhand,
                strength.sub(OFFHAND_STRENGTH_MALUS).value(),
            )
            .with_contribution("strength", strength.value())
            .with_contribution("offhand", -OFFHAND_STRENGTH_MALUS)
        }))
    }

    // ------------------------------------------------------------------
    // Secondary properties
    // ------------------------------------------------------------------

    /// Agility lowered by the worn body armor and helm, afflictions and load.
    ///
    /// Armor maluses are judged against the current strength and size.
    pub fn agility(&self) -> Agility {
        Agility::new(self.cached(PropertyCode::Agility, || {
            let armourer = self.collaborators.armourer;
            let strength = self.strength();
            let size = self.size();

            let base = self.collaborators.properties_by_levels.agility();
            let body_armor = armourer.agility_malus_by_strength_with_armor(
                self.equipment.body_armor.into(),
                strength,
                size,
            );
            let helm = armourer.agility_malus_by_strength_with_armor(
                self.equipment.helm.into(),
                strength,
                size,
            );
            let afflictions = self.collaborators.health.agility_malus_from_afflictions();
            let load = self.malus_from_load();

            let agility = base.add(body_armor).add(helm).add(afflictions).add(load);
            ResolvedProperty::new(PropertyCode::Agility, agility.value())
                .with_contribution("base", base.value())
                .with_contribution(format!("body armor {}", self.equipment.body_armor), body_armor)
                .with_contribution(format!("helm {}", self.equipment.helm), helm)
                .with_contribution("afflictions", afflictions)
                .with_contribution("load", load)
        }))
    }

    /// Knack lowered by afflictions and load.
    pub fn knack(&self) -> Knack {
        Knack::new(self.cached(PropertyCode::Knack, || {
            let base = self.collaborators.properties_by_levels.knack();
            let afflictions = self.collaborators.health.knack_malus_from_afflictions();
            let load = self.malus_from_load();
            ResolvedProperty::new(PropertyCode::Knack, base.add(afflictions).add(load).value())
                .with_contribution("base", base.value())
                .with_contribution("afflictions", afflictions)
                .with_contribution("load", load)
        }))
    }

    /// Will lowered by afflictions.
    pub fn will(&self) -> Will {
        Will::new(self.cached(PropertyCode::Will, || {
            let base = self.collaborators.properties_by_levels.will();
            let afflictions = self.collaborators.health.will_malus_from_afflictions();
            ResolvedProperty::new(PropertyCode::Will, base.add(afflictions).value())
                .with_contribution("base", base.value())
                .with_contribution("afflictions", afflictions)
        }))
    }

    /// Intelligence lowered by afflictions.
    pub fn intelligence(&self) -> Intelligence {
        Intelligence::new(self.cached(PropertyCode::Intelligence, || {
            let base = self.collaborators.properties_by_levels.intelligence();
            let afflictions = self
                .collaborators
                .health
                .intelligence_malus_from_afflictions();
            ResolvedProperty::new(PropertyCode::Intelligence, base.add(afflictions).value())
                .with_contribution("base", base.value())
                .with_contribution("afflictions", afflictions)
        }))
    }

    /// Charisma lowered by afflictions.
    pub fn charisma(&self) -> Charisma {
        Charisma::new(self.cached(PropertyCode::Charisma, || {
            let base = self.collaborators.properties_by_levels.charisma();
            let afflictions = self.collaborators.health.charisma_malus_from_afflictions();
            ResolvedProperty::new(PropertyCode::Charisma, base.add(afflictions).value())
                .with_contribution("base", base.value())
                .with_contribution("afflictions", afflictions)
        }))
    }

    // ------------------------------------------------------------------
    // Compound properties
    // ------------------------------------------------------------------

    /// `average(strength, agility) + ceil(height / 3) - 2`.
    pub fn speed(&self) -> Speed {
        Speed::new(self.cached(PropertyCode::Speed, || {
            let (strength, agility, height) = (self.strength(), self.agility(), self.height());
            ResolvedProperty::new(
                PropertyCode::Speed,
                formulas::speed(strength, agility, height).value(),
            )
            .with_contribution("strength", strength.value())
            .with_contribution("agility", agility.value())
            .with_contribution("height", height.value())
        }))
    }

    /// `average(agility, knack) + half(charisma)`.
    pub fn beauty(&self) -> Beauty {
        Beauty::new(self.cached(PropertyCode::Beauty, || {
            let (agility, knack, charisma) = (self.agility(), self.knack(), self.charisma());
            ResolvedProperty::new(
                PropertyCode::Beauty,
                formulas::beauty(agility, knack, charisma).value(),
            )
            .with_contribution("agility", agility.value())
            .with_contribution("knack", knack.value())
            .with_contribution("charisma", charisma.value())
        }))
    }

    /// `average(strength, will) + half(charisma)`.
    pub fn dangerousness(&self) -> Dangerousness {
        Dangerousness::new(self.cached(PropertyCode::Dangerousness, || {
            let (strength, will, charisma) = (self.strength(), self.will(), self.charisma());
            ResolvedProperty::new(
                PropertyCode::Dangerousness,
                formulas::dangerousness(strength, will, charisma).value(),
            )
            .with_contribution("strength", strength.value())
            .with_contribution("will", will.value())
            .with_contribution("charisma", charisma.value())
        }))
    }

    /// `average(intelligence, will) + half(charisma)`.
    pub fn dignity(&self) -> Dignity {
        Dignity::new(self.cached(PropertyCode::Dignity, || {
            let (intelligence, will, charisma) =
                (self.intelligence(), self.will(), self.charisma());
            ResolvedProperty::new(
                PropertyCode::Dignity,
                formulas::dignity(intelligence, will, charisma).value(),
            )
            .with_contribution("intelligence", intelligence.value())
            .with_contribution("will", will.value())
            .with_contribution("charisma", charisma.value())
        }))
    }

    // ------------------------------------------------------------------
    // Senses
    // ------------------------------------------------------------------

    /// Senses, optionally relying on a remarkable sense.
    ///
    /// Invoking the race's own remarkable sense adds +1; invoking any other
    /// sense gives the same value as invoking none.
    ///
    /// # Errors
    ///
    /// Any error of the races table, the race or the health state, as is.
    pub fn senses(
        &self,
        used_remarkable_sense: Option<RemarkableSenseCode>,
    ) -> Result<Senses, PropertyError> {
        self.resolve_senses(used_remarkable_sense.into())
            .map(|resolved| Senses::new(resolved.value))
    }

    /// Senses of one variant, with breakdown.
    pub fn resolve_senses(&self, variant: SenseVariant) -> Result<ResolvedProperty, PropertyError> {
        if let Some(resolved) = self.senses.borrow().get(&variant) {
            return Ok(resolved.clone());
        }

        let unmodified = self.unmodified_senses()?;
        let SenseVariant::Remarkable(requested) = variant else {
            return Ok(unmodified);
        };

        let race_sense = self
            .collaborators
            .race
            .remarkable_sense(self.collaborators.races_table)?;
        let bonus = match race_sense {
            Some(race_sense) if sense_matches(requested, race_sense) => REMARKABLE_SENSE_BONUS,
            _ => 0,
        };

        let senses = Senses::new(unmodified.value).add(bonus);
        let mut resolved = ResolvedProperty::new(PropertyCode::Senses, senses.value())
            .with_contribution("unmodified senses", unmodified.value);
        if bonus != 0 {
            resolved.add_contribution(format!("remarkable sense {}", requested), bonus);
        }
        resolved.sense_variant = Some(variant);

        trace!(%variant, value = resolved.value, "senses resolved");
        self.senses
            .borrow_mut()
            .entry(variant)
            .or_insert_with(|| resolved.clone());
        Ok(resolved)
    }

    /// Senses with no remarkable sense invoked; the base of every variant.
    fn unmodified_senses(&self) -> Result<ResolvedProperty, PropertyError> {
        let variant = SenseVariant::WithoutRemarkableSense;
        if let Some(resolved) = self.senses.borrow().get(&variant) {
            return Ok(resolved.clone());
        }

        let knack = self.knack();
        let race = self.collaborators.race;
        let race_modifier = self
            .collaborators
            .races_table
            .senses(race.race_code(), race.subrace_code())?;
        let pains = self
            .collaborators
            .health
            .significant_malus_from_pains(self.wound_boundary())?;

        let senses = formulas::senses(knack, race_modifier).add(pains);
        let mut resolved = ResolvedProperty::new(PropertyCode::Senses, senses.value())
            .with_contribution("knack", knack.value())
            .with_contribution(
                format!("race {} {}", race.race_code(), race.subrace_code()),
                race_modifier,
            )
            .with_contribution("pains", pains);
        resolved.sense_variant = Some(variant);

        trace!(%variant, value = resolved.value, "senses resolved");
        self.senses
            .borrow_mut()
            .entry(variant)
            .or_insert_with(|| resolved.clone());
        Ok(resolved)
    }

    // ------------------------------------------------------------------
    // Pass-through properties
    // ------------------------------------------------------------------

    /// Body size from levels.
    pub fn size(&self) -> Size {
        self.collaborators.properties_by_levels.size()
    }

    /// Height as a rule bonus, used by speed.
    pub fn height(&self) -> Height {
        self.collaborators.properties_by_levels.height()
    }

    /// Body height from levels.
    pub fn height_in_cm(&self) -> HeightInCm {
        self.collaborators.properties_by_levels.height_in_cm()
    }

    /// Body weight from levels.
    pub fn weight_in_kg(&self) -> BodyWeightInKg {
        self.collaborators.properties_by_levels.weight_in_kg()
    }

    /// Age from levels.
    pub fn age(&self) -> Age {
        self.collaborators.properties_by_levels.age()
    }

    /// Toughness from levels.
    pub fn toughness(&self) -> Toughness {
        self.collaborators.properties_by_levels.toughness()
    }

    /// Endurance from levels.
    pub fn endurance(&self) -> Endurance {
        self.collaborators.properties_by_levels.endurance()
    }

    /// Not affected by temporary maluses, so always the level value.
    pub fn wound_boundary(&self) -> WoundBoundary {
        self.collaborators.properties_by_levels.wound_boundary()
    }

    /// Not affected by temporary maluses, so always the level value.
    pub fn fatigue_boundary(&self) -> FatigueBoundary {
        self.collaborators.properties_by_levels.fatigue_boundary()
    }

    // ------------------------------------------------------------------
    // Equipment
    // ------------------------------------------------------------------

    /// Body armor the snapshot was built with.
    pub fn worn_body_armor(&self) -> BodyArmorCode {
        self.equipment.body_armor
    }

    /// Helm the snapshot was built with.
    pub fn worn_helm(&self) -> HelmCode {
        self.equipment.helm
    }

    /// Weight of the carried cargo.
    pub fn cargo_weight(&self) -> Weight {
        self.equipment.cargo_weight
    }

    // ------------------------------------------------------------------
    // Access by code
    // ------------------------------------------------------------------

    /// Value of any property by code. Senses are the unmodified variant.
    ///
    /// Goes through the same cache as the typed accessors.
    pub fn value_of(&self, code: PropertyCode) -> Result<i32, PropertyError> {
        let value = match code {
            PropertyCode::BodyStrength => self.body_strength().value(),
            PropertyCode::StrengthWithoutLoadMalus => {
                self.strength_without_malus_from_load().value()
            }
            PropertyCode::Strength => self.strength().value(),
            PropertyCode::StrengthOfOffhand => self.strength_of_offhand().value(),
            PropertyCode::Agility => self.agility().value(),
            PropertyCode::Knack => self.knack().value(),
            PropertyCode::Will => self.will().value(),
            PropertyCode::Intelligence => self.intelligence().value(),
            PropertyCode::Charisma => self.charisma().value(),
            PropertyCode::Size => self.size().value(),
            PropertyCode::Height => self.height().value(),
            PropertyCode::Age => self.age().value(),
            PropertyCode::Toughness => self.toughness().value(),
            PropertyCode::Endurance => self.endurance().value(),
            PropertyCode::WoundBoundary => self.wound_boundary().value(),
            PropertyCode::FatigueBoundary => self.fatigue_boundary().value(),
            PropertyCode::Speed => self.speed().value(),
            PropertyCode::Senses => self.senses(None)?.value(),
            PropertyCode::Beauty => self.beauty().value(),
            PropertyCode::Dangerousness => self.dangerousness().value(),
            PropertyCode::Dignity => self.dignity().value(),
        };
        Ok(value)
    }

    /// Value of a property by code, with breakdown.
    ///
    /// Pass-through properties have a single `levels` contribution.
    pub fn resolve(&self, code: PropertyCode) -> Result<ResolvedProperty, PropertyError> {
        if code == PropertyCode::Senses {
            return self.resolve_senses(SenseVariant::WithoutRemarkableSense);
        }

        let value = self.value_of(code)?;
        if !code.is_derived() {
            return Ok(ResolvedProperty::new(code, value).with_contribution("levels", value));
        }
        Ok(self
            .cached_breakdown(code)
            .unwrap_or_else(|| ResolvedProperty::new(code, value)))
    }

    /// The breakdown of `code` if it has been resolved already.
    ///
    /// Never computes anything.
    pub fn cached_breakdown(&self, code: PropertyCode) -> Option<ResolvedProperty> {
        if code == PropertyCode::Senses {
            return self
                .senses
                .borrow()
                .get(&SenseVariant::WithoutRemarkableSense)
                .cloned();
        }
        self.cache.borrow().get(&code).cloned()
    }

    /// Resolve every derived property, dependencies first, and every senses
    /// variant. Afterwards the snapshot only reads its cache.
    ///
    /// # Errors
    ///
    /// Any collaborator error raised while resolving senses.
    pub fn warm_up(&self) -> Result<(), PropertyError> {
        for code in PropertyGraph::standard().resolution_order() {
            if code.is_derived() {
                self.value_of(code)?;
            }
        }
        for sense in RemarkableSenseCode::iter() {
            self.senses(Some(sense))?;
        }
        Ok(())
    }

    /// All current values at once.
    pub fn summary(&self) -> Result<PropertySummary, PropertyError> {
        let mut senses = BTreeMap::new();
        senses.insert(
            SenseVariant::WithoutRemarkableSense.to_string(),
            self.senses(None)?,
        );
        for sense in RemarkableSenseCode::iter() {
            senses.insert(sense.to_string(), self.senses(Some(sense))?);
        }

        Ok(PropertySummary {
            body_strength: self.body_strength(),
            strength_without_load_malus: self.strength_without_malus_from_load(),
            strength: self.strength(),
            strength_of_offhand: self.strength_of_offhand(),
            agility: self.agility(),
            knack: self.knack(),
            will: self.will(),
            intelligence: self.intelligence(),
            charisma: self.charisma(),
            size: self.size(),
            height: self.height(),
            height_in_cm: self.height_in_cm(),
            weight_in_kg: self.weight_in_kg(),
            age: self.age(),
            toughness: self.toughness(),
            endurance: self.endurance(),
            wound_boundary: self.wound_boundary(),
            fatigue_boundary: self.fatigue_boundary(),
            speed: self.speed(),
            beauty: self.beauty(),
            dangerousness: self.dangerousness(),
            dignity: self.dignity(),
            senses,
        })
    }
}

impl fmt::Debug for CurrentProperties<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut resolved: Vec<PropertyCode> = self.cache.borrow().keys().copied().collect();
        resolved.sort();
        f.debug_struct("CurrentProperties")
            .field("equipment", &self.equipment)
            .field("resolved", &resolved)
            .field("senses_variants", &self.senses.borrow().len())
            .finish()
    }
}
