//! Codes for armaments, races and senses.
//!
//! Codes display and serialize in the spelling the rule tables use:
//! `snake_case` everywhere except the races table's [`SenseCode`].

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Body armor codes. Use [`BodyArmorCode::WithoutArmor`] for none.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Hash,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BodyArmorCode {
    #[default]
    WithoutArmor,
    PaddedArmor,
    LeatherArmor,
    HobnailedArmor,
    ChainmailArmor,
    ScaleArmor,
    PlateArmor,
    FullPlateArmor,
}

/// Helm codes. Use [`HelmCode::WithoutHelm`] for none.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Hash,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum HelmCode {
    #[default]
    WithoutHelm,
    LeatherCap,
    ChainmailHood,
    ConicalHelm,
    FullHelm,
    BarrelHelm,
    GreatHelm,
}

/// Any worn armament the armourer can judge.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmamentCode {
    BodyArmor(BodyArmorCode),
    Helm(HelmCode),
}

impl ArmamentCode {
    pub fn as_str(&self) -> &'static str {
        match *self {
            ArmamentCode::BodyArmor(code) => code.into(),
            ArmamentCode::Helm(code) => code.into(),
        }
    }
}

impl From<BodyArmorCode> for ArmamentCode {
    fn from(code: BodyArmorCode) -> Self {
        ArmamentCode::BodyArmor(code)
    }
}

impl From<HelmCode> for ArmamentCode {
    fn from(code: HelmCode) -> Self {
        ArmamentCode::Helm(code)
    }
}

impl fmt::Display for ArmamentCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RaceCode {
    Human,
    Elf,
    Dwarf,
    Hobbit,
    Kroll,
    Orc,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SubraceCode {
    Common,
    Highlander,
    Green,
    Dark,
    Wood,
    Mountain,
    Wild,
    Skurut,
    Goblin,
}

/// A sense a caller can explicitly rely on when asking for senses.
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RemarkableSenseCode {
    Hearing,
    Sight,
    Smell,
    Taste,
    Touch,
}

/// A sense as listed by the races table.
///
/// Independent of [`RemarkableSenseCode`]; the two are compared through
/// [`sense_matches`] only.
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SenseCode {
    Hearing,
    Sight,
    Smell,
    Taste,
    Touch,
}

/// Cache key for the senses family.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SenseVariant {
    /// Senses with no remarkable sense invoked.
    WithoutRemarkableSense,
    Remarkable(RemarkableSenseCode),
}

impl From<Option<RemarkableSenseCode>> for SenseVariant {
    fn from(sense: Option<RemarkableSenseCode>) -> Self {
        match sense {
            Some(code) => SenseVariant::Remarkable(code),
            None => SenseVariant::WithoutRemarkableSense,
        }
    }
}

impl fmt::Display for SenseVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SenseVariant::WithoutRemarkableSense => f.write_str("without_remarkable_sense"),
            SenseVariant::Remarkable(code) => write!(f, "{}", code),
        }
    }
}

/// Canonical form of a sense name: trimmed and ASCII-lowercased.
///
/// # Examples
///
/// ```rust
/// use current_properties::codes::normalize_sense_name;
///
/// assert_eq!(normalize_sense_name(" HEARING "), "hearing");
/// ```
pub fn normalize_sense_name(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

/// Whether a requested remarkable sense is the race's own remarkable sense.
///
/// # Examples
///
/// ```rust
/// use current_properties::codes::{sense_matches, RemarkableSenseCode, SenseCode};
///
/// assert!(sense_matches(RemarkableSenseCode::Smell, SenseCode::Smell));
/// assert!(!sense_matches(RemarkableSenseCode::Smell, SenseCode::Sight));
/// ```
pub fn sense_matches(requested: RemarkableSenseCode, race_sense: SenseCode) -> bool {
    normalize_sense_name(requested.as_ref()) == normalize_sense_name(race_sense.as_ref())
}
