//! Armor domain vocabulary: slots, class tags, elements, stats.
//!
//! The string forms returned by `as_str` are what the database stores and
//! what the optimizer prompt shows, so they must stay stable.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Rarity tier of an exotic item in the Bungie manifest.
pub const TIER_EXOTIC: i16 = 6;

/// Rarity tier of a legendary item in the Bungie manifest.
pub const TIER_LEGENDARY: i16 = 5;

/// Manifest `itemType` value for armor.
pub const ITEM_TYPE_ARMOR: i32 = 2;

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

/// One of the five armor slots a character can equip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArmorSlot {
    Helmet,
    Gauntlets,
    ChestArmor,
    LegArmor,
    ClassArmor,
}

impl ArmorSlot {
    pub const ALL: [ArmorSlot; 5] = [
        ArmorSlot::Helmet,
        ArmorSlot::Gauntlets,
        ArmorSlot::ChestArmor,
        ArmorSlot::LegArmor,
        ArmorSlot::ClassArmor,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ArmorSlot::Helmet => "HELMET",
            ArmorSlot::Gauntlets => "GAUNTLETS",
            ArmorSlot::ChestArmor => "CHEST_ARMOR",
            ArmorSlot::LegArmor => "LEG_ARMOR",
            ArmorSlot::ClassArmor => "CLASS_ARMOR",
        }
    }
}

impl fmt::Display for ArmorSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArmorSlot {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ArmorSlot::ALL
            .into_iter()
            .find(|slot| slot.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown armor slot '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// Classes
// ---------------------------------------------------------------------------

/// Guardian class an armor piece belongs to. `All` marks class-agnostic items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClassTag {
    Titan,
    Hunter,
    Warlock,
    All,
}

impl ClassTag {
    pub fn as_str(self) -> &'static str {
        match self {
            ClassTag::Titan => "TITAN",
            ClassTag::Hunter => "HUNTER",
            ClassTag::Warlock => "WARLOCK",
            ClassTag::All => "ALL",
        }
    }

    /// Whether an item tagged `self` may be worn by a character of `class`.
    pub fn wearable_by(self, class: ClassTag) -> bool {
        self == ClassTag::All || self == class
    }
}

impl fmt::Display for ClassTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassTag {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TITAN" => Ok(ClassTag::Titan),
            "HUNTER" => Ok(ClassTag::Hunter),
            "WARLOCK" => Ok(ClassTag::Warlock),
            "ALL" => Ok(ClassTag::All),
            other => Err(CoreError::Validation(format!("Unknown class '{other}'"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Elements
// ---------------------------------------------------------------------------

/// Subclass damage element. Fragments are catalogued per element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Arc,
    Void,
    Solar,
    Stasis,
    Strand,
    Prismatic,
    Unknown,
}

impl Element {
    pub fn as_str(self) -> &'static str {
        match self {
            Element::Arc => "Arc",
            Element::Void => "Void",
            Element::Solar => "Solar",
            Element::Stasis => "Stasis",
            Element::Strand => "Strand",
            Element::Prismatic => "Prismatic",
            Element::Unknown => "Unknown",
        }
    }

    /// Parse an element name as it appears at the start of a manifest
    /// `itemTypeDisplayName` such as `"Solar Fragment"`.
    pub fn from_name(name: &str) -> Element {
        match name {
            "Arc" => Element::Arc,
            "Void" => Element::Void,
            "Solar" => Element::Solar,
            "Stasis" => Element::Stasis,
            "Strand" => Element::Strand,
            "Prismatic" => Element::Prismatic,
            _ => Element::Unknown,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Inventory location / modifier type
// ---------------------------------------------------------------------------

/// Which inventory partition an owned item was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InventoryLocation {
    Profile,
    Character,
    Equipped,
}

impl InventoryLocation {
    pub fn as_str(self) -> &'static str {
        match self {
            InventoryLocation::Profile => "profile",
            InventoryLocation::Character => "character",
            InventoryLocation::Equipped => "equipped",
        }
    }
}

/// Catalog kind of an armor modifier row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModifierType {
    ArmorMod,
    SubclassFragment,
}

impl ModifierType {
    pub fn as_str(self) -> &'static str {
        match self {
            ModifierType::ArmorMod => "ARMOR_MOD",
            ModifierType::SubclassFragment => "SUBCLASS_FRAGMENT",
        }
    }
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// The six armor stats tracked by the optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKind {
    Mobility,
    Resilience,
    Recovery,
    Discipline,
    Intellect,
    Strength,
}

impl StatKind {
    pub const ALL: [StatKind; 6] = [
        StatKind::Mobility,
        StatKind::Resilience,
        StatKind::Recovery,
        StatKind::Discipline,
        StatKind::Intellect,
        StatKind::Strength,
    ];

    /// Bungie stat definition hash.
    pub fn hash(self) -> u32 {
        match self {
            StatKind::Mobility => 2_996_146_975,
            StatKind::Resilience => 392_767_087,
            StatKind::Recovery => 1_943_323_491,
            StatKind::Discipline => 1_735_777_505,
            StatKind::Intellect => 144_602_215,
            StatKind::Strength => 4_244_567_218,
        }
    }

    pub fn from_hash(hash: u32) -> Option<StatKind> {
        StatKind::ALL.into_iter().find(|kind| kind.hash() == hash)
    }

    /// Lowercase name used in prompts and JSON payloads.
    pub fn name(self) -> &'static str {
        match self {
            StatKind::Mobility => "mobility",
            StatKind::Resilience => "resilience",
            StatKind::Recovery => "recovery",
            StatKind::Discipline => "discipline",
            StatKind::Intellect => "intellect",
            StatKind::Strength => "strength",
        }
    }

    /// Manifest display name (`"Mobility"`, ...).
    pub fn display_name(self) -> &'static str {
        match self {
            StatKind::Mobility => "Mobility",
            StatKind::Resilience => "Resilience",
            StatKind::Recovery => "Recovery",
            StatKind::Discipline => "Discipline",
            StatKind::Intellect => "Intellect",
            StatKind::Strength => "Strength",
        }
    }

    pub fn from_display_name(name: &str) -> Option<StatKind> {
        StatKind::ALL
            .into_iter()
            .find(|kind| kind.display_name() == name)
    }
}

/// Values of the six tracked stats, either rolled values on an armor piece
/// or deltas granted by a modifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBlock {
    pub mobility: i32,
    pub resilience: i32,
    pub recovery: i32,
    pub discipline: i32,
    pub intellect: i32,
    pub strength: i32,
}

impl StatBlock {
    /// Build a block by asking `lookup` for each stat; `None` becomes 0.
    pub fn from_lookup(mut lookup: impl FnMut(StatKind) -> Option<i32>) -> Self {
        let mut block = StatBlock::default();
        for kind in StatKind::ALL {
            block.set(kind, lookup(kind).unwrap_or(0));
        }
        block
    }

    pub fn get(&self, kind: StatKind) -> i32 {
        match kind {
            StatKind::Mobility => self.mobility,
            StatKind::Resilience => self.resilience,
            StatKind::Recovery => self.recovery,
            StatKind::Discipline => self.discipline,
            StatKind::Intellect => self.intellect,
            StatKind::Strength => self.strength,
        }
    }

    pub fn set(&mut self, kind: StatKind, value: i32) {
        match kind {
            StatKind::Mobility => self.mobility = value,
            StatKind::Resilience => self.resilience = value,
            StatKind::Recovery => self.recovery = value,
            StatKind::Discipline => self.discipline = value,
            StatKind::Intellect => self.intellect = value,
            StatKind::Strength => self.strength = value,
        }
    }

    pub fn total(&self) -> i32 {
        StatKind::ALL.into_iter().map(|kind| self.get(kind)).sum()
    }
}
