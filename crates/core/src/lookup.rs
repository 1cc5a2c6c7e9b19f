//! Static Destiny 2 lookup tables.
//!
//! Maps upstream numeric hashes (subclass item hashes, item category hashes,
//! class ordinals, stat hashes) to the tags the rest of the system works with.
//! Every function here is total: unknown input yields the documented fallback.

use crate::armor::{ArmorSlot, ClassTag, Element, StatKind};

/// Subclass item hash -> element, for all three classes.
const SUBCLASS_ELEMENTS: &[(&str, Element)] = &[
    // Titan
    ("1616346845", Element::Prismatic),
    ("2932390016", Element::Arc),
    ("2842471112", Element::Void),
    ("2550323932", Element::Solar),
    ("613647804", Element::Stasis),
    ("242419885", Element::Strand),
    // Hunter
    ("4282591831", Element::Prismatic),
    ("2328211300", Element::Arc),
    ("2453351420", Element::Void),
    ("2240888816", Element::Solar),
    ("873720784", Element::Stasis),
    ("3785442599", Element::Strand),
    // Warlock
    ("3893112950", Element::Prismatic),
    ("3168997075", Element::Arc),
    ("2849050827", Element::Void),
    ("3941205951", Element::Solar),
    ("3291545503", Element::Stasis),
    ("4204413574", Element::Strand),
];

/// Item category hash -> armor slot. Order matters: first match wins.
const SLOT_CATEGORIES: [(i64, ArmorSlot); 5] = [
    (45, ArmorSlot::Helmet),
    (46, ArmorSlot::Gauntlets),
    (47, ArmorSlot::ChestArmor),
    (48, ArmorSlot::LegArmor),
    (49, ArmorSlot::ClassArmor),
];

/// Item category hash -> owning class.
const CLASS_CATEGORIES: [(i64, ClassTag); 3] = [
    (21, ClassTag::Warlock),
    (22, ClassTag::Titan),
    (23, ClassTag::Hunter),
];

/// Character `classType` ordinal -> class.
const CLASS_ORDINALS: [ClassTag; 3] = [ClassTag::Titan, ClassTag::Hunter, ClassTag::Warlock];

/// Manifest category hash of general armor mods.
pub const CATEGORY_ARMOR_MODS: i64 = 4_104_513_227;

/// Manifest category hash of subclass mods (fragments, aspects).
pub const CATEGORY_SUBCLASS_MODS: i64 = 1_043_342_778;

/// Resolve the element of a subclass from its item hash.
pub fn element_for_subclass(subclass_id: &str) -> Element {
    SUBCLASS_ELEMENTS
        .iter()
        .find(|(id, _)| *id == subclass_id.trim())
        .map(|(_, element)| *element)
        .unwrap_or(Element::Unknown)
}

/// Resolve the armor slot from a definition's category hashes.
pub fn armor_slot_for_categories(category_hashes: &[i64]) -> Option<ArmorSlot> {
    SLOT_CATEGORIES
        .iter()
        .find(|(hash, _)| category_hashes.contains(hash))
        .map(|(_, slot)| *slot)
}

/// Resolve the owning class from a definition's category hashes.
pub fn class_for_categories(category_hashes: &[i64]) -> ClassTag {
    CLASS_CATEGORIES
        .iter()
        .find(|(hash, _)| category_hashes.contains(hash))
        .map(|(_, class)| *class)
        .unwrap_or(ClassTag::All)
}

/// Map a character's `classType` ordinal to its class.
///
/// Returns `None` for ordinals outside the three playable classes (Bungie
/// uses 3 for "unknown").
pub fn class_for_ordinal(ordinal: i32) -> Option<ClassTag> {
    usize::try_from(ordinal)
        .ok()
        .and_then(|idx| CLASS_ORDINALS.get(idx).copied())
}

/// Friendly lowercase name for a stat hash given as a string.
///
/// Unknown hashes are returned unchanged so a caller's free-form priority
/// (e.g. `"mobility"`) survives.
pub fn friendly_stat_name(stat: &str) -> String {
    stat.trim()
        .parse::<u32>()
        .ok()
        .and_then(StatKind::from_hash)
        .map(|kind| kind.name().to_string())
        .unwrap_or_else(|| stat.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_subclasses_resolve() {
        assert_eq!(element_for_subclass("2932390016"), Element::Arc);
        assert_eq!(element_for_subclass("873720784"), Element::Stasis);
        assert_eq!(element_for_subclass("3893112950"), Element::Prismatic);
    }

    #[test]
    fn unknown_subclass_falls_back() {
        assert_eq!(element_for_subclass("12345"), Element::Unknown);
        assert_eq!(element_for_subclass(""), Element::Unknown);
        assert_eq!(Element::Unknown.as_str(), "Unknown");
    }

    #[test]
    fn slot_resolves_each_category() {
        assert_eq!(armor_slot_for_categories(&[20, 45]), Some(ArmorSlot::Helmet));
        assert_eq!(armor_slot_for_categories(&[46]), Some(ArmorSlot::Gauntlets));
        assert_eq!(armor_slot_for_categories(&[47]), Some(ArmorSlot::ChestArmor));
        assert_eq!(armor_slot_for_categories(&[48]), Some(ArmorSlot::LegArmor));
        assert_eq!(armor_slot_for_categories(&[49]), Some(ArmorSlot::ClassArmor));
    }

    #[test]
    fn slot_is_none_without_armor_category() {
        assert_eq!(armor_slot_for_categories(&[]), None);
        assert_eq!(armor_slot_for_categories(&[1, 20, 21]), None);
    }

    #[test]
    fn slot_never_yields_two_values() {
        // Malformed definitions carrying several slot categories still
        // resolve to exactly one slot, the first in table order.
        assert_eq!(
            armor_slot_for_categories(&[49, 47, 45]),
            Some(ArmorSlot::Helmet)
        );
        assert_eq!(armor_slot_for_categories(&[48, 46]), Some(ArmorSlot::Gauntlets));
    }

    #[test]
    fn class_from_categories() {
        assert_eq!(class_for_categories(&[21, 45]), ClassTag::Warlock);
        assert_eq!(class_for_categories(&[22]), ClassTag::Titan);
        assert_eq!(class_for_categories(&[23]), ClassTag::Hunter);
        assert_eq!(class_for_categories(&[20, 45]), ClassTag::All);
    }

    #[test]
    fn class_from_ordinal() {
        assert_eq!(class_for_ordinal(0), Some(ClassTag::Titan));
        assert_eq!(class_for_ordinal(1), Some(ClassTag::Hunter));
        assert_eq!(class_for_ordinal(2), Some(ClassTag::Warlock));
        assert_eq!(class_for_ordinal(3), None);
        assert_eq!(class_for_ordinal(-1), None);
    }

    #[test]
    fn stat_names() {
        assert_eq!(friendly_stat_name("2996146975"), "mobility");
        assert_eq!(friendly_stat_name("4244567218"), "strength");
        assert_eq!(friendly_stat_name("grenade"), "grenade");
    }
}
