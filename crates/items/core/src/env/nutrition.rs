use crate::item::{Item, ItemFlags};

use super::ItemType;

/// Rules a character applies when computing the calories of a food item.
pub trait NutritionRules {
    /// Effective calories of `item`, whose type is `ty`.
    fn kcal(&self, item: &Item, ty: &ItemType) -> i32;
}

/// Metabolism-dependent nutrient computation.
///
/// `kcal_percent` scales every item's calories; rotten food yields half
/// unless the profile ignores rot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NutritionProfile {
    pub kcal_percent: u32,
    pub ignores_rot: bool,
}

impl Default for NutritionProfile {
    fn default() -> Self {
        Self {
            kcal_percent: 100,
            ignores_rot: false,
        }
    }
}

impl NutritionRules for NutritionProfile {
    fn kcal(&self, item: &Item, ty: &ItemType) -> i32 {
        // i32 * u32 * u32 always fits in i128.
        let units = i128::from(item.count(Some(ty)).max(1));
        let mut kcal = i128::from(ty.kcal) * units * i128::from(self.kcal_percent) / 100;
        if item.has_flag(ItemFlags::ROTTEN) && !self.ignores_rot {
            kcal /= 2;
        }
        kcal.clamp(i128::from(i32::MIN), i128::from(i32::MAX)) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemTypeId, ItemUid};

    #[test]
    fn rot_halves_unless_ignored() {
        let apple = ItemType::new("apple").with_kcal(90);
        let item = Item::new(ItemUid(1), ItemTypeId::from("apple")).with_flags(ItemFlags::ROTTEN);

        assert_eq!(NutritionProfile::default().kcal(&item, &apple), 45);
        let scavenger = NutritionProfile {
            kcal_percent: 100,
            ignores_rot: true,
        };
        assert_eq!(scavenger.kcal(&item, &apple), 90);
    }

    #[test]
    fn charges_multiply_counted_food() {
        let nuts = ItemType::new("nuts").with_kcal(10).counted_by_charges(1);
        let item = Item::new(ItemUid(1), ItemTypeId::from("nuts")).with_charges(4);
        let slow = NutritionProfile {
            kcal_percent: 50,
            ignores_rot: false,
        };
        assert_eq!(slow.kcal(&item, &nuts), 20);
    }

    #[test]
    fn extreme_calories_saturate() {
        let feast = ItemType::new("feast").with_kcal(i32::MAX).counted_by_charges(1);
        let item = Item::new(ItemUid(1), ItemTypeId::from("feast")).with_charges(u32::MAX);
        let glutton = NutritionProfile {
            kcal_percent: u32::MAX,
            ignores_rot: false,
        };
        assert_eq!(NutritionProfile::default().kcal(&item, &feast), i32::MAX);
        assert_eq!(glutton.kcal(&item, &feast), i32::MAX);

        let poison = ItemType::new("poison").with_kcal(i32::MIN).counted_by_charges(1);
        let item = Item::new(ItemUid(2), ItemTypeId::from("poison")).with_charges(u32::MAX);
        assert_eq!(glutton.kcal(&item, &poison), i32::MIN);
    }
}
