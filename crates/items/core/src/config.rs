/// Item system configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ItemConfig {
    /// Radius used by map and vehicle selectors when the caller has no
    /// more specific reach (e.g. crafting from nearby tiles).
    pub selector_radius: u32,

    /// Power cell accounting for characters.
    pub ups: UpsRules,
}

impl ItemConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of pockets an item type may declare.
    pub const MAX_POCKETS_PER_TYPE: usize = 8;
    /// Damage level at which an item counts as broken.
    pub const MAX_DAMAGE: u16 = 4000;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_SELECTOR_RADIUS: u32 = 2;

    pub fn new() -> Self {
        Self {
            selector_radius: Self::DEFAULT_SELECTOR_RADIUS,
            ups: UpsRules::default(),
        }
    }

    pub fn with_selector_radius(selector_radius: u32) -> Self {
        Self {
            selector_radius,
            ..Self::new()
        }
    }
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// How a character's power sources convert into power-cell charges.
///
/// Advanced UPS units store energy more efficiently, so each of their
/// charges is worth `adv_efficiency_num / adv_efficiency_den` standard
/// charges. Bionic power is stored in kJ and converted at
/// `kj_per_charge`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UpsRules {
    pub adv_efficiency_num: u32,
    pub adv_efficiency_den: u32,
    pub kj_per_charge: u32,
}

impl UpsRules {
    /// Converts advanced UPS charges into standard charges (rounding down).
    pub fn scale_advanced(&self, charges: u32) -> u32 {
        if self.adv_efficiency_den == 0 {
            return charges;
        }
        let scaled = u64::from(charges) * u64::from(self.adv_efficiency_num)
            / u64::from(self.adv_efficiency_den);
        u32::try_from(scaled).unwrap_or(u32::MAX)
    }

    /// Converts stored bionic power into standard charges (rounding down).
    pub fn charges_from_power(&self, kj: u32) -> u32 {
        if self.kj_per_charge == 0 {
            return kj;
        }
        kj / self.kj_per_charge
    }
}

impl Default for UpsRules {
    fn default() -> Self {
        Self {
            adv_efficiency_num: 10,
            adv_efficiency_den: 6,
            kj_per_charge: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advanced_ups_scaling_saturates() {
        let rules = UpsRules::default();
        assert_eq!(rules.scale_advanced(6), 10);
        assert_eq!(rules.scale_advanced(u32::MAX), u32::MAX);
    }

    #[test]
    fn zero_denominators_pass_through() {
        let rules = UpsRules {
            adv_efficiency_num: 3,
            adv_efficiency_den: 0,
            kj_per_charge: 0,
        };
        assert_eq!(rules.scale_advanced(7), 7);
        assert_eq!(rules.charges_from_power(9), 9);
    }
}
