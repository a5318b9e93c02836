//! Derived ship status: power, life support, damage and wreck checks.
//!
//! Nothing here is stored. Each predicate is a pure projection of the raw
//! section state in [`Ship`], so a query can never disagree with the data it
//! was computed from. Malformed input degrades to the conservative answer
//! instead of failing.

use serde::{Deserialize, Serialize};

use crate::sections::{Section, SectionConfigTable, SectionMap};
use crate::ship::Ship;

/// Minimum number of sections with hull left for the ship to hold together.
const MIN_INTACT_SECTIONS: usize = 2;

/// Sum of the section's power dice.
pub fn total_power(ship: &Ship, section: Section) -> u32 {
    ship.section(section)
        .power_dice
        .iter()
        .map(|&d| d as u32)
        .sum()
}

/// Hull left, power routed in, and dice meeting the configured requirement.
///
/// A section whose configured requirement is zero can never be fully powered.
pub fn is_fully_powered(ship: &Ship, section: Section, config: &SectionConfigTable) -> bool {
    let state = ship.section(section);
    let required = config.power_required(section);
    state.hull > 0 && state.has_conduit() && required > 0 && total_power(ship, section) >= required
}

/// Hull left and any power at all.
pub fn is_functional(ship: &Ship, section: Section) -> bool {
    let state = ship.section(section);
    state.hull > 0 && state.power_dice.iter().any(|&d| d > 0)
}

pub fn is_damaged(ship: &Ship, section: Section) -> bool {
    ship.section(section).hull == 0
}

/// No conduit can route power into the section, regardless of hull.
pub fn is_disabled(ship: &Ship, section: Section) -> bool {
    !ship.section(section).has_conduit()
}

/// Life support points per section. Drives is always 0.
pub fn life_support_contributions(ship: &Ship, config: &SectionConfigTable) -> SectionMap<u32> {
    SectionMap::from_fn(|section| {
        if section.provides_life_support() && is_fully_powered(ship, section, config) {
            config.life_support(section)
        } else {
            0
        }
    })
}

/// Total life support; always the sum of [`life_support_contributions`].
pub fn calculate_life_support(ship: &Ship, config: &SectionConfigTable) -> u32 {
    life_support_contributions(ship, config).values().sum()
}

/// Structural collapse: fewer than two sections with hull, no conduit
/// anywhere, or no open corridor anywhere. Life support is not considered.
pub fn is_wrecked(ship: &Ship) -> bool {
    let intact = Section::ALL
        .iter()
        .filter(|&&s| ship.section(s).hull > 0)
        .count();
    let any_conduit = ship.sections.values().any(|s| s.has_conduit());
    let any_corridor = ship.sections.values().any(|s| s.has_corridor());

    intact < MIN_INTACT_SECTIONS || !any_conduit || !any_corridor
}

/// Every derived flag for one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionStatus {
    pub fully_powered: bool,
    pub functional: bool,
    pub damaged: bool,
    pub disabled: bool,
    pub total_power: u32,
    pub life_support: u32,
}

/// Snapshot of all derived ship status, for presentation and logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipStatus {
    pub sections: SectionMap<SectionStatus>,
    pub life_support: u32,
    pub wrecked: bool,
}

pub fn ship_status(ship: &Ship, config: &SectionConfigTable) -> ShipStatus {
    let contributions = life_support_contributions(ship, config);
    let sections = SectionMap::from_fn(|section| SectionStatus {
        fully_powered: is_fully_powered(ship, section, config),
        functional: is_functional(ship, section),
        damaged: is_damaged(ship, section),
        disabled: is_disabled(ship, section),
        total_power: total_power(ship, section),
        life_support: contributions[section],
    });
    ShipStatus {
        sections,
        life_support: contributions.values().sum(),
        wrecked: is_wrecked(ship),
    }
}
