//! Raw ship state as written by the turn engine.
//!
//! Only raw counts live here: hull, power dice, corridors, and conduits.
//! Every status (powered, damaged, wrecked, ...) is derived on demand in
//! [`crate::ship_systems`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::board::Position;
use crate::sections::{ParseSectionError, Section, SectionMap};

/// Raw state of one ship section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShipSectionState {
    pub hull: u32,
    /// Power dice allocated to the section, each 1..=6. Empty = unpowered.
    pub power_dice: Vec<u8>,
    /// Crew-traversable corridor to each other section.
    pub corridors: SectionMap<bool>,
    /// Power-routing capacity to each other section.
    pub conduit_connections: SectionMap<u32>,
}

impl ShipSectionState {
    pub fn with_hull(hull: u32) -> Self {
        Self {
            hull,
            ..Self::default()
        }
    }

    pub fn power(mut self, dice: &[u8]) -> Self {
        self.power_dice = dice.to_vec();
        self
    }

    pub fn conduit(mut self, to: Section, count: u32) -> Self {
        self.conduit_connections[to] = count;
        self
    }

    pub fn corridor(mut self, to: Section) -> Self {
        self.corridors[to] = true;
        self
    }

    pub fn has_conduit(&self) -> bool {
        self.conduit_connections.values().any(|&c| c > 0)
    }

    pub fn has_corridor(&self) -> bool {
        self.corridors.values().any(|&open| open)
    }
}

/// Ship snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    pub sections: SectionMap<ShipSectionState>,
    pub speed: u32,
    pub shields: u32,
    pub position: Position,
}

impl Ship {
    pub fn new(sections: SectionMap<ShipSectionState>, position: Position) -> Self {
        Self {
            sections,
            speed: 0,
            shields: 0,
            position,
        }
    }

    pub fn section(&self, section: Section) -> &ShipSectionState {
        &self.sections[section]
    }

    pub fn section_mut(&mut self, section: Section) -> &mut ShipSectionState {
        &mut self.sections[section]
    }

    /// Build a ship from name-keyed external data.
    ///
    /// Unknown section names are rejected. Sections missing from the record
    /// become an empty section (no hull, power, corridors, or conduits).
    pub fn from_record(record: ShipRecord) -> Result<Self, ShipRecordError> {
        let mut sections = SectionMap::<ShipSectionState>::default();
        let mut seen = SectionMap::filled(false);

        for (name, raw) in record.sections {
            let section: Section = name.parse()?;
            seen[section] = true;

            let mut state = ShipSectionState::with_hull(raw.hull).power(&raw.power_dice);
            for (to, value) in raw.corridors {
                state.corridors[to.parse::<Section>()?] = value == 1;
            }
            for (to, count) in raw.conduit_connections {
                state.conduit_connections[to.parse::<Section>()?] = count;
            }
            sections[section] = state;
        }

        for (section, present) in seen.iter() {
            if !present {
                log::warn!("ship record has no {} section, treating as empty", section);
            }
        }

        Ok(Self {
            sections,
            speed: record.speed,
            shields: record.shields,
            position: record.position,
        })
    }
}

// ============================================================================
// EXTERNAL RECORD
// ============================================================================

/// Section data as stored by external systems, keyed by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShipSectionRecord {
    #[serde(default)]
    pub hull: u32,
    #[serde(default)]
    pub power_dice: Vec<u8>,
    /// Section name -> 0 or 1.
    #[serde(default)]
    pub corridors: HashMap<String, u8>,
    /// Section name -> conduit count.
    #[serde(default)]
    pub conduit_connections: HashMap<String, u32>,
}

/// Ship data as stored by external systems.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipRecord {
    #[serde(default)]
    pub sections: HashMap<String, ShipSectionRecord>,
    #[serde(default)]
    pub speed: u32,
    #[serde(default)]
    pub shields: u32,
    pub position: Position,
}

/// Error converting a [`ShipRecord`] into a [`Ship`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShipRecordError {
    UnknownSection(ParseSectionError),
}

impl From<ParseSectionError> for ShipRecordError {
    fn from(e: ParseSectionError) -> Self {
        ShipRecordError::UnknownSection(e)
    }
}

impl std::fmt::Display for ShipRecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShipRecordError::UnknownSection(e) => write!(f, "Invalid ship record: {}", e),
        }
    }
}

impl std::error::Error for ShipRecordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShipRecordError::UnknownSection(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_builder() {
        let s = ShipSectionState::with_hull(3)
            .power(&[2, 4])
            .conduit(Section::Drives, 2)
            .corridor(Section::Bridge);
        assert_eq!(s.hull, 3);
        assert_eq!(s.power_dice, vec![2, 4]);
        assert_eq!(s.conduit_connections[Section::Drives], 2);
        assert!(s.corridors[Section::Bridge]);
        assert!(s.has_conduit());
        assert!(s.has_corridor());
        assert!(!ShipSectionState::default().has_conduit());
    }

    #[test]
    fn test_from_record() {
        let json = r#"{
            "sections": {
                "bridge": {
                    "hull": 4,
                    "power_dice": [3],
                    "corridors": { "engineering": 1, "med_lab": 0 },
                    "conduit_connections": { "Engineering": 2 }
                },
                "Engineering": { "hull": 2 }
            },
            "speed": 3,
            "position": { "ring": 7, "space": 2 }
        }"#;
        let record: ShipRecord = serde_json::from_str(json).unwrap();
        let ship = Ship::from_record(record).unwrap();

        let bridge = ship.section(Section::Bridge);
        assert_eq!(bridge.hull, 4);
        assert_eq!(bridge.power_dice, vec![3]);
        assert!(bridge.corridors[Section::Engineering]);
        assert!(!bridge.corridors[Section::MedLab]);
        assert_eq!(bridge.conduit_connections[Section::Engineering], 2);

        assert_eq!(ship.section(Section::Engineering).hull, 2);
        assert_eq!(*ship.section(Section::Defense), ShipSectionState::default());
        assert_eq!(ship.speed, 3);
        assert_eq!(ship.shields, 0);
        assert_eq!(ship.position, Position::new(7, 2));
    }

    #[test]
    fn test_from_record_unknown_section() {
        let mut sections = HashMap::new();
        sections.insert("Cargo Bay".to_string(), ShipSectionRecord::default());
        let record = ShipRecord {
            sections,
            speed: 0,
            shields: 0,
            position: Position::new(1, 0),
        };
        let err = Ship::from_record(record).unwrap_err();
        assert_eq!(
            err,
            ShipRecordError::UnknownSection(ParseSectionError("Cargo Bay".into()))
        );
    }

    #[test]
    fn test_ship_json_round_trip_is_keyed() {
        let mut ship = Ship::new(SectionMap::default(), Position::new(2, 3));
        ship.section_mut(Section::SciLab).hull = 2;
        let value = serde_json::to_value(&ship).unwrap();
        assert_eq!(value["sections"]["SciLab"]["hull"], 2);
        let back: Ship = serde_json::from_value(value).unwrap();
        assert_eq!(back, ship);
    }
}
