//! Objects occupying board spaces.
//!
//! Objects are created and removed by the turn engine's event and collision
//! rules. This module only describes them so board queries can find them.

use serde::{Deserialize, Serialize};

use crate::board::Position;

/// Salvage that can be recovered from an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Loot {
    /// Spare parts (repair resources).
    pub spare_parts: u32,
    /// Upgrade cards drawn when looted.
    pub upgrades: u32,
}

impl Loot {
    pub fn is_empty(&self) -> bool {
        self.spare_parts == 0 && self.upgrades == 0
    }
}

/// Discriminant-only view of [`ObjectKind`], handy for filters and counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectType {
    Hazard,
    AsteroidCluster,
    Debris,
    HostileShip,
    WreckedShip,
    FunctionalStation,
}

/// Variant payload of a space object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectKind {
    /// Radiation pocket or similar; deals damage on entry.
    Hazard { damage: u32 },
    AsteroidCluster,
    Debris,
    HostileShip { hull: u32, shields: u32 },
    WreckedShip,
    FunctionalStation { hull: u32, shields: u32 },
}

/// An object on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceObject {
    pub id: u32,
    pub position: Position,
    #[serde(default)]
    pub loot: Option<Loot>,
    #[serde(flatten)]
    pub kind: ObjectKind,
}

impl SpaceObject {
    pub fn object_type(&self) -> ObjectType {
        match self.kind {
            ObjectKind::Hazard { .. } => ObjectType::Hazard,
            ObjectKind::AsteroidCluster => ObjectType::AsteroidCluster,
            ObjectKind::Debris => ObjectType::Debris,
            ObjectKind::HostileShip { .. } => ObjectType::HostileShip,
            ObjectKind::WreckedShip => ObjectType::WreckedShip,
            ObjectKind::FunctionalStation { .. } => ObjectType::FunctionalStation,
        }
    }

    /// Whether the object carries hull and shields and can be fought.
    pub fn is_combatant(&self) -> bool {
        self.combat_stats().is_some()
    }

    /// `(hull, shields)` for objects that have them.
    pub fn combat_stats(&self) -> Option<(u32, u32)> {
        match self.kind {
            ObjectKind::HostileShip { hull, shields }
            | ObjectKind::FunctionalStation { hull, shields } => Some((hull, shields)),
            ObjectKind::Hazard { .. }
            | ObjectKind::AsteroidCluster
            | ObjectKind::Debris
            | ObjectKind::WreckedShip => None,
        }
    }

    pub fn has_loot(&self) -> bool {
        self.loot.is_some_and(|l| !l.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(kind: ObjectKind) -> SpaceObject {
        SpaceObject {
            id: 1,
            position: Position::new(3, 4),
            loot: None,
            kind,
        }
    }

    #[test]
    fn test_combat_stats() {
        let hostile = object(ObjectKind::HostileShip {
            hull: 4,
            shields: 2,
        });
        assert_eq!(hostile.combat_stats(), Some((4, 2)));
        assert!(hostile.is_combatant());

        let station = object(ObjectKind::FunctionalStation {
            hull: 8,
            shields: 3,
        });
        assert!(station.is_combatant());

        assert!(!object(ObjectKind::Debris).is_combatant());
        assert!(!object(ObjectKind::Hazard { damage: 2 }).is_combatant());
    }

    #[test]
    fn test_object_type() {
        assert_eq!(
            object(ObjectKind::AsteroidCluster).object_type(),
            ObjectType::AsteroidCluster
        );
        assert_eq!(
            object(ObjectKind::WreckedShip).object_type(),
            ObjectType::WreckedShip
        );
    }

    #[test]
    fn test_has_loot() {
        let mut wreck = object(ObjectKind::WreckedShip);
        assert!(!wreck.has_loot());
        wreck.loot = Some(Loot::default());
        assert!(!wreck.has_loot());
        wreck.loot = Some(Loot {
            spare_parts: 2,
            upgrades: 0,
        });
        assert!(wreck.has_loot());
    }

    #[test]
    fn test_json_shape() {
        let json = r#"{
            "id": 7,
            "position": { "ring": 2, "space": 5 },
            "type": "hostile_ship",
            "hull": 3,
            "shields": 1
        }"#;
        let parsed: SpaceObject = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.id, 7);
        assert_eq!(parsed.position, Position::new(2, 5));
        assert_eq!(parsed.loot, None);
        assert_eq!(
            parsed.kind,
            ObjectKind::HostileShip {
                hull: 3,
                shields: 1
            }
        );
    }
}
