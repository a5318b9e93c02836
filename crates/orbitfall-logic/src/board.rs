//! Orbit rings, board positions, and board layout.
//!
//! The board is a set of concentric rings around the planet. Ring 1 is the
//! innermost; each ring has its own number of spaces, so radially adjacent
//! spaces do not line up one-to-one (see [`crate::graph`]).
//!
//! # Usage
//!
//! ```
//! use orbitfall_logic::board::{generate_board, validate_board, BoardLayout};
//!
//! let board = generate_board(&BoardLayout::default());
//! assert_eq!(board.ring_count(), 8);
//! assert!(validate_board(&board).is_empty());
//! ```

use serde::{Deserialize, Serialize};

use crate::graph;
use crate::objects::SpaceObject;

/// Damage band of a ring. Inner rings are hotter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorZone {
    Red,
    Orange,
    Yellow,
    Green,
}

/// Direction the rings turn at the end of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationDirection {
    #[default]
    Clockwise,
    CounterClockwise,
}

/// A single space on the board.
///
/// Ordering is by ring, then space, which keeps range results stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Ring index, 1 = innermost.
    pub ring: u32,
    /// Space index on the ring, `0..num_spaces`.
    pub space: u32,
}

impl Position {
    pub fn new(ring: u32, space: u32) -> Self {
        Self { ring, space }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "R{}:{}", self.ring, self.space)
    }
}

/// One concentric ring of the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrbitRing {
    /// 1-based ring index.
    pub index: u32,
    /// Current rotation offset, `0..num_spaces`.
    pub rotation: u32,
    pub num_spaces: u32,
    /// Speed a ship needs to hold this orbit.
    pub speed_requirement: i32,
    pub color_zone: ColorZone,
}

impl OrbitRing {
    /// Rotation offset after one step in `direction`.
    pub fn next_rotation(&self, direction: RotationDirection) -> u32 {
        if self.num_spaces == 0 {
            return 0;
        }
        let n = self.num_spaces;
        let current = self.rotation % n;
        match direction {
            RotationDirection::Clockwise => (current + 1) % n,
            RotationDirection::CounterClockwise => (current + n - 1) % n,
        }
    }
}

/// Board snapshot: rings ordered by index plus the objects on them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Board {
    pub rings: Vec<OrbitRing>,
    pub objects: Vec<SpaceObject>,
    pub rotation_direction: RotationDirection,
}

impl Board {
    /// Look up a ring by its 1-based index.
    pub fn ring(&self, index: u32) -> Option<&OrbitRing> {
        if index == 0 {
            return None;
        }
        // Rings are normally stored in index order; fall back to a scan for
        // boards assembled out of order.
        match self.rings.get(index as usize - 1) {
            Some(ring) if ring.index == index => Some(ring),
            _ => self.rings.iter().find(|r| r.index == index),
        }
    }

    pub fn ring_count(&self) -> u32 {
        self.rings.len() as u32
    }

    /// Total number of spaces across all rings.
    pub fn space_count(&self) -> u32 {
        self.rings.iter().map(|r| r.num_spaces).sum()
    }

    /// Iterate every position on the board, ring by ring.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.rings
            .iter()
            .flat_map(|r| (0..r.num_spaces).map(move |s| Position::new(r.index, s)))
    }
}

// ============================================================================
// LAYOUT
// ============================================================================

/// Per-ring layout entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingSpec {
    pub num_spaces: u32,
    pub speed_requirement: i32,
}

/// Configuration for generating a fresh board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardLayout {
    /// Ring specs from innermost to outermost.
    pub rings: Vec<RingSpec>,
    pub rotation_direction: RotationDirection,
}

impl Default for BoardLayout {
    fn default() -> Self {
        const SPACES: [u32; 8] = [9, 9, 12, 12, 14, 14, 18, 18];
        const SPEEDS: [i32; 8] = [5, 5, 4, 4, 3, 3, 2, 2];
        Self {
            rings: SPACES
                .iter()
                .zip(SPEEDS.iter())
                .map(|(&num_spaces, &speed_requirement)| RingSpec {
                    num_spaces,
                    speed_requirement,
                })
                .collect(),
            rotation_direction: RotationDirection::Clockwise,
        }
    }
}

/// Build an empty board from a layout. Rings are numbered from 1 and start
/// unrotated; each ring's color zone follows [`graph::ring_color_zone`].
pub fn generate_board(layout: &BoardLayout) -> Board {
    let rings = layout
        .rings
        .iter()
        .enumerate()
        .map(|(i, spec)| {
            let index = i as u32 + 1;
            OrbitRing {
                index,
                rotation: 0,
                num_spaces: spec.num_spaces,
                speed_requirement: spec.speed_requirement,
                color_zone: graph::ring_color_zone(index),
            }
        })
        .collect();
    Board {
        rings,
        objects: Vec::new(),
        rotation_direction: layout.rotation_direction,
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Structural problem found in a board snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardLayoutError {
    /// Ring at this storage slot does not carry the expected index.
    NonContiguousRing { expected: u32, found: u32 },
    /// Ring has no spaces.
    EmptyRing(u32),
    /// Ring rotation is not a valid space index.
    RotationOutOfRange { ring: u32, rotation: u32 },
    /// Object sits on a position that does not exist.
    ObjectOffBoard { object_id: u32, position: Position },
}

impl std::fmt::Display for BoardLayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonContiguousRing { expected, found } => {
                write!(f, "ring index gap: expected {}, found {}", expected, found)
            }
            Self::EmptyRing(ring) => write!(f, "ring {} has no spaces", ring),
            Self::RotationOutOfRange { ring, rotation } => {
                write!(f, "ring {} rotation {} out of range", ring, rotation)
            }
            Self::ObjectOffBoard {
                object_id,
                position,
            } => write!(f, "object {} at invalid position {}", object_id, position),
        }
    }
}

impl std::error::Error for BoardLayoutError {}

/// Check board invariants, returning all errors found.
pub fn validate_board(board: &Board) -> Vec<BoardLayoutError> {
    let mut errors = Vec::new();

    for (i, ring) in board.rings.iter().enumerate() {
        let expected = i as u32 + 1;
        if ring.index != expected {
            errors.push(BoardLayoutError::NonContiguousRing {
                expected,
                found: ring.index,
            });
        }
        if ring.num_spaces == 0 {
            errors.push(BoardLayoutError::EmptyRing(ring.index));
        } else if ring.rotation >= ring.num_spaces {
            errors.push(BoardLayoutError::RotationOutOfRange {
                ring: ring.index,
                rotation: ring.rotation,
            });
        }
    }

    for object in &board.objects {
        if !graph::is_valid_position(object.position, board) {
            errors.push(BoardLayoutError::ObjectOffBoard {
                object_id: object.id,
                position: object.position,
            });
        }
    }

    errors
}
