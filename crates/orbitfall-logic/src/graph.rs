//! Pure spatial queries over the ring lattice.
//!
//! Spaces on the same ring form a cycle. Spaces on radially adjacent rings
//! are adjacent when their wedges overlap: space `s` of a ring with `F`
//! spaces covers the arc `[s/F, (s+1)/F)` of the circle, and every space of
//! the neighboring ring whose arc intersects it is a neighbor. Rings with
//! unequal space counts therefore give one or more cross-ring neighbors.
//!
//! The overlap set is computed independently in each direction, so the
//! relation is not guaranteed to be symmetric for every ratio of space
//! counts. Neighbors are computed on demand; no adjacency list is stored.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use crate::board::{Board, ColorZone, Position};
use crate::objects::SpaceObject;

/// Errors from board graph queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Referenced ring does not exist on the board.
    InvalidRing(u32),
    /// Ring exists but the space index is out of range.
    InvalidSpace { ring: u32, space: u32 },
    /// Both positions are valid but not connected.
    NoPath { from: Position, to: Position },
}

impl std::fmt::Display for BoardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardError::InvalidRing(ring) => write!(f, "Ring {} does not exist", ring),
            BoardError::InvalidSpace { ring, space } => {
                write!(f, "Space {} does not exist on ring {}", space, ring)
            }
            BoardError::NoPath { from, to } => write!(f, "No path from {} to {}", from, to),
        }
    }
}

impl std::error::Error for BoardError {}

/// Damage zone for a ring index. Independent of the ring's stored color.
pub fn ring_color_zone(ring_index: u32) -> ColorZone {
    if ring_index >= 7 {
        ColorZone::Green
    } else if ring_index >= 5 {
        ColorZone::Yellow
    } else if ring_index >= 3 {
        ColorZone::Orange
    } else {
        ColorZone::Red
    }
}

/// Ring index within `[1, ring_count]` and space within `[0, num_spaces)`.
pub fn is_valid_position(position: Position, board: &Board) -> bool {
    (1..=board.ring_count()).contains(&position.ring)
        && board
            .ring(position.ring)
            .is_some_and(|r| position.space < r.num_spaces)
}

/// Objects sitting exactly on `position`, in board order.
pub fn objects_at_position(position: Position, board: &Board) -> Vec<&SpaceObject> {
    board
        .objects
        .iter()
        .filter(|o| o.position == position)
        .collect()
}

/// Spaces on a ring with `to_spaces` spaces whose wedge overlaps space
/// `space` of a ring with `from_spaces` spaces.
///
/// `floor(s/F*T) ..= ceil((s+1)/F*T) - 1` in floating point, clamped to at
/// least one space. Rounding on large equal rings can widen a wedge by one
/// space in one direction only.
pub fn overlapping_spaces(space: u32, from_spaces: u32, to_spaces: u32) -> Vec<u32> {
    if from_spaces == 0 || to_spaces == 0 {
        return Vec::new();
    }
    let (s, f, t) = (space as f64, from_spaces as f64, to_spaces as f64);
    let mapped_start = (s / f) * t;
    let mapped_end = ((s + 1.0) / f) * t;
    let start = mapped_start.floor() as u32;
    let end = ((mapped_end.ceil() as u32).saturating_sub(1)).max(start);
    (start..=end).map(|i| i % to_spaces).collect()
}

/// Adjacent positions: the two same-ring neighbors, then overlapping spaces
/// on the inner ring, then on the outer ring. Deduplicated, order kept.
///
/// Rings missing from the board contribute nothing. A position off the
/// board has no neighbors.
pub fn neighbors(position: Position, board: &Board) -> Vec<Position> {
    let Some(ring) = board.ring(position.ring) else {
        return Vec::new();
    };
    let f = ring.num_spaces;
    if position.space >= f {
        return Vec::new();
    }
    let s = position.space;

    let mut out = Vec::with_capacity(6);
    let mut push = |p: Position| {
        if !out.contains(&p) {
            out.push(p);
        }
    };

    push(Position::new(position.ring, (s + 1) % f));
    push(Position::new(position.ring, (s + f - 1) % f));

    let adjacent = [position.ring.checked_sub(1), position.ring.checked_add(1)];
    for other_index in adjacent.into_iter().flatten() {
        if let Some(other) = board.ring(other_index) {
            for t in overlapping_spaces(s, f, other.num_spaces) {
                push(Position::new(other_index, t));
            }
        }
    }

    out
}

fn check_position(position: Position, board: &Board) -> Result<(), BoardError> {
    let ring = board
        .ring(position.ring)
        .ok_or(BoardError::InvalidRing(position.ring))?;
    if position.space >= ring.num_spaces {
        return Err(BoardError::InvalidSpace {
            ring: position.ring,
            space: position.space,
        });
    }
    Ok(())
}

/// Shortest number of moves between two positions.
///
/// Same-ring distance is the shorter arc around the ring. Cross-ring
/// distance is the BFS depth at which `to` is first dequeued.
pub fn calculate_distance(from: Position, to: Position, board: &Board) -> Result<u32, BoardError> {
    check_position(from, board)?;
    check_position(to, board)?;

    if from.ring == to.ring {
        let n = board
            .ring(from.ring)
            .ok_or(BoardError::InvalidRing(from.ring))?
            .num_spaces;
        let diff = from.space.abs_diff(to.space);
        return Ok(diff.min(n - diff));
    }

    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    visited.insert(from);
    queue.push_back((from, 0u32));

    while let Some((current, depth)) = queue.pop_front() {
        if current == to {
            return Ok(depth);
        }
        for next in neighbors(current, board) {
            if visited.insert(next) {
                queue.push_back((next, depth + 1));
            }
        }
    }

    log::debug!("no path from {} to {} ({} visited)", from, to, visited.len());
    Err(BoardError::NoPath { from, to })
}

/// Every position reachable from `origin` in at most `floor(range)` moves,
/// origin included.
///
/// Negative or non-finite ranges give an empty set before the origin is
/// looked at, so they never fail.
pub fn positions_within_range(
    origin: Position,
    range: f64,
    board: &Board,
) -> Result<BTreeSet<Position>, BoardError> {
    let mut visited = BTreeSet::new();
    if !range.is_finite() || range < 0.0 {
        return Ok(visited);
    }
    check_position(origin, board)?;
    let max_depth = range.floor().min(u32::MAX as f64) as u32;

    let mut queue = VecDeque::new();
    visited.insert(origin);
    queue.push_back((origin, 0u32));

    while let Some((current, depth)) = queue.pop_front() {
        if depth >= max_depth {
            continue;
        }
        for next in neighbors(current, board) {
            if visited.insert(next) {
                queue.push_back((next, depth + 1));
            }
        }
    }

    Ok(visited)
}

/// Objects on any position within `range` of `origin`, in board order.
pub fn objects_within_range<'a>(
    origin: Position,
    range: f64,
    board: &'a Board,
) -> Result<Vec<&'a SpaceObject>, BoardError> {
    let area = positions_within_range(origin, range, board)?;
    Ok(board
        .objects
        .iter()
        .filter(|o| area.contains(&o.position))
        .collect())
}

/// BFS path from `from` to `to` over the adjacency relation.
///
/// Returns the positions stepped onto, excluding `from`; empty if the two
/// are the same. Always graph-based, including on a single ring.
pub fn find_path(from: Position, to: Position, board: &Board) -> Result<Vec<Position>, BoardError> {
    check_position(from, board)?;
    check_position(to, board)?;

    if from == to {
        return Ok(Vec::new());
    }

    // position -> predecessor
    let mut came_from: HashMap<Position, Position> = HashMap::new();
    let mut queue = VecDeque::new();
    queue.push_back(from);

    while let Some(current) = queue.pop_front() {
        if current == to {
            let mut path = vec![current];
            let mut step = current;
            while let Some(&prev) = came_from.get(&step) {
                if prev == from {
                    break;
                }
                path.push(prev);
                step = prev;
            }
            path.reverse();
            return Ok(path);
        }
        for next in neighbors(current, board) {
            if next != from && !came_from.contains_key(&next) {
                came_from.insert(next, current);
                queue.push_back(next);
            }
        }
    }

    log::debug!("no path from {} to {}", from, to);
    Err(BoardError::NoPath { from, to })
}
