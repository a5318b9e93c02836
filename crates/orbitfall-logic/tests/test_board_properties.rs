//! Property sweeps over the standard board and a few irregular layouts.
//!
//! Random positions come from a seeded RNG so failures reproduce.

use std::collections::BTreeSet;

use orbitfall_logic::board::{generate_board, Board, BoardLayout, Position, RingSpec};
use orbitfall_logic::graph::{
    calculate_distance, find_path, is_valid_position, neighbors, positions_within_range,
    ring_color_zone, BoardError,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ── Helpers ────────────────────────────────────────────────────────────

fn standard_board() -> Board {
    generate_board(&BoardLayout::default())
}

fn layout(spaces: &[u32]) -> Board {
    generate_board(&BoardLayout {
        rings: spaces
            .iter()
            .map(|&num_spaces| RingSpec {
                num_spaces,
                speed_requirement: 0,
            })
            .collect(),
        ..BoardLayout::default()
    })
}

fn random_position(rng: &mut StdRng, board: &Board) -> Position {
    let ring = rng.gen_range(1..=board.ring_count());
    let spaces = board.ring(ring).map_or(1, |r| r.num_spaces);
    Position::new(ring, rng.gen_range(0..spaces))
}

// ── Scenarios ──────────────────────────────────────────────────────────

#[test]
fn wrap_around_on_ring_six() {
    let board = standard_board();
    assert_eq!(
        calculate_distance(Position::new(6, 13), Position::new(6, 0), &board),
        Ok(1)
    );
}

#[test]
fn wrap_around_every_ring() {
    let board = standard_board();
    for ring in &board.rings {
        let last = Position::new(ring.index, ring.num_spaces - 1);
        assert_eq!(
            calculate_distance(Position::new(ring.index, 0), last, &board),
            Ok(1),
            "ring {}",
            ring.index
        );
    }
}

#[test]
fn overlap_neighbors_ring_six_to_seven() {
    let board = standard_board();
    let a = Position::new(6, 0);
    let b = Position::new(7, 1);
    assert_eq!(calculate_distance(a, b, &board), Ok(1));
    assert_eq!(calculate_distance(b, a, &board), Ok(1));
}

#[test]
fn stored_color_zone_matches_banding() {
    let board = standard_board();
    for ring in &board.rings {
        assert_eq!(ring.color_zone, ring_color_zone(ring.index));
    }
}

// ── Properties ─────────────────────────────────────────────────────────

#[test]
fn same_ring_distance_is_symmetric() {
    let board = standard_board();
    for ring in &board.rings {
        for s1 in 0..ring.num_spaces {
            for s2 in 0..ring.num_spaces {
                let a = Position::new(ring.index, s1);
                let b = Position::new(ring.index, s2);
                let ab = calculate_distance(a, b, &board).unwrap();
                assert_eq!(Ok(ab), calculate_distance(b, a, &board));
                assert!(ab <= ring.num_spaces / 2);
            }
        }
    }
}

#[test]
fn cross_ring_distance_is_symmetric_on_standard_board() {
    let board = standard_board();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let a = random_position(&mut rng, &board);
        let b = random_position(&mut rng, &board);
        if a.ring == b.ring {
            continue;
        }
        assert_eq!(
            calculate_distance(a, b, &board),
            calculate_distance(b, a, &board),
            "{} <-> {}",
            a,
            b
        );
    }
}

#[test]
fn overlap_adjacency_is_mutual_on_standard_board() {
    let board = standard_board();
    for p in board.positions() {
        for q in neighbors(p, &board) {
            assert!(
                neighbors(q, &board).contains(&p),
                "{} lists {} but not the reverse",
                p,
                q
            );
        }
    }
}

/// Edges `p -> q` where `q` does not list `p` back.
fn one_way_edges(board: &Board) -> Vec<(Position, Position)> {
    board
        .positions()
        .flat_map(|p| neighbors(p, board).into_iter().map(move |q| (p, q)))
        .filter(|&(p, q)| !neighbors(q, board).contains(&p))
        .collect()
}

#[test]
fn irregular_layout_adjacency_and_distance_are_symmetric() {
    let board = layout(&[5, 7, 11, 13, 4]);
    assert!(one_way_edges(&board).is_empty());
    for a in board.positions() {
        for b in board.positions() {
            assert_eq!(
                calculate_distance(a, b, &board),
                calculate_distance(b, a, &board),
                "{} <-> {}",
                a,
                b
            );
        }
    }
}

#[test]
fn large_equal_rings_have_one_way_cross_ring_edges() {
    let board = layout(&[22, 22]);
    let one_way = one_way_edges(&board);
    assert!(one_way.contains(&(Position::new(1, 15), Position::new(2, 14))));
    // same-ring wrap edges are always mutual
    assert!(one_way.iter().all(|(p, q)| p.ring != q.ring));

    let a = Position::new(1, 15);
    let b = Position::new(2, 14);
    assert_eq!(calculate_distance(a, b, &board), Ok(1));
    assert_eq!(calculate_distance(b, a, &board), Ok(2));

    // still one connected lattice
    for p in board.positions() {
        assert!(calculate_distance(Position::new(1, 0), p, &board).is_ok());
    }
}

#[test]
fn cross_ring_distance_at_least_ring_gap() {
    let board = standard_board();
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..300 {
        let a = random_position(&mut rng, &board);
        let b = random_position(&mut rng, &board);
        let d = calculate_distance(a, b, &board).unwrap();
        assert!(d >= a.ring.abs_diff(b.ring));
    }
}

#[test]
fn range_is_monotonic() {
    let board = standard_board();
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..40 {
        let origin = random_position(&mut rng, &board);
        let mut previous: BTreeSet<Position> = BTreeSet::new();
        for r in 0..10 {
            let area = positions_within_range(origin, r as f64, &board).unwrap();
            assert!(previous.is_subset(&area), "range {} from {}", r, origin);
            assert!(area.contains(&origin));
            previous = area;
        }
    }
}

#[test]
fn range_matches_distance_for_cross_ring_targets() {
    let board = standard_board();
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..20 {
        let origin = random_position(&mut rng, &board);
        let area = positions_within_range(origin, 3.0, &board).unwrap();
        for p in board.positions().filter(|p| p.ring != origin.ring) {
            let d = calculate_distance(origin, p, &board).unwrap();
            assert_eq!(area.contains(&p), d <= 3, "{} -> {}", origin, p);
        }
    }
}

#[test]
fn every_range_result_is_on_the_board() {
    let board = standard_board();
    let area = positions_within_range(Position::new(4, 0), 4.0, &board).unwrap();
    assert!(area.iter().all(|&p| is_valid_position(p, &board)));
}

#[test]
fn paths_are_shortest_and_connected() {
    let board = standard_board();
    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..100 {
        let a = random_position(&mut rng, &board);
        let b = random_position(&mut rng, &board);
        if a.ring == b.ring {
            continue;
        }
        let path = find_path(a, b, &board).unwrap();
        assert_eq!(path.len() as u32, calculate_distance(a, b, &board).unwrap());
        assert_eq!(path.last(), Some(&b));
    }
}

// ── Irregular layouts ──────────────────────────────────────────────────

#[test]
fn irregular_layout_stays_connected() {
    // ratios that do not divide evenly in either direction
    let board = layout(&[5, 7, 11, 13, 4]);
    let origin = Position::new(1, 0);
    let everything = positions_within_range(origin, 100.0, &board).unwrap();
    assert_eq!(everything.len() as u32, board.space_count());
}

#[test]
fn irregular_layout_distance_sweep_terminates() {
    let board = layout(&[5, 7, 11, 13, 4]);
    for a in board.positions() {
        for b in board.positions() {
            assert!(calculate_distance(a, b, &board).is_ok(), "{} -> {}", a, b);
        }
    }
}

#[test]
fn missing_ring_is_reported() {
    let board = standard_board();
    assert_eq!(
        calculate_distance(Position::new(1, 0), Position::new(12, 0), &board),
        Err(BoardError::InvalidRing(12))
    );
    assert_eq!(
        positions_within_range(Position::new(12, 0), 1.0, &board),
        Err(BoardError::InvalidRing(12))
    );
}
