//! Orbitfall Headless Harness
//!
//! Validates the board graph and ship status logic against the shipped data
//! files. Runs entirely in-process with no turn engine.
//!
//! Usage:
//!   cargo run -p orbitfall-simtest
//!   cargo run -p orbitfall-simtest -- --verbose

use std::collections::BTreeSet;

use orbitfall_logic::board::{
    generate_board, validate_board, Board, BoardLayout, ColorZone, Position,
};
use orbitfall_logic::graph::{
    self, calculate_distance, objects_at_position, objects_within_range, positions_within_range,
    ring_color_zone, BoardError,
};
use orbitfall_logic::objects::SpaceObject;
use orbitfall_logic::sections::{Section, SectionConfigTable, SectionMap};
use orbitfall_logic::ship::{Ship, ShipRecord, ShipSectionState};
use orbitfall_logic::ship_systems::{
    self, calculate_life_support, is_fully_powered, is_wrecked, life_support_contributions,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

// ── Data files ──────────────────────────────────────────────────────────
const SECTION_CONFIG_JSON: &str = include_str!("../../../data/section_config.json");
const SCENARIO_JSON: &str = include_str!("../../../data/scenario.json");

#[derive(Debug, Deserialize)]
struct Scenario {
    objects: Vec<SpaceObject>,
    ship: ShipRecord,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Orbitfall Logic Harness ===\n");

    let mut results = Vec::new();

    // 1. Section configuration table
    let config = match SectionConfigTable::from_json(SECTION_CONFIG_JSON) {
        Ok(c) => c,
        Err(e) => {
            println!("section config failed to load: {}", e);
            std::process::exit(1);
        }
    };
    results.extend(validate_section_config(&config, verbose));

    // 2. Board layout
    let board = generate_board(&BoardLayout::default());
    results.extend(validate_board_layout(&board, verbose));

    // 3. Distance queries
    results.extend(validate_distances(&board, verbose));

    // 4. Range queries
    results.extend(validate_ranges(&board, verbose));

    // 5. Ship status scenarios
    results.extend(validate_ship_scenarios(&config, verbose));

    // 6. Data-file scenario (objects + ship record)
    results.extend(validate_scenario_file(&board, &config, verbose));

    // 7. Random ship sweep
    results.extend(validate_random_ships(&config, verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── Fixtures ────────────────────────────────────────────────────────────

/// All six sections with hull, powered to requirement, linked in a loop.
fn full_power_ship(config: &SectionConfigTable) -> Ship {
    let sections = SectionMap::from_fn(|section| {
        let next = Section::ALL[(section.index() + 1) % Section::COUNT];
        let dice = vec![1u8; config.power_required(section) as usize];
        ShipSectionState::with_hull(2)
            .power(&dice)
            .conduit(next, 1)
            .corridor(next)
    });
    Ship::new(sections, Position::new(8, 0))
}

fn ids(objects: &[&SpaceObject]) -> Vec<u32> {
    objects.iter().map(|o| o.id).collect()
}

// ── 1. Section Config ───────────────────────────────────────────────────

fn validate_section_config(config: &SectionConfigTable, verbose: bool) -> Vec<TestResult> {
    println!("--- Section Config ---");
    let mut results = Vec::new();

    results.push(TestResult {
        name: "config_matches_builtin".into(),
        passed: *config == SectionConfigTable::default(),
        detail: "data/section_config.json == built-in table".into(),
    });

    results.push(TestResult {
        name: "config_max_life_support".into(),
        passed: config.max_life_support() == 14,
        detail: format!("max life support = {}", config.max_life_support()),
    });

    let unpowerable: Vec<_> = Section::all()
        .iter()
        .filter(|&&s| config.power_required(s) == 0)
        .collect();
    results.push(TestResult {
        name: "config_all_sections_powerable".into(),
        passed: unpowerable.is_empty(),
        detail: format!("{} sections with zero power requirement", unpowerable.len()),
    });

    if verbose {
        println!("  Section table:");
        for &s in Section::all() {
            let c = config.get(s);
            println!(
                "    {:12} power={} life_support={}",
                s.name(),
                c.power_required,
                c.life_support
            );
        }
    }

    results
}

// ── 2. Board Layout ─────────────────────────────────────────────────────

fn validate_board_layout(board: &Board, verbose: bool) -> Vec<TestResult> {
    println!("--- Board Layout ---");
    let mut results = Vec::new();

    let errors = validate_board(board);
    results.push(TestResult {
        name: "board_valid".into(),
        passed: errors.is_empty(),
        detail: if errors.is_empty() {
            "no layout errors".into()
        } else {
            errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ")
        },
    });

    let spaces: Vec<u32> = board.rings.iter().map(|r| r.num_spaces).collect();
    results.push(TestResult {
        name: "board_space_counts".into(),
        passed: spaces == [9, 9, 12, 12, 14, 14, 18, 18],
        detail: format!("{:?}", spaces),
    });

    let zones_consistent = board
        .rings
        .iter()
        .all(|r| r.color_zone == ring_color_zone(r.index));
    results.push(TestResult {
        name: "board_color_zones".into(),
        passed: zones_consistent,
        detail: "stored ring colors match zone banding".into(),
    });

    let reachable = positions_within_range(Position::new(1, 0), 1000.0, board)
        .map(|s| s.len() as u32)
        .unwrap_or(0);
    results.push(TestResult {
        name: "board_connected".into(),
        passed: reachable == board.space_count(),
        detail: format!("{}/{} spaces reachable", reachable, board.space_count()),
    });

    if verbose {
        println!("  Rings:");
        for r in &board.rings {
            println!(
                "    ring {}: {:2} spaces, speed {}, {:?}",
                r.index, r.num_spaces, r.speed_requirement, r.color_zone
            );
        }
    }

    results
}

// ── 3. Distances ────────────────────────────────────────────────────────

fn validate_distances(board: &Board, _verbose: bool) -> Vec<TestResult> {
    println!("--- Distances ---");
    let mut results = Vec::new();

    let wrap = calculate_distance(Position::new(6, 13), Position::new(6, 0), board);
    results.push(TestResult {
        name: "distance_wrap".into(),
        passed: wrap == Ok(1),
        detail: format!("R6:13 -> R6:0 = {:?}", wrap),
    });

    let out = calculate_distance(Position::new(6, 0), Position::new(7, 1), board);
    let back = calculate_distance(Position::new(7, 1), Position::new(6, 0), board);
    results.push(TestResult {
        name: "distance_overlap".into(),
        passed: out == Ok(1) && back == Ok(1),
        detail: format!("R6:0 <-> R7:1 = {:?} / {:?}", out, back),
    });

    let bad = calculate_distance(Position::new(9, 0), Position::new(1, 0), board);
    results.push(TestResult {
        name: "distance_invalid_ring".into(),
        passed: bad == Err(BoardError::InvalidRing(9)),
        detail: format!("{:?}", bad),
    });

    // Exhaustive symmetry sweep
    let positions: Vec<Position> = board.positions().collect();
    let mut asymmetric = 0;
    let mut checked = 0;
    for (i, &a) in positions.iter().enumerate() {
        for &b in &positions[i + 1..] {
            checked += 1;
            if calculate_distance(a, b, board) != calculate_distance(b, a, board) {
                asymmetric += 1;
            }
        }
    }
    results.push(TestResult {
        name: "distance_symmetric".into(),
        passed: asymmetric == 0,
        detail: format!("{} pairs checked, {} asymmetric", checked, asymmetric),
    });

    // Adjacency is mutual for the standard layout
    let one_way = positions
        .iter()
        .flat_map(|&p| graph::neighbors(p, board).into_iter().map(move |q| (p, q)))
        .filter(|&(p, q)| !graph::neighbors(q, board).contains(&p))
        .count();
    results.push(TestResult {
        name: "adjacency_mutual".into(),
        passed: one_way == 0,
        detail: format!("{} one-way edges", one_way),
    });

    results
}

// ── 4. Ranges ───────────────────────────────────────────────────────────

fn validate_ranges(board: &Board, _verbose: bool) -> Vec<TestResult> {
    println!("--- Ranges ---");
    let mut results = Vec::new();

    let mut monotonic = true;
    for origin in board.positions().step_by(7) {
        let mut previous: BTreeSet<Position> = BTreeSet::new();
        for r in 0..8 {
            match positions_within_range(origin, r as f64, board) {
                Ok(area) => {
                    if !previous.is_subset(&area) || !area.contains(&origin) {
                        monotonic = false;
                    }
                    previous = area;
                }
                Err(_) => monotonic = false,
            }
        }
    }
    results.push(TestResult {
        name: "range_monotonic".into(),
        passed: monotonic,
        detail: "range r is a subset of range r+1".into(),
    });

    let origin = Position::new(3, 3);
    let empty = [-1.0, f64::NAN, f64::INFINITY]
        .iter()
        .all(|&r| matches!(positions_within_range(origin, r, board), Ok(s) if s.is_empty()));
    results.push(TestResult {
        name: "range_degenerate".into(),
        passed: empty,
        detail: "negative / NaN / infinite range -> empty".into(),
    });

    results
}

// ── 5. Ship Scenarios ───────────────────────────────────────────────────

fn validate_ship_scenarios(config: &SectionConfigTable, _verbose: bool) -> Vec<TestResult> {
    println!("--- Ship Scenarios ---");
    let mut results = Vec::new();

    let ship = full_power_ship(config);
    let ls = calculate_life_support(&ship, config);
    results.push(TestResult {
        name: "ship_full_power_life_support".into(),
        passed: ls == 14,
        detail: format!("life support = {}", ls),
    });

    let mut dark = ship.clone();
    for &s in Section::all() {
        dark.section_mut(s).power_dice.clear();
    }
    let dark_ls = calculate_life_support(&dark, config);
    let none_powered = Section::all()
        .iter()
        .all(|&s| !is_fully_powered(&dark, s, config));
    results.push(TestResult {
        name: "ship_unpowered".into(),
        passed: dark_ls == 0 && none_powered,
        detail: format!("life support = {}, none fully powered = {}", dark_ls, none_powered),
    });

    // Boundary: exactly the requirement vs one short
    let mut boundary = ship.clone();
    boundary.section_mut(Section::MedLab).power_dice = vec![4];
    let at = is_fully_powered(&boundary, Section::MedLab, config);
    boundary.section_mut(Section::MedLab).power_dice = vec![3];
    let below = is_fully_powered(&boundary, Section::MedLab, config);
    results.push(TestResult {
        name: "ship_power_boundary".into(),
        passed: at && !below,
        detail: format!("at requirement = {}, one below = {}", at, below),
    });

    // Wreck thresholds
    let mut one_hull = ship.clone();
    for &s in &Section::ALL[1..] {
        one_hull.section_mut(s).hull = 0;
    }
    let mut no_conduit = ship.clone();
    let mut no_corridor = ship.clone();
    for &s in Section::all() {
        no_conduit.section_mut(s).conduit_connections = SectionMap::default();
        no_corridor.section_mut(s).corridors = SectionMap::default();
    }
    results.push(TestResult {
        name: "ship_wreck_thresholds".into(),
        passed: !is_wrecked(&ship)
            && is_wrecked(&one_hull)
            && is_wrecked(&no_conduit)
            && is_wrecked(&no_corridor),
        detail: format!(
            "healthy={} one_hull={} no_conduit={} no_corridor={}",
            is_wrecked(&ship),
            is_wrecked(&one_hull),
            is_wrecked(&no_conduit),
            is_wrecked(&no_corridor)
        ),
    });

    results
}

// ── 6. Scenario File ────────────────────────────────────────────────────

fn validate_scenario_file(
    board: &Board,
    config: &SectionConfigTable,
    verbose: bool,
) -> Vec<TestResult> {
    println!("--- Scenario File ---");
    let mut results = Vec::new();

    let scenario: Scenario = match serde_json::from_str(SCENARIO_JSON) {
        Ok(s) => s,
        Err(e) => {
            results.push(TestResult {
                name: "scenario_parse".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return results;
        }
    };

    let mut board = board.clone();
    board.objects = scenario.objects;
    let errors = validate_board(&board);
    results.push(TestResult {
        name: "scenario_objects_on_board".into(),
        passed: errors.is_empty(),
        detail: format!("{} objects, {} errors", board.objects.len(), errors.len()),
    });

    let ship = match Ship::from_record(scenario.ship) {
        Ok(s) => s,
        Err(e) => {
            results.push(TestResult {
                name: "scenario_ship".into(),
                passed: false,
                detail: e.to_string(),
            });
            return results;
        }
    };

    let stacked = ids(&objects_at_position(Position::new(7, 1), &board));
    results.push(TestResult {
        name: "scenario_objects_at_position".into(),
        passed: stacked == [2, 3],
        detail: format!("R7:1 holds {:?}", stacked),
    });

    let near = objects_within_range(ship.position, 2.0, &board)
        .map(|o| ids(&o))
        .unwrap_or_default();
    results.push(TestResult {
        name: "scenario_objects_in_range".into(),
        passed: near == [1, 2, 3],
        detail: format!("within 2 of {}: {:?}", ship.position, near),
    });

    let zone = ring_color_zone(ship.position.ring);
    results.push(TestResult {
        name: "scenario_ship_zone".into(),
        passed: zone == ColorZone::Yellow,
        detail: format!("ship on ring {} in {:?} zone", ship.position.ring, zone),
    });

    let status = ship_systems::ship_status(&ship, config);
    results.push(TestResult {
        name: "scenario_life_support".into(),
        passed: status.life_support == 7 && !status.wrecked,
        detail: format!(
            "life support = {}, wrecked = {}",
            status.life_support, status.wrecked
        ),
    });

    if verbose {
        println!("  Ship sections:");
        for (section, s) in status.sections.iter() {
            println!(
                "    {:12} power={} full={} functional={} damaged={} disabled={} ls={}",
                section.name(),
                s.total_power,
                s.fully_powered,
                s.functional,
                s.damaged,
                s.disabled,
                s.life_support
            );
        }
    }

    results
}

// ── 7. Random Ships ─────────────────────────────────────────────────────

fn validate_random_ships(config: &SectionConfigTable, _verbose: bool) -> Vec<TestResult> {
    println!("--- Random Ships ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(2024);

    let mut mismatches = 0;
    let mut wrecked = 0;
    let trials = 2000;
    for _ in 0..trials {
        let sections = SectionMap::from_fn(|_| ShipSectionState {
            hull: rng.gen_range(0..3),
            power_dice: (0..rng.gen_range(0..3))
                .map(|_| rng.gen_range(1..=6))
                .collect(),
            corridors: SectionMap::from_fn(|_| rng.gen_bool(0.15)),
            conduit_connections: SectionMap::from_fn(|_| u32::from(rng.gen_bool(0.15))),
        });
        let ship = Ship::new(sections, Position::new(1, 0));
        let sum: u32 = life_support_contributions(&ship, config).values().sum();
        if sum != calculate_life_support(&ship, config) {
            mismatches += 1;
        }
        if is_wrecked(&ship) {
            wrecked += 1;
        }
    }

    results.push(TestResult {
        name: "random_life_support_additive".into(),
        passed: mismatches == 0,
        detail: format!(
            "{} ships, {} mismatches, {} wrecked",
            trials, mismatches, wrecked
        ),
    });

    results
}
