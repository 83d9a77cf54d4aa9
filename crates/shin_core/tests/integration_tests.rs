//! Integration tests for Shin implied probabilities.
//!
//! These tests exercise the public API end to end: input adapters, both
//! solver strategies, the closed form, and the full-output record.

use approx::assert_relative_eq;
use shin_core::{
    calculate_full, calculate_implied_probabilities, calculate_with_solver, implied_probabilities,
    AcceleratedSolver, OutputField, ReferenceSolver, ShinConfig, ShinError, ShinOutput,
};
use std::collections::{BTreeMap, HashMap};

// ============================================================================
// Reference Values
// ============================================================================

#[test]
fn test_labelled_three_way_market() {
    let odds = vec![("HOME", 2.6), ("AWAY", 2.4), ("DRAW", 4.3)];
    let config = ShinConfig::default().with_full_output(true);

    let output = calculate_implied_probabilities(&odds, &config).unwrap();
    let full = output.full().expect("full output requested");

    let keys: Vec<_> = full.implied_probabilities.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, vec!["HOME", "AWAY", "DRAW"]);

    assert_relative_eq!(full.implied_probabilities[0].1, 0.3729941, epsilon = 1e-6);
    assert_relative_eq!(full.implied_probabilities[1].1, 0.4047794, epsilon = 1e-6);
    assert_relative_eq!(full.implied_probabilities[2].1, 0.2222265, epsilon = 1e-6);
    assert_relative_eq!(full.z, 0.01694251, epsilon = 1e-8);
}

#[test]
fn test_hashmap_market_keys_match() {
    let odds: HashMap<&str, f64> = [("HOME", 2.6), ("AWAY", 2.4), ("DRAW", 4.3)]
        .into_iter()
        .collect();

    let probs = implied_probabilities(&odds).unwrap();

    let mut in_keys: Vec<_> = odds.keys().copied().collect();
    let mut out_keys: Vec<_> = probs.keys().copied().collect();
    in_keys.sort_unstable();
    out_keys.sort_unstable();
    assert_eq!(in_keys, out_keys);

    assert_relative_eq!(probs["HOME"], 0.3729941, epsilon = 1e-6);
    assert_relative_eq!(probs["AWAY"], 0.4047794, epsilon = 1e-6);
    assert_relative_eq!(probs["DRAW"], 0.2222265, epsilon = 1e-6);
}

#[cfg(feature = "indexmap")]
#[test]
fn test_ordered_mapping_keeps_key_order() {
    use indexmap::IndexMap;

    let odds: IndexMap<&str, f64> = [("HOME", 2.6), ("AWAY", 2.4), ("DRAW", 4.3)]
        .into_iter()
        .collect();

    let probs = implied_probabilities(&odds).unwrap();

    assert_eq!(
        probs.keys().copied().collect::<Vec<_>>(),
        vec!["HOME", "AWAY", "DRAW"]
    );
    assert_relative_eq!(probs["HOME"], 0.3729941, epsilon = 1e-6);
    assert_relative_eq!(probs["AWAY"], 0.4047794, epsilon = 1e-6);
    assert_relative_eq!(probs["DRAW"], 0.2222265, epsilon = 1e-6);
}

#[test]
fn test_sequence_matches_mapping() {
    let config = ShinConfig::default().with_full_output(true);

    let seq = calculate_full(&[2.6, 2.4, 4.3], &config).unwrap();
    let map: BTreeMap<&str, f64> = [("HOME", 2.6), ("AWAY", 2.4), ("DRAW", 4.3)]
        .into_iter()
        .collect();
    let keyed = calculate_full(&map, &config).unwrap();

    assert_relative_eq!(
        seq.implied_probabilities[0],
        keyed.implied_probabilities["HOME"],
        epsilon = 1e-12
    );
    assert_relative_eq!(
        seq.implied_probabilities[1],
        keyed.implied_probabilities["AWAY"],
        epsilon = 1e-12
    );
    assert_relative_eq!(
        seq.implied_probabilities[2],
        keyed.implied_probabilities["DRAW"],
        epsilon = 1e-12
    );
    assert_relative_eq!(seq.z, keyed.z, epsilon = 1e-12);
}

#[test]
fn test_record_string_access() {
    let result = calculate_full(&[2.6, 2.4, 4.3], &ShinConfig::default()).unwrap();

    match result.get("implied_probabilities").unwrap() {
        OutputField::ImpliedProbabilities(p) => assert_eq!(p, &result.implied_probabilities),
        other => panic!("unexpected field {:?}", other),
    }
    assert_eq!(
        result.get("iterations").unwrap(),
        OutputField::Iterations(result.iterations)
    );
    assert_eq!(result.get("delta").unwrap(), OutputField::Delta(result.delta));
    assert_eq!(result.get("z").unwrap(), OutputField::Z(result.z));
    assert!(matches!(
        result.get("margin"),
        Err(ShinError::KeyNotFound(key)) if key == "margin"
    ));
}

// ============================================================================
// Input Validation
// ============================================================================

#[test]
fn test_too_few_odds() {
    let empty: Vec<f64> = vec![];
    assert_eq!(
        implied_probabilities(&empty),
        Err(ShinError::InvalidInputSize { got: 0 })
    );
    assert_eq!(
        implied_probabilities(&[1.98]),
        Err(ShinError::InvalidInputSize { got: 1 })
    );
}

#[test]
fn test_odds_below_one() {
    assert!(matches!(
        implied_probabilities(&[0.9, 0.1]),
        Err(ShinError::InvalidOddsValue { .. })
    ));
}

#[test]
fn test_labelled_odds_below_one() {
    let odds = vec![("A", 1.5), ("B", 0.5), ("C", 3.0)];
    assert_eq!(
        implied_probabilities(&odds),
        Err(ShinError::InvalidOddsValue {
            index: 1,
            value: 0.5
        })
    );
}

// ============================================================================
// Two-Outcome Closed Form
// ============================================================================

#[test]
fn test_two_outcomes_equal_additive_devig() {
    let odds = [1.45, 2.85];
    let io: Vec<f64> = odds.iter().map(|o| 1.0 / o).collect();
    let sum: f64 = io.iter().sum();

    let result = calculate_full(&odds, &ShinConfig::default()).unwrap();
    assert_eq!(result.iterations, 0);
    assert_eq!(result.delta, 0.0);

    for (p, i) in result.implied_probabilities.iter().zip(&io) {
        assert_relative_eq!(*p, i - (sum - 1.0) / 2.0, epsilon = 1e-12);
    }
}

#[test]
fn test_two_outcomes_certain_favourite_against_huge_price() {
    // S rounds to exactly 1, so there is no margin to explain
    let result = calculate_full(&[1.0, 1e300], &ShinConfig::default()).unwrap();
    assert_eq!(result.z, 0.0);
    assert!(result.implied_probabilities[1] > 0.0);
    assert!(result.implied_probabilities[0] <= 1.0);
}

#[test]
fn test_extreme_longshot_probability_is_positive() {
    for config in [
        ShinConfig::default(),
        ShinConfig::default().force_reference_solver(),
    ] {
        let result = calculate_full(&[f64::MAX, 2.0, 2.0], &config).unwrap();
        for p in &result.implied_probabilities {
            assert!(*p > 0.0 && *p < 1.0, "probability {} outside (0, 1)", p);
        }
    }

    // Long shot in a book with a real margin, z > 0
    let result = calculate_full(&[1e160, 1.8, 1.8, 3.0], &ShinConfig::default()).unwrap();
    assert!(result.z > 0.0);
    assert!(result.implied_probabilities[0] > 0.0);
    assert_relative_eq!(
        result.implied_probabilities.iter().sum::<f64>(),
        1.0,
        epsilon = 1e-9
    );
}

#[test]
fn test_two_outcomes_fully_priced_favourite() {
    // io = [1, 1] puts z at the edge of its domain
    assert!(matches!(
        implied_probabilities(&[1.0, 1.0]),
        Err(ShinError::DomainViolation { .. })
    ));
}

// ============================================================================
// Solver Strategies
// ============================================================================

#[test]
fn test_forced_reference_agrees_with_default() {
    let odds = [1.8, 4.2, 7.5, 9.0, 13.0];
    let fast = calculate_full(&odds, &ShinConfig::default()).unwrap();
    let slow = calculate_full(&odds, &ShinConfig::default().force_reference_solver()).unwrap();

    assert_relative_eq!(fast.z, slow.z, epsilon = 1e-9);
    for (a, b) in fast
        .implied_probabilities
        .iter()
        .zip(&slow.implied_probabilities)
    {
        assert_relative_eq!(*a, *b, epsilon = 1e-9);
    }
}

#[test]
fn test_large_book_parallel_reduction() {
    // Enough outcomes to cross the parallel threshold
    let odds: Vec<f64> = (0..5000).map(|i| 4500.0 + (i % 50) as f64 * 10.0).collect();

    let fast = calculate_with_solver(&odds, &ShinConfig::default(), &AcceleratedSolver::new())
        .unwrap();
    let slow = calculate_with_solver(&odds, &ShinConfig::default(), &ReferenceSolver).unwrap();

    assert_relative_eq!(fast.z, slow.z, epsilon = 1e-9);
    assert_relative_eq!(
        fast.implied_probabilities.iter().sum::<f64>(),
        1.0,
        epsilon = 1e-6
    );
}

#[test]
fn test_non_convergence_is_reported_not_raised() {
    let config = ShinConfig::default()
        .with_max_iterations(4)
        .with_full_output(true);
    let output = calculate_implied_probabilities(&[2.6, 2.4, 4.3], &config).unwrap();

    let ShinOutput::Full(full) = output else {
        panic!("expected full output");
    };
    assert_eq!(full.iterations, 4);
    assert!(full.delta > config.convergence_threshold);
    assert!(!full.converged(config.convergence_threshold));
}

#[test]
fn test_near_fair_three_way_stops_at_iteration_limit() {
    // Near-fair three-outcome books contract slowly; the iteration limit
    // ends the loop and the gap stays visible in delta.
    let config = ShinConfig::default();
    for run in [config, config.force_reference_solver()] {
        let result = calculate_full(&[2.9, 3.1, 3.0], &run).unwrap();
        assert_eq!(result.iterations, config.max_iterations);
        assert!(result.delta > config.convergence_threshold);
        assert!(!result.converged(config.convergence_threshold));
    }
}

#[test]
fn test_repeat_calls_bit_identical() {
    let odds = [2.6, 2.4, 4.3];
    for config in [
        ShinConfig::default(),
        ShinConfig::default().force_reference_solver(),
    ] {
        let a = calculate_full(&odds, &config).unwrap();
        let b = calculate_full(&odds, &config).unwrap();
        assert_eq!(a.z.to_bits(), b.z.to_bits());
        assert_eq!(a.delta.to_bits(), b.delta.to_bits());
        assert_eq!(a.iterations, b.iterations);
        for (x, y) in a.implied_probabilities.iter().zip(&b.implied_probabilities) {
            assert_eq!(x.to_bits(), y.to_bits());
        }
    }
}

#[test]
fn test_concurrent_calls() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            std::thread::spawn(move || {
                let odds = [1.9 + i as f64 * 0.02, 3.3, 4.0];
                calculate_full(&odds, &ShinConfig::default()).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let threaded = handle.join().unwrap();
        let odds = [1.9 + i as f64 * 0.02, 3.3, 4.0];
        let direct = calculate_full(&odds, &ShinConfig::default()).unwrap();
        assert_eq!(threaded, direct);
    }
}
