//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the rules. Published
//! node counts assume every promotion piece is available, so compare them
//! against a [`PromotionPolicy::Choice`](crate::rules::PromotionPolicy) rule set.

use crate::rules::RuleSet;
use crate::Position;

/// Counts the number of leaf nodes at the given depth.
pub fn perft<R: RuleSet>(rules: &R, position: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = rules.generate_moves(position);

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for m in &moves {
        let mut next = position.clone();
        rules.apply(&mut next, *m);
        nodes += perft(rules, &next, depth - 1);
    }
    nodes
}

/// Perft with divide - shows node count for each move at depth-1.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide<R: RuleSet>(rules: &R, position: &Position, depth: u32) -> Vec<(String, u64)> {
    let moves = rules.generate_moves(position);
    let mut results = Vec::with_capacity(moves.len());

    for m in &moves {
        let mut next = position.clone();
        rules.apply(&mut next, *m);
        let nodes = if depth > 1 {
            perft(rules, &next, depth - 1)
        } else {
            1
        };
        results.push((m.to_uci(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
