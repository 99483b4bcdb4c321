/// Property-based tests for bracket shape, advancement and layout.
use bracket_engine::{
    Bracket, BracketError, LayoutMetrics, Participant, Slot, capacity_for, generate_with_rng,
    offset_of,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn roster(count: usize) -> Vec<Participant> {
    (0..count).map(|i| Participant::new(format!("P{i}"))).collect()
}

fn bracket_for(count: usize, seed: u64) -> Bracket {
    generate_with_rng(&roster(count), &mut StdRng::seed_from_u64(seed))
        .expect("at least two participants")
}

/// First undecided match with someone seated, scanning rounds in order.
fn next_pending(bracket: &Bracket) -> Option<(usize, usize)> {
    bracket.rounds.iter().enumerate().find_map(|(r, round)| {
        round
            .matches
            .iter()
            .position(|m| m.is_pending())
            .map(|i| (r, i))
    })
}

proptest! {
    #[test]
    fn round_count_is_log2_of_capacity(count in 2usize..=64, seed in any::<u64>()) {
        let bracket = bracket_for(count, seed);
        let capacity = capacity_for(count);
        prop_assert!(capacity.is_power_of_two());
        prop_assert!(capacity >= count && capacity / 2 < count);
        prop_assert_eq!(bracket.round_count(), capacity.trailing_zeros() as usize);
        prop_assert_eq!(bracket.capacity(), capacity);
    }

    #[test]
    fn each_round_halves_down_to_one(count in 2usize..=64, seed in any::<u64>()) {
        let bracket = bracket_for(count, seed);
        for pair in bracket.rounds.windows(2) {
            prop_assert_eq!(pair[1].len() * 2, pair[0].len());
        }
        prop_assert_eq!(bracket.rounds.last().map(|r| r.len()), Some(1));
    }

    #[test]
    fn byes_are_decided_at_generation(count in 2usize..=64, seed in any::<u64>()) {
        let bracket = bracket_for(count, seed);
        for m in &bracket.rounds[0].matches {
            match m.populated_slots() {
                1 => prop_assert!(m.winner.is_some() && m.winner == m.slot_a.clone().or(m.slot_b.clone())),
                _ => prop_assert!(m.winner.is_none()),
            }
        }
        for round in &bracket.rounds[1..] {
            prop_assert!(round.matches.iter().all(|m| m.winner.is_none()));
        }
    }

    #[test]
    fn selection_fills_the_parity_slot(count in 2usize..=64, seed in any::<u64>(), pick_b in any::<bool>()) {
        let mut bracket = bracket_for(count, seed);
        while let Some((round, index)) = next_pending(&bracket) {
            let m = &bracket.rounds[round].matches[index];
            let pick = if pick_b {
                m.slot_b.clone().or_else(|| m.slot_a.clone())
            } else {
                m.slot_a.clone().or_else(|| m.slot_b.clone())
            };
            let pick = pick.expect("pending match has a participant");
            let next = bracket.select_winner(round, index, &pick).expect("pending match accepts a seated pick");

            prop_assert_eq!(next.rounds[round].matches[index].winner.as_ref(), Some(&pick));
            if !next.is_terminal(round) {
                let parent = &next.rounds[round + 1].matches[index / 2];
                prop_assert_eq!(parent.slot(Slot::fed_by(index)), Some(&pick));
                let sibling = bracket.rounds[round + 1].matches[index / 2].slot(Slot::fed_by(index).other());
                prop_assert_eq!(parent.slot(Slot::fed_by(index).other()), sibling);
            }
            bracket = next;
        }
        prop_assert!(bracket.is_complete());
    }

    #[test]
    fn decided_match_rejects_reselection(count in 2usize..=16, seed in any::<u64>()) {
        let bracket = bracket_for(count, seed);
        let (round, index) = next_pending(&bracket).expect("fresh bracket has a pending match");
        let pick = bracket.rounds[round].matches[index].slot_a.clone()
            .or(bracket.rounds[round].matches[index].slot_b.clone())
            .expect("pending match has a participant");
        let decided = bracket.select_winner(round, index, &pick).expect("first selection succeeds");
        prop_assert_eq!(
            decided.select_winner(round, index, &pick),
            Err(BracketError::MatchAlreadyDecided { round, index })
        );
    }

    #[test]
    fn parent_offset_is_feeder_midpoint(round in 0usize..8, index in 0usize..64, height in 1u32..200, gap in 0u32..60) {
        let (h, g) = (f64::from(height), f64::from(gap));
        let top = offset_of(round, 2 * index, h, g);
        let bottom = offset_of(round, 2 * index + 1, h, g);
        prop_assert_eq!(offset_of(round + 1, index, h, g), (top + bottom) / 2.0);
    }

    #[test]
    fn terminal_rows_are_exact(round in 0usize..8, index in 0usize..64) {
        let m = LayoutMetrics::TERMINAL;
        prop_assert_eq!(f64::from(m.offset_rows(round, index)), m.offset(round, index));
    }
}

#[test]
fn five_participants_scenario() {
    for seed in 0..32 {
        let bracket = bracket_for(5, seed);
        let first = &bracket.rounds[0].matches;
        assert_eq!(first.len(), 4);
        let seated: usize = first.iter().map(|m| m.populated_slots()).sum();
        assert_eq!(seated, 5);
        assert_eq!(first.iter().filter(|m| m.is_bye()).count(), 1);
        assert_eq!(first.iter().filter(|m| m.populated_slots() == 0).count(), 1);
    }
}

#[test]
fn snapshot_survives_json() {
    let bracket = bracket_for(6, 3);
    let json = serde_json::to_string(&bracket).expect("serialize");
    let back: Bracket = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, bracket);
}
