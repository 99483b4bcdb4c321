use crate::error::{BracketError, BracketResult};
use crate::{Bracket, Match, Participant, Round};
use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;

/// Smallest power of two that can seat `count` participants.
pub fn capacity_for(count: usize) -> usize {
    count.max(1).next_power_of_two()
}

/// Build a bracket from a uniformly shuffled copy of `participants`.
pub fn generate(participants: &[Participant]) -> BracketResult<Bracket> {
    generate_with_rng(participants, &mut rand::rng())
}

/// Same as [`generate`] with a caller-supplied RNG, so seeding is reproducible.
pub fn generate_with_rng<R: Rng + ?Sized>(
    participants: &[Participant],
    rng: &mut R,
) -> BracketResult<Bracket> {
    ensure_enough(participants)?;
    let mut shuffled = participants.to_vec();
    // Fisher-Yates, unlike a random-sign comparator sort.
    shuffled.shuffle(rng);
    Ok(build(shuffled))
}

/// Seed `participants` exactly in the order given: position `2i` and `2i+1`
/// meet in first-round match `i`.
pub fn generate_seeded(participants: &[Participant]) -> BracketResult<Bracket> {
    ensure_enough(participants)?;
    Ok(build(participants.to_vec()))
}

fn ensure_enough(participants: &[Participant]) -> BracketResult<()> {
    if participants.len() < 2 {
        debug!("rejecting generate with {} participant(s)", participants.len());
        return Err(BracketError::InsufficientParticipants {
            count: participants.len(),
        });
    }
    Ok(())
}

fn build(order: Vec<Participant>) -> Bracket {
    let capacity = capacity_for(order.len());
    let mut entries = order.into_iter();

    let first: Vec<Match> = (0..capacity / 2)
        .map(|_| Match::paired(entries.next(), entries.next()))
        .collect();
    let byes = first.iter().filter(|m| m.is_bye()).count();

    let mut rounds = vec![Round { matches: first }];
    let mut len = capacity / 2;
    while len > 1 {
        len /= 2;
        rounds.push(Round {
            matches: vec![Match::default(); len],
        });
    }

    let mut bracket = Bracket { rounds };
    // A bye is already decided, so it can never be selected again; seat its
    // winner now. The receiving match is left undecided.
    let bye_winners: Vec<(usize, Participant)> = bracket.rounds[0]
        .matches
        .iter()
        .enumerate()
        .filter(|(_, m)| m.is_bye())
        .filter_map(|(i, m)| m.winner.clone().map(|w| (i, w)))
        .collect();
    for (index, winner) in bye_winners {
        bracket.seat_winner(0, index, winner);
    }

    debug!(
        "generated bracket: capacity {capacity}, {} rounds, {byes} bye(s)",
        bracket.round_count()
    );
    bracket
}
