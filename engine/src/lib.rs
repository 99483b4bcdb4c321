pub mod advance;
pub mod error;
pub mod generator;
pub mod layout;
pub mod roster;
pub mod session;

pub use error::{BracketError, BracketResult};
pub use generator::{capacity_for, generate, generate_seeded, generate_with_rng};
pub use layout::{LayoutMetrics, offset_of};
pub use roster::Roster;
pub use session::TournamentSession;

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Domain types
// ---------------------------------------------------------------------------

/// A display name entered by the user. Uniqueness is not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Participant(String);

impl Participant {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Participant {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for Participant {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Which of the two positions of a match a participant occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slot {
    A,
    B,
}

impl Slot {
    /// Slot fed by the winner of match `index` in the previous round.
    pub fn fed_by(index: usize) -> Self {
        if index % 2 == 0 { Slot::A } else { Slot::B }
    }

    pub fn other(self) -> Self {
        match self {
            Slot::A => Slot::B,
            Slot::B => Slot::A,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub slot_a: Option<Participant>,
    pub slot_b: Option<Participant>,
    /// Always equal to `slot_a` or `slot_b` when set.
    pub winner: Option<Participant>,
    pub score_a: i64,
    pub score_b: i64,
}

impl Match {
    /// Pair two entries, auto-advancing the lone participant of a bye.
    pub fn paired(slot_a: Option<Participant>, slot_b: Option<Participant>) -> Self {
        let winner = match (&slot_a, &slot_b) {
            (Some(a), None) => Some(a.clone()),
            (None, Some(b)) => Some(b.clone()),
            _ => None,
        };
        Self {
            slot_a,
            slot_b,
            winner,
            ..Self::default()
        }
    }

    pub fn slot(&self, slot: Slot) -> Option<&Participant> {
        match slot {
            Slot::A => self.slot_a.as_ref(),
            Slot::B => self.slot_b.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, slot: Slot) -> &mut Option<Participant> {
        match slot {
            Slot::A => &mut self.slot_a,
            Slot::B => &mut self.slot_b,
        }
    }

    pub fn score(&self, slot: Slot) -> i64 {
        match slot {
            Slot::A => self.score_a,
            Slot::B => self.score_b,
        }
    }

    /// Slot holding `participant`, checking A first (duplicate names resolve to A).
    pub fn slot_of(&self, participant: &Participant) -> Option<Slot> {
        if self.slot_a.as_ref() == Some(participant) {
            Some(Slot::A)
        } else if self.slot_b.as_ref() == Some(participant) {
            Some(Slot::B)
        } else {
            None
        }
    }

    pub fn populated_slots(&self) -> usize {
        usize::from(self.slot_a.is_some()) + usize::from(self.slot_b.is_some())
    }

    pub fn is_bye(&self) -> bool {
        self.populated_slots() == 1
    }

    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }

    /// Both slots filled and no winner yet.
    pub fn is_playable(&self) -> bool {
        self.populated_slots() == 2 && !self.is_decided()
    }

    /// At least one participant seated and no winner yet. A lone participant
    /// here is a walkover that still needs an explicit selection.
    pub fn is_pending(&self) -> bool {
        self.populated_slots() > 0 && !self.is_decided()
    }

    pub fn winning_slot(&self) -> Option<Slot> {
        self.winner.as_ref().and_then(|w| self.slot_of(w))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub matches: Vec<Match>,
}

impl Round {
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn decided(&self) -> usize {
        self.matches.iter().filter(|m| m.is_decided()).count()
    }
}

/// All rounds of a single-elimination tournament, first round at index 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    pub rounds: Vec<Round>,
}

impl Bracket {
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    /// Number of first-round positions: always a power of two.
    pub fn capacity(&self) -> usize {
        self.rounds.first().map(|r| r.len() * 2).unwrap_or(0)
    }

    pub fn round(&self, round: usize) -> Option<&Round> {
        self.rounds.get(round)
    }

    pub fn match_at(&self, round: usize, index: usize) -> Option<&Match> {
        self.rounds.get(round)?.matches.get(index)
    }

    pub fn is_terminal(&self, round: usize) -> bool {
        round + 1 == self.rounds.len()
    }

    pub fn final_match(&self) -> Option<&Match> {
        self.rounds.last()?.matches.first()
    }

    pub fn champion(&self) -> Option<&Participant> {
        self.final_match()?.winner.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.champion().is_some()
    }

    /// "Final" for the terminal round, otherwise "Round N" counting from 1.
    pub fn round_label(&self, round: usize) -> String {
        if self.is_terminal(round) {
            "Final".to_string()
        } else {
            format!("Round {}", round + 1)
        }
    }
}

pub fn is_complete(bracket: &Bracket) -> bool {
    bracket.is_complete()
}

pub fn champion_of(bracket: &Bracket) -> Option<&Participant> {
    bracket.champion()
}
