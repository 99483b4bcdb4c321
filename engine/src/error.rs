//! Bracket engine error types.

use crate::Participant;
use thiserror::Error;

/// Every rejected engine operation leaves the caller's bracket untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BracketError {
    /// Fewer than two participants
    #[error("At least 2 participants are required, got {count}")]
    InsufficientParticipants { count: usize },

    /// The chosen participant is in neither slot of the match
    #[error("{participant} is not playing in round {round} match {index}")]
    InvalidParticipantForMatch {
        round: usize,
        index: usize,
        participant: Participant,
    },

    /// The match already has a winner
    #[error("Round {round} match {index} is already decided")]
    MatchAlreadyDecided { round: usize, index: usize },

    /// Position outside the bracket
    #[error("No match at round {round} index {index}")]
    MatchNotFound { round: usize, index: usize },

    /// Session operation issued before a bracket was generated
    #[error("No bracket has been generated")]
    NoBracket,

    /// Score entry while score tracking is off
    #[error("Score tracking is disabled")]
    ScoreTrackingDisabled,

    /// Blank participant name
    #[error("Participant name cannot be empty")]
    EmptyParticipantName,

    /// Roster index out of range
    #[error("No participant at position {index}")]
    ParticipantNotFound { index: usize },
}

/// Result type for bracket operations
pub type BracketResult<T> = Result<T, BracketError>;
