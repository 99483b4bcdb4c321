use crate::error::{BracketError, BracketResult};
use crate::generator::{generate, generate_with_rng};
use crate::roster::Roster;
use crate::{Bracket, Participant};
use log::{debug, info};
use rand::Rng;

pub const DEFAULT_TOURNAMENT_NAME: &str = "My Tournament";

/// Sole owner of the current bracket. Every successful mutation swaps in a
/// fresh snapshot; the replaced one is kept for [`undo`](Self::undo).
#[derive(Debug, Clone)]
pub struct TournamentSession {
    name: String,
    roster: Roster,
    score_tracking: bool,
    bracket: Option<Bracket>,
    history: Vec<Bracket>,
}

impl Default for TournamentSession {
    fn default() -> Self {
        Self::with_roster(Roster::default())
    }
}

impl TournamentSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_roster(roster: Roster) -> Self {
        Self {
            name: DEFAULT_TOURNAMENT_NAME.to_string(),
            roster,
            score_tracking: false,
            bracket: None,
            history: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Blank input keeps the current name. Returns whether the name changed.
    pub fn rename(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.name = name.to_string();
        true
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    pub fn score_tracking(&self) -> bool {
        self.score_tracking
    }

    /// Only honoured before a bracket exists. Returns whether the flag was applied.
    pub fn set_score_tracking(&mut self, enabled: bool) -> bool {
        if self.bracket.is_some() {
            debug!("score tracking is fixed while a bracket is live");
            return false;
        }
        self.score_tracking = enabled;
        true
    }

    pub fn bracket(&self) -> Option<&Bracket> {
        self.bracket.as_ref()
    }

    pub fn champion(&self) -> Option<&Participant> {
        self.bracket.as_ref()?.champion()
    }

    pub fn generate(&mut self) -> BracketResult<&Bracket> {
        let bracket = generate(self.roster.participants())?;
        Ok(self.install(bracket))
    }

    pub fn generate_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) -> BracketResult<&Bracket> {
        let bracket = generate_with_rng(self.roster.participants(), rng)?;
        Ok(self.install(bracket))
    }

    fn install(&mut self, bracket: Bracket) -> &Bracket {
        info!(
            "new bracket for {:?}: {} participants, {} rounds",
            self.name,
            self.roster.len(),
            bracket.round_count()
        );
        self.history.clear();
        self.bracket.insert(bracket)
    }

    pub fn select_winner(
        &mut self,
        round: usize,
        index: usize,
        participant: &Participant,
    ) -> BracketResult<()> {
        let current = self.bracket.as_ref().ok_or(BracketError::NoBracket)?;
        let next = current.select_winner(round, index, participant)?;
        self.commit(next);
        if let Some(champion) = self.champion() {
            info!("{champion} wins {:?}", self.name);
        }
        Ok(())
    }

    pub fn update_score(
        &mut self,
        round: usize,
        index: usize,
        participant: &Participant,
        raw_score: &str,
    ) -> BracketResult<()> {
        if !self.score_tracking {
            return Err(BracketError::ScoreTrackingDisabled);
        }
        let current = self.bracket.as_ref().ok_or(BracketError::NoBracket)?;
        let next = current.update_score(round, index, participant, raw_score)?;
        self.commit(next);
        Ok(())
    }

    fn commit(&mut self, next: Bracket) {
        if let Some(previous) = self.bracket.replace(next) {
            self.history.push(previous);
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Restore the snapshot before the last winner or score change.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.bracket = Some(previous);
                true
            }
            None => false,
        }
    }

    /// Discard the bracket entirely; the roster is kept for the next generate.
    pub fn reset(&mut self) {
        self.bracket = None;
        self.history.clear();
    }
}
