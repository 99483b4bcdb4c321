use crate::error::{BracketError, BracketResult};
use crate::{Bracket, Match, Participant, Slot};
use log::{debug, warn};

impl Bracket {
    /// Decide match `(round, index)` in favour of `participant` and seat the
    /// winner in the next round. Returns a new snapshot; `self` is unchanged.
    pub fn select_winner(
        &self,
        round: usize,
        index: usize,
        participant: &Participant,
    ) -> BracketResult<Bracket> {
        let target = self.checked_match(round, index)?;
        if target.is_decided() {
            debug!("round {round} match {index} already decided, ignoring {participant}");
            return Err(BracketError::MatchAlreadyDecided { round, index });
        }
        if target.slot_of(participant).is_none() {
            debug!("{participant} is not in round {round} match {index}");
            return Err(BracketError::InvalidParticipantForMatch {
                round,
                index,
                participant: participant.clone(),
            });
        }

        let mut next = self.clone();
        next.rounds[round].matches[index].winner = Some(participant.clone());
        next.seat_winner(round, index, participant.clone());
        Ok(next)
    }

    /// Copy a winner into the slot of the next round that match `index` feeds:
    /// even indices feed slot A, odd indices slot B. No-op on the final.
    pub(crate) fn seat_winner(&mut self, round: usize, index: usize, winner: Participant) {
        if self.is_terminal(round) {
            debug!("{winner} wins the final");
            return;
        }
        let slot = Slot::fed_by(index);
        if let Some(next) = self
            .rounds
            .get_mut(round + 1)
            .and_then(|r| r.matches.get_mut(index / 2))
        {
            debug!(
                "{winner} advances to round {} match {} slot {slot:?}",
                round + 1,
                index / 2
            );
            *next.slot_mut(slot) = Some(winner);
        }
    }

    /// Record a raw score entry for `participant`. Unparsable input counts as 0.
    /// Never selects a winner.
    pub fn update_score(
        &self,
        round: usize,
        index: usize,
        participant: &Participant,
        raw_score: &str,
    ) -> BracketResult<Bracket> {
        let target = self.checked_match(round, index)?;
        let slot = match target.slot_a.as_ref() {
            Some(a) if a == participant => Slot::A,
            _ => Slot::B,
        };
        let score = parse_score(raw_score);

        let mut next = self.clone();
        let m = &mut next.rounds[round].matches[index];
        match slot {
            Slot::A => m.score_a = score,
            Slot::B => m.score_b = score,
        }
        Ok(next)
    }

    fn checked_match(&self, round: usize, index: usize) -> BracketResult<&Match> {
        self.match_at(round, index)
            .ok_or(BracketError::MatchNotFound { round, index })
    }
}

/// Leading-integer parse: optional sign then digits, anything after is ignored.
/// Empty, non-numeric or overflowing input yields 0.
pub fn parse_score(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    match digits[..end].parse::<i64>() {
        Ok(value) if negative => -value,
        Ok(value) => value,
        Err(_) => {
            if !raw.trim().is_empty() {
                warn!("unparsable score {raw:?}, using 0");
            }
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate_seeded;

    fn p(name: &str) -> Participant {
        Participant::from(name)
    }

    fn four() -> Bracket {
        generate_seeded(&[p("A"), p("B"), p("C"), p("D")]).unwrap()
    }

    #[test]
    fn four_player_walkthrough() {
        let b = four();
        let b = b.select_winner(0, 0, &p("A")).unwrap();
        let b = b.select_winner(0, 1, &p("C")).unwrap();

        let final_match = b.final_match().unwrap();
        assert_eq!(final_match.slot_a, Some(p("A")));
        assert_eq!(final_match.slot_b, Some(p("C")));
        assert!(!b.is_complete());

        let b = b.select_winner(1, 0, &p("A")).unwrap();
        assert!(b.is_complete());
        assert_eq!(b.champion(), Some(&p("A")));
    }

    #[test]
    fn odd_index_feeds_slot_b() {
        let b = four().select_winner(0, 1, &p("D")).unwrap();
        let next = &b.rounds[1].matches[0];
        assert_eq!(next.slot_a, None);
        assert_eq!(next.slot_b, Some(p("D")));
    }

    #[test]
    fn previous_snapshot_is_untouched() {
        let before = four();
        let after = before.select_winner(0, 0, &p("B")).unwrap();
        assert_eq!(before.rounds[0].matches[0].winner, None);
        assert_eq!(before.rounds[1].matches[0].slot_a, None);
        assert_eq!(after.rounds[0].matches[0].winner, Some(p("B")));
    }

    #[test]
    fn reselecting_a_decided_match_is_rejected() {
        let b = four().select_winner(0, 0, &p("A")).unwrap();
        assert_eq!(
            b.select_winner(0, 0, &p("A")),
            Err(BracketError::MatchAlreadyDecided { round: 0, index: 0 })
        );
        assert_eq!(
            b.select_winner(0, 0, &p("B")),
            Err(BracketError::MatchAlreadyDecided { round: 0, index: 0 })
        );
    }

    #[test]
    fn outsider_is_rejected() {
        let err = four().select_winner(0, 0, &p("C")).unwrap_err();
        assert_eq!(
            err,
            BracketError::InvalidParticipantForMatch {
                round: 0,
                index: 0,
                participant: p("C"),
            }
        );
    }

    #[test]
    fn empty_match_rejects_any_selection() {
        let b = four();
        assert!(matches!(
            b.select_winner(1, 0, &p("A")),
            Err(BracketError::InvalidParticipantForMatch { .. })
        ));
    }

    #[test]
    fn out_of_range_is_not_found() {
        let b = four();
        assert_eq!(
            b.select_winner(5, 0, &p("A")),
            Err(BracketError::MatchNotFound { round: 5, index: 0 })
        );
        assert_eq!(
            b.update_score(0, 9, &p("A"), "3"),
            Err(BracketError::MatchNotFound { round: 0, index: 9 })
        );
    }

    #[test]
    fn bye_match_cannot_be_reselected() {
        let b = generate_seeded(&[p("A"), p("B"), p("C")]).unwrap();
        assert_eq!(
            b.select_winner(0, 1, &p("C")),
            Err(BracketError::MatchAlreadyDecided { round: 0, index: 1 })
        );
        let b = b.select_winner(0, 0, &p("B")).unwrap();
        let final_match = b.final_match().unwrap();
        assert_eq!(final_match.slot_a, Some(p("B")));
        assert_eq!(final_match.slot_b, Some(p("C")));
    }

    #[test]
    fn lone_slot_is_a_walkover() {
        // E sits alone in round 1 match 1; selecting E moves it to the final.
        let b = generate_seeded(&[p("A"), p("B"), p("C"), p("D"), p("E")]).unwrap();
        let b = b.select_winner(1, 1, &p("E")).unwrap();
        assert_eq!(b.final_match().unwrap().slot_b, Some(p("E")));
    }

    #[test]
    fn scores_go_to_the_matching_slot() {
        let b = four().update_score(0, 0, &p("A"), "21").unwrap();
        let b = b.update_score(0, 0, &p("B"), "17").unwrap();
        let m = &b.rounds[0].matches[0];
        assert_eq!((m.score_a, m.score_b), (21, 17));
        assert_eq!(m.winner, None);
    }

    #[test]
    fn garbage_score_becomes_zero() {
        let b = four().update_score(0, 0, &p("A"), "12").unwrap();
        let b = b.update_score(0, 0, &p("A"), "lots").unwrap();
        assert_eq!(b.rounds[0].matches[0].score_a, 0);
    }

    #[test]
    fn parse_score_takes_the_leading_integer() {
        assert_eq!(parse_score("42"), 42);
        assert_eq!(parse_score("  7"), 7);
        assert_eq!(parse_score("-3"), -3);
        assert_eq!(parse_score("+5"), 5);
        assert_eq!(parse_score("12abc"), 12);
        assert_eq!(parse_score("3.9"), 3);
        assert_eq!(parse_score(""), 0);
        assert_eq!(parse_score("-"), 0);
        assert_eq!(parse_score("abc"), 0);
        assert_eq!(parse_score("99999999999999999999999"), 0);
    }
}
