use crate::Participant;
use crate::error::{BracketError, BracketResult};
use serde::{Deserialize, Serialize};

/// Ordered, duplicate-permitting list of participant names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    entries: Vec<Participant>,
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            entries: (1..=4).map(|n| Participant::new(format!("Team {n}"))).collect(),
        }
    }
}

impl Roster {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// One participant per non-blank line.
    pub fn from_lines(text: &str) -> Self {
        Self {
            entries: text
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(Participant::from)
                .collect(),
        }
    }

    pub fn participants(&self) -> &[Participant] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Participant> {
        self.entries.get(index)
    }

    pub fn add(&mut self, name: &str) -> BracketResult<()> {
        let name = clean(name)?;
        self.entries.push(Participant::from(name));
        Ok(())
    }

    /// Replace the name at `index`. A blank name is rejected and the old one kept.
    pub fn rename(&mut self, index: usize, name: &str) -> BracketResult<()> {
        let name = clean(name)?;
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(BracketError::ParticipantNotFound { index })?;
        *entry = Participant::from(name);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> BracketResult<Participant> {
        if index >= self.entries.len() {
            return Err(BracketError::ParticipantNotFound { index });
        }
        Ok(self.entries.remove(index))
    }
}

fn clean(name: &str) -> BracketResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(BracketError::EmptyParticipantName);
    }
    Ok(name)
}
