use crate::error::{AppError, AppResult};

use super::{Role, Turn};

/// Ordered, append-only turn log for one conversation
///
/// Alternation between roles is not enforced; consecutive turns from the
/// same role are accepted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DialogueMemory {
    turns: Vec<Turn>,
}

impl DialogueMemory {
    /// Creates an empty log
    pub fn new() -> Self {
        Self { turns: Vec::new() }
    }

    /// Appends a turn, rejecting blank content
    pub fn append(&mut self, role: Role, content: impl Into<String>) -> AppResult<()> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(AppError::InvalidTurn(format!(
                "{} turn content cannot be empty",
                role.as_str()
            )));
        }

        self.turns.push(Turn { role, content });
        Ok(())
    }

    /// Read-only view of every turn in conversation order
    pub fn snapshot(&self) -> &[Turn] {
        &self.turns
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Number of turns produced by `role`
    pub fn count(&self, role: Role) -> usize {
        self.turns.iter().filter(|t| t.role == role).count()
    }
}
