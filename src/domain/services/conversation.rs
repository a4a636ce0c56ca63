#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;

use crate::domain::models::Turn;

/// Turns of the current chat in display order. Only ever grows at the end, or
/// shrinks from the end when a request is rolled back.
#[derive(Clone, Debug, Default)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn remove_last(&mut self) -> Option<Turn> {
        return self.turns.pop();
    }

    pub fn all(&self) -> &[Turn] {
        return &self.turns;
    }

    pub fn last(&self) -> Option<&Turn> {
        return self.turns.last();
    }

    pub fn len(&self) -> usize {
        return self.turns.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.turns.is_empty();
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}
