//! Session transcript management.
//!
//! The transcript is an explicit [`Conversation`] object passed into the
//! pipeline, not ambient session state. Turns are appended in arrival order
//! (oldest first); callers that want newest-first display reverse at the
//! edge.

use crate::types::{ConversationTurn, Speaker};
use std::collections::VecDeque;

/// An in-memory, single-session conversation transcript.
#[derive(Debug, Default, Clone)]
pub struct Conversation {
    max_tokens: usize,
    turns: VecDeque<ConversationTurn>,
}

impl Conversation {
    /// Create a transcript bounded by an estimated token budget.
    ///
    /// A budget of 0 disables trimming.
    pub fn new(max_tokens: usize) -> Self {
        Self {
            max_tokens,
            turns: VecDeque::new(),
        }
    }

    /// Append a user turn.
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.push(ConversationTurn::new(Speaker::User, text));
    }

    /// Append an assistant turn.
    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.push(ConversationTurn::new(Speaker::Assistant, text));
    }

    fn push(&mut self, turn: ConversationTurn) {
        self.turns.push_back(turn);
        self.trim_if_needed();
    }

    /// Turns in call order, oldest first.
    pub fn turns(&self) -> impl Iterator<Item = &ConversationTurn> {
        self.turns.iter()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Render the transcript for prompt interpolation.
    ///
    /// One `"<label> : <text>"` line per turn, call order preserved.
    pub fn transcript(&self) -> String {
        let mut out = String::new();
        for turn in &self.turns {
            out.push_str(turn.speaker.transcript_label());
            out.push_str(" : ");
            out.push_str(&turn.text);
            out.push('\n');
        }
        out
    }

    fn trim_if_needed(&mut self) {
        if self.max_tokens == 0 {
            return;
        }
        // Rough token estimate (4 chars ~ 1 token); drop oldest turns first.
        while self.estimate_tokens() > self.max_tokens && self.turns.len() > 1 {
            self.turns.pop_front();
        }
    }

    fn estimate_tokens(&self) -> usize {
        self.turns.iter().map(|t| t.text.len() / 4).sum()
    }
}
