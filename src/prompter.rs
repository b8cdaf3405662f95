//! The engine's human-input boundary.
//!
//! Whenever resolving an effect needs a decision, the engine calls the
//! [`Prompter`]. Prompt strings are plain data for the caller to render
//! however it likes; the engine does no formatting, coloring, or layout.
//! [`ScriptedPrompter`] answers from a queue and backs the test suites;
//! it works equally well for a simple bot.

use std::collections::VecDeque;

use crate::cards::CardKind;

/// Collaborator that supplies player decisions.
pub trait Prompter {
    /// Ask for a card name (or shortcut). `None` means the player quit
    /// the prompt.
    fn choose_card_name(&mut self, prompt: &str) -> Option<String>;

    /// Ask a yes/no question.
    fn confirm(&mut self, prompt: &str) -> bool;

    /// Ask the player to pick one of `options`. `None` means none of
    /// them.
    fn choose_from(&mut self, prompt: &str, options: &[CardKind]) -> Option<CardKind>;
}

/// One queued reply for a [`ScriptedPrompter`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// Answer a name prompt with this token.
    Name(String),
    /// Quit a name prompt.
    Quit,
    /// Answer a confirm prompt.
    Yes,
    /// Decline a confirm prompt.
    No,
    /// Pick this option from a set.
    Pick(CardKind),
    /// Pick none of the offered options.
    Pass,
}

/// Prompter that replays a fixed script of replies.
///
/// Replies are consumed front to back; a reply of the wrong shape for the
/// prompt (or an exhausted script) declines, so a short script ends a
/// game of prompts gracefully instead of panicking mid-effect.
#[derive(Clone, Debug, Default)]
pub struct ScriptedPrompter {
    replies: VecDeque<Reply>,
}

impl ScriptedPrompter {
    /// Create an empty prompter that declines everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a prompter from a reply script.
    #[must_use]
    pub fn with_replies(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
        }
    }

    /// Append a reply to the script.
    pub fn push(&mut self, reply: Reply) {
        self.replies.push_back(reply);
    }

    /// Replies not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.replies.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn choose_card_name(&mut self, _prompt: &str) -> Option<String> {
        match self.replies.pop_front() {
            Some(Reply::Name(name)) => Some(name),
            _ => None,
        }
    }

    fn confirm(&mut self, _prompt: &str) -> bool {
        matches!(self.replies.pop_front(), Some(Reply::Yes))
    }

    fn choose_from(&mut self, _prompt: &str, options: &[CardKind]) -> Option<CardKind> {
        match self.replies.pop_front() {
            Some(Reply::Pick(kind)) if options.contains(&kind) => Some(kind),
            _ => None,
        }
    }
}
