use std::collections::VecDeque;

use crate::error::{BumpError, Result};
use crate::prompt::Chooser;

/// What a scripted chooser does once its picks run out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exhausted {
    NoTerminal,
    Cancel,
}

/// Chooser answering from a fixed list of picks, for testing
#[derive(Debug, Clone)]
pub struct ScriptedChooser {
    picks: VecDeque<usize>,
    exhausted: Exhausted,
    prompts: Vec<(String, Vec<String>)>,
}

impl ScriptedChooser {
    /// Answer with `picks` in order, then behave as if no terminal were attached
    pub fn new(picks: Vec<usize>) -> Self {
        ScriptedChooser {
            picks: picks.into(),
            exhausted: Exhausted::NoTerminal,
            prompts: Vec::new(),
        }
    }

    pub fn without_terminal() -> Self {
        Self::new(Vec::new())
    }

    /// Cancel every selection
    pub fn cancelling() -> Self {
        ScriptedChooser {
            exhausted: Exhausted::Cancel,
            ..Self::new(Vec::new())
        }
    }

    /// Every `(label, items)` pair presented so far
    pub fn prompts(&self) -> &[(String, Vec<String>)] {
        &self.prompts
    }
}

impl Chooser for ScriptedChooser {
    fn select(&mut self, label: &str, items: &[String]) -> Result<usize> {
        match self.picks.pop_front() {
            Some(index) => {
                self.prompts.push((label.to_string(), items.to_vec()));
                Ok(index)
            }
            None => match self.exhausted {
                Exhausted::NoTerminal => Err(BumpError::NoInteractiveTerminal),
                Exhausted::Cancel => Err(BumpError::cancelled("aborted by user")),
            },
        }
    }
}
