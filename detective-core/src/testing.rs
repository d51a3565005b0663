//! Testing utilities for the detective game.
//!
//! This module provides tools for integration testing:
//! - `TestHarness` for scripted walks through a case
//! - Assertion helpers for verifying notebook contents and verdicts

use crate::accusation::{Judgment, Verdict};
use crate::case::{CaseError, CaseFile};
use crate::exploration::{Choice, InvalidChoice, Step};
use crate::investigation::{Investigation, InvestigationConfig, Level};

/// Test harness for running scripted investigations.
pub struct TestHarness {
    /// The investigation under test.
    pub game: Investigation,
    /// Every step taken, in order.
    pub steps: Vec<Step>,
}

impl TestHarness {
    /// Create a harness on the standard mansion at Master level, already
    /// standing in the entrance hall.
    pub fn new() -> Self {
        Self::with_level(Level::Master)
    }

    /// Create a harness on the standard mansion at the given level.
    pub fn with_level(level: Level) -> Self {
        let config = InvestigationConfig::standard().with_level(level);
        Self::from_config(config).expect("the standard case is always valid")
    }

    /// Create a harness on a custom case at Master level.
    pub fn with_case(case: CaseFile) -> Result<Self, CaseError> {
        Self::from_config(InvestigationConfig::standard().with_case(case))
    }

    fn from_config(config: InvestigationConfig) -> Result<Self, CaseError> {
        let mut game = Investigation::new(config)?;
        game.start();
        Ok(Self {
            game,
            steps: Vec::new(),
        })
    }

    /// Apply one choice.
    pub fn choose(&mut self, choice: Choice) -> &Step {
        let step = self.game.choose(choice);
        self.steps.push(step);
        self.last_step()
    }

    /// Apply a line of player input, as typed at the prompt.
    pub fn input(&mut self, line: &str) -> Result<&Step, InvalidChoice> {
        let choice = line.parse::<Choice>()?;
        Ok(self.choose(choice))
    }

    /// Apply a script of choice keys, e.g. `"eds"`. Unknown keys are
    /// skipped the way the console skips invalid input.
    pub fn walk(&mut self, script: &str) -> &mut Self {
        for key in script.chars() {
            if let Ok(choice) = key.to_string().parse::<Choice>() {
                self.choose(choice);
            }
        }
        self
    }

    /// Names of the rooms entered after the entrance, in order.
    pub fn rooms_entered(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter_map(|step| match step {
                Step::Moved(visit) => Some(visit.room_name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Collected clues in alphabetical order.
    pub fn collected(&self) -> Vec<&str> {
        self.game.collected_clues()
    }

    /// Accuse a suspect. `None` if the level has no accusation phase.
    pub fn accuse(&self, accused: &str) -> Option<Judgment> {
        self.game.accuse(accused)
    }

    /// Whether exploration has ended.
    pub fn is_over(&self) -> bool {
        self.game.is_over()
    }

    fn last_step(&self) -> &Step {
        &self.steps[self.steps.len() - 1]
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert the notebook holds exactly `expected`, in order.
#[track_caller]
pub fn assert_collected(harness: &TestHarness, expected: &[&str]) {
    let actual = harness.collected();
    assert_eq!(
        actual, expected,
        "Expected notebook {expected:?}, got {actual:?}"
    );
}

/// Assert that accusing `accused` yields `count` clues and `verdict`.
#[track_caller]
pub fn assert_verdict(harness: &TestHarness, accused: &str, count: usize, verdict: Verdict) {
    let judgment = harness.accuse(accused);
    let actual = judgment.as_ref().map(|j| (j.count(), j.verdict()));
    assert_eq!(
        actual,
        Some((Some(count), Some(verdict))),
        "Expected {count} clue(s) and a {verdict} verdict against '{accused}', got {judgment:?}"
    );
}

/// Assert exploration has ended.
#[track_caller]
pub fn assert_over(harness: &TestHarness) {
    assert!(harness.is_over(), "Expected exploration to be over");
}

/// Assert exploration is still in progress.
#[track_caller]
pub fn assert_exploring(harness: &TestHarness) {
    assert!(!harness.is_over(), "Expected exploration to continue");
}
