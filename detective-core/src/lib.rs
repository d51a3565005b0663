//! Detective Quest engine: explore a mansion, collect clues, accuse a suspect.
//!
//! This crate provides:
//! - An ordered clue notebook (binary search tree)
//! - A chained hash index from clues to suspects
//! - Evidence counting and the final verdict
//! - The mansion room graph, case files, and the exploration state machine
//!
//! The crate never reads from or writes to the console; front-ends render
//! the values it returns.
//!
//! # Quick Start
//!
//! ```
//! use detective_core::{Choice, Investigation, InvestigationConfig, Verdict};
//!
//! let mut game = Investigation::new(InvestigationConfig::standard())?;
//! game.start();
//! game.choose(Choice::Right); // kitchen
//! game.choose(Choice::Right); // master bedroom, a dead end
//! assert!(game.is_over());
//!
//! let judgment = game.accuse("sr. silva").expect("master level has an accusation");
//! assert_eq!(judgment.verdict(), Some(Verdict::Supported));
//! # Ok::<(), detective_core::CaseError>(())
//! ```

pub mod accusation;
pub mod case;
pub mod clues;
pub mod exploration;
pub mod investigation;
pub mod mansion;
pub mod suspects;
pub mod testing;

// Primary public API
pub use accusation::{evaluate, judge, Judgment, Verdict, EVIDENCE_THRESHOLD};
pub use case::{CaseError, CaseFile, RoomSpec};
pub use clues::ClueSet;
pub use exploration::{Choice, Exploration, InvalidChoice, Step, Visit};
pub use investigation::{Investigation, InvestigationConfig, Level, Teardown};
pub use mansion::{Mansion, Room, RoomId};
pub use suspects::{SuspectAssociation, SuspectIndex, SuspectLookup};
pub use testing::TestHarness;

/// Cut `text` to at most `max_len` bytes without splitting a character.
pub(crate) fn bounded(text: &str, max_len: usize) -> &str {
    if text.len() <= max_len {
        return text;
    }
    let mut end = max_len;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
