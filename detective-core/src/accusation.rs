//! Final judgment: count the evidence against an accused suspect.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

use crate::clues::ClueSet;
use crate::suspects::SuspectLookup;

/// Minimum number of clues that must point at the accused for the
/// accusation to stand.
pub const EVIDENCE_THRESHOLD: usize = 2;

/// Whether the evidence backs an accusation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Supported,
    Unsupported,
}

impl Verdict {
    /// The verdict for a given evidence count.
    pub fn from_count(count: usize) -> Self {
        if count >= EVIDENCE_THRESHOLD {
            Verdict::Supported
        } else {
            Verdict::Unsupported
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, Verdict::Supported)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Supported => write!(f, "supported"),
            Verdict::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// Outcome of the accusation phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Judgment {
    /// No clues were collected, so nobody can be accused on evidence.
    NoEvidence,
    /// The accusation was blank; nothing was counted.
    NoAccusation,
    /// The evidence was counted against `accused`.
    Decided {
        accused: String,
        count: usize,
        verdict: Verdict,
    },
}

impl Judgment {
    /// Evidence count, if counting took place or was moot.
    ///
    /// `NoEvidence` counts as zero; `NoAccusation` has no count at all.
    pub fn count(&self) -> Option<usize> {
        match self {
            Judgment::NoEvidence => Some(0),
            Judgment::NoAccusation => None,
            Judgment::Decided { count, .. } => Some(*count),
        }
    }

    pub fn verdict(&self) -> Option<Verdict> {
        match self {
            Judgment::NoEvidence => Some(Verdict::Unsupported),
            Judgment::NoAccusation => None,
            Judgment::Decided { verdict, .. } => Some(*verdict),
        }
    }
}

/// Count the clues in `clues` whose suspect matches `accused`.
///
/// Suspect names are compared case-insensitively. Every clue is looked up
/// exactly once; the order of the walk does not affect the result.
pub fn evaluate<L>(clues: &ClueSet, index: &L, accused: &str) -> usize
where
    L: SuspectLookup + ?Sized,
{
    let accused = accused.to_lowercase();
    clues
        .iter()
        .filter_map(|clue| index.suspect_for(clue))
        .filter(|suspect| suspect.to_lowercase() == accused)
        .count()
}

/// Judge an accusation against the collected clues.
///
/// An empty notebook short-circuits to [`Judgment::NoEvidence`] without any
/// lookups; a blank accusation is declined before counting.
pub fn judge<L>(clues: &ClueSet, index: &L, accused: &str) -> Judgment
where
    L: SuspectLookup + ?Sized,
{
    if clues.is_empty() {
        return Judgment::NoEvidence;
    }

    let accused = accused.trim();
    if accused.is_empty() {
        return Judgment::NoAccusation;
    }

    let count = evaluate(clues, index, accused);
    let verdict = Verdict::from_count(count);
    info!(accused, count, %verdict, "accusation judged");

    Judgment::Decided {
        accused: accused.to_string(),
        count,
        verdict,
    }
}
