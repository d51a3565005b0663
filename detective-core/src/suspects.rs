//! Clue-to-suspect index.
//!
//! A fixed-size hash table with one singly linked chain per bucket. Buckets
//! are chosen with the djb2 string hash; entries inside a bucket are matched
//! by exact string comparison. The table never resizes.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::bounded;
use crate::clues::MAX_CLUE_LEN;

/// Number of buckets in the index. A prime, fixed for the life of the table.
pub const BUCKET_COUNT: usize = 101;

/// Maximum stored length of a suspect name, in bytes.
pub const MAX_SUSPECT_LEN: usize = 63;

/// djb2 hash of `text`, reduced to a bucket number.
pub fn bucket_for(text: &str) -> usize {
    let hash = text.bytes().fold(5381u64, |hash, byte| {
        // hash * 33 + byte
        (hash << 5).wrapping_add(hash).wrapping_add(u64::from(byte))
    });
    (hash % BUCKET_COUNT as u64) as usize
}

/// A clue and the suspect it points to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspectAssociation {
    pub clue: String,
    pub suspect: String,
}

impl SuspectAssociation {
    pub fn new(clue: impl Into<String>, suspect: impl Into<String>) -> Self {
        Self {
            clue: clue.into(),
            suspect: suspect.into(),
        }
    }
}

/// The seed associations of the standard mansion case.
pub fn standard_associations() -> Vec<SuspectAssociation> {
    [
        ("pegadas_no_chao", "Sr. Silva"),
        ("livro_aberto_sobre_enigmas", "Sra. Almeida"),
        ("faca_limpa_na_mesa", "Sr. Silva"),
        ("mapa_rasgado_com_x", "Dr. Costa"),
        ("vaso_quebrado", "Sra. Almeida"),
        ("cofre_trancado_com_simbolos", "Dr. Costa"),
        ("retrato_antigo_quebrado", "Sr. Oliveira"),
    ]
    .into_iter()
    .map(|(clue, suspect)| SuspectAssociation::new(clue, suspect))
    .collect()
}

/// Anything the accusation evaluator can ask "who does this clue point to?".
pub trait SuspectLookup {
    /// The suspect associated with `clue`, if any.
    fn suspect_for(&self, clue: &str) -> Option<&str>;
}

type Chain = Option<Box<Entry>>;

#[derive(Debug)]
struct Entry {
    clue: String,
    suspect: String,
    next: Chain,
}

/// Hash index from clue text to suspect name.
///
/// Re-associating a clue overwrites its suspect: the last association wins.
#[derive(Debug)]
pub struct SuspectIndex {
    buckets: Vec<Chain>,
    len: usize,
}

impl Default for SuspectIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl SuspectIndex {
    /// Create an empty index with [`BUCKET_COUNT`] buckets.
    pub fn new() -> Self {
        Self {
            buckets: std::iter::repeat_with(|| None).take(BUCKET_COUNT).collect(),
            len: 0,
        }
    }

    /// Build an index by associating each entry in turn.
    pub fn from_associations<I>(associations: I) -> Self
    where
        I: IntoIterator<Item = SuspectAssociation>,
    {
        let mut index = Self::new();
        for SuspectAssociation { clue, suspect } in associations {
            index.associate(&clue, &suspect);
        }
        index
    }

    /// The index seeded with [`standard_associations`].
    pub fn standard() -> Self {
        Self::from_associations(standard_associations())
    }

    /// Point `clue` at `suspect`.
    ///
    /// An existing entry for the same clue has its suspect replaced; a new
    /// clue is prepended to its bucket's chain. Blank clues are ignored.
    pub fn associate(&mut self, clue: &str, suspect: &str) {
        let clue = bounded(clue, MAX_CLUE_LEN);
        if clue.trim().is_empty() {
            return;
        }
        let suspect = bounded(suspect, MAX_SUSPECT_LEN);
        let bucket = bucket_for(clue);

        let mut cursor = self.buckets[bucket].as_deref_mut();
        while let Some(entry) = cursor {
            if entry.clue == clue {
                debug!(clue, previous = %entry.suspect, suspect, "association overwritten");
                entry.suspect = suspect.to_string();
                return;
            }
            cursor = entry.next.as_deref_mut();
        }

        let head = self.buckets[bucket].take();
        self.buckets[bucket] = Some(Box::new(Entry {
            clue: clue.to_string(),
            suspect: suspect.to_string(),
            next: head,
        }));
        self.len += 1;
        trace!(clue, suspect, bucket, "association added");
    }

    /// The suspect associated with `clue`, or `None` if the clue is unknown.
    pub fn lookup(&self, clue: &str) -> Option<&str> {
        let clue = bounded(clue, MAX_CLUE_LEN);
        if clue.trim().is_empty() {
            return None;
        }
        let bucket = bucket_for(clue);
        let found = self
            .chain(bucket)
            .find(|entry| entry.clue == clue)
            .map(|entry| entry.suspect.as_str());
        trace!(clue, bucket, found = found.is_some(), "suspect lookup");
        found
    }

    /// Number of distinct clues in the index.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// How many entries hold exactly `clue`. Always 0 or 1.
    pub fn entries_for(&self, clue: &str) -> usize {
        let clue = bounded(clue, MAX_CLUE_LEN);
        (0..self.buckets.len())
            .flat_map(|bucket| self.chain(bucket))
            .filter(|entry| entry.clue == clue)
            .count()
    }

    /// Clues stored in `bucket`, most recently added first.
    pub fn bucket_clues(&self, bucket: usize) -> Vec<&str> {
        if bucket >= self.buckets.len() {
            return Vec::new();
        }
        self.chain(bucket).map(|entry| entry.clue.as_str()).collect()
    }

    /// All associations, bucket by bucket. Order is unspecified.
    pub fn associations(&self) -> Vec<SuspectAssociation> {
        (0..self.buckets.len())
            .flat_map(|bucket| self.chain(bucket))
            .map(|entry| SuspectAssociation::new(entry.clue.as_str(), entry.suspect.as_str()))
            .collect()
    }

    /// Release every chain entry, returning how many were released.
    ///
    /// The index keeps its buckets and can be reused afterwards.
    pub fn clear(&mut self) -> usize {
        let mut released = 0;
        for slot in &mut self.buckets {
            let mut cursor = slot.take();
            while let Some(mut entry) = cursor {
                cursor = entry.next.take();
                released += 1;
            }
        }
        self.len = 0;
        released
    }

    fn chain(&self, bucket: usize) -> ChainIter<'_> {
        ChainIter {
            cursor: self.buckets[bucket].as_deref(),
        }
    }
}

impl Drop for SuspectIndex {
    fn drop(&mut self) {
        self.clear();
    }
}

impl SuspectLookup for SuspectIndex {
    fn suspect_for(&self, clue: &str) -> Option<&str> {
        self.lookup(clue)
    }
}

struct ChainIter<'a> {
    cursor: Option<&'a Entry>,
}

impl<'a> Iterator for ChainIter<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.cursor?;
        self.cursor = entry.next.as_deref();
        Some(entry)
    }
}
