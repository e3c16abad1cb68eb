// SPDX-License-Identifier: MPL-2.0
//! Linked list of sibling media files.
//!
//! The listing service returns one `{cur, prev, next}` triple per file. The
//! ordering is open-ended: the first entry has no `prev` and the last has no
//! `next`. Wrap-around is a slideshow policy layered on top, not a property of
//! the list.

use crate::error::NavigationError;
use serde::{Deserialize, Serialize};

/// One file's position among its siblings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaEntry {
    pub cur: String,
    pub prev: Option<String>,
    pub next: Option<String>,
}

impl MediaEntry {
    /// Returns true if `id` is this entry's file or one of its neighbours.
    #[must_use]
    pub fn references(&self, id: &str) -> bool {
        self.cur == id || self.prev.as_deref() == Some(id) || self.next.as_deref() == Some(id)
    }
}

/// Ordered sibling files of one kind in one directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaList {
    entries: Vec<MediaEntry>,
}

impl MediaList {
    /// Wraps entries as returned by the server, without checking linkage.
    #[must_use]
    pub fn new(entries: Vec<MediaEntry>) -> Self {
        Self { entries }
    }

    /// Builds a consistently linked list from identifiers in display order.
    #[must_use]
    pub fn from_identifiers<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        let entries = ids
            .iter()
            .enumerate()
            .map(|(i, cur)| MediaEntry {
                cur: cur.clone(),
                prev: i.checked_sub(1).map(|p| ids[p].clone()),
                next: ids.get(i + 1).cloned(),
            })
            .collect();
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[MediaEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Head of the list; slideshow wrap-around lands here.
    #[must_use]
    pub fn first(&self) -> Option<&MediaEntry> {
        self.entries.first()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&MediaEntry> {
        self.entries.get(index)
    }

    /// Index of the entry whose `cur` is `id`.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.cur == id)
    }

    /// Returns the entry whose `cur` is `id`.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::NotInList`] when no entry matches.
    pub fn current(&self, id: &str) -> Result<&MediaEntry, NavigationError> {
        self.entries
            .iter()
            .find(|e| e.cur == id)
            .ok_or_else(|| NavigationError::NotInList(id.to_string()))
    }

    /// True if `id` appears anywhere in the list, as a file or a neighbour.
    ///
    /// This is the staleness test applied to a persisted list: a list that
    /// does not mention the viewed file belongs to another directory.
    #[must_use]
    pub fn contains_reference(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.references(id))
    }

    /// Checks that adjacent entries agree on their links and that the ends
    /// are open.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::BrokenLink`] naming the entry after which
    /// linkage breaks.
    pub fn validate(&self) -> Result<(), NavigationError> {
        if let Some(first) = self.entries.first() {
            if first.prev.is_some() {
                return Err(NavigationError::BrokenLink { index: 0 });
            }
        }
        if let Some(last) = self.entries.last() {
            if last.next.is_some() {
                return Err(NavigationError::BrokenLink {
                    index: self.entries.len() - 1,
                });
            }
        }
        for (index, pair) in self.entries.windows(2).enumerate() {
            let (a, b) = (&pair[0], &pair[1]);
            if a.next.as_deref() != Some(b.cur.as_str()) || b.prev.as_deref() != Some(a.cur.as_str())
            {
                return Err(NavigationError::BrokenLink { index });
            }
        }
        Ok(())
    }

    /// Iterates identifiers in list order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.cur.as_str())
    }
}
