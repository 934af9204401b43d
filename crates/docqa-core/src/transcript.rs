//! Append-only question/answer log.
//!
//! Storage is a shared `Arc<Vec<_>>`. Snapshots clone the `Arc`; appends go
//! through [`Arc::make_mut`], which copies the vector only while a snapshot
//! still holds the old one. A snapshot therefore never changes after it is
//! handed out.

use std::ops::Deref;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One answered question. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaItem {
    pub question: String,
    pub answer: String,
    /// Client capture time when the answer was accepted.
    pub timestamp: DateTime<Utc>,
}

/// Ordered transcript for the current document.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    items: Arc<Vec<QaItem>>,
}

impl Transcript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answered question, stamped with the current time.
    pub fn append(&mut self, question: impl Into<String>, answer: impl Into<String>) -> &QaItem {
        self.append_at(question, answer, Utc::now())
    }

    /// Record an answered question with an explicit capture time.
    pub fn append_at(
        &mut self,
        question: impl Into<String>,
        answer: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> &QaItem {
        let items = Arc::make_mut(&mut self.items);
        items.push(QaItem {
            question: question.into(),
            answer: answer.into(),
            timestamp,
        });
        &items[items.len() - 1]
    }

    pub fn clear(&mut self) {
        // Fresh storage; outstanding snapshots keep the old vector.
        self.items = Arc::default();
    }

    #[must_use]
    pub fn snapshot(&self) -> TranscriptSnapshot {
        TranscriptSnapshot(Arc::clone(&self.items))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Read-only view of the transcript at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranscriptSnapshot(Arc<Vec<QaItem>>);

impl TranscriptSnapshot {
    #[must_use]
    pub fn to_vec(&self) -> Vec<QaItem> {
        self.0.as_ref().clone()
    }
}

impl Deref for TranscriptSnapshot {
    type Target = [QaItem];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
