//! File intake: tracks the file chosen for each category and its readiness.
//!
//! Under the JSON protocol a choice only becomes ready once its text has been
//! read. Reads complete asynchronously and possibly out of order, so each
//! choice gets a [`ReadTicket`] and a completed read is applied only while its
//! ticket is the newest one for the category. Different categories never
//! touch each other's slot.
//!
//! Under the multipart protocol the original file is attached as is and the
//! slot is filled immediately.
//!
//! A failed read clears the category's slot and records an [`IntakeError`]
//! for the view. The orchestrator only ever sees readiness.

use std::collections::BTreeMap;

use log::{debug, warn};

use crate::error::IntakeError;
use crate::model::category::Category;
use crate::model::file_set::{CategoryFile, FileSet};

/// Identifies one pending read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadTicket {
    pub category: Category,
    seq: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileIntake<F> {
    files: FileSet<F>,
    pending: BTreeMap<Category, u64>,
    errors: BTreeMap<Category, IntakeError>,
    next_seq: u64,
}

impl<F> Default for FileIntake<F> {
    fn default() -> Self {
        Self {
            files: FileSet::new(),
            pending: BTreeMap::new(),
            errors: BTreeMap::new(),
            next_seq: 0,
        }
    }
}

impl<F> FileIntake<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &FileSet<F> {
        &self.files
    }

    pub fn is_ready(&self, category: Category) -> bool {
        self.files.is_ready(category)
    }

    pub fn any_ready(&self) -> bool {
        self.files.any_ready()
    }

    /// Whether a read for `category` is still outstanding.
    pub fn is_reading(&self, category: Category) -> bool {
        self.pending.contains_key(&category)
    }

    pub fn error(&self, category: Category) -> Option<&IntakeError> {
        self.errors.get(&category)
    }

    /// Registers a new file choice whose text is about to be read.
    ///
    /// Supersedes any read still pending for the same category.
    pub fn begin_read(&mut self, category: Category) -> ReadTicket {
        self.next_seq += 1;
        self.pending.insert(category, self.next_seq);
        self.errors.remove(&category);
        ReadTicket {
            category,
            seq: self.next_seq,
        }
    }

    /// Applies a finished read. Returns `false` when the ticket was superseded
    /// by a later choice and the result was discarded.
    pub fn finish_read(
        &mut self,
        ticket: ReadTicket,
        name: impl Into<String>,
        handle: F,
        result: Result<String, String>,
    ) -> bool {
        if self.pending.get(&ticket.category) != Some(&ticket.seq) {
            debug!("discarding stale read for {}", ticket.category);
            return false;
        }
        self.pending.remove(&ticket.category);

        match result {
            Ok(text) => {
                let name = name.into();
                debug!("{} file {} ready ({} bytes)", ticket.category, name, text.len());
                self.files
                    .set(ticket.category, CategoryFile::with_text(name, handle, text));
            }
            Err(message) => {
                let error = IntakeError {
                    category: ticket.category,
                    message,
                };
                warn!("{}", error);
                self.files.clear(ticket.category);
                self.errors.insert(ticket.category, error);
            }
        }
        true
    }

    /// Stores a file without reading it (multipart protocol).
    pub fn attach(&mut self, category: Category, name: impl Into<String>, handle: F) {
        self.pending.remove(&category);
        self.errors.remove(&category);
        self.files
            .set(category, CategoryFile::without_text(name, handle));
    }

    /// Page/session reset.
    pub fn reset(&mut self) {
        self.files.clear_all();
        self.pending.clear();
        self.errors.clear();
    }
}
