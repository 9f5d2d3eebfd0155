//! Editable form state
//!
//! [`EditableFormState`] owns the draft and the flags that describe where
//! its values came from. Every change of ISBN bumps an epoch; resolution
//! results carry the epoch they were issued for and are dropped when it no
//! longer matches.

use crate::error::GenerationError;
use stockbook_catalog::ExternalBook;
use stockbook_model::{BookDraft, DraftField, Isbn, Provenance, StoredBook};

/// Identifies the ISBN value a lookup was issued for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionTicket {
    isbn: Isbn,
    epoch: u64,
}

impl ResolutionTicket {
    /// ISBN to look up
    #[inline]
    #[must_use]
    pub fn isbn(&self) -> &Isbn {
        &self.isbn
    }
}

/// Identifies one pending ISBN generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationTicket(u64);

/// Effect of a field edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Value stored
    Applied,
    /// ISBN changed, dependent fields and provenance cleared
    IsbnReset,
    /// ISBN is read-only while a generated value is shown
    ReadOnly,
}

/// Draft plus provenance and UI flags
#[derive(Debug, Clone)]
pub struct EditableFormState {
    draft: BookDraft,
    initial: BookDraft,
    provenance: Provenance,
    data_loaded: bool,
    generate_isbn: bool,
    generation: Option<u64>,
    generation_seq: u64,
    epoch: u64,
}

impl EditableFormState {
    /// Empty form whose reset state is `initial`
    #[must_use]
    pub fn new(initial: BookDraft) -> Self {
        Self {
            draft: initial.clone(),
            initial,
            provenance: Provenance::None,
            data_loaded: false,
            generate_isbn: false,
            generation: None,
            generation_seq: 0,
            epoch: 0,
        }
    }

    /// Current values
    #[inline]
    #[must_use]
    pub fn draft(&self) -> &BookDraft {
        &self.draft
    }

    /// Origin of current values
    #[inline]
    #[must_use]
    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// Whether a lookup populated the form for the current ISBN
    #[inline]
    #[must_use]
    pub fn is_data_loaded(&self) -> bool {
        self.data_loaded
    }

    /// Whether the "generate instead of typing" toggle is on
    #[inline]
    #[must_use]
    pub fn generates_isbn(&self) -> bool {
        self.generate_isbn
    }

    /// Whether a generation is pending; the toggle is disabled meanwhile
    #[inline]
    #[must_use]
    pub fn generation_in_flight(&self) -> bool {
        self.generation.is_some()
    }

    /// Whether the ISBN field accepts typing
    #[inline]
    #[must_use]
    pub fn is_isbn_read_only(&self) -> bool {
        self.generate_isbn || self.generation.is_some()
    }

    /// Apply a user edit
    ///
    /// Editing the ISBN clears every dependent field, the provenance and the
    /// loaded flag, and invalidates outstanding lookups.
    pub fn edit(&mut self, field: DraftField, value: impl Into<String>) -> EditOutcome {
        if field != DraftField::Isbn {
            self.draft.set(field, value);
            return EditOutcome::Applied;
        }
        if self.is_isbn_read_only() {
            return EditOutcome::ReadOnly;
        }

        self.draft.isbn = value.into();
        self.draft.clear_except_isbn(&self.initial);
        self.provenance = Provenance::None;
        self.data_loaded = false;
        self.epoch += 1;
        EditOutcome::IsbnReset
    }

    /// Whether leaving the ISBN field should start a lookup
    #[must_use]
    pub fn should_resolve_on_blur(&self) -> bool {
        !self.draft.isbn.trim().is_empty()
            && !self.data_loaded
            && !self.generate_isbn
            && self.generation.is_none()
    }

    /// Ticket for looking up the current ISBN, if there is one
    #[must_use]
    pub fn ticket(&self) -> Option<ResolutionTicket> {
        Isbn::parse(&self.draft.isbn).ok().map(|isbn| ResolutionTicket {
            isbn,
            epoch: self.epoch,
        })
    }

    /// Whether a lookup result still applies
    #[must_use]
    pub fn is_current(&self, ticket: &ResolutionTicket) -> bool {
        ticket.epoch == self.epoch && ticket.isbn.matches(&self.draft.isbn)
    }

    /// Populate every field from the local inventory
    pub(crate) fn apply_local(&mut self, stored: &StoredBook) {
        let isbn = std::mem::take(&mut self.draft.isbn);
        self.draft.fill_from_record(&stored.record);
        self.draft.isbn = isbn;
        self.provenance = Provenance::Local;
        self.data_loaded = true;
    }

    /// Populate bibliographic fields from an external catalog
    pub(crate) fn apply_external(&mut self, book: &ExternalBook) {
        self.draft
            .fill_bibliographic(&book.title, &book.author, &book.publisher);
        self.provenance = Provenance::External;
        self.data_loaded = true;
    }

    /// Nothing found: keep only the ISBN
    pub(crate) fn apply_not_found(&mut self) {
        self.draft.clear_except_isbn(&self.initial);
        self.provenance = Provenance::None;
        self.data_loaded = false;
    }

    /// The current values were just written to the local inventory
    pub(crate) fn mark_saved(&mut self) {
        self.provenance = Provenance::Local;
    }

    /// Reserve the single generation slot
    ///
    /// # Errors
    /// Returns [`GenerationError::Busy`] while another generation is pending
    pub fn begin_generation(&mut self) -> Result<GenerationTicket, GenerationError> {
        if self.generation.is_some() {
            return Err(GenerationError::Busy);
        }
        self.generation_seq += 1;
        self.generation = Some(self.generation_seq);
        Ok(GenerationTicket(self.generation_seq))
    }

    /// Show a generated ISBN and lock the field
    ///
    /// Fields filled by a lookup belonged to the previous ISBN and are reset;
    /// values typed by hand are kept.
    ///
    /// # Errors
    /// Returns [`GenerationError::Stale`] if `ticket` is not the pending generation
    pub fn complete_generation(
        &mut self,
        ticket: GenerationTicket,
        isbn: &Isbn,
    ) -> Result<(), GenerationError> {
        self.release_generation(ticket)?;
        if self.data_loaded {
            self.draft.clear_except_isbn(&self.initial);
        }
        self.draft.isbn = isbn.to_string();
        self.provenance = Provenance::Generated;
        self.generate_isbn = true;
        self.data_loaded = false;
        self.epoch += 1;
        Ok(())
    }

    /// Generation failed: toggle off, ISBN cleared
    ///
    /// # Errors
    /// Returns [`GenerationError::Stale`] if `ticket` is not the pending generation
    pub fn fail_generation(&mut self, ticket: GenerationTicket) -> Result<(), GenerationError> {
        self.release_generation(ticket)?;
        self.clear_generated();
        Ok(())
    }

    /// Turn the toggle off by hand
    ///
    /// Returns `false` (and changes nothing) while a generation is pending.
    pub fn disable_generation(&mut self) -> bool {
        if self.generation.is_some() {
            return false;
        }
        self.clear_generated();
        true
    }

    /// Back to the initial empty state
    pub fn reset(&mut self) {
        self.draft = self.initial.clone();
        self.provenance = Provenance::None;
        self.data_loaded = false;
        self.generate_isbn = false;
        self.epoch += 1;
    }

    fn release_generation(&mut self, ticket: GenerationTicket) -> Result<(), GenerationError> {
        if self.generation != Some(ticket.0) {
            return Err(GenerationError::Stale);
        }
        self.generation = None;
        Ok(())
    }

    fn clear_generated(&mut self) {
        self.generate_isbn = false;
        self.draft.isbn.clear();
        self.provenance = Provenance::None;
        self.data_loaded = false;
        self.epoch += 1;
    }
}

impl Default for EditableFormState {
    fn default() -> Self {
        Self::new(BookDraft::new())
    }
}
