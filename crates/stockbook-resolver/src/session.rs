//! Add/update form session
//!
//! [`BookFormSession`] is owned by a single view. It feeds user events into
//! the form state, runs resolver calls, and turns every collaborator
//! failure into a notice instead of an error that escapes the view.
//!
//! Lookups and generations are split into begin/apply halves so a view
//! can run the resolver call concurrently with further input; results for
//! an outdated ISBN are discarded on apply.

use crate::config::ResolverConfig;
use crate::error::{GenerationError, SubmitError};
use crate::form::{EditOutcome, EditableFormState, GenerationTicket, ResolutionTicket};
use crate::notice::Notice;
use crate::publisher::{DropdownAction, DropdownKey, FocusTarget, PublisherDropdown, PublisherIndex};
use crate::resolver::{Resolution, Resolver, SubmitOutcome};
use std::sync::Arc;
use std::time::Instant;
use stockbook_catalog::TransportError;
use stockbook_model::{BookDraft, DraftField, Isbn, Provenance};

/// Notice shown while the allocator is working
pub const GENERATING: &str = "Generating ISBN automatically...";
/// Notice shown when a lookup fails
pub const LOOKUP_FAILED: &str = "There was an error looking up the book information.";
/// Notice shown when nothing is known about an ISBN
pub const NOT_FOUND: &str =
    "No information found for this ISBN. You can enter the data manually.";

/// What happened to a lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveStatus {
    /// No lookup was needed
    Skipped,
    /// Result merged into the form
    Applied(Provenance),
    /// ISBN changed since the lookup was issued; result dropped
    Stale,
    /// Collaborator unreachable; form untouched
    Failed,
}

/// State and event handling for one add/update form
#[derive(Debug)]
pub struct BookFormSession {
    resolver: Arc<Resolver>,
    config: ResolverConfig,
    form: EditableFormState,
    publishers: PublisherIndex,
    dropdown: PublisherDropdown,
    notice: Option<Notice>,
    pending_lookup: Option<ResolutionTicket>,
}

impl BookFormSession {
    /// Create session with an empty form
    #[must_use]
    pub fn new(resolver: Arc<Resolver>, config: ResolverConfig) -> Self {
        let initial = BookDraft::with_defaults(
            config.default_stock.to_string(),
            config.default_price.to_string(),
        );
        let dropdown = PublisherDropdown::new(config.dropdown_visible_rows);
        Self {
            resolver,
            config,
            form: EditableFormState::new(initial),
            publishers: PublisherIndex::new(),
            dropdown,
            notice: None,
            pending_lookup: None,
        }
    }

    /// Load publisher names; call once when the view mounts
    pub async fn start(&mut self) {
        // failure already surfaced as a notice
        let _ = self.refresh_publishers().await;
    }

    /// Shared resolver, for running lookups outside the session
    #[inline]
    #[must_use]
    pub fn resolver(&self) -> Arc<Resolver> {
        Arc::clone(&self.resolver)
    }

    /// Form state
    #[inline]
    #[must_use]
    pub fn form(&self) -> &EditableFormState {
        &self.form
    }

    /// Current draft
    #[inline]
    #[must_use]
    pub fn draft(&self) -> &BookDraft {
        self.form.draft()
    }

    /// Known publishers
    #[inline]
    #[must_use]
    pub fn publishers(&self) -> &PublisherIndex {
        &self.publishers
    }

    /// Publisher candidate list
    #[inline]
    #[must_use]
    pub fn dropdown(&self) -> &PublisherDropdown {
        &self.dropdown
    }

    /// Message currently shown
    #[inline]
    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Whether a lookup for the current ISBN is running (spinner)
    ///
    /// A lookup made stale by a later ISBN change no longer counts.
    #[must_use]
    pub fn is_lookup_pending(&self) -> bool {
        self.pending_lookup
            .as_ref()
            .is_some_and(|ticket| self.form.is_current(ticket))
    }

    /// Drop the notice once its lifetime has passed
    pub fn expire_notice(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notice = None;
        }
    }

    /// Apply a user edit
    pub fn edit(&mut self, field: DraftField, value: impl Into<String>) -> EditOutcome {
        let outcome = self.form.edit(field, value);
        if outcome != EditOutcome::ReadOnly {
            self.notice = None;
        }
        if field == DraftField::Publisher {
            self.dropdown
                .recompute(&self.form.draft().publisher, &self.publishers);
            self.dropdown.open();
        }
        outcome
    }

    /// Start a lookup for the current ISBN
    ///
    /// Returns `None` when the ISBN is empty.
    pub fn begin_resolution(&mut self) -> Option<ResolutionTicket> {
        let ticket = self.form.ticket()?;
        self.pending_lookup = Some(ticket.clone());
        Some(ticket)
    }

    /// Merge a lookup result, unless the ISBN changed meanwhile
    pub fn apply_resolution(
        &mut self,
        ticket: &ResolutionTicket,
        result: Result<Resolution, TransportError>,
    ) -> ResolveStatus {
        if self.pending_lookup.as_ref() == Some(ticket) {
            self.pending_lookup = None;
        }
        if !self.form.is_current(ticket) {
            tracing::debug!(isbn = %ticket.isbn(), "discarding result for outdated ISBN");
            return ResolveStatus::Stale;
        }

        match result {
            Ok(Resolution::Local(stored)) => {
                self.form.apply_local(&stored);
                self.refresh_dropdown();
                ResolveStatus::Applied(Provenance::Local)
            }
            Ok(Resolution::External(book)) => {
                let source = book
                    .source
                    .clone()
                    .unwrap_or_else(|| self.config.external_source_fallback.clone());
                self.form.apply_external(&book);
                self.refresh_dropdown();
                self.notice = Some(Notice::info(format!(
                    "Data obtained from {source}. You may edit it if needed."
                )));
                ResolveStatus::Applied(Provenance::External)
            }
            Ok(Resolution::NotFound) => {
                self.form.apply_not_found();
                self.refresh_dropdown();
                self.notice = Some(Notice::info(NOT_FOUND));
                ResolveStatus::Applied(Provenance::None)
            }
            Err(err) => {
                tracing::warn!(isbn = %ticket.isbn(), error = %err, "lookup failed");
                self.notice = Some(Notice::error(LOOKUP_FAILED));
                ResolveStatus::Failed
            }
        }
    }

    /// Look up the current ISBN and merge the result
    pub async fn autocomplete(&mut self) -> ResolveStatus {
        let Some(ticket) = self.begin_resolution() else {
            return ResolveStatus::Skipped;
        };
        let result = self.resolver.resolve(ticket.isbn()).await;
        self.apply_resolution(&ticket, result)
    }

    /// Focus left the ISBN field
    pub async fn isbn_blur(&mut self) -> ResolveStatus {
        if !self.form.should_resolve_on_blur() {
            return ResolveStatus::Skipped;
        }
        self.autocomplete().await
    }

    /// Reserve the generation slot
    ///
    /// # Errors
    /// Returns [`GenerationError::Busy`] while another generation is pending
    pub fn begin_generation(&mut self) -> Result<GenerationTicket, GenerationError> {
        let ticket = self.form.begin_generation()?;
        self.notice = Some(Notice::info(GENERATING));
        Ok(ticket)
    }

    /// Apply an allocator result
    ///
    /// # Errors
    /// Returns the generation failure after resetting the toggle and ISBN,
    /// or [`GenerationError::Stale`] for a ticket that is not pending
    pub fn finish_generation(
        &mut self,
        ticket: GenerationTicket,
        result: Result<Isbn, GenerationError>,
    ) -> Result<Isbn, GenerationError> {
        match result {
            Ok(isbn) => {
                self.form.complete_generation(ticket, &isbn)?;
                tracing::info!(%isbn, "ISBN generated");
                self.notice = Some(Notice::success(format!(
                    "ISBN generated automatically: {isbn}"
                )));
                Ok(isbn)
            }
            Err(err) => {
                self.form.fail_generation(ticket)?;
                tracing::warn!(error = %err, "ISBN generation failed");
                self.notice = Some(Notice::error(err.to_string()));
                Err(err)
            }
        }
    }

    /// Ask the allocator for an ISBN and show it
    ///
    /// # Errors
    /// See [`Self::begin_generation`] and [`Self::finish_generation`]
    pub async fn generate_isbn(&mut self) -> Result<Isbn, GenerationError> {
        let ticket = self.begin_generation()?;
        let result = self.resolver.generate().await;
        self.finish_generation(ticket, result)
    }

    /// The "generate instead of typing" toggle changed
    ///
    /// Turning it on generates; turning it off clears the generated ISBN.
    ///
    /// # Errors
    /// Generation failures, see [`Self::generate_isbn`]
    pub async fn set_generate_isbn(&mut self, on: bool) -> Result<Option<Isbn>, GenerationError> {
        if on {
            return self.generate_isbn().await.map(Some);
        }
        if !self.form.disable_generation() {
            return Err(GenerationError::Busy);
        }
        self.notice = None;
        Ok(None)
    }

    /// Validate and write the form
    ///
    /// On create the form is reset; on any write a non-empty publisher
    /// refreshes the publisher index. Failures leave the form untouched.
    ///
    /// # Errors
    /// Returns [`SubmitError`]; the same message is also set as notice
    pub async fn submit(&mut self) -> Result<SubmitOutcome, SubmitError> {
        let outcome = match self.resolver.submit(self.form.draft()).await {
            Ok(outcome) => outcome,
            Err(err) => {
                if let SubmitError::Transport(transport) = &err {
                    tracing::warn!(error = %transport, "submission failed");
                }
                self.notice = Some(Notice::error(err.to_string()));
                return Err(err);
            }
        };

        let ttl = self.config.notice_ttl();
        self.notice = Some(Notice::success(outcome.message()).expiring(Instant::now(), ttl));

        let refresh = outcome.written().is_some() && self.form.draft().has_publisher();

        match &outcome {
            SubmitOutcome::Created(_) => {
                self.form.reset();
                self.dropdown.close();
                self.refresh_dropdown();
            }
            SubmitOutcome::Updated { .. } => self.form.mark_saved(),
            SubmitOutcome::NoChanges(_) => {}
        }

        if refresh {
            if let Err(err) = self.refresh_publishers().await {
                tracing::warn!(error = %err, "publisher refresh after write failed");
            }
        }
        Ok(outcome)
    }

    /// Reload publisher names from the inventory
    ///
    /// # Errors
    /// Returns [`TransportError`]; the current index is kept
    pub async fn refresh_publishers(&mut self) -> Result<(), TransportError> {
        match self.resolver.publishers().await {
            Ok(names) => {
                if self.publishers.replace(names) {
                    self.refresh_dropdown();
                }
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "could not load publishers");
                if self.notice.is_none() {
                    self.notice = Some(Notice::error("Could not load publishers."));
                }
                Err(err)
            }
        }
    }

    /// Key pressed in the publisher input
    pub fn publisher_key(&mut self, key: DropdownKey) -> DropdownAction {
        let action = self.dropdown.key(key);
        if let DropdownAction::Selected(name) = &action {
            self.choose_publisher(name.clone());
        }
        action
    }

    /// Candidate clicked
    pub fn select_publisher(&mut self, row: usize) -> Option<String> {
        let name = self.dropdown.select(row)?;
        self.choose_publisher(name.clone());
        Some(name)
    }

    /// Focus moved
    pub fn focus(&mut self, target: FocusTarget) -> DropdownAction {
        self.dropdown.focus(target)
    }

    /// Back to an empty form ("refresh" button)
    pub fn clear(&mut self) {
        if self.form.generation_in_flight() {
            return;
        }
        self.form.reset();
        self.dropdown.close();
        self.refresh_dropdown();
        self.notice = None;
    }

    fn choose_publisher(&mut self, name: String) {
        self.form.edit(DraftField::Publisher, name);
        self.refresh_dropdown();
    }

    fn refresh_dropdown(&mut self) {
        self.dropdown
            .recompute(&self.form.draft().publisher, &self.publishers);
    }
}
