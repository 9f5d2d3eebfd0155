//! Collaborator call contracts of the resolver.
//!
//! Mocks assert which collaborators are consulted (and how often) for each
//! lookup and submission path.

use async_trait::async_trait;
use mockall::mock;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use stockbook_catalog::{
    ExternalBook, ExternalCatalog, GeneratedIsbn, IsbnAllocator, LocalInventory, TransportError,
    WriteOutcome,
};
use stockbook_model::{BookDraft, BookId, BookRecord, DraftField, Isbn, Provenance, StoredBook};
use stockbook_resolver::{
    BookFormSession, NoticeKind, Resolution, ResolveStatus, Resolver, ResolverConfig,
    SubmitError, SubmitOutcome,
};
use stockbook_test_utils::{dune, minimal_draft, odyssey, LOCAL_ISBN};

mock! {
    pub Inventory {}

    #[async_trait]
    impl LocalInventory for Inventory {
        async fn find_by_isbn(&self, isbn: &Isbn) -> Result<Option<StoredBook>, TransportError>;
        async fn list_all(&self) -> Result<Vec<StoredBook>, TransportError>;
        async fn create(&self, record: &BookRecord) -> Result<WriteOutcome, TransportError>;
        async fn update(
            &self,
            id: BookId,
            record: &BookRecord,
        ) -> Result<WriteOutcome, TransportError>;
        async fn list_publishers(&self) -> Result<Vec<String>, TransportError>;
    }
}

mock! {
    pub Catalog {}

    #[async_trait]
    impl ExternalCatalog for Catalog {
        async fn find_external(&self, isbn: &Isbn) -> Result<Option<ExternalBook>, TransportError>;
    }
}

mock! {
    pub Allocator {}

    #[async_trait]
    impl IsbnAllocator for Allocator {
        async fn generate_isbn(&self) -> Result<GeneratedIsbn, TransportError>;
    }
}

fn resolver(
    inventory: MockInventory,
    catalog: MockCatalog,
    allocator: MockAllocator,
) -> Arc<Resolver> {
    Arc::new(Resolver::new(
        Arc::new(inventory),
        Arc::new(catalog),
        Arc::new(allocator),
    ))
}

fn stored_dune() -> StoredBook {
    StoredBook::new(BookId(42), dune())
}

#[tokio::test]
async fn local_hit_never_consults_external_catalog() {
    let mut inventory = MockInventory::new();
    inventory
        .expect_find_by_isbn()
        .times(1)
        .returning(|_| Ok(Some(stored_dune())));
    let mut catalog = MockCatalog::new();
    catalog.expect_find_external().never();

    let resolver = resolver(inventory, catalog, MockAllocator::new());
    let resolution = resolver.resolve(&dune().isbn).await.unwrap();

    assert_eq!(resolution.provenance(), Provenance::Local);
    assert_eq!(resolution, Resolution::Local(stored_dune()));
}

#[tokio::test]
async fn local_miss_falls_through_to_external() {
    let mut inventory = MockInventory::new();
    inventory.expect_find_by_isbn().times(1).returning(|_| Ok(None));
    let mut catalog = MockCatalog::new();
    catalog
        .expect_find_external()
        .times(1)
        .returning(|_| Ok(Some(odyssey())));

    let resolver = resolver(inventory, catalog, MockAllocator::new());
    let resolution = resolver
        .resolve(&Isbn::parse("9780140449136").unwrap())
        .await
        .unwrap();

    assert_eq!(resolution, Resolution::External(odyssey()));
}

#[tokio::test]
async fn unknown_everywhere_is_not_found() {
    let mut inventory = MockInventory::new();
    inventory.expect_find_by_isbn().returning(|_| Ok(None));
    let mut catalog = MockCatalog::new();
    catalog.expect_find_external().returning(|_| Ok(None));

    let resolver = resolver(inventory, catalog, MockAllocator::new());
    let resolution = resolver.resolve(&Isbn::parse("111").unwrap()).await.unwrap();
    assert_eq!(resolution, Resolution::NotFound);
    assert_eq!(resolution.provenance(), Provenance::None);
}

#[tokio::test]
async fn invalid_forms_never_reach_collaborators() {
    let mut invalid = Vec::new();
    for field in [
        DraftField::Isbn,
        DraftField::Title,
        DraftField::Author,
        DraftField::Location,
    ] {
        let mut draft = minimal_draft("111");
        draft.set(field, "");
        invalid.push(draft);
    }
    let mut low_stock = minimal_draft("111");
    low_stock.set(DraftField::Stock, "0");
    invalid.push(low_stock);
    let mut negative_price = minimal_draft("111");
    negative_price.set(DraftField::Price, "-0.5");
    invalid.push(negative_price);

    for draft in invalid {
        let mut inventory = MockInventory::new();
        inventory.expect_find_by_isbn().never();
        inventory.expect_create().never();
        inventory.expect_update().never();

        let resolver = resolver(inventory, MockCatalog::new(), MockAllocator::new());
        let err = resolver.submit(&draft).await.unwrap_err();
        assert!(err.is_local(), "expected validation error, got {err}");
    }
}

#[tokio::test]
async fn externally_known_book_is_created_not_updated() {
    let mut inventory = MockInventory::new();
    inventory.expect_find_by_isbn().times(1).returning(|_| Ok(None));
    inventory
        .expect_create()
        .withf(|record| record.title == "T")
        .times(1)
        .returning(|_| Ok(WriteOutcome::applied()));
    inventory.expect_update().never();
    let mut catalog = MockCatalog::new();
    catalog.expect_find_external().never();

    let resolver = resolver(inventory, catalog, MockAllocator::new());
    let outcome = resolver.submit(&minimal_draft("9780140449136")).await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Created(_)));
}

#[tokio::test]
async fn unchanged_record_skips_update() {
    let mut inventory = MockInventory::new();
    inventory
        .expect_find_by_isbn()
        .returning(|_| Ok(Some(stored_dune())));
    inventory.expect_update().never();

    let mut draft = BookDraft::new();
    draft.fill_from_record(&dune());
    draft.set(DraftField::Price, "9.990");

    let resolver = resolver(inventory, MockCatalog::new(), MockAllocator::new());
    let outcome = resolver.submit(&draft).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::NoChanges(BookId(42)));
}

#[tokio::test]
async fn update_targets_existing_surrogate_id() {
    let mut inventory = MockInventory::new();
    inventory
        .expect_find_by_isbn()
        .returning(|_| Ok(Some(stored_dune())));
    inventory
        .expect_update()
        .withf(|id, record| *id == BookId(42) && record.stock == 7)
        .times(1)
        .returning(|_, _| Ok(WriteOutcome::applied()));

    let mut draft = BookDraft::new();
    draft.fill_from_record(&dune());
    draft.set(DraftField::Stock, "7");

    let resolver = resolver(inventory, MockCatalog::new(), MockAllocator::new());
    let outcome = resolver.submit(&draft).await.unwrap();
    assert_eq!(
        outcome.message(),
        "Book updated successfully. Fields changed: stock (3 → 7)."
    );
}

#[tokio::test]
async fn rejected_update_message_is_verbatim() {
    let mut inventory = MockInventory::new();
    inventory
        .expect_find_by_isbn()
        .returning(|_| Ok(Some(stored_dune())));
    inventory
        .expect_update()
        .returning(|_, _| Ok(WriteOutcome::rejected("Ubicación inválida")));

    let mut draft = BookDraft::new();
    draft.fill_from_record(&dune());
    draft.set(DraftField::Location, "??");

    let resolver = resolver(inventory, MockCatalog::new(), MockAllocator::new());
    match resolver.submit(&draft).await {
        Err(SubmitError::Rejected(message)) => assert_eq!(message, "Ubicación inválida"),
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn rejected_create_preserves_form() {
    let mut inventory = MockInventory::new();
    inventory.expect_list_publishers().returning(|| Ok(Vec::new()));
    inventory.expect_find_by_isbn().returning(|_| Ok(None));
    inventory
        .expect_create()
        .returning(|_| Ok(WriteOutcome::rejected("duplicate ISBN")));
    let mut catalog = MockCatalog::new();
    catalog.expect_find_external().returning(|_| Ok(None));

    let resolver = resolver(inventory, catalog, MockAllocator::new());
    let mut session = BookFormSession::new(resolver, ResolverConfig::new());
    session.start().await;

    session.edit(DraftField::Isbn, "111");
    session.edit(DraftField::Title, "T");
    session.edit(DraftField::Author, "A");
    session.edit(DraftField::Location, "Shelf1");

    let err = session.submit().await.unwrap_err();
    assert_eq!(err.to_string(), "duplicate ISBN");
    assert_eq!(session.notice().unwrap().text, "duplicate ISBN");
    assert_eq!(session.draft().title, "T");
    assert_eq!(session.draft().isbn, "111");
}

#[tokio::test]
async fn lookup_transport_error_leaves_form_untouched() {
    let mut inventory = MockInventory::new();
    inventory
        .expect_find_by_isbn()
        .returning(|_| Err(TransportError::unavailable("connection refused")));
    let mut catalog = MockCatalog::new();
    catalog.expect_find_external().never();

    let resolver = resolver(inventory, catalog, MockAllocator::new());
    let mut session = BookFormSession::new(resolver, ResolverConfig::new());
    session.edit(DraftField::Isbn, LOCAL_ISBN);
    session.edit(DraftField::Title, "typed by hand");

    assert_eq!(session.autocomplete().await, ResolveStatus::Failed);
    assert_eq!(session.form().provenance(), Provenance::None);
    assert_eq!(session.draft().title, "typed by hand");
    assert_eq!(
        session.notice().unwrap().text,
        "There was an error looking up the book information."
    );
}

#[tokio::test]
async fn submit_transport_error_is_retryable() {
    let mut inventory = MockInventory::new();
    inventory
        .expect_find_by_isbn()
        .returning(|_| Err(TransportError::Timeout { timeout_ms: 5000 }));
    inventory.expect_create().never();

    let resolver = resolver(inventory, MockCatalog::new(), MockAllocator::new());
    let err = resolver.submit(&minimal_draft("111")).await.unwrap_err();
    assert!(err.is_retryable());
}

#[tokio::test]
async fn allocator_transport_error_resets_toggle() {
    let mut allocator = MockAllocator::new();
    allocator
        .expect_generate_isbn()
        .times(1)
        .returning(|| Err(TransportError::unavailable("allocator down")));

    let resolver = resolver(MockInventory::new(), MockCatalog::new(), allocator);
    let mut session = BookFormSession::new(resolver, ResolverConfig::new());

    assert!(session.set_generate_isbn(true).await.is_err());
    assert!(!session.form().generates_isbn());
    assert!(!session.form().generation_in_flight());
    assert_eq!(session.draft().isbn, "");
}

#[tokio::test]
async fn failed_publisher_load_at_start_shows_notice() {
    let mut inventory = MockInventory::new();
    inventory
        .expect_list_publishers()
        .times(1)
        .returning(|| Err(TransportError::unavailable("connection refused")));

    let resolver = resolver(inventory, MockCatalog::new(), MockAllocator::new());
    let mut session = BookFormSession::new(resolver, ResolverConfig::new());
    session.start().await;

    let notice = session.notice().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.text, "Could not load publishers.");
    assert!(session.publishers().is_empty());
}

#[tokio::test]
async fn failed_refresh_after_create_keeps_success_notice_and_index() {
    let mut inventory = MockInventory::new();
    let mut loaded = false;
    inventory
        .expect_list_publishers()
        .times(2)
        .returning(move || {
            if loaded {
                Err(TransportError::Timeout { timeout_ms: 5000 })
            } else {
                loaded = true;
                Ok(vec!["Ace".to_string()])
            }
        });
    inventory.expect_find_by_isbn().returning(|_| Ok(None));
    inventory
        .expect_create()
        .times(1)
        .returning(|_| Ok(WriteOutcome::applied()));

    let resolver = resolver(inventory, MockCatalog::new(), MockAllocator::new());
    let mut session = BookFormSession::new(resolver, ResolverConfig::new());
    session.start().await;
    assert!(session.notice().is_none());

    session.edit(DraftField::Isbn, "111");
    session.edit(DraftField::Title, "T");
    session.edit(DraftField::Author, "A");
    session.edit(DraftField::Location, "Shelf1");
    session.edit(DraftField::Publisher, "Gollancz");

    let outcome = session.submit().await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Created(_)));

    let notice = session.notice().unwrap();
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.text, "Book created with a stock of 1 unit(s).");
    assert_eq!(session.publishers().iter().collect::<Vec<_>>(), vec!["Ace"]);
}
