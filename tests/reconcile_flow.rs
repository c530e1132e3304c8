//! Reconciliation against the file store on a real temporary directory.
//!
//! Walks one source path through the whole lifecycle: created on insert,
//! silent on re-save, rejected for another item, and never looping back.

use redirect_source::adapters::memory::CollectingMessenger;
use redirect_source::context::ServiceContext;
use redirect_source::host::ContentItem;
use redirect_source::ports::{RedirectStore, Severity};
use redirect_source::reconcile::{ReconciliationOutcome, Reconciler};
use redirect_source::source::RedirectSourceValue;
use redirect_source::store::FileRedirectStore;

fn item(id: u64, is_new: bool, path: &str) -> ContentItem {
    ContentItem { id, is_new, internal_path: path.into(), ..ContentItem::default() }
}

#[test]
fn lifecycle_of_a_source_path() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = ServiceContext::live();
    let store = FileRedirectStore::new(&ctx, dir.path());
    let sink = CollectingMessenger::new();
    let reconciler = Reconciler::new(&store, &sink);
    let source = RedirectSourceValue::from_path("/old-page").unwrap();

    // Insert: redirect created, pointing at the item.
    let created = reconciler.reconcile(&source, &item(1, true, "node/5")).unwrap();
    let Some(ReconciliationOutcome::Created { record }) = created else {
        panic!("expected creation, got {created:?}");
    };
    assert_eq!(record.id, 1);
    assert_eq!(record.destination.uri, "internal:/node/5");
    assert!(dir.path().join("redirects/1.yaml").exists());

    // The item with the matching id re-saves: nothing happens.
    let resave = reconciler.reconcile(&source, &item(1, false, "node/5")).unwrap();
    assert_eq!(resave, Some(ReconciliationOutcome::AlreadyRedirected { record_id: 1 }));

    // Another item claims the same source.
    let other = reconciler.reconcile(&source, &item(9, false, "node/9")).unwrap();
    assert!(matches!(other, Some(ReconciliationOutcome::Duplicate { existing_id: 1, .. })));

    // An item pointing its source at itself.
    let looped = reconciler
        .reconcile(&RedirectSourceValue::from_path("node/7").unwrap(), &item(7, true, "node/7"))
        .unwrap();
    assert!(matches!(looped, Some(ReconciliationOutcome::SelfLoop { .. })));

    assert_eq!(store.list().unwrap().len(), 1);
    let severities: Vec<Severity> = sink.messages().iter().map(|m| m.severity).collect();
    assert_eq!(severities, vec![Severity::Status, Severity::Error, Severity::Error]);
}

#[test]
fn store_survives_reopening() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = ServiceContext::live();
    let sink = CollectingMessenger::new();

    {
        let store = FileRedirectStore::new(&ctx, dir.path());
        Reconciler::new(&store, &sink)
            .reconcile(&RedirectSourceValue::from_path("legacy").unwrap(), &item(3, true, "node/3"))
            .unwrap();
    }

    let reopened = FileRedirectStore::new(&ctx, dir.path());
    let found = reopened.find_by_source_path("legacy").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].status_code, 301);
}
