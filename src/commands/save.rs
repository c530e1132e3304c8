//! `redirect-source save` command.

use crate::cli::SaveArgs;
use crate::config::Settings;
use crate::context::ServiceContext;
use crate::host::{ContentItem, EntityKind};
use crate::reconcile::{ReconciliationOutcome, Reconciler};
use crate::source::{QueryMap, RedirectSourceValue};
use crate::store::FileRedirectStore;

/// Execute the `save` command.
///
/// Runs reconciliation for the described item against the file store.
/// Warnings and confirmations go through the context's messenger; only
/// store failures and invalid input are errors.
///
/// # Errors
///
/// Returns an error string if the input is invalid or the store fails.
pub fn run(ctx: &ServiceContext, settings: &Settings, args: &SaveArgs) -> Result<(), String> {
    let query = QueryMap::from_pairs(args.query.iter().map(String::as_str))?;
    let value = RedirectSourceValue::new(args.source.as_str(), query).map_err(|e| e.to_string())?;
    let host = ContentItem {
        id: args.id,
        is_new: args.new,
        internal_path: args.internal_path.clone(),
        title: args.title.clone(),
        kind: if args.config_entity { EntityKind::Config } else { EntityKind::Content },
    };

    let store = FileRedirectStore::new(ctx, &settings.store_root);
    let reconciler = Reconciler::new(&store, ctx.messages.as_ref())
        .with_status_code(settings.status_code)
        .with_edit_path(settings.edit_path_template.as_str());

    match reconciler.reconcile(&value, &host).map_err(|e| e.to_string())? {
        None => println!("Nothing to reconcile."),
        Some(ReconciliationOutcome::AlreadyRedirected { record_id }) => {
            println!("Redirect {record_id} already belongs to this item.");
        }
        Some(_) => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::ports::RedirectStore;

    fn settings() -> Settings {
        Settings { store_root: PathBuf::from("/store"), ..Settings::default() }
    }

    fn args(source: &str) -> SaveArgs {
        SaveArgs {
            id: 5,
            internal_path: "node/5".into(),
            source: source.into(),
            query: vec!["page=2".into()],
            title: Some("Five".into()),
            new: true,
            config_entity: false,
        }
    }

    #[test]
    fn save_creates_redirect_in_file_store() {
        let ctx = ServiceContext::in_memory();
        let settings = settings();

        run(&ctx, &settings, &args("old-page")).unwrap();

        let store = FileRedirectStore::new(&ctx, &settings.store_root);
        let records = store.find_by_source_path("old-page").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].destination.uri, "internal:/node/5");
        assert!(records[0].source.query().get("page").is_some());
    }

    #[test]
    fn second_save_of_other_item_does_not_create() {
        let ctx = ServiceContext::in_memory();
        let settings = settings();

        run(&ctx, &settings, &args("old-page")).unwrap();
        let other = SaveArgs { id: 6, internal_path: "node/6".into(), ..args("old-page") };
        run(&ctx, &settings, &other).unwrap();

        let store = FileRedirectStore::new(&ctx, &settings.store_root);
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn config_entity_is_not_reconciled() {
        let ctx = ServiceContext::in_memory();
        let settings = settings();

        let config = SaveArgs { config_entity: true, ..args("old-page") };
        run(&ctx, &settings, &config).unwrap();

        let store = FileRedirectStore::new(&ctx, &settings.store_root);
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn bad_query_pair_is_an_error() {
        let ctx = ServiceContext::in_memory();
        let bad = SaveArgs { query: vec!["nokey".into()], ..args("old-page") };
        assert!(run(&ctx, &settings(), &bad).is_err());
    }
}
