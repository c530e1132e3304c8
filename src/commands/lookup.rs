//! `redirect-source lookup` command.

use crate::config::Settings;
use crate::context::ServiceContext;
use crate::ports::RedirectStore;
use crate::store::FileRedirectStore;

/// Execute the `lookup` command.
///
/// Prints every redirect whose source path equals `path`.
///
/// # Errors
///
/// Returns an error string if the store cannot be read.
pub fn run(ctx: &ServiceContext, settings: &Settings, path: &str) -> Result<(), String> {
    let store = FileRedirectStore::new(ctx, &settings.store_root);
    let records = store.find_by_source_path(path).map_err(|e| e.to_string())?;

    if records.is_empty() {
        println!("No redirects for {path}.");
        return Ok(());
    }
    for record in &records {
        println!(
            "{id}: {source} -> {uri} ({status}), edit at {edit}",
            id = record.id,
            source = record.source.to_url(),
            uri = record.destination.uri,
            status = record.status_code,
            edit = record.edit_link(&settings.edit_path_template),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_on_empty_store_succeeds() {
        let ctx = ServiceContext::in_memory();
        assert!(run(&ctx, &Settings::default(), "old-page").is_ok());
    }
}
