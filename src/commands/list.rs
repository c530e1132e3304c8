//! `redirect-source list` command.

use crate::config::Settings;
use crate::context::ServiceContext;
use crate::ports::RedirectStore;
use crate::redirect::RedirectRecord;
use crate::store::FileRedirectStore;

/// Execute the `list` command.
///
/// Displays a table of stored redirects: id, source, destination and status.
///
/// # Errors
///
/// Returns an error string if the store cannot be read.
pub fn run(ctx: &ServiceContext, settings: &Settings) -> Result<(), String> {
    let store = FileRedirectStore::new(ctx, &settings.store_root);
    let records = store.list().map_err(|e| e.to_string())?;
    if records.is_empty() {
        println!("No redirects stored.");
        return Ok(());
    }
    print!("{}", render_table(&records));
    Ok(())
}

fn render_table(records: &[RedirectRecord]) -> String {
    let rows: Vec<(String, String, String, String)> = records
        .iter()
        .map(|r| {
            (
                r.id.to_string(),
                r.source.to_url(),
                r.destination.uri.clone(),
                r.status_code.to_string(),
            )
        })
        .collect();

    let id_width = rows.iter().map(|r| r.0.len()).max().unwrap_or(2).max(2);
    let source_width = rows.iter().map(|r| r.1.len()).max().unwrap_or(6).max(6);
    let dest_width = rows.iter().map(|r| r.2.len()).max().unwrap_or(11).max(11);

    let mut out = format!(
        "{:<id_width$}  {:<source_width$}  {:<dest_width$}  STATUS\n",
        "ID", "SOURCE", "DESTINATION",
    );
    out.push_str(&format!(
        "{:-<id_width$}  {:-<source_width$}  {:-<dest_width$}  ------\n",
        "", "", "",
    ));
    for (id, source, dest, status) in &rows {
        out.push_str(&format!(
            "{id:<id_width$}  {source:<source_width$}  {dest:<dest_width$}  {status}\n"
        ));
    }
    out.push_str(&format!("\n{} redirect(s) total.\n", rows.len()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redirect::{Destination, NewRedirect};
    use crate::source::RedirectSourceValue;

    #[test]
    fn list_on_empty_store_succeeds() {
        let ctx = ServiceContext::in_memory();
        assert!(run(&ctx, &Settings::default()).is_ok());
    }

    #[test]
    fn table_lists_each_redirect() {
        let ctx = ServiceContext::in_memory();
        let settings = Settings::default();
        let store = FileRedirectStore::new(&ctx, &settings.store_root);
        for (path, node) in [("old-page", 5), ("older-page", 6)] {
            store
                .create(NewRedirect {
                    source: RedirectSourceValue::from_path(path).unwrap(),
                    destination: Destination { uri: format!("internal:/node/{node}"), title: None },
                    status_code: 301,
                })
                .unwrap();
        }

        let table = render_table(&store.list().unwrap());
        assert!(table.starts_with("ID  SOURCE"));
        assert!(table.contains("base:old-page"));
        assert!(table.contains("internal:/node/6"));
        assert!(table.contains("2 redirect(s) total."));
    }
}
