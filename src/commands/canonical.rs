//! `redirect-source canonical` command.

use crate::canonical::CanonicalUrl;

/// Execute the `canonical` command.
pub fn run(path: &str) {
    println!("{}", describe(path));
}

fn describe(path: &str) -> String {
    match CanonicalUrl::from_internal_path(path) {
        Ok(url) => url.to_string(),
        Err(err) => format!("malformed: {err}"),
    }
}
