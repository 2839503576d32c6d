//! Resolving a URL path to the page identifier it names.

use mjtutor_core::Page;

/// Page identifier for a URL path: the last segment without `.html`,
/// or the home identifier when that is empty.
///
/// ```text
/// /tutorial/tiles.html -> tiles
/// /tutorial/           -> index
/// ```
pub fn page_id_from_path(path: &str) -> &str {
    let last = path.rsplit('/').next().unwrap_or("");
    let id = last.strip_suffix(".html").unwrap_or(last);
    if id.is_empty() {
        Page::HOME
    } else {
        id
    }
}

/// Whether a page identifier is the landing page.
pub fn is_home(id: &str) -> bool {
    id == Page::HOME
}
