use crate::Space;
use crate::editing::Translator;
use crate::host::TextViewer;
use crate::models::{FindRequest, Search, SearchResult};

/// Run the host's native find from `from` (given in `space`).
///
/// Native find works on view offsets and moves the caret to the match; the
/// caret is put back before returning, so only the result reports the match.
pub fn find<H>(host: &mut H, space: Space, search: &Search, from: usize) -> SearchResult
where
    H: TextViewer + ?Sized,
{
    let saved_caret = host.caret_offset();
    let start = Translator::new(host.projection()).view_offset_from(space, from);

    let request = FindRequest {
        keyword: &search.keyword,
        forward: !search.backward,
        case_sensitive: true,
        whole_word: search.whole_word,
    };
    let found = host.find_and_select(start, request);
    let result = match found {
        Some(view_offset) => SearchResult::found(
            Translator::new(host.projection()).view_offset_into(space, view_offset),
        ),
        None => SearchResult::not_found(),
    };

    host.set_caret_offset(saved_caret);
    result
}
