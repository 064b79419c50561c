//! Browsing session state and its transitions.
//!
//! Every transition is a plain method on [`Session`]; nothing here touches
//! the network or a clock, so the whole state machine is testable directly.

use crate::constants::PAGE_SIZE;
use crate::giphy::MediaItem;

/// Which feed the session is paging through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Trending,
    Search,
}

impl Mode {
    /// Mode implied by the text in the search box.
    #[must_use]
    pub fn for_query(query: &str) -> Self {
        if query.trim().is_empty() {
            Self::Trending
        } else {
            Self::Search
        }
    }
}

/// A page fetch the session wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Session generation the request belongs to.
    pub generation: u64,
    pub mode: Mode,
    /// Query sent upstream; empty in trending mode.
    pub query: String,
    pub offset: u32,
    pub limit: u32,
}

/// What happened to a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The page replaced the list (offset 0).
    Replaced,
    /// The page was appended to the list.
    Appended,
    /// A failure was recorded; the list is untouched.
    Failed,
    /// The fetch belonged to an abandoned session and was dropped.
    Stale,
}

/// Accumulated state for one browsing or search context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    mode: Mode,
    query: String,
    offset: u32,
    items: Vec<MediaItem>,
    has_more: bool,
    loading: bool,
    generation: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// An idle trending session with nothing loaded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: Mode::Trending,
            query: String::new(),
            offset: 0,
            items: Vec::new(),
            has_more: true,
            loading: false,
            generation: 0,
        }
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Offset of the most recently requested page.
    #[must_use]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    #[must_use]
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a fresh session for `query` and request its first page.
    ///
    /// Clears the list, resets the offset and derives the mode from the
    /// query. Responses to requests issued before this call become stale.
    pub fn begin(&mut self, query: &str) -> PageRequest {
        self.generation += 1;
        self.mode = Mode::for_query(query);
        self.query = match self.mode {
            Mode::Trending => String::new(),
            Mode::Search => query.to_string(),
        };
        self.offset = 0;
        self.items.clear();
        self.has_more = true;
        self.loading = true;
        self.request()
    }

    /// Reset to trending and request its first page.
    pub fn clear(&mut self) -> PageRequest {
        self.begin("")
    }

    /// Advance to the next page if the scroll sentinel may trigger one.
    ///
    /// Returns `None` while a fetch is in flight, when the last page came
    /// back short, or when nothing is loaded yet (no sentinel is shown).
    pub fn next_page(&mut self) -> Option<PageRequest> {
        if self.loading || !self.has_more || self.items.is_empty() {
            return None;
        }
        self.offset += PAGE_SIZE;
        self.loading = true;
        Some(self.request())
    }

    /// Apply a successfully fetched page.
    ///
    /// Offset 0 replaces the list, later offsets append in order without
    /// deduplication. `has_more` becomes whether the page was full.
    pub fn apply_page(&mut self, request: &PageRequest, page: Vec<MediaItem>) -> Applied {
        if request.generation != self.generation {
            return Applied::Stale;
        }

        self.has_more = page.len() == PAGE_SIZE as usize;
        self.loading = false;

        if request.offset == 0 {
            self.items = page;
            Applied::Replaced
        } else {
            self.items.extend(page);
            Applied::Appended
        }
    }

    /// Record a failed fetch: only the loading flag changes.
    pub fn apply_failure(&mut self, request: &PageRequest) -> Applied {
        if request.generation != self.generation {
            return Applied::Stale;
        }
        self.loading = false;
        Applied::Failed
    }

    fn request(&self) -> PageRequest {
        PageRequest {
            generation: self.generation,
            mode: self.mode,
            query: self.query.clone(),
            offset: self.offset,
            limit: PAGE_SIZE,
        }
    }
}

/// The item shown in the detail panel, if any.
///
/// Independent of the session: survives query changes and clears.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    current: Option<MediaItem>,
}

impl Selection {
    pub fn select(&mut self, item: MediaItem) {
        self.current = Some(item);
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    #[must_use]
    pub fn current(&self) -> Option<&MediaItem> {
        self.current.as_ref()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn items(prefix: &str, count: usize) -> Vec<MediaItem> {
        (0..count)
            .map(|i| {
                serde_json::from_value(serde_json::json!({
                    "id": format!("{prefix}-{i}"),
                    "title": format!("{prefix} {i}"),
                }))
                .unwrap()
            })
            .collect()
    }

    fn ids(session: &Session) -> Vec<&str> {
        session.items().iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_new_session_is_idle_trending() {
        let session = Session::new();
        assert_eq!(session.mode(), Mode::Trending);
        assert_eq!(session.offset(), 0);
        assert!(session.items().is_empty());
        assert!(session.has_more());
        assert!(!session.is_loading());
    }

    #[test]
    fn test_begin_sets_mode_from_query() {
        let mut session = Session::new();
        let req = session.begin("cats");
        assert_eq!(req.mode, Mode::Search);
        assert_eq!(req.query, "cats");
        assert_eq!(req.offset, 0);
        assert_eq!(req.limit, 20);
        assert!(session.is_loading());

        let req = session.begin("   ");
        assert_eq!(req.mode, Mode::Trending);
        assert_eq!(req.query, "");
    }

    #[test]
    fn test_search_query_is_sent_untrimmed() {
        let mut session = Session::new();
        let req = session.begin(" cats ");
        assert_eq!(req.query, " cats ");
    }

    #[test]
    fn test_has_more_follows_page_length() {
        let mut session = Session::new();
        let req = session.begin("");
        session.apply_page(&req, items("a", 20));
        assert!(session.has_more());

        let req = session.begin("");
        session.apply_page(&req, items("a", 19));
        assert!(!session.has_more());

        let req = session.begin("");
        session.apply_page(&req, Vec::new());
        assert!(!session.has_more());
    }

    #[test]
    fn test_first_page_replaces_and_later_pages_append() {
        let mut session = Session::new();
        let req = session.begin("dogs");
        assert_eq!(session.apply_page(&req, items("p0", 20)), Applied::Replaced);

        let req = session.next_page().unwrap();
        assert_eq!(req.offset, 20);
        assert_eq!(session.apply_page(&req, items("p1", 3)), Applied::Appended);

        let got = ids(&session);
        assert_eq!(got.len(), 23);
        assert_eq!(got[0], "p0-0");
        assert_eq!(got[19], "p0-19");
        assert_eq!(got[20], "p1-0");
        assert_eq!(got[22], "p1-2");
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut session = Session::new();
        let req = session.begin("");
        session.apply_page(&req, items("same", 20));
        let req = session.next_page().unwrap();
        session.apply_page(&req, items("same", 20));
        assert_eq!(session.items().len(), 40);
        assert_eq!(session.items()[0].id, session.items()[20].id);
    }

    #[test]
    fn test_next_page_guarded_by_loading() {
        let mut session = Session::new();
        let req = session.begin("");
        session.apply_page(&req, items("a", 20));

        assert!(session.next_page().is_some());
        // Still loading offset 20.
        assert!(session.next_page().is_none());
        assert_eq!(session.offset(), 20);
    }

    #[test]
    fn test_next_page_guarded_by_has_more_and_empty_list() {
        let mut session = Session::new();
        assert!(session.next_page().is_none());

        let req = session.begin("");
        session.apply_page(&req, items("a", 5));
        assert!(session.next_page().is_none());
        assert_eq!(session.offset(), 0);
    }

    #[test]
    fn test_failure_keeps_list_and_has_more() {
        let mut session = Session::new();
        let req = session.begin("");
        session.apply_page(&req, items("a", 20));
        let req = session.next_page().unwrap();

        assert_eq!(session.apply_failure(&req), Applied::Failed);
        assert!(!session.is_loading());
        assert!(session.has_more());
        assert_eq!(session.items().len(), 20);
    }

    #[test]
    fn test_stale_responses_are_dropped() {
        let mut session = Session::new();
        let old = session.begin("cats");
        let new = session.begin("dogs");

        assert_eq!(session.apply_page(&new, items("dog", 20)), Applied::Replaced);
        assert_eq!(session.apply_page(&old, items("cat", 20)), Applied::Stale);
        assert_eq!(session.apply_failure(&old), Applied::Stale);
        assert_eq!(ids(&session)[0], "dog-0");
        assert_eq!(session.query(), "dogs");
    }

    #[test]
    fn test_clear_resets_before_fetch_resolves() {
        let mut session = Session::new();
        let req = session.begin("cats");
        session.apply_page(&req, items("cat", 20));

        let req = session.clear();
        assert_eq!(req.mode, Mode::Trending);
        assert_eq!(req.offset, 0);
        assert_eq!(session.mode(), Mode::Trending);
        assert_eq!(session.query(), "");
        assert!(session.items().is_empty());
        assert!(session.is_loading());
    }

    #[test]
    fn test_selection_is_independent() {
        let mut selection = Selection::default();
        assert!(selection.current().is_none());

        let picked = items("x", 2);
        selection.select(picked[0].clone());
        selection.select(picked[1].clone());
        assert_eq!(selection.current().unwrap().id, "x-1");

        selection.clear();
        assert!(selection.current().is_none());
    }
}
