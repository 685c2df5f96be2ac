use serde::Serialize;

/// A keyword search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Search {
    pub keyword: String,
    pub backward: bool,
    pub whole_word: bool,
}

impl Search {
    pub fn forward(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            backward: false,
            whole_word: false,
        }
    }

    pub fn backward(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            backward: true,
            whole_word: false,
        }
    }

    pub fn whole_word(mut self) -> Self {
        self.whole_word = true;
        self
    }
}

/// Parameters handed to a host's native find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FindRequest<'a> {
    pub keyword: &'a str,
    pub forward: bool,
    pub case_sensitive: bool,
    pub whole_word: bool,
}

/// Outcome of a search; `index` is `None` when nothing matched, which keeps a
/// match at offset 0 distinct from "not found".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub index: Option<usize>,
}

impl SearchResult {
    pub fn found(index: usize) -> Self {
        Self { index: Some(index) }
    }

    pub fn not_found() -> Self {
        Self { index: None }
    }

    pub fn is_found(&self) -> bool {
        self.index.is_some()
    }
}
