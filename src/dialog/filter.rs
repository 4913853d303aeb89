//! List filter - narrows the shown rows by a typed query

use std::ops::Range;

use crate::listing::Listing;

/// Case-insensitive substring filter over entry names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    query: String,
    highlight: bool,
}

impl ListFilter {
    /// Create an empty filter; `highlight` marks matched text in rows
    pub fn new(highlight: bool) -> Self {
        Self {
            query: String::new(),
            highlight,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn clear(&mut self) {
        self.query.clear();
    }

    /// Whether a non-empty query is narrowing the list
    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }

    /// Byte range of the first match of the query in `name`
    pub fn find(&self, name: &str) -> Option<Range<usize>> {
        if self.query.is_empty() {
            return Some(0..0);
        }
        find_ignore_case(name, &self.query)
    }

    /// Range to highlight in `name`, when highlighting is on
    pub fn highlight_range(&self, name: &str) -> Option<Range<usize>> {
        if !self.highlight || !self.is_active() {
            return None;
        }
        self.find(name)
    }

    /// Listing indices that pass the filter, in listing order
    pub fn visible(&self, listing: &Listing) -> Vec<usize> {
        listing
            .entries()
            .iter()
            .enumerate()
            .filter(|(_, e)| self.find(&e.name).is_some())
            .map(|(i, _)| i)
            .collect()
    }
}

fn find_ignore_case(haystack: &str, needle: &str) -> Option<Range<usize>> {
    let needle: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();

    for (start, _) in haystack.char_indices() {
        let mut rest = haystack[start..].char_indices();
        let mut matched = 0;
        let mut end = start;

        'outer: while matched < needle.len() {
            let Some((offset, c)) = rest.next() else {
                break;
            };
            for lower in c.to_lowercase() {
                if needle.get(matched) != Some(&lower) {
                    break 'outer;
                }
                matched += 1;
                end = start + offset + c.len_utf8();
            }
        }

        if matched == needle.len() {
            return Some(start..end);
        }
    }
    None
}
