use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Error, Result};


/// The output of [`TagStripper::strip`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stripped {
    /// The text without the stripped spans.
    pub text: String,
    /// Number of spans removed.
    pub removed: usize,
}


/// Removes every `<tag ...>...</tag>` span of a single tag name.
///
/// The first opening tag and its matching closing tag are deleted
/// together with everything in between,
/// and the search starts over until no opening tag is left.
/// An opening tag may carry attributes.
/// A self-closing tag (`<tag/>`) is deleted alone.
/// Nested spans of the same name are matched by depth,
/// so the outermost span goes away as a whole.
/// Closing tags without an opening tag are kept.
///
/// This is a string search, not an HTML parser:
/// a `>` inside an attribute value ends the opening tag.
///
/// # Example
/// ```
/// use minibayes::TagStripper;
///
/// let stripper = TagStripper::new("input").unwrap();
/// let out = stripper.strip("a<input>b</input>c").unwrap();
/// assert_eq!(out.text, "ac");
/// assert_eq!(out.removed, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagStripper {
    tag: String,
    ignore_case: bool,
}


impl TagStripper {
    /// Construct a new instance of `TagStripper` for `tag`.
    /// The name must be non-empty and must not contain
    /// `<`, `>`, `/` or whitespace.
    pub fn new<S: AsRef<str>>(tag: S) -> Result<Self> {
        let tag = tag.as_ref();
        let is_valid = !tag.is_empty()
            && !tag.chars()
                .any(|c| c == '<' || c == '>' || c == '/' || c.is_whitespace());
        if !is_valid {
            return Err(Error::InvalidTagName(tag.to_string()));
        }

        Ok(Self { tag: tag.to_string(), ignore_case: false })
    }


    /// Set whether tag names match ASCII case-insensitively.
    /// Default value is `false`.
    pub fn ignore_case(mut self, flag: bool) -> Self {
        self.ignore_case = flag;
        self
    }


    /// Returns the tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }


    /// Removes every span of the tag from `text`.
    pub fn strip(&self, text: &str) -> Result<Stripped> {
        let mut text = text.to_string();
        // Searched copy. ASCII lowercasing keeps byte offsets.
        let mut haystack = self.fold_case(&text);
        let name = self.fold_case(&self.tag);

        let mut removed = 0_usize;
        while let Some(open) = find_open(&haystack, 0, &name) {
            let (start, end) = span_at(&haystack, open, &name)
                .ok_or_else(|| Error::UnclosedTag {
                    tag: self.tag.clone(),
                    offset: open,
                })?;

            debug!(start, end, tag = %self.tag, "removing span");
            text.replace_range(start..end, "");
            haystack.replace_range(start..end, "");
            removed += 1;
        }

        Ok(Stripped { text, removed })
    }


    /// Strips the tag from the file at `path`
    /// and overwrites the file with the result.
    /// Returns the number of spans removed.
    /// The file is left untouched if stripping fails.
    pub fn strip_file<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let path = path.as_ref();
        let Stripped { text, removed } = self.preview_file(path)?;
        fs::write(path, text)?;

        info!(path = %path.display(), tag = %self.tag, removed, "stripped tag");
        Ok(removed)
    }


    /// Strips the tag from the file at `path`
    /// without writing anything back.
    pub fn preview_file<P: AsRef<Path>>(&self, path: P) -> Result<Stripped> {
        let text = fs::read_to_string(path)?;
        self.strip(&text)
    }


    fn fold_case(&self, s: &str) -> String {
        if self.ignore_case {
            s.to_ascii_lowercase()
        } else {
            s.to_string()
        }
    }
}


/// Removes every `<tag>...</tag>` span from `text`.
pub fn strip_tag(text: &str, tag: &str) -> Result<String> {
    TagStripper::new(tag)?
        .strip(text)
        .map(|stripped| stripped.text)
}


/// Removes every `<tag>...</tag>` span from the file at `path`,
/// overwriting it. Returns the number of spans removed.
pub fn strip_tag_in_file<P: AsRef<Path>>(path: P, tag: &str) -> Result<usize> {
    TagStripper::new(tag)?.strip_file(path)
}


/// Returns `true` if `byte` may follow a tag name.
#[inline(always)]
fn ends_name(byte: u8) -> bool {
    byte == b'>' || byte == b'/' || byte.is_ascii_whitespace()
}


/// Returns the position of the first opening tag `<name` at or after `from`.
fn find_open(haystack: &str, from: usize, name: &str) -> Option<usize> {
    let bytes = haystack.as_bytes();
    let mut cursor = from;
    while cursor < haystack.len() {
        let pos = cursor + haystack[cursor..].find('<')?;
        let after = pos + 1 + name.len();
        let is_open = haystack[pos + 1..].starts_with(name)
            && bytes.get(after).is_some_and(|&b| ends_name(b));
        if is_open {
            return Some(pos);
        }
        cursor = pos + 1;
    }
    None
}


/// Returns the range `start..end` of the first closing tag
/// `</name>` at or after `from`.
fn find_close(haystack: &str, from: usize, name: &str)
    -> Option<(usize, usize)>
{
    let bytes = haystack.as_bytes();
    let mut cursor = from;
    while cursor < haystack.len() {
        let pos = cursor + haystack[cursor..].find("</")?;
        let mut after = pos + 2 + name.len();
        if haystack[pos + 2..].starts_with(name) {
            while bytes.get(after).is_some_and(|b| b.is_ascii_whitespace()) {
                after += 1;
            }
            if bytes.get(after) == Some(&b'>') {
                return Some((pos, after + 1));
            }
        }
        cursor = pos + 2;
    }
    None
}


/// Returns the end of the opening tag at `open`
/// and whether it is self-closing.
fn open_tag_end(haystack: &str, open: usize) -> Option<(usize, bool)> {
    let gt = open + haystack[open..].find('>')?;
    let self_closing = haystack.as_bytes()[gt - 1] == b'/';
    Some((gt + 1, self_closing))
}


/// Returns the span of the element whose opening tag starts at `open`,
/// or `None` if it is never closed.
fn span_at(haystack: &str, open: usize, name: &str) -> Option<(usize, usize)> {
    let (mut cursor, self_closing) = open_tag_end(haystack, open)?;
    if self_closing {
        return Some((open, cursor));
    }

    let mut depth = 1_usize;
    loop {
        let (close_start, close_end) = find_close(haystack, cursor, name)?;
        match find_open(haystack, cursor, name) {
            Some(inner) if inner < close_start => {
                let (end, self_closing) = open_tag_end(haystack, inner)?;
                if !self_closing { depth += 1; }
                cursor = end;
            },
            _ => {
                depth -= 1;
                cursor = close_end;
                if depth == 0 {
                    return Some((open, cursor));
                }
            },
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_tag_needs_a_name_boundary() {
        assert_eq!(find_open("<inputs><input>", 0, "input"), Some(8));
        assert_eq!(find_open("<input a=1>", 0, "input"), Some(0));
        assert_eq!(find_open("<in", 0, "input"), None);
    }

    #[test]
    fn close_tag_allows_trailing_whitespace() {
        assert_eq!(find_close("x</input >", 0, "input"), Some((1, 10)));
        assert_eq!(find_close("</inputs>", 0, "input"), None);
    }

    #[test]
    fn nested_span_is_matched_by_depth() {
        let h = "<a><a></a></a>tail";
        assert_eq!(span_at(h, 0, "a"), Some((0, 14)));
    }
}
