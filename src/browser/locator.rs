use std::fmt;

use serde::{Deserialize, Serialize};

/// One step of a locator chain, resolved by browser_server.js as
/// `scope.locator(selector)`, then `.filter({ hasText })`, then `.nth(nth)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub selector: String, // CSS, `text=...`, or `:has-text()` expression
    #[serde(rename = "hasText", skip_serializing_if = "Option::is_none")]
    pub has_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nth: Option<usize>,
}

/// An immutable selector expression, re-evaluated on every use.
///
/// Narrowing operations (`nth`, `first`, `filter_text`, `locator`) return a
/// new value; the original is never modified, so registry constants can be
/// shared freely between page objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locator {
    segments: Vec<Segment>,
}

impl Locator {
    pub fn new(selector: impl Into<String>) -> Self {
        Locator {
            segments: vec![Segment {
                selector: selector.into(),
                has_text: None,
                nth: None,
            }],
        }
    }

    /// Narrow to the match at `index` (0-based) of the last segment.
    pub fn nth(&self, index: usize) -> Self {
        let mut next = self.clone();
        if let Some(last) = next.segments.last_mut() {
            last.nth = Some(index);
        }
        next
    }

    pub fn first(&self) -> Self {
        self.nth(0)
    }

    /// Keep only matches whose text contains `text` (case-insensitive).
    pub fn filter_text(&self, text: impl Into<String>) -> Self {
        let mut next = self.clone();
        if let Some(last) = next.segments.last_mut() {
            last.has_text = Some(text.into());
        }
        next
    }

    /// Scope a child selector inside this locator.
    pub fn locator(&self, selector: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.segments.push(Segment {
            selector: selector.into(),
            has_text: None,
            nth: None,
        });
        next
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The innermost selector expression.
    pub fn selector(&self) -> &str {
        self.segments
            .last()
            .map(|s| s.selector.as_str())
            .unwrap_or_default()
    }

    /// The index requested on the innermost segment, if any.
    pub fn index(&self) -> Option<usize> {
        self.segments.last().and_then(|s| s.nth)
    }

    /// Same chain with the innermost `nth` removed.
    pub fn without_index(&self) -> Self {
        let mut next = self.clone();
        if let Some(last) = next.segments.last_mut() {
            last.nth = None;
        }
        next
    }
}

impl From<&str> for Locator {
    fn from(selector: &str) -> Self {
        Locator::new(selector)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, " >> ")?;
            }
            write!(f, "{}", seg.selector)?;
            if let Some(text) = &seg.has_text {
                write!(f, " >> has-text={:?}", text)?;
            }
            if let Some(n) = seg.nth {
                write!(f, " >> nth={}", n)?;
            }
        }
        Ok(())
    }
}
