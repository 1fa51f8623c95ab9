//! URI templates with named placeholders.
//!
//! A template such as `greeting://template/{greeting_type}` is split into
//! literal and placeholder segments. A placeholder matches one non-empty run
//! of characters that contains no `/`.

use std::collections::HashMap;

use super::error::ResourceError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A parsed URI pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl UriTemplate {
    /// Parse a pattern. Braces must balance and placeholders must be named
    /// and separated by at least one literal character.
    pub fn parse(pattern: &str) -> Result<Self, ResourceError> {
        let mut segments = Vec::new();
        let mut rest = pattern;

        while let Some(open) = rest.find('{') {
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_string()));
            } else if matches!(segments.last(), Some(Segment::Placeholder(_))) {
                return Err(ResourceError::invalid_uri(format!(
                    "adjacent placeholders in '{}'",
                    pattern
                )));
            }
            let close = rest[open..]
                .find('}')
                .map(|i| open + i)
                .ok_or_else(|| ResourceError::invalid_uri(format!("unclosed '{{' in '{}'", pattern)))?;
            let name = rest[open + 1..close].trim();
            if name.is_empty() || name.contains('{') {
                return Err(ResourceError::invalid_uri(format!(
                    "bad placeholder in '{}'",
                    pattern
                )));
            }
            segments.push(Segment::Placeholder(name.to_string()));
            rest = &rest[close + 1..];
        }
        if rest.contains('}') {
            return Err(ResourceError::invalid_uri(format!(
                "unmatched '}}' in '{}'",
                pattern
            )));
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether the pattern has any placeholder.
    pub fn is_templated(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Placeholder(_)))
    }

    /// Placeholder names in order.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Match a concrete URI, returning the placeholder values.
    pub fn match_uri(&self, uri: &str) -> Option<HashMap<String, String>> {
        let mut values = HashMap::new();
        let mut rest = uri;
        let mut segments = self.segments.iter().peekable();

        while let Some(segment) = segments.next() {
            match segment {
                Segment::Literal(lit) => rest = rest.strip_prefix(lit.as_str())?,
                Segment::Placeholder(name) => {
                    // Value runs up to the next literal, or to the end.
                    let end = match segments.peek() {
                        Some(Segment::Literal(next)) => rest.find(next.as_str())?,
                        _ => rest.len(),
                    };
                    let value = &rest[..end];
                    if value.is_empty() || value.contains('/') {
                        return None;
                    }
                    values.insert(name.clone(), value.to_string());
                    rest = &rest[end..];
                }
            }
        }

        rest.is_empty().then_some(values)
    }
}
