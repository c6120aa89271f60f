//! URL and target templates with `<N>` placeholders.
//!
//! A URL template such as `/blog/<0>/page-<1>` is compiled once into an
//! anchored regex where each placeholder becomes a non-greedy `(.+?)` group
//! and every literal character is escaped. The placeholder indices are kept
//! in template order so a match can be mapped back to `<N>` without any
//! per-request string building.
//!
//! A target template (`/blog/post/show(slug=<0>)`) is split into literal and
//! placeholder pieces once, then rendered by plain substitution.

use crate::error::ConfigError;
use regex::Regex;
use smallvec::SmallVec;

/// Maximum number of captures before heap allocation.
pub const MAX_INLINE_CAPTURES: usize = 8;

/// One piece of a template: literal text or a `<N>` placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Slot(usize),
}

/// Split a template into literal and placeholder pieces.
///
/// `<` is only a placeholder when followed by one or more ASCII digits and a
/// closing `>`; anything else is literal text.
fn split_pieces(template: &str) -> Result<Vec<Piece>, ConfigError> {
    let mut pieces = Vec::new();
    let mut literal = String::new();
    let mut rest = template;

    while let Some(start) = rest.find('<') {
        literal.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let digits = after.bytes().take_while(u8::is_ascii_digit).count();
        if digits > 0 && after[digits..].starts_with('>') {
            let index = after[..digits]
                .parse::<usize>()
                .map_err(|e| ConfigError::InvalidTemplate {
                    template: template.to_string(),
                    reason: e.to_string(),
                })?;
            if !literal.is_empty() {
                pieces.push(Piece::Literal(std::mem::take(&mut literal)));
            }
            pieces.push(Piece::Slot(index));
            rest = &after[digits + 1..];
        } else {
            literal.push('<');
            rest = after;
        }
    }
    literal.push_str(rest);
    if !literal.is_empty() {
        pieces.push(Piece::Literal(literal));
    }
    Ok(pieces)
}

/// Values captured by a [`UrlTemplate`], ordered by ascending placeholder index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captures(SmallVec<[(usize, String); MAX_INLINE_CAPTURES]>);

impl Captures {
    /// Value captured for placeholder `<index>`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0
            .binary_search_by_key(&index, |(i, _)| *i)
            .ok()
            .map(|pos| self.0[pos].1.as_str())
    }

    /// Captured values in ascending placeholder order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(_, v)| v.as_str())
    }

    /// `(index, value)` pairs in ascending placeholder order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.0.iter().map(|(i, v)| (*i, v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Compiled URL template (left-hand side of a routing rule)
#[derive(Debug, Clone)]
pub struct UrlTemplate {
    source: String,
    regex: Regex,
    /// Placeholder index of each capture group, in template order
    slots: Vec<usize>,
}

impl UrlTemplate {
    /// Compile a URL template.
    ///
    /// # Errors
    ///
    /// [`ConfigError::RepeatedPlaceholder`] when an index appears twice,
    /// [`ConfigError::InvalidTemplate`] when the pattern cannot be built.
    pub fn compile(template: &str) -> Result<Self, ConfigError> {
        let pieces = split_pieces(template)?;
        let mut pattern = String::with_capacity(template.len() + 8);
        pattern.push('^');
        let mut slots = Vec::new();

        for piece in &pieces {
            match piece {
                Piece::Literal(text) => pattern.push_str(&regex::escape(text)),
                Piece::Slot(index) => {
                    if slots.contains(index) {
                        return Err(ConfigError::RepeatedPlaceholder {
                            template: template.to_string(),
                            index: *index,
                        });
                    }
                    slots.push(*index);
                    pattern.push_str("(.+?)");
                }
            }
        }
        pattern.push('$');

        let regex = Regex::new(&pattern).map_err(|e| ConfigError::InvalidTemplate {
            template: template.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            source: template.to_string(),
            regex,
            slots,
        })
    }

    /// Match a whole path against this template.
    ///
    /// Returns `None` when the path does not match; that is the normal
    /// outcome while scanning a rule table.
    #[must_use]
    pub fn matches(&self, path: &str) -> Option<Captures> {
        let caps = self.regex.captures(path)?;
        let mut values: SmallVec<[(usize, String); MAX_INLINE_CAPTURES]> = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(group, index)| {
                caps.get(group + 1)
                    .map(|m| (*index, m.as_str().to_string()))
            })
            .collect();
        values.sort_unstable_by_key(|(i, _)| *i);
        Some(Captures(values))
    }

    /// Whether this template captures placeholder `<index>`
    #[must_use]
    pub fn captures_index(&self, index: usize) -> bool {
        self.slots.contains(&index)
    }

    /// Placeholder indices in template order
    #[must_use]
    pub fn slots(&self) -> &[usize] {
        &self.slots
    }

    /// The template as written in configuration
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Internal-path template (right-hand side of a routing rule)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetTemplate {
    source: String,
    pieces: Vec<Piece>,
}

impl TargetTemplate {
    /// Split a target template into literal and placeholder pieces.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidTemplate`] when a placeholder index overflows.
    pub fn parse(template: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            source: template.to_string(),
            pieces: split_pieces(template)?,
        })
    }

    /// Placeholder indices referenced by this target
    pub fn slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.pieces.iter().filter_map(|p| match p {
            Piece::Slot(i) => Some(*i),
            Piece::Literal(_) => None,
        })
    }

    /// Substitute every `<N>` with the Nth capture.
    ///
    /// Indices missing from `captures` render as empty strings; rule tables
    /// reject such targets at compile time.
    #[must_use]
    pub fn render(&self, captures: &Captures) -> String {
        let mut out = String::with_capacity(self.source.len() + 16);
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => out.push_str(text),
                Piece::Slot(index) => out.push_str(captures.get(*index).unwrap_or_default()),
            }
        }
        out
    }

    /// The template as written in configuration
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}
