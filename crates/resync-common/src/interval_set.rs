//! Ordered sets of token types stored as disjoint inclusive ranges.
//!
//! Expected-token sets and recovery sets are usually a handful of small runs
//! of adjacent token types, so the ranges live inline in a `SmallVec`.

use crate::token::{TokenType, Vocabulary, token_type};
use smallvec::SmallVec;
use std::fmt;

/// An inclusive range `a..=b` of token types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interval {
    pub a: TokenType,
    pub b: TokenType,
}

impl Interval {
    pub const fn new(a: TokenType, b: TokenType) -> Self {
        Self { a, b }
    }

    #[inline]
    pub const fn contains(&self, el: TokenType) -> bool {
        self.a <= el && el <= self.b
    }

    /// Number of elements in the range.
    pub fn len(&self) -> usize {
        usize::try_from(i64::from(self.b) - i64::from(self.a) + 1).unwrap_or(0)
    }
}

/// A set of token types.
///
/// Invariant: `intervals` is sorted by `a`, and no two intervals overlap or
/// touch (`prev.b + 1 < next.a`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct IntervalSet {
    intervals: SmallVec<[Interval; 4]>,
}

impl IntervalSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A set holding a single element.
    pub fn of(el: TokenType) -> Self {
        let mut set = Self::new();
        set.add(el);
        set
    }

    /// A set holding `a..=b`.
    pub fn of_range(a: TokenType, b: TokenType) -> Self {
        let mut set = Self::new();
        set.add_range(a, b);
        set
    }

    #[inline]
    pub fn add(&mut self, el: TokenType) {
        self.add_range(el, el);
    }

    /// Add `a..=b`, merging with any overlapping or adjacent ranges.
    pub fn add_range(&mut self, a: TokenType, b: TokenType) {
        if b < a {
            return;
        }

        let mut lo = a;
        let mut hi = b;
        let mut inserted = false;
        let mut merged: SmallVec<[Interval; 4]> = SmallVec::new();

        for iv in std::mem::take(&mut self.intervals) {
            if iv.b.saturating_add(1) < lo {
                merged.push(iv);
            } else if hi.saturating_add(1) < iv.a {
                if !inserted {
                    merged.push(Interval::new(lo, hi));
                    inserted = true;
                }
                merged.push(iv);
            } else {
                lo = lo.min(iv.a);
                hi = hi.max(iv.b);
            }
        }
        if !inserted {
            merged.push(Interval::new(lo, hi));
        }

        self.intervals = merged;
    }

    /// In-place union.
    pub fn add_all(&mut self, other: &IntervalSet) {
        for iv in &other.intervals {
            self.add_range(iv.a, iv.b);
        }
    }

    /// Remove a single element, splitting its range when needed.
    pub fn remove(&mut self, el: TokenType) {
        let Some(pos) = self.intervals.iter().position(|iv| iv.contains(el)) else {
            return;
        };
        let iv = self.intervals.remove(pos);
        let mut insert_at = pos;
        if iv.a < el {
            self.intervals.insert(insert_at, Interval::new(iv.a, el - 1));
            insert_at += 1;
        }
        if el < iv.b {
            self.intervals.insert(insert_at, Interval::new(el + 1, iv.b));
        }
    }

    pub fn contains(&self, el: TokenType) -> bool {
        for iv in &self.intervals {
            if el < iv.a {
                // Sorted: nothing further can contain it.
                return false;
            }
            if el <= iv.b {
                return true;
            }
        }
        false
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Smallest element, or `None` for the empty set.
    pub fn min_element(&self) -> Option<TokenType> {
        self.intervals.first().map(|iv| iv.a)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.intervals.iter().map(Interval::len).sum()
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Elements in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = TokenType> + '_ {
        self.intervals.iter().flat_map(|iv| iv.a..=iv.b)
    }

    /// Render against a vocabulary: `{}` when empty, a bare name for a
    /// single element, otherwise `{a, b, c}`.
    pub fn to_string_with(&self, vocabulary: &Vocabulary) -> String {
        if self.is_empty() {
            return "{}".to_string();
        }
        let names: Vec<String> = self
            .iter()
            .map(|el| element_name(vocabulary, el))
            .collect();
        if names.len() == 1 {
            names.into_iter().next().unwrap_or_default()
        } else {
            format!("{{{}}}", names.join(", "))
        }
    }
}

fn element_name(vocabulary: &Vocabulary, el: TokenType) -> String {
    match el {
        token_type::EOF => "<EOF>".to_string(),
        token_type::EPSILON => "<EPSILON>".to_string(),
        _ => vocabulary.display_name(el),
    }
}

impl fmt::Display for IntervalSet {
    /// Numeric rendering: `{}`, `3`, `{1..4, 7}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .intervals
            .iter()
            .map(|iv| {
                if iv.a == iv.b {
                    numeric_name(iv.a)
                } else {
                    format!("{}..{}", numeric_name(iv.a), numeric_name(iv.b))
                }
            })
            .collect();
        if parts.len() == 1 && self.len() == 1 {
            f.write_str(&parts[0])
        } else {
            write!(f, "{{{}}}", parts.join(", "))
        }
    }
}

fn numeric_name(el: TokenType) -> String {
    match el {
        token_type::EOF => "<EOF>".to_string(),
        token_type::EPSILON => "<EPSILON>".to_string(),
        _ => el.to_string(),
    }
}

impl FromIterator<TokenType> for IntervalSet {
    fn from_iter<I: IntoIterator<Item = TokenType>>(iter: I) -> Self {
        let mut set = IntervalSet::new();
        for el in iter {
            set.add(el);
        }
        set
    }
}

impl Extend<TokenType> for IntervalSet {
    fn extend<I: IntoIterator<Item = TokenType>>(&mut self, iter: I) {
        for el in iter {
            self.add(el);
        }
    }
}
