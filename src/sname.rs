//! C2: scoped names.
//!
//! An ordered sequence of name segments, each tagged with the kind of scope
//! it opened (namespace, class, struct, union, or none for the innermost
//! identifier) — enough to render fully-qualified identifiers such as
//! `std::chrono::duration` and to answer "is this name inside some scope".

use std::fmt;

/// The kind of scope a [`ScopedName`] segment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Namespace,
    Class,
    Struct,
    Union,
    /// The innermost segment: the identifier itself, not a scope.
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Segment {
    name: String,
    scope: ScopeKind,
}

/// An ordered, possibly-empty list of name segments.
///
/// `ScopedName::default()` is the empty name used by anonymous nodes and by
/// [`crate::ast::visit::take_name`] once a name has been moved out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ScopedName {
    segments: Vec<Segment>,
}

impl ScopedName {
    pub fn new() -> Self {
        Self::default()
    }

    /// A scoped name with a single, scope-less segment — the common case of
    /// a bare identifier.
    pub fn plain(name: impl Into<String>) -> Self {
        let mut sname = Self::new();
        sname.append(name, ScopeKind::None);
        sname
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Appends a segment to the end of the name.
    pub fn append(&mut self, name: impl Into<String>, scope: ScopeKind) {
        self.segments.push(Segment {
            name: name.into(),
            scope,
        });
    }

    /// Concatenates `other` onto the end of `self`, consuming `other`.
    pub fn concat(&mut self, other: ScopedName) {
        self.segments.extend(other.segments);
    }

    /// The innermost (last) segment's bare identifier, if any.
    pub fn local_name(&self) -> Option<&str> {
        self.segments.last().map(|s| s.name.as_str())
    }

    /// Takes the contents out of `self`, leaving it empty, and returns them
    /// as a new `ScopedName`. Used by ownership-transfer helpers such as
    /// [`crate::ast::visit::take_name`].
    pub fn take(&mut self) -> ScopedName {
        std::mem::take(self)
    }

    /// The fully qualified rendering, e.g. `std::chrono::duration`.
    pub fn full(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join("::")
    }

    pub fn segments(&self) -> impl Iterator<Item = (&str, ScopeKind)> {
        self.segments.iter().map(|s| (s.name.as_str(), s.scope))
    }
}

impl fmt::Display for ScopedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full())
    }
}

impl From<&str> for ScopedName {
    fn from(s: &str) -> Self {
        if let Some(idx) = s.rfind("::") {
            let mut sname = ScopedName::new();
            for part in s.split("::") {
                sname.append(part, ScopeKind::Namespace);
            }
            // Last segment is the identifier itself, not a scope.
            if let Some(last) = sname.segments.last_mut() {
                last.scope = ScopeKind::None;
            }
            let _ = idx;
            sname
        } else {
            ScopedName::plain(s)
        }
    }
}
