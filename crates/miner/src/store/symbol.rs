use std::fmt;
use std::num::NonZeroU64;

use serde::{Serialize, Serializer};

/// One slot of a generalized template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol<T> {
    /// A token every absorbed record agreed on
    Literal(T),
    /// A slot whose value varied across absorbed records
    Wildcard,
}

impl<T> Symbol<T> {
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Symbol::Wildcard)
    }

    pub fn as_literal(&self) -> Option<&T> {
        match self {
            Symbol::Literal(token) => Some(token),
            Symbol::Wildcard => None,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Symbol<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Literal(token) => write!(f, "{}", token),
            Symbol::Wildcard => f.write_str("*"),
        }
    }
}

/// Identifier a store hands out to every inserted record.
///
/// Ids start at 1, so zero is not representable; "no id" is `Option::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(NonZeroU64);

impl RecordId {
    pub(crate) const FIRST: RecordId = RecordId(NonZeroU64::MIN);

    pub fn new(id: u64) -> Option<Self> {
        NonZeroU64::new(id).map(Self)
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }

    pub(crate) fn successor(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.get())
    }
}
