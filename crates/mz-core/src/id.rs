use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global string interner for tag names, class names and element identifiers.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// An interned name (tag, class, or `id` attribute).
/// Backed by a 4-byte `Spur`, so copying, hashing and comparing never touch the text.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Atom(Spur);

impl Atom {
    /// Intern a string, or return the existing atom if already interned.
    pub fn intern(s: &str) -> Self {
        Atom(INTERNER.get_or_intern(s))
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// True if the interned text starts with `prefix`.
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.as_str().starts_with(prefix)
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Atom {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Atom {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Atom::intern(&s))
    }
}

/// Process-unique element identity.
///
/// Graph slots are reused after removal, so identity-based bookkeeping
/// (the "already processed" set, element references) keys on this instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Uid(u64);

impl Uid {
    /// Allocate the next identity.
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Uid(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_roundtrip() {
        let a = Atom::intern("mermaid");
        let b = Atom::intern("mermaid");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "mermaid");
    }

    #[test]
    fn prefix_match() {
        let id = Atom::intern("mermaid-1718");
        assert!(id.starts_with("mermaid-"));
        assert!(!Atom::intern("graph-1").starts_with("mermaid-"));
    }

    #[test]
    fn uids_are_unique() {
        let a = Uid::next();
        let b = Uid::next();
        assert_ne!(a, b);
        assert!(b > a);
    }
}
