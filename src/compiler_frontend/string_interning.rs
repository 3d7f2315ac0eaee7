use crate::settings::MINIMUM_STRING_TABLE_CAPACITY;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::rc::Rc;

/// A unique identifier for an interned lexeme, represented as a u32 for memory efficiency.
/// Two tokens have the same text exactly when they have the same StringId.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct StringId(u32);

impl StringId {
    /// Compare this interned string with a string slice without allocating.
    #[inline]
    pub fn eq_str(self, table: &StringTable, other: &str) -> bool {
        table.resolve(self) == other
    }

    #[inline]
    pub fn resolve(self, table: &StringTable) -> &str {
        table.resolve(self)
    }
}

impl std::fmt::Display for StringId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StringId({})", self.0)
    }
}

/// Stores every distinct lexeme of an orchestra once.
///
/// - Vec<Rc<str>> for O(1) ID → string resolution
/// - FxHashMap<Rc<str>, StringId> for O(1) string → ID lookup during interning
///
/// Both sides share the same allocation, so a lexeme is only ever stored once.
#[derive(Debug, Clone)]
pub struct StringTable {
    strings: Vec<Rc<str>>,
    string_to_id: FxHashMap<Rc<str>, StringId>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            strings: Vec::with_capacity(capacity + MINIMUM_STRING_TABLE_CAPACITY),
            string_to_id: FxHashMap::with_capacity_and_hasher(
                capacity + MINIMUM_STRING_TABLE_CAPACITY,
                Default::default(),
            ),
        }
    }

    /// Intern a string slice, returning its unique ID.
    /// If the string already exists, returns the existing ID.
    #[inline]
    pub fn intern(&mut self, s: &str) -> StringId {
        if let Some(&existing_id) = self.string_to_id.get(s) {
            return existing_id;
        }

        self.intern_new(Rc::from(s))
    }

    /// Intern an owned String, reusing its buffer when the string is new.
    #[inline]
    pub fn get_or_intern(&mut self, s: String) -> StringId {
        if let Some(&existing_id) = self.string_to_id.get(s.as_str()) {
            return existing_id;
        }

        self.intern_new(Rc::from(s))
    }

    #[cold]
    #[inline(never)]
    fn intern_new(&mut self, s: Rc<str>) -> StringId {
        let new_id = StringId(self.strings.len() as u32);
        self.string_to_id.insert(Rc::clone(&s), new_id);
        self.strings.push(s);
        new_id
    }

    /// Resolve an interned string ID back to its text.
    ///
    /// Panics if the ID came from a different table.
    #[inline]
    pub fn resolve(&self, id: StringId) -> &str {
        &self.strings[id.0 as usize]
    }

    /// Check if a string is already interned without interning it.
    #[inline]
    pub fn get_existing(&self, s: &str) -> Option<StringId> {
        self.string_to_id.get(s).copied()
    }

    /// Does this lexeme start with the given prefix?
    #[inline]
    pub fn starts_with(&self, id: StringId, prefix: &str) -> bool {
        self.resolve(id).starts_with(prefix)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Default for StringTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_deduplicated() {
        let mut table = StringTable::new();
        let a = table.intern("kenv");
        let b = table.get_or_intern(String::from("kenv"));
        let c = table.intern("#k0");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(table.len(), 2);
        assert_eq!(table.resolve(c), "#k0");
        assert!(a.eq_str(&table, "kenv"));
    }

    #[test]
    fn prefix_checks_and_lookups() {
        let mut table = StringTable::new();
        let temporary = table.intern("#i3");
        let named = table.intern("iamp");

        assert!(table.starts_with(temporary, "#"));
        assert!(!table.starts_with(named, "#"));
        assert_eq!(table.get_existing("iamp"), Some(named));
        assert_eq!(table.get_existing("missing"), None);
    }

    #[test]
    fn cloned_tables_resolve_independently() {
        let mut table = StringTable::new();
        let id = table.intern("asig");
        let copy = table.clone();
        drop(table);
        assert_eq!(copy.resolve(id), "asig");
    }
}
