//! Sorted, case-insensitive tag registry with monotonic strength updates.

use std::{
    collections::{
        BTreeMap,
        btree_map::{Entry, Values},
    },
    fmt,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::trace;

use crate::canonical;

/// A named counter. The meaning of `strength` is defined by callers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    /// Canonical (lowercase) tag name.
    name: String,
    /// Current strength; zero means the tag is registered but not applied.
    strength: u32,
}

impl Tag {
    /// Create a tag with zero strength. `name` is stored verbatim.
    fn new(name: String) -> Self {
        Self { name, strength: 0 }
    }

    /// Canonical lowercase name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current strength.
    #[must_use]
    pub const fn strength(&self) -> u32 {
        self.strength
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.strength)
    }
}

/// An ordered registry of unique tags.
///
/// Names are matched case-insensitively and stored in their lowercase form.
/// Every mutating operation registers the name first, so a tag that has been
/// touched once stays listed (possibly with zero strength) for the lifetime of
/// the registry. Operations given an empty name do nothing.
///
/// Updates are monotonic so that several independent rules can apply or
/// remove the same tag within one pass:
///
/// - [`set`](Self::set) only ever raises a strength,
/// - [`clear`](Self::clear) only zeroes a strength that is not above the
///   caller's own claim,
/// - [`sub`](Self::sub) either commits fully or leaves the tag untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagsContainer {
    /// Tags keyed by canonical name; iteration order is the listing order.
    tags: BTreeMap<String, Tag>,
}

impl TagsContainer {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a name -> strength mapping, as written by the
    /// persistence layer. Names differing only in case collapse onto the
    /// strongest entry.
    pub fn from_map<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: AsRef<str>,
    {
        let mut out = Self::new();
        for (name, strength) in entries {
            out.set(name.as_ref(), strength);
        }
        out
    }

    /// Build a registry from a whitespace-separated list, every tag at `strength`.
    pub fn from_names(names: &str, strength: u32) -> Self {
        let mut out = Self::new();
        out.set_str(names, strength);
        out
    }

    /// Find or create the tag called `name`. Returns `None` for an empty name.
    pub fn register(&mut self, name: &str) -> Option<&Tag> {
        self.entry(name).map(|tag| &*tag)
    }

    /// Mutable find-or-create shared by every operation.
    fn entry(&mut self, name: &str) -> Option<&mut Tag> {
        if name.is_empty() {
            return None;
        }
        let key = canonical(name);
        Some(match self.tags.entry(key) {
            Entry::Occupied(slot) => slot.into_mut(),
            Entry::Vacant(slot) => {
                trace!(target: "tags::container", tag = %slot.key(), "register");
                let tag = Tag::new(slot.key().clone());
                slot.insert(tag)
            }
        })
    }

    /// Raise the strength of `name` to `value` if `value` is greater.
    pub fn set(&mut self, name: &str, value: u32) {
        if let Some(tag) = self.entry(name)
            && value > tag.strength
        {
            tag.strength = value;
        }
    }

    /// Increase the strength of `name` by `value`, saturating at `u32::MAX`.
    pub fn add(&mut self, name: &str, value: u32) {
        if let Some(tag) = self.entry(name) {
            tag.strength = tag.strength.saturating_add(value);
        }
    }

    /// Decrease the strength of `name` by `value`, unless that would go below zero.
    pub fn sub(&mut self, name: &str, value: u32) {
        if let Some(tag) = self.entry(name)
            && let Some(lowered) = tag.strength.checked_sub(value)
        {
            tag.strength = lowered;
        }
    }

    /// Zero the strength of `name` if it is at most `value`.
    pub fn clear(&mut self, name: &str, value: u32) {
        if let Some(tag) = self.entry(name)
            && tag.strength <= value
        {
            tag.strength = 0;
        }
    }

    /// [`set`](Self::set) every tag of `other` with its strength.
    pub fn set_container(&mut self, other: &Self) {
        for tag in other.tags.values() {
            self.set(&tag.name, tag.strength);
        }
    }

    /// [`clear`](Self::clear) every tag of `other` with its strength.
    pub fn clear_container(&mut self, other: &Self) {
        for tag in other.tags.values() {
            self.clear(&tag.name, tag.strength);
        }
    }

    /// [`set`](Self::set) each name of a whitespace-separated list.
    pub fn set_str(&mut self, names: &str, value: u32) {
        for name in names.split_whitespace() {
            self.set(name, value);
        }
    }

    /// [`add`](Self::add) each name of a whitespace-separated list.
    pub fn add_str(&mut self, names: &str, value: u32) {
        for name in names.split_whitespace() {
            self.add(name, value);
        }
    }

    /// [`sub`](Self::sub) each name of a whitespace-separated list.
    pub fn sub_str(&mut self, names: &str, value: u32) {
        for name in names.split_whitespace() {
            self.sub(name, value);
        }
    }

    /// [`clear`](Self::clear) each name of a whitespace-separated list.
    pub fn clear_str(&mut self, names: &str, value: u32) {
        for name in names.split_whitespace() {
            self.clear(name, value);
        }
    }

    /// Strength of `name`. Registers the name as a side effect.
    pub fn occurrences_of(&mut self, name: &str) -> u32 {
        self.entry(name).map_or(0, |tag| tag.strength)
    }

    /// Strength of `name` without registering it.
    pub fn strength_of(&self, name: &str) -> u32 {
        self.get(name).map_or(0, Tag::strength)
    }

    /// Look up a tag without registering it.
    pub fn get(&self, name: &str) -> Option<&Tag> {
        if name.is_empty() {
            return None;
        }
        self.tags.get(&canonical(name))
    }

    /// Largest strength across all tags, 0 when empty.
    pub fn highest(&self) -> u32 {
        self.tags.values().map(Tag::strength).max().unwrap_or(0)
    }

    /// Names with a positive strength, ascending.
    pub fn names(&self) -> Vec<&str> {
        self.applied().map(Tag::name).collect()
    }

    /// Name -> strength for every tag with a positive strength.
    pub fn to_map(&self) -> BTreeMap<String, u32> {
        self.applied()
            .map(|tag| (tag.name.clone(), tag.strength))
            .collect()
    }

    /// Names grouped by exact strength.
    ///
    /// Element `i` holds the space-separated, ascending names whose strength
    /// is `i + 1`. Levels between 1 and the highest strength are present even
    /// when empty; nothing is emitted above the highest strength.
    pub fn grouped_by_strength(&self) -> Vec<String> {
        let levels = self.highest() as usize;
        let mut groups: Vec<Vec<&str>> = vec![Vec::new(); levels];
        for tag in self.applied() {
            groups[tag.strength as usize - 1].push(&tag.name);
        }
        groups.into_iter().map(|names| names.join(" ")).collect()
    }

    /// Iterate over every registered tag in ascending name order.
    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.values()
    }

    /// Tags with a positive strength, ascending.
    fn applied(&self) -> impl Iterator<Item = &Tag> {
        self.tags.values().filter(|tag| tag.strength > 0)
    }

    /// Number of registered tags, including those at zero strength.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// True when no tag has been registered.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl<'a> IntoIterator for &'a TagsContainer {
    type Item = &'a Tag;
    type IntoIter = Values<'a, String, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.values()
    }
}

impl Serialize for TagsContainer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.applied().map(|tag| (&tag.name, tag.strength)))
    }
}

impl<'de> Deserialize<'de> for TagsContainer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, u32>::deserialize(deserializer)?;
        Ok(Self::from_map(raw))
    }
}
