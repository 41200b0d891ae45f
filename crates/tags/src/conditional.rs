//! Conditional tag rules: trigger tags that pull in dependent tags.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer, ser::SerializeMap};
use tracing::debug;

use crate::{TagsContainer, canonical};

/// Strength given to every dependent tag of a rule.
const RULE_STRENGTH: u32 = 1;

/// Mapping from trigger tag names to dependent tag registries.
///
/// Triggers registered together in one [`add_rule`](Self::add_rule) call share
/// a single dependent registry: editing it through one trigger (via
/// [`dependents_mut`](Self::dependents_mut)) is visible through every other
/// trigger of the same rule. The table owns all registries and never drops one;
/// rebinding a trigger only changes which registry it points at.
#[derive(Debug, Clone, Default)]
pub struct ConditionalTagger {
    /// Dependent registries. Indices handed out are stable.
    groups: Vec<TagsContainer>,
    /// Canonical trigger name -> index into `groups`.
    triggers: BTreeMap<String, usize>,
}

impl ConditionalTagger {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind every name in `triggers` to one shared registry built from
    /// `dependents`. Both arguments are whitespace-separated; nothing happens
    /// if either is empty.
    pub fn add_rule(&mut self, triggers: &str, dependents: &str) {
        let deps = TagsContainer::from_names(dependents, RULE_STRENGTH);
        if deps.is_empty() || triggers.split_whitespace().next().is_none() {
            return;
        }
        let index = self.groups.len();
        self.groups.push(deps);
        for trigger in triggers.split_whitespace() {
            debug!(
                target: "tags::conditional",
                trigger,
                dependents,
                group = index,
                "add rule"
            );
            self.triggers.insert(canonical(trigger), index);
        }
    }

    /// Set the dependents of `trigger` onto `target`, if a rule exists.
    pub fn apply_rule(&self, trigger: &str, target: &mut TagsContainer) {
        if let Some(deps) = self.dependents(trigger) {
            target.set_container(deps);
        }
    }

    /// Clear the dependents of `trigger` from `target`, if a rule exists.
    pub fn retract_rule(&self, trigger: &str, target: &mut TagsContainer) {
        if let Some(deps) = self.dependents(trigger) {
            target.clear_container(deps);
        }
    }

    /// Apply the rule of every candidate whose flag is exactly 1.
    ///
    /// Used to seed dependents from a previously serialized name -> strength
    /// set.
    pub fn apply_from_initial_set<'a, I>(&self, flags: I, target: &mut TagsContainer)
    where
        I: IntoIterator<Item = (&'a str, u32)>,
    {
        for (name, flag) in flags {
            if flag == 1 {
                self.apply_rule(name, target);
            }
        }
    }

    /// Dependent registry bound to `trigger`.
    pub fn dependents(&self, trigger: &str) -> Option<&TagsContainer> {
        let index = *self.triggers.get(&canonical(trigger))?;
        self.groups.get(index)
    }

    /// Mutable dependent registry bound to `trigger`. Changes are shared by
    /// every trigger of the same rule.
    pub fn dependents_mut(&mut self, trigger: &str) -> Option<&mut TagsContainer> {
        let index = *self.triggers.get(&canonical(trigger))?;
        self.groups.get_mut(index)
    }

    /// True when `a` and `b` are both triggers bound to the same registry.
    pub fn shares_rule(&self, a: &str, b: &str) -> bool {
        match (
            self.triggers.get(&canonical(a)),
            self.triggers.get(&canonical(b)),
        ) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    /// Trigger names in ascending order.
    pub fn triggers(&self) -> impl Iterator<Item = &str> {
        self.triggers.keys().map(String::as_str)
    }

    /// Number of trigger names.
    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    /// True when no rule has been added.
    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }
}

impl Serialize for ConditionalTagger {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.triggers.len()))?;
        for (trigger, index) in &self.triggers {
            let names = self.groups.get(*index).map(TagsContainer::names);
            map.serialize_entry(trigger, &names.unwrap_or_default())?;
        }
        map.end()
    }
}
