use crate::{GroupId, RecipeId, RecipeRecord, ResultId};
use serde::Serialize;

/// Which list is being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViewKind {
    /// Top-level list mixing plain recipes and group placeholders
    Collapsed,
    /// Members of a single group
    Expanded(GroupId),
}

/// A craftable recipe in a list, with its availability at derivation time.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(bound(serialize = "P: Serialize"))]
pub struct RecipeEntry<'a, P> {
    pub record: &'a RecipeRecord<P>,
    pub enabled: bool,
}

// Derived impls would require `P: Clone`
impl<P> Clone for RecipeEntry<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for RecipeEntry<'_, P> {}

/// Synthetic entry standing in for a collapsed group.
///
/// It carries nothing craftable. Selecting it opens the group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlaceholderEntry {
    pub group: GroupId,
    pub result_id: ResultId,
    pub member_count: usize,
}

impl PlaceholderEntry {
    /// Detail line telling the player this entry is a group.
    pub fn description(&self) -> String {
        if self.member_count == 1 {
            "1 recipe".to_string()
        } else {
            format!("{} recipes", self.member_count)
        }
    }
}

/// Identity of an entry that survives rebuilding the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntryKey {
    Recipe(RecipeId),
    Group(ResultId),
}

/// One row of a list handed to the renderer.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(bound(serialize = "P: Serialize"))]
pub enum ListEntry<'a, P> {
    Recipe(RecipeEntry<'a, P>),
    Placeholder(PlaceholderEntry),
}

impl<P> Clone for ListEntry<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for ListEntry<'_, P> {}

impl<'a, P> ListEntry<'a, P> {
    /// Placeholders are always selectable, since they navigate rather than craft.
    pub fn is_enabled(&self) -> bool {
        match self {
            ListEntry::Recipe(entry) => entry.enabled,
            ListEntry::Placeholder(_) => true,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, ListEntry::Placeholder(_))
    }

    pub fn key(&self) -> EntryKey {
        match self {
            ListEntry::Recipe(entry) => EntryKey::Recipe(entry.record.recipe_id()),
            ListEntry::Placeholder(placeholder) => EntryKey::Group(placeholder.result_id),
        }
    }

    pub fn record(&self) -> Option<&'a RecipeRecord<P>> {
        match self {
            ListEntry::Recipe(entry) => Some(entry.record),
            ListEntry::Placeholder(_) => None,
        }
    }

    pub fn placeholder(&self) -> Option<&PlaceholderEntry> {
        match self {
            ListEntry::Recipe(_) => None,
            ListEntry::Placeholder(placeholder) => Some(placeholder),
        }
    }
}

/// A derived list, in the order it should be drawn.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(bound(serialize = "P: Serialize"))]
pub struct ListView<'a, P> {
    pub kind: ViewKind,
    pub entries: Vec<ListEntry<'a, P>>,
}

impl<'a, P> ListView<'a, P> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ListEntry<'a, P>> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ListEntry<'a, P>> {
        self.entries.iter()
    }

    pub fn keys(&self) -> Vec<EntryKey> {
        self.entries.iter().map(ListEntry::key).collect()
    }

    pub fn placeholders(&self) -> Vec<PlaceholderEntry> {
        self.entries
            .iter()
            .filter_map(|entry| entry.placeholder().copied())
            .collect()
    }
}
