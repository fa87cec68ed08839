use crate::{GroupId, GroupIndex, GroupingConfig, RecipeId};

mod model;
pub use model::{EntryKey, ListEntry, ListView, PlaceholderEntry, RecipeEntry, ViewKind};

/// Host rules deciding whether a recipe can be crafted right now
/// (missing perk, wrong workbench, and so on).
///
/// Answers may change between calls, so views ask again every time they are
/// derived and never cache the result.
pub trait Availability {
    fn is_available(&self, recipe_id: RecipeId) -> bool;
}

impl<F> Availability for F
where
    F: Fn(RecipeId) -> bool,
{
    fn is_available(&self, recipe_id: RecipeId) -> bool {
        self(recipe_id)
    }
}

/// Treats every recipe as craftable.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysAvailable;

impl Availability for AlwaysAvailable {
    fn is_available(&self, _recipe_id: RecipeId) -> bool {
        true
    }
}

/// Derives the lists a player can see from one index generation.
///
/// # Examples
///
/// ```
/// use recipe_groups::{build_index, Generation, GroupingConfig, RecipeId, RecipeRecord, ResultId, ViewModel};
///
/// let dagger = ResultId::from_raw(0x1397E);
/// let sword = ResultId::from_raw(0x13989);
/// let index = build_index(
///     vec![
///         RecipeRecord::new(RecipeId(1), dagger, ()),
///         RecipeRecord::new(RecipeId(2), dagger, ()),
///         RecipeRecord::new(RecipeId(3), sword, ()),
///     ],
///     Generation(1),
/// );
///
/// let available = |id: RecipeId| id != RecipeId(2);
/// let views = ViewModel::new(&index, &available, GroupingConfig::default());
///
/// let top = views.collapsed_view();
/// assert_eq!(top.len(), 2);
/// assert!(top.entries[0].is_placeholder());
///
/// let placeholder = top.placeholders()[0];
/// let group = views.expanded_view(placeholder.group).unwrap();
/// assert_eq!(group.len(), 2);
/// assert!(!group.entries[1].is_enabled());
/// ```
pub struct ViewModel<'a, P> {
    index: &'a GroupIndex<P>,
    availability: &'a dyn Availability,
    config: GroupingConfig,
}

impl<'a, P> ViewModel<'a, P> {
    pub fn new(
        index: &'a GroupIndex<P>,
        availability: &'a dyn Availability,
        config: GroupingConfig,
    ) -> Self {
        ViewModel {
            index,
            availability,
            config,
        }
    }

    pub fn index(&self) -> &'a GroupIndex<P> {
        self.index
    }

    pub fn config(&self) -> GroupingConfig {
        self.config
    }

    /// The top-level list.
    ///
    /// Plain recipes stay at their discovery position. A collapsed group
    /// shows one placeholder where its first member was found.
    pub fn collapsed_view(&self) -> ListView<'a, P> {
        let index = self.index;
        let mut entries = Vec::with_capacity(index.records().len());

        for (position, record) in index.records().iter().enumerate() {
            match index.group_of(position) {
                Some(group) if self.config.collapses(group.len()) => {
                    if group.first_member() == position {
                        entries.push(ListEntry::Placeholder(PlaceholderEntry {
                            group: group.id(),
                            result_id: group.result_id(),
                            member_count: group.len(),
                        }));
                    }
                }
                _ => entries.push(ListEntry::Recipe(RecipeEntry {
                    record,
                    enabled: self.availability.is_available(record.recipe_id()),
                })),
            }
        }

        ListView {
            kind: ViewKind::Collapsed,
            entries,
        }
    }

    /// The members of one group, in discovery order.
    ///
    /// Returns `None` if `group` does not belong to this generation.
    pub fn expanded_view(&self, group: GroupId) -> Option<ListView<'a, P>> {
        let index = self.index;
        let resolved = index.group(group)?;
        let entries = index
            .members(resolved)
            .map(|record| {
                ListEntry::Recipe(RecipeEntry {
                    record,
                    enabled: self.availability.is_available(record.recipe_id()),
                })
            })
            .collect();

        Some(ListView {
            kind: ViewKind::Expanded(group),
            entries,
        })
    }

    pub fn view_for(&self, kind: ViewKind) -> Option<ListView<'a, P>> {
        match kind {
            ViewKind::Collapsed => Some(self.collapsed_view()),
            ViewKind::Expanded(group) => self.expanded_view(group),
        }
    }
}
