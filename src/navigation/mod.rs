use crate::{GroupId, ListEntry, ListView, RecipeRecord, ViewKind, ViewModel};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where a menu session currently is.
///
/// The depth is capped at one group: groups never contain groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavState {
    #[default]
    AtTop,
    InGroup(GroupId),
}

impl NavState {
    pub fn view_kind(self) -> ViewKind {
        match self {
            NavState::AtTop => ViewKind::Collapsed,
            NavState::InGroup(group) => ViewKind::Expanded(group),
        }
    }
}

/// What happened when the player selected an entry.
#[derive(Debug, PartialEq, Eq)]
pub enum Selection<'a, P> {
    /// A placeholder was opened and the group list is now active
    Opened(GroupId),
    /// A craftable recipe was picked. Hand it to the crafting flow as is,
    /// whether that flow confirms first or not.
    Forward(&'a RecipeRecord<P>),
}

/// What the environment should do after the back button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackAction {
    /// A group was closed and the top-level list is showing again
    ReturnedToTop,
    /// Nothing left to pop; run the default close-menu behavior
    CloseMenu,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Group {0} does not exist in the current recipe index")]
    UnknownGroup(GroupId),

    #[error("Entry {index} is out of range for a list of {len} entries")]
    EntryOutOfRange { index: usize, len: usize },
}

/// Drill-down and back handling for one menu session.
///
/// The back button only closes the menu from the top-level list; inside a
/// group it returns to the top-level list instead.
///
/// # Examples
///
/// ```
/// use recipe_groups::{
///     build_index, AlwaysAvailable, BackAction, Generation, GroupingConfig, Navigator,
///     RecipeId, RecipeRecord, ResultId, Selection, ViewModel,
/// };
///
/// let dagger = ResultId::from_raw(0x1397E);
/// let index = build_index(
///     vec![
///         RecipeRecord::new(RecipeId(1), dagger, ()),
///         RecipeRecord::new(RecipeId(2), dagger, ()),
///     ],
///     Generation(1),
/// );
/// let mut menu = Navigator::new(ViewModel::new(&index, &AlwaysAvailable, GroupingConfig::default()));
///
/// assert!(matches!(menu.select_at(0)?, Selection::Opened(_)));
/// assert_eq!(menu.current_list()?.len(), 2);
/// assert_eq!(menu.return_pressed(), BackAction::ReturnedToTop);
/// assert_eq!(menu.return_pressed(), BackAction::CloseMenu);
/// # Ok::<(), recipe_groups::NavigationError>(())
/// ```
pub struct Navigator<'a, P> {
    views: ViewModel<'a, P>,
    state: NavState,
}

impl<'a, P> Navigator<'a, P> {
    pub fn new(views: ViewModel<'a, P>) -> Self {
        Self::with_state(views, NavState::AtTop)
    }

    /// Resumes a session whose state was kept outside the navigator.
    pub fn with_state(views: ViewModel<'a, P>, state: NavState) -> Self {
        Navigator { views, state }
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn is_in_group(&self) -> bool {
        matches!(self.state, NavState::InGroup(_))
    }

    pub fn views(&self) -> &ViewModel<'a, P> {
        &self.views
    }

    /// The list the renderer should draw right now, with fresh availability.
    pub fn current_list(&self) -> Result<ListView<'a, P>, NavigationError> {
        match self.state {
            NavState::AtTop => Ok(self.views.collapsed_view()),
            NavState::InGroup(group) => self
                .views
                .expanded_view(group)
                .ok_or(NavigationError::UnknownGroup(group)),
        }
    }

    pub fn select(&mut self, entry: &ListEntry<'a, P>) -> Result<Selection<'a, P>, NavigationError> {
        match entry {
            ListEntry::Recipe(recipe) => {
                tracing::debug!(recipe = %recipe.record.recipe_id(), "Forwarding recipe selection");
                Ok(Selection::Forward(recipe.record))
            }
            ListEntry::Placeholder(placeholder) => {
                if let NavState::InGroup(current) = self.state {
                    // Expanded lists never contain placeholders; treat a stray
                    // one as a reference we cannot open from here.
                    tracing::warn!(current = %current, group = %placeholder.group, "Placeholder selected inside a group");
                    return Err(NavigationError::UnknownGroup(placeholder.group));
                }
                if self.views.index().group(placeholder.group).is_none() {
                    tracing::warn!(group = %placeholder.group, "Selected placeholder has no backing group");
                    return Err(NavigationError::UnknownGroup(placeholder.group));
                }

                tracing::debug!(
                    group = %placeholder.group,
                    result = %placeholder.result_id,
                    members = placeholder.member_count,
                    "Opening recipe group"
                );
                self.state = NavState::InGroup(placeholder.group);
                Ok(Selection::Opened(placeholder.group))
            }
        }
    }

    /// Selects the entry at `index` of the current list.
    pub fn select_at(&mut self, index: usize) -> Result<Selection<'a, P>, NavigationError> {
        let list = self.current_list()?;
        let entry = *list.get(index).ok_or(NavigationError::EntryOutOfRange {
            index,
            len: list.len(),
        })?;
        self.select(&entry)
    }

    pub fn return_pressed(&mut self) -> BackAction {
        match self.state {
            NavState::InGroup(group) => {
                tracing::debug!(group = %group, "Returning to top-level recipe list");
                self.state = NavState::AtTop;
                BackAction::ReturnedToTop
            }
            NavState::AtTop => BackAction::CloseMenu,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        build_index, AlwaysAvailable, Generation, GroupIndex, GroupingConfig, RecipeId,
        ResultId,
    };
    use proptest::prelude::*;

    const IRON_DAGGER: u32 = 0x1397E;
    const STEEL_SWORD: u32 = 0x13989;

    fn record(recipe: u32, result: u32) -> RecipeRecord<&'static str> {
        RecipeRecord::new(RecipeId(recipe), ResultId::from_raw(result), "payload")
    }

    fn scenario_index() -> GroupIndex<&'static str> {
        build_index(
            vec![
                record(1, IRON_DAGGER),
                record(2, IRON_DAGGER),
                record(3, STEEL_SWORD),
            ],
            Generation(1),
        )
    }

    fn navigator<'a>(index: &'a GroupIndex<&'static str>) -> Navigator<'a, &'static str> {
        Navigator::new(ViewModel::new(index, &AlwaysAvailable, GroupingConfig::default()))
    }

    #[test]
    fn test_starts_at_top() {
        let index = scenario_index();
        let menu = navigator(&index);
        assert_eq!(menu.state(), NavState::AtTop);
        assert!(!menu.is_in_group());
        assert_eq!(menu.current_list().unwrap().kind, ViewKind::Collapsed);
    }

    #[test]
    fn test_select_placeholder_opens_group() {
        let index = scenario_index();
        let mut menu = navigator(&index);
        let top = menu.current_list().unwrap();

        let selection = menu.select(&top.entries[0]).unwrap();
        let group = index.groups()[0].id();
        assert_eq!(selection, Selection::Opened(group));
        assert_eq!(menu.state(), NavState::InGroup(group));

        let list = menu.current_list().unwrap();
        let ids: Vec<_> = list
            .iter()
            .map(|entry| entry.record().unwrap().recipe_id())
            .collect();
        assert_eq!(ids, vec![RecipeId(1), RecipeId(2)]);
    }

    #[test]
    fn test_select_recipe_at_top_forwards_without_transition() {
        let index = scenario_index();
        let mut menu = navigator(&index);

        match menu.select_at(1).unwrap() {
            Selection::Forward(record) => assert_eq!(record.recipe_id(), RecipeId(3)),
            other => panic!("expected forward, got {other:?}"),
        }
        assert_eq!(menu.state(), NavState::AtTop);
    }

    #[test]
    fn test_select_member_inside_group_forwards() {
        let index = scenario_index();
        let mut menu = navigator(&index);
        menu.select_at(0).unwrap();

        let selection = menu.select_at(1).unwrap();
        assert_eq!(selection, Selection::Forward(&index.records()[1]));
        assert!(menu.is_in_group());
    }

    #[test]
    fn test_return_inside_group_does_not_close_menu() {
        let index = scenario_index();
        let mut menu = navigator(&index);
        let original = menu.current_list().unwrap();

        menu.select_at(0).unwrap();
        assert_eq!(menu.return_pressed(), BackAction::ReturnedToTop);
        assert_eq!(menu.state(), NavState::AtTop);
        assert_eq!(menu.current_list().unwrap(), original);
    }

    #[test]
    fn test_return_at_top_closes_menu() {
        let index = scenario_index();
        let mut menu = navigator(&index);
        assert_eq!(menu.return_pressed(), BackAction::CloseMenu);
        assert_eq!(menu.state(), NavState::AtTop);
    }

    #[test]
    fn test_unknown_group_is_reported() {
        let stale = scenario_index();
        let stale_top = navigator(&stale).current_list().unwrap();

        let fresh = build_index(
            vec![record(1, IRON_DAGGER), record(2, IRON_DAGGER)],
            Generation(2),
        );
        let mut menu = navigator(&fresh);
        let err = menu.select(&stale_top.entries[0]).unwrap_err();

        assert_eq!(err, NavigationError::UnknownGroup(stale.groups()[0].id()));
        assert_eq!(menu.state(), NavState::AtTop);
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_resumed_state_with_unknown_group_fails_to_render() {
        let index = scenario_index();
        let other = build_index(vec![record(9, STEEL_SWORD)], Generation(7));
        let foreign = other.groups()[0].id();

        let menu = Navigator::with_state(
            ViewModel::new(&index, &AlwaysAvailable, GroupingConfig::default()),
            NavState::InGroup(foreign),
        );
        assert_eq!(
            menu.current_list().unwrap_err(),
            NavigationError::UnknownGroup(foreign)
        );
    }

    #[test]
    fn test_select_at_out_of_range() {
        let index = scenario_index();
        let mut menu = navigator(&index);
        assert_eq!(
            menu.select_at(5).unwrap_err(),
            NavigationError::EntryOutOfRange { index: 5, len: 2 }
        );
    }

    #[test]
    fn test_state_kind_mapping() {
        let index = scenario_index();
        let group = index.groups()[0].id();
        assert_eq!(NavState::AtTop.view_kind(), ViewKind::Collapsed);
        assert_eq!(NavState::InGroup(group).view_kind(), ViewKind::Expanded(group));
        assert_eq!(NavState::default(), NavState::AtTop);
    }

    proptest! {
        #[test]
        fn prop_open_then_back_restores_top_list(
            results in prop::collection::vec(0u32..5, 1..40)
        ) {
            let records: Vec<_> = results
                .iter()
                .enumerate()
                .map(|(i, &result)| record(i as u32, result))
                .collect();
            let index = build_index(records, Generation(1));
            let mut menu = navigator(&index);
            let original = menu.current_list().unwrap();

            for placeholder in original.placeholders() {
                let entry = ListEntry::Placeholder(placeholder);
                prop_assert_eq!(
                    menu.select(&entry).unwrap(),
                    Selection::Opened(placeholder.group)
                );
                prop_assert_eq!(menu.return_pressed(), BackAction::ReturnedToTop);
                prop_assert_eq!(&menu.current_list().unwrap(), &original);
            }
        }
    }
}
