//! UniFFI bindings for embedding in a host game or tooling.
//!
//! This module provides FFI-safe types and functions for use with UniFFI.
//! Recipe payloads cross the boundary as opaque strings, and availability
//! rules are supplied by the foreign side through [`FfiAvailability`].

use crate::feed::{load_feed_dir, FeedError};
use crate::model::{ConfigError, GroupingConfig, RecipeId, RecipeRecord, ResultId};
use crate::navigation::{BackAction, NavState, NavigationError, Navigator, Selection};
use crate::view::{Availability, ListEntry, ViewModel};
use crate::{GroupCatalog, GroupIndex};
use camino::Utf8Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// FFI-safe error type that wraps all possible errors.
#[derive(Debug, uniffi::Error, thiserror::Error)]
pub enum GroupingError {
    #[error("Recipe index has not been built yet")]
    NotBuilt,

    #[error("Unknown group: {message}")]
    UnknownGroup { message: String },

    #[error("Entry out of range: {message}")]
    OutOfRange { message: String },

    #[error("Feed error: {message}")]
    FeedError { message: String },

    #[error("Config error: {message}")]
    ConfigError { message: String },

    #[error("Payload error: {message}")]
    PayloadError { message: String },
}

impl From<NavigationError> for GroupingError {
    fn from(e: NavigationError) -> Self {
        match e {
            NavigationError::UnknownGroup(_) => GroupingError::UnknownGroup {
                message: e.to_string(),
            },
            NavigationError::EntryOutOfRange { .. } => GroupingError::OutOfRange {
                message: e.to_string(),
            },
        }
    }
}

impl From<FeedError> for GroupingError {
    fn from(e: FeedError) -> Self {
        GroupingError::FeedError {
            message: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for GroupingError {
    fn from(e: serde_json::Error) -> Self {
        GroupingError::PayloadError {
            message: e.to_string(),
        }
    }
}

impl From<ConfigError> for GroupingError {
    fn from(e: ConfigError) -> Self {
        GroupingError::ConfigError {
            message: e.to_string(),
        }
    }
}

/// Host rules for whether a recipe can be crafted right now.
#[uniffi::export(with_foreign)]
pub trait FfiAvailability: Send + Sync {
    fn is_available(&self, recipe_id: u32) -> bool;
}

struct ForeignAvailability<'a>(&'a dyn FfiAvailability);

impl Availability for ForeignAvailability<'_> {
    fn is_available(&self, recipe_id: RecipeId) -> bool {
        self.0.is_available(recipe_id.0)
    }
}

/// One recipe of the host's final recipe table.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRecipeRecord {
    pub recipe_id: u32,
    /// Produced item, `0` if the recipe produces nothing
    pub result_id: u32,
    /// Opaque data handed back when the recipe is selected
    pub payload: String,
}

impl From<FfiRecipeRecord> for RecipeRecord<String> {
    fn from(r: FfiRecipeRecord) -> Self {
        RecipeRecord::new(RecipeId(r.recipe_id), ResultId::from_raw(r.result_id), r.payload)
    }
}

/// One row of the list to render.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiListEntry {
    /// True for a group placeholder, which has no recipe or payload
    pub is_placeholder: bool,
    pub recipe_id: Option<u32>,
    pub result_id: u32,
    pub payload: Option<String>,
    /// Group description for placeholders
    pub description: Option<String>,
    pub enabled: bool,
}

impl From<&ListEntry<'_, String>> for FfiListEntry {
    fn from(entry: &ListEntry<'_, String>) -> Self {
        match entry {
            ListEntry::Recipe(recipe) => FfiListEntry {
                is_placeholder: false,
                recipe_id: Some(recipe.record.recipe_id().0),
                result_id: recipe
                    .record
                    .result_id()
                    .map_or(ResultId::NONE_RAW, ResultId::raw),
                payload: Some(recipe.record.raw_payload().clone()),
                description: None,
                enabled: recipe.enabled,
            },
            ListEntry::Placeholder(placeholder) => FfiListEntry {
                is_placeholder: true,
                recipe_id: None,
                result_id: placeholder.result_id.raw(),
                payload: None,
                description: Some(placeholder.description()),
                enabled: true,
            },
        }
    }
}

/// Outcome of selecting an entry.
#[derive(Debug, Clone, PartialEq, uniffi::Enum)]
pub enum FfiSelection {
    /// A group was opened; call `current_list` to get its members
    OpenedGroup { result_id: u32, member_count: u32 },
    /// Pass the recipe to the crafting flow
    Craft { recipe_id: u32, payload: String },
}

/// Outcome of pressing the back button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiBackAction {
    ReturnedToTop,
    CloseMenu,
}

impl From<BackAction> for FfiBackAction {
    fn from(action: BackAction) -> Self {
        match action {
            BackAction::ReturnedToTop => FfiBackAction::ReturnedToTop,
            BackAction::CloseMenu => FfiBackAction::CloseMenu,
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Owner of the recipe index for one game session.
#[derive(uniffi::Object)]
pub struct FfiGroupCatalog {
    inner: Mutex<GroupCatalog<String>>,
    config: GroupingConfig,
}

#[uniffi::export]
impl FfiGroupCatalog {
    /// Creates a catalog collapsing groups larger than `threshold`.
    #[uniffi::constructor]
    pub fn new(threshold: u32) -> Arc<Self> {
        Arc::new(Self::with_config(GroupingConfig::with_threshold(
            usize::try_from(threshold).unwrap_or(usize::MAX),
        )))
    }

    /// Creates a catalog from a YAML configuration document.
    #[uniffi::constructor]
    pub fn from_yaml_config(config: String) -> Result<Arc<Self>, GroupingError> {
        let config = GroupingConfig::from_yaml_str(&config)?;
        Ok(Arc::new(Self::with_config(config)))
    }

    /// Builds a new index generation from the final recipe table.
    ///
    /// Call once per data load, after every other data source has finished.
    /// Menu sessions opened earlier keep showing their old generation and
    /// should be discarded.
    pub fn build_now(&self, records: Vec<FfiRecipeRecord>) -> u64 {
        let index = lock(&self.inner).build_now(records.into_iter().map(RecipeRecord::from));
        index.generation().0
    }

    /// Builds a new index generation from the feed snapshots in `dir`.
    ///
    /// Record payloads are the JSON form of each snapshot row's details.
    pub fn build_from_feed_dir(&self, dir: String) -> Result<u64, GroupingError> {
        let records = load_feed_dir(Utf8Path::new(&dir))?;
        let records = records
            .into_iter()
            .map(|record| {
                let payload = serde_json::to_string(record.raw_payload())?;
                Ok(RecipeRecord::new(record.recipe_id(), record.result_id(), payload))
            })
            .collect::<Result<Vec<_>, GroupingError>>()?;
        let index = lock(&self.inner).build_now(records);
        Ok(index.generation().0)
    }

    /// The current generation, if an index has been built.
    pub fn generation(&self) -> Option<u64> {
        lock(&self.inner).generation().map(|g| g.0)
    }

    /// The collapsing threshold, saturated to `u32::MAX`.
    pub fn threshold(&self) -> u32 {
        u32::try_from(self.config.threshold).unwrap_or(u32::MAX)
    }

    /// Starts a menu session on the current generation.
    pub fn open_menu(
        &self,
        availability: Arc<dyn FfiAvailability>,
    ) -> Result<Arc<FfiMenuSession>, GroupingError> {
        let index = lock(&self.inner).current().ok_or(GroupingError::NotBuilt)?;
        Ok(Arc::new(FfiMenuSession {
            index,
            availability,
            config: self.config,
            state: Mutex::new(NavState::AtTop),
        }))
    }
}

impl FfiGroupCatalog {
    fn with_config(config: GroupingConfig) -> Self {
        FfiGroupCatalog {
            inner: Mutex::new(GroupCatalog::new()),
            config,
        }
    }
}

/// Navigation state of one open crafting menu.
#[derive(uniffi::Object)]
pub struct FfiMenuSession {
    index: Arc<GroupIndex<String>>,
    availability: Arc<dyn FfiAvailability>,
    config: GroupingConfig,
    state: Mutex<NavState>,
}

impl FfiMenuSession {
    fn with_navigator<R>(&self, f: impl FnOnce(&mut Navigator<'_, String>) -> R) -> R {
        let availability = ForeignAvailability(self.availability.as_ref());
        let views = ViewModel::new(&self.index, &availability, self.config);
        // Availability callbacks may call back into this session, so the
        // state lock is not held while the navigator runs.
        let state = *lock(&self.state);
        let mut navigator = Navigator::with_state(views, state);
        let result = f(&mut navigator);
        *lock(&self.state) = navigator.state();
        result
    }
}

#[uniffi::export]
impl FfiMenuSession {
    /// The list to render right now, with freshly evaluated availability.
    pub fn current_list(&self) -> Result<Vec<FfiListEntry>, GroupingError> {
        self.with_navigator(|navigator| {
            let list = navigator.current_list()?;
            Ok(list.iter().map(FfiListEntry::from).collect())
        })
    }

    /// Selects the entry at `index` of the current list.
    pub fn select_at(&self, index: u32) -> Result<FfiSelection, GroupingError> {
        self.with_navigator(|navigator| {
            let selection = match navigator.select_at(usize::try_from(index).unwrap_or(usize::MAX))? {
                Selection::Opened(group) => {
                    let group = navigator
                        .views()
                        .index()
                        .group(group)
                        .ok_or_else(|| GroupingError::UnknownGroup {
                            message: group.to_string(),
                        })?;
                    FfiSelection::OpenedGroup {
                        result_id: group.result_id().raw(),
                        member_count: u32::try_from(group.len()).unwrap_or(u32::MAX),
                    }
                }
                Selection::Forward(record) => FfiSelection::Craft {
                    recipe_id: record.recipe_id().0,
                    payload: record.raw_payload().clone(),
                },
            };
            Ok(selection)
        })
    }

    /// Handles the back button. Only `CloseMenu` should close the menu.
    pub fn return_pressed(&self) -> FfiBackAction {
        self.with_navigator(|navigator| navigator.return_pressed().into())
    }

    pub fn is_in_group(&self) -> bool {
        matches!(*lock(&self.state), NavState::InGroup(_))
    }

    /// Generation this session was opened on.
    pub fn generation(&self) -> u64 {
        self.index.generation().0
    }
}

/// Returns the library version.
#[uniffi::export]
pub fn library_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
