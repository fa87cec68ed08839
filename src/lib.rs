uniffi::setup_scaffolding!();

pub mod feed;
pub mod ffi;
pub mod index;
pub mod model;
pub mod navigation;
pub mod view;

pub use feed::{load_feed, load_feed_dir, FeedError, FeedPayload};
pub use index::{build_index, Generation, Group, GroupCatalog, GroupId, GroupIndex};
pub use model::*;
pub use navigation::{BackAction, NavState, NavigationError, Navigator, Selection};
pub use view::{
    AlwaysAvailable, Availability, EntryKey, ListEntry, ListView, PlaceholderEntry, RecipeEntry,
    ViewKind, ViewModel,
};
