use super::{build_index, Generation, GroupIndex};
use crate::RecipeRecord;
use std::sync::Arc;

/// Owns the published group index for a game session.
///
/// Each [`build_now`](GroupCatalog::build_now) call starts a new generation
/// and replaces the published index. Generations come from a process-wide
/// counter, so a group id from one catalog never resolves in another. Published indexes are never modified;
/// views and navigators derived from an older generation must be dropped by
/// the caller once a new one is built.
///
/// # Examples
///
/// ```
/// use recipe_groups::{GroupCatalog, RecipeId, RecipeRecord, ResultId};
///
/// let mut catalog = GroupCatalog::new();
/// let feed = vec![RecipeRecord::new(RecipeId(1), ResultId::from_raw(0xA), ())];
///
/// let first = catalog.build_now(feed.clone());
/// let second = catalog.build_now(feed);
/// assert!(second.generation() > first.generation());
/// ```
#[derive(Debug)]
pub struct GroupCatalog<P> {
    current: Option<Arc<GroupIndex<P>>>,
}

impl<P> Default for GroupCatalog<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> GroupCatalog<P> {
    pub fn new() -> Self {
        GroupCatalog {
            current: None,
        }
    }

    /// Builds a new generation from the final recipe table and publishes it.
    ///
    /// Call exactly once per data load, after every data source has finished
    /// changing the table.
    pub fn build_now(
        &mut self,
        records: impl IntoIterator<Item = RecipeRecord<P>>,
    ) -> Arc<GroupIndex<P>> {
        let generation = Generation::fresh();
        let index = Arc::new(build_index(records, generation));

        if let Some(previous) = &self.current {
            tracing::debug!(
                previous = previous.generation().0,
                current = generation.0,
                "Replaced recipe group index"
            );
        }

        self.current = Some(Arc::clone(&index));
        index
    }

    /// The published index, or `None` before the first build.
    pub fn current(&self) -> Option<Arc<GroupIndex<P>>> {
        self.current.clone()
    }

    pub fn generation(&self) -> Option<Generation> {
        self.current.as_ref().map(|index| index.generation())
    }
}
