use crate::{RecipeRecord, ResultId};
use std::collections::HashMap;

mod catalog;
mod model;

pub use catalog::GroupCatalog;
pub use model::{Generation, Group, GroupId};

/// Recipes indexed by the item they produce.
///
/// Built once per data load and read-only afterwards. Records keep the order
/// they were discovered in, groups keep the order their result was first seen.
#[derive(Debug)]
pub struct GroupIndex<P> {
    generation: Generation,
    records: Vec<RecipeRecord<P>>,
    /// Group slot for each record, `None` for records without a result
    record_groups: Vec<Option<usize>>,
    groups: Vec<Group>,
    by_result: HashMap<ResultId, usize>,
}

/// Build the result index for a final recipe table in a single pass.
///
/// Records without a result never join a group. An empty table gives an
/// empty index.
///
/// # Examples
///
/// ```
/// use recipe_groups::{build_index, Generation, RecipeId, RecipeRecord, ResultId};
///
/// let dagger = ResultId::from_raw(0x1397E);
/// let records = vec![
///     RecipeRecord::new(RecipeId(1), dagger, ()),
///     RecipeRecord::new(RecipeId(2), dagger, ()),
/// ];
///
/// let index = build_index(records, Generation(1));
/// assert_eq!(index.group_for_result(dagger.unwrap()).unwrap().len(), 2);
/// ```
pub fn build_index<P>(
    records: impl IntoIterator<Item = RecipeRecord<P>>,
    generation: Generation,
) -> GroupIndex<P> {
    let records: Vec<_> = records.into_iter().collect();
    let mut record_groups = Vec::with_capacity(records.len());
    let mut groups: Vec<Group> = Vec::new();
    let mut by_result = HashMap::new();

    for (position, record) in records.iter().enumerate() {
        let Some(result_id) = record.result_id() else {
            record_groups.push(None);
            continue;
        };

        let slot = *by_result.entry(result_id).or_insert_with(|| {
            let slot = groups.len();
            groups.push(Group::new(GroupId { generation, slot }, result_id, position));
            slot
        });
        if groups[slot].first_member() != position {
            groups[slot].push(position);
        }
        record_groups.push(Some(slot));
    }

    let index = GroupIndex {
        generation,
        records,
        record_groups,
        groups,
        by_result,
    };
    index.log_contents();
    index
}

impl<P> GroupIndex<P> {
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// All records in discovery order.
    pub fn records(&self) -> &[RecipeRecord<P>] {
        &self.records
    }

    /// All groups in first-seen order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Resolves a group reference. References from another generation, or
    /// ones this index never issued, resolve to `None`.
    pub fn group(&self, id: GroupId) -> Option<&Group> {
        if id.generation != self.generation {
            return None;
        }
        self.groups.get(id.slot)
    }

    pub fn group_for_result(&self, result_id: ResultId) -> Option<&Group> {
        self.by_result.get(&result_id).map(|&slot| &self.groups[slot])
    }

    /// The group a record belongs to, if it has a result.
    pub(crate) fn group_of(&self, position: usize) -> Option<&Group> {
        self.record_groups
            .get(position)
            .copied()
            .flatten()
            .map(|slot| &self.groups[slot])
    }

    /// Member records of `group`, in discovery order.
    ///
    /// Yields nothing for a group issued by another generation.
    pub fn members<'a>(&'a self, group: &'a Group) -> impl Iterator<Item = &'a RecipeRecord<P>> + 'a {
        let positions = if group.id().generation == self.generation {
            group.member_positions()
        } else {
            &[]
        };
        positions
            .iter()
            .filter_map(move |&position| self.records.get(position))
    }

    /// Number of records that are not part of any group.
    pub fn standalone_count(&self) -> usize {
        self.record_groups.iter().filter(|g| g.is_none()).count()
    }

    fn log_contents(&self) {
        tracing::info!(
            generation = self.generation.0,
            records = self.records.len(),
            groups = self.groups.len(),
            standalone = self.standalone_count(),
            "Built recipe group index"
        );

        if tracing::enabled!(tracing::Level::DEBUG) {
            for group in &self.groups {
                let members: Vec<String> = self
                    .members(group)
                    .map(|record| record.recipe_id().to_string())
                    .collect();
                tracing::debug!(
                    result = %group.result_id(),
                    members = ?members,
                    "Recipe group"
                );
            }
        }
    }
}
