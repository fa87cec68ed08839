use crate::ResultId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Identity of one index build. A new data load always gets a new generation,
/// and generations handed out by [`Generation::fresh`] are unique across the
/// whole process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Generation(pub u64);

impl Generation {
    /// Allocates a generation no other caller in this process has received.
    pub fn fresh() -> Self {
        Generation(NEXT_GENERATION.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen{}", self.0)
    }
}

/// Reference to a group, only valid within the generation that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId {
    pub(crate) generation: Generation,
    pub(crate) slot: usize,
}

impl GroupId {
    pub fn generation(&self) -> Generation {
        self.generation
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.generation, self.slot)
    }
}

/// All recipes producing the same result, in discovery order.
///
/// Members are stored as positions into the owning index's record list;
/// use [`GroupIndex::members`](super::GroupIndex::members) to walk the records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    id: GroupId,
    result_id: ResultId,
    members: Vec<usize>,
}

impl Group {
    pub(crate) fn new(id: GroupId, result_id: ResultId, first_member: usize) -> Self {
        Group {
            id,
            result_id,
            members: vec![first_member],
        }
    }

    pub(crate) fn push(&mut self, member: usize) {
        self.members.push(member);
    }

    pub(crate) fn member_positions(&self) -> &[usize] {
        &self.members
    }

    pub(crate) fn first_member(&self) -> usize {
        self.members[0]
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn result_id(&self) -> ResultId {
        self.result_id
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false: a group only exists once it has a member.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
