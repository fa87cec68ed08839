use crate::{RecipeId, RecipeRecord, ResultId};
use serde::{Deserialize, Serialize};

/// Display and crafting details carried through grouping untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedPayload {
    /// Editor name of the recipe form, if the dump recorded one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor_id: Option<String>,
    /// Keyword of the workbench the recipe is crafted at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workbench: Option<String>,
}

/// One row of a feed snapshot as written on disk.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct FeedRow {
    pub recipe_id: u32,
    /// `0`, `null` or a missing field all mean "no result"
    #[serde(default)]
    pub result_id: Option<u32>,
    #[serde(flatten)]
    pub payload: FeedPayload,
}

impl FeedRow {
    pub fn into_record(self) -> RecipeRecord<FeedPayload> {
        let result_id = self.result_id.and_then(ResultId::from_raw);
        RecipeRecord::new(RecipeId(self.recipe_id), result_id, self.payload)
    }
}
