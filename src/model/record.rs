use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a crafting recipe.
///
/// Wraps the host's 32-bit form identifier and formats the way the host
/// names forms in its own logs (eight upper-case hex digits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(pub u32);

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

/// Identity of the item a recipe produces. This is the grouping key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultId(u32);

impl ResultId {
    /// Raw value the host uses for "this recipe produces nothing".
    pub const NONE_RAW: u32 = 0;

    /// Converts a raw host identifier, mapping the "no result" sentinel to `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use recipe_groups::ResultId;
    ///
    /// assert!(ResultId::from_raw(0).is_none());
    /// assert_eq!(ResultId::from_raw(0x12EB7).unwrap().raw(), 0x12EB7);
    /// ```
    pub fn from_raw(raw: u32) -> Option<Self> {
        if raw == Self::NONE_RAW {
            None
        } else {
            Some(ResultId(raw))
        }
    }

    /// Returns the raw host identifier.
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

/// Snapshot of one crafting recipe, taken after every data source has
/// finished changing the recipe table.
///
/// The payload `P` is whatever the host needs to render or craft the recipe;
/// grouping never looks inside it.
///
/// # Examples
///
/// ```
/// use recipe_groups::{RecipeId, RecipeRecord, ResultId};
///
/// let dagger = RecipeRecord::new(RecipeId(1), ResultId::from_raw(0x1397E), "IronDagger");
/// assert!(dagger.result_id().is_some());
///
/// let rule = RecipeRecord::new(RecipeId(2), None, "TemperRule");
/// assert!(rule.result_id().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRecord<P> {
    recipe_id: RecipeId,
    result_id: Option<ResultId>,
    raw_payload: P,
}

impl<P> RecipeRecord<P> {
    pub fn new(recipe_id: RecipeId, result_id: Option<ResultId>, raw_payload: P) -> Self {
        RecipeRecord {
            recipe_id,
            result_id,
            raw_payload,
        }
    }

    pub fn recipe_id(&self) -> RecipeId {
        self.recipe_id
    }

    /// Returns the produced item, or `None` for recipes without a result.
    pub fn result_id(&self) -> Option<ResultId> {
        self.result_id
    }

    pub fn raw_payload(&self) -> &P {
        &self.raw_payload
    }

    /// Consumes the record and returns its payload.
    pub fn into_payload(self) -> P {
        self.raw_payload
    }
}
