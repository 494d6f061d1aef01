use crate::FieldMap;

/// A partial update against a single document.
///
/// Carries only the fields to assign, in the `$set` style of document
/// stores. Fields absent from the spec are left untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateSpec {
    /// Field assignments to apply.
    pub set: FieldMap,
}

impl UpdateSpec {
    pub fn new(set: FieldMap) -> Self {
        Self { set }
    }
}
