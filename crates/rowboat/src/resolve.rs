use crate::schema::RecordSchema;
use crate::{Error, FieldMap, Result};

/// Map a logical field name to its physical storage field.
///
/// The order is load-bearing: stored data is checked before the alias table
/// so an alias can never shadow a real field, and the virtual set is checked
/// last so a virtual name can never collide with a stored one.
pub(crate) fn resolve<'a>(
    schema: &'a RecordSchema,
    data: &FieldMap,
    is_known: impl Fn(&str) -> bool,
    name: &'a str,
) -> Option<&'a str> {
    if data.contains_key(name) {
        Some(name)
    } else if let Some(target) = schema.aliases.get(name) {
        Some(target.as_str())
    } else if name == schema.primary_key {
        Some(name)
    } else if is_known(name) {
        Some(name)
    } else if schema.is_virtual(name) {
        Some(name)
    } else {
        None
    }
}

/// Like [`resolve`], but an unresolvable name is an error carrying the
/// attempted name and a snapshot of the current data.
pub(crate) fn resolve_strict<'a>(
    schema: &'a RecordSchema,
    data: &FieldMap,
    is_known: impl Fn(&str) -> bool,
    name: &'a str,
) -> Result<&'a str> {
    resolve(schema, data, is_known, name).ok_or_else(|| Error::unknown_field(name, data))
}
