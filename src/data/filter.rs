use std::collections::BTreeMap;

use super::model::{CourseField, CourseRecord};
use super::store::CatalogStore;

// ---------------------------------------------------------------------------
// Filter criteria: field name → substring the field must contain
// ---------------------------------------------------------------------------

/// Keys are camelCase [`CourseRecord`] field names. All entries are ANDed.
pub type FilterCriteria = BTreeMap<String, String>;

/// Set (or overwrite) the criterion for one menu field.
pub fn set_criterion(criteria: &mut FilterCriteria, field: CourseField, value: impl Into<String>) {
    criteria.insert(field.name().to_string(), value.into());
}

/// Return the records that pass every criterion, in store order.
///
/// A record passes a criterion when its field value, lower-cased, contains
/// the lower-cased needle:
/// * no criteria → every record passes
/// * empty needle → passes for any value
/// * unknown field name → never passes
pub fn apply<'a>(store: &'a CatalogStore, criteria: &FilterCriteria) -> Vec<&'a CourseRecord> {
    let needles: Vec<(&str, String)> = criteria
        .iter()
        .map(|(field, needle)| (field.as_str(), needle.to_lowercase()))
        .collect();

    store
        .records()
        .iter()
        .filter(|rec| {
            needles.iter().all(|(field, needle)| match rec.field(field) {
                Some(value) => value.to_lowercase().contains(needle.as_str()),
                None => false,
            })
        })
        .collect()
}
