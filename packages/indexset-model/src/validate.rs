use crate::error::ValidationError;
use crate::set::IndexSet;

type Result<T> = std::result::Result<T, ValidationError>;

fn serialized(set: &IndexSet) -> String {
    serde_json::to_string(set).unwrap_or_else(|_| format!("index-set {}", set.id))
}

/// Fails unless `id` is a positive integer.
pub fn check_id(set: &IndexSet) -> Result<()> {
    if set.id > 0 {
        Ok(())
    } else {
        Err(ValidationError::new(format!(
            "id: {} not a positive integer: {}",
            set.id,
            serialized(set)
        )))
    }
}

/// Fails unless both id and name are present. With a typed integer id only
/// the name can be absent; id well-formedness is `check_id`'s condition.
/// Skipped on update, where the set is known to exist.
pub fn check_id_and_name(set: &IndexSet) -> Result<()> {
    if set.name.is_empty() {
        Err(ValidationError::new(format!(
            "id or name not provided: {}",
            serialized(set)
        )))
    } else {
        Ok(())
    }
}

/// Fails unless every index contributing to the physical plan carries a
/// name, settings, and the group's mapping.
pub fn check_index_config(set: &IndexSet) -> Result<()> {
    for group in set.concepts.values() {
        for spec in &group.indexes {
            if spec.name.is_empty() || spec.settings.is_null() || group.mapping.is_null() {
                return Err(ValidationError::new(format!(
                    "missing index name, settings or mapping: {}",
                    serialized(set)
                )));
            }
        }
    }
    Ok(())
}
