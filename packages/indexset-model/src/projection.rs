use crate::concept::ConceptType;
use crate::naming::derive_index_name;
use crate::set::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The reduced, client-facing view of an index set.
///
/// Settings and mapping detail are intentionally dropped; only the
/// logical -> physical name mapping per concept type is exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrunedIndexSet {
    pub id: i64,
    pub name: String,
    pub concepts: BTreeMap<ConceptType, BTreeMap<String, String>>,
}

/// Project a definition down to its pruned form.
pub fn prune(set: &IndexSet) -> PrunedIndexSet {
    let concepts = set
        .concepts
        .iter()
        .map(|(concept, group)| {
            let names = group
                .indexes
                .iter()
                .map(|spec| (spec.name.clone(), derive_index_name(set.id, &spec.name)))
                .collect();
            (*concept, names)
        })
        .collect();

    PrunedIndexSet {
        id: set.id,
        name: set.name.clone(),
        concepts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::set::{ConceptIndexGroup, IndexSpec};
    use serde_json::json;

    #[test]
    fn test_prune_maps_logical_to_physical() {
        let set = IndexSet::new(3, "Test").with_concept(
            ConceptType::Collection,
            ConceptIndexGroup::new(
                json!({"properties": {}}),
                vec![IndexSpec::new("coll1", json!({"shards": 1}))],
            ),
        );

        let pruned = prune(&set);
        assert_eq!(pruned.id, 3);
        assert_eq!(pruned.name, "Test");
        assert_eq!(
            pruned.concepts[&ConceptType::Collection]["coll1"],
            "3_coll1"
        );
    }

    #[test]
    fn test_prune_drops_settings_and_mapping() {
        let set = IndexSet::new(9, "s").with_concept(
            ConceptType::Granule,
            ConceptIndexGroup::new(
                json!({"dynamic": false}),
                vec![IndexSpec::new("g1", json!({"shards": 4}))],
            ),
        );

        let json = serde_json::to_value(prune(&set)).unwrap();
        assert!(json.get("concepts").is_some());
        assert!(json["concepts"]["granule"].get("settings").is_none());
        assert_eq!(json["concepts"]["granule"]["g1"], "9_g1");
    }
}
