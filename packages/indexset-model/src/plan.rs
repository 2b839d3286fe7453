use crate::naming::derive_index_name;
use crate::set::IndexSet;
use serde::{Deserialize, Serialize};

/// A single physical index to create or update in the engine.
///
/// Derived, never stored: plans are recomputed from the definition whenever
/// an operation needs them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalIndex {
    pub physical_name: String,
    pub settings: serde_json::Value,
    pub mapping: serde_json::Value,
}

/// Compute the physical index plan for a definition: one entry per
/// (concept type, index spec) pair, in concept order then list order.
pub fn physical_plan(set: &IndexSet) -> Vec<PhysicalIndex> {
    let mut plan = Vec::new();
    for group in set.concepts.values() {
        for spec in &group.indexes {
            plan.push(PhysicalIndex {
                physical_name: derive_index_name(set.id, &spec.name),
                settings: spec.settings.clone(),
                mapping: group.mapping.clone(),
            });
        }
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concept::ConceptType;
    use crate::set::{ConceptIndexGroup, IndexSpec};
    use serde_json::json;

    #[test]
    fn test_plan_one_entry_per_spec() {
        let set = IndexSet::new(3, "Test")
            .with_concept(
                ConceptType::Collection,
                ConceptIndexGroup::new(
                    json!({"properties": {}}),
                    vec![IndexSpec::new("coll1", json!({"shards": 1}))],
                ),
            )
            .with_concept(
                ConceptType::Granule,
                ConceptIndexGroup::new(
                    json!({"dynamic": false}),
                    vec![
                        IndexSpec::new("g1", json!({"shards": 2})),
                        IndexSpec::new("g2", json!({"shards": 3})),
                    ],
                ),
            );

        let plan = physical_plan(&set);
        assert_eq!(plan.len(), 3);
        assert_eq!(plan[0].physical_name, "3_coll1");
        assert_eq!(plan[1].physical_name, "3_g1");
        assert_eq!(plan[2].physical_name, "3_g2");
        assert_eq!(plan[1].mapping, json!({"dynamic": false}));
        assert_eq!(plan[2].settings, json!({"shards": 3}));
    }

    #[test]
    fn test_plan_names_are_normalized() {
        let set = IndexSet::new(77, "prov").with_concept(
            ConceptType::Granule,
            ConceptIndexGroup::new(json!({}), vec![IndexSpec::new("C123-PROV1", json!({}))]),
        );

        let plan = physical_plan(&set);
        assert_eq!(plan[0].physical_name, "77_c123_prov1");
    }

    #[test]
    fn test_plan_empty_set() {
        assert!(physical_plan(&IndexSet::new(1, "empty")).is_empty());
    }
}
