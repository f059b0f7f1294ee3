use std::collections::HashMap;

use weft_classfile::simple_class_name;
use weft_mappings::{MemoryMappingTree, NamespaceId};

use crate::names::lower_camel_case;

/// Maps community simple class names to the variable-style form of their official simple name
/// (`ItemStack` -> `itemInstance` when the official scheme calls the class `ItemInstance`).
///
/// Classes named identically by both schemes carry no renaming signal and are left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassCrossReference {
    names: HashMap<String, String>,
}

impl ClassCrossReference {
    /// Joins every official class with its community counterpart through the intermediary name.
    ///
    /// `intermediary` and `official` are destination namespaces of `official_tree`, `named` is
    /// the community naming column of `community_tree` (whose source namespace is intermediary).
    /// When two classes share a simple name the one visited last wins.
    pub fn build(
        official_tree: &MemoryMappingTree,
        intermediary: NamespaceId,
        official: NamespaceId,
        community_tree: &MemoryMappingTree,
        named: NamespaceId,
    ) -> Self {
        let mut names = HashMap::new();
        for class in official_tree.classes() {
            let Some(community) = class
                .dst_name(intermediary)
                .and_then(|name| community_tree.class(name))
            else {
                continue;
            };
            let community_name = community.dst_name(named).map(simple_class_name);
            let official_name = class.dst_name(official).map(simple_class_name);
            let (Some(community_name), Some(official_name)) = (community_name, official_name)
            else {
                continue;
            };
            if community_name == official_name || official_name.is_empty() {
                continue;
            }

            let replacement = lower_camel_case(official_name);
            if let Some(previous) = names.insert(community_name.to_string(), replacement.clone()) {
                if previous != replacement {
                    tracing::debug!(
                        target: "weft.layer",
                        class = community_name,
                        %previous,
                        current = %replacement,
                        "ambiguous simple class name; keeping the last mapping"
                    );
                }
            }
        }
        Self { names }
    }

    /// Replacement argument name for a community simple class name.
    pub fn get(&self, community_simple_name: &str) -> Option<&str> {
        self.names.get(community_simple_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
