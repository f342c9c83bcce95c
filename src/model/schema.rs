//! Ordered slot declarations for group and message types
//!
//! A [`GroupSchema`] is built exactly once per container type and shared
//! read-only (behind an `Arc`) by every instance of that type. Declaration
//! order is semantically significant: it defines traversal and serialization
//! order for downstream consumers. Lookups resolve through a fixed
//! name-to-index table, never by scanning.

use crate::error::{Result, StructureError};
use crate::model::types::TypeTag;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Declaration of a single named slot within a schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotDefinition {
    /// Slot name, unique within its schema
    pub name: String,
    /// Type tag of the structures this slot holds
    #[serde(rename = "type")]
    pub type_tag: TypeTag,
    /// Whether at least one instance is required for a complete message
    #[serde(default)]
    pub required: bool,
    /// Whether the slot may hold more than one instance
    #[serde(default)]
    pub repeating: bool,
}

impl SlotDefinition {
    /// Create a new slot definition
    pub fn new(
        name: impl Into<String>,
        type_tag: impl Into<TypeTag>,
        required: bool,
        repeating: bool,
    ) -> Self {
        Self {
            name: name.into(),
            type_tag: type_tag.into(),
            required,
            repeating,
        }
    }
}

/// Immutable, ordered set of slot declarations for one container type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "SchemaData", try_from = "SchemaData")]
pub struct GroupSchema {
    name: String,
    slots: FxIndexMap<String, SlotDefinition>,
}

impl GroupSchema {
    /// Start declaring a schema for the container type `name`
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            slots: FxIndexMap::default(),
        }
    }

    /// Build a schema from an ordered list of definitions.
    ///
    /// Fails with [`StructureError::DuplicateSlot`] if two definitions share
    /// a name.
    pub fn from_definitions(
        name: impl Into<String>,
        definitions: impl IntoIterator<Item = SlotDefinition>,
    ) -> Result<Self> {
        let mut builder = Self::builder(name);
        for definition in definitions {
            builder.declare_definition(definition)?;
        }
        Ok(builder.build())
    }

    /// Name of the container type this schema describes
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of declared slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the schema declares no slots
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether a slot with the given name is declared
    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Declaration position of the named slot
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.slots.get_index_of(name)
    }

    /// Definition of the named slot
    pub fn definition(&self, name: &str) -> Option<&SlotDefinition> {
        self.slots.get(name)
    }

    /// Declaration position and definition of the named slot in one lookup
    pub fn entry(&self, name: &str) -> Option<(usize, &SlotDefinition)> {
        self.slots
            .get_full(name)
            .map(|(index, _, definition)| (index, definition))
    }

    /// Definition at the given declaration position
    pub fn definition_at(&self, index: usize) -> Option<&SlotDefinition> {
        self.slots.get_index(index).map(|(_, definition)| definition)
    }

    /// Definitions in declaration order
    pub fn definitions(&self) -> impl Iterator<Item = &SlotDefinition> {
        self.slots.values()
    }

    /// Slot names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }
}

/// Incremental schema declaration, used while a container type is defined
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    name: String,
    slots: FxIndexMap<String, SlotDefinition>,
}

impl SchemaBuilder {
    /// Declare the next slot.
    ///
    /// Fails with [`StructureError::DuplicateSlot`] if the name is already
    /// declared in this schema; the builder is left unchanged.
    pub fn declare(
        &mut self,
        name: impl Into<String>,
        type_tag: impl Into<TypeTag>,
        required: bool,
        repeating: bool,
    ) -> Result<&mut Self> {
        self.declare_definition(SlotDefinition::new(name, type_tag, required, repeating))
    }

    /// Declare the next slot from an existing definition
    pub fn declare_definition(&mut self, definition: SlotDefinition) -> Result<&mut Self> {
        if self.slots.contains_key(&definition.name) {
            return Err(StructureError::duplicate_slot(&definition.name, &self.name));
        }
        self.slots.insert(definition.name.clone(), definition);
        Ok(self)
    }

    /// Freeze the declarations into an immutable schema
    pub fn build(self) -> GroupSchema {
        GroupSchema {
            name: self.name,
            slots: self.slots,
        }
    }
}

/// Serialized form of a schema: the name plus the ordered definition list
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SchemaData {
    name: String,
    slots: Vec<SlotDefinition>,
}

impl From<GroupSchema> for SchemaData {
    fn from(schema: GroupSchema) -> Self {
        Self {
            name: schema.name,
            slots: schema.slots.into_values().collect(),
        }
    }
}

impl TryFrom<SchemaData> for GroupSchema {
    type Error = StructureError;

    fn try_from(data: SchemaData) -> Result<Self> {
        Self::from_definitions(data.name, data.slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schema() -> GroupSchema {
        let mut builder = GroupSchema::builder("OSM_R26");
        builder.declare("MSH", "MSH", true, false).unwrap();
        builder.declare("SFT", "SFT", false, true).unwrap();
        builder.declare("UAC", "UAC", false, false).unwrap();
        builder
            .declare("SHIPMENT", "OSM_R26_SHIPMENT", true, true)
            .unwrap();
        builder.build()
    }

    #[test]
    fn test_declaration_order_is_preserved() {
        let schema = sample_schema();
        let names: Vec<&str> = schema.names().collect();
        assert_eq!(names, vec!["MSH", "SFT", "UAC", "SHIPMENT"]);
        assert_eq!(schema.index_of("UAC"), Some(2));
        assert_eq!(schema.definition_at(3).unwrap().name, "SHIPMENT");
    }

    #[test]
    fn test_duplicate_declaration_fails() {
        let mut builder = GroupSchema::builder("ADT_A01");
        builder.declare("MSH", "MSH", true, false).unwrap();
        let err = builder.declare("MSH", "MSH", true, false).unwrap_err();
        assert_eq!(err, StructureError::duplicate_slot("MSH", "ADT_A01"));

        // the failed declaration left the builder unchanged
        let schema = builder.build();
        assert_eq!(schema.len(), 1);
    }

    #[test]
    fn test_definition_lookup() {
        let schema = sample_schema();
        let shipment = schema.definition("SHIPMENT").unwrap();
        assert_eq!(shipment.type_tag.as_str(), "OSM_R26_SHIPMENT");
        assert!(shipment.required);
        assert!(shipment.repeating);
        assert!(schema.definition("ZZZ").is_none());
    }

    #[test]
    fn test_from_definitions_rejects_duplicates() {
        let err = GroupSchema::from_definitions(
            "ADT_A01",
            vec![
                SlotDefinition::new("MSH", "MSH", true, false),
                SlotDefinition::new("MSH", "MSH", true, false),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, StructureError::DuplicateSlot { .. }));
    }
}
