//! Schema-driven structural model for HL7 v2 style messages
//!
//! This crate implements the hierarchical container model that message and
//! group definitions are built on: name-indexed, order-preserving slots that
//! materialize their contents lazily, strict required/optional and
//! singular/repeating cardinality, stable reindexing on removal, and a
//! pluggable factory for constructing child structures.
//!
//! The crate carries no protocol-version knowledge of its own. Schemas are
//! data: an ordered list of named slot declarations supplied by the embedding
//! system (typically generated per protocol version), and every child
//! instance is built through a [`StructureFactory`] the embedding system
//! provides.
//!
//! ```
//! use std::sync::Arc;
//! use octofhir_hl7v2_model::{FactoryRegistry, Group, GroupSchema};
//!
//! # fn main() -> octofhir_hl7v2_model::Result<()> {
//! let mut builder = GroupSchema::builder("ADT_A01");
//! builder.declare("MSH", "MSH", true, false)?;
//! builder.declare("NK1", "NK1", false, true)?;
//! let schema = Arc::new(builder.build());
//!
//! let mut factory = FactoryRegistry::new();
//! factory.register_segment("MSH");
//! factory.register_segment("NK1");
//!
//! let mut group = Group::new(schema, Arc::new(factory));
//! group.get("MSH")?;
//! group.add("NK1")?;
//! group.add("NK1")?;
//! assert_eq!(group.count("NK1")?, 2);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod model;
pub mod registry;

// Re-export main types
pub use error::{Result, StructureError};
pub use model::{
    GenericSegment, Group, GroupSchema, Message, Repetitions, SchemaBuilder, SlotDefinition,
    Structure, StructureHandle, TypeTag, Version,
};
pub use registry::{CreationContext, FactoryRegistry, StructureFactory};
