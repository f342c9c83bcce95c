//! Data model for message structure trees
//!
//! This module provides the schema declarations, the generic group/message
//! containers built from them, and the structure trait their contents
//! implement.

#![warn(missing_docs)]

pub mod group;
pub mod message;
pub mod schema;
pub mod segment;
pub mod structure;
pub mod types;

pub use group::{Group, Repetitions, Slot};
pub use message::Message;
pub use schema::{GroupSchema, SchemaBuilder, SlotDefinition};
pub use segment::GenericSegment;
pub use structure::{Structure, StructureHandle};
pub use types::{TypeTag, Version};
