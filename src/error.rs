//! Error types for schema declaration and group structure operations
//!
//! Every operation either fully succeeds or fails with one of the variants
//! below; a failed operation never leaves a slot partially mutated. Errors
//! are returned synchronously to the immediate caller — the model performs
//! no retry, no logging and no recovery of its own.

use thiserror::Error;

/// Result type alias for structural operations
pub type Result<T> = std::result::Result<T, StructureError>;

/// Error type for schema declaration and group structure operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    /// A slot name was declared twice in the same schema
    #[error("slot '{name}' is already declared in schema '{schema}'")]
    DuplicateSlot {
        /// The slot name that was declared again
        name: String,
        /// Name of the schema being built
        schema: String,
    },

    /// An operation referenced a slot name absent from the group's schema
    #[error("group '{group}' has no slot named '{name}'")]
    UnknownSlot {
        /// The unknown slot name
        name: String,
        /// Name of the group whose schema was consulted
        group: String,
    },

    /// A non-repeating slot was indexed beyond position 0
    #[error("slot '{name}' in group '{group}' does not repeat: repetition {index} is not allowed")]
    Cardinality {
        /// The non-repeating slot name
        name: String,
        /// Name of the containing group
        group: String,
        /// The repetition index that was requested
        index: usize,
    },

    /// A repetition more than one past the current end was requested
    #[error(
        "cannot create repetition {index} of slot '{name}' in group '{group}': \
         {count} repetitions exist and only the next one may be created"
    )]
    RepetitionOutOfRange {
        /// The slot name
        name: String,
        /// Name of the containing group
        group: String,
        /// The repetition index that was requested
        index: usize,
        /// Number of repetitions that currently exist
        count: usize,
    },

    /// A removal referenced a repetition index that does not exist
    #[error("no repetition {index} of slot '{name}' in group '{group}': {count} repetitions exist")]
    RepetitionIndex {
        /// The slot name
        name: String,
        /// Name of the containing group
        group: String,
        /// The repetition index that was requested
        index: usize,
        /// Number of repetitions that currently exist
        count: usize,
    },

    /// A removal referenced an instance that does not belong to the slot
    #[error("the given instance does not belong to slot '{name}' in group '{group}'")]
    StructureNotFound {
        /// The slot name
        name: String,
        /// Name of the containing group
        group: String,
    },

    /// The structure factory failed to construct an instance
    #[error("factory failed to create structure '{type_tag}': {message}")]
    Factory {
        /// Type tag the factory was asked to construct
        type_tag: String,
        /// Human-readable failure description
        message: String,
    },
}

impl StructureError {
    /// Create a duplicate slot declaration error
    pub fn duplicate_slot(name: impl Into<String>, schema: impl Into<String>) -> Self {
        Self::DuplicateSlot {
            name: name.into(),
            schema: schema.into(),
        }
    }

    /// Create an unknown slot error
    pub fn unknown_slot(name: impl Into<String>, group: impl Into<String>) -> Self {
        Self::UnknownSlot {
            name: name.into(),
            group: group.into(),
        }
    }

    /// Create a cardinality error for a non-repeating slot
    pub fn cardinality(name: impl Into<String>, group: impl Into<String>, index: usize) -> Self {
        Self::Cardinality {
            name: name.into(),
            group: group.into(),
            index,
        }
    }

    /// Create a repetition out of range error
    pub fn repetition_out_of_range(
        name: impl Into<String>,
        group: impl Into<String>,
        index: usize,
        count: usize,
    ) -> Self {
        Self::RepetitionOutOfRange {
            name: name.into(),
            group: group.into(),
            index,
            count,
        }
    }

    /// Create a repetition index error for a removal past the end
    pub fn repetition_index(
        name: impl Into<String>,
        group: impl Into<String>,
        index: usize,
        count: usize,
    ) -> Self {
        Self::RepetitionIndex {
            name: name.into(),
            group: group.into(),
            index,
            count,
        }
    }

    /// Create a structure not found error for an identity-based removal
    pub fn structure_not_found(name: impl Into<String>, group: impl Into<String>) -> Self {
        Self::StructureNotFound {
            name: name.into(),
            group: group.into(),
        }
    }

    /// Create a factory error
    pub fn factory(type_tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Factory {
            type_tag: type_tag.into(),
            message: message.into(),
        }
    }
}
