//! Message: the root of a structure tree

use crate::model::group::Group;
use crate::model::schema::GroupSchema;
use crate::model::structure::Structure;
use crate::model::types::{TypeTag, Version};
use crate::registry::factory::StructureFactory;
use std::any::Any;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

/// Root container of a structure tree.
///
/// A message is a [`Group`] that additionally carries the protocol version
/// it was defined under. The version is fixed at construction and exists as
/// root metadata for downstream consumers; it takes no part in any
/// cardinality logic. All structural operations come from the `Deref` to
/// [`Group`].
#[derive(Debug)]
pub struct Message {
    version: Version,
    root: Group,
}

impl Message {
    /// Create an empty message over the given schema and version
    pub fn new(
        schema: Arc<GroupSchema>,
        factory: Arc<dyn StructureFactory>,
        version: Version,
    ) -> Self {
        let root = Group::with_version(schema, factory, Some(version.clone()));
        Self { version, root }
    }

    /// Protocol version this message was defined under
    pub fn version(&self) -> &Version {
        &self.version
    }
}

impl Deref for Message {
    type Target = Group;

    fn deref(&self) -> &Group {
        &self.root
    }
}

impl DerefMut for Message {
    fn deref_mut(&mut self) -> &mut Group {
        &mut self.root
    }
}

impl Structure for Message {
    fn type_tag(&self) -> &TypeTag {
        self.root.type_tag()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
