//! Generic group container with ordered, lazily materialized slots
//!
//! A [`Group`] owns one [`Slot`] per schema entry. Slots start empty no
//! matter what the schema requires — `required` is a validation-time
//! concept, not an eager-population one — and instances come into being
//! only when an accessor asks for them, through the group's structure
//! factory. Every operation acts on a single named slot and either fully
//! succeeds or fails without mutating anything.

use crate::error::{Result, StructureError};
use crate::model::schema::{GroupSchema, SlotDefinition};
use crate::model::structure::{Structure, StructureHandle};
use crate::model::types::{TypeTag, Version};
use crate::registry::factory::{CreationContext, StructureFactory};
use smallvec::SmallVec;
use std::any::Any;
use std::sync::Arc;

/// Runtime holder for the instances of one declared slot.
///
/// Instances occupy a contiguous, zero-based index range; removal shifts
/// later instances down by one, preserving relative order. A non-repeating
/// slot never holds more than one instance.
#[derive(Debug, Default)]
pub struct Slot {
    children: SmallVec<[Box<dyn Structure>; 1]>,
}

impl Slot {
    fn new() -> Self {
        Self {
            children: SmallVec::new(),
        }
    }

    /// Number of materialized instances
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether no instance has been materialized yet
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Instance at the given repetition index, if materialized
    pub fn get(&self, index: usize) -> Option<&dyn Structure> {
        self.children.get(index).map(Box::as_ref)
    }

    /// Iterate over the instances currently present
    pub fn iter(&self) -> Repetitions<'_> {
        Repetitions {
            inner: self.children.iter(),
        }
    }

    fn position_of(&self, target: StructureHandle) -> Option<usize> {
        self.children
            .iter()
            .position(|child| child.as_ref().handle() == target)
    }

    fn remove_at(&mut self, index: usize) -> Box<dyn Structure> {
        self.children.remove(index)
    }
}

impl<'a> IntoIterator for &'a Slot {
    type Item = &'a dyn Structure;
    type IntoIter = Repetitions<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the repetitions of one slot.
///
/// The sequence is finite and restartable: it covers exactly the instances
/// present when it was created, and it can be cloned to iterate again. The
/// borrow it holds keeps the group immutable for its whole lifetime, so the
/// snapshot can never be invalidated mid-iteration.
#[derive(Debug, Clone)]
pub struct Repetitions<'a> {
    inner: std::slice::Iter<'a, Box<dyn Structure>>,
}

impl<'a> Iterator for Repetitions<'a> {
    type Item = &'a dyn Structure;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Box::as_ref)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Repetitions<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(Box::as_ref)
    }
}

impl ExactSizeIterator for Repetitions<'_> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl std::iter::FusedIterator for Repetitions<'_> {}

/// Schema-driven container of named, ordered, lazily created slots.
///
/// Groups nest: a slot's instances may themselves be groups, forming a tree
/// whose shape mirrors the schema hierarchy. The root of such a tree is
/// usually a [`Message`](crate::Message).
#[derive(Debug)]
pub struct Group {
    tag: TypeTag,
    schema: Arc<GroupSchema>,
    factory: Arc<dyn StructureFactory>,
    version: Option<Version>,
    slots: Vec<Slot>,
}

impl Group {
    /// Create an empty group over the given schema.
    ///
    /// Every slot starts with zero instances, whatever its cardinality.
    pub fn new(schema: Arc<GroupSchema>, factory: Arc<dyn StructureFactory>) -> Self {
        Self::with_version(schema, factory, None)
    }

    /// Create an empty group that carries a protocol version.
    ///
    /// The version is handed to the factory whenever this group creates a
    /// child, so nested groups built through
    /// [`FactoryRegistry::register_group`](crate::FactoryRegistry::register_group)
    /// inherit it.
    pub fn with_version(
        schema: Arc<GroupSchema>,
        factory: Arc<dyn StructureFactory>,
        version: Option<Version>,
    ) -> Self {
        let tag = TypeTag::new(schema.name());
        let slots = (0..schema.len()).map(|_| Slot::new()).collect();
        Self {
            tag,
            schema,
            factory,
            version,
            slots,
        }
    }

    /// The schema this group was built from
    pub fn schema(&self) -> &GroupSchema {
        &self.schema
    }

    /// Protocol version inherited from the message root, if any
    pub fn version(&self) -> Option<&Version> {
        self.version.as_ref()
    }

    /// Slot names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schema.names()
    }

    /// Whether the named slot is required
    pub fn is_required(&self, name: &str) -> Result<bool> {
        Ok(self.definition(name)?.required)
    }

    /// Whether the named slot repeats
    pub fn is_repeating(&self, name: &str) -> Result<bool> {
        Ok(self.definition(name)?.repeating)
    }

    /// Read access to the named slot
    pub fn slot(&self, name: &str) -> Result<&Slot> {
        let index = self.slot_index(name)?;
        Ok(&self.slots[index])
    }

    /// Number of currently materialized instances in the named slot.
    ///
    /// Zero for a never-accessed slot, even a required one.
    pub fn count(&self, name: &str) -> Result<usize> {
        let index = self.slot_index(name)?;
        Ok(self.slots[index].len())
    }

    /// First repetition of the named slot, created through the factory if
    /// the slot is still empty.
    pub fn get(&mut self, name: &str) -> Result<&mut dyn Structure> {
        self.get_rep(name, 0)
    }

    /// Specific repetition of the named slot.
    ///
    /// Existing repetitions are returned as-is. Asking for the repetition
    /// exactly one past the current end creates and appends it; anything
    /// further fails with [`StructureError::RepetitionOutOfRange`] — there
    /// is no gap-filling. A non-repeating slot only ever has repetition 0.
    pub fn get_rep(&mut self, name: &str, repetition: usize) -> Result<&mut dyn Structure> {
        let schema = Arc::clone(&self.schema);
        let (index, definition) = schema
            .entry(name)
            .ok_or_else(|| StructureError::unknown_slot(name, schema.name()))?;

        if !definition.repeating && repetition > 0 {
            return Err(StructureError::cardinality(name, schema.name(), repetition));
        }

        let count = self.slots[index].len();
        if repetition > count {
            return Err(StructureError::repetition_out_of_range(
                name,
                schema.name(),
                repetition,
                count,
            ));
        }
        if repetition == count {
            let child = self.create_child(definition)?;
            self.slots[index].children.push(child);
            log::trace!(
                "created repetition {repetition} of '{name}' in group '{}'",
                self.tag
            );
        }
        Ok(self.slots[index].children[repetition].as_mut())
    }

    /// Append a new repetition to the named slot.
    ///
    /// Fails with [`StructureError::Cardinality`] if the slot does not
    /// repeat and already holds its one instance.
    pub fn add(&mut self, name: &str) -> Result<&mut dyn Structure> {
        let count = self.count(name)?;
        self.get_rep(name, count)
    }

    /// Repetition at the given index without creating anything
    pub fn existing(&self, name: &str, repetition: usize) -> Result<Option<&dyn Structure>> {
        let index = self.slot_index(name)?;
        Ok(self.slots[index].get(repetition))
    }

    /// Iterate over the repetitions of the named slot present right now
    pub fn repetitions(&self, name: &str) -> Result<Repetitions<'_>> {
        let index = self.slot_index(name)?;
        Ok(self.slots[index].iter())
    }

    /// Remove the instance named by `target` from the given slot.
    ///
    /// The instance is destroyed, not transferred; repetitions after it
    /// shift down by one, preserving relative order. Fails with
    /// [`StructureError::StructureNotFound`] if the handle does not name an
    /// instance of that slot.
    pub fn remove(&mut self, name: &str, target: StructureHandle) -> Result<()> {
        let index = self.slot_index(name)?;
        let position = self.slots[index]
            .position_of(target)
            .ok_or_else(|| StructureError::structure_not_found(name, self.schema.name()))?;
        self.slots[index].remove_at(position);
        log::trace!(
            "removed repetition {position} of '{name}' from group '{}'",
            self.tag
        );
        Ok(())
    }

    /// Remove the repetition at the given index from the named slot.
    ///
    /// Same reindexing as [`Group::remove`]. Fails with
    /// [`StructureError::RepetitionIndex`] if no such repetition exists.
    pub fn remove_rep(&mut self, name: &str, repetition: usize) -> Result<()> {
        let index = self.slot_index(name)?;
        let count = self.slots[index].len();
        if repetition >= count {
            return Err(StructureError::repetition_index(
                name,
                self.schema.name(),
                repetition,
                count,
            ));
        }
        self.slots[index].remove_at(repetition);
        log::trace!(
            "removed repetition {repetition} of '{name}' from group '{}'",
            self.tag
        );
        Ok(())
    }

    fn definition(&self, name: &str) -> Result<&SlotDefinition> {
        self.schema
            .definition(name)
            .ok_or_else(|| StructureError::unknown_slot(name, self.schema.name()))
    }

    fn slot_index(&self, name: &str) -> Result<usize> {
        self.schema
            .index_of(name)
            .ok_or_else(|| StructureError::unknown_slot(name, self.schema.name()))
    }

    fn create_child(&self, definition: &SlotDefinition) -> Result<Box<dyn Structure>> {
        let context = CreationContext {
            parent: &self.tag,
            version: self.version.as_ref(),
            factory: &self.factory,
        };
        self.factory.create(&definition.type_tag, &context)
    }
}

impl Structure for Group {
    fn type_tag(&self) -> &TypeTag {
        &self.tag
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
