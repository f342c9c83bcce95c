//! The structure factory contract and a tag-keyed registry implementation

use crate::error::{Result, StructureError};
use crate::model::group::Group;
use crate::model::schema::GroupSchema;
use crate::model::segment::GenericSegment;
use crate::model::structure::Structure;
use crate::model::types::{TypeTag, Version};
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

/// What a group hands its factory when creating a child.
///
/// The context carries the parent's tag, the protocol version inherited
/// from the message root, and the factory itself so that child groups can
/// be wired to keep creating their own children with the same mapping.
#[derive(Debug, Clone, Copy)]
pub struct CreationContext<'a> {
    /// Type tag of the group the new instance will belong to
    pub parent: &'a TypeTag,
    /// Protocol version of the message root, when known
    pub version: Option<&'a Version>,
    /// The factory performing this creation
    pub factory: &'a Arc<dyn StructureFactory>,
}

/// Constructor of empty structure instances, keyed by type tag.
///
/// Implementations map tags to concrete types for a given protocol version.
/// Construction is atomic: it either returns a complete, empty instance or
/// fails with [`StructureError::Factory`] — a partially built instance never
/// reaches a slot.
pub trait StructureFactory: Send + Sync + fmt::Debug {
    /// Construct a new, empty instance of the type named by `type_tag`
    fn create(
        &self,
        type_tag: &TypeTag,
        context: &CreationContext<'_>,
    ) -> Result<Box<dyn Structure>>;
}

type Constructor = dyn Fn(&CreationContext<'_>) -> Result<Box<dyn Structure>> + Send + Sync;

/// Closure-based [`StructureFactory`] with one constructor per type tag
#[derive(Default, Clone)]
pub struct FactoryRegistry {
    constructors: FxHashMap<TypeTag, Arc<Constructor>>,
}

impl FactoryRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor for the given type tag.
    ///
    /// A later registration for the same tag replaces the earlier one.
    pub fn register<F>(&mut self, type_tag: impl Into<TypeTag>, constructor: F)
    where
        F: Fn(&CreationContext<'_>) -> Result<Box<dyn Structure>> + Send + Sync + 'static,
    {
        self.constructors
            .insert(type_tag.into(), Arc::new(constructor));
    }

    /// Register a [`GenericSegment`] constructor for the given tag
    pub fn register_segment(&mut self, type_tag: impl Into<TypeTag>) {
        let tag = type_tag.into();
        let created = tag.clone();
        self.register(tag, move |_context| {
            let segment: Box<dyn Structure> = Box::new(GenericSegment::new(created.clone()));
            Ok(segment)
        });
    }

    /// Register a nested [`Group`] constructor over a shared schema.
    ///
    /// Children of the created group are built by the same factory that
    /// built the group, and the group inherits the protocol version from
    /// its creation context.
    pub fn register_group(&mut self, type_tag: impl Into<TypeTag>, schema: Arc<GroupSchema>) {
        self.register(type_tag, move |context| {
            let group: Box<dyn Structure> = Box::new(Group::with_version(
                Arc::clone(&schema),
                Arc::clone(context.factory),
                context.version.cloned(),
            ));
            Ok(group)
        });
    }

    /// Whether a constructor is registered for the given tag
    pub fn contains(&self, type_tag: &str) -> bool {
        self.constructors.contains_key(type_tag)
    }

    /// Number of registered constructors
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    /// Whether no constructor has been registered
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl fmt::Debug for FactoryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<&str> = self.constructors.keys().map(TypeTag::as_str).collect();
        tags.sort_unstable();
        f.debug_struct("FactoryRegistry").field("tags", &tags).finish()
    }
}

impl StructureFactory for FactoryRegistry {
    fn create(
        &self,
        type_tag: &TypeTag,
        context: &CreationContext<'_>,
    ) -> Result<Box<dyn Structure>> {
        match self.constructors.get(type_tag) {
            Some(constructor) => (**constructor)(context),
            None => Err(StructureError::factory(
                type_tag.as_str(),
                "no constructor registered for this type",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_for<'a>(
        parent: &'a TypeTag,
        factory: &'a Arc<dyn StructureFactory>,
    ) -> CreationContext<'a> {
        CreationContext {
            parent,
            version: None,
            factory,
        }
    }

    #[test]
    fn test_registered_segment_is_created() {
        let mut registry = FactoryRegistry::new();
        registry.register_segment("PID");
        assert!(registry.contains("PID"));
        assert_eq!(registry.len(), 1);

        let factory: Arc<dyn StructureFactory> = Arc::new(registry);
        let parent = TypeTag::new("ADT_A01");
        let created = factory
            .create(&TypeTag::new("PID"), &context_for(&parent, &factory))
            .unwrap();
        assert_eq!(created.type_tag().as_str(), "PID");
        assert!(created.is::<GenericSegment>());
    }

    #[test]
    fn test_unregistered_tag_fails_with_factory_error() {
        let registry = FactoryRegistry::new();
        let factory: Arc<dyn StructureFactory> = Arc::new(registry);
        let parent = TypeTag::new("ADT_A01");
        let err = factory
            .create(&TypeTag::new("ZZZ"), &context_for(&parent, &factory))
            .unwrap_err();
        assert!(matches!(err, StructureError::Factory { .. }));
    }

    #[test]
    fn test_constructor_failure_propagates_unchanged() {
        let mut registry = FactoryRegistry::new();
        registry.register("OBX", |_context| {
            Err(StructureError::factory("OBX", "datatype table missing"))
        });
        let factory: Arc<dyn StructureFactory> = Arc::new(registry);
        let parent = TypeTag::new("ORU_R01");
        let err = factory
            .create(&TypeTag::new("OBX"), &context_for(&parent, &factory))
            .unwrap_err();
        assert_eq!(err, StructureError::factory("OBX", "datatype table missing"));
    }

    #[test]
    fn test_registered_group_inherits_version_and_factory() {
        let mut inner = GroupSchema::builder("ORU_R01_PATIENT");
        inner.declare("PID", "PID", true, false).unwrap();
        let schema = Arc::new(inner.build());

        let mut registry = FactoryRegistry::new();
        registry.register_segment("PID");
        registry.register_group("ORU_R01_PATIENT", Arc::clone(&schema));
        let factory: Arc<dyn StructureFactory> = Arc::new(registry);

        let parent = TypeTag::new("ORU_R01");
        let version = Version::new("2.6");
        let context = CreationContext {
            parent: &parent,
            version: Some(&version),
            factory: &factory,
        };
        let mut created = factory
            .create(&TypeTag::new("ORU_R01_PATIENT"), &context)
            .unwrap();

        let group = created.downcast_mut::<Group>().unwrap();
        assert_eq!(group.version(), Some(&Version::new("2.6")));
        // the nested group can create its own children through the factory
        let pid = group.get("PID").unwrap();
        assert_eq!(pid.type_tag().as_str(), "PID");
    }
}
