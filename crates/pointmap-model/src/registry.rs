//! Class metadata lookup.
//!
//! Path-finders and the point factory never look at types directly; they ask
//! a [`ClassIntrospector`] for a [`ClassDescriptor`]. [`ClassRegistry`] is the
//! in-process implementation: filled once, read-only afterwards, and safe to
//! share across threads behind an `Arc`.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::{ClassDescriptor, ClassName, ModelError};

/// Read-only access to class metadata.
pub trait ClassIntrospector: Send + Sync {
    /// Returns the descriptor of a known class.
    fn describe(&self, class: &ClassName) -> Option<Arc<ClassDescriptor>>;

    /// Like [`Self::describe`], failing for unknown classes.
    fn require(&self, class: &ClassName) -> Result<Arc<ClassDescriptor>, ModelError> {
        self.describe(class)
            .ok_or_else(|| ModelError::ClassNotFound(class.clone()))
    }
}

/// Registry of class descriptors keyed by class name.
#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    classes: IndexMap<ClassName, Arc<ClassDescriptor>>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry, validating every descriptor.
    pub fn from_descriptors<I>(descriptors: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = ClassDescriptor>,
    {
        let mut registry = Self::new();
        for descriptor in descriptors {
            registry.register(descriptor)?;
        }
        Ok(registry)
    }

    /// Parses a JSON array of class descriptors.
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        let descriptors: Vec<ClassDescriptor> = serde_json::from_str(json)?;
        Self::from_descriptors(descriptors)
    }

    /// Loads a JSON schema file (see [`Self::from_json_str`]).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let registry = Self::from_json_str(&json)?;
        tracing::debug!(
            path = %path.display(),
            classes = registry.len(),
            "Loaded class schema"
        );
        Ok(registry)
    }

    pub fn register(&mut self, descriptor: ClassDescriptor) -> Result<(), ModelError> {
        descriptor.validate()?;
        if self.classes.contains_key(&descriptor.name) {
            return Err(ModelError::DuplicateClass(descriptor.name));
        }
        self.classes
            .insert(descriptor.name.clone(), Arc::new(descriptor));
        Ok(())
    }

    pub fn get(&self, class: &ClassName) -> Option<&ClassDescriptor> {
        self.classes.get(class).map(Arc::as_ref)
    }

    pub fn contains(&self, class: &ClassName) -> bool {
        self.classes.contains_key(class)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassDescriptor> {
        self.classes.values().map(Arc::as_ref)
    }
}

impl ClassIntrospector for ClassRegistry {
    fn describe(&self, class: &ClassName) -> Option<Arc<ClassDescriptor>> {
        self.classes.get(class).cloned()
    }
}
