//! Build-time filter declarations against entity types
//!
//! Declaring a filter records its existence (and, optionally, an opaque
//! condition for the query-translation layer) against an entity type's
//! mapping configuration. Declarations never touch the runtime registry;
//! many entity types may declare the same filter name.

use crate::core::error::{validate_filter_name, FilterResult};
use std::any::type_name;
use std::marker::PhantomData;

/// One recorded (entity type, filter name) declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityFilterDeclaration {
    entity_type: &'static str,
    filter_name: String,
    condition: Option<String>,
}

impl EntityFilterDeclaration {
    fn new<E>(filter_name: &str) -> Self {
        Self {
            entity_type: type_name::<E>(),
            filter_name: filter_name.to_string(),
            condition: None,
        }
    }

    pub fn entity_type(&self) -> &'static str {
        self.entity_type
    }

    pub fn filter_name(&self) -> &str {
        &self.filter_name
    }

    pub fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }
}

/// Mutable handle passed to the caller's configuration callback, scoped to
/// one (entity type, filter name) pair
pub struct FilterConfiguration<'a, E> {
    declaration: &'a mut EntityFilterDeclaration,
    _entity: PhantomData<E>,
}

impl<E> FilterConfiguration<'_, E> {
    pub fn filter_name(&self) -> &str {
        self.declaration.filter_name()
    }

    pub fn entity_type(&self) -> &'static str {
        self.declaration.entity_type()
    }

    /// Records an opaque predicate for the query-translation collaborator.
    pub fn condition(&mut self, expression: impl Into<String>) -> &mut Self {
        self.declaration.condition = Some(expression.into());
        self
    }
}

/// Per-entity-type declaration surface
#[derive(Debug)]
pub struct EntityTypeConfiguration<E> {
    declarations: Vec<EntityFilterDeclaration>,
    _entity: PhantomData<E>,
}

impl<E> EntityTypeConfiguration<E> {
    pub fn new() -> Self {
        Self {
            declarations: Vec::new(),
            _entity: PhantomData,
        }
    }

    /// Declares a named filter against this entity type.
    ///
    /// Invokes `configure` synchronously with a handle scoped to the new
    /// declaration, then records it. Returns the configuration for chaining.
    pub fn filter<F>(&mut self, name: &str, configure: F) -> FilterResult<&mut Self>
    where
        F: FnOnce(&mut FilterConfiguration<'_, E>),
    {
        validate_filter_name(name)?;

        let mut declaration = EntityFilterDeclaration::new::<E>(name);
        let mut handle = FilterConfiguration {
            declaration: &mut declaration,
            _entity: PhantomData,
        };
        configure(&mut handle);

        self.declarations.push(declaration);
        Ok(self)
    }

    pub fn declarations(&self) -> &[EntityFilterDeclaration] {
        &self.declarations
    }
}

impl<E> Default for EntityTypeConfiguration<E> {
    fn default() -> Self {
        Self::new()
    }
}
