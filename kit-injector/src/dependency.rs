//! Dependency declarations
//!
//! A [`Requirement`] says what should fill a constructor parameter: a bare
//! interface, a concrete type that can build itself, or either of those under
//! a qualifier. [`Dependencies`] is the per-type table that maps parameter
//! names to requirements.

use std::any::TypeId;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::arguments::{Arguments, Instance};
use crate::container::Injector;
use crate::error::InjectError;
use crate::injectable::Injectable;

/// Builds a requirement's own instance when nothing is bound for it
pub(crate) type FallbackFn = fn(&Injector) -> Result<Instance, InjectError>;

/// A type-erased requirement, as stored in a [`Dependencies`] table
#[derive(Clone)]
pub struct Dependency {
    type_id: TypeId,
    type_name: &'static str,
    qualifier: Option<String>,
    fallback: Option<FallbackFn>,
}

impl Dependency {
    /// Identity of the required type
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Name of the required type
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Qualifier this requirement is pinned to, if any
    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    /// Whether an unbound lookup can construct the type itself
    pub fn can_self_construct(&self) -> bool {
        self.fallback.is_some()
    }

    pub(crate) fn fallback(&self) -> Option<FallbackFn> {
        self.fallback
    }
}

impl fmt::Debug for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dependency")
            .field("type", &self.type_name)
            .field("qualifier", &self.qualifier)
            .field("self_construct", &self.fallback.is_some())
            .finish()
    }
}

/// A typed requirement for an `Arc<T>`
///
/// # Example
///
/// ```rust,ignore
/// // Interface: must be bound
/// Requirement::<dyn Mailer>::interface();
///
/// // Concrete type: builds itself when unbound
/// Requirement::<SmtpSettings>::class();
///
/// // Qualified: looked up in the "backup" bucket
/// named("backup", Requirement::<dyn Mailer>::interface());
/// ```
pub struct Requirement<T: ?Sized> {
    dependency: Dependency,
    _marker: PhantomData<fn() -> Arc<T>>,
}

impl<T: ?Sized + Send + Sync + 'static> Requirement<T> {
    /// Require `T` through a registry binding only
    pub fn interface() -> Self {
        Self::build(None)
    }

    fn build(fallback: Option<FallbackFn>) -> Self {
        Self {
            dependency: Dependency {
                type_id: TypeId::of::<T>(),
                type_name: std::any::type_name::<T>(),
                qualifier: None,
                fallback,
            },
            _marker: PhantomData,
        }
    }

    /// Pin this requirement to a qualifier
    pub fn named(mut self, qualifier: impl Into<String>) -> Self {
        self.dependency.qualifier = Some(qualifier.into());
        self
    }

    /// Qualifier this requirement is pinned to, if any
    pub fn qualifier(&self) -> Option<&str> {
        self.dependency.qualifier()
    }

    /// The erased form of this requirement
    pub fn dependency(&self) -> &Dependency {
        &self.dependency
    }
}

impl<K: Injectable> Requirement<K> {
    /// Require a concrete type, constructing it when nothing is bound
    pub fn class() -> Self {
        Self::build(Some(construct_self::<K>))
    }
}

fn construct_self<K: Injectable>(injector: &Injector) -> Result<Instance, InjectError> {
    injector
        .construct::<K>(Arguments::new())
        .map(Instance::new)
}

impl<T: ?Sized> Clone for Requirement<T> {
    fn clone(&self) -> Self {
        Self {
            dependency: self.dependency.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: ?Sized> fmt::Debug for Requirement<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Requirement").field(&self.dependency).finish()
    }
}

impl<T: ?Sized> From<Requirement<T>> for Dependency {
    fn from(requirement: Requirement<T>) -> Self {
        requirement.dependency
    }
}

/// Requirement for `requirement`'s type under `qualifier`
pub fn named<T>(qualifier: impl Into<String>, requirement: Requirement<T>) -> Requirement<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    requirement.named(qualifier)
}

/// Parameter name to requirement table for one injectable type
///
/// Entries keep declaration order; declaring a parameter twice replaces the
/// earlier requirement in place.
#[derive(Clone, Default, Debug)]
pub struct Dependencies {
    entries: Vec<(String, Dependency)>,
}

impl Dependencies {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a parent type's declarations
    ///
    /// # Example
    /// ```rust,ignore
    /// fn dependencies() -> Dependencies {
    ///     Dependencies::inherit::<Welcome>()
    ///         .with("clock", Requirement::<dyn Clock>::interface())
    /// }
    /// ```
    pub fn inherit<P: Injectable>() -> Self {
        P::dependencies()
    }

    /// Declare a parameter
    pub fn with<T: ?Sized>(mut self, parameter: impl Into<String>, requirement: Requirement<T>) -> Self {
        self.insert(parameter, requirement.into());
        self
    }

    /// Declare a parameter from an erased requirement
    pub fn insert(&mut self, parameter: impl Into<String>, dependency: Dependency) {
        let parameter = parameter.into();
        match self.entries.iter_mut().find(|(name, _)| *name == parameter) {
            Some(entry) => entry.1 = dependency,
            None => self.entries.push((parameter, dependency)),
        }
    }

    /// Requirement declared for `parameter`
    pub fn get(&self, parameter: &str) -> Option<&Dependency> {
        self.entries
            .iter()
            .find(|(name, _)| name == parameter)
            .map(|(_, dependency)| dependency)
    }

    /// Iterate over `(parameter, requirement)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Dependency)> {
        self.entries
            .iter()
            .map(|(name, dependency)| (name.as_str(), dependency))
    }

    /// Declared parameter names in order
    pub fn parameters(&self) -> Vec<&str> {
        self.iter().map(|(name, _)| name).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
