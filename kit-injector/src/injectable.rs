//! The `Injectable` trait and per-type metadata
//!
//! A type opts into injection by implementing [`Injectable`]. The trait is the
//! type's registration record: its dependency table, the interfaces it can be
//! bound to, its lifecycle scope and the real constructor.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use kit_injector::{Arguments, Dependencies, InjectError, Injectable, Interfaces, Requirement};
//!
//! pub trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! pub struct English;
//!
//! impl Injectable for English {
//!     fn interfaces() -> Interfaces<Self> {
//!         Interfaces::new().implements::<dyn Greeter>(|this| this)
//!     }
//!
//!     fn construct(_args: &mut Arguments) -> Result<Self, InjectError> {
//!         Ok(English)
//!     }
//! }
//!
//! pub struct Welcome {
//!     pub greeter: Arc<dyn Greeter>,
//! }
//!
//! impl Injectable for Welcome {
//!     fn dependencies() -> Dependencies {
//!         Dependencies::new().with("greeter", Requirement::<dyn Greeter>::interface())
//!     }
//!
//!     fn construct(args: &mut Arguments) -> Result<Self, InjectError> {
//!         Ok(Welcome { greeter: args.param("greeter")? })
//!     }
//! }
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::arguments::Arguments;
use crate::dependency::Dependencies;
use crate::error::InjectError;

/// Lifecycle of an injectable type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    /// A new instance per construction
    #[default]
    Transient,
    /// The first constructed instance is reused for every later construction
    Singleton,
}

/// A type the injector can construct
pub trait Injectable: Send + Sync + Sized + 'static {
    /// Parameters the injector fills when the caller leaves them out
    fn dependencies() -> Dependencies {
        Dependencies::new()
    }

    /// Interfaces this type may be bound to with `provide`
    fn interfaces() -> Interfaces<Self> {
        Interfaces::new()
    }

    /// Lifecycle scope
    fn scope() -> Scope {
        Scope::Transient
    }

    /// The real constructor, called with the completed argument set
    fn construct(args: &mut Arguments) -> Result<Self, InjectError>;
}

/// Interfaces a concrete type declares it satisfies
///
/// Each entry is an upcast from `Arc<K>` to `Arc<dyn Trait>`. Because the
/// upcast must compile, an entry can only exist when `K` really implements
/// the trait. A type always satisfies itself.
pub struct Interfaces<K> {
    upcasts: HashMap<TypeId, Upcast>,
    _marker: PhantomData<fn() -> K>,
}

struct Upcast {
    interface: &'static str,
    function: Box<dyn Any + Send + Sync>,
}

impl<K: Injectable> Interfaces<K> {
    /// Create a table containing only the implicit self entry
    pub fn new() -> Self {
        Self {
            upcasts: HashMap::new(),
            _marker: PhantomData,
        }
    }

    /// Declare that `K` implements interface `I`
    ///
    /// # Example
    /// ```rust,ignore
    /// Interfaces::new()
    ///     .implements::<dyn Greeter>(|this| this)
    ///     .implements::<dyn Farewell>(|this| this)
    /// ```
    pub fn implements<I>(mut self, upcast: fn(Arc<K>) -> Arc<I>) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.upcasts.insert(
            TypeId::of::<I>(),
            Upcast {
                interface: std::any::type_name::<I>(),
                function: Box::new(upcast),
            },
        );
        self
    }

    /// Check whether `K` satisfies `I`
    pub fn contains<I: ?Sized + 'static>(&self) -> bool {
        TypeId::of::<I>() == TypeId::of::<K>() || self.upcasts.contains_key(&TypeId::of::<I>())
    }

    /// The upcast from `K` to `I`, if `K` satisfies `I`
    pub fn upcast<I: ?Sized + 'static>(&self) -> Option<fn(Arc<K>) -> Arc<I>> {
        if TypeId::of::<I>() == TypeId::of::<K>() {
            let same: fn(Arc<K>) -> Arc<K> = identity;
            return (&same as &dyn Any)
                .downcast_ref::<fn(Arc<K>) -> Arc<I>>()
                .copied();
        }
        self.upcasts
            .get(&TypeId::of::<I>())?
            .function
            .downcast_ref::<fn(Arc<K>) -> Arc<I>>()
            .copied()
    }

    /// Names of the declared interfaces
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.upcasts.values().map(|u| u.interface).collect();
        names.sort_unstable();
        names
    }
}

fn identity<K>(this: Arc<K>) -> Arc<K> {
    this
}

impl<K: Injectable> Default for Interfaces<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for Interfaces<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.upcasts.values().map(|u| u.interface))
            .finish()
    }
}
