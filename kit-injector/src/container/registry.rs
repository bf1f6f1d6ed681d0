//! Binding storage
//!
//! Bindings are grouped into buckets by qualifier. The default (unqualified)
//! bucket always exists; a named bucket comes into existence with its first
//! binding and is never removed.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use crate::arguments::{Arguments, Instance};
use crate::container::Injector;
use crate::error::InjectError;
use crate::injectable::Injectable;

type BuildFn = Arc<dyn Fn(&Injector) -> Result<Instance, InjectError> + Send + Sync>;

/// Provider types: either a class to construct or a fixed instance
#[derive(Clone)]
pub(crate) enum Binding {
    /// Construct the concrete type through the injector on every resolution
    Class {
        class: &'static str,
        build: BuildFn,
    },

    /// Return the same instance on every resolution
    Instance(Instance),
}

impl Binding {
    /// Class provider for `K`, exposed as interface `I`
    pub(crate) fn class<I, K>(upcast: fn(Arc<K>) -> Arc<I>) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
        K: Injectable,
    {
        let build: BuildFn = Arc::new(move |injector: &Injector| {
            let instance = injector.construct::<K>(Arguments::new())?;
            Ok(Instance::new(upcast(instance)))
        });
        Self::Class {
            class: std::any::type_name::<K>(),
            build,
        }
    }

    /// Produce an instance
    pub(crate) fn provide(&self, injector: &Injector) -> Result<Instance, InjectError> {
        match self {
            Self::Class { build, .. } => build(injector),
            Self::Instance(instance) => Ok(instance.clone()),
        }
    }

    /// Short description for logging
    pub(crate) fn describe(&self) -> &'static str {
        match self {
            Self::Class { class, .. } => *class,
            Self::Instance(instance) => instance.type_name(),
        }
    }
}

/// Qualifier -> interface -> provider
pub(crate) struct Registry {
    default: HashMap<TypeId, Binding>,
    named: HashMap<String, HashMap<TypeId, Binding>>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self {
            default: HashMap::new(),
            named: HashMap::new(),
        }
    }

    /// Store a binding, returning the one it replaced
    pub(crate) fn insert(
        &mut self,
        qualifier: Option<&str>,
        key: TypeId,
        binding: Binding,
    ) -> Option<Binding> {
        let bucket = match qualifier {
            None => &mut self.default,
            Some(name) => self.named.entry(name.to_owned()).or_default(),
        };
        bucket.insert(key, binding)
    }

    fn bucket(&self, qualifier: Option<&str>) -> Result<&HashMap<TypeId, Binding>, InjectError> {
        match qualifier {
            None => Ok(&self.default),
            Some(name) => self
                .named
                .get(name)
                .ok_or_else(|| InjectError::unknown_qualifier(name)),
        }
    }

    /// Fail unless the qualifier's bucket exists
    pub(crate) fn ensure_qualifier(&self, qualifier: Option<&str>) -> Result<(), InjectError> {
        self.bucket(qualifier).map(|_| ())
    }

    /// Find the binding for `key`
    ///
    /// `Ok(None)` means the bucket exists but holds nothing for `key`.
    pub(crate) fn lookup(
        &self,
        qualifier: Option<&str>,
        key: TypeId,
    ) -> Result<Option<Binding>, InjectError> {
        Ok(self.bucket(qualifier)?.get(&key).cloned())
    }

    pub(crate) fn contains(&self, qualifier: Option<&str>, key: TypeId) -> bool {
        self.bucket(qualifier)
            .map(|bucket| bucket.contains_key(&key))
            .unwrap_or(false)
    }

    pub(crate) fn has_qualifier(&self, qualifier: &str) -> bool {
        self.named.contains_key(qualifier)
    }

    /// Total number of bindings across all buckets
    pub(crate) fn len(&self) -> usize {
        self.default.len() + self.named.values().map(HashMap::len).sum::<usize>()
    }
}
