//! Constructor argument sets
//!
//! An [`Arguments`] value is what an injectable constructor receives. It has
//! named slots, filled by the caller or by injection, and positional slots,
//! filled only by the caller. Injection never looks at positional slots, so
//! passing a dependency positionally bypasses the registry entirely.

use std::any::Any;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::Arc;

use crate::error::InjectError;

/// A type-erased shared instance
///
/// Wraps an `Arc<T>` for any `T: ?Sized`, trait objects included, so that an
/// `Arc<dyn Trait>` survives the trip through the registry and comes back out
/// with the same identity.
#[derive(Clone)]
pub struct Instance {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Instance {
    /// Erase a shared value
    pub fn new<T: ?Sized + Send + Sync + 'static>(value: Arc<T>) -> Self {
        Self {
            value: Arc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Recover the `Arc<T>` this instance was created from
    pub fn downcast<T: ?Sized + 'static>(&self) -> Option<Arc<T>> {
        self.value.downcast_ref::<Arc<T>>().cloned()
    }

    /// Recover the `Arc<T>`, reporting a TypeMismatch on failure
    pub fn downcast_for<T: ?Sized + 'static>(&self, name: &str) -> Result<Arc<T>, InjectError> {
        self.downcast::<T>()
            .ok_or_else(|| InjectError::type_mismatch::<T>(name, self.type_name))
    }

    /// Check whether this instance holds an `Arc<T>`
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.value.is::<Arc<T>>()
    }

    /// Name of the erased type
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type", &self.type_name)
            .finish()
    }
}

/// Arguments passed to an injectable constructor
///
/// # Example
///
/// ```rust,ignore
/// // Caller-supplied named argument wins over injection
/// let args = Arguments::new().with::<dyn Greeter>("greeter", Arc::new(Pirate));
/// let welcome = injector.construct::<Welcome>(args)?;
///
/// // Positional arguments bind in parameter order
/// let args = Arguments::new().positional(Arc::new("extra".to_string()));
/// ```
#[derive(Clone, Default, Debug)]
pub struct Arguments {
    positional: VecDeque<Instance>,
    named: HashMap<String, Instance>,
    // Injection failures, reported only if the named slot is read
    deferred: HashMap<String, InjectError>,
}

impl Arguments {
    /// Create an empty argument set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named argument
    pub fn with<T: ?Sized + Send + Sync + 'static>(
        mut self,
        name: impl Into<String>,
        value: Arc<T>,
    ) -> Self {
        self.named.insert(name.into(), Instance::new(value));
        self
    }

    /// Append a positional argument
    pub fn positional<T: ?Sized + Send + Sync + 'static>(mut self, value: Arc<T>) -> Self {
        self.positional.push_back(Instance::new(value));
        self
    }

    /// Set a named slot, returning the previous occupant
    pub fn insert(&mut self, name: impl Into<String>, instance: Instance) -> Option<Instance> {
        self.named.insert(name.into(), instance)
    }

    /// Record that injecting `name` failed
    ///
    /// Reading the named slot later returns `error`; consuming a positional
    /// argument for `name` discards it.
    pub(crate) fn defer(&mut self, name: impl Into<String>, error: InjectError) {
        self.deferred.insert(name.into(), error);
    }

    /// Check whether a named argument was supplied
    pub fn contains(&self, name: &str) -> bool {
        self.named.contains_key(name)
    }

    /// Names of all named arguments, in no particular order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.named.keys().map(String::as_str)
    }

    /// Number of positional arguments not yet consumed
    pub fn positional_len(&self) -> usize {
        self.positional.len()
    }

    /// Total number of remaining arguments
    pub fn len(&self) -> usize {
        self.positional.len() + self.named.len()
    }

    /// Check whether no arguments remain
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take a named argument
    pub fn take<T: ?Sized + 'static>(&mut self, name: &str) -> Result<Arc<T>, InjectError> {
        self.take_optional(name)?
            .ok_or_else(|| InjectError::missing_argument(name))
    }

    /// Take a named argument if it was supplied
    pub fn take_optional<T: ?Sized + 'static>(
        &mut self,
        name: &str,
    ) -> Result<Option<Arc<T>>, InjectError> {
        match self.named.remove(name) {
            Some(instance) => instance.downcast_for::<T>(name).map(Some),
            None => match self.deferred.remove(name) {
                Some(error) => Err(error),
                None => Ok(None),
            },
        }
    }

    /// Bind the next constructor parameter
    ///
    /// Consumes the next positional argument if one is left, otherwise the
    /// named argument `name`. Constructors that read every parameter through
    /// this method get call-by-position-or-name semantics, and a subtype can
    /// read its own leading parameters before handing the rest to its parent.
    pub fn param<T: ?Sized + 'static>(&mut self, name: &str) -> Result<Arc<T>, InjectError> {
        match self.positional.pop_front() {
            Some(instance) => {
                // Drop any injected value shadowed by the positional one
                self.discard(name);
                instance.downcast_for::<T>(name)
            }
            None => self.take(name),
        }
    }

    /// Bind the next parameter as an owned value, defaulting when absent
    pub fn param_or_default<T>(&mut self, name: &str) -> Result<T, InjectError>
    where
        T: Clone + Default + 'static,
    {
        let value = match self.positional.pop_front() {
            Some(instance) => {
                self.discard(name);
                Some(instance.downcast_for::<T>(name)?)
            }
            None => self.take_optional::<T>(name)?,
        };
        Ok(value
            .map(|arc| Arc::try_unwrap(arc).unwrap_or_else(|shared| (*shared).clone()))
            .unwrap_or_default())
    }

    fn discard(&mut self, name: &str) {
        self.named.remove(name);
        self.deferred.remove(name);
    }
}
