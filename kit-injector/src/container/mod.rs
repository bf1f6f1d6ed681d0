//! Injector and global container
//!
//! This module provides the dependency-injection core:
//! - Class bindings: bind an interface to a concrete type, checked at registration
//! - Instance bindings: bind an interface to a fixed shared instance
//! - Qualifiers: independent named buckets of bindings for the same interface
//! - Construction with injection: fill undeclared constructor arguments from the registry
//! - Singletons: memoize the first constructed instance of a type
//! - Test isolation: swap a fresh injector behind the global facade in tests
//!
//! # Example
//!
//! ```rust,ignore
//! use kit_injector::{provide, Container, Requirement};
//!
//! // Register
//! provide!(dyn Greeter => English)?;
//! Container::provide_instance::<dyn Greeter>(Arc::new(French), Some("fr"))?;
//!
//! // Resolve
//! let greeter: Arc<dyn Greeter> = Container::get_instance::<dyn Greeter>(None)?;
//! let french: Arc<dyn Greeter> = Container::get_instance::<dyn Greeter>(Some("fr"))?;
//!
//! // Construct with injection; explicit arguments win
//! let welcome: Arc<Welcome> = Container::make::<Welcome>(None)?;
//! ```

pub mod provider;
mod registry;
mod singleton;
pub mod testing;

use std::any::TypeId;
use std::cell::RefCell;
use std::sync::{Arc, OnceLock, RwLock, RwLockReadGuard};

use tracing::{debug, trace, warn};

use crate::arguments::{Arguments, Instance};
use crate::config::InjectorConfig;
use crate::dependency::{Dependency, Requirement};
use crate::error::InjectError;
use crate::injectable::{Injectable, Scope};
use registry::{Binding, Registry};
use singleton::SingletonCache;

/// Global injector
static GLOBAL_INJECTOR: OnceLock<Injector> = OnceLock::new();

// Thread-local test overrides for isolated testing
thread_local! {
    pub(crate) static TEST_INJECTOR: RefCell<Option<Arc<Injector>>> = const { RefCell::new(None) };
}

/// The dependency injector
///
/// Owns the binding registry and the singleton cache. All methods take
/// `&self`; registration is serialized by an internal lock, so an injector can
/// be shared between threads.
pub struct Injector {
    registry: RwLock<Registry>,
    singletons: SingletonCache,
    config: InjectorConfig,
}

impl Injector {
    /// Create an empty injector configured from the environment
    pub fn new() -> Self {
        Self::with_config(InjectorConfig::from_env())
    }

    /// Create an empty injector with explicit configuration
    pub fn with_config(config: InjectorConfig) -> Self {
        Self {
            registry: RwLock::new(Registry::new()),
            singletons: SingletonCache::default(),
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &InjectorConfig {
        &self.config
    }

    /// Bind interface `I` to concrete type `K`
    ///
    /// Every resolution of `I` constructs a `K` through [`Injector::construct`],
    /// so `K`'s own dependencies and scope apply. Fails with
    /// [`InjectError::ContractViolation`] when `K` does not declare `I` in
    /// [`Injectable::interfaces`]; the registry is left untouched in that case.
    ///
    /// # Example
    /// ```rust,ignore
    /// injector.provide::<dyn Greeter, English>(None)?;
    /// injector.provide::<dyn Greeter, Pirate>(Some("pirate"))?;
    /// ```
    pub fn provide<I, K>(&self, qualifier: Option<&str>) -> Result<(), InjectError>
    where
        I: ?Sized + Send + Sync + 'static,
        K: Injectable,
    {
        let upcast = K::interfaces()
            .upcast::<I>()
            .ok_or_else(InjectError::contract_violation::<I, K>)?;
        self.bind(qualifier, TypeId::of::<I>(), Binding::class::<I, K>(upcast))
    }

    /// Bind interface `I` to a fixed instance
    ///
    /// # Example
    /// ```rust,ignore
    /// injector.provide_instance::<dyn Greeter>(Arc::new(French), Some("fr"))?;
    /// ```
    pub fn provide_instance<I>(&self, instance: Arc<I>, qualifier: Option<&str>) -> Result<(), InjectError>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.provide_any::<I>(Instance::new(instance), qualifier)
    }

    /// Bind interface `I` to an arbitrary erased instance
    ///
    /// No conformance check is made here: a value of the wrong type is
    /// accepted and only reported, as [`InjectError::TypeMismatch`], when the
    /// binding is resolved.
    pub fn provide_any<I>(&self, instance: Instance, qualifier: Option<&str>) -> Result<(), InjectError>
    where
        I: ?Sized + 'static,
    {
        self.bind(qualifier, TypeId::of::<I>(), Binding::Instance(instance))
    }

    fn bind(&self, qualifier: Option<&str>, key: TypeId, binding: Binding) -> Result<(), InjectError> {
        let provider = binding.describe();
        let replaced = self
            .registry
            .write()
            .map_err(|_| InjectError::poisoned("registry"))?
            .insert(qualifier, key, binding);

        debug!(?qualifier, provider, "Registered binding");
        if let Some(previous) = replaced {
            if self.config.warn_on_rebind {
                warn!(
                    ?qualifier,
                    previous = previous.describe(),
                    provider,
                    "Replaced existing binding"
                );
            }
        }
        Ok(())
    }

    fn registry(&self) -> Result<RwLockReadGuard<'_, Registry>, InjectError> {
        self.registry
            .read()
            .map_err(|_| InjectError::poisoned("registry"))
    }

    /// Resolve a bound type
    ///
    /// Interfaces have no way to build themselves, so a missing binding fails
    /// with [`InjectError::NotBound`]. Use [`Injector::make`] for concrete
    /// types that should construct themselves when unbound.
    pub fn get_instance<T>(&self, qualifier: Option<&str>) -> Result<Arc<T>, InjectError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.resolve(&Requirement::<T>::interface(), qualifier)
    }

    /// Resolve a concrete type, constructing it when nothing is bound
    pub fn make<K: Injectable>(&self, qualifier: Option<&str>) -> Result<Arc<K>, InjectError> {
        self.resolve(&Requirement::<K>::class(), qualifier)
    }

    /// Resolve a typed requirement
    ///
    /// A qualified requirement is looked up under its own qualifier; the
    /// `qualifier` argument must still name an existing bucket.
    pub fn resolve<T>(&self, requirement: &Requirement<T>, qualifier: Option<&str>) -> Result<Arc<T>, InjectError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let dependency = requirement.dependency();
        self.resolve_dependency(dependency, qualifier)?
            .downcast_for::<T>(dependency.type_name())
    }

    /// Resolve an erased requirement to an erased instance
    pub fn resolve_dependency(
        &self,
        dependency: &Dependency,
        qualifier: Option<&str>,
    ) -> Result<Instance, InjectError> {
        match dependency.qualifier() {
            Some(pinned) => {
                self.registry()?.ensure_qualifier(qualifier)?;
                self.lookup(dependency, Some(pinned))
            }
            None => self.lookup(dependency, qualifier),
        }
    }

    fn lookup(&self, dependency: &Dependency, qualifier: Option<&str>) -> Result<Instance, InjectError> {
        // The read guard is released before any provider runs
        let binding = self.registry()?.lookup(qualifier, dependency.type_id())?;

        match binding {
            Some(binding) => {
                trace!(
                    requirement = dependency.type_name(),
                    ?qualifier,
                    provider = binding.describe(),
                    "Resolving from binding"
                );
                binding.provide(self)
            }
            None => match dependency.fallback() {
                Some(construct) if !self.config.strict => {
                    trace!(requirement = dependency.type_name(), ?qualifier, "Resolving to itself");
                    construct(self)
                }
                _ => Err(InjectError::not_bound_named(dependency.type_name(), qualifier)),
            },
        }
    }

    /// Construct `K` with injection
    ///
    /// Every parameter `K` declares in [`Injectable::dependencies`] that is not
    /// already among the named `args` is resolved and added; then
    /// [`Injectable::construct`] runs. When positional arguments were passed, a
    /// failed resolution is only reported if the constructor reads that named
    /// slot, so a positional value can stand in for an unbound dependency.
    /// For a singleton type only the first
    /// successful call constructs; later calls return that instance and ignore
    /// `args`.
    ///
    /// # Example
    /// ```rust,ignore
    /// // Injected
    /// let welcome = injector.construct::<Welcome>(Arguments::new())?;
    ///
    /// // Explicit argument wins
    /// let args = Arguments::new().with::<dyn Greeter>("greeter", Arc::new(Pirate));
    /// let welcome = injector.construct::<Welcome>(args)?;
    /// ```
    pub fn construct<K: Injectable>(&self, args: Arguments) -> Result<Arc<K>, InjectError> {
        match K::scope() {
            Scope::Singleton => self
                .singletons
                .get_or_try_init::<K, _>(|| self.intercept::<K>(args)),
            Scope::Transient => self.intercept::<K>(args),
        }
    }

    fn intercept<K: Injectable>(&self, mut args: Arguments) -> Result<Arc<K>, InjectError> {
        for (parameter, dependency) in K::dependencies().iter() {
            if args.contains(parameter) {
                trace!(target_type = std::any::type_name::<K>(), parameter, "Keeping caller argument");
                continue;
            }
            match self.resolve_dependency(dependency, None) {
                Ok(instance) => {
                    trace!(target_type = std::any::type_name::<K>(), parameter, "Injected argument");
                    args.insert(parameter, instance);
                }
                // A positional argument may still fill this parameter
                Err(error) if args.positional_len() > 0 => {
                    trace!(target_type = std::any::type_name::<K>(), parameter, %error, "Deferred injection failure");
                    args.defer(parameter, error);
                }
                Err(error) => return Err(error),
            }
        }
        K::construct(&mut args).map(Arc::new)
    }

    /// Check if a binding exists for `T` under `qualifier`
    pub fn has_binding<T: ?Sized + 'static>(&self, qualifier: Option<&str>) -> bool {
        self.registry()
            .map(|registry| registry.contains(qualifier, TypeId::of::<T>()))
            .unwrap_or(false)
    }

    /// Check if a qualifier has received any binding
    pub fn has_qualifier(&self, qualifier: &str) -> bool {
        self.registry()
            .map(|registry| registry.has_qualifier(qualifier))
            .unwrap_or(false)
    }

    /// Number of bindings across all qualifiers
    pub fn binding_count(&self) -> usize {
        self.registry().map(|registry| registry.len()).unwrap_or(0)
    }

    /// Check if singleton `K` has been constructed
    pub fn has_singleton<K: Injectable>(&self) -> bool {
        self.singletons.contains::<K>()
    }

    /// Forget every memoized singleton
    ///
    /// Meant for test isolation; bindings are kept. Returns how many
    /// singletons were dropped.
    pub fn reset_singletons(&self) -> Result<usize, InjectError> {
        let dropped = self.singletons.clear()?;
        debug!(dropped, "Reset singletons");
        Ok(dropped)
    }

    /// Register every binding collected by `#[service(...)]`
    pub fn boot(&self) -> Result<usize, InjectError> {
        provider::bootstrap(self)
    }
}

impl Default for Injector {
    fn default() -> Self {
        Self::new()
    }
}

/// Global container facade
///
/// Provides static methods for registration and resolution against a
/// process-wide injector, with thread-local test overrides.
///
/// # Example
///
/// ```rust,ignore
/// use kit_injector::{provide, provide_instance, Container};
///
/// // Register at startup
/// provide!(dyn Greeter => English)?;
/// provide_instance!(dyn Greeter, French, "fr")?;
///
/// // Resolve anywhere
/// let welcome = Container::make::<Welcome>(None)?;
/// ```
pub struct Container;

impl Container {
    /// Initialize the global injector
    ///
    /// Configuration is read from the environment on first use. Calling this
    /// at startup is optional.
    pub fn init() -> &'static Injector {
        GLOBAL_INJECTOR.get_or_init(|| Injector::with_config(InjectorConfig::from_env()))
    }

    /// Run `f` against the test override if one is installed, else the global injector
    fn with_current<R>(f: impl FnOnce(&Injector) -> R) -> R {
        let test_injector = TEST_INJECTOR.with(|c| c.borrow().clone());
        match test_injector {
            Some(injector) => f(&injector),
            None => f(Self::init()),
        }
    }

    /// Bind interface `I` to concrete type `K`
    pub fn provide<I, K>(qualifier: Option<&str>) -> Result<(), InjectError>
    where
        I: ?Sized + Send + Sync + 'static,
        K: Injectable,
    {
        Self::with_current(|injector| injector.provide::<I, K>(qualifier))
    }

    /// Bind interface `I` to a fixed instance
    pub fn provide_instance<I>(instance: Arc<I>, qualifier: Option<&str>) -> Result<(), InjectError>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        Self::with_current(|injector| injector.provide_instance::<I>(instance, qualifier))
    }

    /// Bind interface `I` to an arbitrary erased instance
    pub fn provide_any<I: ?Sized + 'static>(instance: Instance, qualifier: Option<&str>) -> Result<(), InjectError> {
        Self::with_current(|injector| injector.provide_any::<I>(instance, qualifier))
    }

    /// Resolve a bound type
    pub fn get_instance<T>(qualifier: Option<&str>) -> Result<Arc<T>, InjectError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        Self::with_current(|injector| injector.get_instance::<T>(qualifier))
    }

    /// Resolve a concrete type, constructing it when nothing is bound
    pub fn make<K: Injectable>(qualifier: Option<&str>) -> Result<Arc<K>, InjectError> {
        Self::with_current(|injector| injector.make::<K>(qualifier))
    }

    /// Resolve a typed requirement
    pub fn resolve<T>(requirement: &Requirement<T>, qualifier: Option<&str>) -> Result<Arc<T>, InjectError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        Self::with_current(|injector| injector.resolve(requirement, qualifier))
    }

    /// Construct `K` with injection
    pub fn construct<K: Injectable>(args: Arguments) -> Result<Arc<K>, InjectError> {
        Self::with_current(|injector| injector.construct::<K>(args))
    }

    /// Check if a binding exists
    pub fn has_binding<T: ?Sized + 'static>(qualifier: Option<&str>) -> bool {
        Self::with_current(|injector| injector.has_binding::<T>(qualifier))
    }

    /// Forget every memoized singleton
    pub fn reset_singletons() -> Result<usize, InjectError> {
        Self::with_current(|injector| injector.reset_singletons())
    }

    /// Register every binding collected by `#[service(...)]`
    pub fn boot() -> Result<usize, InjectError> {
        Self::with_current(|injector| injector.boot())
    }
}

/// Bind an interface to a concrete type, optionally under a qualifier
///
/// # Example
/// ```rust,ignore
/// provide!(dyn Greeter => English)?;
/// provide!(dyn Greeter => Pirate, "pirate")?;
/// ```
#[macro_export]
macro_rules! provide {
    ($iface:ty => $class:ty) => {
        $crate::Container::provide::<$iface, $class>(None)
    };
    ($iface:ty => $class:ty, $qualifier:expr) => {
        $crate::Container::provide::<$iface, $class>(Some($qualifier))
    };
}

/// Bind an interface to an instance (auto-wraps in Arc)
///
/// # Example
/// ```rust,ignore
/// provide_instance!(dyn Greeter, French)?;
/// provide_instance!(dyn Greeter, French, "fr")?;
/// ```
#[macro_export]
macro_rules! provide_instance {
    ($iface:ty, $instance:expr) => {
        $crate::Container::provide_instance::<$iface>(
            ::std::sync::Arc::new($instance) as ::std::sync::Arc<$iface>,
            None,
        )
    };
    ($iface:ty, $instance:expr, $qualifier:expr) => {
        $crate::Container::provide_instance::<$iface>(
            ::std::sync::Arc::new($instance) as ::std::sync::Arc<$iface>,
            Some($qualifier),
        )
    };
}

/// Requirement for an interface under a qualifier
///
/// # Example
/// ```rust,ignore
/// Dependencies::new().with("greeter", named!("fr", dyn Greeter))
/// ```
#[macro_export]
macro_rules! named {
    ($qualifier:expr, $iface:ty) => {
        $crate::Requirement::<$iface>::interface().named($qualifier)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency::{named, Dependencies};
    use crate::injectable::Interfaces;
    use pretty_assertions::assert_eq;

    trait Greeter: Send + Sync {
        fn greet(&self) -> String;
    }

    struct English;

    impl Greeter for English {
        fn greet(&self) -> String {
            "hello".to_string()
        }
    }

    impl Injectable for English {
        fn interfaces() -> Interfaces<Self> {
            Interfaces::new().implements::<dyn Greeter>(|this| this)
        }

        fn construct(_args: &mut Arguments) -> Result<Self, InjectError> {
            Ok(English)
        }
    }

    struct French;

    impl Greeter for French {
        fn greet(&self) -> String {
            "bonjour".to_string()
        }
    }

    struct Robot;

    impl Injectable for Robot {
        fn construct(_args: &mut Arguments) -> Result<Self, InjectError> {
            Ok(Robot)
        }
    }

    struct Welcome {
        greeter: Arc<dyn Greeter>,
    }

    impl Injectable for Welcome {
        fn dependencies() -> Dependencies {
            Dependencies::new().with("greeter", Requirement::<dyn Greeter>::interface())
        }

        fn construct(args: &mut Arguments) -> Result<Self, InjectError> {
            Ok(Welcome {
                greeter: args.param("greeter")?,
            })
        }
    }

    struct FrenchWelcome {
        greeter: Arc<dyn Greeter>,
    }

    impl Injectable for FrenchWelcome {
        fn dependencies() -> Dependencies {
            Dependencies::new().with("greeter", named("fr", Requirement::<dyn Greeter>::interface()))
        }

        fn construct(args: &mut Arguments) -> Result<Self, InjectError> {
            Ok(FrenchWelcome {
                greeter: args.param("greeter")?,
            })
        }
    }

    struct Session {
        robot: Arc<Robot>,
    }

    impl Injectable for Session {
        fn dependencies() -> Dependencies {
            Dependencies::new().with("robot", Requirement::<Robot>::class())
        }

        fn scope() -> Scope {
            Scope::Singleton
        }

        fn construct(args: &mut Arguments) -> Result<Self, InjectError> {
            Ok(Session {
                robot: args.param("robot")?,
            })
        }
    }

    struct Broken;

    impl Injectable for Broken {
        fn construct(_args: &mut Arguments) -> Result<Self, InjectError> {
            Err(InjectError::construction::<Self>("no power"))
        }
    }

    fn injector() -> Injector {
        Injector::with_config(InjectorConfig::builder().strict(false).build())
    }

    #[test]
    fn test_class_binding_is_injected() {
        let injector = injector();
        injector.provide::<dyn Greeter, English>(None).unwrap();

        let welcome = injector.construct::<Welcome>(Arguments::new()).unwrap();
        assert_eq!(welcome.greeter.greet(), "hello");
    }

    #[test]
    fn test_class_binding_builds_new_instance_each_time() {
        let injector = injector();
        injector.provide::<dyn Greeter, English>(None).unwrap();

        let first = injector.get_instance::<dyn Greeter>(None).unwrap();
        let second = injector.get_instance::<dyn Greeter>(None).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_caller_argument_wins() {
        let injector = injector();
        injector.provide::<dyn Greeter, English>(None).unwrap();
        let explicit: Arc<dyn Greeter> = Arc::new(French);

        let args = Arguments::new().with("greeter", explicit.clone());
        let welcome = injector.construct::<Welcome>(args).unwrap();

        assert!(Arc::ptr_eq(&welcome.greeter, &explicit));
    }

    #[test]
    fn test_caller_argument_needs_no_binding() {
        let injector = injector();
        let explicit: Arc<dyn Greeter> = Arc::new(French);

        let welcome = injector
            .construct::<Welcome>(Arguments::new().with("greeter", explicit.clone()))
            .unwrap();
        assert!(Arc::ptr_eq(&welcome.greeter, &explicit));
    }

    #[test]
    fn test_named_bindings_are_isolated() {
        let injector = injector();
        let french: Arc<dyn Greeter> = Arc::new(French);
        injector.provide::<dyn Greeter, English>(None).unwrap();
        injector
            .provide_instance::<dyn Greeter>(french.clone(), Some("fr"))
            .unwrap();

        assert_eq!(injector.get_instance::<dyn Greeter>(None).unwrap().greet(), "hello");
        let resolved = injector.get_instance::<dyn Greeter>(Some("fr")).unwrap();
        assert!(Arc::ptr_eq(&resolved, &french));
    }

    #[test]
    fn test_qualified_dependency() {
        let injector = injector();
        injector.provide::<dyn Greeter, English>(None).unwrap();
        injector
            .provide_instance::<dyn Greeter>(Arc::new(French), Some("fr"))
            .unwrap();

        let welcome = injector.construct::<FrenchWelcome>(Arguments::new()).unwrap();
        assert_eq!(welcome.greeter.greet(), "bonjour");
    }

    #[test]
    fn test_qualified_dependency_with_unknown_qualifier() {
        let injector = injector();
        injector.provide::<dyn Greeter, English>(None).unwrap();

        let err = injector
            .construct::<FrenchWelcome>(Arguments::new())
            .err()
            .unwrap();
        assert_eq!(err, InjectError::unknown_qualifier("fr"));
    }

    #[test]
    fn test_qualified_requirement_still_checks_outer_qualifier() {
        let injector = injector();
        injector
            .provide_instance::<dyn Greeter>(Arc::new(French), Some("fr"))
            .unwrap();
        let requirement = named("fr", Requirement::<dyn Greeter>::interface());

        assert_eq!(injector.resolve(&requirement, None).unwrap().greet(), "bonjour");
        assert_eq!(
            injector.resolve(&requirement, Some("other")).err().unwrap(),
            InjectError::unknown_qualifier("other")
        );
    }

    #[test]
    fn test_unknown_qualifier() {
        let injector = injector();

        let err = injector
            .get_instance::<dyn Greeter>(Some("missing"))
            .err()
            .unwrap();
        assert!(err.is_lookup_error());
        assert_eq!(err, InjectError::unknown_qualifier("missing"));
    }

    #[test]
    fn test_unknown_qualifier_applies_to_self_fallback() {
        let injector = injector();

        let err = injector.make::<Robot>(Some("missing")).err().unwrap();
        assert_eq!(err, InjectError::unknown_qualifier("missing"));
    }

    #[test]
    fn test_unbound_interface() {
        let injector = injector();

        let err = injector.get_instance::<dyn Greeter>(None).err().unwrap();
        assert!(matches!(err, InjectError::NotBound { qualifier: None, .. }));
    }

    #[test]
    fn test_self_fallback() {
        let injector = injector();

        assert!(injector.make::<Robot>(None).is_ok());
        assert!(!injector.has_binding::<Robot>(None));
    }

    #[test]
    fn test_strict_mode_disables_self_fallback() {
        let injector = Injector::with_config(InjectorConfig::builder().strict(true).build());

        let err = injector.make::<Robot>(None).err().unwrap();
        assert!(matches!(err, InjectError::NotBound { .. }));

        injector.provide::<Robot, Robot>(None).unwrap();
        assert!(injector.make::<Robot>(None).is_ok());
    }

    #[test]
    fn test_contract_violation_leaves_registry_unchanged() {
        let injector = injector();
        let french: Arc<dyn Greeter> = Arc::new(French);
        injector.provide_instance::<dyn Greeter>(french.clone(), None).unwrap();

        let err = injector.provide::<dyn Greeter, Robot>(None).unwrap_err();
        assert!(err.is_contract_violation());

        let resolved = injector.get_instance::<dyn Greeter>(None).unwrap();
        assert!(Arc::ptr_eq(&resolved, &french));
        assert_eq!(injector.binding_count(), 1);
    }

    #[test]
    fn test_contract_violation_does_not_create_qualifier() {
        let injector = injector();

        assert!(injector.provide::<dyn Greeter, Robot>(Some("robots")).is_err());
        assert!(!injector.has_qualifier("robots"));
    }

    #[test]
    fn test_permissive_instance_binding_fails_on_resolution() {
        let injector = injector();
        injector
            .provide_any::<dyn Greeter>(Instance::new(Arc::new(42u32)), None)
            .unwrap();

        assert!(injector.has_binding::<dyn Greeter>(None));
        let err = injector.get_instance::<dyn Greeter>(None).err().unwrap();
        assert!(matches!(err, InjectError::TypeMismatch { actual: "u32", .. }));
    }

    #[test]
    fn test_last_binding_wins() {
        let injector = injector();
        injector.provide::<dyn Greeter, English>(None).unwrap();
        injector
            .provide_instance::<dyn Greeter>(Arc::new(French), None)
            .unwrap();

        assert_eq!(injector.get_instance::<dyn Greeter>(None).unwrap().greet(), "bonjour");
    }

    #[test]
    fn test_singleton_ignores_later_arguments() {
        let injector = injector();

        let first = injector.construct::<Session>(Arguments::new()).unwrap();
        let other_robot = Arc::new(Robot);
        let second = injector
            .construct::<Session>(Arguments::new().with("robot", other_robot.clone()))
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(!Arc::ptr_eq(&second.robot, &other_robot));
        assert!(injector.has_singleton::<Session>());
    }

    #[test]
    fn test_reset_singletons() {
        let injector = injector();
        let first = injector.make::<Session>(None).unwrap();

        assert_eq!(injector.reset_singletons().unwrap(), 1);
        let second = injector.make::<Session>(None).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_separate_injectors_have_separate_singletons() {
        let a = injector();
        let b = injector();

        let from_a = a.make::<Session>(None).unwrap();
        let from_b = b.make::<Session>(None).unwrap();
        assert!(!Arc::ptr_eq(&from_a, &from_b));
    }

    #[test]
    fn test_construction_error_propagates_unchanged() {
        let injector = injector();

        let err = injector.make::<Broken>(None).err().unwrap();
        assert_eq!(err, InjectError::construction::<Broken>("no power"));
    }

    #[test]
    fn test_missing_dependency_stops_construction() {
        let injector = injector();

        let err = injector.construct::<Welcome>(Arguments::new()).err().unwrap();
        assert!(err.is_lookup_error());
    }
}
