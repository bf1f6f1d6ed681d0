//! Test injector overrides
//!
//! Installs a fresh [`Injector`] behind the [`Container`](super::Container)
//! facade for the current thread, so tests can bind fakes without touching
//! the process-wide injector or each other.
//!
//! # Example
//!
//! ```rust,ignore
//! use kit_injector::testing::TestInjector;
//!
//! #[test]
//! fn greets_in_french() {
//!     let _guard = TestInjector::fake();
//!     TestInjector::provide_instance::<dyn Greeter>(Arc::new(French), None).unwrap();
//!
//!     let welcome = Container::make::<Welcome>(None).unwrap();
//!     assert_eq!(welcome.greeting(), "bonjour");
//! }
//! ```

use std::sync::Arc;

use crate::config::InjectorConfig;
use crate::container::{Injector, TEST_INJECTOR};
use crate::error::InjectError;
use crate::injectable::Injectable;

/// Test injector override
pub struct TestInjector;

impl TestInjector {
    /// Install an empty injector for the current thread
    ///
    /// The previous override (if any) comes back when the guard drops.
    pub fn fake() -> TestInjectorGuard {
        Self::fake_with(InjectorConfig::from_env())
    }

    /// Install an empty injector with explicit configuration
    pub fn fake_with(config: InjectorConfig) -> TestInjectorGuard {
        let injector = Arc::new(Injector::with_config(config));
        let previous = TEST_INJECTOR.with(|c| c.borrow_mut().replace(injector));
        TestInjectorGuard { previous }
    }

    /// The injector installed for the current thread, if any
    pub fn current() -> Option<Arc<Injector>> {
        TEST_INJECTOR.with(|c| c.borrow().clone())
    }

    fn with_current<R>(f: impl FnOnce(&Injector) -> Result<R, InjectError>) -> Result<R, InjectError> {
        match Self::current() {
            Some(injector) => f(&injector),
            // Nothing to register into until TestInjector::fake() is called
            None => Err(InjectError::not_bound::<Injector>(None)),
        }
    }

    /// Bind interface `I` to class `K` in the test injector
    pub fn provide<I, K>(qualifier: Option<&str>) -> Result<(), InjectError>
    where
        I: ?Sized + Send + Sync + 'static,
        K: Injectable,
    {
        Self::with_current(|injector| injector.provide::<I, K>(qualifier))
    }

    /// Bind interface `I` to an instance in the test injector
    pub fn provide_instance<I>(instance: Arc<I>, qualifier: Option<&str>) -> Result<(), InjectError>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        Self::with_current(|injector| injector.provide_instance::<I>(instance, qualifier))
    }
}

/// Guard that restores the previous test injector on drop
pub struct TestInjectorGuard {
    previous: Option<Arc<Injector>>,
}

impl Drop for TestInjectorGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        TEST_INJECTOR.with(|c| *c.borrow_mut() = previous);
    }
}
