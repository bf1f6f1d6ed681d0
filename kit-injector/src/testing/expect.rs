//! Fluent assertion API inspired by Jest's expect
//!
//! Provides a fluent API for assertions with clear expected/received output,
//! plus matchers for shared-instance identity and injector errors.

use std::fmt::Debug;
use std::sync::Arc;

use crate::error::InjectError;

/// Format the assertion failure header
fn format_header(location: &str) -> String {
    format!("\nassertion failed at {}\n", location)
}

/// The main Expect wrapper for fluent assertions
pub struct Expect<T> {
    value: T,
    location: &'static str,
}

impl<T> Expect<T> {
    /// Create a new Expect wrapper (use the expect! macro instead)
    pub fn new(value: T, location: &'static str) -> Self {
        Self { value, location }
    }
}

// Equality matchers for Debug + PartialEq types
impl<T: Debug + PartialEq> Expect<T> {
    /// Assert that the value equals the expected value
    ///
    /// # Example
    /// ```rust,ignore
    /// expect!(actual).to_equal(expected);
    /// ```
    pub fn to_equal(&self, expected: T) {
        if self.value != expected {
            panic!(
                "{}\n  expect!(actual).to_equal(expected)\n\n  Expected: {:?}\n  Received: {:?}\n",
                format_header(self.location),
                expected,
                self.value
            );
        }
    }

    /// Assert that the value does not equal the unexpected value
    pub fn to_not_equal(&self, unexpected: T) {
        if self.value == unexpected {
            panic!(
                "{}\n  expect!(actual).to_not_equal(value)\n\n  Expected NOT: {:?}\n  Received: {:?}\n",
                format_header(self.location),
                unexpected,
                self.value
            );
        }
    }
}

// Boolean matchers
impl Expect<bool> {
    /// Assert that the value is true
    pub fn to_be_true(&self) {
        if !self.value {
            panic!(
                "{}\n  expect!(value).to_be_true()\n\n  Expected: true\n  Received: false\n",
                format_header(self.location)
            );
        }
    }

    /// Assert that the value is false
    pub fn to_be_false(&self) {
        if self.value {
            panic!(
                "{}\n  expect!(value).to_be_false()\n\n  Expected: false\n  Received: true\n",
                format_header(self.location)
            );
        }
    }
}

// Option matchers
impl<T: Debug> Expect<Option<T>> {
    /// Assert that the Option is Some
    pub fn to_be_some(&self) {
        if self.value.is_none() {
            panic!(
                "{}\n  expect!(option).to_be_some()\n\n  Expected: Some(_)\n  Received: None\n",
                format_header(self.location)
            );
        }
    }

    /// Assert that the Option is None
    pub fn to_be_none(&self) {
        if let Some(ref v) = self.value {
            panic!(
                "{}\n  expect!(option).to_be_none()\n\n  Expected: None\n  Received: Some({:?})\n",
                format_header(self.location),
                v
            );
        }
    }
}

// Result matchers
//
// The Ok side of an injector result is usually an `Arc<dyn Trait>` with no
// Debug impl, so only the error side is printed.
impl<T, E: Debug> Expect<Result<T, E>> {
    /// Assert that the Result is Ok
    ///
    /// # Example
    /// ```rust,ignore
    /// expect!(Container::make::<Welcome>(None)).to_be_ok();
    /// ```
    pub fn to_be_ok(&self) {
        if let Err(ref e) = self.value {
            panic!(
                "{}\n  expect!(result).to_be_ok()\n\n  Expected: Ok(_)\n  Received: Err({:?})\n",
                format_header(self.location),
                e
            );
        }
    }

    /// Assert that the Result is Err
    pub fn to_be_err(&self) {
        if self.value.is_ok() {
            panic!(
                "{}\n  expect!(result).to_be_err()\n\n  Expected: Err(_)\n  Received: Ok(_)\n",
                format_header(self.location)
            );
        }
    }
}

// Injector error matchers
impl<T> Expect<Result<T, InjectError>> {
    /// Assert that the Result failed with exactly `expected`
    ///
    /// # Example
    /// ```rust,ignore
    /// expect!(Container::get_instance::<dyn Greeter>(Some("fr")))
    ///     .to_fail_with(InjectError::unknown_qualifier("fr"));
    /// ```
    pub fn to_fail_with(&self, expected: InjectError) {
        match &self.value {
            Err(e) if *e == expected => {}
            Err(e) => panic!(
                "{}\n  expect!(result).to_fail_with(error)\n\n  Expected: Err({:?})\n  Received: Err({:?})\n",
                format_header(self.location),
                expected,
                e
            ),
            Ok(_) => panic!(
                "{}\n  expect!(result).to_fail_with(error)\n\n  Expected: Err({:?})\n  Received: Ok(_)\n",
                format_header(self.location),
                expected
            ),
        }
    }

    /// Assert that the Result failed with a lookup error
    pub fn to_be_lookup_error(&self) {
        match &self.value {
            Err(e) if e.is_lookup_error() => {}
            Err(e) => panic!(
                "{}\n  expect!(result).to_be_lookup_error()\n\n  Expected: UnknownQualifier or NotBound\n  Received: Err({:?})\n",
                format_header(self.location),
                e
            ),
            Ok(_) => panic!(
                "{}\n  expect!(result).to_be_lookup_error()\n\n  Expected: UnknownQualifier or NotBound\n  Received: Ok(_)\n",
                format_header(self.location)
            ),
        }
    }
}

// Shared instance matchers
impl<T: ?Sized> Expect<Arc<T>> {
    /// Assert that both handles point at the same instance
    ///
    /// # Example
    /// ```rust,ignore
    /// expect!(first).to_be_same_instance(&second);
    /// ```
    pub fn to_be_same_instance(&self, other: &Arc<T>) {
        if !Arc::ptr_eq(&self.value, other) {
            panic!(
                "{}\n  expect!(arc).to_be_same_instance(&other)\n\n  Expected: the same instance\n  Received: a different instance of {}\n",
                format_header(self.location),
                std::any::type_name::<T>()
            );
        }
    }

    /// Assert that the handles point at different instances
    pub fn to_not_be_same_instance(&self, other: &Arc<T>) {
        if Arc::ptr_eq(&self.value, other) {
            panic!(
                "{}\n  expect!(arc).to_not_be_same_instance(&other)\n\n  Expected: a different instance\n  Received: the same instance of {}\n",
                format_header(self.location),
                std::any::type_name::<T>()
            );
        }
    }
}

// String matchers
impl Expect<String> {
    /// Assert that the string contains the substring
    ///
    /// # Example
    /// ```rust,ignore
    /// expect!(err.to_string()).to_contain("Unknown qualifier");
    /// ```
    pub fn to_contain(&self, substring: &str) {
        if !self.value.contains(substring) {
            panic!(
                "{}\n  expect!(string).to_contain(substring)\n\n  Expected to contain: {:?}\n  Received: {:?}\n",
                format_header(self.location),
                substring,
                self.value
            );
        }
    }
}

// Vec matchers
impl<T: Debug + PartialEq> Expect<Vec<T>> {
    /// Assert that the Vec has the expected length
    pub fn to_have_length(&self, expected: usize) {
        let actual = self.value.len();
        if actual != expected {
            panic!(
                "{}\n  expect!(vec).to_have_length({})\n\n  Expected length: {}\n  Actual length: {}\n",
                format_header(self.location),
                expected,
                expected,
                actual
            );
        }
    }
}

/// Fluent assertion entry point
///
/// # Example
/// ```rust,ignore
/// use kit_injector::expect;
///
/// expect!(injector.has_binding::<dyn Greeter>(None)).to_be_true();
/// ```
#[macro_export]
macro_rules! expect {
    ($value:expr) => {
        $crate::testing::Expect::new($value, concat!(file!(), ":", line!()))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_instance() {
        let a: Arc<dyn Send + Sync> = Arc::new(1u8);
        let b = Arc::clone(&a);
        let c: Arc<dyn Send + Sync> = Arc::new(1u8);

        crate::expect!(a.clone()).to_be_same_instance(&b);
        crate::expect!(a).to_not_be_same_instance(&c);
    }

    #[test]
    fn test_fail_with() {
        let result: Result<(), InjectError> = Err(InjectError::unknown_qualifier("x"));

        crate::expect!(result.clone()).to_fail_with(InjectError::unknown_qualifier("x"));
        crate::expect!(result).to_be_lookup_error();
    }

    #[test]
    #[should_panic(expected = "to_be_ok")]
    fn test_to_be_ok_reports_error() {
        let result: Result<u8, InjectError> = Err(InjectError::missing_argument("greeter"));

        crate::expect!(result).to_be_ok();
    }
}
