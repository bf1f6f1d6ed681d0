//! Testing utilities for the injector
//!
//! Provides:
//! - `expect!` macro for fluent assertions with clear expected/received output
//! - `TestInjector` for per-thread injector overrides in tests
//!
//! # Example
//!
//! ```rust,ignore
//! use kit_injector::expect;
//! use kit_injector::testing::TestInjector;
//!
//! #[test]
//! fn resolves_the_fake() {
//!     let _guard = TestInjector::fake();
//!     TestInjector::provide::<dyn Greeter, English>(None).unwrap();
//!
//!     expect!(Container::get_instance::<dyn Greeter>(None)).to_be_ok();
//! }
//! ```

mod expect;

pub use crate::container::testing::{TestInjector, TestInjectorGuard};
pub use expect::Expect;
