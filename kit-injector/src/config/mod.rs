//! Configuration for the injector
//!
//! Injector behavior is read from environment variables (optionally loaded
//! from `.env` files) the first time the global container is used:
//!
//! | Variable                  | Default | Effect                                          |
//! |---------------------------|---------|-------------------------------------------------|
//! | `INJECTOR_STRICT`         | `false` | disable self-construction of unbound types      |
//! | `INJECTOR_WARN_ON_REBIND` | `true`  | log a warning when a binding is replaced        |
//!
//! # Example
//!
//! ```rust,no_run
//! use kit_injector::config::{load_dotenv, InjectorConfig};
//! use kit_injector::Injector;
//!
//! load_dotenv(std::path::Path::new("."));
//!
//! let injector = Injector::with_config(InjectorConfig::builder().strict(true).build());
//! ```

pub mod env;

pub use env::{env, env_optional, load_dotenv};

/// Injector configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectorConfig {
    /// Unbound concrete types fail with `NotBound` instead of constructing themselves
    pub strict: bool,
    /// Log a warning when a binding replaces an existing one
    pub warn_on_rebind: bool,
}

impl InjectorConfig {
    /// Build config from environment variables
    pub fn from_env() -> Self {
        Self {
            strict: env("INJECTOR_STRICT", false),
            warn_on_rebind: env("INJECTOR_WARN_ON_REBIND", true),
        }
    }

    /// Create a builder for customizing config
    pub fn builder() -> InjectorConfigBuilder {
        InjectorConfigBuilder::default()
    }

    /// Check if strict mode is enabled
    pub fn is_strict(&self) -> bool {
        self.strict
    }
}

impl Default for InjectorConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Builder for InjectorConfig
#[derive(Default)]
pub struct InjectorConfigBuilder {
    strict: Option<bool>,
    warn_on_rebind: Option<bool>,
}

impl InjectorConfigBuilder {
    /// Set strict mode
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = Some(strict);
        self
    }

    /// Set whether rebinding logs a warning
    pub fn warn_on_rebind(mut self, warn: bool) -> Self {
        self.warn_on_rebind = Some(warn);
        self
    }

    /// Build the InjectorConfig, taking unset values from the environment
    pub fn build(self) -> InjectorConfig {
        let default = InjectorConfig::from_env();
        InjectorConfig {
            strict: self.strict.unwrap_or(default.strict),
            warn_on_rebind: self.warn_on_rebind.unwrap_or(default.warn_on_rebind),
        }
    }
}
