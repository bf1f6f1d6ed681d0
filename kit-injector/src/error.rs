//! Injector-wide error types
//!
//! Every fallible operation of the container returns [`InjectError`]. Errors
//! surface synchronously to the immediate caller; nothing is retried and a
//! failed construction never leaves a partially built instance behind.

use thiserror::Error;

/// Container error type
///
/// The variants fall into three families:
/// - registration errors: [`InjectError::ContractViolation`]
/// - lookup errors: [`InjectError::UnknownQualifier`], [`InjectError::NotBound`]
/// - construction errors: everything raised while building an instance
///
/// # Example
///
/// ```rust,ignore
/// use kit_injector::{Container, InjectError};
///
/// match Container::get_instance::<dyn Mailer>(Some("smtp")) {
///     Err(e) if e.is_lookup_error() => { /* fall back to something else */ }
///     other => { /* ... */ }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InjectError {
    /// A class was bound to an interface it does not declare
    #[error("'{class}' does not implement '{interface}'")]
    ContractViolation {
        /// The interface the binding was registered for
        interface: &'static str,
        /// The concrete type that was offered
        class: &'static str,
    },

    /// Resolution against a qualifier that never received a binding
    #[error("Unknown qualifier '{qualifier}'")]
    UnknownQualifier {
        /// The qualifier name
        qualifier: String,
    },

    /// No binding exists and the requirement cannot construct itself
    #[error("No binding for '{type_name}' (qualifier: {qualifier:?})")]
    NotBound {
        /// The type name of the requirement
        type_name: &'static str,
        /// The qualifier bucket that was searched
        qualifier: Option<String>,
    },

    /// A value is not of the type the caller asked for
    #[error("'{name}' is a '{actual}', expected '{expected}'")]
    TypeMismatch {
        /// Parameter or binding the value came from
        name: String,
        /// The requested type
        expected: &'static str,
        /// The type actually stored
        actual: &'static str,
    },

    /// A constructor asked for an argument nobody supplied
    #[error("Missing argument '{parameter}'")]
    MissingArgument {
        /// The parameter name
        parameter: String,
    },

    /// The real constructor failed
    #[error("Failed to construct '{target}': {message}")]
    Construction {
        /// The type being constructed
        target: &'static str,
        /// The constructor's error message
        message: String,
    },

    /// A lock guarding shared container state was poisoned
    #[error("Lock poisoned: {resource}")]
    Poisoned {
        /// Which piece of state was affected
        resource: &'static str,
    },
}

impl InjectError {
    /// Create a ContractViolation error for binding `K` to interface `I`
    pub fn contract_violation<I: ?Sized, K: ?Sized>() -> Self {
        Self::ContractViolation {
            interface: std::any::type_name::<I>(),
            class: std::any::type_name::<K>(),
        }
    }

    /// Create an UnknownQualifier error
    pub fn unknown_qualifier(qualifier: impl Into<String>) -> Self {
        Self::UnknownQualifier {
            qualifier: qualifier.into(),
        }
    }

    /// Create a NotBound error for a given type
    pub fn not_bound<T: ?Sized>(qualifier: Option<&str>) -> Self {
        Self::not_bound_named(std::any::type_name::<T>(), qualifier)
    }

    pub(crate) fn not_bound_named(type_name: &'static str, qualifier: Option<&str>) -> Self {
        Self::NotBound {
            type_name,
            qualifier: qualifier.map(str::to_owned),
        }
    }

    /// Create a TypeMismatch error
    pub fn type_mismatch<T: ?Sized>(name: impl Into<String>, actual: &'static str) -> Self {
        Self::TypeMismatch {
            name: name.into(),
            expected: std::any::type_name::<T>(),
            actual,
        }
    }

    /// Create a MissingArgument error
    pub fn missing_argument(parameter: impl Into<String>) -> Self {
        Self::MissingArgument {
            parameter: parameter.into(),
        }
    }

    /// Wrap a constructor failure for type `K`
    ///
    /// # Example
    /// ```rust,ignore
    /// fn construct(args: &mut Arguments) -> Result<Self, InjectError> {
    ///     let port = parse_port().map_err(InjectError::construction::<Self>)?;
    ///     Ok(Self { port })
    /// }
    /// ```
    pub fn construction<K: ?Sized>(error: impl std::fmt::Display) -> Self {
        Self::Construction {
            target: std::any::type_name::<K>(),
            message: error.to_string(),
        }
    }

    pub(crate) fn poisoned(resource: &'static str) -> Self {
        Self::Poisoned { resource }
    }

    /// Check whether this is a lookup failure (unknown qualifier or missing binding)
    pub fn is_lookup_error(&self) -> bool {
        matches!(self, Self::UnknownQualifier { .. } | Self::NotBound { .. })
    }

    /// Check whether this is a registration-time contract violation
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::ContractViolation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    trait Greeter {}
    struct Robot;

    #[test]
    fn test_contract_violation_names_both_types() {
        let err = InjectError::contract_violation::<dyn Greeter, Robot>();

        assert!(err.is_contract_violation());
        assert!(!err.is_lookup_error());
        let message = err.to_string();
        assert!(message.contains("Robot"));
        assert!(message.contains("Greeter"));
    }

    #[test]
    fn test_lookup_errors() {
        assert!(InjectError::unknown_qualifier("missing").is_lookup_error());
        assert!(InjectError::not_bound::<dyn Greeter>(None).is_lookup_error());
        assert!(!InjectError::missing_argument("greeter").is_lookup_error());
    }

    #[test]
    fn test_construction_message() {
        let err = InjectError::construction::<Robot>("battery empty");

        assert_eq!(
            err,
            InjectError::Construction {
                target: std::any::type_name::<Robot>(),
                message: "battery empty".to_string(),
            }
        );
        assert!(err.to_string().ends_with("battery empty"));
    }

    #[test]
    fn test_unknown_qualifier_display() {
        assert_eq!(
            InjectError::unknown_qualifier("missing").to_string(),
            "Unknown qualifier 'missing'"
        );
    }
}
