//! Error types for SplitInit

use thiserror::Error;

/// Errors raised while registering components.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A component with this name is already registered.
    #[error("component `{0}` is already registered")]
    DuplicateComponent(String),

    /// A declared parent has not been registered (yet).
    #[error("component `{component}` declares unknown parent #{parent}")]
    UnknownParent { component: String, parent: usize },

    /// No component is registered under this id or name.
    #[error("unknown component `{0}`")]
    UnknownComponent(String),

    /// A parameter name appears twice in one signature.
    #[error("component `{component}` declares parameter `{parameter}` twice")]
    DuplicateParameter { component: String, parameter: String },

    /// The declared parents admit no consistent linearization.
    #[error("component `{0}` has an inconsistent parent order (no linearization exists)")]
    InconsistentHierarchy(String),
}

/// Errors raised while invoking component constructors.
///
/// These are the only fatal errors of a construction call; routing itself
/// never fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstructError {
    /// A required parameter received no value.
    #[error("`{component}` is missing required parameter `{parameter}`")]
    MissingRequiredParameter { component: String, parameter: String },

    /// A named argument matched no parameter and extras are not accepted.
    #[error("`{component}` got an unexpected named argument `{name}`")]
    UnexpectedArgument { component: String, name: String },

    /// More positional values than positional-eligible parameters.
    #[error("`{component}` takes {expected} positional arguments but {given} were given")]
    TooManyPositional {
        component: String,
        expected: usize,
        given: usize,
    },

    /// A parameter was given both positionally and by name.
    #[error("`{component}` got multiple values for parameter `{parameter}`")]
    DuplicateArgument { component: String, parameter: String },

    /// The instance handed to a typed constructor has the wrong type.
    #[error("`{component}` expects an instance of `{expected}`")]
    InstanceType {
        component: String,
        expected: &'static str,
    },

    /// The constructor itself reported a failure.
    #[error("`{component}` failed: {message}")]
    Failed { component: String, message: String },
}

impl ConstructError {
    /// Creates a constructor-reported failure.
    pub fn failed(component: impl Into<String>, message: impl Into<String>) -> Self {
        ConstructError::Failed {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Returns true for errors raised by argument binding (as opposed to a
    /// constructor's own failure).
    pub fn is_binding_error(&self) -> bool {
        matches!(
            self,
            ConstructError::MissingRequiredParameter { .. }
                | ConstructError::UnexpectedArgument { .. }
                | ConstructError::TooManyPositional { .. }
                | ConstructError::DuplicateArgument { .. }
        )
    }

    /// Name of the component the error is about.
    pub fn component(&self) -> &str {
        match self {
            ConstructError::MissingRequiredParameter { component, .. }
            | ConstructError::UnexpectedArgument { component, .. }
            | ConstructError::TooManyPositional { component, .. }
            | ConstructError::DuplicateArgument { component, .. }
            | ConstructError::InstanceType { component, .. }
            | ConstructError::Failed { component, .. } => component,
        }
    }
}

/// Main error type for SplitInit operations
#[derive(Debug, Error)]
pub enum SplitInitError {
    /// Error in the component registry
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Error while invoking constructors
    #[error("Construction error: {0}")]
    Construct(#[from] ConstructError),

    /// Error in router configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for SplitInit operations
pub type Result<T> = std::result::Result<T, SplitInitError>;
