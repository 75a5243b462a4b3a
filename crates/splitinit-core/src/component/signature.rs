//! Parameter and signature descriptors.

use std::sync::Arc;

use crate::value::{Value, ValueKind};

/// How a parameter may receive its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    /// Only by position.
    PositionalOnly,
    /// By position or by name.
    PositionalOrKeyword,
    /// Only by name.
    KeywordOnly,
}

impl ParameterKind {
    pub fn accepts_positional(self) -> bool {
        matches!(
            self,
            ParameterKind::PositionalOnly | ParameterKind::PositionalOrKeyword
        )
    }

    pub fn accepts_named(self) -> bool {
        matches!(
            self,
            ParameterKind::PositionalOrKeyword | ParameterKind::KeywordOnly
        )
    }
}

/// Describes one constructor parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDescriptor {
    /// Name of the parameter.
    pub name: Arc<str>,
    /// Positional / keyword eligibility.
    pub kind: ParameterKind,
    /// Value used when the caller omits the parameter.
    pub default: Option<Value>,
    /// Declared type annotation, if any.
    pub type_hint: Option<ValueKind>,
}

impl ParameterDescriptor {
    /// Creates a positional-or-keyword parameter.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self::with_kind(name, ParameterKind::PositionalOrKeyword)
    }

    /// Creates a positional-only parameter.
    pub fn positional_only(name: impl Into<Arc<str>>) -> Self {
        Self::with_kind(name, ParameterKind::PositionalOnly)
    }

    /// Creates a keyword-only parameter.
    pub fn keyword_only(name: impl Into<Arc<str>>) -> Self {
        Self::with_kind(name, ParameterKind::KeywordOnly)
    }

    fn with_kind(name: impl Into<Arc<str>>, kind: ParameterKind) -> Self {
        ParameterDescriptor {
            name: name.into(),
            kind,
            default: None,
            type_hint: None,
        }
    }

    /// Sets the default value.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Sets the type hint.
    pub fn with_type_hint(mut self, hint: ValueKind) -> Self {
        self.type_hint = Some(hint);
        self
    }

    pub fn accepts_positional(&self) -> bool {
        self.kind.accepts_positional()
    }

    pub fn accepts_named(&self) -> bool {
        self.kind.accepts_named()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Returns true if the parameter has no default.
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// The declared constructor signature of a component.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signature {
    /// Parameters in declaration order.
    pub parameters: Vec<ParameterDescriptor>,
    /// Whether arbitrary extra named arguments are accepted.
    pub accepts_extra_named: bool,
}

impl Signature {
    /// Creates an empty signature that accepts nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// The signature reported for components that cannot be inspected.
    pub fn opaque() -> Self {
        Self::default()
    }

    /// Adds a parameter.
    pub fn with_param(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Marks the signature as accepting extra named arguments.
    pub fn with_extra_named(mut self) -> Self {
        self.accepts_extra_named = true;
        self
    }

    /// Finds a parameter by name.
    pub fn find(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.parameters.iter().find(|p| p.name.as_ref() == name)
    }

    /// Parameters that can be filled positionally, in declared order.
    pub fn positional_params(&self) -> impl Iterator<Item = &ParameterDescriptor> {
        self.parameters.iter().filter(|p| p.accepts_positional())
    }

    /// Parameters that can be filled by name.
    pub fn keyword_params(&self) -> impl Iterator<Item = &ParameterDescriptor> {
        self.parameters.iter().filter(|p| p.accepts_named())
    }

    /// Parameters without a default.
    pub fn required_params(&self) -> impl Iterator<Item = &ParameterDescriptor> {
        self.parameters.iter().filter(|p| p.is_required())
    }

    /// Returns true if `name` is a keyword-eligible parameter.
    pub fn accepts_keyword(&self, name: &str) -> bool {
        self.find(name).is_some_and(|p| p.accepts_named())
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty() && !self.accepts_extra_named
    }
}
