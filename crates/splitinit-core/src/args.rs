//! Call arguments and argument binding.

use std::collections::BTreeMap;

use crate::component::Signature;
use crate::error::ConstructError;
use crate::value::Value;

/// A flat set of positional and named construction arguments.
///
/// Also used as the leftover bucket of a routing call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    /// Positional values, in call order.
    pub positional: Vec<Value>,
    /// Named values.
    pub named: BTreeMap<String, Value>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a positional value.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Adds a named value, replacing any previous value for `name`.
    pub fn named(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named.insert(name.into(), value.into());
        self
    }

    /// Creates call arguments holding only named values.
    pub fn from_named(named: BTreeMap<String, Value>) -> Self {
        CallArgs {
            positional: Vec::new(),
            named,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }

    /// Appends `other`: positional values are concatenated, named values
    /// from `other` overwrite equal keys.
    pub fn extend(&mut self, other: &CallArgs) {
        self.positional.extend(other.positional.iter().cloned());
        for (k, v) in &other.named {
            self.named.insert(k.clone(), v.clone());
        }
    }
}

/// Arguments bound against a signature, as handed to a constructor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundArgs {
    values: BTreeMap<String, Value>,
    extra_named: BTreeMap<String, Value>,
}

impl BoundArgs {
    /// Value bound to a declared parameter (given or defaulted).
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Declared parameter values.
    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    /// Named values that matched no declared parameter.
    pub fn extra_named(&self) -> &BTreeMap<String, Value> {
        &self.extra_named
    }

    /// Takes the extra named values, typically to forward them.
    pub fn take_extra_named(&mut self) -> BTreeMap<String, Value> {
        std::mem::take(&mut self.extra_named)
    }
}

/// An instance that keeps the arguments no component claimed.
///
/// The router hands the leftover bucket to such an instance after every
/// component constructor has run.
pub trait HasLeftovers {
    fn set_leftovers(&mut self, leftovers: CallArgs);
}

/// Binds `args` against `signature` the way a constructor call does.
///
/// Positional values fill positional-eligible parameters in order, named
/// values fill keyword-eligible parameters, unmatched named values go to the
/// extra bag when the signature accepts it, and defaults fill the rest.
pub fn bind(component: &str, signature: &Signature, args: CallArgs) -> Result<BoundArgs, ConstructError> {
    let mut bound = BoundArgs::default();

    let slots: Vec<_> = signature.positional_params().collect();
    if args.positional.len() > slots.len() {
        return Err(ConstructError::TooManyPositional {
            component: component.to_string(),
            expected: slots.len(),
            given: args.positional.len(),
        });
    }
    for (param, value) in slots.iter().zip(args.positional) {
        bound.values.insert(param.name.to_string(), value);
    }

    for (name, value) in args.named {
        match signature.find(&name) {
            Some(param) if param.accepts_named() => {
                if bound.values.contains_key(&name) {
                    return Err(ConstructError::DuplicateArgument {
                        component: component.to_string(),
                        parameter: name,
                    });
                }
                bound.values.insert(name, value);
            }
            _ if signature.accepts_extra_named => {
                bound.extra_named.insert(name, value);
            }
            _ => {
                return Err(ConstructError::UnexpectedArgument {
                    component: component.to_string(),
                    name,
                });
            }
        }
    }

    for param in &signature.parameters {
        if bound.values.contains_key(param.name.as_ref()) {
            continue;
        }
        match &param.default {
            Some(default) => {
                bound.values.insert(param.name.to_string(), default.clone());
            }
            None => {
                return Err(ConstructError::MissingRequiredParameter {
                    component: component.to_string(),
                    parameter: param.name.to_string(),
                });
            }
        }
    }

    Ok(bound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ParameterDescriptor;

    fn sig_a() -> Signature {
        Signature::new()
            .with_param(ParameterDescriptor::new("a1"))
            .with_param(ParameterDescriptor::new("a2").with_default(0))
            .with_extra_named()
    }

    #[test]
    fn test_bind_positional_then_default() {
        let bound = bind("A", &sig_a(), CallArgs::new().arg("x")).unwrap();
        assert_eq!(bound.get("a1"), Some(&Value::from("x")));
        assert_eq!(bound.get("a2"), Some(&Value::from(0)));
        assert!(bound.extra_named().is_empty());
    }

    #[test]
    fn test_bind_extra_named() {
        let bound = bind("A", &sig_a(), CallArgs::new().named("a1", 1).named("zz", 2)).unwrap();
        assert_eq!(bound.get("a1"), Some(&Value::from(1)));
        assert_eq!(bound.extra_named().get("zz"), Some(&Value::from(2)));
    }

    #[test]
    fn test_bind_missing_required() {
        let err = bind("A", &sig_a(), CallArgs::new()).unwrap_err();
        assert_eq!(
            err,
            ConstructError::MissingRequiredParameter {
                component: "A".into(),
                parameter: "a1".into()
            }
        );
    }

    #[test]
    fn test_bind_unexpected_named() {
        let sig = Signature::new().with_param(ParameterDescriptor::new("b1"));
        let err = bind("B", &sig, CallArgs::new().named("b1", 1).named("x", 2)).unwrap_err();
        assert!(matches!(err, ConstructError::UnexpectedArgument { ref name, .. } if name == "x"));
        assert!(err.is_binding_error());
    }

    #[test]
    fn test_bind_too_many_positional() {
        let sig = Signature::new().with_param(ParameterDescriptor::new("b1"));
        let err = bind("B", &sig, CallArgs::new().arg(1).arg(2)).unwrap_err();
        assert!(matches!(
            err,
            ConstructError::TooManyPositional {
                expected: 1,
                given: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_bind_duplicate_argument() {
        let sig = Signature::new().with_param(ParameterDescriptor::new("b1"));
        let err = bind("B", &sig, CallArgs::new().arg(1).named("b1", 2)).unwrap_err();
        assert!(matches!(err, ConstructError::DuplicateArgument { .. }));
    }

    #[test]
    fn test_positional_only_rejects_name() {
        let sig = Signature::new().with_param(ParameterDescriptor::positional_only("p"));
        let err = bind("P", &sig, CallArgs::new().named("p", 1)).unwrap_err();
        assert!(matches!(err, ConstructError::UnexpectedArgument { .. }));
    }
}
