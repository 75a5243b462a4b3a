use super::*;
use crate::component::{ComponentDescriptor, ParameterDescriptor};

fn names(registry: &ComponentRegistry, ids: &[ComponentId]) -> Vec<String> {
    ids.iter().map(|id| registry.name(*id).to_string()).collect()
}

#[test]
fn test_root_is_preregistered() {
    let registry = ComponentRegistry::new();
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.lookup("root"), Some(ComponentId::ROOT));
    assert!(registry.descriptor(ComponentId::ROOT).is_opaque());
}

#[test]
fn test_parentless_component_descends_from_root() {
    let mut registry = ComponentRegistry::new();
    let a = registry.register(ComponentDescriptor::new("A")).unwrap();
    assert_eq!(registry.parents(a), &[ComponentId::ROOT]);
    assert_eq!(names(&registry, registry.linearization(a)), ["A", "root"]);
}

#[test]
fn test_diamond_linearization() {
    let mut registry = ComponentRegistry::new();
    let base = registry.register(ComponentDescriptor::new("Base")).unwrap();
    let left = registry
        .register(ComponentDescriptor::new("Left").with_parent(base))
        .unwrap();
    let right = registry
        .register(ComponentDescriptor::new("Right").with_parent(base))
        .unwrap();
    let top = registry
        .register(ComponentDescriptor::new("Top").with_parents([left, right]))
        .unwrap();

    assert_eq!(
        names(&registry, registry.linearization(top)),
        ["Top", "Left", "Right", "Base", "root"]
    );
}

#[test]
fn test_inconsistent_order_rejected() {
    let mut registry = ComponentRegistry::new();
    let x = registry.register(ComponentDescriptor::new("X")).unwrap();
    let y = registry.register(ComponentDescriptor::new("Y")).unwrap();
    let a = registry
        .register(ComponentDescriptor::new("A").with_parents([x, y]))
        .unwrap();
    let b = registry
        .register(ComponentDescriptor::new("B").with_parents([y, x]))
        .unwrap();

    let err = registry
        .register(ComponentDescriptor::new("Z").with_parents([a, b]))
        .unwrap_err();
    assert_eq!(err, RegistryError::InconsistentHierarchy("Z".into()));
}

#[test]
fn test_duplicate_parent_rejected() {
    let mut registry = ComponentRegistry::new();
    let a = registry.register(ComponentDescriptor::new("A")).unwrap();
    let err = registry
        .register(ComponentDescriptor::new("B").with_parents([a, a]))
        .unwrap_err();
    assert!(matches!(err, RegistryError::InconsistentHierarchy(_)));
}

#[test]
fn test_duplicate_name_rejected() {
    let mut registry = ComponentRegistry::new();
    registry.register(ComponentDescriptor::new("A")).unwrap();
    let err = registry.register(ComponentDescriptor::new("A")).unwrap_err();
    assert_eq!(err, RegistryError::DuplicateComponent("A".into()));
}

#[test]
fn test_unknown_parent_rejected() {
    let mut other = ComponentRegistry::new();
    other.register(ComponentDescriptor::new("P")).unwrap();
    let foreign = other.register(ComponentDescriptor::new("Q")).unwrap();

    let mut registry = ComponentRegistry::new();
    let err = registry
        .register(ComponentDescriptor::new("A").with_parent(foreign))
        .unwrap_err();
    assert!(matches!(err, RegistryError::UnknownParent { parent: 2, .. }));
}

#[test]
fn test_duplicate_parameter_rejected() {
    let mut registry = ComponentRegistry::new();
    let err = registry
        .register(
            ComponentDescriptor::new("A")
                .with_param(ParameterDescriptor::new("x"))
                .with_param(ParameterDescriptor::keyword_only("x")),
        )
        .unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateParameter { .. }));
}

#[test]
fn test_id_of_unknown() {
    let registry = ComponentRegistry::new();
    assert_eq!(
        registry.id_of("Nope"),
        Err(RegistryError::UnknownComponent("Nope".into()))
    );
}
