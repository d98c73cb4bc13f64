//! Tests for pointmap-model types.

use std::sync::Arc;

use pointmap_model::{
    ClassDescriptor, ClassIntrospector, ClassName, ClassRegistry, Instance, MethodDescriptor,
    ModelError, ParameterDescriptor, PropertyDescriptor, Record, Visibility,
};
use proptest::prelude::*;
use serde_json::json;

const SCHEMA: &str = r#"[
  {
    "name": "shop::Customer",
    "properties": [
      { "name": "id" },
      { "name": "email", "visibility": "private" }
    ],
    "methods": [
      { "name": "__construct", "parameters": [{ "name": "id" }, { "name": "email", "optional": true }] },
      { "name": "getEmail" },
      { "name": "setEmail", "parameters": [{ "name": "email" }] }
    ]
  }
]"#;

#[test]
fn schema_drives_records() {
    let registry = ClassRegistry::from_json_str(SCHEMA).expect("parse schema");
    let name = ClassName::new("shop::Customer").unwrap();
    let class = registry.require(&name).expect("registered class");

    assert_eq!(class.property("email").unwrap().visibility, Visibility::Private);
    assert_eq!(class.constructor().unwrap().required_parameters(), 1);

    let mut customer = Record::construct(Arc::clone(&class), vec![json!(42)]).unwrap();
    assert_eq!(customer.class_name(), &name);
    assert_eq!(customer.read("getEmail").unwrap(), json!(null));

    customer
        .invoke("setEmail", vec![json!("a@example.com")])
        .unwrap();
    assert_eq!(
        customer.to_json(),
        json!({"id": 42, "email": "a@example.com"})
    );
}

#[test]
fn registry_is_shareable_across_threads() {
    let registry: Arc<dyn ClassIntrospector> =
        Arc::new(ClassRegistry::from_json_str(SCHEMA).unwrap());
    let name = ClassName::new("shop::Customer").unwrap();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let name = name.clone();
            std::thread::spawn(move || registry.describe(&name).is_some())
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[test]
fn invalid_member_names_are_rejected() {
    let class = ClassDescriptor::new(ClassName::new("Bad").unwrap())
        .with_property(PropertyDescriptor::public("$x"));
    assert!(matches!(
        ClassRegistry::from_descriptors([class]),
        Err(ModelError::InvalidMemberName(name)) if name == "$x"
    ));

    let class = ClassDescriptor::new(ClassName::new("Bad").unwrap()).with_method(
        MethodDescriptor::public("setX")
            .with_parameter(ParameterDescriptor::required("x"))
            .with_parameter(ParameterDescriptor::required("x")),
    );
    assert!(matches!(
        ClassRegistry::from_descriptors([class]),
        Err(ModelError::DuplicateMember { .. })
    ));
}

fn identifier() -> impl Strategy<Value = String> {
    "[A-Za-z_][A-Za-z0-9_]{0,12}"
}

proptest! {
    #[test]
    fn class_names_round_trip(segments in prop::collection::vec(identifier(), 1..4)) {
        let raw = segments.join("::");
        let name = ClassName::new(raw.clone()).unwrap();
        prop_assert_eq!(name.as_str(), raw.as_str());
        prop_assert_eq!(name.short_name(), segments.last().unwrap().as_str());
        let json = serde_json::to_string(&name).unwrap();
        let back: ClassName = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, name);
    }

    #[test]
    fn dotted_class_names_are_rejected(a in identifier(), b in identifier()) {
        let dotted = format!("{a}.{b}");
        prop_assert!(ClassName::new(dotted).is_err());
    }
}
