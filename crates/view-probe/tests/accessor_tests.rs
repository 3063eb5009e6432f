/// Structural accessor tests: attribute lookup, path resolution, casts,
/// base-layer access and type tags.
use std::sync::Arc;

use view_probe::inspector::{
    attribute, attribute_as, attribute_path, attribute_path_as, cast, mirror, type_name,
};
use view_probe::views::{Padding, Text, ViewExt};
use view_probe::wrappers::{ConditionalContent, ModifiedContent, TupleView};
use view_probe::{Field, InspectionError, Mirror, Reflect, TypeTag, Value};

// ============================================================================
// Fixtures
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct Profile {
    name: String,
    age: u32,
    address: Address,
}

#[derive(Debug, Clone, PartialEq)]
struct Address {
    city: String,
    zip: Option<String>,
}

impl Reflect for Profile {
    fn fields(&self) -> Vec<Field> {
        vec![
            Field::named("name", Value::new(self.name.clone())),
            Field::named("age", Value::new(self.age)),
            Field::named("address", Value::new(self.address.clone())),
        ]
    }
}

impl Reflect for Address {
    fn fields(&self) -> Vec<Field> {
        vec![
            Field::named("city", Value::new(self.city.clone())),
            Field::named("zip", Value::new(self.zip.clone())),
        ]
    }
}

fn profile() -> Value {
    Value::new(Profile {
        name: "Alice".to_string(),
        age: 34,
        address: Address {
            city: "Lisbon".to_string(),
            zip: Some("1100".to_string()),
        },
    })
}

/// A layered value: `Button` on top of a `Control` base layer.
#[derive(Clone)]
struct Button {
    enabled: bool,
    title: String,
}

impl Reflect for Button {
    fn fields(&self) -> Vec<Field> {
        vec![Field::named("title", Value::new(self.title.clone()))]
    }

    fn superclass(&self) -> Option<Mirror> {
        Some(Mirror::new(
            TypeTag::from_type_name("app::Control"),
            vec![Field::named("enabled", Value::new(self.enabled))],
        ))
    }
}

// ============================================================================
// 1. Single-label lookup
// ============================================================================

#[test]
fn attribute_returns_the_labelled_field() {
    let name = attribute("name", &profile()).unwrap();
    assert_eq!(name.downcast_ref::<String>().unwrap(), "Alice");
}

#[test]
fn attribute_missing_label_names_label_and_type() {
    let err = attribute("email", &profile()).unwrap_err();
    assert_eq!(
        err,
        InspectionError::AttributeNotFound {
            label: "email".to_string(),
            type_name: "Profile".to_string(),
        }
    );
    assert_eq!(err.to_string(), "Profile does not have 'email' attribute");
}

#[test]
fn attribute_on_leaf_fails() {
    let err = attribute("anything", &Value::new(42i64)).unwrap_err();
    assert!(matches!(err, InspectionError::AttributeNotFound { .. }));
}

#[test]
fn attribute_as_casts_result() {
    let age: Arc<u32> = attribute_as("age", &profile()).unwrap();
    assert_eq!(*age, 34);
}

#[test]
fn attribute_as_wrong_type_is_type_mismatch() {
    let err = attribute_as::<String>("age", &profile()).unwrap_err();
    assert_eq!(
        err,
        InspectionError::TypeMismatch {
            factual: "u32".to_string(),
            expected: "String".to_string(),
        }
    );
    assert_eq!(err.to_string(), "Type mismatch: u32 is not String");
}

#[test]
fn wrapper_children_keep_identity_across_lookups() {
    let view = Value::new(Text::new("a").padding(1.0));
    let first = attribute("content", &view).unwrap();
    let second = attribute("content", &view).unwrap();
    assert!(first.ptr_eq(&second));
}

#[test]
fn tuple_group_value_keeps_identity_across_lookups() {
    let view = Value::new(TupleView::new((Text::new("a"), Text::new("b"))));
    let first = attribute("value", &view).unwrap();
    let second = attribute("value", &view).unwrap();
    assert!(first.ptr_eq(&second));

    let copy = Value::new((*view.downcast::<TupleView<(Text, Text)>>().unwrap()).clone());
    assert!(attribute("value", &copy).unwrap().ptr_eq(&first));
}

// ============================================================================
// 2. Path resolution
// ============================================================================

#[test]
fn path_resolves_left_to_right() {
    let city: Arc<String> = attribute_path_as("address|city", &profile()).unwrap();
    assert_eq!(city.as_str(), "Lisbon");
}

#[test]
fn path_equals_folded_single_lookups() {
    let value = profile();
    let folded = attribute("zip", &attribute("address", &value).unwrap()).unwrap();
    let folded = attribute("some", &folded).unwrap();
    let direct = attribute_path("address|zip|some", &value).unwrap();
    assert_eq!(direct.describe(), folded.describe());
    assert_eq!(direct.describe(), "1100");
}

#[test]
fn path_failure_reports_first_failing_segment() {
    let err = attribute_path("address|street|number", &profile()).unwrap_err();
    assert_eq!(
        err,
        InspectionError::AttributeNotFound {
            label: "street".to_string(),
            type_name: "Address".to_string(),
        }
    );
}

#[test]
fn single_label_path_matches_attribute() {
    let via_path = attribute_path("age", &profile()).unwrap();
    assert_eq!(via_path.describe(), "34");
}

#[test]
fn path_through_conditional_storage() {
    let view = Value::new(ConditionalContent::<Text, Padding>::true_content(Text::new("yes")));
    let text: Arc<Text> = attribute_path_as("storage|trueContent", &view).unwrap();
    assert_eq!(text.as_str(), "yes");

    let err = attribute_path("storage|falseContent", &view).unwrap_err();
    assert!(matches!(err, InspectionError::AttributeNotFound { ref label, .. } if label == "falseContent"));
}

// ============================================================================
// 3. Base layer ("super")
// ============================================================================

#[test]
fn super_resolves_to_base_layer_handle() {
    let button = Value::new(Button {
        enabled: true,
        title: "OK".to_string(),
    });
    let layer = attribute("super", &button).unwrap();
    let mirror = layer.downcast_ref::<Mirror>().expect("super returns a Mirror");
    assert_eq!(mirror.subject(), &TypeTag::from_type_name("Control"));

    let enabled: Arc<bool> = attribute_path_as("super|enabled", &button).unwrap();
    assert!(*enabled);
}

#[test]
fn super_without_base_layer_is_a_missing_attribute() {
    let err = attribute("super", &profile()).unwrap_err();
    assert!(matches!(err, InspectionError::AttributeNotFound { ref label, .. } if label == "super"));
}

#[test]
fn mirror_captures_layers() {
    let button = Value::new(Button {
        enabled: false,
        title: "Cancel".to_string(),
    });
    let layer = mirror(&button);
    assert_eq!(layer.subject(), &TypeTag::from_type_name("Button"));
    assert!(layer.superclass().is_some());
}

// ============================================================================
// 4. Casts and type tags
// ============================================================================

#[test]
fn cast_succeeds_for_matching_type() {
    let text: Arc<Text> = cast(&Value::new(Text::new("hi"))).unwrap();
    assert_eq!(text.as_str(), "hi");
}

#[test]
fn cast_mismatch_carries_both_tags() {
    let value = Value::new(Text::new("hi").padding(2.0));
    let err = cast::<Text>(&value).unwrap_err();
    assert_eq!(
        err,
        InspectionError::TypeMismatch {
            factual: "ModifiedContent<Text, Padding>".to_string(),
            expected: "Text".to_string(),
        }
    );
}

#[test]
fn type_name_prefix_truncates_generics() {
    let value = Value::new(ModifiedContent::new(Text::new("x"), Padding { length: 1.0 }));
    assert_eq!(type_name(&value, false), "ModifiedContent<Text, Padding>");
    assert_eq!(type_name(&value, true), "ModifiedContent");
}

#[test]
fn same_kind_produces_same_tag() {
    let a = Value::new(Text::new("a").padding(1.0));
    let b = Value::new(Text::new("b").padding(9.0));
    assert_eq!(a.type_tag(), b.type_tag());
}
