/// Unwrapping engine tests: normalize over every transparent kind, children
/// of containers, and kind guards.
use view_probe::engine::{is_tuple_view, normalize_with, unwrap_value, TransparentKind};
use view_probe::views::{Padding, Text, ViewExt};
use view_probe::wrappers::{
    AnchorWritingModifier, ConditionalContent, DelayedPreferenceView, EnvironmentReader,
    EquatableView, IdView, NavigationBarItemsKey, SubscriptionView, Tree, TupleView,
};
use view_probe::{
    children_of, guard_kind, normalize, Content, Field, InspectOptions, InspectionError, Reflect,
    Value,
};

// ============================================================================
// Fixtures
// ============================================================================

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("view_probe=trace")
        .with_test_writer()
        .try_init();
}

fn node<V: Reflect>(view: V) -> Content {
    Content::new(Value::new(view))
}

fn text_of(content: &Content) -> String {
    content
        .payload
        .downcast_ref::<Text>()
        .expect("payload should be Text")
        .as_str()
        .to_string()
}

#[derive(Clone)]
struct Stack;

impl Reflect for Stack {}

#[derive(Clone)]
struct Ticker;

impl Reflect for Ticker {}

/// Marker key for preference tests.
struct SizeKey;

/// A wrapper that claims to be an identity wrapper and wraps itself.
mod looping {
    use view_probe::{Field, Reflect, Value};

    #[derive(Clone)]
    pub struct IdView;

    impl Reflect for IdView {
        fn fields(&self) -> Vec<Field> {
            vec![Field::named("content", Value::new(IdView))]
        }
    }
}

// ============================================================================
// 1. normalize: each transparent kind
// ============================================================================

#[test]
fn non_transparent_payload_is_returned_unchanged() {
    let content = node(Text::new("plain"));
    let normalized = normalize(&content).unwrap();
    assert_eq!(normalized, content);
}

#[test]
fn modified_content_appends_wrapper_to_modifiers() {
    let content = node(Text::new("hi").padding(8.0));
    let wrapper = content.payload.clone();
    let normalized = normalize(&content).unwrap();

    assert_eq!(text_of(&normalized), "hi");
    assert_eq!(normalized.modifiers.len(), 1);
    assert!(normalized.modifiers[0].ptr_eq(&wrapper));
}

#[test]
fn stacked_modifiers_are_recorded_outermost_first() {
    let content = node(
        Text::new("hi")
            .padding(1.0)
            .modifier(Padding { length: 2.0 }),
    );
    let normalized = normalize(&content).unwrap();
    assert_eq!(normalized.modifiers.len(), 2);

    let outer = view_probe::inspector::attribute_path_as::<f64>(
        "modifier|length",
        &normalized.modifiers[0],
    )
    .unwrap();
    assert_eq!(*outer, 2.0);
}

#[test]
fn identity_equatable_subscription_tree_are_stripped() {
    let content = node(Tree::new(
        Stack,
        IdView::new(
            EquatableView::new(SubscriptionView::new(Ticker, Text::new("deep"))),
            7u32,
        ),
    ));
    let normalized = normalize(&content).unwrap();
    assert_eq!(text_of(&normalized), "deep");
    assert!(normalized.modifiers.is_empty());
}

#[test]
fn conditional_content_picks_live_branch() {
    let yes = node(ConditionalContent::<Text, Padding>::true_content(Text::new("yes")));
    assert_eq!(text_of(&normalize(&yes).unwrap()), "yes");

    let no = node(ConditionalContent::<Padding, Text>::false_content(Text::new("no")));
    assert_eq!(text_of(&normalize(&no).unwrap()), "no");
}

#[test]
fn environment_and_preference_readers_are_stripped() {
    let content = node(EnvironmentReader::<Stack, _>::new(
        DelayedPreferenceView::<SizeKey, _>::new(Text::new("env")),
    ));
    assert_eq!(text_of(&normalize(&content).unwrap()), "env");
}

#[test]
fn present_optional_is_stripped_to_inner_node() {
    let content = node(Some(Text::new("here")));
    assert_eq!(text_of(&normalize(&content).unwrap()), "here");
}

#[test]
fn absent_optional_fails_with_missing_some() {
    let content = node(None::<Text>);
    let err = normalize(&content).unwrap_err();
    assert_eq!(
        err,
        InspectionError::AttributeNotFound {
            label: "some".to_string(),
            type_name: "Option<Text>".to_string(),
        }
    );
}

#[test]
fn unwrapping_preserves_incoming_modifiers() {
    let history = Value::new(Padding { length: 3.0 });
    let normalized = unwrap_value(
        Value::new(EquatableView::new(Text::new("kept"))),
        vec![history.clone()],
    )
    .unwrap();
    assert_eq!(normalized.modifiers.len(), 1);
    assert!(normalized.modifiers[0].ptr_eq(&history));
}

#[test]
fn normalize_is_idempotent() {
    let content = node(IdView::new(Text::new("x").padding(1.0), "id"));
    let once = normalize(&content).unwrap();
    let twice = normalize(&once).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn self_wrapping_chain_hits_depth_bound() {
    init_logging();
    let options = InspectOptions::default().with_max_unwrap_depth(16);
    let err = normalize_with(&node(looping::IdView), &options).unwrap_err();
    match err {
        InspectionError::NotSupported(message) => {
            assert!(message.contains("16"), "message should name the bound: {}", message);
            assert!(message.contains("IdView"));
        }
        other => panic!("expected NotSupported, got {:?}", other),
    }
}

#[test]
fn depth_bound_allows_exactly_max_wrappers() {
    let options = InspectOptions::default().with_max_unwrap_depth(2);
    let two = node(EquatableView::new(EquatableView::new(Text::new("ok"))));
    assert!(normalize_with(&two, &options).is_ok());

    let three = node(EquatableView::new(EquatableView::new(EquatableView::new(
        Text::new("too deep"),
    ))));
    assert!(normalize_with(&three, &options).is_err());
}

#[test]
fn transparent_kind_recognises_prefixes() {
    assert_eq!(TransparentKind::from_prefix("Option"), Some(TransparentKind::Optional));
    assert_eq!(
        TransparentKind::from_prefix("ModifiedContent"),
        Some(TransparentKind::ModifiedContent)
    );
    assert_eq!(TransparentKind::from_prefix("TupleView"), None);
    assert_eq!(TransparentKind::from_prefix("Text"), None);
}

// ============================================================================
// 2. children_of
// ============================================================================

#[test]
fn solitary_child_group_has_count_one() {
    let content = node(Text::new("only").padding(2.0));
    let group = children_of(&content, false).unwrap();
    assert_eq!(group.count(), 1);

    let child = group.element(0).unwrap();
    assert_eq!(text_of(&child), "only");
    assert_eq!(child.modifiers.len(), 1);
}

#[test]
fn solitary_child_can_reset_modifiers() {
    let content = node(Text::new("only").padding(2.0));
    let child = children_of(&content, true).unwrap().element(0).unwrap();
    assert_eq!(text_of(&child), "only");
    assert!(child.modifiers.is_empty());
}

#[test]
fn tuple_group_yields_elements_in_declaration_order() {
    let content = node(TupleView::new((
        Text::new("first"),
        Some(Text::new("second")),
        Text::new("third").padding(1.0),
    )));
    assert!(is_tuple_view(&content.payload));

    let group = children_of(&content, false).unwrap();
    assert_eq!(group.count(), 3);
    let texts: Vec<String> = group
        .iter()
        .map(|child| text_of(&child.unwrap()))
        .collect();
    assert_eq!(texts, vec!["first", "second", "third"]);
}

#[test]
fn tuple_elements_start_with_fresh_modifiers() {
    let content = node(TupleView::new((Text::new("a"), Text::new("b").padding(1.0))).padding(5.0));
    let group = children_of(&content, false).unwrap();
    assert!(group.element(0).unwrap().modifiers.is_empty());
    assert_eq!(group.element(1).unwrap().modifiers.len(), 1);
}

#[test]
fn tuple_generator_is_repeatable() {
    let content = node(TupleView::new((Text::new("a"), Text::new("b"))));
    let group = children_of(&content, false).unwrap();
    assert_eq!(text_of(&group.element(1).unwrap()), text_of(&group.element(1).unwrap()));
}

#[test]
fn failing_tuple_element_surfaces_when_requested() {
    let content = node(TupleView::new((Text::new("a"), None::<Text>)));
    let group = children_of(&content, false).unwrap();
    assert_eq!(group.count(), 2);
    assert!(group.element(0).is_ok());
    assert!(matches!(
        group.element(1),
        Err(InspectionError::AttributeNotFound { .. })
    ));
}

// ============================================================================
// 3. guard_kind
// ============================================================================

#[test]
fn guard_accepts_matching_prefix() {
    let value = Value::new(Text::new("ok"));
    assert!(guard_kind(&value, "Text", "text()").is_ok());
    assert!(guard_kind(&value, "", "any_view()").is_ok());
}

#[test]
fn guard_rejects_other_kind_with_type_mismatch() {
    let value = Value::new(Text::new("ok").padding(1.0));
    let err = guard_kind(&value, "Text", "text()").unwrap_err();
    assert_eq!(
        err,
        InspectionError::TypeMismatch {
            factual: "ModifiedContent<Text, Padding>".to_string(),
            expected: "Text".to_string(),
        }
    );
}

#[test]
fn guard_explains_navigation_bar_items_reader() {
    let value = Value::new(EnvironmentReader::<NavigationBarItemsKey, _>::new(Text::new("t")));
    let err = guard_kind(&value, "Text", "text()").unwrap_err();
    match err {
        InspectionError::NotSupported(message) => {
            assert!(message.contains(".navigation_bar_items()"));
            assert!(message.contains("text()"));
        }
        other => panic!("expected NotSupported, got {:?}", other),
    }
}

#[test]
fn guard_explains_popover_anchor_reader() {
    let value = Value::new(EnvironmentReader::<AnchorWritingModifier, _>::new(Text::new("t")));
    let err = guard_kind(&value, "Picker", "picker_at(2)").unwrap_err();
    match err {
        InspectionError::NotSupported(message) => {
            assert!(message.contains(".popover()"));
            assert!(message.contains("picker_at(2)"));
        }
        other => panic!("expected NotSupported, got {:?}", other),
    }
}

#[test]
fn guard_with_empty_prefix_skips_reader_carve_outs() {
    let value = Value::new(EnvironmentReader::<NavigationBarItemsKey, _>::new(Text::new("t")));
    assert!(guard_kind(&value, "", "any_view()").is_ok());
}

#[test]
fn plain_environment_reader_gets_type_mismatch() {
    let value = Value::new(EnvironmentReader::<Stack, _>::new(Text::new("t")));
    let err = guard_kind(&value, "Text", "text()").unwrap_err();
    assert!(matches!(err, InspectionError::TypeMismatch { .. }));
}

#[test]
fn field_helper_builds_labelled_and_unlabelled() {
    let named = Field::named("a", Value::new(1u8));
    let unnamed = Field::unnamed(Value::new(2u8));
    assert_eq!(named.label.as_deref(), Some("a"));
    assert!(unnamed.label.is_none());
}
