//! End-to-end scenarios: define, instantiate, mutate, observe.

use std::cell::Cell;
use std::rc::Rc;

use lodestone_dom::{Event, NodeRef};

use crate::bindable::{model, Bindable, FieldInfo, ModelRef};
use crate::element::CustomElementRegistry;
use crate::error::BindingError;
use crate::path::AttrPath;
use crate::value::{FieldKind, Value};

struct Profile {
    name: String,
    age: i64,
    active: bool,
    writes: Rc<Cell<usize>>,
}

impl Profile {
    fn new(writes: Rc<Cell<usize>>) -> Self {
        Profile {
            name: "Ada".to_string(),
            age: 30,
            active: false,
            writes,
        }
    }
}

impl Bindable for Profile {
    fn fields(&self) -> &'static [FieldInfo] {
        const FIELDS: [FieldInfo; 3] = [
            FieldInfo::exported("Name", FieldKind::Str),
            FieldInfo::exported("Age", FieldKind::Int),
            FieldInfo::exported("Active", FieldKind::Bool),
        ];
        &FIELDS
    }

    fn get(&self, field: &str) -> Option<Value> {
        match field {
            "Name" => Some(Value::Str(self.name.clone())),
            "Age" => Some(Value::Int(self.age)),
            "Active" => Some(Value::Bool(self.active)),
            _ => None,
        }
    }

    fn set(&mut self, field: &str, value: Value) -> bool {
        let stored = match (field, value) {
            ("Name", Value::Str(s)) => {
                self.name = s;
                true
            }
            ("Age", Value::Int(n)) => {
                self.age = n;
                true
            }
            ("Active", Value::Bool(b)) => {
                self.active = b;
                true
            }
            _ => false,
        };
        if stored {
            self.writes.set(self.writes.get() + 1);
        }
        stored
    }
}

struct Inner {
    text: String,
}

impl Bindable for Inner {
    fn fields(&self) -> &'static [FieldInfo] {
        const FIELDS: [FieldInfo; 1] = [FieldInfo::exported("Text", FieldKind::Str)];
        &FIELDS
    }

    fn get(&self, field: &str) -> Option<Value> {
        match field {
            "Text" => Some(Value::Str(self.text.clone())),
            _ => None,
        }
    }

    fn set(&mut self, field: &str, value: Value) -> bool {
        match (field, value) {
            ("Text", Value::Str(s)) => {
                self.text = s;
                true
            }
            _ => false,
        }
    }
}

struct Outer {
    data: Option<ModelRef>,
}

impl Bindable for Outer {
    fn fields(&self) -> &'static [FieldInfo] {
        const FIELDS: [FieldInfo; 1] = [FieldInfo::exported("Data", FieldKind::Object)];
        &FIELDS
    }

    fn get(&self, field: &str) -> Option<Value> {
        match field {
            "Data" => Some(match &self.data {
                Some(obj) => Value::Object(obj.clone()),
                None => Value::Null,
            }),
            _ => None,
        }
    }

    fn set(&mut self, field: &str, value: Value) -> bool {
        match (field, value) {
            ("Data", Value::Object(obj)) => {
                self.data = Some(obj);
                true
            }
            ("Data", Value::Null) => {
                self.data = None;
                true
            }
            _ => false,
        }
    }
}

fn init_logs() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn profile_registry(template: &str) -> (CustomElementRegistry, Rc<Cell<usize>>) {
    init_logs();
    let registry = CustomElementRegistry::new();
    let writes = Rc::new(Cell::new(0));
    let factory_writes = writes.clone();
    registry
        .define("profile-card", template, move || {
            model(Profile::new(factory_writes.clone()))
        })
        .unwrap();
    (registry, writes)
}

fn text_of(node: &NodeRef) -> String {
    node.child_nodes()[0].text_data().unwrap_or_default()
}

#[test]
fn span_text_tracks_field_writes() {
    let (registry, _) = profile_registry("<span id='out'>Hello [[Name]]!</span>");
    let component = registry.instantiate("profile-card").unwrap();
    let span = component.child_by_id("out").unwrap();
    assert_eq!(text_of(&span), "Hello Ada!");

    component.set_field("Name", Value::Str("Grace".to_string()));
    assert_eq!(text_of(&span), "Hello Grace!");
}

#[test]
fn input_attribute_coerces_to_int() {
    let (registry, _) = profile_registry("<input id='age' value='{{Age}}'>");
    let component = registry.instantiate("profile-card").unwrap();
    let input = component.child_by_id("age").unwrap();
    assert_eq!(input.attribute("value").as_deref(), Some("30"));

    input.set_attribute("value", "42");
    assert_eq!(component.get_field("Age"), Some(Value::Int(42)));

    // Unparseable input is abandoned; the model keeps its last value.
    input.set_attribute("value", "forty");
    assert_eq!(component.get_field("Age"), Some(Value::Int(42)));
}

#[test]
fn wholesale_subobject_replacement_rerenders_deep_bindings() {
    let registry = CustomElementRegistry::new();
    registry
        .define("outer-view", "<span id='out'>[[Data.Text]]</span>", || {
            model(Outer {
                data: Some(model(Inner {
                    text: "one".to_string(),
                })),
            })
        })
        .unwrap();
    let component = registry.instantiate("outer-view").unwrap();
    let span = component.child_by_id("out").unwrap();
    assert_eq!(text_of(&span), "one");
    // The deep binding installed an observation point on its prefix.
    assert!(component
        .registry()
        .borrow()
        .is_observed(&AttrPath::single("Data")));

    component.set_field(
        "Data",
        Value::Object(model(Inner {
            text: "two".to_string(),
        })),
    );
    assert_eq!(text_of(&span), "two");

    // The deep path still routes through the replacement object.
    let path = AttrPath::parse("Data.Text").unwrap();
    component.set(&path, Value::Str("three".to_string()));
    assert_eq!(text_of(&span), "three");
    assert_eq!(component.get(&path), Some(Value::Str("three".to_string())));
}

#[test]
fn duplicate_two_way_aborts_instantiation() {
    let (registry, _) =
        profile_registry("<input value='{{Name}}'><input value='{{Name}}'>");
    let err = registry.instantiate("profile-card");
    assert!(matches!(err, Err(BindingError::DuplicateTwoWay { .. })));
}

#[test]
fn checkbox_boolean_attribute_semantics() {
    let (registry, _) = profile_registry("<input id='cb' checked='{{Active}}'>");
    let component = registry.instantiate("profile-card").unwrap();
    let input = component.child_by_id("cb").unwrap();

    // Presence with an empty value means true.
    input.set_attribute("checked", "");
    assert_eq!(component.get_field("Active"), Some(Value::Bool(true)));

    // Removal reads back as "null", which means false.
    input.remove_attribute("checked");
    assert_eq!(component.get_field("Active"), Some(Value::Bool(false)));
}

#[test]
fn equal_value_write_is_a_no_op() {
    let (registry, writes) = profile_registry("<span>[[Name]]</span>");
    let component = registry.instantiate("profile-card").unwrap();
    let baseline = writes.get();

    component.set_field("Name", Value::Str("Grace".to_string()));
    assert_eq!(writes.get(), baseline + 1);

    component.set_field("Name", Value::Str("Grace".to_string()));
    assert_eq!(writes.get(), baseline + 1);
}

#[test]
fn unknown_field_write_is_ignored() {
    let (registry, writes) = profile_registry("<span>[[Name]]</span>");
    let component = registry.instantiate("profile-card").unwrap();
    let baseline = writes.get();

    component.set_field("Nickname", Value::Str("G".to_string()));
    assert_eq!(writes.get(), baseline);
}

#[test]
fn exported_field_reflects_onto_host_attribute() {
    let (registry, _) = profile_registry("<span>[[Name]]</span>");
    let component = registry.instantiate("profile-card").unwrap();

    component.set_field("Name", Value::Str("Grace".to_string()));
    assert_eq!(component.host().attribute("name").as_deref(), Some("Grace"));
}

#[test]
fn host_attribute_write_reaches_the_model() {
    let (registry, _) = profile_registry("<span id='out'>[[Name]]</span>");
    let component = registry.instantiate("profile-card").unwrap();

    component.host().set_attribute("name", "Hedy");
    assert_eq!(
        component.get_field("Name"),
        Some(Value::Str("Hedy".to_string()))
    );
    assert_eq!(text_of(&component.child_by_id("out").unwrap()), "Hedy");
}

#[test]
fn host_attribute_present_at_upgrade_seeds_the_model() {
    let registry = CustomElementRegistry::new();
    let writes = Rc::new(Cell::new(0));
    let factory_writes = writes.clone();
    registry
        .define("profile-card", "<span>[[Age]]</span>", move || {
            model(Profile::new(factory_writes.clone()))
        })
        .unwrap();

    let host = lodestone_dom::Node::element("profile-card");
    host.set_attribute("age", "77");
    let component = registry.upgrade(&host).unwrap();
    assert_eq!(component.get_field("Age"), Some(Value::Int(77)));
}

#[test]
fn field_observer_sees_old_and_new() {
    let (registry, _) = profile_registry("<span>[[Name]]</span>");
    let component = registry.instantiate("profile-card").unwrap();

    let seen: Rc<Cell<bool>> = Rc::new(Cell::new(false));
    let seen2 = seen.clone();
    component.observe_field("Name", move |_component, old, new| {
        assert_eq!(old, &Value::Str("Ada".to_string()));
        assert_eq!(new, &Value::Str("Grace".to_string()));
        seen2.set(true);
    });

    component.set_field("Name", Value::Str("Grace".to_string()));
    assert!(seen.get());
}

#[test]
fn field_observer_may_write_other_fields() {
    let (registry, _) = profile_registry("<span id='out'>[[Name]] is [[Age]]</span>");
    let component = registry.instantiate("profile-card").unwrap();

    component.observe_field("Name", |component, _old, _new| {
        component.set_field("Age", Value::Int(99));
    });
    component.set_field("Name", Value::Str("Grace".to_string()));

    assert_eq!(component.get_field("Age"), Some(Value::Int(99)));
    assert_eq!(
        text_of(&component.child_by_id("out").unwrap()),
        "Grace is 99"
    );
}

#[test]
fn event_attribute_dispatches_to_named_handler() {
    let (registry, _) = profile_registry(
        "<button id='go' on-click='HandleClick' on-mouseover='Missing'>go</button>",
    );
    let component = registry.instantiate("profile-card").unwrap();
    let clicks = Rc::new(Cell::new(0));
    let clicks2 = clicks.clone();
    component.register_handler("HandleClick", move |_component, _event| {
        clicks2.set(clicks2.get() + 1);
    });

    let button = component.child_by_id("go").unwrap();
    button.dispatch(&Event::new("click"));
    button.dispatch(&Event::new("click"));
    assert_eq!(clicks.get(), 2);

    // An unregistered handler name is a logged warning, not a panic.
    button.dispatch(&Event::new("mouseover"));
}

#[test]
fn input_events_push_the_live_property() {
    let (registry, _) = profile_registry("<input id='age' value='{{Age}}'>");
    let component = registry.instantiate("profile-card").unwrap();
    let input = component.child_by_id("age").unwrap();

    input.set_property("value", "55");
    input.dispatch(&Event::new("input"));
    assert_eq!(component.get_field("Age"), Some(Value::Int(55)));
}

#[test]
fn composite_field_pushes_into_custom_child() {
    let registry = CustomElementRegistry::new();
    registry
        .define("item-view", "<span id='txt'>[[Data.Text]]</span>", || {
            model(Outer { data: None })
        })
        .unwrap();
    registry
        .define("list-view", "<item-view id='item' data='{{Data}}'></item-view>", || {
            model(Outer {
                data: Some(model(Inner {
                    text: "first".to_string(),
                })),
            })
        })
        .unwrap();

    let component = registry.instantiate("list-view").unwrap();
    let item_host = component.child_by_id("item").unwrap();
    let item = component.child_component(&item_host).unwrap();

    // The child received the parent's subobject by reference.
    assert_eq!(
        item.get(&AttrPath::parse("Data.Text").unwrap()),
        Some(Value::Str("first".to_string()))
    );

    component.set_field(
        "Data",
        Value::Object(model(Inner {
            text: "second".to_string(),
        })),
    );
    assert_eq!(
        item.get(&AttrPath::parse("Data.Text").unwrap()),
        Some(Value::Str("second".to_string()))
    );
    assert_eq!(text_of(&item.child_by_id("txt").unwrap()), "second");
}

#[test]
fn composite_two_way_on_plain_element_is_fatal() {
    let registry = CustomElementRegistry::new();
    registry
        .define("list-view", "<div data='{{Data}}'></div>", || {
            model(Outer { data: None })
        })
        .unwrap();
    let err = registry.instantiate("list-view");
    assert!(matches!(err, Err(BindingError::CompositeBinding { .. })));
}

#[test]
fn disconnect_stops_observation() {
    let (registry, writes) = profile_registry("<input id='age' value='{{Age}}'>");
    let component = registry.instantiate("profile-card").unwrap();
    let input = component.child_by_id("age").unwrap();

    component.disconnect();
    let baseline = writes.get();
    input.set_attribute("value", "42");
    component.host().set_attribute("name", "Hedy");
    assert_eq!(writes.get(), baseline);
    assert!(!component.is_connected());
}
