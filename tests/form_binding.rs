use formbind::api::FormApi;
use formbind::collection::Named;
use formbind::config::BindConfig;
use formbind::context::HostInput;
use formbind::error::FormError;
use formbind::events::{handler, EventContext, EventKind, Evented, Handler};
use formbind::host::memory::InMemoryForm;
use formbind::host::FormHost;
use formbind::model::{Attribute, AttributeType, AttributeValue, Control, ControlType, Section, Tab};
use formbind::report::RecordingReporter;
use formbind::specifier::Specifier;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

fn contact_form() -> InMemoryForm {
    InMemoryForm::new()
        .with_field("firstname", AttributeType::String, ControlType::Standard)
        .with_field("lastname", AttributeType::String, ControlType::Standard)
        .with_attribute(Attribute::read_only("fullname", AttributeType::String))
        .with_field("parentcustomerid", AttributeType::Lookup, ControlType::Lookup)
        .with_control(Control::new("line1", ControlType::Standard).in_section("address"))
        .with_control(Control::new("city", ControlType::Standard).in_section("address"))
        .with_control(Control::new("contacts", ControlType::Subgrid))
        .with_tab(
            Tab::new("general")
                .with_section(Section::new("name"))
                .with_section(Section::new("address")),
        )
}

fn recording_api(form: InMemoryForm) -> (FormApi<InMemoryForm>, Rc<RecordingReporter>) {
    let reporter = Rc::new(RecordingReporter::new());
    let api = FormApi::new(form).with_reporter(reporter.clone());
    (api, reporter)
}

fn logging_handler(log: &Rc<RefCell<Vec<String>>>) -> Handler {
    let log = Rc::clone(log);
    handler(move |ctx: &EventContext| {
        log.borrow_mut()
            .push(format!("{}:{}", ctx.kind, ctx.source.as_deref().unwrap_or("form")));
    })
}

#[test]
fn onload_wiring_end_to_end() {
    let form = contact_form();
    let (api, reporter) = recording_api(form.clone());
    let log = Rc::new(RefCell::new(Vec::new()));
    let on_change = logging_handler(&log);

    api.set_attribute_value("firstname", "John");
    api.set_required(vec!["firstname", "lastname"]);
    api.on_change(vec!["firstname", "lastname"], &on_change);
    api.on_pre_search("parentcustomerid", &logging_handler(&log));
    api.set_visible(
        Specifier::predicate(|c: &Control| c.section().as_deref() == Some("address")),
        false,
    );

    assert!(reporter.is_empty());

    // The host raises events later; handlers see their source.
    let lastname = api.get_attribute("lastname").into_one().unwrap();
    lastname.fire(EventKind::Change);
    let lookup = api.get_control("parentcustomerid").into_one().unwrap();
    lookup.fire(EventKind::PreSearch);

    assert_eq!(
        *log.borrow(),
        vec!["change:lastname".to_string(), "pre_search:parentcustomerid".to_string()]
    );

    let hidden: Vec<String> = api
        .get_control(Specifier::predicate(|c: &Control| !c.is_visible()))
        .iter()
        .map(|c| c.name().to_string())
        .collect();
    assert_eq!(hidden, vec!["line1", "city"]);
}

#[test]
fn unresolved_names_on_each_path() {
    let (api, reporter) = recording_api(contact_form());
    let h = handler(|_| {});

    assert!(api.get_attribute("ghost").is_nothing());
    assert_eq!(api.set_attribute_value("ghost", "X"), 0);
    assert!(reporter.is_empty());

    assert_eq!(api.on_change("ghost", &h), 0);
    let reports = reporter.reports();
    assert_eq!(reports.len(), 1);
    assert!(reports[0].message.contains("on_change"));
    assert!(reports[0].message.contains("\"ghost\""));
}

#[test]
fn dynamic_specifiers_from_json() {
    let (api, reporter) = recording_api(contact_form());
    let h = handler(|_| {});

    let names = Specifier::<Attribute>::from_json(&json!(["missing", "lastname", 0]));
    assert_eq!(api.set_attribute_value(names, "x"), 2);

    let both = Specifier::<Attribute>::from_json(&json!(["firstname", "lastname"]));
    let values: Vec<AttributeValue> = api.get_attribute_value(both).into_vec();
    assert_eq!(values, vec![AttributeValue::from("x"), AttributeValue::from("x")]);

    api.on_change(Specifier::<Attribute>::from_json(&json!({"name": "firstname"})), &h);
    api.on_change(Specifier::<Attribute>::from_json(&json!(null)), &h);
    assert_eq!(reporter.len(), 2);
}

#[test]
fn direct_handles_skip_lookup() {
    let form = contact_form();
    let (api, reporter) = recording_api(form);
    let h = handler(|_| {});

    let loose = Attribute::new("loose", AttributeType::String);
    assert_eq!(api.set_attribute_value(loose.clone(), "value"), 1);
    assert_eq!(loose.value(), AttributeValue::from("value"));

    let locked = Attribute::read_only("locked", AttributeType::String);
    assert_eq!(api.set_attribute_value(locked.clone(), "value"), 0);
    assert_eq!(locked.write_count(), 0);

    let plain = Control::new("plain", ControlType::Standard);
    assert_eq!(api.on_pre_search(plain, &h), 0);
    assert!(reporter.is_empty());
}

#[test]
fn removal_mirrors_registration() {
    let (api, _) = recording_api(contact_form());
    let log = Rc::new(RefCell::new(Vec::new()));
    let h = logging_handler(&log);

    let everything = || Specifier::predicate(|_: &Attribute| true);
    assert_eq!(api.on_change(everything(), &h), 4);
    assert_eq!(api.remove_on_change(everything(), &h), 4);

    api.fire_on_change(everything());
    assert!(log.borrow().is_empty());
}

#[test]
fn form_events_and_context() {
    let form = contact_form();
    let api = FormApi::from_input(Some(HostInput::Form(form.clone()))).unwrap();
    assert!(api.event_context().is_none());

    let log = Rc::new(RefCell::new(Vec::new()));
    let h = logging_handler(&log);
    api.on_save(&h);
    form.fire_form_event(EventKind::Save);
    assert_eq!(*log.borrow(), vec!["save:form".to_string()]);

    let missing = FormApi::<InMemoryForm>::from_input(None);
    assert!(matches!(missing, Err(FormError::MissingContext)));
}

#[test]
fn config_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let config = BindConfig {
        report_unresolved: false,
        ..BindConfig::default()
    };
    config.save(dir.path()).unwrap();

    let loaded = BindConfig::load(dir.path()).unwrap();
    let reporter = Rc::new(RecordingReporter::new());
    let api = FormApi::with_config(contact_form(), loaded).with_reporter(reporter.clone());
    api.on_change("ghost", &handler(|_| {}));
    assert!(reporter.is_empty());
}
