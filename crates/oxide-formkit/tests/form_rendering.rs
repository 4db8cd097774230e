//! End-to-end rendering through the public API and the engine adapter.

use std::collections::HashMap;

use oxide_formkit::{
    FieldParams, FormError, FormExtension, FormRenderer, FunctionRegistry, TemplateKey,
    TemplateSet, ViewFunctions,
};
use serde_json::{json, Value};

fn args(value: Value) -> HashMap<String, Value> {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_input_with_errors_and_extra_attributes() {
    let mut form = FormRenderer::new();
    form.set_request_data(HashMap::from([("test".to_string(), "John".to_string())]));
    form.set_errors(HashMap::from([(
        "test".to_string(),
        vec!["Error! Danger!".to_string()],
    )]));

    let html = form.input(
        "test",
        FieldParams::new()
            .with("type", "password")
            .with("class", "f")
            .with("id", "MyTest")
            .with("data-x", "v"),
    );

    assert_eq!(
        html,
        r#"<input type="password" name="data[test]" id="MyTest" value="John" class="f error" data-x="v">"#
    );
}

#[test]
fn test_boolean_extra_attribute() {
    let form = FormRenderer::new();
    let html = form.input("agree", FieldParams::new().with("required", true));
    assert!(html.ends_with(r#"class="" required>"#));
}

#[test]
fn test_reset_matches_fresh_renderer() {
    let mut form = FormRenderer::with_request_data(HashMap::from([(
        "a".to_string(),
        "1".to_string(),
    )]));
    form.set_templates(TemplateSet::new().with(TemplateKey::ErrorItem, "{error}"));
    form.reset();

    assert_eq!(form, FormRenderer::new());
    assert_eq!(form.template(TemplateKey::ErrorItem), "<li>{error}</li>");
}

#[test]
fn test_templates_from_configuration() {
    let mut form = FormRenderer::new();
    form.set_templates(
        TemplateSet::from_json(r#"{"error": "<p>{errors}</p>", "error_item": "[{error}]"}"#)
            .unwrap(),
    );
    form.set_errors(HashMap::from([(
        "title".to_string(),
        vec!["a".to_string(), "b".to_string()],
    )]));

    assert_eq!(form.error("title"), "<p>[a][b]</p>");
}

#[test]
fn test_engine_renders_select() {
    let extension = FormExtension::default();
    let views = ViewFunctions::new().extension(&extension);
    assert!(views.does_function_exist("form"));

    let html = views
        .call(
            "form",
            &args(json!({
                "method": "select",
                "name": "test",
                "params": {
                    "options": {"1": "One", "2": "Two"},
                    "value": 2,
                    "class": "form-select",
                },
            })),
        )
        .unwrap();

    assert_eq!(
        html,
        r#"<select name="data[test]" id="Test" class="form-select"><option value="1">One</option><option value="2" selected>Two</option></select>"#
    );
}

#[test]
fn test_engine_renders_list_options() {
    let extension = FormExtension::default();

    let html = extension
        .call(&args(json!({
            "method": "select",
            "name": "colour",
            "params": {"options": ["Red", "Blue"], "value": 1},
        })))
        .unwrap();

    assert_eq!(
        html,
        r#"<select name="data[colour]" id="Colour" class=""><option value="0">Red</option><option value="1" selected>Blue</option></select>"#
    );
}

#[test]
fn test_engine_float_value_selects_integral_key() {
    let extension = FormExtension::default();

    let html = extension
        .call(&args(json!({
            "method": "select",
            "name": "n",
            "params": {"options": {"1": "One", "2": "Two"}, "value": 1.0},
        })))
        .unwrap();

    assert!(html.contains(r#"<option value="1" selected>One</option>"#));
}

#[test]
fn test_engine_sees_request_bound_state() {
    let extension = FormExtension::default();
    let views = ViewFunctions::new().extension(&extension);
    let handle = extension.handle();

    handle
        .write()
        .unwrap()
        .set_default_data(HashMap::from([("bio".to_string(), "Hi".to_string())]));

    let call = json!({"method": "textarea", "name": "bio", "params": {"rows": 3}});
    assert_eq!(
        views.call("form", &args(call.clone())).unwrap(),
        r#"<textarea name="data[bio]" id="Bio" class="" rows="3">Hi</textarea>"#
    );

    handle.write().unwrap().reset();
    assert_eq!(
        views.call("form", &args(call)).unwrap(),
        r#"<textarea name="data[bio]" id="Bio" class="" rows="3"></textarea>"#
    );
}

#[test]
fn test_engine_rejects_bad_params() {
    let extension = FormExtension::default();
    let err = extension
        .call(&args(json!({"method": "input", "name": "x", "params": "oops"})))
        .unwrap_err();
    assert!(matches!(err, FormError::InvalidArgument { .. }));
}
