use form_wizard::{
    session::form_session::FormSession,
    view::{console::format_step_console, html::render_step_html},
};

use crate::common::{
    fixtures::{STEP_2, button, suspended_form, wizard_form},
    mock_api::MockApi,
};

mod common;

const INVALID_EMAIL: &str =
    r#"{"items":[{"propertyName":"email","type":"error","message":"Invalid"}]}"#;

fn session(api: MockApi) -> FormSession<MockApi> {
    FormSession::with_form(api, wizard_form()).unwrap()
}

// ============================================================================
// HTML rendering
// ============================================================================

#[test]
fn html_marks_visible_and_hidden_sections() {
    let html = render_step_html(&session(MockApi::new()).step_view());

    assert!(html.contains(r#"<li class="section selected" id="s1">"#));
    assert!(html.contains(r#"<li class="section hide" id="s2">"#));
    assert!(html.contains(r#"action="/form/order/42.html""#));
    assert!(html.contains(r#"enctype="multipart/form-data""#));
    assert!(html.contains(r#"novalidate="novalidate""#));
}

#[test]
fn html_buttons_sit_in_last_visible_section() {
    let html = render_step_html(&session(MockApi::new()).step_view());

    let footer = html.find("section-buttons").unwrap();
    let s1 = html.find(r#"id="s1""#).unwrap();
    let s2 = html.find(r#"id="s2""#).unwrap();
    assert!(s1 < footer && footer < s2);
    assert!(html.contains(&format!(r#"id="nextButton" value="{}""#, STEP_2)));
    assert_eq!(html.matches("section-buttons").count(), 1);
}

#[test]
fn html_required_only_on_visible_fields() {
    let html = render_step_html(&session(MockApi::new()).step_view());

    assert!(html.contains(r#"name="email" class="required" required aria-required="true""#));
    assert!(html.contains(r#"name="phone" class="required" value"#));
}

#[test]
fn html_breadcrumbs_show_step_states() {
    let html = render_step_html(&session(MockApi::new()).step_view());

    assert!(html.contains(r#"<span class="active">Step 1</span>"#));
    assert!(html.contains(r#"<span class="inactive-text">Step 2</span>"#));
}

#[test]
fn html_shows_validation_errors_inline() {
    let mut session = session(MockApi::new().respond(400, INVALID_EMAIL));
    session.activate(None).unwrap();

    let html = render_step_html(&session.step_view());

    assert!(html.contains(r#"<div class="control-group error">"#));
    assert_eq!(
        html.matches(r#"<span class="help-inline generated">Invalid</span>"#)
            .count(),
        1
    );
}

#[test]
fn html_escapes_alert_text() {
    let mut session = session(MockApi::new());
    session.view_mut().set_alert("<b>down</b> & out");

    let html = render_step_html(&session.step_view());

    assert!(html.contains("&lt;b&gt;down&lt;/b&gt; &amp; out"));
    assert!(!html.contains("<b>down</b>"));
}

#[test]
fn html_marks_validated_button_bar() {
    let mut form = wizard_form();
    if let Some(groupings) = form.screen.as_mut().and_then(|s| s.groupings.as_mut()) {
        groupings[0].buttons = vec![button("doneButton", "Done", "")];
    }
    let mut session = FormSession::with_form(MockApi::new(), form).unwrap();

    assert!(!render_step_html(&session.step_view()).contains("data-validated"));
    session.activate(None).unwrap();
    assert!(render_step_html(&session.step_view()).contains(r#"data-validated="true""#));
}

#[test]
fn html_suspended_form_has_notice_and_no_buttons() {
    let session = FormSession::with_form(MockApi::new(), suspended_form()).unwrap();

    let html = render_step_html(&session.step_view());

    assert!(html.contains("Process suspended"));
    assert!(!html.contains("section-buttons"));
    assert!(html.contains(r#"name="email" class="required" required aria-required="true" disabled"#));
}

// ============================================================================
// Console rendering
// ============================================================================

#[test]
fn console_shows_step_header_and_trail() {
    let out = format_step_console(&session(MockApi::new()).step_view());

    assert!(out.starts_with("=== Step 1 of 2 ===\n"));
    assert!(out.contains("[> Step 1] > (Step 2)"));
    assert!(out.contains("-- s1 --"));
    assert!(!out.contains("-- s2 --"));
    assert!(out.contains("email* : "));
    assert!(out.contains(&format!("Buttons: [nextButton] Next -> {}", STEP_2)));
}

#[test]
fn console_lists_field_messages() {
    let mut session = session(MockApi::new().respond(400, INVALID_EMAIL));
    session.activate(None).unwrap();

    let out = format_step_console(&session.step_view());

    assert!(out.contains("    ! error: Invalid"));
}

#[test]
fn console_shows_choices_on_second_step() {
    let mut session = session(MockApi::new());
    session.enter_step(2);
    session.check("color", "blue").unwrap();

    let out = format_step_console(&session.step_view());

    assert!(out.contains("=== Step 2 of 2 ==="));
    assert!(out.contains("Step 1 > [> Step 2]"));
    assert!(out.contains("color : ( ) red (x) blue"));
    assert!(out.contains("photo : (no file)"));
}

#[test]
fn console_shows_alert_and_notice() {
    let mut session = FormSession::with_form(MockApi::new(), suspended_form()).unwrap();
    session.view_mut().set_alert("Server unavailable");

    let out = format_step_console(&session.step_view());

    assert!(out.contains("[ALERT] Server unavailable"));
    assert!(out.contains("[NOTICE] Process suspended:"));
    assert!(!out.contains("Buttons:"));
}
