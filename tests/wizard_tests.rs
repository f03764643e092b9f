use form_wizard::{
    error::FormError,
    form::visibility::resolve_visibility,
    schema::{
        links::{assign_breadcrumb_links, breadcrumb_link, instance_link, parent_link, parse_step_route},
        schema_model::{Button, ButtonType, Screen},
    },
    wizard::{
        navigator::{
            ButtonValue, TerminalAction, button_bar, compute_next_target, default_submit_button,
            resolve_buttons,
        },
        wizard_model::{BreadcrumbState, Wizard, WizardState},
    },
};

use crate::common::fixtures::{
    STEP_1, STEP_2, button, grouping, link_button, section, wizard_form,
};

mod common;

const PAGE_LINK: &str = "/form/order";

fn linked_screen() -> Screen {
    let mut form = wizard_form();
    assign_breadcrumb_links(&mut form);
    form.screen.unwrap()
}

// ============================================================================
// Links and routes
// ============================================================================

#[test]
fn breadcrumb_links_are_stamped_on_groupings() {
    let screen = linked_screen();
    let groupings = screen.groupings.unwrap();

    assert_eq!(groupings[0].breadcrumb_link, STEP_1);
    assert_eq!(groupings[1].breadcrumb_link, STEP_2);
}

#[test]
fn instance_link_does_not_repeat_the_id() {
    assert_eq!(instance_link("/form/order", Some("42")), "/form/order/42");
    assert_eq!(instance_link("/form/order/42", Some("42")), "/form/order/42");
    assert_eq!(instance_link("/form/order", None), "/form/order");
    assert_eq!(breadcrumb_link("/form/order/42", 3), "/form/order/42/step/3");
}

#[test]
fn parent_link_strips_last_segment() {
    assert_eq!(parent_link("/form/order/42"), "/form/order");
    assert_eq!(parent_link(PAGE_LINK), "/form");
}

#[test]
fn step_routes_parse_to_zero_based_index() {
    assert_eq!(parse_step_route("step/2"), Some(1));
    assert_eq!(parse_step_route("/form/order/42/step/3"), Some(2));
    assert_eq!(parse_step_route("step/0"), None);
    assert_eq!(parse_step_route("/form/order"), None);
}

// ============================================================================
// Navigation targets
// ============================================================================

#[test]
fn first_step_targets() {
    let screen = linked_screen();

    assert_eq!(
        compute_next_target(&screen, PAGE_LINK, 0, &ButtonValue::Next),
        STEP_2
    );
    assert_eq!(
        compute_next_target(&screen, PAGE_LINK, 0, &ButtonValue::Prev),
        "/form"
    );
}

#[test]
fn last_step_targets() {
    let screen = linked_screen();

    assert_eq!(compute_next_target(&screen, PAGE_LINK, 1, &ButtonValue::Next), "");
    assert_eq!(
        compute_next_target(&screen, PAGE_LINK, 1, &ButtonValue::Prev),
        STEP_1
    );
}

#[test]
fn terminal_and_literal_values_pass_through() {
    let screen = linked_screen();

    assert_eq!(
        compute_next_target(&screen, PAGE_LINK, 0, &ButtonValue::Terminal(TerminalAction::Reject)),
        "reject"
    );
    assert_eq!(
        compute_next_target(&screen, PAGE_LINK, 0, &ButtonValue::Target("/elsewhere".to_string())),
        "/elsewhere"
    );
}

#[test]
fn button_values_parse() {
    assert_eq!(ButtonValue::parse("next"), ButtonValue::Next);
    assert_eq!(ButtonValue::parse("prev"), ButtonValue::Prev);
    assert_eq!(
        ButtonValue::parse("approve"),
        ButtonValue::Terminal(TerminalAction::Approve)
    );
    assert_eq!(
        ButtonValue::parse("/x/y"),
        ButtonValue::Target("/x/y".to_string())
    );

    let no_value = Button::default();
    assert_eq!(ButtonValue::of(&no_value), ButtonValue::Target(String::new()));
}

#[test]
fn resolve_buttons_rewrites_next_and_prev() {
    let screen = linked_screen();
    let buttons = vec![
        button("prevButton", "Back", "prev"),
        button("nextButton", "Next", "next"),
        button("submitButton", "Submit", "submit"),
    ];

    let resolved = resolve_buttons(&screen, PAGE_LINK, 0, &buttons);

    assert_eq!(resolved[0].value.as_deref(), Some("/form"));
    assert_eq!(resolved[0].alt.as_deref(), Some("Previous"));
    assert_eq!(resolved[1].value.as_deref(), Some(STEP_2));
    assert_eq!(resolved[1].link.as_deref(), Some(STEP_2));
    assert_eq!(resolved[1].alt.as_deref(), Some("Next"));
    assert_eq!(resolved[2], buttons[2]);
}

// ============================================================================
// Button bar
// ============================================================================

#[test]
fn grouping_buttons_attach_to_last_visible_section() {
    let screen = linked_screen();
    let visibility = resolve_visibility(&screen, Some(1));

    let bar = button_bar(&screen, &visibility, PAGE_LINK, 1).unwrap();

    assert_eq!(bar.section_id, "s2");
    let ids: Vec<&str> = bar.buttons.iter().map(|b| b.button_id.as_str()).collect();
    assert_eq!(ids, vec!["prevButton", "submitButton"]);
    assert_eq!(bar.buttons[0].value.as_deref(), Some(STEP_1));
}

#[test]
fn section_buttons_are_the_fallback() {
    let mut last = section("b", vec![]);
    last.buttons = vec![link_button("cancel", "Cancel", "/home")];
    let screen = Screen {
        groupings: Some(vec![grouping("g", 1, &["a", "b"], vec![])]),
        sections: vec![section("a", vec![]), last],
        ..Screen::default()
    };
    let visibility = resolve_visibility(&screen, Some(0));

    let bar = button_bar(&screen, &visibility, PAGE_LINK, 0).unwrap();

    assert_eq!(bar.section_id, "b");
    assert_eq!(bar.buttons.len(), 1);
    assert_eq!(bar.buttons[0].button_type, ButtonType::ButtonLink);
}

#[test]
fn default_submit_button_when_nothing_declared() {
    let screen = Screen {
        sections: vec![section("a", vec![])],
        ..Screen::default()
    };
    let visibility = resolve_visibility(&screen, None);

    let bar = button_bar(&screen, &visibility, PAGE_LINK, 0).unwrap();

    assert_eq!(bar.buttons, vec![default_submit_button()]);
    assert_eq!(bar.buttons[0].value.as_deref(), Some("submit"));
}

#[test]
fn wizard_step_without_buttons_has_no_bar() {
    let screen = Screen {
        groupings: Some(vec![
            grouping("g1", 1, &["a"], vec![]),
            grouping("g2", 2, &["b"], vec![]),
        ]),
        sections: vec![section("a", vec![]), section("b", vec![])],
        ..Screen::default()
    };
    let visibility = resolve_visibility(&screen, Some(0));

    assert!(button_bar(&screen, &visibility, PAGE_LINK, 0).is_none());
}

#[test]
fn no_visible_section_means_no_button_bar() {
    let screen = linked_screen();
    let visibility = resolve_visibility(&screen, Some(5));

    assert!(button_bar(&screen, &visibility, PAGE_LINK, 5).is_none());
}

// ============================================================================
// Wizard state machine
// ============================================================================

#[test]
fn wizard_starts_on_requested_step() {
    let wizard = Wizard::for_screen(&linked_screen(), 1);

    assert_eq!(wizard.step_count(), 2);
    assert_eq!(wizard.current(), Some(1));
    assert!(wizard.is_reached(0));
    assert!(wizard.is_reached(1));
}

#[test]
fn breadcrumb_goto_only_reaches_visited_steps() {
    let mut wizard = Wizard::new(3, 0);

    assert!(matches!(
        wizard.goto(2),
        Err(FormError::StepNotReached { ordinal: 3 })
    ));

    wizard.advance_to(2);
    wizard.goto(0).unwrap();
    assert_eq!(wizard.current(), Some(0));
    assert_eq!(wizard.furthest(), 2);

    wizard.goto(2).unwrap();
    assert_eq!(wizard.state, WizardState::Step(2));
    assert!(wizard.goto(3).is_err());
}

#[test]
fn only_validated_moves_unlock_steps() {
    let mut wizard = Wizard::new(3, 0);

    wizard.enter(2);
    assert_eq!(wizard.current(), Some(2));
    assert_eq!(wizard.furthest(), 0);

    wizard.advance_to(7);
    assert_eq!(wizard.furthest(), 0);

    wizard.advance_to(1);
    assert_eq!(wizard.furthest(), 1);
    assert!(wizard.goto(2).is_err());
}

#[test]
fn finish_moves_to_terminal_state() {
    let mut wizard = Wizard::new(2, 1);
    wizard.finish(TerminalAction::Approve);

    assert!(wizard.is_terminal());
    assert_eq!(wizard.current(), None);
    assert_eq!(wizard.state, WizardState::Terminal(TerminalAction::Approve));
}

#[test]
fn breadcrumbs_reflect_reached_steps() {
    let screen = linked_screen();
    let mut wizard = Wizard::for_screen(&screen, 0);

    let crumbs = wizard.breadcrumbs(&screen);
    assert_eq!(crumbs[0].state, BreadcrumbState::Current);
    assert_eq!(crumbs[1].state, BreadcrumbState::Inactive);
    assert_eq!(crumbs[0].label, "Step 1");
    assert_eq!(crumbs[1].link, STEP_2);

    wizard.advance_to(1);
    wizard.goto(0).unwrap();
    let crumbs = wizard.breadcrumbs(&screen);
    assert_eq!(crumbs[0].state, BreadcrumbState::Current);
    assert_eq!(crumbs[1].state, BreadcrumbState::Link);
}

#[test]
fn breadcrumb_label_comes_from_grouping() {
    let mut screen = linked_screen();
    if let Some(groupings) = screen.groupings.as_mut() {
        groupings[0].breadcrumb = Some("Contact".to_string());
    }

    let crumbs = Wizard::for_screen(&screen, 0).breadcrumbs(&screen);
    assert_eq!(crumbs[0].label, "Contact");
}
