use crate::schema::schema_model::Form;

/// Link identifying this form instance: the page link with the instance id
/// appended unless it already ends with it.
pub fn instance_link(link: &str, form_instance_id: Option<&str>) -> String {
    match form_instance_id {
        Some(id) if !id.is_empty() && !link.ends_with(id) => format!("{}/{}", link, id),
        _ => link.to_string(),
    }
}

pub fn breadcrumb_link(instance_link: &str, ordinal: usize) -> String {
    format!("{}/step/{}", instance_link, ordinal)
}

/// Stamp every grouping with its breadcrumb link.
pub fn assign_breadcrumb_links(form: &mut Form) {
    let link = instance_link(&form.link, form.form_instance_id.as_deref());
    if let Some(groupings) = form.screen.as_mut().and_then(|s| s.groupings.as_mut()) {
        for grouping in groupings.iter_mut() {
            grouping.breadcrumb_link = breadcrumb_link(&link, grouping.ordinal);
        }
    }
}

/// One level up: the link with its last path segment stripped.
pub fn parent_link(link: &str) -> String {
    match link.rfind('/') {
        Some(idx) => link[..idx].to_string(),
        None => link.to_string(),
    }
}

/// Parse a `step/{ordinal}` route (bare, `#`-prefixed, or at the end of a
/// full link) into a 0-based grouping index.
///
/// Ordinals in routes are 1-based; `step/0` and anything unparsable is `None`.
pub fn parse_step_route(route: &str) -> Option<usize> {
    let idx = route.rfind("step/")?;
    let before = &route[..idx];
    if !(before.is_empty() || before.ends_with('/') || before.ends_with('#')) {
        return None;
    }
    let ordinal: usize = route[idx + "step/".len()..].parse().ok()?;
    ordinal.checked_sub(1)
}
