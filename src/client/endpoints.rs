/// `POST {action}/{groupingId}.json`: validate one step.
pub fn validation_url(action: &str, grouping_id: &str) -> String {
    format!("{}/{}.json", action, grouping_id)
}

/// `POST {action}.html`: full-form submission.
pub fn submission_url(action: &str) -> String {
    format!("{}.html", action)
}

/// `POST {attachment}.json`: upload a comment or files.
pub fn attachment_upload_url(attachment: &str) -> String {
    format!("{}.json", attachment)
}

pub const PROCESS_LIST_PATH: &str = "process";

/// Join a relative path onto the API base; absolute URLs pass through.
pub fn resolve(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
