/// Default base URL for a locally hosted ADK API server.
pub const DEFAULT_ADK_BASE_URL: &str = "http://127.0.0.1:8000";

/// Normalize a base URL to the streaming run endpoint.
pub fn run_sse_url(base_url: &str) -> String {
    format!("{}/run_sse", normalized_base(base_url))
}

/// Session-management endpoint for one app/user pair.
pub fn sessions_url(base_url: &str, app_name: &str, user_id: &str) -> String {
    format!(
        "{}/apps/{app_name}/users/{user_id}/sessions",
        normalized_base(base_url)
    )
}

fn normalized_base(input: &str) -> &str {
    let base = if input.trim().is_empty() {
        DEFAULT_ADK_BASE_URL
    } else {
        input.trim()
    };
    base.trim_end_matches('/')
}

#[cfg(test)]
mod tests {
    use super::{run_sse_url, sessions_url};

    #[test]
    fn run_sse_url_appends_endpoint_and_trims_slashes() {
        assert_eq!(run_sse_url("http://host:8000/"), "http://host:8000/run_sse");
        assert_eq!(run_sse_url(""), "http://127.0.0.1:8000/run_sse");
    }

    #[test]
    fn sessions_url_interpolates_app_and_user() {
        assert_eq!(
            sessions_url("http://host:8000", "porter", "web-ui-user"),
            "http://host:8000/apps/porter/users/web-ui-user/sessions"
        );
    }
}
