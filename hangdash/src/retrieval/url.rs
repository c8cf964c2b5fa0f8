//! Fragment URL construction

/// Where the hang aggregation jobs publish their output.
pub const DEFAULT_BASE_URL: &str = "https://analysis-output.telemetry.mozilla.org/bhr/data/hang_aggregates";

/// What to retrieve: a duration specifier plus optional qualifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRequest {
    pub duration_spec: String,
    pub historical: bool,
    pub payload_id: Option<String>,
}

impl ProfileRequest {
    pub fn new(duration_spec: impl Into<String>) -> Self {
        Self { duration_spec: duration_spec.into(), historical: false, payload_id: None }
    }
}

/// Build the URL of a fragment.
///
/// `{base}/hang_profile_{duration}[_historical][_{thread}][_{payload}].json`
pub fn profile_url(base_url: &str, request: &ProfileRequest, thread: Option<&str>) -> String {
    let mut file_root = format!("hang_profile_{}", request.duration_spec);
    if request.historical {
        file_root.push_str("_historical");
    }
    if let Some(thread) = thread.filter(|t| !t.is_empty()) {
        file_root.push('_');
        file_root.push_str(thread);
    }
    if let Some(payload_id) = request.payload_id.as_deref().filter(|p| !p.is_empty()) {
        file_root.push('_');
        file_root.push_str(payload_id);
    }
    format!("{}/{file_root}.json", base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_url() {
        let request = ProfileRequest::new("30");
        assert_eq!(profile_url("https://host/data", &request, None), "https://host/data/hang_profile_30.json");
    }

    #[test]
    fn test_qualifiers_in_order() {
        let request = ProfileRequest { duration_spec: "7".to_string(), historical: true, payload_id: Some("abc".to_string()) };
        assert_eq!(
            profile_url("https://host/data/", &request, Some("Gecko_Child")),
            "https://host/data/hang_profile_7_historical_Gecko_Child_abc.json"
        );
    }

    #[test]
    fn test_empty_payload_is_ignored() {
        let request = ProfileRequest { payload_id: Some(String::new()), ..ProfileRequest::new("30") };
        assert_eq!(profile_url(DEFAULT_BASE_URL, &request, None), format!("{DEFAULT_BASE_URL}/hang_profile_30.json"));
    }
}
