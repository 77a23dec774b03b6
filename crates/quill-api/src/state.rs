use quill_types::ApiBase;

#[derive(Clone)]
pub struct AppState {
    pub api_base: ApiBase,
}

impl AppState {
    /// `<api base><path>` without doubling the separator.
    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.0.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
