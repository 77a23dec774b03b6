use leptos::prelude::*;

/// The remote API origin the server was configured with.
#[server]
pub async fn get_api_base() -> Result<String, ServerFnError> {
    use quill_types::ApiBase;

    let apiBase = use_context::<ApiBase>()
        .ok_or_else(|| ServerFnError::new("api base unavailable"))?;
    Ok(apiBase.0)
}

#[cfg(feature = "hydrate")]
mod browser {
    use std::cell::RefCell;

    use leptos::prelude::window;
    use quill_client::{ApiClient, BlogApi, ClientError, SessionStore, Upload};

    use super::get_api_base;
    use crate::storage::BrowserStorage;

    thread_local! {
        static API_BASE: RefCell<Option<String>> = const { RefCell::new(None) };
    }

    /// API client over the browser session. The base URL is asked from the
    /// server once per page load.
    pub async fn connect() -> Result<BlogApi, ClientError> {
        let cached = API_BASE.with(|b| b.borrow().clone());
        let base = match cached {
            Some(base) => base,
            None => {
                let base = get_api_base()
                    .await
                    .map_err(|e| ClientError::Config(format!("failed to load API base: {e}")))?;
                API_BASE.with(|b| *b.borrow_mut() = Some(base.clone()));
                base
            }
        };
        Ok(BlogApi::new(
            ApiClient::new(&base)?,
            SessionStore::new(BrowserStorage),
        ))
    }

    pub fn browser_session() -> SessionStore {
        SessionStore::new(BrowserStorage)
    }

    pub fn confirm_in_browser(prompt: &str) -> bool {
        window().confirm_with_message(prompt).unwrap_or(false)
    }

    /// First file picked in `input`, read into memory.
    pub async fn read_picked_file(
        input: &web_sys::HtmlInputElement,
    ) -> Result<Option<Upload>, ClientError> {
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return Ok(None);
        };
        let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
            .await
            .map_err(|e| ClientError::Invalid(format!("failed to read {}: {e:?}", file.name())))?;
        let bytes = js_sys::Uint8Array::new(&buffer).to_vec();

        Ok(Some(Upload {
            file_name: file.name(),
            bytes,
            content_type: Some(file.type_()).filter(|t| !t.is_empty()),
        }))
    }
}

#[cfg(feature = "hydrate")]
pub use browser::*;
