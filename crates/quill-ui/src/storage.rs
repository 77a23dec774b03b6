use quill_client::{ClientError, TokenStorage};

/// `window.localStorage` once hydrated. During server rendering there is no
/// browser profile, so reads see nothing and writes are dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Result<web_sys::Storage, ClientError> {
    leptos::prelude::window()
        .local_storage()
        .map_err(js_error)?
        .ok_or_else(|| ClientError::Storage("localStorage unavailable".into()))
}

#[cfg(feature = "hydrate")]
fn js_error(e: wasm_bindgen::JsValue) -> ClientError {
    ClientError::Storage(format!("{e:?}"))
}

impl TokenStorage for BrowserStorage {
    #[cfg(feature = "hydrate")]
    fn read(&self, key: &str) -> Result<Option<String>, ClientError> {
        local_storage()?.get_item(key).map_err(js_error)
    }

    #[cfg(feature = "hydrate")]
    fn write(&self, key: &str, value: &str) -> Result<(), ClientError> {
        local_storage()?.set_item(key, value).map_err(js_error)
    }

    #[cfg(feature = "hydrate")]
    fn remove(&self, key: &str) -> Result<(), ClientError> {
        local_storage()?.remove_item(key).map_err(js_error)
    }

    #[cfg(not(feature = "hydrate"))]
    fn read(&self, _key: &str) -> Result<Option<String>, ClientError> {
        Ok(None)
    }

    #[cfg(not(feature = "hydrate"))]
    fn write(&self, _key: &str, _value: &str) -> Result<(), ClientError> {
        Ok(())
    }

    #[cfg(not(feature = "hydrate"))]
    fn remove(&self, _key: &str) -> Result<(), ClientError> {
        Ok(())
    }
}

#[cfg(all(test, not(feature = "hydrate")))]
mod tests {
    use super::*;
    use quill_client::SessionStore;

    #[test]
    fn server_render_sees_no_session() {
        let session = SessionStore::new(BrowserStorage);
        session.set_token("abc").unwrap();
        assert!(!session.is_signed_in());
        assert!(session.auth_headers().is_empty());
    }
}
