use leptos::prelude::*;

/// Landing page for the OAuth redirect. Stores the `token` query parameter
/// and replaces itself with the home route.
#[component]
pub fn AuthCallbackPage() -> impl IntoView {
    #[cfg(feature = "hydrate")]
    {
        use leptos_router::hooks::use_navigate;
        use leptos_router::NavigateOptions;
        use quill_client::callback::{complete_sign_in, HOME_ROUTE};

        use crate::client::browser_session;

        let navigate = use_navigate();
        Effect::new(move |_| {
            let href = window().location().href().unwrap_or_default();
            let redirectTo = match complete_sign_in(&href, &browser_session()) {
                Ok(outcome) => outcome.redirect_to,
                Err(e) => {
                    tracing::warn!("sign-in callback failed: {e}");
                    HOME_ROUTE
                }
            };
            navigate(
                redirectTo,
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        });
    }

    view! {
        <div class="loading">
            <div class="spinner"></div>
            "Signing you in\u{2026}"
        </div>
    }
}
