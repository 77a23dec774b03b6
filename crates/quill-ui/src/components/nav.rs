use leptos::prelude::*;
use quill_client::views::Identity;
use quill_client::{Resource, ResourceState};

use crate::components::toast::use_toasts;

#[component]
pub fn Nav() -> impl IntoView {
    #[allow(unused_variables)]
    let identity = RwSignal::new(Resource::<Identity>::new());
    #[allow(unused_variables)]
    let toasts = use_toasts();

    #[cfg(feature = "hydrate")]
    {
        use crate::client::connect;
        use quill_client::views;
        use wasm_bindgen_futures::spawn_local;

        spawn_local(async move {
            let Some(ticket) = identity.try_update(|r| r.begin()) else {
                return;
            };
            let result = match connect().await {
                Ok(api) => views::identity(&api).await,
                Err(e) => Err(e),
            };
            identity.try_update(|r| r.settle(ticket, result));
        });
    }

    let handleSignOut = move |_| {
        #[cfg(feature = "hydrate")]
        {
            use crate::client::connect;
            use wasm_bindgen_futures::spawn_local;

            spawn_local(async move {
                let result = match connect().await {
                    Ok(api) => api.sign_out().await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(()) => {
                        let ticket = identity.try_update(|r| r.begin());
                        if let Some(ticket) = ticket {
                            identity.try_update(|r| r.settle(ticket, Ok(Identity::Anonymous)));
                        }
                        if let Some(t) = toasts {
                            t.info("Signed out");
                        }
                    }
                    Err(e) => {
                        if let Some(t) = toasts {
                            t.error(format!("Sign out failed: {}", e.user_message()));
                        }
                    }
                }
            });
        }
    };

    view! {
        <nav class="nav-bar">
            <div class="nav-links">
                <a href="/">"Home"</a>
                <a href="/admin/new">"New Post"</a>
            </div>
            <div class="nav-user">
                {move || {
                    let user = identity
                        .with(|r| r.state().loaded().and_then(|i| i.user().cloned()));
                    let checking = identity.with(|r| {
                        r.state().is_loading() || matches!(r.state(), ResourceState::Idle)
                    });
                    let failure = identity.with(|r| r.state().error().map(str::to_string));
                    match user {
                        Some(user) => {
                            let name = user.display_name().to_string();
                            view! {
                                <div class="nav-identity">
                                    {user
                                        .picture
                                        .clone()
                                        .map(|src| view! { <img class="avatar" src=src alt="" /> })}
                                    <span>{name}</span>
                                    <button class="btn btn-ghost btn-sm" on:click=handleSignOut>
                                        "Sign out"
                                    </button>
                                </div>
                            }
                                .into_any()
                        }
                        None if checking => view! { <span class="nav-muted">"\u{2026}"</span> }.into_any(),
                        None => {
                            view! {
                                <a class="btn btn-outline" href="/login" rel="external" title=failure>
                                    "Login with Google"
                                </a>
                            }
                                .into_any()
                        }
                    }
                }}
            </div>
        </nav>
    }
}
