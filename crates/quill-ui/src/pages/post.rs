use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use quill_client::{Resource, ResourceState};
use quill_types::Post;

#[component]
pub fn PostPage() -> impl IntoView {
    #[allow(unused_variables)]
    let params = use_params_map();
    #[allow(unused_variables)]
    let post = RwSignal::new(Resource::<Post>::new());
    #[allow(unused_variables)]
    let (assetBase, setAssetBase) = signal(String::new());

    #[cfg(feature = "hydrate")]
    Effect::new(move |_| {
        use crate::client::connect;
        use quill_client::ClientError;
        use wasm_bindgen_futures::spawn_local;

        let slug = params.with(|p| p.get("slug")).filter(|s| !s.is_empty());
        let Some(ticket) = post.try_update(|r| r.begin()) else {
            return;
        };

        spawn_local(async move {
            let result = match (slug, connect().await) {
                (None, _) => Err(ClientError::Invalid("no post selected".to_string())),
                (_, Err(e)) => Err(e),
                (Some(slug), Ok(api)) => {
                    setAssetBase.try_set(api.client().base().to_string());
                    api.post_by_slug(&slug).await
                }
            };
            post.try_update(|r| r.settle(ticket, result));
        });
    });

    view! {
        <div class="page-header">
            <a href="/">"\u{2190} All posts"</a>
        </div>
        {move || {
            match post.with(|r| r.state().clone()) {
                ResourceState::Idle | ResourceState::Loading => {
                    view! {
                        <div class="loading">
                            <div class="spinner"></div>
                            "Loading post..."
                        </div>
                    }
                        .into_any()
                }
                ResourceState::Loaded(post) => {
                    let base = assetBase.get();
                    let image = post
                        .image_path
                        .clone()
                        .filter(|p| !p.is_empty() && !base.is_empty())
                        .map(|p| quill_client::asset_url(&base, &p));
                    view! {
                        <article class="card post-detail">
                            <h1>{post.title.clone()}</h1>
                            {post
                                .category_name()
                                .map(|c| view! { <p class="post-category">{c.to_string()}</p> })}
                            {image.map(|src| view! { <img class="post-image" src=src alt="" /> })}
                            <div class="post-content">{post.content.clone()}</div>
                            <div class="post-actions">
                                <a class="btn btn-outline btn-sm" href=format!("/admin/{}", post.id)>
                                    "Edit"
                                </a>
                            </div>
                        </article>
                    }
                        .into_any()
                }
                ResourceState::Failed(e) => {
                    view! {
                        <div class="card">
                            <p class="error-text">"Failed to load post: " {e}</p>
                        </div>
                    }
                        .into_any()
                }
            }
        }}
    }
}
