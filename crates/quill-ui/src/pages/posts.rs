use leptos::prelude::*;
use quill_client::{Resource, ResourceState};
use quill_types::Post;

use crate::components::post_card::PostCard;
use crate::components::toast::use_toasts;

#[component]
pub fn PostsPage() -> impl IntoView {
    #[allow(unused_variables)]
    let posts = RwSignal::new(Resource::<Vec<Post>>::new());
    #[allow(unused_variables)]
    let (assetBase, setAssetBase) = signal(String::new());
    #[allow(unused_variables)]
    let (deleting, setDeleting) = signal(Option::<i64>::None);
    #[allow(unused_variables)]
    let toasts = use_toasts();

    #[cfg(feature = "hydrate")]
    let fetch = move || {
        use crate::client::connect;
        use wasm_bindgen_futures::spawn_local;

        spawn_local(async move {
            let Some(ticket) = posts.try_update(|r| r.begin()) else {
                return;
            };
            let result = match connect().await {
                Ok(api) => {
                    setAssetBase.try_set(api.client().base().to_string());
                    api.list_posts().await
                }
                Err(e) => Err(e),
            };
            posts.try_update(|r| r.settle(ticket, result));
        });
    };

    // Initial fetch on mount
    #[cfg(feature = "hydrate")]
    fetch();

    let handleDelete = move |postId: i64| {
        #[cfg(feature = "hydrate")]
        {
            use crate::client::{confirm_in_browser, connect};
            use quill_client::views::{self, Mutation};
            use wasm_bindgen_futures::spawn_local;

            spawn_local(async move {
                let api = match connect().await {
                    Ok(api) => api,
                    Err(e) => {
                        if let Some(t) = toasts {
                            t.error(e.user_message());
                        }
                        return;
                    }
                };

                // The card reads "Deleting..." only once the user has agreed.
                let confirmAndMark = |prompt: &str| {
                    let agreed = confirm_in_browser(prompt);
                    if agreed {
                        setDeleting.try_set(Some(postId));
                    }
                    agreed
                };
                let outcome = views::delete_post(&api, postId, &confirmAndMark).await;
                setDeleting.try_set(None);

                match outcome {
                    Ok(Mutation::Applied) => {
                        if let Some(t) = toasts {
                            t.success("Post deleted");
                        }
                        fetch();
                    }
                    Ok(Mutation::Cancelled) => {}
                    Err(e) => {
                        if let Some(t) = toasts {
                            t.error(format!("Delete failed: {}", e.user_message()));
                        }
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = postId;
        }
    };

    view! {
        <div class="page-header">
            <h1>"All Posts"</h1>
        </div>
        {move || {
            match posts.with(|r| r.state().clone()) {
                ResourceState::Idle | ResourceState::Loading => {
                    view! {
                        <div class="loading">
                            <div class="spinner"></div>
                            "Loading posts..."
                        </div>
                    }
                        .into_any()
                }
                ResourceState::Loaded(list) => {
                    if list.is_empty() {
                        view! {
                            <div class="card empty">
                                <p>"No posts yet. "<a href="/admin/new">"Write the first one."</a></p>
                            </div>
                        }
                            .into_any()
                    } else {
                        let currentDelete = deleting.get();
                        let base = assetBase.get();
                        view! {
                            <div class="post-grid">
                                {list
                                    .into_iter()
                                    .map(|post| {
                                        let isDeleting = currentDelete == Some(post.id);
                                        view! {
                                            <PostCard
                                                post=post
                                                asset_base=base.clone()
                                                on_delete=handleDelete
                                                is_deleting=isDeleting
                                            />
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        }
                            .into_any()
                    }
                }
                ResourceState::Failed(e) => {
                    view! {
                        <div class="card">
                            <p class="error-text">"Failed to load posts: " {e}</p>
                        </div>
                    }
                        .into_any()
                }
            }
        }}
    }
}
