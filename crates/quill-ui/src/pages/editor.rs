use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};
use quill_client::draft::{EditTarget, PostDraft};
use quill_client::{Resource, ResourceState};
use quill_types::Category;

use crate::components::toast::use_toasts;

#[component]
pub fn NewPostPage() -> impl IntoView {
    view! {
        <div class="page-header">
            <h1>"New Post"</h1>
        </div>
        <PostEditor target=EditTarget::New />
    }
}

#[component]
pub fn EditPostPage() -> impl IntoView {
    let params = use_params_map();
    let target = Memo::new(move |_| {
        let raw = params.with(|p| p.get("id")).unwrap_or_default();
        EditTarget::from_route_id(&raw).map_err(|e| e.to_string())
    });

    view! {
        <div class="page-header">
            <h1>"Edit Post"</h1>
        </div>
        {move || match target.get() {
            Ok(target) => view! { <PostEditor target=target /> }.into_any(),
            Err(e) => {
                view! {
                    <div class="card">
                        <p class="error-text">{e}</p>
                    </div>
                }
                    .into_any()
            }
        }}
    }
}

fn parse_category(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Uploaded images live on the API origin; until that origin is known there
/// is nothing to point an `<img>` at.
fn preview_src(base: &str, path: &str) -> Option<String> {
    if base.is_empty() || path.is_empty() {
        return None;
    }
    Some(quill_client::asset_url(base, path))
}

/// Create/edit form. Existing posts are fetched first and fill the draft.
#[component]
pub fn PostEditor(target: EditTarget) -> impl IntoView {
    let draft = RwSignal::new(PostDraft::default());
    let mut initial = Resource::<()>::new();
    if target == EditTarget::New {
        let ticket = initial.begin();
        initial.settle(ticket, Ok(()));
    }
    #[allow(unused_variables)]
    let source = RwSignal::new(initial);
    #[allow(unused_variables)]
    let categories = RwSignal::new(Resource::<Vec<Category>>::new());
    #[allow(unused_variables)]
    let (saving, setSaving) = signal(false);
    #[allow(unused_variables)]
    let (uploading, setUploading) = signal(false);
    #[allow(unused_variables)]
    let (formError, setFormError) = signal(Option::<String>::None);
    let (newCategory, setNewCategory) = signal(String::new());
    #[allow(unused_variables)]
    let (assetBase, setAssetBase) = signal(String::new());
    let fileInput = NodeRef::<leptos::html::Input>::new();
    #[allow(unused_variables)]
    let toasts = use_toasts();
    #[allow(unused_variables)]
    let navigate = use_navigate();

    #[cfg(feature = "hydrate")]
    {
        use crate::client::connect;
        use wasm_bindgen_futures::spawn_local;

        spawn_local(async move {
            let Some(ticket) = categories.try_update(|r| r.begin()) else {
                return;
            };
            let result = match connect().await {
                Ok(api) => {
                    setAssetBase.try_set(api.client().base().to_string());
                    api.list_categories().await
                }
                Err(e) => Err(e),
            };
            categories.try_update(|r| r.settle(ticket, result));
        });

        if let EditTarget::Existing(id) = target {
            spawn_local(async move {
                let Some(ticket) = source.try_update(|r| r.begin()) else {
                    return;
                };
                let result = match connect().await {
                    Ok(api) => api.post_by_id(id).await,
                    Err(e) => Err(e),
                };
                let result = result.map(|post| {
                    draft.try_set(PostDraft::from_post(&post));
                });
                source.try_update(|r| r.settle(ticket, result));
            });
        }
    }

    let handleUpload = move |_| {
        #[cfg(feature = "hydrate")]
        {
            use crate::client::{connect, read_picked_file};
            use quill_client::draft::upload_picked;
            use wasm_bindgen_futures::spawn_local;

            let Some(input) = fileInput.get() else {
                return;
            };
            spawn_local(async move {
                setUploading.try_set(true);
                let result = async {
                    let api = connect().await?;
                    let upload = read_picked_file(&input).await?;
                    upload_picked(&api, upload).await
                }
                .await;
                setUploading.try_set(false);

                match result {
                    Ok(Some(path)) => {
                        draft.try_update(|d| d.attach(path));
                        if let Some(t) = toasts {
                            t.success("Image uploaded");
                        }
                    }
                    Ok(None) => {}
                    Err(e) => {
                        if let Some(t) = toasts {
                            t.error(format!("Upload failed: {}", e.user_message()));
                        }
                    }
                }
            });
        }
    };

    let handleAddCategory = move |_| {
        let name = newCategory.get_untracked().trim().to_string();
        if name.is_empty() {
            return;
        }
        #[cfg(feature = "hydrate")]
        {
            use crate::client::connect;
            use wasm_bindgen_futures::spawn_local;

            spawn_local(async move {
                let result = match connect().await {
                    Ok(api) => api.create_category(&name).await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(category) => {
                        let id = category.id;
                        categories.try_update(|r| {
                            let mut list = r.state().loaded().cloned().unwrap_or_default();
                            list.push(category);
                            let ticket = r.begin();
                            r.settle(ticket, Ok(list));
                        });
                        draft.try_update(|d| d.category_id = Some(id));
                        setNewCategory.try_set(String::new());
                    }
                    Err(e) => {
                        if let Some(t) = toasts {
                            t.error(format!("Could not add category: {}", e.user_message()));
                        }
                    }
                }
            });
        }
    };

    let handleSubmit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let current = draft.get_untracked();
        if let Err(e) = current.validate() {
            setFormError.set(Some(e.user_message()));
            return;
        }
        setFormError.set(None);

        #[cfg(feature = "hydrate")]
        {
            use crate::client::connect;
            use leptos_router::NavigateOptions;
            use quill_client::draft::save_post;
            use wasm_bindgen_futures::spawn_local;

            let navigate = navigate.clone();
            setSaving.set(true);
            spawn_local(async move {
                let result = match connect().await {
                    Ok(api) => save_post(&api, target, &current).await,
                    Err(e) => Err(e),
                };
                setSaving.try_set(false);

                match result {
                    Ok(outcome) => {
                        if let Some(t) = toasts {
                            t.success("Post saved");
                        }
                        navigate(outcome.redirect_to, NavigateOptions::default());
                    }
                    Err(e) => {
                        setFormError.try_set(Some(e.user_message()));
                        if let Some(t) = toasts {
                            t.error(format!("Save failed: {}", e.user_message()));
                        }
                    }
                }
            });
        }
    };

    let categoryOptions = move || {
        let selected = draft.with(|d| d.category_id);
        categories
            .with(|r| r.state().loaded().cloned().unwrap_or_default())
            .into_iter()
            .map(|c| {
                let isSelected = selected == Some(c.id);
                view! {
                    <option value=c.id.to_string() selected=isSelected>
                        {c.name}
                    </option>
                }
            })
            .collect_view()
    };

    let imagePreview = move || {
        let base = assetBase.get();
        let path = draft.with(|d| d.image_path.clone())?;
        let src = preview_src(&base, &path)?;
        Some(view! {
            <div class="image-preview">
                <img src=src alt="" />
                <code>{path}</code>
            </div>
        })
    };

    view! {
        {move || match source.with(|r| r.state().clone()) {
            ResourceState::Idle | ResourceState::Loading => {
                view! {
                    <div class="loading">
                        <div class="spinner"></div>
                        "Loading post..."
                    </div>
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
            ResourceState::Loaded(()) => {
                view! {
                    <form class="card editor" on:submit=handleSubmit.clone()>
                        <label>
                            "Title"
                            <input
                                type="text"
                                required
                                prop:value=move || draft.with(|d| d.title.clone())
                                on:input=move |ev| {
                                    draft.update(|d| d.title = event_target_value(&ev))
                                }
                            />
                        </label>
                        <label>
                            "Content"
                            <textarea
                                rows="14"
                                required
                                prop:value=move || draft.with(|d| d.content.clone())
                                on:input=move |ev| {
                                    draft.update(|d| d.content = event_target_value(&ev))
                                }
                            ></textarea>
                        </label>
                        <label>
                            "Category"
                            <select on:change=move |ev| {
                                draft.update(|d| d.category_id = parse_category(&event_target_value(&ev)))
                            }>
                                <option value="" selected=move || draft.with(|d| d.category_id.is_none())>
                                    "None"
                                </option>
                                {categoryOptions}
                            </select>
                        </label>
                        <div class="inline-row">
                            <input
                                type="text"
                                placeholder="New category"
                                prop:value=move || newCategory.get()
                                on:input=move |ev| setNewCategory.set(event_target_value(&ev))
                            />
                            <button type="button" class="btn btn-ghost btn-sm" on:click=handleAddCategory>
                                "Add"
                            </button>
                        </div>
                        <div class="inline-row">
                            <input type="file" accept="image/*" node_ref=fileInput />
                            <button
                                type="button"
                                class="btn btn-outline btn-sm"
                                disabled=move || uploading.get()
                                on:click=handleUpload
                            >
                                {move || if uploading.get() { "Uploading..." } else { "Upload" }}
                            </button>
                        </div>
                        {imagePreview}
                        {move || formError.get().map(|e| view! { <p class="error-text">{e}</p> })}
                        <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                            {move || if saving.get() { "Saving..." } else { "Save" }}
                        </button>
                    </form>
                }
                    .into_any()
            }
        }}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_select_values() {
        assert_eq!(parse_category("7"), Some(7));
        assert_eq!(parse_category(""), None);
        assert_eq!(parse_category("none"), None);
    }

    #[test]
    fn preview_waits_for_the_api_origin() {
        assert_eq!(preview_src("", "/uploads/a.png"), None);
        assert_eq!(preview_src("http://localhost:4000", ""), None);
        assert_eq!(
            preview_src("http://localhost:4000/", "/uploads/a.png").as_deref(),
            Some("http://localhost:4000/uploads/a.png")
        );
    }
}
