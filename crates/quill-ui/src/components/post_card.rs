use leptos::prelude::*;
use quill_client::asset_url;
use quill_types::Post;

#[component]
pub fn PostCard<F>(post: Post, asset_base: String, on_delete: F, is_deleting: bool) -> impl IntoView
where
    F: Fn(i64) + Clone + 'static,
{
    let postId = post.id;
    let categoryName = post.category_name().unwrap_or_default().to_string();
    let image = post
        .image_path
        .as_deref()
        .filter(|p| !p.is_empty() && !asset_base.is_empty())
        .map(|p| asset_url(&asset_base, p));

    view! {
        <div class="post-card card">
            {image.map(|src| view! { <img class="post-card-image" src=src alt="" /> })}
            <h3>{post.title.clone()}</h3>
            <p class="post-category">{categoryName}</p>
            <div class="post-actions">
                <a href=format!("/post/{}", post.slug)>"Read \u{2192}"</a>
                <a href=format!("/admin/{postId}")>"Edit"</a>
                <button
                    class="btn btn-danger btn-sm"
                    disabled=is_deleting
                    on:click=move |_| on_delete(postId)
                >
                    {if is_deleting { "Deleting..." } else { "Delete" }}
                </button>
            </div>
        </div>
    }
}
