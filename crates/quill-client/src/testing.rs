//! In-process stand-in for the remote blog API.

use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::{header, HeaderMap, Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use quill_types::{Category, NewCategory, Post, PostInput, User};
use serde_json::json;

use crate::api::{ApiClient, BlogApi};
use crate::session::SessionStore;

pub const GOOD_TOKEN: &str = "good-token";

#[derive(Clone, Debug)]
pub struct SeenRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
}

#[derive(Default)]
struct Inner {
    posts: Vec<Post>,
    categories: Vec<Category>,
    nextId: i64,
    seen: Vec<SeenRequest>,
}

#[derive(Clone, Default)]
struct FakeState {
    inner: Arc<Mutex<Inner>>,
}

pub struct FakeBlog {
    base: String,
    state: FakeState,
}

impl FakeBlog {
    pub async fn start() -> Self {
        let state = FakeState::default();
        let app = Router::new()
            .route("/api/me", get(me))
            .route("/api/posts", get(list_posts).post(create_post))
            .route("/api/posts/:key", get(post_by_slug).put(update_post).delete(delete_post))
            .route("/api/post_by_id/:id", get(post_by_id))
            .route("/api/categories", get(list_categories).post(create_category))
            .route("/api/upload", post(upload))
            .route("/auth/logout", post(|| async { Json(json!({"ok": true})) }))
            .layer(middleware::from_fn_with_state(state.clone(), record))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base: format!("http://{addr}"),
            state,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn api(&self, session: SessionStore) -> BlogApi {
        BlogApi::new(ApiClient::new(&self.base).unwrap(), session)
    }

    pub fn seed_post(&self, title: &str, content: &str) -> Post {
        let mut inner = self.state.inner.lock().unwrap();
        insert_post(
            &mut inner,
            PostInput {
                title: title.into(),
                content: content.into(),
                image_path: None,
                category_id: None,
            },
        )
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.state.inner.lock().unwrap().seen.clone()
    }
}

fn insert_post(inner: &mut Inner, input: PostInput) -> Post {
    inner.nextId += 1;
    let post = Post {
        id: inner.nextId,
        slug: input.title.to_lowercase().replace(' ', "-"),
        title: input.title,
        content: input.content,
        image_path: input.image_path,
        category: None,
        category_id: input.category_id,
        author: None,
        author_id: None,
        created_at: None,
        updated_at: None,
    };
    inner.posts.insert(0, post.clone());
    post
}

async fn record(State(state): State<FakeState>, request: Request<Body>, next: Next) -> Response {
    let seen = SeenRequest {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        authorization: request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    };
    state.inner.lock().unwrap().seen.push(seen);
    next.run(request).await
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(format!("Bearer {GOOD_TOKEN}").as_str())
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "Invalid token", "detail": "Signature verification failed"})),
    )
        .into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"error": "Not found"}))).into_response()
}

async fn me(headers: HeaderMap) -> Json<serde_json::Value> {
    if !authorized(&headers) {
        return Json(json!({"authenticated": false, "error": "Invalid token"}));
    }
    let user = User {
        uid: Some(1),
        email: Some("ada@example.com".into()),
        name: Some("Ada".into()),
        role: Some("admin".into()),
        ..Default::default()
    };
    Json(json!({"authenticated": true, "user": user}))
}

async fn list_posts(State(state): State<FakeState>) -> Json<Vec<Post>> {
    Json(state.inner.lock().unwrap().posts.clone())
}

async fn post_by_slug(State(state): State<FakeState>, Path(slug): Path<String>) -> Response {
    let inner = state.inner.lock().unwrap();
    match inner.posts.iter().find(|p| p.slug == slug) {
        Some(post) => Json(post.clone()).into_response(),
        None => not_found(),
    }
}

async fn post_by_id(State(state): State<FakeState>, Path(id): Path<i64>) -> Response {
    let inner = state.inner.lock().unwrap();
    match inner.posts.iter().find(|p| p.id == id) {
        Some(post) => Json(post.clone()).into_response(),
        None => not_found(),
    }
}

async fn create_post(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Json(input): Json<PostInput>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut inner = state.inner.lock().unwrap();
    let post = insert_post(&mut inner, input);
    Json(json!({"id": post.id, "slug": post.slug})).into_response()
}

/// Applies only the keys present in the body, the way the real API does.
async fn update_post(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut inner = state.inner.lock().unwrap();
    let Some(post) = inner.posts.iter_mut().find(|p| p.id == id) else {
        return not_found();
    };
    if let Some(title) = body.get("title").and_then(|v| v.as_str()) {
        post.title = title.to_string();
    }
    if let Some(content) = body.get("content").and_then(|v| v.as_str()) {
        post.content = content.to_string();
    }
    if let Some(image) = body.get("image_path") {
        post.image_path = image.as_str().map(str::to_string);
    }
    if let Some(category) = body.get("category_id") {
        post.category_id = category.as_i64();
    }
    Json(json!({"ok": true})).into_response()
}

async fn delete_post(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut inner = state.inner.lock().unwrap();
    let before = inner.posts.len();
    inner.posts.retain(|p| p.id != id);
    if inner.posts.len() == before {
        return not_found();
    }
    Json(json!({"ok": true})).into_response()
}

async fn list_categories(State(state): State<FakeState>) -> Json<Vec<Category>> {
    Json(state.inner.lock().unwrap().categories.clone())
}

async fn create_category(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Json(body): Json<NewCategory>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut inner = state.inner.lock().unwrap();
    let category = Category {
        id: inner.categories.len() as i64 + 1,
        slug: body.name.to_lowercase(),
        name: body.name,
    };
    inner.categories.push(category.clone());
    Json(category).into_response()
}

async fn upload(headers: HeaderMap, mut multipart: Multipart) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("file") {
            let name = field.file_name().unwrap_or("upload").to_string();
            return Json(json!({"path": format!("/uploads/{name}")})).into_response();
        }
    }
    (StatusCode::BAD_REQUEST, Json(json!({"error": "No file"}))).into_response()
}
