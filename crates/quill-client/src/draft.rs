use quill_types::{Post, PostInput};
use tracing::info;

use crate::api::{BlogApi, Upload};
use crate::callback::HOME_ROUTE;
use crate::error::ClientError;

/// Which post an editor form writes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditTarget {
    New,
    Existing(i64),
}

impl EditTarget {
    /// Parses the `:id` route segment of the edit page.
    pub fn from_route_id(raw: &str) -> Result<Self, ClientError> {
        raw.trim()
            .parse::<i64>()
            .map(EditTarget::Existing)
            .map_err(|_| ClientError::Invalid(format!("invalid post id {raw:?}")))
    }
}

/// Editor form contents before they are sent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub image_path: Option<String>,
    pub category_id: Option<i64>,
}

impl PostDraft {
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
            image_path: post.image_path.clone(),
            category_id: post
                .category_id
                .or_else(|| post.category.as_ref().map(|c| c.id)),
        }
    }

    /// Title and content must not be blank. Both are sent exactly as typed.
    pub fn validate(&self) -> Result<PostInput, ClientError> {
        if self.title.trim().is_empty() {
            return Err(ClientError::Invalid("title is required".into()));
        }
        if self.content.trim().is_empty() {
            return Err(ClientError::Invalid("content is required".into()));
        }
        Ok(PostInput {
            title: self.title.clone(),
            content: self.content.clone(),
            image_path: self.image_path.clone().filter(|p| !p.is_empty()),
            category_id: self.category_id,
        })
    }

    /// Points the draft at an uploaded image, leaving every other field as
    /// it is now.
    pub fn attach(&mut self, path: String) {
        self.image_path = Some(path);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveOutcome {
    pub id: i64,
    pub redirect_to: &'static str,
}

/// Creates or updates the post behind `target`, then points the editor home.
pub async fn save_post(
    api: &BlogApi,
    target: EditTarget,
    draft: &PostDraft,
) -> Result<SaveOutcome, ClientError> {
    let input = draft.validate()?;
    let id = match target {
        EditTarget::New => {
            let created = api.create_post(&input).await?;
            info!("created post {} ({})", created.id, created.slug);
            created.id
        }
        EditTarget::Existing(id) => {
            api.update_post(id, &input).await?;
            info!("updated post {id}");
            id
        }
    };
    Ok(SaveOutcome {
        id,
        redirect_to: HOME_ROUTE,
    })
}

/// Uploads the picked image and returns its stored path. No file, no request.
///
/// The draft is not touched here: the form may change while the upload is in
/// flight, so callers apply the path with [`PostDraft::attach`] afterwards.
pub async fn upload_picked(
    api: &BlogApi,
    upload: Option<Upload>,
) -> Result<Option<String>, ClientError> {
    let Some(upload) = upload else {
        return Ok(None);
    };
    let uploaded = api.upload_image(upload).await?;
    info!("uploaded image to {}", uploaded.path);
    Ok(Some(uploaded.path))
}
