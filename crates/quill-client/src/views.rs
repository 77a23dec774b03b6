use quill_types::User;
use tracing::{debug, info};

use crate::api::BlogApi;
use crate::error::ClientError;

pub const DELETE_PROMPT: &str = "Delete this post?";

#[derive(Clone, Debug, PartialEq)]
pub enum Identity {
    Anonymous,
    SignedIn(User),
}

impl Identity {
    pub fn user(&self) -> Option<&User> {
        match self {
            Identity::SignedIn(user) => Some(user),
            Identity::Anonymous => None,
        }
    }
}

/// Asks the user before a destructive call goes out.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutation {
    Applied,
    Cancelled,
}

/// Resolves who is signed in. A missing or rejected token is anonymous,
/// transport failures are errors.
pub async fn identity(api: &BlogApi) -> Result<Identity, ClientError> {
    let Some(me) = api.me().await? else {
        return Ok(Identity::Anonymous);
    };
    match (me.authenticated, me.user) {
        (true, Some(user)) => Ok(Identity::SignedIn(user)),
        _ => {
            if let Some(reason) = me.error {
                debug!("identity check rejected the stored token: {reason}");
            }
            Ok(Identity::Anonymous)
        }
    }
}

/// Deletes a post once `confirm` agrees. Declining issues no request.
pub async fn delete_post(
    api: &BlogApi,
    id: i64,
    confirm: &impl Confirm,
) -> Result<Mutation, ClientError> {
    if !confirm.confirm(DELETE_PROMPT) {
        return Ok(Mutation::Cancelled);
    }
    api.delete_post(id).await?;
    info!("deleted post {id}");
    Ok(Mutation::Applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::{save_post, EditTarget, PostDraft};
    use crate::resource::{Resource, ResourceState};
    use crate::session::SessionStore;
    use crate::testing::{FakeBlog, GOOD_TOKEN};
    use quill_types::Post;
    use std::cell::Cell;

    fn signed_in(fake: &FakeBlog) -> BlogApi {
        let session = SessionStore::in_memory();
        session.set_token(GOOD_TOKEN).unwrap();
        fake.api(session)
    }

    /// One pass of the list view's fetch cycle.
    async fn refresh_posts(api: &BlogApi, posts: &mut Resource<Vec<Post>>) -> bool {
        let ticket = posts.begin();
        let result = api.list_posts().await;
        posts.settle(ticket, result)
    }

    fn titles(posts: &Resource<Vec<Post>>) -> Vec<String> {
        posts
            .state()
            .loaded()
            .map(|list| list.iter().map(|p| p.title.clone()).collect())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn no_token_is_anonymous() {
        let fake = FakeBlog::start().await;
        let api = fake.api(SessionStore::in_memory());
        assert_eq!(identity(&api).await.unwrap(), Identity::Anonymous);
    }

    #[tokio::test]
    async fn rejected_token_is_anonymous() {
        let fake = FakeBlog::start().await;
        let session = SessionStore::in_memory();
        session.set_token("expired").unwrap();
        let api = fake.api(session);

        assert_eq!(identity(&api).await.unwrap(), Identity::Anonymous);
        assert_eq!(fake.requests().len(), 1);
    }

    #[tokio::test]
    async fn valid_token_is_signed_in() {
        let fake = FakeBlog::start().await;
        let api = signed_in(&fake);

        let who = identity(&api).await.unwrap();
        assert_eq!(who.user().map(|u| u.display_name()), Some("Ada"));
    }

    #[tokio::test]
    async fn declined_confirmation_issues_no_delete() {
        let fake = FakeBlog::start().await;
        let post = fake.seed_post("Keep me", "body");
        let api = signed_in(&fake);
        let asked = Cell::new(0);

        let outcome = delete_post(&api, post.id, &|prompt: &str| {
            assert_eq!(prompt, DELETE_PROMPT);
            asked.set(asked.get() + 1);
            false
        })
        .await
        .unwrap();

        assert_eq!(outcome, Mutation::Cancelled);
        assert_eq!(asked.get(), 1);
        assert!(fake.requests().iter().all(|r| r.method != "DELETE"));
    }

    #[tokio::test]
    async fn confirmation_comes_before_the_delete_request() {
        let fake = FakeBlog::start().await;
        let post = fake.seed_post("Doomed", "body");
        let api = signed_in(&fake);
        let marked = Cell::new(None);

        let outcome = delete_post(&api, post.id, &|_: &str| {
            assert!(fake.requests().iter().all(|r| r.method != "DELETE"));
            marked.set(Some(post.id));
            true
        })
        .await
        .unwrap();

        assert_eq!(outcome, Mutation::Applied);
        assert_eq!(marked.get(), Some(post.id));
        assert!(fake.requests().iter().any(|r| r.method == "DELETE"));
    }

    #[tokio::test]
    async fn list_reflects_each_mutation_after_refetch() {
        let fake = FakeBlog::start().await;
        fake.seed_post("Old", "body");
        let api = signed_in(&fake);
        let mut posts = Resource::new();

        assert!(refresh_posts(&api, &mut posts).await);
        assert_eq!(titles(&posts), vec!["Old"]);

        let draft = PostDraft {
            title: "New".into(),
            content: "body".into(),
            ..Default::default()
        };
        let created = save_post(&api, EditTarget::New, &draft).await.unwrap();
        refresh_posts(&api, &mut posts).await;
        assert_eq!(titles(&posts), vec!["New", "Old"]);

        let renamed = PostDraft {
            title: "Renamed".into(),
            ..draft
        };
        save_post(&api, EditTarget::Existing(created.id), &renamed)
            .await
            .unwrap();
        refresh_posts(&api, &mut posts).await;
        assert_eq!(titles(&posts), vec!["Renamed", "Old"]);

        let outcome = delete_post(&api, created.id, &|_: &str| true).await.unwrap();
        assert_eq!(outcome, Mutation::Applied);
        refresh_posts(&api, &mut posts).await;
        assert_eq!(titles(&posts), vec!["Old"]);
    }

    #[tokio::test]
    async fn failed_fetch_lands_in_error_state() {
        let api = BlogApi::new(
            crate::api::ApiClient::new("http://127.0.0.1:9").unwrap(),
            SessionStore::in_memory(),
        );
        let mut posts = Resource::new();

        refresh_posts(&api, &mut posts).await;
        assert!(matches!(posts.state(), ResourceState::Failed(_)));
    }
}
