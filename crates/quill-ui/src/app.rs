use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{
    components::{Route, Router, Routes},
    ParamSegment, StaticSegment,
};

use crate::components::layout::Layout;
use crate::components::toast::ToastProvider;
use crate::pages::callback::AuthCallbackPage;
use crate::pages::editor::{EditPostPage, NewPostPage};
use crate::pages::post::PostPage;
use crate::pages::posts::PostsPage;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <link rel="icon" href="/favicon.svg" type="image/svg+xml" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/quill-console.css" />
        <Title text="Quill" />
        <ToastProvider>
            <Router>
                <Routes fallback=|| {
                    view! {
                        <Layout>
                            <p>"Page not found."</p>
                        </Layout>
                    }
                        .into_any()
                }>
                    <Route path=StaticSegment("") view=PostsView />
                    <Route path=(StaticSegment("post"), ParamSegment("slug")) view=PostView />
                    <Route path=(StaticSegment("admin"), StaticSegment("new")) view=NewPostView />
                    <Route path=(StaticSegment("admin"), ParamSegment("id")) view=EditPostView />
                    <Route path=(StaticSegment("auth"), StaticSegment("callback")) view=AuthCallbackPage />
                </Routes>
            </Router>
        </ToastProvider>
    }
}

#[component]
fn PostsView() -> impl IntoView {
    view! {
        <Layout>
            <PostsPage />
        </Layout>
    }
}

#[component]
fn PostView() -> impl IntoView {
    view! {
        <Layout>
            <PostPage />
        </Layout>
    }
}

#[component]
fn NewPostView() -> impl IntoView {
    view! {
        <Layout>
            <NewPostPage />
        </Layout>
    }
}

#[component]
fn EditPostView() -> impl IntoView {
    view! {
        <Layout>
            <EditPostPage />
        </Layout>
    }
}
