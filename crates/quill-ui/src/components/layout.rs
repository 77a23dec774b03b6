use leptos::prelude::*;

use crate::components::nav::Nav;

/// Page frame: nav bar above the routed content.
#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="app-layout">
            <Nav />
            <main class="main-content">{children()}</main>
        </div>
    }
}
