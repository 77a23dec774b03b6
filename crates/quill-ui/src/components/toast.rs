use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub enum ToastLevel {
    Success,
    Error,
    Info,
}

#[derive(Clone, Debug)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub level: ToastLevel,
}

#[derive(Clone, Copy)]
pub struct ToastContext {
    toasts: RwSignal<Vec<Toast>>,
    next_id: RwSignal<u64>,
}

impl ToastContext {
    pub fn push(&self, message: String, level: ToastLevel) {
        let currentId = self.next_id.get_untracked();
        self.next_id.set(currentId + 1);

        self.toasts.update(|toasts| {
            toasts.push(Toast {
                id: currentId,
                message,
                level,
            });
        });

        let toasts = self.toasts;
        set_timeout(
            move || {
                toasts.try_update(|toasts| toasts.retain(|t| t.id != currentId));
            },
            std::time::Duration::from_secs(5),
        );
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(message.into(), ToastLevel::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(message.into(), ToastLevel::Error);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(message.into(), ToastLevel::Info);
    }
}

/// Toasts are optional; pages outside a provider simply don't show them.
pub fn use_toasts() -> Option<ToastContext> {
    use_context::<ToastContext>()
}

#[component]
pub fn ToastProvider(children: Children) -> impl IntoView {
    let ctx = ToastContext {
        toasts: RwSignal::new(Vec::new()),
        next_id: RwSignal::new(0),
    };
    provide_context(ctx);

    let toasts = ctx.toasts;

    view! {
        {children()}
        <div class="toast-container">
            <For
                each=move || toasts.get()
                key=|toast| toast.id
                let:toast
            >
                <div class=move || {
                    let levelClass = match toast.level {
                        ToastLevel::Success => "toast-success",
                        ToastLevel::Error => "toast-error",
                        ToastLevel::Info => "toast-info",
                    };
                    format!("toast {levelClass}")
                }>
                    {toast.message.clone()}
                </div>
            </For>
        </div>
    }
}
