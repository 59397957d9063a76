use leptos::prelude::*;

/// Spinner size options
#[derive(Clone, Copy, PartialEq)]
pub enum SpinnerSize {
    Small,
    Medium,
    Large,
}

impl SpinnerSize {
    fn class(&self) -> &'static str {
        match self {
            SpinnerSize::Small => "h-4 w-4 border-2",
            SpinnerSize::Medium => "h-8 w-8 border-4",
            SpinnerSize::Large => "h-12 w-12 border-4",
        }
    }
}

/// Loading spinner component
#[component]
pub fn Spinner(
    /// Spinner size
    #[prop(default = SpinnerSize::Medium)]
    size: SpinnerSize,
    /// Optional label text
    #[prop(default = String::new())]
    label: String,
    /// Whether to center the spinner in the viewport
    #[prop(default = false)]
    centered: bool,
) -> impl IntoView {
    let ring_class = format!(
        "{} animate-spin rounded-full border-blue-600 border-t-transparent",
        size.class()
    );
    let container_class = if centered {
        "min-h-[50vh] flex flex-col items-center justify-center gap-3"
    } else {
        "inline-flex items-center gap-2"
    };

    view! {
        <div class=container_class>
            <div class=ring_class role="status" aria-live="polite">
                <span class="sr-only">"Loading..."</span>
            </div>
            {(!label.is_empty()).then(|| view! {
                <p class="text-sm text-gray-600">{label.clone()}</p>
            })}
        </div>
    }
}

/// Page-level spinner shown while the session is being checked
#[component]
pub fn LoadingSpinner(
    /// Optional loading message
    #[prop(default = String::new())]
    message: String,
) -> impl IntoView {
    view! { <Spinner size=SpinnerSize::Large label=message centered=true /> }
}

/// Inline spinner for buttons
#[component]
pub fn InlineSpinner() -> impl IntoView {
    view! { <Spinner size=SpinnerSize::Small /> }
}
