use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct ErrorBannerProps {
    pub error: Option<String>,
    pub notice: Option<String>,
}

#[function_component(ErrorBanner)]
pub fn error_banner(p: &ErrorBannerProps) -> Html {
    html! {
        <>
            <div
                class={ classes!(
                    "error-banner", "alert", "alert-danger",
                    p.error.is_none().then(|| "d-none")
                ) }
                role="alert"
                aria-hidden={ if p.error.is_some() { "false" } else { "true" } }
            >
                { p.error.clone().unwrap_or_default() }
            </div>
            { for p.notice.iter().map(|n| html! {
                <div class="notice alert alert-info">{ n }</div>
            }) }
        </>
    }
}
