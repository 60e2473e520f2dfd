use twig_client::{api::CommentId, Intent};
use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct ComposerProps {
    pub content: String,
    pub reply_target: Option<CommentId>,
    pub on_intent: Callback<Intent>,
}

#[function_component(Composer)]
pub fn composer(p: &ComposerProps) -> Html {
    let reply_target = match p.reply_target {
        None => html! {},
        Some(id) => html! {
            <div class="reply-target input-group input-group-sm mb-2">
                <span class="input-group-text">{ "Reply to" }</span>
                <input
                    type="text"
                    class="form-control"
                    readonly=true
                    value={ id.to_string() }
                />
                <button
                    type="button"
                    class="btn btn-outline-secondary"
                    title="Post as a new thread instead"
                    onclick={ p.on_intent.reform(|_| Intent::ClearReplyTarget) }
                >
                    { "Clear" }
                </button>
            </div>
        },
    };
    html! {
        <div class="composer mb-3">
            { reply_target }
            <textarea
                class="form-control mb-2"
                rows="3"
                placeholder="Write a comment"
                value={ p.content.clone() }
                oninput={ p.on_intent.reform(|e: InputEvent| {
                    let input: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
                    Intent::EditContent(input.value())
                }) }
            />
            <button
                type="button"
                class="btn btn-primary"
                onclick={ p.on_intent.reform(|_| Intent::Create) }
            >
                { "Post" }
            </button>
        </div>
    }
}
