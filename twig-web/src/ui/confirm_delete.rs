use twig_client::{api::CommentId, Intent};
use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct ConfirmDeleteProps {
    pub pending: Option<CommentId>,
    pub on_intent: Callback<Intent>,
}

#[function_component(ConfirmDelete)]
pub fn confirm_delete(p: &ConfirmDeleteProps) -> Html {
    let id = match p.pending {
        Some(id) => id,
        None => return html! {},
    };
    html! {
        <div class="confirm-delete alert alert-warning d-flex align-items-center">
            <div class="me-auto">
                { format!("Delete comment #{id} and all its replies?") }
            </div>
            <button
                type="button"
                class="btn btn-danger btn-sm ms-2"
                onclick={ p.on_intent.reform(|_| Intent::ConfirmDelete) }
            >
                { "Delete" }
            </button>
            <button
                type="button"
                class="btn btn-secondary btn-sm ms-2"
                onclick={ p.on_intent.reform(|_| Intent::CancelDelete) }
            >
                { "Cancel" }
            </button>
        </div>
    }
}
