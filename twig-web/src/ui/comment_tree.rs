use twig_client::{
    render::{INDENT_UNIT, NO_COMMENTS},
    Fragment, Intent, Node, Trigger,
};
use yew::prelude::*;

use crate::util;

#[derive(Clone, PartialEq, Properties)]
pub struct CommentTreeProps {
    pub tree: Fragment,
    pub on_intent: Callback<Intent>,
}

#[function_component(CommentTree)]
pub fn comment_tree(p: &CommentTreeProps) -> Html {
    match &p.tree {
        Fragment::Placeholder => html! {
            <p class="text-muted">{ NO_COMMENTS }</p>
        },
        Fragment::Nodes(nodes) => html! {
            <div class="comment-tree">
                { for nodes.iter().map(|n| comment(n, &p.on_intent)) }
            </div>
        },
    }
}

fn comment(n: &Node, on_intent: &Callback<Intent>) -> Html {
    let buttons = n.triggers.iter().map(|t| {
        let (label, class) = match t {
            Trigger::Delete(_) => ("[Delete]", "delete-btn text-danger"),
            Trigger::ReplyTo(_) => ("[Reply]", "reply-btn text-primary"),
        };
        let t = *t;
        html! {
            <button
                type="button"
                class={ classes!("btn", "btn-link", "btn-sm", "p-0", "ms-2", class) }
                onclick={ on_intent.reform(move |_| Intent::from(t)) }
            >
                { label }
            </button>
        }
    });
    let expand = {
        let id = n.id;
        on_intent.reform(move |_| Intent::ExpandReplies(id))
    };
    // blocks nest inside their parent's, so one unit per level adds up to the indent
    let margin = match n.depth {
        0 => 0,
        _ => INDENT_UNIT,
    };
    html! {
        <div class="comment" style={ format!("margin-left: {margin}ch;") }>
            <div class="comment-header">
                { for n.marker().map(|m| html! { <span class="reply-marker me-1">{ m }</span> }) }
                <a
                    href={ format!("#comment-{}", n.id) }
                    title="Show replies"
                    onclick={ expand }
                >
                    { format!("ID: {}", n.id) }
                </a>
                { format!(" | {}", util::format_date(&n.created_at)) }
                { for buttons }
            </div>
            <div class="comment-content">{ &n.content }</div>
            // empty reply lists are not worth a placeholder
            { for n.replies.nodes().iter().map(|r| comment(r, on_intent)) }
        </div>
    }
}
