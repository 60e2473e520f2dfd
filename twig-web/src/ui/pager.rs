use twig_client::{Intent, Pager};
use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct PageSelectorProps {
    pub pager: Pager,
    pub on_intent: Callback<Intent>,
}

#[function_component(PageSelector)]
pub fn page_selector(p: &PageSelectorProps) -> Html {
    let buttons = p.pager.buttons.iter().map(|page| {
        let page = *page;
        let is_current = (page == p.pager.current).then(|| "active");
        html! {
            <li class={ classes!("page-item", is_current) }>
                <button
                    type="button"
                    class="page-link"
                    onclick={ p.on_intent.reform(move |_| Intent::LoadPage(page)) }
                >
                    { page }
                </button>
            </li>
        }
    });
    html! {
        <nav aria-label="Pages">
            <ul class="pagination mt-3">
                { for buttons }
            </ul>
        </nav>
    }
}
