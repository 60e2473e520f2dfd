use twig_client::Intent;
use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct SearchBarProps {
    pub search: String,
    pub on_intent: Callback<Intent>,
}

#[function_component(SearchBar)]
pub fn search_bar(p: &SearchBarProps) -> Html {
    let on_submit = {
        let search = p.search.clone();
        p.on_intent.reform(move |_| Intent::Search(search.clone()))
    };
    html! {
        <div class="input-group mb-3">
            <input
                type="text"
                class="form-control"
                placeholder="Search comments"
                aria-label="Search comments"
                value={ p.search.clone() }
                oninput={ p.on_intent.reform(|e: InputEvent| {
                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                    Intent::EditSearch(input.value())
                }) }
                onkeyup={ {
                    let search = p.search.clone();
                    let cb = p.on_intent.filter_reform(move |e: KeyboardEvent| {
                        (e.key() == "Enter").then(|| Intent::Search(search.clone()))
                    });
                    Callback::from(move |e: KeyboardEvent| { cb.emit(e); })
                } }
            />
            <button
                type="button"
                class="btn btn-outline-secondary bi-btn bi-search"
                title="Search"
                onclick={ on_submit }
            >
                { "Search" }
            </button>
        </div>
    }
}
