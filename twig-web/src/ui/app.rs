use std::rc::Rc;

use twig_client::{api::Error, Controller, HttpGateway, Intent, Outcome, Request};
use yew::prelude::*;

use crate::{ui, util};

pub enum AppMsg {
    Intent(Intent),
    Resolved(Request, Result<Outcome, Error>),
}

pub struct App {
    gateway: Option<Rc<HttpGateway>>,
    ctl: Controller,
}

impl App {
    fn send(&mut self, ctx: &Context<Self>, req: Request) {
        let gateway = match &self.gateway {
            Some(gateway) => gateway.clone(),
            None => {
                tracing::warn!(?req, "no comment service to send request to");
                self.ctl.fail(
                    "cannot reach the comment service",
                    Error::Transport(String::from("page origin is unknown")),
                );
                return;
            }
        };
        tracing::debug!(?req, "sending request");
        ctx.link().send_future(async move {
            let res = req.send(&*gateway).await;
            AppMsg::Resolved(req, res)
        });
    }
}

impl Component for App {
    type Message = AppMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let mut app = App {
            gateway: util::origin().map(|host| Rc::new(HttpGateway::new(host))),
            ctl: Controller::new(),
        };
        let req = app.ctl.start();
        app.send(ctx, req);
        app
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let next = match msg {
            AppMsg::Intent(intent) => {
                tracing::trace!(?intent, "user intent");
                self.ctl.handle(intent)
            }
            AppMsg::Resolved(req, res) => self.ctl.resolve(&req, res),
        };
        if let Some(req) = next {
            self.send(ctx, req);
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let on_intent = ctx.link().callback(AppMsg::Intent);
        let surface = self.ctl.surface();
        let on_subtree = self.ctl.store().view().is_subtree();
        html! {
            <div class="container py-3">
                <h1 class="h3 mb-3">{ "Comments" }</h1>
                <ui::ErrorBanner
                    error={ surface.error.clone() }
                    notice={ surface.notice.clone() }
                />
                <ui::SearchBar
                    search={ surface.search.clone() }
                    on_intent={ on_intent.clone() }
                />
                <ui::Composer
                    content={ surface.content.clone() }
                    reply_target={ self.ctl.store().reply_target() }
                    on_intent={ on_intent.clone() }
                />
                <ui::ConfirmDelete
                    pending={ surface.pending_delete }
                    on_intent={ on_intent.clone() }
                />
                if on_subtree {
                    <button
                        type="button"
                        class="btn btn-link mb-2"
                        onclick={ on_intent.reform(|_| Intent::BackToRoot) }
                    >
                        { "Back to all comments" }
                    </button>
                }
                <ui::CommentTree
                    tree={ self.ctl.tree() }
                    on_intent={ on_intent.clone() }
                />
                { for self.ctl.pager().map(|pager| html! {
                    <ui::PageSelector pager={ pager } on_intent={ on_intent.clone() } />
                }) }
            </div>
        }
    }
}
