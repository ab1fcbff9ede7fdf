//! Recommender page: root module wiring the Yew `Component` implementation
//! with submodules for state, update logic, view rendering, and helpers.
//!
//! Responsibilities
//! - Re-export selected types (`Msg`, `RecommenderProps`, `RecommenderComponent`).
//! - Provide the `Component` implementation that delegates to `update::update` and `view::view`.
//! - Pick the configuration once at creation: the `config` prop when given,
//!   otherwise the build-time configuration.

use yew::prelude::*;

mod helpers;
mod messages;
mod panels;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::RecommenderProps;
pub use state::RecommenderComponent;

impl Component for RecommenderComponent {
    type Message = Msg;
    type Properties = RecommenderProps;

    fn create(ctx: &Context<Self>) -> Self {
        let config = ctx
            .props()
            .config
            .clone()
            .unwrap_or_else(crate::config::load);
        RecommenderComponent::new(config)
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
