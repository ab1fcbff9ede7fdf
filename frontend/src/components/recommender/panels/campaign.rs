//! Form that sends the reward emails for a trained model.

use common::jobs::campaign::CampaignState;
use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

use crate::components::recommender::helpers::format_count;
use crate::components::recommender::messages::Msg;
use crate::components::recommender::state::RecommenderComponent;

pub fn campaign_panel(component: &RecommenderComponent, link: &Scope<RecommenderComponent>) -> Html {
    let sending = component.campaign.is_sending();
    let oninput = link.callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::SetCampaignModelId(input.value())
    });

    let status = match component.campaign.state() {
        CampaignState::Idle => html! {},
        CampaignState::Sending => html! { <span class="status info">{ "Sending..." }</span> },
        CampaignState::Sent(count) => html! {
            <span class="status success">{ format!("{} email(s) sent", format_count(*count)) }</span>
        },
        CampaignState::Failed(message) => html! {
            <span class="status error">{ message.clone() }</span>
        },
    };

    html! {
        <section class="campaign-panel">
            <h2>{ "Email campaign" }</h2>
            <div class="campaign-form">
                <input
                    type="text"
                    placeholder="Model ID"
                    value={component.campaign_model_id.clone()}
                    disabled={sending}
                    {oninput}
                />
                <button
                    class="icon-btn primary"
                    disabled={sending || component.campaign_model_id.trim().is_empty()}
                    onclick={link.callback(|_| Msg::SendCampaign)}
                >
                    <i class="material-icons">{ "send" }</i>
                    <span class="icon-label">{ "Send rewards" }</span>
                </button>
            </div>
            { status }
        </section>
    }
}
