//! Recommendation list with its summary counters and export buttons.

use common::model::recommendation::{RecommendationMap, RecommendationSummary};
use common::model::reward::parse_reward;
use yew::html::Scope;
use yew::prelude::*;

use crate::components::recommender::helpers::format_count;
use crate::components::recommender::messages::Msg;
use crate::components::recommender::state::RecommenderComponent;

pub fn recommendations_panel(map: &RecommendationMap, link: &Scope<RecommenderComponent>) -> Html {
    let summary = RecommendationSummary::of(map);

    html! {
        <section class="recommendations-panel">
            <div class="panel-header">
                <h2>{ "Recommended rewards" }</h2>
                <div class="export-actions">
                    <button class="icon-btn" disabled={map.is_empty()} onclick={link.callback(|_| Msg::ExportJson)}>
                        <i class="material-icons">{ "data_object" }</i>
                        <span class="icon-label">{ "JSON" }</span>
                    </button>
                    <button class="icon-btn" disabled={map.is_empty()} onclick={link.callback(|_| Msg::ExportCsv)}>
                        <i class="material-icons">{ "table_chart" }</i>
                        <span class="icon-label">{ "CSV" }</span>
                    </button>
                </div>
            </div>
            <p class="summary">
                { format!(
                    "{} customers, {} with email, {} rewards",
                    format_count(summary.total_customers as u64),
                    format_count(summary.customers_with_email as u64),
                    format_count(summary.total_rewards as u64),
                ) }
            </p>
            {
                if map.is_empty() {
                    html! { <p class="empty">{ "No recommendations were produced." }</p> }
                } else {
                    html! {
                        <table class="recommendations">
                            <thead>
                                <tr>
                                    <th>{ "Customer" }</th>
                                    <th>{ "Email" }</th>
                                    <th>{ "Reward" }</th>
                                    <th>{ "Discount" }</th>
                                    <th>{ "Product" }</th>
                                    <th>{ "Code" }</th>
                                </tr>
                            </thead>
                            <tbody>
                                { for map.iter().flat_map(|(customer_id, customer)| {
                                    customer.rewards.iter().map(move |reward| {
                                        let parsed = parse_reward(reward);
                                        html! {
                                            <tr>
                                                <td>{ customer_id.clone() }</td>
                                                <td class={classes!((!customer.has_email()).then_some("missing"))}>
                                                    { customer.email.clone() }
                                                </td>
                                                <td>{ reward.clone() }</td>
                                                <td>{ format!("{}%", parsed.discount_percent) }</td>
                                                <td>{ parsed.product_id }</td>
                                                <td><code>{ parsed.redemption_code }</code></td>
                                            </tr>
                                        }
                                    })
                                }) }
                            </tbody>
                        </table>
                    }
                }
            }
        </section>
    }
}
