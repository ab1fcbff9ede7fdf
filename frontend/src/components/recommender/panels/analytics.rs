//! Read-only rendering of the analytics block of an upload.

use common::model::analytics::{Analytics, TopProduct, NOT_AVAILABLE};
use common::model::category::Category;
use yew::prelude::*;

use crate::components::recommender::helpers::format_count;

const COUNTERS: [(&str, &str); 5] = [
    ("Customers", "total_customers"),
    ("Active users", "unique_users"),
    ("Purchases", "total_purchases"),
    ("Repeat customers", "repeat_customers"),
    ("Ratings given", "total_ratings_given"),
];

pub fn analytics_panel(analytics: &Analytics) -> Html {
    if let Some(error) = analytics.error() {
        return html! {
            <section class="analytics-panel">
                <h2>{ "Analytics" }</h2>
                <div class="status error">{ error.to_string() }</div>
            </section>
        };
    }
    if !analytics.has_content() {
        return html! {};
    }

    html! {
        <section class="analytics-panel">
            <h2>{ "Analytics" }</h2>
            <div class="data-loaded">
                { for Category::ALL.iter().map(|category| {
                    let loaded = analytics.data_loaded(*category);
                    html! {
                        <span class={classes!("chip", loaded.then_some("loaded"))}>
                            { format!("{} {}", category.label(), if loaded { "✓" } else { "✗" }) }
                        </span>
                    }
                }) }
            </div>
            <div class="metric-grid">
                { for COUNTERS.iter().map(|(label, key)| metric_card(label, count_text(analytics, key))) }
                { metric_card("Purchases per user", analytics.metric_text("average_purchases_per_user")) }
                { metric_card("Retention rate", analytics.percent_text("retention_rate_percentage")) }
                { metric_card("Average rating", analytics.metric_text("average_rating_overall")) }
            </div>
            { rating_distribution(analytics) }
            <div class="top-products">
                { top_product_card("Best seller", analytics.top_sold_product()) }
                { top_product_card("Best rated", analytics.top_rated_product()) }
            </div>
        </section>
    }
}

fn count_text(analytics: &Analytics, key: &str) -> String {
    match analytics.stat_u64(key) {
        Some(count) if count > 0 => format_count(count),
        _ => analytics.metric_text(key),
    }
}

fn metric_card(label: &str, value: String) -> Html {
    html! {
        <div class="metric-card">
            <span class="metric-value">{ value }</span>
            <span class="metric-label">{ label.to_string() }</span>
        </div>
    }
}

fn rating_distribution(analytics: &Analytics) -> Html {
    let bars = analytics.rating_bars();
    if bars.is_empty() {
        return html! {};
    }

    html! {
        <div class="rating-distribution">
            <h3>{ "Rating distribution" }</h3>
            { for bars.iter().map(|bar| {
                let width = format!("width: {}%;", bar.percent_of_max);
                html! {
                    <div class="rating-row">
                        <span class="rating-key">{ format!("{} ★", bar.rating) }</span>
                        <span class="rating-bar" style={width}></span>
                        <span class="rating-count">{ format_count(bar.count) }</span>
                    </div>
                }
            }) }
        </div>
    }
}

fn top_product_card(title: &str, product: Option<TopProduct>) -> Html {
    let Some(product) = product else {
        return html! {
            <div class="top-product">
                <h3>{ title.to_string() }</h3>
                <p>{ NOT_AVAILABLE }</p>
            </div>
        };
    };

    let or_na = |value: Option<String>| value.unwrap_or_else(|| NOT_AVAILABLE.to_string());
    html! {
        <div class="top-product">
            <h3>{ title.to_string() }</h3>
            <p class="product-id">{ product.product_id.clone() }</p>
            <dl>
                <dt>{ "Category" }</dt>
                <dd>{ or_na(product.category.clone()) }</dd>
                <dt>{ "Price" }</dt>
                <dd>{ or_na(product.price.map(|p| format!("${:.2}", p))) }</dd>
                <dt>{ "Purchases" }</dt>
                <dd>{ or_na(product.total_purchases.map(format_count)) }</dd>
                <dt>{ "Rating" }</dt>
                <dd>
                    {
                        or_na(product.average_rating.map(|r| match product.rating_count {
                            Some(n) => format!("{:.1} ({} ratings)", r, format_count(n)),
                            None => format!("{:.1}", r),
                        }))
                    }
                </dd>
            </dl>
        </div>
    }
}
