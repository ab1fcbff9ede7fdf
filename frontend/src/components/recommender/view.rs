//! View rendering for the recommender page.
//!
//! Top to bottom: one file picker per dataset, the upload controls with the
//! current status, then (after a successful upload) the analytics, the
//! recommendation list with its exports and the campaign form.

use common::config::TransportKind;
use common::model::category::Category;
use common::model::upload::{DebugInfo, UploadState};
use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::panels::{analytics_panel, campaign_panel, recommendations_panel};
use super::state::RecommenderComponent;

pub fn view(component: &RecommenderComponent, ctx: &Context<RecommenderComponent>) -> Html {
    let link = ctx.link();

    html! {
        <div class="recommender-root">
            <h1>{ "Loyalty rewards" }</h1>
            { build_upload_section(component, link) }
            { build_status(component.orchestrator.state()) }
            {
                if let Some(success) = component.orchestrator.success() {
                    html! {
                        <>
                            { success.analytics.as_ref().map(analytics_panel).unwrap_or_default() }
                            { recommendations_panel(&success.recommendations, link) }
                        </>
                    }
                } else {
                    html! {}
                }
            }
            { campaign_panel(component, link) }
        </div>
    }
}

fn build_upload_section(component: &RecommenderComponent, link: &Scope<RecommenderComponent>) -> Html {
    let in_flight = component.orchestrator.is_in_flight();
    let can_submit = component.orchestrator.can_submit(component.intake.files());
    let mode = match component.config().transport {
        TransportKind::Json => "JSON",
        TransportKind::Multipart => "multipart",
    };

    html! {
        <section class="upload-section">
            <div class="file-pickers">
                { for Category::ALL.iter().map(|category| file_picker(component, link, *category)) }
            </div>
            <div class="upload-actions">
                <button
                    class="icon-btn primary"
                    disabled={!can_submit}
                    onclick={link.callback(|_| Msg::Submit)}
                >
                    <i class="material-icons">{ "cloud_upload" }</i>
                    <span class="icon-label">
                        { if in_flight { "Uploading..." } else { "Upload & analyze" } }
                    </span>
                </button>
                <button
                    class="icon-btn"
                    disabled={in_flight}
                    onclick={link.callback(|_| Msg::Reset)}
                >
                    <i class="material-icons">{ "restart_alt" }</i>
                    <span class="icon-label">{ "Reset" }</span>
                </button>
                <span class="upload-mode">{ format!("Sending as {}", mode) }</span>
            </div>
        </section>
    }
}

fn file_picker(
    component: &RecommenderComponent,
    link: &Scope<RecommenderComponent>,
    category: Category,
) -> Html {
    let onchange = link.batch_callback(move |e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        input
            .files()
            .and_then(|files| files.get(0))
            .map(|file| Msg::FileChosen(category, file))
    });

    let status = if component.intake.is_reading(category) {
        html! { <span class="file-status reading">{ "Reading..." }</span> }
    } else if let Some(err) = component.intake.error(category) {
        html! { <span class="file-status error">{ err.message.clone() }</span> }
    } else if let Some(file) = component.intake.files().get(category) {
        html! { <span class="file-status ready">{ format!("✓ {}", file.name) }</span> }
    } else {
        html! { <span class="file-status">{ "No file chosen" }</span> }
    };

    html! {
        <label class="file-picker">
            <span class="file-label">{ format!("{} CSV", category.label()) }</span>
            <input
                type="file"
                accept=".csv,text/csv"
                ref={component.file_input_ref(category).clone()}
                disabled={component.orchestrator.is_in_flight()}
                {onchange}
            />
            { status }
        </label>
    }
}

fn build_status(state: &UploadState) -> Html {
    match state {
        UploadState::Idle => html! {},
        UploadState::InFlight => html! {
            <div class="status info">{ "Training the model, this can take a moment..." }</div>
        },
        UploadState::Failed(message) => html! {
            <div class="status error">{ format!("Error: {}", message) }</div>
        },
        UploadState::Succeeded(success) => html! {
            <div class="status success">
                <p>{ success.message.clone() }</p>
                { success.debug_info.as_ref().map(debug_details).unwrap_or_default() }
            </div>
        },
    }
}

/// Columns the backend detected per dataset.
fn debug_details(info: &DebugInfo) -> Html {
    html! {
        <details class="debug-info">
            <summary>{ "Detected columns" }</summary>
            <ul>
                {
                    for Category::ALL.iter().filter_map(|category| {
                        info.headers(*category).map(|headers| html! {
                            <li>
                                <strong>{ format!("{}: ", category.label()) }</strong>
                                { headers.join(", ") }
                            </li>
                        })
                    })
                }
            </ul>
            {
                info.columns_auto_created.as_ref().map(|note| html! {
                    <p class="note">{ note.clone() }</p>
                }).unwrap_or_default()
            }
        </details>
    }
}
