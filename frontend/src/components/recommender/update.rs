//! Update function for the recommender page.
//!
//! Elm-style: receives the component state, the `Context` and a `Msg`,
//! mutates the state and returns whether the view must re-render.
//!
//! Network and file I/O run in `spawn_local` tasks that report back with a
//! follow-up message (`FileRead`, `UploadFinished`, `CampaignFinished`). The
//! decisions about whether a request may start and what its outcome means
//! live in `common`; this module only moves data between them and the DOM.

use common::config::TransportKind;
use common::export::{export_csv_with, export_json, CSV_FILE_NAME, CSV_MIME, JSON_FILE_NAME, JSON_MIME};
use common::jobs::{campaign, upload};
use common::model::category::Category;
use gloo_file::{futures::read_as_text, Blob};
use log::{error, info};
use yew::platform::spawn_local;
use yew::prelude::*;

use super::helpers::{download_text, js_error_text, show_toast};
use super::messages::Msg;
use super::state::RecommenderComponent;

pub fn update(
    component: &mut RecommenderComponent,
    ctx: &Context<RecommenderComponent>,
    msg: Msg,
) -> bool {
    match msg {
        Msg::FileChosen(category, file) => {
            choose_file(component, ctx, category, file);
            true
        }
        Msg::FileRead {
            ticket,
            name,
            file,
            result,
        } => {
            let category = ticket.category;
            let applied = component.intake.finish_read(ticket, name, file, result);
            if applied {
                if let Some(err) = component.intake.error(category) {
                    show_toast(&err.to_string());
                }
            }
            applied
        }
        Msg::Submit => {
            let Some(request) = component.orchestrator.submit(component.intake.files()) else {
                // Already in flight, nothing ready, or the request could not be built.
                if let Some(message) = component.orchestrator.state().error() {
                    show_toast(message);
                }
                return true;
            };
            let transport = component.transport.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                let outcome = upload::dispatch(&transport, request).await;
                link.send_message(Msg::UploadFinished(outcome));
            });
            true
        }
        Msg::UploadFinished(outcome) => {
            component.orchestrator.finish(outcome);
            match component.orchestrator.state().error() {
                Some(message) => show_toast(&format!("Error: {}", message)),
                None => {
                    if let Some(success) = component.orchestrator.success() {
                        show_toast(&success.message);
                    }
                    if let Some(model_id) = component.orchestrator.model_id() {
                        component.campaign_model_id = model_id.clone();
                    }
                }
            }
            true
        }
        Msg::ExportJson => {
            let Some(map) = component.orchestrator.recommendations() else {
                return false;
            };
            match export_json(map) {
                Ok(json) => save(JSON_FILE_NAME, JSON_MIME, &json),
                Err(err) => {
                    error!("JSON export failed: {}", err);
                    show_toast(&format!("Export failed: {}", err));
                }
            }
            false
        }
        Msg::ExportCsv => {
            let Some(map) = component.orchestrator.recommendations() else {
                return false;
            };
            match export_csv_with(map, component.config().csv_quoting) {
                Ok(csv) => save(CSV_FILE_NAME, CSV_MIME, &csv),
                Err(err) => {
                    error!("CSV export failed: {}", err);
                    show_toast(&format!("Export failed: {}", err));
                }
            }
            false
        }
        Msg::SetCampaignModelId(model_id) => {
            component.campaign_model_id = model_id;
            true
        }
        Msg::SendCampaign => {
            let Some(request) = component.campaign.send(&component.campaign_model_id) else {
                if let campaign::CampaignState::Failed(message) = component.campaign.state() {
                    show_toast(message);
                }
                return true;
            };
            let transport = component.transport.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                let outcome = campaign::dispatch(&transport, request).await;
                link.send_message(Msg::CampaignFinished(outcome));
            });
            true
        }
        Msg::CampaignFinished(outcome) => {
            match component.campaign.finish(outcome) {
                campaign::CampaignState::Sent(count) => {
                    show_toast(&format!("Rewards sent to {} customer(s).", count))
                }
                campaign::CampaignState::Failed(message) => {
                    show_toast(&format!("Campaign failed: {}", message))
                }
                _ => {}
            }
            true
        }
        Msg::Reset => {
            component.intake.reset();
            component.orchestrator.reset();
            component.campaign_model_id.clear();
            component.clear_file_inputs();
            true
        }
    }
}

/// Stores a file choice. Under the JSON protocol the text is read in the
/// background and arrives later as `Msg::FileRead`.
fn choose_file(
    component: &mut RecommenderComponent,
    ctx: &Context<RecommenderComponent>,
    category: Category,
    file: web_sys::File,
) {
    let name = file.name();
    match component.config().transport {
        TransportKind::Multipart => {
            info!("{} file {} attached", category, name);
            component.intake.attach(category, name, file);
        }
        TransportKind::Json => {
            let ticket = component.intake.begin_read(category);
            let link = ctx.link().clone();
            spawn_local(async move {
                let blob = Blob::from(file.clone());
                let result = read_as_text(&blob).await.map_err(|e| e.to_string());
                link.send_message(Msg::FileRead {
                    ticket,
                    name,
                    file,
                    result,
                });
            });
        }
    }
}

fn save(file_name: &str, mime: &str, contents: &str) {
    match download_text(file_name, mime, contents) {
        Ok(()) => info!("downloaded {}", file_name),
        Err(err) => {
            let message = js_error_text(&err);
            error!("download of {} failed: {}", file_name, message);
            show_toast(&format!("Download failed: {}", message));
        }
    }
}
