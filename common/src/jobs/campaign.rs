//! Campaign dispatch: asks the backend to email the rewards of a trained model.
//!
//! Independent from the upload: any model id the operator recorded can be
//! used, including one from an earlier session.

use log::{info, warn};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::CampaignError;
use crate::requests::{HttpRequest, campaign_request};
use crate::transport::{HttpReply, Transport};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CampaignState {
    #[default]
    Idle,
    Sending,
    /// Number of emails the backend reports as sent.
    Sent(u64),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CampaignEvent {
    Send,
    Finished(Result<u64, CampaignError>),
}

pub fn transition(state: &CampaignState, event: CampaignEvent) -> CampaignState {
    match (state, event) {
        (_, CampaignEvent::Send) => CampaignState::Sending,
        (CampaignState::Sending, CampaignEvent::Finished(Ok(sent))) => CampaignState::Sent(sent),
        (CampaignState::Sending, CampaignEvent::Finished(Err(err))) => {
            CampaignState::Failed(err.to_string())
        }
        (current, CampaignEvent::Finished(_)) => current.clone(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CampaignDispatcher {
    config: ClientConfig,
    state: CampaignState,
}

impl CampaignDispatcher {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            state: CampaignState::Idle,
        }
    }

    pub fn state(&self) -> &CampaignState {
        &self.state
    }

    pub fn is_sending(&self) -> bool {
        self.state == CampaignState::Sending
    }

    /// Starts a campaign for `model_id`. Returns the request to dispatch, or
    /// `None` when one is already being sent or the id is blank (the latter
    /// records a `MissingModelId` failure).
    pub fn send<F>(&mut self, model_id: &str) -> Option<HttpRequest<F>> {
        if self.is_sending() {
            return None;
        }
        self.state = transition(&self.state, CampaignEvent::Send);
        if model_id.trim().is_empty() {
            self.finish(Err(CampaignError::MissingModelId));
            return None;
        }
        info!("sending reward campaign for model {}", model_id.trim());
        Some(campaign_request(&self.config, model_id))
    }

    pub fn finish(&mut self, outcome: Result<u64, CampaignError>) -> &CampaignState {
        self.state = transition(&self.state, CampaignEvent::Finished(outcome));
        &self.state
    }
}

/// Sends the campaign request once and classifies the outcome.
pub async fn dispatch<T: Transport>(
    transport: &T,
    request: HttpRequest<T::File>,
) -> Result<u64, CampaignError> {
    let reply = transport.send(request).await?;
    let outcome = classify_reply(&reply);
    match &outcome {
        Ok(sent) => info!("campaign sent {} email(s)", sent),
        Err(err) => warn!("campaign failed: {}", err),
    }
    outcome
}

/// 2xx: `sent_count` (0 when absent). Otherwise the backend's `error` field,
/// or an `HTTP error` when there is none.
pub fn classify_reply(reply: &HttpReply) -> Result<u64, CampaignError> {
    let body: Option<Value> = serde_json::from_str(&reply.body).ok();

    if !reply.is_success() {
        return Err(
            match body.as_ref().and_then(|b| b.get("error")).and_then(Value::as_str) {
                Some(error) => CampaignError::Rejected(error.to_string()),
                None => CampaignError::Http {
                    status: reply.status,
                    body: reply.body.clone(),
                },
            },
        );
    }

    let body = body
        .filter(Value::is_object)
        .ok_or_else(|| CampaignError::MalformedResponse {
            status: reply.status,
            body: reply.body.clone(),
        })?;
    Ok(body.get("sent_count").and_then(Value::as_u64).unwrap_or(0))
}
