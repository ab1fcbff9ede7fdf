//! Runtime state of the recommender page.
//!
//! The component owns one intake, one upload orchestrator and one campaign
//! dispatcher for the lifetime of the page. All three come from `common`; this
//! struct only adds what the browser needs on top (the transport and the
//! campaign input).

use common::config::ClientConfig;
use common::intake::FileIntake;
use common::jobs::campaign::CampaignDispatcher;
use common::jobs::upload::UploadOrchestrator;
use common::model::category::Category;
use yew::NodeRef;

use crate::transport::BrowserTransport;

pub struct RecommenderComponent {
    /// Files chosen so far, keyed by category.
    pub intake: FileIntake<web_sys::File>,

    pub orchestrator: UploadOrchestrator,

    pub campaign: CampaignDispatcher,

    pub transport: BrowserTransport,

    /// Model id typed (or prefilled from the last upload) for the campaign.
    pub campaign_model_id: String,

    /// One `<input type="file">` per category, in `Category::ALL` order.
    pub file_input_refs: [NodeRef; 3],
}

impl RecommenderComponent {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            intake: FileIntake::new(),
            transport: BrowserTransport::new(config.clone()),
            campaign: CampaignDispatcher::new(config.clone()),
            orchestrator: UploadOrchestrator::new(config),
            campaign_model_id: String::new(),
            file_input_refs: Default::default(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        self.orchestrator.config()
    }

    pub fn file_input_ref(&self, category: Category) -> &NodeRef {
        let index = Category::ALL
            .iter()
            .position(|c| *c == category)
            .unwrap_or(0);
        &self.file_input_refs[index]
    }

    /// Clears the native file inputs so choosing the same file again still
    /// fires `change`.
    pub fn clear_file_inputs(&self) {
        for input_ref in &self.file_input_refs {
            if let Some(input) = input_ref.cast::<web_sys::HtmlInputElement>() {
                input.set_value("");
            }
        }
    }
}
