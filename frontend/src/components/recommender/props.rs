//! Properties for the `RecommenderComponent`.

use common::config::ClientConfig;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct RecommenderProps {
    /// Replaces the build-time configuration when set.
    ///
    /// Read once when the component is created; later changes are ignored.
    #[prop_or_default]
    pub config: Option<ClientConfig>,
}
