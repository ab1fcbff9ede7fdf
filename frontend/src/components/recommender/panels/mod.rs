//! Result panels rendered below the upload controls.

mod analytics;
mod campaign;
mod recommendations;

pub use analytics::analytics_panel;
pub use campaign::campaign_panel;
pub use recommendations::recommendations_panel;
