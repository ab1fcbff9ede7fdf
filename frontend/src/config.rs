//! Build-time configuration of the client.
//!
//! Values are baked in when the bundle is built (`LOYALENS_API_URL`,
//! `LOYALENS_TRANSPORT`, `LOYALENS_CSV_QUOTING`); anything unset keeps the
//! default from `common::config`.

use common::config::ClientConfig;
use log::info;

pub fn load() -> ClientConfig {
    let config = ClientConfig::default().with_overrides(
        option_env!("LOYALENS_API_URL"),
        option_env!("LOYALENS_TRANSPORT"),
        option_env!("LOYALENS_CSV_QUOTING"),
    );
    info!(
        "backend at {} ({:?} uploads, {:?} CSV)",
        config.api_base_url, config.transport, config.csv_quoting
    );
    config
}
