//! Export of the recommendation map to downloadable artifacts.
//!
//! Both exports are pure functions of the map. Because [`RecommendationMap`]
//! is ordered by customer id, the same map always produces the same bytes.

use crate::config::CsvQuoting;
use crate::model::recommendation::RecommendationMap;
use crate::model::reward::parse_reward;

pub const JSON_FILE_NAME: &str = "recommendations.json";
pub const CSV_FILE_NAME: &str = "recommendations.csv";
pub const JSON_MIME: &str = "application/json";
pub const CSV_MIME: &str = "text/csv";

pub const CSV_HEADER: [&str; 6] = ["Customer ID", "Email", "Reward", "Discount", "Product", "Code"];

/// Pretty-printed JSON of the whole map (two-space indent).
pub fn export_json(map: &RecommendationMap) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(map)
}

/// CSV in the configured dialect.
pub fn export_csv_with(map: &RecommendationMap, quoting: CsvQuoting) -> Result<String, csv::Error> {
    match quoting {
        CsvQuoting::Verbatim => Ok(export_csv(map)),
        CsvQuoting::Rfc4180 => export_csv_rfc4180(map),
    }
}

/// One header row, then one row per (customer, reward) pair.
///
/// Customer id, email and reward text are wrapped in double quotes without
/// escaping what they contain, so a quote or line break inside a field ends up
/// in the output unchanged. Use [`export_csv_rfc4180`] when the file must
/// survive a strict CSV reader.
pub fn export_csv(map: &RecommendationMap) -> String {
    let mut out = CSV_HEADER.join(",");
    out.push('\n');
    for (customer_id, customer) in map {
        for reward in &customer.rewards {
            let parsed = parse_reward(reward);
            out.push_str(&format!(
                "\"{}\",\"{}\",\"{}\",{},{},{}\n",
                customer_id,
                customer.email,
                reward,
                parsed.discount_percent,
                parsed.product_id,
                parsed.redemption_code
            ));
        }
    }
    out
}

/// Same rows as [`export_csv`] with standard quoting (quotes only where
/// needed, embedded quotes doubled).
pub fn export_csv_rfc4180(map: &RecommendationMap) -> Result<String, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for (customer_id, customer) in map {
        for reward in &customer.rewards {
            let parsed = parse_reward(reward);
            let discount = parsed.discount_percent.to_string();
            writer.write_record([
                customer_id.as_str(),
                customer.email.as_str(),
                reward.as_str(),
                discount.as_str(),
                parsed.product_id.as_str(),
                parsed.redemption_code.as_str(),
            ])?;
        }
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
