use common::error::{CampaignError, UploadError};
use common::intake::ReadTicket;
use common::model::category::Category;
use common::model::upload::UploadSuccess;

#[derive(Clone)]
pub enum Msg {
    FileChosen(Category, web_sys::File),
    FileRead {
        ticket: ReadTicket,
        name: String,
        file: web_sys::File,
        result: Result<String, String>,
    },
    Submit,
    UploadFinished(Result<UploadSuccess, UploadError>),
    ExportJson,
    ExportCsv,
    SetCampaignModelId(String),
    SendCampaign,
    CampaignFinished(Result<u64, CampaignError>),
    Reset,
}
