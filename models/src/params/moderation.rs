use serde::Deserialize;
use validator::{Validate, ValidationError};

#[derive(Deserialize, Validate, Debug)]
pub struct BanParams {
    #[validate(length(min = 1, max = 1024))]
    pub reason: String,
}

/// Exactly one of `team_id` / `organiser_id` names the reported entity.
#[derive(Deserialize, Validate, Debug)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_target"))]
pub struct CreateReportParams {
    pub team_id: Option<String>,
    pub organiser_id: Option<String>,
    #[validate(length(min = 3, max = 2048))]
    pub reason: String,
}

fn validate_target(params: &CreateReportParams) -> Result<(), ValidationError> {
    match (&params.team_id, &params.organiser_id) {
        (Some(_), None) | (None, Some(_)) => Ok(()),
        _ => Err(ValidationError::new("report_target")
            .with_message("Report exactly one team or organiser".into())),
    }
}
