use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use validator::{Validate, ValidationError};

#[derive(Deserialize, Validate, Debug)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_schedule"))]
pub struct CreateTournamentParams {
    #[validate(length(min = 1, max = 64))]
    pub tid: String,
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 4096))]
    pub description: String,
    pub start_date: DateTime<FixedOffset>,
    pub end_date: DateTime<FixedOffset>,
    #[validate(range(min = 0))]
    pub entry_fee: i64,
    #[validate(range(min = 0))]
    pub prize_pool: i64,
}

fn validate_schedule(params: &CreateTournamentParams) -> Result<(), ValidationError> {
    if params.end_date < params.start_date {
        return Err(ValidationError::new("end_before_start")
            .with_message("End date must not be before the start date".into()));
    }
    Ok(())
}

#[derive(Deserialize, Validate, Debug)]
pub struct RejectTournamentParams {
    #[validate(length(min = 1, max = 1024))]
    pub reason: String,
}

#[derive(Deserialize, Validate, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePointsParams {
    #[validate(length(min = 1))]
    pub team_name: String,
    #[validate(range(min = -10_000, max = 10_000))]
    pub additional_points: i32,
}

#[derive(Deserialize, Validate, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWinnerParams {
    #[validate(length(min = 1))]
    pub team_id: String,
}
