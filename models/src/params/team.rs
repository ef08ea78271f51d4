use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate, Debug)]
pub struct CreateTeamParams {
    #[validate(length(min = 2, max = 64))]
    pub name: String,
}

#[derive(Deserialize, Validate, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TransferCaptaincyParams {
    #[validate(length(min = 1))]
    pub player_id: String,
}
