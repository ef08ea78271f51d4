use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate, Debug, Default)]
pub struct UpdatePlayerParams {
    #[validate(length(min = 3, max = 32))]
    pub username: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 8))]
    pub password: Option<String>,
}
