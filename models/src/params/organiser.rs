use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate, Debug, Default)]
pub struct UpdateOrganiserParams {
    #[validate(length(min = 3, max = 32))]
    pub username: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 8))]
    pub password: Option<String>,
}

#[derive(Deserialize, Validate, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityParams {
    pub show_revenue: Option<bool>,
    pub show_followers: Option<bool>,
}

#[derive(Deserialize, Validate, Debug)]
pub struct RateOrganiserParams {
    #[validate(range(min = 1, max = 5))]
    pub stars: i32,
}
