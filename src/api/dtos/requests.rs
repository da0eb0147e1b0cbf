use crate::domain::models::profile::Role;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub receiver_id: String,
    pub title: String,
    pub description: Option<String>,
    pub event_date: Option<String>,
    pub time: Option<String>,
    pub venue: Option<String>,
    pub address: Option<String>,
    pub ticket_price: Option<f64>,
    pub audience_estimate: Option<i32>,
    pub artist_fee: Option<f64>,
    pub price_musician: Option<String>,
    #[serde(default)]
    pub door_deal: bool,
    #[serde(default)]
    pub by_agreement: bool,
    pub door_percentage: Option<f64>,
    #[serde(default)]
    pub is_public_after_approval: bool,
}

#[derive(Deserialize)]
pub struct ApproveBookingRequest {
    #[serde(default = "default_true")]
    pub approved: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize)]
pub struct CreateProfileRequest {
    pub display_name: String,
    pub role: Role,
    pub bio: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
    pub bio: Option<String>,
}

#[derive(Deserialize)]
pub struct SetModeRequest {
    pub mode: Role,
}
