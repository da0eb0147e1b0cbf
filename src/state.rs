use std::sync::Arc;
use crate::domain::{
    events::EventBus,
    services::{booking_service::BookingService, favorite_service::FavoriteService, profile_service::ProfileService},
};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub events: EventBus,
    pub booking_service: Arc<BookingService>,
    pub profile_service: Arc<ProfileService>,
    pub favorite_service: Arc<FavoriteService>,
}
