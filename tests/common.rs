use gig_booking_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    infra::repositories::{
        sqlite_booking_repo::SqliteBookingRepo,
        sqlite_profile_repo::SqliteProfileRepo,
        sqlite_favorite_repo::SqliteFavoriteRepo,
    },
    domain::{
        events::EventBus,
        models::auth::Claims,
        services::{
            booking_service::BookingService,
            favorite_service::FavoriteService,
            profile_service::ProfileService,
        },
    },
    background::start_event_listener,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, header},
    response::Response,
    Router,
};
use std::str::FromStr;
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use tower::ServiceExt;
use serde_json::Value;

#[allow(dead_code)]
pub const JWT_SECRET: &str = "test-secret-for-integration-tests";
#[allow(dead_code)]
pub const JWT_AUDIENCE: &str = "authenticated";

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            jwt_secret: JWT_SECRET.to_string(),
            jwt_audience: JWT_AUDIENCE.to_string(),
            profile_poll_attempts: 5,
            profile_poll_initial_delay: Duration::from_millis(20),
            profile_poll_max_delay: Duration::from_millis(100),
        };

        let events = EventBus::default();
        let booking_repo = Arc::new(SqliteBookingRepo::new(pool.clone()));
        let profile_repo = Arc::new(SqliteProfileRepo::new(pool.clone()));
        let favorite_repo = Arc::new(SqliteFavoriteRepo::new(pool.clone()));

        let state = Arc::new(AppState {
            config: config.clone(),
            booking_service: Arc::new(BookingService::new(booking_repo, events.clone())),
            profile_service: Arc::new(ProfileService::new(profile_repo, events.clone(), config.profile_poll_policy())),
            favorite_service: Arc::new(FavoriteService::new(favorite_repo)),
            events: events.clone(),
        });

        tokio::spawn(start_event_listener(events));

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    /// Mints an access token the way the identity provider would.
    pub fn token_for(&self, user_id: &str) -> String {
        let claims = Claims {
            sub: user_id.to_string(),
            aud: JWT_AUDIENCE.into(),
            exp: (Utc::now().timestamp() + 3600) as usize,
            iat: Utc::now().timestamp() as usize,
            email: Some(format!("{}@example.com", user_id)),
            role: Some("authenticated".to_string()),
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(JWT_SECRET.as_bytes())).unwrap()
    }

    /// Sends a request, authenticated as `user` via bearer token when given.
    pub async fn send(&self, method: &str, uri: &str, user: Option<&str>, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user_id) = user {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", self.token_for(user_id)));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn create_booking(&self, sender: &str, receiver: &str, body: Value) -> Value {
        let mut payload = body;
        payload["receiver_id"] = Value::String(receiver.to_string());
        let res = self.send("POST", "/api/v1/bookings", Some(sender), Some(payload)).await;
        assert_eq!(res.status(), axum::http::StatusCode::CREATED);
        parse_body(res).await
    }
}

#[allow(dead_code)]
pub async fn parse_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
