use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::error::AppError;
use crate::state::AppState;
use crate::domain::{
    events::EventBus,
    ports::{BookingRepository, FavoriteRepository, ProfileRepository},
    services::{booking_service::BookingService, favorite_service::FavoriteService, profile_service::ProfileService},
};
use crate::infra::repositories::{
    postgres_booking_repo::PostgresBookingRepo, postgres_profile_repo::PostgresProfileRepo,
    postgres_favorite_repo::PostgresFavoriteRepo,
    sqlite_booking_repo::SqliteBookingRepo, sqlite_profile_repo::SqliteProfileRepo,
    sqlite_favorite_repo::SqliteFavoriteRepo,
};

struct Repos {
    booking: Arc<dyn BookingRepository>,
    profile: Arc<dyn ProfileRepository>,
    favorite: Arc<dyn FavoriteRepository>,
}

pub async fn bootstrap_state(config: &Config) -> Result<AppState, AppError> {
    let database_url = &config.database_url;

    let repos = if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let opts = PgConnectOptions::from_str(database_url)?
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await?;

        run_postgres_migrations(&pool).await?;

        Repos {
            booking: Arc::new(PostgresBookingRepo::new(pool.clone())),
            profile: Arc::new(PostgresProfileRepo::new(pool.clone())),
            favorite: Arc::new(PostgresFavoriteRepo::new(pool)),
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await?;

        run_sqlite_migrations(&pool).await?;

        Repos {
            booking: Arc::new(SqliteBookingRepo::new(pool.clone())),
            profile: Arc::new(SqliteProfileRepo::new(pool.clone())),
            favorite: Arc::new(SqliteFavoriteRepo::new(pool)),
        }
    };

    let events = EventBus::default();

    Ok(AppState {
        config: config.clone(),
        booking_service: Arc::new(BookingService::new(repos.booking, events.clone())),
        profile_service: Arc::new(ProfileService::new(repos.profile, events.clone(), config.profile_poll_policy())),
        favorite_service: Arc::new(FavoriteService::new(repos.favorite)),
        events,
    })
}

async fn run_postgres_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .map_err(|e| AppError::InternalWithMsg(format!("Postgres migrations failed: {}", e)))
}

async fn run_sqlite_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .map_err(|e| AppError::InternalWithMsg(format!("SQLite migrations failed: {}", e)))
}
