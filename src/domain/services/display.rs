use chrono::{DateTime, NaiveDate, NaiveDateTime};
use chrono_tz::Europe::Oslo;
use serde::Serialize;

use crate::domain::models::booking::{Booking, BookingStatus, STATUS_CANCELLED, STATUS_UPCOMING};
use crate::domain::services::agreement::{pricing_mode, PricingMode};

pub const BY_AGREEMENT_LABEL: &str = "Etter avtale";
pub const INVALID_DATE_LABEL: &str = "Ugyldig dato";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    Default,
    Destructive,
    Secondary,
}

pub fn status_badge_variant(status: &str) -> BadgeVariant {
    match status {
        STATUS_UPCOMING => BadgeVariant::Default,
        STATUS_CANCELLED => BadgeVariant::Destructive,
        _ => BadgeVariant::Secondary,
    }
}

impl From<&BookingStatus> for BadgeVariant {
    fn from(status: &BookingStatus) -> Self {
        status_badge_variant(status.as_str())
    }
}

pub fn payment_display_text(booking: &Booking) -> String {
    match pricing_mode(booking) {
        PricingMode::DoorDeal { percentage } => format!("{}% av dør", percentage),
        PricingMode::ByAgreement => BY_AGREEMENT_LABEL.to_string(),
        PricingMode::Fee { amount } => format!("{} kr", amount),
    }
}

/// Formats a stored date as `dd.mm.yyyy`.
///
/// Missing input gives an empty string, unparseable input gives
/// [`INVALID_DATE_LABEL`]. Timestamps with an offset are shown as the
/// calendar date in Oslo.
pub fn format_safe_date(input: Option<&str>) -> String {
    let raw = match input.map(str::trim) {
        None | Some("") => return String::new(),
        Some(raw) => raw,
    };

    match parse_calendar_date(raw) {
        Some(date) => date.format("%d.%m.%Y").to_string(),
        None => INVALID_DATE_LABEL.to_string(),
    }
}

fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Oslo).date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(dt.with_timezone(&Oslo).date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}
