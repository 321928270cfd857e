use crate::error::AppError;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

const DATE_KEY_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Source of "today" for day-bucket keys. Injectable so tests can pin a date.
pub trait Clock {
    fn today(&self) -> Date;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Date {
        let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
        OffsetDateTime::now_utc().to_offset(offset).date()
    }
}

pub fn today_key() -> Result<String, AppError> {
    key_for(&SystemClock)
}

pub fn key_for(clock: &dyn Clock) -> Result<String, AppError> {
    format_key(clock.today())
}

pub fn format_key(date: Date) -> Result<String, AppError> {
    date.format(&DATE_KEY_FORMAT)
        .map_err(|err| AppError::invalid_data(err.to_string()))
}

/// Trim and validate a user-supplied day key, returning the canonical
/// `YYYY-MM-DD` form.
pub fn parse_day(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_date("day is required"));
    }

    let date = Date::parse(trimmed, &DATE_KEY_FORMAT)
        .map_err(|_| AppError::invalid_date(format!("'{trimmed}' is not a valid YYYY-MM-DD date")))?;
    format_key(date)
}
