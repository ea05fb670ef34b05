//! Session booking quote for an expert.
//!
//! Nothing is persisted; the quote is what the user confirms before a session
//! would be scheduled.

use chrono::{DateTime, Utc};

use crate::domain::{
    currency::format_inr,
    expert::{Expert, ExpertId},
};

pub const MIN_SESSION_MINUTES: u32 = 15;
pub const MAX_SESSION_MINUTES: u32 = 90;
pub const SESSION_STEP_MINUTES: u32 = 15;
pub const DEFAULT_SESSION_MINUTES: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingRequest {
    pub start: DateTime<Utc>,
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookingQuote {
    pub expert_id: ExpertId,
    pub start: DateTime<Utc>,
    pub duration_minutes: u32,
    pub total: f64,
}

impl BookingQuote {
    pub fn total_label(&self) -> String {
        format_inr(self.total)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// Duration is outside 15..=90 minutes or not a multiple of 15.
    InvalidDuration(u32),
    StartInPast,
}

impl std::fmt::Display for BookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDuration(minutes) => write!(
                f,
                "session length {minutes} min is not bookable (use {MIN_SESSION_MINUTES}-{MAX_SESSION_MINUTES} in steps of {SESSION_STEP_MINUTES})"
            ),
            Self::StartInPast => f.write_str("session start must not be in the past"),
        }
    }
}

impl std::error::Error for BookingError {}

pub fn quote_session(
    expert: &Expert,
    request: BookingRequest,
    now: DateTime<Utc>,
) -> Result<BookingQuote, BookingError> {
    let minutes = request.duration_minutes;
    if !(MIN_SESSION_MINUTES..=MAX_SESSION_MINUTES).contains(&minutes)
        || minutes % SESSION_STEP_MINUTES != 0
    {
        return Err(BookingError::InvalidDuration(minutes));
    }

    if request.start < now {
        return Err(BookingError::StartInPast);
    }

    Ok(BookingQuote {
        expert_id: expert.id,
        start: request.start,
        duration_minutes: minutes,
        total: f64::from(minutes) * expert.rate_per_minute,
    })
}
