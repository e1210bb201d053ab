//! Lunar → solar date adjustment.
//!
//! Charts entered on the lunar calendar are shifted onto the solar calendar
//! before any pillar arithmetic. The default converter is the product's flat
//! day offset; a real lunisolar table can be plugged in through the trait
//! without touching the pillar code.

use chrono::{Duration, NaiveDate};

use crate::calendar::pillars::CalendarDate;
use crate::error::EngineError;

/// Converts a lunar calendar date to the solar date used for pillar math.
///
/// The lunar date is only range-checked (month 1-12, day 1-31); lunar months
/// have 29 or 30 days, so `02-30` is a legitimate input.
pub trait LunarConverter: Send + Sync {
    fn to_solar(&self, lunar: CalendarDate) -> Result<NaiveDate, EngineError>;
}

/// Adds a fixed number of days (11 by default), counting from the first of
/// the lunar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedOffsetLunar {
    pub days: i64,
}

impl Default for FixedOffsetLunar {
    fn default() -> Self {
        Self { days: 11 }
    }
}

impl LunarConverter for FixedOffsetLunar {
    fn to_solar(&self, lunar: CalendarDate) -> Result<NaiveDate, EngineError> {
        let out_of_range = || EngineError::validation(format!("lunar date {lunar} is out of range"));
        let first = NaiveDate::from_ymd_opt(lunar.year, lunar.month, 1).ok_or_else(out_of_range)?;
        (i64::from(lunar.day) - 1)
            .checked_add(self.days)
            .and_then(Duration::try_days)
            .and_then(|shift| first.checked_add_signed(shift))
            .ok_or_else(out_of_range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lunar(year: i32, month: u32, day: u32) -> CalendarDate {
        CalendarDate { year, month, day }
    }

    #[test]
    fn fixed_offset_crosses_month_boundary() {
        let solar = FixedOffsetLunar::default().to_solar(lunar(1990, 4, 25)).unwrap();
        assert_eq!(solar, NaiveDate::from_ymd_opt(1990, 5, 6).unwrap());
    }

    #[test]
    fn thirtieth_day_rolls_past_short_solar_month() {
        let solar = FixedOffsetLunar::default().to_solar(lunar(1990, 2, 30)).unwrap();
        assert_eq!(solar, NaiveDate::from_ymd_opt(1990, 3, 13).unwrap());
        let zero = FixedOffsetLunar { days: 0 }.to_solar(lunar(1990, 2, 29)).unwrap();
        assert_eq!(zero, NaiveDate::from_ymd_opt(1990, 3, 1).unwrap());
    }

    #[test]
    fn overflow_is_a_validation_error() {
        let conv = FixedOffsetLunar { days: 1_000_000_000 };
        let err = conv.to_solar(lunar(1990, 1, 1)).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
        let huge = FixedOffsetLunar { days: i64::MAX };
        assert!(huge.to_solar(lunar(1990, 1, 2)).is_err());
    }
}
