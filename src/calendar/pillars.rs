//! Pillar calculator: date/time → year, month, day and hour pillars.
//!
//! All four pillars are pure functions of the (solar) date and hour:
//!
//! - year: offset from the 1984 갑자 anchor, mod 10 / mod 12
//! - month: stem start from the year stem (`(ys mod 5)·2`), branch rotated so
//!   month 1 lands on 인
//! - day: days since 1900-01-01 plus the configured anchor, mod 60
//! - hour: 2-hour branch bucket, stem start from the day stem (`(ds mod 5)·2`)

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::lunar::{FixedOffsetLunar, LunarConverter};
use crate::domain::{AnalysisConfig, CurrentPillars, DayAnchor, FourPillars, Pillar, Stem};
use crate::error::EngineError;

/// Year known to be 갑자 (stem 0, branch 0).
pub const ANCHOR_YEAR: i32 = 1984;

/// Reference day for the day-pillar count.
pub fn day_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Range-checked `YYYY-MM-DD` fields. Not necessarily a real solar date:
/// lunar input such as `02-30` is carried as-is to the lunar converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CalendarDate {
    /// The same fields read as a solar date.
    pub fn to_solar(self) -> Result<NaiveDate, EngineError> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .ok_or_else(|| EngineError::validation(format!("date '{self}' does not exist")))
    }
}

impl std::fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Validated birth input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthInput {
    pub date: CalendarDate,
    pub hour: u32,
    pub minute: u32,
    pub is_lunar: bool,
}

impl BirthInput {
    /// Parse `YYYY-MM-DD` and `HH:MM` (24-hour). Solar dates must exist on
    /// the calendar; lunar dates only need in-range fields.
    pub fn parse(birth_date: &str, birth_time: &str, is_lunar: bool) -> Result<Self, EngineError> {
        let date = parse_date_fields(birth_date)?;
        if !is_lunar {
            date.to_solar()?;
        }
        let (hour, minute) = parse_time(birth_time)?;
        Ok(Self {
            date,
            hour,
            minute,
            is_lunar,
        })
    }
}

/// Parse a `YYYY-MM-DD` solar date.
pub fn parse_date(s: &str) -> Result<NaiveDate, EngineError> {
    parse_date_fields(s)?.to_solar()
}

/// Parse `YYYY-MM-DD`, checking only the month and day ranges.
pub fn parse_date_fields(s: &str) -> Result<CalendarDate, EngineError> {
    let parts: Vec<&str> = s.trim().split('-').collect();
    let [y, m, d] = parts.as_slice() else {
        return Err(EngineError::validation(format!(
            "invalid date '{s}', expected YYYY-MM-DD"
        )));
    };
    if y.len() != 4 || m.len() != 2 || d.len() != 2 {
        return Err(EngineError::validation(format!(
            "invalid date '{s}', expected YYYY-MM-DD"
        )));
    }

    let year: i32 = parse_field(y, "year", s)?;
    let month: u32 = parse_field(m, "month", s)?;
    let day: u32 = parse_field(d, "day", s)?;

    if !(1..=12).contains(&month) {
        return Err(EngineError::validation(format!("month {month} out of range 1-12")));
    }
    if !(1..=31).contains(&day) {
        return Err(EngineError::validation(format!("day {day} out of range 1-31")));
    }
    Ok(CalendarDate { year, month, day })
}

/// Parse a 24-hour `HH:MM` time.
pub fn parse_time(s: &str) -> Result<(u32, u32), EngineError> {
    let Some((h, m)) = s.trim().split_once(':') else {
        return Err(EngineError::validation(format!(
            "invalid time '{s}', expected HH:MM"
        )));
    };
    let hour: u32 = parse_field(h, "hour", s)?;
    let minute: u32 = parse_field(m, "minute", s)?;

    if hour > 23 {
        return Err(EngineError::validation(format!("hour {hour} out of range 0-23")));
    }
    if minute > 59 {
        return Err(EngineError::validation(format!("minute {minute} out of range 0-59")));
    }
    Ok((hour, minute))
}

fn parse_field<T: std::str::FromStr>(raw: &str, field: &str, whole: &str) -> Result<T, EngineError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EngineError::validation(format!("invalid {field} in '{whole}'")));
    }
    raw.parse::<T>()
        .map_err(|_| EngineError::validation(format!("invalid {field} in '{whole}'")))
}

/// Year pillar for a calendar year.
pub fn year_pillar(year: i32) -> Pillar {
    let offset = year as i64 - ANCHOR_YEAR as i64;
    Pillar::from_indices(offset.rem_euclid(10) as usize, offset.rem_euclid(12) as usize)
}

/// Month pillar for a month number (1..=12) in a year with the given stem.
pub fn month_pillar(year_stem: Stem, month: u32) -> Pillar {
    let start = (year_stem.index() % 5) * 2;
    let m = month as usize;
    Pillar::from_indices(start + m + 1, m + 1)
}

/// Day pillar for a solar date.
pub fn day_pillar(date: NaiveDate, anchor: DayAnchor) -> Pillar {
    let days = (date - day_epoch()).num_days();
    let index = (days + anchor.offset()).rem_euclid(60) as usize;
    Pillar::from_indices(index, index)
}

/// Hour pillar for an hour of day (0..=23); 23:00 already belongs to 자.
pub fn hour_pillar(day_stem: Stem, hour: u32) -> Pillar {
    let branch = ((hour as usize + 1) / 2) % 12;
    let start = (day_stem.index() % 5) * 2;
    Pillar::from_indices(start + branch, branch)
}

/// Computes charts for one configuration (day anchor + lunar converter).
pub struct PillarCalculator<L = FixedOffsetLunar> {
    day_anchor: DayAnchor,
    lunar: L,
}

impl PillarCalculator<FixedOffsetLunar> {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            day_anchor: config.day_anchor,
            lunar: FixedOffsetLunar {
                days: config.lunar_offset_days,
            },
        }
    }
}

impl Default for PillarCalculator<FixedOffsetLunar> {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

impl<L: LunarConverter> PillarCalculator<L> {
    /// Use a different lunar converter, keeping the day anchor.
    pub fn with_lunar<M: LunarConverter>(self, lunar: M) -> PillarCalculator<M> {
        PillarCalculator {
            day_anchor: self.day_anchor,
            lunar,
        }
    }

    /// Four pillars for a validated birth input.
    pub fn compute(&self, input: &BirthInput) -> Result<FourPillars, EngineError> {
        let date = if input.is_lunar {
            self.lunar.to_solar(input.date)?
        } else {
            input.date.to_solar()?
        };
        self.compute_solar(date, input.hour)
    }

    /// Four pillars for a solar date and hour.
    pub fn compute_solar(&self, date: NaiveDate, hour: u32) -> Result<FourPillars, EngineError> {
        if hour > 23 {
            return Err(EngineError::validation(format!("hour {hour} out of range 0-23")));
        }

        let year = year_pillar(date.year());
        let month = month_pillar(year.stem, date.month());
        let day = day_pillar(date, self.day_anchor);
        let hour = hour_pillar(day.stem, hour);

        Ok(FourPillars {
            year,
            month,
            day,
            hour,
            birth_month: date.month(),
        })
    }

    /// Year, month and day pillars for a reference date.
    pub fn current(&self, as_of: NaiveDate) -> CurrentPillars {
        let year = year_pillar(as_of.year());
        CurrentPillars {
            as_of,
            year,
            month: month_pillar(year.stem, as_of.month()),
            day: day_pillar(as_of, self.day_anchor),
        }
    }
}

/// Parse and compute a chart with the given configuration.
pub fn compute_pillars(
    birth_date: &str,
    birth_time: &str,
    is_lunar: bool,
    config: &AnalysisConfig,
) -> Result<FourPillars, EngineError> {
    let input = BirthInput::parse(birth_date, birth_time, is_lunar)?;
    PillarCalculator::new(config).compute(&input)
}

/// Current pillars for a reference date with the given configuration.
pub fn compute_current_pillars(as_of: NaiveDate, config: &AnalysisConfig) -> CurrentPillars {
    PillarCalculator::new(config).current(as_of)
}
