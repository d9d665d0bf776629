//! Timeframe to sampling plan resolution.

use chrono::{DateTime, Datelike, Duration, FixedOffset, Months, TimeZone, Weekday};
use stockdash_core::{GenerationError, Timeframe};

/// Regular session open, used to anchor intraday and weekly plans.
const SESSION_OPEN: (u32, u32) = (9, 30);

/// Where a series starts, how often it samples, and for how long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplingPlan {
    pub timeframe: Timeframe,
    pub start: DateTime<FixedOffset>,
    pub interval: Duration,
    pub point_count: usize,
    pub skip_weekends: bool,
}

impl SamplingPlan {
    /// Resolve the plan for `timeframe` relative to `now`.
    pub fn resolve(timeframe: Timeframe, now: DateTime<FixedOffset>) -> Result<Self, GenerationError> {
        let plan = match timeframe {
            Timeframe::Intraday => Self {
                timeframe,
                start: at_session_open(now)?,
                interval: Duration::minutes(5),
                point_count: 78,
                skip_weekends: false,
            },
            Timeframe::Week => {
                let week_ago = now
                    .checked_sub_signed(Duration::days(7))
                    .ok_or_else(|| out_of_range(timeframe, now))?;
                Self {
                    timeframe,
                    start: at_session_open(week_ago)?,
                    interval: Duration::hours(1),
                    point_count: 35,
                    skip_weekends: true,
                }
            }
            Timeframe::Month => Self {
                timeframe,
                start: now
                    .checked_sub_months(Months::new(1))
                    .ok_or_else(|| out_of_range(timeframe, now))?,
                interval: Duration::days(1),
                point_count: 22,
                skip_weekends: false,
            },
            Timeframe::Year => Self {
                timeframe,
                start: now
                    .checked_sub_months(Months::new(12))
                    .ok_or_else(|| out_of_range(timeframe, now))?,
                interval: Duration::weeks(1),
                point_count: 52,
                skip_weekends: false,
            },
        };
        Ok(plan)
    }

    /// Interval between slots in milliseconds.
    pub fn interval_ms(&self) -> i64 {
        self.interval.num_milliseconds()
    }

    /// Scheduled slot timestamps, weekends included.
    pub fn slots(&self) -> impl Iterator<Item = DateTime<FixedOffset>> + '_ {
        (0..self.point_count).map(move |i| self.start + self.interval * i as i32)
    }

    /// Whether a slot produces a point under this plan.
    pub fn is_emitted(&self, slot: &DateTime<FixedOffset>) -> bool {
        !(self.skip_weekends && is_weekend(slot))
    }

    /// Number of slots that will actually produce a point.
    pub fn emitted_count(&self) -> usize {
        self.slots().filter(|slot| self.is_emitted(slot)).count()
    }
}

/// Shorthand for [`SamplingPlan::resolve`].
pub fn resolve(timeframe: Timeframe, now: DateTime<FixedOffset>) -> Result<SamplingPlan, GenerationError> {
    SamplingPlan::resolve(timeframe, now)
}

pub(crate) fn is_weekend<Tz: TimeZone>(t: &DateTime<Tz>) -> bool {
    matches!(t.weekday(), Weekday::Sat | Weekday::Sun)
}

fn at_session_open(t: DateTime<FixedOffset>) -> Result<DateTime<FixedOffset>, GenerationError> {
    let (hour, minute) = SESSION_OPEN;
    t.date_naive()
        .and_hms_opt(hour, minute, 0)
        .and_then(|naive| t.offset().from_local_datetime(&naive).single())
        .ok_or_else(|| GenerationError::PlanOutOfRange(format!("cannot anchor {} at session open", t)))
}

fn out_of_range(timeframe: Timeframe, now: DateTime<FixedOffset>) -> GenerationError {
    GenerationError::PlanOutOfRange(format!("{} window before {}", timeframe, now))
}
