use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::config;

fn org_time_zone() -> Tz {
    config::current_time_zone()
}

pub fn now_in_org_tz() -> DateTime<Tz> {
    Utc::now().with_timezone(&org_time_zone())
}

pub fn today_in_org_tz() -> NaiveDate {
    now_in_org_tz().date_naive()
}

/// First and last day of the month containing `date`.
pub fn month_bounds(date: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    use chrono::Datelike;
    let first = NaiveDate::from_ymd_opt(date.year(), date.month(), 1)?;
    let next_month = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)?
    };
    Some((first, next_month.pred_opt()?))
}
