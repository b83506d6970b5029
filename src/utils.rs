//! Helper functions shared by the store setup and the api/ computations.

use crate::config;
use chrono::{Datelike, Months, NaiveDate};
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode},
};
use std::str::FromStr;

pub async fn setup_sqlite_db_pool(encrypted: bool) -> anyhow::Result<SqlitePool> {
    let app_config = &config::APP_CONFIG;

    if encrypted {
        return Ok(SqlitePool::connect_with(
            SqliteConnectOptions::from_str(&app_config.db_host)?
                .pragma("key", app_config.db_pass_encrypt.clone())
                .pragma("cipher_page_size", "1024")
                .pragma("kdf_iter", "64000")
                .pragma("cipher_hmac_algorithm", "HMAC_SHA1")
                .pragma("cipher_kdf_algorithm", "PBKDF2_HMAC_SHA1")
                .pragma("foreign_keys", "ON")
                .journal_mode(SqliteJournalMode::Delete),
        )
        .await?);
    }

    Ok(SqlitePool::connect_with(
        SqliteConnectOptions::from_str(&app_config.db_host)?.pragma("foreign_keys", "ON"),
    )
    .await?)
}

/// Whole calendar years, months and days between two dates.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Age {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

/// Splits `today - birth_date` into calendar components. Months and
/// years follow the calendar (a month is "same day number next month",
/// clamped at month end), not a fixed-day divisor.
pub fn calculate_age(birth_date: NaiveDate, today: NaiveDate) -> Age {
    if today <= birth_date {
        return Age::default();
    }

    let mut years = today.year() - birth_date.year();
    let mut months = today.month() as i32 - birth_date.month() as i32;
    if today.day() < birth_date.day() {
        months -= 1;
    }
    if months < 0 {
        years -= 1;
        months += 12;
    }

    let anchor = birth_date
        .checked_add_months(Months::new((years * 12 + months) as u32))
        .unwrap_or(birth_date);
    let days = today.signed_duration_since(anchor).num_days();

    Age {
        years: years as u32,
        months: months as u32,
        days: days as u32,
    }
}

/// Human readable pet age, skipping zero components.
pub fn fmt_age(birth_date: NaiveDate, today: NaiveDate) -> String {
    let age = calculate_age(birth_date, today);
    let mut parts = Vec::new();

    if age.years > 0 {
        parts.push(format!("{} year{}", age.years, plural(age.years)));
    }
    if age.months > 0 {
        parts.push(format!("{} month{}", age.months, plural(age.months)));
    }
    if age.days > 0 {
        parts.push(format!("{} day{}", age.days, plural(age.days)));
    }

    if parts.is_empty() {
        return "0 days".into();
    }

    parts.join(" ")
}

/// Relative wording for nearby dates, absolute otherwise.
pub fn fmt_relative_date(date: NaiveDate, today: NaiveDate) -> String {
    let days = date.signed_duration_since(today).num_days();

    match days {
        0 => "today".into(),
        1 => "tomorrow".into(),
        -1 => "yesterday".into(),
        2..=13 => format!("in {days} days"),
        -13..=-2 => format!("{} days ago", -days),
        _ => date.format("%b %d, %Y").to_string(),
    }
}

fn plural(count: u32) -> &'static str {
    if count == 1 { "" } else { "s" }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_calculate_age_exact_years() {
        let age = calculate_age(date(2020, 1, 1), date(2024, 1, 1));

        assert_eq!(
            age,
            Age {
                years: 4,
                months: 0,
                days: 0
            }
        );
    }

    #[test]
    fn test_calculate_age_borrows_across_month_lengths() {
        // one calendar month lands on the clamped Feb 29, then one day
        let age = calculate_age(date(2020, 1, 31), date(2020, 3, 1));

        assert_eq!(
            age,
            Age {
                years: 0,
                months: 1,
                days: 1
            }
        );
    }

    #[test]
    fn test_calculate_age_day_borrow_within_year() {
        let age = calculate_age(date(2020, 5, 20), date(2021, 5, 10));

        assert_eq!(
            age,
            Age {
                years: 0,
                months: 11,
                days: 20
            }
        );
    }

    #[test]
    fn test_calculate_age_future_birth_date_clamps_to_zero() {
        assert_eq!(calculate_age(date(2030, 1, 1), date(2024, 1, 1)), Age::default());
    }

    #[test]
    fn test_fmt_age_skips_zero_components() {
        assert_eq!(fmt_age(date(2022, 3, 10), date(2024, 3, 10)), "2 years");
        assert_eq!(fmt_age(date(2024, 1, 10), date(2024, 2, 11)), "1 month 1 day");
        assert_eq!(fmt_age(date(2024, 3, 10), date(2024, 3, 10)), "0 days");
    }

    #[test]
    fn test_fmt_relative_date_near_window() {
        let today = date(2024, 6, 10);

        assert_eq!(fmt_relative_date(date(2024, 6, 10), today), "today");
        assert_eq!(fmt_relative_date(date(2024, 6, 11), today), "tomorrow");
        assert_eq!(fmt_relative_date(date(2024, 6, 9), today), "yesterday");
        assert_eq!(fmt_relative_date(date(2024, 6, 15), today), "in 5 days");
        assert_eq!(fmt_relative_date(date(2024, 6, 5), today), "5 days ago");
        assert_eq!(fmt_relative_date(date(2024, 9, 1), today), "Sep 01, 2024");
    }
}
