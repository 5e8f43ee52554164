//! Fuzzy GEDCOM dates, as far as census columns need them.

use chrono::{Datelike, NaiveDate};
use std::fmt;

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A Gregorian date of year, month or day precision. Unknown parts are 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalendarDate {
    year: i32,
    month: u32,
    day: u32,
}

impl CalendarDate {
    /// None unless `month` is 0..=12 and `day` is 0..=31, with a known day
    /// needing a known month.
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        if month > 12 || day > 31 || (day > 0 && month == 0) {
            return None;
        }
        Some(CalendarDate { year, month, day })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// First day covered by this date.
    pub fn minimum_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month.max(1), self.day.max(1))
    }

    /// Last day covered by this date.
    pub fn maximum_day(&self) -> Option<NaiveDate> {
        if self.day > 0 {
            return NaiveDate::from_ymd_opt(self.year, self.month.max(1), self.day);
        }
        let (year, month) = match self.month {
            0 | 12 => (self.year + 1, 1),
            month => (self.year, month + 1),
        };
        NaiveDate::from_ymd_opt(year, month, 1).and_then(|first| first.pred_opt())
    }

    /// Formats as `30. June 1832`, leaving out unknown parts.
    pub fn format_day_dot_month_year(&self) -> String {
        let mut parts = Vec::with_capacity(3);
        if self.day > 0 {
            parts.push(format!("{}.", self.day));
        }
        if self.month > 0 {
            parts.push(MONTH_NAMES[self.month as usize - 1].to_owned());
        }
        parts.push(self.year.to_string());
        parts.join(" ")
    }

    /// Whole years from this date until `day`, counting unknown month and day
    /// as the first.
    fn years_until(&self, day: NaiveDate) -> i32 {
        let mut years = day.year() - self.year;
        let month = self.month.max(1);
        if day.month() < month || (day.month() == month && day.day() < self.day.max(1)) {
            years -= 1;
        }
        years
    }

    fn parse(text: &str) -> Option<CalendarDate> {
        let parts: Vec<&str> = text.split_whitespace().collect();
        let (day, month, year) = match parts.as_slice() {
            [year] => (0, 0, *year),
            [month, year] => (0, month_number(month)?, *year),
            [day, month, year] => (day.parse().ok()?, month_number(month)?, *year),
            _ => return None,
        };
        let date = CalendarDate::new(year.parse().ok()?, month, day)?;
        date.minimum_day()?;
        Some(date)
    }
}

fn month_number(text: &str) -> Option<u32> {
    let upper = text.to_ascii_uppercase();
    MONTHS
        .iter()
        .position(|month| *month == upper)
        .map(|index| index as u32 + 1)
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.day > 0 {
            write!(f, "{} ", self.day)?;
        }
        if self.month > 0 {
            write!(f, "{} ", MONTHS[self.month as usize - 1])?;
        }
        write!(f, "{}", self.year)
    }
}

/// A date interval parsed from GEDCOM text such as `30 JUN 1832`,
/// `ABT 1850` or `BET 1850 AND 1855`.
#[derive(Clone, Debug, PartialEq)]
pub struct Date {
    first: Option<CalendarDate>,
    last: Option<CalendarDate>,
}

impl Date {
    pub fn unknown() -> Self {
        Date {
            first: None,
            last: None,
        }
    }

    pub fn from_calendar(date: CalendarDate) -> Self {
        Date {
            first: Some(date),
            last: None,
        }
    }

    /// Parses GEDCOM date text. Anything unrecognised yields an unknown date.
    pub fn parse(text: &str) -> Self {
        let text = text.trim().to_ascii_uppercase();
        let words: Vec<&str> = text.split_whitespace().collect();

        let range = |start: &str, separator: &str| -> Option<Date> {
            if words.first() != Some(&start) {
                return None;
            }
            let split = words.iter().position(|word| *word == separator)?;
            Some(Date {
                first: CalendarDate::parse(&words[1..split].join(" ")),
                last: CalendarDate::parse(&words[split + 1..].join(" ")),
            })
        };
        if let Some(date) = range("BET", "AND").or_else(|| range("FROM", "TO")) {
            if date.first.is_some() && date.last.is_some() {
                return date;
            }
            return Date::unknown();
        }

        let rest = match words.first() {
            Some(&"ABT") | Some(&"EST") | Some(&"CAL") | Some(&"BEF") | Some(&"AFT")
            | Some(&"INT") | Some(&"FROM") | Some(&"TO") => &words[1..],
            _ => &words[..],
        };
        match CalendarDate::parse(&rest.join(" ")) {
            Some(date) => Date::from_calendar(date),
            None => Date::unknown(),
        }
    }

    pub fn is_known(&self) -> bool {
        self.first.is_some()
    }

    /// The earliest calendar date in the interval.
    pub fn minimum_date(&self) -> Option<CalendarDate> {
        self.first
    }

    pub fn minimum_day(&self) -> Option<NaiveDate> {
        self.first.and_then(|date| date.minimum_day())
    }

    pub fn maximum_day(&self) -> Option<NaiveDate> {
        self.last
            .or(self.first)
            .and_then(|date| date.maximum_day())
    }

    /// Whole years (rounded down) between `birth` and `at`, or -1 when the
    /// birth date is unknown or falls after `at`.
    ///
    /// When `at` overlaps the start of `birth` the age is measured at the
    /// birth date itself, i.e. 0.
    pub fn age_in_years(birth: &Date, at: &Date) -> i32 {
        let (birth_first, birth_day) = match (birth.first, birth.minimum_day()) {
            (Some(first), Some(day)) => (first, day),
            _ => return -1,
        };
        let (at_min, at_max) = match (at.minimum_day(), at.maximum_day()) {
            (Some(min), Some(max)) => (min, max),
            _ => return -1,
        };
        let reference = if at_max >= birth_day && at_min <= birth_day {
            birth_day
        } else {
            at_min
        };
        if birth_day > reference {
            return -1;
        }
        birth_first.years_until(reference)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.first, self.last) {
            (Some(first), Some(last)) => write!(f, "BET {} AND {}", first, last),
            (Some(first), None) => write!(f, "{}", first),
            _ => Ok(()),
        }
    }
}
