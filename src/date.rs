use std::cmp::Reverse;

use chrono::NaiveDate;

use crate::{
    entry::Entry,
    error::{Error, Result},
};

/// The calendar date an entry was published on, as far as its fields tell us.
/// Only ever used for ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct PublishedDate(NaiveDate);

impl PublishedDate {
    pub fn as_date(&self) -> NaiveDate {
        self.0
    }
}

/// Derive the publication date of `entry`. `year` is required; `month` and `day`
/// default to 1.
pub fn published_date(entry: &Entry) -> Result<PublishedDate> {
    let year: i32 = integer_field(entry, "year")?.ok_or_else(|| Error::MissingField {
        entry: entry.id.clone(),
        field: "year",
    })?;

    let month = match (entry.month, entry.field("month")) {
        (Some(month), _) => month,
        (None, Some(raw)) => {
            return Err(Error::InvalidField {
                entry: entry.id.clone(),
                field: "month",
                value: raw.to_string(),
            });
        }
        (None, None) => 1,
    };
    let day: u32 = integer_field(entry, "day")?.unwrap_or(1);

    if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
        return Ok(PublishedDate(date));
    }

    // Blame the first component that is out of range on its own.
    let (field, value) = if NaiveDate::from_ymd_opt(year, 1, 1).is_none() {
        ("year", year.to_string())
    } else if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
        ("month", month.to_string())
    } else {
        ("day", format!("{year}-{month:02}-{day:02}"))
    };
    Err(Error::InvalidField {
        entry: entry.id.clone(),
        field,
        value,
    })
}

fn integer_field<T: std::str::FromStr>(entry: &Entry, field: &'static str) -> Result<Option<T>> {
    let Some(raw) = entry.field(field) else {
        return Ok(None);
    };
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|_| Error::InvalidField {
            entry: entry.id.clone(),
            field,
            value: raw.to_string(),
        })
}

/// Sort newest first. Items with the same date keep their relative order.
pub fn sort_newest_first<T>(items: &mut [(PublishedDate, T)]) {
    items.sort_by_key(|(date, _)| Reverse(*date));
}
