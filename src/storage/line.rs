//! Line codec for the persisted list format
//!
//! One record per line, fields joined by `|` in fixed order:
//! `text|doneFlag|addedDate[|doneDate]`. The flag is the literal `0` or
//! `1`; dates are formatted `YYYY/MM/DD`. There is no escaping, so item
//! text must never contain `|` or a newline.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{Item, DATE_FORMAT};

/// Field separator byte of the record format
pub const FIELD_SEPARATOR: char = '|';

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("expected 3 or 4 fields, found {0}")]
    FieldCount(usize),

    #[error("unknown done flag: {0:?}")]
    BadFlag(String),

    #[error("invalid date: {0:?}")]
    BadDate(String),
}

/// Encodes an item as a single record line, without the trailing newline
pub fn encode(item: &Item) -> String {
    let mut line = format!(
        "{}{sep}{}{sep}{}",
        item.text,
        if item.done { "1" } else { "0" },
        item.added_on.format(DATE_FORMAT),
        sep = FIELD_SEPARATOR,
    );
    if let Some(done_on) = item.done_on {
        line.push(FIELD_SEPARATOR);
        line.push_str(&done_on.format(DATE_FORMAT).to_string());
    }
    line
}

/// Decodes a single record line back into an item.
///
/// Accepts 3 fields (no completion date recorded) or 4. Field order is
/// fixed; anything else is a parse error.
pub fn decode(line: &str) -> Result<Item, ParseError> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if !(3..=4).contains(&fields.len()) {
        return Err(ParseError::FieldCount(fields.len()));
    }

    let done = match fields[1] {
        "0" => false,
        "1" => true,
        other => return Err(ParseError::BadFlag(other.to_string())),
    };
    let added_on = parse_date(fields[2])?;
    let done_on = match fields.get(3) {
        Some(raw) => Some(parse_date(raw)?),
        None => None,
    };

    Ok(Item::from_parts(fields[0], done, added_on, done_on))
}

fn parse_date(raw: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| ParseError::BadDate(raw.to_string()))
}
