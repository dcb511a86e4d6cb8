//! Parsing of the `created_at` timestamps returned by the Twitter API.

use std::error;
use std::fmt::{self, Display, Formatter};

use chrono::format::{self, Fixed, Item, Numeric, Pad, ParseError, Parsed};
use chrono::{DateTime, Utc};

// "%a %b %d %H:%M:%S %z %Y"
const ITEMS: &[Item<'static>] = &[
    Item::Fixed(Fixed::ShortWeekdayName),
    Item::Space(" "),
    Item::Fixed(Fixed::ShortMonthName),
    Item::Space(" "),
    Item::Numeric(Numeric::Day, Pad::Zero),
    Item::Space(" "),
    Item::Numeric(Numeric::Hour, Pad::Zero),
    Item::Literal(":"),
    Item::Numeric(Numeric::Minute, Pad::Zero),
    Item::Literal(":"),
    Item::Numeric(Numeric::Second, Pad::Zero),
    Item::Space(" "),
    Item::Fixed(Fixed::TimezoneOffset),
    Item::Space(" "),
    Item::Numeric(Numeric::Year, Pad::Zero),
];

/// A `created_at` value that does not follow the `Sat Nov 11 19:44:57 +0000 2017` format.
#[derive(Debug)]
pub enum TimestampError {
    /// The value does not consist of six space-separated components.
    Components(String),
    /// The offset is something other than `+0000`.
    NotUtc(String),
    /// One of the components is out of range or misspelled.
    Parse(String, ParseError),
}

/// Parses a Twitter timestamp such as `Sat Nov 11 19:44:57 +0000 2017`.
pub fn parse_created_at(s: &str) -> Result<DateTime<Utc>, TimestampError> {
    let components: Vec<&str> = s.split(' ').collect();
    if components.len() != 6 {
        return Err(TimestampError::Components(s.to_owned()));
    }
    if components[4] != "+0000" {
        return Err(TimestampError::NotUtc(s.to_owned()));
    }

    let mut parsed = Parsed::new();
    format::parse(&mut parsed, s, ITEMS.iter())
        .and_then(|()| parsed.to_datetime_with_timezone(&Utc))
        .map_err(|e| TimestampError::Parse(s.to_owned(), e))
}

impl error::Error for TimestampError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            TimestampError::Parse(_, ref e) => Some(e),
            TimestampError::Components(_) | TimestampError::NotUtc(_) => None,
        }
    }
}

impl Display for TimestampError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            TimestampError::Components(ref s) => {
                write!(f, "expected six components in timestamp {:?}", s)
            }
            TimestampError::NotUtc(ref s) => write!(f, "timestamp {:?} is not in UTC", s),
            TimestampError::Parse(ref s, ref e) => write!(f, "malformed timestamp {:?}: {}", s, e),
        }
    }
}
