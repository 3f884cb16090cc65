//! User reviews of stations.

use std::fmt;
use std::ops::RangeInclusive;

use chrono::NaiveDateTime;

use super::{DomainError, StationId};

/// Allowed reviewer name length in characters.
pub const NAME_LENGTH: RangeInclusive<usize> = 2..=100;

/// Allowed review text length in characters.
pub const REVIEW_TEXT_LENGTH: RangeInclusive<usize> = 10..=1000;

/// Identifier assigned to a review by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReviewId(pub u64);

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A star rating from 1 to 5.
///
/// ```
/// use fuel_server::domain::Rating;
///
/// assert_eq!(Rating::new(5).unwrap().get(), 5);
/// assert!(Rating::new(0).is_err());
/// assert!(Rating::new(6).is_err());
/// assert_eq!(Rating::parse("4.0").unwrap().get(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Result<Self, DomainError> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Rating)
            .ok_or(DomainError::InvalidRating)
    }

    /// Parse a rating from text. Integral decimals such as `4.0` are
    /// accepted.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let s = s.trim();
        if let Ok(value) = s.parse::<i64>() {
            return Self::new(value);
        }

        match s.parse::<f64>() {
            Ok(value) if value.is_finite() && value.fract() == 0.0 => Self::new(value as i64),
            _ => Err(DomainError::FractionalRating),
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

/// A syntactically valid, lowercased email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Maximum total length of an address.
    const MAX_LEN: usize = 254;
    /// Maximum length of the part before `@`.
    const MAX_LOCAL_LEN: usize = 64;
    /// Maximum length of one domain label.
    const MAX_LABEL_LEN: usize = 63;

    /// Validate an address of the form `local@domain.tld`.
    ///
    /// Surrounding whitespace is ignored and the result is lowercased, so
    /// two spellings of one address compare equal.
    ///
    /// ```
    /// use fuel_server::domain::Email;
    ///
    /// assert_eq!(Email::parse(" Asha@Example.IN ").unwrap().as_str(), "asha@example.in");
    /// assert!(Email::parse("asha@localhost").is_err());
    /// assert!(Email::parse("not-an-email").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let s = s.trim();
        if s.is_empty() || s.len() > Self::MAX_LEN {
            return Err(DomainError::InvalidEmail);
        }

        let (local, domain) = s.rsplit_once('@').ok_or(DomainError::InvalidEmail)?;
        if !valid_local_part(local) || !valid_domain(domain) {
            return Err(DomainError::InvalidEmail);
        }

        Ok(Email(s.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn valid_local_part(local: &str) -> bool {
    const SPECIALS: &str = "!#$%&'*+/=?^_`{|}~-.";

    !local.is_empty()
        && local.len() <= Email::MAX_LOCAL_LEN
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..")
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || SPECIALS.contains(c))
}

fn valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= Email::MAX_LABEL_LEN
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });

    let tld_ok = labels
        .last()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()));

    labels_ok && tld_ok
}

/// Validate a reviewer name, returning it trimmed.
pub fn validate_name(name: &str) -> Result<String, DomainError> {
    let name = name.trim();
    if !NAME_LENGTH.contains(&name.chars().count()) {
        return Err(DomainError::InvalidName {
            min: *NAME_LENGTH.start(),
            max: *NAME_LENGTH.end(),
        });
    }
    Ok(name.to_string())
}

/// Validate review text, returning it trimmed.
pub fn validate_review_text(text: &str) -> Result<String, DomainError> {
    let text = text.trim();
    if !REVIEW_TEXT_LENGTH.contains(&text.chars().count()) {
        return Err(DomainError::InvalidReviewText {
            min: *REVIEW_TEXT_LENGTH.start(),
            max: *REVIEW_TEXT_LENGTH.end(),
        });
    }
    Ok(text.to_string())
}

/// A validated review ready to be stored.
///
/// Text is kept raw (trimmed, not escaped); escaping happens on output.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub station_id: StationId,
    pub user_name: String,
    pub user_email: Email,
    pub rating: Rating,
    pub review_text: String,
}

/// A stored review.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: ReviewId,
    pub station_id: StationId,
    pub user_name: String,
    pub user_email: Email,
    pub rating: Rating,
    pub review_text: String,
    pub created_at: NaiveDateTime,
}

/// A review joined with the reviewed station's name and city.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentReview {
    pub id: ReviewId,
    pub rating: Rating,
    pub review_text: String,
    pub user_name: String,
    pub station_name: String,
    pub city: Option<String>,
    pub created_at: NaiveDateTime,
}
