//! Review submission parsing and validation.

use serde_json::{Map, Value};

use crate::domain::{Email, NewReview, Rating, StationId, validate_name, validate_review_text};

use super::LocatorError;

/// A review submission as received, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewSubmission {
    fields: Map<String, Value>,
}

impl ReviewSubmission {
    /// Parse a request body.
    ///
    /// The body must be a non-empty JSON object; field contents are not
    /// looked at until [`ReviewSubmission::validate`].
    pub fn from_json(body: &[u8]) -> Result<Self, LocatorError> {
        match serde_json::from_slice(body) {
            Ok(Value::Object(fields)) if !fields.is_empty() => Ok(Self { fields }),
            _ => Err(LocatorError::InvalidRequest(
                "Invalid JSON data received".to_string(),
            )),
        }
    }

    /// Validate the submission, stopping at the first failure.
    ///
    /// Presence of every field is checked first, then each field in turn:
    /// station id, name, email, rating, review text.
    pub fn validate(&self) -> Result<NewReview, LocatorError> {
        let station_id = self.required("station_id")?;
        let name = self.required("name")?;
        let email = self.required("email")?;
        let rating = self.required("rating")?;
        let review_text = self.required("review_text")?;

        let station_id = StationId::parse(&station_id).map_err(LocatorError::input)?;
        let user_name = validate_name(&name).map_err(LocatorError::validation)?;
        let user_email = Email::parse(&email).map_err(LocatorError::validation)?;
        let rating = Rating::parse(&rating).map_err(LocatorError::validation)?;
        let review_text = validate_review_text(&review_text).map_err(LocatorError::validation)?;

        Ok(NewReview {
            station_id,
            user_name,
            user_email,
            rating,
            review_text,
        })
    }

    fn required(&self, field: &'static str) -> Result<String, LocatorError> {
        self.text(field).ok_or(LocatorError::MissingField(field))
    }

    /// A field as trimmed text. Strings and numbers count; anything else,
    /// or a blank string, is treated as missing.
    fn text(&self, field: &str) -> Option<String> {
        let text = match self.fields.get(field)? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        (!text.is_empty()).then_some(text)
    }
}
