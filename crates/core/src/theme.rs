//! Theme field parsing and validation.
//!
//! Inbound requests arrive as loosely typed text (multipart parts, urlencoded
//! pairs, or JSON values flattened to text). [`ThemeInput`] holds that raw
//! text; the create and update paths turn it into typed field sets with
//! different strictness:
//!
//! - create requires a non-empty `title` and an integer `difficulty`
//! - update only requires numeric fields to be integers when present
//!
//! Both reject an optional numeric field that is present but not an integer,
//! since it cannot be bound to an integer column.

use crate::error::CoreError;
use crate::types::DbId;

/// Field names accepted by the theme endpoints.
pub const FIELD_TITLE: &str = "title";
pub const FIELD_LOCATION: &str = "location";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_DIFFICULTY: &str = "difficulty";
pub const FIELD_SCARINESS: &str = "scariness";
pub const FIELD_ID: &str = "id";

/// Every settable theme attribute, in validation order.
pub const THEME_FIELDS: [&str; 5] = [
    FIELD_TITLE,
    FIELD_LOCATION,
    FIELD_DESCRIPTION,
    FIELD_DIFFICULTY,
    FIELD_SCARINESS,
];

/// Raw theme attributes as submitted by a client, before validation.
///
/// `None` means the field was absent from the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeInput {
    pub title: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub difficulty: Option<String>,
    pub scariness: Option<String>,
}

/// Validated attributes for a new theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeFields {
    pub title: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub difficulty: i32,
    pub scariness: Option<i32>,
}

/// Attributes written by an update. Every field overwrites the stored value,
/// so `None` clears the column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeUpdate {
    pub title: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub difficulty: Option<i32>,
    pub scariness: Option<i32>,
}

impl ThemeInput {
    /// Assign a field by its wire name. Unknown names are ignored and
    /// reported back as `false`.
    pub fn set(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            FIELD_TITLE => &mut self.title,
            FIELD_LOCATION => &mut self.location,
            FIELD_DESCRIPTION => &mut self.description,
            FIELD_DIFFICULTY => &mut self.difficulty,
            FIELD_SCARINESS => &mut self.scariness,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    /// Validate the fields required to create a theme.
    ///
    /// Checks run in field order (`title`, `difficulty`, `scariness`) and the
    /// first failure is reported.
    pub fn validate_for_create(&self) -> Result<ThemeFields, CoreError> {
        let title = match self.title.as_deref() {
            Some(t) if !t.trim().is_empty() => t.to_string(),
            _ => return Err(CoreError::invalid(FIELD_TITLE)),
        };

        let difficulty = parse_optional_int(FIELD_DIFFICULTY, self.difficulty.as_deref())?
            .ok_or(CoreError::invalid(FIELD_DIFFICULTY))?;

        let scariness = parse_optional_int(FIELD_SCARINESS, self.scariness.as_deref())?;

        Ok(ThemeFields {
            title,
            location: self.location.clone(),
            description: self.description.clone(),
            difficulty,
            scariness,
        })
    }

    /// Convert into an update field set. Text fields pass through as given.
    pub fn into_update(self) -> Result<ThemeUpdate, CoreError> {
        let difficulty = parse_optional_int(FIELD_DIFFICULTY, self.difficulty.as_deref())?;
        let scariness = parse_optional_int(FIELD_SCARINESS, self.scariness.as_deref())?;

        Ok(ThemeUpdate {
            title: self.title,
            location: self.location,
            description: self.description,
            difficulty,
            scariness,
        })
    }
}

/// Parse a theme id taken from the request path.
pub fn parse_theme_id(raw: &str) -> Result<DbId, CoreError> {
    raw.trim()
        .parse::<DbId>()
        .map_err(|_| CoreError::invalid(FIELD_ID))
}

/// Parse an optional integer field. Blank text counts as absent, which is
/// what HTML forms send for an untouched number input.
fn parse_optional_int(field: &'static str, raw: Option<&str>) -> Result<Option<i32>, CoreError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text
            .parse::<i32>()
            .map(Some)
            .map_err(|_| CoreError::invalid(field)),
    }
}
