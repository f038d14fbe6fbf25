//! Field rules shared by projects and tasks

use chrono::{DateTime, NaiveDate, SubsecRound, Utc};

use super::error::{DeadlineProblem, EntityKind, ValidationError};
use crate::storage::EntityLimits;

/// Format accepted for deadlines
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Trims and checks a name against the entity's limits
pub(crate) fn name(
    kind: EntityKind,
    limits: &EntityLimits,
    raw: &str,
) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::NameRequired(kind));
    }
    if name.chars().count() > limits.max_name_len {
        return Err(ValidationError::NameTooLong {
            kind,
            max: limits.max_name_len,
        });
    }
    Ok(name.to_string())
}

/// Checks a description; `None` becomes the empty string
pub(crate) fn description(
    kind: EntityKind,
    limits: &EntityLimits,
    raw: Option<&str>,
) -> Result<String, ValidationError> {
    let description = raw.unwrap_or_default();
    if description.chars().count() > limits.max_description_len {
        return Err(ValidationError::DescriptionTooLong {
            kind,
            max: limits.max_description_len,
        });
    }
    Ok(description.to_string())
}

/// Parses an optional deadline. Blank input means no deadline.
pub(crate) fn deadline(
    raw: Option<&str>,
    today: NaiveDate,
) -> Result<Option<NaiveDate>, ValidationError> {
    let input = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(input) => input,
    };

    let date = NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| {
        ValidationError::InvalidDeadline {
            input: input.to_string(),
            reason: DeadlineProblem::Malformed,
        }
    })?;

    if date < today {
        return Err(ValidationError::InvalidDeadline {
            input: input.to_string(),
            reason: DeadlineProblem::InPast,
        });
    }

    Ok(Some(date))
}

/// The current UTC calendar date, used as the deadline boundary
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// The current instant at second precision
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}
