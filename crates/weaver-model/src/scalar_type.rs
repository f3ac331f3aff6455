// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt::{Display, Formatter};

use async_graphql_value::ConstValue;
use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;

/// Built-in leaf types. Scalars are passed through to the engine as-is and are never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Int,
    Float,
    String,
    Boolean,
    ID,
    DateTime,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScalarError {
    #[error("Expected a value of type '{expected}', got '{actual}'")]
    InvalidType { expected: ScalarType, actual: String },

    #[error("'{0}' is not a valid date")]
    InvalidDate(String),

    #[error("Invalid date format for '{0}', only accepts: YYYY-MM-DDTHH:MM:SS.SSSZ")]
    InvalidDateFormat(String),
}

impl ScalarType {
    pub const ALL: [ScalarType; 6] = [
        ScalarType::Int,
        ScalarType::Float,
        ScalarType::String,
        ScalarType::Boolean,
        ScalarType::ID,
        ScalarType::DateTime,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ScalarType::Int => "Int",
            ScalarType::Float => "Float",
            ScalarType::String => "String",
            ScalarType::Boolean => "Boolean",
            ScalarType::ID => "ID",
            ScalarType::DateTime => "DateTime",
        }
    }

    pub fn from_name(name: &str) -> Option<ScalarType> {
        Self::ALL.into_iter().find(|scalar| scalar.name() == name)
    }

    /// Is this one of the scalars every GraphQL engine already knows about?
    pub fn is_builtin(&self) -> bool {
        !matches!(self, ScalarType::DateTime)
    }

    /// Coerce an input value supplied by a query (literal or variable).
    pub fn parse_value(&self, value: &ConstValue) -> Result<ConstValue, ScalarError> {
        match (self, value) {
            (_, ConstValue::Null) => Ok(ConstValue::Null),
            (ScalarType::Int, ConstValue::Number(n))
                if n.as_i64().is_some_and(|v| i32::try_from(v).is_ok()) =>
            {
                Ok(value.clone())
            }
            (ScalarType::Float, ConstValue::Number(_)) => Ok(value.clone()),
            (ScalarType::String, ConstValue::String(_)) => Ok(value.clone()),
            (ScalarType::Boolean, ConstValue::Boolean(_)) => Ok(value.clone()),
            (ScalarType::ID, ConstValue::String(_)) => Ok(value.clone()),
            (ScalarType::ID, ConstValue::Number(n)) if n.is_i64() => {
                Ok(ConstValue::String(n.to_string()))
            }
            (ScalarType::DateTime, ConstValue::String(s)) => {
                parse_date_time(s).map(|_| ConstValue::String(s.clone()))
            }
            _ => Err(self.invalid_type(value)),
        }
    }

    /// Validate a value produced by a resolver before it goes out in a response.
    pub fn serialize(&self, value: &ConstValue) -> Result<ConstValue, ScalarError> {
        match (self, value) {
            (ScalarType::DateTime, ConstValue::String(s)) => {
                let date = DateTime::parse_from_rfc3339(s)
                    .map_err(|_| ScalarError::InvalidDate(s.clone()))?;
                Ok(ConstValue::String(
                    date.with_timezone(&Utc)
                        .to_rfc3339_opts(SecondsFormat::Millis, true),
                ))
            }
            _ => self.parse_value(value),
        }
    }

    fn invalid_type(&self, value: &ConstValue) -> ScalarError {
        let actual = match value {
            ConstValue::Null => "null",
            ConstValue::Number(_) => "Number",
            ConstValue::String(_) => "String",
            ConstValue::Boolean(_) => "Boolean",
            ConstValue::Binary(_) => "Binary",
            ConstValue::Enum(_) => "Enum",
            ConstValue::List(_) => "List",
            ConstValue::Object(_) => "Object",
        };

        ScalarError::InvalidType {
            expected: *self,
            actual: actual.to_string(),
        }
    }
}

/// Dates must round-trip exactly through the canonical millisecond UTC form, so that a value
/// such as `2024-01-01T00:00:00+02:00` is rejected rather than silently shifted.
fn parse_date_time(value: &str) -> Result<DateTime<Utc>, ScalarError> {
    let date = DateTime::parse_from_rfc3339(value)
        .map_err(|_| ScalarError::InvalidDate(value.to_string()))?
        .with_timezone(&Utc);

    if date.to_rfc3339_opts(SecondsFormat::Millis, true) != value {
        return Err(ScalarError::InvalidDateFormat(value.to_string()));
    }

    Ok(date)
}

impl Display for ScalarType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
