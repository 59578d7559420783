use serde_json::Value;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// The kind of request a payload answers, which decides the shape it must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    GetIndex,
    GetOne,
    Create,
    Update,
    Delete,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::GetIndex => "get_index",
            RequestKind::GetOne => "get_one",
            RequestKind::Create => "create",
            RequestKind::Update => "update",
            RequestKind::Delete => "delete",
        }
    }
}

impl Display for RequestKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{kind} responses must be a list, found {found}")]
    NotAList { kind: RequestKind, found: &'static str },
    #[error("{kind} responses must be an object, found {found}")]
    NotAnObject { kind: RequestKind, found: &'static str },
    #[error("entry {index} must be an object, found {found}")]
    EntryNotAnObject { index: usize, found: &'static str },
    #[error("{} is missing required field `{field}`", location(.index))]
    MissingField { index: Option<usize>, field: String },
    #[error("{} has an empty required field `{field}`", location(.index))]
    EmptyField { index: Option<usize>, field: String },
}

fn location(index: &Option<usize>) -> String {
    index.map_or_else(|| "payload".to_owned(), |i| format!("entry {i}"))
}

/// Checks the shape of a payload before it is written to the client.
pub trait OutputValidator: Send + Sync {
    /// # Errors
    /// Returns the first shape violation found in `payload`.
    fn check_valid_output_format(
        &self,
        payload: &Value,
        kind: RequestKind,
    ) -> Result<(), ValidationError>;
}

/// Structural validator: lists of objects for index requests, a single object
/// otherwise, each carrying a set of required fields.
#[derive(Debug, Clone)]
pub struct ShapeValidator {
    required_fields: Vec<String>,
}

impl ShapeValidator {
    #[must_use]
    pub fn new<I, S>(required_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required_fields: required_fields.into_iter().map(Into::into).collect(),
        }
    }

    fn check_entity(
        &self,
        value: &Value,
        kind: RequestKind,
        index: Option<usize>,
    ) -> Result<(), ValidationError> {
        let Some(object) = value.as_object() else {
            return Err(match index {
                Some(index) => ValidationError::EntryNotAnObject {
                    index,
                    found: type_name(value),
                },
                None => ValidationError::NotAnObject {
                    kind,
                    found: type_name(value),
                },
            });
        };

        for field in &self.required_fields {
            match object.get(field) {
                None | Some(Value::Null) => {
                    return Err(ValidationError::MissingField {
                        index,
                        field: field.clone(),
                    });
                }
                Some(Value::String(s)) if s.trim().is_empty() => {
                    return Err(ValidationError::EmptyField {
                        index,
                        field: field.clone(),
                    });
                }
                Some(_) => {}
            }
        }

        Ok(())
    }
}

impl Default for ShapeValidator {
    fn default() -> Self {
        Self::new(["id"])
    }
}

impl OutputValidator for ShapeValidator {
    fn check_valid_output_format(
        &self,
        payload: &Value,
        kind: RequestKind,
    ) -> Result<(), ValidationError> {
        match kind {
            RequestKind::GetIndex => {
                let Some(entries) = payload.as_array() else {
                    return Err(ValidationError::NotAList {
                        kind,
                        found: type_name(payload),
                    });
                };
                entries
                    .iter()
                    .enumerate()
                    .try_for_each(|(i, entry)| self.check_entity(entry, kind, Some(i)))
            }
            RequestKind::GetOne | RequestKind::Create | RequestKind::Update => {
                self.check_entity(payload, kind, None)
            }
            RequestKind::Delete => match payload {
                Value::Null | Value::Object(_) => Ok(()),
                other => Err(ValidationError::NotAnObject {
                    kind,
                    found: type_name(other),
                }),
            },
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
