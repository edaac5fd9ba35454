/*
 * Responsibility
 * - trim and length-check user input before it reaches a repo
 * - produce NewIdea / NewComment only from input that passed
 * - lengths are counted in chars, after trimming
 */
use thiserror::Error;

use crate::repos::{NewComment, NewIdea};

pub const TITLE_MAX_CHARS: usize = 200;
pub const DESCRIPTION_MAX_CHARS: usize = 2000;
pub const AUTHOR_MAX_CHARS: usize = 100;
pub const CONTENT_MAX_CHARS: usize = 2000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

fn required(field: &'static str, raw: &str, max: usize) -> Result<String, ValidationError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ValidationError::new(field, format!("{field} is required")));
    }
    bounded(field, value, max)?;
    Ok(value.to_string())
}

// Blank optional text is stored as absent.
fn optional(
    field: &'static str,
    raw: Option<&str>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    bounded(field, value, max)?;
    Ok(Some(value.to_string()))
}

fn bounded(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::new(
            field,
            format!("{field} must be <= {max} chars"),
        ));
    }
    Ok(())
}

pub fn new_idea(title: &str, description: Option<&str>) -> Result<NewIdea, ValidationError> {
    Ok(NewIdea {
        title: required("title", title, TITLE_MAX_CHARS)?,
        description: optional("description", description, DESCRIPTION_MAX_CHARS)?,
    })
}

pub fn new_comment(
    idea_id: i64,
    author: Option<&str>,
    content: &str,
) -> Result<NewComment, ValidationError> {
    Ok(NewComment {
        idea_id,
        author: optional("author", author, AUTHOR_MAX_CHARS)?,
        content: required("content", content, CONTENT_MAX_CHARS)?,
    })
}
