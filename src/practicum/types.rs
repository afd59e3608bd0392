use std::str::FromStr;

use serde_json::Value;

use crate::error::{BotError, Result};

/// Message used when the homeworks list comes back empty.
pub const NOT_STARTED: &str = "Домашняя работа не взята в работу";

/// Review verdict codes the API documents for a homework record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    /// Human-readable verdict text for this status.
    pub fn verdict(self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "approved" => Ok(Self::Approved),
            "reviewing" => Ok(Self::Reviewing),
            "rejected" => Ok(Self::Rejected),
            other => Err(BotError::UnknownStatus(other.to_string())),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Validate the API response shape and extract the most recent homework record.
///
/// The response must be an object carrying both `homeworks` (an array) and
/// `current_date`. An empty array means there is nothing to report yet.
/// The API returns records newest-first, so only the head of the list matters.
pub fn check_response(response: &Value) -> Result<Option<Value>> {
    let map = response.as_object().ok_or(BotError::UnexpectedType {
        expected: "object",
        got: json_type_name(response),
    })?;

    if !map.contains_key("homeworks") || !map.contains_key("current_date") {
        return Err(BotError::MissingKey("homeworks/current_date"));
    }

    let homeworks = map["homeworks"].as_array().ok_or(BotError::UnexpectedType {
        expected: "array",
        got: json_type_name(&map["homeworks"]),
    })?;

    Ok(homeworks.first().cloned())
}

/// Render the user-facing status message for a homework record.
pub fn parse_status(homework: Option<&Value>) -> Result<String> {
    let Some(homework) = homework else {
        return Ok(NOT_STARTED.to_string());
    };

    let name = homework
        .get("homework_name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .ok_or(BotError::MissingKey("homework_name"))?;

    let status = homework
        .get("status")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let status: HomeworkStatus = status.parse()?;

    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        name,
        status.verdict()
    ))
}
