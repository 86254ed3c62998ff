//! Strict schema validation turning normalized records into [`PresetChoice`]s
//!
//! The record shape lives in `preset.schema.json`. Schema errors are mapped
//! back onto per-field messages so that every invalid entry reads like
//! `repo: Repo is required.`.

use crate::error::{Error, Result};
use crate::types::PresetChoice;
use jsonschema::Validator;
use serde_json::{Map, Value};
use std::sync::OnceLock;
use tracing::debug;
use url::Url;

/// JSON schema for one normalized choice record
const PRESET_SCHEMA: &str = include_str!("preset.schema.json");

const ROOT: &str = "(root)";
const REQUIRED_FIELDS: [&str; 3] = ["title", "preset", "repo"];
const ALLOWED_FIELDS: [&str; 4] = ["title", "preset", "repo", "after"];

const REPO_URL_MESSAGE: &str = "Repo must be a valid URL";
const REPO_SHAPE_MESSAGE: &str =
    "Repo must be a valid GitHub repository URL, e.g., https://github.com/user/repo";

/// A single violated field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Compiled preset schema
#[derive(Debug)]
pub struct ChoiceValidator {
    schema: Validator,
}

static VALIDATOR: OnceLock<ChoiceValidator> = OnceLock::new();

impl ChoiceValidator {
    /// Compile the embedded preset schema
    pub fn new() -> Result<Self> {
        let schema: Value = serde_json::from_str(PRESET_SCHEMA)?;
        let compiled = jsonschema::validator_for(&schema)
            .map_err(|e| Error::choices_schema(format!("Failed to compile preset schema: {}", e)))?;

        debug!("Compiled preset schema");
        Ok(Self { schema: compiled })
    }

    /// Shared instance, compiled on first use
    pub fn global() -> Result<&'static ChoiceValidator> {
        if let Some(validator) = VALIDATOR.get() {
            return Ok(validator);
        }
        let validator = Self::new()?;
        Ok(VALIDATOR.get_or_init(|| validator))
    }

    /// Validate one normalized record
    pub fn validate_record(
        &self,
        record: &Value,
    ) -> std::result::Result<PresetChoice, Vec<FieldIssue>> {
        let mut issues = Vec::new();
        let mut root_errors = false;

        for error in self.schema.iter_errors(record) {
            let pointer = error.instance_path().to_string();
            if pointer.is_empty() {
                root_errors = true;
            } else {
                issues.push(describe(&pointer, record, error.to_string()));
            }
        }

        match record.as_object() {
            None => return Err(vec![FieldIssue::new(ROOT, "Entry must be an object.")]),
            Some(map) if root_errors => issues.extend(shape_issues(map)),
            Some(_) => {}
        }

        if let Some(Value::String(repo)) = record.get("repo") {
            let has_repo_issue = issues.iter().any(|i| i.field == "repo");
            if !has_repo_issue && Url::parse(repo).is_err() {
                issues.push(FieldIssue::new("repo", REPO_URL_MESSAGE));
            }
        }

        if !issues.is_empty() {
            issues.sort_by_key(|issue| field_rank(&issue.field));
            issues.dedup();
            return Err(issues);
        }

        match (text(record, "title"), text(record, "preset"), text(record, "repo")) {
            (Some(title), Some(preset), Some(repo)) => {
                Ok(PresetChoice::new(title, preset, repo, after_commands(record)))
            }
            _ => Err(vec![FieldIssue::new(ROOT, "Entry does not match the preset schema.")]),
        }
    }

    /// Validate every record, failing with all per-entry issues at once
    pub fn validate_choices(&self, records: &[Value]) -> Result<Vec<PresetChoice>> {
        let mut choices = Vec::with_capacity(records.len());
        let mut errors = Vec::new();

        for (index, record) in records.iter().enumerate() {
            match self.validate_record(record) {
                Ok(choice) => choices.push(choice),
                Err(issues) => {
                    let detail = issues
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join("; ");
                    errors.push(format!("Entry #{} invalid: {}", index, detail));
                }
            }
        }

        if !errors.is_empty() {
            return Err(Error::choices_validation(errors));
        }

        Ok(choices)
    }
}

/// Validate records with the shared [`ChoiceValidator`]
pub fn validate_choices(records: &[Value]) -> Result<Vec<PresetChoice>> {
    ChoiceValidator::global()?.validate_choices(records)
}

/// Message for a schema error located at `pointer` (e.g. `/title`, `/after/0`)
fn describe(pointer: &str, record: &Value, fallback: String) -> FieldIssue {
    let field = pointer.trim_start_matches('/').replace('/', ".");
    let value = record.pointer(pointer);

    let message = match field.as_str() {
        "title" | "preset" => {
            let label = if field == "title" { "Title" } else { "Preset" };
            match value {
                None | Some(Value::Null) => format!("{} is required.", label),
                Some(Value::String(s)) if s.is_empty() => format!("{} cannot be empty.", label),
                Some(Value::String(_)) => fallback,
                Some(_) => format!("{} must be a string.", label),
            }
        }
        "repo" => match value {
            None | Some(Value::Null) => "Repo is required.".to_string(),
            Some(Value::String(s)) if Url::parse(s).is_ok() => REPO_SHAPE_MESSAGE.to_string(),
            _ => REPO_URL_MESSAGE.to_string(),
        },
        "after" => "After must be a list of strings.".to_string(),
        f if f.starts_with("after.") => "After command must be a string.".to_string(),
        _ => fallback,
    };

    FieldIssue::new(field, message)
}

/// Issues behind object-level schema errors: missing and unknown keys
fn shape_issues(map: &Map<String, Value>) -> Vec<FieldIssue> {
    let missing = REQUIRED_FIELDS
        .iter()
        .filter(|field| !map.contains_key(**field))
        .map(|field| FieldIssue::new(*field, format!("{} is required.", label_of(field))));

    let unknown = map
        .keys()
        .filter(|key| !ALLOWED_FIELDS.contains(&key.as_str()))
        .map(|key| FieldIssue::new(key.as_str(), "Unrecognized field."));

    missing.chain(unknown).collect()
}

fn label_of(field: &str) -> &'static str {
    match field {
        "title" => "Title",
        "preset" => "Preset",
        _ => "Repo",
    }
}

/// Report order: whole entry, then fields in schema order, then anything else
fn field_rank(field: &str) -> usize {
    let head = field.split('.').next().unwrap_or(field);
    match head {
        ROOT => 0,
        "title" => 1,
        "preset" => 2,
        "repo" => 3,
        "after" => 4,
        _ => 5,
    }
}

fn text(record: &Value, field: &str) -> Option<String> {
    record.get(field).and_then(Value::as_str).map(str::to_string)
}

fn after_commands(record: &Value) -> Vec<String> {
    record
        .get("after")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
