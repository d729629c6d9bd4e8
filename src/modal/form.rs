use crate::shared::{FieldName, FormId};
use getrandom::getrandom;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw, unvalidated field inputs as typed in the dialog. Nothing here caches
/// validity; `validate_draft` is the only source of truth and is re-run on
/// every mutation.
pub type FormDraft = BTreeMap<FieldName, String>;

/// Validation messages keyed by the offending field.
pub type FieldErrors = BTreeMap<FieldName, String>;

/// Typed values produced by a successful validation.
pub type EntityValues = BTreeMap<FieldName, FieldValue>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Text {
        #[serde(default)]
        min_len: usize,
        #[serde(default)]
        max_len: Option<usize>,
    },
    Number {
        #[serde(default)]
        min: Option<i64>,
        #[serde(default)]
        max: Option<i64>,
    },
    Flag,
    Choice {
        options: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: FieldName,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSchema {
    pub title: String,
    pub fields: Vec<FieldSpec>,
}

impl FormSchema {
    pub fn field(&self, name: &FieldName) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| &spec.name == name)
    }

    /// Construction-time checks for a configured schema. Draft-level
    /// problems are reported by `validate_draft` instead.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("form title must be non-empty".to_string());
        }
        if self.fields.is_empty() {
            return Err("form must declare at least one field".to_string());
        }
        for (idx, spec) in self.fields.iter().enumerate() {
            if self.fields[..idx].iter().any(|other| other.name == spec.name) {
                return Err(format!("duplicate field `{}`", spec.name));
            }
            if spec.label.trim().is_empty() {
                return Err(format!("field `{}` must have a label", spec.name));
            }
            match &spec.kind {
                FieldKind::Text { min_len, max_len } => {
                    if let Some(max_len) = max_len {
                        if min_len > max_len {
                            return Err(format!(
                                "field `{}` has min_len {} greater than max_len {}",
                                spec.name, min_len, max_len
                            ));
                        }
                    }
                }
                FieldKind::Number { min, max } => {
                    if let (Some(min), Some(max)) = (min, max) {
                        if min > max {
                            return Err(format!(
                                "field `{}` has min {} greater than max {}",
                                spec.name, min, max
                            ));
                        }
                    }
                }
                FieldKind::Flag => {}
                FieldKind::Choice { options } => {
                    if options.is_empty() {
                        return Err(format!(
                            "field `{}` must list at least one choice option",
                            spec.name
                        ));
                    }
                    for (opt_idx, option) in options.iter().enumerate() {
                        if option.trim().is_empty() {
                            return Err(format!(
                                "field `{}` has a blank choice option",
                                spec.name
                            ));
                        }
                        if options[..opt_idx].contains(option) {
                            return Err(format!(
                                "field `{}` repeats choice option `{}`",
                                spec.name, option
                            ));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Number(i64),
    Flag(bool),
    Choice(String),
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(value) | FieldValue::Choice(value) => write!(f, "{value}"),
            FieldValue::Number(value) => write!(f, "{value}"),
            FieldValue::Flag(true) => write!(f, "yes"),
            FieldValue::Flag(false) => write!(f, "no"),
        }
    }
}

/// Pure, synchronous draft validation. Either every field checks out and the
/// typed values come back, or the caller gets one message per offending
/// field to surface next to its input. Identical drafts always produce
/// identical results.
pub fn validate_draft(schema: &FormSchema, draft: &FormDraft) -> Result<EntityValues, FieldErrors> {
    let mut values = EntityValues::new();
    let mut errors = FieldErrors::new();

    for spec in &schema.fields {
        let raw = draft
            .get(&spec.name)
            .map(|value| value.trim())
            .unwrap_or("");
        if raw.is_empty() {
            if spec.required {
                errors.insert(spec.name.clone(), "value is required".to_string());
            }
            continue;
        }
        match parse_field_value(&spec.kind, raw) {
            Ok(value) => {
                values.insert(spec.name.clone(), value);
            }
            Err(message) => {
                errors.insert(spec.name.clone(), message);
            }
        }
    }

    // Draft/schema drift is a bug; fail closed instead of dropping input.
    for name in draft.keys() {
        if schema.field(name).is_none() {
            errors.insert(name.clone(), "unknown field".to_string());
        }
    }

    if errors.is_empty() {
        Ok(values)
    } else {
        Err(errors)
    }
}

fn parse_field_value(kind: &FieldKind, raw: &str) -> Result<FieldValue, String> {
    match kind {
        FieldKind::Text { min_len, max_len } => {
            let length = raw.chars().count();
            if length < *min_len {
                return Err(format!("must be at least {min_len} characters"));
            }
            if let Some(max_len) = max_len {
                if length > *max_len {
                    return Err(format!("must be at most {max_len} characters"));
                }
            }
            Ok(FieldValue::Text(raw.to_string()))
        }
        FieldKind::Number { min, max } => {
            let value: i64 = raw
                .parse()
                .map_err(|_| "must be a whole number".to_string())?;
            if let Some(min) = min {
                if value < *min {
                    return Err(format!("must be at least {min}"));
                }
            }
            if let Some(max) = max {
                if value > *max {
                    return Err(format!("must be at most {max}"));
                }
            }
            Ok(FieldValue::Number(value))
        }
        FieldKind::Flag => match raw.to_ascii_lowercase().as_str() {
            "true" | "yes" => Ok(FieldValue::Flag(true)),
            "false" | "no" => Ok(FieldValue::Flag(false)),
            _ => Err("must be one of: true, false, yes, no".to_string()),
        },
        FieldKind::Choice { options } => {
            if options.iter().any(|option| option == raw) {
                Ok(FieldValue::Choice(raw.to_string()))
            } else {
                Err(format!("must be one of: {}", options.join(", ")))
            }
        }
    }
}

/// An entity materialized by a successful submission. Records live in memory
/// for the shell session; nothing persists them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRecord {
    pub id: String,
    pub form: FormId,
    pub values: EntityValues,
    pub created_at: i64,
}

const BASE36_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const REC_SUFFIX_SPACE: u32 = 36 * 36 * 36 * 36;
const REC_ID_MAX_GENERATION_ATTEMPTS: usize = 16;

fn base36_encode_u64(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut chars = Vec::new();
    while value > 0 {
        chars.push(BASE36_ALPHABET[(value % 36) as usize] as char);
        value /= 36;
    }
    chars.into_iter().rev().collect()
}

fn base36_encode_fixed_u32(mut value: u32, width: usize) -> String {
    let mut chars = vec!['0'; width];
    for idx in (0..width).rev() {
        chars[idx] = BASE36_ALPHABET[(value % 36) as usize] as char;
        value /= 36;
    }
    chars.into_iter().collect()
}

pub fn generate_record_id(now: i64) -> Result<String, String> {
    let timestamp = u64::try_from(now)
        .map_err(|_| "record id requires a non-negative timestamp".to_string())?;
    let mut bytes = [0_u8; 4];
    getrandom(&mut bytes)
        .map_err(|err| format!("failed to generate record id randomness: {err}"))?;
    let sample = u32::from_le_bytes(bytes) % REC_SUFFIX_SPACE;
    Ok(format!(
        "rec-{}-{}",
        base36_encode_u64(timestamp),
        base36_encode_fixed_u32(sample, 4)
    ))
}

/// Generates an id not present among the session's existing records.
pub fn allocate_record_id(existing: &[EntityRecord], now: i64) -> Result<String, String> {
    for _ in 0..REC_ID_MAX_GENERATION_ATTEMPTS {
        let id = generate_record_id(now)?;
        if !existing.iter().any(|record| record.id == id) {
            return Ok(id);
        }
    }
    Err(format!(
        "failed to allocate unique record id after {REC_ID_MAX_GENERATION_ATTEMPTS} attempts"
    ))
}
