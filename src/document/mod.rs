//! Key-value configuration documents
//!
//! Experiment files from the CODEX Toolkit and segmentation parameter files
//! are flat key-value documents whose field names vary between submitters.
//! This module loads them into a common representation and looks fields up
//! by a list of accepted aliases.

use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use serde_json::{Map, Value};

use crate::errors::{PrepError, PrepResult};


lazy_static! {
    static ref INTEGER_VALUE: Regex = Regex::new(r"^-?[0-9]+$").unwrap();
}

/// A flat key-value document
#[derive(Debug, Clone)]
pub struct ConfigDocument {
    /// Label used in error messages, usually the file path
    pub source: String,
    /// Top-level fields of the document
    pub fields: Map<String, Value>,
}

impl ConfigDocument {
    /// Wrap an existing JSON object
    pub fn new(source: &str, fields: Map<String, Value>) -> Self {
        ConfigDocument {
            source: source.to_string(),
            fields,
        }
    }

    /// Parse a JSON object from a string
    ///
    /// # Arguments
    /// * `source` - Label for the document
    /// * `text` - JSON text; the top level must be an object
    pub fn from_json_str(source: &str, text: &str) -> PrepResult<Self> {
        match serde_json::from_str::<Value>(text)? {
            Value::Object(fields) => Ok(ConfigDocument::new(source, fields)),
            other => Err(PrepError::GenericError(format!(
                "Expected a JSON object at the top level of {}, found {}",
                source,
                json_type_name(&other)
            ))),
        }
    }

    /// Read and parse a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> PrepResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        debug!("Read file {}", path.display());
        Self::from_json_str(&path.display().to_string(), &text)
    }

    /// Parse `name=value` lines
    ///
    /// Values made only of digits (with an optional leading minus sign)
    /// become integers; everything else is kept as a string.
    pub fn from_key_value_str(source: &str, text: &str) -> PrepResult<Self> {
        let mut fields = Map::new();

        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let (name, contents) = line.split_once('=').ok_or_else(|| {
                PrepError::GenericError(format!(
                    "{} line {}: expected name=value, found '{}'",
                    source,
                    line_no + 1,
                    line
                ))
            })?;
            let name = name.trim();
            let contents = contents.trim();

            let value = if INTEGER_VALUE.is_match(contents) {
                contents
                    .parse::<i64>()
                    .map(Value::from)
                    .unwrap_or_else(|_| Value::from(contents))
            } else {
                Value::from(contents)
            };
            fields.insert(name.to_string(), value);
        }

        Ok(ConfigDocument::new(source, fields))
    }

    /// Read and parse a `name=value` text file
    pub fn from_key_value_file<P: AsRef<Path>>(path: P) -> PrepResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        debug!("Read file {}", path.display());
        Self::from_key_value_str(&path.display().to_string(), &text)
    }

    /// Whether the document has a field with this exact name
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Return the value of the first field in `names` that is present
    ///
    /// The order of `names` matters. Some documents carry two spellings of a
    /// field with only one of them holding a usable value (`aperture: 0.75`
    /// next to `numerical_aperture: 0.0`), so the preferred name goes first.
    pub fn collect_attribute(&self, names: &[&str]) -> PrepResult<&Value> {
        for name in names {
            if let Some(value) = self.fields.get(*name) {
                return Ok(value);
            }
        }

        Err(PrepError::MissingField(
            names.iter().map(|n| n.to_string()).collect(),
        ))
    }

    /// Like `collect_attribute`, but a missing field is `None`
    pub fn collect_optional(&self, names: &[&str]) -> Option<&Value> {
        names.iter().find_map(|name| self.fields.get(*name))
    }

    /// Collect a non-negative integer field
    pub fn collect_u64(&self, names: &[&str]) -> PrepResult<u64> {
        let value = self.collect_attribute(names)?;
        value
            .as_u64()
            .ok_or_else(|| PrepError::invalid(names[0], format!("expected a non-negative integer, found {}", value)))
    }

    /// Collect a signed integer field
    pub fn collect_i64(&self, names: &[&str]) -> PrepResult<i64> {
        let value = self.collect_attribute(names)?;
        value
            .as_i64()
            .ok_or_else(|| PrepError::invalid(names[0], format!("expected an integer, found {}", value)))
    }

    /// Collect a numeric field
    pub fn collect_f64(&self, names: &[&str]) -> PrepResult<f64> {
        let value = self.collect_attribute(names)?;
        value
            .as_f64()
            .ok_or_else(|| PrepError::invalid(names[0], format!("expected a number, found {}", value)))
    }

    /// Collect a string field
    pub fn collect_string(&self, names: &[&str]) -> PrepResult<String> {
        let value = self.collect_attribute(names)?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| PrepError::invalid(names[0], format!("expected a string, found {}", value)))
    }

    /// Collect a list of strings
    pub fn collect_string_list(&self, names: &[&str]) -> PrepResult<Vec<String>> {
        let value = self.collect_attribute(names)?;
        let items = value
            .as_array()
            .ok_or_else(|| PrepError::invalid(names[0], format!("expected a list, found {}", value)))?;

        items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| PrepError::invalid(names[0], format!("expected a list of strings, found {}", item)))
            })
            .collect()
    }

    /// Return a nested object as its own document
    pub fn nested(&self, name: &str) -> PrepResult<ConfigDocument> {
        match self.collect_attribute(&[name])? {
            Value::Object(fields) => Ok(ConfigDocument::new(
                &format!("{}:{}", self.source, name),
                fields.clone(),
            )),
            other => Err(PrepError::invalid(
                name,
                format!("expected an object, found {}", json_type_name(other)),
            )),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
