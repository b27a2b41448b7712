//! Task batch loading and validation
//!
//! A batch is either a bare array of tasks or an object with a `tasks` array,
//! written as JSON or YAML. Every task is checked before scoring starts so
//! the engine only ever sees well-formed records.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::domain::TaskRecord;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to read {path}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Malformed JSON: {0}")]
    Json(#[source] serde_json::Error),

    #[error("Malformed YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Expecting an array of tasks or {{\"tasks\": [...]}}")]
    Shape,

    #[error("tasks[{index}]: {message}")]
    Task { index: usize, message: String },
}

/// Encoding of a batch source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchFormat {
    #[default]
    Json,
    Yaml,
}

impl BatchFormat {
    /// Picks YAML for `.yaml`/`.yml` files and JSON otherwise
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                BatchFormat::Yaml
            }
            _ => BatchFormat::Json,
        }
    }
}

/// Reads a batch from a file, or from stdin when `path` is `None` or `-`
pub fn read_batch(path: Option<&Path>) -> Result<Vec<TaskRecord>, InputError> {
    match path {
        Some(path) if path != Path::new("-") => {
            let content = fs::read_to_string(path).map_err(|source| InputError::Read {
                path: path.display().to_string(),
                source,
            })?;
            parse_batch(&content, BatchFormat::from_path(path))
        }
        _ => {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .map_err(|source| InputError::Read {
                    path: "stdin".to_string(),
                    source,
                })?;
            parse_batch(&content, BatchFormat::Json)
        }
    }
}

/// Parses and validates a batch
pub fn parse_batch(content: &str, format: BatchFormat) -> Result<Vec<TaskRecord>, InputError> {
    let value: Value = match format {
        BatchFormat::Json => serde_json::from_str(content).map_err(InputError::Json)?,
        BatchFormat::Yaml => serde_yaml::from_str(content)?,
    };

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("tasks") {
            Some(Value::Array(items)) => items,
            _ => return Err(InputError::Shape),
        },
        _ => return Err(InputError::Shape),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| validate(index, item))
        .collect()
}

fn validate(index: usize, item: Value) -> Result<TaskRecord, InputError> {
    let invalid = |message: String| InputError::Task { index, message };

    let mut task: TaskRecord =
        serde_json::from_value(item).map_err(|e| invalid(e.to_string()))?;

    if task.title.trim().is_empty() {
        return Err(invalid("title must not be blank".to_string()));
    }
    if !task.estimated_hours.is_finite() || task.estimated_hours < 0.0 {
        return Err(invalid(format!(
            "estimated_hours must be a non-negative number, got {}",
            task.estimated_hours
        )));
    }

    if task.id.as_deref().is_some_and(str::is_empty) {
        task.id = None;
    }

    Ok(task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_bare_array() {
        let json = r#"[
            {"id": "a", "title": "Write spec", "due_date": "2024-06-03",
             "estimated_hours": 2.5, "importance": 8, "dependencies": ["b"]},
            {"title": "Review"}
        ]"#;
        let tasks = parse_batch(json, BatchFormat::Json).unwrap();

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].effective_id(), "a");
        assert_eq!(tasks[0].dependencies, vec!["b"]);
        assert_eq!(tasks[1].effective_id(), "Review");
        assert_eq!(tasks[1].estimated_hours, 1.0);
    }

    #[test]
    fn parses_wrapped_object() {
        let json = r#"{"tasks": [{"title": "One"}, {"title": "Two"}]}"#;
        let tasks = parse_batch(json, BatchFormat::Json).unwrap();
        assert_eq!(tasks.len(), 2);
    }

    #[test]
    fn parses_yaml() {
        let yaml = "tasks:\n  - title: One\n    importance: 9\n    dependencies: [Two]\n  - title: Two\n";
        let tasks = parse_batch(yaml, BatchFormat::Yaml).unwrap();

        assert_eq!(tasks[0].importance(), 9);
        assert_eq!(tasks[0].dependencies, vec!["Two"]);
    }

    #[test]
    fn rejects_wrong_shape() {
        assert!(matches!(
            parse_batch(r#"{"title": "x"}"#, BatchFormat::Json),
            Err(InputError::Shape)
        ));
        assert!(matches!(
            parse_batch("42", BatchFormat::Json),
            Err(InputError::Shape)
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            parse_batch("[{", BatchFormat::Json),
            Err(InputError::Json(_))
        ));
    }

    #[test]
    fn reports_task_position() {
        let json = r#"[{"title": "ok"}, {"importance": 3}]"#;
        match parse_batch(json, BatchFormat::Json) {
            Err(InputError::Task { index, message }) => {
                assert_eq!(index, 1);
                assert!(message.contains("title"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn rejects_blank_title_and_negative_hours() {
        assert!(parse_batch(r#"[{"title": "  "}]"#, BatchFormat::Json).is_err());
        assert!(parse_batch(r#"[{"title": "x", "estimated_hours": -1}]"#, BatchFormat::Json).is_err());
    }

    #[test]
    fn coerces_numeric_strings() {
        let json = r#"[{"title": "x", "importance": "7", "estimated_hours": "2.5"}]"#;
        let tasks = parse_batch(json, BatchFormat::Json).unwrap();
        assert_eq!(tasks[0].importance, 7);
        assert_eq!(tasks[0].estimated_hours, 2.5);
    }

    #[test]
    fn coerces_integral_float_importance() {
        let tasks = parse_batch(r#"[{"title": "x", "importance": 7.0}]"#, BatchFormat::Json).unwrap();
        assert_eq!(tasks[0].importance, 7);

        let yaml = "- title: x\n  importance: '8'\n  estimated_hours: 3\n";
        let tasks = parse_batch(yaml, BatchFormat::Yaml).unwrap();
        assert_eq!(tasks[0].importance, 8);
        assert_eq!(tasks[0].estimated_hours, 3.0);
    }

    #[test]
    fn rejects_uncoercible_numbers() {
        for json in [
            r#"[{"title": "x", "importance": 7.5}]"#,
            r#"[{"title": "x", "importance": "high"}]"#,
            r#"[{"title": "x", "estimated_hours": "a while"}]"#,
        ] {
            assert!(
                matches!(parse_batch(json, BatchFormat::Json), Err(InputError::Task { index: 0, .. })),
                "{}",
                json
            );
        }
    }

    #[test]
    fn blank_id_falls_back_to_title() {
        let tasks = parse_batch(r#"[{"id": "", "title": "x"}]"#, BatchFormat::Json).unwrap();
        assert_eq!(tasks[0].id, None);
        assert_eq!(tasks[0].effective_id(), "x");
    }

    #[test]
    fn malformed_due_date_is_accepted() {
        let tasks = parse_batch(r#"[{"title": "x", "due_date": "someday"}]"#, BatchFormat::Json).unwrap();
        assert_eq!(tasks[0].due(), None);
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(BatchFormat::from_path(Path::new("tasks.yml")), BatchFormat::Yaml);
        assert_eq!(BatchFormat::from_path(Path::new("tasks.YAML")), BatchFormat::Yaml);
        assert_eq!(BatchFormat::from_path(Path::new("tasks.json")), BatchFormat::Json);
        assert_eq!(BatchFormat::from_path(Path::new("tasks")), BatchFormat::Json);
    }

    #[test]
    fn reads_batch_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("batch.yaml");
        fs::write(&path, "- title: From file\n").unwrap();

        let tasks = read_batch(Some(&path)).unwrap();
        assert_eq!(tasks[0].title, "From file");
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let result = read_batch(Some(&dir.path().join("nope.json")));
        assert!(matches!(result, Err(InputError::Read { .. })));
    }
}
