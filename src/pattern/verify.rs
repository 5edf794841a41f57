use serde_json::Value;

use super::types::{Pattern, Shape};

/// Outcome of matching a body against a pattern: the dotted paths of every
/// field that failed. Empty means the body conforms.
#[derive(Debug, Clone, Default)]
pub struct Verdict {
    pub invalids: Vec<String>,
}

impl Verdict {
    pub fn succeed(&self) -> bool {
        self.invalids.is_empty()
    }

    pub fn first_invalid(&self) -> &str {
        self.invalids.first().map(String::as_str).unwrap_or("body")
    }
}

pub fn verify(pattern: &Pattern, value: &Value) -> Verdict {
    let mut verdict = Verdict::default();
    check(pattern, value, "", &mut verdict.invalids);
    verdict
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

/// Record a failure at `path`. The root has no name of its own and is
/// reported as "body".
fn flag(path: &str, invalids: &mut Vec<String>) {
    if path.is_empty() {
        invalids.push("body".to_string());
    } else {
        invalids.push(path.to_string());
    }
}

fn check(pattern: &Pattern, value: &Value, path: &str, invalids: &mut Vec<String>) {
    match &pattern.shape {
        Shape::String { options, minimum_length } => match value {
            Value::String(text) => {
                if let Some(options) = options {
                    if !options.iter().any(|option| option == text) {
                        flag(path, invalids);
                        return;
                    }
                }
                if let Some(minimum) = minimum_length {
                    if text.chars().count() < *minimum {
                        flag(path, invalids);
                    }
                }
            }
            _ => flag(path, invalids),
        },
        Shape::Boolean => {
            if !value.is_boolean() {
                flag(path, invalids);
            }
        }
        Shape::Number => {
            if !value.is_number() {
                flag(path, invalids);
            }
        }
        Shape::Scalar => {
            if !(value.is_string() || value.is_number() || value.is_boolean()) {
                flag(path, invalids);
            }
        }
        Shape::List(element) => match value {
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    check(element, item, &join(path, &index.to_string()), invalids);
                }
            }
            _ => flag(path, invalids),
        },
        Shape::Map { entries, strict } => match value {
            Value::Object(object) => {
                for (key, entry) in entries {
                    match object.get(*key) {
                        Some(child) => check(entry, child, &join(path, key), invalids),
                        None => {
                            if !entry.optional {
                                invalids.push(join(path, key));
                            }
                        }
                    }
                }
                if *strict {
                    for key in object.keys() {
                        if !entries.iter().any(|(name, _)| name == key) {
                            invalids.push(join(path, key));
                        }
                    }
                }
            }
            _ => flag(path, invalids),
        },
        Shape::Record(element) => match value {
            Value::Object(object) => {
                for (key, child) in object {
                    check(element, child, &join(path, key), invalids);
                }
            }
            _ => flag(path, invalids),
        },
        Shape::OneOf(variants) => {
            let matched = variants.iter().any(|variant| {
                let mut probe = Vec::new();
                check(variant, value, path, &mut probe);
                probe.is_empty()
            });
            if !matched {
                flag(path, invalids);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn account_pattern() -> Pattern {
        Pattern::strict_map(vec![
            ("username", Pattern::string()),
            ("namespace", Pattern::string()),
        ])
    }

    #[test]
    fn test_strict_map_accepts_exact_shape() {
        let verdict = verify(
            &account_pattern(),
            &json!({"username": "tien", "namespace": "space"}),
        );
        assert!(verdict.succeed());
    }

    #[test]
    fn test_strict_map_rejects_unknown_key() {
        let verdict = verify(
            &account_pattern(),
            &json!({"username": "tien", "namespace": "space", "extra": 1}),
        );
        assert!(!verdict.succeed());
        assert_eq!(verdict.first_invalid(), "extra");
    }

    #[test]
    fn test_missing_required_key_reported_by_name() {
        let verdict = verify(&account_pattern(), &json!({"username": "tien"}));
        assert_eq!(verdict.invalids, vec!["namespace"]);
    }

    #[test]
    fn test_optional_key_may_be_absent() {
        let pattern = Pattern::strict_map(vec![
            ("username", Pattern::string()),
            ("displayName", Pattern::string().optional()),
        ]);
        assert!(verify(&pattern, &json!({"username": "tien"})).succeed());
    }

    #[test]
    fn test_enum_restricts_values() {
        let pattern = Pattern::strict_map(vec![(
            "activation",
            Pattern::string_enum(&["active", "inactive"]).optional(),
        )]);
        assert!(verify(&pattern, &json!({"activation": "active"})).succeed());
        assert!(verify(&pattern, &json!({})).succeed());

        let verdict = verify(&pattern, &json!({"activation": "enabled"}));
        assert_eq!(verdict.invalids, vec!["activation"]);
    }

    #[test]
    fn test_minimum_length() {
        let pattern = Pattern::strict_map(vec![(
            "applicationKey",
            Pattern::string().minimum_length(1),
        )]);
        assert!(!verify(&pattern, &json!({"applicationKey": ""})).succeed());
        assert!(verify(&pattern, &json!({"applicationKey": "portal"})).succeed());
    }

    #[test]
    fn test_list_reports_element_index() {
        let pattern = Pattern::strict_map(vec![("tags", Pattern::list(Pattern::string()))]);
        let verdict = verify(&pattern, &json!({"tags": ["blue", 7, "red"]}));
        assert_eq!(verdict.invalids, vec!["tags.1"]);
    }

    #[test]
    fn test_info_accepts_line_or_record() {
        let pattern = Pattern::strict_map(vec![("userInfos", Pattern::info())]);
        assert!(verify(&pattern, &json!({"userInfos": "job:engineer"})).succeed());
        assert!(verify(&pattern, &json!({"userInfos": {"job": "engineer", "level": 3}})).succeed());

        let verdict = verify(&pattern, &json!({"userInfos": {"nested": {"deep": 1}}}));
        assert_eq!(verdict.invalids, vec!["userInfos"]);
    }

    #[test]
    fn test_non_object_body_reported_as_body() {
        let verdict = verify(&account_pattern(), &json!("not a map"));
        assert_eq!(verdict.invalids, vec!["body"]);
    }
}
