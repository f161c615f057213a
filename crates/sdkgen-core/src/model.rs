//! Command metadata recovered from a header

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// How a parameter is declared: value type plus attribute clauses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDefinition {
    /// Source-language type inside `value<...>`
    pub value_type: String,
    /// Set by `->required()`
    pub required: bool,
    /// Expression passed to `->default_value(...)`
    pub default_value: Option<String>,
    /// Set by `->zero_tokens()`; the option takes no value
    pub flag_only: bool,
}

impl ParameterDefinition {
    /// Create a definition with no attribute clauses
    #[must_use]
    pub fn new(value_type: impl Into<String>) -> Self {
        Self {
            value_type: value_type.into(),
            ..Self::default()
        }
    }
}

/// One declared option of a command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    /// Short alias from `"name,a"`
    pub alias: Option<String>,
    pub definition: ParameterDefinition,
    pub description: String,
}

/// A positional registration: `.add("NAME", position)`
///
/// `position` is the numeric hint passed at registration (`-1` means
/// unbounded). Binding order is registration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionalArg {
    pub name: String,
    pub position: i32,
}

/// A remote-invocable command and its parameter schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub name: String,
    pub positional: Vec<PositionalArg>,
    pub parameters: Vec<Parameter>,
}

impl Command {
    /// Names registered as positional
    #[must_use]
    pub fn positional_names(&self) -> BTreeSet<&str> {
        self.positional.iter().map(|p| p.name.as_str()).collect()
    }

    /// Find a declared parameter by name
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command() -> Command {
        Command {
            name: "getbalance".to_string(),
            positional: vec![
                PositionalArg {
                    name: "ACCOUNTNAME".to_string(),
                    position: 1,
                },
                PositionalArg {
                    name: "ACCOUNTAUTH".to_string(),
                    position: 1,
                },
            ],
            parameters: vec![Parameter {
                name: "ACCOUNTNAME".to_string(),
                alias: None,
                definition: ParameterDefinition {
                    required: true,
                    ..ParameterDefinition::new("std::string")
                },
                description: "Account name required.".to_string(),
            }],
        }
    }

    #[test]
    fn test_positional_names_is_ordered_set() {
        let mut cmd = command();
        cmd.positional.push(PositionalArg {
            name: "ACCOUNTNAME".to_string(),
            position: 1,
        });
        let names: Vec<_> = cmd.positional_names().into_iter().collect();
        assert_eq!(names, vec!["ACCOUNTAUTH", "ACCOUNTNAME"]);
        assert!(!cmd.positional_names().contains("limit"));
    }

    #[test]
    fn test_parameter_lookup() {
        let cmd = command();
        assert!(cmd.parameter("ACCOUNTNAME").is_some());
        assert!(cmd.parameter("ACCOUNTAUTH").is_none());
    }

    #[test]
    fn test_command_serializes_to_json() {
        let json = serde_json::to_value(command()).expect("serialize");
        assert_eq!(json["name"], "getbalance");
        assert_eq!(json["parameters"][0]["definition"]["required"], true);
        assert_eq!(json["positional"][1]["position"], 1);
    }
}
