//! Header metadata extraction
//!
//! Command headers follow a fixed layout:
//!
//! ```text
//! static const char* symbol(){ return "listtxs";}
//! ...
//! return get_argument_metadata()
//!     .add("ACCOUNTNAME", 1)
//!     .add("ACCOUNTAUTH", 1);
//! ...
//! options.add_options()
//! (
//!     BX_HELP_VARIABLE ",h",
//!     value<bool>()->zero_tokens(),
//!     "Get a description and instructions for this command."
//! )
//! (
//!     "limit,l",
//!     value<uint64_t>(&argument_.limit)->default_value(100),
//!     "Transaction count per page."
//! );
//! ```
//!
//! The extractor recovers the command name, the positional registrations and
//! every parameter triple after the help option. Anything outside the known
//! attribute grammar is an error, never a silent skip.

use std::path::Path;

use itertools::Itertools;
use regex::Regex;

use crate::{
    error::{ExtractError, ExtractErrorKind},
    macros,
    model::{Command, Parameter, ParameterDefinition, PositionalArg},
    Error, Result,
};

const POSITIONAL_MARKER: &str = "return get_argument_metadata()";
const OPTIONS_MARKER: &str = "BX_HELP_VARIABLE \",h\",";

const SYMBOL_PATTERN: &str = r#"\{\s*return\s+"(\w+)"\s*;\s*\}"#;
const POSITIONAL_PATTERN: &str = r#"\.add\(\s*"([^",]+)"\s*,\s*(-?\d+)\s*\)"#;
const TRIPLE_PATTERN: &str = r"\s+\(\n([\s\S]+?)\s+\)[;\n]";
const NAME_PATTERN: &str = r#""-*([/\w]+)(?:,(\w+))?""#;
const VALUE_TYPE_PATTERN: &str = r"(?s)value<(.+)>";
const DEFAULT_VALUE_PATTERN: &str = r"(?s)^default_value\((.+)\)$";
const LITERALS_PATTERN: &str = r#"^(?:\s*"(?:[^"\\]|\\.)*")+\s*$"#;
const LITERAL_PATTERN: &str = r#""((?:[^"\\]|\\.)*)""#;

/// Compiled patterns for reading command headers
#[derive(Debug, Clone)]
pub struct Extractor {
    symbol: Regex,
    positional: Regex,
    triple: Regex,
    name: Regex,
    value_type: Regex,
    default_value: Regex,
    literals: Regex,
    literal: Regex,
}

/// Lines from `start` up to and including the first one ending in `;`
struct Block {
    text: String,
    first_line: usize,
}

fn accumulate(lines: &[&str], start: usize) -> Block {
    let mut text = String::new();
    for line in lines.iter().skip(start) {
        text.push_str(line);
        text.push('\n');
        if line.trim().ends_with(';') {
            break;
        }
    }
    Block {
        text,
        first_line: start + 1,
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::Pattern(format!("{pattern}: {e}")))
}

fn unescape(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len());
    let mut chars = literal.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

impl Extractor {
    /// Compile the header patterns
    pub fn new() -> Result<Self> {
        Ok(Self {
            symbol: compile(SYMBOL_PATTERN)?,
            positional: compile(POSITIONAL_PATTERN)?,
            triple: compile(TRIPLE_PATTERN)?,
            name: compile(NAME_PATTERN)?,
            value_type: compile(VALUE_TYPE_PATTERN)?,
            default_value: compile(DEFAULT_VALUE_PATTERN)?,
            literals: compile(LITERALS_PATTERN)?,
            literal: compile(LITERAL_PATTERN)?,
        })
    }

    /// Read and extract one header file
    pub fn extract_file(&self, path: &Path) -> Result<Command> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read {}", path.display()), &e))?;
        self.extract(&text)
            .map_err(|e| Error::extract(path, e))
    }

    /// Extract a command from header text
    pub fn extract(&self, text: &str) -> std::result::Result<Command, ExtractError> {
        let text = text.replace("\r\n", "\n");
        let lines: Vec<&str> = text.lines().collect();

        let name = self
            .command_name(&lines)
            .ok_or_else(|| ExtractError::new(ExtractErrorKind::MissingSymbol, "symbol()"))?;

        let positional = lines
            .iter()
            .position(|line| line.contains(POSITIONAL_MARKER))
            .map(|start| self.positional_args(&accumulate(&lines, start).text))
            .unwrap_or_default();

        let options_start = lines
            .iter()
            .position(|line| line.trim() == OPTIONS_MARKER)
            .ok_or_else(|| ExtractError::new(ExtractErrorKind::MissingOptionsBlock, OPTIONS_MARKER))?;
        let block = accumulate(&lines, options_start + 1);
        let parameters = self.parameters(&block)?;

        tracing::debug!(
            command = %name,
            positional = positional.len(),
            parameters = parameters.len(),
            "Extracted command"
        );

        Ok(Command {
            name,
            positional,
            parameters,
        })
    }

    fn command_name(&self, lines: &[&str]) -> Option<String> {
        lines
            .iter()
            .filter(|line| line.contains("symbol"))
            .find_map(|line| self.symbol.captures(line))
            .map(|caps| caps[1].to_string())
    }

    /// The `.add("NAME", n)` registrations in a positional block
    ///
    /// A name registered twice keeps its first registration.
    pub fn positional_args(&self, block: &str) -> Vec<PositionalArg> {
        self.positional
            .captures_iter(block)
            .filter_map(|caps| {
                caps[2].parse().ok().map(|position| PositionalArg {
                    name: caps[1].to_string(),
                    position,
                })
            })
            .unique_by(|arg| arg.name.clone())
            .collect()
    }

    fn parameters(&self, block: &Block) -> std::result::Result<Vec<Parameter>, ExtractError> {
        self.triple
            .captures_iter(&block.text)
            .map(|caps| {
                let whole = caps.get(0).map_or(0, |m| m.start());
                let line = block.first_line + block.text[..whole].matches('\n').count() + 1;
                self.parameter(&caps[1]).map_err(|e| e.at_line(line))
            })
            .collect()
    }

    /// Parse the body of one parenthesised triple
    pub fn parameter(&self, body: &str) -> std::result::Result<Parameter, ExtractError> {
        let segments: Vec<&str> = body.split(",\n").collect();
        let [name, definition, description] = segments.as_slice() else {
            return Err(ExtractError::new(
                ExtractErrorKind::MalformedParameter {
                    segments: segments.len(),
                },
                body.trim(),
            ));
        };

        let (name, alias) = self.parameter_name(name);
        Ok(Parameter {
            name,
            alias,
            definition: self.definition(definition)?,
            description: self.description(description),
        })
    }

    /// `"name,a"` → (`name`, `Some("a")`); anything else is taken literally
    pub fn parameter_name(&self, segment: &str) -> (String, Option<String>) {
        self.name.captures(segment).map_or_else(
            || (segment.trim().to_string(), None),
            |caps| {
                (
                    caps[1].to_string(),
                    caps.get(2).map(|m| m.as_str().to_string()),
                )
            },
        )
    }

    /// Parse `value<T>(...)->clause()->clause()`
    pub fn definition(
        &self,
        segment: &str,
    ) -> std::result::Result<ParameterDefinition, ExtractError> {
        let mut clauses = segment.split("->");
        let head = clauses.next().unwrap_or_default();
        let value_type = self
            .value_type
            .captures(head)
            .map(|caps| caps[1].trim().to_string())
            .ok_or_else(|| ExtractError::new(ExtractErrorKind::MissingValueType, segment.trim()))?;

        clauses.try_fold(ParameterDefinition::new(value_type), |mut def, clause| {
            let clause = clause.trim();
            let keyword = clause.split('(').next().unwrap_or_default().trim();
            match keyword {
                "required" => def.required = true,
                "zero_tokens" => def.flag_only = true,
                "default_value" => {
                    let value = self
                        .default_value
                        .captures(clause)
                        .map(|caps| caps[1].trim().to_string())
                        .ok_or_else(|| {
                            ExtractError::new(ExtractErrorKind::MalformedDefault, clause)
                        })?;
                    def.default_value = Some(value);
                }
                _ => {
                    return Err(ExtractError::new(ExtractErrorKind::UnknownClause, clause));
                }
            }
            Ok(def)
        })
    }

    /// Normalise a description: join continuations, expand macros, unquote
    pub fn description(&self, segment: &str) -> String {
        let text = segment.trim().replace("\\\n", "");
        if self.literals.is_match(&text) {
            return self
                .literal
                .captures_iter(&text)
                .map(|caps| unescape(&caps[1]))
                .collect();
        }
        macros::expand(&text).into_owned()
    }
}
