//! SDK stub generation
//!
//! One generator drives every target language. A [`TargetLanguage`] supplies
//! the type table and the syntax for each fragment of the stub; [`generate`]
//! partitions parameters and assembles the fragments.

mod dotnet;
mod go;
mod python;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::{model::Command, Result};

pub use dotnet::DotNet;
pub use go::Go;
pub use python::Python;

/// Source type of a whitespace-joined list of strings
pub const STRING_LIST_TYPE: &str = "std::vector<std::string>";
/// Marker of the two-integer `low:high` range type
pub const RANGE_TYPE_MARKER: &str = "colon_delimited2_item";

/// Client language to generate stubs for
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[default]
    Python,
    Go,
    #[strum(to_string = "dotnet", serialize = "csharp")]
    DotNet,
}

impl Target {
    /// The strategy for this target
    #[must_use]
    pub fn language(self) -> &'static dyn TargetLanguage {
        match self {
            Self::Python => &Python,
            Self::Go => &Go,
            Self::DotNet => &DotNet,
        }
    }
}

/// How a source type is marshalled, independent of target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Scalar,
    /// Joined with spaces when positional, a collection when optional
    StringList,
    /// A tuple in signatures, `"low:high"` when optional
    Range,
}

impl TypeKind {
    #[must_use]
    pub fn classify(source_type: &str) -> Self {
        if source_type == STRING_LIST_TYPE {
            Self::StringList
        } else if source_type.contains(RANGE_TYPE_MARKER) {
            Self::Range
        } else {
            Self::Scalar
        }
    }
}

/// A parameter resolved for rendering
#[derive(Debug, Clone, Copy)]
pub struct Binding<'a> {
    pub name: &'a str,
    pub source_type: &'a str,
    pub kind: TypeKind,
    pub required: bool,
    pub description: &'a str,
}

/// Rendered fragments handed to a target's template
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    pub command: &'a str,
    pub function_name: String,
    pub comments: String,
    pub signature: String,
    pub positional: String,
    pub optional: String,
}

/// Human-readable names for source types that have no obvious target form
#[must_use]
pub fn describe_source_type(source_type: &str) -> &str {
    match source_type {
        "explorer::config::transaction" => "string of hexcode",
        STRING_LIST_TYPE => "list of string",
        "bc::config::hash256" => "string of hash256",
        "boost::filesystem::path" => "string of file path",
        "bc::wallet::payment_address" => "string of Base58-encoded public key address",
        t if t.contains(RANGE_TYPE_MARKER) => "a range expressed by 2 integers",
        t => t,
    }
}

/// Type mapping and syntax rendering for one client language
pub trait TargetLanguage: Sync {
    /// The tag this strategy is selected by
    fn target(&self) -> Target;

    /// Nearest target type for a source type; unknown types are an error
    fn map_type(&self, source_type: &str) -> Option<&'static str>;

    /// Type text shown in the doc comment
    fn describe_type(&self, source_type: &str, command: &str) -> Result<String> {
        self.checked_type(source_type, command)
            .map(|_| describe_source_type(source_type).to_string())
    }

    /// Name of the generated function or method
    fn function_name(&self, command: &str) -> String {
        command.to_string()
    }

    /// Parameter list of the generated signature
    fn render_signature(&self, bindings: &[Binding<'_>], command: &str) -> Result<String>;

    /// Expressions for positional arguments, in binding order
    fn render_positional_list(&self, bindings: &[Binding<'_>], command: &str) -> Result<String>;

    /// Entries of the optional-argument collection
    fn render_optional_map(&self, bindings: &[Binding<'_>]) -> String;

    /// Fill the target's template
    fn render(&self, context: &RenderContext<'_>) -> Result<String>;

    /// [`Self::map_type`] with the unknown case turned into an error
    fn checked_type(&self, source_type: &str, command: &str) -> Result<&'static str> {
        self.map_type(source_type)
            .ok_or_else(|| crate::Error::unknown_type(self.target(), source_type, command))
    }
}

fn render_error(e: &askama::Error) -> crate::Error {
    crate::Error::Render(e.to_string())
}

/// Render a command's stub for `target`
pub fn generate(command: &Command, target: Target) -> Result<String> {
    let language = target.language();

    let bindings: Vec<Binding<'_>> = command
        .parameters
        .iter()
        .map(|p| Binding {
            name: &p.name,
            source_type: &p.definition.value_type,
            kind: TypeKind::classify(&p.definition.value_type),
            required: p.definition.required,
            description: &p.description,
        })
        .collect();

    let positional: Vec<Binding<'_>> = command
        .positional
        .iter()
        .unique_by(|arg| arg.name.clone())
        .filter_map(|arg| {
            let found = bindings.iter().find(|b| b.name == arg.name).copied();
            if found.is_none() {
                tracing::warn!(
                    command = %command.name,
                    positional = %arg.name,
                    "Positional argument has no option declaration; skipping"
                );
            }
            found
        })
        .collect();

    let positional_names = command.positional_names();
    let optional: Vec<Binding<'_>> = bindings
        .iter()
        .filter(|b| !positional_names.contains(b.name))
        .copied()
        .collect();

    let comments = bindings
        .iter()
        .map(|b| {
            language
                .describe_type(b.source_type, &command.name)
                .map(|ty| format!("    :param: {}({ty}): {}", b.name, b.description))
        })
        .collect::<Result<Vec<_>>>()?
        .join("\n");

    let context = RenderContext {
        command: &command.name,
        function_name: language.function_name(&command.name),
        comments,
        signature: language.render_signature(&bindings, &command.name)?,
        positional: language.render_positional_list(&positional, &command.name)?,
        optional: language.render_optional_map(&optional),
    };

    tracing::debug!(command = %command.name, %target, "Rendering stub");
    language.render(&context)
}
