//! Python stubs for the `mvs_api_v2` client

use askama::Template;
use itertools::Itertools;

use super::{render_error, Binding, RenderContext, Target, TargetLanguage, TypeKind};
use crate::Result;

#[derive(Template)]
#[template(path = "python.txt")]
struct PythonStub<'a> {
    stub: &'a RenderContext<'a>,
}

/// Decorated Python functions returning `(command, positional, optional)`
#[derive(Debug, Clone, Copy, Default)]
pub struct Python;

impl TargetLanguage for Python {
    fn target(&self) -> Target {
        Target::Python
    }

    fn map_type(&self, source_type: &str) -> Option<&'static str> {
        let mapped = match source_type {
            "uint8_t" | "uint16_t" | "uint32_t" | "std::uint32_t" | "uint64_t" => "int",
            "int8_t" | "int16_t" | "int32_t" | "std::int32_t" | "int64_t" => "int",
            "non_negative_uint64" => "int",
            "std::string" | "explorer::config::transaction" => "str",
            "bool" => "bool",
            "std::vector<std::string>" => "[str1, str2, ...]",
            "explorer::config::language" => "string of hexcode",
            "libbitcoin::explorer::commands::colon_delimited2_item<uint64_t, uint64_t>" => {
                "(int_low, int_high)"
            }
            "bc::config::hash256" => "string of hash256",
            "boost::filesystem::path" => "string of file path",
            "bc::wallet::payment_address" => "string of Base58-encoded public key address",
            _ => return None,
        };
        Some(mapped)
    }

    // Python has no declared types, so the docstring shows the mapped form.
    fn describe_type(&self, source_type: &str, command: &str) -> Result<String> {
        self.checked_type(source_type, command).map(str::to_string)
    }

    fn render_signature(&self, bindings: &[Binding<'_>], _command: &str) -> Result<String> {
        let (required, optional): (Vec<&Binding<'_>>, Vec<&Binding<'_>>) =
            bindings.iter().partition(|b| b.required);
        Ok(required
            .iter()
            .map(|b| b.name.to_string())
            .chain(optional.iter().map(|b| format!("{}=None", b.name)))
            .join(", "))
    }

    fn render_positional_list(&self, bindings: &[Binding<'_>], _command: &str) -> Result<String> {
        Ok(bindings
            .iter()
            .map(|b| match b.kind {
                TypeKind::StringList => format!("' '.join({})", b.name),
                TypeKind::Scalar | TypeKind::Range => b.name.to_string(),
            })
            .join(", "))
    }

    fn render_optional_map(&self, bindings: &[Binding<'_>]) -> String {
        bindings
            .iter()
            .map(|b| match b.kind {
                TypeKind::Range => {
                    format!("\"{name}\" : \"%s:%s\" % ({name}[0], {name}[1]),", name = b.name)
                }
                TypeKind::Scalar | TypeKind::StringList => format!("\"{name}\" : {name},", name = b.name),
            })
            .join("\n        ")
    }

    fn render(&self, context: &RenderContext<'_>) -> Result<String> {
        PythonStub { stub: context }
            .render()
            .map_err(|e| render_error(&e))
    }
}
