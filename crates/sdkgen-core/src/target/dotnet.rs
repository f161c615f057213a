//! C# stubs that build a `List<String>` of CLI-style arguments

use askama::Template;
use itertools::Itertools;

use super::{render_error, Binding, RenderContext, Target, TargetLanguage, TypeKind};
use crate::Result;

#[derive(Template)]
#[template(path = "dotnet.txt")]
struct DotNetStub<'a> {
    stub: &'a RenderContext<'a>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DotNet;

impl TargetLanguage for DotNet {
    fn target(&self) -> Target {
        Target::DotNet
    }

    fn map_type(&self, source_type: &str) -> Option<&'static str> {
        let mapped = match source_type {
            "uint8_t" => "UInt8",
            "uint16_t" => "UInt16",
            "uint32_t" | "std::uint32_t" => "UInt32",
            "uint64_t" | "non_negative_uint64" => "UInt64",
            "int8_t" => "Int8",
            "int16_t" => "Int16",
            "int32_t" | "std::int32_t" => "Int32",
            "int64_t" => "Int64",
            "std::string"
            | "explorer::config::transaction"
            | "explorer::config::language"
            | "bc::config::hash256"
            | "boost::filesystem::path"
            | "bc::wallet::payment_address" => "String",
            "bool" => "Boolean",
            "std::vector<std::string>" => "List<String>",
            "libbitcoin::explorer::commands::colon_delimited2_item<uint64_t, uint64_t>" => {
                "Tuple<UInt64,UInt64>"
            }
            _ => return None,
        };
        Some(mapped)
    }

    fn render_signature(&self, bindings: &[Binding<'_>], command: &str) -> Result<String> {
        bindings
            .iter()
            .map(|b| {
                self.checked_type(b.source_type, command)
                    .map(|ty| format!("{ty} {}", b.name))
            })
            .collect::<Result<Vec<_>>>()
            .map(|params| params.join(", "))
    }

    fn render_positional_list(&self, bindings: &[Binding<'_>], command: &str) -> Result<String> {
        bindings
            .iter()
            .map(|b| {
                self.checked_type(b.source_type, command).map(|ty| match (ty, b.kind) {
                    ("String", _) => b.name.to_string(),
                    (_, TypeKind::StringList) => format!("String.Join(\" \", {}.ToArray())", b.name),
                    _ => format!("{}.ToString()", b.name),
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(|args| args.join(", "))
    }

    /// Optionals become `--name value` pairs; a list adds one pair per element
    fn render_optional_map(&self, bindings: &[Binding<'_>]) -> String {
        bindings
            .iter()
            .flat_map(|b| match b.kind {
                TypeKind::StringList => vec![
                    format!("foreach (var i in {}) {{", b.name),
                    format!(
                        "    parameters.AddRange(new List<String>{{\"--{}\", i.ToString()}});",
                        b.name
                    ),
                    "}".to_string(),
                ],
                TypeKind::Range => vec![format!(
                    "parameters.AddRange(new List<String>{{\"--{name}\", String.Format(\"{{0}}:{{1}}\", {name}.Item1, {name}.Item2)}});",
                    name = b.name
                )],
                TypeKind::Scalar => vec![format!(
                    "parameters.AddRange(new List<String>{{\"--{name}\", {name}.ToString()}});",
                    name = b.name
                )],
            })
            .join("\n    ")
    }

    fn render(&self, context: &RenderContext<'_>) -> Result<String> {
        DotNetStub { stub: context }
            .render()
            .map_err(|e| render_error(&e))
    }
}
