//! Go stubs: methods on `*RPCClient`

use askama::Template;
use itertools::Itertools;

use super::{render_error, Binding, RenderContext, Target, TargetLanguage, TypeKind};
use crate::Result;

#[derive(Template)]
#[template(path = "go.txt")]
struct GoStub<'a> {
    stub: &'a RenderContext<'a>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Go;

impl TargetLanguage for Go {
    fn target(&self) -> Target {
        Target::Go
    }

    fn map_type(&self, source_type: &str) -> Option<&'static str> {
        let mapped = match source_type {
            "uint8_t" => "uint8",
            "uint16_t" => "uint16",
            "uint32_t" | "std::uint32_t" => "uint32",
            "uint64_t" | "non_negative_uint64" => "uint64",
            "int8_t" => "int8",
            "int16_t" => "int16",
            "int32_t" | "std::int32_t" => "int32",
            "int64_t" => "int64",
            "std::string"
            | "explorer::config::transaction"
            | "explorer::config::language"
            | "bc::config::hash256"
            | "boost::filesystem::path"
            | "bc::wallet::payment_address" => "string",
            "bool" => "bool",
            "std::vector<std::string>" => "[]string",
            "libbitcoin::explorer::commands::colon_delimited2_item<uint64_t, uint64_t>" => {
                "[2]uint64"
            }
            _ => return None,
        };
        Some(mapped)
    }

    /// Exported method name: the command with its first letter capitalised
    fn function_name(&self, command: &str) -> String {
        let mut chars = command.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }

    fn render_signature(&self, bindings: &[Binding<'_>], command: &str) -> Result<String> {
        bindings
            .iter()
            .map(|b| {
                self.checked_type(b.source_type, command)
                    .map(|ty| format!("{} {ty}", b.name))
            })
            .collect::<Result<Vec<_>>>()
            .map(|params| params.join(", "))
    }

    /// Each argument is followed by `, ` so the list can precede `optional`
    fn render_positional_list(&self, bindings: &[Binding<'_>], _command: &str) -> Result<String> {
        Ok(bindings
            .iter()
            .map(|b| match b.kind {
                TypeKind::StringList => format!("strings.Join({}, \" \"), ", b.name),
                TypeKind::Scalar | TypeKind::Range => format!("{}, ", b.name),
            })
            .collect())
    }

    fn render_optional_map(&self, bindings: &[Binding<'_>]) -> String {
        bindings
            .iter()
            .map(|b| match b.kind {
                TypeKind::Range => format!(
                    "\"{name}\" : strings.Join([]string{{strconv.FormatUint(uint64({name}[0]), 10), strconv.FormatUint(uint64({name}[1]), 10)}}, \":\"),",
                    name = b.name
                ),
                TypeKind::Scalar | TypeKind::StringList => format!("\"{name}\" : {name},", name = b.name),
            })
            .join("\n        ")
    }

    fn render(&self, context: &RenderContext<'_>) -> Result<String> {
        GoStub { stub: context }
            .render()
            .map_err(|e| render_error(&e))
    }
}
