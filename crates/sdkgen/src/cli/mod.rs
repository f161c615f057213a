pub mod handlers;

use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("sdkgen")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate RPC client SDK stubs from command-definition headers")
        .arg(
            Arg::new("path")
                .required(true)
                .value_name("PATH")
                .help("Header file, or directory scanned recursively"),
        )
        .arg(
            Arg::new("target")
                .short('t')
                .long("target")
                .value_name("LANG")
                .value_parser(["python", "go", "dotnet", "csharp"])
                .help("Target language [default: python]"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .value_parser(["template", "json"])
                .help("Generated stubs, or extracted metadata as JSON Lines"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Write to FILE instead of stdout"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Config file to use instead of ./sdkgen.toml"),
        )
        .arg(
            Arg::new("policy")
                .long("policy")
                .value_name("POLICY")
                .value_parser(["warn", "silent", "fail-fast"])
                .help("What to do when a file fails in a directory scan [default: warn]"),
        )
        .arg(
            Arg::new("ext")
                .long("ext")
                .value_name("EXT")
                .action(ArgAction::Append)
                .help("Only scan files with this extension (repeatable)"),
        )
        .after_help(
            "EXAMPLES:\n  \
             sdkgen include/commands                 Python stubs for every header\n  \
             sdkgen -t go --ext hpp include          Go stubs for .hpp files only\n  \
             sdkgen -f json getinfo.hpp              Extracted metadata as JSON\n",
        )
}
