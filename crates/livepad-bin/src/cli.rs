//! Command line surface and the two non-interactive subcommands.

use clap::{Args as ClapArgs, Parser, Subcommand};
use core_config::Config;
use core_preview::{Sources, compose_export};
use core_suggest::{EditorKind, TriggerChar, classify_with};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "livepad", version, about = "Terminal code playground with live preview")]
pub struct Args {
    /// Configuration file path (overrides discovery of `livepad.toml`).
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,
    #[command(flatten)]
    pub sources: SourceArgs,
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Initial editor contents given inline.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct SourceArgs {
    #[arg(long, default_value = "")]
    pub markup: String,
    #[arg(long, default_value = "")]
    pub style: String,
    #[arg(long, default_value = "")]
    pub script: String,
}

impl SourceArgs {
    pub fn as_array(&self) -> [&str; 3] {
        [&self.markup, &self.style, &self.script]
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the export page for the given sources.
    Export(SourceArgs),
    /// Print the suggestions for TEXT as if TRIGGER had just been typed after it.
    Suggest {
        #[arg(long)]
        kind: EditorKind,
        #[arg(long, value_parser = parse_trigger)]
        trigger: TriggerChar,
        /// Text before the cursor, trigger character included.
        #[arg(default_value = "")]
        text: String,
    },
}

/// Accept the trigger either as the character itself or by name (`space` is awkward to quote).
pub fn parse_trigger(s: &str) -> Result<TriggerChar, String> {
    let named = match s.to_ascii_lowercase().as_str() {
        "space" => Some(TriggerChar::Space),
        "dot" => Some(TriggerChar::Dot),
        "colon" => Some(TriggerChar::Colon),
        "angle" | "lt" => Some(TriggerChar::Angle),
        _ => None,
    };
    if let Some(t) = named {
        return Ok(t);
    }
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => TriggerChar::try_from(c).map_err(|e| e.to_string()),
        _ => Err(format!("expected a single trigger character, got `{s}`")),
    }
}

pub fn export_page(sources: &SourceArgs) -> String {
    let [markup, style, script] = sources.as_array();
    compose_export(Sources::new(markup, style, script))
}

/// One candidate per line; empty when the context has no suggestions.
pub fn suggest_lines(config: &Config, kind: EditorKind, trigger: TriggerChar, text: &str) -> String {
    let list = classify_with(text, trigger, kind, &config.classifier_options());
    let mut out = String::new();
    for candidate in list {
        out.push_str(&candidate);
        out.push('\n');
    }
    out
}
