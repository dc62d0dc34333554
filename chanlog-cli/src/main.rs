use std::{path::PathBuf, sync::Arc};

use anyhow::{Context as _, bail};
use chanlog::{Context, LevelPolicy, LogManager, Logger};
use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "chanlog")]
#[command(about = "Log messages through configured chanlog channels", long_about = None)]
struct Cli {
    /// Configuration file (.toml or .json)
    #[arg(short, long, env = "CHANLOG_CONFIG", default_value = "chanlog.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log one message
    Log {
        /// Channel to log to, repeatable. Defaults to the configured default.
        #[arg(short = 'C', long = "channel")]
        channels: Vec<String>,
        /// Group to log to, repeatable.
        #[arg(short, long = "group", conflicts_with = "channels")]
        groups: Vec<String>,
        /// Context entry `key=value`; the value is read as JSON when possible.
        #[arg(short = 'x', long = "context", value_parser = parse_context_entry)]
        context: Vec<(String, Value)>,
        /// Forward unknown levels instead of rejecting them.
        #[arg(long)]
        lenient: bool,
        level: String,
        #[arg(required = true)]
        message: Vec<String>,
    },
    /// Build every configured channel and report failures
    Check,
}

fn parse_context_entry(entry: &str) -> Result<(String, Value), String> {
    let (key, value) = entry
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got [{entry}]"))?;
    if key.is_empty() {
        return Err(format!("empty key in [{entry}]"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::from(value));
    Ok((key.to_string(), value))
}

fn select(
    manager: &LogManager,
    channels: &[String],
    groups: &[String],
) -> chanlog::Result<Arc<dyn Logger>> {
    if !groups.is_empty() {
        manager.group(groups)
    } else {
        manager.channels(channels)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut manager = LogManager::from_path(&cli.config)
        .with_context(|| format!("can not load {}", cli.config.display()))?;

    match cli.command {
        Commands::Log {
            channels,
            groups,
            context,
            lenient,
            level,
            message,
        } => {
            if lenient {
                manager.set_level_policy(LevelPolicy::Lenient);
            }
            let context: Context = context.into_iter().collect();
            let level = chanlog::Level::from(level.as_str());
            manager.level_policy().check(&level)?;
            select(&manager, &channels, &groups)?.log(&level, &message.join(" "), &context)?;
        }
        Commands::Check => {
            let names = manager.resolve_all()?;
            if names.is_empty() {
                bail!("no channel configured in {}", cli.config.display());
            }
            for name in names {
                println!("{name}: ok");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_context_entry() {
        assert_eq!(
            parse_context_entry("id=42").unwrap(),
            ("id".to_string(), Value::from(42))
        );
        assert_eq!(
            parse_context_entry("user=bob").unwrap(),
            ("user".to_string(), Value::from("bob"))
        );
        assert_eq!(
            parse_context_entry("expr=a=b").unwrap(),
            ("expr".to_string(), Value::from("a=b"))
        );
        assert!(parse_context_entry("novalue").is_err());
        assert!(parse_context_entry("=1").is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "chanlog", "--config", "app.toml", "log", "-C", "a", "-C", "b", "-x", "id=1",
            "warning", "disk", "almost", "full",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("app.toml"));
        let Commands::Log {
            channels,
            context,
            level,
            message,
            ..
        } = cli.command
        else {
            panic!("expected the log command");
        };
        assert_eq!(channels, vec!["a", "b"]);
        assert_eq!(context, vec![("id".to_string(), Value::from(1))]);
        assert_eq!(level, "warning");
        assert_eq!(message.join(" "), "disk almost full");
    }

    #[test]
    fn test_channels_and_groups_conflict() {
        assert!(
            Cli::try_parse_from(["chanlog", "log", "-C", "a", "-g", "g", "info", "x"]).is_err()
        );
    }
}
