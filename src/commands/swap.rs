use clap::Args;
use serde::Serialize;
use std::io;
use std::path::PathBuf;

use idswap::config::Settings;
use idswap::swap::{self, Mode, Outcome, ScanReport};
use idswap::{defaults, tty, validation, Error};

use crate::commands::CmdResult;

#[derive(Args, Debug, Default)]
pub struct SwapArgs {
    /// Directory tree to scan
    #[arg(long, default_value = ".")]
    pub path: String,

    /// Config file holding the replacement identifier (default: <path>/.infisical.json)
    #[arg(long)]
    pub config: Option<String>,

    /// JSON key read from the config file
    #[arg(long, default_value = defaults::CONFIG_KEY)]
    pub key: String,

    /// Identifier to replace
    #[arg(long, default_value = defaults::OLD_IDENTIFIER)]
    pub from: String,

    /// Extra directory name to skip (repeatable)
    #[arg(long = "exclude", value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Print the scan as JSON and exit without modifying files
    #[arg(long, conflicts_with = "yes")]
    pub json: bool,

    /// Apply to every match without showing the checklist
    #[arg(short, long)]
    pub yes: bool,
}

impl SwapArgs {
    /// Resolve flags into run settings, expanding `~` in paths.
    pub fn settings(&self) -> idswap::Result<Settings> {
        let root = PathBuf::from(shellexpand::tilde(&self.path).to_string());
        if !root.is_dir() {
            return Err(Error::validation_invalid_argument(
                "path",
                format!("{} is not a directory", root.display()),
            ));
        }

        let key = validation::require_non_empty(&self.key, "key", "Config key cannot be empty")?;
        let from =
            validation::require_non_empty(&self.from, "from", "Identifier cannot be empty")?;

        let mut settings = Settings::for_root(root).exclude(self.exclude.iter().cloned());
        if let Some(config) = &self.config {
            settings.config_path = PathBuf::from(shellexpand::tilde(config).to_string());
        }
        settings.config_key = key.to_string();
        settings.old_identifier = from.to_string();

        Ok(settings)
    }
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum SwapOutput {
    #[serde(rename = "swap.scan")]
    Scan(ScanReport),
}

/// Interactive (or `--yes`) run over stdin/stdout.
pub fn run(args: &SwapArgs) -> CmdResult<Outcome> {
    let settings = args.settings()?;
    let mode = if args.yes {
        Mode::AcceptAll
    } else {
        Mode::Interactive
    };

    if mode == Mode::Interactive && !tty::is_stdin_tty() {
        tty::status("[select] stdin is not a terminal; reading selections from input");
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let outcome = swap::run(&settings, mode, &mut stdin.lock(), &mut stdout.lock())?;

    Ok((outcome, 0))
}

/// `--json`: scan only.
pub fn run_report(args: &SwapArgs) -> CmdResult<SwapOutput> {
    let settings = args.settings()?;
    let report = swap::report(&settings)?;
    Ok((SwapOutput::Scan(report), 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args_for(dir: &TempDir) -> SwapArgs {
        SwapArgs {
            path: dir.path().to_string_lossy().to_string(),
            key: defaults::CONFIG_KEY.to_string(),
            from: defaults::OLD_IDENTIFIER.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn settings_default_config_lives_under_root() {
        let dir = TempDir::new().unwrap();
        let settings = args_for(&dir).settings().unwrap();

        assert_eq!(settings.config_path, dir.path().join(".infisical.json"));
        assert_eq!(settings.old_identifier, defaults::OLD_IDENTIFIER);
    }

    #[test]
    fn settings_apply_overrides() {
        let dir = TempDir::new().unwrap();
        let mut args = args_for(&dir);
        args.config = Some("/tmp/other.json".to_string());
        args.from = "old-id".to_string();
        args.exclude = vec!["target".to_string()];

        let settings = args.settings().unwrap();
        assert_eq!(settings.config_path, PathBuf::from("/tmp/other.json"));
        assert_eq!(settings.old_identifier, "old-id");
        assert!(settings.excluded_dirs.contains(&"target".to_string()));
    }

    #[test]
    fn settings_reject_missing_root() {
        let dir = TempDir::new().unwrap();
        let mut args = args_for(&dir);
        args.path = dir.path().join("missing").to_string_lossy().to_string();

        let err = args.settings().unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
    }

    #[test]
    fn settings_reject_blank_identifier() {
        let dir = TempDir::new().unwrap();
        let mut args = args_for(&dir);
        args.from = "  ".to_string();

        assert!(args.settings().is_err());
    }

    #[test]
    fn report_is_tagged_for_json() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(".infisical.json"),
            r#"{"workspaceId": "abc-123"}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("x.txt"), defaults::OLD_IDENTIFIER).unwrap();

        let (output, exit_code) = run_report(&args_for(&dir)).unwrap();
        let value = serde_json::to_value(output).unwrap();

        assert_eq!(exit_code, 0);
        assert_eq!(value["command"], "swap.scan");
        assert_eq!(value["to"], "abc-123");
        assert_eq!(value["matches"][0]["file"], "x.txt");
        assert_eq!(value["totalMatches"], 1);
    }
}
