//! Command-line arguments and command dispatch.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::debug;

use fmtrc_config::{discover, ConfigLoader, FormatConfig, UnknownKeyPolicy};
use fmtrc_telemetry::LogConfig;

/// Output encoding for a configuration record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Settings-file text, loadable as `.cmake-format.py`
    #[default]
    Kv,
    /// JSON object, loadable as `.cmake-format.json`
    Json,
}

/// Handling of keys the schema does not know.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum UnknownKeys {
    /// Fail the load
    #[default]
    Reject,
    /// Log a warning and skip the key
    Warn,
}

impl From<UnknownKeys> for UnknownKeyPolicy {
    fn from(value: UnknownKeys) -> Self {
        match value {
            UnknownKeys::Reject => Self::Reject,
            UnknownKeys::Warn => Self::Warn,
        }
    }
}

/// Log event rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogStyle {
    /// Single-line events
    #[default]
    Compact,
    /// Multi-line events with source locations
    Pretty,
    /// JSON objects
    Json,
}

/// Top-level arguments.
#[derive(Debug, Parser)]
#[command(name = "fmtrc")]
#[command(author, version, long_about = None)]
#[command(about = "Validate and inspect listfile formatter settings")]
pub struct Cli {
    /// Command to run.
    #[command(subcommand)]
    pub command: Command,

    /// What to do with keys outside the schema
    #[arg(long, value_enum, default_value = "reject", global = true)]
    pub unknown_keys: UnknownKeys,

    /// Prefix of environment variables that override settings (PREFIX__KEY)
    #[arg(long, default_value = "FMTRC", global = true)]
    pub env_prefix: String,

    /// Ignore environment overrides
    #[arg(long, global = true)]
    pub no_env: bool,

    /// Log filter directive
    #[arg(long, env = "FMTRC_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    /// Log output style
    #[arg(long, value_enum, default_value = "compact", global = true)]
    pub log_format: LogStyle,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load and validate the settings, reporting the file used
    Check(SourceArgs),

    /// Print the resolved settings
    Show {
        /// Where to load settings from.
        #[command(flatten)]
        source: SourceArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "kv")]
        format: OutputFormat,
    },

    /// Print the path of the settings file that discovery selects
    Locate {
        /// Directory to start searching from
        #[arg(default_value = ".")]
        dir: PathBuf,
    },

    /// Print the built-in defaults
    Defaults {
        /// Output format
        #[arg(short, long, value_enum, default_value = "kv")]
        format: OutputFormat,
    },
}

/// Where settings come from.
#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// Settings file to load instead of discovering one
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory to start discovery from
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,
}

impl Cli {
    /// Logging setup requested on the command line.
    pub fn log_config(&self) -> LogConfig {
        let base = match self.log_format {
            LogStyle::Compact => LogConfig::default(),
            LogStyle::Pretty => LogConfig::verbose(),
            LogStyle::Json => LogConfig::json(),
        };
        LogConfig {
            level: self.log_level.clone(),
            ..base
        }
    }

    // Load settings through the layered loader, returning the file used.
    fn load(&self, source: &SourceArgs) -> Result<(FormatConfig, Option<PathBuf>)> {
        let mut loader = ConfigLoader::new().unknown_keys(self.unknown_keys.into());

        loader = match &source.config {
            Some(path) => loader
                .with_file(path)
                .with_context(|| format!("failed to load {}", path.display()))?,
            None => loader.with_discovery(&source.dir)?,
        };

        if !self.no_env {
            loader = loader.with_env_prefix(&self.env_prefix);
        }

        let used = loader.source().map(Path::to_path_buf);
        let config = loader.load().with_context(|| match &used {
            Some(path) => format!("invalid settings in {}", path.display()),
            None => "invalid settings".to_string(),
        })?;

        Ok((config, used))
    }
}

/// Run the selected command, writing its output to `out`.
///
/// # Errors
///
/// Returns an error if settings fail to load or output cannot be written.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    debug!(command = ?cli.command, "running");

    match &cli.command {
        Command::Check(source) => {
            let (_, used) = cli.load(source)?;
            match used {
                Some(path) => writeln!(out, "{}: ok", path.display())?,
                None => writeln!(out, "ok")?,
            }
        }
        Command::Show { source, format } => {
            let (config, _) = cli.load(source)?;
            print_config(&config, *format, out)?;
        }
        Command::Locate { dir } => {
            let path = discover(dir).ok_or_else(|| {
                anyhow!(
                    "no formatter settings found in {} or any parent directory",
                    dir.display()
                )
            })?;
            writeln!(out, "{}", path.display())?;
        }
        Command::Defaults { format } => {
            print_config(&FormatConfig::default(), *format, out)?;
        }
    }

    Ok(())
}

fn print_config(config: &FormatConfig, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    match format {
        OutputFormat::Kv => write!(out, "{}", config.to_source())?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, config)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmtrc_telemetry::LogFormat;

    #[test]
    fn test_parse_defaults_command() {
        let cli = Cli::try_parse_from(["fmtrc", "defaults", "--format", "json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Defaults {
                format: OutputFormat::Json
            }
        ));
        assert_eq!(cli.unknown_keys, UnknownKeys::Reject);
        assert_eq!(cli.env_prefix, "FMTRC");
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "fmtrc",
            "check",
            "--config",
            "x.py",
            "--unknown-keys",
            "warn",
            "--no-env",
        ])
        .unwrap();
        assert_eq!(cli.unknown_keys, UnknownKeys::Warn);
        assert!(cli.no_env);
        match cli.command {
            Command::Check(source) => assert_eq!(source.config, Some(PathBuf::from("x.py"))),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_bad_format_rejected() {
        assert!(Cli::try_parse_from(["fmtrc", "defaults", "--format", "yaml"]).is_err());
    }

    #[test]
    fn test_log_config_mapping() {
        let cli = Cli::try_parse_from([
            "fmtrc",
            "defaults",
            "--log-format",
            "json",
            "--log-level",
            "debug",
        ])
        .unwrap();
        let config = cli.log_config();
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, "debug");
        assert!(!config.ansi);
    }

    #[test]
    fn test_defaults_kv_output() {
        let cli = Cli::try_parse_from(["fmtrc", "defaults"]).unwrap();
        let mut out = Vec::new();
        run(&cli, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(FormatConfig::from_source(&text).unwrap(), FormatConfig::default());
    }

    #[test]
    fn test_unknown_keys_conversion() {
        assert_eq!(UnknownKeyPolicy::from(UnknownKeys::Warn), UnknownKeyPolicy::Warn);
        assert_eq!(UnknownKeyPolicy::from(UnknownKeys::Reject), UnknownKeyPolicy::Reject);
    }
}
