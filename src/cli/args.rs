//! Command-line arguments for both entry points

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Args, Parser};

use crate::core::Config;

/// Printed when the one-shot runner gets fewer than three positionals
pub const RUNNER_USAGE: &str = "Usage: navigator <provider> <model> <task>";

/// Flags shared by the runner and the daemon
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Run the browser in headed mode (visible window)
    #[arg(long)]
    pub headed: bool,

    /// Enable debug logging on stderr
    #[arg(long, short = 'd')]
    pub debug: bool,

    /// Config file (default: ~/.config/navigator/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl CommonArgs {
    /// Apply CLI overrides on top of the loaded configuration
    pub fn apply(&self, config: &mut Config) {
        if self.headed {
            config.browser.headed = true;
        }
        if self.debug {
            config.agent.debug = true;
        }
    }
}

/// Run a single browser task and exit
///
/// Only the flags before the provider are parsed here; everything from the
/// provider on is positional, so task words like `--help` reach the agent.
#[derive(Parser, Debug)]
#[command(name = "navigator")]
#[command(author, version, about, long_about = None)]
#[command(override_usage = "navigator [OPTIONS] <PROVIDER> <MODEL> <TASK>...")]
#[command(after_help = "PROVIDER: browser-use | google | openai | anthropic\n\
MODEL:    model name passed to the provider\n\
TASK:     remaining words, joined with spaces")]
struct RunnerFlags {
    #[command(flatten)]
    common: CommonArgs,
}

/// Parsed one-shot command line
#[derive(Debug, Clone)]
pub struct RunnerArgs {
    pub common: CommonArgs,

    /// LLM provider: browser-use | google | openai | anthropic
    pub provider: String,

    /// Model name passed to the provider
    pub model: String,

    /// Task words, in order
    pub task: Vec<String>,
}

impl RunnerArgs {
    /// The task as one string
    pub fn task_text(&self) -> String {
        self.task.join(" ")
    }
}

/// Keep one browser alive and run tasks read line by line from stdin
#[derive(Parser, Debug)]
#[command(name = "navigator-daemon")]
#[command(author, version, about, long_about = None)]
pub struct DaemonArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// LLM provider: browser-use | google | openai | anthropic
    #[arg(default_value = "browser-use")]
    pub provider: String,

    /// Model name passed to the provider
    #[arg(default_value = "default")]
    pub model: String,

    /// Anything after the model is ignored
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub extra: Vec<String>,
}

/// Outcome of parsing the runner's command line
#[derive(Debug)]
pub enum Invocation {
    Run(RunnerArgs),
    /// Too few arguments; print `RUNNER_USAGE` and exit 1
    Usage,
}

/// Flags that consume the following argument as their value
const VALUE_FLAGS: &[&str] = &["--config"];

/// Split point between leading flags and positionals in `args` (program
/// name excluded): `(end of flags, start of positionals)`. They differ only
/// when a `--` separator sits between the two.
fn first_positional(args: &[OsString]) -> (usize, usize) {
    let mut i = 0;
    while i < args.len() {
        let arg = args[i].to_string_lossy();
        if arg == "--" {
            return (i, i + 1);
        }
        if !arg.starts_with('-') || arg == "-" {
            return (i, i);
        }
        i += if VALUE_FLAGS.contains(&&*arg) { 2 } else { 1 };
    }
    (args.len(), args.len())
}

/// Parse the runner's arguments
///
/// Flags are only recognised before the provider. Fewer than three
/// positionals map to `Invocation::Usage`; help, version and malformed
/// leading flags stay clap errors for the caller to `exit()` on.
pub fn parse_runner_args<I, T>(argv: I) -> Result<Invocation, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
    let Some((bin, rest)) = argv.split_first() else {
        return Ok(Invocation::Usage);
    };

    let (flags_end, positionals_start) = first_positional(rest);
    let flags = RunnerFlags::try_parse_from(
        std::iter::once(bin).chain(&rest[..flags_end]),
    )?;

    let mut positionals = rest[positionals_start..]
        .iter()
        .map(|a| a.to_string_lossy().into_owned());
    let (Some(provider), Some(model)) = (positionals.next(), positionals.next()) else {
        return Ok(Invocation::Usage);
    };
    let task: Vec<String> = positionals.collect();
    if task.is_empty() {
        return Ok(Invocation::Usage);
    }

    Ok(Invocation::Run(RunnerArgs {
        common: flags.common,
        provider,
        model,
        task,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn run_args(argv: &[&str]) -> RunnerArgs {
        match parse_runner_args(argv).unwrap() {
            Invocation::Run(args) => args,
            Invocation::Usage => panic!("expected a runnable invocation for {:?}", argv),
        }
    }

    #[test]
    fn test_task_words_are_joined() {
        let args = run_args(&["navigator", "openai", "gpt-4o", "find", "the", "weather"]);
        assert_eq!(args.provider, "openai");
        assert_eq!(args.model, "gpt-4o");
        assert_eq!(args.task_text(), "find the weather");
    }

    #[test]
    fn test_too_few_arguments_is_usage() {
        for argv in [
            vec!["navigator"],
            vec!["navigator", "openai"],
            vec!["navigator", "openai", "gpt-4o"],
        ] {
            assert!(matches!(
                parse_runner_args(&argv).unwrap(),
                Invocation::Usage
            ));
        }
    }

    #[test]
    fn test_hyphenated_task_words_are_kept() {
        let args = run_args(&["navigator", "google", "gemini-2.5-flash", "search", "--exact", "-x"]);
        assert_eq!(args.task_text(), "search --exact -x");
    }

    #[test]
    fn test_flags_before_positionals() {
        let args = run_args(&["navigator", "--headed", "-d", "anthropic", "claude", "go"]);
        assert!(args.common.headed);
        assert!(args.common.debug);

        let mut config = Config::default();
        args.common.apply(&mut config);
        assert!(config.browser.headed);
        assert!(config.agent.debug);
    }

    #[test]
    fn test_help_is_not_usage() {
        let err = parse_runner_args(["navigator", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);

        let err = parse_runner_args(["navigator", "--bogus", "openai", "gpt-4o", "x"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_flags_after_model_are_task_words() {
        let args = run_args(&["navigator", "openai", "gpt-4o", "--help"]);
        assert_eq!(args.task_text(), "--help");

        let args = run_args(&["navigator", "openai", "gpt-4o", "--version", "check"]);
        assert_eq!(args.task_text(), "--version check");

        let args = run_args(&["navigator", "openai", "gpt-4o", "-d"]);
        assert_eq!(args.task_text(), "-d");
        assert!(!args.common.debug);
    }

    #[test]
    fn test_config_value_and_double_dash() {
        let args = run_args(&["navigator", "--config", "nav.toml", "google", "gemini", "go"]);
        assert_eq!(args.common.config, Some(PathBuf::from("nav.toml")));
        assert_eq!(args.provider, "google");
        assert_eq!(args.task_text(), "go");

        let args = run_args(&["navigator", "--headed", "--", "-odd-provider", "m", "t"]);
        assert!(args.common.headed);
        assert_eq!(args.provider, "-odd-provider");
    }

    #[test]
    fn test_daemon_defaults() {
        let args = DaemonArgs::try_parse_from(["navigator-daemon"]).unwrap();
        assert_eq!(args.provider, "browser-use");
        assert_eq!(args.model, "default");

        let args = DaemonArgs::try_parse_from(["navigator-daemon", "google"]).unwrap();
        assert_eq!(args.provider, "google");
        assert_eq!(args.model, "default");
    }

    #[test]
    fn test_daemon_ignores_extra_arguments() {
        let args =
            DaemonArgs::try_parse_from(["navigator-daemon", "google", "gemini", "extra", "-x"])
                .unwrap();
        assert_eq!(args.provider, "google");
        assert_eq!(args.model, "gemini");
    }
}
