use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use regex::Regex;
use tracing_subscriber::EnvFilter;

use srcbump::cli::{self, RunArgs};
use srcbump::config::{self, Config};
use srcbump::{ui, BumpPolicy, Executor};

#[derive(Parser)]
#[command(
    name = "srcbump",
    version,
    about = "Bump version declarations in Go source files"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Bump the major version
    Major(StepArgs),
    /// Bump the minor version
    Minor(StepArgs),
    /// Bump the patch version
    Patch(StepArgs),
    /// Set an exact version
    Set {
        #[arg(help = "Version to write, e.g. 1.4.0")]
        version: String,

        #[arg(long, help = "Fail unless the new version is greater than the current one")]
        check_up: bool,

        #[command(flatten)]
        common: CommonArgs,
    },
    /// Show the current versions without changing anything
    Show(CommonArgs),
    /// Choose the bump interactively for each declaration
    Prompt(CommonArgs),
}

#[derive(Args)]
struct StepArgs {
    #[arg(
        short = 'n',
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Number of steps to increment"
    )]
    count: u64,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args)]
struct CommonArgs {
    #[arg(short, long, help = "Write result to the source file instead of stdout")]
    write: bool,

    #[arg(short, long, help = "Show the resulting version values")]
    verbose: bool,

    #[arg(short, long, help = "Raw text output instead of JSON")]
    raw: bool,

    #[arg(long, value_name = "RE", help = "Identifier pattern to match")]
    pattern: Option<String>,

    #[arg(
        long = "default",
        value_name = "VER",
        help = "Version assumed when a declaration has no value"
    )]
    default_version: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(default_value = ".", help = "Go file or package directory")]
    path: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = execute(cli.command) {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }
}

fn execute(command: Command) -> Result<()> {
    let (common, mut policy, show) = match command {
        Command::Major(step) => (
            step.common,
            BumpPolicy {
                major_delta: step.count,
                ..BumpPolicy::default()
            },
            false,
        ),
        Command::Minor(step) => (
            step.common,
            BumpPolicy {
                minor_delta: step.count,
                ..BumpPolicy::default()
            },
            false,
        ),
        Command::Patch(step) => (
            step.common,
            BumpPolicy {
                patch_delta: step.count,
                ..BumpPolicy::default()
            },
            false,
        ),
        Command::Set {
            version,
            check_up,
            common,
        } => (
            common,
            BumpPolicy {
                exact: Some(version),
                check_version_up: check_up,
                ..BumpPolicy::default()
            },
            false,
        ),
        Command::Show(common) => (common, BumpPolicy::default(), true),
        Command::Prompt(common) => (
            common,
            BumpPolicy {
                prompt: true,
                ..BumpPolicy::default()
            },
            false,
        ),
    };

    let config = config::load_config(common.config.as_deref())?;
    apply_config(&mut policy, &config, &common)?;

    let args = RunArgs {
        target: common.path,
        write: common.write && !show,
        verbose: common.verbose,
        raw: common.raw || config.output.raw,
        show,
    };

    let mut executor = Executor::new(policy);
    let stdout = io::stdout();
    let summary = cli::run(&args, &mut executor, &mut stdout.lock())?;

    if args.write {
        for (path, versions) in &summary.files {
            ui::display_success(&ui::format_rewrite_summary(
                &path.display().to_string(),
                versions,
            ));
        }
    }
    Ok(())
}

/// Fill the policy from the config file, letting command-line flags win.
fn apply_config(policy: &mut BumpPolicy, config: &Config, common: &CommonArgs) -> Result<()> {
    let from_file = config.to_policy()?;

    policy.name_pattern = match &common.pattern {
        Some(pattern) => Some(Regex::new(pattern).map_err(srcbump::BumpError::from)?),
        None => from_file.name_pattern,
    };
    policy.default_version = common
        .default_version
        .clone()
        .or(from_file.default_version);
    policy.check_version_up |= from_file.check_version_up;

    Ok(())
}
