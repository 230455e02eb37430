use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use scalify_patcher::config::{self, ConfigOrigin, RewriteConfig};
use scalify_patcher::{
    run_batch, select_files, FileOutcome, Mode, Pipeline, SelectError, UpdateError,
    UpdateOptions,
};
use similar::{ChangeTag, TextDiff};
use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "scalify-patcher")]
#[command(about = "Rewrite Flutter layout literals into responsive scalify units", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./scalify.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Wrap fixed padding, size, font and radius literals in scale markers
    Scale(TargetArgs),

    /// Remove `const` from calls whose arguments carry scale markers
    FixConst(TargetArgs),

    /// Scale literals, then repair the const qualifiers they invalidate
    All(TargetArgs),
}

#[derive(Args)]
struct TargetArgs {
    /// File or directory to rewrite (directories are walked recursively)
    target: PathBuf,

    /// Dry run - report what would change without writing files
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Show unified diff of changes
    #[arg(short, long)]
    diff: bool,

    /// List the rules that fired for each changed file
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Usage errors exit 1; --help and --version exit 0.
            let code = if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            let _ = err.print();
            return code;
        }
    };

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", "Error:".red());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let (mode, args) = match cli.command {
        Commands::Scale(args) => (Mode::Scale, args),
        Commands::FixConst(args) => (Mode::FixConst, args),
        Commands::All(args) => (Mode::All, args),
    };

    let cwd = env::current_dir()?;
    let (config, origin) = config::resolve(cli.config.as_deref(), &cwd)?;
    if args.verbose {
        match &origin {
            ConfigOrigin::Explicit(path) | ConfigOrigin::Discovered(path) => {
                println!("{}", format!("config: {}", path.display()).dimmed());
            }
            ConfigOrigin::Builtin => println!("{}", "config: built-in defaults".dimmed()),
        }
    }
    cmd_rewrite(mode, &args, &config)
}

/// Helper: Show unified diff between original and rewritten content
fn display_diff(file: &Path, original: &str, modified: &str) {
    println!(
        "\n{}",
        format!("--- {} (original)", file.display()).dimmed()
    );
    println!("{}", format!("+++ {} (rewritten)", file.display()).dimmed());

    let diff = TextDiff::from_lines(original, modified);

    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => format!("-{}", change).red(),
            ChangeTag::Insert => format!("+{}", change).green(),
            ChangeTag::Equal => format!(" {}", change).normal(),
        };
        print!("{}", sign);
    }
}

fn report_file(result: &Result<FileOutcome, UpdateError>, args: &TargetArgs) {
    match result {
        Ok(
            outcome @ FileOutcome::Changed {
                original,
                rewritten,
                applied,
                ..
            },
        ) => {
            println!("{} {}", "✓".green(), outcome);
            if args.verbose {
                println!("  {}", format!("rules: {}", applied.join(", ")).dimmed());
            }
            if args.diff {
                display_diff(outcome.file(), original, rewritten);
            }
        }
        Ok(outcome @ FileOutcome::Unchanged { .. }) => {
            println!("{} {}", "-".dimmed(), outcome);
        }
        Err(err) => {
            let cause = match err {
                UpdateError::Read { source, .. } | UpdateError::Write { source, .. } => source,
            };
            println!(
                "{} Error processing {}: {}",
                "✗".red(),
                err.path().display(),
                cause
            );
        }
    }
}

fn cmd_rewrite(mode: Mode, args: &TargetArgs, config: &RewriteConfig) -> Result<ExitCode> {
    let selection = match select_files(&args.target, &config.file_filter()) {
        Ok(selection) => selection,
        Err(err @ SelectError::InvalidTarget(_)) => {
            println!("{} {}", "Error:".red(), err);
            return Ok(ExitCode::FAILURE);
        }
    };

    for err in &selection.walk_errors {
        eprintln!("{}", format!("Warning: skipping unreadable entry: {err}").yellow());
    }

    if args.dry_run {
        println!("{}", "[DRY RUN - no files will be written]".cyan());
    }

    let pipeline = Pipeline::for_mode(mode, &config.helper_import);
    let options = UpdateOptions {
        dry_run: args.dry_run,
    };

    let summary = run_batch(&selection.files, &pipeline, options, |_, result| {
        report_file(result, args)
    });

    if selection.from_directory {
        println!();
        println!(
            "{}",
            format!(
                "Total: {} files, Changed: {} files",
                summary.total, summary.changed
            )
            .bold()
        );
        if summary.failed > 0 {
            println!("{}", format!("  {} failed", summary.failed).red());
        }
    }

    Ok(ExitCode::SUCCESS)
}
