use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use aw_ast::AwSyntax;
use aw_parser::parse_program;
use awaitify::{Awaitifier, AwaitifyOptions, PatternSet};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "awaitify", about = "Await calls to known async functions")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` wins.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DialectArgs {
    /// Parse as TypeScript (implied by .ts/.tsx/.mts/.cts).
    #[arg(long)]
    typescript: bool,
    /// Accept JSX (implied by .jsx/.tsx).
    #[arg(long)]
    jsx: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite a file, awaiting every call to one of the given paths.
    Rewrite {
        /// Input .js/.ts file.
        input: PathBuf,
        /// Dotted path of an async function, e.g. `db.users.find`. Repeatable.
        #[arg(short = 'f', long = "func")]
        func_paths: Vec<String>,
        /// JSON config with `funcPaths`, `syntax`, `minify`, `comments`.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output file (stdout if omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        dialect: DialectArgs,
        /// Emit minified code.
        #[arg(long)]
        minify: bool,
        /// Keep comments from the input.
        #[arg(long)]
        comments: bool,
        /// Print every rewritten call site to stderr.
        #[arg(long)]
        report: bool,
    },
    /// Parse the file and report any syntax errors.
    Check {
        input: PathBuf,
        #[command(flatten)]
        dialect: DialectArgs,
    },
}

fn setup_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

/// Dialect flags from the command line, widened by the file extension.
fn dialect(input: &Path, args: &DialectArgs, base: &AwSyntax) -> AwSyntax {
    let ext = input.extension().and_then(|e| e.to_str()).unwrap_or("");
    AwSyntax {
        typescript: base.typescript
            || args.typescript
            || matches!(ext, "ts" | "tsx" | "mts" | "cts"),
        jsx: base.jsx || args.jsx || matches!(ext, "jsx" | "tsx"),
        decorators: base.decorators,
    }
}

/// Read a JSON config. `funcPaths`, when present, must be an array of
/// strings; the remaining keys are [`AwaitifyOptions`].
fn load_config(path: &Path) -> Result<(PatternSet, AwaitifyOptions)> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let mut value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("invalid JSON in {}", path.display()))?;

    let patterns = match value.as_object_mut().and_then(|o| o.remove("funcPaths")) {
        Some(func_paths) => PatternSet::from_value(&func_paths)
            .with_context(|| format!("invalid funcPaths in {}", path.display()))?,
        None => PatternSet::default(),
    };
    let options = serde_json::from_value(value)
        .with_context(|| format!("invalid options in {}", path.display()))?;

    Ok((patterns, options))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Rewrite {
            input,
            func_paths,
            config,
            output,
            dialect: dialect_args,
            minify,
            comments,
            report,
        } => {
            let source = std::fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let filename = input.display().to_string();

            let (mut patterns, mut options) = match &config {
                Some(path) => load_config(path)?,
                None => (PatternSet::default(), AwaitifyOptions::default()),
            };
            for func_path in &func_paths {
                patterns.insert(func_path);
            }
            if patterns.is_empty() {
                tracing::warn!("no function paths given, output equals input");
            }

            options.syntax = dialect(&input, &dialect_args, &options.syntax);
            options.minify |= minify;
            options.comments |= comments;

            let awaitified = Awaitifier::new(options)
                .transform_with_report(&source, &patterns)
                .with_context(|| format!("failed to rewrite {filename}"))?;

            match &output {
                Some(path) => std::fs::write(path, &awaitified.code)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => print!("{}", awaitified.code),
            }

            if report {
                for call in &awaitified.rewritten {
                    eprintln!("{filename}:{}:{} {}", call.line, call.column, call.pattern);
                }
            }
            tracing::info!(rewritten = awaitified.rewritten.len(), "done");
        }
        Commands::Check { input, dialect: dialect_args } => {
            let source = std::fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let filename = input.display().to_string();
            let syntax = dialect(&input, &dialect_args, &AwSyntax::default());

            parse_program(&source, &filename, &syntax)
                .with_context(|| format!("failed to parse {filename}"))?;
            eprintln!("OK: {filename}");
        }
    }

    Ok(())
}
