//! CLI: generate (default) | validate
use anyhow::{Context, Result, bail};
use clap::{ArgAction, Args, Parser, Subcommand};
use guardgen::{Backend, GuardgenConfig, Policy};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Generate Zod schemas and guard functions from exported TypeScript record types
#[derive(Parser, Debug)]
#[command(name = "guardgen", version)]
pub struct Cli {
    /// Project root; config and configured paths resolve against it
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Config file (default: <root>/.guardgen/config.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the generated artifact (the default command)
    Generate(GenerateArgs),
    /// Check a JSON document against one generated schema
    Validate(ValidateArgs),
}

#[derive(Args, Debug, Default)]
struct GenerateArgs {
    /// Declaration source (overrides config)
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Artifact path (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output backend
    #[arg(long, default_value = guardgen::DEFAULT_BACKEND)]
    backend: String,

    /// Exit non-zero if the artifact is out of date instead of writing it
    #[arg(long)]
    check: bool,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// Type name (case-insensitive)
    type_name: String,

    /// JSON document to validate, or '-' for stdin
    input: PathBuf,

    /// Declaration source (overrides config)
    #[arg(short, long)]
    source: Option<PathBuf>,
}

struct Session {
    config: GuardgenConfig,
    root: PathBuf,
}

impl Cli {
    pub fn run(self) -> Result<ExitCode> {
        let config = match &self.config {
            Some(path) => GuardgenConfig::load_file(path)?,
            None => GuardgenConfig::load(&self.root)?,
        };
        let ctx = Session {
            config,
            root: self.root,
        };

        match self.command {
            Some(Command::Generate(args)) => ctx.generate(args),
            Some(Command::Validate(args)) => ctx.validate(args),
            None => ctx.generate(GenerateArgs {
                backend: guardgen::DEFAULT_BACKEND.to_string(),
                ..Default::default()
            }),
        }
    }
}

impl Session {
    fn source(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.unwrap_or_else(|| self.root.join(self.config.source()))
    }

    fn policy(&self) -> Policy {
        self.config.policy()
    }

    fn generate(&self, args: GenerateArgs) -> Result<ExitCode> {
        let backend: &dyn Backend = match guardgen::get_backend(&args.backend) {
            Some(b) => b,
            None => bail!(
                "unknown backend '{}' (available: {})",
                args.backend,
                guardgen::backend_names().join(", ")
            ),
        };
        let source = self.source(args.source);
        let output = args
            .output
            .unwrap_or_else(|| self.root.join(self.config.output()));
        let policy = self.policy();

        if args.check {
            if guardgen::is_up_to_date(&source, &output, &policy, backend)? {
                println!("{} is up to date", output.display());
                return Ok(ExitCode::SUCCESS);
            }
            eprintln!(
                "{} is out of date with {}; run `guardgen generate`",
                output.display(),
                source.display()
            );
            return Ok(ExitCode::FAILURE);
        }

        guardgen::generate(&source, &output, &policy, backend)?;
        println!("Generated {} from {}", output.display(), source.display());
        Ok(ExitCode::SUCCESS)
    }

    fn validate(&self, args: ValidateArgs) -> Result<ExitCode> {
        let source = self.source(args.source);
        let artifact = guardgen::build_artifact(&source, &self.policy())?;
        let Some(schema) = artifact.schema_for(&args.type_name) else {
            let known: Vec<_> = artifact.validators.iter().map(|(k, _)| k.as_str()).collect();
            bail!(
                "no type '{}' in {} (known: {})",
                args.type_name,
                source.display(),
                known.join(", ")
            );
        };

        let input = read_input(&args.input)?;
        let value: serde_json::Value = serde_json::from_str(&input)
            .with_context(|| format!("{} is not valid JSON", args.input.display()))?;

        let (report, code) = match schema.check(&value) {
            Ok(data) => (
                serde_json::json!({ "valid": true, "data": data }),
                ExitCode::SUCCESS,
            ),
            Err(errors) => (
                serde_json::json!({ "valid": false, "errors": errors }),
                ExitCode::FAILURE,
            ),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        Ok(code)
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        return std::io::read_to_string(std::io::stdin()).context("failed to read stdin");
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
