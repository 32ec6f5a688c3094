use anyhow::Context;
use clap::{ArgGroup, CommandFactory, Parser};
use phpstorm_url_lib::commands::generate::generate_reg_files;
use phpstorm_url_lib::commands::open::open_url;
use phpstorm_url_lib::commands::registry::check_registry;
use phpstorm_url_lib::commands::{locate_executable, HandlerContext};
use phpstorm_url_lib::installer::RegFileKind;
use phpstorm_url_lib::open::ProcessLauncher;
use phpstorm_url_lib::registration::{RegistrationEntries, RegistrationOutcome, RegistrationStatus};
use phpstorm_url_lib::settings::HandlerSettings;
use phpstorm_url_lib::utils::expand_tilde;
use phpstorm_url_lib::{logging, platform};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// phpstorm:// URL handler - open files in PhpStorm from the browser
#[derive(Parser, Debug)]
#[command(name = "phpstorm-url")]
#[command(about = "Open phpstorm:// URLs in a locally installed PhpStorm", long_about = None)]
#[command(group(
    ArgGroup::new("action")
        .args([
            "url",
            "check_registry",
            "generate_reg",
            "generate_python",
            "generate_direct",
            "locate",
        ])
))]
struct Args {
    /// URL to open, e.g. 'phpstorm://open?file=...&line=10'
    url: Option<String>,

    /// Compare the registered handler with the discovered PhpStorm and offer to fix it
    #[arg(long)]
    check_registry: bool,

    /// Write both .reg installer files
    #[arg(long)]
    generate_reg: bool,

    /// Write the .reg file that routes URLs through this tool
    #[arg(long, visible_alias = "generate-handler")]
    generate_python: bool,

    /// Write the .reg file that routes URLs straight to PhpStorm
    #[arg(long)]
    generate_direct: bool,

    /// Print the discovered PhpStorm executable
    #[arg(long)]
    locate: bool,

    /// Settings file (JSONC); defaults to the per-user config directory
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory for generated .reg files; defaults to this tool's directory
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Update the registry without asking
    #[arg(short, long)]
    yes: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<ExitCode> {
    let config_path = args.config.as_deref().map(expand_tilde);
    let settings = HandlerSettings::load_or_default(config_path.as_deref())
        .context("failed to load settings")?;
    let ctx = HandlerContext::from_process(settings);

    let result = if let Some(url) = &args.url {
        run_open(&ctx, url)
    } else if args.check_registry {
        run_check_registry(&ctx, args.yes)
    } else if args.generate_reg {
        run_generate(&ctx, &[RegFileKind::Direct, RegFileKind::Handler], args.out_dir.as_deref())
    } else if args.generate_python {
        run_generate(&ctx, &[RegFileKind::Handler], args.out_dir.as_deref())
    } else if args.generate_direct {
        run_generate(&ctx, &[RegFileKind::Direct], args.out_dir.as_deref())
    } else if args.locate {
        run_locate(&ctx)
    } else {
        Args::command().print_help()?;
        println!();
        return Ok(ExitCode::SUCCESS);
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_open(ctx: &HandlerContext, url: &str) -> phpstorm_url_lib::Result<()> {
    let command = open_url(ctx, url, &ProcessLauncher)?;
    println!("Opened in PhpStorm: {}", command.to_shell_string());
    Ok(())
}

fn run_locate(ctx: &HandlerContext) -> phpstorm_url_lib::Result<()> {
    let found = locate_executable(ctx)?;
    println!("{}", found.path.display());
    eprintln!("(found via {})", found.source);
    Ok(())
}

fn run_check_registry(ctx: &HandlerContext, assume_yes: bool) -> phpstorm_url_lib::Result<()> {
    println!("Checking registry configuration...");
    let registry = platform::system_registry();

    let report = check_registry(ctx, registry.as_ref(), |entries, status| {
        print_comparison(entries, status);
        assume_yes || prompt_yes_no("Update the registry now? (y/N): ")
    })?;

    match report.outcome {
        RegistrationOutcome::AlreadyCorrect => {
            println!("Registry is already configured correctly: {}", report.entries.command);
        }
        RegistrationOutcome::Updated => {
            println!("Registry updated: {}", report.entries.command);
        }
        RegistrationOutcome::Declined => println!("Skipped registry update"),
    }
    Ok(())
}

fn print_comparison(entries: &RegistrationEntries, status: &RegistrationStatus) {
    match status {
        RegistrationStatus::Missing => {
            println!("No registration found for {}://", entries.scheme);
            println!("Expected: {}", entries.command);
        }
        RegistrationStatus::Outdated { current } => {
            println!("Registry needs to be updated");
            println!("Current:  {}", current);
            println!("Expected: {}", entries.command);
        }
        RegistrationStatus::Current(_) => {}
    }
}

fn prompt_yes_no(question: &str) -> bool {
    print!("{question}");
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

fn run_generate(
    ctx: &HandlerContext,
    kinds: &[RegFileKind],
    out_dir: Option<&std::path::Path>,
) -> phpstorm_url_lib::Result<()> {
    let handler = std::env::current_exe()?;
    let out_dir = match out_dir {
        Some(dir) => expand_tilde(dir),
        None => handler
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    for file in generate_reg_files(ctx, kinds, &handler, &out_dir)? {
        println!(
            "Created registry file ({}): {}",
            file.kind.description(),
            file.path.display()
        );
        println!("{}", file.content);
    }
    Ok(())
}
