use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use skillgate::config::Config;
use skillgate::error::ScanError;
use skillgate::output::OutputFormat;
use skillgate::ScanOptions;

const USAGE: &str = "Usage: skillgate <skill-directory-path>";

#[derive(Parser)]
#[command(
    name = "skillgate",
    about = "Static security scan of an agent skill's scripts before execution",
    version
)]
struct Cli {
    /// Path to the skill directory
    path: Option<PathBuf>,

    /// Config file path
    #[arg(long, short = 'c', env = "SKILLGATE_CONFIG")]
    config: Option<PathBuf>,

    /// Output format (json, console, sarif)
    #[arg(long, short = 'f', default_value = "json")]
    format: String,

    /// Write output to file instead of stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// List all detection rules and exit
    #[arg(long)]
    list_rules: bool,

    /// Print a starter config file and exit
    #[arg(long)]
    print_config: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("SKILLGATE_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = if cli.print_config {
        print!("{}", Config::starter_toml());
        Ok(0)
    } else if cli.list_rules {
        cmd_list_rules(cli.config, &cli.format)
    } else {
        match cli.path {
            Some(path) => cmd_scan(path, cli.config, &cli.format, cli.output),
            None => {
                eprintln!("{}", USAGE);
                Ok(1)
            }
        }
    };

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn cmd_scan(
    path: PathBuf,
    config: Option<PathBuf>,
    format_str: &str,
    output_path: Option<PathBuf>,
) -> Result<i32, ScanError> {
    let format = OutputFormat::from_str_lenient(format_str).unwrap_or_else(|| {
        eprintln!("Warning: unknown format '{}', using json", format_str);
        OutputFormat::Json
    });

    let options = ScanOptions {
        config_path: config,
        format,
    };

    let report = skillgate::scan(&path, &options)?;
    let rendered = skillgate::render_report(&report, options.format)?;

    match output_path {
        Some(out) => std::fs::write(&out, &rendered)?,
        None => println!("{}", rendered),
    }

    // Exit code: 0 = pass, 1 = HIGH findings present
    Ok(if report.passed { 0 } else { 1 })
}

fn cmd_list_rules(config: Option<PathBuf>, format_str: &str) -> Result<i32, ScanError> {
    let config = match config {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };
    let rules = config.rule_engine()?.list_rules();

    match OutputFormat::from_str_lenient(format_str) {
        Some(OutputFormat::Console) => {
            println!(
                "{:<8} {:<12} {:<9} DESCRIPTION",
                "ID", "LANGUAGE", "SEVERITY"
            );
            println!("{}", "-".repeat(72));
            for rule in &rules {
                println!(
                    "{:<8} {:<12} {:<9} {}",
                    rule.id,
                    rule.language.to_string(),
                    rule.severity.to_string(),
                    rule.description,
                );
            }
        }
        _ => {
            let json = serde_json::to_string_pretty(&rules)?;
            println!("{}", json);
        }
    }

    Ok(0)
}
