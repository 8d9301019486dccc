use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use skillscan::config::Config;
use skillscan::error::ScanError;
use skillscan::output::{self, OutputFormat};
use skillscan::{checker, rules, Rating, Severity};

#[derive(Parser)]
#[command(
    name = "skillscan",
    about = "Security scanner for AI-agent skill and MCP server packages",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a single skill/server directory
    Scan {
        /// Path to the skill directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format (detailed, conversational, json)
        #[arg(long, short = 'f')]
        format: Option<String>,

        /// Config file path (defaults to .skillscan.toml)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Write output to file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Scan your entire MCP setup: all skills plus client configuration
    Setup {
        /// Skills directory, overriding auto-detection
        #[arg(long)]
        skills_dir: Option<PathBuf>,

        /// Output format (detailed, conversational, json)
        #[arg(long, short = 'f')]
        format: Option<String>,

        /// Config file path (defaults to .skillscan.toml)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Write output to file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Check your MCP client configuration only
    Config,

    /// List all detection rules in the catalog
    ListRules {
        /// Output format (table, json)
        #[arg(long, short = 'f', default_value = "table")]
        format: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Scan {
            path,
            format,
            config,
            output,
        }) => cmd_scan(path, format, config, output),
        Some(Commands::Config) => cmd_config(),
        Some(Commands::ListRules { format }) => cmd_list_rules(format),
        Some(Commands::Setup {
            skills_dir,
            format,
            config,
            output,
        }) => cmd_setup(skills_dir, format, config, output),
        // Bare `skillscan` behaves like `skillscan setup`.
        None => cmd_setup(None, None, None, None),
    };

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn resolve_format(cli_format: Option<String>, config: &Config) -> OutputFormat {
    let requested = cli_format.or_else(|| config.scan.format.clone());
    match requested {
        Some(s) => OutputFormat::from_str_lenient(&s).unwrap_or_else(|| {
            eprintln!("Warning: unknown format '{}', using detailed", s);
            OutputFormat::Detailed
        }),
        None => OutputFormat::Detailed,
    }
}

fn rating_exit_code(rating: Rating) -> i32 {
    match rating {
        Rating::Green => 0,
        Rating::Yellow => 1,
        Rating::Red => 2,
    }
}

fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn emit(rendered: &str, output: Option<PathBuf>) -> Result<(), ScanError> {
    match output {
        Some(path) => std::fs::write(path, rendered)?,
        None => print!("{}", rendered),
    }
    Ok(())
}

fn cmd_scan(
    path: PathBuf,
    format: Option<String>,
    config_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
) -> Result<i32, ScanError> {
    let config = Config::load(&config_path.unwrap_or_else(|| PathBuf::from(".skillscan.toml")))?;
    let format = resolve_format(format, &config);

    let result = skillscan::scan(&path);
    let rendered = output::render_skill(&result, format)?;
    emit(&rendered, output_path)?;

    Ok(rating_exit_code(result.rating))
}

fn cmd_setup(
    skills_dir: Option<PathBuf>,
    format: Option<String>,
    config_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
) -> Result<i32, ScanError> {
    let config = Config::load(&config_path.unwrap_or_else(|| PathBuf::from(".skillscan.toml")))?;
    let format = resolve_format(format, &config);

    let home = home_dir();
    let config_findings = checker::check_config(&home);

    let skills_dir = skills_dir
        .or_else(|| config.scan.skills_dir.clone())
        .or_else(|| detect_skills_dir(&home));

    let Some(skills_dir) = skills_dir else {
        if config_findings.is_empty() {
            println!("No MCP skills directory found and no configuration issues detected.");
            println!(
                "If you have MCP skills installed, use --skills-dir <path> to specify the \
                 location."
            );
            return Ok(0);
        }
        // No skills to scan, but config findings still need a report.
        let result = skillscan::scan_setup(std::path::Path::new("/nonexistent"), config_findings);
        let rendered = output::render_setup(&result, format)?;
        emit(&rendered, output_path)?;
        return Ok(rating_exit_code(result.overall_rating));
    };

    let result = skillscan::scan_setup(&skills_dir, config_findings);
    let rendered = output::render_setup(&result, format)?;
    emit(&rendered, output_path)?;

    Ok(rating_exit_code(result.overall_rating))
}

/// Common skill install locations, checked in order.
fn detect_skills_dir(home: &std::path::Path) -> Option<PathBuf> {
    let candidates = [
        home.join(".mcp/skills"),
        home.join(".mcp/servers"),
        home.join(".config/mcp/skills"),
        home.join(".claude/mcp"),
        home.join("Library/Application Support/Claude/mcp"),
    ];
    candidates.into_iter().find(|p| p.exists())
}

fn cmd_config() -> Result<i32, ScanError> {
    let findings = checker::check_config(&home_dir());

    if findings.is_empty() {
        println!("Your MCP configuration looks secure. No issues found.");
        return Ok(0);
    }

    println!(
        "Found {} configuration issue{}:\n",
        findings.len(),
        if findings.len() == 1 { "" } else { "s" }
    );
    for finding in &findings {
        println!("[{}] {}", finding.severity.to_string().to_uppercase(), finding.title);
        println!("{}", finding.plain_english);
        println!("Fix: {}\n", finding.recommendation);
    }

    let has_critical = findings.iter().any(|f| f.severity == Severity::Critical);
    Ok(if has_critical { 2 } else { 1 })
}

fn cmd_list_rules(format: String) -> Result<i32, ScanError> {
    let catalog = rules::catalog();

    match format.as_str() {
        "json" => {
            let listed: Vec<serde_json::Value> = catalog
                .iter()
                .map(|r| {
                    serde_json::json!({
                        "id": r.id,
                        "severity": r.severity,
                        "title": r.title,
                        "description": r.description,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&listed)?);
        }
        _ => {
            println!("{:<10} {:<10} TITLE", "ID", "SEVERITY");
            println!("{}", "-".repeat(72));
            for rule in catalog {
                println!("{:<10} {:<10} {}", rule.id, rule.severity.to_string(), rule.title);
            }
        }
    }

    Ok(0)
}
