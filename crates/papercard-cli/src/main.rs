use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use papercard_core::{AppConfig, CardView, ExitCode, ExternalLink, Paper, load_papers, open_external};
use papercard_tui::app::App;

// ─── CLI Definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "papercard",
    about = "Citation cards for scholarly papers in the terminal",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Paper file (.json or .toml) to browse.
    file: Option<PathBuf>,

    /// Index of the paper to feature (0-based).
    #[arg(long = "main")]
    main_index: Option<usize>,

    /// Output in JSON format.
    /// Also enabled by setting PAPERCARD_JSON=1.
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print paper cards as text.
    Show {
        file: PathBuf,
        /// Only this paper (0-based).
        #[arg(long)]
        index: Option<usize>,
        /// Render with the featured treatment.
        #[arg(long)]
        main: bool,
    },

    /// Print the external link of each paper.
    Link {
        file: PathBuf,
        #[arg(long)]
        index: Option<usize>,
        /// Also open the links in the default browser.
        #[arg(long)]
        open: bool,
    },

    /// Config management.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the config file path.
    Path,
    /// Print the effective config.
    Show,
    /// Write the effective config to the config path.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

// ─── Main ────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let start = Instant::now();
    let cli = Cli::parse();

    let json_output = cli.json || std::env::var("PAPERCARD_JSON").as_deref() == Ok("1");
    let config = AppConfig::load()?;

    match cli.command {
        None => {
            let Some(file) = cli.file else {
                Cli::command().print_help()?;
                std::process::exit(ExitCode::InvalidArgs.code());
            };

            init_file_logging(&config);
            let papers = load_papers(&file)?;
            let mut app = App::new(papers, &config).with_main(cli.main_index);
            papercard_tui::run_tui(&mut app)?;
        }

        Some(Commands::Show { file, index, main }) => {
            init_stderr_logging(&config);
            let papers = load_papers(&file)?;
            let selected = select_papers(&papers, index);
            let views = selected
                .iter()
                .map(|paper| CardView::new(paper, main))
                .collect::<Vec<_>>();
            let dur = start.elapsed().as_millis();

            if json_output {
                print_json(&serde_json::json!({
                    "status": "ok",
                    "data": { "items": views, "total": views.len() },
                    "meta": { "duration_ms": dur }
                }))?;
            } else {
                let text = views
                    .iter()
                    .map(CardView::to_plain_text)
                    .collect::<Vec<_>>()
                    .join("\n");
                print!("{text}");
            }
        }

        Some(Commands::Link { file, index, open }) => {
            init_stderr_logging(&config);
            let papers = load_papers(&file)?;
            let links = select_papers(&papers, index)
                .into_iter()
                .filter_map(ExternalLink::for_paper)
                .collect::<Vec<_>>();

            if links.is_empty() {
                if json_output {
                    print_json(&serde_json::json!({
                        "status": "error",
                        "error": "not_found",
                        "message": "No paper has a DOI or PMID"
                    }))?;
                } else {
                    eprintln!("No paper has a DOI or PMID");
                }
                std::process::exit(ExitCode::NotFound.code());
            }

            if json_output {
                print_json(&serde_json::json!({
                    "status": "ok",
                    "data": { "items": links, "total": links.len() },
                    "meta": { "duration_ms": start.elapsed().as_millis() }
                }))?;
            } else {
                for link in &links {
                    println!("{}", link.url);
                }
            }

            if open {
                let mut failed = false;
                for link in &links {
                    if let Err(err) = open_external(link) {
                        eprintln!("{err}");
                        failed = true;
                    }
                }
                if failed {
                    std::process::exit(ExitCode::GeneralError.code());
                }
            }
        }

        Some(Commands::Config { action }) => match action {
            ConfigAction::Path => {
                let path = AppConfig::config_path();
                if json_output {
                    print_json(&serde_json::json!({"status":"ok","data":{"path":path}}))?;
                } else {
                    println!("{}", path.display());
                }
            }
            ConfigAction::Show => {
                if json_output {
                    print_json(&serde_json::json!({"status":"ok","data":config}))?;
                } else {
                    print!("{}", toml::to_string_pretty(&config)?);
                }
            }
            ConfigAction::Init { force } => {
                let path = AppConfig::config_path();
                if path.exists() && !force {
                    eprintln!("Config already exists: {} (use --force)", path.display());
                    std::process::exit(ExitCode::InvalidArgs.code());
                }
                config.save()?;
                if json_output {
                    print_json(&serde_json::json!({"status":"ok","data":{"path":path}}))?;
                } else {
                    println!("Wrote {}", path.display());
                }
            }
        },
    }

    Ok(())
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// One paper when `index` is given, all of them otherwise.
fn select_papers(papers: &[Paper], index: Option<usize>) -> Vec<&Paper> {
    match index {
        None => papers.iter().collect(),
        Some(idx) => match papers.get(idx) {
            Some(paper) => vec![paper],
            None => {
                eprintln!("No paper at index {idx} ({} loaded)", papers.len());
                std::process::exit(ExitCode::NotFound.code());
            }
        },
    }
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn env_filter(config: &AppConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level))
}

fn init_stderr_logging(config: &AppConfig) {
    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// The terminal UI owns stdout and stderr, so logs go to a file.
fn init_file_logging(config: &AppConfig) {
    let path = config.log_path();
    match open_log_file(&path) {
        Ok(file) => {
            tracing_subscriber::registry()
                .with(env_filter(config))
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        Err(err) => eprintln!("Logging disabled: {err:#}"),
    }
}

fn open_log_file(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_file_and_main() {
        let cli = Cli::try_parse_from(["papercard", "papers.json", "--main", "2"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.file, Some(PathBuf::from("papers.json")));
        assert_eq!(cli.main_index, Some(2));
    }

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["papercard", "show", "p.toml", "--index", "1", "--main"])
            .unwrap();
        match cli.command {
            Some(Commands::Show { file, index, main }) => {
                assert_eq!(file, PathBuf::from("p.toml"));
                assert_eq!(index, Some(1));
                assert!(main);
            }
            _ => panic!("expected show"),
        }

        let cli = Cli::try_parse_from(["papercard", "--json", "link", "p.json", "--open"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Some(Commands::Link { open: true, .. })));
    }

    #[test]
    fn cli_parses_config_init() {
        let cli = Cli::try_parse_from(["papercard", "config", "init", "--force"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Init { force: true }
            })
        ));
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn select_papers_all_or_one() {
        let papers = vec![Paper::new("A", "J", "2000"), Paper::new("B", "J", "2001")];
        assert_eq!(select_papers(&papers, None).len(), 2);
        assert_eq!(select_papers(&papers, Some(1))[0].title, "B");
    }
}
