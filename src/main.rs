//! tulsigen CLI
//!
//! Entry point for the `tulsigen` command-line tool.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tulsigen::config::per_user_filename;
use tulsigen::{normalize_path_filters, BazelLocator, ConfigError, GeneratorConfig};

#[derive(Parser)]
#[command(name = "tulsigen")]
#[command(about = "Inspect and rewrite generator configs", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a config and print its resolved settings
    Show {
        /// Path to the .tulsigen file
        config: PathBuf,

        /// Bazel binary to use instead of the saved or discovered one
        #[arg(long)]
        bazel: Option<PathBuf>,

        /// Workspace root searched for a Bazel wrapper
        #[arg(long, short = 'w')]
        workspace_root: Option<PathBuf>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Print the package paths the given source filters normalize to
    Normalize {
        /// Labels or package paths
        #[arg(required = true)]
        filters: Vec<String>,
    },

    /// Load a config and write it back out in canonical form
    Save {
        /// Path to the .tulsigen file
        config: PathBuf,

        /// Bazel binary to use instead of the saved or discovered one
        #[arg(long)]
        bazel: Option<PathBuf>,

        /// Workspace root searched for a Bazel wrapper
        #[arg(long, short = 'w')]
        workspace_root: Option<PathBuf>,

        /// Directory to write into (default: the config's directory)
        #[arg(long, short = 'o')]
        output_dir: Option<PathBuf>,

        /// Extra source filters to add (repeatable)
        #[arg(long = "add-filter")]
        add_filters: Vec<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Show {
            config,
            bazel,
            workspace_root,
            json,
        } => run_show(&config, bazel.as_deref(), workspace_root.as_deref(), json),
        Commands::Normalize { filters } => {
            for filter in normalize_path_filters(&filters) {
                println!("{}", filter);
            }
            Ok(())
        }
        Commands::Save {
            config,
            bazel,
            workspace_root,
            output_dir,
            add_filters,
        } => run_save(
            &config,
            bazel.as_deref(),
            workspace_root.as_deref(),
            output_dir,
            &add_filters,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn load(
    path: &Path,
    bazel: Option<&Path>,
    workspace_root: Option<&Path>,
) -> Result<GeneratorConfig, ConfigError> {
    GeneratorConfig::load_with_locator(path, bazel, &BazelLocator::new(workspace_root))
}

fn run_show(
    path: &Path,
    bazel: Option<&Path>,
    workspace_root: Option<&Path>,
    json: bool,
) -> Result<(), ConfigError> {
    let config = load(path, bazel, workspace_root)?;
    let bazel_url = config.bazel_url_parameter();
    let labels: Vec<&str> = config
        .build_target_labels()
        .iter()
        .map(|l| l.value())
        .collect();

    if json {
        let value = serde_json::json!({
            "projectName": config.project_name(),
            "buildTargets": labels,
            "sourceFilters": config.path_filters(),
            "additionalFilePaths": config.additional_file_paths(),
            "bazelPath": bazel_url.value.display().to_string(),
            "bazelSource": bazel_url.source,
            "defaultFilename": config.default_filename(),
            "xcodeProject": config.xcode_project_filename(),
        });
        let text = serde_json::to_string_pretty(&value)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;
        println!("{}", text);
        return Ok(());
    }

    println!("Project: {}", config.project_name());
    println!("  Xcode project: {}", config.xcode_project_filename());
    println!(
        "  Bazel: {} ({})",
        bazel_url.value.display(),
        bazel_url.source
    );
    println!("  Targets: {}", labels.join(", "));
    if !config.path_filters().is_empty() {
        let filters: Vec<&str> = config.path_filters().iter().map(String::as_str).collect();
        println!("  Source filters: {}", filters.join(", "));
    }
    if let Some(paths) = config.additional_file_paths() {
        println!("  Additional files: {}", paths.join(", "));
    }
    let option_count = config.options().iter().count();
    if option_count > 0 {
        println!("  Options: {}", option_count);
    }
    Ok(())
}

fn run_save(
    path: &Path,
    bazel: Option<&Path>,
    workspace_root: Option<&Path>,
    output_dir: Option<PathBuf>,
    add_filters: &[String],
) -> Result<(), ConfigError> {
    let mut config = load(path, bazel, workspace_root)?;
    if !add_filters.is_empty() {
        config = config.appending_path_filters(normalize_path_filters(add_filters));
    }

    let dir = output_dir
        .or_else(|| path.parent().map(Path::to_path_buf))
        .unwrap_or_default();

    let shareable_path = dir.join(config.default_filename());
    write_file(&shareable_path, &config.save()?)?;

    if let Some(per_user) = config.save_per_user_settings()? {
        write_file(&dir.join(per_user_filename()), &per_user)?;
    }
    Ok(())
}

fn write_file(path: &Path, data: &[u8]) -> Result<(), ConfigError> {
    fs::write(path, data).map_err(|e| {
        ConfigError::SerializationFailed(format!("Could not write {}: {}", path.display(), e))
    })?;
    eprintln!("Wrote: {}", path.display());
    Ok(())
}
