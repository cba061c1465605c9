//! `distla`: inspect routine declarations, library bindings and configuration.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use distla_config::{ConfigLoader, DistlaConfig, LogLevel};
use distla_ffi::{bind_library, routines, NativeLibrary, RoutineDecl, StatusSlot};
use distla_logging::{init_logging, LoggingOptions};
use distla_lowlevel::{RoutineFamily, RoutineTable};
use log::{debug, info};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "distla",
    version = env!("CARGO_PKG_VERSION"),
    about = "Inspect PBLAS/ScaLAPACK/REDIST bindings",
    after_help = r#"
Environment Variables:
  DISTLA_CONFIG=<path>          Path to configuration file
  DISTLA_LIBRARY=scalapack      Library base name
  DISTLA_LIBRARY_PATH=<path>    Explicit library file
  DISTLA_SYMBOL_STYLE=<style>   lower_underscore, lower or upper
  DISTLA_EXPAND_ARGS=1          Default argument expansion
  DISTLA_LOG_LEVEL=warn         Log level (error, warn, info, debug, trace)
  DISTLA_LOG=<filter>           Full tracing filter, overrides the level
"#
)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file path
    #[arg(long, env = "DISTLA_CONFIG")]
    config: Option<PathBuf>,

    /// Set log level
    #[arg(long, value_enum, env = "DISTLA_LOG_LEVEL")]
    log_level: Option<LogLevel>,

    /// Library base name searched on the loader path
    #[arg(long, env = "DISTLA_LIBRARY")]
    library: Option<String>,

    /// Explicit library file
    #[arg(long, env = "DISTLA_LIBRARY_PATH")]
    library_path: Option<PathBuf>,

    /// Forward arguments without expansion
    #[arg(long)]
    raw: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// List declared routines
    Routines {
        /// Only list one family
        #[arg(long, value_enum)]
        family: Option<FamilyArg>,
        /// Check each symbol against the configured library
        #[arg(long)]
        resolve: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        config_command: ConfigCommand,
    },
    /// Show version and call settings
    Info,
}

#[derive(Subcommand, Clone)]
enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Generate sample configuration
    Generate {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show configuration file locations
    Paths,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FamilyArg {
    Pblas,
    Scalapack,
    Redist,
}

impl From<FamilyArg> for RoutineFamily {
    fn from(family: FamilyArg) -> Self {
        match family {
            FamilyArg::Pblas => RoutineFamily::Pblas,
            FamilyArg::Scalapack => RoutineFamily::Scalapack,
            FamilyArg::Redist => RoutineFamily::Redist,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_configuration(&cli)?;
    apply_cli_overrides(&mut config, &cli);

    let _logging = init_logging(LoggingOptions {
        default_filter: config.logging.level.as_str().to_string(),
        stderr: config.logging.stderr,
    });
    distla_lowlevel::set_expand_args(config.call.expand_args);
    debug!("Configuration loaded: {config:?}");

    match cli.command {
        Commands::Routines { family, resolve } => {
            list_routines(&config, family.map(RoutineFamily::from), resolve)
        }
        Commands::Config { config_command } => execute_config_command(config_command, &config),
        Commands::Info => {
            show_info(&config);
            Ok(())
        }
    }
}

fn load_configuration(cli: &Cli) -> Result<DistlaConfig> {
    match &cli.config {
        Some(path) if path.is_file() => {
            let mut config = ConfigLoader::load_from_file(path)?;
            ConfigLoader::apply_environment_variables(&mut config)?;
            Ok(config)
        }
        Some(path) => Err(anyhow::anyhow!(
            "Specified config file does not exist: {}",
            path.display()
        )),
        None => ConfigLoader::load(),
    }
}

fn apply_cli_overrides(config: &mut DistlaConfig, cli: &Cli) {
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(name) = &cli.library {
        config.library.name = name.clone();
    }
    if let Some(path) = &cli.library_path {
        config.library.path = Some(path.clone());
    }
    if cli.raw {
        config.call.expand_args = false;
    }
}

fn load_library(config: &DistlaConfig) -> Result<NativeLibrary> {
    let library = match &config.library.path {
        Some(path) => NativeLibrary::load(path),
        None => NativeLibrary::load_by_name(&config.library.name),
    };
    let library = library.context("Failed to load the configured library")?;
    info!("Using native library {}", library.path());
    Ok(library)
}

fn selected_routines(family: Option<RoutineFamily>) -> Vec<&'static RoutineDecl> {
    match family {
        Some(family) => routines::family_routines(family).iter().collect(),
        None => routines::all_routines().collect(),
    }
}

fn status_label(status: StatusSlot) -> &'static str {
    match status {
        StatusSlot::TrailingInfo => "info",
        StatusSlot::None => "-",
    }
}

fn list_routines(config: &DistlaConfig, family: Option<RoutineFamily>, resolve: bool) -> Result<()> {
    let decls = selected_routines(family);

    if !resolve {
        for decl in &decls {
            println!(
                "{:<12} {:<10} {}",
                decl.name,
                decl.family.as_str(),
                status_label(decl.status)
            );
        }
        println!("{} routines", decls.len());
        return Ok(());
    }

    let library = Arc::new(load_library(config)?);
    let style = config.library.symbol_style;
    let (table, missing) = bind_library(&library, style, decls.iter().copied());
    for decl in &decls {
        let state = if table.contains(decl.name) { "ok" } else { "missing" };
        println!(
            "{:<12} {:<10} {:<14} {}",
            decl.name,
            decl.family.as_str(),
            style.symbol_name(decl.name),
            state
        );
    }
    println!(
        "{} of {} routines resolved in {}",
        table.len(),
        decls.len(),
        library.path()
    );
    if !missing.is_empty() {
        debug!("Missing: {}", missing.join(", "));
    }

    let inventory = RoutineTable::from_inventory();
    let registered: Vec<_> = inventory
        .iter()
        .filter(|r| family.map_or(true, |f| r.family() == f))
        .collect();
    if !registered.is_empty() {
        println!();
        println!("Registered Rust routines:");
        for routine in registered {
            println!(
                "  {:<12} {:<10} {}",
                routine.name(),
                routine.family().as_str(),
                routine.doc()
            );
        }
    }
    Ok(())
}

fn execute_config_command(config_command: ConfigCommand, config: &DistlaConfig) -> Result<()> {
    match config_command {
        ConfigCommand::Show => {
            let yaml = serde_yaml::to_string(config).context("Failed to serialize configuration")?;
            println!("{yaml}");
        }
        ConfigCommand::Generate { output: None } => {
            println!("{}", ConfigLoader::generate_sample_config());
        }
        ConfigCommand::Generate { output: Some(output) } => {
            ConfigLoader::save_to_file(&DistlaConfig::default(), &output)
                .with_context(|| format!("Failed to write config to {}", output.display()))?;
            println!("Sample configuration generated: {}", output.display());
        }
        ConfigCommand::Paths => {
            println!("Configuration files, in search order:");
            for path in ConfigLoader::config_paths() {
                let exists = if path.is_file() { " (exists)" } else { "" };
                println!("  {}{exists}", path.display());
            }
        }
    }
    Ok(())
}

fn show_info(config: &DistlaConfig) {
    let mode = if distla_lowlevel::expand_args() {
        "expanded"
    } else {
        "raw"
    };
    println!("distla {}", env!("CARGO_PKG_VERSION"));
    println!("ABI version: {}", distla_abi::DISTLA_ABI_VERSION);
    println!("Argument mode: {mode}");
    match &config.library.path {
        Some(path) => println!("Library: {}", path.display()),
        None => println!(
            "Library: {}",
            NativeLibrary::platform_lib_name(&config.library.name)
        ),
    }
    println!("Symbol style: {}", config.library.symbol_style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use distla_ffi::SymbolStyle;
    use tempfile::TempDir;

    #[test]
    fn cli_overrides_take_precedence() {
        let cli = Cli::try_parse_from([
            "distla",
            "--log-level",
            "debug",
            "--library",
            "scalapack-mpich",
            "--library-path",
            "/opt/lib/libscalapack.so",
            "--raw",
            "info",
        ])
        .unwrap();
        let mut config = DistlaConfig::default();
        apply_cli_overrides(&mut config, &cli);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.library.name, "scalapack-mpich");
        assert_eq!(
            config.library.path,
            Some(PathBuf::from("/opt/lib/libscalapack.so"))
        );
        assert!(!config.call.expand_args);
    }

    #[test]
    fn routines_subcommand_parses_family() {
        let cli = Cli::try_parse_from(["distla", "routines", "--family", "redist", "--resolve"])
            .unwrap();
        match cli.command {
            Commands::Routines { family, resolve } => {
                assert_eq!(family, Some(FamilyArg::Redist));
                assert!(resolve);
            }
            _ => panic!("expected routines"),
        }
    }

    #[test]
    fn family_filter_selects_one_table() {
        let redist = selected_routines(Some(RoutineFamily::Redist));
        assert!(!redist.is_empty());
        assert!(redist.iter().all(|d| d.family == RoutineFamily::Redist));
        assert!(selected_routines(None).len() > redist.len());
    }

    #[test]
    fn explicit_config_file_is_loaded() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("distla.toml");
        std::fs::write(&path, "[library]\nsymbol_style = \"lower\"\n").unwrap();
        let cli = Cli::try_parse_from(["distla", "--config", path.to_str().unwrap(), "info"])
            .unwrap();
        let config = load_configuration(&cli).unwrap();
        assert_eq!(config.library.symbol_style, SymbolStyle::Lower);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = Cli::try_parse_from(["distla", "--config", "/nonexistent/distla.toml", "info"])
            .unwrap();
        assert!(load_configuration(&cli).is_err());
    }
}
