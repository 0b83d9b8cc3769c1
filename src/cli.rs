//! Command-line interface for typeprint.
//!
//! Loads YAML manifests into a [`PrinterHost`] and lists, resolves, enables or
//! disables the resulting printers. State lives for one invocation only; the
//! settings file's `disabled` list is how selections persist.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use typeprint_config::{Config, ManifestFile};

use crate::printing::{
    Formatter, FunctionCatalog, PrinterHost, RegistrationSettings, ScopeId, Selection, TypeName,
    WriterSink,
};

/// typeprint - inspect a scoped pretty-printer registry
#[derive(Parser, Debug)]
#[command(name = "typeprint")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file (default: ~/.config/typeprint/config.yaml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Load a manifest into its own module scope (repeatable)
    #[arg(short = 'm', long = "manifest", value_name = "PATH")]
    pub manifests: Vec<PathBuf>,

    /// Load a manifest into the global scope (repeatable)
    #[arg(long = "global", value_name = "PATH")]
    pub global_manifests: Vec<PathBuf>,

    /// Print a notice to stderr for every registration
    #[arg(short, long)]
    pub verbose: bool,

    /// Set debug log level (overrides RUST_LOG and DEBUG_LEVEL)
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registered pretty-printers and the enabled counts
    Info {
        /// Regexp matched against `global`, a manifest path or a session label
        scope: Option<String>,
        /// `printer-regexp[;subprinter-regexp]`
        name: Option<String>,
        /// Emit the listing as YAML
        #[arg(long)]
        yaml: bool,
    },

    /// Show what each type name would be printed with
    Resolve {
        #[arg(required = true, value_name = "TYPE")]
        types: Vec<String>,
    },

    /// Enable printers, then report the counts
    Enable {
        scope: Option<String>,
        name: Option<String>,
    },

    /// Disable printers, then report the counts
    Disable {
        scope: Option<String>,
        name: Option<String>,
    },
}

/// Stand-in formatter for manifest function ids: renders `id<type>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFormatter {
    id: String,
    type_name: String,
}

impl Formatter for TagFormatter {
    fn render(&self) -> String {
        format!("{}<{}>", self.id, self.type_name)
    }
}

/// Bind every function id `manifest` references to a [`TagFormatter`] factory.
pub fn tag_catalog(manifest: &ManifestFile) -> FunctionCatalog<TypeName> {
    let mut catalog = FunctionCatalog::new();
    for id in manifest.referenced_functions() {
        let tag = id.to_string();
        catalog = catalog.with(id, move |value: &TypeName| {
            Some(Box::new(TagFormatter {
                id: tag.clone(),
                type_name: value.written().unwrap_or("?").to_string(),
            }) as Box<dyn Formatter>)
        });
    }
    catalog
}

/// Read and validate the settings file named on the command line, or the
/// default one.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default()?,
    };
    Ok(config)
}

/// Build a host from the settings file plus command-line manifests.
///
/// Global manifests load first so module manifests can shadow them at
/// lookup time regardless of order. `disabled` selections apply last.
pub fn build_host(cli: &Cli, config: &Config) -> Result<PrinterHost<TypeName>> {
    let settings = RegistrationSettings {
        verbose: cli.verbose || config.verbose,
    };
    let mut host = PrinterHost::with_sink(settings, Box::new(WriterSink::new(io::stderr())));

    for path in config.global_manifests.iter().chain(&cli.global_manifests) {
        load_manifest_into(&mut host, None, path)?;
    }
    for path in config.manifests.iter().chain(&cli.manifests) {
        let id = host.load_module(path.display().to_string());
        load_manifest_into(&mut host, Some(id), path)?;
    }

    for name in &config.disabled {
        let selection = Selection::from_name(name)
            .with_context(|| format!("invalid disabled selection '{name}'"))?;
        host.set_enabled(&selection, false);
    }
    Ok(host)
}

fn load_manifest_into(
    host: &mut PrinterHost<TypeName>,
    scope: Option<ScopeId>,
    path: &Path,
) -> Result<()> {
    let manifest = ManifestFile::load(path)?;
    let catalog = tag_catalog(&manifest);
    let count = host
        .load_manifest(scope, &manifest, &catalog)
        .with_context(|| format!("failed to register printers from {}", path.display()))?;
    log::info!("Loaded {} printer(s) from {}", count, path.display());
    Ok(())
}

/// Run `cli`, writing command output to `out`.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    let config = load_config(cli)?;
    let mut host = build_host(cli, &config)?;
    execute(&cli.command, &mut host, out)
}

/// Run one command against an already-built host.
pub fn execute(
    command: &Commands,
    host: &mut PrinterHost<TypeName>,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        Commands::Info { scope, name, yaml } => {
            let selection = Selection::parse(scope.as_deref(), name.as_deref())?;
            let listing = host.listing(&selection);
            if *yaml {
                let text = serde_yaml_ng::to_string(&listing).context("failed to serialize listing")?;
                write!(out, "{text}")?;
            } else {
                write!(out, "{listing}")?;
                writeln!(out, "{}", host.counts())?;
            }
        }
        Commands::Resolve { types } => {
            for written in types {
                match host.lookup(&TypeName::new(written.as_str())) {
                    Some(formatter) => writeln!(out, "{written}: {}", formatter.render())?,
                    None => writeln!(out, "{written}: <no printer>")?,
                }
            }
        }
        Commands::Enable { scope, name } => toggle(host, scope, name, true, out)?,
        Commands::Disable { scope, name } => toggle(host, scope, name, false, out)?,
    }
    Ok(())
}

fn toggle(
    host: &mut PrinterHost<TypeName>,
    scope: &Option<String>,
    name: &Option<String>,
    enabled: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let selection = Selection::parse(scope.as_deref(), name.as_deref())?;
    let changed = host.set_enabled(&selection, enabled);
    let noun = if changed == 1 { "printer" } else { "printers" };
    let state = if enabled { "enabled" } else { "disabled" };
    writeln!(out, "{changed} {noun} {state}")?;
    writeln!(out, "{}", host.counts())?;
    Ok(())
}
