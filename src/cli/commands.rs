//! Command implementations for the manifest CLI
//!
//! Each handler resolves the active manifest (a file from the flags,
//! environment or config, otherwise the built-in suite) and prints its
//! result to stdout.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::app::manifest::loader::render_manifest;
use crate::app::{
    filter_cases, load_configured, load_manifest, summarize, ManifestConfig, ResolvedCase,
    TestManifest, VariantKind, SUITE_NAME,
};
use crate::cli::args::{CheckArgs, ConfigAction, ConfigArgs, ExportArgs, GlobalArgs, ListArgs, ShowArgs};
use crate::config::AppConfig;
use crate::errors::{AppError, Result};

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Effective configuration after file and environment overrides
    pub config: AppConfig,
    /// Manifest selection with CLI overrides applied
    pub manifest: ManifestConfig,
}

impl CommandContext {
    /// Apply global CLI overrides on top of the loaded configuration
    pub fn new(config: AppConfig, global: &GlobalArgs) -> Self {
        let mut manifest = config.to_runtime_config();
        if let Some(path) = &global.manifest {
            manifest.source = Some(path.clone());
        }
        if global.format.is_some() {
            manifest.format = global.format;
        }

        Self { config, manifest }
    }

    /// Human-readable description of the active manifest source
    pub fn source_label(&self) -> String {
        match &self.manifest.source {
            Some(path) => path.display().to_string(),
            None => format!("built-in {}", SUITE_NAME),
        }
    }

    async fn load(&self) -> Result<TestManifest> {
        debug!("Resolving manifest from {}", self.source_label());
        Ok(load_configured(&self.manifest).await?)
    }
}

/// Handle the list command
pub async fn handle_list(args: ListArgs, ctx: &CommandContext) -> Result<()> {
    let manifest = ctx.load().await?;

    // Apply filters from flags
    let filter = args.filter();
    let selected = filter_cases(&manifest, &filter);

    // Print as JSON if requested
    if args.json {
        println!("{}", serde_json::to_string_pretty(&selected).map_err(to_app)?);
        return Ok(());
    }

    if args.names_only {
        for case in &selected {
            println!("{}", case.name);
        }
        return Ok(());
    }

    // Display as a table
    println!("Test cases ({})", ctx.source_label());
    println!("=================");
    let width = selected.iter().map(|case| case.name.len()).max().unwrap_or(0);
    for case in &selected {
        println!(
            "  {:<width$}  {:<w2$}  {}",
            case.name,
            case.input_file,
            case.expected_outputs.join(", "),
            width = width,
            w2 = width + 2,
        );
    }

    println!();
    if filter.is_active() {
        println!("{} of {} cases selected", selected.len(), manifest.len());
    } else {
        println!("{} cases", manifest.len());
    }
    Ok(())
}

/// Handle the show command
pub async fn handle_show(args: ShowArgs, ctx: &CommandContext) -> Result<()> {
    let manifest = ctx.load().await?;
    let case = manifest.get_case(&args.name)?;

    // Resolve paths under the test directory if one was given
    let resolved = args
        .dir
        .as_deref()
        .map(|dir| ResolvedCase::resolve(case, dir, &ctx.manifest.gold_dir));

    if args.json {
        let value = match &resolved {
            Some(resolved) => serde_json::to_value(resolved),
            None => serde_json::to_value(case),
        }
        .map_err(to_app)?;
        println!("{}", serde_json::to_string_pretty(&value).map_err(to_app)?);
        return Ok(());
    }

    println!("Test case: {}", case.name);
    println!("  Input:    {}", case.input_file);
    println!("  EXODIFF:  {}", case.expected_outputs.join(", "));
    match case.variant() {
        Some(variant) => println!("  Variant:  base {} ({})", variant.base, variant.kind),
        None => println!("  Variant:  (name does not follow the pl_test convention)"),
    }

    if let Some(resolved) = resolved {
        println!();
        println!("  Input path:      {}", resolved.input_path.display());
        for path in &resolved.reference_paths {
            println!("  Reference path:  {}", path.display());
        }
    }
    Ok(())
}

/// Handle the check command
pub async fn handle_check(args: CheckArgs, ctx: &CommandContext) -> Result<()> {
    info!("Validating manifest {}", args.file.display());

    // Load and validate the file, ignoring the configured manifest source
    match load_manifest(&args.file, ctx.manifest.format).await {
        Ok(manifest) => {
            let stats = summarize(&manifest);
            println!("✅ {} is valid", args.file.display());
            println!(
                "   {} test cases, {} reference outputs",
                stats.total_cases, stats.total_expected_outputs
            );
            if stats.unconventional > 0 {
                println!(
                    "   {} case(s) do not follow the pl_test naming convention",
                    stats.unconventional
                );
            }
            Ok(())
        }
        Err(e) => {
            warn!("Manifest validation failed: {}", e);
            println!("❌ {} is invalid", args.file.display());
            Err(e.into())
        }
    }
}

/// Handle the export command
pub async fn handle_export(args: ExportArgs, ctx: &CommandContext) -> Result<()> {
    let manifest = ctx.load().await?;
    let content = render_manifest(&manifest, args.to)?;

    // Write to the output file, or stdout when none was given
    match args.output {
        Some(path) => {
            tokio::fs::write(&path, content).await?;
            println!(
                "Exported {} test cases to {} ({})",
                manifest.len(),
                path.display(),
                args.to
            );
        }
        None => print!("{}", content),
    }
    Ok(())
}

/// Handle the summary command
pub async fn handle_summary(json: bool, ctx: &CommandContext) -> Result<()> {
    let manifest = ctx.load().await?;
    let stats = summarize(&manifest);

    // Print as JSON if requested
    if json {
        println!("{}", serde_json::to_string_pretty(&stats).map_err(to_app)?);
        return Ok(());
    }

    // Display summary
    println!("Manifest summary ({})", ctx.source_label());
    println!("================");
    println!("Test cases:         {}", stats.total_cases);
    println!("Reference outputs:  {}", stats.total_expected_outputs);
    println!(
        "Base tests:         {}",
        stats
            .base_numbers
            .iter()
            .map(|base| base.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    for kind in VariantKind::all() {
        println!("  {:<14} {}", kind.to_string(), stats.variant_count(kind));
    }
    if stats.unconventional > 0 {
        println!("  {:<14} {}", "other", stats.unconventional);
    }
    println!(
        "Complete variant matrix: {}",
        if stats.is_complete_matrix() { "yes" } else { "no" }
    );
    Ok(())
}

/// Handle configuration management
pub async fn handle_config(args: ConfigArgs, ctx: &CommandContext) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            let content = toml::to_string_pretty(&ctx.config)
                .map_err(|e| AppError::generic(format!("Failed to render configuration: {}", e)))?;
            print!("{}", content);
            Ok(())
        }
        ConfigAction::Init { force } => {
            let (path, created): (PathBuf, bool) = AppConfig::initialize_default(force).await?;
            if created {
                println!("📁 Created default configuration file:");
                println!("   {}", path.display());
            } else {
                println!("Configuration file already exists: {}", path.display());
                println!("Use --force to overwrite it.");
            }
            Ok(())
        }
    }
}

fn to_app(e: serde_json::Error) -> AppError {
    AppError::Manifest(e.into())
}
