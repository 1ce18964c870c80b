//! turas-templates CLI
//!
//! Generates the annotated configuration workbooks for the TURAS analysis
//! modules (or their plain working templates), and edits or annotates
//! existing ones.

mod report;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use report::{ExitCode, GenerationReport};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use turas_template_catalog::Module;
use turas_template_core::TemplateSpec;
use turas_template_render::{
    annotate_working_template, patch_settings, ExcelRenderer, PatchOutcome, SettingPatch,
};

#[derive(Parser)]
#[command(name = "turas-templates")]
#[command(author, version, about = "Annotated configuration templates for TURAS", long_about = None)]
struct Cli {
    /// Verbose output (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate template workbooks (every catalog module when none are named)
    Generate {
        /// Catalog modules to generate
        #[arg(value_name = "MODULE")]
        modules: Vec<Module>,

        /// Output directory, created if missing
        #[arg(short, long, env = "TURAS_TEMPLATES_DIR", default_value = "templates")]
        output: PathBuf,

        /// Creation date printed on the instructions sheet (default: today)
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,

        /// Additional template definitions in JSON
        #[arg(long = "spec", value_name = "FILE")]
        specs: Vec<PathBuf>,

        /// Write the plain working templates instead of the annotated ones
        #[arg(long)]
        working: bool,
    },

    /// List catalog modules and their output files
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a module's template definition as JSON
    Describe {
        #[arg(value_name = "MODULE")]
        module: Module,
    },

    /// Replace setting values in an existing workbook
    Patch {
        /// Workbook to edit in place
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Sheet holding the settings
        #[arg(long, default_value = "Settings")]
        sheet: String,

        /// Setting to replace
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_setting, required = true)]
        settings: Vec<SettingPatch>,
    },

    /// Copy a working template and prepend generic instructions
    Annotate {
        /// Existing working template
        #[arg(value_name = "WORKING")]
        working: PathBuf,

        /// Module name used in the instructions text
        #[arg(short, long)]
        module: String,

        /// Annotated output path
        #[arg(short, long)]
        output: PathBuf,

        /// Creation date printed on the instructions sheet (default: today)
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,
    },
}

fn parse_setting(input: &str) -> Result<SettingPatch, String> {
    SettingPatch::parse(input).ok_or_else(|| format!("expected KEY=VALUE, got '{input}'"))
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(code) => {
            if !code.is_success() {
                warn!("finished with failures");
            }
            code.into()
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::Failure.into()
        }
    }
}

fn run(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Generate {
            modules,
            output,
            date,
            specs,
            working,
        } => {
            let jobs = if working {
                working_jobs(&modules)?
            } else {
                catalog_jobs(&modules, specs.is_empty())
            };
            generate(jobs, &specs, &output, date.unwrap_or_else(today))
        }
        Commands::List { json } => {
            list(json)?;
            Ok(ExitCode::Success)
        }
        Commands::Describe { module } => {
            println!("{}", module.template().to_json()?);
            Ok(ExitCode::Success)
        }
        Commands::Patch {
            file,
            sheet,
            settings,
        } => patch(&file, &sheet, &settings),
        Commands::Annotate {
            working,
            module,
            output,
            date,
        } => {
            let names =
                annotate_working_template(&working, &output, &module, date.unwrap_or_else(today))
                    .with_context(|| format!("annotating {}", working.display()))?;
            println!("Created: {} ({})", output.display(), names.join(", "));
            Ok(ExitCode::Success)
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// (label, output file name and template) for one workbook to write
type Job = (String, Result<(String, TemplateSpec)>);

/// Annotated templates; every module when none are named and no specs are given
fn catalog_jobs(modules: &[Module], all_when_empty: bool) -> Vec<Job> {
    let selected: &[Module] = if modules.is_empty() && all_when_empty {
        &Module::ALL
    } else {
        modules
    };
    selected
        .iter()
        .map(|m| {
            let file_name = m.file_name().to_string();
            (file_name.clone(), Ok((file_name, m.template())))
        })
        .collect()
}

/// Plain working templates; every module that has one when none are named
fn working_jobs(modules: &[Module]) -> Result<Vec<Job>> {
    let selected: &[Module] = if modules.is_empty() {
        &Module::ALL
    } else {
        modules
    };
    let mut jobs = Vec::new();
    for &module in selected {
        match (module.working_file_name(), module.working_template()) {
            (Some(file_name), Some(template)) => {
                jobs.push((file_name.to_string(), Ok((file_name.to_string(), template))));
            }
            _ if modules.is_empty() => {}
            _ => bail!("module '{module}' has no plain working template"),
        }
    }
    Ok(jobs)
}

fn generate(
    mut jobs: Vec<Job>,
    specs: &[PathBuf],
    output: &Path,
    created: NaiveDate,
) -> Result<ExitCode> {
    fs::create_dir_all(output)
        .with_context(|| format!("creating output directory {}", output.display()))?;

    for spec in specs {
        let template = load_spec(spec)
            .and_then(|template| Ok((output_file_name(&template)?, template)));
        jobs.push((spec.display().to_string(), template));
    }

    let renderer = ExcelRenderer::new();
    let mut report = GenerationReport::default();
    let mut claimed = HashSet::new();
    for (label, job) in jobs {
        let result = job.and_then(|(file_name, template)| {
            let path = output.join(file_name);
            if !claimed.insert(path.clone()) {
                return Err(anyhow!(
                    "output path {} is already written by an earlier template",
                    path.display()
                ));
            }
            renderer
                .assemble(&template, created)
                .and_then(|workbook| workbook.persist(&path))?;
            Ok(path)
        });

        match result {
            Ok(path) => {
                println!("Created: {}", path.display());
                report.record_written(path);
            }
            Err(err) => {
                error!(template = %label, "{err:#}");
                eprintln!("Failed: {label}: {err:#}");
                report.record_failure(label, format!("{err:#}"));
            }
        }
    }

    println!("{}", report.summary());
    info!(
        written = report.written.len(),
        failed = report.failed.len(),
        "generation finished"
    );
    Ok(report.exit_code())
}

fn load_spec(path: &Path) -> Result<TemplateSpec> {
    let json =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    TemplateSpec::from_json(&json).with_context(|| format!("loading {}", path.display()))
}

/// Catalog modules keep their published file names; anything else is `<module>.xlsx`.
///
/// A module name that could escape the output directory is rejected.
fn output_file_name(template: &TemplateSpec) -> Result<String> {
    if let Ok(module) = template.module.parse::<Module>() {
        return Ok(module.file_name().to_string());
    }
    let name = template.module.trim();
    if name.is_empty()
        || name.contains(['/', '\\'])
        || name == "."
        || name == ".."
        || Path::new(name).is_absolute()
    {
        bail!("module name '{}' is not a valid file name", template.module);
    }
    Ok(format!("{name}.xlsx"))
}

fn list(json: bool) -> Result<()> {
    if json {
        let entries: Vec<_> = Module::ALL
            .iter()
            .map(|m| {
                serde_json::json!({
                    "module": m.name(),
                    "file": m.file_name(),
                    "summary": m.summary(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for module in Module::ALL {
            println!(
                "{:<26} {:<50} {}",
                module.name(),
                module.file_name(),
                module.summary()
            );
        }
    }
    Ok(())
}

fn patch(file: &Path, sheet: &str, settings: &[SettingPatch]) -> Result<ExitCode> {
    if !file.exists() {
        bail!("workbook not found: {}", file.display());
    }

    let outcomes = patch_settings(file, sheet, settings)
        .with_context(|| format!("patching {}", file.display()))?;

    for (outcome, setting) in outcomes.iter().zip(settings) {
        match outcome {
            PatchOutcome::Updated { key, row, previous } => {
                println!(
                    "Updated: {key} (row {}): '{previous}' -> '{}'",
                    row + 1,
                    setting.value
                );
            }
            PatchOutcome::NotFound { key } => {
                println!("Not found: {key} (sheet '{sheet}')");
            }
        }
    }
    if !outcomes.iter().any(PatchOutcome::is_updated) {
        println!("No changes written");
    }
    Ok(ExitCode::Success)
}
