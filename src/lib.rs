//! # compose-lens
//!
//! A line-oriented analyzer for Docker Compose files. Works directly on the
//! document text, tolerating half-typed YAML that a strict parser would
//! reject, and produces three views:
//!
//! - **Overview**: service, network, and volume counts
//! - **Structure**: the parsed service model (images, ports, environment,
//!   volumes, networks, dependencies)
//! - **Validation**: a sorted issue report covering YAML syntax, Compose
//!   structure, best practices, and volume cross-references
//!
//! ## Example
//!
//! ```rust
//! use compose_lens::analyzer;
//!
//! let yaml = "services:\n  web:\n    image: nginx:latest\n";
//! let overview = analyzer::analyze_overview(yaml);
//! assert_eq!(overview.services_count, 1);
//!
//! let report = analyzer::validate(yaml);
//! assert!(report.is_valid);
//! ```

pub mod analyzer;
pub mod cli;
pub mod error;
pub mod formatter;

pub use analyzer::{analyze_overview, analyze_structure, validate};
pub use error::{ComposeLensError, Result};

use std::fs;
use std::path::Path;

use cli::{Commands, FailLevel};
use formatter::{FileReport, OutputFormat};

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Execute a CLI command and return the process exit code.
pub fn run_command(command: Commands) -> Result<i32> {
    match command {
        Commands::Check {
            files,
            format,
            fail_on,
        } => handle_check(&files, &format, fail_on),
        Commands::Overview { file, json } => handle_overview(&file, json),
        Commands::Structure { file, json } => handle_structure(&file, json),
    }
}

fn handle_check(files: &[std::path::PathBuf], format: &str, fail_on: FailLevel) -> Result<i32> {
    let format = OutputFormat::parse(format)
        .ok_or_else(|| ComposeLensError::UnknownFormat(format.to_string()))?;

    let mut reports = Vec::with_capacity(files.len());
    for path in files {
        let text = read_input(path)?;
        log::info!("checking {}", path.display());
        reports.push(FileReport::new(path.display().to_string(), validate(&text)));
    }

    print!("{}", formatter::format_reports(&reports, format));

    let failed = reports.iter().any(|report| match fail_on {
        FailLevel::Error => report.result.has_errors,
        FailLevel::Warning => report.result.has_errors || report.result.has_warnings,
        FailLevel::Info => !report.result.issues.is_empty(),
    });
    Ok(i32::from(failed))
}

fn handle_overview(path: &Path, json: bool) -> Result<i32> {
    let text = read_input(path)?;
    let overview = analyze_overview(&text);

    if json {
        println!("{}", serde_json::to_string_pretty(&overview)?);
    } else {
        println!("services: {}", overview.services_count);
        println!("networks: {}", overview.networks_count);
        println!("volumes:  {}", overview.volumes_count);
    }
    Ok(0)
}

fn handle_structure(path: &Path, json: bool) -> Result<i32> {
    let text = read_input(path)?;
    let structure = analyze_structure(&text);

    if json {
        println!("{}", serde_json::to_string_pretty(&structure)?);
        return Ok(0);
    }

    for service in &structure.services {
        println!("{}", service.name);
        if let Some(image) = &service.image {
            println!("  image: {image}");
        }
        for port in &service.ports {
            println!("  port: {}:{}", port.host, port.container);
        }
        for volume in &service.volumes {
            println!("  volume: {}:{}", volume.host, volume.container);
        }
        for network in &service.networks {
            match &network.ip {
                Some(ip) => println!("  network: {} ({ip})", network.name),
                None => println!("  network: {}", network.name),
            }
        }
        for dep in &service.depends_on {
            println!("  depends_on: {dep}");
        }
    }
    for network in &structure.networks {
        let kind = if network.external { "external" } else { "local" };
        println!("network {} ({kind})", network.name);
    }
    for volume in &structure.volumes {
        println!("volume {volume}");
    }
    Ok(0)
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| ComposeLensError::Io {
        path: path.to_path_buf(),
        source,
    })
}
