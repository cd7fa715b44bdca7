//! rest-endpoint CLI
//!
//! Entry point for the `rest-endpoint` command-line tool.

use clap::{Parser, Subcommand};
use rest_endpoint::cli::{attach_parameters, build_parameters, parse_route};
use rest_endpoint::{EffectiveDefaults, Endpoint};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "rest-endpoint")]
#[command(about = "Merge REST routes and parameters onto endpoint defaults", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge a route and parameters onto the effective defaults
    Merge {
        /// Route shorthand ("GET /orgs/:org") or a JSON object with method and url
        route: String,

        /// Extra parameters as a JSON object
        #[arg(long, short = 'p')]
        params: Option<String>,

        /// Request header, repeatable ("Name: value")
        #[arg(long = "header", short = 'H')]
        headers: Vec<String>,

        /// Preview to enable, repeatable
        #[arg(long = "preview")]
        previews: Vec<String>,

        /// Path to a defaults file (TOML, or JSON with a .json extension)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Print compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Show the effective defaults
    Defaults {
        /// Path to a defaults file (TOML, or JSON with a .json extension)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Include sources and digests, with secrets redacted
        #[arg(long)]
        provenance: bool,
    },
}

fn main() {
    pretty_env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Merge {
            route,
            params,
            headers,
            previews,
            config,
            compact,
        } => {
            run_merge(&route, params.as_deref(), &headers, &previews, config, compact);
        }
        Commands::Defaults { config, provenance } => {
            run_defaults(config, provenance);
        }
    }
}

fn load_effective(config_path: Option<PathBuf>) -> EffectiveDefaults {
    let host_path = EffectiveDefaults::default_host_path();

    match EffectiveDefaults::build(host_path.as_deref(), config_path.as_deref(), None) {
        Ok(effective) => effective,
        Err(e) => {
            eprintln!("Error loading defaults: {}", e);
            process::exit(1);
        }
    }
}

fn run_merge(
    route: &str,
    params: Option<&str>,
    headers: &[String],
    previews: &[String],
    config_path: Option<PathBuf>,
    compact: bool,
) {
    let route = match parse_route(route) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let parameters = match build_parameters(params, headers, previews) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let route = attach_parameters(route, &parameters);
    let endpoint = Endpoint::from_config(&load_effective(config_path));
    let merged = endpoint.merge(route, Some(&parameters));

    let output = if compact {
        serde_json::to_string(&merged)
    } else {
        serde_json::to_string_pretty(&merged)
    };

    match output {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}

fn run_defaults(config_path: Option<PathBuf>, provenance: bool) {
    let effective = load_effective(config_path);

    let output = if provenance {
        serde_json::to_string_pretty(&effective.to_report())
    } else {
        serde_json::to_string_pretty(effective.defaults.as_map())
    };

    match output {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}
