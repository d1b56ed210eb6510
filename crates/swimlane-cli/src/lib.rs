//! Swimlane CLI library
//!
//! This module contains the core CLI logic for the swimlane layout tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;
pub use error_adapter::ErrorAdapter;

use std::fs;

use log::info;

use swimlane::{DiagramBuilder, SwimlaneError, config::AppConfig};

/// Run the swimlane CLI application
///
/// This function reads the input diagram and role file, lays the diagram
/// out in swimlanes and writes the resulting JSON to the output file.
///
/// # Errors
///
/// Returns `SwimlaneError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed diagram or role documents
/// - Layout errors
pub fn run(args: &Args) -> Result<(), SwimlaneError> {
    info!(
        input_path = args.input,
        roles_path = args.roles,
        output_path = args.output;
        "Processing diagram"
    );

    let app_config = with_seed_override(config::load_config(args.config.as_ref())?, args.seed);

    let source = fs::read_to_string(&args.input)?;
    let role_source = fs::read_to_string(&args.roles)?;

    let builder = DiagramBuilder::new(app_config);
    let mut diagram = builder.parse(&source)?;
    let roles = builder.parse_roles(&role_source)?;
    builder.layout(&mut diagram, &roles)?;
    let json = builder.render_json(&diagram)?;

    fs::write(&args.output, json)?;

    info!(output_file = args.output; "Diagram exported successfully");

    Ok(())
}

fn with_seed_override(config: AppConfig, seed: Option<u64>) -> AppConfig {
    match seed {
        Some(seed) => {
            let routing = config.routing().clone().with_seed(Some(seed));
            config.with_routing(routing)
        }
        None => config,
    }
}
