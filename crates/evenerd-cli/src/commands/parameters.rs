//! Parameters command handler: print the effective traveler profile.

use anyhow::Result;

use evenerd_lib::Parameters;

use crate::output::{render_parameters, to_json, OutputFormat};

pub fn handle_parameters_command(parameters: &Parameters, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", to_json(parameters)?),
        OutputFormat::Text => print!("{}", render_parameters(parameters)),
    }
    Ok(())
}
