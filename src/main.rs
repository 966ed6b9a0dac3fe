use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::fs;
use std::io;
use std::path::PathBuf;

use profilegen::profiles::Preset;
use profilegen::{bindings, builder, rspec};

/// Generator for CloudLab/ProtoGENI experiment profile RSpecs
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Profile preset to generate
    #[arg(long, value_enum, default_value_t = Preset::Ubuntu)]
    profile: Preset,

    /// Parameter override as key=value; may be repeated
    #[arg(short = 'p', long = "param", value_parser = bindings::parse_key_value)]
    params: Vec<(String, String)>,

    /// YAML file with a flat key -> value parameter map
    #[arg(long)]
    bindings: Option<PathBuf>,

    /// Write the RSpec here instead of standard output
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// List the chosen profile's parameters and exit
    #[arg(long)]
    list_params: bool,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let schema = args.profile.schema();

    if args.list_params {
        for parameter in schema.parameters() {
            println!(
                "{:<12} {:<9} default={:<56} {}",
                parameter.key,
                parameter.kind.to_string(),
                format!("'{}'", parameter.default),
                parameter.description
            );
        }
        return Ok(());
    }

    info!("Generating profile preset {:?}", args.profile);

    // Collect supplied parameter values; CLI flags win over the file.
    let from_file = match &args.bindings {
        Some(path) => bindings::load_file(path)?,
        None => Default::default(),
    };
    let supplied = bindings::merge(from_file, &args.params);

    // Bind against the schema, build the topology, and render the RSpec.
    let params = schema
        .bind(&supplied)
        .wrap_err("Parameter binding failed")?;
    let topology = builder::build(&args.profile.plan(&params), &params);
    let xml = rspec::render(&topology)?;

    match &args.output {
        Some(path) => {
            fs::write(path, &xml)
                .wrap_err_with(|| format!("Failed to write RSpec to '{}'", path.display()))?;
            info!("Wrote RSpec to {:?}", path);
        }
        None => {
            use io::Write;
            io::stdout()
                .write_all(xml.as_bytes())
                .wrap_err("Failed to write RSpec to stdout")?;
        }
    }

    info!("Profile generation completed successfully");
    Ok(())
}
