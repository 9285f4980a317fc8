use std::fs;
use std::time::Instant;

use anyhow::{Context, Result};
use boxfit::io::ext_repr::ExtInstance;
use boxfit::io::{export_results, export_solution, import};
use btf::config::BTFConfig;
use btf::io;
use btf::io::cli::Cli;
use btf::io::output::BTFOutput;
use btf::opt::layout_solver::solve_all;
use btf::opt::packer::{PackOutcome, Packer};
use clap::Parser as ClapParser;
use log::{info, warn};

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config: BTFConfig = match args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            BTFConfig::default()
        }
        Some(config_file) => io::read_json(&config_file).context("incorrect config file format")?,
    };
    info!("[MAIN] Successfully parsed BTFConfig: {config:?}");

    let input_stem = args
        .input_file
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("invalid input file: {}", args.input_file.display()))?;

    if !args.solution_folder.exists() {
        fs::create_dir_all(&args.solution_folder).with_context(|| {
            format!(
                "could not create solution folder: {}",
                args.solution_folder.display()
            )
        })?;
    }

    let ext_instance: ExtInstance = io::read_json(&args.input_file)?;
    let mut instance = import(&ext_instance)?;
    info!(
        "[MAIN] Instance {} loaded: {} pieces, {} containers",
        instance.name,
        instance.pieces.len(),
        instance.containers.len()
    );

    let start = Instant::now();
    let outcome = Packer::new(config).solve(&mut instance.pieces, &mut instance.containers)?;
    let packed = outcome == PackOutcome::Packed;
    let solution = export_solution(&instance.containers, packed, start.elapsed());

    let layouts = match packed && config.layout {
        true => {
            let records = export_results(&instance.containers, &instance.pieces)?;
            solve_all(&records, &config)?
        }
        false => vec![],
    };
    if !packed {
        warn!("[MAIN] Unable to pack instance {}: {outcome:?}", instance.name);
    }

    let output = BTFOutput {
        instance: ext_instance,
        solution,
        layouts,
        config,
    };
    let solution_path = args.solution_folder.join(format!("sol_{input_stem}.json"));
    io::write_json(&output, &solution_path)?;

    Ok(())
}
