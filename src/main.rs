use clap::Parser;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::path::PathBuf;
use std::process;

use topogen::{config, graph_io, inventory, output, synth, topology, Error};

/// Configuration generator for message-routing mesh topologies
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the generator configuration YAML file
    #[arg(short, long)]
    config: PathBuf,

    /// Output directory for generated configuration files
    #[arg(short, long, default_value = "topogen_output")]
    output: PathBuf,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(report) = run(&args) {
        // Core error kinds carry their own exit status for enclosing tools.
        if let Some(error) = report.downcast_ref::<Error>() {
            let code = error.exit_code();
            eprintln!("Error: {}", error);
            process::exit(code);
        }
        return Err(report);
    }
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    info!("Starting topogen");
    info!("Configuration file: {:?}", args.config);
    info!("Output directory: {:?}", args.output);

    let config = config::load_config(&args.config)?;

    // Build the graph from an inventory and shape, or load a persisted one.
    let (mut graph, shape_label) = if let Some(graph_file) = &config.graph_file {
        (graph_io::load_graph(graph_file)?, "user_defined".to_string())
    } else {
        let shape = config
            .graph_type
            .as_deref()
            .ok_or_else(|| eyre!("graph_type missing after validation"))?;
        let hostfile = config
            .hostfile
            .as_deref()
            .ok_or_else(|| eyre!("hostfile missing after validation"))?;
        let (routers, brokers) = inventory::resolve(hostfile)?;
        info!("Graph type: {}", shape);
        (topology::build(&routers, &brokers, shape)?, shape.to_string())
    };

    let router_count = graph.routers().count();
    let broker_count = graph.node_count() - router_count;
    info!(
        "Topology ready: {} routers, {} brokers, {} edges",
        router_count,
        broker_count,
        graph.edge_count()
    );

    let configs = synth::synthesize(&mut graph)?;

    // The configuration file's out_dir wins over the command-line default.
    let out_dir = config.out_dir.as_deref().unwrap_or(&args.output);
    let dirname = output::run_dirname(&shape_label, router_count, broker_count);
    let directory = output::write_output(out_dir, &dirname, &graph, &configs)?;
    info!("Generated router configuration in {:?}", directory);

    info!("Configuration generation completed successfully");
    Ok(())
}
