extern crate acorn;
extern crate tracing;

use acorn::bayesian_network::BayesianNetwork;
use acorn::utils::render::*;
use acorn::{Evidence, Options};
use acorn_networks::Specification;
use clap::Parser;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::time::*;
use tracing::*;
use tracing_subscriber::fmt;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// network description (JSON)
    #[clap(short, long, value_parser, conflicts_with = "network")]
    file: Option<String>,

    /// one of the builtin networks
    #[clap(short, long, value_parser)]
    network: Option<String>,

    /// comma-separated elimination order; children-before-parents if omitted
    #[clap(short, long, value_parser)]
    order: Option<String>,

    /// evidence, e.g. "B=0|A=1"
    #[clap(short, long, value_parser)]
    evidence: Option<String>,

    #[clap(long)]
    marginals: bool,

    #[clap(long, value_parser)]
    debug: bool,

    #[clap(long)]
    stats: bool,
}

fn setup_tracing(lvl: Level) {
    let format = fmt::format()
        .with_level(true)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .without_time()
        .compact();

    tracing_subscriber::fmt()
        .with_max_level(lvl)
        .event_format(format)
        .init();
}

fn load(args: &Args) -> Result<BayesianNetwork, Box<dyn Error>> {
    let src = match (&args.file, &args.network) {
        (Some(file), _) => {
            let pth = PathBuf::from(file);
            debug!("loading file: {:?}", fs::canonicalize(&pth));
            fs::read_to_string(pth)?
        }
        (None, Some(name)) => Specification::_from_str(name)?.json().to_string(),
        (None, None) => return Err("one of --file or --network is required".into()),
    };
    Ok(BayesianNetwork::from_json(&src)?)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    setup_tracing(if args.debug {
        Level::TRACE
    } else {
        Level::WARN
    });

    let bn = load(&args)?;
    if args.debug {
        acorn::print_network!(bn);
    }
    let order = args
        .order
        .as_ref()
        .map(|o| o.split(',').map(|v| v.trim().to_string()).collect::<Vec<_>>());
    let evidence: Evidence = match &args.evidence {
        Some(e) => e.parse()?,
        None => Evidence::empty(),
    };
    bn.validate_evidence(&evidence)?;

    let options = Options::new(args.debug);
    debug!("compilation options: {:?}", options);
    let now = Instant::now();
    let compiled = acorn::run_network(&bn, order.as_deref(), &options)?;
    let elapsed_time = now.elapsed();

    println!("      Order: {}", compiled.order().join(", "));
    for step in compiled.steps() {
        println!("             {}", step);
    }
    if args.stats {
        println!("      Stats: {}", compiled.stats());
        println!(" Nodes (DAG): {}", compiled.circuit_size());
    }
    if args.debug {
        println!("{}", render_circuit(compiled.root(), 2));
    }
    println!("Pr(circuit): {}", compiled.probability(&Evidence::empty())?);
    if !evidence.is_empty() {
        println!(" Pr({}): {}", evidence, compiled.probability(&evidence)?);
    }
    if args.marginals {
        for (var, m) in compiled.marginals(&evidence)? {
            println!("             {}", render_marginal(&var, &m, true));
        }
    }

    if elapsed_time.as_secs() > 10 {
        println!("Took {}s", elapsed_time.as_secs());
    } else {
        println!("Took {}ms", elapsed_time.as_millis());
    }
    Ok(())
}
