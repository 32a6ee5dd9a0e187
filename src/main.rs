use clap::Parser;
use scriptmerge::{load, prepare};

mod args;

use crate::args::Args;

fn main() {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbosity.into())
        .init();
    if let Err(e) = run(&args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), scriptmerge::MergeError> {
    log::debug!("Loading {}", args.primary);
    let primary = load(&args.primary)?;
    log::debug!("Loading {}", args.secondary);
    let secondary = load(&args.secondary)?;
    let font = prepare(&primary, &secondary, &args.options())?;
    log::info!("Saving {}", args.out_file);
    font.save(&args.out_file)
}
