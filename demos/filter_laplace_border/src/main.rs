use clap::Parser;
use filter_laplace_border::{catch_failures, run, Args};

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let program = std::env::args()
        .next()
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());
    println!("{program} Starting...\n");

    if let Err(err) = catch_failures(move || run(args)) {
        log::error!("{err}");
        eprintln!("Error occurred: {err}");
        std::process::exit(1);
    }
}
