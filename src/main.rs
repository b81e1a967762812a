use clap::Parser;
use routeforge::cli::{self, Args};
use routeforge::core::error::{AppError, DefaultErrorReporter, ErrorReporter};
use routeforge::logging;
use std::env;

fn main() {
    let args = Args::parse();
    let workspace = env::current_dir().ok();
    let guard = match logging::init(workspace.as_deref(), args.verbose) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("warning: logging disabled: {:#}", e);
            None
        }
    };

    if let Err(err) = cli::run(args) {
        match err.downcast_ref::<AppError>() {
            Some(app_error) => DefaultErrorReporter::new().report_error(app_error),
            None => eprintln!("error: {:#}", err),
        }
        drop(guard);
        std::process::exit(1);
    }
}
