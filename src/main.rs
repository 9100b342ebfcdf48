use std::process::ExitCode;

fn main() -> ExitCode {
    let directives = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(omrcorpus::log_filter(directives.as_deref()))
        .init();

    match omrcorpus::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
