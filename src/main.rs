use clap::Parser;
use mlp_infer::cli::PredictArgs;
use mlp_infer::error::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = PredictArgs::parse();
    init_logging();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    mlp_infer::predict::run(&args, &mut out)
}

fn init_logging() {
    // Predictions go to stdout; keep diagnostics on stderr.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,mlp_infer=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
