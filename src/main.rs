use clap::Parser;
use imgocc::{cli, init_logging, CliArgs};

fn main() -> anyhow::Result<()> {
    init_logging()?;
    tracing::debug!("imgocc {} built {}", imgocc::VERSION, imgocc::BUILD_DATE);

    let args = CliArgs::parse();
    let config = args.load_config()?;
    let report = cli::run(&args, &config)?;

    tracing::info!(
        "Created {} of {} delivered mask(s)",
        report.created,
        report.delivered
    );
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
