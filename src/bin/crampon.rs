use anyhow::Result;
use crampon::cli::{self, Invocation};
use crampon::context::StandardContext;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::str::FromStr;

fn init_logging() {
    let level = env::var("CRAMPON_LOG")
        .ok()
        .and_then(|v| LevelFilter::from_str(&v).ok())
        .unwrap_or(LevelFilter::Warn);

    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build();

    // Logs go to stderr so rendered HTML on stdout stays clean.
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

fn main() -> Result<()> {
    init_logging();

    let args: Vec<String> = env::args().skip(1).collect();
    let Invocation { root, command } = cli::parse_args(&args)?;

    let ctx = StandardContext::new(root);
    let output = cli::execute(&command, &ctx, "crampon")?;
    print!("{}", output);
    Ok(())
}
