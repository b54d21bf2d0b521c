use std::io::Read as _;
use std::path::Path;

use anyhow::{Context as _, Result, bail};
use clap::Args;

use hookfire::HooksConfig;
use hookfire::env::HOOKFIRE_CONFIG;
use hookfire::hooks::HookRunner;

#[derive(Args)]
pub struct RunArgs {
    /// Event name to fire
    pub event: String,

    /// Context object as inline JSON, or `-` to read JSON from stdin
    #[arg(short = 'C', long, default_value = "{}")]
    pub context: String,

    /// Hook configuration file
    #[arg(short, long, env = HOOKFIRE_CONFIG, default_value = "hooks.yaml")]
    pub config: String,
}

pub async fn run(args: RunArgs) -> Result<()> {
    let config_path = shellexpand::tilde(&args.config).into_owned();
    let config = HooksConfig::load(Path::new(&config_path))?;
    let runner = HookRunner::new(config.into_registry());

    let raw = if args.context == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read context from stdin")?;
        buf
    } else {
        args.context
    };

    let value: serde_json::Value =
        serde_json::from_str(&raw).context("context is not valid JSON")?;
    let Some(context) = value.as_object() else {
        bail!("context must be a JSON object, got: {value}");
    };

    runner.run(&args.event, context).await?;
    Ok(())
}
