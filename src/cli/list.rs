use std::path::Path;

use anyhow::Result;
use clap::Args;

use hookfire::HooksConfig;
use hookfire::env::HOOKFIRE_CONFIG;

#[derive(Args)]
pub struct ListArgs {
    /// Hook configuration file
    #[arg(short, long, env = HOOKFIRE_CONFIG, default_value = "hooks.yaml")]
    pub config: String,
}

pub fn run(args: ListArgs) -> Result<()> {
    let config_path = shellexpand::tilde(&args.config).into_owned();
    let config = HooksConfig::load(Path::new(&config_path))?;

    if config.hooks.is_empty() {
        println!("No hooks configured.");
        return Ok(());
    }

    let mut events: Vec<_> = config.hooks.iter().collect();
    events.sort_by_key(|(event, _)| event.as_str());

    for (event, hooks) in events {
        println!("{} ({} hook{})", event, hooks.len(), plural(hooks.len()));
        for hook in hooks {
            let mut notes = Vec::new();
            if hook.retries() > 0 {
                notes.push(format!("retries={}", hook.retries()));
            }
            if let Some(secs) = hook.timeout_sec() {
                notes.push(format!("timeout={secs}s"));
            }
            if hook.ignore_errors() {
                notes.push("ignore_errors".to_string());
            }
            if notes.is_empty() {
                println!("  {}", hook.describe());
            } else {
                println!("  {} ({})", hook.describe(), notes.join(", "));
            }
        }
    }

    Ok(())
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
