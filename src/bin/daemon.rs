//! Navigator - persistent daemon
//!
//! `navigator-daemon [provider] [model]` keeps one browser alive and runs a
//! task per stdin line until stdin closes.

use clap::Parser;
use navigator::cli::{Console, Daemon, DaemonArgs, StdinLines};
use navigator::core::logging;
use navigator::{select_llm, AgentBrowserRuntime, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = DaemonArgs::parse();

    // Build configuration
    let mut config = Config::load(args.common.config.as_deref())?;
    args.common.apply(&mut config);

    logging::init(config.agent.debug);

    let llm = select_llm(&args.provider, &args.model, &config);
    let runtime = AgentBrowserRuntime::from_config(&config);

    let daemon = Daemon::new(runtime, llm, &args.provider, &args.model);
    daemon
        .run(&mut StdinLines, &mut Console::stdout())
        .await?;

    Ok(())
}
