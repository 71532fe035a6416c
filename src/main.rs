//! Navigator - one-shot runner
//!
//! `navigator <provider> <model> <task...>` runs a single task and exits.

use navigator::cli::{parse_runner_args, run_once, Console, Invocation, RUNNER_USAGE};
use navigator::core::logging;
use navigator::{select_llm, AgentBrowserRuntime, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = match parse_runner_args(std::env::args_os()) {
        Ok(Invocation::Run(args)) => args,
        Ok(Invocation::Usage) => {
            println!("{}", RUNNER_USAGE);
            std::process::exit(1);
        }
        Err(e) => e.exit(),
    };

    // Build configuration
    let mut config = Config::load(args.common.config.as_deref())?;
    args.common.apply(&mut config);

    logging::init(config.agent.debug);

    let llm = select_llm(&args.provider, &args.model, &config);
    let runtime = AgentBrowserRuntime::from_config(&config);

    run_once(&runtime, llm, &args.task_text(), &mut Console::stdout()).await?;

    Ok(())
}
