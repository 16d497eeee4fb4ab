mod config;
mod prompt;
mod shell;

use anyhow::Context;
use rowsmith_core::storage::MemDatabase;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::ShellConfig;
use prompt::TerminalPrompts;

fn main() -> anyhow::Result<()> {
    let config = ShellConfig::load().context("failed to load configuration")?;
    init_tracing(&config.log.level);

    let mut db = if config.in_memory {
        MemDatabase::in_memory()
    } else {
        MemDatabase::open(&config.data_file)
            .with_context(|| format!("failed to open {}", config.data_file.display()))?
    };
    info!(path = ?db.path(), "database opened");

    let mut prompts = TerminalPrompts::new().context("failed to initialize the terminal")?;

    println!("rowsmith (Ctrl-C backs out of a prompt, Ctrl-D at the main menu quits)");
    shell::run(&mut db, &mut prompts, config.coercion.unknown_types)?;
    println!("Goodbye!");
    Ok(())
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
