pub mod ask;
pub mod chat;

use docqa_config::DocqaConfig;

use crate::cli::{Commands, GlobalFlags};

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    config: &DocqaConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Ask(args) => ask::handle(&args, config, flags).await,
        Commands::Chat(args) => chat::handle(&args, config, flags).await,
    }
}
