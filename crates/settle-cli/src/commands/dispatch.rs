use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Report(args) => commands::report::handle(&args, ctx, flags).await,
        Commands::Fetch(args) => commands::fetch::handle(&args, ctx, flags).await,
        Commands::Post(args) => commands::post::handle(&args, ctx, flags).await,
        Commands::Summarize(args) => commands::summarize::handle(&args, flags),
        Commands::Schema(_) => unreachable!("schema is pre-dispatched in main"),
    }
}
