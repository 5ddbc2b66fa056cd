use crate::cli::{Commands, GlobalFlags};
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Login(args) => commands::auth::login(&args, ctx, flags).await,
        Commands::Logout => commands::auth::logout(ctx, flags),
        Commands::Whoami => commands::auth::whoami(ctx, flags),
        Commands::Open(args) => commands::navigate::handle(args.route, ctx, flags).await,
        Commands::Studies(args) => commands::studies::list(&args, ctx, flags).await,
        Commands::Study(args) => commands::studies::detail(&args.id, ctx, flags).await,
        Commands::CreateStudy(args) => commands::studies::create(&args, ctx, flags).await,
        Commands::AddInvestigator(args) => {
            commands::studies::add_investigator(&args, ctx, flags).await
        }
        Commands::Users(args) => commands::portal::users(&args, ctx, flags).await,
        Commands::CrfFiles => commands::portal::crf_files(ctx, flags).await,
        Commands::Stats => commands::portal::stats(ctx, flags).await,
        Commands::Health => commands::portal::health(ctx, flags).await,
        Commands::Documents(args) => commands::documents::browse(&args, ctx, flags).await,
        Commands::Download(args) => commands::documents::download(&args, ctx, flags),
        Commands::WatchAccess(args) => commands::access::watch(&args, ctx, flags).await,
        Commands::RequestAccess(args) => commands::access::request(&args, ctx, flags).await,
    }
}
