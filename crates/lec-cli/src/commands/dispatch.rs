use lec_ai::AnyTransport;
use lec_config::LecternConfig;
use lec_service::ContentService;

use crate::cli::{Commands, GlobalFlags};
use crate::commands;

/// Route a parsed command to its handler.
pub async fn dispatch(command: Commands, config: &LecternConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Lesson(args) => {
            commands::lesson::handle(&args, &service(config), &config.general, flags).await
        }
        Commands::Assessment(args) => {
            commands::assessment::handle(&args, &service(config), &config.general, flags).await
        }
        Commands::Insights(args) => commands::insights::handle(&args, &service(config), flags).await,
        Commands::Relay(args) => commands::relay::handle(&args, config, flags).await,
        Commands::Topics(args) => commands::topics::handle(&args, flags),
        Commands::Schema(args) => commands::schema::handle(&args, flags),
    }
}

fn service(config: &LecternConfig) -> ContentService<AnyTransport> {
    ContentService::from_config(&config.ai)
}
