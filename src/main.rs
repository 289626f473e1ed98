use clap::Parser;
use ragchat::cli::commands::Cli;
use ragchat::cli::commands::Commands;
use ragchat::cli::handlers;
use ragchat::config::AppConfig;
use ragchat::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load()?;

    if cli.verbose {
        ragchat::logging::init_logging_with_level("debug")?;
    } else {
        ragchat::logging::init_logging_with_config(Some(&config))?;
    }

    match cli.command {
        Commands::Chat { version, table } => {
            handlers::handle_chat_command(&config, version, table).await?;
        }
        Commands::Ask {
            question,
            version,
            table,
        } => {
            handlers::handle_ask_command(&config, &question, version, table).await?;
        }
        Commands::List { table, limit } => {
            handlers::handle_list_command(&config, table, limit).await?;
        }
        Commands::Show { id, table } => {
            handlers::handle_show_command(&config, id, table).await?;
        }
        Commands::Search {
            query,
            limit,
            version,
            any_version,
            table,
        } => {
            handlers::handle_search_command(&config, &query, limit, version, any_version, table)
                .await?;
        }
        Commands::Versions { prefix, table } => {
            handlers::handle_versions_command(&config, prefix, table).await?;
        }
        Commands::Config => {
            handlers::handle_config_command(&config);
        }
        Commands::Reset => {
            handlers::handle_reset_command(&config)?;
        }
    }

    Ok(())
}
