//! CLI command handlers

use std::io::BufRead;
use std::io::Write as _;
use std::sync::Arc;

use tracing::warn;

use crate::chat::ChatMessage;
use crate::chat::ChatState;
use crate::chat::ChatStore;
use crate::cli::output;
use crate::database::Database;
use crate::embeddings::EmbeddingService;
use crate::models::ContentTable;
use crate::rag::RagService;
use crate::rag::Retriever;
use crate::AppConfig;
use crate::Result;

/// Store plus the state it loaded
fn load_state(config: &AppConfig) -> Result<(ChatStore, ChatState)> {
    let store = ChatStore::new(config.history_path());
    let fresh = ChatState::new(
        config.default_version().to_string(),
        ContentTable::parse(config.default_table())?,
    );
    let state = store.load(fresh);
    Ok((store, state))
}

/// Sticky preference overridden per invocation by the CLI flag
const fn resolve_table(flag: Option<ContentTable>, state: &ChatState) -> ContentTable {
    match flag {
        Some(table) => table,
        None => state.selected_table,
    }
}

/// Handle list command
pub async fn handle_list_command(
    config: &AppConfig,
    table: Option<ContentTable>,
    limit: u32,
) -> Result<()> {
    let (_, state) = load_state(config)?;
    let table = resolve_table(table, &state);

    output::print_list_header(table.table_name(), limit);

    let database = Database::from_config(config).await?;
    let items = database.list_items(table, i64::from(limit)).await?;
    output::print_item_list(&items);

    Ok(())
}

/// Handle show command
pub async fn handle_show_command(
    config: &AppConfig,
    id: i64,
    table: Option<ContentTable>,
) -> Result<()> {
    let (_, state) = load_state(config)?;
    let table = resolve_table(table, &state);

    let database = Database::from_config(config).await?;
    match database.get_item(table, id).await? {
        Some(item) => output::print_item_details(&item),
        None => println!("No item found with id {id} in {table}."),
    }

    Ok(())
}

/// Handle search command (retrieval only, no LLM generation)
pub async fn handle_search_command(
    config: &AppConfig,
    query: &str,
    limit: u32,
    version: Option<String>,
    any_version: bool,
    table: Option<ContentTable>,
) -> Result<()> {
    let (_, state) = load_state(config)?;
    let table = resolve_table(table, &state);

    let version_filter = if any_version {
        None
    } else {
        version.as_deref().or_else(|| state.active_version())
    };

    let database = Arc::new(Database::from_config(config).await?);
    let embedding_service = Arc::new(EmbeddingService::new(config)?);
    let retriever = Retriever::new(database, embedding_service);

    let results = retriever
        .semantic_search(table, query, limit as usize, version_filter)
        .await?;

    println!(
        "Searching {} (version: {})",
        table,
        version_filter.unwrap_or("any")
    );
    output::print_search_results(&results);

    Ok(())
}

/// Handle versions command
pub async fn handle_versions_command(
    config: &AppConfig,
    prefix: Option<String>,
    table: Option<ContentTable>,
) -> Result<()> {
    let (_, state) = load_state(config)?;
    let table = resolve_table(table, &state);

    let database = Database::from_config(config).await?;
    let versions = database.list_versions(table).await?;

    let filtered = crate::chat::filter_versions(&versions, prefix.as_deref().unwrap_or(""));
    if filtered.is_empty() {
        println!("No versions found in {table}.");
    } else {
        println!("Versions in {table}:");
        for version in filtered {
            println!("  {version}");
        }
    }

    Ok(())
}

/// Handle config command
pub fn handle_config_command(config: &AppConfig) {
    output::print_config(config);
}

/// Handle reset command
pub fn handle_reset_command(config: &AppConfig) -> Result<()> {
    let store = ChatStore::new(config.history_path());
    store.clear()?;
    println!("Chat history cleared.");
    Ok(())
}

/// Handle one-shot ask command
pub async fn handle_ask_command(
    config: &AppConfig,
    question: &str,
    version: Option<String>,
    table: Option<ContentTable>,
) -> Result<()> {
    let (store, mut state) = load_state(config)?;
    apply_overrides(&mut state, version, table);

    let service = RagService::new(config).await?;
    run_turn(&service, &store, &mut state, question).await
}

/// Handle interactive chat command
pub async fn handle_chat_command(
    config: &AppConfig,
    version: Option<String>,
    table: Option<ContentTable>,
) -> Result<()> {
    let (store, mut state) = load_state(config)?;
    apply_overrides(&mut state, version, table);
    store.save(&state)?;

    let service = RagService::new(config).await?;

    println!(
        "Chatting over {} (version filter: {}). {} prior message(s) loaded.",
        state.selected_table,
        state.active_version().unwrap_or("off"),
        state.messages.len()
    );
    println!("Commands: /version <v>, /table <name>, /filter on|off, /reset, /quit");

    let stdin = std::io::stdin();
    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let input = line.trim();

        if input.is_empty() {
            continue;
        }

        if let Some(command) = input.strip_prefix('/') {
            if handle_slash_command(command, &store, &mut state)? {
                break;
            }
            continue;
        }

        run_turn(&service, &store, &mut state, input).await?;
    }

    Ok(())
}

/// In-loop controls; returns true when the loop should exit
fn handle_slash_command(command: &str, store: &ChatStore, state: &mut ChatState) -> Result<bool> {
    let (name, arg) = command
        .split_once(' ')
        .map_or((command, ""), |(n, a)| (n, a.trim()));

    match name {
        "quit" | "exit" => return Ok(true),
        "reset" => {
            state.reset_messages();
            store.save(state)?;
            println!("Chat history reset.");
        }
        "version" => {
            if arg.is_empty() {
                println!("Current version filter: {}", state.selected_version);
            } else {
                state.selected_version = arg.to_string();
                state.version_filter = true;
                store.save(state)?;
                println!("Version filter set to {arg}.");
            }
        }
        "table" => match ContentTable::parse(arg) {
            Ok(table) => {
                state.selected_table = table;
                store.save(state)?;
                println!("Content table set to {table}.");
            }
            Err(e) => println!("{e}"),
        },
        "filter" => match arg {
            "on" => {
                state.version_filter = true;
                store.save(state)?;
                println!("Version filter enabled.");
            }
            "off" => {
                state.version_filter = false;
                store.save(state)?;
                println!("Version filter disabled.");
            }
            _ => println!("Usage: /filter on|off"),
        },
        other => println!("Unknown command: /{other}"),
    }

    Ok(false)
}

/// One chat turn: the completion sees the transcript as it was before this
/// turn; the new user message and the reply are appended and persisted after.
/// A failed turn becomes an assistant-visible error message, not an exit.
async fn run_turn(
    service: &RagService,
    store: &ChatStore,
    state: &mut ChatState,
    input: &str,
) -> Result<()> {
    let response = service.chat_turn(state, input).await;

    state.push(ChatMessage::user(input.to_string()));

    match response {
        Ok(response) => {
            println!("\n{}\n", response.answer);
            output::print_suggestions(&response.suggestions);
            state.push(ChatMessage::assistant(response.answer, response.suggestions));
        }
        Err(e) => {
            warn!("Chat turn failed: {e}");
            let text = format!("Error: {e}");
            println!("\n{text}\n");
            state.push(ChatMessage::assistant(text, Vec::new()));
        }
    }

    store.save(state)?;
    Ok(())
}

fn apply_overrides(state: &mut ChatState, version: Option<String>, table: Option<ContentTable>) {
    if let Some(version) = version {
        state.selected_version = version;
        state.version_filter = true;
    }
    if let Some(table) = table {
        state.selected_table = table;
    }
}
