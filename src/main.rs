//! modeldeck - manage the models offered for each AI coding agent

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use modeldeck::{
    Config, CustomBackend, FileStore, ManageModelsState, ModelCatalog, ModelRegistry, Provider,
};

/// Manage built-in and custom models for AI coding agents
#[derive(Parser)]
#[command(name = "modeldeck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List built-in and custom models
    List {
        /// Provider to list (claude, cursor, codex)
        provider: Option<Provider>,
    },
    /// Add a custom model
    Add {
        /// Provider the model belongs to
        provider: Provider,
        /// Model identifier passed to the agent
        model_id: String,
        /// Display name (defaults to the identifier)
        #[arg(long)]
        label: Option<String>,
    },
    /// Remove a custom model
    Remove {
        /// Provider the model belongs to
        provider: Provider,
        /// Model identifier to remove
        model_id: String,
    },
    /// Print the default model
    Default {
        /// Provider to query
        provider: Option<Provider>,
    },
    /// Show or change the custom Claude backend (Ollama or compatible)
    Backend {
        #[command(subcommand)]
        action: Option<BackendAction>,
    },
    /// Show the effective configuration
    Config {
        /// Print only the config file path
        #[arg(long)]
        path: bool,
        /// Save a new default provider to the config file
        #[arg(long, value_name = "PROVIDER")]
        set_default_provider: Option<Provider>,
    },
}

#[derive(Subcommand)]
enum BackendAction {
    /// Show the current settings
    Show,
    /// Route Claude requests through the custom backend
    Enable,
    /// Stop routing Claude requests through the custom backend
    Disable,
    /// Change backend settings
    Set {
        /// Endpoint base URL
        #[arg(long)]
        base_url: Option<String>,
        /// Auth token (sets `ANTHROPIC_AUTH_TOKEN`)
        #[arg(long)]
        auth_token: Option<String>,
        /// Model used while thinking mode is active; pass "" to clear
        #[arg(long)]
        thinking_model: Option<String>,
    },
    /// Print the environment variables for the spawned agent
    Env,
}

fn init_logging() {
    let log_path = modeldeck::paths::log_path();

    // Log to <tmp>/modeldeck.log - tail with: tail -f /tmp/modeldeck.log
    // Set DEBUG=0-3 to control verbosity (0=off, 1=warn, 2=info, 3=debug)
    let debug_level = std::env::var("DEBUG")
        .ok()
        .and_then(|v| v.parse::<u8>().ok())
        .unwrap_or(0);

    if debug_level == 0 {
        return;
    }

    if let Err(e) = std::fs::write(&log_path, "") {
        eprintln!("Warning: Failed to clear log file: {e}");
    }

    let level = match debug_level {
        1 => tracing::Level::WARN,
        2 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };

    let dir = log_path
        .parent()
        .map_or_else(std::env::temp_dir, std::path::Path::to_path_buf);
    let file_appender = tracing_appender::rolling::never(dir, "modeldeck.log");
    tracing_subscriber::fmt()
        .with_writer(file_appender)
        .with_max_level(level)
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Let --help and --version exit normally
            if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion
            {
                e.exit();
            }
            // For actual errors, show the error line + help
            let rendered = e.render().to_string();
            eprintln!("{}\n", rendered.lines().next().unwrap_or("error"));
            Cli::command().print_help()?;
            std::process::exit(1);
        }
    };

    let config = Config::load()?;
    let store = FileStore::new(config.effective_store_path());
    tracing::debug!("Using store at {:?}", store.path());

    match cli.command {
        None => cmd_list(&config, store, None),
        Some(Commands::List { provider }) => cmd_list(&config, store, provider),
        Some(Commands::Add {
            provider,
            model_id,
            label,
        }) => cmd_add(store, provider, &model_id, label.as_deref())?,
        Some(Commands::Remove { provider, model_id }) => cmd_remove(store, provider, &model_id)?,
        Some(Commands::Default { provider }) => {
            let provider = provider.unwrap_or(config.default_provider);
            println!("{}", ModelCatalog::builtin().default_model(provider));
        }
        Some(Commands::Backend { action }) => {
            cmd_backend(&store, action.unwrap_or(BackendAction::Show))?;
        }
        Some(Commands::Config {
            path,
            set_default_provider,
        }) => cmd_config(config, path, set_default_provider)?,
    }

    Ok(())
}

fn open_registry(store: FileStore, provider: Provider) -> ModelRegistry<FileStore> {
    ModelRegistry::new(store, ModelCatalog::builtin(), provider)
}

/// Fail when the store file exists but can't be read back.
fn ensure_writable(store: &FileStore) -> Result<()> {
    store
        .validate()
        .with_context(|| format!("Refusing to modify {}", store.path().display()))
}

fn cmd_list(config: &Config, store: FileStore, provider: Option<Provider>) {
    let provider = provider.unwrap_or(config.default_provider);
    let registry = open_registry(store, provider);
    let default_model = registry.default_model(provider);

    println!("{} models:", provider.display_name());
    for row in ManageModelsState::rows(&registry) {
        let marker = if row.option.value == default_model {
            '*'
        } else {
            ' '
        };
        let value = if row.show_value {
            format!(" [{}]", row.option.value)
        } else {
            String::new()
        };
        let badge = if row.removable {
            format!(" ({})", row.badge())
        } else {
            String::new()
        };
        println!("{marker} {}{value}{badge}", row.option.label);
    }
}

fn cmd_add(
    store: FileStore,
    provider: Provider,
    model_id: &str,
    label: Option<&str>,
) -> Result<()> {
    let mut registry = open_registry(store, provider);
    let trimmed = model_id.trim();

    if trimmed.is_empty() {
        println!("Model id is empty; nothing added.");
        return Ok(());
    }
    if registry.merge(provider).iter().any(|m| m.value == trimmed) {
        println!("{trimmed} is already listed for {provider}.");
        return Ok(());
    }

    ensure_writable(registry.store())?;
    registry.add(provider, trimmed, label);
    println!("Added {trimmed} to {provider}.");
    Ok(())
}

fn cmd_remove(store: FileStore, provider: Provider, model_id: &str) -> Result<()> {
    let mut registry = open_registry(store, provider);

    if !registry.is_custom(provider, model_id) {
        if registry.catalog().entry(provider).contains(model_id) {
            println!("{model_id} is a built-in {provider} model and cannot be removed.");
        } else {
            println!("{model_id} is not a custom {provider} model.");
        }
        return Ok(());
    }

    ensure_writable(registry.store())?;
    registry.remove(provider, model_id);
    println!("Removed {model_id} from {provider}.");
    Ok(())
}

fn cmd_backend(store: &FileStore, action: BackendAction) -> Result<()> {
    let mut backend = CustomBackend::load(store);
    if !matches!(action, BackendAction::Show | BackendAction::Env) {
        ensure_writable(store)?;
    }

    match action {
        BackendAction::Show => {}
        BackendAction::Enable => backend.set_enabled(store, true),
        BackendAction::Disable => backend.set_enabled(store, false),
        BackendAction::Set {
            base_url,
            auth_token,
            thinking_model,
        } => {
            if let Some(base_url) = base_url {
                backend.set_base_url(store, base_url.trim());
            }
            if let Some(auth_token) = auth_token {
                backend.set_auth_token(store, auth_token.trim());
            }
            if let Some(thinking_model) = thinking_model {
                backend.set_thinking_model(store, thinking_model.trim());
            }
        }
        BackendAction::Env => {
            for (key, value) in backend.env() {
                println!("{key}={value}");
            }
            return Ok(());
        }
    }

    print_backend(&backend);
    Ok(())
}

fn print_backend(backend: &CustomBackend) {
    let state = if backend.enabled { "enabled" } else { "disabled" };
    let thinking = if backend.thinking_model.is_empty() {
        "(none)"
    } else {
        backend.thinking_model.as_str()
    };

    println!(
        "Custom backend for {}: {state}",
        Provider::Claude.display_name()
    );
    println!("  base URL:       {}", backend.base_url);
    println!("  auth token:     {}", backend.auth_token);
    println!("  thinking model: {thinking}");
    if backend.enabled {
        println!("Requests will be sent to {}", backend.base_url);
    }
}

fn cmd_config(
    mut config: Config,
    path_only: bool,
    default_provider: Option<Provider>,
) -> Result<()> {
    if path_only {
        println!("{}", Config::default_path().display());
        return Ok(());
    }

    if let Some(provider) = default_provider {
        config.default_provider = provider;
        config.save()?;
        println!("Default provider set to {provider}.");
    }

    let effective = Config {
        store_path: config.effective_store_path(),
        ..config
    };
    println!("{}", serde_json::to_string_pretty(&effective)?);
    Ok(())
}
