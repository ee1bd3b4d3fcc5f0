use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use persona_engine::config_service::load_config;
use persona_engine::oracle::Unconfigured;
use persona_engine::{
    open_store, synthesize, ChatService, ConversationMemory, EngineError, EngineResult, ImageAnalyzer,
    ImageInput, MemoryContext, OpenAiCompatClient, Persona, PersonaGenerator, PersonaStore,
    SummaryDimension, TextGenerator, UserContext,
};
use shared_types::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "persona-engine", about = "Give everyday objects a personality and talk to them")]
struct Cli {
    /// Path to the TOML configuration
    #[arg(long, default_value = "./data/config.toml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a photo and save a new persona
    Generate {
        image: PathBuf,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        purpose: String,
        #[arg(long, default_value = "")]
        location: String,
        #[arg(long, default_value = "")]
        time_together: String,
    },
    /// List saved personas
    List,
    /// Print a saved persona record
    Show { handle: String },
    /// Move one coarse trait score and save the result as a new persona
    Refine {
        handle: String,
        dimension: String,
        value: u8,
    },
    /// Print the prompt a message would produce, without calling the LLM
    Prompt { handle: String, message: String },
    /// Chat with a persona over stdin
    Chat {
        handle: String,
        #[arg(long, default_value = "cli")]
        session: String,
    },
}

fn build_oracle(config: &AppConfig) -> EngineResult<Arc<OpenAiCompatClient>> {
    let provider = config.llm.active_provider().ok_or_else(|| {
        EngineError::Config(format!("provider '{}' is not configured", config.llm.default_provider))
    })?;
    Ok(Arc::new(OpenAiCompatClient::from_provider(provider, config.chat.timeout_secs)?))
}

/// Shared client for the configured provider, or a stand-in that always fails.
fn oracles(config: &AppConfig) -> (Arc<dyn ImageAnalyzer>, Arc<dyn TextGenerator>) {
    match build_oracle(config) {
        Ok(client) => {
            let analyzer: Arc<dyn ImageAnalyzer> = client.clone();
            let generator: Arc<dyn TextGenerator> = client;
            (analyzer, generator)
        }
        Err(err) => {
            tracing::warn!(error = %err, "no usable LLM provider, replies will fall back");
            let analyzer: Arc<dyn ImageAnalyzer> = Arc::new(Unconfigured);
            let generator: Arc<dyn TextGenerator> = Arc::new(Unconfigured);
            (analyzer, generator)
        }
    }
}

async fn load_persona(store: &dyn PersonaStore, handle: &str) -> EngineResult<Persona> {
    let record = store
        .load(handle)
        .await?
        .ok_or_else(|| EngineError::Storage(format!("no persona with handle '{handle}'")))?;
    Persona::from_record(record)
}

async fn chat_loop(chat: &ChatService, persona: &Persona, session: &str) -> EngineResult<()> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout
        .write_all(format!("Talking to {}. Empty line to quit.\n> ", persona.name()).as_bytes())
        .await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let message = line.trim();
        if message.is_empty() {
            break;
        }
        let reply = chat.chat_turn(persona, session, message).await;
        stdout
            .write_all(format!("{}: {reply}\n> ", persona.name()).as_bytes())
            .await?;
        stdout.flush().await?;
    }
    Ok(())
}

async fn run(cli: Cli) -> EngineResult<()> {
    let config = load_config(&cli.config)?;
    if let Some(bind) = &config.telemetry.metrics_bind {
        platform::init_metrics(bind)?;
    }
    let store = open_store(&config.storage)?;

    match cli.command {
        Command::Generate {
            image,
            name,
            description,
            purpose,
            location,
            time_together,
        } => {
            let (analyzer, _) = oracles(&config);
            let generator = PersonaGenerator::new(config.generation.clone(), analyzer);
            let context = UserContext {
                name,
                description,
                purpose,
                location,
                time_together,
            };
            let persona = generator.generate(&ImageInput::from_path(&image)?, &context).await;
            let handle = store.save(&persona.to_record()).await?;
            println!("{} ({})", persona.name(), handle);
            for flaw in &persona.flaws {
                println!("  - {flaw}");
            }
        }
        Command::List => {
            for summary in store.list().await? {
                println!("{}\t{}\t{}\t{}", summary.handle, summary.name, summary.object_type, summary.created_at);
            }
        }
        Command::Show { handle } => {
            let persona = load_persona(store.as_ref(), &handle).await?;
            println!("{}", serde_json::to_string_pretty(&persona.to_record())?);
        }
        Command::Refine {
            handle,
            dimension,
            value,
        } => {
            let dimension = SummaryDimension::parse(&dimension)
                .ok_or_else(|| EngineError::Config(format!("unknown trait dimension '{dimension}'")))?;
            let mut persona = load_persona(store.as_ref(), &handle).await?;
            let reached = persona.refine(dimension, value);
            let new_handle = store.save(&persona.to_record()).await?;
            println!("{} = {reached} ({new_handle})", dimension.label());
        }
        Command::Prompt { handle, message } => {
            let persona = load_persona(store.as_ref(), &handle).await?;
            println!("{}", synthesize(&persona, &message, &[], &MemoryContext::default()));
        }
        Command::Chat { handle, session } => {
            let persona = load_persona(store.as_ref(), &handle).await?;
            let (_, generator) = oracles(&config);
            let memory = Arc::new(ConversationMemory::new(config.chat.memory_window));
            let chat = ChatService::new(config.chat.clone(), generator, memory);
            chat_loop(&chat, &persona, &session).await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(err) = platform::init_logging("persona-engine") {
        eprintln!("Failed to initialize logging: {err}");
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
