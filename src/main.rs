//! Utterance Gate - rejection stage runner
//!
//! Reads classified messages as JSON lines from stdin, runs them through the
//! rejection gate as one ordered batch and writes them back as JSON lines to
//! stdout. Logs go to stderr.

use std::io::{self, BufRead, BufWriter, Write};
use std::process::ExitCode;
use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use utterance_gate::adapters::YamlDomainProvider;
use utterance_gate::application::handlers::{
    ProcessMessagesCommand, ProcessMessagesError, ProcessMessagesHandler,
};
use utterance_gate::config::{AppConfig, ConfigError, LoggingConfig};
use utterance_gate::domain::nlu::Message;
use utterance_gate::domain::rejection::{GateError, RejectionGate};

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Gate(#[from] GateError),

    #[error(transparent)]
    Process(#[from] ProcessMessagesError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid message on input line {line}: {source}")]
    InvalidJson {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize message: {0}")]
    Serialize(serde_json::Error),
}

fn main() -> ExitCode {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("utterance-gate: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.logging);

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config() -> Result<AppConfig, ConfigError> {
    let config = AppConfig::load()?;
    config.validate()?;
    Ok(config)
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if logging.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

fn run(config: AppConfig) -> Result<(), RunError> {
    let gate = Arc::new(RejectionGate::new(config.rejection)?);

    let mut handler = ProcessMessagesHandler::new(gate);
    if let Some(path) = &config.domain.path {
        info!(path = %path.display(), "Using domain file");
        handler = handler.with_domain_provider(Arc::new(YamlDomainProvider::new(path)));
    }

    let messages = read_messages(io::stdin().lock())?;
    let result = handler.handle(ProcessMessagesCommand { messages })?;

    let mut out = BufWriter::new(io::stdout().lock());
    for message in &result.messages {
        serde_json::to_writer(&mut out, message).map_err(RunError::Serialize)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    Ok(())
}

fn read_messages<R: BufRead>(input: R) -> Result<Vec<Message>, RunError> {
    let mut messages = Vec::new();
    for (number, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let message = serde_json::from_str(&line).map_err(|source| RunError::InvalidJson {
            line: number + 1,
            source,
        })?;
        messages.push(message);
    }
    Ok(messages)
}
