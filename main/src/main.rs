use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use infra::process::{ContextContainer, ContextType, Process, ProcessDefinition, ProcessLoader};
use infra::xes::{Attribute, Classifier, Event, GlobalScope, Log, XesLogLoader};
use itertools::Itertools;
use procmodel_base::logging;

#[derive(Parser, Debug)]
#[command(name = "procmodel", version, about = "Inspect process definitions and XES logs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the descriptor of a process definition (json or yaml)
    Process { url_or_path: String },
    /// Print a summary of an XES log (json or yaml)
    Log {
        url_or_path: String,
        /// count event classes using the named classifier
        #[arg(long)]
        classifier: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let conf = logging::load_logging_config_from_env().unwrap_or_default();
    logging::tracing_init(&conf)?;

    let cli = Cli::parse();
    tracing::debug!("command: {:?}", cli.command);
    let lines = match cli.command {
        Command::Process { url_or_path } => {
            let def = ProcessLoader::new_by_env()
                .load_process(Some(url_or_path.as_str()), None)
                .await?;
            describe_process(&def)
        }
        Command::Log {
            url_or_path,
            classifier,
        } => {
            let log = XesLogLoader::new_by_env()
                .load_log(Some(url_or_path.as_str()), None)
                .await?;
            describe_log(&log, classifier.as_deref())?
        }
    };
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

fn describe_process(def: &ProcessDefinition) -> Vec<String> {
    let globals = def
        .global_names()
        .into_iter()
        .map(|name| format!("{}: {}", name, def.globals()[&name]))
        .join(", ");
    vec![
        format!("id: {}", def.id()),
        format!("name: {}", def.name()),
        format!("version: {}", def.version()),
        format!("type: {}", def.process_type()),
        format!("package: {}", def.package_name()),
        format!("url: {}", def.url()),
        format!("imports: {}", def.imports().join(", ")),
        format!("function imports: {}", def.function_imports().join(", ")),
        format!("globals: {}", globals),
        format!(
            "variable scopes: {}",
            def.contexts(ContextType::VariableScope).len()
        ),
        format!(
            "exception scopes: {}",
            def.contexts(ContextType::ExceptionScope).len()
        ),
    ]
}

// event class: values of the classifier keys joined with '+'
fn event_class(classifier: &Classifier, event: &Event) -> String {
    classifier
        .key_list()
        .into_iter()
        .map(|key| {
            event
                .attribute(key)
                .and_then(Attribute::as_str)
                .unwrap_or("")
        })
        .join("+")
}

fn describe_log(log: &Log, classifier: Option<&str>) -> Result<Vec<String>> {
    let mut lines = vec![
        format!("xes version: {}", log.xes_version.as_deref().unwrap_or("-")),
        format!(
            "extensions: {}",
            log.extensions.iter().map(|e| &e.prefix).join(", ")
        ),
        format!(
            "trace globals: {}",
            log.globals_for(GlobalScope::Trace).len()
        ),
        format!(
            "event globals: {}",
            log.globals_for(GlobalScope::Event).len()
        ),
        format!("traces: {}", log.traces.len()),
        format!("events: {}", log.event_count()),
    ];
    if let Some(name) = classifier {
        let classifier = log.classifier(name).ok_or_else(|| {
            procmodel_base::error::ProcessModelError::NotFound(format!(
                "classifier not found: {}",
                name
            ))
        })?;
        let counts = log
            .traces
            .iter()
            .flat_map(|t| t.events.iter())
            .map(|e| event_class(classifier, e))
            .counts();
        for (class, count) in counts.into_iter().sorted() {
            lines.push(format!("  {}: {}", class, count));
        }
    }
    Ok(lines)
}
