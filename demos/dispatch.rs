// Runs the sample commands through both pipelines.
//
//     cargo run --example dispatch [--tracing] [config.json]
//
// Set RUST_LOG=debug to see each stage's tracing events. With `--tracing`
// the pipeline output goes to the subscriber as `info` events instead of
// stdout.

use handoff_commands::{CommandChain, CommandHandler, Console, Output, PipelineConfig, TracingOutput};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const SAMPLES: [(&str, &str); 5] = [
    ("text", "[A]payload"),
    ("text", "(A)payload"),
    ("text", "[D]payload"),
    ("json", r#"{"name":"B","text":"payload"}"#),
    ("other", "[A]payload"),
];

fn main() -> anyhow::Result<()> {
    let mut to_tracing = false;
    let mut config_path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--tracing" => to_tracing = true,
            _ => config_path = Some(arg),
        }
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if to_tracing { "info" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();

    let config = match config_path {
        Some(path) => PipelineConfig::from_path(path)?,
        None => PipelineConfig::default(),
    };
    let output: Arc<dyn Output> = if to_tracing {
        Arc::new(TracingOutput)
    } else {
        Arc::new(Console)
    };

    println!("== links ==");
    let chain = CommandChain::new(&config, Arc::clone(&output));
    for (source, payload) in SAMPLES {
        chain.process(source, payload)?;
    }

    println!("== handlers ==");
    let handler = CommandHandler::new(&config, output);
    for (source, payload) in SAMPLES {
        handler.handle(source, payload)?;
    }

    Ok(())
}
