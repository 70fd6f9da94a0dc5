//! Console demo: read debate text from stdin, print the extracted
//! structure as JSON.
//!
//! Requires a running Ollama server (`OLLAMA_HOST`, default
//! `http://localhost:11434`) with the model pulled:
//!
//! ```text
//! cargo run --example extract_debate --features ollama
//! ```

use std::io::{self, BufRead, Write};
use std::time::Duration;

use debate_extraction::{ai::Ollama, Extractor};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    print!("Enter debate text:\n> ");
    io::stdout().flush()?;

    let mut text = String::new();
    io::stdin().lock().read_line(&mut text)?;

    let ai = Ollama::from_env().with_timeout(Duration::from_secs(120));
    let extractor = Extractor::new(ai);

    let result = extractor.extract(text.trim()).await?;

    println!("{}", serde_json::to_string_pretty(&result.structure)?);
    for warning in &result.warnings {
        eprintln!("warning: {}", warning);
    }

    Ok(())
}
