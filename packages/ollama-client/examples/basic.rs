//! Basic Ollama client usage example

use ollama_client::{ChatRequest, Message, OllamaClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Uses OLLAMA_HOST or http://localhost:11434
    let client = OllamaClient::from_env();

    println!("=== Chat Completion ===");
    let response = client
        .chat(
            ChatRequest::new("qwen2.5:14b")
                .message(Message::system("You are a concise assistant."))
                .message(Message::user("What is Rust in one sentence?"))
                .temperature(0.0)
                .num_predict(128),
        )
        .await?;

    println!("Response: {}", response.content);
    if let Some(usage) = response.usage {
        println!(
            "Tokens: {} prompt, {} completion",
            usage.prompt_eval_count, usage.eval_count
        );
    }

    println!("\n=== JSON Mode ===");
    let response = client
        .chat(
            ChatRequest::new("qwen2.5:14b")
                .message(Message::system(
                    "Answer as a JSON object with keys 'language' and 'year'.",
                ))
                .message(Message::user("When did Rust 1.0 ship?"))
                .temperature(0.0)
                .format_json(),
        )
        .await?;

    println!("Response: {}", response.content);

    Ok(())
}
