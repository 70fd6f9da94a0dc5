//! Structured output example with a schema-enforced completion

use ollama_client::{OllamaClient, StructuredOutput};
use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Deserialize, JsonSchema)]
struct Person {
    name: String,
    age: u32,
    occupation: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = OllamaClient::from_env();

    // The schema generated from Person is enforced by the server
    println!("Schema: {}", Person::ollama_schema());

    let person: Person = client
        .extract::<Person>(
            "qwen2.5:14b",
            "Extract person information from text.",
            "John Smith is a 35 year old software engineer.",
        )
        .await?;

    println!("\nParsed:");
    println!("  Name: {}", person.name);
    println!("  Age: {}", person.age);
    println!("  Occupation: {}", person.occupation);

    Ok(())
}
