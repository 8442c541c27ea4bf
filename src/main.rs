use clap::Parser;
use dotenv::dotenv;
use chatbot_agent::run;

/// Asks a hosted chat model for a haiku and prints the answer.
///
/// Settings come from the environment (or a `.env` file):
/// AZURE_OPENAI_ENDPOINT, AZURE_OPENAI_API_KEY, AZURE_OPENAI_DEPLOYMENT_NAME,
/// AZURE_OPENAI_API_VERSION (optional), AZURE_OPENAI_TIMEOUT_SECS (optional).
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from `.env` file into std::env (optional)
    dotenv().ok();

    let _args = Args::parse();

    let reply = run().await?;
    println!("{reply}");
    Ok(())
}
