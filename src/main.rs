use mealplan_import::{import_recipe, ImportConfig};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let url = args.get(1).ok_or("Please provide a URL as an argument")?;

    let config = ImportConfig::load().unwrap_or_default();
    let recipe = import_recipe(url, &config).await?;

    println!("{}", serde_json::to_string_pretty(&recipe)?);

    Ok(())
}
