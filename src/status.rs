// Settings status display: shows the effective scoring configuration.

use colored::Colorize;

use crate::config::Config;
use crate::scoring::request::normalize_endpoint;
use crate::scoring::traits::mask_key;

/// Display the effective configuration to the terminal. The key is masked.
pub fn show(config: &Config) {
    if config.api_url.is_empty() {
        println!("Endpoint: {}", "not configured".yellow());
        println!("\nSet NOTISCORE_API_URL and NOTISCORE_MODEL in your .env file.");
    } else {
        println!("Endpoint: {}", normalize_endpoint(&config.api_url));
    }

    println!("API key: {}", mask_key(&config.api_key));
    println!(
        "Model: {}",
        if config.model_name.is_empty() {
            "not configured".yellow().to_string()
        } else {
            config.model_name.clone()
        }
    );

    if config.model_prompt.is_empty() {
        println!("Prompt: default ({})", config.locale);
    } else {
        println!(
            "Prompt: custom ({} chars)",
            config.model_prompt.chars().count()
        );
    }

    println!("Temperature: {:.2}", config.temperature);
    println!(
        "Filtering degree: {:.2} (scores at or below are filtered)",
        config.filtering_degree
    );
}
