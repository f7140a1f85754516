use color_eyre::Result;
use dialoguer::{Confirm, Input, Password};

/// Prompt for a password (masked input)
pub fn prompt_password(prompt: &str) -> Result<String> {
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read password: {}", e))
}

/// Prompt for yes/no with optional default
pub fn prompt_yes_no(prompt: &str, default: Option<bool>) -> Result<bool> {
    let mut confirm_builder = Confirm::new().with_prompt(prompt);

    if let Some(default_value) = default {
        confirm_builder = confirm_builder.default(default_value);
    }

    confirm_builder
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read confirmation: {}", e))
}

/// Prompt for a 0-10 rating, re-asking until the input is in range
pub fn prompt_rating(title: &str) -> Result<u8> {
    Input::<u8>::new()
        .with_prompt(format!("Your rating for \"{}\" (0-10)", title))
        .validate_with(|value: &u8| -> std::result::Result<(), &str> {
            if *value <= 10 {
                Ok(())
            } else {
                Err("Rating must be between 0 and 10")
            }
        })
        .interact_text()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read rating: {}", e))
}
