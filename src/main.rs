use anyhow::Result;
use clip_translate::app::{AppState, DisplayCard};
use clip_translate::config::Config;
use clip_translate::i18n::ErrorMessages;
use clip_translate::settings::SettingsFile;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clip_translate=info".parse()?),
        )
        .init();

    info!("Starting clipboard translator");

    let config = Config::from_env();
    let store = SettingsFile::new(&config.settings_path);
    info!("Using settings file {}", store.path().display());

    // Environment takes precedence over the settings file
    let mut persisted = store.load()?;
    if !config.credentials.is_empty() {
        info!("Applying credentials from environment");
        config.credentials.apply_to(&mut persisted.api_config);
    }
    if let Some(languages) = config.target_languages.clone() {
        persisted.settings.selected_languages = languages;
    }
    if let Some(provider) = config.provider.clone() {
        persisted.settings.current_provider = provider;
    }

    let mut state = AppState::new(
        persisted,
        ErrorMessages::for_locale(&config.ui_locale),
        config.endpoints.clone(),
        reqwest::Client::new(),
    )
    .with_store(store);

    if state.current_provider().is_none() {
        warn!("No translation provider configured, set GOOGLE_API_KEY, MICROSOFT_API_KEY, DEEPL_API_KEY or BAIDU_APP_ID and BAIDU_SECRET_KEY");
    }

    // Each stdin line is one clipboard change
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_seen = String::new();
    while let Some(line) = lines.next_line().await? {
        if line == last_seen {
            continue;
        }
        last_seen = line.clone();

        if state.handle_clipboard_text(&line).await {
            print_cards(&state.display_cards());
        }
    }

    info!("Input closed, exiting");
    Ok(())
}

fn print_cards(cards: &[DisplayCard]) {
    for card in cards {
        if card.error.is_empty() {
            println!("{} {} ({}): {}", card.flag, card.language_name, card.language, card.text);
        } else {
            println!("{} {} ({}): [{}]", card.flag, card.language_name, card.language, card.error);
        }
    }
    println!();
}
