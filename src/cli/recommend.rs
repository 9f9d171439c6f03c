use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    cli::{open_backend, open_credentials},
    error, info,
    spotify::{RecommendationClient, RecommendationError},
    types::RecommendationRequest,
    utils,
};

pub async fn recommend(song: String, artist: String, limit: Option<u32>, market: Option<String>) {
    let request = RecommendationRequest {
        song,
        artist,
        limit,
        market,
    };

    let mut client = RecommendationClient::new(open_backend(), open_credentials().await);

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching recommendations...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let result = client.recommend(request).await;
    pb.finish_and_clear();

    match result {
        Ok(tracks) => {
            info!("Recommended tracks:");
            let table = Table::new(utils::build_track_rows(&tracks));
            println!("{}", table);
        }
        Err(e @ RecommendationError::Auth(_)) => {
            error!("{}\nRun trackrec login to sign in again.", e)
        }
        Err(e) => error!("{}", e),
    }
}
