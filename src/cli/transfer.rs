use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    config::Config,
    error, info, logging, success,
    transfer::{self, LogObserver, ProgressObserver, TransferEvent},
    types::{AuthMaterial, MissedTrackTableRow},
    warning,
};

const PLAYLIST_URL: &str = "https://music.youtube.com/playlist?list=";

/// Drives the terminal progress bar and forwards every event to the log file.
struct BarObserver {
    pb: ProgressBar,
}

impl ProgressObserver for BarObserver {
    fn on_event(&self, event: &TransferEvent) {
        LogObserver.on_event(event);

        match event {
            TransferEvent::TracksFetched { total } => {
                self.pb.set_length(*total as u64);
                self.pb.set_message(format!("Searching {} tracks...", total));
            }
            TransferEvent::PlaylistNamed { name } => {
                self.pb.set_message(format!("Searching tracks of '{}'...", name));
            }
            TransferEvent::Progress(p) => {
                self.pb.set_position(p.processed as u64);
                self.pb
                    .set_message(format!("found {}, missed {}", p.found, p.missed));
            }
            TransferEvent::TrackMissed { label, reason, .. } => {
                self.pb
                    .println(format!("  not found: {} ({})", label, reason));
            }
            TransferEvent::SearchFinished { .. } => {
                self.pb.set_message("Creating playlist...");
            }
            TransferEvent::PlaylistCreated { .. } | TransferEvent::Failed { .. } => {
                self.pb.finish_and_clear();
            }
        }
    }
}

pub async fn transfer(config: Config, playlist_link: String, headers_file: PathBuf, open: bool) {
    if let Err(e) = logging::init(&config.log_file, false) {
        warning!(
            "Cannot open log file {}, continuing without it. Err: {}",
            config.log_file.display(),
            e
        );
    }

    let contents = match async_fs::read_to_string(&headers_file).await {
        Ok(contents) => contents,
        Err(e) => error!(
            "Cannot read headers file {}. Err: {}",
            headers_file.display(),
            e
        ),
    };

    let material = match AuthMaterial::from_text(&contents) {
        Ok(material) => material,
        Err(e) => error!("{}", e),
    };

    info!("Transferring {}", playlist_link);

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} [{bar:30.blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message("Fetching tracks from Spotify...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let observer = BarObserver { pb };
    let outcome =
        match transfer::transfer_playlist(&config, &playlist_link, material, &observer).await {
            Ok(outcome) => outcome,
            Err(e) => {
                observer.pb.finish_and_clear();
                error!("Transfer failed. Err: {}", e)
            }
        };

    success!(
        "Playlist '{}' created with {} tracks",
        outcome.playlist_name,
        outcome.found
    );

    if outcome.report.missed_count > 0 {
        warning!("{} tracks were not found:", outcome.report.missed_count);
        let rows: Vec<MissedTrackTableRow> = outcome
            .report
            .missed_tracks
            .iter()
            .enumerate()
            .map(|(i, track)| MissedTrackTableRow {
                position: i + 1,
                track: track.clone(),
            })
            .collect();
        println!("{}", Table::new(rows));
    }

    let url = format!("{}{}", PLAYLIST_URL, outcome.playlist_id);
    if open {
        if webbrowser::open(&url).is_err() {
            warning!("Failed to open browser. Playlist is at:\n{}", url);
        }
    } else {
        info!("{}", url);
    }
}
