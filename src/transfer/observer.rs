use std::time::Duration;

use crate::{types::MissReason, utils};

/// Snapshot of the search phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub processed: usize,
    pub total: usize,
    pub found: usize,
    pub missed: usize,
}

impl Progress {
    pub fn percentage(&self) -> f64 {
        utils::percentage(self.processed, self.total)
    }
}

/// Discrete events emitted while a transfer runs.
#[derive(Debug, Clone, PartialEq)]
pub enum TransferEvent {
    TracksFetched { total: usize },
    PlaylistNamed { name: String },
    Progress(Progress),
    TrackMissed {
        position: usize,
        label: String,
        reason: MissReason,
    },
    SearchFinished {
        found: usize,
        missed: usize,
        total: usize,
        elapsed: Duration,
    },
    PlaylistCreated {
        playlist_id: String,
        name: String,
        track_count: usize,
    },
    Failed { message: String },
}

/// Receives transfer events.
///
/// Called synchronously from the pipeline, so implementations must return
/// quickly and never block.
pub trait ProgressObserver: Send + Sync {
    fn on_event(&self, event: &TransferEvent);
}

impl<F> ProgressObserver for F
where
    F: Fn(&TransferEvent) + Send + Sync,
{
    fn on_event(&self, event: &TransferEvent) {
        self(event)
    }
}

/// Ignores every event.
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {
    fn on_event(&self, _event: &TransferEvent) {}
}

/// Writes events to the `tracing` log stream.
///
/// The message texts are stable so that tools tailing the log file can key
/// on them ("Progress:", "Found so far:", "Playlist created", "Transfer failed").
pub struct LogObserver;

impl ProgressObserver for LogObserver {
    fn on_event(&self, event: &TransferEvent) {
        match event {
            TransferEvent::TracksFetched { total } => {
                tracing::info!("Retrieved {} tracks from Spotify", total)
            }
            TransferEvent::PlaylistNamed { name } => tracing::info!("Playlist name: {}", name),
            TransferEvent::Progress(p) => {
                tracing::info!(
                    "Progress: {}/{} tracks processed ({:.1}%)",
                    p.processed,
                    p.total,
                    p.percentage()
                );
                tracing::info!("Found so far: {} tracks, Missed: {} tracks", p.found, p.missed);
            }
            TransferEvent::TrackMissed {
                position,
                label,
                reason,
            } => tracing::warn!("Track not found on YouTube Music: #{} {} - {}", position, label, reason),
            TransferEvent::SearchFinished {
                found,
                missed,
                total,
                elapsed,
            } => {
                tracing::info!("Search completed in {:.2} seconds", elapsed.as_secs_f64());
                tracing::info!("Found {}/{} songs on YouTube Music", found, total);
                tracing::info!("Missed tracks: {}", missed);
            }
            TransferEvent::PlaylistCreated {
                playlist_id,
                name,
                track_count,
            } => tracing::info!(
                "Playlist created successfully! '{}' ({} tracks) Playlist ID: {}",
                name,
                track_count,
                playlist_id
            ),
            TransferEvent::Failed { message } => tracing::error!("Transfer failed: {}", message),
        }
    }
}
