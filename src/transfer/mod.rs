//! # Transfer Pipeline
//!
//! Turns a source playlist into a destination playlist plus a report of the
//! tracks that could not be matched.
//!
//! ```text
//! fetch tracks ─→ fetch name ─→ search each track (sequential) ─→ create playlist
//!                                     │
//!                                     └─→ TransferReport (misses)
//! ```
//!
//! A failed or empty search for one track never aborts the batch. Only
//! terminal conditions propagate: an empty source playlist, zero matches, or
//! a failure of one of the batch-level catalog calls.

use std::time::Instant;

use crate::{
    catalog::{DestinationCatalog, SourceCatalog},
    config::Config,
    error::TransferError,
    spotify::SpotifyClient,
    types::{AuthMaterial, MatchResult, MissReason, Track, TransferOutcome, TransferReport, Visibility},
    utils,
    ytmusic::YtMusicSession,
};

pub mod observer;

pub use observer::{LogObserver, NoopObserver, Progress, ProgressObserver, TransferEvent};

/// Transfers a Spotify playlist to YouTube Music with the production clients.
///
/// The destination session is built first so that bad credentials fail
/// before the source playlist is read.
pub async fn transfer_playlist(
    config: &Config,
    playlist_url: &str,
    auth_material: AuthMaterial,
    observer: &dyn ProgressObserver,
) -> Result<TransferOutcome, TransferError> {
    let result = async {
        let destination = YtMusicSession::new(auth_material, config)?;
        let source = SpotifyClient::new(config)?;
        run(&source, &destination, playlist_url, &config.market, observer).await
    }
    .await;

    if let Err(e) = &result {
        observer.on_event(&TransferEvent::Failed {
            message: e.to_string(),
        });
    }
    result
}

/// Transfers a playlist between any two catalogs.
pub async fn transfer<S, D>(
    source: &S,
    destination: &D,
    playlist_url: &str,
    market: &str,
    observer: &dyn ProgressObserver,
) -> Result<TransferOutcome, TransferError>
where
    S: SourceCatalog + ?Sized,
    D: DestinationCatalog + ?Sized,
{
    let result = run(source, destination, playlist_url, market, observer).await;
    if let Err(e) = &result {
        observer.on_event(&TransferEvent::Failed {
            message: e.to_string(),
        });
    }
    result
}

async fn run<S, D>(
    source: &S,
    destination: &D,
    playlist_url: &str,
    market: &str,
    observer: &dyn ProgressObserver,
) -> Result<TransferOutcome, TransferError>
where
    S: SourceCatalog + ?Sized,
    D: DestinationCatalog + ?Sized,
{
    let tracks = source.fetch_all_tracks(playlist_url, market).await?;
    observer.on_event(&TransferEvent::TracksFetched {
        total: tracks.len(),
    });

    let name = source.fetch_playlist_name(playlist_url).await?;
    observer.on_event(&TransferEvent::PlaylistNamed { name: name.clone() });

    if tracks.is_empty() {
        return Err(TransferError::EmptyPlaylist);
    }

    let (found_ids, report) = resolve_tracks(destination, &tracks, observer).await;
    if found_ids.is_empty() {
        return Err(TransferError::NoMatches {
            total: tracks.len(),
        });
    }

    let playlist_id = destination
        .create_playlist(&name, "", Visibility::Private, &found_ids)
        .await?;

    observer.on_event(&TransferEvent::PlaylistCreated {
        playlist_id: playlist_id.clone(),
        name: name.clone(),
        track_count: found_ids.len(),
    });

    Ok(TransferOutcome {
        playlist_id,
        playlist_name: name,
        found: found_ids.len(),
        report,
    })
}

/// Resolves a single track to a destination id.
///
/// The query is the title followed by the first artist only.
pub async fn match_track<D>(destination: &D, track: &Track) -> MatchResult
where
    D: DestinationCatalog + ?Sized,
{
    match destination.search(&track.label()).await {
        Ok(Some(id)) => MatchResult::Found(id),
        Ok(None) => MatchResult::Missed(MissReason::NotFound),
        Err(e) => MatchResult::Missed(MissReason::SearchFailed(e.to_string())),
    }
}

/// Searches every track in order and returns the found ids (in source order)
/// together with the report of misses.
pub async fn resolve_tracks<D>(
    destination: &D,
    tracks: &[Track],
    observer: &dyn ProgressObserver,
) -> (Vec<String>, TransferReport)
where
    D: DestinationCatalog + ?Sized,
{
    let total = tracks.len();
    let started = Instant::now();
    let mut found_ids: Vec<String> = Vec::with_capacity(total);
    let mut report = TransferReport::default();

    for (index, track) in tracks.iter().enumerate() {
        let position = index + 1;

        match match_track(destination, track).await {
            MatchResult::Found(id) => found_ids.push(id),
            MatchResult::Missed(reason) => {
                let label = track.label();
                observer.on_event(&TransferEvent::TrackMissed {
                    position,
                    label: label.clone(),
                    reason,
                });
                report.record_miss(label);
            }
        }

        if utils::should_report_progress(position, total) {
            observer.on_event(&TransferEvent::Progress(Progress {
                processed: position,
                total,
                found: found_ids.len(),
                missed: report.missed_count,
            }));
        }
    }

    observer.on_event(&TransferEvent::SearchFinished {
        found: found_ids.len(),
        missed: report.missed_count,
        total,
        elapsed: started.elapsed(),
    });

    (found_ids, report)
}
