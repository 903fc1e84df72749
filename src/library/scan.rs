use std::path::Path;

use rand::seq::IndexedRandom;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::Track;

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

/// List the playable files directly inside `dir`.
///
/// One directory level only, in whatever order the file system yields
/// entries. A missing or empty directory produces an empty vec, never an
/// error; callers decide how to report that.
pub fn list_tracks(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    let mut tracks: Vec<Track> = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file() && is_audio_file(path, settings) {
            let name = path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("UNKNOWN")
                .to_string();

            tracks.push(Track {
                name,
                path: path.to_path_buf(),
            });
        }
    }

    tracks
}

/// Pick a track uniformly at random from `dir`, or `None` when the
/// directory holds nothing playable.
pub fn pick_random(dir: &Path, settings: &LibrarySettings) -> Option<Track> {
    let tracks = list_tracks(dir, settings);
    tracks.choose(&mut rand::rng()).cloned()
}
