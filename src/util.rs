use std::path::Path;

/// Truncate a string to at most `max_chars` characters, with no marker.
/// Persisted previews rely on the exact length, so nothing is appended.
pub fn clip(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

/// Round to two decimal places, matching the persisted ratio precision.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Write a file atomically: write to a sibling temp file, then rename over
/// the target. Two concurrent writers still race (last rename wins), but a
/// reader never observes a half-written document.
pub fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, data)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}
