/// Formats a duration in seconds as `HH:MM:SS`.
///
/// Hours are not wrapped, so `HH*3600 + MM*60 + SS` always equals the input;
/// durations of 100 hours or more simply get a wider hour field.
pub fn format_duration(total_secs: u64) -> String {
    let secs = total_secs % 60;
    let minutes = (total_secs / 60) % 60;
    let hours = total_secs / 3600;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Reformats an upload date from `YYYYMMDD` to `YYYY/MM/DD`.
///
/// Anything that is not exactly eight ASCII digits is returned unchanged.
pub fn format_upload_date(raw: &str) -> String {
    let raw = raw.trim();
    if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return raw.to_string();
    }
    format!("{}/{}/{}", &raw[0..4], &raw[4..6], &raw[6..8])
}
