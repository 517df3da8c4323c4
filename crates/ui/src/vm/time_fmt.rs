/// Countdown text, tenths of a second, e.g. `"12.4s"`.
#[must_use]
pub fn format_remaining(remaining_ms: u64) -> String {
    let tenths = remaining_ms / 100;
    format!("{}.{}s", tenths / 10, tenths % 10)
}
