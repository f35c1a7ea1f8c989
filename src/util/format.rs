//! Number formatting for file and directory names

/// Format a float the way existing fixture names spell it
///
/// Integral values keep a trailing `.0` (`1.0`, not `1`), everything else uses
/// the shortest representation that round-trips (`1.2`, `0.05`).
pub fn format_float(value: f64) -> String {
    let s = format!("{}", value);
    if value.is_finite() && !s.contains('.') {
        format!("{}.0", s)
    } else {
        s
    }
}
