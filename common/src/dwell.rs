/// Renders a dwell duration as `"<n> weeks <n> days <n> hours <n> mins <n> secs"`,
/// omitting zero-valued units above seconds.
pub fn format_dwell(seconds: u64) -> String {
    let (minutes, secs) = (seconds / 60, seconds % 60);
    let (hours, minutes) = (minutes / 60, minutes % 60);
    let (days, hours) = (hours / 24, hours % 24);
    let (weeks, days) = (days / 7, days % 7);

    let mut parts = Vec::with_capacity(5);
    for (value, unit) in [
        (weeks, "weeks"),
        (days, "days"),
        (hours, "hours"),
        (minutes, "mins"),
    ] {
        if value > 0 {
            parts.push(format!("{value} {unit}"));
        }
    }
    parts.push(format!("{secs} secs"));
    parts.join(" ")
}
