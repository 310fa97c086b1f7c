//! WMO weather interpretation codes (WW) to human-readable text.
//! https://www.nodc.noaa.gov/archive/arc0021/0002199/1.1/data/0-data/HTML/WMO-CODE/WMO4677.HTM

/// Translate a WMO weather code into a fixed description.
///
/// Total: every integer maps to exactly one string.
pub fn describe_weather_code(code: i64) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45..=48 => "Fog",
        51..=55 => "Drizzle",
        56..=57 => "Freezing Drizzle",
        61..=65 => "Rain",
        66..=67 => "Freezing Rain",
        71..=75 => "Snow fall",
        77 => "Snow grains",
        80..=82 => "Rain showers",
        85..=86 => "Snow showers",
        95 => "Thunderstorm",
        96 | 99 => "Thunderstorm with hail",
        _ => "Unknown weather condition",
    }
}
