use chrono::{DateTime, Utc};
use forecast_core::{Forecast, Granularity, Units};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// Human-readable summary of a decoded forecast.
pub fn render(forecast: &Forecast, now: DateTime<Utc>) -> String {
    let mut lines = vec![format!(
        "Location: {:.4}, {:.4} ({})",
        forecast.latitude, forecast.longitude, forecast.timezone
    )];

    let units = forecast.flags.as_ref().map(|flags| &flags.units);
    if let Some(flags) = &forecast.flags {
        lines.push(format!("Units: {}", flags.units));
        if !flags.sources.is_empty() {
            lines.push(format!("Sources: {}", flags.sources.join(", ")));
        }
        if let Some(reason) = &flags.dark_sky_unavailable {
            lines.push(format!("Notice: data source unavailable ({reason})"));
        }
    }

    if let Some(point) = &forecast.currently {
        let mut line = String::from("Currently:");
        if let Some(time) = point.time {
            line.push_str(&format!(" {}", time.format(TIME_FORMAT)));
        }
        if let Some(summary) = &point.summary {
            line.push_str(&format!(", {summary}"));
        }

        let feels_like = forecast.flags.as_ref().is_none_or(|flags| flags.feels_like);
        let temperature = match &forecast.flags {
            Some(flags) => flags.preferred_temperature(point),
            None => point.apparent_temperature,
        };
        if let Some(value) = temperature {
            let label = if feels_like { "feels like" } else { "actual" };
            line.push_str(&format!(", {} ({label})", format_temperature(value, units)));
        }

        lines.push(line);
    }

    for granularity in [Granularity::Minutely, Granularity::Hourly, Granularity::Daily] {
        let Some(block) = forecast.block(granularity) else {
            continue;
        };

        let heading = format!("{}: {} points", capitalize(granularity.as_str()), block.len());
        lines.push(match &block.summary {
            Some(summary) => format!("{heading} - {summary}"),
            None => heading,
        });
    }

    if let Some(alerts) = forecast.alerts.as_ref().filter(|alerts| !alerts.is_empty()) {
        lines.push("Alerts:".to_string());
        for alert in alerts {
            let status = match alert.expires {
                Some(_) if alert.is_expired_at(now) => "expired".to_string(),
                Some(expires) => format!("until {}", expires.format(TIME_FORMAT)),
                None => "no expiry".to_string(),
            };
            lines.push(format!("  [{}] {} ({status})", alert.severity, alert.title));
        }
    }

    let misplaced = misplaced_fields(forecast);
    if !misplaced.is_empty() {
        lines.push("Fields outside their granularity:".to_string());
        lines.extend(misplaced.iter().map(|line| format!("  {line}")));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// One line per point carrying fields its granularity does not define.
pub fn misplaced_fields(forecast: &Forecast) -> Vec<String> {
    let mut index = 0;
    let mut previous = None;
    let mut lines = Vec::new();

    for (granularity, point) in forecast.points() {
        if previous != Some(granularity) {
            index = 0;
            previous = Some(granularity);
        }

        let fields = point.fields_outside(granularity);
        if !fields.is_empty() {
            let location = match granularity {
                Granularity::Currently => granularity.to_string(),
                _ => format!("{granularity}[{index}]"),
            };
            lines.push(format!("{location}: {}", fields.join(", ")));
        }

        index += 1;
    }

    lines
}

fn format_temperature(value: f64, units: Option<&Units>) -> String {
    match units.and_then(Units::temperature_symbol) {
        Some(symbol) => format!("{value:.1}{symbol}"),
        None => format!("{value:.1}"),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forecast_core::codec::from_str;

    fn sample() -> Forecast {
        from_str(
            r#"{
                "latitude": 51.5072,
                "longitude": -0.1276,
                "timezone": "Europe/London",
                "currently": {
                    "time": 1600000000,
                    "summary": "Drizzle",
                    "temperature": 14.2,
                    "apparentTemperature": 13.1
                },
                "hourly": {
                    "summary": "Rain until evening.",
                    "data": [{"time": 1600000000}, {"time": 1600003600, "moonPhase": 0.5}]
                },
                "alerts": [{
                    "title": "Wind Advisory",
                    "regions": ["London"],
                    "severity": "advisory",
                    "time": 1599990000,
                    "expires": 1600010000,
                    "description": "",
                    "uri": "https://example.org/a"
                }],
                "flags": {"sources": ["ukmo"], "units": "uk2"}
            }"#,
        )
        .expect("sample should decode")
    }

    fn at(seconds: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(seconds, 0).unwrap()
    }

    #[test]
    fn renders_apparent_temperature_by_default() {
        let text = render(&sample(), at(1_600_000_000));

        assert!(text.contains("Location: 51.5072, -0.1276 (Europe/London)"));
        assert!(text.contains("Units: uk2"));
        assert!(text.contains("Currently: 2020-09-13 12:26 UTC, Drizzle, 13.1°C (feels like)"));
        assert!(text.contains("Hourly: 2 points - Rain until evening."));
        assert!(text.contains("[advisory] Wind Advisory (until 2020-09-13 15:13 UTC)"));
    }

    #[test]
    fn renders_actual_temperature_when_feels_like_is_off() {
        let mut forecast = sample();
        forecast.set_feels_like(false);

        let text = render(&forecast, at(1_600_000_000));
        assert!(text.contains("14.2°C (actual)"));
    }

    #[test]
    fn expired_alerts_are_marked() {
        let text = render(&sample(), at(1_600_020_000));

        assert!(text.contains("Wind Advisory (expired)"));
    }

    #[test]
    fn misplaced_fields_are_indexed_within_their_block() {
        assert_eq!(misplaced_fields(&sample()), vec!["hourly[1]: moonPhase".to_string()]);
    }

    #[test]
    fn output_is_one_line_per_section_entry() {
        let text = render(&sample(), at(1_600_000_000));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines,
            vec![
                "Location: 51.5072, -0.1276 (Europe/London)",
                "Units: uk2",
                "Sources: ukmo",
                "Currently: 2020-09-13 12:26 UTC, Drizzle, 13.1°C (feels like)",
                "Hourly: 2 points - Rain until evening.",
                "Alerts:",
                "  [advisory] Wind Advisory (until 2020-09-13 15:13 UTC)",
                "Fields outside their granularity:",
                "  hourly[1]: moonPhase",
            ]
        );
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("daily"), "Daily");
        assert_eq!(capitalize(""), "");
    }
}
