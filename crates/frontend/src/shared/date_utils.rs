//! Date and time formatting shared by tables and detail pages.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

/// `2024-03-15T14:02:26Z` -> `"2024-03-15 14:02"`
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

/// Formats accepted from a `datetime-local` input, with and without seconds
const LOCAL_INPUT_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Reads a `datetime-local` value as wall-clock time in `tz`.
///
/// Blank input means "not set". A time skipped by a DST jump is an error;
/// an ambiguous one resolves to the earlier instant.
pub fn local_input_in<Tz: TimeZone>(input: &str, tz: &Tz) -> Result<Option<DateTime<Utc>>, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    let naive = LOCAL_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .ok_or_else(|| format!("Invalid date and time: {}", input))?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| Some(dt.with_timezone(&Utc)))
        .ok_or_else(|| format!("{} does not exist in the local time zone", input))
}

/// [`local_input_in`] for the browser's time zone
pub fn local_input_to_utc(input: &str) -> Result<Option<DateTime<Utc>>, String> {
    local_input_in(input, &Local)
}

/// Current local time as a `datetime-local` value, used as the input minimum
pub fn local_input_now() -> String {
    Local::now().format("%Y-%m-%dT%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn sample() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 14, 2, 26).unwrap()
    }

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime(&sample()), "2024-03-15 14:02");
    }

    #[test]
    fn test_local_input_is_converted_to_utc() {
        let berlin_winter = FixedOffset::east_opt(3600).unwrap();
        let utc = local_input_in("2024-03-20T09:30", &berlin_winter).unwrap();
        assert_eq!(utc, Some(Utc.with_ymd_and_hms(2024, 3, 20, 8, 30, 0).unwrap()));

        let new_york = FixedOffset::west_opt(4 * 3600).unwrap();
        let utc = local_input_in("2024-03-20T22:15:00", &new_york).unwrap();
        assert_eq!(utc, Some(Utc.with_ymd_and_hms(2024, 3, 21, 2, 15, 0).unwrap()));
    }

    #[test]
    fn test_blank_or_invalid_local_input() {
        assert_eq!(local_input_in("  ", &Utc).unwrap(), None);
        assert!(local_input_in("next tuesday", &Utc)
            .unwrap_err()
            .starts_with("Invalid date and time"));
    }
}
