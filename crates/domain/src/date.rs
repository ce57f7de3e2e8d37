use chrono::prelude::*;
use chrono_tz::Tz;
use std::str::FromStr;

const CART_ITEM_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The timezone cart item timestamps are interpreted in. The stored
/// strings carry no offset, so this has to match the zone they were
/// generated in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CartTimezone {
    /// Timezone of the running process
    Local,
    Named(Tz),
}

impl Default for CartTimezone {
    fn default() -> Self {
        Self::Local
    }
}

impl CartTimezone {
    /// Resolves a wall clock time to epoch millis. Times inside a DST gap
    /// do not exist and give `None`, ambiguous times pick the earliest instant.
    pub fn timestamp_millis(&self, datetime: &NaiveDateTime) -> Option<i64> {
        match self {
            Self::Local => Local
                .from_local_datetime(datetime)
                .earliest()
                .map(|d| d.timestamp_millis()),
            Self::Named(tz) => tz
                .from_local_datetime(datetime)
                .earliest()
                .map(|d| d.timestamp_millis()),
        }
    }

    fn format_millis(&self, millis: i64, format: &str) -> Option<String> {
        match self {
            Self::Local => Local
                .timestamp_millis_opt(millis)
                .single()
                .map(|d| d.format(format).to_string()),
            Self::Named(tz) => tz
                .timestamp_millis_opt(millis)
                .single()
                .map(|d| d.format(format).to_string()),
        }
    }
}

fn parse_component<T: FromStr>(part: &str, digits: usize) -> Option<T> {
    if part.len() != digits || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

fn parse_date(datestr: &str) -> Option<NaiveDate> {
    let dates = datestr.split('-').collect::<Vec<_>>();
    if dates.len() != 3 {
        return None;
    }
    let year = parse_component(dates[0], 4)?;
    let month = parse_component(dates[1], 2)?;
    let day = parse_component(dates[2], 2)?;

    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_time(timestr: &str) -> Option<NaiveTime> {
    let times = timestr.split(':').collect::<Vec<_>>();
    if times.len() != 3 {
        return None;
    }
    let hour = parse_component(times[0], 2)?;
    let minute = parse_component(times[1], 2)?;
    let second = parse_component(times[2], 2)?;

    NaiveTime::from_hms_opt(hour, minute, second)
}

/// Parses a cart item timestamp in the strict `YYYY-MM-DD HH:MM:SS` format
/// to epoch millis. Anything else gives `None`.
pub fn parse_cart_item_date(text: &str, timezone: &CartTimezone) -> Option<i64> {
    let parts = text.split(' ').collect::<Vec<_>>();
    if parts.len() != 2 {
        return None;
    }
    let date = parse_date(parts[0])?;
    let time = parse_time(parts[1])?;

    timezone.timestamp_millis(&date.and_time(time))
}

pub fn format_cart_item_date(millis: i64, timezone: &CartTimezone) -> Option<String> {
    timezone.format_millis(millis, CART_ITEM_DATE_FORMAT)
}

#[cfg(test)]
mod test {
    use super::*;

    const UTC: CartTimezone = CartTimezone::Named(chrono_tz::UTC);

    #[test]
    fn it_accepts_valid_dates() {
        assert_eq!(
            parse_cart_item_date("2021-02-21 00:00:00", &UTC),
            Some(1613865600000)
        );
        assert_eq!(
            parse_cart_item_date("2020-02-29 13:45:30", &UTC),
            Some(1582983930000)
        );
    }

    #[test]
    fn it_interprets_dates_in_the_given_timezone() {
        let oslo = CartTimezone::Named(chrono_tz::Europe::Oslo);
        assert_eq!(
            parse_cart_item_date("2021-02-21 00:00:00", &oslo),
            Some(1613862000000)
        );
    }

    #[test]
    fn it_rejects_invalid_dates() {
        let invalid_dates = vec![
            "",
            "2021-02-21",
            "2021-02-21 10:00",
            "2021-02-21T10:00:00",
            "2021-02-21  10:00:00",
            "2021-2-21 10:00:00",
            "21-02-21 10:00:00",
            "2021-02-30 10:00:00",
            "2021-13-01 10:00:00",
            "2021-00-01 10:00:00",
            "2021-02-21 24:00:00",
            "2021-02-21 10:60:00",
            "2021-02-21 1a:00:00",
            "2021-02-21 +1:00:00",
            "abcd-ef-gh ij:kl:mn",
            "2021-02-21 10:00:00 ",
        ];

        for date in &invalid_dates {
            assert_eq!(parse_cart_item_date(date, &UTC), None, "{}", date);
        }
    }

    #[test]
    fn it_formats_dates_parseable_again() {
        let formatted = format_cart_item_date(1582983930000, &UTC).expect("Valid timestamp");
        assert_eq!(formatted, "2020-02-29 13:45:30");
        assert_eq!(parse_cart_item_date(&formatted, &UTC), Some(1582983930000));
    }

    #[test]
    fn it_rejects_nonexistent_local_times() {
        // Clocks in Oslo jump from 02:00 to 03:00 on 2021-03-28
        let oslo = CartTimezone::Named(chrono_tz::Europe::Oslo);
        assert_eq!(parse_cart_item_date("2021-03-28 02:30:00", &oslo), None);
    }
}
