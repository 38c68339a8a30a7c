use chrono::{Duration, NaiveDateTime, Utc};

pub const DATE_FMT: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

// wider than the whole NaiveDateTime range, small enough for Duration::days
const MAX_DAY_SPAN: i64 = 200_000_000;

// `days` before `at`, or None when that lies outside the representable range
pub fn days_before(at: NaiveDateTime, days: i64) -> Option<NaiveDateTime> {
    if days.checked_abs()? > MAX_DAY_SPAN {
        return None;
    }
    at.checked_sub_signed(Duration::days(days))
}

#[cfg(test)]
pub(crate) fn days_ago(days: i64) -> NaiveDateTime {
    now() - Duration::days(days)
}

pub fn format_date(time: NaiveDateTime) -> String {
    format!("{}", time.format(DATE_FMT))
}

pub mod serializer {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::{format_date, DATE_FMT};

    pub fn serialize<S: Serializer>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        format_date(*time).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let str_time: String = Deserialize::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&str_time, DATE_FMT).map_err(D::Error::custom)
    }
}

pub mod opt_serializer {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::{format_date, DATE_FMT};

    pub fn serialize<S: Serializer>(time: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error> {
        time.map(format_date).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error> {
        let str_time: Option<String> = Deserialize::deserialize(deserializer)?;
        match str_time {
            Some(s) if !s.is_empty() => {
                NaiveDateTime::parse_from_str(&s, DATE_FMT).map(Some).map_err(D::Error::custom)
            }
            _ => Ok(None),
        }
    }
}
