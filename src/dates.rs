//! Calendar dates travel as `YYYY-MM-DD` strings in JSON bodies and query strings.

pub mod iso_date {
    use serde::{de, ser, Deserialize, Deserializer, Serializer};
    use time::{format_description::FormatItem, macros::format_description, Date};

    pub const FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

    pub fn parse(text: &str) -> Result<Date, time::error::Parse> {
        Date::parse(text.trim(), FORMAT)
    }

    pub fn serialize<S: Serializer>(date: &Date, s: S) -> Result<S::Ok, S::Error> {
        let text = date.format(FORMAT).map_err(ser::Error::custom)?;
        s.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Date, D::Error> {
        let text = String::deserialize(d)?;
        parse(&text).map_err(|e| de::Error::custom(format!("invalid date {text:?}: {e}")))
    }

    /// For optional fields; pair with `#[serde(default)]`.
    pub mod option {
        use super::parse;
        use serde::{de, Deserialize, Deserializer};
        use time::Date;

        pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Date>, D::Error> {
            match Option::<String>::deserialize(d)? {
                Some(text) => parse(&text)
                    .map(Some)
                    .map_err(|e| de::Error::custom(format!("invalid date {text:?}: {e}"))),
                None => Ok(None),
            }
        }
    }
}
