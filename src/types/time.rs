//! `GeneralizedTime` and `UTCTime` (§4.5): fixed-format, locale-independent
//! timestamp types. Per the design note in §9, formatting never consults the
//! process locale; every offset is resolved explicitly.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::ber::View;
use crate::error::{DecodeError, EncodeError};
use crate::identifier::{AsnType, CompositeId};
use crate::tag::Tag;
use crate::value::{Decode, Encode};

/// How a decoded timestamp's zone was spelled on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeZone {
    /// Trailing `Z`: universal time.
    Utc,
    /// Trailing `+HHMM`/`-HHMM`: universal time at a stated offset, in
    /// minutes east of UTC.
    Offset(i32),
    /// No trailing zone designator: local time of unstated offset.
    Local,
}

fn format_zone(zone: TimeZone) -> String {
    match zone {
        TimeZone::Utc => "Z".to_owned(),
        TimeZone::Offset(minutes) => {
            let sign = if minutes < 0 { '-' } else { '+' };
            let minutes = minutes.abs();
            format!("{sign}{:02}{:02}", minutes / 60, minutes % 60)
        }
        TimeZone::Local => String::new(),
    }
}

fn parse_zone(s: &str) -> Result<(&str, TimeZone), DecodeError> {
    if let Some(body) = s.strip_suffix('Z') {
        return Ok((body, TimeZone::Utc));
    }
    if s.len() >= 5 {
        let tail = &s[s.len() - 5..];
        let mut chars = tail.chars();
        let sign = chars.next().unwrap();
        if (sign == '+' || sign == '-') && tail[1..].bytes().all(|b| b.is_ascii_digit()) {
            let hh: i32 = tail[1..3].parse().map_err(|_| invalid("bad offset hours"))?;
            let mm: i32 = tail[3..5].parse().map_err(|_| invalid("bad offset minutes"))?;
            let total = hh * 60 + mm;
            let body = &s[..s.len() - 5];
            return Ok((body, TimeZone::Offset(if sign == '-' { -total } else { total })));
        }
    }
    Ok((s, TimeZone::Local))
}

fn invalid(message: &str) -> DecodeError {
    DecodeError::InvalidTime {
        message: message.to_owned(),
    }
}

fn parse_fixed_digits(s: &str, year_digits: usize) -> Result<NaiveDateTime, DecodeError> {
    let mut digits = String::new();
    let mut fraction = String::new();
    let mut seen_dot = false;
    for c in s.chars() {
        if c == '.' || c == ',' {
            seen_dot = true;
            continue;
        }
        if seen_dot {
            fraction.push(c);
        } else {
            digits.push(c);
        }
    }

    if digits.len() < year_digits + 8 {
        return Err(invalid("timestamp too short"));
    }

    let mut cursor = 0;
    let take = |s: &str, cursor: &mut usize, n: usize| -> Result<i32, DecodeError> {
        let slice = s.get(*cursor..*cursor + n).ok_or_else(|| invalid("truncated timestamp"))?;
        *cursor += n;
        slice.parse().map_err(|_| invalid("non-digit in timestamp"))
    };

    let year_raw = take(&digits, &mut cursor, year_digits)?;
    let year = if year_digits == 2 {
        if year_raw <= 49 {
            2000 + year_raw
        } else {
            1900 + year_raw
        }
    } else {
        year_raw
    };
    let month = take(&digits, &mut cursor, 2)?;
    let day = take(&digits, &mut cursor, 2)?;
    let hour = take(&digits, &mut cursor, 2)?;
    let minute = take(&digits, &mut cursor, 2)?;
    let second = if digits.len() >= cursor + 2 {
        take(&digits, &mut cursor, 2)?
    } else {
        0
    };

    let date = NaiveDate::from_ymd_opt(year, month as u32, day as u32)
        .ok_or_else(|| invalid("invalid calendar date"))?;
    let time = date
        .and_hms_opt(hour as u32, minute as u32, second as u32)
        .ok_or_else(|| invalid("invalid time of day"))?;

    if fraction.is_empty() {
        Ok(time)
    } else {
        let frac_value: f64 = format!("0.{fraction}").parse().map_err(|_| invalid("bad fraction"))?;
        Ok(time + chrono::Duration::nanoseconds((frac_value * 1_000_000_000.0).round() as i64))
    }
}

macro_rules! fixed_timestamp {
    ($name:ident, $tag:expr, $year_digits:expr) => {
        /// A fixed-format ASN.1 timestamp.
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name {
            pub naive: NaiveDateTime,
            pub zone: TimeZone,
        }

        impl AsnType for $name {
            const IDENTIFIER: CompositeId = CompositeId::Single($tag);
        }

        impl Encode for $name {
            fn encoded_length(&self) -> usize {
                let content = self.to_content_string();
                content.len() + 1 + crate::ber::header::length_octet_count(content.len())
            }

            fn encode(&self, buf: &mut [u8]) -> Result<usize, EncodeError> {
                let content = self.to_content_string();
                let total = content.len() + 1 + crate::ber::header::length_octet_count(content.len());
                EncodeError::assert_capacity(total, buf.len())?;
                buf[0] = $tag.value as u8;
                let len_len = crate::ber::encode_length(&mut buf[1..], content.len())?;
                buf[1 + len_len..total].copy_from_slice(content.as_bytes());
                Ok(total)
            }
        }

        impl Decode for $name {
            fn decode(view: &View<'_>) -> Result<Self, DecodeError> {
                DecodeError::assert_tag($tag, view.tag())?;
                if view.is_constructed() {
                    return Err(DecodeError::InvalidConstruction);
                }
                let content = view.content();
                if content.len() < 10 || content.len() > 23 {
                    return Err(invalid("content length outside the 10-23 byte window"));
                }
                let s = core::str::from_utf8(content).map_err(|_| DecodeError::InvalidUtf8)?;
                let (body, zone) = parse_zone(s)?;
                let naive = parse_fixed_digits(body, $year_digits)?;
                Ok(Self { naive, zone })
            }
        }

        impl $name {
            fn to_content_string(&self) -> String {
                let year_field = if $year_digits == 2 {
                    format!("{:02}", self.naive.year().rem_euclid(100))
                } else {
                    format!("{:04}", self.naive.year())
                };
                format!(
                    "{year_field}{:02}{:02}{:02}{:02}{:02}{}",
                    self.naive.month(),
                    self.naive.day(),
                    self.naive.hour(),
                    self.naive.minute(),
                    self.naive.second(),
                    format_zone(self.zone),
                )
            }
        }
    };
}

fixed_timestamp!(GeneralizedTime, Tag::GENERALIZED_TIME, 4);
fixed_timestamp!(UtcTime, Tag::UTC_TIME, 2);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{decode_exact, encode_to_vec};

    fn naive(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d).unwrap().and_hms_opt(h, mi, s).unwrap()
    }

    #[test]
    fn generalized_time_utc_round_trips() {
        let value = GeneralizedTime {
            naive: naive(2026, 7, 28, 12, 30, 0),
            zone: TimeZone::Utc,
        };
        let encoded = encode_to_vec(&value).unwrap();
        assert_eq!(core::str::from_utf8(&encoded[2..]).unwrap(), "20260728123000Z");
        let decoded = decode_exact::<GeneralizedTime>(&encoded).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn generalized_time_with_offset_round_trips() {
        let value = GeneralizedTime {
            naive: naive(2020, 1, 1, 0, 0, 0),
            zone: TimeZone::Offset(-330),
        };
        let encoded = encode_to_vec(&value).unwrap();
        assert_eq!(core::str::from_utf8(&encoded[2..]).unwrap(), "20200101000000-0530");
        assert_eq!(decode_exact::<GeneralizedTime>(&encoded).unwrap(), value);
    }

    #[test]
    fn utc_time_year_window() {
        let low = UtcTime { naive: naive(2049, 1, 1, 0, 0, 0), zone: TimeZone::Utc };
        let encoded = encode_to_vec(&low).unwrap();
        let decoded = decode_exact::<UtcTime>(&encoded).unwrap();
        assert_eq!(decoded.naive.year(), 2049);

        let high = UtcTime { naive: naive(1975, 1, 1, 0, 0, 0), zone: TimeZone::Utc };
        let encoded = encode_to_vec(&high).unwrap();
        let decoded = decode_exact::<UtcTime>(&encoded).unwrap();
        assert_eq!(decoded.naive.year(), 1975);
    }

    #[test]
    fn rejects_content_outside_length_window() {
        let bytes = [0x18, 0x02, b'2', b'0'];
        assert!(decode_exact::<GeneralizedTime>(&bytes).is_err());
    }
}
