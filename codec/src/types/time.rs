//! Decode implementations for timestamps and durations.
//!
//! Both shapes also accept textual payloads: timestamps as RFC 3339 with
//! nanosecond precision, durations in the signed `<num><unit>` literal
//! grammar (`ns`, `us`/`µs`, `ms`, `s`, `m`, `h`; units sequencable,
//! fractions allowed, `"0"` allowed bare).

use crate::{Decode, Decoder, Error, Kind};
use chrono::{DateTime, TimeDelta, Utc};

impl Decode for DateTime<Utc> {
    fn empty() -> Self {
        DateTime::UNIX_EPOCH
    }

    fn decode_into(d: &mut Decoder<'_>, slot: &mut Self) -> Result<Kind, Error> {
        let kind = d.kind()?;
        let v = match kind {
            Kind::Nil => {
                d.nil()?;
                DateTime::UNIX_EPOCH
            }
            Kind::Time => d.time()?,
            Kind::String | Kind::Bytes => {
                let raw = if kind == Kind::String {
                    d.string_bytes()?
                } else {
                    d.byte_slice()?
                };
                let s = std::str::from_utf8(raw)
                    .map_err(|_| Error::Invalid("time", "literal is not utf-8"))?;
                DateTime::parse_from_rfc3339(s)
                    .map_err(|_| Error::Invalid("time", "literal is not rfc 3339"))?
                    .with_timezone(&Utc)
            }
            from => {
                return Err(Error::TypeConversion {
                    from,
                    to: Kind::Time,
                })
            }
        };
        *slot = v;
        Ok(kind)
    }
}

impl Decode for TimeDelta {
    fn empty() -> Self {
        TimeDelta::zero()
    }

    fn decode_into(d: &mut Decoder<'_>, slot: &mut Self) -> Result<Kind, Error> {
        let kind = d.kind()?;
        let v = match kind {
            Kind::Nil => {
                d.nil()?;
                TimeDelta::zero()
            }
            Kind::Duration => d.duration()?,
            Kind::String | Kind::Bytes => {
                let raw = if kind == Kind::String {
                    d.string_bytes()?
                } else {
                    d.byte_slice()?
                };
                let s = std::str::from_utf8(raw)
                    .map_err(|_| Error::Invalid("duration", "literal is not utf-8"))?;
                parse_duration_literal(s)?
            }
            from => {
                return Err(Error::TypeConversion {
                    from,
                    to: Kind::Duration,
                })
            }
        };
        *slot = v;
        Ok(kind)
    }
}

fn unit_nanos(unit: &str) -> Result<i64, Error> {
    Ok(match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => 1_000,
        "ms" => 1_000_000,
        "s" => 1_000_000_000,
        "m" => 60 * 1_000_000_000,
        "h" => 3_600 * 1_000_000_000,
        _ => return Err(Error::Invalid("duration", "unknown unit")),
    })
}

/// Parses a signed sequence of `<num><unit>` terms, e.g. `"1h30m"`,
/// `"-2.5s"`, `"300µs"`. A bare `"0"` is the only unitless literal.
fn parse_duration_literal(s: &str) -> Result<TimeDelta, Error> {
    let mut rest = s;
    let mut neg = false;
    if let Some(r) = rest.strip_prefix('-') {
        neg = true;
        rest = r;
    } else if let Some(r) = rest.strip_prefix('+') {
        rest = r;
    }
    if rest == "0" {
        return Ok(TimeDelta::zero());
    }
    if rest.is_empty() {
        return Err(Error::Invalid("duration", "empty literal"));
    }

    let overflow = || Error::Invalid("duration", "literal overflows");
    let mut total: i64 = 0;
    while !rest.is_empty() {
        let int_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (int_part, mut after) = rest.split_at(int_end);

        let mut frac_part = "";
        if let Some(r) = after.strip_prefix('.') {
            let frac_end = r.find(|c: char| !c.is_ascii_digit()).unwrap_or(r.len());
            frac_part = &r[..frac_end];
            after = &r[frac_end..];
        }
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(Error::Invalid("duration", "expected a number"));
        }

        let unit_end = after
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after.len());
        let (unit, next) = after.split_at(unit_end);
        let scale = unit_nanos(unit)?;

        let whole: i64 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| overflow())?
        };
        let mut term = whole.checked_mul(scale).ok_or_else(overflow)?;
        if !frac_part.is_empty() {
            let frac: f64 = format!("0.{frac_part}")
                .parse()
                .map_err(|_| Error::Invalid("duration", "malformed fraction"))?;
            term = term
                .checked_add((frac * scale as f64) as i64)
                .ok_or_else(overflow)?;
        }
        total = total.checked_add(term).ok_or_else(overflow)?;
        rest = next;
    }

    Ok(TimeDelta::nanoseconds(if neg { -total } else { total }))
}
