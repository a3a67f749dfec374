//! Named string formats for the `format` keyword.

use std::net::IpAddr;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveTime};
use regex::Regex;
use url::Url;
use uuid::Uuid;

/// `local@domain`, where each side is a dot-atom; the local part may also be
/// a quoted string and the domain a bracketed literal.
static ADDR_SPEC: LazyLock<Regex> = LazyLock::new(|| {
    let atom = r"[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+";
    let dot_atom = format!(r"{atom}(?:\.{atom})*");
    let quoted = r#""(?:[^"\\\r\n]|\\.)*""#;
    let literal = r"\[[^\[\]\\\s]*\]";
    Regex::new(&format!(
        r"^(?:{dot_atom}|{quoted})@(?:{dot_atom}|{literal})$"
    ))
    .expect("address pattern is valid")
});

/// ISO 8601 durations such as `P3Y6M4DT12H30M5S`, `PT0.5S` or `P2W`.
static DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^P(?:\d+Y)?(?:\d+M)?(?:\d+W)?(?:\d+D)?(?:T(?:\d+H)?(?:\d+M)?(?:\d+(?:[.,]\d+)?S)?)?$",
    )
    .expect("duration pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    DateTime,
    Date,
    Time,
    Duration,
    Regex,
    Email,
    Hostname,
    Uri,
    Ipv4,
    Ipv6,
    Uuid,
}

impl Format {
    pub fn as_str(self) -> &'static str {
        match self {
            Format::DateTime => "date-time",
            Format::Date => "date",
            Format::Time => "time",
            Format::Duration => "duration",
            Format::Regex => "regex",
            Format::Email => "email",
            Format::Hostname => "hostname",
            Format::Uri => "uri",
            Format::Ipv4 => "ipv4",
            Format::Ipv6 => "ipv6",
            Format::Uuid => "uuid",
        }
    }

    pub fn matches(self, s: &str) -> bool {
        match self {
            Format::DateTime => DateTime::parse_from_rfc3339(s).is_ok(),
            Format::Date => NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok(),
            Format::Time => NaiveTime::parse_from_str(s, "%H:%M:%S%.f").is_ok(),
            Format::Duration => is_duration(s),
            Format::Regex => Regex::new(s).is_ok(),
            Format::Email => is_email(s),
            // Both formats share the same lenient URI reference parse.
            Format::Hostname | Format::Uri => is_uri_reference(s),
            // Neither checks the address family.
            Format::Ipv4 | Format::Ipv6 => s.parse::<IpAddr>().is_ok(),
            Format::Uuid => Uuid::parse_str(s).is_ok(),
        }
    }
}

impl FromStr for Format {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "date-time" => Format::DateTime,
            "date" => Format::Date,
            "time" => Format::Time,
            "duration" => Format::Duration,
            "regex" => Format::Regex,
            "email" => Format::Email,
            "hostname" => Format::Hostname,
            "uri" => Format::Uri,
            "ipv4" => Format::Ipv4,
            "ipv6" => Format::Ipv6,
            "uuid" => Format::Uuid,
            _ => return Err(()),
        })
    }
}

fn is_duration(s: &str) -> bool {
    // `P` alone and a dangling `T` carry no components.
    s.len() > 1 && !s.ends_with('T') && DURATION.is_match(s)
}

/// Accepts a bare address or the `Display Name <address>` form.
fn is_email(s: &str) -> bool {
    let address = match (s.rfind('<'), s.strip_suffix('>')) {
        (Some(open), Some(inner)) if open < inner.len() => &inner[open + 1..],
        _ => s,
    };
    ADDR_SPEC.is_match(address)
}

/// Absolute URLs parse directly; anything else must resolve as a relative
/// reference.
fn is_uri_reference(s: &str) -> bool {
    match Url::parse(s) {
        Ok(_) => true,
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse("http://localhost/")
            .and_then(|base| base.join(s))
            .is_ok(),
        Err(_) => false,
    }
}
