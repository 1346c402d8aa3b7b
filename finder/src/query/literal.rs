//! Grammar-safe literal values.
//!
//! Every value placed on the right-hand side of a fragment goes through
//! [`Literal`]'s `Display` impl, which is the only place quoting happens.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};

use crate::Error;

/// Escape a string value for use inside double quotes.
///
/// Backslashes are escaped before quotes so inserted quote escapes are not
/// escaped a second time.
pub fn escape_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Reverse of [`escape_value`].
pub fn unescape_value(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next) => out.push(next),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Wrap a raw string into a quoted literal.
pub fn quote(value: &str) -> String {
    format!("\"{}\"", escape_value(value))
}

/// Parse a quoted literal back into its raw value.
pub fn unquote(literal: &str) -> Option<String> {
    let inner = literal.strip_prefix('"')?.strip_suffix('"')?;
    Some(unescape_value(inner))
}

/// Escape user-supplied text placed inside an attribute bracket.
///
/// Covers the characters that would end the bracket (`]`), split a qualified
/// key (`>`), or open an unbalanced string (`"`).
pub fn escape_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for c in key.chars() {
        if matches!(c, '\\' | '"' | '>' | ']') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Reference point of a relative date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateAnchor {
    Now,
    Today,
}

impl fmt::Display for DateAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateAnchor::Now => write!(f, "NOW"),
            DateAnchor::Today => write!(f, "TODAY"),
        }
    }
}

/// Relative date such as `NOW -1d` or `TODAY +2d -3h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativeDate {
    pub anchor: DateAnchor,
    pub days: i64,
    pub hours: i64,
}

impl RelativeDate {
    pub fn now(days: i64) -> Self {
        Self {
            anchor: DateAnchor::Now,
            days,
            hours: 0,
        }
    }

    pub fn with_hours(mut self, hours: i64) -> Self {
        self.hours = hours;
        self
    }
}

impl fmt::Display for RelativeDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.anchor)?;
        if self.days != 0 {
            let sign = if self.days > 0 { '+' } else { '-' };
            write!(f, " {}{}d", sign, self.days.abs())?;
        }
        if self.hours != 0 {
            let sign = if self.hours > 0 { '+' } else { '-' };
            write!(f, " {}{}h", sign, self.hours.abs())?;
        }
        Ok(())
    }
}

/// 48-bit MAC address, rendered in dotted form (`0011.2233.4455`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacAddress(pub [u8; 6]);

impl FromStr for MacAddress {
    type Err = Error;

    /// Accepts `0011.2233.4455`, `00:11:22:33:44:55` and `00-11-22-33-44-55`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex: String = s.chars().filter(|c| !matches!(c, '.' | ':' | '-')).collect();
        if hex.len() != 12 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidLiteral(format!("not a MAC address: {}", s)));
        }
        let mut bytes = [0u8; 6];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
                .map_err(|e| Error::InvalidLiteral(format!("{}: {}", s, e)))?;
        }
        Ok(Self(bytes))
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = self.0;
        write!(
            f,
            "{:02x}{:02x}.{:02x}{:02x}.{:02x}{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        )
    }
}

/// A value on the right-hand side of a fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Quoted and escaped string.
    Text(String),
    /// Bare integer.
    Number(i64),
    /// Bare IP address (`16.16.16.16`).
    Address(IpAddr),
    /// CIDR subnet (`16.16.0.0/16`).
    Subnet { address: IpAddr, prefix: u8 },
    Mac(MacAddress),
    MacPrefix { address: MacAddress, prefix: u8 },
    /// Quoted ISO date.
    Date(NaiveDate),
    /// Quoted ISO date and time.
    DateTime(NaiveDateTime),
    /// Quoted relative date.
    Relative(RelativeDate),
    /// `TRUE` / `FALSE` keyword.
    Boolean(bool),
}

impl Literal {
    pub fn text(value: impl Into<String>) -> Self {
        Literal::Text(value.into())
    }

    /// Whether the rendered form is wrapped in double quotes.
    pub fn is_quoted(&self) -> bool {
        matches!(
            self,
            Literal::Text(_) | Literal::Date(_) | Literal::DateTime(_) | Literal::Relative(_)
        )
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Text(value) => write!(f, "{}", quote(value)),
            Literal::Number(n) => write!(f, "{}", n),
            Literal::Address(ip) => write!(f, "{}", ip),
            Literal::Subnet { address, prefix } => write!(f, "{}/{}", address, prefix),
            Literal::Mac(mac) => write!(f, "{}", mac),
            Literal::MacPrefix { address, prefix } => write!(f, "{}/{}", address, prefix),
            Literal::Date(date) => write!(f, "\"{}\"", date.format("%Y-%m-%d")),
            Literal::DateTime(dt) => write!(f, "\"{}\"", dt.format("%Y-%m-%dT%H:%M:%S")),
            Literal::Relative(rel) => write!(f, "\"{}\"", rel),
            Literal::Boolean(true) => write!(f, "TRUE"),
            Literal::Boolean(false) => write!(f, "FALSE"),
        }
    }
}
