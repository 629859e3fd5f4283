//! Symbolic date/time pattern compiler.
//!
//! A pattern such as `YYYYMMDDhhmmZZZ` is translated into a strftime-style
//! format (`%Y%m%d%H%M`) plus the position of the three-character timezone
//! region, which chrono's format grammar can't express and is therefore
//! spliced in and out by hand.
//!
//! Tokens are matched left to right; at each position the first token in the
//! token set that matches wins, so `YYYY` is preferred over `YY` and `DDD`
//! over `DD`. Anything else is literal text.

use std::fmt::Write;

use chrono::NaiveDateTime;

use super::{CodecError, TimeZone, ZoneTable};

/// Recognised pattern tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// `YYYY`
    Year4,
    /// `YY`
    Year2,
    /// `DDD`
    DayOfYear,
    /// `JJJ`
    JulianDay,
    /// `DD`
    Day,
    /// `MM`
    Month,
    /// `hh`, 24-hour clock
    Hour24,
    /// `HH`, 12-hour clock
    Hour12,
    /// `mm`
    Minute,
    /// `ss`
    Second,
    /// `pp`
    Meridiem,
    /// `ZZZ`
    Zone,
}

impl Token {
    /// The symbol matched in a pattern.
    pub fn symbol(self) -> &'static str {
        match self {
            Token::Year4 => "YYYY",
            Token::Year2 => "YY",
            Token::DayOfYear => "DDD",
            Token::JulianDay => "JJJ",
            Token::Day => "DD",
            Token::Month => "MM",
            Token::Hour24 => "hh",
            Token::Hour12 => "HH",
            Token::Minute => "mm",
            Token::Second => "ss",
            Token::Meridiem => "pp",
            Token::Zone => "ZZZ",
        }
    }

    /// The strftime directive; `None` for the spliced timezone.
    pub fn directive(self) -> Option<&'static str> {
        match self {
            Token::Year4 => Some("%Y"),
            Token::Year2 => Some("%y"),
            Token::DayOfYear | Token::JulianDay => Some("%j"),
            Token::Day => Some("%d"),
            Token::Month => Some("%m"),
            Token::Hour24 => Some("%H"),
            Token::Hour12 => Some("%I"),
            Token::Minute => Some("%M"),
            Token::Second => Some("%S"),
            Token::Meridiem => Some("%p"),
            Token::Zone => None,
        }
    }
}

/// Tokens of combined date and time patterns, in match priority.
pub const DATETIME_TOKENS: &[Token] = &[
    Token::Year4,
    Token::Year2,
    Token::DayOfYear,
    Token::Day,
    Token::Month,
    Token::Hour24,
    Token::Hour12,
    Token::Minute,
    Token::Second,
    Token::Zone,
    Token::Meridiem,
];

/// Tokens of date-only patterns, in match priority.
pub const DATE_TOKENS: &[Token] = &[
    Token::Year4,
    Token::Year2,
    Token::DayOfYear,
    Token::Day,
    Token::Month,
    Token::JulianDay,
];

/// Tokens of time-only patterns, in match priority.
pub const TIME_TOKENS: &[Token] = &[
    Token::Hour24,
    Token::Hour12,
    Token::Minute,
    Token::Second,
    Token::Zone,
    Token::Meridiem,
];

/// Character offset and width of the timezone code within a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneRegion {
    pub offset: usize,
    pub width: usize,
}

impl ZoneRegion {
    /// Splits `raw` into (text without the region, region text).
    fn excise(&self, raw: &str) -> (String, String) {
        let code = raw.chars().skip(self.offset).take(self.width).collect();
        let rest = raw
            .chars()
            .take(self.offset)
            .chain(raw.chars().skip(self.offset + self.width))
            .collect();
        (rest, code)
    }

    /// Inserts `code` at the region's offset.
    fn splice(&self, raw: &str, code: &str) -> String {
        let mut out: String = raw.chars().take(self.offset).collect();
        out.push_str(code);
        out.extend(raw.chars().skip(self.offset));
        out
    }
}

/// A pattern translated into a chrono format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPattern {
    source: String,
    format: String,
    tokens: Vec<Token>,
    zone: Option<ZoneRegion>,
}

impl CompiledPattern {
    /// Compiles `pattern` against a token set.
    pub fn compile(pattern: &str, token_set: &[Token]) -> Self {
        let mut format = String::with_capacity(pattern.len() * 2);
        let mut tokens = Vec::new();
        let mut zone = None;

        // Offsets are in characters; `rest` advances by whole tokens or chars.
        let mut rest = pattern;
        let mut offset = 0;
        while let Some(c) = rest.chars().next() {
            match token_set.iter().find(|t| rest.starts_with(t.symbol())) {
                Some(&token) => {
                    let width = token.symbol().len();
                    match token.directive() {
                        Some(directive) => format.push_str(directive),
                        None => zone = Some(ZoneRegion { offset, width }),
                    }
                    tokens.push(token);
                    rest = &rest[width..];
                    offset += width;
                }
                None => {
                    if c == '%' {
                        format.push_str("%%");
                    } else {
                        format.push(c);
                    }
                    rest = &rest[c.len_utf8()..];
                    offset += 1;
                }
            }
        }

        Self {
            source: pattern.to_string(),
            format,
            tokens,
            zone,
        }
    }

    /// The symbolic pattern as declared.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The chrono/strftime format, without the timezone region.
    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn zone(&self) -> Option<ZoneRegion> {
        self.zone
    }

    /// Slot width: the pattern's literal character count.
    pub fn width(&self) -> usize {
        self.source.chars().count()
    }

    fn has(&self, token: Token) -> bool {
        self.tokens.contains(&token)
    }

    /// Renders `value`, splicing in `zone` when the pattern has a region.
    pub fn render(
        &self,
        value: &NaiveDateTime,
        zone: Option<&TimeZone>,
    ) -> Result<String, CodecError> {
        let mut out = String::new();
        write!(out, "{}", value.format(&self.format))
            .map_err(|_| CodecError::Format(self.source.clone()))?;
        match self.zone {
            Some(region) => {
                let zone = zone.ok_or_else(|| CodecError::MissingTimeZone {
                    pattern: self.source.clone(),
                })?;
                let code = zone.abbreviation();
                if code.chars().count() != region.width {
                    return Err(CodecError::TimeZoneWidth {
                        zone: code.to_string(),
                        width: region.width,
                    });
                }
                Ok(region.splice(&out, code))
            }
            None => Ok(out),
        }
    }

    /// Parses slot text, resolving the timezone region through `zones`.
    ///
    /// Components the pattern doesn't mention default the way strptime
    /// does: 1900-01-01 00:00:00, with a 12-hour clock read as AM when the
    /// pattern has no meridiem.
    pub fn parse(
        &self,
        raw: &str,
        zones: &ZoneTable,
    ) -> Result<(NaiveDateTime, Option<TimeZone>), CodecError> {
        let (text, zone) = match self.zone {
            Some(region) => {
                let (rest, code) = region.excise(raw);
                let zone = zones.get(&code).cloned().ok_or_else(|| {
                    CodecError::UnsupportedTimeZone {
                        code,
                        expected: zones.codes(),
                    }
                })?;
                (rest, Some(zone))
            }
            None => (raw.to_string(), None),
        };

        let mut format = self.format.clone();
        let mut text = text;
        for (directive, fill) in self.missing_components() {
            format.push('|');
            format.push_str(directive);
            text.push('|');
            text.push_str(fill);
        }

        NaiveDateTime::parse_from_str(&text, &format)
            .map(|value| (value, zone))
            .map_err(|e| {
                CodecError::Parse(format!(
                    "\"{}\" does not match pattern \"{}\": {}",
                    raw, self.source, e
                ))
            })
    }

    /// (directive, filler) pairs for components absent from the pattern.
    fn missing_components(&self) -> Vec<(&'static str, &'static str)> {
        let mut missing = Vec::new();
        if !self.has(Token::Year4) && !self.has(Token::Year2) {
            missing.push(("%Y", "1900"));
        }
        if !self.has(Token::DayOfYear) && !self.has(Token::JulianDay) {
            if !self.has(Token::Month) {
                missing.push(("%m", "01"));
            }
            if !self.has(Token::Day) {
                missing.push(("%d", "01"));
            }
        }
        if self.has(Token::Hour12) {
            if !self.has(Token::Meridiem) {
                missing.push(("%p", "AM"));
            }
        } else if !self.has(Token::Hour24) {
            missing.push(("%H", "00"));
        }
        if !self.has(Token::Minute) {
            missing.push(("%M", "00"));
        }
        if !self.has(Token::Second) {
            missing.push(("%S", "00"));
        }
        missing
    }
}
