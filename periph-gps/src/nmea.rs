use heapless::{String, Vec};

use crate::types::{
    CustomStatement, GpsConfig, GpsData, GpsDate, GpsError, GpsResult, GpsTime,
    CUSTOM_STATEMENT_LEN, MAX_CUSTOM_STATEMENTS,
};

const TERM_SIZE: usize = 24;

// received-field flags
const FLAG_LATITUDE: u32 = 0x0000_0001;
const FLAG_LONGITUDE: u32 = 0x0000_0002;
const FLAG_SATS: u32 = 0x0000_0004;
const FLAG_FIX: u32 = 0x0000_0008;
const FLAG_ALTITUDE: u32 = 0x0000_0010;
const FLAG_EW: u32 = 0x0000_0020;
const FLAG_NS: u32 = 0x0000_0040;
const FLAG_TIME: u32 = 0x0000_0080;
const FLAG_SPEED: u32 = 0x0000_0100;
const FLAG_DATE: u32 = 0x0000_0200;
const FLAG_VALIDITY: u32 = 0x0000_0400;
const FLAG_HDOP: u32 = 0x0000_0800;
const FLAG_VDOP: u32 = 0x0000_1000;
const FLAG_PDOP: u32 = 0x0000_2000;
const FLAG_FIXMODE: u32 = 0x0000_4000;
const FLAG_DIRECTION: u32 = 0x0000_8000;
const FLAG_SATSINVIEW: u32 = 0x0001_0000;
const FLAG_SATS1_12: u32 = 0x0002_0000;

const GGA_FLAGS: u32 = FLAG_LATITUDE
    | FLAG_NS
    | FLAG_LONGITUDE
    | FLAG_EW
    | FLAG_SATS
    | FLAG_FIX
    | FLAG_ALTITUDE
    | FLAG_TIME;
const RMC_FLAGS: u32 = FLAG_SPEED | FLAG_DATE | FLAG_VALIDITY | FLAG_DIRECTION;
const GSA_FLAGS: u32 = FLAG_HDOP | FLAG_VDOP | FLAG_PDOP | FLAG_FIXMODE | FLAG_SATS1_12;
const GSV_FLAGS: u32 = FLAG_SATSINVIEW;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Statement {
    Gga,
    Rmc,
    Gsa,
    Gsv,
    /// Not decoded, but may still carry custom terms
    Other,
}

/// Byte driven NMEA-0183 decoder.
///
/// Values from a sentence only reach the working record once the sentence
/// checksum has been verified. The public record is refreshed when every
/// statement enabled in [`GpsConfig`] (and every custom term) has arrived.
pub struct Gps {
    config: GpsConfig,
    required: u32,

    data: GpsData,
    working: GpsData,
    sentence: GpsData,

    customs: Vec<CustomStatement, MAX_CUSTOM_STATEMENTS>,

    // sentence state
    in_sentence: bool,
    star: bool,
    checksum: u8,
    term: Vec<u8, TERM_SIZE>,
    term_number: u8,
    statement: Statement,
    statement_id: String<CUSTOM_STATEMENT_LEN>,
    sentence_flags: u32,
    sentence_custom: u16,

    // accumulated state
    flags: u32,
    custom_received: u16,
    first_time: bool,
}

impl Default for Gps {
    fn default() -> Self {
        Self::new(GpsConfig::default())
    }
}

impl Gps {
    pub fn new(config: GpsConfig) -> Self {
        let mut required = 0;
        if config.gga {
            required |= GGA_FLAGS;
        }
        if config.rmc {
            required |= RMC_FLAGS;
        }
        if config.gsa {
            required |= GSA_FLAGS;
        }
        if config.gsv {
            required |= GSV_FLAGS;
        }

        Self {
            config,
            required,
            data: GpsData::default(),
            working: GpsData::default(),
            sentence: GpsData::default(),
            customs: Vec::new(),
            in_sentence: false,
            star: false,
            checksum: 0,
            term: Vec::new(),
            term_number: 0,
            statement: Statement::Other,
            statement_id: String::new(),
            sentence_flags: 0,
            sentence_custom: 0,
            flags: 0,
            custom_received: 0,
            first_time: true,
        }
    }

    pub fn config(&self) -> &GpsConfig {
        &self.config
    }

    /// The last complete record
    pub fn data(&self) -> &GpsData {
        &self.data
    }

    /// Capture term `term_number` of `statement` (e.g. `"$GPRMC"`, 7) verbatim.
    ///
    /// Returns the index of the term in [`GpsData::custom`].
    pub fn add_custom(&mut self, statement: &str, term_number: u8) -> Result<usize, GpsError> {
        if term_number == 0 || !statement.starts_with('$') || statement.len() < 2 {
            return Err(GpsError::InvalidCustom);
        }

        let mut name = String::new();
        name.push_str(statement)
            .map_err(|_| GpsError::InvalidCustom)?;

        let custom = CustomStatement {
            statement: name,
            term_number,
            ..Default::default()
        };

        self.customs
            .push(custom.clone())
            .map_err(|_| GpsError::TooManyCustom)?;
        // slots were checked above, the record vectors have the same capacity
        self.working.custom.push(custom.clone()).ok();
        self.data.custom.push(custom).ok();

        Ok(self.customs.len() - 1)
    }

    /// Feed bytes until a new record is complete or `bytes` runs dry.
    ///
    /// Bytes after the one completing a record are left in the iterator.
    pub fn update<I: Iterator<Item = u8>>(&mut self, bytes: &mut I) -> GpsResult {
        for c in bytes.by_ref() {
            if self.process(c) == GpsResult::NewData {
                return GpsResult::NewData;
            }
        }

        self.with_status(if self.first_time {
            GpsResult::FirstDataWaiting
        } else {
            GpsResult::OldData
        })
    }

    /// Consume a single character of the NMEA stream
    pub fn process(&mut self, c: u8) -> GpsResult {
        if self.complete() {
            // the previous call delivered this set, start collecting the next one
            self.clear_flags();
            self.data.status = GpsResult::OldData;
        }

        match c {
            b'$' => {
                if self.in_sentence {
                    log::debug!("NMEA sentence interrupted");
                }
                self.start_sentence();
                // keep the '$' so term 0 reads like "$GPGGA"
                self.term.push(c).ok();
            }
            b',' => {
                if self.in_sentence {
                    self.checksum ^= c;
                    self.end_term();
                }
            }
            b'*' => {
                if self.in_sentence && !self.star {
                    self.end_term();
                    self.star = true;
                }
            }
            b'\r' | b'\n' => {
                if self.in_sentence {
                    self.end_sentence();
                }
            }
            _ => {
                if self.in_sentence {
                    if !self.star {
                        self.checksum ^= c;
                    }
                    if self.term.push(c).is_err() {
                        log::debug!("NMEA term too long, dropping sentence");
                        self.in_sentence = false;
                    }
                }
            }
        }

        self.finish()
    }

    fn start_sentence(&mut self) {
        self.in_sentence = true;
        self.star = false;
        self.checksum = 0;
        self.term.clear();
        self.term_number = 0;
        self.statement = Statement::Other;
        self.statement_id.clear();
        self.sentence_flags = 0;
        self.sentence_custom = 0;
        self.sentence.clone_from(&self.working);
    }

    fn end_term(&mut self) {
        self.check_term();
        self.term_number = self.term_number.saturating_add(1);
        self.term.clear();
    }

    fn end_sentence(&mut self) {
        self.in_sentence = false;

        if !self.star {
            log::debug!("NMEA sentence without checksum");
            return;
        }

        let received = match (
            self.term.first().and_then(|&c| hex_digit(c)),
            self.term.get(1).and_then(|&c| hex_digit(c)),
        ) {
            (Some(high), Some(low)) => high << 4 | low,
            _ => {
                log::debug!("NMEA checksum missing");
                return;
            }
        };

        if received != self.checksum {
            log::debug!(
                "NMEA checksum mismatch on {}: got {:02X}, computed {:02X}",
                self.statement_id.as_str(),
                received,
                self.checksum
            );
            return;
        }

        core::mem::swap(&mut self.working, &mut self.sentence);
        self.flags |= self.sentence_flags;
        self.custom_received |= self.sentence_custom;
    }

    fn check_term(&mut self) {
        let term = match core::str::from_utf8(&self.term) {
            Ok(term) => term,
            Err(_) => {
                log::debug!("NMEA term is not valid UTF-8");
                return;
            }
        };

        if self.term_number == 0 {
            self.statement_id.clear();
            if self.statement_id.push_str(term).is_err() {
                // longer than any statement we know
                self.statement_id.clear();
            }
            self.statement = match term.get(3..) {
                Some("GGA") if self.config.gga => Statement::Gga,
                Some("RMC") if self.config.rmc => Statement::Rmc,
                Some("GSA") if self.config.gsa => Statement::Gsa,
                Some("GSV") if self.config.gsv => Statement::Gsv,
                _ => Statement::Other,
            };
            return;
        }

        let mut custom_hits = 0u16;
        for (i, custom) in self.customs.iter().enumerate() {
            if custom.term_number == self.term_number
                && custom.statement.as_str() == self.statement_id.as_str()
            {
                if let Some(slot) = self.sentence.custom.get_mut(i) {
                    slot.value.clear();
                    // overlong values are cut, the receiver never sends them for known terms
                    for ch in term.chars() {
                        if slot.value.push(ch).is_err() {
                            break;
                        }
                    }
                    slot.updated = true;
                    custom_hits |= 1 << i;
                }
            }
        }
        self.sentence_custom |= custom_hits;

        let flag = match (self.statement, self.term_number) {
            (Statement::Gga, 1) => parse_time(term).map(|time| {
                self.sentence.time = time;
                FLAG_TIME
            }),
            (Statement::Gga, 2) => parse_coordinate(term).map(|latitude| {
                self.sentence.latitude = latitude;
                FLAG_LATITUDE
            }),
            (Statement::Gga, 3) => {
                if term.starts_with('S') && self.sentence_flags & FLAG_LATITUDE != 0 {
                    self.sentence.latitude = -self.sentence.latitude;
                }
                Some(FLAG_NS)
            }
            (Statement::Gga, 4) => parse_coordinate(term).map(|longitude| {
                self.sentence.longitude = longitude;
                FLAG_LONGITUDE
            }),
            (Statement::Gga, 5) => {
                if term.starts_with('W') && self.sentence_flags & FLAG_LONGITUDE != 0 {
                    self.sentence.longitude = -self.sentence.longitude;
                }
                Some(FLAG_EW)
            }
            (Statement::Gga, 6) => parse_u8(term).map(|fix| {
                self.sentence.fix = fix;
                FLAG_FIX
            }),
            (Statement::Gga, 7) => parse_u8(term).map(|satellites| {
                self.sentence.satellites = satellites;
                FLAG_SATS
            }),
            (Statement::Gga, 9) => parse_number(term).map(|altitude| {
                self.sentence.altitude = altitude;
                FLAG_ALTITUDE
            }),

            (Statement::Rmc, 2) => {
                self.sentence.validity = term.starts_with('A');
                Some(FLAG_VALIDITY)
            }
            (Statement::Rmc, 7) => parse_number(term).map(|speed| {
                self.sentence.speed = speed;
                FLAG_SPEED
            }),
            (Statement::Rmc, 8) => parse_number(term).map(|direction| {
                self.sentence.direction = direction;
                FLAG_DIRECTION
            }),
            (Statement::Rmc, 9) => parse_date(term).map(|date| {
                self.sentence.date = date;
                FLAG_DATE
            }),

            (Statement::Gsa, 2) => parse_u8(term).map(|fix_mode| {
                self.sentence.fix_mode = fix_mode;
                FLAG_FIXMODE
            }),
            (Statement::Gsa, n @ 3..=14) => parse_u8(term).and_then(|id| {
                self.sentence.satellite_ids[usize::from(n - 3)] = id;
                // the list is complete once the last slot has been seen
                (n == 14).then_some(FLAG_SATS1_12)
            }),
            (Statement::Gsa, 15) => parse_number(term).map(|pdop| {
                self.sentence.pdop = pdop;
                FLAG_PDOP
            }),
            (Statement::Gsa, 16) => parse_number(term).map(|hdop| {
                self.sentence.hdop = hdop;
                FLAG_HDOP
            }),
            (Statement::Gsa, 17) => parse_number(term).map(|vdop| {
                self.sentence.vdop = vdop;
                FLAG_VDOP
            }),

            (Statement::Gsv, 3) => parse_u8(term).map(|in_view| {
                self.sentence.satellites_in_view = in_view;
                FLAG_SATSINVIEW
            }),

            _ => None,
        };

        if let Some(flag) = flag {
            self.sentence_flags |= flag;
        }
    }

    fn custom_mask(&self) -> u16 {
        ((1u32 << self.customs.len()) - 1) as u16
    }

    fn complete(&self) -> bool {
        let custom_mask = self.custom_mask();
        if self.required == 0 && custom_mask == 0 {
            return false;
        }
        self.flags & self.required == self.required
            && self.custom_received & custom_mask == custom_mask
    }

    fn clear_flags(&mut self) {
        self.flags = 0;
        self.custom_received = 0;
        for custom in self.working.custom.iter_mut() {
            custom.updated = false;
        }
    }

    fn finish(&mut self) -> GpsResult {
        if self.complete() {
            self.first_time = false;
            self.data.clone_from(&self.working);
            return self.with_status(GpsResult::NewData);
        }
        if self.first_time {
            return self.with_status(GpsResult::FirstDataWaiting);
        }
        self.with_status(GpsResult::OldData)
    }

    fn with_status(&mut self, status: GpsResult) -> GpsResult {
        self.data.status = status;
        status
    }
}

fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'A'..=b'F' => Some(c - b'A' + 10),
        b'a'..=b'f' => Some(c - b'a' + 10),
        _ => None,
    }
}

/// Empty fields are sent while the receiver has no fix, they read as zero.
fn parse_number(term: &str) -> Option<f64> {
    if term.is_empty() {
        return Some(0.0);
    }
    term.parse::<f64>().ok()
}

fn parse_u8(term: &str) -> Option<u8> {
    if term.is_empty() {
        return Some(0);
    }
    term.parse::<u8>().ok()
}

/// `dddmm.mmmm` to decimal degrees
fn parse_coordinate(term: &str) -> Option<f64> {
    let raw = parse_number(term)?;
    let degrees = libm::trunc(raw / 100.0);
    let minutes = raw - degrees * 100.0;
    Some(degrees + minutes / 60.0)
}

fn two_digits(term: &str, at: usize) -> Option<u8> {
    term.get(at..at + 2)?.parse::<u8>().ok()
}

/// `hhmmss.ss`
fn parse_time(term: &str) -> Option<GpsTime> {
    if term.is_empty() {
        return Some(Default::default());
    }

    let hours = two_digits(term, 0)?;
    let minutes = two_digits(term, 2)?;
    let seconds = two_digits(term, 4)?;

    let mut hundredths = 0;
    if let Some(fraction) = term.get(6..).and_then(|rest| rest.strip_prefix('.')) {
        let mut scale = 10;
        for c in fraction.bytes().take(2) {
            if !c.is_ascii_digit() {
                return None;
            }
            hundredths += (c - b'0') * scale;
            scale /= 10;
        }
    }

    Some(GpsTime {
        hours,
        minutes,
        seconds,
        hundredths,
    })
}

/// `ddmmyy`
fn parse_date(term: &str) -> Option<GpsDate> {
    if term.is_empty() {
        return Some(Default::default());
    }
    if term.len() != 6 {
        return None;
    }

    Some(GpsDate {
        date: two_digits(term, 0)?,
        month: two_digits(term, 2)?,
        year: two_digits(term, 4)?,
    })
}
