// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Binary TZif (RFC 9636 / `tzfile(5)`) reader. Parses the version-1 32-bit
//! block and, when present, the version-2+ 64-bit block that follows it
//! (always preferred when both are present, for its wider transition-time
//! range). The trailing POSIX TZ footer string (version 2+) is captured
//! verbatim for [`crate::zone::posix`] to fall back on past the last
//! tabulated transition.

use crate::error::{Result, TimeError};

#[derive(Debug, Clone)]
pub struct TtInfo {
    pub utoff: i32,
    pub is_dst: bool,
    pub abbr: String,
}

#[derive(Debug, Clone)]
pub struct TzifData {
    /// Transition instants, in seconds since the Unix epoch, ascending.
    pub transitions: Vec<i64>,
    /// Index into `types` that applies starting at the corresponding
    /// `transitions` entry.
    pub transition_types: Vec<u8>,
    pub types: Vec<TtInfo>,
    /// The POSIX TZ footer string for instants after the last transition,
    /// present in version 2+ files.
    pub footer: Option<String>,
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.pos + n > self.bytes.len() {
            return Err(TimeError::ZoneFormatError {
                name: String::new(),
                reason: "unexpected end of tzfile".to_string(),
            });
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn i32(&mut self) -> Result<i32> {
        Ok(i32::from_be_bytes(self.take(4)?.try_into().unwrap()))
    }

    fn i64(&mut self) -> Result<i64> {
        Ok(i64::from_be_bytes(self.take(8)?.try_into().unwrap()))
    }
}

struct Header {
    version: u8,
    isutcnt: u32,
    isstdcnt: u32,
    leapcnt: u32,
    timecnt: u32,
    typecnt: u32,
    charcnt: u32,
}

fn read_header(r: &mut Reader) -> Result<Header> {
    let magic = r.take(4)?;
    if magic != b"TZif" {
        return Err(TimeError::ZoneFormatError { name: String::new(), reason: "bad magic".to_string() });
    }
    let version = r.u8()?;
    r.take(15)?; // reserved
    let isutcnt = r.i32()? as u32;
    let isstdcnt = r.i32()? as u32;
    let leapcnt = r.i32()? as u32;
    let timecnt = r.i32()? as u32;
    let typecnt = r.i32()? as u32;
    let charcnt = r.i32()? as u32;
    Ok(Header { version, isutcnt, isstdcnt, leapcnt, timecnt, typecnt, charcnt })
}

fn read_block(r: &mut Reader, h: &Header, wide_time: bool) -> Result<TzifData> {
    let mut transitions = Vec::with_capacity(h.timecnt as usize);
    for _ in 0..h.timecnt {
        transitions.push(if wide_time { r.i64()? } else { r.i32()? as i64 });
    }
    let mut transition_types = Vec::with_capacity(h.timecnt as usize);
    for _ in 0..h.timecnt {
        transition_types.push(r.u8()?);
    }
    struct RawType {
        utoff: i32,
        is_dst: bool,
        abbr_index: u8,
    }
    let mut raw_types = Vec::with_capacity(h.typecnt as usize);
    for _ in 0..h.typecnt {
        let utoff = r.i32()?;
        let is_dst = r.u8()? != 0;
        let abbr_index = r.u8()?;
        raw_types.push(RawType { utoff, is_dst, abbr_index });
    }
    let abbrs = r.take(h.charcnt as usize)?;
    let types = raw_types
        .into_iter()
        .map(|t| {
            let start = t.abbr_index as usize;
            let end = abbrs[start..].iter().position(|&b| b == 0).map(|p| start + p).unwrap_or(abbrs.len());
            let abbr = String::from_utf8_lossy(&abbrs[start..end]).into_owned();
            TtInfo { utoff: t.utoff, is_dst: t.is_dst, abbr }
        })
        .collect();
    // leap-second table and std/wall, ut/local indicator arrays: skipped,
    // not needed for offset lookups.
    for _ in 0..h.leapcnt {
        if wide_time {
            r.i64()?;
        } else {
            r.i32()?;
        }
        r.i32()?;
    }
    r.take(h.isstdcnt as usize)?;
    r.take(h.isutcnt as usize)?;
    Ok(TzifData { transitions, transition_types, types, footer: None })
}

/// Parse a complete tzfile: the version-1 block, and when the header names
/// version 2+, the trailing 64-bit block and POSIX footer (which take
/// precedence).
pub fn parse(bytes: &[u8]) -> Result<TzifData> {
    let mut r = Reader { bytes, pos: 0 };
    let h1 = read_header(&mut r)?;
    let v1 = read_block(&mut r, &h1, false)?;
    if h1.version == 0 {
        return Ok(v1);
    }
    let h2 = read_header(&mut r)?;
    let mut v2 = read_block(&mut r, &h2, true)?;
    // Footer: a newline, the POSIX TZ string, and a trailing newline.
    if r.pos < bytes.len() && bytes[r.pos] == b'\n' {
        r.pos += 1;
        let start = r.pos;
        while r.pos < bytes.len() && bytes[r.pos] != b'\n' {
            r.pos += 1;
        }
        v2.footer = Some(String::from_utf8_lossy(&bytes[start..r.pos]).into_owned());
    }
    Ok(v2)
}
