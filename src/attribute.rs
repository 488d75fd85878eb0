//! Attribute reader
//!
//! One sysfs attribute is one small text file. Reading it has three outcomes
//! that must not be confused:
//!
//! - the file is absent (or the kernel refuses the read as unsupported): the
//!   attribute is simply not exposed for this device, `Ok(None)`
//! - the file holds text of the expected shape: `Ok(Some(value))`
//! - the file holds something else: a hard [`NetClassError::AttributeParse`]

use crate::error::{NetClassError, Result};
use crate::fs::{is_unsupported, SysFs};
use log::debug;
use std::path::Path;

/// Read one attribute of `device` as trimmed text
///
/// `dir` is the device directory relative to the sysfs mount point.
pub fn read_attribute<F: SysFs + ?Sized>(
    fs: &F,
    dir: &Path,
    device: &str,
    key: &'static str,
) -> Result<Option<String>> {
    let raw = match fs.read_file(&dir.join(key)) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Ok(None),
        Err(e) if is_unsupported(&e) => {
            debug!("{}: attribute {} not supported ({})", device, key, e);
            return Ok(None);
        }
        Err(source) => {
            return Err(NetClassError::AttributeRead {
                device: device.to_string(),
                attribute: key,
                source,
            })
        }
    };

    let text = String::from_utf8(raw).map_err(|e| NetClassError::AttributeParse {
        device: device.to_string(),
        attribute: key,
        value: String::from_utf8_lossy(e.as_bytes()).trim().to_string(),
        reason: "content is not valid UTF-8".to_string(),
    })?;

    Ok(Some(text.trim().to_string()))
}

/// Read one attribute of `device` as a signed 64-bit integer
pub fn read_i64<F: SysFs + ?Sized>(
    fs: &F,
    dir: &Path,
    device: &str,
    key: &'static str,
) -> Result<Option<i64>> {
    match read_attribute(fs, dir, device, key)? {
        Some(text) => parse_i64(&text)
            .map(Some)
            .map_err(|reason| NetClassError::AttributeParse {
                device: device.to_string(),
                attribute: key,
                value: text,
                reason,
            }),
        None => Ok(None),
    }
}

/// Parse integer text with base auto-detection
///
/// Accepts an optional sign followed by decimal digits, `0x`/`0X` hex,
/// `0o`/`0O` or leading-zero octal, or `0b`/`0B` binary.
pub fn parse_i64(text: &str) -> std::result::Result<i64, String> {
    let (negative, body) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let (radix, digits) = if let Some(hex) = strip_prefix_ci(body, "0x") {
        (16, hex)
    } else if let Some(oct) = strip_prefix_ci(body, "0o") {
        (8, oct)
    } else if let Some(bin) = strip_prefix_ci(body, "0b") {
        (2, bin)
    } else if body.len() > 1 && body.starts_with('0') {
        (8, &body[1..])
    } else {
        (10, body)
    };

    if digits.is_empty() {
        return Err("empty integer".to_string());
    }
    // from_str_radix would accept a second sign after the prefix
    if digits.starts_with('+') || digits.starts_with('-') {
        return Err("misplaced sign".to_string());
    }

    // Parse the magnitude as u64 so that i64::MIN round-trips.
    let magnitude = u64::from_str_radix(digits, radix).map_err(|e| e.to_string())?;
    if negative {
        if magnitude > i64::MIN.unsigned_abs() {
            return Err("number too small to fit in i64".to_string());
        }
        Ok((magnitude as i64).wrapping_neg())
    } else {
        i64::try_from(magnitude).map_err(|_| "number too large to fit in i64".to_string())
    }
}

fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    match s.get(..prefix.len()) {
        Some(head) if head.eq_ignore_ascii_case(prefix) => Some(&s[prefix.len()..]),
        _ => None,
    }
}
