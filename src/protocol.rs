//! Byte-level protocol for TEMPerHUM-class sensors.
//!
//! The device speaks fixed 8-byte HID reports in both directions. One command
//! is in active use (temperature/humidity request); a second one identified
//! from packet captures is kept as a constant for future use.

pub const VENDOR_ID: u16 = 0x3553;
pub const PRODUCT_ID: u16 = 0xa001;

/// HID report payload size, both directions.
pub const REPORT_SIZE: usize = 8;

/// Request the current temperature/humidity sample.
pub const CMD_READ_SENSOR: [u8; REPORT_SIZE] = [0x01, 0x80, 0x33, 0x01, 0x00, 0x00, 0x00, 0x00];

/// Request the model name and firmware version. Not sent by the poll loop.
pub const CMD_READ_FIRMWARE: [u8; REPORT_SIZE] = [0x01, 0x86, 0xff, 0x01, 0x00, 0x00, 0x00, 0x00];

/// One decoded sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Temperature in degrees Celsius, two decimal digits of precision.
    pub temperature_c: f64,
    /// Relative humidity in percent, two decimal digits of precision.
    pub humidity_pct: f64,
}

/// Decode a raw report into a reading.
///
/// Bytes 2..4 hold the temperature and bytes 4..6 the relative humidity,
/// both as big-endian 16-bit values scaled by 100. Bytes 0, 1, 6 and 7
/// belong to other report types and are ignored. Reports shorter than
/// [`REPORT_SIZE`] yield `None`, never a partial reading.
///
/// The raw values are reported verbatim; no range validation happens here.
pub fn decode(report: &[u8]) -> Option<Reading> {
    if report.len() < REPORT_SIZE {
        return None;
    }
    let temp_raw = u16::from_be_bytes([report[2], report[3]]);
    let humidity_raw = u16::from_be_bytes([report[4], report[5]]);
    Some(Reading {
        temperature_c: f64::from(temp_raw) / 100.0,
        humidity_pct: f64::from(humidity_raw) / 100.0,
    })
}

/// Raw report bytes as a compact hex string for diagnostics.
pub fn hex_str(report: &[u8]) -> String {
    report.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_reports_yield_no_reading() {
        let report = [0x01, 0x80, 0x09, 0x29, 0x02, 0x8f, 0x00, 0x00];
        for len in 0..REPORT_SIZE {
            assert_eq!(decode(&report[..len]), None, "length {len}");
        }
    }

    #[test]
    fn decodes_reference_report() {
        let report = [0x80, 0x40, 0x09, 0x29, 0x02, 0x8f, 0x00, 0x00];
        let reading = decode(&report).unwrap();
        assert_eq!(reading.temperature_c, 23.45);
        assert_eq!(reading.humidity_pct, 6.55);
    }

    #[test]
    fn unused_bytes_do_not_affect_the_reading() {
        let a = decode(&[0x00, 0x00, 0x0a, 0x00, 0x13, 0x88, 0x00, 0x00]).unwrap();
        let b = decode(&[0xff, 0x17, 0x0a, 0x00, 0x13, 0x88, 0xde, 0xad]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.temperature_c, 25.60);
        assert_eq!(a.humidity_pct, 50.00);
    }

    #[test]
    fn accepts_reports_longer_than_eight_bytes() {
        let report = [0x00, 0x00, 0x09, 0x29, 0x02, 0x8f, 0x00, 0x00, 0xaa];
        let reading = decode(&report).unwrap();
        assert_eq!(reading.temperature_c, 23.45);
    }

    #[test]
    fn out_of_range_values_are_reported_verbatim() {
        let report = [0x00, 0x00, 0xff, 0xff, 0xff, 0xff, 0x00, 0x00];
        let reading = decode(&report).unwrap();
        assert_eq!(reading.temperature_c, 655.35);
        assert_eq!(reading.humidity_pct, 655.35);
    }

    #[test]
    fn hex_str_formats_each_byte() {
        assert_eq!(hex_str(&CMD_READ_SENSOR), "0180330100000000");
        assert_eq!(hex_str(&CMD_READ_FIRMWARE), "0186ff0100000000");
    }
}
