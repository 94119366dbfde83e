//! Poll a TEMPerHUM-class USB HID sensor for temperature and humidity.
//!
//! The pipeline is linear: find the device by vendor/product ID, resolve an
//! IN/OUT endpoint pair on its active configuration, write a fixed 8-byte
//! command, read back an 8-byte report and decode two big-endian fields into
//! degrees Celsius and percent relative humidity.

pub mod device;
pub mod endpoints;
pub mod error;
pub mod poller;
pub mod protocol;

pub use error::{Error, Result};
