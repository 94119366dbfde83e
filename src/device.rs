//! rusb-backed access to the sensor: locate, resolve endpoints, transfer.

use std::time::Duration;

use rusb::{Context, DeviceHandle, UsbContext};

use crate::endpoints::{select_endpoint_pair, EndpointPair};
use crate::error::{Error, Result};
use crate::protocol::{PRODUCT_ID, VENDOR_ID};

const TRANSFER_TIMEOUT: Duration = Duration::from_secs(1);

/// An opened sensor with its interface claimed. Dropping it releases the
/// interface and closes the handle, on every exit path.
pub struct Sensor {
    handle: DeviceHandle<Context>,
    endpoints: EndpointPair,
}

impl Sensor {
    /// Locate the sensor by vendor/product ID, resolve its endpoint pair
    /// and claim the interface.
    ///
    /// The first matching device wins; running several sensors of the same
    /// model at once is not supported.
    pub fn open(context: &Context) -> Result<Self> {
        let handle = context
            .open_device_with_vid_pid(VENDOR_ID, PRODUCT_ID)
            .ok_or(Error::DeviceNotFound {
                vendor_id: VENDOR_ID,
                product_id: PRODUCT_ID,
            })?;
        log::info!("device {VENDOR_ID:04x}:{PRODUCT_ID:04x} found");

        let config = handle
            .device()
            .active_config_descriptor()
            .map_err(Error::Setup)?;
        let endpoints = select_endpoint_pair(config.interfaces().flat_map(|interface| {
            interface.descriptors().map(|descriptor| {
                (
                    descriptor.interface_number(),
                    descriptor
                        .endpoint_descriptors()
                        .map(|endpoint| endpoint.address())
                        .collect::<Vec<_>>(),
                )
            })
        }))
        .ok_or(Error::EndpointsNotFound)?;
        log::info!(
            "endpoints found on interface {}: out 0x{:02x}, in 0x{:02x}",
            endpoints.interface,
            endpoints.out_address,
            endpoints.in_address
        );

        let mut sensor = Sensor { handle, endpoints };
        sensor.detach_kernel_driver();
        sensor
            .handle
            .claim_interface(sensor.endpoints.interface)
            .map_err(Error::Setup)?;
        Ok(sensor)
    }

    // usbhid binds the sensor on Linux; take the interface over before
    // transferring. A failed detach is a warning, not an abort.
    #[cfg(target_os = "linux")]
    fn detach_kernel_driver(&mut self) {
        let interface = self.endpoints.interface;
        match self.handle.kernel_driver_active(interface) {
            Ok(true) => {
                log::info!("detaching kernel driver from interface {interface}");
                if let Err(e) = self.handle.detach_kernel_driver(interface) {
                    log::warn!("failed to detach kernel driver: {e}");
                }
            }
            Ok(false) => {}
            Err(e) => log::warn!("could not query kernel driver state: {e}"),
        }
    }

    #[cfg(not(target_os = "linux"))]
    fn detach_kernel_driver(&mut self) {}

    /// One request/response transaction: write the command to the OUT
    /// endpoint, then block on an interrupt read from the IN endpoint.
    /// Returns the number of bytes read.
    pub fn exchange(&mut self, command: &[u8], report: &mut [u8]) -> Result<usize> {
        self.handle
            .write_interrupt(self.endpoints.out_address, command, TRANSFER_TIMEOUT)
            .map_err(Error::Usb)?;
        let len = self
            .handle
            .read_interrupt(self.endpoints.in_address, report, TRANSFER_TIMEOUT)
            .map_err(Error::Usb)?;
        if len == 0 {
            return Err(Error::EmptyRead);
        }
        Ok(len)
    }
}

impl Drop for Sensor {
    fn drop(&mut self) {
        if let Err(e) = self.handle.release_interface(self.endpoints.interface) {
            log::debug!("release_interface: {e}");
        }
    }
}
