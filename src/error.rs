use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong during a run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("device {vendor_id:04x}:{product_id:04x} not found")]
    DeviceNotFound { vendor_id: u16, product_id: u16 },

    #[error("no interface with both an IN and an OUT endpoint")]
    EndpointsNotFound,

    /// Descriptor or interface-claim failure while setting the device up.
    #[error("usb setup failed: {0}")]
    Setup(#[source] rusb::Error),

    /// Transfer-level failure on an otherwise working device.
    #[error("usb transfer failed: {0}")]
    Usb(#[source] rusb::Error),

    #[error("no data received")]
    EmptyRead,

    #[error("report too short to decode: {len} bytes")]
    ShortReport { len: usize },

    #[error("failed to write reading: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Setup-class and output failures end the run; transfer and decode
    /// failures only cost the current cycle.
    pub fn aborts_run(&self) -> bool {
        match self {
            Error::DeviceNotFound { .. }
            | Error::EndpointsNotFound
            | Error::Setup(_)
            | Error::Io(_) => true,
            Error::Usb(_) | Error::EmptyRead | Error::ShortReport { .. } => false,
        }
    }
}
