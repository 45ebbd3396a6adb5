//! USB control-transfer transport.
//!
//! The device enumerates under a shared low-volume vendor/product
//! identifier pair, so discovery optionally disambiguates by the
//! manufacturer and product string descriptors. Every command frame rides
//! the data stage of a single vendor-defined OUT control transfer; the
//! device never answers, so a completed transfer of the full frame is the
//! only success signal.

use std::time::Duration;

use rusb::{Direction, GlobalContext, Recipient, RequestType};

use crate::client::{ClientError, Transport, TransportError};
use crate::protocol::{FRAME_LEN, REQUEST_SET_DISPLAY};

/// Shared vendor identifier the device enumerates under.
pub const VENDOR_ID: u16 = 0x16c0;

/// Shared product identifier the device enumerates under.
pub const PRODUCT_ID: u16 = 0x05df;

const TRANSFER_TIMEOUT: Duration = Duration::from_millis(100);

/// A [`Transport`] over a vendor control endpoint.
pub struct UsbTransport {
    handle: rusb::DeviceHandle<GlobalContext>,
}

impl UsbTransport {
    /// Opens the first device matching the identifier pair.
    pub fn open() -> Result<Self, ClientError> {
        Self::open_matching(None, None)
    }

    /// Opens the first device matching the identifier pair and, when
    /// given, the manufacturer and product string descriptors.
    ///
    /// Candidates that cannot be opened or read (insufficient permissions,
    /// unplugged mid-scan) are skipped, not fatal; only an empty scan
    /// reports [`ClientError::DeviceNotFound`].
    pub fn open_matching(
        manufacturer: Option<&str>,
        product: Option<&str>,
    ) -> Result<Self, ClientError> {
        for device in rusb::devices().map_err(TransportError::from)?.iter() {
            let Ok(descriptor) = device.device_descriptor() else {
                continue;
            };
            if descriptor.vendor_id() != VENDOR_ID || descriptor.product_id() != PRODUCT_ID {
                continue;
            }

            let handle = match device.open() {
                Ok(handle) => handle,
                Err(error) => {
                    log::debug!(
                        "skipping candidate at bus {} address {}: {}",
                        device.bus_number(),
                        device.address(),
                        error
                    );
                    continue;
                }
            };

            if let Some(wanted) = manufacturer {
                match handle.read_manufacturer_string_ascii(&descriptor) {
                    Ok(actual) if actual == wanted => {}
                    _ => continue,
                }
            }
            if let Some(wanted) = product {
                match handle.read_product_string_ascii(&descriptor) {
                    Ok(actual) if actual == wanted => {}
                    _ => continue,
                }
            }

            log::info!(
                "opened display at bus {} address {}",
                device.bus_number(),
                device.address()
            );
            return Ok(Self { handle });
        }

        Err(ClientError::DeviceNotFound)
    }
}

impl Transport for UsbTransport {
    fn send(&mut self, frame: &[u8; FRAME_LEN]) -> Result<(), TransportError> {
        let request_type = rusb::request_type(Direction::Out, RequestType::Vendor, Recipient::Device);
        let written = self.handle.write_control(
            request_type,
            REQUEST_SET_DISPLAY,
            0,
            0,
            frame,
            TRANSFER_TIMEOUT,
        )?;
        if written != frame.len() {
            return Err(TransportError::ShortWrite {
                written,
                expected: frame.len(),
            });
        }
        Ok(())
    }
}
