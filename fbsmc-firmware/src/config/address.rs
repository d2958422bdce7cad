//! Bus address persistence
//!
//! One byte under [`StorageKey::BusAddress`]. Anything missing or out of
//! range reads back as the configured default.

use defmt::*;

use fbsmc_hal::{BusAddress, FlashError, FlashStorage, StorageKey};
use fbsmc_hal_rp2040::flash::Rp2040FlashStorage;

/// Flash-backed bus address store
pub struct AddressStore<'d> {
    storage: Rp2040FlashStorage<'d>,
}

impl<'d> AddressStore<'d> {
    pub fn new(storage: Rp2040FlashStorage<'d>) -> Self {
        Self { storage }
    }

    /// Read the persisted address, or `default` if there is none
    pub async fn load_persisted_address(&mut self, default: BusAddress) -> BusAddress {
        let mut buffer = [0u8; 1];
        match self.storage.read(StorageKey::BusAddress, &mut buffer).await {
            Ok(1) => match BusAddress::new(buffer[0]) {
                Some(address) => {
                    info!("Loaded bus address {:#x} from flash", address.get());
                    address
                }
                None => {
                    warn!("Stored bus address {} out of range, using default", buffer[0]);
                    default
                }
            },
            Ok(len) => {
                warn!("Stored bus address has length {}, using default", len);
                default
            }
            Err(FlashError::NotFound) => {
                debug!("No stored bus address, using default");
                default
            }
            Err(e) => {
                warn!("Failed to read bus address: {:?}, using default", e);
                default
            }
        }
    }

    /// Persist a new address
    pub async fn store_persisted_address(
        &mut self,
        address: BusAddress,
    ) -> Result<(), FlashError> {
        self.storage
            .write(StorageKey::BusAddress, &[address.get()])
            .await?;
        info!("Stored bus address {:#x}", address.get());
        Ok(())
    }
}
