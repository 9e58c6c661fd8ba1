//! [`ByteStore`] over an I2C serial EEPROM (24LCxx family)

use embedded_hal::i2c::I2c;
use heapless::Vec;
use log::trace;

use crate::stream::{ByteStore, DEFAULT_BLOCK_SIZE};

/// Largest block held in the local receive buffer
pub const MAX_BLOCK: u8 = 32;

/// EEPROM with a 16-bit memory address, read sequentially.
///
/// `seek` writes the big-endian memory address; each block request is
/// one bus read into a fixed buffer that `read_next` then drains.
pub struct I2cEeprom<I2C> {
    i2c: I2C,
    device: u8,
    block_size: u8,
    address: u16,
    buffer: Vec<u8, { MAX_BLOCK as usize }>,
    position: usize,
}

impl<I2C: I2c> I2cEeprom<I2C> {
    /// `device` is the 7-bit bus address (0x50 for a 24LC256 with A0..A2 low)
    pub fn new(i2c: I2C, device: u8) -> Self {
        Self {
            i2c,
            device,
            block_size: DEFAULT_BLOCK_SIZE,
            address: 0,
            buffer: Vec::new(),
            position: 0,
        }
    }

    /// Transfer limit per request, capped at [`MAX_BLOCK`]
    pub fn with_block_size(mut self, block_size: u8) -> Self {
        self.block_size = block_size.min(MAX_BLOCK);
        self
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> ByteStore for I2cEeprom<I2C> {
    type Error = I2C::Error;

    fn block_size(&self) -> u8 {
        self.block_size
    }

    fn seek(&mut self, address: u16) -> Result<(), Self::Error> {
        self.i2c.write(self.device, &address.to_be_bytes())?;
        self.address = address;
        self.buffer.clear();
        self.position = 0;
        Ok(())
    }

    fn request_block(&mut self, count: u8) -> Result<(), Self::Error> {
        let count = count.min(MAX_BLOCK);
        self.buffer.clear();
        self.position = 0;
        // Cannot fail: count is capped at the buffer capacity.
        let _ = self.buffer.resize(usize::from(count), 0);
        trace!("eeprom read {} bytes at {:#06x}", count, self.address);

        if let Err(e) = self.i2c.read(self.device, &mut self.buffer) {
            self.buffer.clear();
            return Err(e);
        }
        self.address = self.address.wrapping_add(u16::from(count));
        Ok(())
    }

    fn read_next(&mut self) -> Option<u8> {
        let byte = self.buffer.get(self.position).copied()?;
        self.position += 1;
        Some(byte)
    }
}
