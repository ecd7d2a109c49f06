//! Register bus abstractions
//!
//! The camera exposes its command interface as a small register file behind
//! a two-wire bus. Everything above this layer deals in whole transactions
//! against one fixed peripheral, so the trait bakes the address in and only
//! moves bytes.

use embedded_hal::i2c::{I2c, SevenBitAddress};

/// Duplex byte channel to one fixed peripheral.
///
/// A successful call reports how many bytes actually moved; callers treat a
/// short count the same way they treat `Err` (the camera's register file
/// gives no meaning to a half-written command).
pub trait RegisterBus {
    /// Error type for bus operations
    type Error;

    /// Write bytes to the peripheral, returning the count written.
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Read bytes from the peripheral into `buf`, returning the count read.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

/// Bus configuration
#[derive(Debug, Clone, Copy)]
pub struct BusConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            frequency: 400_000, // 400kHz fast mode
        }
    }
}

impl BusConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self { frequency: 400_000 };

    /// Fast mode plus (1 MHz) - the camera's rated maximum
    pub const FAST_PLUS: Self = Self {
        frequency: 1_000_000,
    };
}

/// [`RegisterBus`] over any `embedded-hal` I2C implementation.
///
/// Binds a bus handle to the camera's 7-bit address so the protocol engine
/// never sees addressing. `embedded-hal` transactions are all-or-nothing, so
/// a completed call always moved the full byte count.
pub struct I2cPort<I> {
    i2c: I,
    address: SevenBitAddress,
}

impl<I> I2cPort<I> {
    /// Bind an I2C bus handle to a fixed peripheral address.
    pub fn new(i2c: I, address: SevenBitAddress) -> Self {
        Self { i2c, address }
    }

    /// Release the underlying bus handle.
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> RegisterBus for I2cPort<I> {
    type Error = I::Error;

    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        self.i2c.write(self.address, data)?;
        Ok(data.len())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.i2c.read(self.address, buf)?;
        Ok(buf.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::ErrorType;

    /// Records the last transaction issued through the embedded-hal side.
    struct EchoI2c {
        last_address: u8,
        last_write: [u8; 8],
        last_write_len: usize,
        fill: u8,
    }

    impl EchoI2c {
        fn new(fill: u8) -> Self {
            Self {
                last_address: 0,
                last_write: [0; 8],
                last_write_len: 0,
                fill,
            }
        }
    }

    impl ErrorType for EchoI2c {
        type Error = core::convert::Infallible;
    }

    impl I2c for EchoI2c {
        fn transaction(
            &mut self,
            address: SevenBitAddress,
            operations: &mut [embedded_hal::i2c::Operation<'_>],
        ) -> Result<(), Self::Error> {
            self.last_address = address;
            for op in operations {
                match op {
                    embedded_hal::i2c::Operation::Write(data) => {
                        self.last_write[..data.len()].copy_from_slice(data);
                        self.last_write_len = data.len();
                    }
                    embedded_hal::i2c::Operation::Read(buf) => {
                        buf.fill(self.fill);
                    }
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_write_targets_bound_address() {
        let mut port = I2cPort::new(EchoI2c::new(0), 0x2A);

        let count = port.write(&[0x00, 0x02]).unwrap();
        assert_eq!(count, 2);

        let i2c = port.release();
        assert_eq!(i2c.last_address, 0x2A);
        assert_eq!(&i2c.last_write[..i2c.last_write_len], &[0x00, 0x02]);
    }

    #[test]
    fn test_read_reports_full_count() {
        let mut port = I2cPort::new(EchoI2c::new(0xA5), 0x2A);

        let mut buf = [0u8; 4];
        let count = port.read(&mut buf).unwrap();

        assert_eq!(count, 4);
        assert_eq!(buf, [0xA5; 4]);
    }
}
