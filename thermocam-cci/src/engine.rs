//! Protocol engine
//!
//! [`CciEngine`] owns the bus handle and the two data buffers, so one
//! `&mut` borrow is the whole mutual-exclusion story: two callers cannot
//! interleave command framing on the shared register file. Every public
//! operation runs the same wait / stage / command / wait sequence against
//! whatever implements [`RegisterBus`].

use thermocam_hal::bus::RegisterBus;

use crate::command::{
    encode_command, encode_data_length, encode_register_select, reg, ModuleId, Opcode,
};
use crate::status::DeviceStatus;
use crate::sync::SyncState;
use crate::transfer::{self, TransferError, DATA_BUFFER_SIZE, WRITE_FRAME_SIZE};

/// Status probes allowed per protocol phase before giving up
pub const READY_RETRIES: u8 = 10;

/// Failures surfaced by the engine's public operations.
///
/// `Bus` and `ShortTransfer` are the same protocol condition - the
/// transport did not complete a transaction - kept apart so hosts can log
/// what actually happened. Every variant aborts only the current operation;
/// the engine and bus session stay usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CciError<E> {
    /// The underlying transport failed outright
    Bus(E),
    /// The transport moved fewer bytes than the transaction required
    ShortTransfer { expected: usize, actual: usize },
    /// Camera never reported booted-and-idle within the polling budget
    NotReady { booted: bool, busy: bool },
    /// Local buffer capacity or caller error, raised before any bus traffic
    Transfer(TransferError),
}

impl<E> From<TransferError> for CciError<E> {
    fn from(err: TransferError) -> Self {
        CciError::Transfer(err)
    }
}

/// Command-and-control session with one camera.
pub struct CciEngine<B> {
    bus: B,
    /// Inbound data window image, reused across reads
    rx: [u8; DATA_BUFFER_SIZE],
    /// Outbound frame staging, reused across writes
    tx: [u8; WRITE_FRAME_SIZE],
}

impl<B: RegisterBus> CciEngine<B> {
    /// Take ownership of a bus bound to the camera.
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            rx: [0; DATA_BUFFER_SIZE],
            tx: [0; WRITE_FRAME_SIZE],
        }
    }

    /// Give the bus handle back.
    pub fn release(self) -> B {
        self.bus
    }

    /// Read and decode the status register.
    pub fn probe_status(&mut self) -> Result<DeviceStatus, CciError<B::Error>> {
        Self::write_all(&mut self.bus, &encode_register_select(reg::STATUS))?;

        let mut raw = [0u8; 2];
        let count = self.bus.read(&mut raw).map_err(CciError::Bus)?;
        if count != raw.len() {
            return Err(CciError::ShortTransfer {
                expected: raw.len(),
                actual: count,
            });
        }

        Ok(DeviceStatus::from_raw(raw))
    }

    /// Poll until the camera reports booted-and-idle.
    ///
    /// `tries` is the extra-probe budget after the first; on exhaustion the
    /// error carries the flags from the last probe. Pure busy-spin, no
    /// inter-probe delay.
    pub fn wait_for_ready(&mut self, tries: u8) -> Result<DeviceStatus, CciError<B::Error>> {
        let mut state = SyncState::start(tries);
        loop {
            let status = self.probe_status()?;
            state = state.observe(&status);
            match state {
                SyncState::Ready => return Ok(status),
                SyncState::TimedOut { booted, busy } => {
                    return Err(CciError::NotReady { booted, busy })
                }
                SyncState::Polling { .. } => {}
            }
        }
    }

    /// Issue a GET and return the raw payload.
    ///
    /// The result is `2 * words` bytes of big-endian words straight from
    /// the data window; interpret them with [`transfer::word_at`]. The
    /// slice borrows the engine's inbound buffer and is valid until the
    /// next operation.
    pub fn read_data(
        &mut self,
        module: ModuleId,
        command_id: u8,
        words: u16,
    ) -> Result<&[u8], CciError<B::Error>> {
        let byte_len = transfer::read_extent(words)?;

        self.wait_for_ready(READY_RETRIES)?;

        Self::write_all(&mut self.bus, &encode_data_length(words))?;
        Self::write_all(&mut self.bus, &encode_command(module, command_id, Opcode::Get))?;

        self.wait_for_ready(READY_RETRIES)?;

        Self::write_all(&mut self.bus, &encode_register_select(reg::DATA_0))?;
        let count = self
            .bus
            .read(&mut self.rx[..byte_len])
            .map_err(CciError::Bus)?;
        if count < byte_len {
            return Err(CciError::ShortTransfer {
                expected: byte_len,
                actual: count,
            });
        }

        Ok(&self.rx[..byte_len])
    }

    /// Issue a SET carrying `words` words from `data`.
    ///
    /// Returns the camera's status code from the completion wait's final
    /// probe; negative values are camera-side command results, not
    /// transport failures.
    pub fn write_data(
        &mut self,
        module: ModuleId,
        command_id: u8,
        data: &[u8],
        words: u16,
    ) -> Result<i8, CciError<B::Error>> {
        // Stage the frame first: capacity failures must precede bus traffic
        let frame_len = transfer::pack_write(&mut self.tx, data, words)?;

        self.wait_for_ready(READY_RETRIES)?;

        Self::write_all(&mut self.bus, &self.tx[..frame_len])?;
        Self::write_all(&mut self.bus, &encode_data_length(words))?;
        Self::write_all(&mut self.bus, &encode_command(module, command_id, Opcode::Set))?;

        let status = self.wait_for_ready(READY_RETRIES)?;
        Ok(status.status_code)
    }

    /// Issue a parameterless RUN action (shutter events, resets, ...).
    pub fn run_command(
        &mut self,
        module: ModuleId,
        command_id: u8,
    ) -> Result<i8, CciError<B::Error>> {
        self.wait_for_ready(READY_RETRIES)?;

        Self::write_all(&mut self.bus, &encode_command(module, command_id, Opcode::Run))?;

        let status = self.wait_for_ready(READY_RETRIES)?;
        Ok(status.status_code)
    }

    fn write_all(bus: &mut B, data: &[u8]) -> Result<(), CciError<B::Error>> {
        let count = bus.write(data).map_err(CciError::Bus)?;
        if count != data.len() {
            return Err(CciError::ShortTransfer {
                expected: data.len(),
                actual: count,
            });
        }
        Ok(())
    }
}
