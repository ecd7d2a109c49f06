//! Command-and-Control Interface (CCI) for Lepton-class thermal cameras
//!
//! The camera exposes its subsystems (gain control, system status, video,
//! OEM, radiometry) through a small register file on a two-wire bus. A host
//! drives it by writing a 16-bit command word, moving 16-bit data words
//! through a data window, and polling a status register that reports the
//! camera's boot and busy state.
//!
//! # Register Map
//!
//! ```text
//! ┌─────────────┬─────────┬────────────────────────────────────┐
//! │ Register    │ Address │ Contents                           │
//! ├─────────────┼─────────┼────────────────────────────────────┤
//! │ Power       │ 0x0000  │ power control                      │
//! │ Status      │ 0x0002  │ status code + boot/busy flags      │
//! │ Command     │ 0x0004  │ module id, protection bit, opcode  │
//! │ Data length │ 0x0006  │ transfer length in words (BE)      │
//! │ Data 0      │ 0x0008  │ data window, up to 512 words       │
//! └─────────────┴─────────┴────────────────────────────────────┘
//! ```
//!
//! Every operation follows the same shape: wait until the camera reports
//! booted-and-idle, stage the transfer, issue the command word, wait again.
//! [`engine::CciEngine`] owns that sequence; the other modules are the pure
//! pieces it is built from.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod command;
pub mod engine;
pub mod status;
pub mod sync;
pub mod transfer;

pub use command::{ModuleId, Opcode};
pub use engine::{CciEngine, CciError, READY_RETRIES};
pub use status::DeviceStatus;
pub use transfer::{word_at, TransferError, DATA_BUFFER_SIZE, DATA_WORDS_MAX};
