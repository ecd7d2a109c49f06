//! Thermocam Bus Abstraction Layer
//!
//! This crate defines the transport boundary between the camera protocol
//! engine and whatever carries its bytes. The engine only ever talks to a
//! [`bus::RegisterBus`], so the same protocol code runs against real I2C
//! hardware or a scripted test double.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Protocol engine (thermocam-cci)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  thermocam-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  I2cPort over any embedded-hal I2C      │
//! │  (embassy-rp, linux-embedded-hal, ...)  │
//! └─────────────────────────────────────────┘
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod bus;

// Re-export key items at crate root for convenience
pub use bus::{BusConfig, I2cPort, RegisterBus};
