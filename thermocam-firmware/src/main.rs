//! Thermocam demonstration firmware
//!
//! Brings up a Lepton-class thermal camera module on a Raspberry Pi Pico
//! (I2C1, SDA on GPIO14, SCL on GPIO15) and walks its command interface:
//! enables AGC, reads the setting back, then queries the AGC region of
//! interest, histogram statistics and dampening factor, and the SYS
//! shutter position. Results go out over defmt.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::i2c::{self, I2c};
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use thermocam_cci::{word_at, CciEngine, ModuleId, READY_RETRIES};
use thermocam_hal::bus::{BusConfig, I2cPort};

/// The camera's fixed 7-bit bus address
const CAMERA_ADDRESS: u8 = 0x2A;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Thermocam firmware starting...");

    let p = embassy_rp::init(Default::default());

    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = BusConfig::FAST.frequency;
    let i2c = I2c::new_blocking(p.I2C1, p.PIN_15, p.PIN_14, i2c_config);
    info!("I2C initialized at {} Hz", BusConfig::FAST.frequency);

    let mut engine = CciEngine::new(I2cPort::new(i2c, CAMERA_ADDRESS));

    // The camera needs most of a second from power-on before it reports
    // booted; give it that before the first poll burns its retry budget.
    Timer::after_millis(1000).await;

    match engine.wait_for_ready(READY_RETRIES) {
        Ok(status) => info!("camera ready, status code {}", status.status_code),
        Err(e) => {
            error!("camera never became ready: {}", e);
            return;
        }
    }

    // Enable AGC: one 32-bit attribute, sent as two big-endian words
    match engine.write_data(ModuleId::Agc, 0x00, &[0x00, 0x00, 0x00, 0x01], 2) {
        Ok(code) => info!("set AGC enable: {}", code),
        Err(e) => error!("AGC enable write failed: {}", e),
    }

    match engine.read_data(ModuleId::Agc, 0x00, 2) {
        Ok(data) => {
            if let Some(enabled) = word_at(data, 1) {
                info!("AGC enabled: {}", enabled);
            }
        }
        Err(e) => error!("AGC enable read failed: {}", e),
    }

    match engine.read_data(ModuleId::Agc, 0x08, 4) {
        Ok(data) => {
            if let (Some(start_col), Some(start_row), Some(end_col), Some(end_row)) = (
                word_at(data, 0),
                word_at(data, 1),
                word_at(data, 2),
                word_at(data, 3),
            ) {
                info!(
                    "AGC ROI: start col {} start row {} end col {} end row {}",
                    start_col, start_row, end_col, end_row
                );
            }
        }
        Err(e) => error!("AGC ROI read failed: {}", e),
    }

    match engine.read_data(ModuleId::Agc, 0x0C, 4) {
        Ok(data) => {
            if let (Some(min), Some(max), Some(mean), Some(pixels)) = (
                word_at(data, 0),
                word_at(data, 1),
                word_at(data, 2),
                word_at(data, 3),
            ) {
                info!(
                    "AGC histogram: min {} max {} mean {} pixels {}",
                    min, max, mean, pixels
                );
            }
        }
        Err(e) => error!("AGC histogram read failed: {}", e),
    }

    match engine.read_data(ModuleId::Agc, 0x24, 1) {
        Ok(data) => {
            if let Some(dampening) = word_at(data, 0) {
                info!("AGC dampening factor: {}", dampening);
            }
        }
        Err(e) => error!("AGC dampening read failed: {}", e),
    }

    match engine.read_data(ModuleId::Sys, 0x38, 2) {
        Ok(data) => {
            if let Some(position) = word_at(data, 1) {
                info!("shutter position: {}", position);
            }
        }
        Err(e) => error!("shutter position read failed: {}", e),
    }

    info!("demonstration sequence complete");

    // Nothing left to drive - keep the executor alive for RTT
    loop {
        Timer::after_secs(60).await;
        trace!("main loop heartbeat");
    }
}
