//! Status register decoding
//!
//! The 2-byte status register is the camera's only feedback channel: byte 0
//! carries a signed result code for the last command, byte 1 carries the
//! boot/busy flags the host polls before touching any other register.

/// Decoded contents of the status register.
///
/// Recomputed on every probe; never cached across commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceStatus {
    /// Result code of the most recent command (negative = camera-side error)
    pub status_code: i8,
    /// Camera finished its boot sequence
    pub booted: bool,
    /// Camera is running its boot ROM rather than main firmware
    pub boot_mode: bool,
    /// A previous command is still executing
    pub busy: bool,
}

impl DeviceStatus {
    /// Decode the raw register bytes.
    ///
    /// Byte 0 is the signed status code. Byte 1: bit 2 = booted,
    /// bit 1 = boot mode, bit 0 = busy.
    pub fn from_raw(raw: [u8; 2]) -> Self {
        Self {
            status_code: raw[0] as i8,
            booted: (raw[1] & (1 << 2)) != 0,
            boot_mode: (raw[1] & (1 << 1)) != 0,
            busy: (raw[1] & 1) != 0,
        }
    }

    /// Booted and idle - safe to issue a command or move data.
    pub fn is_ready(&self) -> bool {
        self.booted && !self.busy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_decoding() {
        let status = DeviceStatus::from_raw([0x00, 0x04]);
        assert!(status.booted);
        assert!(!status.boot_mode);
        assert!(!status.busy);
        assert!(status.is_ready());

        let status = DeviceStatus::from_raw([0x00, 0x05]);
        assert!(status.booted);
        assert!(status.busy);
        assert!(!status.is_ready());

        let status = DeviceStatus::from_raw([0x00, 0x02]);
        assert!(!status.booted);
        assert!(status.boot_mode);
        assert!(!status.is_ready());
    }

    #[test]
    fn test_status_code_is_signed() {
        // 0xFB = -5, the camera's "command not allowed" class of result
        let status = DeviceStatus::from_raw([0xFB, 0x04]);
        assert_eq!(status.status_code, -5);

        let status = DeviceStatus::from_raw([0x00, 0x04]);
        assert_eq!(status.status_code, 0);
    }

    #[test]
    fn test_unbooted_camera_not_ready() {
        // Fresh power-on: nothing set yet
        let status = DeviceStatus::from_raw([0x00, 0x00]);
        assert!(!status.is_ready());
    }
}
