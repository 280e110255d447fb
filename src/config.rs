//! LIN master configuration.
//!
//! With the `serde` feature [`LinMasterConfig`] can be serialized; with
//! `serde_json` it can be parsed from JSON, and with `std` saved to and loaded
//! from a file:
//!
//! ```json
//! {
//!   "baud_rate": 19200,
//!   "timing": { "break_bits": 13, "delimiter_bits": 1 },
//!   "header_variant": "BreakSync",
//!   "checksum": "Enhanced",
//!   "header_timeout_cycles": 72000000
//! }
//! ```

#[cfg(all(feature = "serde", feature = "serde_json"))]
use alloc::format;

use crate::lin::{BreakTiming, ChecksumType, HeaderVariant};
use crate::{Error, Result};

/// Lowest baud rate accepted for a LIN line.
pub const MIN_BAUD_RATE: u32 = 1_000;

/// Highest baud rate allowed by LIN (20 kbit/s).
pub const MAX_BAUD_RATE: u32 = 20_000;

/// Header wait timeout: one second at a 72 MHz core clock.
pub const DEFAULT_HEADER_TIMEOUT_CYCLES: u32 = 72_000_000;

/// Settings used by [`LinMaster`](crate::LinMaster).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinMasterConfig {
    /// Line speed in bit/s.
    pub baud_rate: u32,
    /// Break field and delimiter lengths.
    pub timing: BreakTiming,
    /// Header fields generated by the line hardware.
    pub header_variant: HeaderVariant,
    /// Checksum used for responses.
    pub checksum: ChecksumType,
    /// Bound on the wait for the header-sent flag, in core clock cycles.
    pub header_timeout_cycles: u32,
}

impl Default for LinMasterConfig {
    fn default() -> Self {
        Self {
            baud_rate: 9_600,
            timing: BreakTiming::LIN_2X,
            header_variant: HeaderVariant::BreakSyncId,
            checksum: ChecksumType::Classic,
            header_timeout_cycles: DEFAULT_HEADER_TIMEOUT_CYCLES,
        }
    }
}

impl LinMasterConfig {
    /// Set the line speed.
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Set which header fields the hardware generates.
    pub fn with_header_variant(mut self, variant: HeaderVariant) -> Self {
        self.header_variant = variant;
        self
    }

    /// Set the response checksum type.
    pub fn with_checksum(mut self, checksum: ChecksumType) -> Self {
        self.checksum = checksum;
        self
    }

    /// Set break and delimiter lengths.
    pub fn with_timing(mut self, timing: BreakTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Set the header wait bound.
    pub fn with_header_timeout_cycles(mut self, cycles: u32) -> Self {
        self.header_timeout_cycles = cycles;
        self
    }

    /// Check every field against the LIN physical layer limits.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_BAUD_RATE..=MAX_BAUD_RATE).contains(&self.baud_rate) {
            return Err(Error::InvalidConfig("baud rate must be 1000..=20000"));
        }
        if !(11..=26).contains(&self.timing.break_bits) {
            return Err(Error::InvalidConfig("break field must be 11..=26 bit times"));
        }
        if !(1..=4).contains(&self.timing.delimiter_bits) {
            return Err(Error::InvalidConfig("break delimiter must be 1..=4 bit times"));
        }
        if self.header_timeout_cycles == 0 {
            return Err(Error::InvalidConfig("header timeout must be non-zero"));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration. Missing fields take their defaults.
    ///
    /// Requires the `serde` and `serde_json` features.
    #[cfg(all(feature = "serde", feature = "serde_json"))]
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LinMasterConfig = serde_json::from_str(json).map_err(|e| {
            Error::ConfigSerializationError(format!("JSON deserialization failed: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to a JSON file.
    ///
    /// Requires the `std` and `serde_json` features.
    #[cfg(all(feature = "std", feature = "serde", feature = "serde_json"))]
    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            Error::ConfigSerializationError(format!("JSON serialization failed: {}", e))
        })?;

        std::fs::write(path, json).map_err(Error::IOError)?;

        Ok(())
    }

    /// Load a configuration from a JSON file.
    ///
    /// Requires the `std` and `serde_json` features.
    #[cfg(all(feature = "std", feature = "serde", feature = "serde_json"))]
    pub fn load_from_file(path: &str) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(Error::IOError)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = LinMasterConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.baud_rate, 9_600);
        assert_eq!(config.timing.break_bits, 12);
        assert_eq!(config.timing.delimiter_bits, 1);
    }

    #[test]
    fn test_rejects_out_of_range() {
        let too_fast = LinMasterConfig::default().with_baud_rate(115_200);
        assert!(matches!(too_fast.validate(), Err(Error::InvalidConfig(_))));

        let short_break = LinMasterConfig::default().with_timing(BreakTiming {
            break_bits: 8,
            delimiter_bits: 1,
        });
        assert!(short_break.validate().is_err());

        let no_delimiter = LinMasterConfig::default().with_timing(BreakTiming {
            break_bits: 13,
            delimiter_bits: 0,
        });
        assert!(no_delimiter.validate().is_err());

        let no_timeout = LinMasterConfig::default().with_header_timeout_cycles(0);
        assert!(no_timeout.validate().is_err());
    }

    #[test]
    #[cfg(all(feature = "serde", feature = "serde_json"))]
    fn test_from_json_partial() {
        let config =
            LinMasterConfig::from_json(r#"{ "baud_rate": 19200, "checksum": "Enhanced" }"#)
                .unwrap();
        assert_eq!(config.baud_rate, 19_200);
        assert_eq!(config.checksum, ChecksumType::Enhanced);
        assert_eq!(config.header_variant, HeaderVariant::BreakSyncId);
    }

    #[test]
    #[cfg(all(feature = "serde", feature = "serde_json"))]
    fn test_from_json_rejects_invalid() {
        assert!(matches!(
            LinMasterConfig::from_json(r#"{ "baud_rate": 500000 }"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            LinMasterConfig::from_json(r#"{ "header_variant": "Nothing" }"#),
            Err(Error::ConfigSerializationError(_))
        ));
    }
}
