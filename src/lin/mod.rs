//! LIN master frame encoding.
//!
//! This module turns frame identifiers and payloads into the bytes a LIN master
//! places on the bus. Everything here is pure and allocation-free, so it may be
//! called from interrupt handlers as well as from thread mode.
//!
//! # Features
//!
//! - Protected ID calculation with parity bits
//! - Classic (LIN 1.x) and Enhanced (LIN 2.x) checksum support
//! - Header layouts for UARTs that generate break, break+sync or the full header
//! - Sequenced header/response construction with [`FrameBuilder`]
//! - Verification of captured frames
//!
//! # LIN Protocol Overview
//!
//! LIN is a low-cost, single-wire serial network used in automotive applications
//! for communication between sensors, actuators, and ECUs. Key characteristics:
//!
//! - Single master, multiple slave architecture
//! - Frame IDs 0-59 for unconditional frames, 60-61 for diagnostics
//! - Maximum 8 bytes of data per frame
//! - Baud rates: typically 9600, 10400, or 19200 bps
//!
//! # Example
//!
//! ```
//! use lin_master::lin::{build_header, build_response, ChecksumType, HeaderVariant};
//!
//! let header = build_header(0x30, HeaderVariant::BreakOnly)?;
//! assert_eq!(header.pending_bytes(), &[0x55, 0xF0]);
//!
//! let response = build_response(&[0x01, 0x02], ChecksumType::Enhanced, header.pid())?;
//! assert!(response.verify(header.pid()));
//! # Ok::<(), lin_master::Error>(())
//! ```

mod builder;
mod checksum;
mod frame;
mod header;
mod pid;
mod response;

pub use builder::{FrameBuilder, FrameState};
pub use checksum::{ChecksumType, checksum, compute_checksum, verify_response};
pub use frame::{LinFrame, MAX_FRAME_LEN};
pub use header::{
    BreakDirective, BreakTiming, Header, HeaderVariant, SYNC_BYTE, build_header,
    build_header_with,
};
pub use pid::{ID_MASK, MAX_LIN_ID, ProtectedId, protected_id};
pub use response::{MAX_LIN_DATA_LEN, MAX_RESPONSE_LEN, Response, build_response};
