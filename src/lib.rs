#![no_std]
#![forbid(unsafe_code)]

//! # lin-master
//!
//! A `no_std` library for building the frames a LIN (Local Interconnect Network)
//! bus master sends over a UART.
//!
//! LIN is a single-master serial bus used in automotive body electronics. Every
//! frame starts with a header issued by the master (break field, sync byte 0x55,
//! protected identifier) followed by a response of up to 8 data bytes and a checksum.
//!
//! ## Features
//!
//! - **Encoding**: protected identifiers, classic and enhanced checksums, header and
//!   response byte layout, all pure and allocation-free
//! - **Sequencing**: [`lin::FrameBuilder`] enforces header-before-response
//! - **Driving**: [`LinMaster`] issues headers and responses over any [`LinTransmit`]
//!   line, with an optional [`HeaderWait`] bounded by a timeout
//! - **Verification**: check captured frames against their parity and checksum
//!
//! ## Quick Start
//!
//! ```
//! use lin_master::lin::{build_header, build_response, ChecksumType, HeaderVariant};
//!
//! // Break issued by hardware, sync and protected ID sent as data
//! let header = build_header(0x30, HeaderVariant::BreakOnly)?;
//! assert_eq!(header.pending_bytes(), &[0x55, 0xF0]);
//!
//! let response = build_response(&[1, 2, 3, 4, 5, 6, 7, 8], ChecksumType::Classic, header.pid())?;
//! assert_eq!(response.checksum(), 0xDB);
//! # Ok::<(), lin_master::Error>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`lin`] | Parity, checksum, header and response encoding |
//! | [`transport`] | Transmission and timing collaborator traits |
//! | [`master`] | [`LinMaster`] driver |
//! | [`config`] | [`LinMasterConfig`] and its JSON loading |
//! | [`error`] | Error types and [`Result`] alias |
//!
//! ## Cargo Features
//!
//! - `std` (default): file-based configuration loading, enables `alloc`, `serde`, `serde_json`
//! - `alloc`: [`RecordingTransmitter`] and `Vec` conversions
//! - `serde`: `Serialize`/`Deserialize` for configuration types
//! - `defmt` / `log`: diagnostics through either logging backend
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T>`]. Rejected input and transmission
//! failures are separate [`Error`] variants; see [`Error::is_transmit`].

#[cfg(any(feature = "std", test))]
extern crate std;

#[cfg(any(feature = "alloc", feature = "serde_json", test))]
extern crate alloc;

#[macro_use]
mod fmt;

pub mod config;
pub mod error;
pub mod lin;
pub mod master;
pub mod transport;

// Re-export commonly used types at the crate root
pub use config::LinMasterConfig;
pub use error::{Error, Result, TransmitError};
pub use master::LinMaster;
#[cfg(feature = "alloc")]
pub use transport::{RecordingTransmitter, TxEvent};
pub use transport::{HeaderWait, LinTransmit, NoWait, WaitStatus};
