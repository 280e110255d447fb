//! Transmission and timing collaborators.
//!
//! The encoder never touches hardware. A [`LinTransmit`] implementation clocks
//! bytes and break conditions onto the serial line; a [`HeaderWait`]
//! implementation blocks until the hardware reports the header as sent.
//! [`RecordingTransmitter`] keeps everything in memory for tests and host tools.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use crate::error::TransmitError;
use crate::lin::BreakDirective;

/// Serial line able to send LIN break conditions and data bytes.
pub trait LinTransmit {
    /// Issue the hardware part of a header.
    ///
    /// The directive's variant tells which of break, sync and protected ID the line
    /// generates itself; any remaining header bytes follow through [`write`](Self::write).
    fn send_break(&mut self, directive: &BreakDirective) -> Result<(), TransmitError>;

    /// Transmit bytes in order.
    fn write(&mut self, bytes: &[u8]) -> Result<(), TransmitError>;

    /// Reconfigure the line speed.
    fn set_baud_rate(&mut self, _baud_rate: u32) -> Result<(), TransmitError> {
        Ok(())
    }

    /// Whether the line can emit break, sync and protected ID as one hardware header.
    fn supports_header_id(&self) -> bool {
        true
    }
}

impl<T: LinTransmit + ?Sized> LinTransmit for &mut T {
    fn send_break(&mut self, directive: &BreakDirective) -> Result<(), TransmitError> {
        (**self).send_break(directive)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), TransmitError> {
        (**self).write(bytes)
    }

    fn set_baud_rate(&mut self, baud_rate: u32) -> Result<(), TransmitError> {
        (**self).set_baud_rate(baud_rate)
    }

    fn supports_header_id(&self) -> bool {
        (**self).supports_header_id()
    }
}

/// Outcome of a bounded wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WaitStatus {
    /// The hardware reported completion.
    Complete,
    /// The timeout elapsed first.
    TimedOut,
}

/// Waits for the hardware "header sent" flag.
pub trait HeaderWait {
    /// Block until the header is on the line or `timeout_cycles` core clock cycles pass.
    fn wait_header_sent(&mut self, timeout_cycles: u32) -> WaitStatus;
}

/// A [`HeaderWait`] for lines whose `send_break` already blocks until done.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoWait;

impl HeaderWait for NoWait {
    fn wait_header_sent(&mut self, _timeout_cycles: u32) -> WaitStatus {
        WaitStatus::Complete
    }
}

impl<F: FnMut(u32) -> WaitStatus> HeaderWait for F {
    fn wait_header_sent(&mut self, timeout_cycles: u32) -> WaitStatus {
        self(timeout_cycles)
    }
}

/// A line event captured by [`RecordingTransmitter`].
#[cfg(feature = "alloc")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxEvent {
    /// Line speed change.
    BaudRate(u32),
    /// Break directive.
    Break(BreakDirective),
    /// Data bytes.
    Bytes(Vec<u8>),
}

/// A transmitter that records line events in memory.
///
/// This is useful for exercising a [`LinMaster`](crate::LinMaster) without
/// hardware and for checking the exact bytes a frame produces.
#[cfg(feature = "alloc")]
#[derive(Debug, Clone)]
pub struct RecordingTransmitter {
    events: Vec<TxEvent>,
    header_id: bool,
    fail_with: Option<TransmitError>,
}

#[cfg(feature = "alloc")]
impl RecordingTransmitter {
    /// Create a recorder for a line with full hardware header support.
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            header_id: true,
            fail_with: None,
        }
    }

    /// Create a recorder for a line that can only generate the break field.
    pub fn break_only() -> Self {
        Self {
            header_id: false,
            ..Self::new()
        }
    }

    /// Make every following `send_break` and `write` fail with `err`.
    pub fn fail_with(&mut self, err: TransmitError) {
        self.fail_with = Some(err);
    }

    /// Recorded events in order.
    pub fn events(&self) -> &[TxEvent] {
        &self.events
    }

    /// Concatenation of every written byte.
    pub fn written_bytes(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|e| match e {
                TxEvent::Bytes(b) => Some(b.as_slice()),
                _ => None,
            })
            .flatten()
            .copied()
            .collect()
    }

    /// Forget recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Consume the recorder and return its events.
    pub fn into_events(self) -> Vec<TxEvent> {
        self.events
    }

    fn check(&self) -> Result<(), TransmitError> {
        match self.fail_with {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(feature = "alloc")]
impl Default for RecordingTransmitter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "alloc")]
impl LinTransmit for RecordingTransmitter {
    fn send_break(&mut self, directive: &BreakDirective) -> Result<(), TransmitError> {
        self.check()?;
        self.events.push(TxEvent::Break(*directive));
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), TransmitError> {
        self.check()?;
        self.events.push(TxEvent::Bytes(Vec::from(bytes)));
        Ok(())
    }

    fn set_baud_rate(&mut self, baud_rate: u32) -> Result<(), TransmitError> {
        self.check()?;
        self.events.push(TxEvent::BaudRate(baud_rate));
        Ok(())
    }

    fn supports_header_id(&self) -> bool {
        self.header_id
    }
}
