//! LIN master driver.
//!
//! [`LinMaster`] sequences encoder output onto a [`LinTransmit`] line: issue the
//! break directive, wait for the hardware header flag, write the remaining header
//! bytes, then write the response. It keeps no frame state between calls.

use crate::config::LinMasterConfig;
use crate::error::TransmitError;
use crate::lin::{
    ChecksumType, Header, HeaderVariant, LinFrame, ProtectedId, Response, build_header_with,
    build_response,
};
use crate::transport::{HeaderWait, LinTransmit, NoWait, WaitStatus};
use crate::Result;

/// A LIN bus master over a transmission collaborator.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "alloc")]
/// # fn main() -> lin_master::Result<()> {
/// use lin_master::{LinMaster, LinMasterConfig, RecordingTransmitter};
/// use lin_master::lin::ChecksumType;
///
/// let config = LinMasterConfig::default().with_checksum(ChecksumType::Enhanced);
/// let mut master = LinMaster::new(RecordingTransmitter::new(), config)?;
///
/// let frame = master.master_request(0x12, &[1, 2, 3, 4, 5, 6, 7, 8])?;
/// assert_eq!(frame.checksum(), 0x49);
/// # Ok(())
/// # }
/// # #[cfg(not(feature = "alloc"))]
/// # fn main() {}
/// ```
pub struct LinMaster<T: LinTransmit, W: HeaderWait = NoWait> {
    transmitter: T,
    waiter: W,
    config: LinMasterConfig,
}

impl<T: LinTransmit> LinMaster<T, NoWait> {
    /// Create a master whose transmitter blocks until each header is sent.
    pub fn new(transmitter: T, config: LinMasterConfig) -> Result<Self> {
        Self::with_waiter(transmitter, NoWait, config)
    }
}

impl<T: LinTransmit, W: HeaderWait> LinMaster<T, W> {
    /// Create a master that polls `waiter` after issuing each break directive.
    ///
    /// The configuration is validated and its baud rate applied to the line.
    pub fn with_waiter(mut transmitter: T, waiter: W, config: LinMasterConfig) -> Result<Self> {
        config.validate()?;
        transmitter.set_baud_rate(config.baud_rate)?;
        info!(
            "LIN master at {} bit/s, header {:?}, {:?} checksum",
            config.baud_rate,
            config.header_variant,
            config.checksum
        );
        Ok(Self {
            transmitter,
            waiter,
            config,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &LinMasterConfig {
        &self.config
    }

    /// Change the line speed.
    pub fn set_baud_rate(&mut self, baud_rate: u32) -> Result<()> {
        let config = self.config.with_baud_rate(baud_rate);
        config.validate()?;
        self.transmitter.set_baud_rate(baud_rate)?;
        self.config = config;
        Ok(())
    }

    /// Change the checksum type used by [`send_response`](Self::send_response).
    pub fn set_checksum(&mut self, checksum: ChecksumType) {
        self.config.checksum = checksum;
    }

    /// Access the transmitter.
    pub fn transmitter(&self) -> &T {
        &self.transmitter
    }

    /// Access the transmitter mutably.
    pub fn transmitter_mut(&mut self) -> &mut T {
        &mut self.transmitter
    }

    /// Give the transmitter back.
    pub fn release(self) -> T {
        self.transmitter
    }

    fn header_for(&self, id: u8) -> Result<Header> {
        let header = build_header_with(id, self.config.header_variant, self.config.timing)?;
        if header.variant() == HeaderVariant::BreakSyncId && !self.transmitter.supports_header_id()
        {
            trace!("line cannot send the ID field, falling back to break-only header");
            return Ok(header.into_break_only());
        }
        Ok(header)
    }

    // Diagnostic frames always carry the classic checksum.
    fn checksum_for(&self, pid: ProtectedId) -> ChecksumType {
        if pid.is_diagnostic() {
            ChecksumType::Classic
        } else {
            self.config.checksum
        }
    }

    fn transmit_header(&mut self, header: &Header) -> Result<()> {
        debug!(
            "send header {:?} for pid {:#x}",
            header.variant(),
            header.pid().to_byte()
        );
        self.transmitter
            .send_break(header.directive())
            .inspect_err(|e| warn!("break for id {:#x} failed: {:?}", header.pid().id(), e))?;

        let cycles = self.config.header_timeout_cycles;
        if self.waiter.wait_header_sent(cycles) == WaitStatus::TimedOut {
            warn!(
                "wait for LIN header transfer of id {:#x} timed out",
                header.pid().id()
            );
            return Err(TransmitError::Timeout { cycles }.into());
        }

        let pending = header.pending_bytes();
        if !pending.is_empty() {
            self.transmitter.write(pending)?;
        }
        Ok(())
    }

    /// Send the header for `id` using the configured header variant.
    ///
    /// On a line without hardware ID support a [`HeaderVariant::BreakSyncId`]
    /// header is sent as a break followed by sync and protected ID bytes.
    pub fn send_header(&mut self, id: u8) -> Result<Header> {
        let header = self.header_for(id)?;
        self.transmit_header(&header)?;
        Ok(header)
    }

    /// Send a response after `header` with the configured checksum type.
    ///
    /// Diagnostic identifiers (0x3C, 0x3D) always use the classic checksum.
    pub fn send_response(&mut self, header: &Header, payload: &[u8]) -> Result<Response> {
        let checksum_type = self.checksum_for(header.pid());
        self.send_response_with(header, payload, checksum_type)
    }

    /// Send a response after `header` with an explicit checksum type.
    ///
    /// The type is used as given, including for diagnostic identifiers.
    pub fn send_response_with(
        &mut self,
        header: &Header,
        payload: &[u8],
        checksum_type: ChecksumType,
    ) -> Result<Response> {
        let response = build_response(payload, checksum_type, header.pid())?;
        debug!(
            "send {} response bytes for id {:#x}, checksum {:#x}",
            response.len(),
            header.pid().id(),
            response.checksum()
        );
        self.transmitter
            .write(response.as_bytes())
            .inspect_err(|e| warn!("response for id {:#x} failed: {:?}", header.pid().id(), e))?;
        Ok(response)
    }

    /// Send a complete master request frame: header, then response.
    ///
    /// Both parts are encoded before anything is written, so rejected input never
    /// leaves a lone header on the bus.
    pub fn master_request(&mut self, id: u8, payload: &[u8]) -> Result<LinFrame> {
        let pid = ProtectedId::new(id)?;
        let response = build_response(payload, self.checksum_for(pid), pid)?;
        let header = self.header_for(id)?;

        self.transmit_header(&header)?;
        self.transmitter.write(response.as_bytes())?;
        Ok(LinFrame::from_parts(header, response))
    }
}
