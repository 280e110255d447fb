//! End-to-end master test: the three LIN sample cases driven through a
//! recording line, once with a UART that generates the whole header and once
//! with one that only generates the break field.

use lin_master::lin::{BreakTiming, ChecksumType, HeaderVariant, LinFrame, ProtectedId};
use lin_master::{
    Error, LinMaster, LinMasterConfig, RecordingTransmitter, Result, TransmitError, TxEvent,
    WaitStatus,
};
use pretty_assertions::assert_eq;

const PATTERN: [u8; 8] = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];

fn bytes(events: &[TxEvent]) -> Vec<Vec<u8>> {
    events
        .iter()
        .filter_map(|e| match e {
            TxEvent::Bytes(b) => Some(b.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn software_header_sample_cases() -> Result<()> {
    let config = LinMasterConfig::default().with_header_variant(HeaderVariant::BreakOnly);
    let mut master = LinMaster::new(RecordingTransmitter::new(), config)?;

    // Case 1: header with ID 0x30
    master.send_header(0x30)?;

    // Case 2: ID 0x35, classic checksum
    let header = master.send_header(0x35)?;
    master.send_response_with(&header, &PATTERN, ChecksumType::Classic)?;

    // Case 3: ID 0x12, enhanced checksum
    let header = master.send_header(0x12)?;
    master.send_response_with(&header, &PATTERN, ChecksumType::Enhanced)?;

    let events = master.release().into_events();
    let breaks = events
        .iter()
        .filter(|e| matches!(e, TxEvent::Break(_)))
        .count();
    assert_eq!(breaks, 3);
    assert_eq!(
        bytes(&events),
        vec![
            vec![0x55, 0xF0],
            vec![0x55, 0xF5],
            vec![0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0xDB],
            vec![0x55, 0x92],
            vec![0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x49],
        ]
    );
    Ok(())
}

#[test]
fn hardware_header_sample_cases() -> Result<()> {
    let mut master = LinMaster::new(RecordingTransmitter::new(), LinMasterConfig::default())?;

    // Classic: hardware sends break, sync and ID
    master.transmitter_mut().clear();
    let frame = master.master_request(0x35, &PATTERN)?;
    let events = master.transmitter().events().to_vec();
    match &events[0] {
        TxEvent::Break(directive) => {
            assert_eq!(directive.variant, HeaderVariant::BreakSyncId);
            assert_eq!(directive.pid, ProtectedId::new(0x35)?);
            assert_eq!(directive.timing, BreakTiming::LIN_2X);
        }
        other => panic!("expected break, got {other:?}"),
    }
    assert_eq!(bytes(&events), vec![frame.response().as_bytes().to_vec()]);

    // Enhanced: hardware sends break and sync, software sends the protected ID
    let config = LinMasterConfig::default()
        .with_header_variant(HeaderVariant::BreakSync)
        .with_checksum(ChecksumType::Enhanced);
    let mut master = LinMaster::new(master.release(), config)?;
    master.transmitter_mut().clear();
    let frame = master.master_request(0x12, &PATTERN)?;
    assert_eq!(
        master.transmitter().written_bytes(),
        vec![0x92, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x49]
    );
    assert!(frame.verify());
    Ok(())
}

#[test]
fn transmitted_frames_parse_back() -> Result<()> {
    let config = LinMasterConfig::default().with_checksum(ChecksumType::Enhanced);
    let mut master = LinMaster::new(RecordingTransmitter::break_only(), config)?;

    for id in [0x00, 0x12, 0x2A, 0x3F] {
        master.transmitter_mut().clear();
        let sent = master.master_request(id, &PATTERN[..4])?;
        let wire = master.transmitter().written_bytes();
        let parsed = LinFrame::from_wire_bytes(&wire, ChecksumType::Enhanced)?;
        assert_eq!(parsed.id(), sent.id());
        assert_eq!(parsed.checksum(), sent.checksum());
    }
    Ok(())
}

#[test]
fn header_timeout_is_a_transmit_error() -> Result<()> {
    let mut polls = Vec::new();
    let mut master = LinMaster::with_waiter(
        RecordingTransmitter::new(),
        |cycles: u32| {
            polls.push(cycles);
            WaitStatus::TimedOut
        },
        LinMasterConfig::default(),
    )?;

    let err = master.master_request(0x30, &PATTERN).unwrap_err();
    assert!(err.is_transmit());
    assert!(matches!(
        err,
        Error::Transmit(TransmitError::Timeout {
            cycles: 72_000_000
        })
    ));
    // Nothing but the baud rate and the break reached the line
    assert_eq!(master.transmitter().written_bytes(), Vec::<u8>::new());
    drop(master);
    assert_eq!(polls, vec![72_000_000]);
    Ok(())
}

#[test]
fn config_file_roundtrip() -> Result<()> {
    let path = std::env::temp_dir().join("lin_master_config_test.json");
    if path.exists() {
        std::fs::remove_file(&path)?;
    }

    let config = LinMasterConfig::default()
        .with_baud_rate(19_200)
        .with_header_variant(HeaderVariant::BreakSync)
        .with_checksum(ChecksumType::Enhanced);
    config.save_to_file(path.to_str().unwrap())?;

    let loaded = LinMasterConfig::load_from_file(path.to_str().unwrap())?;
    assert_eq!(loaded, config);

    std::fs::remove_file(path)?;
    Ok(())
}

#[test]
fn config_load_missing_file() {
    let path = std::env::temp_dir().join("lin_master_config_missing.json");
    assert!(matches!(
        LinMasterConfig::load_from_file(path.to_str().unwrap()),
        Err(Error::IOError(_))
    ));
}
