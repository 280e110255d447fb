//! LIN Master Example
//!
//! Sends the three sample frames over an in-memory line and prints what would
//! appear on the UART TX pin:
//! 1. a header with ID 0x30 (12-bit break, 0x55 sync)
//! 2. ID 0x35 with 8 data bytes and a classic checksum
//! 3. ID 0x12 with 8 data bytes and an enhanced checksum
//!
//! Run with: `cargo run --example lin_master --features std`

use lin_master::lin::{ChecksumType, HeaderVariant};
use lin_master::{LinMaster, LinMasterConfig, LinTransmit, RecordingTransmitter, TxEvent};

const TEST_PATTERN: [u8; 8] = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];

fn main() -> lin_master::Result<()> {
    println!("=== LIN Master Example ===\n");

    // Example 1: UART generates only the break field
    software_header()?;

    // Example 2: UART generates break, sync and protected ID
    hardware_header()?;

    println!("\n=== All examples completed successfully! ===");
    Ok(())
}

fn print_events(events: &[TxEvent]) {
    for event in events {
        match event {
            TxEvent::BaudRate(baud) => println!("  line @ {baud} bit/s"),
            TxEvent::Break(d) => println!(
                "  break {} bits + delimiter {} bit ({:?}, pid 0x{:02X})",
                d.timing.break_bits,
                d.timing.delimiter_bits,
                d.variant,
                d.pid.to_byte()
            ),
            TxEvent::Bytes(bytes) => {
                let hex: Vec<String> = bytes.iter().map(|b| format!("{b:02X}")).collect();
                println!("  tx [{}]", hex.join(" "));
            }
        }
    }
}

fn software_header() -> lin_master::Result<()> {
    println!("--- Example 1: Break-only UART ---");

    let config = LinMasterConfig::default().with_header_variant(HeaderVariant::BreakOnly);
    let mut master = LinMaster::new(RecordingTransmitter::new(), config)?;

    master.send_header(0x30)?;

    let header = master.send_header(0x35)?;
    master.send_response_with(&header, &TEST_PATTERN, ChecksumType::Classic)?;

    let header = master.send_header(0x12)?;
    let response = master.send_response_with(&header, &TEST_PATTERN, ChecksumType::Enhanced)?;
    println!("  enhanced checksum for 0x12: 0x{:02X}", response.checksum());

    print_events(master.transmitter().events());
    Ok(())
}

fn hardware_header() -> lin_master::Result<()> {
    println!("\n--- Example 2: UART with LIN header generation ---");

    let mut tx = RecordingTransmitter::new();
    println!("  header ID support: {}", tx.supports_header_id());
    tx.clear();

    let mut master = LinMaster::new(&mut tx, LinMasterConfig::default())?;
    let frame = master.master_request(0x35, &TEST_PATTERN)?;
    println!("  classic frame 0x35 checksum 0x{:02X}", frame.checksum());

    let config = LinMasterConfig::default()
        .with_header_variant(HeaderVariant::BreakSync)
        .with_checksum(ChecksumType::Enhanced);
    let mut master = LinMaster::new(&mut tx, config)?;
    let frame = master.master_request(0x12, &TEST_PATTERN)?;
    println!(
        "  enhanced frame 0x12 checksum 0x{:02X}, verified: {}",
        frame.checksum(),
        frame.verify()
    );

    print_events(tx.events());
    Ok(())
}
