//! Link UART receive task
//!
//! Receives frames from the BLE bridge and queues them for the controller.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use impetus_core::controller::HostEvent;
use impetus_protocol::{BridgeMessage, FrameDecoder};

use crate::channels::HOST_EVENTS;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Link RX task - receives and parses frames from the BLE bridge
#[embassy_executor::task]
pub async fn link_rx_task(mut rx: BufferedUartRx) {
    info!("Link RX task started");

    let mut decoder = FrameDecoder::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match decoder.push(byte) {
                        Ok(Some(frame)) => match BridgeMessage::from_frame(&frame) {
                            Ok(msg) => queue(msg),
                            Err(e) => {
                                warn!("Unparseable bridge frame {:#x}: {:?}", frame.msg_type, e)
                            }
                        },
                        Ok(None) => {}
                        Err(e) => {
                            warn!("Frame error: {:?}", e);
                        }
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

/// Hand a bridge message to the controller
fn queue(msg: BridgeMessage) {
    let event = match msg {
        BridgeMessage::Phone(msg) => {
            debug!("Phone: {:?}", msg);
            HostEvent::Message(msg)
        }
        BridgeMessage::Delivered => {
            trace!("Delivered");
            HostEvent::Delivered
        }
        BridgeMessage::SendFailed { reason } => {
            warn!("Send failed, reason {:#x}", reason);
            HostEvent::SendFailed
        }
        BridgeMessage::Dropped { reason } => {
            warn!("Inbound message dropped, reason {:#x}", reason);
            HostEvent::Dropped
        }
    };

    if HOST_EVENTS.try_send(event).is_err() {
        warn!("Host event channel full, dropping event");
    }
}
