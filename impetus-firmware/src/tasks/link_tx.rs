//! Link UART transmit task
//!
//! Sends command dictionaries and radio polling requests to the BLE bridge.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use impetus_protocol::frame::MAX_FRAME_SIZE;
use impetus_protocol::WatchMessage;

use crate::channels::OUTBOUND;

/// Link TX task - drains the outbound queue onto the UART
#[embassy_executor::task]
pub async fn link_tx_task(mut tx: BufferedUartTx) {
    info!("Link TX task started");

    let mut buf = [0u8; MAX_FRAME_SIZE];

    loop {
        let msg = OUTBOUND.receive().await;
        send(&mut tx, &msg, &mut buf).await;
    }
}

async fn send(tx: &mut BufferedUartTx, msg: &WatchMessage, buf: &mut [u8]) {
    let frame = match msg.to_frame() {
        Ok(frame) => frame,
        Err(e) => {
            error!("Failed to build frame for {:?}: {:?}", msg, e);
            return;
        }
    };

    match frame.encode(buf) {
        Ok(len) => {
            if let Err(e) = tx.write_all(&buf[..len]).await {
                warn!("Failed to send {:?}: {:?}", msg, e);
            } else {
                trace!("Sent {:?}", msg);
            }
        }
        Err(e) => error!("Failed to encode frame: {:?}", e),
    }
}
