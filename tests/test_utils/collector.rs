//! Loopback TCP collector capturing newline-delimited records.

use std::{
    io::{BufRead, BufReader},
    net::{SocketAddr, TcpListener},
    sync::mpsc,
    thread,
    time::Duration,
};

use rstest::fixture;

/// Address of a running collector and the lines it has received.
pub struct LineCollector {
    pub addr: SocketAddr,
    lines: mpsc::Receiver<String>,
}

impl LineCollector {
    /// Wait for the next line, failing the test after two seconds.
    pub fn next_line(&self) -> String {
        self.lines
            .recv_timeout(Duration::from_secs(2))
            .expect("collector received no line")
    }
}

/// Start a collector on an ephemeral loopback port.
#[fixture]
pub fn line_collector() -> LineCollector {
    let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind collector");
    let addr = listener.local_addr().expect("collector address");
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(stream) = stream else {
                break;
            };
            for line in BufReader::new(stream).lines() {
                let Ok(line) = line else {
                    break;
                };
                if tx.send(line).is_err() {
                    return;
                }
            }
        }
    });
    LineCollector { addr, lines: rx }
}
