//! One-shot HTTP/1.1 upstream that sends its body in two parts.
//!
//! The first part goes out with the headers; the rest is held back until the
//! test releases it, so a reader can observe bytes before the response ends.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

pub struct GatedUpstream {
    pub url: String,
    release: Sender<()>,
}

impl GatedUpstream {
    /// Lets the held-back tail of the body go out.
    pub fn release(&self) {
        let _ = self.release.send(());
    }
}

pub fn start(path: &str, first: &'static [u8], rest: &'static [u8]) -> GatedUpstream {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let (release, gate) = mpsc::channel();
    thread::spawn(move || {
        if let Some(stream) = listener.incoming().flatten().next() {
            handle(stream, first, rest, gate);
        }
    });
    GatedUpstream {
        url: format!("http://127.0.0.1:{port}{path}"),
        release,
    }
}

fn handle(mut stream: TcpStream, first: &[u8], rest: &[u8], gate: Receiver<()>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    if !matches!(stream.read(&mut buf), Ok(n) if n > 0) {
        return;
    }
    let head = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/zip\r\nContent-Length: {}\r\n\r\n",
        first.len() + rest.len()
    );
    if stream.write_all(head.as_bytes()).is_err() || stream.write_all(first).is_err() {
        return;
    }
    let _ = stream.flush();
    if gate.recv_timeout(Duration::from_secs(10)).is_err() {
        return;
    }
    let _ = stream.write_all(rest);
    let _ = stream.flush();
}
