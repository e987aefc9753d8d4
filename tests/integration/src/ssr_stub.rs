//! Stand-in pre-render service
//!
//! Accepts one HTTP/1.1 request on a local port, answers with a canned status
//! and body, and hands back the raw request it received.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A request captured by the stub
#[derive(Debug, Clone)]
pub struct CapturedRequest {
	pub request_line: String,
	pub body: String,
}

impl CapturedRequest {
	pub fn json(&self) -> serde_json::Value {
		serde_json::from_str(&self.body).unwrap_or(serde_json::Value::Null)
	}
}

/// Serve one request, returning the base URL and the captured request
pub async fn serve_once(status: u16, body: &str) -> (String, JoinHandle<CapturedRequest>) {
	let listener = TcpListener::bind("127.0.0.1:0")
		.await
		.expect("bind stub listener");
	let address = listener.local_addr().expect("stub address");
	let body = body.to_string();

	let handle = tokio::spawn(async move {
		let (mut socket, _) = listener.accept().await.expect("accept pre-render call");
		let captured = read_request(&mut socket).await;

		let response = format!(
			"HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
			status,
			body.len(),
			body
		);
		socket
			.write_all(response.as_bytes())
			.await
			.expect("write stub response");
		let _ = socket.shutdown().await;
		captured
	});

	(format!("http://{}", address), handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> CapturedRequest {
	let mut buffer = Vec::new();
	let mut chunk = [0u8; 4096];

	loop {
		let read = socket.read(&mut chunk).await.expect("read pre-render call");
		if read == 0 {
			break;
		}
		buffer.extend_from_slice(&chunk[..read]);

		let text = String::from_utf8_lossy(&buffer);
		if let Some(split) = text.find("\r\n\r\n") {
			let head = &text[..split];
			let length = head
				.lines()
				.find_map(|line| {
					let (name, value) = line.split_once(':')?;
					name.eq_ignore_ascii_case("content-length")
						.then(|| value.trim().parse::<usize>().ok())
						.flatten()
				})
				.unwrap_or(0);
			if buffer.len() >= split + 4 + length {
				break;
			}
		}
	}

	let text = String::from_utf8_lossy(&buffer).into_owned();
	let (head, body) = text.split_once("\r\n\r\n").unwrap_or((text.as_str(), ""));
	CapturedRequest {
		request_line: head.lines().next().unwrap_or_default().to_string(),
		body: body.to_string(),
	}
}
