//! Newline-delimited JSON framing.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::Result;

/// Reads and writes one JSON value per line. Blank lines are skipped.
#[derive(Debug, Default)]
pub struct JsonLines {
	buf: String,
}

impl JsonLines {
	pub fn new() -> Self {
		Self::default()
	}

	/// Reads the next message; `Ok(None)` on a clean EOF.
	pub async fn read_message<T: DeserializeOwned>(
		&mut self,
		input: &mut (impl AsyncBufRead + Unpin + Send),
	) -> Result<Option<T>> {
		loop {
			self.buf.clear();
			if input.read_line(&mut self.buf).await? == 0 {
				return Ok(None);
			}
			let line = self.buf.trim();
			if line.is_empty() {
				continue;
			}
			return Ok(Some(serde_json::from_str(line)?));
		}
	}

	/// Writes `msg` followed by a newline and flushes.
	pub async fn write_message<T: Serialize>(
		&mut self,
		output: &mut (impl AsyncWrite + Unpin + Send),
		msg: &T,
	) -> Result<()> {
		let mut line = serde_json::to_vec(msg)?;
		line.push(b'\n');
		output.write_all(&line).await?;
		output.flush().await?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use tokio::io::BufReader;

	use super::*;
	use crate::{PluginMessage, RpcError};

	#[tokio::test]
	async fn reads_messages_and_skips_blank_lines() {
		let input = b"{\"type\":\"hello\",\"name\":\"p\",\"version\":\"1\"}\n\n{\"type\":\"post_command\",\"name\":\"quit\"}\n";
		let mut reader = BufReader::new(&input[..]);
		let mut codec = JsonLines::new();

		let first: Option<PluginMessage> = codec.read_message(&mut reader).await.expect("first");
		assert_eq!(
			first,
			Some(PluginMessage::Hello {
				name: "p".into(),
				version: "1".into()
			})
		);
		let second: Option<PluginMessage> = codec.read_message(&mut reader).await.expect("second");
		assert_eq!(
			second,
			Some(PluginMessage::PostCommand {
				name: "quit".into(),
				args: vec![]
			})
		);
		let eof: Option<PluginMessage> = codec.read_message(&mut reader).await.expect("eof");
		assert_eq!(eof, None);
	}

	#[tokio::test]
	async fn malformed_line_is_a_codec_error() {
		let mut reader = BufReader::new(&b"{not json}\n"[..]);
		let result = JsonLines::new().read_message::<PluginMessage>(&mut reader).await;
		assert!(matches!(result, Err(RpcError::Codec(_))));
	}

	#[tokio::test]
	async fn written_lines_are_newline_terminated() {
		let mut out = Vec::new();
		JsonLines::new()
			.write_message(&mut out, &crate::HostMessage::Shutdown)
			.await
			.expect("write");
		assert_eq!(out, b"{\"type\":\"shutdown\"}\n");
	}
}
