//! Live handle for streamed chat.
//!
//! The body is newline-delimited JSON, one record per line. Records are
//! handed out raw: a stream may deliver many good records and then fail, so
//! decoding and error detection per record belong to the caller.

use crate::transport::TransportError;
use crate::{BoxStream, Error};
use bytes::Bytes;
use futures::{stream, StreamExt, TryStreamExt};
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::StatusCode;

/// An open streamed chat response whose body has not been read yet.
///
/// The status is not classified; check [`ChatStream::status`] before reading
/// if the caller treats non-2xx streams differently.
#[derive(Debug)]
pub struct ChatStream {
    response: reqwest::Response,
}

impl ChatStream {
    pub(crate) fn new(response: reqwest::Response) -> Self {
        Self { response }
    }

    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.response.headers()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    /// The underlying response, for callers with their own reader.
    pub fn into_response(self) -> reqwest::Response {
        self.response
    }

    /// Raw body chunks as they arrive.
    pub fn bytes_stream(self) -> BoxStream<'static, Bytes> {
        Box::pin(
            self.response
                .bytes_stream()
                .map_err(|e| Error::Transport(TransportError::Http(e))),
        )
    }

    /// Body framed into NDJSON lines, without parsing them.
    pub fn lines(self) -> BoxStream<'static, String> {
        ndjson_lines(self.bytes_stream())
    }
}

/// Split a byte stream on `\n`. Blank lines are skipped, a trailing `\r` is
/// dropped and a final unterminated line is still emitted.
pub fn ndjson_lines(input: BoxStream<'static, Bytes>) -> BoxStream<'static, String> {
    let lines = stream::unfold(
        (input, Vec::<u8>::new(), false),
        |(mut input, mut buf, done)| async move {
            loop {
                if let Some(idx) = buf.iter().position(|b| *b == b'\n') {
                    let rest = buf.split_off(idx + 1);
                    let line = decode_line(&buf);
                    buf = rest;
                    if line.is_empty() {
                        continue;
                    }
                    return Some((Ok(line), (input, buf, done)));
                }

                if done {
                    return None;
                }

                match input.next().await {
                    Some(Ok(chunk)) => buf.extend_from_slice(&chunk),
                    Some(Err(e)) => return Some((Err(e), (input, buf, true))),
                    None => {
                        let line = decode_line(&buf);
                        if line.is_empty() {
                            return None;
                        }
                        return Some((Ok(line), (input, Vec::new(), true)));
                    }
                }
            }
        },
    );
    Box::pin(lines)
}

fn decode_line(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunks(parts: &[&'static [u8]]) -> BoxStream<'static, Bytes> {
        let items: Vec<crate::Result<Bytes>> =
            parts.iter().map(|p| Ok(Bytes::from_static(p))).collect();
        Box::pin(stream::iter(items))
    }

    async fn collect(input: BoxStream<'static, Bytes>) -> Vec<crate::Result<String>> {
        ndjson_lines(input).collect().await
    }

    #[tokio::test]
    async fn frames_records_split_across_chunks() {
        let out = collect(chunks(&[b"{\"delta\":{\"con", b"tent\":\"He\"}}\n{\"de", b"lta\":{}}\n"])).await;
        let lines: Vec<String> = out.into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(
            lines,
            vec![
                "{\"delta\":{\"content\":\"He\"}}".to_string(),
                "{\"delta\":{}}".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn skips_blank_lines_and_keeps_unterminated_tail() {
        let out = collect(chunks(&[b"{\"a\":1}\r\n\n", b"{\"b\":2}"])).await;
        let lines: Vec<String> = out.into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(lines, vec!["{\"a\":1}".to_string(), "{\"b\":2}".to_string()]);
    }

    #[tokio::test]
    async fn multibyte_character_split_between_chunks_survives() {
        // "é" is 0xC3 0xA9
        let out = collect(chunks(&[b"{\"t\":\"caf\xC3", b"\xA9\"}\n"])).await;
        assert_eq!(out[0].as_ref().unwrap(), "{\"t\":\"café\"}");
    }

    #[tokio::test]
    async fn read_error_is_surfaced_after_earlier_records() {
        let items: Vec<crate::Result<Bytes>> = vec![
            Ok(Bytes::from_static(b"{\"ok\":true}\n")),
            Err(Error::Transport(TransportError::Other("connection reset".into()))),
        ];
        let out = collect(Box::pin(stream::iter(items))).await;
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].as_ref().unwrap(), "{\"ok\":true}");
        assert!(out[1].is_err());
    }
}
