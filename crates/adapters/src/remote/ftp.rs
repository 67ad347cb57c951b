// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Minimal FTP control-channel client for `MDTM` queries.
//!
//! Only the control connection is used: greeting, anonymous login, `MDTM`,
//! `QUIT`. No data connection is ever opened; downloads go through `wget`.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;

use super::{RemoteError, RemoteMtime, RemoteResource};

/// Default FTP control port.
pub const FTP_PORT: u16 = 21;

const ANONYMOUS_USER: &str = "anonymous";
const ANONYMOUS_PASSWORD: &str = "anonymous@";

/// FTP client that reads modification times with `MDTM` (RFC 3659).
#[derive(Debug, Clone)]
pub struct FtpMdtmClient {
    port: u16,
    timeout: Duration,
}

impl Default for FtpMdtmClient {
    fn default() -> Self {
        Self {
            port: FTP_PORT,
            timeout: Duration::from_secs(3),
        }
    }
}

impl FtpMdtmClient {
    pub fn new() -> Self {
        Self::default()
    }

    cv_core::setters! {
        set { port: u16, timeout: Duration }
    }

    async fn query(&self, resource: &RemoteResource) -> Result<i64, RemoteError> {
        let stream = TcpStream::connect((resource.host.as_str(), self.port))
            .await
            .map_err(|source| RemoteError::Connect { host: resource.host.clone(), source })?;
        let (read, write) = stream.into_split();
        let mut conn = Control { reader: BufReader::new(read), writer: write };

        conn.expect(220).await?;

        conn.send(&format!("USER {ANONYMOUS_USER}")).await?;
        let reply = conn.reply().await?;
        match reply.code {
            230 => {}
            331 => {
                conn.send(&format!("PASS {ANONYMOUS_PASSWORD}")).await?;
                conn.expect(230).await?;
            }
            code => return Err(RemoteError::Rejected { code, message: reply.text }),
        }

        conn.send(&format!("MDTM {}", resource.path)).await?;
        let reply = conn.expect(213).await?;
        let secs = parse_mdtm(&reply.text)?;

        // Best effort; the answer is already in hand.
        if conn.send("QUIT").await.is_ok() {
            let _ = conn.reply().await;
        }

        Ok(secs)
    }
}

#[async_trait]
impl RemoteMtime for FtpMdtmClient {
    async fn modified_time(&self, resource: &RemoteResource) -> Result<i64, RemoteError> {
        tracing::debug!(%resource, port = self.port, "querying remote modification time");
        tokio::time::timeout(self.timeout, self.query(resource))
            .await
            .map_err(|_| RemoteError::Timeout(self.timeout))?
    }
}

/// A complete (possibly multi-line) server reply.
#[derive(Debug)]
struct Reply {
    code: u16,
    /// Text of the final line, after the code.
    text: String,
}

struct Control {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl Control {
    async fn send(&mut self, command: &str) -> Result<(), RemoteError> {
        self.writer.write_all(command.as_bytes()).await?;
        self.writer.write_all(b"\r\n").await?;
        self.writer.flush().await?;
        Ok(())
    }

    async fn expect(&mut self, code: u16) -> Result<Reply, RemoteError> {
        let reply = self.reply().await?;
        if reply.code != code {
            return Err(RemoteError::Rejected { code: reply.code, message: reply.text });
        }
        Ok(reply)
    }

    /// Read one reply. Multi-line replies (`123-...`) run until a line that
    /// starts with the same code followed by a space.
    async fn reply(&mut self) -> Result<Reply, RemoteError> {
        let first = self.line().await?;
        let (code, continued, text) = split_reply_line(&first)?;
        if !continued {
            return Ok(Reply { code, text });
        }
        let terminator = format!("{code} ");
        loop {
            let line = self.line().await?;
            if let Some(text) = line.strip_prefix(&terminator) {
                return Ok(Reply { code, text: text.to_string() });
            }
        }
    }

    async fn line(&mut self) -> Result<String, RemoteError> {
        let mut line = String::new();
        let n = self.reader.read_line(&mut line).await?;
        if n == 0 {
            return Err(RemoteError::Protocol("connection closed by server".to_string()));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

fn split_reply_line(line: &str) -> Result<(u16, bool, String), RemoteError> {
    let code = line
        .get(..3)
        .and_then(|c| c.parse::<u16>().ok())
        .ok_or_else(|| RemoteError::Protocol(format!("malformed reply `{line}`")))?;
    let continued = line.as_bytes().get(3) == Some(&b'-');
    let text = line.get(4..).unwrap_or_default().to_string();
    Ok((code, continued, text))
}

/// Parse an `MDTM` value (`YYYYMMDDHHMMSS[.sss]`, UTC) into POSIX seconds.
pub(crate) fn parse_mdtm(value: &str) -> Result<i64, RemoteError> {
    let value = value.trim();
    let whole = value.split('.').next().unwrap_or_default();
    NaiveDateTime::parse_from_str(whole, "%Y%m%d%H%M%S")
        .map(|dt| dt.and_utc().timestamp())
        .map_err(|_| RemoteError::InvalidTimestamp(value.to_string()))
}

#[cfg(test)]
#[path = "ftp_tests.rs"]
mod tests;
