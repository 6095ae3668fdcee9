use thiserror::Error;

pub const VERSION_MARKER: &str = "HTTP/1.1";
const HEADER_TERMINATOR: &str = "\r\n";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("request exceeded {limit} lines")]
    TooManyLines { limit: usize },
    #[error("request line longer than {limit} bytes")]
    LineTooLong { limit: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: String,
    pub path: String,
}

impl RequestLine {
    /// Lines without the version marker, or with fewer than two tokens, are not request lines.
    pub fn parse(line: &str) -> Option<Self> {
        if !line.contains(VERSION_MARKER) {
            return None;
        }
        let mut tokens = line.split_whitespace();
        let method = tokens.next()?;
        let path = tokens.next()?;
        Some(Self {
            method: method.to_string(),
            path: path.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    AwaitingRequestLine,
    Dispatched,
}

/// Consumes request head lines until the blank terminator line.
#[derive(Debug)]
pub struct RequestScanner {
    max_lines: usize,
    max_line_bytes: usize,
    lines_seen: usize,
    request: Option<RequestLine>,
    state: ScanState,
}

impl RequestScanner {
    pub fn new(max_lines: usize, max_line_bytes: usize) -> Self {
        Self {
            max_lines,
            max_line_bytes,
            lines_seen: 0,
            request: None,
            state: ScanState::AwaitingRequestLine,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Feeds one raw line including its terminator.
    pub fn feed(&mut self, raw: &[u8]) -> Result<ScanState, RequestError> {
        if self.state == ScanState::Dispatched {
            return Ok(self.state);
        }
        if raw.len() > self.max_line_bytes {
            return Err(RequestError::LineTooLong {
                limit: self.max_line_bytes,
            });
        }
        self.lines_seen += 1;
        if self.lines_seen > self.max_lines {
            return Err(RequestError::TooManyLines {
                limit: self.max_lines,
            });
        }

        let line = String::from_utf8_lossy(raw);
        if line == HEADER_TERMINATOR {
            self.state = ScanState::Dispatched;
        } else if self.request.is_none() {
            self.request = RequestLine::parse(&line);
        }
        Ok(self.state)
    }

    /// Ends the scan, e.g. when the peer closed its side early.
    pub fn finish(mut self) -> Option<RequestLine> {
        self.state = ScanState::Dispatched;
        self.request
    }
}
