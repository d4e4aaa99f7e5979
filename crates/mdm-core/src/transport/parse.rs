//! Parse HTTP response header lines into a ResponseHead.

/// Status and body length of the final response (after redirects).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResponseHead {
    /// HTTP status code; 0 until a status line has been seen.
    pub status: u32,
    /// `Content-Length`, if the server sent one.
    pub content_length: Option<u64>,
}

impl ResponseHead {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Feed one raw header line. A status line starts a new response, so
    /// headers of redirect hops are discarded.
    pub(crate) fn push_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        if line.starts_with("HTTP/") {
            *self = ResponseHead {
                status: parse_status_line(line).unwrap_or(0),
                content_length: None,
            };
            return;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                self.content_length = value.trim().parse::<u64>().ok();
            }
        }
    }
}

/// `HTTP/1.1 200 OK` → 200.
fn parse_status_line(line: &str) -> Option<u32> {
    line.split_whitespace().nth(1)?.parse().ok()
}

/// Parse collected header lines into a ResponseHead.
#[cfg(test)]
pub(crate) fn parse_headers(lines: &[&str]) -> ResponseHead {
    let mut head = ResponseHead::default();
    for line in lines {
        head.push_line(line);
    }
    head
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_and_length() {
        let head = parse_headers(&["HTTP/1.1 200 OK\r\n", "Content-Length: 1000\r\n", "\r\n"]);
        assert_eq!(head.status, 200);
        assert_eq!(head.content_length, Some(1000));
        assert!(head.is_success());
    }

    #[test]
    fn missing_length_is_none() {
        let head = parse_headers(&["HTTP/2 200", "content-type: application/json"]);
        assert_eq!(head.status, 200);
        assert_eq!(head.content_length, None);
    }

    #[test]
    fn redirect_hop_is_discarded() {
        let head = parse_headers(&[
            "HTTP/1.1 302 Found",
            "Content-Length: 12",
            "Location: /real.bin",
            "",
            "HTTP/1.1 200 OK",
            "Content-Length: 4096",
        ]);
        assert_eq!(head.status, 200);
        assert_eq!(head.content_length, Some(4096));
    }

    #[test]
    fn error_status() {
        let head = parse_headers(&["HTTP/1.1 404 Not Found", "Content-Length: 9"]);
        assert_eq!(head.status, 404);
        assert!(!head.is_success());
    }

    #[test]
    fn garbage_length_ignored() {
        let head = parse_headers(&["HTTP/1.1 200 OK", "Content-Length: lots"]);
        assert_eq!(head.content_length, None);
    }
}
