//! Request/response role of a message.

use std::fmt;

/// Whether an encoded command travels as a request or a response.
///
/// This is the value of the reserved `Type` header key. When decoding,
/// the literal `Request` selects [`MessageKind::Request`]; any other
/// present value selects [`MessageKind::Response`]. A missing `Type` key
/// is a parse error, never a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// The command is being sent to be executed.
    Request,
    /// The command carries the result of an executed request.
    Response,
}

impl MessageKind {
    /// The literal used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Request => "Request",
            MessageKind::Response => "Response",
        }
    }

    /// Interpret a present `Type` header value.
    ///
    /// `Request` maps to request; anything else maps to response. Absence
    /// of the key is handled by the caller, not here.
    pub fn from_header_value(value: &str) -> MessageKind {
        if value == "Request" {
            MessageKind::Request
        } else {
            MessageKind::Response
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_literal() {
        assert_eq!(MessageKind::Request.as_str(), "Request");
        assert_eq!(MessageKind::from_header_value("Request"), MessageKind::Request);
    }

    #[test]
    fn test_anything_else_is_response() {
        assert_eq!(MessageKind::from_header_value("Response"), MessageKind::Response);
        assert_eq!(MessageKind::from_header_value("request"), MessageKind::Response);
        assert_eq!(MessageKind::from_header_value(""), MessageKind::Response);
    }
}
