//! Wire codec for the flowlink remote command protocol.
//!
//! A message is a single string blob: a comment-block header followed by
//! an optional base64 body, hard-wrapped at 72 columns:
//!
//! ```text
//! #Command=demo.Ping
//! #Type=Request
//! QUJDREVGR0hJSktMTU5PUFFSU1RVVldYWVphYmNkZWZnaGlqa2xtbm9wcXJzdHV2d3h5
//! ekFCQ0RFRg==
//! ```
//!
//! There is no length prefix and no trailing marker; the whole string is
//! the message. Framing (assembling a full message out of network reads)
//! is the transport's problem, not this crate's.
//!
//! Response payloads are gzip-compressed before base64 encoding; request
//! payloads never are. The [`compress`]/[`decompress`] helpers cover the
//! response path; the codec itself is compression-agnostic and moves raw
//! bytes.

mod codec;
mod compress;

pub use codec::{decode, encode, Envelope, WRAP_COLUMNS};
pub use compress::{compress, decompress};
