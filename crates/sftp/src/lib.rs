//! sf-sftp: SFTP transport for the sf CLI
//!
//! Implements the `Transport` trait from sf-core on top of russh and
//! russh-sftp. This is the only crate that knows about the wire
//! protocol; everything above it deals in validated requests.

mod client;

pub use client::{HostCheck, SftpTransport};
