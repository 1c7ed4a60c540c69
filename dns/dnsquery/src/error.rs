// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Error types.

use std::fmt;
use std::net::IpAddr;
use thiserror::Error;

/// Errors returned by DNS queries.
#[derive(Debug, Error)]
pub enum Error {
    /// The native query returned a non-zero status.
    #[error("DNS query failed: {0}")]
    Query(DnsStatus),
    /// The name to query was empty.
    #[error("DNS name cannot be empty")]
    EmptyName,
    /// The name to query contains an interior NUL character.
    #[error("DNS name contains a NUL character")]
    InvalidName,
    /// The native API can only take IPv4 server addresses.
    #[error("unsupported DNS server address {0}: only IPv4 servers can be specified")]
    UnsupportedServerAddress(IpAddr),
    /// DNS queries through the OS resolver are only available on Windows.
    #[error("DNS queries are not supported on this platform")]
    Unsupported,
}

impl Error {
    /// Returns the native status if this error came from the OS resolver.
    pub fn status(&self) -> Option<DnsStatus> {
        match self {
            Self::Query(status) => Some(*status),
            _ => None,
        }
    }
}

/// A `WIN32_ERROR` status returned by the OS resolver.
#[derive(PartialEq, Eq, Clone, Copy)]
pub struct DnsStatus(u32);

// From winerror.h.
const ERROR_INVALID_NAME: u32 = 123;
const ERROR_TIMEOUT: u32 = 1460;
const DNS_ERROR_RCODE_FORMAT_ERROR: u32 = 9001;
const DNS_ERROR_RCODE_SERVER_FAILURE: u32 = 9002;
const DNS_ERROR_RCODE_NAME_ERROR: u32 = 9003;
const DNS_ERROR_RCODE_NOT_IMPLEMENTED: u32 = 9004;
const DNS_ERROR_RCODE_REFUSED: u32 = 9005;
const DNS_INFO_NO_RECORDS: u32 = 9501;
const DNS_ERROR_BAD_PACKET: u32 = 9502;
const DNS_ERROR_NO_PACKET: u32 = 9503;
const DNS_ERROR_RCODE: u32 = 9504;
const DNS_ERROR_NO_DNS_SERVERS: u32 = 9852;

impl DnsStatus {
    /// Wraps a raw status code.
    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    /// The raw status code.
    pub const fn code(&self) -> u32 {
        self.0
    }

    /// The name does not exist (NXDOMAIN).
    pub fn is_name_error(&self) -> bool {
        self.0 == DNS_ERROR_RCODE_NAME_ERROR
    }

    /// The name exists but has no records of the requested type.
    pub fn is_no_records(&self) -> bool {
        self.0 == DNS_INFO_NO_RECORDS
    }

    /// Maps the status to the DNS response code it stands for, if any.
    pub fn rcode(&self) -> Option<u8> {
        match self.0 {
            DNS_INFO_NO_RECORDS => Some(0),
            DNS_ERROR_RCODE_FORMAT_ERROR => Some(1),
            DNS_ERROR_RCODE_SERVER_FAILURE => Some(2),
            DNS_ERROR_RCODE_NAME_ERROR => Some(3),
            DNS_ERROR_RCODE_NOT_IMPLEMENTED => Some(4),
            DNS_ERROR_RCODE_REFUSED => Some(5),
            _ => None,
        }
    }

    /// The winerror.h symbol for well-known status codes.
    pub fn name(&self) -> Option<&'static str> {
        Some(match self.0 {
            ERROR_INVALID_NAME => "ERROR_INVALID_NAME",
            ERROR_TIMEOUT => "ERROR_TIMEOUT",
            DNS_ERROR_RCODE_FORMAT_ERROR => "DNS_ERROR_RCODE_FORMAT_ERROR",
            DNS_ERROR_RCODE_SERVER_FAILURE => "DNS_ERROR_RCODE_SERVER_FAILURE",
            DNS_ERROR_RCODE_NAME_ERROR => "DNS_ERROR_RCODE_NAME_ERROR",
            DNS_ERROR_RCODE_NOT_IMPLEMENTED => "DNS_ERROR_RCODE_NOT_IMPLEMENTED",
            DNS_ERROR_RCODE_REFUSED => "DNS_ERROR_RCODE_REFUSED",
            DNS_INFO_NO_RECORDS => "DNS_INFO_NO_RECORDS",
            DNS_ERROR_BAD_PACKET => "DNS_ERROR_BAD_PACKET",
            DNS_ERROR_NO_PACKET => "DNS_ERROR_NO_PACKET",
            DNS_ERROR_RCODE => "DNS_ERROR_RCODE",
            DNS_ERROR_NO_DNS_SERVERS => "DNS_ERROR_NO_DNS_SERVERS",
            _ => return None,
        })
    }
}

impl fmt::Debug for DnsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "DnsStatus({name})"),
            None => write!(f, "DnsStatus({})", self.0),
        }
    }
}

impl fmt::Display for DnsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name} ({})", self.0),
            None => write!(f, "status {} (0x{:x})", self.0, self.0),
        }
    }
}

impl From<DnsStatus> for std::io::Error {
    fn from(status: DnsStatus) -> Self {
        std::io::Error::from_raw_os_error(status.0 as i32)
    }
}
