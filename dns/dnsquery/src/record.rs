// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Typed DNS records.
//!
//! Every record is decoded once from the OS resolver's result list and owns
//! all of its data; nothing here points back into native memory.

use crate::record_type::DnsRecordType;
use crate::record_type::RecordSection;
use std::fmt;
use std::net::Ipv4Addr;
use std::net::Ipv6Addr;

/// Fields shared by every record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordHeader {
    /// Owner name of the record.
    pub name: String,
    /// Record type as returned by the resolver.
    pub record_type: DnsRecordType,
    /// Time-to-live in seconds.
    pub ttl: u32,
    /// Message section the record came from.
    pub section: RecordSection,
    /// Size of the native data portion in bytes.
    pub data_length: u16,
    /// Raw native record flags.
    pub flags: u32,
}

/// An IPv4 address record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ARecord {
    /// The host address.
    pub address: Ipv4Addr,
}

impl ARecord {
    /// The address as the resolver stores it: network-order bytes read as a
    /// native `u32`.
    pub fn numeric_address(&self) -> u32 {
        u32::from_ne_bytes(self.address.octets())
    }

    /// The address as a host-order integer, e.g. `0xc0a80102` for
    /// `192.168.1.2`.
    pub fn host_order_address(&self) -> u32 {
        self.address.into()
    }
}

/// An IPv6 address record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AaaaRecord {
    /// The host address.
    pub address: Ipv6Addr,
}

impl AaaaRecord {
    /// The address bytes read as a little-endian two's complement integer.
    pub fn numeric_address(&self) -> i128 {
        i128::from_le_bytes(self.address.octets())
    }

    /// The address as a host-order integer.
    pub fn host_order_address(&self) -> u128 {
        self.address.into()
    }
}

/// A canonical name (alias) record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CnameRecord {
    /// The canonical name.
    pub name_host: String,
}

/// A domain name pointer record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PtrRecord {
    /// The name pointed to.
    pub name_host: String,
}

/// A name server record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NsRecord {
    /// The name server host.
    pub name_host: String,
}

/// A start of authority record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoaRecord {
    /// Primary name server for the zone.
    pub primary_name_server: String,
    /// Mailbox of the zone administrator.
    pub administrator_name: String,
    /// Zone serial number.
    pub serial_number: u32,
    /// Refresh interval in seconds.
    pub refresh: u32,
    /// Retry interval in seconds.
    pub retry: u32,
    /// Expiry limit in seconds.
    pub expire: u32,
    /// Minimum TTL for the zone.
    pub default_ttl: u32,
}

/// A service locator record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrvRecord {
    /// Target host.
    pub target: String,
    /// Priority; lower is preferred.
    pub priority: u16,
    /// Relative weight among records of equal priority.
    pub weight: u16,
    /// Service port.
    pub port: u16,
}

/// A mail exchange record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MxRecord {
    /// Mail exchange host.
    pub exchange: String,
    /// Preference; lower is preferred.
    pub preference: u16,
}

/// A text record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TxtRecord {
    /// The character strings, in order.
    pub entries: Vec<String>,
}

/// Decoded payload of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    /// A record.
    A(ARecord),
    /// AAAA record.
    Aaaa(AaaaRecord),
    /// CNAME record.
    Cname(CnameRecord),
    /// PTR record.
    Ptr(PtrRecord),
    /// NS record.
    Ns(NsRecord),
    /// SOA record.
    Soa(SoaRecord),
    /// SRV record.
    Srv(SrvRecord),
    /// MX record.
    Mx(MxRecord),
    /// TXT record.
    Txt(TxtRecord),
    /// A record type this crate has no decoder for.
    Unknown(u16),
}

/// A record returned by an untyped lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRecord {
    /// Common record fields.
    pub header: RecordHeader,
    /// Decoded payload.
    pub data: RecordData,
}

/// A record returned by a typed lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedRecord<T> {
    /// Common record fields.
    pub header: RecordHeader,
    /// Decoded payload.
    pub data: T,
}

/// A record payload that can be requested by type.
pub trait RecordKind: Sized {
    /// The record type to query for.
    const RECORD_TYPE: DnsRecordType;

    /// Extracts the payload if `data` is of this kind.
    fn from_data(data: RecordData) -> Option<Self>;
}

macro_rules! record_kind {
    ($($ty:ident => $variant:ident,)*) => {
        $(
            impl RecordKind for $ty {
                const RECORD_TYPE: DnsRecordType = DnsRecordType::$variant;

                fn from_data(data: RecordData) -> Option<Self> {
                    match data {
                        RecordData::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for RecordData {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

record_kind! {
    ARecord => A,
    AaaaRecord => Aaaa,
    CnameRecord => Cname,
    PtrRecord => Ptr,
    NsRecord => Ns,
    SoaRecord => Soa,
    SrvRecord => Srv,
    MxRecord => Mx,
    TxtRecord => Txt,
}

impl DnsRecord {
    /// Converts into a typed record if the payload is of kind `T`.
    pub fn into_typed<T: RecordKind>(self) -> Option<TypedRecord<T>> {
        let data = T::from_data(self.data)?;
        Some(TypedRecord {
            header: self.header,
            data,
        })
    }
}

impl fmt::Display for ARecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.address.fmt(f)
    }
}

impl fmt::Display for AaaaRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.address.fmt(f)
    }
}

impl fmt::Display for CnameRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name_host)
    }
}

impl fmt::Display for PtrRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name_host)
    }
}

impl fmt::Display for NsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name_host)
    }
}

impl fmt::Display for SoaRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {}",
            self.primary_name_server,
            self.administrator_name,
            self.serial_number,
            self.refresh,
            self.retry,
            self.expire,
            self.default_ttl
        )
    }
}

impl fmt::Display for SrvRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.priority, self.weight, self.port, self.target
        )
    }
}

impl fmt::Display for MxRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.preference, self.exchange)
    }
}

impl fmt::Display for TxtRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{entry:?}")?;
        }
        Ok(())
    }
}

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A(r) => r.fmt(f),
            Self::Aaaa(r) => r.fmt(f),
            Self::Cname(r) => r.fmt(f),
            Self::Ptr(r) => r.fmt(f),
            Self::Ns(r) => r.fmt(f),
            Self::Soa(r) => r.fmt(f),
            Self::Srv(r) => r.fmt(f),
            Self::Mx(r) => r.fmt(f),
            Self::Txt(r) => r.fmt(f),
            Self::Unknown(ty) => write!(f, "\\# (type {ty})"),
        }
    }
}

impl fmt::Display for DnsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.header.name,
            self.header.ttl,
            self.header.section,
            self.header.record_type,
            self.data
        )
    }
}

static_assertions::assert_impl_all!(DnsRecord: Send, Sync);
static_assertions::assert_impl_all!(TypedRecord<TxtRecord>: Send, Sync);
