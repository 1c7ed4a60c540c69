// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! DNS lookups through the Windows stub resolver.
//!
//! Queries go through `DnsQuery_W`, so they see the same cache, hosts file and
//! server configuration as the rest of the system. The native result list is
//! decoded into owned [`DnsRecord`]s and released before the query returns.
//!
//! ```no_run
//! use dnsquery::ARecord;
//!
//! for record in dnsquery::query_typed::<ARecord>("example.com", None)? {
//!     println!("{} expires in {}s", record.data.address, record.header.ttl);
//! }
//! # Ok::<(), dnsquery::Error>(())
//! ```
//!
//! On other platforms every query fails with [`Error::Unsupported`].

#[cfg_attr(not(any(windows, test)), expect(dead_code))]
mod decode;
mod error;
mod native;
mod options;
mod record;
mod record_type;
mod sys;

pub use error::DnsStatus;
pub use error::Error;
pub use options::QueryOptions;
pub use record::ARecord;
pub use record::AaaaRecord;
pub use record::CnameRecord;
pub use record::DnsRecord;
pub use record::MxRecord;
pub use record::NsRecord;
pub use record::PtrRecord;
pub use record::RecordData;
pub use record::RecordHeader;
pub use record::RecordKind;
pub use record::SoaRecord;
pub use record::SrvRecord;
pub use record::TxtRecord;
pub use record::TypedRecord;
pub use record_type::DnsRecordType;
pub use record_type::ParseRecordTypeError;
pub use record_type::RecordSection;

use std::net::IpAddr;
use std::net::Ipv4Addr;
use widestring::U16CString;

/// Returns true if queries can be issued on this platform.
pub fn is_supported() -> bool {
    cfg!(windows)
}

/// A DNS query against the OS resolver.
#[derive(Debug, Clone)]
pub struct DnsQuery<'a> {
    name: &'a str,
    server: Option<IpAddr>,
    options: QueryOptions,
}

impl<'a> DnsQuery<'a> {
    /// Creates a query for `name` using the system's configured servers.
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            server: None,
            options: QueryOptions::STANDARD,
        }
    }

    /// Sends the query to `server` instead of the configured servers.
    ///
    /// Only IPv4 (or IPv4-mapped IPv6) addresses can be passed to the native
    /// API; anything else fails when the query is issued.
    pub fn server(mut self, server: IpAddr) -> Self {
        self.server = Some(server);
        self
    }

    /// Sets the query options.
    pub fn options(mut self, options: QueryOptions) -> Self {
        self.options = options;
        self
    }

    /// Looks up records of `record_type`.
    ///
    /// Returns every record in the resolver's response, which can include the
    /// CNAME chain and records from the authority and additional sections.
    pub fn lookup(&self, record_type: DnsRecordType) -> Result<Vec<DnsRecord>, Error> {
        let name = validate_name(self.name)?;
        let server = self.server.map(validate_server).transpose()?;

        tracing::debug!(
            name = self.name,
            %record_type,
            ?server,
            options = ?self.options,
            "issuing DNS query"
        );
        let result = sys::query(&name, record_type, self.options, server);
        match &result {
            Ok(records) => tracing::debug!(
                name = self.name,
                %record_type,
                count = records.len(),
                "DNS query complete"
            ),
            Err(err) => tracing::debug!(
                name = self.name,
                %record_type,
                error = err as &dyn std::error::Error,
                "DNS query failed"
            ),
        }
        result
    }

    /// Looks up records of kind `T`, dropping records of any other type.
    pub fn lookup_typed<T: RecordKind>(&self) -> Result<Vec<TypedRecord<T>>, Error> {
        self.lookup(T::RECORD_TYPE).map(filter_typed)
    }
}

/// Looks up records of `record_type` for `name`, optionally against a specific
/// server.
pub fn query(
    name: &str,
    record_type: DnsRecordType,
    server: Option<IpAddr>,
) -> Result<Vec<DnsRecord>, Error> {
    with_server(DnsQuery::new(name), server).lookup(record_type)
}

/// Looks up records of kind `T` for `name`, optionally against a specific
/// server.
pub fn query_typed<T: RecordKind>(
    name: &str,
    server: Option<IpAddr>,
) -> Result<Vec<TypedRecord<T>>, Error> {
    with_server(DnsQuery::new(name), server).lookup_typed()
}

fn with_server(query: DnsQuery<'_>, server: Option<IpAddr>) -> DnsQuery<'_> {
    match server {
        Some(server) => query.server(server),
        None => query,
    }
}

fn validate_name(name: &str) -> Result<U16CString, Error> {
    if name.is_empty() {
        return Err(Error::EmptyName);
    }
    U16CString::from_str(name).map_err(|_| Error::InvalidName)
}

fn validate_server(server: IpAddr) -> Result<Ipv4Addr, Error> {
    match server {
        IpAddr::V4(addr) => Ok(addr),
        IpAddr::V6(addr) => addr
            .to_ipv4_mapped()
            .ok_or(Error::UnsupportedServerAddress(server)),
    }
}

fn filter_typed<T: RecordKind>(records: Vec<DnsRecord>) -> Vec<TypedRecord<T>> {
    records
        .into_iter()
        .filter_map(DnsRecord::into_typed)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv6Addr;

    fn record(name: &str, data: RecordData) -> DnsRecord {
        let record_type = match &data {
            RecordData::A(_) => DnsRecordType::A,
            RecordData::Cname(_) => DnsRecordType::Cname,
            RecordData::Txt(_) => DnsRecordType::Txt,
            _ => unreachable!(),
        };
        DnsRecord {
            header: RecordHeader {
                name: name.into(),
                record_type,
                ttl: 60,
                section: RecordSection::Answer,
                data_length: 0,
                flags: 0,
            },
            data,
        }
    }

    #[test]
    fn typed_keeps_matching_records() {
        let records = vec![
            record(
                "www.example.com",
                CnameRecord {
                    name_host: "example.com".into(),
                }
                .into(),
            ),
            record(
                "example.com",
                ARecord {
                    address: Ipv4Addr::new(192, 0, 2, 1),
                }
                .into(),
            ),
            record(
                "example.com",
                ARecord {
                    address: Ipv4Addr::new(192, 0, 2, 2),
                }
                .into(),
            ),
        ];

        let a = filter_typed::<ARecord>(records.clone());
        assert_eq!(
            a.iter().map(|r| r.data.address).collect::<Vec<_>>(),
            [Ipv4Addr::new(192, 0, 2, 1), Ipv4Addr::new(192, 0, 2, 2)]
        );
        assert_eq!(a[0].header.name, "example.com");

        let cname = filter_typed::<CnameRecord>(records.clone());
        assert_eq!(cname.len(), 1);
        assert_eq!(cname[0].header.name, "www.example.com");

        assert!(filter_typed::<TxtRecord>(records).is_empty());
    }

    #[test]
    fn rejects_bad_names() {
        assert!(matches!(
            query("", DnsRecordType::A, None),
            Err(Error::EmptyName)
        ));
        assert!(matches!(
            query("exa\0mple.com", DnsRecordType::A, None),
            Err(Error::InvalidName)
        ));
        assert!(matches!(
            query_typed::<TxtRecord>("", None),
            Err(Error::EmptyName)
        ));
    }

    #[test]
    fn server_addresses() {
        assert_eq!(
            validate_server(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8))).unwrap(),
            Ipv4Addr::new(8, 8, 8, 8)
        );
        let mapped = Ipv4Addr::new(1, 1, 1, 1).to_ipv6_mapped();
        assert_eq!(
            validate_server(IpAddr::V6(mapped)).unwrap(),
            Ipv4Addr::new(1, 1, 1, 1)
        );

        let v6 = IpAddr::V6(Ipv6Addr::LOCALHOST);
        let err = DnsQuery::new("example.com")
            .server(v6)
            .lookup(DnsRecordType::A)
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedServerAddress(addr) if addr == v6));
    }

    #[cfg(not(windows))]
    #[test]
    fn unsupported_platform() {
        assert!(!is_supported());
        let err = DnsQuery::new("localhost")
            .options(QueryOptions::BYPASS_CACHE)
            .lookup_typed::<ARecord>()
            .unwrap_err();
        assert!(matches!(err, Error::Unsupported));
    }

    #[cfg(windows)]
    #[test]
    fn localhost_typed() {
        assert!(is_supported());
        let records = query_typed::<ARecord>("localhost", None).unwrap();
        assert!(!records.is_empty());
        assert!(
            records
                .iter()
                .all(|r| r.header.record_type == DnsRecordType::A)
        );
    }
}
