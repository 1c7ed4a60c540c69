// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Decoding of native record lists into owned [`DnsRecord`]s.

// UNSAFETY: Walking and reading native record lists through raw pointers.
#![expect(unsafe_code)]

use crate::native::RawRecord;
use crate::record::ARecord;
use crate::record::AaaaRecord;
use crate::record::CnameRecord;
use crate::record::DnsRecord;
use crate::record::MxRecord;
use crate::record::NsRecord;
use crate::record::PtrRecord;
use crate::record::RecordData;
use crate::record::RecordHeader;
use crate::record::SoaRecord;
use crate::record::SrvRecord;
use crate::record::TxtRecord;
use crate::record_type::DnsRecordType;
use crate::record_type::RecordSection;
use std::net::Ipv4Addr;
use std::net::Ipv6Addr;
use std::ptr::NonNull;
use thiserror::Error;
use widestring::U16CStr;

/// A record that could not be decoded.
#[derive(Debug, Error)]
pub(crate) enum DecodeError {
    #[error("{0} pointer is null")]
    NullPointer(&'static str),
}

/// Releases a native record list.
pub(crate) type FreeFn = unsafe fn(*mut RawRecord);

/// Owns a native record list and releases it exactly once on drop.
pub(crate) struct RecordList {
    head: NonNull<RawRecord>,
    free: FreeFn,
}

impl RecordList {
    /// Takes ownership of the list at `head`. Returns `None` for an empty
    /// (null) list, in which case there is nothing to free.
    ///
    /// # Safety
    ///
    /// `head` must be null or the head of a valid record list that stays
    /// valid until `free` is called on it, and no one else may free it.
    pub unsafe fn from_raw(head: *mut RawRecord, free: FreeFn) -> Option<Self> {
        NonNull::new(head).map(|head| Self { head, free })
    }

    /// Decodes every record in the list, in list order.
    pub fn decode(&self) -> Vec<DnsRecord> {
        // SAFETY: the list is valid for the lifetime of `self`.
        unsafe { decode_list(self.head.as_ptr()) }
    }
}

impl Drop for RecordList {
    fn drop(&mut self) {
        // SAFETY: the list is owned by `self` and this is the only place it
        // is released.
        unsafe { (self.free)(self.head.as_ptr()) };
    }
}

/// Iterator over the records of a native list, following the next links.
struct RawRecordIter {
    current: *const RawRecord,
}

impl Iterator for RawRecordIter {
    type Item = *const RawRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_null() {
            return None;
        }
        let record = self.current;
        // SAFETY: non-null entries of the list are valid records, per the
        // contract of `decode_list`.
        self.current = unsafe { (*record).next };
        Some(record)
    }
}

/// Decodes every record in the list starting at `head`. Records that cannot
/// be decoded are skipped.
///
/// # Safety
///
/// `head` must be null or the head of a valid, null-terminated record list
/// whose string pointers are null or NUL-terminated UTF-16.
pub(crate) unsafe fn decode_list(head: *const RawRecord) -> Vec<DnsRecord> {
    let mut records = Vec::new();
    for record in (RawRecordIter { current: head }) {
        // SAFETY: `record` is a valid entry of the list.
        match unsafe { decode_record(record) } {
            Ok(record) => {
                tracing::trace!(
                    name = %record.header.name,
                    record_type = %record.header.record_type,
                    ttl = record.header.ttl,
                    "decoded DNS record"
                );
                records.push(record);
            }
            Err(err) => {
                // SAFETY: `record` is a valid entry of the list.
                let record_type = DnsRecordType::from(unsafe { (*record).record_type });
                tracing::warn!(
                    error = &err as &dyn std::error::Error,
                    %record_type,
                    "skipping DNS record"
                );
            }
        }
    }
    records
}

/// Decodes a single record.
///
/// # Safety
///
/// `record` must point to a valid record whose data union member matches its
/// type code.
unsafe fn decode_record(record: *const RawRecord) -> Result<DnsRecord, DecodeError> {
    // SAFETY: guaranteed by the caller.
    let raw = unsafe { &*record };
    // SAFETY: string pointers in a valid record are null or NUL-terminated.
    let name = unsafe { wide_to_string(raw.name) }.ok_or(DecodeError::NullPointer("record name"))?;
    let record_type = DnsRecordType::from(raw.record_type);
    let header = RecordHeader {
        name,
        record_type,
        ttl: raw.ttl,
        section: RecordSection::from_flags(raw.flags),
        data_length: raw.data_length,
        flags: raw.flags,
    };

    // SAFETY: the caller guarantees the union member matches the type code,
    // and string pointers are null or NUL-terminated.
    let data = unsafe {
        match record_type {
            DnsRecordType::A => RecordData::A(ARecord {
                // Stored in network byte order; keep the bytes as they are in memory.
                address: Ipv4Addr::from(raw.data.a.ip_address.to_ne_bytes()),
            }),
            DnsRecordType::Aaaa => RecordData::Aaaa(AaaaRecord {
                address: Ipv6Addr::from(raw.data.aaaa.ip6_address),
            }),
            DnsRecordType::Cname => RecordData::Cname(CnameRecord {
                name_host: required_string(raw.data.ptr.name_host, "CNAME host")?,
            }),
            DnsRecordType::Ptr => RecordData::Ptr(PtrRecord {
                name_host: required_string(raw.data.ptr.name_host, "PTR host")?,
            }),
            DnsRecordType::Ns => RecordData::Ns(NsRecord {
                name_host: required_string(raw.data.ptr.name_host, "NS host")?,
            }),
            DnsRecordType::Soa => {
                let soa = raw.data.soa;
                RecordData::Soa(SoaRecord {
                    primary_name_server: required_string(
                        soa.name_primary_server,
                        "SOA primary server",
                    )?,
                    administrator_name: required_string(
                        soa.name_administrator,
                        "SOA administrator",
                    )?,
                    serial_number: soa.serial_no,
                    refresh: soa.refresh,
                    retry: soa.retry,
                    expire: soa.expire,
                    default_ttl: soa.default_ttl,
                })
            }
            DnsRecordType::Mx => {
                let mx = raw.data.mx;
                RecordData::Mx(MxRecord {
                    exchange: required_string(mx.name_exchange, "MX exchange")?,
                    preference: mx.preference,
                })
            }
            DnsRecordType::Srv => {
                let srv = raw.data.srv;
                RecordData::Srv(SrvRecord {
                    target: required_string(srv.name_target, "SRV target")?,
                    priority: srv.priority,
                    weight: srv.weight,
                    port: srv.port,
                })
            }
            DnsRecordType::Txt => RecordData::Txt(decode_txt(record)),
            DnsRecordType::Unknown(type_code) => {
                tracing::debug!(record_type = type_code, "no decoder for DNS record type");
                RecordData::Unknown(type_code)
            }
        }
    };

    Ok(DnsRecord { header, data })
}

/// Decodes the inline string array of a TXT record.
///
/// # Safety
///
/// `record` must point to a valid TXT record followed by `dwStringCount`
/// string pointers.
unsafe fn decode_txt(record: *const RawRecord) -> TxtRecord {
    // The array runs past the end of `RawTxtData`, so index it through a raw
    // pointer derived from the whole record rather than through a reference.
    // SAFETY: guaranteed by the caller.
    let (count, array) = unsafe {
        (
            (*record).data.txt.string_count as usize,
            (&raw const (*record).data.txt.string_array).cast::<*const u16>(),
        )
    };
    let entries = (0..count)
        .filter_map(|i| {
            // SAFETY: `i` is within the string count and each entry is null or
            // a NUL-terminated string.
            unsafe { wide_to_string(array.add(i).read()) }
        })
        .collect();
    TxtRecord { entries }
}

/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated UTF-16 string.
unsafe fn required_string(ptr: *const u16, field: &'static str) -> Result<String, DecodeError> {
    // SAFETY: guaranteed by the caller.
    unsafe { wide_to_string(ptr) }.ok_or(DecodeError::NullPointer(field))
}

/// Converts a wide (UTF-16) C string pointer to a Rust String, replacing
/// invalid sequences.
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated UTF-16 string.
unsafe fn wide_to_string(ptr: *const u16) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    // SAFETY: guaranteed by the caller.
    Some(unsafe { U16CStr::from_ptr_str(ptr) }.to_string_lossy())
}
