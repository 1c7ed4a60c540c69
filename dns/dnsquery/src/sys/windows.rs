// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! `DnsQuery_W` binding.

// UNSAFETY: FFI calls to the Windows DNS API and ownership of its results.
#![expect(unsafe_code)]

use crate::DnsRecordType;
use crate::DnsStatus;
use crate::Error;
use crate::QueryOptions;
use crate::decode::RecordList;
use crate::native::RawRecord;
use crate::record::DnsRecord;
use std::ffi::c_void;
use std::net::Ipv4Addr;
use std::ptr::null_mut;
use widestring::U16CStr;
use windows_sys::Win32::Foundation::ERROR_SUCCESS;
use windows_sys::Win32::NetworkManagement::Dns::DnsFree;
use windows_sys::Win32::NetworkManagement::Dns::DnsFreeRecordList;
use windows_sys::Win32::NetworkManagement::Dns::DnsQuery_W;
use windows_sys::Win32::NetworkManagement::Dns::IP4_ARRAY;

/// Releases a list returned by `DnsQuery_W`.
///
/// # Safety
///
/// `head` must be a list returned by `DnsQuery_W` that has not been freed.
unsafe fn free_record_list(head: *mut RawRecord) {
    // SAFETY: guaranteed by the caller.
    unsafe { DnsFree(head.cast(), DnsFreeRecordList) };
}

pub(crate) fn query(
    name: &U16CStr,
    record_type: DnsRecordType,
    options: QueryOptions,
    server: Option<Ipv4Addr>,
) -> Result<Vec<DnsRecord>, Error> {
    // Addresses are passed in network byte order.
    let mut servers = server.map(|addr| IP4_ARRAY {
        AddrCount: 1,
        AddrArray: [u32::from_ne_bytes(addr.octets())],
    });
    let extra: *mut c_void = servers
        .as_mut()
        .map_or(null_mut(), |servers| (&raw mut *servers).cast());

    let mut head: *mut RawRecord = null_mut();
    // SAFETY: `name` is NUL-terminated, `extra` is null or points to an
    // IP4_ARRAY that outlives the call, and `head` receives the result list.
    let status = unsafe {
        DnsQuery_W(
            name.as_ptr(),
            record_type.as_u16(),
            options.bits(),
            extra,
            (&raw mut head).cast(),
            null_mut(),
        )
    };

    // A list can come back with a failure status and must still be freed.
    // SAFETY: `head` is null or a list returned by `DnsQuery_W` that nothing
    // else frees.
    let list = unsafe { RecordList::from_raw(head, free_record_list) };

    if status != ERROR_SUCCESS {
        return Err(Error::Query(DnsStatus::new(status)));
    }
    Ok(list.map(|list| list.decode()).unwrap_or_default())
}
