// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! `#[repr(C)]` mirrors of the record structures returned by `DnsQuery_W`.
//!
//! These match `DNS_RECORDW` and its data union member for member, so a list
//! returned by the OS can be walked through them directly. Keeping our own
//! definitions lets the decoder build and be tested on every platform; on
//! Windows the layouts are checked against `windows-sys` at compile time.

/// Common header of a `DNS_RECORDW`, followed by the data union.
#[repr(C)]
pub(crate) struct RawRecord {
    pub next: *mut RawRecord,
    pub name: *mut u16,
    pub record_type: u16,
    pub data_length: u16,
    pub flags: u32,
    pub ttl: u32,
    pub _reserved: u32,
    pub data: RawRecordData,
}

/// The subset of the `DNS_RECORDW` data union that is decoded.
///
/// The native union is larger; only the prefix for these members is ever read.
#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) union RawRecordData {
    pub a: RawAData,
    pub aaaa: RawAaaaData,
    /// Shared by PTR, NS and CNAME.
    pub ptr: RawPtrData,
    pub soa: RawSoaData,
    pub mx: RawMxData,
    pub txt: RawTxtData,
    pub srv: RawSrvData,
}

/// `DNS_A_DATA`. The address is stored in network byte order.
#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) struct RawAData {
    pub ip_address: u32,
}

/// `DNS_AAAA_DATA`.
#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) struct RawAaaaData {
    pub ip6_address: [u8; 16],
}

/// `DNS_PTR_DATAW`.
#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) struct RawPtrData {
    pub name_host: *mut u16,
}

/// `DNS_SOA_DATAW`.
#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) struct RawSoaData {
    pub name_primary_server: *mut u16,
    pub name_administrator: *mut u16,
    pub serial_no: u32,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub default_ttl: u32,
}

/// `DNS_MX_DATAW`.
#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) struct RawMxData {
    pub name_exchange: *mut u16,
    pub preference: u16,
    pub _pad: u16,
}

/// `DNS_TXT_DATAW`. `string_array` is a flexible array of `string_count`
/// entries that continues past the end of the struct.
#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) struct RawTxtData {
    pub string_count: u32,
    pub string_array: [*mut u16; 1],
}

/// `DNS_SRV_DATAW`.
#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) struct RawSrvData {
    pub name_target: *mut u16,
    pub priority: u16,
    pub weight: u16,
    pub port: u16,
    pub _pad: u16,
}

#[cfg(windows)]
mod layout {
    use super::*;
    use static_assertions::const_assert_eq;
    use std::mem::offset_of;
    use std::mem::size_of;
    use windows_sys::Win32::NetworkManagement::Dns as dns;

    const_assert_eq!(offset_of!(RawRecord, next), offset_of!(dns::DNS_RECORDW, pNext));
    const_assert_eq!(offset_of!(RawRecord, name), offset_of!(dns::DNS_RECORDW, pName));
    const_assert_eq!(offset_of!(RawRecord, record_type), offset_of!(dns::DNS_RECORDW, wType));
    const_assert_eq!(
        offset_of!(RawRecord, data_length),
        offset_of!(dns::DNS_RECORDW, wDataLength)
    );
    const_assert_eq!(offset_of!(RawRecord, flags), offset_of!(dns::DNS_RECORDW, Flags));
    const_assert_eq!(offset_of!(RawRecord, ttl), offset_of!(dns::DNS_RECORDW, dwTtl));
    const_assert_eq!(offset_of!(RawRecord, data), offset_of!(dns::DNS_RECORDW, Data));

    const_assert_eq!(size_of::<RawAData>(), size_of::<dns::DNS_A_DATA>());
    const_assert_eq!(size_of::<RawAaaaData>(), size_of::<dns::DNS_AAAA_DATA>());
    const_assert_eq!(size_of::<RawPtrData>(), size_of::<dns::DNS_PTR_DATAW>());
    const_assert_eq!(size_of::<RawSoaData>(), size_of::<dns::DNS_SOA_DATAW>());
    const_assert_eq!(
        offset_of!(RawSoaData, serial_no),
        offset_of!(dns::DNS_SOA_DATAW, dwSerialNo)
    );
    const_assert_eq!(size_of::<RawMxData>(), size_of::<dns::DNS_MX_DATAW>());
    const_assert_eq!(
        offset_of!(RawMxData, preference),
        offset_of!(dns::DNS_MX_DATAW, wPreference)
    );
    const_assert_eq!(size_of::<RawTxtData>(), size_of::<dns::DNS_TXT_DATAW>());
    const_assert_eq!(
        offset_of!(RawTxtData, string_array),
        offset_of!(dns::DNS_TXT_DATAW, pStringArray)
    );
    const_assert_eq!(size_of::<RawSrvData>(), size_of::<dns::DNS_SRV_DATAW>());
    const_assert_eq!(offset_of!(RawSrvData, port), offset_of!(dns::DNS_SRV_DATAW, wPort));
}

/// Builds native record lists in Rust memory for decoder tests.
#[cfg(test)]
pub(crate) mod testing {
    // UNSAFETY: Writing native record layouts into raw buffers.
    #![expect(unsafe_code)]

    use super::*;
    use std::mem::size_of;
    use std::ptr::null_mut;
    use widestring::U16CString;

    /// Owns the records and strings of a hand-built list. The list is valid
    /// for as long as the builder is alive.
    #[derive(Default)]
    pub(crate) struct ListBuilder {
        strings: Vec<U16CString>,
        nodes: Vec<Box<[usize]>>,
    }

    impl ListBuilder {
        /// Stores `s` as a NUL-terminated UTF-16 string and returns a pointer to it.
        pub fn wide(&mut self, s: &str) -> *mut u16 {
            let s = U16CString::from_str(s).unwrap();
            let ptr = s.as_ptr().cast_mut();
            self.strings.push(s);
            ptr
        }

        /// Stores raw UTF-16 units, appending the terminator.
        pub fn wide_units(&mut self, units: &[u16]) -> *mut u16 {
            let s = U16CString::from_vec_truncate(units.to_vec());
            let ptr = s.as_ptr().cast_mut();
            self.strings.push(s);
            ptr
        }

        fn alloc(&mut self, extra_pointers: usize) -> *mut RawRecord {
            let bytes = size_of::<RawRecord>() + extra_pointers * size_of::<*mut u16>();
            let words = bytes.div_ceil(size_of::<usize>());
            let mut node = vec![0usize; words].into_boxed_slice();
            let ptr = node.as_mut_ptr().cast::<RawRecord>();
            self.nodes.push(node);
            ptr
        }

        /// Appends a record with the given data union.
        pub fn push(
            &mut self,
            name: &str,
            record_type: u16,
            flags: u32,
            ttl: u32,
            data: RawRecordData,
        ) -> &mut Self {
            let name = self.wide(name);
            self.push_raw(name, record_type, flags, ttl, data)
        }

        /// Appends a record with a null owner name.
        pub fn push_unnamed(
            &mut self,
            record_type: u16,
            flags: u32,
            ttl: u32,
            data: RawRecordData,
        ) -> &mut Self {
            self.push_raw(null_mut(), record_type, flags, ttl, data)
        }

        fn push_raw(
            &mut self,
            name: *mut u16,
            record_type: u16,
            flags: u32,
            ttl: u32,
            data: RawRecordData,
        ) -> &mut Self {
            let ptr = self.alloc(0);
            // SAFETY: `ptr` points to a zeroed, suitably aligned buffer large
            // enough for a `RawRecord`.
            unsafe {
                ptr.write(RawRecord {
                    next: null_mut(),
                    name,
                    record_type,
                    data_length: size_of::<RawRecordData>() as u16,
                    flags,
                    ttl,
                    _reserved: 0,
                    data,
                })
            };
            self
        }

        /// Appends an answer-section TXT record with the given strings.
        pub fn push_txt(&mut self, name: &str, ttl: u32, entries: &[&str]) -> &mut Self {
            let entries: Vec<Option<&str>> = entries.iter().copied().map(Some).collect();
            self.push_txt_slots(name, ttl, &entries)
        }

        /// Appends an answer-section TXT record. `None` slots are stored as
        /// null string pointers.
        pub fn push_txt_slots(
            &mut self,
            name: &str,
            ttl: u32,
            entries: &[Option<&str>],
        ) -> &mut Self {
            let name = self.wide(name);
            let strings: Vec<*mut u16> = entries
                .iter()
                .map(|e| e.map_or(null_mut(), |e| self.wide(e)))
                .collect();
            let ptr = self.alloc(strings.len().saturating_sub(1));
            // SAFETY: the buffer is large enough for the header, the count and
            // `strings.len()` inline pointers.
            unsafe {
                ptr.write(RawRecord {
                    next: null_mut(),
                    name,
                    record_type: 16,
                    data_length: (size_of::<u32>() + strings.len() * size_of::<*mut u16>())
                        as u16,
                    flags: 1,
                    ttl,
                    _reserved: 0,
                    data: RawRecordData {
                        txt: RawTxtData {
                            string_count: strings.len() as u32,
                            string_array: [null_mut()],
                        },
                    },
                });
                let array = (&raw mut (*ptr).data.txt.string_array).cast::<*mut u16>();
                for (i, s) in strings.into_iter().enumerate() {
                    array.add(i).write(s);
                }
            }
            self
        }

        /// Links the records in push order and returns the head, or null if
        /// nothing was pushed.
        pub fn head(&mut self) -> *const RawRecord {
            let ptrs: Vec<*mut RawRecord> = self
                .nodes
                .iter_mut()
                .map(|node| node.as_mut_ptr().cast::<RawRecord>())
                .collect();
            for pair in ptrs.windows(2) {
                // SAFETY: both pointers refer to records owned by `self.nodes`.
                unsafe { (&raw mut (*pair[0]).next).write(pair[1]) };
            }
            ptrs.first().map_or(std::ptr::null(), |p| p.cast_const())
        }
    }
}
