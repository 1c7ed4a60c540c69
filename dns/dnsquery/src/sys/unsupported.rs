// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::DnsRecordType;
use crate::Error;
use crate::QueryOptions;
use crate::record::DnsRecord;
use std::net::Ipv4Addr;
use widestring::U16CStr;

pub(crate) fn query(
    _name: &U16CStr,
    _record_type: DnsRecordType,
    _options: QueryOptions,
    _server: Option<Ipv4Addr>,
) -> Result<Vec<DnsRecord>, Error> {
    Err(Error::Unsupported)
}
