// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! `DNS_QUERY_*` option flags.

use bitflags::bitflags;

bitflags! {
    /// Option flags passed to the OS resolver.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct QueryOptions: u32 {
        /// Standard query; no flags set.
        const STANDARD = 0x0000_0000;
        /// Accept a truncated UDP response instead of retrying over TCP.
        const ACCEPT_TRUNCATED_RESPONSE = 0x0000_0001;
        /// Use TCP only.
        const USE_TCP_ONLY = 0x0000_0002;
        /// Ask the server not to recurse.
        const NO_RECURSION = 0x0000_0004;
        /// Skip the resolver cache.
        const BYPASS_CACHE = 0x0000_0008;
        /// Only consult the cache.
        const NO_WIRE_QUERY = 0x0000_0010;
        /// Do not resolve the local machine name.
        const NO_LOCAL_NAME = 0x0000_0020;
        /// Do not consult the hosts file.
        const NO_HOSTS_FILE = 0x0000_0040;
        /// Do not use NetBT resolution.
        const NO_NETBT = 0x0000_0080;
        /// Query the wire only, bypassing cache, hosts file and local names.
        const WIRE_ONLY = 0x0000_0100;
        /// Return the full response message.
        const RETURN_MESSAGE = 0x0000_0200;
        /// Only use multicast resolution.
        const MULTICAST_ONLY = 0x0000_0400;
        /// Do not use multicast resolution.
        const NO_MULTICAST = 0x0000_0800;
        /// Treat the name as fully qualified; no suffix search.
        const TREAT_AS_FQDN = 0x0000_1000;
        /// Only query address types the machine has addresses for.
        const ADDRCONFIG = 0x0000_2000;
        /// Return both IPv4 and IPv6 addresses.
        const DUAL_ADDR = 0x0000_4000;
        /// Wait for the full multicast timeout.
        const MULTICAST_WAIT = 0x0002_0000;
        /// Multicast verification query.
        const MULTICAST_VERIFY = 0x0004_0000;
        /// Return the TTLs as received rather than the remaining cache lifetime.
        const DONT_RESET_TTL_VALUES = 0x0010_0000;
        /// Do not IDN-encode the name.
        const DISABLE_IDN_ENCODING = 0x0020_0000;
        /// Append suffixes to multi-label names as well.
        const APPEND_MULTILABEL = 0x0080_0000;
        /// Set the DNSSEC OK bit.
        const DNSSEC_OK = 0x0100_0000;
        /// Set the DNSSEC checking disabled bit.
        const DNSSEC_CHECKING_DISABLED = 0x0200_0000;
        /// Reserved bits.
        const RESERVED = 0xF000_0000;
    }
}
