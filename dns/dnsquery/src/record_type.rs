// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! DNS record type codes and record sections.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// DNS record types understood by this crate.
///
/// Types without a dedicated decoder are carried as [`DnsRecordType::Unknown`]
/// so that they can still be queried and reported.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub enum DnsRecordType {
    /// IPv4 host address.
    A,
    /// Authoritative name server.
    Ns,
    /// Canonical name for an alias.
    Cname,
    /// Start of a zone of authority.
    Soa,
    /// Domain name pointer.
    Ptr,
    /// Mail exchange.
    Mx,
    /// Text strings.
    Txt,
    /// IPv6 host address.
    Aaaa,
    /// Service locator.
    Srv,
    /// Any other type code.
    Unknown(u16),
}

impl DnsRecordType {
    /// Convert the record type to its raw u16 value.
    pub fn as_u16(&self) -> u16 {
        match self {
            Self::A => 1,
            Self::Ns => 2,
            Self::Cname => 5,
            Self::Soa => 6,
            Self::Ptr => 12,
            Self::Mx => 15,
            Self::Txt => 16,
            Self::Aaaa => 28,
            Self::Srv => 33,
            Self::Unknown(x) => *x,
        }
    }

    fn mnemonic(&self) -> Option<&'static str> {
        Some(match self {
            Self::A => "A",
            Self::Ns => "NS",
            Self::Cname => "CNAME",
            Self::Soa => "SOA",
            Self::Ptr => "PTR",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Aaaa => "AAAA",
            Self::Srv => "SRV",
            Self::Unknown(_) => return None,
        })
    }
}

impl From<u16> for DnsRecordType {
    fn from(value: u16) -> Self {
        match value {
            1 => Self::A,
            2 => Self::Ns,
            5 => Self::Cname,
            6 => Self::Soa,
            12 => Self::Ptr,
            15 => Self::Mx,
            16 => Self::Txt,
            28 => Self::Aaaa,
            33 => Self::Srv,
            x => Self::Unknown(x),
        }
    }
}

impl From<DnsRecordType> for u16 {
    fn from(value: DnsRecordType) -> Self {
        value.as_u16()
    }
}

impl fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mnemonic() {
            Some(name) => f.write_str(name),
            None => write!(f, "TYPE{}", self.as_u16()),
        }
    }
}

/// Error returned when parsing a [`DnsRecordType`] from a string fails.
#[derive(Debug, Error)]
#[error("unrecognized DNS record type: {0:?}")]
pub struct ParseRecordTypeError(String);

impl FromStr for DnsRecordType {
    type Err = ParseRecordTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        let ty = match upper.as_str() {
            "A" => Self::A,
            "NS" => Self::Ns,
            "CNAME" => Self::Cname,
            "SOA" => Self::Soa,
            "PTR" => Self::Ptr,
            "MX" => Self::Mx,
            "TXT" => Self::Txt,
            "AAAA" => Self::Aaaa,
            "SRV" => Self::Srv,
            other => {
                // RFC 3597 generic form, e.g. TYPE65.
                let code = other
                    .strip_prefix("TYPE")
                    .filter(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
                    .and_then(|n| n.parse::<u16>().ok())
                    .ok_or_else(|| ParseRecordTypeError(s.to_owned()))?;
                Self::from(code)
            }
        };
        Ok(ty)
    }
}

/// The message section a record was returned in.
///
/// Stored in bits 0-1 of the native record flags.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum RecordSection {
    /// Question section.
    Question,
    /// Answer section.
    Answer,
    /// Authority section.
    Authority,
    /// Additional section.
    Additional,
}

impl RecordSection {
    const MASK: u32 = 0x3;

    /// Extracts the section from the raw native record flags.
    pub fn from_flags(flags: u32) -> Self {
        match flags & Self::MASK {
            0 => Self::Question,
            1 => Self::Answer,
            2 => Self::Authority,
            _ => Self::Additional,
        }
    }
}

impl fmt::Display for RecordSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Question => "question",
            Self::Answer => "answer",
            Self::Authority => "authority",
            Self::Additional => "additional",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_values_round_trip() {
        for code in 0..=u16::MAX {
            assert_eq!(DnsRecordType::from(code).as_u16(), code);
        }
        assert_eq!(DnsRecordType::from(28), DnsRecordType::Aaaa);
        assert_eq!(DnsRecordType::from(65), DnsRecordType::Unknown(65));
    }

    #[test]
    fn display_and_parse() {
        assert_eq!(DnsRecordType::Cname.to_string(), "CNAME");
        assert_eq!(DnsRecordType::Unknown(65).to_string(), "TYPE65");
        assert_eq!("aaaa".parse::<DnsRecordType>().unwrap(), DnsRecordType::Aaaa);
        assert_eq!("Srv".parse::<DnsRecordType>().unwrap(), DnsRecordType::Srv);
        assert_eq!(
            "TYPE65".parse::<DnsRecordType>().unwrap(),
            DnsRecordType::Unknown(65)
        );
        assert_eq!("type1".parse::<DnsRecordType>().unwrap(), DnsRecordType::A);
        assert!("bogus".parse::<DnsRecordType>().is_err());
        assert!("TYPE70000".parse::<DnsRecordType>().is_err());
    }

    #[test]
    fn generic_type_needs_plain_digits() {
        for bad in ["TYPE+1", "TYPE", "TYPE-1", "TYPE 1", "TYPE1 "] {
            assert!(bad.parse::<DnsRecordType>().is_err(), "{bad}");
        }
        assert_eq!(
            "TYPE0065".parse::<DnsRecordType>().unwrap(),
            DnsRecordType::Unknown(65)
        );
    }

    #[test]
    fn section_from_flags() {
        assert_eq!(RecordSection::from_flags(0), RecordSection::Question);
        assert_eq!(RecordSection::from_flags(1), RecordSection::Answer);
        // Only the low two bits carry the section; the charset bits are ignored.
        assert_eq!(RecordSection::from_flags(0x0000_0009), RecordSection::Answer);
        assert_eq!(RecordSection::from_flags(0x0000_0012), RecordSection::Authority);
        assert_eq!(RecordSection::from_flags(3), RecordSection::Additional);
    }
}
