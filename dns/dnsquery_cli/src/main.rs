// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! `dnsq`: look up DNS records through the OS resolver.

use anyhow::Context;
use clap::Parser;
use dnsquery::DnsQuery;
use dnsquery::DnsRecord;
use dnsquery::DnsRecordType;
use dnsquery::QueryOptions;
use std::net::IpAddr;

#[derive(Parser, Debug)]
#[clap(name = "dnsq", about = "Look up DNS records through the OS resolver.")]
struct CmdArgs {
    /// Name to look up.
    name: String,

    /// Record type, as a mnemonic (A, AAAA, TXT, ...) or TYPEnn.
    #[arg(short = 't', long = "type", default_value = "A")]
    record_type: DnsRecordType,

    /// IPv4 address of the server to query instead of the configured ones.
    #[arg(short = 's', long = "server", value_name = "address")]
    server: Option<IpAddr>,

    /// Skip the resolver cache.
    #[arg(long)]
    bypass_cache: bool,

    /// Do not consult the hosts file.
    #[arg(long)]
    no_hosts_file: bool,

    /// Query the wire only, bypassing the cache, hosts file and local names.
    #[arg(long)]
    wire_only: bool,

    /// Use TCP only.
    #[arg(long)]
    tcp: bool,

    /// Print every returned record, not only those of the requested type.
    #[arg(long)]
    all: bool,

    /// Enable verbose logging (trace level)
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl CmdArgs {
    fn options(&self) -> QueryOptions {
        let mut options = QueryOptions::STANDARD;
        for (set, flag) in [
            (self.bypass_cache, QueryOptions::BYPASS_CACHE),
            (self.no_hosts_file, QueryOptions::NO_HOSTS_FILE),
            (self.wire_only, QueryOptions::WIRE_ONLY),
            (self.tcp, QueryOptions::USE_TCP_ONLY),
        ] {
            options.set(flag, set);
        }
        options
    }
}

fn main() -> anyhow::Result<()> {
    let args = CmdArgs::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .log_internal_errors(true)
        .with_max_level(if args.verbose {
            tracing::Level::TRACE
        } else {
            tracing::Level::INFO
        })
        .init();

    if !dnsquery::is_supported() {
        anyhow::bail!("dnsq requires the Windows DNS API");
    }

    let mut query = DnsQuery::new(&args.name).options(args.options());
    if let Some(server) = args.server {
        query = query.server(server);
    }

    let records = query
        .lookup(args.record_type)
        .with_context(|| format!("failed to look up {} {}", args.name, args.record_type))?;

    let records = select(records, args.record_type, args.all);
    if records.is_empty() {
        tracing::info!(name = %args.name, record_type = %args.record_type, "no records");
    }
    for record in records {
        println!("{record}");
    }
    Ok(())
}

fn select(records: Vec<DnsRecord>, record_type: DnsRecordType, all: bool) -> Vec<DnsRecord> {
    if all {
        return records;
    }
    records
        .into_iter()
        .filter(|r| r.header.record_type == record_type)
        .collect()
}
