// CLASSIFICATION: COMMUNITY
// Filename: mboxsim.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Replay a sequence of mailbox operations against an in-process pool.
//!
//! `mboxsim --config wlbt.toml alloc:2 ptr:1 free:0:2 alloc:4`

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use clap::Parser;
use log::info;
use mifmbox::config::{load_active, load_config};
use mifmbox::{MailboxPool, StaticRegion};

#[derive(Parser)]
#[command(about = "MIF mailbox manager simulator")]
struct Cli {
    /// Mailbox config file (defaults to $MIFMBOX_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Base address of the simulated mailbox region
    #[arg(long, default_value = "0x10000000", value_parser = parse_hex)]
    base: usize,
    /// Operations: alloc:N, free:FIRST:N, ptr:INDEX
    #[arg(required = true)]
    ops: Vec<Op>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Op {
    Alloc(usize),
    Free(usize, usize),
    Ptr(usize),
}

impl FromStr for Op {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let num = |v: &str| v.parse::<usize>().map_err(|e| format!("{s}: {e}"));
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            ["alloc", n] => Ok(Op::Alloc(num(n)?)),
            ["free", first, n] => Ok(Op::Free(num(first)?, num(n)?)),
            ["ptr", index] => Ok(Op::Ptr(num(index)?)),
            _ => Err(format!("unrecognised op {s:?}")),
        }
    }
}

fn parse_hex(s: &str) -> Result<usize, String> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    usize::from_str_radix(digits, 16).map_err(|e| format!("{s}: {e}"))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let layout = match &cli.config {
        Some(path) => load_config(path)?,
        None => load_active(),
    };
    info!("mboxsim: layout {:?} base {:#x}", layout, cli.base);

    let pool = MailboxPool::new(layout, Arc::new(StaticRegion::mapped(cli.base)))?;
    pool.init()?;

    let mut failures = 0;
    for op in &cli.ops {
        let outcome = match *op {
            Op::Alloc(n) => pool
                .alloc_mboxes(n)
                .map(|h| format!("first={} count={}", h.first(), h.count())),
            Op::Free(first, n) => pool.free_mboxes(first, n).map(|()| "ok".to_string()),
            Op::Ptr(index) => pool.mbox_ptr(index).map(|p| format!("{:#x}", p.addr())),
        };
        let bitmap = pool.snapshot()?.bitmap;
        match outcome {
            Ok(msg) => println!("{op:?}: {msg} [{bitmap}]"),
            Err(e) => {
                failures += 1;
                println!("{op:?}: error: {e} [{bitmap}]");
            }
        }
    }
    pool.deinit()?;

    if failures > 0 {
        anyhow::bail!("{failures} operation(s) failed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ops() {
        assert_eq!("alloc:2".parse::<Op>(), Ok(Op::Alloc(2)));
        assert_eq!("free:1:3".parse::<Op>(), Ok(Op::Free(1, 3)));
        assert_eq!("ptr:7".parse::<Op>(), Ok(Op::Ptr(7)));
        assert!("alloc".parse::<Op>().is_err());
        assert!("alloc:x".parse::<Op>().is_err());
        assert!("free:1".parse::<Op>().is_err());
        assert!("ptr:1:2".parse::<Op>().is_err());
        assert!("grab:1".parse::<Op>().is_err());
    }

    #[test]
    fn parses_hex_base() {
        assert_eq!(parse_hex("0x10000000"), Ok(0x1000_0000));
        assert_eq!(parse_hex("0XfF"), Ok(0xff));
        assert_eq!(parse_hex("40"), Ok(0x40));
        assert!(parse_hex("0x0x10").is_err());
        assert!(parse_hex("0x").is_err());
        assert!(parse_hex("zz").is_err());
    }
}
