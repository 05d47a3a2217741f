//! Startup banner and shutdown line.

use std::net::SocketAddr;
use std::time::Duration;

use crate::consts::{AUTHOR, HOMEPAGE};

/// Relay configuration for display in the startup banner.
pub struct BannerInfo<'a> {
    pub listen: SocketAddr,
    pub engine: &'a str,
    pub engine_args: &'a [String],
    pub depth: u32,
    pub search_timeout: Option<Duration>,
}

/// Print the startup banner with relay info.
pub fn print_banner(info: &BannerInfo) {
    let engine = if info.engine_args.is_empty() {
        info.engine.to_string()
    } else {
        format!("{} {}", info.engine, info.engine_args.join(" "))
    };
    let timeout = match info.search_timeout {
        Some(limit) => format!("{}s", limit.as_secs()),
        None => "none".to_string(),
    };

    println!(
        r#"
   ╔═══════════════════════════════════════╗
   ║         C H E S S   R E L A Y         ║
   ║   moves in, moves out, engine between ║
   ╚═══════════════════════════════════════╝

   version   {}
   by        {}
   home      {}
   listen    ws://{}
   engine    {}
   depth     {}
   timeout   {}
"#,
        env!("CARGO_PKG_VERSION"),
        AUTHOR,
        HOMEPAGE,
        info.listen,
        engine,
        info.depth,
        timeout,
    );
}

pub fn print_farewell() {
    println!("goodbye.");
}
