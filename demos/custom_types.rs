//! Custom parsing through the coercion capabilities
//!
//! Implementing `SetFromStr` (or `UnmarshalText`) on a type takes over
//! coercion for it everywhere it appears, ahead of the built-in rules.

use envbind::{Bind, SetFromStr, UnmarshalText};
use serde::Deserialize;

/// Parsed from a JSON object, e.g. `{"region":"eu-west-1","replicas":3}`.
#[derive(Debug, Default, Deserialize)]
struct Placement {
    region: String,
    replicas: u32,
}

#[derive(Debug, Default)]
struct JsonPlacement(Placement);

impl SetFromStr for JsonPlacement {
    fn set_from_str(&mut self, raw: &str) -> anyhow::Result<()> {
        self.0 = serde_json::from_str(raw)?;
        Ok(())
    }
}

/// Parsed from "host:port" text.
#[derive(Debug, Default)]
struct Endpoint {
    host: String,
    port: u16,
}

impl UnmarshalText for Endpoint {
    fn unmarshal_text(&mut self, text: &[u8]) -> anyhow::Result<()> {
        let raw = std::str::from_utf8(text)?;
        let (host, port) = raw
            .split_once(':')
            .ok_or_else(|| anyhow::anyhow!("expected host:port, got {raw:?}"))?;
        self.host = host.to_string();
        self.port = port.parse()?;
        Ok(())
    }
}

#[derive(Debug, Default, Bind)]
struct Config {
    pub placement: JsonPlacement,
    pub upstream: Endpoint,

    // Capability dispatch applies to container elements too
    pub mirrors: Vec<Endpoint>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("APP_PLACEMENT", r#"{"region":"eu-west-1","replicas":3}"#);
    std::env::set_var("APP_UPSTREAM", "origin.example.com:443");
    std::env::set_var("APP_MIRRORS", "a.example.com:80,b.example.com:80");

    let mut config = Config::default();
    envbind::bind("APP", &mut config)?;

    println!(
        "Placement: {} x{}",
        config.placement.0.region, config.placement.0.replicas
    );
    println!("Upstream: {}:{}", config.upstream.host, config.upstream.port);
    println!("Mirrors: {} entries", config.mirrors.len());

    Ok(())
}
