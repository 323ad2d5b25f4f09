//! Binding from an in-memory source
//!
//! `bind_with` takes any `EnvSource`, so configuration logic can be tested
//! without touching the process environment.

use envbind::{Bind, MapSource};

#[derive(Debug, Default, Bind)]
struct Config {
    pub host: String,

    #[env(default = "8080")]
    pub port: u16,

    #[env(require)]
    pub token: String,
}

fn main() -> anyhow::Result<()> {
    let source = MapSource::new()
        .with("APP_HOST", "localhost")
        .with("APP_TOKEN", "t0ken");

    let mut config = Config::default();
    envbind::bind_with("APP", &mut config, &source)?;

    println!("Host: {}", config.host);
    println!("Port: {}", config.port);
    println!("Token: {}", config.token);

    // The same struct binds from the live environment via `bind`
    let empty = MapSource::new();
    let err = envbind::bind_with("APP", &mut Config::default(), &empty).unwrap_err();
    println!("Empty source: {err}");

    Ok(())
}
