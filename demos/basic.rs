//! Basic usage example

use envbind::Bind;

#[derive(Debug, Default, Bind)]
struct Config {
    // APP_DATABASE_URL, left empty when unset
    pub database_url: String,

    // APP_PORT, falls back to 8080
    #[env(default = "8080")]
    pub port: u16,

    // APP_DEBUG
    #[env(default = "false")]
    pub debug: bool,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("APP_DATABASE_URL", "postgres://localhost/mydb");
    std::env::set_var("APP_DEBUG", "true");

    let mut config = Config::default();
    envbind::bind("APP", &mut config)?;

    println!("Basic Configuration:");
    println!("  Database URL: {}", config.database_url);
    println!("  Port: {}", config.port);
    println!("  Debug: {}", config.debug);

    Ok(())
}
