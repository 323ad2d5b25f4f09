//! Aliases, defaults and required fields

use envbind::Bind;

#[derive(Debug, Default, Bind)]
struct Config {
    // Reads SVC_REDIS_URL first, then the literal REDIS_URL
    #[env(alias = "REDIS_URL")]
    pub cache_url: String,

    // Reads SVC_BROKER, then BROKER, then falls back to 127.0.0.1
    #[env(alias = "BROKER", default = "127.0.0.1")]
    pub broker_addr: String,

    // Bind fails when SVC_API_KEY is unset
    #[env(require)]
    pub api_key: String,

    // Never read, never mutated
    #[env(ignore)]
    pub computed: String,
}

fn main() -> anyhow::Result<()> {
    // A legacy, unprefixed variable picked up through the alias
    std::env::set_var("REDIS_URL", "redis://localhost:6379");
    std::env::set_var("SVC_API_KEY", "secret123");

    let mut config = Config::default();
    envbind::bind("SVC", &mut config)?;

    println!("Cache URL: {}", config.cache_url);
    println!("Broker: {}", config.broker_addr);
    println!("API key: {}", config.api_key);

    // Unset the required variable to see the error surface
    std::env::remove_var("SVC_API_KEY");
    let err = envbind::bind("SVC", &mut Config::default()).unwrap_err();
    println!("Without SVC_API_KEY: {err}");

    Ok(())
}
