//! Sequences, maps, durations and timestamps

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use envbind::Bind;

#[derive(Debug, Default, Bind)]
struct Config {
    // APP_ADMIN_USERS, e.g. "alice,bob,carol"
    pub admin_users: Vec<String>,

    // APP_MAGIC_NUMBERS, e.g. "5,10,20"
    pub magic_numbers: Vec<i32>,

    // APP_COLOR_CODES, e.g. "red:1,green:2"
    pub color_codes: HashMap<String, i32>,

    // APP_TIMEOUT, duration syntax: "2m", "500ms", "1h30m"
    #[env(default = "30s")]
    pub timeout: Duration,

    // APP_NOT_BEFORE, RFC-3339
    pub not_before: DateTime<Utc>,

    // APP_FALLBACK_HOST, stays None when unset
    pub fallback_host: Option<String>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("APP_ADMIN_USERS", "alice,bob,carol");
    std::env::set_var("APP_MAGIC_NUMBERS", "5,10,20");
    std::env::set_var("APP_COLOR_CODES", "red:1,green:2,blue:3");
    std::env::set_var("APP_TIMEOUT", "2m");
    std::env::set_var("APP_NOT_BEFORE", "2016-08-16T18:57:05Z");

    let mut config = Config::default();
    envbind::bind("APP", &mut config)?;

    println!("Admins: {:?}", config.admin_users);
    println!("Magic numbers: {:?}", config.magic_numbers);
    println!("Color codes: {:?}", config.color_codes);
    println!("Timeout: {:?}", config.timeout);
    println!("Not before: {}", config.not_before);
    println!("Fallback host: {:?}", config.fallback_host);

    Ok(())
}
