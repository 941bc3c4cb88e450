use crate::cli::actions::Action;
use anyhow::Result;

pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    Ok(Action::Server {
        port: matches.get_one::<u16>("port").copied().unwrap_or(8080),
        sender_email: matches
            .get_one("sender-email")
            .map(|s: &String| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --sender-email"))?,
        max_attempts: matches
            .get_one::<u32>("max-attempts")
            .copied()
            .unwrap_or(3),
        code_length: matches
            .get_one::<usize>("code-length")
            .copied()
            .unwrap_or(6),
        code_ttl_seconds: matches.get_one::<i64>("code-ttl").copied().unwrap_or(300),
        delivery_timeout_seconds: matches
            .get_one::<u64>("delivery-timeout")
            .copied()
            .unwrap_or(10),
        email_endpoint: matches
            .get_one("email-endpoint")
            .map(|s: &String| s.to_string()),
    })
}
