use clap::{
    Arg, ColorChoice, Command,
    builder::{
        ValueParser,
        styling::{AnsiColor, Effects, Styles},
    },
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

pub fn validator_email() -> ValueParser {
    ValueParser::from(move |email: &str| -> std::result::Result<String, String> {
        let normalized = crate::challenge::normalize_email(email);
        if crate::challenge::valid_email(&normalized) {
            Ok(normalized)
        } else {
            Err("invalid email address".to_string())
        }
    })
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("sesamo")
        .about("Passwordless email authentication")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("SESAMO_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("sender-email")
                .short('s')
                .long("sender-email")
                .help("From address for one-time code emails")
                .env("SESAMO_SENDER_EMAIL")
                .value_parser(validator_email())
                .required(true),
        )
        .arg(
            Arg::new("max-attempts")
                .long("max-attempts")
                .help("Challenge rounds before the session fails")
                .default_value("3")
                .env("SESAMO_MAX_ATTEMPTS")
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new("code-length")
                .long("code-length")
                .help("Length of the one-time code")
                .default_value("6")
                .env("SESAMO_CODE_LENGTH")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("code-ttl")
                .long("code-ttl")
                .help("Seconds a one-time code stays valid")
                .default_value("300")
                .env("SESAMO_CODE_TTL")
                .value_parser(clap::value_parser!(i64)),
        )
        .arg(
            Arg::new("delivery-timeout")
                .long("delivery-timeout")
                .help("Seconds to wait for email delivery before failing the round")
                .default_value("10")
                .env("SESAMO_DELIVERY_TIMEOUT")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("email-endpoint")
                .long("email-endpoint")
                .help("Email relay URL; when unset, emails are logged instead of sent")
                .env("SESAMO_EMAIL_ENDPOINT"),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("SESAMO_LOG_LEVEL")
                .global(true)
                .action(clap::ArgAction::Count)
                .value_parser(validator_log_level()),
        )
}
