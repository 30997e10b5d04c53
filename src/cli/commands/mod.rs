use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ColorChoice, Command,
};
use url::Url;

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 4 {
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

pub fn validator_api_url() -> ValueParser {
    ValueParser::from(move |value: &str| -> std::result::Result<String, String> {
        let url = Url::parse(value).map_err(|err| format!("invalid URL: {err}"))?;
        match url.scheme() {
            "http" | "https" => Ok(url.to_string()),
            scheme => Err(format!("unsupported scheme: {scheme}")),
        }
    })
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    Command::new("userdeck")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .help("Endpoint returning the JSON array of users")
                .default_value(crate::DEFAULT_API_URL)
                .env("USERDECK_API_URL")
                .global(true)
                .value_parser(validator_api_url()),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .help("Upstream request timeout in seconds")
                .default_value("10")
                .env("USERDECK_TIMEOUT")
                .global(true)
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("USERDECK_LOG_LEVEL")
                .global(true)
                .action(clap::ArgAction::Count)
                .value_parser(validator_log_level()),
        )
        .subcommand(
            Command::new("serve")
                .about("Serve the user directory page over HTTP")
                .arg(
                    Arg::new("port")
                        .short('p')
                        .long("port")
                        .help("Port to listen on")
                        .default_value("8080")
                        .env("USERDECK_PORT")
                        .value_parser(clap::value_parser!(u16)),
                ),
        )
        .subcommand(
            Command::new("render")
                .about("Load the users once and write the page as HTML")
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("File to write the page to (default: stdout)")
                        .env("USERDECK_OUTPUT"),
                ),
        )
}
