use std::env;
use std::time::Duration;

pub const DEFAULT_NODE_NAME: &str = "led_strip";
pub const DEFAULT_DURATION_SECS: f64 = 3.0;

/// Runtime configuration for the mock strip binary.
///
/// One behavioural knob (the expiry duration) plus a node name for log
/// identification. Flags win over environment variables, environment
/// variables win over defaults.
pub struct Config {
    pub node_name: String,
    pub duration: Duration,
}

impl Config {
    pub fn from_args() -> Self {
        Self::from_args_iter(env::args())
    }

    pub fn from_args_iter<I, S>(iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut node_name =
            env::var("LEDSTRIP_NODE_NAME").unwrap_or_else(|_| DEFAULT_NODE_NAME.to_string());
        let mut duration_secs = env::var("LEDSTRIP_DURATION")
            .ok()
            .and_then(parse_secs)
            .unwrap_or(DEFAULT_DURATION_SECS);

        let mut args = iter.into_iter();
        let _ = args.next();
        while let Some(arg) = args.next() {
            let arg = arg.as_ref();
            match arg {
                "-h" | "--help" => {
                    print_usage();
                    std::process::exit(0);
                }
                "--node-name" => {
                    if let Some(value) = args.next() {
                        node_name = value.as_ref().to_string();
                    }
                }
                "--duration" => {
                    if let Some(value) = args.next() {
                        if let Some(secs) = parse_secs(value.as_ref().to_string()) {
                            duration_secs = secs;
                        }
                    }
                }
                _ if arg.starts_with("--node-name=") => {
                    node_name = arg["--node-name=".len()..].to_string();
                }
                _ if arg.starts_with("--duration=") => {
                    if let Some(secs) = parse_secs(arg["--duration=".len()..].to_string()) {
                        duration_secs = secs;
                    }
                }
                _ => {}
            }
        }

        Self {
            node_name,
            duration: Duration::from_secs_f64(duration_secs),
        }
    }
}

fn print_usage() {
    println!("ledstrip_mock [--duration <secs>] [--node-name <name>]");
}

/// Tolerant duration parsing: junk or non-positive values fall back to the
/// default rather than aborting a mock service.
fn parse_secs(value: String) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|secs| secs.is_finite() && *secs > 0.0)
}
