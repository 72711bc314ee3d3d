use std::path::PathBuf;

use clap::Parser;
use papiea_client::Method;

/// Papiea probe
#[derive(Debug, Parser)]
#[command(name = "papiea", about = "Call a Papiea engine and report failures as invocation errors")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "papiea.toml", env = "PAPIEA_CONFIG")]
    pub config: PathBuf,

    /// HTTP method, e.g. GET or POST
    #[arg(value_parser = parse_method)]
    pub method: Method,

    /// Path relative to the configured base URL
    pub path: String,

    /// JSON request body
    #[arg(short, long)]
    pub data: Option<String>,
}

fn parse_method(s: &str) -> Result<Method, String> {
    Method::from_bytes(s.to_ascii_uppercase().as_bytes()).map_err(|e| format!("invalid method '{s}': {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_call() {
        let args = Args::try_parse_from(["papiea", "get", "services/location/0.1.0/Location"]).unwrap();
        assert_eq!(args.method, Method::GET);
        assert_eq!(args.path, "services/location/0.1.0/Location");
        assert!(args.data.is_none());
    }

    #[test]
    fn parses_body_and_config() {
        let args = Args::try_parse_from([
            "papiea",
            "--config",
            "/etc/papiea.toml",
            "POST",
            "services/location/0.1.0/Location",
            "--data",
            r#"{"spec":{"x":1}}"#,
        ])
        .unwrap();

        assert_eq!(args.method, Method::POST);
        assert_eq!(args.config, PathBuf::from("/etc/papiea.toml"));
        assert_eq!(args.data.as_deref(), Some(r#"{"spec":{"x":1}}"#));
    }
}
