//! Command-line argument parsing for vramwatch.

use crate::client::DEFAULT_BASE_URL;

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    /// Base URL of the blackbox server
    pub base_url: String,
    /// Print version information and exit
    pub show_version: bool,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            show_version: false,
        }
    }
}

/// Parse command-line arguments.
///
/// Recognizes `--url <base>` / `--url=<base>` selecting the server
/// base URL and `--version`/`-V`; anything else is ignored.
pub fn parse_args<I>(args: I) -> CliArgs
where
    I: Iterator<Item = String>,
{
    let mut parsed = CliArgs::default();
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => parsed.show_version = true,
            "--url" => {
                if let Some(url) = args.next() {
                    parsed.base_url = url;
                }
            }
            other => {
                if let Some(url) = other.strip_prefix("--url=") {
                    parsed.base_url = url.to_string();
                }
            }
        }
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_no_args_uses_default_url() {
        let args = parse(&["vramwatch"]);
        assert_eq!(args.base_url, DEFAULT_BASE_URL);
        assert!(!args.show_version);
    }

    #[test]
    fn test_parse_url_flag() {
        let args = parse(&["vramwatch", "--url", "http://gpu-box:6767"]);
        assert_eq!(args.base_url, "http://gpu-box:6767");
    }

    #[test]
    fn test_parse_url_equals_form() {
        let args = parse(&["vramwatch", "--url=http://gpu-box:6767"]);
        assert_eq!(args.base_url, "http://gpu-box:6767");
    }

    #[test]
    fn test_parse_version_flag() {
        assert!(parse(&["vramwatch", "--version"]).show_version);
        assert!(parse(&["vramwatch", "-V"]).show_version);
    }

    #[test]
    fn test_parse_unknown_flag_ignored() {
        let args = parse(&["vramwatch", "--unknown"]);
        assert_eq!(args, CliArgs::default());
    }

    #[test]
    fn test_parse_url_flag_missing_value_keeps_default() {
        let args = parse(&["vramwatch", "--url"]);
        assert_eq!(args.base_url, DEFAULT_BASE_URL);
    }
}
