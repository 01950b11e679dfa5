use clap::Parser;

use crate::http::DEFAULT_API_URL;

#[derive(Clone, Debug, Eq, Parser, PartialEq)]
#[command(version, about = "Interactive note client")]
pub struct CliConfig {
    /// Notes endpoint of the backend
    #[arg(long, env = "NOTES_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Keep notes in memory instead of talking to a backend
    #[arg(long)]
    pub offline: bool,

    /// Refuse blank notes in offline mode
    #[arg(long, requires = "offline")]
    pub reject_empty: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_backend() {
        let config = CliConfig::try_parse_from(["notes"]).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(!config.offline);
    }

    #[test]
    fn reject_empty_needs_offline() {
        assert!(CliConfig::try_parse_from(["notes", "--reject-empty"]).is_err());
        let config = CliConfig::try_parse_from(["notes", "--offline", "--reject-empty"]).unwrap();
        assert!(config.offline && config.reject_empty);
    }
}
