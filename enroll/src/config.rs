use clap::Parser;
use enroll_core::sync::client::DEFAULT_SERVER;
use std::path::PathBuf;

/// A terminal form for registering for a course
#[derive(Debug, Parser)]
#[clap(version)]
pub struct Config {
    /// Which registration server should we talk to? Only the protocol and
    /// domain; the endpoint path is added for you.
    #[clap(long, env = "ENROLL_SERVER", default_value = DEFAULT_SERVER)]
    pub server: String,

    /// Where should we write logs?
    #[clap(long)]
    data_dir: Option<PathBuf>,
}

impl Config {
    /// Get either the configured or a default data directory. If no data
    /// directory can be found (e.g. because `$HOME` is unset) we will use the
    /// current directory.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| {
                directories::ProjectDirs::from("bg", "perfectconsult", "enroll")
                    .map(|dirs| dirs.data_local_dir().to_owned())
            })
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_to_the_course_server() {
        let config = Config::try_parse_from(["enroll"]).unwrap();

        assert_eq!(config.server, DEFAULT_SERVER);
    }

    #[test]
    fn explicit_data_dir_wins() {
        let config =
            Config::try_parse_from(["enroll", "--data-dir", "/tmp/enroll-logs"]).unwrap();

        assert_eq!(config.data_dir(), PathBuf::from("/tmp/enroll-logs"));
    }

    #[test]
    fn server_override() {
        let config =
            Config::try_parse_from(["enroll", "--server", "http://localhost:8000"]).unwrap();

        assert_eq!(config.server, "http://localhost:8000");
    }
}
