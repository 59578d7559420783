use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Could not parse document fixture: {0}")]
    FixtureParseError(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Config error: {0}")]
    ConfigError(#[from] config::ConfigError),
    #[error("Other: {0}")]
    Other(#[from] eyre::Report),
}

impl CliError {
    pub fn print_tip(&self) {
        match self {
            CliError::FixtureParseError(error) => {
                eprintln!("💡 Failed to parse the document fixture:");
                if error.is_syntax() {
                    eprintln!(
                        "   • JSON syntax error at line {}, column {}",
                        error.line(),
                        error.column()
                    );
                    eprintln!("   • Check for missing commas, brackets, or quotes near this location");
                } else if error.is_data() {
                    eprintln!("   • Data format error: {error}");
                    eprintln!("   • Every entry needs at least `id` and `matter_id`");
                } else if error.is_eof() {
                    eprintln!("   • Unexpected end of file");
                } else {
                    eprintln!("   • JSON parsing error: {error}");
                }
            }
            CliError::IoError(error) => {
                eprintln!("💡 I/O error occurred:");
                match error.kind() {
                    std::io::ErrorKind::NotFound => {
                        eprintln!("   • File not found, check `documents.fixture_path`");
                    }
                    std::io::ErrorKind::PermissionDenied => {
                        eprintln!("   • Permission denied - check file permissions");
                    }
                    _ => {
                        eprintln!("   • File system error: {error}");
                    }
                }
            }
            CliError::ConfigError(error) => {
                eprintln!("⚙️  Configuration error occurred:");
                eprintln!("   • Error details: {error}");
                eprintln!("   • Run `matterdocs init` to create configuration/config.yml");
            }
            CliError::Other(error) => {
                eprintln!("💡 Unexpected error occurred:");
                eprintln!("   • Error details: {error}");
            }
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::FixtureParseError(_) | CliError::ConfigError(_) => 10,
            CliError::IoError(_) => 11,
            CliError::Other(_) => 99,
        }
    }

    pub fn exit_with_tips(self) -> ! {
        eprintln!("❌ {self}");
        self.print_tip();
        std::process::exit(self.exit_code());
    }
}

pub trait ExitOnError<T> {
    fn or_exit(self) -> T;
}

impl<T> ExitOnError<T> for Result<T, CliError> {
    fn or_exit(self) -> T {
        self.unwrap_or_else(|err| err.exit_with_tips())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_group_by_cause() {
        let parse = serde_json::from_str::<Vec<u8>>("[").unwrap_err();
        assert_eq!(CliError::from(parse).exit_code(), 10);

        let open = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(CliError::from(open).exit_code(), 11);

        assert_eq!(CliError::from(eyre::eyre!("boom")).exit_code(), 99);
    }
}
