//! [`Args`] definitions.

use clap::{Parser, Subcommand};

/// Terminal client for a remote user directory.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "user-directory.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and store the session token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session token.
    Logout,
    /// Browse, search, edit and delete users interactively.
    Browse {
        /// Page to open first.
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Use this session token instead of the stored one.
        #[arg(long)]
        token: Option<String>,
    },
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_browse_with_page() {
        let args = <Args as Parser>::try_parse_from(["user_directory", "browse", "--page", "2"]).unwrap();
        assert_eq!(args.config, "user-directory.toml");
        assert!(matches!(args.command, Command::Browse { page: 2, token: None }));
    }

    #[test]
    fn browse_accepts_token_override() {
        let args =
            <Args as Parser>::try_parse_from(["user_directory", "browse", "--token", "abc"]).unwrap();
        match args.command {
            Command::Browse { page, token } => {
                assert_eq!(page, 1);
                assert_eq!(token.as_deref(), Some("abc"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn login_requires_credentials() {
        assert!(<Args as Parser>::try_parse_from(["user_directory", "login", "--email", "a@b"]).is_err());
    }
}
