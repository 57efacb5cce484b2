//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Encrypt and decrypt configuration secrets.
#[derive(Parser)]
#[command(name = "confseal", version)]
pub struct Cli {
    #[command(flatten)]
    pub key: KeyArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Where the symmetric key comes from.
///
/// When any of these flags is given, the `CONFSEAL_*` key variables are
/// ignored entirely.
#[derive(Args, Default)]
pub struct KeyArgs {
    /// Base64-encoded 32-byte key.
    #[arg(long, conflicts_with_all = ["key_file", "passphrase"])]
    pub key: Option<String>,

    /// File containing a base64-encoded 32-byte key.
    #[arg(long, conflicts_with = "passphrase")]
    pub key_file: Option<PathBuf>,

    /// Passphrase to derive the key from (PBKDF2-HMAC-SHA256).
    #[arg(long)]
    pub passphrase: Option<String>,

    /// Salt used with --passphrase.
    #[arg(long)]
    pub salt: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Encrypt plaintext into payload text.
    Encrypt {
        #[command(flatten)]
        input: TargetArgs,

        /// Write the payload here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Decrypt payload text.
    Decrypt {
        #[command(flatten)]
        input: TargetArgs,

        /// Write the result here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,

        /// How to render the decrypted text.
        #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
        format: OutputFormat,
    },

    /// Print the envelope header of a payload as JSON. Needs no key.
    Inspect {
        #[command(flatten)]
        input: TargetArgs,
    },
}

/// Literal text or a file to read it from; exactly one is required.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct TargetArgs {
    /// Literal input text.
    #[arg(long)]
    pub text: Option<String>,

    /// Read the input from this file.
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The decrypted text, unchanged.
    Plain,
    /// Parse as properties and print a JSON object.
    Map,
    /// Parse as properties and print normalised `key=value` lines.
    Props,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_decrypt_with_passphrase() {
        let cli = Cli::try_parse_from([
            "confseal",
            "--passphrase",
            "p",
            "--salt",
            "s",
            "decrypt",
            "--text",
            "AAAA",
            "--format",
            "map",
        ])
        .unwrap();
        assert_eq!(cli.key.passphrase.as_deref(), Some("p"));
        assert!(matches!(
            cli.command,
            Command::Decrypt { format: OutputFormat::Map, .. }
        ));
    }

    #[test]
    fn rejects_two_key_sources() {
        let res = Cli::try_parse_from([
            "confseal", "--key", "k", "--passphrase", "p", "encrypt", "--text", "x",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn rejects_text_and_file_together() {
        let res = Cli::try_parse_from([
            "confseal", "encrypt", "--text", "x", "--file", "/tmp/x",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn requires_an_input() {
        assert!(Cli::try_parse_from(["confseal", "inspect"]).is_err());
    }
}
