//! Resolution of key and input sources (literal text or file) and output
//! writing.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sealer::SymmetricKey;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::cli::{KeyArgs, TargetArgs};
use crate::config::Config;

// ---------------------------------------------------------------------------
// Key source
// ---------------------------------------------------------------------------

/// Where the symmetric key comes from. Deliberately not `Debug`.
pub enum KeySource {
    /// Base64 key text given directly.
    Literal(Zeroizing<String>),
    /// File containing base64 key text.
    File(PathBuf),
    /// Passphrase + salt for PBKDF2 derivation.
    Passphrase {
        passphrase: Zeroizing<String>,
        salt: String,
    },
}

impl KeySource {
    /// Pick the key source from command-line flags, falling back to the
    /// environment configuration when no key flag was given at all.
    ///
    /// # Errors
    ///
    /// Returns an error unless exactly one complete key source is present.
    pub fn resolve(args: &KeyArgs, cfg: &Config) -> Result<Self> {
        let from_cli = args.key.is_some()
            || args.key_file.is_some()
            || args.passphrase.is_some()
            || args.salt.is_some();

        let (key, key_file, passphrase, salt) = if from_cli {
            (
                args.key.clone(),
                args.key_file.clone(),
                args.passphrase.clone(),
                args.salt.clone(),
            )
        } else {
            (
                cfg.key.clone(),
                cfg.key_file.as_ref().map(PathBuf::from),
                cfg.passphrase.clone(),
                cfg.salt.clone(),
            )
        };

        let source = match (key, key_file, passphrase, salt) {
            (Some(key), None, None, None) => KeySource::Literal(Zeroizing::new(key)),
            (None, Some(path), None, None) => KeySource::File(path),
            (None, None, Some(passphrase), Some(salt)) => KeySource::Passphrase {
                passphrase: Zeroizing::new(passphrase),
                salt,
            },
            (None, None, Some(_), None) => anyhow::bail!("--passphrase requires --salt"),
            (None, None, None, Some(_)) => anyhow::bail!("--salt requires --passphrase"),
            (None, None, None, None) => anyhow::bail!(
                "no key given: use --key, --key-file or --passphrase with --salt \
                 (or the matching CONFSEAL_* environment variables)"
            ),
            _ => anyhow::bail!(
                "conflicting key sources: give exactly one of --key, --key-file or --passphrase"
            ),
        };
        debug!(source = source.kind(), from_cli, "key source resolved");
        Ok(source)
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            KeySource::Literal(_) => "literal",
            KeySource::File(_) => "file",
            KeySource::Passphrase { .. } => "passphrase",
        }
    }

    /// Produce the key. Key text is trimmed of surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the key file cannot be read, or a
    /// [`sealer::SealError::InvalidKeyMaterial`] from the key provider.
    pub fn load(&self) -> Result<SymmetricKey> {
        let key = match self {
            KeySource::Literal(text) => sealer::import_key(text.trim())?,
            KeySource::File(path) => {
                let text = Zeroizing::new(
                    fs::read_to_string(path)
                        .with_context(|| format!("failed to read key file {}", path.display()))?,
                );
                sealer::import_key(text.trim())?
            }
            KeySource::Passphrase { passphrase, salt } => sealer::derive_key(passphrase, salt)?,
        };
        Ok(key)
    }
}

// ---------------------------------------------------------------------------
// Input target
// ---------------------------------------------------------------------------

/// Literal input text or a file to read it from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Literal(String),
    File(PathBuf),
}

impl Target {
    /// Build from parsed arguments. Clap guarantees exactly one is set.
    pub fn from_args(args: &TargetArgs) -> Result<Self> {
        match (&args.text, &args.file) {
            (Some(text), None) => Ok(Target::Literal(text.clone())),
            (None, Some(path)) => Ok(Target::File(path.clone())),
            _ => anyhow::bail!("exactly one of --text or --file is required"),
        }
    }

    /// Plaintext to encrypt, used verbatim.
    pub fn read_plaintext(&self) -> Result<String> {
        match self {
            Target::Literal(text) => Ok(text.clone()),
            Target::File(path) => fs::read_to_string(path)
                .with_context(|| format!("failed to read input file {}", path.display())),
        }
    }

    /// Payload text to decrypt, trimmed of surrounding whitespace.
    pub fn read_payload(&self) -> Result<String> {
        Ok(self.read_plaintext()?.trim().to_owned())
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Write `text` to `out` verbatim, or to stdout followed by a newline.
pub fn emit(out: Option<&Path>, text: &str) -> Result<()> {
    match out {
        Some(path) => {
            fs::write(path, text)
                .with_context(|| format!("failed to write output file {}", path.display()))?;
            info!(path = %path.display(), bytes = text.len(), "output written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{text}").context("failed to write to stdout")?;
        }
    }
    Ok(())
}
