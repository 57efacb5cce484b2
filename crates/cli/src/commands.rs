//! Dispatch of parsed subcommands to the codec.
//!
//! Result text goes to stdout or the `--out` file; everything else is logged
//! to stderr without key material or plaintext.

use anyhow::{Context, Result};
use common::Envelope;
use tracing::{debug, info};

use crate::cli::{Cli, Command, OutputFormat};
use crate::config::Config;
use crate::props;
use crate::source::{self, KeySource, Target};

/// Run the selected subcommand to completion.
///
/// # Errors
///
/// Propagates [`common::SealError`] from the codec and key provider unchanged
/// (wrapped in context), plus any I/O or parsing failure.
pub fn run(cli: &Cli, cfg: &Config) -> Result<()> {
    match &cli.command {
        Command::Encrypt { input, out } => {
            let key = KeySource::resolve(&cli.key, cfg)?.load()?;
            let plaintext = Target::from_args(input)?.read_plaintext()?;

            let payload = sealer::encode(&key, &plaintext);
            info!(
                plaintext_bytes = plaintext.len(),
                payload_chars = payload.len(),
                "payload encrypted"
            );
            source::emit(out.as_deref(), &payload)
        }

        Command::Decrypt { input, out, format } => {
            let key = KeySource::resolve(&cli.key, cfg)?.load()?;
            let payload = Target::from_args(input)?.read_payload()?;

            let plaintext = sealer::decode(&key, &payload).context("failed to decrypt payload")?;
            info!(plaintext_bytes = plaintext.len(), ?format, "payload decrypted");

            let rendered = render(&plaintext, *format)?;
            source::emit(out.as_deref(), &rendered)
        }

        Command::Inspect { input } => {
            let payload = Target::from_args(input)?.read_payload()?;
            let info = Envelope::from_payload_text(&payload)
                .context("failed to parse payload envelope")?
                .info();
            debug!(ciphertext_len = info.ciphertext_len, "envelope inspected");
            source::emit(None, &serde_json::to_string(&info)?)
        }
    }
}

/// Render decrypted text in the requested format.
fn render(plaintext: &str, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Plain => Ok(plaintext.to_owned()),
        OutputFormat::Map => {
            let map = props::parse(plaintext).context("decrypted text is not valid properties")?;
            serde_json::to_string_pretty(&map).context("failed to serialise properties map")
        }
        OutputFormat::Props => {
            let map = props::parse(plaintext).context("decrypted text is not valid properties")?;
            Ok(props::render(&map).trim_end_matches('\n').to_owned())
        }
    }
}
