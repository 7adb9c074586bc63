//! Transform command handler

use super::utils::{options_from_args, read_document};
use crate::cli::TransformArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use fieldmsg_core::{ErrorHandler, Handled};
use tracing::{debug, info, instrument};

/// Handle the transform command
#[instrument(skip_all, fields(input = ?args.input))]
pub fn handle_transform(args: TransformArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let document = read_document(args.input.as_deref())?;

    let options = config.handler.merged_with(&options_from_args(&args));
    debug!(
        messages = options.messages.as_ref().map(|m| m.len()).unwrap_or(0),
        paths = options.paths.as_ref().map(|p| p.len()).unwrap_or(0),
        "Resolved handler options"
    );

    let handler = ErrorHandler::new(&options);
    match handler.handle_error(document)? {
        Handled::Field(error) => {
            info!(path = %error.path, kind = %error.kind, "Transformed validation failure");
            output.field_error(&error, args.explain)
        }
        Handled::PassThrough(error) => {
            info!("Input is not a validation failure");
            output.passed_through(&error)
        }
    }
}
