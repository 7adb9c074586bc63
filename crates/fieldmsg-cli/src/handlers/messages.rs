//! Messages command handler

use crate::cli::MessagesArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use fieldmsg_core::MessageCatalog;

/// Handle the messages command
pub fn handle_messages(args: MessagesArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let catalog = if args.defaults {
        MessageCatalog::defaults()
    } else {
        config.handler.resolve().messages
    };

    match args.kind {
        Some(kind) => {
            let template = catalog
                .get(&kind)
                .ok_or_else(|| Error::other(format!("No message template for kind '{}'", kind)))?;
            let mut single = MessageCatalog::empty();
            single.insert(kind.as_str(), template);
            output.catalog(&single)
        }
        None => output.catalog(&catalog),
    }
}
