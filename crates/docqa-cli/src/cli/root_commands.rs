use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level commands.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Upload a PDF and ask one or more questions about it.
    Ask(AskArgs),
    /// Interactive question/answer session over stdin.
    Chat(ChatArgs),
}

/// Arguments for `docqa ask`.
#[derive(Clone, Debug, Args)]
pub struct AskArgs {
    /// PDF file to upload.
    pub file: PathBuf,
    /// Questions, asked in the order given.
    #[arg(required = true)]
    pub questions: Vec<String>,
}

/// Arguments for `docqa chat`.
#[derive(Clone, Debug, Args)]
pub struct ChatArgs {
    /// PDF file to open before the first prompt.
    pub file: Option<PathBuf>,
}
