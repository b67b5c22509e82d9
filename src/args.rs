use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Print typed front-matter properties
    Props(PropsArgs),
    /// Print the document body without its front matter
    Body(BodyArgs),
    /// Validate front-matter syntax
    Validate(ValidateArgs),
}

#[derive(Args, Debug, Default)]
pub struct ExtractOpts {
    /// Infer value types from their text (flag, date-time, integer, text)
    #[arg(long)]
    pub smart: bool,
    /// Ignore front matter whose YAML cannot be decoded instead of failing
    #[arg(long)]
    pub lenient: bool,
}

#[derive(Args, Debug)]
pub struct PropsArgs {
    /// Only print properties whose name matches this regex
    #[arg(long = "name-regex")]
    pub name_regex: Option<String>,
    /// Print JSON instead of YAML
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub opts: ExtractOpts,

    pub files: Vec<PathBuf>,
}

#[derive(Args, Debug)]
pub struct BodyArgs {
    #[command(flatten)]
    pub opts: ExtractOpts,

    pub files: Vec<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub opts: ExtractOpts,

    pub files: Vec<PathBuf>,
}
