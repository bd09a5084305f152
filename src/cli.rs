use clap::Parser;
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "Estimate a disc golf player's next PDGA rating")]
pub struct Cli {
    /// PDGA number of the player
    #[arg(required_unless_present = "completions")]
    pub pdga_number: Option<u32>,

    /// Hypothetical round ratings, most recent first (e.g. 970,965)
    #[arg(value_delimiter = ',')]
    pub what_if: Vec<i32>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Never color the output
    #[arg(long)]
    pub no_color: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}
