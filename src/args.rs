use clap::Parser;

/// Merge a Latin UFO into an Arabic UFO
#[derive(Parser, Debug)]
#[command(author, about, long_about = None, disable_version_flag = true)]
pub struct Args {
    /// Primary (Arabic) UFO
    pub primary: String,

    /// Secondary (Latin) UFO to merge into the primary
    pub secondary: String,

    /// Output UFO
    #[arg(short, long)]
    pub out_file: String,

    /// Font version, as MAJOR.MINOR
    #[arg(long)]
    pub version: String,

    /// Year to end the copyright range with; defaults to this year
    #[arg(long)]
    pub year: Option<i32>,

    #[command(flatten)]
    pub verbosity: clap_verbosity_flag::Verbosity,

    #[command(flatten)]
    pub stylistic_set: StylisticSetArgs,
}

/// Options for the synthesized stylistic set
#[derive(clap::Args, Debug)]
#[command(next_help_heading = "Stylistic set")]
pub struct StylisticSetArgs {
    /// Glyph whose top edge the moved glyph is aligned to
    #[arg(long, default_value = "kashida-ar")]
    pub reference_glyph: String,

    /// Glyph moved by the stylistic set
    #[arg(long, default_value = "alefMaksura-ar.fina")]
    pub target_glyph: String,

    /// Do not synthesize the stylistic set
    #[arg(long)]
    pub no_stylistic_set: bool,
}

impl Args {
    pub fn options(&self) -> scriptmerge::PrepareOptions {
        let mut options = scriptmerge::PrepareOptions::new(&self.version);
        options.year = self.year;
        options.merge.stylistic_set = if self.stylistic_set.no_stylistic_set {
            None
        } else {
            Some(scriptmerge::StylisticSetAdjustment {
                reference: self.stylistic_set.reference_glyph.clone(),
                target: self.stylistic_set.target_glyph.clone(),
                ..Default::default()
            })
        };
        options
    }
}
