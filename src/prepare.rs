//! The full build step: merge, then stamp metadata, then normalize outlines
use crate::{
    filters::{DecomposeFlippedComponents, FontFilter},
    info::{copyright_notice, set_version},
    Font, FontMerger, MergeError, PrepareOptions,
};
use chrono::Datelike;

/// Merge `secondary` into `primary` and make the result ready for
/// compilation
pub fn prepare(
    primary: &Font,
    secondary: &Font,
    options: &PrepareOptions,
) -> Result<Font, MergeError> {
    let mut font = FontMerger::new(primary, secondary, &options.merge).merge()?;
    set_version(&mut font.info, &options.version)?;
    let year = options.year.unwrap_or_else(|| chrono::Local::now().year());
    font.info.copyright = Some(copyright_notice(&options.copyright, year));
    DecomposeFlippedComponents::new().apply(&mut font)?;
    Ok(font)
}
