//! Version and copyright metadata
use crate::{options::CopyrightNotice, Info, MergeError};

/// Split a `MAJOR.MINOR` version string into its two numbers
pub fn parse_version(version: &str) -> Result<(i32, u32), MergeError> {
    let error = || MergeError::Format {
        version: version.to_string(),
    };
    let (major, minor) = version.trim().split_once('.').ok_or_else(error)?;
    if minor.contains('.') {
        return Err(error());
    }
    let major: u32 = major.parse().map_err(|_| error())?;
    let minor: u32 = minor.parse().map_err(|_| error())?;
    Ok((i32::try_from(major).map_err(|_| error())?, minor))
}

pub fn set_version(info: &mut Info, version: &str) -> Result<(), MergeError> {
    let (major, minor) = parse_version(version)?;
    log::info!("Setting version to {}.{}", major, minor);
    info.version_major = Some(major);
    info.version_minor = Some(minor);
    Ok(())
}

pub fn copyright_notice(notice: &CopyrightNotice, year: i32) -> String {
    format!(
        "Copyright © {}-{} {}, with Reserved Font Name “{}”.",
        notice.first_year, year, notice.holder, notice.reserved_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("2.100", (2, 100))]
    #[case("1.0", (1, 0))]
    #[case(" 1.5\n", (1, 5))]
    fn test_parse_version(#[case] version: &str, #[case] expected: (i32, u32)) {
        assert_eq!(parse_version(version).ok(), Some(expected));
    }

    #[rstest]
    #[case("2")]
    #[case("2.1.3")]
    #[case("a.b")]
    #[case("-1.0")]
    #[case("1.")]
    #[case("")]
    fn test_bad_version(#[case] version: &str) {
        assert!(matches!(
            parse_version(version),
            Err(MergeError::Format { version: v }) if v == version
        ));
    }

    #[test]
    fn test_set_version() -> Result<(), MergeError> {
        let mut info = Info::default();
        set_version(&mut info, "1.4")?;
        assert_eq!(info.version_major, Some(1));
        assert_eq!(info.version_minor, Some(4));
        Ok(())
    }

    #[test]
    fn test_copyright() {
        assert_eq!(
            copyright_notice(&CopyrightNotice::default(), 2024),
            "Copyright © 2015-2024 The Mada Project Authors, with Reserved Font Name “Source”."
        );
    }
}
