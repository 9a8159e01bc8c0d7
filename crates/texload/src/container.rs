//! Container type detection.

use std::fmt;
use std::path::Path;

use texload_dds::DDS_MAGIC;

/// The container families this crate can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Dds,
    Radiance,
    PortableFloatMap,
}

impl ContainerKind {
    /// Identify a container from its first bytes.
    ///
    /// ```
    /// use texload::ContainerKind;
    ///
    /// assert_eq!(ContainerKind::detect(b"DDS |"), Some(ContainerKind::Dds));
    /// assert_eq!(ContainerKind::detect(b"#?RADIANCE\n"), Some(ContainerKind::Radiance));
    /// assert_eq!(ContainerKind::detect(b"Pf\n"), Some(ContainerKind::PortableFloatMap));
    /// assert_eq!(ContainerKind::detect(b"\x89PNG"), None);
    /// ```
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [a, b, c, d, ..] if u32::from_le_bytes([*a, *b, *c, *d]) == DDS_MAGIC => {
                Some(ContainerKind::Dds)
            }
            [b'#', b'?', ..] => Some(ContainerKind::Radiance),
            [b'P', b'F' | b'f', end, ..] if end.is_ascii_whitespace() => {
                Some(ContainerKind::PortableFloatMap)
            }
            _ => None,
        }
    }

    /// Identify a container from a file extension, ignoring case.
    pub fn from_extension(path: impl AsRef<Path>) -> Option<Self> {
        let extension = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "dds" => Some(ContainerKind::Dds),
            "hdr" | "pic" => Some(ContainerKind::Radiance),
            "pfm" => Some(ContainerKind::PortableFloatMap),
            _ => None,
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ContainerKind::Dds => "DDS",
            ContainerKind::Radiance => "Radiance HDR",
            ContainerKind::PortableFloatMap => "PFM",
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(b"DDS \x7c\0\0\0", Some(ContainerKind::Dds))]
    #[case(b"#?RGBE\n", Some(ContainerKind::Radiance))]
    #[case(b"#?", Some(ContainerKind::Radiance))]
    #[case(b"PF\n1 1", Some(ContainerKind::PortableFloatMap))]
    #[case(b"PF\r\n", Some(ContainerKind::PortableFloatMap))]
    #[case(b"PFX", None)]
    #[case(b"DDS", None)]
    #[case(b"", None)]
    fn test_detect(#[case] bytes: &[u8], #[case] expected: Option<ContainerKind>) {
        assert_eq!(ContainerKind::detect(bytes), expected);
    }

    #[rstest]
    #[case("a/b/texture.dds", Some(ContainerKind::Dds))]
    #[case("SKY.HDR", Some(ContainerKind::Radiance))]
    #[case("sky.pic", Some(ContainerKind::Radiance))]
    #[case("depth.pfm", Some(ContainerKind::PortableFloatMap))]
    #[case("image.png", None)]
    #[case("no_extension", None)]
    fn test_from_extension(#[case] path: &str, #[case] expected: Option<ContainerKind>) {
        assert_eq!(ContainerKind::from_extension(path), expected);
    }
}
