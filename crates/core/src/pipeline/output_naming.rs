use std::path::{Path, PathBuf};

use crate::shared::constants::{DEFAULT_OUTPUT_DIR, DEFAULT_OUTPUT_SUFFIX};

/// Where the composed image for an input file is written.
///
/// The output keeps the full input file name, extension included, and
/// appends `suffix`: `in/photo.png` → `<dir>/photo.png-68.jpg`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputNaming {
    pub dir: PathBuf,
    pub suffix: String,
}

impl OutputNaming {
    pub fn new(dir: impl Into<PathBuf>, suffix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            suffix: suffix.into(),
        }
    }

    /// Output path for `input`, or `None` when it has no file name (`..`, `/`).
    pub fn output_path(&self, input: &Path) -> Option<PathBuf> {
        let mut name = input.file_name()?.to_os_string();
        name.push(&self.suffix);
        Some(self.dir.join(name))
    }
}

impl Default for OutputNaming {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR, DEFAULT_OUTPUT_SUFFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::conventional_layout("dane/photo.png", "dane68/photo.png-68.jpg")]
    #[case::nested_directory("shots/2024/me.jpeg", "dane68/me.jpeg-68.jpg")]
    #[case::bare_file_name("face.bmp", "dane68/face.bmp-68.jpg")]
    #[case::no_extension("scan", "dane68/scan-68.jpg")]
    fn test_default_naming(#[case] input: &str, #[case] expected: &str) {
        let naming = OutputNaming::default();
        assert_eq!(
            naming.output_path(Path::new(input)),
            Some(PathBuf::from(expected))
        );
    }

    #[test]
    fn test_custom_dir_and_suffix() {
        let naming = OutputNaming::new("/tmp/out", "_wire.jpg");
        assert_eq!(
            naming.output_path(Path::new("a/b/c.png")),
            Some(PathBuf::from("/tmp/out/c.png_wire.jpg"))
        );
    }

    #[test]
    fn test_path_without_file_name() {
        assert_eq!(OutputNaming::default().output_path(Path::new("..")), None);
    }

    #[test]
    fn test_same_name_in_different_dirs_collides() {
        let naming = OutputNaming::default();
        assert_eq!(
            naming.output_path(Path::new("a/x.png")),
            naming.output_path(Path::new("b/x.png"))
        );
    }
}
