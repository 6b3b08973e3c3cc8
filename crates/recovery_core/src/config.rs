use std::collections::BTreeSet;
use std::path::PathBuf;

/// Posts land in `<output root>/_posts`.
pub const POSTS_DIR: &str = "_posts";
/// Images live in `images` on both sides.
pub const IMAGES_DIR: &str = "images";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryConfig {
    /// Rendered site to mine (Hexo's `public` directory or a deployed copy).
    pub recovery_root: PathBuf,
    /// Blog `source` directory receiving posts and images.
    pub output_root: PathBuf,
    /// Year directories to walk. Empty means every four-digit directory.
    pub year_directories: BTreeSet<String>,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            recovery_root: PathBuf::from("public"),
            output_root: PathBuf::from("source"),
            year_directories: BTreeSet::new(),
        }
    }
}

impl RecoveryConfig {
    pub fn new(recovery_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            recovery_root: recovery_root.into(),
            output_root: output_root.into(),
            ..Self::default()
        }
    }

    pub fn posts_dir(&self) -> PathBuf {
        self.output_root.join(POSTS_DIR)
    }

    pub fn images_output_dir(&self) -> PathBuf {
        self.output_root.join(IMAGES_DIR)
    }

    pub fn images_source_dir(&self) -> PathBuf {
        self.recovery_root.join(IMAGES_DIR)
    }

    /// Whether a directory directly under the recovery root should be walked.
    pub fn accepts_year_directory(&self, name: &str) -> bool {
        if self.year_directories.is_empty() {
            is_four_digit_year(name)
        } else {
            self.year_directories.contains(name)
        }
    }
}

fn is_four_digit_year(name: &str) -> bool {
    name.len() == 4 && name.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_output_directories() {
        let config = RecoveryConfig::new("/site", "/blog/source");
        assert_eq!(config.posts_dir(), PathBuf::from("/blog/source/_posts"));
        assert_eq!(config.images_output_dir(), PathBuf::from("/blog/source/images"));
        assert_eq!(config.images_source_dir(), PathBuf::from("/site/images"));
    }

    #[test]
    fn discovers_four_digit_years_by_default() {
        let config = RecoveryConfig::default();
        assert!(config.accepts_year_directory("2019"));
        assert!(!config.accepts_year_directory("tags"));
        assert!(!config.accepts_year_directory("20190"));
        assert!(!config.accepts_year_directory("２０１９"));
    }

    #[test]
    fn explicit_years_restrict_the_walk() {
        let mut config = RecoveryConfig::default();
        config.year_directories.insert("2020".to_string());
        assert!(config.accepts_year_directory("2020"));
        assert!(!config.accepts_year_directory("2021"));
    }
}
