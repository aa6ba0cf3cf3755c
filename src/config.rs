// Run configuration: where artifacts go and which ones are written

use std::path::{Path, PathBuf};

pub const DEFAULT_TOKENS_FILE: &str = "tokens.txt";
pub const DEFAULT_TREE_FILE: &str = "tree.json";
pub const DEFAULT_ANNOTATED_FILE: &str = "annotated.json";
pub const DEFAULT_SYMBOLS_FILE: &str = "symbols.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory every artifact path is resolved against
    pub output_dir: PathBuf,
    pub tokens_file: String,
    pub tree_file: String,
    pub annotated_file: String,
    pub symbols_file: String,
    /// When false nothing is written to disk
    pub write_artifacts: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            tokens_file: DEFAULT_TOKENS_FILE.to_string(),
            tree_file: DEFAULT_TREE_FILE.to_string(),
            annotated_file: DEFAULT_ANNOTATED_FILE.to_string(),
            symbols_file: DEFAULT_SYMBOLS_FILE.to_string(),
            write_artifacts: true,
        }
    }
}

impl Config {
    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn tokens_path(&self) -> PathBuf {
        self.output_dir.join(&self.tokens_file)
    }

    pub fn tree_path(&self) -> PathBuf {
        self.output_dir.join(&self.tree_file)
    }

    pub fn annotated_path(&self) -> PathBuf {
        self.output_dir.join(&self.annotated_file)
    }

    pub fn symbols_path(&self) -> PathBuf {
        self.output_dir.join(&self.symbols_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = Config::default().with_output_dir("out");
        assert_eq!(config.tokens_path(), Path::new("out").join("tokens.txt"));
        assert_eq!(config.symbols_path(), Path::new("out").join("symbols.txt"));
        assert!(config.write_artifacts);
    }
}
