//! Environment file loading

use crate::error::Result;

/// Manages `.env` file discovery and loading
pub struct EnvManager;

impl EnvManager {
    /// Load a `.env` file from the working directory if one exists.
    ///
    /// A missing file is not an error; a malformed one is.
    pub fn load_env_file(debug: bool) -> Result<()> {
        match dotenv::dotenv() {
            Ok(path) => {
                if debug {
                    println!("Loaded environment from {}", path.display());
                }
                Ok(())
            }
            // No .env file present
            Err(dotenv::Error::Io(_)) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_env_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let original = std::env::current_dir().unwrap();

        std::env::set_current_dir(dir.path()).unwrap();
        let result = EnvManager::load_env_file(false);
        std::env::set_current_dir(original).unwrap();

        assert!(result.is_ok());
    }
}
