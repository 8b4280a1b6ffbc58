use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Locates the on-disk shader directory.
///
/// Shaders ship as data files rather than `include_str!` blobs so artists and
/// modders can iterate on them without rebuilding the game.
#[derive(Debug, Clone)]
pub struct ShaderDir {
    root: PathBuf,
}

impl ShaderDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolution order:
    /// 1. explicit override (settings / command line)
    /// 2. `SLIPSTREAM_DATA` environment variable (`$SLIPSTREAM_DATA/shaders`)
    /// 3. the shaders bundled with this crate (development builds)
    pub fn resolve(override_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = override_dir {
            return Self::new(dir);
        }

        if let Ok(data) = std::env::var("SLIPSTREAM_DATA") {
            return Self::new(PathBuf::from(data).join("shaders"));
        }

        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("shaders"))
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Reads a WGSL source file from the shader directory.
    pub fn load(&self, file: &str) -> Result<String> {
        let path = self.root.join(file);
        std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read shader {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_blur_pair_loads() {
        let dir = ShaderDir::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("shaders"));

        let vert = dir.load("motion_blur.vert.wgsl").unwrap();
        let frag = dir.load("motion_blur.frag.wgsl").unwrap();

        assert!(vert.contains("fn vs_main"));
        assert!(frag.contains("fn fs_main"));
        assert!(frag.contains("boost_amount"));
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = ShaderDir::new("/nonexistent-shader-dir");
        let err = dir.load("motion_blur.vert.wgsl").unwrap_err();
        assert!(format!("{err:#}").contains("motion_blur.vert.wgsl"));
    }
}
