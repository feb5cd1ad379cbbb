use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use crate::texture_loader::load_sorted_image_paths;

/// One display asset: an opaque file reference plus a human-readable label
/// derived from its file stem (e.g. "UP_03").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameAsset {
    pub path: PathBuf,
    pub label: String,
}

impl FrameAsset {
    pub fn from_path(path: &Path) -> Self {
        let label = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path: path.to_path_buf(), label }
    }

    /// The shipped asset sets mark the dedicated lamp-off shot with an `_OFF`
    /// stem suffix (e.g. `DOWN_OFF.png`).
    pub fn is_off_asset(&self) -> bool {
        self.label.to_lowercase().ends_with("_off")
    }
}

/// The ordered product-shot sequence plus the optional off asset. Immutable
/// for the lifetime of the viewer; the controller only ever reads it.
pub struct FrameSet {
    frames: Vec<FrameAsset>,
    off: Option<FrameAsset>,
}

impl FrameSet {
    pub fn new(frames: Vec<FrameAsset>, off: Option<FrameAsset>) -> Result<Self> {
        if frames.len() < 2 {
            bail!("a scrub sequence needs at least 2 frames, got {}", frames.len());
        }
        Ok(Self { frames, off })
    }

    /// Build a frame set from every raster image in a directory, in file-name
    /// order. Any `_OFF`-stemmed file becomes the off asset; the rest form
    /// the frame sequence.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let paths = load_sorted_image_paths(dir)?;
        let mut frames = Vec::new();
        let mut off = None;
        for path in paths {
            let asset = FrameAsset::from_path(&path);
            if asset.is_off_asset() {
                off = Some(asset);
            } else {
                frames.push(asset);
            }
        }
        Self::new(frames, off)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn frame(&self, index: usize) -> &FrameAsset {
        &self.frames[index]
    }

    pub fn frames(&self) -> &[FrameAsset] {
        &self.frames
    }

    pub fn off_asset(&self) -> Option<&FrameAsset> {
        self.off.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(name: &str) -> FrameAsset {
        FrameAsset::from_path(Path::new(name))
    }

    #[test]
    fn off_asset_is_recognized_by_stem_suffix() {
        assert!(asset("images/DOWN_OFF.png").is_off_asset());
        assert!(asset("images/down_off.webp").is_off_asset());
        assert!(!asset("images/DOWN_0.png").is_off_asset());
        assert!(!asset("images/UP_05.png").is_off_asset());
    }

    #[test]
    fn labels_come_from_file_stems() {
        assert_eq!(asset("images/UP_03.png").label, "UP_03");
    }

    #[test]
    fn rejects_sequences_too_short_to_scrub() {
        assert!(FrameSet::new(vec![asset("a.png")], None).is_err());
        let set = FrameSet::new(vec![asset("a.png"), asset("b.png")], None).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.off_asset().is_none());
    }
}
