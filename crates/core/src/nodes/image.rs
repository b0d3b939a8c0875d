use std::io;
use std::path::{Path, PathBuf};

use crate::error::NodeError;
use crate::node::{type_tags, Describable, InputOptions, InputSpec, InputType};

/// Upscale methods offered by [`ImageScale`].
pub const UPSCALE_METHODS: &[&str] = &["nearest-exact", "bilinear", "area"];

/// Crop modes offered by [`ImageScale`].
pub const CROP_MODES: &[&str] = &["disabled", "center"];

/// Loads an image from the input directory.
///
/// The `image` choice list is read from disk on every description, so files
/// dropped into the directory show up on the next catalog query.
pub struct LoadImage {
    input_dir: PathBuf,
}

impl LoadImage {
    pub fn new(input_dir: impl AsRef<Path>) -> Self {
        Self {
            input_dir: input_dir.as_ref().to_path_buf(),
        }
    }

    /// Sorted names of the regular, non-hidden files in the input directory.
    ///
    /// A missing directory yields an empty list. Entries that vanish while
    /// listing, or whose names are not valid UTF-8, are skipped.
    fn list_input_files(&self) -> Result<Vec<String>, NodeError> {
        let entries = match std::fs::read_dir(&self.input_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping unreadable input entry");
                    continue;
                }
            };
            match entry.file_type() {
                Ok(file_type) if file_type.is_file() => {}
                Ok(_) => continue,
                Err(e) => {
                    tracing::debug!(path = %entry.path().display(), error = %e, "Skipping input entry");
                    continue;
                }
            }
            let Ok(name) = entry.file_name().into_string() else {
                tracing::debug!(path = %entry.path().display(), "Skipping non UTF-8 file name");
                continue;
            };
            if !name.starts_with('.') {
                files.push(name);
            }
        }
        files.sort();
        Ok(files)
    }
}

impl Describable for LoadImage {
    fn input_types(&self) -> Result<InputSpec, NodeError> {
        let files = self.list_input_files()?;
        Ok(InputSpec::new().required("image", InputType::choice(files)))
    }

    fn return_types(&self) -> &[&str] {
        &[type_tags::IMAGE, type_tags::MASK]
    }

    fn category(&self) -> Option<&str> {
        Some("image")
    }

    fn display_name(&self) -> Option<&str> {
        Some("Load Image")
    }
}

/// Resizes an image to the given dimensions.
pub struct ImageScale;

impl ImageScale {
    fn dimension(default: i64) -> InputType {
        InputType::with_options(
            type_tags::INT,
            InputOptions::default()
                .with_default(default)
                .with_range(64.0, 8192.0)
                .with_step(8.0),
        )
    }
}

impl Describable for ImageScale {
    fn input_types(&self) -> Result<InputSpec, NodeError> {
        Ok(InputSpec::new()
            .required("image", InputType::of(type_tags::IMAGE))
            .required("upscale_method", InputType::choice(UPSCALE_METHODS.iter().copied()))
            .required("width", Self::dimension(512))
            .required("height", Self::dimension(512))
            .optional("crop", InputType::choice(CROP_MODES.iter().copied())))
    }

    fn return_types(&self) -> &[&str] {
        &[type_tags::IMAGE]
    }

    fn category(&self) -> Option<&str> {
        Some("image/upscaling")
    }

    fn display_name(&self) -> Option<&str> {
        Some("Upscale Image")
    }

    fn description(&self) -> &str {
        "Resize an image to an explicit width and height."
    }
}
