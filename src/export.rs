use std::path::{Path, PathBuf};

use crate::foundation::error::{CoverError, CoverResult};
use crate::render::surface::{FrameRGBA, Surface};

/// File name used by the one-shot cover export.
pub const EXPORT_FILE_NAME: &str = "pop-cover.png";

/// Straight-alpha RGBA8 copy of `frame`.
pub fn to_straight_rgba8(frame: &FrameRGBA) -> CoverResult<Vec<u8>> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.data.len() != expected {
        return Err(CoverError::validation(format!(
            "frame data is {} bytes, expected {expected} for {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }
    if !frame.premultiplied {
        return Ok(frame.data.clone());
    }

    let mut out = vec![0u8; expected];
    for (d, s) in out.chunks_exact_mut(4).zip(frame.data.chunks_exact(4)) {
        let a = u16::from(s[3]);
        match a {
            0 => {}
            255 => d.copy_from_slice(s),
            _ => {
                for c in 0..3 {
                    let v = (u16::from(s[c]) * 255 + a / 2) / a;
                    d[c] = v.min(255) as u8;
                }
                d[3] = s[3];
            }
        }
    }
    Ok(out)
}

/// Encode `frame` as PNG bytes.
pub fn encode_png(frame: &FrameRGBA) -> CoverResult<Vec<u8>> {
    let rgba = to_straight_rgba8(frame)?;
    let mut out = std::io::Cursor::new(Vec::new());
    image::write_buffer_with_format(
        &mut out,
        &rgba,
        frame.width,
        frame.height,
        image::ExtendedColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| CoverError::render(format!("png encode failed: {e}")))?;
    Ok(out.into_inner())
}

/// Write `frame` as a PNG file at `path`, creating parent directories.
pub fn write_png(frame: &FrameRGBA, path: &Path) -> CoverResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let bytes = encode_png(frame)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Save whatever `surface` last rendered as `dir/pop-cover.png`.
///
/// Returns `Ok(None)` when the surface has nothing to read back yet.
#[tracing::instrument(level = "debug", skip(surface))]
pub fn export_current_frame(surface: &dyn Surface, dir: &Path) -> CoverResult<Option<PathBuf>> {
    if surface.frames_rendered() == 0 {
        tracing::warn!("export requested before the first frame; nothing written");
        return Ok(None);
    }
    let Some(frame) = surface.read_pixels() else {
        tracing::warn!("surface cannot read back pixels; nothing written");
        return Ok(None);
    };
    let path = dir.join(EXPORT_FILE_NAME);
    write_png(&frame, &path)?;
    tracing::info!(path = %path.display(), "cover exported");
    Ok(Some(path))
}

#[cfg(test)]
#[path = "../tests/unit/export.rs"]
mod tests;
