use std::path::{Path, PathBuf};

const ICON_FILE: &str = "app_icon_32.png";
const ICON_NAME: &str = "app_icon_32";

/// Themed icon used when the bundled asset is missing.
pub const FALLBACK_ICON_NAME: &str = "accessories-text-editor";

/// `app_icon_32.png` beside the executable, when present.
pub(super) fn icon_asset_path() -> Option<PathBuf> {
    let exe = std::env::current_exe()
        .map_err(|err| tracing::debug!(?err, "cannot resolve executable path"))
        .ok()?;
    let path = exe.parent()?.join(ICON_FILE);
    path.is_file().then_some(path)
}

/// RGBA8 pixels to the ARGB32 big-endian layout StatusNotifier hosts expect.
pub(super) fn rgba_to_argb(rgba: &[u8]) -> Vec<u8> {
    rgba.chunks_exact(4)
        .flat_map(|px| [px[3], px[0], px[1], px[2]])
        .collect()
}

pub(super) fn tray_icon(path: &Path) -> Option<ksni::Icon> {
    let image = match image::open(path) {
        Ok(image) => image.to_rgba8(),
        Err(err) => {
            tracing::warn!(?err, path = %path.display(), "failed to decode tray icon");
            return None;
        }
    };
    let (width, height) = image.dimensions();
    Some(ksni::Icon {
        width: i32::try_from(width).ok()?,
        height: i32::try_from(height).ok()?,
        data: rgba_to_argb(image.as_raw()),
    })
}

/// Sets the default window icon, preferring the bundled asset.
pub(super) fn install_window_icon(asset: Option<&Path>) {
    let Some(display) = gtk4::gdk::Display::default() else {
        tracing::warn!("no display available for window icon");
        return;
    };
    let theme = gtk4::IconTheme::for_display(&display);
    if let Some(dir) = asset.and_then(Path::parent) {
        theme.add_search_path(dir);
    }

    let name = if asset.is_some() && theme.has_icon(ICON_NAME) {
        ICON_NAME
    } else {
        FALLBACK_ICON_NAME
    };
    tracing::debug!(icon = name, "installed default window icon");
    gtk4::Window::set_default_icon_name(name);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_pixels_are_reordered_to_argb() {
        let rgba = [10, 20, 30, 255, 1, 2, 3, 0];
        assert_eq!(rgba_to_argb(&rgba), vec![255, 10, 20, 30, 0, 1, 2, 3]);
    }

    #[test]
    fn trailing_partial_pixel_is_dropped() {
        assert_eq!(rgba_to_argb(&[1, 2, 3, 4, 5, 6]), vec![4, 1, 2, 3]);
    }

    #[test]
    fn decodes_png_asset_into_tray_pixmap() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(ICON_FILE);
        let mut pixels = image::RgbaImage::new(2, 1);
        pixels.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        pixels.put_pixel(1, 0, image::Rgba([0, 0, 255, 128]));
        pixels.save(&path).expect("write png");

        let icon = tray_icon(&path).expect("icon");

        assert_eq!((icon.width, icon.height), (2, 1));
        assert_eq!(icon.data, vec![255, 255, 0, 0, 128, 0, 0, 255]);
    }

    #[test]
    fn undecodable_asset_yields_no_icon() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(ICON_FILE);
        std::fs::write(&path, b"not a png").expect("write");

        assert!(tray_icon(&path).is_none());
    }
}
