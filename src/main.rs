#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use eframe::egui;
use egui::viewport::IconData;
use gate_canvas::{AppConfig, DragAndDropApp};
use std::path::Path;

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = AppConfig::load().unwrap_or_else(|err| {
        log::error!("{}; falling back to default config", err);
        AppConfig::default()
    });

    let mut viewport = egui::ViewportBuilder::default()
        .with_title(config.title.clone())
        .with_inner_size([config.width, config.height])
        .with_resizable(config.resizable);
    if let Some(icon) = config.icon_path.as_deref().and_then(load_icon) {
        viewport = viewport.with_icon(icon);
    }

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let title = config.title.clone();
    eframe::run_native(
        &title,
        native_options,
        Box::new(move |cc| Ok(Box::new(DragAndDropApp::new(cc, &config)))),
    )
}

/// Reads the window icon; a missing or unreadable file just means no icon
fn load_icon(path: &Path) -> Option<IconData> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            log::warn!("Window icon {} not loaded: {}", path.display(), err);
            return None;
        }
    };
    let icon = decode_icon(&bytes);
    if icon.is_none() {
        log::warn!("Window icon {} could not be decoded", path.display());
    }
    icon
}

/// Converts encoded image bytes (ico, png, ...) into RGBA icon data
fn decode_icon(bytes: &[u8]) -> Option<IconData> {
    let image = image::load_from_memory(bytes).ok()?.to_rgba8();
    let (width, height) = image.dimensions();
    Some(IconData {
        rgba: image.into_raw(),
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_decode_icon_png() {
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(image::RgbaImage::new(4, 2))
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let icon = decode_icon(&bytes).unwrap();
        assert_eq!((icon.width, icon.height), (4, 2));
        assert_eq!(icon.rgba.len(), 4 * 2 * 4);
    }

    #[test]
    fn test_decode_icon_rejects_garbage() {
        assert!(decode_icon(b"not an image").is_none());
    }

    #[test]
    fn test_load_icon_missing_file() {
        assert!(load_icon(Path::new("does/not/exist.ico")).is_none());
    }
}
