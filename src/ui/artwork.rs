//! Artwork thumbnails
//!
//! Each record's artwork moves from `Pending` to `Loaded` or `Failed`.
//! Records without an artwork link start out `Missing`.

use iced::widget::{container, image, text};
use iced::Element;

use super::theme::DarkTheme;

pub const THUMBNAIL_SIZE: f32 = 50.0;

#[derive(Debug, Clone)]
pub enum ArtworkPhase {
    Missing,
    Pending,
    Loaded(image::Handle),
    Failed,
}

impl ArtworkPhase {
    pub fn from_download(result: Result<Vec<u8>, String>) -> Self {
        match result {
            Ok(bytes) => Self::Loaded(image::Handle::from_bytes(bytes)),
            Err(e) => {
                tracing::debug!("Artwork download failed: {}", e);
                Self::Failed
            }
        }
    }
}

pub fn view<'a, Message: 'a>(phase: Option<&ArtworkPhase>) -> Element<'a, Message> {
    let content: Element<'a, Message> = match phase {
        Some(ArtworkPhase::Loaded(handle)) => image(handle.clone())
            .width(THUMBNAIL_SIZE)
            .height(THUMBNAIL_SIZE)
            .into(),
        Some(ArtworkPhase::Pending) => text("…").size(20).color(DarkTheme::TEXT_MUTED).into(),
        // Placeholder glyph
        _ => text("♪").size(24).color(DarkTheme::PRIMARY).into(),
    };

    container(content)
        .width(THUMBNAIL_SIZE)
        .height(THUMBNAIL_SIZE)
        .center_x(THUMBNAIL_SIZE)
        .center_y(THUMBNAIL_SIZE)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_result_sets_phase() {
        assert!(matches!(
            ArtworkPhase::from_download(Ok(vec![0x89, b'P', b'N', b'G'])),
            ArtworkPhase::Loaded(_)
        ));
        assert!(matches!(
            ArtworkPhase::from_download(Err("HTTP 404".into())),
            ArtworkPhase::Failed
        ));
    }
}
