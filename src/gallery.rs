//! In-memory gallery of generated artworks and portfolio export

use crate::types::GenerationSettings;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Stable handle for an artwork, independent of its position in the gallery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ArtworkId(pub u64);

/// Artwork fields before the gallery assigns an id
#[derive(Debug, Clone, PartialEq)]
pub struct NewArtwork {
    pub image: String,
    pub prompt: String,
    pub negative_prompt: Option<String>,
    pub settings: GenerationSettings,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    pub id: ArtworkId,
    /// Base64-encoded PNG
    pub image: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    pub settings: GenerationSettings,
    pub timestamp: DateTime<Utc>,
}

impl Artwork {
    /// Default file name for saving this artwork as a PNG
    pub fn file_name(&self) -> String {
        format!("artwork_{}.png", self.timestamp.timestamp_millis())
    }

    pub fn png_bytes(&self) -> Result<Vec<u8>, ExportError> {
        decode_image(&self.image)
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize portfolio: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write file: {0}")]
    Io(#[from] std::io::Error),
    #[error("artwork image is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// Snapshot of the gallery written to disk on export
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioExport {
    pub name: String,
    pub created: DateTime<Utc>,
    pub artworks: Vec<Artwork>,
}

impl PortfolioExport {
    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_to(&self, path: &Path) -> Result<(), ExportError> {
        std::fs::write(path, self.to_json()?)?;
        info!(path = %path.display(), count = self.artworks.len(), "Portfolio exported");
        Ok(())
    }

    /// Suggested file name derived from the portfolio name
    pub fn file_name(&self) -> String {
        let stem: String = self
            .name
            .trim()
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        if stem.is_empty() {
            "portfolio.json".to_string()
        } else {
            format!("{}.json", stem)
        }
    }
}

/// Insertion-ordered artwork collection. Lives for the session only.
#[derive(Default)]
pub struct Gallery {
    artworks: Vec<Artwork>,
    next_id: u64,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, new: NewArtwork) -> ArtworkId {
        let id = ArtworkId(self.next_id);
        self.next_id += 1;
        self.artworks.push(Artwork {
            id,
            image: new.image,
            prompt: new.prompt,
            negative_prompt: new.negative_prompt,
            settings: new.settings,
            timestamp: new.timestamp,
        });
        debug!(id = id.0, len = self.artworks.len(), "Artwork added to gallery");
        id
    }

    /// Positional removal. Later artworks shift down by one; out of range is a no-op.
    pub fn remove_at(&mut self, index: usize) -> Option<Artwork> {
        if index >= self.artworks.len() {
            debug!(index, len = self.artworks.len(), "remove_at out of range, ignoring");
            return None;
        }
        Some(self.artworks.remove(index))
    }

    pub fn remove(&mut self, id: ArtworkId) -> Option<Artwork> {
        let index = self.position(id)?;
        self.remove_at(index)
    }

    pub fn get(&self, id: ArtworkId) -> Option<&Artwork> {
        self.artworks.iter().find(|a| a.id == id)
    }

    pub fn position(&self, id: ArtworkId) -> Option<usize> {
        self.artworks.iter().position(|a| a.id == id)
    }

    pub fn artworks(&self) -> &[Artwork] {
        &self.artworks
    }

    pub fn len(&self) -> usize {
        self.artworks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artworks.is_empty()
    }

    pub fn export(&self, name: &str) -> PortfolioExport {
        PortfolioExport {
            name: name.to_string(),
            created: Utc::now(),
            artworks: self.artworks.clone(),
        }
    }
}

pub fn decode_image(encoded: &str) -> Result<Vec<u8>, ExportError> {
    // Tolerate data URLs as well as bare base64
    let payload = encoded
        .split_once(";base64,")
        .map(|(_, data)| data)
        .unwrap_or(encoded);
    Ok(base64::engine::general_purpose::STANDARD.decode(payload.trim())?)
}

pub fn save_artwork_png(artwork: &Artwork, path: &Path) -> Result<(), ExportError> {
    let bytes = artwork.png_bytes()?;
    std::fs::write(path, bytes)?;
    info!(id = artwork.id.0, path = %path.display(), "Artwork saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(prompt: &str) -> NewArtwork {
        NewArtwork {
            image: "iVBORw0KGgo=".to_string(),
            prompt: prompt.to_string(),
            negative_prompt: None,
            settings: GenerationSettings::default(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn append_then_remove_last_restores_gallery() {
        let mut gallery = Gallery::new();
        gallery.append(sample("one"));
        gallery.append(sample("two"));
        let before = gallery.artworks().to_vec();

        gallery.append(sample("three"));
        let removed = gallery.remove_at(gallery.len() - 1).unwrap();

        assert_eq!(removed.prompt, "three");
        assert_eq!(gallery.artworks(), before.as_slice());
    }

    #[test]
    fn remove_at_shifts_later_artworks() {
        let mut gallery = Gallery::new();
        gallery.append(sample("a"));
        gallery.append(sample("b"));
        let c = gallery.append(sample("c"));

        gallery.remove_at(1);

        assert_eq!(gallery.len(), 2);
        assert_eq!(gallery.artworks()[1].prompt, "c");
        assert_eq!(gallery.position(c), Some(1));
        // The old index 2 no longer exists
        assert!(gallery.remove_at(2).is_none());
        assert_eq!(gallery.len(), 2);
    }

    #[test]
    fn remove_by_id_is_unaffected_by_earlier_removals() {
        let mut gallery = Gallery::new();
        let a = gallery.append(sample("a"));
        let b = gallery.append(sample("b"));
        let c = gallery.append(sample("c"));

        gallery.remove(a);
        assert_eq!(gallery.remove(c).unwrap().prompt, "c");
        assert!(gallery.remove(c).is_none());
        assert_eq!(gallery.get(b).unwrap().prompt, "b");
    }

    #[test]
    fn ids_are_never_reused() {
        let mut gallery = Gallery::new();
        let a = gallery.append(sample("a"));
        gallery.remove(a);
        let b = gallery.append(sample("b"));
        assert_ne!(a, b);
    }

    #[test]
    fn empty_gallery_exports_empty_artworks() {
        let gallery = Gallery::new();
        let export = gallery.export("Empty");
        let json: serde_json::Value = serde_json::from_str(&export.to_json().unwrap()).unwrap();
        assert_eq!(json["name"], "Empty");
        assert_eq!(json["artworks"], serde_json::json!([]));
        assert!(json["created"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn export_does_not_mutate_and_writes_file() {
        let mut gallery = Gallery::new();
        let mut art = sample("lake");
        art.negative_prompt = Some("blurry".into());
        gallery.append(art);

        let dir = tempfile::tempdir().unwrap();
        let export = gallery.export("My Portfolio");
        let path = dir.path().join(export.file_name());
        export.write_to(&path).unwrap();

        assert_eq!(gallery.len(), 1);
        assert!(path.ends_with("My_Portfolio.json"));
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let first = &json["artworks"][0];
        assert_eq!(first["prompt"], "lake");
        assert_eq!(first["negativePrompt"], "blurry");
        assert_eq!(first["settings"]["steps"], 50);
    }

    #[test]
    fn saves_png_with_timestamped_name() {
        let mut gallery = Gallery::new();
        let id = gallery.append(sample("x"));
        let art = gallery.get(id).unwrap();
        assert_eq!(art.file_name(), format!("artwork_{}.png", art.timestamp.timestamp_millis()));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(art.file_name());
        save_artwork_png(art, &path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn decode_accepts_data_url() {
        assert_eq!(decode_image("data:image/png;base64,aGk=").unwrap(), b"hi");
        assert!(decode_image("not base64!").is_err());
    }
}
