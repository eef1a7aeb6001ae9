//! Portfolio export and single-artwork download through native save dialogs

use super::App;
use crate::gallery::{save_artwork_png, ArtworkId};
use tracing::{error, info};

impl App {
    pub fn export_portfolio(&mut self) {
        let export = self.gallery.export(&self.portfolio_name);
        std::fs::create_dir_all(&self.export_path).ok();

        let Some(path) = rfd::FileDialog::new()
            .set_directory(&self.export_path)
            .set_file_name(export.file_name())
            .add_filter("JSON", &["json"])
            .save_file()
        else {
            return;
        };

        match export.write_to(&path) {
            Ok(()) => {
                if let Some(parent) = path.parent() {
                    self.export_path = parent.to_path_buf();
                }
                self.save_settings();
                self.show_toast(format!("Exported {} artworks", export.artworks.len()));
            }
            Err(e) => {
                error!(error = %e, path = %path.display(), "Portfolio export failed");
                self.form.alert = Some(format!("Export failed: {}", e));
            }
        }
    }

    pub fn download_artwork(&mut self, id: ArtworkId) {
        let Some(artwork) = self.gallery.get(id) else {
            return;
        };
        std::fs::create_dir_all(&self.export_path).ok();

        let Some(path) = rfd::FileDialog::new()
            .set_directory(&self.export_path)
            .set_file_name(artwork.file_name())
            .add_filter("PNG image", &["png"])
            .save_file()
        else {
            return;
        };

        match save_artwork_png(artwork, &path) {
            Ok(()) => {
                if let Some(parent) = path.parent() {
                    self.export_path = parent.to_path_buf();
                }
                self.show_toast("Image saved");
            }
            Err(e) => {
                error!(error = %e, id = id.0, "Saving artwork failed");
                self.form.alert = Some(format!("Could not save image: {}", e));
            }
        }
    }

    pub fn remove_artwork(&mut self, id: ArtworkId) {
        if let Some(removed) = self.gallery.remove(id) {
            info!(id = removed.id.0, remaining = self.gallery.len(), "Artwork removed");
            self.forget_texture(id);
            if self.selected_artwork == Some(id) {
                self.selected_artwork = None;
            }
        }
    }

    pub fn open_export_folder(&self) {
        std::fs::create_dir_all(&self.export_path).ok();
        let _ = open::that(&self.export_path);
    }
}
