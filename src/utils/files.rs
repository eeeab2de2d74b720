use crate::error::{Error, Result};
use uuid::Uuid;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];
pub const CV_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

/// Lowercased extension of an uploaded filename, if any.
pub fn extension(filename: &str) -> Option<String> {
    let ext = filename.rsplit_once('.')?.1;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Validates the upload against an extension allow-list and returns the
/// normalized extension.
pub fn check_extension(filename: &str, allowed: &[&str]) -> Result<String> {
    let ext = extension(filename).ok_or_else(|| {
        Error::BadRequest(format!("Archivo sin extensión: {}", filename))
    })?;
    if !allowed.contains(&ext.as_str()) {
        return Err(Error::BadRequest(format!(
            "Tipo de archivo no permitido: .{} (se aceptan: {})",
            ext,
            allowed.join(", ")
        )));
    }
    Ok(ext)
}

/// Collision-resistant stored name: owner id plus a random component, so
/// concurrent uploads never need locking.
pub fn stored_filename(owner_id: i64, ext: &str) -> String {
    format!("{}_{}.{}", owner_id, Uuid::new_v4().simple(), ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_normalized() {
        assert_eq!(extension("foto.JPG").as_deref(), Some("jpg"));
        assert_eq!(extension("cv.tar.gz").as_deref(), Some("gz"));
        assert_eq!(extension("sinextension"), None);
        assert_eq!(extension("raro."), None);
    }

    #[test]
    fn image_allow_list_rejects_documents() {
        assert!(check_extension("perfil.png", IMAGE_EXTENSIONS).is_ok());
        assert!(check_extension("cv.pdf", IMAGE_EXTENSIONS).is_err());
    }

    #[test]
    fn cv_allow_list_rejects_images() {
        assert!(check_extension("cv.docx", CV_EXTENSIONS).is_ok());
        assert!(check_extension("perfil.gif", CV_EXTENSIONS).is_err());
    }

    #[test]
    fn stored_filenames_do_not_collide() {
        let a = stored_filename(7, "pdf");
        let b = stored_filename(7, "pdf");
        assert_ne!(a, b);
        assert!(a.starts_with("7_"));
        assert!(a.ends_with(".pdf"));
    }
}
