use super::types::{request, response};
use crate::types::Context;
use std::{path::Path, sync::Arc};
use ulid::Ulid;

/// Fresh name for an upload, keeping the extension of the client's file name.
fn stored_file_name(original: Option<&str>) -> String {
    let id = Ulid::new().to_string();

    match original
        .map(Path::new)
        .and_then(Path::extension)
        .and_then(|ext| ext.to_str())
    {
        Some(ext) => format!("{}.{}", id, ext),
        None => id,
    }
}

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let file_name = stored_file_name(payload.file.metadata.file_name.as_deref());
    let upload_dir = &ctx.storage.upload_dir;

    tokio::fs::create_dir_all(upload_dir).await.map_err(|err| {
        tracing::error!("Failed to create upload directory {:?}: {}", upload_dir, err);
        response::Error::FailedToUploadMedia
    })?;

    tokio::fs::copy(payload.file.contents.path(), upload_dir.join(&file_name))
        .await
        .map_err(|err| {
            tracing::error!("Failed to save uploaded file: {:?}", err);
            response::Error::FailedToUploadMedia
        })?;

    tracing::info!(%file_name, "Stored uploaded file");

    Ok(response::Success::UploadedMedia {
        url: format!("{}/uploads/{}", ctx.app.url, file_name),
        file_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_kept() {
        let name = stored_file_name(Some("mapo-tofu.JPG"));

        assert!(name.ends_with(".JPG"));
        assert_eq!(name.len(), 26 + ".JPG".len());
    }

    #[test]
    fn name_without_extension_is_bare_ulid() {
        assert_eq!(stored_file_name(Some("README")).len(), 26);
        assert_eq!(stored_file_name(None).len(), 26);
    }

    #[test]
    fn client_directories_are_ignored() {
        let name = stored_file_name(Some("../../etc/passwd.png"));

        assert!(!name.contains('/'));
        assert!(name.ends_with(".png"));
    }

    #[test]
    fn names_are_unique() {
        assert_ne!(stored_file_name(None), stored_file_name(None));
    }
}
