/// Post service - creation, retrieval, updates, deletion
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{post_repo, user_repo};
use crate::error::{AppError, Result};
use crate::media::{self, ImagePayload};
use crate::models::Post;
use crate::permissions;

/// Fields a client may change on a post. The outer Option distinguishes
/// an absent field (keep the current value) from an explicit null, which
/// clears the image or group.
#[derive(Debug, Default)]
pub struct PostChanges {
    pub text: Option<String>,
    pub image: Option<Option<String>>,
    pub group: Option<Option<Uuid>>,
}

pub struct PostService {
    pool: PgPool,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List posts with the total count for pagination envelopes
    pub async fn list_posts(&self, limit: i64, offset: i64) -> Result<(Vec<Post>, i64)> {
        let posts = post_repo::list_posts(&self.pool, limit, offset).await?;
        let total = post_repo::count_posts(&self.pool).await?;
        Ok((posts, total))
    }

    /// Get a post or fail with not-found
    pub async fn get_post(&self, post_id: Uuid) -> Result<Post> {
        post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))
    }

    /// Create a post. The author is always the requester, regardless of
    /// anything in the client payload.
    pub async fn create_post(
        &self,
        author_id: Uuid,
        author_username: &str,
        text: &str,
        image: Option<&str>,
        group: Option<Uuid>,
    ) -> Result<Post> {
        user_repo::ensure_user(&self.pool, author_id, author_username).await?;

        let decoded = match image {
            Some(value) => Some(decode_image_field(value)?),
            None => None,
        };
        let (image_data, image_ext) = match &decoded {
            Some(img) => (Some(img.content.as_slice()), Some(img.extension.as_str())),
            None => (None, None),
        };

        let post =
            post_repo::create_post(&self.pool, author_id, text, image_data, image_ext, group)
                .await?;

        tracing::info!(post_id = %post.id, author = %post.author, "post created");
        Ok(post)
    }

    /// Update a post. Only the author may do this.
    pub async fn update_post(
        &self,
        post_id: Uuid,
        user_id: Uuid,
        changes: PostChanges,
    ) -> Result<Post> {
        let existing = self.get_post(post_id).await?;
        permissions::check_post_ownership(user_id, &existing)?;

        let text = changes.text.as_deref().unwrap_or(&existing.text);
        let (image_data, image_ext) = merge_image(
            changes.image,
            existing.image_data.clone(),
            existing.image_ext.clone(),
        )?;
        let group = match changes.group {
            Some(group) => group,
            None => existing.group_id,
        };

        let post = post_repo::update_post(
            &self.pool,
            post_id,
            text,
            image_data.as_deref(),
            image_ext.as_deref(),
            group,
        )
        .await?;

        Ok(post)
    }

    /// Delete a post. Only the author may do this.
    pub async fn delete_post(&self, post_id: Uuid, user_id: Uuid) -> Result<()> {
        let existing = self.get_post(post_id).await?;
        permissions::check_post_ownership(user_id, &existing)?;

        post_repo::delete_post(&self.pool, post_id).await?;
        tracing::info!(%post_id, "post deleted");
        Ok(())
    }
}

/// Merged image columns for an update: absent keeps the stored image,
/// explicit null clears it, a data URI replaces it.
fn merge_image(
    change: Option<Option<String>>,
    existing_data: Option<Vec<u8>>,
    existing_ext: Option<String>,
) -> Result<(Option<Vec<u8>>, Option<String>)> {
    match change {
        None => Ok((existing_data, existing_ext)),
        Some(None) => Ok((None, None)),
        Some(Some(value)) => {
            let img = decode_image_field(&value)?;
            Ok((Some(img.content), Some(img.extension)))
        }
    }
}

/// Decode the JSON image field. This surface only accepts embedded data
/// URIs; a value that falls through to upload handling has no upload to
/// fall through to and is reported per-field.
fn decode_image_field(value: &str) -> Result<media::DecodedImage> {
    match media::decode_image(value)? {
        ImagePayload::Decoded(img) => Ok(img),
        ImagePayload::Passthrough(_) => Err(AppError::validation(
            "image",
            "expected a data:image/<ext>;base64,<data> URI",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    #[test]
    fn test_decode_image_field_accepts_data_uri() {
        let uri = format!("data:image/png;base64,{}", STANDARD.encode(b"bytes"));
        let img = decode_image_field(&uri).unwrap();
        assert_eq!(img.content, b"bytes");
        assert_eq!(img.file_name, "temp.png");
    }

    #[test]
    fn test_decode_image_field_rejects_plain_strings() {
        let err = decode_image_field("avatar.png").unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "image"));
    }

    #[test]
    fn test_merge_image_keeps_stored_image_when_absent() {
        let (data, ext) =
            merge_image(None, Some(b"stored".to_vec()), Some("png".to_string())).unwrap();
        assert_eq!(data.as_deref(), Some(b"stored".as_slice()));
        assert_eq!(ext.as_deref(), Some("png"));
    }

    #[test]
    fn test_merge_image_clears_on_explicit_null() {
        let (data, ext) =
            merge_image(Some(None), Some(b"stored".to_vec()), Some("png".to_string())).unwrap();
        assert!(data.is_none());
        assert!(ext.is_none());
    }

    #[test]
    fn test_merge_image_replaces_with_new_data_uri() {
        let uri = format!("data:image/gif;base64,{}", STANDARD.encode(b"new-bytes"));
        let (data, ext) =
            merge_image(Some(Some(uri)), Some(b"stored".to_vec()), Some("png".to_string()))
                .unwrap();
        assert_eq!(data.as_deref(), Some(b"new-bytes".as_slice()));
        assert_eq!(ext.as_deref(), Some("gif"));
    }

    #[test]
    fn test_merge_image_propagates_malformed_uri() {
        let err = merge_image(
            Some(Some("data:image/png;base64,???".to_string())),
            None,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "image"));
    }
}
