//! Record form submission.

use std::sync::Arc;

use tracing::{error, info};

use reportdesk_core::result::AppResult;
use reportdesk_core::traits::BlobStore;
use reportdesk_database::RecordStore;
use reportdesk_entity::record::{CreateRecord, Record, placeholder_avatar_url};
use reportdesk_storage::keys::new_avatar_key;

use super::draft::RecordForm;
use super::image::ImageUpload;

/// Where a client goes after a successful submission.
pub const LIST_VIEW_PATH: &str = "/reports";

/// Outcome of a successful submission.
#[derive(Debug, Clone)]
pub struct Submission {
    /// The stored record, with its assigned id and timestamp.
    pub record: Record,
    /// View to show next.
    pub redirect_to: &'static str,
}

/// Validates drafts and writes new records.
#[derive(Clone)]
pub struct FormController {
    records: Arc<dyn RecordStore>,
    blobs: Arc<dyn BlobStore>,
    max_upload_size_bytes: u64,
}

impl std::fmt::Debug for FormController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormController")
            .field("records", &self.records.backend_type())
            .field("blobs", &self.blobs.provider_type())
            .finish()
    }
}

impl FormController {
    /// Create a controller over the given stores.
    pub fn new(
        records: Arc<dyn RecordStore>,
        blobs: Arc<dyn BlobStore>,
        max_upload_size_bytes: u64,
    ) -> Self {
        Self {
            records,
            blobs,
            max_upload_size_bytes,
        }
    }

    /// Submit a draft.
    ///
    /// Validation runs before any store is touched. Without an image the
    /// placeholder avatar is used and the blob store is not called. The
    /// draft is borrowed so a caller can keep it after a failure.
    pub async fn submit(
        &self,
        form: &RecordForm,
        image: Option<&ImageUpload>,
    ) -> AppResult<Submission> {
        let fields = form.to_create_fields()?;
        let content_type = image
            .map(|img| img.inspect(self.max_upload_size_bytes))
            .transpose()?;

        let avatar_url = match (image, content_type) {
            (Some(img), Some(content_type)) => {
                let key = new_avatar_key(&img.file_name);
                self.blobs
                    .upload(&key, img.data.clone(), content_type)
                    .await
                    .inspect_err(|e| error!(key = %key, error = %e, "Avatar upload failed"))?;
                self.blobs
                    .download_url(&key)
                    .await
                    .inspect_err(|e| error!(key = %key, error = %e, "Avatar URL lookup failed"))?
            }
            _ => placeholder_avatar_url(),
        };

        let record = self
            .records
            .create(&CreateRecord { fields, avatar_url })
            .await
            .inspect_err(|e| error!(error = %e, "Failed to create record"))?;

        info!(record_id = %record.id, "Record submitted");
        Ok(Submission {
            record,
            redirect_to: LIST_VIEW_PATH,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CountingBlobs, CountingRecords, PNG_BYTES};
    use reportdesk_core::error::ErrorKind;
    use reportdesk_entity::record::is_placeholder;

    fn form() -> RecordForm {
        RecordForm {
            name_surname: "Anan Wong".into(),
            document_date: "2024-03-01".into(),
            start_date: "2024-01-01".into(),
            end_date: "2024-01-31".into(),
            duration: None,
            amount: "10".into(),
            place: "Bangkok".into(),
            id_card_number: "1".into(),
        }
    }

    #[tokio::test]
    async fn test_submit_without_image_uses_placeholder() {
        let records = CountingRecords::seeded(vec![]);
        let blobs = CountingBlobs::new();
        let controller = FormController::new(records.clone(), blobs.clone(), 1024);

        let submission = controller.submit(&form(), None).await.unwrap();

        assert!(is_placeholder(&submission.record.avatar_url));
        assert_eq!(submission.record.duration, "01/01/2024 to 31/01/2024");
        assert_eq!(submission.redirect_to, "/reports");
        assert_eq!(blobs.uploads(), 0);
        assert_eq!(records.inner.len(), 1);
    }

    #[tokio::test]
    async fn test_submit_with_image_uploads_under_file_name() {
        let records = CountingRecords::seeded(vec![]);
        let blobs = CountingBlobs::new();
        let controller = FormController::new(records.clone(), blobs.clone(), 1024);
        let image = ImageUpload::new("me.png", PNG_BYTES.to_vec());

        let submission = controller.submit(&form(), Some(&image)).await.unwrap();

        assert_eq!(submission.record.avatar_url, "http://blobs.test/avatars/me.png");
        assert!(blobs.inner.contains("avatars/me.png"));
    }

    #[tokio::test]
    async fn test_invalid_draft_makes_no_store_calls() {
        let records = CountingRecords::seeded(vec![]);
        let blobs = CountingBlobs::new();
        let controller = FormController::new(records.clone(), blobs.clone(), 1024);
        let mut draft = form();
        draft.place = String::new();
        let image = ImageUpload::new("me.png", PNG_BYTES.to_vec());

        let err = controller.submit(&draft, Some(&image)).await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(records.calls(), 0);
        assert_eq!(blobs.uploads(), 0);
    }

    #[tokio::test]
    async fn test_non_image_upload_is_rejected_before_upload() {
        let records = CountingRecords::seeded(vec![]);
        let blobs = CountingBlobs::new();
        let controller = FormController::new(records.clone(), blobs.clone(), 1024);
        let image = ImageUpload::new("me.png", b"not an image".to_vec());

        let err = controller.submit(&form(), Some(&image)).await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(blobs.uploads(), 0);
        assert_eq!(records.calls(), 0);
    }

    #[tokio::test]
    async fn test_store_failure_is_surfaced() {
        let records = CountingRecords::seeded(vec![]);
        records.set_failing(true);
        let controller = FormController::new(records.clone(), CountingBlobs::new(), 1024);

        let err = controller.submit(&form(), None).await.unwrap_err();
        assert!(err.kind.is_remote());
    }

    #[tokio::test]
    async fn test_upload_failure_creates_no_record() {
        let records = CountingRecords::seeded(vec![]);
        let blobs = CountingBlobs::new();
        blobs.set_failing(true);
        let controller = FormController::new(records.clone(), blobs.clone(), 1024);
        let image = ImageUpload::new("me.png", PNG_BYTES.to_vec());

        let err = controller.submit(&form(), Some(&image)).await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::Storage);
        assert!(err.kind.is_remote());
        assert_eq!(blobs.uploads(), 1);
        assert_eq!(records.calls(), 0);
        assert!(records.inner.is_empty());
    }
}
