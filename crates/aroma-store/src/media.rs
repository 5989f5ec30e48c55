//! Media blobs and their thumbnails.

use std::sync::Arc;

use aroma_shared::{Dimension, Image};

use crate::assertions;
use crate::error::{Result, StoreError};
use crate::mappers::image_from_row;
use crate::session::{self, Session};
use crate::statements::media as statements;

pub trait MediaRepository: Send + Sync {
    fn save_media(&self, media_id: &str, image: &Image) -> Result<()>;

    fn get_media(&self, media_id: &str) -> Result<Image>;

    fn contains_media(&self, media_id: &str) -> Result<bool>;

    /// Removes the blob together with every thumbnail of it.
    fn delete_media(&self, media_id: &str) -> Result<()>;

    fn save_thumbnail(&self, media_id: &str, dimension: Dimension, image: &Image) -> Result<()>;

    fn get_thumbnail(&self, media_id: &str, dimension: Dimension) -> Result<Image>;

    fn contains_thumbnail(&self, media_id: &str, dimension: Dimension) -> Result<bool>;

    fn delete_thumbnail(&self, media_id: &str, dimension: Dimension) -> Result<()>;

    fn delete_all_thumbnails(&self, media_id: &str) -> Result<()>;
}

pub struct StoreMediaRepository {
    session: Arc<dyn Session>,
    max_media_bytes: usize,
}

impl StoreMediaRepository {
    pub fn new(session: Arc<dyn Session>, max_media_bytes: usize) -> Self {
        Self {
            session,
            max_media_bytes,
        }
    }
}

impl MediaRepository for StoreMediaRepository {
    fn save_media(&self, media_id: &str, image: &Image) -> Result<()> {
        assertions::valid_media_id(media_id)?;
        assertions::valid_image(image, self.max_media_bytes)?;

        session::execute(
            self.session.as_ref(),
            &statements::save(media_id, image),
            || format!("save media {media_id}"),
        )?;
        Ok(())
    }

    fn get_media(&self, media_id: &str) -> Result<Image> {
        assertions::valid_media_id(media_id)?;

        let rows = session::execute(
            self.session.as_ref(),
            &statements::select_by_id(media_id),
            || format!("load media {media_id}"),
        )?;
        rows.one()
            .map(image_from_row)
            .ok_or_else(|| StoreError::DoesNotExist(format!("media {media_id}")))
    }

    fn contains_media(&self, media_id: &str) -> Result<bool> {
        assertions::valid_media_id(media_id)?;

        let rows = session::execute(
            self.session.as_ref(),
            &statements::count_by_id(media_id),
            || format!("check media {media_id}"),
        )?;
        Ok(rows.count() > 0)
    }

    fn delete_media(&self, media_id: &str) -> Result<()> {
        assertions::valid_media_id(media_id)?;

        session::execute(
            self.session.as_ref(),
            &statements::delete(media_id),
            || format!("delete media {media_id}"),
        )?;
        Ok(())
    }

    fn save_thumbnail(&self, media_id: &str, dimension: Dimension, image: &Image) -> Result<()> {
        assertions::valid_media_id(media_id)?;
        assertions::valid_image(image, self.max_media_bytes)?;

        session::execute(
            self.session.as_ref(),
            &statements::save_thumbnail(media_id, dimension, image),
            || format!("save thumbnail {dimension} of {media_id}"),
        )?;
        Ok(())
    }

    fn get_thumbnail(&self, media_id: &str, dimension: Dimension) -> Result<Image> {
        assertions::valid_media_id(media_id)?;

        let rows = session::execute(
            self.session.as_ref(),
            &statements::select_thumbnail(media_id, dimension),
            || format!("load thumbnail {dimension} of {media_id}"),
        )?;
        rows.one().map(image_from_row).ok_or_else(|| {
            StoreError::DoesNotExist(format!("thumbnail {dimension} of media {media_id}"))
        })
    }

    fn contains_thumbnail(&self, media_id: &str, dimension: Dimension) -> Result<bool> {
        assertions::valid_media_id(media_id)?;

        let rows = session::execute(
            self.session.as_ref(),
            &statements::count_thumbnail(media_id, dimension),
            || format!("check thumbnail {dimension} of {media_id}"),
        )?;
        Ok(rows.count() > 0)
    }

    fn delete_thumbnail(&self, media_id: &str, dimension: Dimension) -> Result<()> {
        assertions::valid_media_id(media_id)?;

        session::execute(
            self.session.as_ref(),
            &statements::delete_thumbnail(media_id, dimension),
            || format!("delete thumbnail {dimension} of {media_id}"),
        )?;
        Ok(())
    }

    fn delete_all_thumbnails(&self, media_id: &str) -> Result<()> {
        assertions::valid_media_id(media_id)?;

        session::execute(
            self.session.as_ref(),
            &statements::delete_all_thumbnails(media_id),
            || format!("delete thumbnails of {media_id}"),
        )?;
        Ok(())
    }
}
