use aroma_shared::{Dimension, Image};
use dashmap::DashMap;

use crate::assertions;
use crate::codec::canonical_id;
use crate::error::{Result, StoreError};
use crate::media::MediaRepository;

pub struct MemoryMediaRepository {
    media: DashMap<String, Image>,
    thumbnails: DashMap<(String, Dimension), Image>,
    max_media_bytes: usize,
}

impl MemoryMediaRepository {
    pub fn new(max_media_bytes: usize) -> Self {
        Self {
            media: DashMap::new(),
            thumbnails: DashMap::new(),
            max_media_bytes,
        }
    }
}

impl MediaRepository for MemoryMediaRepository {
    fn save_media(&self, media_id: &str, image: &Image) -> Result<()> {
        assertions::valid_media_id(media_id)?;
        assertions::valid_image(image, self.max_media_bytes)?;

        self.media.insert(canonical_id(media_id), image.clone());
        Ok(())
    }

    fn get_media(&self, media_id: &str) -> Result<Image> {
        assertions::valid_media_id(media_id)?;

        self.media
            .get(&canonical_id(media_id))
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::DoesNotExist(format!("media {media_id}")))
    }

    fn contains_media(&self, media_id: &str) -> Result<bool> {
        assertions::valid_media_id(media_id)?;
        Ok(self.media.contains_key(&canonical_id(media_id)))
    }

    fn delete_media(&self, media_id: &str) -> Result<()> {
        assertions::valid_media_id(media_id)?;

        self.media.remove(&canonical_id(media_id));
        self.delete_all_thumbnails(media_id)
    }

    fn save_thumbnail(&self, media_id: &str, dimension: Dimension, image: &Image) -> Result<()> {
        assertions::valid_media_id(media_id)?;
        assertions::valid_image(image, self.max_media_bytes)?;

        let thumbnail = Image {
            dimension: Some(dimension),
            ..image.clone()
        };
        self.thumbnails
            .insert((canonical_id(media_id), dimension), thumbnail);
        Ok(())
    }

    fn get_thumbnail(&self, media_id: &str, dimension: Dimension) -> Result<Image> {
        assertions::valid_media_id(media_id)?;

        self.thumbnails
            .get(&(canonical_id(media_id), dimension))
            .map(|entry| entry.value().clone())
            .ok_or_else(|| {
                StoreError::DoesNotExist(format!("thumbnail {dimension} of media {media_id}"))
            })
    }

    fn contains_thumbnail(&self, media_id: &str, dimension: Dimension) -> Result<bool> {
        assertions::valid_media_id(media_id)?;
        Ok(self
            .thumbnails
            .contains_key(&(canonical_id(media_id), dimension)))
    }

    fn delete_thumbnail(&self, media_id: &str, dimension: Dimension) -> Result<()> {
        assertions::valid_media_id(media_id)?;

        self.thumbnails.remove(&(canonical_id(media_id), dimension));
        Ok(())
    }

    fn delete_all_thumbnails(&self, media_id: &str) -> Result<()> {
        assertions::valid_media_id(media_id)?;

        let media_id = canonical_id(media_id);
        self.thumbnails.retain(|(id, _), _| *id != media_id);
        Ok(())
    }
}
