use aroma_shared::{Dimension, Image};
use rusqlite::types::Value;

use super::{Batch, Delete, Insert, Select, Statement};
use crate::codec;
use crate::tables::media::*;

fn image_columns(image: &Image, dimension: Option<Dimension>) -> Vec<(&'static str, Value)> {
    vec![
        (MEDIA_TYPE, codec::enum_name(image.image_type.as_ref())),
        (WIDTH, dimension.map_or(Value::Null, |d| codec::integer(d.width.into()))),
        (HEIGHT, dimension.map_or(Value::Null, |d| codec::integer(d.height.into()))),
        (DATA, codec::blob(&image.data)),
    ]
}

pub fn save(media_id: &str, image: &Image) -> Statement {
    Insert::into_table(TABLE)
        .value(MEDIA_ID, codec::uuid(media_id))
        .values(image_columns(image, image.dimension))
        .into()
}

pub fn select_by_id(media_id: &str) -> Statement {
    Select::all(TABLE)
        .where_eq(MEDIA_ID, codec::uuid(media_id))
        .into()
}

pub fn count_by_id(media_id: &str) -> Statement {
    Select::count(TABLE)
        .where_eq(MEDIA_ID, codec::uuid(media_id))
        .into()
}

/// The blob and every thumbnail of it.
pub fn delete(media_id: &str) -> Statement {
    Batch::new()
        .add(Delete::from_table(TABLE).where_eq(MEDIA_ID, codec::uuid(media_id)))
        .add(Delete::from_table(THUMBNAILS).where_eq(MEDIA_ID, codec::uuid(media_id)))
        .into()
}

/// The thumbnail is keyed by `dimension`, which overrides the image's own.
pub fn save_thumbnail(media_id: &str, dimension: Dimension, image: &Image) -> Statement {
    Insert::into_table(THUMBNAILS)
        .value(MEDIA_ID, codec::uuid(media_id))
        .value(DIMENSION, codec::text(&dimension.descriptor()))
        .values(image_columns(image, Some(dimension)))
        .into()
}

pub fn select_thumbnail(media_id: &str, dimension: Dimension) -> Statement {
    Select::all(THUMBNAILS)
        .where_eq(MEDIA_ID, codec::uuid(media_id))
        .where_eq(DIMENSION, codec::text(&dimension.descriptor()))
        .into()
}

pub fn count_thumbnail(media_id: &str, dimension: Dimension) -> Statement {
    Select::count(THUMBNAILS)
        .where_eq(MEDIA_ID, codec::uuid(media_id))
        .where_eq(DIMENSION, codec::text(&dimension.descriptor()))
        .into()
}

pub fn delete_thumbnail(media_id: &str, dimension: Dimension) -> Statement {
    Delete::from_table(THUMBNAILS)
        .where_eq(MEDIA_ID, codec::uuid(media_id))
        .where_eq(DIMENSION, codec::text(&dimension.descriptor()))
        .into()
}

pub fn delete_all_thumbnails(media_id: &str) -> Statement {
    Delete::from_table(THUMBNAILS)
        .where_eq(MEDIA_ID, codec::uuid(media_id))
        .into()
}
