use async_trait::async_trait;
use bytes::Bytes;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::post_image::application::{
    domain::entities::PostImageRecord,
    ports::outgoing::{
        cloud_storage::{BlobStore, BlobStoreError},
        db::{
            ConditionalUpdateError, ImagesMutation, ImagesPrecondition, PostImageStore,
            PostImageUpdate,
        },
        token::TokenGenerator,
    },
};

// ----------------------------
// Blob store
// ----------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PutCall {
    pub bucket: String,
    pub key: String,
    pub bytes: Bytes,
    pub content_type: String,
}

/// Captures every put; fails all of them when built with `failing`.
#[derive(Clone, Default)]
pub struct RecordingBlobStore {
    puts: Arc<Mutex<Vec<PutCall>>>,
    failure: Option<BlobStoreError>,
}

impl RecordingBlobStore {
    pub fn failing(error: BlobStoreError) -> Self {
        Self {
            puts: Arc::default(),
            failure: Some(error),
        }
    }

    pub fn puts(&self) -> Vec<PutCall> {
        self.puts.lock().unwrap().clone()
    }
}

#[async_trait]
impl BlobStore for RecordingBlobStore {
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<(), BlobStoreError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }

        self.puts.lock().unwrap().push(PutCall {
            bucket: bucket.to_string(),
            key: key.to_string(),
            bytes,
            content_type: content_type.to_string(),
        });
        Ok(())
    }
}

// ----------------------------
// Document store
// ----------------------------

/// Post records keyed by id. A post is only present once `images` exists,
/// so "missing record" and "images absent" behave the same way.
#[derive(Clone, Default)]
pub struct InMemoryPostImageStore {
    records: Arc<Mutex<HashMap<String, PostImageRecord>>>,
    calls: Arc<AtomicUsize>,
    failure: Option<ConditionalUpdateError>,
}

impl InMemoryPostImageStore {
    pub fn failing(error: ConditionalUpdateError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    pub fn seed(&self, record: PostImageRecord) {
        self.records
            .lock()
            .unwrap()
            .insert(record.post_id.clone(), record);
    }

    pub fn get(&self, post_id: &str) -> Option<PostImageRecord> {
        self.records.lock().unwrap().get(post_id).cloned()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PostImageStore for InMemoryPostImageStore {
    async fn conditional_update(
        &self,
        update: PostImageUpdate,
    ) -> Result<PostImageRecord, ConditionalUpdateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }

        // check and write under one lock
        let mut records = self.records.lock().unwrap();
        let exists = records.contains_key(&update.post_id);
        match (update.precondition, exists) {
            (ImagesPrecondition::ImagesNotExist, true) | (ImagesPrecondition::ImagesExist, false) => {
                return Err(ConditionalUpdateError::ConditionCheckFailed)
            }
            _ => {}
        }

        let record = records
            .entry(update.post_id.clone())
            .or_insert_with(|| PostImageRecord {
                post_id: update.post_id.clone(),
                images: Vec::new(),
                image: None,
                updated_date_time: 0,
            });

        match update.images {
            ImagesMutation::Initialize(paths) => record.images = paths,
            ImagesMutation::Append(paths) => record.images.extend(paths),
        }
        if let Some(image) = update.display_image {
            record.image = Some(image);
        }
        record.updated_date_time = update.updated_date_time;

        Ok(record.clone())
    }
}

// ----------------------------
// Token generator
// ----------------------------

#[derive(Debug, Clone)]
pub struct FixedTokenGenerator {
    token: String,
}

impl FixedTokenGenerator {
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
        }
    }
}

impl TokenGenerator for FixedTokenGenerator {
    fn generate(&self) -> String {
        self.token.clone()
    }
}

// ----------------------------
// Images
// ----------------------------

/// Encodes a gradient of the given size. PNG keeps an alpha channel, JPEG does not.
pub fn encode_test_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let rgba = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    });

    let img = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(rgba).to_rgb8()),
        _ => DynamicImage::ImageRgba8(rgba),
    };

    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, format).unwrap();
    out.into_inner()
}
