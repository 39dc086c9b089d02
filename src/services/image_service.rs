// src/services/image_service.rs
// DOCUMENTATION: Business logic for image search
// PURPOSE: Validate, call Unsplash, resolve links and assemble the response

use crate::errors::ImageServiceError;
use crate::models::{DynamicParams, ImageData, ImageResponse, SizeKeyword, TransformFields};
use crate::services::{link_resolver, UnsplashClient};

/// Largest page the upstream will serve in one call
pub const MAX_COUNT: u32 = 30;

pub struct ImageService;

impl ImageService {
    /// Search images and normalize them into the public contract
    /// DOCUMENTATION: The size keyword is checked before any network I/O.
    /// Records whose URL cannot be resolved are skipped with a warning.
    pub async fn search(
        client: &UnsplashClient,
        query: &str,
        count: u32,
        format: &str,
        dynamic: Option<&DynamicParams>,
    ) -> Result<ImageResponse, ImageServiceError> {
        let size: SizeKeyword = format.parse()?;
        let count = Self::effective_count(count);

        let photos = client.search_photos(query, count).await?;

        let mut images = Vec::with_capacity(photos.len());
        for photo in photos.iter().take(count as usize) {
            match link_resolver::resolve(photo, size, dynamic) {
                Ok(url) => images.push(ImageData {
                    id: photo.id.clone(),
                    url,
                    description: photo.description.clone(),
                    alt_description: photo.alt_description.clone(),
                }),
                Err(e) => log::warn!("Skipping photo {}: {}", photo.id, e),
            }
        }

        Ok(ImageResponse {
            count: images.len(),
            images,
            query: query.to_string(),
            format: size,
        })
    }

    /// Same as `search`, taking individually named transform fields
    pub async fn search_with_transform(
        client: &UnsplashClient,
        query: &str,
        count: u32,
        format: &str,
        fields: TransformFields,
    ) -> Result<ImageResponse, ImageServiceError> {
        let dynamic = DynamicParams::from(fields);
        Self::search(client, query, count, format, Some(&dynamic)).await
    }

    fn effective_count(count: u32) -> u32 {
        match count {
            0 => 1,
            c if c > MAX_COUNT => {
                log::warn!("Requested count {} clamped to {}", c, MAX_COUNT);
                MAX_COUNT
            }
            c => c,
        }
    }
}
