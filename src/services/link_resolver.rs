// src/services/link_resolver.rs
// DOCUMENTATION: Hotlink construction for Unsplash photos
// PURPOSE: Pick the named-size URL or build a dynamic CDN URL from the raw asset

use crate::errors::ImageServiceError;
use crate::models::{DynamicParams, SizeKeyword, DEFAULT_AUTO, DEFAULT_QUALITY};
use crate::services::UnsplashPhoto;

/// Resolve the URL handed back to the caller for one photo
/// DOCUMENTATION: Without dynamic parameters this is `urls[size]`.
/// With them, transforms are appended to `urls.raw` since the CDN only
/// accepts them against the raw asset. Pure: same inputs, same URL.
pub fn resolve(
    photo: &UnsplashPhoto,
    size: SizeKeyword,
    dynamic: Option<&DynamicParams>,
) -> Result<String, ImageServiceError> {
    match dynamic {
        Some(params) if !params.is_empty() => resolve_dynamic(photo, params),
        _ => resolve_named(photo, size),
    }
}

fn resolve_named(photo: &UnsplashPhoto, size: SizeKeyword) -> Result<String, ImageServiceError> {
    if let Some(url) = photo.urls.get(size) {
        return Ok(url.to_string());
    }

    if size != SizeKeyword::Regular {
        if let Some(url) = photo.urls.get(SizeKeyword::Regular) {
            log::warn!(
                "Photo {} has no '{}' url, falling back to 'regular'",
                photo.id,
                size
            );
            return Ok(url.to_string());
        }
    }

    Err(ImageServiceError::InternalError(format!(
        "photo {} has no '{}' url",
        photo.id, size
    )))
}

fn resolve_dynamic(
    photo: &UnsplashPhoto,
    params: &DynamicParams,
) -> Result<String, ImageServiceError> {
    let raw = photo.urls.get(SizeKeyword::Raw).ok_or_else(|| {
        ImageServiceError::InternalError(format!(
            "photo {} has no raw url to apply transforms to",
            photo.id
        ))
    })?;

    // A key sent as null suppresses its default and is itself dropped
    let mut pairs = params.transform_pairs();
    match &params.auto {
        Some(auto) => pairs.push(("auto".to_string(), auto.clone())),
        None if !params.is_null("auto") => {
            pairs.push(("auto".to_string(), DEFAULT_AUTO.to_string()))
        }
        None => {}
    }
    match params.quality {
        Some(q) => pairs.push(("q".to_string(), q.to_string())),
        None if !params.is_null("q") => {
            pairs.push(("q".to_string(), DEFAULT_QUALITY.to_string()))
        }
        None => {}
    }

    let query = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    // Raw links from Unsplash already carry `ixid`/`ixlib`, so this is
    // normally `&`. Anything else gets a proper `?`.
    let separator = if raw.ends_with('?') || raw.ends_with('&') {
        ""
    } else if raw.contains('?') {
        "&"
    } else {
        "?"
    };

    Ok(format!("{}{}{}", raw, separator, query))
}
