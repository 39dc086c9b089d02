// src/models/image.rs
// DOCUMENTATION: Request and response models for the image search endpoint
// PURPOSE: Defines the stable contract exposed to callers

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidationError};

use super::TransformFields;
use crate::errors::ImageServiceError;

/// Named pre-rendered image size offered by Unsplash
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeKeyword {
    Full,
    #[default]
    Regular,
    Thumb,
    Small,
    Raw,
}

impl SizeKeyword {
    pub const ALL: [SizeKeyword; 5] = [
        SizeKeyword::Full,
        SizeKeyword::Regular,
        SizeKeyword::Thumb,
        SizeKeyword::Small,
        SizeKeyword::Raw,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SizeKeyword::Full => "full",
            SizeKeyword::Regular => "regular",
            SizeKeyword::Thumb => "thumb",
            SizeKeyword::Small => "small",
            SizeKeyword::Raw => "raw",
        }
    }

    /// Comma separated list of every keyword, for error messages and docs
    pub fn valid_list() -> String {
        Self::ALL
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for SizeKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizeKeyword {
    type Err = ImageServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|size| size.as_str() == s)
            .ok_or_else(|| {
                ImageServiceError::InvalidFormat(format!(
                    "Invalid format '{}'. Must be one of: {}",
                    s,
                    Self::valid_list()
                ))
            })
    }
}

/// Rejects empty and whitespace-only search terms
fn validate_query(query: &str) -> Result<(), ValidationError> {
    if query.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("query must not be empty".into());
        return Err(err);
    }
    Ok(())
}

fn default_count() -> u32 {
    1
}

fn default_format() -> String {
    SizeKeyword::default().as_str().to_string()
}

/// Query string for GET /images
/// DOCUMENTATION: Named transform fields are folded into dynamic parameters.
/// Raw CDN parameters arrive separately as `dynamic[key]=value` pairs.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ImagesQuery {
    /// Search term (e.g. "pizza", "sunset")
    #[validate(custom = "validate_query")]
    pub query: String,

    /// Number of images (1-30)
    #[serde(default = "default_count")]
    #[validate(range(min = 1, max = 30, message = "count must be between 1 and 30"))]
    pub count: u32,

    /// Size keyword; checked against SizeKeyword by the gateway
    #[serde(default = "default_format")]
    pub format: String,

    pub width: Option<u32>,

    pub height: Option<u32>,

    /// Compression quality (0-100)
    #[validate(range(max = 100, message = "quality must be between 0 and 100"))]
    pub quality: Option<u8>,

    pub fit: Option<String>,

    /// CDN output format (jpg, png, webp, avif, ...)
    pub output_format: Option<String>,

    /// Crop mode: top, bottom, left, right, faces, focalpoint, edges, entropy.
    /// Passed through to the CDN unvalidated.
    pub crop: Option<String>,
}

impl ImagesQuery {
    pub fn transform_fields(&self) -> TransformFields {
        TransformFields {
            width: self.width,
            height: self.height,
            quality: self.quality,
            fit: self.fit.clone(),
            output_format: self.output_format.clone(),
            crop: self.crop.clone(),
        }
    }
}

/// JSON body for POST /images
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ImageRequest {
    #[validate(custom = "validate_query")]
    pub query: String,

    #[serde(default = "default_count")]
    #[validate(range(min = 1, max = 30, message = "count must be between 1 and 30"))]
    pub count: u32,

    #[serde(default = "default_format")]
    pub format: String,

    /// Raw CDN parameter bag; null values are dropped
    #[serde(default)]
    pub dynamic: Option<Map<String, Value>>,
}

/// One normalized image returned to callers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageData {
    pub id: String,
    pub url: String,
    pub description: Option<String>,
    pub alt_description: Option<String>,
}

/// Response envelope for image searches
#[derive(Debug, Clone, Serialize)]
pub struct ImageResponse {
    /// Images in upstream relevance order
    pub images: Vec<ImageData>,
    pub query: String,
    /// Number of images actually returned
    pub count: usize,
    /// Size keyword that was honored
    pub format: SizeKeyword,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_keyword_parsing() {
        for size in SizeKeyword::ALL {
            assert_eq!(size.as_str().parse::<SizeKeyword>().unwrap(), size);
        }
        assert!("Regular".parse::<SizeKeyword>().is_err());
        assert!("".parse::<SizeKeyword>().is_err());
    }

    #[test]
    fn test_invalid_size_message_names_value_and_valid_set() {
        let err = "invalid".parse::<SizeKeyword>().unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, ImageServiceError::InvalidFormat(_)));
        assert!(message.contains("Invalid format 'invalid'"));
        for keyword in ["full", "regular", "thumb", "small", "raw"] {
            assert!(message.contains(keyword), "missing {keyword} in {message}");
        }
    }

    #[test]
    fn test_images_query_validation() {
        let query = ImagesQuery {
            query: "pizza".to_string(),
            count: 31,
            format: default_format(),
            width: None,
            height: None,
            quality: Some(101),
            fit: None,
            output_format: None,
            crop: None,
        };
        let errors = query.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("count"));
        assert!(fields.contains_key("quality"));
        assert!(!fields.contains_key("query"));
    }

    #[test]
    fn test_blank_query_is_rejected() {
        let req: ImageRequest = serde_json::from_str(r#"{"query": "   "}"#).unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("query"));

        let req: ImageRequest = serde_json::from_str(r#"{"query": " ocean "}"#).unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_image_request_defaults() {
        let req: ImageRequest = serde_json::from_str(r#"{"query": "ocean"}"#).unwrap();
        assert_eq!(req.count, 1);
        assert_eq!(req.format, "regular");
        assert!(req.dynamic.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_response_serializes_format_keyword() {
        let response = ImageResponse {
            images: vec![],
            query: "pizza".to_string(),
            count: 0,
            format: SizeKeyword::Thumb,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["format"], "thumb");
        assert_eq!(json["images"], serde_json::json!([]));
    }
}
