// src/models/transform.rs
// DOCUMENTATION: Dynamic CDN transform parameters
// PURPOSE: Typed replacement for an open parameter dictionary

use serde_json::{Map, Value};

use crate::errors::ImageServiceError;

/// Quality applied when the caller does not pick one
pub const DEFAULT_QUALITY: u8 = 80;

/// Auto directive applied when the caller does not pick one
pub const DEFAULT_AUTO: &str = "format";

/// Individually named transform fields accepted by the endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformFields {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub quality: Option<u8>,
    pub fit: Option<String>,
    pub output_format: Option<String>,
    pub crop: Option<String>,
}

/// Transform parameters applied against the raw asset URL
/// DOCUMENTATION: Known CDN keys are typed; anything else is kept in
/// `passthrough` in insertion order. An unset field is simply absent.
/// Keys a JSON bag sent as `null` are kept in `nulls`: they never reach the
/// URL but still count as supplied, so no default replaces them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DynamicParams {
    /// `w`
    pub width: Option<u32>,
    /// `h`
    pub height: Option<u32>,
    /// `q`, 0-100
    pub quality: Option<u8>,
    pub fit: Option<String>,
    /// `fm`
    pub output_format: Option<String>,
    pub crop: Option<String>,
    pub auto: Option<String>,
    pub passthrough: Vec<(String, String)>,
    /// Canonical CDN keys supplied with a null value
    pub nulls: Vec<String>,
}

impl DynamicParams {
    pub fn is_empty(&self) -> bool {
        self.width.is_none()
            && self.height.is_none()
            && self.quality.is_none()
            && self.fit.is_none()
            && self.output_format.is_none()
            && self.crop.is_none()
            && self.auto.is_none()
            && self.passthrough.is_empty()
            && self.nulls.is_empty()
    }

    /// Whether the caller sent `key` as null
    pub fn is_null(&self, key: &str) -> bool {
        self.nulls.iter().any(|k| k == canonical_key(key))
    }

    /// Set one parameter by its CDN key (or the long field name).
    /// Empty values are ignored, the same as an absent one.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ImageServiceError> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(());
        }

        match key {
            "w" | "width" => self.width = Some(parse_dimension(key, value)?),
            "h" | "height" => self.height = Some(parse_dimension(key, value)?),
            "q" | "quality" => self.quality = Some(parse_quality(value)?),
            "fit" => self.fit = Some(checked_value(key, value)?),
            "fm" | "output_format" => self.output_format = Some(checked_value(key, value)?),
            "crop" => self.crop = Some(checked_value(key, value)?),
            "auto" => self.auto = Some(checked_value(key, value)?),
            _ => {
                check_key(key)?;
                let value = checked_value(key, value)?;
                match self.passthrough.iter_mut().find(|(k, _)| k == key) {
                    Some(entry) => entry.1 = value,
                    None => self.passthrough.push((key.to_string(), value)),
                }
            }
        }

        Ok(())
    }

    /// Build from `(key, value)` pairs, e.g. parsed from a query string
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, ImageServiceError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            params.set(key.as_ref(), value.as_ref())?;
        }
        Ok(params)
    }

    /// Build from a JSON parameter bag; nulls are recorded, never emitted
    pub fn from_json(bag: &Map<String, Value>) -> Result<Self, ImageServiceError> {
        let mut params = Self::default();
        for (key, value) in bag {
            match value {
                Value::Null => {
                    check_key(key)?;
                    let key = canonical_key(key).to_string();
                    if !params.nulls.contains(&key) {
                        params.nulls.push(key);
                    }
                }
                Value::String(s) => params.set(key, s)?,
                Value::Number(n) => params.set(key, &n.to_string())?,
                Value::Bool(b) => params.set(key, &b.to_string())?,
                Value::Array(_) | Value::Object(_) => {
                    return Err(ImageServiceError::InvalidInput(format!(
                        "dynamic parameter '{}' must be a string, number or boolean",
                        key
                    )))
                }
            }
        }
        Ok(params)
    }

    /// Overlay named fields; fields left unset keep the current value
    pub fn apply(&mut self, fields: TransformFields) {
        if fields.width.is_some() {
            self.width = fields.width;
        }
        if fields.height.is_some() {
            self.height = fields.height;
        }
        if fields.quality.is_some() {
            self.quality = fields.quality;
        }
        if let Some(fit) = non_empty(fields.fit) {
            self.fit = Some(fit);
        }
        if let Some(fm) = non_empty(fields.output_format) {
            self.output_format = Some(fm);
        }
        if let Some(crop) = non_empty(fields.crop) {
            self.crop = Some(crop);
        }
    }

    /// Present transform entries in serialization order, excluding `auto`
    /// and `q` which the link resolver appends with their defaults
    pub fn transform_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(w) = self.width {
            pairs.push(("w".to_string(), w.to_string()));
        }
        if let Some(h) = self.height {
            pairs.push(("h".to_string(), h.to_string()));
        }
        if let Some(fit) = &self.fit {
            pairs.push(("fit".to_string(), fit.clone()));
        }
        if let Some(fm) = &self.output_format {
            pairs.push(("fm".to_string(), fm.clone()));
        }
        if let Some(crop) = &self.crop {
            pairs.push(("crop".to_string(), crop.clone()));
        }
        pairs.extend(self.passthrough.iter().cloned());
        pairs
    }
}

impl From<TransformFields> for DynamicParams {
    fn from(fields: TransformFields) -> Self {
        let mut params = DynamicParams::default();
        params.apply(fields);
        params
    }
}

/// CDN key for a long field name; other keys are returned unchanged
fn canonical_key(key: &str) -> &str {
    match key {
        "width" => "w",
        "height" => "h",
        "quality" => "q",
        "output_format" => "fm",
        other => other,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_dimension(key: &str, value: &str) -> Result<u32, ImageServiceError> {
    value.parse().map_err(|_| {
        ImageServiceError::InvalidInput(format!(
            "dynamic parameter '{}' must be a positive integer, got '{}'",
            key, value
        ))
    })
}

fn parse_quality(value: &str) -> Result<u8, ImageServiceError> {
    match value.parse::<u8>() {
        Ok(q) if q <= 100 => Ok(q),
        _ => Err(ImageServiceError::InvalidInput(format!(
            "quality must be an integer between 0 and 100, got '{}'",
            value
        ))),
    }
}

fn check_key(key: &str) -> Result<(), ImageServiceError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ImageServiceError::InvalidInput(format!(
            "invalid dynamic parameter name '{}'",
            key
        )))
    }
}

// Values are appended to the URL verbatim, so reject anything that would
// split or terminate the query string.
fn checked_value(key: &str, value: &str) -> Result<String, ImageServiceError> {
    if value
        .chars()
        .any(|c| matches!(c, '&' | '#' | '?' | '=') || c.is_whitespace() || c.is_control())
    {
        return Err(ImageServiceError::InvalidInput(format!(
            "dynamic parameter '{}' has an invalid value '{}'",
            key, value
        )));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn test_from_json_drops_nulls_and_stringifies() {
        let bag = json!({"w": 200, "fit": "crop", "q": null, "dpr": 2, "trim": true});
        let params = assert_ok!(DynamicParams::from_json(bag.as_object().unwrap()));

        assert_eq!(params.width, Some(200));
        assert_eq!(params.fit.as_deref(), Some("crop"));
        assert_eq!(params.quality, None);
        assert!(params.passthrough.contains(&("dpr".to_string(), "2".to_string())));
        assert!(params.passthrough.contains(&("trim".to_string(), "true".to_string())));
    }

    #[test]
    fn test_from_json_nulls_count_as_supplied() {
        let bag = json!({"w": null, "quality": null});
        let params = assert_ok!(DynamicParams::from_json(bag.as_object().unwrap()));

        assert!(!params.is_empty());
        assert!(params.transform_pairs().is_empty());
        assert!(params.is_null("q"));
        assert!(params.is_null("width"));
        assert!(!params.is_null("auto"));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert_err!(DynamicParams::from_pairs([("q", "101")]));
        assert_err!(DynamicParams::from_pairs([("w", "wide")]));
        assert_err!(DynamicParams::from_pairs([("crop", "faces&x=1")]));
        assert_err!(DynamicParams::from_pairs([("bad key", "1")]));

        let nested = json!({"rect": [0, 0, 10, 10]});
        assert_err!(DynamicParams::from_json(nested.as_object().unwrap()));
    }

    #[test]
    fn test_named_fields_override_bag() {
        let mut params = assert_ok!(DynamicParams::from_pairs([("w", "100"), ("fit", "max")]));
        params.apply(TransformFields {
            width: Some(300),
            crop: Some("faces".to_string()),
            fit: Some("  ".to_string()),
            ..Default::default()
        });

        assert_eq!(params.width, Some(300));
        assert_eq!(params.fit.as_deref(), Some("max"));
        assert_eq!(params.crop.as_deref(), Some("faces"));
    }

    #[test]
    fn test_unset_fields_produce_empty_params() {
        assert!(DynamicParams::from(TransformFields::default()).is_empty());
    }

    #[test]
    fn test_transform_pairs_order() {
        let params = assert_ok!(DynamicParams::from_pairs([
            ("dpr", "2"),
            ("crop", "entropy"),
            ("h", "50"),
            ("w", "100"),
            ("auto", "compress"),
        ]));

        let keys: Vec<String> = params.transform_pairs().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["w", "h", "crop", "dpr"]);
    }
}
