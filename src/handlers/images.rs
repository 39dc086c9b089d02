// src/handlers/images.rs
// DOCUMENTATION: HTTP handlers for image search
// PURPOSE: Parse requests, call services, return responses

use crate::errors::ImageServiceError;
use crate::models::{DynamicParams, ImageRequest, ImagesQuery};
use crate::services::{ImageService, UnsplashClient};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use validator::Validate;

/// GET /images
/// Search images using query string parameters
///
/// DOCUMENTATION: Accepts named transform fields (width, height, quality,
/// fit, output_format, crop) and raw CDN parameters as `dynamic[key]=value`.
/// Named fields win over raw parameters for the same key.
pub async fn fetch_images(
    client: web::Data<UnsplashClient>,
    req: HttpRequest,
    query: web::Query<ImagesQuery>,
) -> Result<impl Responder, ImageServiceError> {
    // Validate request
    if let Err(e) = query.validate() {
        return Err(ImageServiceError::ValidationError(e.to_string()));
    }

    let bag = dynamic_pairs(req.query_string())?;
    let fields = query.transform_fields();

    let result = if bag.is_empty() {
        ImageService::search_with_transform(
            client.get_ref(),
            &query.query,
            query.count,
            &query.format,
            fields,
        )
        .await?
    } else {
        let mut dynamic = DynamicParams::from_pairs(bag)?;
        dynamic.apply(fields);
        ImageService::search(
            client.get_ref(),
            &query.query,
            query.count,
            &query.format,
            Some(&dynamic),
        )
        .await?
    };

    Ok(HttpResponse::Ok().json(result))
}

/// POST /images
/// Search images with a JSON body carrying a raw parameter bag
pub async fn search_images(
    client: web::Data<UnsplashClient>,
    body: web::Json<ImageRequest>,
) -> Result<impl Responder, ImageServiceError> {
    // Validate request
    if let Err(e) = body.validate() {
        return Err(ImageServiceError::ValidationError(e.to_string()));
    }

    let request = body.into_inner();
    let dynamic = match &request.dynamic {
        Some(bag) => Some(DynamicParams::from_json(bag)?),
        None => None,
    };

    let result = ImageService::search(
        client.get_ref(),
        &request.query,
        request.count,
        &request.format,
        dynamic.as_ref(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(result))
}

/// Collect `dynamic[key]=value` pairs from a raw query string
fn dynamic_pairs(query_string: &str) -> Result<Vec<(String, String)>, ImageServiceError> {
    let pairs = web::Query::<Vec<(String, String)>>::from_query(query_string)
        .map_err(|e| ImageServiceError::ValidationError(e.to_string()))?
        .into_inner();

    Ok(pairs
        .into_iter()
        .filter_map(|(key, value)| {
            key.strip_prefix("dynamic[")
                .and_then(|rest| rest.strip_suffix(']'))
                .map(|name| (name.to_string(), value))
        })
        .collect())
}

/// Configuration for image routes
/// Extractor failures (missing query, bad count) surface as validation errors
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        ImageServiceError::ValidationError(err.to_string()).into()
    }))
    .app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ImageServiceError::ValidationError(err.to_string()).into()
    }))
    .service(
        web::resource("/images")
            .route(web::get().to(fetch_images))
            .route(web::post().to(search_images)),
    );
}
