//! Source image collection
//!
//! Every image named by the parameter document is decoded once at
//! startup. A source that cannot be read is a fatal configuration
//! problem, reported with the offending path.

use std::path::Path;

use thiserror::Error;
use tracing::info;

use artstar_core::{PixelFormat, Raster};

use crate::params::TransformParameters;

/// Errors that can occur while building the collection
#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("cannot read source image {path}: {source}")]
    Decode {
        path: String,
        source: image::ImageError,
    },

    #[error("core error: {0}")]
    Core(#[from] artstar_core::Error),

    #[error("collection is empty")]
    Empty,
}

pub type CollectionResult<T> = Result<T, CollectionError>;

/// One decoded source image with its adjustable parameters
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub params: TransformParameters,
    pub raster: Raster,
}

/// The ordered set of source images for a session
#[derive(Debug, Clone)]
pub struct ImageCollection {
    images: Vec<SourceImage>,
}

impl ImageCollection {
    /// Decode every image named in `params`. Order is preserved.
    ///
    /// # Errors
    ///
    /// [`CollectionError::Empty`] for an empty parameter list, and
    /// [`CollectionError::Decode`] for the first unreadable source.
    pub fn load(params: Vec<TransformParameters>) -> CollectionResult<Self> {
        if params.is_empty() {
            return Err(CollectionError::Empty);
        }
        let mut images = Vec::with_capacity(params.len());
        for p in params {
            let raster = decode_rgb(p.source_path())?;
            info!(
                path = p.source_path(),
                width = raster.width(),
                height = raster.height(),
                "decoded source image"
            );
            images.push(SourceImage { params: p, raster });
        }
        Ok(Self { images })
    }

    /// Build a collection from already-decoded rasters. Test seam.
    pub fn from_images(images: Vec<SourceImage>) -> CollectionResult<Self> {
        if images.is_empty() {
            return Err(CollectionError::Empty);
        }
        Ok(Self { images })
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn get(&self, index: usize) -> &SourceImage {
        &self.images[index]
    }

    pub fn get_mut(&mut self, index: usize) -> &mut SourceImage {
        &mut self.images[index]
    }

    /// Index `offset` steps away from `index`, wrapping both directions.
    pub fn neighbor_index(&self, index: usize, offset: i32) -> usize {
        let len = self.images.len() as i32;
        (index as i32 + offset).rem_euclid(len) as usize
    }

    /// The current parameters of every image, in collection order.
    pub fn parameters(&self) -> Vec<TransformParameters> {
        self.images.iter().map(|img| img.params.clone()).collect()
    }
}

/// Decode a source file into an RGB raster.
fn decode_rgb(path: &str) -> CollectionResult<Raster> {
    let decoded = image::open(Path::new(path)).map_err(|source| CollectionError::Decode {
        path: path.to_string(),
        source,
    })?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(Raster::from_data(
        width,
        height,
        PixelFormat::Rgb8,
        rgb.into_raw(),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_collection(n: usize) -> ImageCollection {
        let images = (0..n)
            .map(|i| SourceImage {
                params: TransformParameters::new(format!("img{i}.jpg")),
                raster: Raster::new(4, 4, PixelFormat::Rgb8).unwrap(),
            })
            .collect();
        ImageCollection::from_images(images).unwrap()
    }

    #[test]
    fn test_empty_collection_rejected() {
        assert!(matches!(
            ImageCollection::from_images(Vec::new()),
            Err(CollectionError::Empty)
        ));
    }

    #[test]
    fn test_neighbor_wraps_forward() {
        let c = tiny_collection(3);
        assert_eq!(c.neighbor_index(0, 1), 1);
        assert_eq!(c.neighbor_index(2, 1), 0);
    }

    #[test]
    fn test_neighbor_wraps_backward() {
        let c = tiny_collection(3);
        assert_eq!(c.neighbor_index(0, -1), 2);
        assert_eq!(c.neighbor_index(1, -1), 0);
    }

    #[test]
    fn test_neighbor_single_image_is_self() {
        let c = tiny_collection(1);
        assert_eq!(c.neighbor_index(0, 1), 0);
        assert_eq!(c.neighbor_index(0, -1), 0);
    }

    #[test]
    fn test_parameters_preserve_order() {
        let c = tiny_collection(3);
        let params = c.parameters();
        assert_eq!(params[0].source_path(), "img0.jpg");
        assert_eq!(params[2].source_path(), "img2.jpg");
    }

    #[test]
    fn test_unreadable_source_is_reported_with_path() {
        let err = decode_rgb("does/not/exist.jpg").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.jpg"));
    }
}
