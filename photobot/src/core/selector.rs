use log::{debug, info, warn};

use crate::catalog::{Catalog, Source};
use crate::error::{Error, Result};
use crate::flickr::PhotoProvider;
use crate::models::{Photo, PhotoPage};
use crate::random::RandomSource;

/// A photo together with the source it was taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub source: Source,
    pub photo: Photo,
}

/// Picks photos from the catalog, either at random or by search phrase.
pub struct ImageSelector<'a, P> {
    provider: &'a P,
    catalog: &'a Catalog,
    random: &'a dyn RandomSource,
    page_size: u32,
}

impl<'a, P: PhotoProvider> ImageSelector<'a, P> {
    pub fn new(
        provider: &'a P,
        catalog: &'a Catalog,
        random: &'a dyn RandomSource,
        page_size: u32,
    ) -> Self {
        Self {
            provider,
            catalog,
            random,
            page_size: page_size.max(1),
        }
    }

    pub fn provider(&self) -> &'a P {
        self.provider
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Searches when a phrase is given, otherwise picks at random.
    pub async fn select(&self, term: Option<&str>, retry_limit: usize) -> Result<Selection> {
        match term {
            Some(term) => self.search(term, retry_limit).await,
            None => self.select_random().await,
        }
    }

    /// One random source, then a random photo from one of its albums when it
    /// has any, else from its photostream. Not retried.
    pub async fn select_random(&self) -> Result<Selection> {
        let source = self.catalog.pick(self.random)?;
        info!("selected Flickr source {}", source.flickr_id());
        let photo = if source.has_albums() {
            self.select_random_album_photo(source).await?
        } else {
            self.select_random_photostream_photo(source).await?
        };
        Ok(Selection {
            source: source.clone(),
            photo,
        })
    }

    pub async fn select_random_album_photo(&self, source: &Source) -> Result<Photo> {
        let albums = source.album_ids();
        if albums.is_empty() {
            return Err(Error::NoAlbumsFound(format!(
                "source {} has no configured albums",
                source.flickr_id()
            )));
        }
        let album_id = &albums[self.random.uniform(0, albums.len() - 1)];
        let album = self
            .provider
            .get_album_info(source.flickr_id(), album_id)
            .await?;
        let page = self.random_page(album.photo_count);
        info!(
            "Flickr album {} for user {} has {} images, selected page {page}",
            album.title,
            source.display_name(),
            album.photo_count
        );
        let photos = self
            .provider
            .get_album_photos(source.flickr_id(), album_id, page)
            .await?;
        self.pick_photo(photos)
    }

    pub async fn select_random_photostream_photo(&self, source: &Source) -> Result<Photo> {
        let count = source.user_info.photo_count;
        let page = self.random_page(count);
        info!(
            "Flickr user {} has {count} images, selected page {page}",
            source.display_name()
        );
        let photos = self
            .provider
            .get_photostream(source.flickr_id(), page)
            .await?;
        self.pick_photo(photos)
    }

    /// Up to `retry_limit` attempts, each against a freshly picked source.
    /// Only data absence is retried.
    pub async fn search(&self, term: &str, retry_limit: usize) -> Result<Selection> {
        for attempt in 1..=retry_limit {
            let source = self.catalog.pick(self.random)?;
            debug!(
                "search attempt {attempt}/{retry_limit} for {term:?} in {}",
                source.flickr_id()
            );
            match self.search_source(source, term).await {
                Ok(photo) => {
                    return Ok(Selection {
                        source: source.clone(),
                        photo,
                    });
                }
                Err(e) if e.is_not_found() => {
                    info!("attempt {attempt} found nothing: {e}");
                }
                Err(e) => {
                    warn!("search for {term:?} failed: {e}");
                    return Err(e);
                }
            }
        }
        Err(Error::NoPhotosFound(format!(
            "no photo matching {term:?} after {retry_limit} attempts"
        )))
    }

    async fn search_source(&self, source: &Source, term: &str) -> Result<Photo> {
        let probe = self
            .provider
            .search_user_photos(source.flickr_id(), term, 1, 1)
            .await?;
        if probe.total == 0 {
            return Err(Error::NoPhotosFound(format!(
                "{} has no photos matching {term:?}",
                source.flickr_id()
            )));
        }
        let page = self.random_page(probe.total);
        info!(
            "Flickr user {} has {} images matching search, selected page {page}",
            source.display_name(),
            probe.total
        );
        let photos = self
            .provider
            .search_user_photos(source.flickr_id(), term, page, self.page_size)
            .await?;
        let photo = self.pick_photo(photos)?;

        // search cannot be scoped to albums, so check membership afterwards
        if source.has_albums()
            && !self
                .provider
                .photo_is_in_albums(&photo.id, &source.album_ids())
                .await?
        {
            return Err(Error::NoPhotosFound(format!(
                "photo {} is not in a configured album",
                photo.id
            )));
        }
        Ok(photo)
    }

    /// Uniform 1-based page over `count` items.
    fn random_page(&self, count: u64) -> u32 {
        let pages = count.div_ceil(self.page_size as u64).max(1);
        let pages = usize::try_from(pages).unwrap_or(usize::MAX);
        self.random.uniform(1, pages) as u32
    }

    fn pick_photo(&self, page: PhotoPage) -> Result<Photo> {
        if page.is_empty() {
            return Err(Error::NoPhotosFound(format!(
                "page {} has zero images",
                page.page
            )));
        }
        let mut photos = page.photos;
        let index = self.random.uniform(0, photos.len() - 1);
        debug!("selected image #{index}");
        Ok(photos.swap_remove(index))
    }
}
