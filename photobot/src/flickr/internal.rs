//! Wire shapes of the Flickr JSON API and their conversion into models.

use std::collections::{BTreeMap, HashMap};

use log::warn;
use serde::Deserialize;
use serde_aux::prelude::deserialize_number_from_string;
use serde_json::Value;
use url::Url;

use crate::models::{AlbumInfo, Photo, PhotoPage, UserInfo};

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct Content {
    #[serde(rename = "_content", default)]
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct CountContent {
    #[serde(
        rename = "_content",
        default,
        deserialize_with = "deserialize_number_from_string"
    )]
    pub content: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct PersonPhotos {
    #[serde(default)]
    pub count: CountContent,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PersonInternal {
    pub id: String,
    #[serde(default)]
    pub username: Content,
    #[serde(default)]
    pub realname: Option<Content>,
    #[serde(default)]
    pub photos: PersonPhotos,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PersonResponse {
    pub person: PersonInternal,
}

impl From<PersonResponse> for UserInfo {
    fn from(value: PersonResponse) -> Self {
        let person = value.person;
        UserInfo {
            id: person.id,
            username: person.username.content,
            realname: person
                .realname
                .map(|r| r.content)
                .filter(|r| !r.is_empty()),
            photo_count: person.photos.count.content,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PhotoInternal {
    pub id: String,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(flatten)]
    pub extras: HashMap<String, Value>,
}

impl PhotoInternal {
    pub fn into_photo(self, fallback_owner: Option<&str>) -> Photo {
        let mut urls = BTreeMap::new();
        for (key, value) in self.extras {
            let (Some(size), Some(raw)) = (key.strip_prefix("url_"), value.as_str()) else {
                continue;
            };
            match Url::parse(raw) {
                Ok(url) => {
                    urls.insert(size.to_string(), url);
                }
                Err(e) => warn!("photo {} has a bad {key}: {e}", self.id),
            }
        }
        Photo {
            owner: self.owner.or_else(|| fallback_owner.map(str::to_string)),
            id: self.id,
            title: self.title,
            urls,
        }
    }
}

fn page_from(
    page: u32,
    pages: u32,
    per_page: u32,
    total: u64,
    photos: Vec<PhotoInternal>,
    owner: Option<&str>,
) -> PhotoPage {
    PhotoPage {
        page,
        pages,
        per_page,
        total,
        photos: photos.into_iter().map(|p| p.into_photo(owner)).collect(),
    }
}

/// `photos` object of `people.getPublicPhotos` and `photos.search`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PhotoListInternal {
    #[serde(default, deserialize_with = "deserialize_number_from_string")]
    pub page: u32,
    #[serde(default, deserialize_with = "deserialize_number_from_string")]
    pub pages: u32,
    #[serde(default, deserialize_with = "deserialize_number_from_string")]
    pub perpage: u32,
    #[serde(default, deserialize_with = "deserialize_number_from_string")]
    pub total: u64,
    #[serde(default)]
    pub photo: Vec<PhotoInternal>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PhotosResponse {
    pub photos: PhotoListInternal,
}

impl From<PhotosResponse> for PhotoPage {
    fn from(value: PhotosResponse) -> Self {
        let p = value.photos;
        page_from(p.page, p.pages, p.perpage, p.total, p.photo, None)
    }
}

/// `photoset` object of `photosets.getPhotos`; its photos carry no owner.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PhotosetListInternal {
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default, deserialize_with = "deserialize_number_from_string")]
    pub page: u32,
    #[serde(default, deserialize_with = "deserialize_number_from_string")]
    pub pages: u32,
    #[serde(default, deserialize_with = "deserialize_number_from_string")]
    pub perpage: u32,
    #[serde(default, deserialize_with = "deserialize_number_from_string")]
    pub total: u64,
    #[serde(default)]
    pub photo: Vec<PhotoInternal>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PhotosetPhotosResponse {
    pub photoset: PhotosetListInternal,
}

impl From<PhotosetPhotosResponse> for PhotoPage {
    fn from(value: PhotosetPhotosResponse) -> Self {
        let p = value.photoset;
        page_from(
            p.page,
            p.pages,
            p.perpage,
            p.total,
            p.photo,
            p.owner.as_deref(),
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PhotosetInfoInternal {
    pub id: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub title: Content,
    #[serde(default, deserialize_with = "deserialize_number_from_string")]
    pub photos: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PhotosetInfoResponse {
    pub photoset: PhotosetInfoInternal,
}

impl From<PhotosetInfoResponse> for AlbumInfo {
    fn from(value: PhotosetInfoResponse) -> Self {
        let set = value.photoset;
        AlbumInfo {
            id: set.id,
            owner: set.owner,
            title: set.title.content,
            photo_count: set.photos,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SetContext {
    pub id: String,
}

/// `photos.getAllContexts`; a photo in no album has no `set` key.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ContextsResponse {
    #[serde(default)]
    pub set: Vec<SetContext>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct EchoResponse {}
