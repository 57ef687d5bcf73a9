//! Test mock for the photo provider
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::{
    error::{Error, Result},
    flickr::{EchoApi, PeopleApi, PhotoProvider, PhotosApi, PhotosetsApi},
    models::{AlbumInfo, Photo, PhotoPage, UserInfo},
};

/// In-memory Flickr. Every call is recorded as a short string such as
/// `search:1@N01:saturn:2:10`, so tests can assert on what was asked.
#[derive(Debug, Clone, Default)]
pub struct MockPhotoProvider {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<String, UserInfo>,
    user_errors: HashMap<String, (i64, String)>,
    photostreams: HashMap<String, Vec<Photo>>,
    albums: HashMap<String, AlbumInfo>,
    album_photos: HashMap<String, Vec<Photo>>,
    search_results: HashMap<String, Vec<Photo>>,
    search_errors: HashMap<String, (i64, String)>,
    contexts: HashMap<String, Vec<String>>,
    echo_rejected: bool,
    calls: Vec<String>,
}

impl MockPhotoProvider {
    pub fn new() -> Self {
        Default::default()
    }

    fn with(self, f: impl FnOnce(&mut Inner)) -> Self {
        f(&mut self.inner.lock().unwrap());
        self
    }

    pub fn with_user(self, info: UserInfo) -> Self {
        self.with(|inner| {
            inner.users.insert(info.id.clone(), info);
        })
    }

    pub fn with_user_error(self, user_id: &str, code: i64, message: &str) -> Self {
        self.with(|inner| {
            inner
                .user_errors
                .insert(user_id.into(), (code, message.into()));
        })
    }

    pub fn with_photostream(self, user_id: &str, photos: Vec<Photo>) -> Self {
        self.with(|inner| {
            inner.photostreams.insert(user_id.into(), photos);
        })
    }

    pub fn with_album(self, album: AlbumInfo, photos: Vec<Photo>) -> Self {
        self.with(|inner| {
            inner.album_photos.insert(album.id.clone(), photos);
            inner.albums.insert(album.id.clone(), album);
        })
    }

    pub fn with_search_results(self, user_id: &str, photos: Vec<Photo>) -> Self {
        self.with(|inner| {
            inner.search_results.insert(user_id.into(), photos);
        })
    }

    pub fn with_search_error(self, user_id: &str, code: i64, message: &str) -> Self {
        self.with(|inner| {
            inner
                .search_errors
                .insert(user_id.into(), (code, message.into()));
        })
    }

    pub fn with_contexts(self, photo_id: &str, album_ids: &[&str]) -> Self {
        self.with(|inner| {
            inner.contexts.insert(
                photo_id.into(),
                album_ids.iter().map(|a| a.to_string()).collect(),
            );
        })
    }

    pub fn with_rejected_key(self) -> Self {
        self.with(|inner| inner.echo_rejected = true)
    }

    pub fn calls(&self) -> Vec<String> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn calls_starting_with(&self, prefix: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with(prefix))
            .collect()
    }

    pub fn requested_users(&self) -> Vec<String> {
        self.calls_starting_with("user:")
            .into_iter()
            .map(|c| c.trim_start_matches("user:").to_string())
            .collect()
    }

    fn record(&self, call: String) {
        self.inner.lock().unwrap().calls.push(call);
    }
}

fn page_of(photos: Vec<Photo>, page: u32, per_page: u32) -> PhotoPage {
    PhotoPage {
        page,
        pages: 1,
        per_page,
        total: photos.len() as u64,
        photos,
    }
}

impl PeopleApi for MockPhotoProvider {
    async fn get_user_info(&self, user_id: &str) -> Result<UserInfo> {
        self.record(format!("user:{user_id}"));
        let inner = self.inner.lock().unwrap();
        if let Some((code, message)) = inner.user_errors.get(user_id) {
            return Err(Error::provider(*code, message.clone()));
        }
        inner
            .users
            .get(user_id)
            .cloned()
            .ok_or_else(|| Error::provider(1, "User not found"))
    }

    async fn get_photostream(&self, user_id: &str, page: u32) -> Result<PhotoPage> {
        self.record(format!("photostream:{user_id}:{page}"));
        let inner = self.inner.lock().unwrap();
        let photos = inner.photostreams.get(user_id).cloned().unwrap_or_default();
        Ok(page_of(photos, page, 10))
    }
}

impl PhotosetsApi for MockPhotoProvider {
    async fn get_album_info(&self, user_id: &str, album_id: &str) -> Result<AlbumInfo> {
        self.record(format!("album:{user_id}:{album_id}"));
        self.inner
            .lock()
            .unwrap()
            .albums
            .get(album_id)
            .cloned()
            .ok_or_else(|| Error::provider(1, "Photoset not found"))
    }

    async fn get_album_photos(
        &self,
        user_id: &str,
        album_id: &str,
        page: u32,
    ) -> Result<PhotoPage> {
        self.record(format!("album_photos:{user_id}:{album_id}:{page}"));
        let inner = self.inner.lock().unwrap();
        let photos = inner.album_photos.get(album_id).cloned().unwrap_or_default();
        Ok(page_of(photos, page, 10))
    }
}

impl PhotosApi for MockPhotoProvider {
    async fn search_user_photos(
        &self,
        user_id: &str,
        text: &str,
        page: u32,
        per_page: u32,
    ) -> Result<PhotoPage> {
        self.record(format!("search:{user_id}:{text}:{page}:{per_page}"));
        let inner = self.inner.lock().unwrap();
        if let Some((code, message)) = inner.search_errors.get(user_id) {
            return Err(Error::provider(*code, message.clone()));
        }
        let photos = inner
            .search_results
            .get(user_id)
            .cloned()
            .unwrap_or_default();
        let total = photos.len() as u64;
        let photos = photos.into_iter().take(per_page as usize).collect();
        Ok(PhotoPage {
            total,
            ..page_of(photos, page, per_page)
        })
    }

    async fn photo_is_in_albums(&self, photo_id: &str, album_ids: &[String]) -> Result<bool> {
        self.record(format!("contexts:{photo_id}"));
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .contexts
            .get(photo_id)
            .is_some_and(|sets| sets.iter().any(|s| album_ids.contains(s))))
    }
}

impl EchoApi for MockPhotoProvider {
    async fn verify_credentials(&self) -> Result<bool> {
        self.record("echo".to_string());
        Ok(!self.inner.lock().unwrap().echo_rejected)
    }
}

impl PhotoProvider for MockPhotoProvider {}
