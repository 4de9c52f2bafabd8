mod common;

use bytes::Bytes;
use common::{RecordingStore, content};
use futures::{StreamExt, stream};
use profile_image_server::{
    adapters::outbound::persistence::InMemoryProfileRepository,
    domain::{
        errors::{ProfileError, StorageError},
        models::{ALICE_ID, BOB_ID, UploadImageRequest},
        value_objects::{BucketName, UserId},
    },
    ports::{ProfileRepository, ProfileService, ObjectStore},
    services::ProfileServiceImpl,
};
use std::{io, sync::Arc};

struct Fixture {
    repository: Arc<InMemoryProfileRepository>,
    store: Arc<RecordingStore>,
    service: ProfileServiceImpl,
    bucket: BucketName,
}

fn fixture_with(store: RecordingStore) -> Fixture {
    let bucket = BucketName::default_bucket();
    let repository = Arc::new(InMemoryProfileRepository::new());
    let store = Arc::new(store);
    let service = ProfileServiceImpl::new(repository.clone(), store.clone(), bucket.clone());

    Fixture {
        repository,
        store,
        service,
        bucket,
    }
}

fn fixture() -> Fixture {
    fixture_with(RecordingStore::new(BucketName::default_bucket()))
}

fn request(
    user_id: UserId,
    filename: Option<&str>,
    content_type: Option<&str>,
) -> UploadImageRequest<'static> {
    UploadImageRequest {
        user_id,
        filename: filename.map(str::to_string),
        content_type: content_type.map(str::to_string),
        content: content(b"data"),
    }
}

#[tokio::test]
async fn test_upload_links_url_to_profile() {
    let fx = fixture();
    let alice = UserId::new(ALICE_ID);

    let url = fx
        .service
        .upload_profile_image(request(alice, Some("picture.jpg"), Some("image/jpeg")))
        .await
        .unwrap();

    let puts = fx.store.puts();
    assert_eq!(puts.len(), 1);
    let put = &puts[0];
    assert_eq!(put.bucket, fx.bucket);
    assert!(put.key.as_str().ends_with("-picture.jpg"));
    assert_eq!(put.data, Bytes::from_static(b"data"));
    assert_eq!(put.metadata.len(), 1);
    assert_eq!(put.metadata.get("Content-Type"), Some("image/jpeg"));

    assert_eq!(url, format!("memory://profile-image-uploads/{}", put.key));

    let profile = fx.repository.get(&alice).await.unwrap().unwrap();
    assert_eq!(profile.profile_image_link(), Some(url.as_str()));

    let stored = fx.store.get_object(&fx.bucket, &put.key).await.unwrap();
    assert_eq!(stored.data, Bytes::from_static(b"data"));
    assert_eq!(stored.metadata.content_type(), Some("image/jpeg"));
}

#[tokio::test]
async fn test_unknown_user_never_touches_storage() {
    let fx = fixture();
    let stranger = UserId::generate();

    let err = fx
        .service
        .upload_profile_image(request(stranger, Some("picture.jpg"), Some("image/jpeg")))
        .await
        .unwrap_err();

    assert!(matches!(err, ProfileError::UserNotFound(id) if id == stranger));
    assert!(fx.store.puts().is_empty());
}

#[tokio::test]
async fn test_metadata_has_content_type_only_when_supplied() {
    let fx = fixture();
    let bob = UserId::new(BOB_ID);

    fx.service
        .upload_profile_image(request(bob, Some("raw.bin"), None))
        .await
        .unwrap();

    let puts = fx.store.puts();
    assert!(puts[0].metadata.is_empty());
    assert_eq!(puts[0].metadata.content_type(), None);
}

#[tokio::test]
async fn test_key_suffix_follows_filename() {
    let fx = fixture();
    let alice = UserId::new(ALICE_ID);

    for filename in [Some("my photo.jpg"), None, Some("")] {
        fx.service
            .upload_profile_image(request(alice, filename, Some("image/jpeg")))
            .await
            .unwrap();
    }

    let suffixes: Vec<String> = fx
        .store
        .puts()
        .iter()
        .map(|p| p.key.as_str()[37..].to_string())
        .collect();
    assert_eq!(suffixes, vec!["my_photo.jpg", "file", "file"]);
}

#[tokio::test]
async fn test_repeated_uploads_get_distinct_keys_and_last_link_wins() {
    let fx = fixture();
    let alice = UserId::new(ALICE_ID);

    let first = fx
        .service
        .upload_profile_image(request(alice, Some("same.png"), None))
        .await
        .unwrap();
    let second = fx
        .service
        .upload_profile_image(request(alice, Some("same.png"), None))
        .await
        .unwrap();

    assert_ne!(first, second);
    let puts = fx.store.puts();
    assert_ne!(puts[0].key, puts[1].key);

    let profile = fx.repository.get(&alice).await.unwrap().unwrap();
    assert_eq!(profile.profile_image_link(), Some(second.as_str()));
}

#[tokio::test]
async fn test_failed_write_leaves_profile_untouched() {
    let fx = fixture_with(RecordingStore::failing_writes(BucketName::default_bucket()));
    let alice = UserId::new(ALICE_ID);

    let err = fx
        .service
        .upload_profile_image(request(alice, Some("picture.jpg"), Some("image/jpeg")))
        .await
        .unwrap_err();

    assert!(matches!(err, ProfileError::StorageWriteFailed(_)));
    assert_eq!(err.code(), "storage_write_failed");

    let profile = fx.repository.get(&alice).await.unwrap().unwrap();
    assert_eq!(profile.profile_image_link(), None);
}

#[tokio::test]
async fn test_unreadable_content_is_a_write_failure() {
    let fx = fixture();
    let alice = UserId::new(ALICE_ID);

    let broken = stream::iter(vec![
        Ok(Bytes::from_static(b"da")),
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "client went away")),
    ])
    .boxed();

    let err = fx
        .service
        .upload_profile_image(UploadImageRequest {
            user_id: alice,
            filename: Some("picture.jpg".to_string()),
            content_type: None,
            content: broken,
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ProfileError::StorageWriteFailed(StorageError::ContentRead { .. })
    ));
    assert!(fx.store.puts().is_empty());
}

#[tokio::test]
async fn test_url_failure_leaves_object_stored_but_unlinked() {
    let fx = fixture_with(RecordingStore::failing_urls(BucketName::default_bucket()));
    let alice = UserId::new(ALICE_ID);

    let err = fx
        .service
        .upload_profile_image(request(alice, Some("picture.jpg"), Some("image/jpeg")))
        .await
        .unwrap_err();

    assert!(matches!(err, ProfileError::UrlResolutionFailed(_)));

    let puts = fx.store.puts();
    assert_eq!(puts.len(), 1);
    assert!(fx.store.get_object(&fx.bucket, &puts[0].key).await.is_ok());

    let profile = fx.repository.get(&alice).await.unwrap().unwrap();
    assert_eq!(profile.profile_image_link(), None);
}

#[tokio::test]
async fn test_list_profiles_returns_sample_users() {
    let fx = fixture();

    let profiles = fx.service.list_profiles().await.unwrap();
    let names: Vec<&str> = profiles.iter().map(|p| p.username()).collect();
    assert_eq!(names, vec!["alice", "bob"]);

    let bob = fx.service.get_profile(&UserId::new(BOB_ID)).await.unwrap();
    assert_eq!(bob.map(|p| p.username().to_string()), Some("bob".to_string()));
}
