// std
use std::{env, fs, path::PathBuf, process, sync::Arc};
// crates.io
use time::OffsetDateTime;
// self
use token_broker::{
	grant::Action,
	key::KeyDigest,
	service::TokenService,
	store::FileStore,
};

fn temp_path() -> PathBuf {
	let unique = format!(
		"token_broker_file_store_it_{}_{}.json",
		process::id(),
		OffsetDateTime::now_utc().unix_timestamp_nanos(),
	);

	env::temp_dir().join(unique)
}

#[tokio::test]
async fn grants_survive_a_store_reopen_within_their_ttl() {
	let path = temp_path();
	let action = Action::new("checkout").expect("Action fixture should be valid.");
	let store =
		Arc::new(FileStore::open(&path).expect("Failed to open file store snapshot."));
	let service = TokenService::new(store, KeyDigest::Sha256)
		.expect("Service fixture should construct over the file store.");
	let token = service
		.issue(&action, 5, 2)
		.await
		.expect("Issuing over the file store should succeed.");

	drop(service);

	let reopened =
		Arc::new(FileStore::open(&path).expect("Failed to reopen file store snapshot."));
	let service = TokenService::new(reopened, KeyDigest::Sha256)
		.expect("Service fixture should construct over the reopened store.");

	assert!(
		service.validate(&action, &token).await.expect("First validation should not error."),
		"The grant must survive the reopen with its counter intact.",
	);
	assert!(service.validate(&action, &token).await.expect("Second validation should not error."));
	assert!(
		!service.validate(&action, &token).await.expect("Third validation should not error."),
		"The reopened grant must still honor its two-use budget.",
	);

	fs::remove_file(&path).unwrap_or_else(|e| {
		panic!("Failed to remove temporary file store snapshot {}: {e}", path.display())
	});
}

#[tokio::test]
async fn revocation_persists_across_reopen() {
	let path = temp_path();
	let action = Action::new("password-reset").expect("Action fixture should be valid.");
	let store =
		Arc::new(FileStore::open(&path).expect("Failed to open file store snapshot."));
	let service = TokenService::new(store, KeyDigest::Sha256)
		.expect("Service fixture should construct over the file store.");
	let token = service
		.issue(&action, 5, 0)
		.await
		.expect("Issuing over the file store should succeed.");

	assert!(service.revoke(&action, &token).await.expect("Revocation should confirm removal."));

	drop(service);

	let reopened =
		Arc::new(FileStore::open(&path).expect("Failed to reopen file store snapshot."));
	let service = TokenService::new(reopened, KeyDigest::Sha256)
		.expect("Service fixture should construct over the reopened store.");

	assert!(
		!service.validate(&action, &token).await.expect("Validation should not error."),
		"A revoked grant must stay gone after the reopen.",
	);

	fs::remove_file(&path).unwrap_or_else(|e| {
		panic!("Failed to remove temporary file store snapshot {}: {e}", path.display())
	});
}
