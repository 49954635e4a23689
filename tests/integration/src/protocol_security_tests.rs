//! Protocol-level security scenarios
//!
//! Token lifecycle, enumeration resistance and the download boundary,
//! exercised end to end through the dispatcher.

use std::time::Duration;

use filesync_client::{Error as ClientError, SyncOptions};
use filesync_keys::{AsymmetricCipher, Keychain, PrincipalId};
use filesync_proto::{Request, Response};
use filesync_server::Dispatcher;
use filesync_test_utils::{SyncFixture, XorCipher};

const PRINCIPAL: &str = "user@example.com";

fn seeded_fixture() -> SyncFixture {
    let fixture = SyncFixture::new();
    fixture.write_source("public.txt", b"public");
    fixture.write_source("private/keys.txt", b"secret");
    fixture.write_source_ignore("private\n");
    fixture.install_key_pair(PRINCIPAL);
    fixture
}

/// Authorize through the dispatcher and decrypt the challenge the way
/// a real client would.
fn obtain_token(fixture: &SyncFixture, dispatcher: &Dispatcher) -> String {
    let response = dispatcher.handle(&Request::authorize(PRINCIPAL));
    assert_eq!(response.status, 200);
    let challenge = response.envelope().unwrap().data.clone().unwrap()["challenge"]
        .as_str()
        .unwrap()
        .to_string();

    let ciphertext = hex::decode(challenge).unwrap();
    let keychain = Keychain::new(fixture.keys()).unwrap();
    let key = keychain
        .load_private_key(&PrincipalId::new(PRINCIPAL).unwrap())
        .unwrap();
    String::from_utf8(XorCipher.decrypt(&ciphertext, &key).unwrap()).unwrap()
}

fn download(dispatcher: &Dispatcher, token: &str, path: &str) -> Response {
    let encoded = urlencoding::encode(path).into_owned();
    dispatcher.handle(&Request::download(token, &encoded))
}

#[test]
fn test_challenge_never_carries_the_plain_token() {
    let fixture = seeded_fixture();
    let dispatcher = fixture.server();

    let response = dispatcher.handle(&Request::authorize(PRINCIPAL));
    let challenge = response.envelope().unwrap().data.clone().unwrap()["challenge"]
        .as_str()
        .unwrap()
        .to_string();
    let ciphertext = hex::decode(&challenge).unwrap();

    let keychain = Keychain::new(fixture.keys()).unwrap();
    let key = keychain
        .load_private_key(&PrincipalId::new(PRINCIPAL).unwrap())
        .unwrap();
    let token = XorCipher.decrypt(&ciphertext, &key).unwrap();

    assert_ne!(&ciphertext[4..], token.as_slice());
    assert!(dispatcher.handle(&Request::unauthorize(
        std::str::from_utf8(&token).unwrap()
    )).is_success());
}

#[test]
fn test_token_is_accepted_before_ttl_and_rejected_after() {
    let fixture = seeded_fixture();

    let live = fixture.server_with_ttl(Duration::from_secs(3600));
    let token = obtain_token(&fixture, &live);
    assert_eq!(download(&live, &token, "public.txt").status, 200);

    let instant_expiry = fixture.server_with_ttl(Duration::ZERO);
    let expired = obtain_token(&fixture, &instant_expiry);
    assert_eq!(download(&instant_expiry, &expired, "public.txt").status, 401);
}

#[test]
fn test_unauthorize_invalidates_immediately() {
    let fixture = seeded_fixture();
    let dispatcher = fixture.server();
    let token = obtain_token(&fixture, &dispatcher);

    assert_eq!(download(&dispatcher, &token, "public.txt").status, 200);

    let revoked = dispatcher.handle(&Request::unauthorize(&token));
    assert_eq!(revoked.status, 200);

    assert_eq!(download(&dispatcher, &token, "public.txt").status, 401);
}

#[test]
fn test_forged_tokens_are_rejected() {
    let fixture = seeded_fixture();
    let dispatcher = fixture.server();

    for forged in [
        "0000000000000000000000000000000000000000",
        "deadbeef",
        "",
        "../../../etc/passwd",
    ] {
        let response = download(&dispatcher, forged, "public.txt");
        assert_eq!(response.status, 401, "{forged:?} must be rejected");
    }
}

#[test]
fn test_unknown_and_malformed_principals_get_identical_refusals() {
    let fixture = seeded_fixture();
    let dispatcher = fixture.server();

    let unknown = dispatcher.handle(&Request::authorize("stranger"));
    let malformed = dispatcher.handle(&Request::authorize("no/such user"));

    assert_eq!(unknown.status, 401);
    assert_eq!(unknown, malformed);
}

#[test]
fn test_wrong_key_material_fails_authentication() {
    let fixture = SyncFixture::new();
    fixture.write_source("public.txt", b"public");
    fixture.install_mismatched_key_pair(PRINCIPAL);

    let error = fixture
        .client()
        .dispatch(PRINCIPAL, &fixture.destination(), SyncOptions::default())
        .unwrap_err();

    match error {
        ClientError::AuthenticationFailure { reason } => {
            assert_eq!(reason, "decryption error");
        }
        other => panic!("expected AuthenticationFailure, got {other:?}"),
    }
}

#[test]
fn test_expired_session_aborts_a_full_sync() {
    let fixture = seeded_fixture();
    let dispatcher = fixture.server_with_ttl(Duration::ZERO);

    let error = fixture
        .client_for(dispatcher)
        .dispatch(PRINCIPAL, &fixture.destination(), SyncOptions::default())
        .unwrap_err();

    assert!(matches!(error, ClientError::ProtocolFailure { .. }));
}

// === Download boundary ===

#[test]
fn test_traversal_and_ignored_paths_are_not_found() {
    let fixture = seeded_fixture();
    let dispatcher = fixture.server();
    let token = obtain_token(&fixture, &dispatcher);

    for path in [
        "../outside.txt",
        "../../etc/passwd",
        ".syncignore",
        "private/.syncignore",
        "private/keys.txt",
        "private",
    ] {
        let response = download(&dispatcher, &token, path);
        assert_eq!(response.status, 404, "{path:?} must be refused");
        assert!(response.bytes().is_none(), "{path:?} must carry no bytes");
    }

    assert_eq!(download(&dispatcher, &token, "public.txt").status, 200);
}

#[test]
fn test_refusals_are_indistinguishable_from_missing_files() {
    let fixture = seeded_fixture();
    let dispatcher = fixture.server();
    let token = obtain_token(&fixture, &dispatcher);

    let ignored = download(&dispatcher, &token, "private/keys.txt");
    let missing = download(&dispatcher, &token, "no-such-file.txt");
    let traversal = download(&dispatcher, &token, "../outside.txt");

    assert_eq!(ignored, missing);
    assert_eq!(ignored, traversal);
}

#[test]
fn test_ignored_paths_stay_hidden_from_difference() {
    let fixture = seeded_fixture();
    let dispatcher = fixture.server();
    let token = obtain_token(&fixture, &dispatcher);

    let response = dispatcher.handle(&Request::difference(&token, vec![], false));
    let data = response.envelope().unwrap().data.clone().unwrap();
    let listed = serde_json::to_string(&data).unwrap();

    assert!(listed.contains("public.txt"));
    assert!(!listed.contains("keys.txt"));
    assert!(!listed.contains(".syncignore"));
}
