//! 실제 MongoDB를 대상으로 한 전체 흐름 테스트
//!
//! `TEST_MONGODB_URI`가 없으면 건너뜁니다.
//!
//! ```bash
//! TEST_MONGODB_URI=mongodb://localhost:27017 cargo test --test api_flow
//! ```

use std::sync::Arc;
use actix_web::http::{header, StatusCode};
use actix_web::{test, App};
use chrono::{Duration, Utc};
use futures_util::future::join;
use serde_json::{json, Value};
use recrutement_backend::caching::redis::RedisClient;
use recrutement_backend::core::registry::ServiceLocator;
use recrutement_backend::db::Database;
use recrutement_backend::repositories::create_all_indexes;
use recrutement_backend::routes::configure_all_routes;
use recrutement_backend::storage::{LocalDiskStorage, UploadStore};

const BOUNDARY: &str = "----recrutement-flow-boundary";

fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

fn cv_multipart(lettre: &str) -> Vec<u8> {
    format!(
        "--{b}\r\n\
         Content-Disposition: form-data; name=\"lettre_motivation\"\r\n\r\n\
         {lettre}\r\n\
         --{b}\r\n\
         Content-Disposition: form-data; name=\"cv\"; filename=\"CV_Durand.pdf\"\r\n\
         Content-Type: application/pdf\r\n\r\n\
         %PDF-1.4 cv de test\r\n\
         --{b}--\r\n",
        b = BOUNDARY,
        lettre = lettre,
    )
    .into_bytes()
}

fn video_multipart(transcription: &str) -> Vec<u8> {
    format!(
        "--{b}\r\n\
         Content-Disposition: form-data; name=\"transcription\"\r\n\r\n\
         {transcription}\r\n\
         --{b}\r\n\
         Content-Disposition: form-data; name=\"video\"; filename=\"entretien.mp4\"\r\n\
         Content-Type: video/mp4\r\n\r\n\
         00000018ftypmp42\r\n\
         --{b}--\r\n",
        b = BOUNDARY,
        transcription = transcription,
    )
    .into_bytes()
}

fn multipart_content_type() -> (header::HeaderName, String) {
    (header::CONTENT_TYPE, format!("multipart/form-data; boundary={}", BOUNDARY))
}

#[actix_web::test]
async fn test_recruitment_flow() {
    let Ok(uri) = std::env::var("TEST_MONGODB_URI") else {
        eprintln!("TEST_MONGODB_URI non défini, test ignoré");
        return;
    };

    let database_name = format!("recrutement_test_{}", uuid::Uuid::new_v4().simple());
    let database = Arc::new(Database::connect(&uri, &database_name).await.unwrap());
    let uploads = tempfile::tempdir().unwrap();

    ServiceLocator::set(database.clone());
    ServiceLocator::set(Arc::new(RedisClient::disabled()));
    ServiceLocator::set(Arc::new(UploadStore::new(Box::new(LocalDiskStorage::new(uploads.path())))));
    create_all_indexes().await.unwrap();

    let app = test::init_service(App::new().configure(configure_all_routes)).await;

    // 가입
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "email": "rh@acme.fr",
            "password": "motdepasse-rh",
            "nom": "Petit",
            "prenom": "Julie",
            "role": "recruteur"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let recruiter: Value = test::read_body_json(resp).await;
    let recruiter_token = recruiter["access_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "email": "RH@acme.fr",
            "password": "autre-mot-de-passe",
            "nom": "Petit",
            "prenom": "Julie",
            "role": "recruteur"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "duplicate email");

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "email": "paul.durand@example.fr",
            "password": "motdepasse-candidat",
            "nom": "Durand",
            "prenom": "Paul",
            "role": "candidat"
        }))
        .to_request();
    let candidate: Value = test::call_and_read_body_json(&app, req).await;
    let candidate_token = candidate["access_token"].as_str().unwrap().to_string();

    // 잘못된 비밀번호
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "paul.durand@example.fr", "password": "mauvais-mot" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // 공고 작성
    let req = test::TestRequest::post()
        .uri("/api/offres-emploi")
        .insert_header(bearer(&recruiter_token))
        .set_json(json!({
            "titre": "Développeur Rust",
            "description": "API de recrutement",
            "type_contrat": "CDI",
            "localisation": "Lyon",
            "competences": ["rust", "mongodb"]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let offer: Value = test::read_body_json(resp).await;
    let offer_id = offer["id"].as_str().unwrap().to_string();
    assert_eq!(offer["statut"], "ouverte");

    // 지원자는 공고를 만들 수 없음
    let req = test::TestRequest::post()
        .uri("/api/offres-emploi")
        .insert_header(bearer(&candidate_token))
        .set_json(json!({ "titre": "x", "description": "y", "type_contrat": "CDD" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // 공개 목록
    let req = test::TestRequest::get().uri("/api/offres-emploi?q=rust").to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["total"], 1);

    // 지원, 중복 지원
    let apply = |token: &str| {
        test::TestRequest::post()
            .uri(&format!("/api/offres-emploi/{}/candidatures", offer_id))
            .insert_header(bearer(token))
            .insert_header(multipart_content_type())
            .set_payload(cv_multipart("Bonjour, je suis intéressé."))
            .to_request()
    };

    let resp = test::call_service(&app, apply(&candidate_token)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let application: Value = test::read_body_json(resp).await;
    let application_id = application["id"].as_str().unwrap().to_string();
    assert_eq!(application["statut"], "en_attente");
    assert_eq!(application["cv"]["nom_fichier"], "CV_Durand.pdf");

    let resp = test::call_service(&app, apply(&candidate_token)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "second application");

    // 다른 채용 담당자는 공고를 수정할 수 없음
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "email": "rh@concurrent.fr",
            "password": "motdepasse-rh2",
            "nom": "Roux",
            "prenom": "Marc",
            "role": "recruteur"
        }))
        .to_request();
    let other: Value = test::call_and_read_body_json(&app, req).await;
    let other_token = other["access_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&format!("/api/offres-emploi/{}", offer_id))
        .insert_header(bearer(&other_token))
        .set_json(json!({ "statut": "fermée" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // 작성자는 지원자 목록과 CV를 볼 수 있음
    let req = test::TestRequest::get()
        .uri(&format!("/api/recruteur/offres/{}/candidatures", offer_id))
        .insert_header(bearer(&recruiter_token))
        .to_request();
    let applicants: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(applicants[0]["candidat"]["email"], "paul.durand@example.fr");

    let req = test::TestRequest::get()
        .uri(&format!("/api/candidatures/{}/cv", application_id))
        .insert_header(bearer(&recruiter_token))
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, "%PDF-1.4 cv de test");

    // 다른 지원자는 남의 CV를 받을 수 없음
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "email": "lea.bernard@example.fr",
            "password": "motdepasse-lea",
            "nom": "Bernard",
            "prenom": "Léa",
            "role": "candidat"
        }))
        .to_request();
    let second: Value = test::call_and_read_body_json(&app, req).await;
    let second_token = second["access_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/api/candidatures/{}/cv", application_id))
        .insert_header(bearer(&second_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // 대기 중인 지원은 철회 가능
    let resp = test::call_service(&app, apply(&second_token)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let withdrawn: Value = test::read_body_json(resp).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/candidates/candidatures/{}", withdrawn["id"].as_str().unwrap()))
        .insert_header(bearer(&second_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/recruteur/offres/{}/candidatures", offer_id))
        .insert_header(bearer(&recruiter_token))
        .to_request();
    let applicants: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(applicants.as_array().unwrap().len(), 1);

    // refresh 토큰은 한 번만 쓸 수 있음, 동시 요청도 하나만 통과
    let refresh = |token: &str| {
        test::TestRequest::post()
            .uri("/api/auth/refresh")
            .set_json(json!({ "refresh_token": token }))
            .to_request()
    };
    let refresh_token = candidate["refresh_token"].as_str().unwrap().to_string();

    let (first, second_attempt) = join(
        test::call_service(&app, refresh(&refresh_token)),
        test::call_service(&app, refresh(&refresh_token)),
    )
    .await;
    let statuses = [first.status(), second_attempt.status()];
    assert_eq!(statuses.iter().filter(|status| **status == StatusCode::OK).count(), 1, "{:?}", statuses);
    assert!(statuses.contains(&StatusCode::UNAUTHORIZED));

    let winner = if first.status() == StatusCode::OK { first } else { second_attempt };
    let rotated: Value = test::read_body_json(winner).await;
    let rotated_refresh = rotated["refresh_token"].as_str().unwrap().to_string();

    let resp = test::call_service(&app, refresh(&refresh_token)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "reused refresh token");

    let resp = test::call_service(&app, refresh(&rotated_refresh)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // 면접 일정, 녹화 업로드
    let schedule = |candidature_id: &str| {
        test::TestRequest::post()
            .uri("/api/recruteur/entretiens")
            .insert_header(bearer(&recruiter_token))
            .set_json(json!({
                "candidature_id": candidature_id,
                "date_entretien": (Utc::now() + Duration::days(3)).to_rfc3339(),
                "mode": "visio",
                "lien_visio": "https://visio.example.fr/entretien"
            }))
            .to_request()
    };

    let resp = test::call_service(&app, schedule(&application_id)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let interview: Value = test::read_body_json(resp).await;
    let interview_id = interview["id"].as_str().unwrap().to_string();
    assert_eq!(interview["statut"], "planifié");

    let upload_recording = |interview_id: &str| {
        test::TestRequest::post()
            .uri(&format!("/api/entretiens/{}/enregistrements", interview_id))
            .insert_header(bearer(&candidate_token))
            .insert_header(multipart_content_type())
            .set_payload(video_multipart("Présentation du parcours"))
            .to_request()
    };

    let resp = test::call_service(&app, upload_recording(&interview_id)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let recording: Value = test::read_body_json(resp).await;
    assert_eq!(recording["transcription"], "Présentation du parcours");
    assert_eq!(recording["video"]["nom_fichier"], "entretien.mp4");

    let req = test::TestRequest::get()
        .uri(&format!("/api/entretiens/{}", interview_id))
        .insert_header(bearer(&candidate_token))
        .to_request();
    let completed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(completed["statut"], "terminé");

    // 취소된 면접에는 녹화를 올릴 수 없음
    let resp = test::call_service(&app, schedule(&application_id)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let cancelled: Value = test::read_body_json(resp).await;
    let cancelled_id = cancelled["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/recruteur/entretiens/{}", cancelled_id))
        .insert_header(bearer(&recruiter_token))
        .to_request();
    let cancelled: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(cancelled["statut"], "annulé");

    let resp = test::call_service(&app, upload_recording(&cancelled_id)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // 수락된 지원은 철회할 수 없음
    let req = test::TestRequest::put()
        .uri(&format!("/api/recruteur/candidatures/{}/statut", application_id))
        .insert_header(bearer(&recruiter_token))
        .set_json(json!({ "statut": "Accepté" }))
        .to_request();
    let accepted: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(accepted["statut"], "Accepté");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/candidates/candidatures/{}", application_id))
        .insert_header(bearer(&candidate_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // 비밀번호 변경 후 이전 토큰 거부
    let req = test::TestRequest::put()
        .uri("/api/auth/me/password")
        .insert_header(bearer(&second_token))
        .set_json(json!({ "current_password": "motdepasse-lea", "new_password": "nouveau-secret-lea" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/candidates/profil")
        .insert_header(bearer(&second_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "lea.bernard@example.fr", "password": "nouveau-secret-lea" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // 로그아웃 후 토큰 거부
    let req = test::TestRequest::get()
        .uri("/api/candidates/profil")
        .insert_header(bearer(&candidate_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/auth/logout")
        .insert_header(bearer(&candidate_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/candidates/profil")
        .insert_header(bearer(&candidate_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // 공고 삭제는 지원과 면접까지 지움
    let req = test::TestRequest::delete()
        .uri(&format!("/api/offres-emploi/{}", offer_id))
        .insert_header(bearer(&recruiter_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri(&format!("/api/offres-emploi/{}", offer_id)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "paul.durand@example.fr", "password": "motdepasse-candidat" }))
        .to_request();
    let relogged: Value = test::call_and_read_body_json(&app, req).await;
    let relogged_token = relogged["access_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/candidates/candidatures")
        .insert_header(bearer(&relogged_token))
        .to_request();
    let remaining: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(remaining.as_array().unwrap().len(), 0);

    let req = test::TestRequest::get()
        .uri("/api/candidates/entretiens")
        .insert_header(bearer(&relogged_token))
        .to_request();
    let remaining: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(remaining.as_array().unwrap().len(), 0);

    database.get_database().drop().await.unwrap();
}
