use serde_json::{Value, json};

use crate::common::{Browser, TestApp, evaluation, routes};

/// A Toulouse session with jury "Hugo" and student "Fabien".
async fn prepared(app: &TestApp) -> (Browser, String) {
    let browser = app.logged_in("Toulouse").await;
    let id = browser.create_session("C#22").await;
    browser.add_jury(&id, "Hugo").await;
    browser.add_student(&id, "Fabien").await;
    (browser, id)
}

mod scenario {
    use super::*;

    #[tokio::test]
    async fn full_evaluation_lifecycle() {
        let app = TestApp::spawn().await;
        let browser = app.logged_in("Toulouse").await;

        let id = browser.create_session("C#22").await;
        browser.add_jury(&id, "Hugo").await;
        browser.add_student(&id, "Fabien").await;

        let mut body = evaluation(&id, "Hugo", "Fabien", json!(3));
        body["introductionTeam"] = json!(1);
        let res = browser.post(routes::SUBMIT_EVALUATION, &body).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["message"], "Evaluation submitted.");

        let res = browser.get(routes::RESULTS).await;
        assert_eq!(res.status, 200);
        let raw = res.body["rawSubmissions"].as_array().unwrap();
        assert_eq!(raw.len(), 1);
        assert_eq!(raw[0]["introductionTeam"], 1.0);
        assert_eq!(raw[0]["juryName"], "Hugo");
        assert_eq!(raw[0]["studentComments"], "Well prepared");
        let aggregated = res.body["aggregated"].as_array().unwrap();
        assert_eq!(aggregated.len(), 1);
        assert_eq!(aggregated[0]["introductionTeamAvg"], 1.0);
        assert_eq!(aggregated[0]["studentName"], "Fabien");
        assert_eq!(res.body["sessions"][0]["id"], id.as_str());

        let res = browser
            .delete_with_body(&routes::juries(&id), &json!({"juryName": "Hugo"}))
            .await;
        assert_eq!(res.status, 200);
        let res = browser
            .delete_with_body(&routes::students(&id), &json!({"studentName": "Fabien"}))
            .await;
        assert_eq!(res.status, 200);
        let res = browser.delete(&routes::session(&id)).await;
        assert_eq!(res.status, 200);

        let list = browser.get(routes::SESSIONS).await;
        assert!(
            list.body
                .as_array()
                .unwrap()
                .iter()
                .all(|s| s["id"] != id.as_str())
        );

        let res = browser.get(routes::LOGOUT).await;
        assert_eq!(res.status, 303);
        let res = browser.get(routes::CHECK_SESSION).await;
        assert_eq!(res.body["loggedIn"], false);
    }
}

mod submit {
    use super::*;

    #[tokio::test]
    async fn submission_is_written_through_to_disk() {
        let app = TestApp::spawn().await;
        let (browser, id) = prepared(&app).await;

        let res = browser
            .post(
                routes::SUBMIT_EVALUATION,
                &evaluation(&id, "Hugo", "Fabien", json!(4)),
            )
            .await;
        assert_eq!(res.status, 200);

        let stored = &app.persisted()["submissions"];
        assert_eq!(stored.as_array().unwrap().len(), 1);
        assert_eq!(stored[0]["sessionId"], id.as_str());
        assert_eq!(stored[0]["overallImpression"], 4.0);
    }

    #[tokio::test]
    async fn numeric_strings_are_accepted() {
        let app = TestApp::spawn().await;
        let (browser, id) = prepared(&app).await;

        let res = browser
            .post(
                routes::SUBMIT_EVALUATION,
                &evaluation(&id, "Hugo", "Fabien", json!("2.5")),
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);

        let res = browser.get(routes::RESULTS).await;
        assert_eq!(res.body["rawSubmissions"][0]["codeQuality"], 2.5);
    }

    #[tokio::test]
    async fn non_numeric_score_is_rejected() {
        let app = TestApp::spawn().await;
        let (browser, id) = prepared(&app).await;

        let mut body = evaluation(&id, "Hugo", "Fabien", json!(3));
        body["teamwork"] = json!("great");
        let res = browser.post(routes::SUBMIT_EVALUATION, &body).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert!(res.body["message"].as_str().unwrap().contains("teamwork"));
        assert_eq!(app.persisted()["submissions"], json!([]));
    }

    #[tokio::test]
    async fn oversized_score_is_rejected() {
        let app = TestApp::spawn().await;
        let (browser, id) = prepared(&app).await;

        let body = evaluation(&id, "Hugo", "Fabien", json!(1e308));
        let res = browser.post(routes::SUBMIT_EVALUATION, &body).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(app.persisted()["submissions"], json!([]));
    }

    #[tokio::test]
    async fn unknown_session_jury_or_student_is_rejected() {
        let app = TestApp::spawn().await;
        let (browser, id) = prepared(&app).await;

        let cases = [
            (
                evaluation("22222222-2222-2222-2222-222222222222", "Hugo", "Fabien", json!(1)),
                "Invalid session.",
            ),
            (evaluation("garbage", "Hugo", "Fabien", json!(1)), "Invalid session."),
            (evaluation(&id, "Ana", "Fabien", json!(1)), "Invalid jury."),
            (evaluation(&id, "Hugo", "Zoe", json!(1)), "Invalid student."),
        ];

        for (body, message) in cases {
            let res = browser.post(routes::SUBMIT_EVALUATION, &body).await;
            assert_eq!(res.status, 400, "{}", res.text);
            assert_eq!(res.body["message"], message);
        }
        assert_eq!(app.persisted()["submissions"], json!([]));
    }

    #[tokio::test]
    async fn other_campus_cannot_submit() {
        let app = TestApp::spawn().await;
        let (_, id) = prepared(&app).await;
        let paris = app.logged_in("Paris").await;

        let res = paris
            .post(
                routes::SUBMIT_EVALUATION,
                &evaluation(&id, "Hugo", "Fabien", json!(1)),
            )
            .await;

        assert_eq!(res.status, 403);
    }
}

mod results {
    use super::*;

    fn average(res: &Value, student: &str, key: &str) -> f64 {
        res["aggregated"]
            .as_array()
            .unwrap()
            .iter()
            .find(|row| row["studentName"] == student)
            .and_then(|row| row[key].as_f64())
            .unwrap()
    }

    #[tokio::test]
    async fn averages_are_per_student() {
        let app = TestApp::spawn().await;
        let (browser, id) = prepared(&app).await;
        browser.add_jury(&id, "Ana").await;
        browser.add_student(&id, "Lea").await;

        for (jury, student, score) in [
            ("Hugo", "Fabien", 1),
            ("Ana", "Fabien", 2),
            ("Hugo", "Lea", 5),
            ("Ana", "Fabien", 4),
        ] {
            let res = browser
                .post(
                    routes::SUBMIT_EVALUATION,
                    &evaluation(&id, jury, student, json!(score)),
                )
                .await;
            assert_eq!(res.status, 200, "{}", res.text);
        }

        let res = browser.get(routes::RESULTS).await.body;
        assert_eq!(res["rawSubmissions"].as_array().unwrap().len(), 4);
        assert_eq!(res["aggregated"].as_array().unwrap().len(), 2);
        assert_eq!(res["aggregated"][0]["studentName"], "Fabien");
        assert_eq!(res["aggregated"][0]["count"], 3);
        assert!((average(&res, "Fabien", "introductionTeamAvg") - 7.0 / 3.0).abs() < 1e-9);
        assert!((average(&res, "Fabien", "overallImpressionAvg") - 7.0 / 3.0).abs() < 1e-9);
        assert_eq!(average(&res, "Lea", "securityAvg"), 5.0);
    }

    #[tokio::test]
    async fn results_exclude_other_campuses() {
        let app = TestApp::spawn().await;
        let (browser, id) = prepared(&app).await;
        browser
            .post(
                routes::SUBMIT_EVALUATION,
                &evaluation(&id, "Hugo", "Fabien", json!(3)),
            )
            .await;

        let paris = app.logged_in("Paris").await;
        let res = paris.get(routes::RESULTS).await;

        assert_eq!(res.status, 200);
        assert_eq!(
            res.body,
            json!({"rawSubmissions": [], "aggregated": [], "sessions": []})
        );
    }

    #[tokio::test]
    async fn deleting_a_session_deletes_its_submissions() {
        let app = TestApp::spawn().await;
        let (browser, id) = prepared(&app).await;
        let other = browser.create_session("C#23").await;
        browser.add_jury(&other, "Hugo").await;
        browser.add_student(&other, "Fabien").await;

        for session in [&id, &id, &other] {
            let res = browser
                .post(
                    routes::SUBMIT_EVALUATION,
                    &evaluation(session, "Hugo", "Fabien", json!(2)),
                )
                .await;
            assert_eq!(res.status, 200);
        }

        let res = browser.delete(&routes::session(&id)).await;
        assert_eq!(res.status, 200);

        let res = browser.get(routes::RESULTS).await.body;
        let raw = res["rawSubmissions"].as_array().unwrap();
        assert_eq!(raw.len(), 1);
        assert!(raw.iter().all(|s| s["sessionId"] == other.as_str()));

        let persisted = app.persisted();
        let stored = persisted["submissions"].as_array().unwrap();
        assert!(stored.iter().all(|s| s["sessionId"] != id.as_str()));
        assert_eq!(stored.len(), 1);
    }

    #[tokio::test]
    async fn submissions_outlive_roster_removal() {
        let app = TestApp::spawn().await;
        let (browser, id) = prepared(&app).await;
        browser
            .post(
                routes::SUBMIT_EVALUATION,
                &evaluation(&id, "Hugo", "Fabien", json!(3)),
            )
            .await;

        browser
            .delete_with_body(&routes::students(&id), &json!({"studentName": "Fabien"}))
            .await;

        let res = browser.get(routes::RESULTS).await.body;
        assert_eq!(res["rawSubmissions"].as_array().unwrap().len(), 1);
        assert_eq!(res["aggregated"][0]["studentName"], "Fabien");
    }
}

mod docs {
    use super::*;

    #[tokio::test]
    async fn openapi_document_describes_submission_body() {
        let app = TestApp::spawn().await;

        let res = app.browser().get("/api-docs/openapi.json").await;

        assert_eq!(res.status, 200);
        let submit = &res.body["paths"]["/api/submitEvaluation"]["post"];
        assert!(submit["requestBody"].is_object(), "{}", res.text);
        assert!(res.body["paths"]["/api/resultsWithAverages"].is_object());
    }
}
