use serde_json::json;

use crate::common::{PASSWORD, TestApp, routes};

mod login {
    use super::*;

    #[tokio::test]
    async fn known_campus_with_shared_password_logs_in() {
        let app = TestApp::spawn().await;
        let browser = app.browser();

        let res = browser
            .post(
                routes::LOGIN,
                &json!({"username": "Toulouse", "password": PASSWORD}),
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["success"], true);
        assert_eq!(res.body["campus"], "Toulouse");
        assert!(
            res.set_cookies
                .iter()
                .any(|c| c.starts_with("evalboard_session=") && c.contains("HttpOnly"))
        );
    }

    #[tokio::test]
    async fn wrong_password_is_reported_without_an_error_status() {
        let app = TestApp::spawn().await;
        let browser = app.browser();

        let res = browser
            .post(
                routes::LOGIN,
                &json!({"username": "Toulouse", "password": "wrong"}),
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["success"], false);
        assert_eq!(res.body["message"], "Invalid credentials.");
        assert!(res.body.get("campus").is_none());
        assert!(res.set_cookies.is_empty());
    }

    #[tokio::test]
    async fn unknown_campus_is_refused() {
        let app = TestApp::spawn().await;

        let res = app
            .browser()
            .post(
                routes::LOGIN,
                &json!({"username": "Atlantis", "password": PASSWORD}),
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["success"], false);
    }

    #[tokio::test]
    async fn missing_fields_are_just_invalid_credentials() {
        let app = TestApp::spawn().await;

        let browser = app.browser();
        let responses = [
            browser.post(routes::LOGIN, &json!({})).await,
            browser
                .post(routes::LOGIN, &json!({"username": 5, "password": PASSWORD}))
                .await,
            browser
                .post_raw(
                    routes::LOGIN,
                    "application/x-www-form-urlencoded",
                    "username=Toulouse&password=demo",
                )
                .await,
            browser
                .post_raw(routes::LOGIN, "application/json", "{not json")
                .await,
            browser.post_raw(routes::LOGIN, "text/plain", "").await,
        ];

        for res in responses {
            assert_eq!(res.status, 200, "{}", res.text);
            assert_eq!(res.body["success"], false);
            assert_eq!(res.body["message"], "Invalid credentials.");
        }

        let res = browser.get(routes::CHECK_SESSION).await;
        assert_eq!(res.body["loggedIn"], false);
    }
}

mod session_state {
    use super::*;

    #[tokio::test]
    async fn anonymous_check_reports_logged_out() {
        let app = TestApp::spawn().await;

        let res = app.browser().get(routes::CHECK_SESSION).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["loggedIn"], false);
        assert!(res.body["campus"].is_null());
    }

    #[tokio::test]
    async fn check_after_login_reports_campus() {
        let app = TestApp::spawn().await;
        let browser = app.logged_in("Paris").await;

        let res = browser.get(routes::CHECK_SESSION).await;

        assert_eq!(res.body["loggedIn"], true);
        assert_eq!(res.body["campus"], "Paris");
    }

    #[tokio::test]
    async fn logout_redirects_and_ends_the_session() {
        let app = TestApp::spawn().await;
        let browser = app.logged_in("Toulouse").await;

        let res = browser.get(routes::LOGOUT).await;
        assert_eq!(res.status, 303);
        assert_eq!(res.location.as_deref(), Some("/"));

        let res = browser.get(routes::CHECK_SESSION).await;
        assert_eq!(res.body["loggedIn"], false);

        let res = browser.get(routes::SESSIONS).await;
        assert_eq!(res.status, 401);
    }

    #[tokio::test]
    async fn logout_without_session_still_redirects() {
        let app = TestApp::spawn().await;

        let res = app.browser().get(routes::LOGOUT).await;

        assert_eq!(res.status, 303);
    }
}

mod gate {
    use super::*;

    #[tokio::test]
    async fn protected_routes_require_login() {
        let app = TestApp::spawn().await;
        let browser = app.browser();

        let res = browser.get(routes::SESSIONS).await;
        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");

        let res = browser
            .post(routes::SESSIONS, &json!({"name": "C#22"}))
            .await;
        assert_eq!(res.status, 401);

        let res = browser.get(routes::RESULTS).await;
        assert_eq!(res.status, 401);

        let res = browser
            .post(routes::SUBMIT_EVALUATION, &json!({}))
            .await;
        assert_eq!(res.status, 401);
    }

    #[tokio::test]
    async fn forged_bearer_token_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .browser()
            .get_with_token(routes::SESSIONS, "not-a-real-token")
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn session_token_also_works_as_bearer() {
        let app = TestApp::spawn().await;
        let res = app
            .browser()
            .post(
                routes::LOGIN,
                &json!({"username": "Lyon", "password": PASSWORD}),
            )
            .await;
        let cookie = res
            .set_cookies
            .iter()
            .find_map(|c| c.strip_prefix("evalboard_session="))
            .expect("session cookie set");
        let token = cookie.split(';').next().unwrap();

        let res = app.browser().get_with_token(routes::CHECK_SESSION, token).await;
        assert_eq!(res.body["campus"], "Lyon");

        let res = app.browser().get_with_token(routes::SESSIONS, token).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!([]));
    }
}
