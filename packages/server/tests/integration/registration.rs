use serde_json::json;

use crate::common::{TestApp, contest_payload, routes};

mod create {
    use super::*;

    #[tokio::test]
    async fn registering_creates_a_pending_record() {
        let app = TestApp::spawn().await;
        let contest = app.published_contest("Open Cup").await;
        let student = app.create_student("2021010001").await;

        let res = app
            .post(
                &routes::contest_registrations(contest),
                &json!({"student_id": student, "team_role": "developer"}),
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["status"], "pending");
        assert_eq!(res.body["team_role"], "developer");
        assert_eq!(res.body["reviewed_by"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn unpublished_contest_refuses_registration() {
        let app = TestApp::spawn().await;
        let contest = app.create_contest("Still Draft").await;
        let student = app.create_student("2021010002").await;

        let res = app
            .post(
                &routes::contest_registrations(contest),
                &json!({"student_id": student}),
            )
            .await;
        assert_eq!(res.status, 409, "{}", res.text);
        assert_eq!(res.code(), "CONTEST_CLOSED");
    }

    #[tokio::test]
    async fn closed_window_refuses_registration() {
        let app = TestApp::spawn().await;
        let mut payload = contest_payload("Missed It");
        payload["registration_start"] = json!("2020-01-01T00:00:00Z");
        payload["registration_end"] = json!("2020-02-01T00:00:00Z");
        payload["start_date"] = json!("2099-06-01T00:00:00Z");
        let res = app.post(routes::CONTESTS, &payload).await;
        assert_eq!(res.status, 201, "{}", res.text);
        let contest = res.id();
        app.advance_to_published(contest).await;

        let student = app.create_student("2021010003").await;
        let res = app
            .post(
                &routes::contest_registrations(contest),
                &json!({"student_id": student}),
            )
            .await;
        assert_eq!(res.status, 409);
        assert_eq!(res.code(), "CONTEST_CLOSED");
    }

    #[tokio::test]
    async fn duplicate_registration_is_refused_until_rejected() {
        let app = TestApp::spawn().await;
        let contest = app.published_contest("One Shot").await;
        let student = app.create_student("2021010004").await;
        let reg = app.register_student(contest, student).await;

        let res = app
            .post(
                &routes::contest_registrations(contest),
                &json!({"student_id": student}),
            )
            .await;
        assert_eq!(res.status, 409);
        assert_eq!(res.code(), "DUPLICATE_REGISTRATION");

        // A rejected registration no longer blocks a fresh attempt.
        let res = app
            .post(
                &routes::registration_reject(reg),
                &json!({"reviewer": "admin", "reason": "Incomplete form"}),
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);

        let res = app
            .post(
                &routes::contest_registrations(contest),
                &json!({"student_id": student}),
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
    }

    #[tokio::test]
    async fn unknown_student_is_404() {
        let app = TestApp::spawn().await;
        let contest = app.published_contest("Ghost Entry").await;

        let res = app
            .post(
                &routes::contest_registrations(contest),
                &json!({"student_id": 9999}),
            )
            .await;
        assert_eq!(res.status, 404);
        assert_eq!(res.code(), "NOT_FOUND");
    }
}

mod review {
    use super::*;

    #[tokio::test]
    async fn approve_stamps_the_reviewer() {
        let app = TestApp::spawn().await;
        let contest = app.published_contest("Approved Cup").await;
        let student = app.create_student("2021010010").await;
        let reg = app.register_student(contest, student).await;

        let res = app
            .post(
                &routes::registration_approve(reg),
                &json!({"reviewer": "Dr. Chen"}),
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["status"], "approved");
        assert_eq!(res.body["reviewed_by"], "Dr. Chen");
        assert!(!res.body["reviewed_at"].is_null());
    }

    #[tokio::test]
    async fn reject_requires_a_reason() {
        let app = TestApp::spawn().await;
        let contest = app.published_contest("Strict Cup").await;
        let student = app.create_student("2021010011").await;
        let reg = app.register_student(contest, student).await;

        let res = app
            .post(
                &routes::registration_reject(reg),
                &json!({"reviewer": "admin", "reason": "   "}),
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");

        let res = app
            .post(
                &routes::registration_reject(reg),
                &json!({"reviewer": "admin", "reason": "Wrong faculty"}),
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["rejection_reason"], "Wrong faculty");
    }

    #[tokio::test]
    async fn decisions_are_terminal() {
        let app = TestApp::spawn().await;
        let contest = app.published_contest("Final Say").await;
        let student = app.create_student("2021010012").await;
        let reg = app.approved_registration(contest, student).await;

        let res = app
            .post(
                &routes::registration_reject(reg),
                &json!({"reviewer": "admin", "reason": "Changed my mind"}),
            )
            .await;
        assert_eq!(res.status, 409);
        assert_eq!(res.code(), "INVALID_STATE");

        let res = app
            .post(&routes::registration_approve(reg), &json!({"reviewer": "admin"}))
            .await;
        assert_eq!(res.status, 409);
    }

    #[tokio::test]
    async fn concurrent_approve_and_reject_let_exactly_one_win() {
        let app = TestApp::spawn().await;
        let contest = app.published_contest("Race Cup").await;
        let student = app.create_student("2021010013").await;
        let reg = app.register_student(contest, student).await;

        let approve_route = routes::registration_approve(reg);
        let approve_body = json!({"reviewer": "first"});
        let reject_route = routes::registration_reject(reg);
        let reject_body = json!({"reviewer": "second", "reason": "Duplicate entry"});
        let (approve, reject) = tokio::join!(
            app.post(&approve_route, &approve_body),
            app.post(&reject_route, &reject_body),
        );

        let mut statuses = [approve.status, reject.status];
        statuses.sort();
        assert_eq!(statuses, [200, 409], "{} / {}", approve.text, reject.text);
    }

    #[tokio::test]
    async fn archived_contest_freezes_pending_registrations() {
        let app = TestApp::spawn().await;
        let contest = app.published_contest("Frozen Cup").await;
        let student = app.create_student("2021010016").await;
        let reg = app.register_student(contest, student).await;

        app.post(&routes::contest_start(contest), &json!({})).await;
        app.post(&routes::contest_complete(contest), &json!({})).await;
        let res = app.post(&routes::contest_archive(contest), &json!({})).await;
        assert_eq!(res.status, 200, "{}", res.text);

        let res = app
            .post(&routes::registration_approve(reg), &json!({"reviewer": "admin"}))
            .await;
        assert_eq!(res.status, 409, "{}", res.text);
        assert_eq!(res.code(), "CONTEST_CLOSED");

        let res = app
            .post(
                &routes::registration_reject(reg),
                &json!({"reviewer": "admin", "reason": "Season is over"}),
            )
            .await;
        assert_eq!(res.status, 409);
        assert_eq!(res.code(), "CONTEST_CLOSED");
    }

    #[tokio::test]
    async fn listing_filters_by_status() {
        let app = TestApp::spawn().await;
        let contest = app.published_contest("Sorted Cup").await;
        let a = app.create_student("2021010014").await;
        let b = app.create_student("2021010015").await;
        app.approved_registration(contest, a).await;
        app.register_student(contest, b).await;

        let res = app
            .get(&format!(
                "{}?status=pending",
                routes::contest_registrations(contest)
            ))
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        let data = res.body.as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["student_id"], b);

        let res = app
            .get(&format!(
                "{}?status=everything",
                routes::contest_registrations(contest)
            ))
            .await;
        assert_eq!(res.status, 400);
    }
}

mod batch {
    use super::*;

    #[tokio::test]
    async fn batch_approve_reports_per_item_outcomes() {
        let app = TestApp::spawn().await;
        let contest = app.published_contest("Bulk Cup").await;
        let a = app.create_student("2021010020").await;
        let b = app.create_student("2021010021").await;
        let reg_a = app.register_student(contest, a).await;
        let reg_b = app.register_student(contest, b).await;
        // Already decided, so the batch cannot approve it again.
        app.post(
            &routes::registration_reject(reg_b),
            &json!({"reviewer": "admin", "reason": "Late"}),
        )
        .await;

        let res = app
            .post(
                routes::BATCH_APPROVE,
                &json!({
                    "registration_ids": [reg_a, reg_b, 9999],
                    "reviewer": "admin",
                }),
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["approved"], 1);
        assert_eq!(res.body["failed"], 2);

        let outcomes = res.body["outcomes"].as_array().unwrap();
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0]["ok"], true);
        assert_eq!(outcomes[1]["code"], "INVALID_STATE");
        assert_eq!(outcomes[2]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn batch_ids_must_be_unique_and_non_empty() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::BATCH_APPROVE,
                &json!({"registration_ids": [], "reviewer": "admin"}),
            )
            .await;
        assert_eq!(res.status, 400);

        let res = app
            .post(
                routes::BATCH_APPROVE,
                &json!({"registration_ids": [1, 1], "reviewer": "admin"}),
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");
    }
}
