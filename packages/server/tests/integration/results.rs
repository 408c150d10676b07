use serde_json::json;

use crate::common::{TestApp, routes};

mod record {
    use super::*;

    #[tokio::test]
    async fn a_student_result_starts_unpublished() {
        let app = TestApp::spawn().await;
        let contest = app.published_contest("Result Cup").await;
        let student = app.create_student("2023030001").await;
        app.approved_registration(contest, student).await;

        let res = app
            .post(
                &routes::contest_results(contest),
                &json!({
                    "student_id": student,
                    "ranking": 1,
                    "award_level": "first",
                    "certificate_number": "CERT-2026-001",
                }),
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["is_published"], false);
        assert_eq!(res.body["published_at"], serde_json::Value::Null);
        assert_eq!(res.body["certificate_number"], "CERT-2026-001");
    }

    #[tokio::test]
    async fn exactly_one_of_student_or_team() {
        let app = TestApp::spawn().await;
        let contest = app.published_contest("Ambiguous Cup").await;
        let student = app.create_student("2023030002").await;
        app.approved_registration(contest, student).await;
        let team = app.create_team(contest, "Winners", student).await;

        let res = app
            .post(
                &routes::contest_results(contest),
                &json!({"ranking": 1, "award_level": "first"}),
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");

        let res = app
            .post(
                &routes::contest_results(contest),
                &json!({
                    "student_id": student,
                    "team_id": team,
                    "ranking": 1,
                    "award_level": "first",
                }),
            )
            .await;
        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn ranking_and_award_level_are_validated() {
        let app = TestApp::spawn().await;
        let contest = app.published_contest("Valid Cup").await;
        let student = app.create_student("2023030003").await;

        let res = app
            .post(
                &routes::contest_results(contest),
                &json!({"student_id": student, "ranking": 0, "award_level": "first"}),
            )
            .await;
        assert_eq!(res.status, 400);

        let res = app
            .post(
                &routes::contest_results(contest),
                &json!({"student_id": student, "ranking": 1, "award_level": "platinum"}),
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn team_must_belong_to_the_contest() {
        let app = TestApp::spawn().await;
        let contest = app.published_contest("Home Cup").await;
        let other = app.published_contest("Away Cup").await;
        let student = app.create_student("2023030004").await;
        app.approved_registration(other, student).await;
        let foreign_team = app.create_team(other, "Visitors", student).await;

        let res = app
            .post(
                &routes::contest_results(contest),
                &json!({"team_id": foreign_team, "ranking": 2, "award_level": "second"}),
            )
            .await;
        assert_eq!(res.status, 400, "{}", res.text);
        assert_eq!(res.code(), "VALIDATION_ERROR");
    }
}

mod publish {
    use super::*;

    async fn unpublished_result(app: &TestApp, contest: i32, student_no: &str, ranking: i32) -> i32 {
        let student = app.create_student(student_no).await;
        let res = app
            .post(
                &routes::contest_results(contest),
                &json!({"student_id": student, "ranking": ranking, "award_level": "excellence"}),
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        res.id()
    }

    #[tokio::test]
    async fn publishing_is_idempotent() {
        let app = TestApp::spawn().await;
        let contest = app.published_contest("Idempotent Cup").await;
        let result = unpublished_result(&app, contest, "2023030010", 1).await;

        let first = app.post(&routes::result_publish(result), &json!({})).await;
        assert_eq!(first.status, 200, "{}", first.text);
        assert_eq!(first.body["is_published"], true);
        let published_at = first.body["published_at"].clone();
        assert!(!published_at.is_null());

        // A second publish keeps the original timestamp.
        let second = app.post(&routes::result_publish(result), &json!({})).await;
        assert_eq!(second.status, 200);
        assert_eq!(second.body["published_at"], published_at);
    }

    #[tokio::test]
    async fn publish_all_skips_already_published_results() {
        let app = TestApp::spawn().await;
        let contest = app.published_contest("Bulk Result Cup").await;
        let early = unpublished_result(&app, contest, "2023030020", 1).await;
        unpublished_result(&app, contest, "2023030021", 2).await;
        unpublished_result(&app, contest, "2023030022", 3).await;
        app.post(&routes::result_publish(early), &json!({})).await;

        let res = app
            .post(&routes::contest_results_publish_all(contest), &json!({}))
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["published"], 2);
        assert_eq!(res.body["failed"], 0);

        let res = app.get(&routes::contest_results(contest)).await;
        let data = res.body.as_array().unwrap();
        assert_eq!(data.len(), 3);
        assert!(data.iter().all(|r| r["is_published"] == true));
        // Ordered by ranking.
        assert_eq!(data[0]["ranking"], 1);
        assert_eq!(data[2]["ranking"], 3);
    }

    #[tokio::test]
    async fn publishing_a_missing_result_is_404() {
        let app = TestApp::spawn().await;
        let res = app.post(&routes::result_publish(9999), &json!({})).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.code(), "NOT_FOUND");
    }
}

mod summary {
    use super::*;

    #[tokio::test]
    async fn dashboard_counts_track_the_workflows() {
        let app = TestApp::spawn().await;
        let contest = app.published_contest("Dashboard Cup").await;

        let a = app.create_student("2023030030").await;
        let b = app.create_student("2023030031").await;
        app.approved_registration(contest, a).await;
        app.register_student(contest, b).await;
        app.create_team(contest, "Counters", a).await;

        let expert = app.create_expert("Prof. Count").await;
        app.post(
            &routes::contest_judges(contest),
            &json!({"expert_id": expert, "role": "primary"}),
        )
        .await;

        let res = app
            .post(
                &routes::contest_results(contest),
                &json!({"student_id": a, "ranking": 1, "award_level": "first"}),
            )
            .await;
        let result = res.id();
        app.post(&routes::result_publish(result), &json!({})).await;

        let res = app.get(&routes::contest_summary(contest)).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["status"], "published");
        assert_eq!(res.body["registrations_approved"], 1);
        assert_eq!(res.body["registrations_pending"], 1);
        assert_eq!(res.body["registrations_rejected"], 0);
        assert_eq!(res.body["teams"], 1);
        assert_eq!(res.body["judges_active"], 1);
        assert_eq!(res.body["results_published"], 1);
        assert_eq!(res.body["results_unpublished"], 0);
    }
}
