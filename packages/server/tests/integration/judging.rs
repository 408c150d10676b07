use serde_json::json;

use crate::common::{TestApp, routes};

mod assign {
    use super::*;

    #[tokio::test]
    async fn assignment_starts_pending() {
        let app = TestApp::spawn().await;
        let contest = app.published_contest("Judged Cup").await;
        let expert = app.create_expert("Prof. Ada").await;

        let res = app
            .post(
                &routes::contest_judges(contest),
                &json!({"expert_id": expert, "role": "secondary"}),
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["status"], "pending");
        assert_eq!(res.body["role"], "secondary");
        assert_eq!(res.body["score"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn draft_contests_take_no_judges() {
        let app = TestApp::spawn().await;
        let contest = app.create_contest("Unreviewed Cup").await;
        let expert = app.create_expert("Prof. Early").await;

        let res = app
            .post(
                &routes::contest_judges(contest),
                &json!({"expert_id": expert, "role": "primary"}),
            )
            .await;
        assert_eq!(res.status, 409, "{}", res.text);
        assert_eq!(res.code(), "CONTEST_CLOSED");
    }

    #[tokio::test]
    async fn one_active_primary_judge_per_contest() {
        let app = TestApp::spawn().await;
        let contest = app.published_contest("Primary Cup").await;
        let first = app.create_expert("Prof. One").await;
        let second = app.create_expert("Prof. Two").await;

        let res = app
            .post(
                &routes::contest_judges(contest),
                &json!({"expert_id": first, "role": "primary"}),
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        let first_assignment = res.id();

        let res = app
            .post(
                &routes::contest_judges(contest),
                &json!({"expert_id": second, "role": "primary"}),
            )
            .await;
        assert_eq!(res.status, 409);
        assert_eq!(res.code(), "CONFLICT");

        // A secondary is always fine.
        let res = app
            .post(
                &routes::contest_judges(contest),
                &json!({"expert_id": second, "role": "secondary"}),
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);

        // Once the first primary declines, the slot frees up.
        let res = app
            .post(
                &routes::judge_decision(first_assignment),
                &json!({"accept": false}),
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);

        let res = app
            .post(
                &routes::contest_judges(contest),
                &json!({"expert_id": second, "role": "primary"}),
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
    }

    #[tokio::test]
    async fn unknown_role_or_expert_is_refused() {
        let app = TestApp::spawn().await;
        let contest = app.published_contest("Picky Cup").await;
        let expert = app.create_expert("Prof. Real").await;

        let res = app
            .post(
                &routes::contest_judges(contest),
                &json!({"expert_id": expert, "role": "chief"}),
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");

        let res = app
            .post(
                &routes::contest_judges(contest),
                &json!({"expert_id": 9999, "role": "primary"}),
            )
            .await;
        assert_eq!(res.status, 404);
        assert_eq!(res.code(), "NOT_FOUND");
    }
}

mod workflow {
    use super::*;

    async fn pending_assignment(app: &TestApp, expert_name: &str) -> i32 {
        let contest = app.published_contest(&format!("{expert_name} Cup")).await;
        let expert = app.create_expert(expert_name).await;
        let res = app
            .post(
                &routes::contest_judges(contest),
                &json!({"expert_id": expert, "role": "primary"}),
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        res.id()
    }

    #[tokio::test]
    async fn accept_then_complete_with_a_score() {
        let app = TestApp::spawn().await;
        let assignment = pending_assignment(&app, "Prof. Flow").await;

        let res = app
            .post(&routes::judge_decision(assignment), &json!({"accept": true}))
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["status"], "accepted");

        let res = app
            .post(
                &routes::judge_complete(assignment),
                &json!({"score": 87, "comments": "Strong field this year"}),
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["status"], "completed");
        assert_eq!(res.body["score"], 87);
        assert_eq!(res.body["comments"], "Strong field this year");
    }

    #[tokio::test]
    async fn completing_a_pending_assignment_is_refused() {
        let app = TestApp::spawn().await;
        let assignment = pending_assignment(&app, "Prof. Hasty").await;

        let res = app
            .post(&routes::judge_complete(assignment), &json!({"score": 50}))
            .await;
        assert_eq!(res.status, 409);
        assert_eq!(res.code(), "INVALID_STATE");
    }

    #[tokio::test]
    async fn a_declined_assignment_is_terminal() {
        let app = TestApp::spawn().await;
        let assignment = pending_assignment(&app, "Prof. Busy").await;

        app.post(&routes::judge_decision(assignment), &json!({"accept": false}))
            .await;

        let res = app
            .post(&routes::judge_decision(assignment), &json!({"accept": true}))
            .await;
        assert_eq!(res.status, 409);

        let res = app
            .post(&routes::judge_complete(assignment), &json!({"score": 60}))
            .await;
        assert_eq!(res.status, 409);
    }

    #[tokio::test]
    async fn score_must_be_within_range() {
        let app = TestApp::spawn().await;
        let assignment = pending_assignment(&app, "Prof. Range").await;
        app.post(&routes::judge_decision(assignment), &json!({"accept": true}))
            .await;

        for score in [-1, 101] {
            let res = app
                .post(&routes::judge_complete(assignment), &json!({"score": score}))
                .await;
            assert_eq!(res.status, 400, "score {score}");
            assert_eq!(res.code(), "VALIDATION_ERROR");
        }
    }
}
