use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn resources_are_listed_by_category() {
    let app = TestApp::spawn().await;
    let contest = app.create_contest("Planned Cup").await;

    for (category, name, extra) in [
        ("venue", "Lecture hall B", json!({"quantity": 1})),
        ("budget", "Prize fund", json!({"amount": 500000})),
        ("equipment", "Laptops", json!({"quantity": 30})),
    ] {
        let mut payload = json!({"category": category, "name": name});
        payload
            .as_object_mut()
            .unwrap()
            .extend(extra.as_object().unwrap().clone());
        let res = app.post(&routes::contest_resources(contest), &payload).await;
        assert_eq!(res.status, 201, "{category}: {}", res.text);
    }

    let res = app.get(&routes::contest_resources(contest)).await;
    assert_eq!(res.status, 200, "{}", res.text);
    let data = res.body.as_array().unwrap();
    assert_eq!(data.len(), 3);
    assert_eq!(data[0]["category"], "budget");
    assert_eq!(data[1]["category"], "equipment");
    assert_eq!(data[2]["category"], "venue");
}

#[tokio::test]
async fn unknown_category_and_bad_numbers_are_refused() {
    let app = TestApp::spawn().await;
    let contest = app.create_contest("Fussy Cup").await;

    let res = app
        .post(
            &routes::contest_resources(contest),
            &json!({"category": "snacks", "name": "Pizza"}),
        )
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.code(), "VALIDATION_ERROR");

    let res = app
        .post(
            &routes::contest_resources(contest),
            &json!({"category": "budget", "name": "Refund", "amount": -1}),
        )
        .await;
    assert_eq!(res.status, 400);

    let res = app
        .post(
            &routes::contest_resources(contest),
            &json!({"category": "equipment", "name": "Nothing", "quantity": 0}),
        )
        .await;
    assert_eq!(res.status, 400);
}

#[tokio::test]
async fn removing_a_resource() {
    let app = TestApp::spawn().await;
    let contest = app.create_contest("Shrinking Cup").await;
    let res = app
        .post(
            &routes::contest_resources(contest),
            &json!({"category": "material", "name": "Posters", "quantity": 50}),
        )
        .await;
    assert_eq!(res.status, 201, "{}", res.text);
    let resource = res.id();

    let res = app.delete(&routes::contest_resource(contest, resource)).await;
    assert_eq!(res.status, 204, "{}", res.text);

    let res = app.delete(&routes::contest_resource(contest, resource)).await;
    assert_eq!(res.status, 404);

    // Resource IDs are scoped to their contest path.
    let other = app.create_contest("Other Cup").await;
    let res = app
        .post(
            &routes::contest_resources(other),
            &json!({"category": "venue", "name": "Gym"}),
        )
        .await;
    let foreign = res.id();
    let res = app.delete(&routes::contest_resource(contest, foreign)).await;
    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn archived_contests_are_frozen() {
    let app = TestApp::spawn().await;
    let contest = app.published_contest("Frozen Cup").await;
    app.post(&routes::contest_start(contest), &json!({})).await;
    app.post(&routes::contest_complete(contest), &json!({})).await;
    app.post(&routes::contest_archive(contest), &json!({})).await;

    let res = app
        .post(
            &routes::contest_resources(contest),
            &json!({"category": "venue", "name": "Too late"}),
        )
        .await;
    assert_eq!(res.status, 409);
    assert_eq!(res.code(), "CONTEST_CLOSED");
}
