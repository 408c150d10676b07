use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn student_numbers_are_unique() {
    let app = TestApp::spawn().await;
    app.create_student("2024040001").await;

    let res = app
        .post(
            routes::STUDENTS,
            &json!({
                "name": "Second Claimant",
                "student_no": "2024040001",
                "school": "School of Arts",
            }),
        )
        .await;
    assert_eq!(res.status, 409, "{}", res.text);
    assert_eq!(res.code(), "CONFLICT");
}

#[tokio::test]
async fn blank_fields_are_refused() {
    let app = TestApp::spawn().await;

    let res = app
        .post(
            routes::STUDENTS,
            &json!({"name": "  ", "student_no": "X1", "school": "S"}),
        )
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.code(), "VALIDATION_ERROR");

    let res = app
        .post(
            routes::EXPERTS,
            &json!({"name": "Prof. Blank", "title": "", "organization": "Org"}),
        )
        .await;
    assert_eq!(res.status, 400);
}

#[tokio::test]
async fn directories_list_by_name() {
    let app = TestApp::spawn().await;
    app.create_student("B-2024").await;
    app.create_student("A-2024").await;
    app.create_expert("Prof. Zhou").await;
    app.create_expert("Prof. Alvarez").await;

    let res = app.get(routes::STUDENTS).await;
    assert_eq!(res.status, 200, "{}", res.text);
    let names: Vec<&str> = res
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Student A-2024", "Student B-2024"]);

    let res = app.get(routes::EXPERTS).await;
    let names: Vec<&str> = res
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Prof. Alvarez", "Prof. Zhou"]);
}
