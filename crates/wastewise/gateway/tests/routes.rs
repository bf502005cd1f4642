use actix_web::{http::StatusCode, test, App};
use serde_json::{json, Value};
use wastewise_gateway::{actix::configure, Gateway};

macro_rules! init_app {
    () => {{
        let gateway = Gateway::try_memory().await.unwrap();
        test::init_service(App::new().configure(configure(&gateway))).await
    }};
}

macro_rules! call {
    ($app:expr, $request:expr) => {{
        let response = test::call_service(&$app, $request.to_request()).await;
        let status = response.status();
        let body: Value = test::read_body_json(response).await;
        (status, body)
    }};
}

macro_rules! login {
    ($app:expr, $email:expr, $password:expr) => {{
        let (status, body) = call!(
            $app,
            test::TestRequest::post()
                .uri("/authentication")
                .set_json(json!({"email": $email, "password": $password}))
        );
        assert_eq!(status, StatusCode::OK, "{body}");
        format!("Bearer {}", body["spec"]["accessToken"].as_str().unwrap())
    }};
}

fn request_form() -> Value {
    json!({
        "requesterName": "Nimal Perera",
        "email": "nimal@example.lk",
        "contactNumbers": "0711234567",
        "eventType": "Wedding",
        "location": "Kandy",
        "eventDate": "2099-03-02",
        "eventTime": "10:00:00",
        "numberOfCleaners": 3,
    })
}

#[actix_web::test]
async fn report_health() {
    let app = init_app!();

    let request = test::TestRequest::get().uri("/_health").to_request();
    let body: Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(body, "healthy");
}

#[actix_web::test]
async fn manage_bin_locations() {
    let app = init_app!();

    let bin = json!({
        "address": "12 Temple Road",
        "latitude": 6.9271,
        "longitude": 79.8612,
        "wasteType": "PLASTIC",
        "status": "EMPTY",
    });
    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/BinLocation/save")
            .set_json(&bin)
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["spec"], "Saved bin location at 12 Temple Road");

    let (_, body) = call!(
        app,
        test::TestRequest::get().uri("/api/v1/BinLocation/get-all")
    );
    let id = body["spec"][0]["id"].as_i64().unwrap();
    assert!(body["spec"][0]["lastUpdated"].is_string());

    let mut full = bin.clone();
    full["status"] = "FULL".into();
    let (status, body) = call!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/v1/BinLocation/update/{id}"))
            .set_json(&full)
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["spec"]["status"], "FULL");

    let (_, body) = call!(
        app,
        test::TestRequest::get().uri("/api/v1/BinLocation/summary")
    );
    assert_eq!(body["spec"]["total"], 1);
    assert_eq!(body["spec"]["byStatus"]["FULL"], 1);

    let (status, body) = call!(
        app,
        test::TestRequest::delete().uri(&format!("/api/v1/BinLocation/delete/{id}"))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["spec"], format!("{id} Deleted Successfully"));

    let (status, body) = call!(
        app,
        test::TestRequest::delete().uri(&format!("/api/v1/BinLocation/delete/{id}"))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["result"], "err");
    assert_eq!(body["spec"]["kind"], "notFound");
}

#[actix_web::test]
async fn reject_invalid_bin_location() {
    let app = init_app!();

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/BinLocation/save")
            .set_json(json!({
                "address": "Nowhere",
                "latitude": 120.0,
                "longitude": 0.0,
                "wasteType": "METAL",
                "status": "EMPTY",
            }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["spec"]["kind"], "badRequest");
}

#[actix_web::test]
async fn reject_malformed_body_in_envelope() {
    let app = init_app!();

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/feedback/saved")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{not json")
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["result"], "err");
}

#[actix_web::test]
async fn preserve_inventory_status_on_update() {
    let app = init_app!();

    let (_, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/BinLocations/saved")
            .set_json(json!({"address": "Galle Face", "coordinates": "6.92,79.84", "type": 1, "status": 2}))
    );
    assert_eq!(body["spec"], "Saved Galle Face");

    let (_, body) = call!(
        app,
        test::TestRequest::get().uri("/api/v1/BinLocations/get-all-BinLocations")
    );
    let id = body["spec"][0]["locationId"].as_i64().unwrap();

    let (status, body) = call!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/v1/BinLocations/update/{id}"))
            .set_json(json!({"address": "Galle Face Green", "type": 3, "status": 0}))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["spec"]["address"], "Galle Face Green");
    assert_eq!(body["spec"]["status"], 2);

    let (status, body) = call!(
        app,
        test::TestRequest::delete().uri("/api/v1/BinLocations/delete-BinLocations/999")
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["spec"]["message"], "Bin Not Found");
}

#[actix_web::test]
async fn summarize_feedback() {
    let app = init_app!();

    for (username, rating) in [("amal", 5), ("kamal", 3)] {
        let (_, body) = call!(
            app,
            test::TestRequest::post()
                .uri("/api/v1/feedback/saved")
                .set_json(json!({"username": username, "rating": rating}))
        );
        assert_eq!(body["spec"], format!("Saved feedback from {username}"));
    }

    let (status, _) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/feedback/saved")
            .set_json(json!({"username": "sunil", "rating": 0}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = call!(app, test::TestRequest::get().uri("/api/v1/feedback/summary"));
    assert_eq!(body["spec"]["count"], 2);
    assert_eq!(body["spec"]["average"], 4.0);

    let (status, body) = call!(
        app,
        test::TestRequest::delete().uri("/api/v1/feedback/delete-feedBack/42")
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["spec"]["message"], "Feedback not found");
}

#[actix_web::test]
async fn save_complaint() {
    let app = init_app!();

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/complains/saved")
            .set_json(json!({"name": "Ruwan", "complain": "Bin overflowing"}))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["spec"], "Saved complain from Ruwan");

    let (_, body) = call!(
        app,
        test::TestRequest::get().uri("/api/v1/complains/get-all-complains")
    );
    assert_eq!(body["spec"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn enforce_request_workflow() {
    let app = init_app!();

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/request/save")
            .set_json(request_form())
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["spec"], "Request saved for Nimal Perera with 3 cleaners!");

    let (_, body) = call!(
        app,
        test::TestRequest::get().uri("/api/v1/request/get-all-request")
    );
    let request = &body["spec"][0];
    let id = request["requestId"].as_i64().unwrap();
    assert_eq!(request["status"], "NEW");
    assert_eq!(request["contactNumbers"], json!(["0711234567"]));

    let update_status = |status: Value| {
        test::TestRequest::put()
            .uri(&format!("/api/v1/request/{id}/update-status"))
            .set_json(json!({"status": status}))
    };

    let (status, body) = call!(app, update_status("PENDING".into()));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["spec"]["status"], "PENDING");

    let (status, _) = call!(app, update_status("NEW".into()));
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = call!(app, update_status(Value::Null));
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call!(app, update_status("CANCELLED".into()));
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call!(app, update_status("APPROVED".into()));
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = call!(app, test::TestRequest::get().uri("/api/v1/request/stats"));
    assert_eq!(body["spec"]["CANCELLED"], 1);
    assert_eq!(body["spec"]["NEW"], 0);

    let (_, body) = call!(
        app,
        test::TestRequest::get().uri("/api/v1/request/get-all-request?status=NEW")
    );
    assert!(body["spec"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn assign_cleaners_as_admin() {
    let app = init_app!();

    call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/request/save")
            .set_json(request_form())
    );
    let assignment = json!({"assignedCleaners": ["Saman", "Kasun", "Ravi", "Dilan"]});

    let (status, _) = call!(
        app,
        test::TestRequest::put()
            .uri("/api/v1/request/1/assign")
            .set_json(&assignment)
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let user = login!(app, "user123@gmail.com", "user@123");
    let (status, _) = call!(
        app,
        test::TestRequest::put()
            .uri("/api/v1/request/1/assign")
            .insert_header(("Authorization", user))
            .set_json(&assignment)
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin = login!(app, "admin123@gmail.com", "admin@123");
    let (status, body) = call!(
        app,
        test::TestRequest::put()
            .uri("/api/v1/request/1/assign")
            .insert_header(("Authorization", admin))
            .set_json(&assignment)
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["spec"]["numberOfCleaners"], 4);
    assert_eq!(body["spec"]["status"], "NEW");
}

#[actix_web::test]
async fn register_and_authenticate_users() {
    let app = init_app!();

    let registration = json!({
        "firstName": "Kavindi",
        "lastName": "Silva",
        "email": "kavindi@example.lk",
        "contactNumbers": ["0771234567"],
        "password": "secret1",
    });
    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/user/register-new-user")
            .set_json(&registration)
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["spec"]["roles"], json!(["USER"]));
    assert!(body["spec"].get("password").is_none());

    let (status, _) = call!(
        app,
        test::TestRequest::post()
            .uri("/user/register-new-user")
            .set_json(&registration)
    );
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = call!(
        app,
        test::TestRequest::post()
            .uri("/authentication")
            .set_json(json!({"email": "kavindi@example.lk", "password": "wrong"}))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = login!(app, "kavindi@example.lk", "secret1");
    let (status, _) = call!(
        app,
        test::TestRequest::get()
            .uri("/user/for-user")
            .insert_header(("Authorization", token.clone()))
    );
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call!(
        app,
        test::TestRequest::get()
            .uri("/user/for-admin")
            .insert_header(("Authorization", token))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn deactivate_user_revokes_sessions() {
    let app = init_app!();

    let admin = login!(app, "admin123@gmail.com", "admin@123");
    let user = login!(app, "user123@gmail.com", "user@123");

    let (_, body) = call!(
        app,
        test::TestRequest::get()
            .uri("/user/get-all")
            .insert_header(("Authorization", admin.clone()))
    );
    let users = body["spec"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    let user_id = users
        .iter()
        .find(|user| user["email"] == "user123@gmail.com")
        .and_then(|user| user["userId"].as_i64())
        .unwrap();

    let (status, body) = call!(
        app,
        test::TestRequest::put()
            .uri(&format!("/user/update/{user_id}"))
            .insert_header(("Authorization", admin.clone()))
            .set_json(json!({"active": false}))
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["spec"]["active"], false);

    let (status, _) = call!(
        app,
        test::TestRequest::get()
            .uri("/user/for-user")
            .insert_header(("Authorization", user))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = call!(
        app,
        test::TestRequest::put()
            .uri(&format!("/user/update/{user_id}"))
            .insert_header(("Authorization", admin))
            .set_json(json!({"roles": ["SUPERVISOR"]}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn create_role_as_admin() {
    let app = init_app!();

    let admin = login!(app, "admin123@gmail.com", "admin@123");
    let role = json!({"roleName": "SUPERVISOR", "roleDescription": "Supervisor Role"});

    let (status, _) = call!(
        app,
        test::TestRequest::post()
            .uri("/roles/create-new-role")
            .insert_header(("Authorization", admin.clone()))
            .set_json(&role)
    );
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = call!(
        app,
        test::TestRequest::post()
            .uri("/roles/create-new-role")
            .insert_header(("Authorization", admin))
            .set_json(&role)
    );
    assert_eq!(status, StatusCode::CONFLICT);
}

#[actix_web::test]
async fn merge_schedules_into_calendar() {
    let app = init_app!();

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/shedule/saved")
            .set_json(json!({
                "date": "2099-03-02",
                "time": "06:30:00",
                "location": "Kandy",
                "wasteType": "GREEN_WASTE",
            }))
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["spec"], "Schedule saved successfully");

    let (status, body) = call!(
        app,
        test::TestRequest::get().uri("/api/v1/shedule/calendar?date=2099-03-02")
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    let day = &body["spec"];
    assert_eq!(day["weekday"], "Monday");
    let locations: Vec<_> = day["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["location"].as_str().unwrap())
        .collect();
    assert_eq!(locations, ["Kandy", "Downtown", "Suburbs", "Industrial Area"]);

    let (_, body) = call!(
        app,
        test::TestRequest::get()
            .uri("/api/v1/shedule/calendar?date=2099-03-02&wasteType=All&location=Downtown")
    );
    assert_eq!(body["spec"]["entries"].as_array().unwrap().len(), 1);

    let (_, body) = call!(
        app,
        test::TestRequest::get().uri("/api/v1/shedule/calendar/week?start=2099-03-02")
    );
    assert_eq!(body["spec"].as_array().unwrap().len(), 7);

    let (status, _) = call!(
        app,
        test::TestRequest::get().uri("/api/v1/shedule/calendar?date=2000-01-01")
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = call!(
        app,
        test::TestRequest::get().uri("/api/v1/shedule/calendar/weekdays")
    );
    assert_eq!(body["spec"][0]["weekday"], "Monday");
    assert_eq!(body["spec"][0]["schedules"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn toggle_reminders() {
    let app = init_app!();

    let reminder = json!({
        "date": "2099-03-02",
        "location": "Downtown",
        "wasteType": "GENERAL_WASTE",
        "window": "7:00 AM - 9:00 AM",
    });
    let toggle = || {
        test::TestRequest::post()
            .uri("/api/v1/reminder/toggle")
            .set_json(&reminder)
    };

    let (status, body) = call!(app, toggle());
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["spec"]["state"], "set");
    assert_eq!(body["spec"]["key"], "2099-03-02-Downtown-General Waste");

    let (_, body) = call!(app, test::TestRequest::get().uri("/api/v1/reminder"));
    assert_eq!(body["spec"].as_array().unwrap().len(), 1);

    let (_, body) = call!(app, toggle());
    assert_eq!(body["spec"]["state"], "cleared");

    let mut past = reminder.clone();
    past["date"] = "2000-01-03".into();
    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/reminder/toggle")
            .set_json(&past)
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["spec"]["message"],
        "Cannot set a reminder for a past time."
    );
}

#[actix_web::test]
async fn find_nearest_bins() {
    let app = init_app!();

    for (address, latitude, longitude, waste_type) in [
        ("Colombo Fort", 6.9344, 79.8428, "PLASTIC"),
        ("Kandy Lake", 7.2906, 80.6337, "PLASTIC"),
        ("Galle Face", 6.9271, 79.8450, "PAPER"),
    ] {
        let (status, body) = call!(
            app,
            test::TestRequest::post()
                .uri("/api/v1/BinLocation/save")
                .set_json(json!({
                    "address": address,
                    "latitude": latitude,
                    "longitude": longitude,
                    "wasteType": waste_type,
                    "status": "HALF_FULL",
                }))
        );
        assert_eq!(status, StatusCode::OK, "{body}");
    }

    let (status, body) = call!(
        app,
        test::TestRequest::get().uri("/api/v1/BinLocation/nearest?lat=6.93&lng=79.84&limit=2")
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    let addresses: Vec<_> = body["spec"]
        .as_array()
        .unwrap()
        .iter()
        .map(|nearby| nearby["bin"]["address"].as_str().unwrap())
        .collect();
    assert_eq!(addresses, ["Colombo Fort", "Galle Face"]);

    let (_, body) = call!(
        app,
        test::TestRequest::get()
            .uri("/api/v1/BinLocation/nearest?lat=6.93&lng=79.84&wasteType=PLASTIC")
    );
    let spec = body["spec"].as_array().unwrap();
    assert_eq!(spec.len(), 2);
    assert_eq!(spec[1]["bin"]["address"], "Kandy Lake");
    assert!(spec[1]["distanceKm"].as_f64().unwrap() > 90.0);
}

#[actix_web::test]
async fn remove_request() {
    let app = init_app!();

    call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/request/save")
            .set_json(request_form())
    );
    let (_, body) = call!(
        app,
        test::TestRequest::get().uri("/api/v1/request/get-all-request")
    );
    let id = body["spec"][0]["requestId"].as_i64().unwrap();

    let (status, body) = call!(
        app,
        test::TestRequest::get().uri(&format!("/api/v1/request/get/{id}"))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["spec"]["location"], "Kandy");

    let (status, body) = call!(
        app,
        test::TestRequest::delete().uri(&format!("/api/v1/request/delete-request/{id}"))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["spec"], format!("{id} Deleted Successfully"));

    let (status, body) = call!(
        app,
        test::TestRequest::get().uri(&format!("/api/v1/request/get/{id}"))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["spec"]["message"], "Request Not Found");
}

#[actix_web::test]
async fn manage_schedules() {
    let app = init_app!();

    let schedule = json!({
        "date": "2099-05-04",
        "time": "07:30:00",
        "location": "Suburbs",
        "wasteType": "RECYCLABLES",
    });
    call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/shedule/saved")
            .set_json(&schedule)
    );
    let (_, body) = call!(
        app,
        test::TestRequest::get().uri("/api/v1/shedule/get-all-schedule")
    );
    let id = body["spec"][0]["scheduleId"].as_i64().unwrap();

    let mut moved = schedule.clone();
    moved["location"] = "Downtown".into();
    let (status, body) = call!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/v1/shedule/update/{id}"))
            .set_json(&moved)
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["spec"]["location"], "Downtown");

    let (status, _) = call!(
        app,
        test::TestRequest::put()
            .uri("/api/v1/shedule/update/9999")
            .set_json(&moved)
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call!(
        app,
        test::TestRequest::delete().uri(&format!("/api/v1/shedule/delete-schedule/{id}"))
    );
    assert_eq!(status, StatusCode::OK);

    let (_, body) = call!(
        app,
        test::TestRequest::get().uri("/api/v1/shedule/get-all-schedule")
    );
    assert!(body["spec"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn edit_feedback_and_complaints() {
    let app = init_app!();

    call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/feedback/saved")
            .set_json(json!({"username": "amal", "rating": 2}))
    );
    let (_, body) = call!(
        app,
        test::TestRequest::get().uri("/api/v1/feedback/get-all-FeedBack")
    );
    let id = body["spec"][0]["feedbackId"].as_i64().unwrap();

    let (status, body) = call!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/v1/feedback/update/{id}"))
            .set_json(json!({"username": "amal", "message": "Better now", "rating": 4}))
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["spec"]["rating"], 4);
    assert_eq!(body["spec"]["message"], "Better now");

    let (status, _) = call!(
        app,
        test::TestRequest::put()
            .uri("/api/v1/feedback/update/9999")
            .set_json(json!({"username": "amal", "rating": 4}))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/complains/saved")
            .set_json(json!({"name": "Ruwan", "complain": "Bin overflowing"}))
    );
    let (_, body) = call!(
        app,
        test::TestRequest::get().uri("/api/v1/complains/get-all-complains")
    );
    let id = body["spec"][0]["complainID"].as_i64().unwrap();

    let (status, body) = call!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/v1/complains/update-complain/{id}"))
            .set_json(json!({"name": "Ruwan", "complain": "Bin collected late"}))
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["spec"]["complain"], "Bin collected late");

    let (status, body) = call!(
        app,
        test::TestRequest::delete().uri(&format!("/api/v1/complains/delete-complain/{id}"))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["spec"], format!("{id} Deleted Successfully"));

    let (status, body) = call!(
        app,
        test::TestRequest::delete().uri(&format!("/api/v1/complains/delete-complain/{id}"))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["spec"]["message"], "Complain not found");
}

#[actix_web::test]
async fn citizen_edit_keeps_workflow_state() {
    let app = init_app!();

    call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/request/save")
            .set_json(request_form())
    );
    call!(
        app,
        test::TestRequest::put()
            .uri("/api/v1/request/1/update-status")
            .set_json(json!({"status": "PENDING"}))
    );
    let admin = login!(app, "admin123@gmail.com", "admin@123");
    call!(
        app,
        test::TestRequest::put()
            .uri("/api/v1/request/1/assign")
            .insert_header(("Authorization", admin))
            .set_json(json!({"assignedCleaners": ["Saman"]}))
    );

    let mut edit = request_form();
    edit["location"] = "Peradeniya".into();
    edit["status"] = "COMPLETED".into();
    let (status, body) = call!(
        app,
        test::TestRequest::put()
            .uri("/api/v1/request/update/1")
            .set_json(&edit)
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["spec"]["location"], "Peradeniya");
    assert_eq!(body["spec"]["status"], "PENDING");
    assert_eq!(body["spec"]["assignedCleaners"], json!(["Saman"]));

    let (_, body) = call!(app, test::TestRequest::get().uri("/api/v1/request/get/1"));
    assert_eq!(body["spec"]["status"], "PENDING");
    assert_eq!(body["spec"]["assignedCleaners"], json!(["Saman"]));

    let (status, _) = call!(
        app,
        test::TestRequest::put()
            .uri("/api/v1/request/update/9999")
            .set_json(request_form())
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn submitted_request_starts_as_new() {
    let app = init_app!();

    let mut form = request_form();
    form["status"] = "COMPLETED".into();
    call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/request/save")
            .set_json(&form)
    );

    let (_, body) = call!(app, test::TestRequest::get().uri("/api/v1/request/get/1"));
    assert_eq!(body["spec"]["status"], "NEW");
}

#[actix_web::test]
async fn delete_user_revokes_sessions() {
    let app = init_app!();

    let admin = login!(app, "admin123@gmail.com", "admin@123");
    let user = login!(app, "user123@gmail.com", "user@123");

    let (_, body) = call!(
        app,
        test::TestRequest::get()
            .uri("/user/get-all")
            .insert_header(("Authorization", admin.clone()))
    );
    let user_id = body["spec"]
        .as_array()
        .unwrap()
        .iter()
        .find(|user| user["email"] == "user123@gmail.com")
        .and_then(|user| user["userId"].as_i64())
        .unwrap();

    let (status, _) = call!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/user/delete/{user_id}"))
            .insert_header(("Authorization", user.clone()))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = call!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/user/delete/{user_id}"))
            .insert_header(("Authorization", admin.clone()))
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["spec"], format!("{user_id} Deleted Successfully"));

    let (status, _) = call!(
        app,
        test::TestRequest::get()
            .uri("/user/for-user")
            .insert_header(("Authorization", user))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = call!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/user/delete/{user_id}"))
            .insert_header(("Authorization", admin))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["spec"]["message"], "User not found");
}

#[actix_web::test]
async fn list_filters_and_rotation() {
    let app = init_app!();

    call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/shedule/saved")
            .set_json(json!({
                "date": "2099-03-04",
                "time": "06:30:00",
                "location": "Harbour",
                "wasteType": "RECYCLABLES",
            }))
    );

    let (status, body) = call!(
        app,
        test::TestRequest::get().uri("/api/v1/shedule/calendar/filters")
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(
        body["spec"]["locations"],
        json!(["Downtown", "Harbour", "Industrial Area", "Rural", "Suburbs"]),
    );
    assert_eq!(body["spec"]["wasteTypes"].as_array().unwrap().len(), 4);

    let (status, body) = call!(
        app,
        test::TestRequest::get().uri("/api/v1/shedule/calendar/rotation?start=2099-03-02")
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["spec"]["weekNumber"], 10);
    assert_eq!(body["spec"]["shift"], "morning");
    assert_eq!(body["spec"]["slots"].as_array().unwrap().len(), 7);
    assert_eq!(body["spec"]["slots"][0]["wasteType"], "GENERAL_WASTE");
    assert_eq!(body["spec"]["slots"][0]["window"], "8:00 AM");

    let (_, body) = call!(
        app,
        test::TestRequest::get()
            .uri("/api/v1/shedule/calendar/rotation?start=2099-03-09&wasteType=Green%20Waste")
    );
    assert_eq!(body["spec"]["shift"], "lateMorning");
    assert_eq!(
        body["spec"]["slots"],
        json!([
            {"date": "2099-03-11", "wasteType": "GREEN_WASTE", "window": "11:00 AM"},
            {"date": "2099-03-15", "wasteType": "GREEN_WASTE", "window": "11:00 AM"},
        ]),
    );

    let (status, _) = call!(
        app,
        test::TestRequest::get().uri("/api/v1/shedule/calendar/rotation?start=2000-01-03")
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn drain_fired_reminders() {
    let app = init_app!();

    // only the reminder timers run from here on, none of the database
    ::tokio::time::pause();

    let tomorrow = ::chrono::Utc::now().date_naive() + ::chrono::Duration::days(1);
    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/reminder/toggle")
            .set_json(json!({
                "date": tomorrow,
                "location": "Downtown",
                "wasteType": "GENERAL_WASTE",
                "window": "7:00 AM - 9:00 AM",
            }))
    );
    assert_eq!(status, StatusCode::OK, "{body}");

    let (_, body) = call!(
        app,
        test::TestRequest::get().uri("/api/v1/reminder/notifications")
    );
    assert!(body["spec"].as_array().unwrap().is_empty());

    ::tokio::time::advance(::std::time::Duration::from_secs(3 * 24 * 60 * 60)).await;
    ::tokio::task::yield_now().await;

    let (_, body) = call!(
        app,
        test::TestRequest::get().uri("/api/v1/reminder/notifications")
    );
    let notifications = body["spec"].as_array().unwrap();
    assert_eq!(notifications.len(), 1);
    assert!(notifications[0]["message"]
        .as_str()
        .unwrap()
        .contains("collection in Downtown"));

    let (_, body) = call!(app, test::TestRequest::get().uri("/api/v1/reminder"));
    assert!(body["spec"].as_array().unwrap().is_empty());

    let (_, body) = call!(
        app,
        test::TestRequest::get().uri("/api/v1/reminder/notifications")
    );
    assert!(body["spec"].as_array().unwrap().is_empty());
}
