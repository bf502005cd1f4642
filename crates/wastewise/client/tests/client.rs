use actix_web::{App, HttpServer};
use chrono::NaiveDate;
use clap::Parser;
use wastewise_api::{
    calendar::CalendarQuery,
    component::NetworkComponent,
    feedback::FeedbackSpec,
    request::{RequestAssignment, RequestDraft, RequestFilter, RequestStatus},
    user::LoginRequest,
};
use wastewise_client::{WasteClient, WasteClientArgs};
use wastewise_core::{
    error::{ApiError, ErrorKind},
    signal::FunctionSignal,
};
use wastewise_gateway::{actix::configure, Gateway};

async fn serve() -> WasteClient {
    let gateway = Gateway::try_memory().await.unwrap();
    let configure = configure(&gateway);

    let server = HttpServer::new(move || App::new().configure(configure.clone()))
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
    let addr = server.addrs()[0];
    ::actix_web::rt::spawn(server.run());

    let endpoint = format!("http://{addr}");
    let args = WasteClientArgs::try_parse_from(["wastewise", "--endpoint", &endpoint]).unwrap();
    WasteClient::try_new(args, &FunctionSignal::default())
        .await
        .unwrap()
}

fn draft() -> RequestDraft {
    RequestDraft {
        requester_name: "Nimal Perera".into(),
        email: "nimal@example.lk".into(),
        contact_numbers: vec!["0711234567".into()],
        event_type: "Festival".into(),
        location: "Galle".into(),
        number_of_cleaners: 2,
        ..Default::default()
    }
}

#[actix_web::test]
async fn default_endpoint() {
    let args = WasteClientArgs::try_parse_from(["wastewise"]).unwrap();
    assert_eq!(args.endpoint.as_str(), "http://localhost:8045/");
}

#[actix_web::test]
async fn save_and_summarize_feedback() {
    let client = serve().await;

    let spec = FeedbackSpec {
        username: "amal".into(),
        message: Some("Prompt pickup".into()),
        rating: 4,
    };
    let message = client.insert_feedback(&spec).await.unwrap();
    assert_eq!(message, "Saved feedback from amal");

    let feedback = client.list_feedback().await.unwrap();
    assert_eq!(feedback.len(), 1);
    assert_eq!(feedback[0].spec, spec);

    let summary = client.summarize_feedback().await.unwrap();
    assert_eq!(summary.count, 1);
    assert_eq!(summary.average, Some(4.0));
}

#[actix_web::test]
async fn decode_error_envelope() {
    let client = serve().await;

    let error = client.remove_feedback(7).await.unwrap_err();
    let error = ApiError::from_anyhow(&error);
    assert_eq!(error.kind, ErrorKind::NotFound);
    assert_eq!(error.message, "Feedback not found");
}

#[actix_web::test]
async fn drive_request_through_workflow() {
    let mut client = serve().await;

    let message = client.insert_request(&draft()).await.unwrap();
    assert_eq!(message, "Request saved for Nimal Perera with 2 cleaners!");

    let requests = client
        .list_requests(&RequestFilter {
            status: Some(RequestStatus::New),
        })
        .await
        .unwrap();
    let id = requests[0].id;

    let request = client
        .update_request_status(id, RequestStatus::Pending)
        .await
        .unwrap();
    assert_eq!(request.spec.status, RequestStatus::Pending);

    let error = client
        .update_request_status(id, RequestStatus::New)
        .await
        .unwrap_err();
    assert_eq!(ApiError::from_anyhow(&error).kind, ErrorKind::Conflict);

    let assignment = RequestAssignment {
        assigned_cleaners: vec!["Saman".into()],
        number_of_cleaners: None,
    };
    let error = client.assign_request(id, &assignment).await.unwrap_err();
    assert_eq!(ApiError::from_anyhow(&error).kind, ErrorKind::Unauthorized);

    client
        .sign_in(&LoginRequest {
            email: "admin123@gmail.com".into(),
            password: "admin@123".into(),
        })
        .await
        .unwrap();
    let request = client.assign_request(id, &assignment).await.unwrap();
    assert_eq!(request.spec.assigned_cleaners, ["Saman"]);
    assert_eq!(request.spec.number_of_cleaners, 2);

    let stats = client.request_stats().await.unwrap();
    assert_eq!(stats.0[&RequestStatus::Pending], 1);
}

#[actix_web::test]
async fn read_calendar_week() {
    let client = serve().await;

    let query = CalendarQuery {
        date: NaiveDate::from_ymd_opt(2099, 3, 2),
        waste_type: Some("GREEN_WASTE".into()),
        ..Default::default()
    };
    let week = client.calendar_week(&query).await.unwrap();
    assert_eq!(week.len(), 7);

    let locations: Vec<_> = week
        .iter()
        .flat_map(|day| &day.entries)
        .map(|entry| entry.location.as_str())
        .collect();
    assert_eq!(locations, ["Rural", "Downtown", "Suburbs"]);
}
