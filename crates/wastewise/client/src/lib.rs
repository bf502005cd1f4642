use anyhow::{bail, Result};
use async_trait::async_trait;
use clap::Parser;
use reqwest::Method;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{instrument, Level};
use url::Url;
use wastewise_api::{
    bin::{BinLocation, BinLocationSpec, NearbyBin, NearestQuery},
    calendar::{CalendarDay, CalendarQuery},
    complaint::{Complaint, ComplaintSpec},
    component::NetworkComponent,
    feedback::{Feedback, FeedbackSpec, FeedbackSummary},
    model::{Id, Message},
    reminder::{Notification, ReminderRequest, ReminderState},
    request::{
        RequestAssignment, RequestDraft, RequestFilter, RequestStats, RequestStatus,
        RequestStatusUpdate, ServiceRequest,
    },
    schedule::{Schedule, ScheduleSpec},
    user::{LoginRequest, LoginResponse},
};
use wastewise_core::signal::FunctionSignal;

/// A typed client of the wastewise REST gateway.
#[derive(Clone)]
pub struct WasteClient {
    access_token: Option<String>,
    args: WasteClientArgs,
    session: ::reqwest::Client,
}

#[async_trait]
impl NetworkComponent for WasteClient {
    type Args = WasteClientArgs;

    async fn try_new(args: <Self as NetworkComponent>::Args, _: &FunctionSignal) -> Result<Self> {
        Ok(Self {
            access_token: None,
            args,
            session: ::reqwest::ClientBuilder::new().build()?,
        })
    }
}

impl WasteClient {
    /// Signs in and sends the issued token along with every later call.
    #[instrument(level = Level::INFO, skip(self, login), fields(email = %login.email))]
    pub async fn sign_in(&mut self, login: &LoginRequest) -> Result<LoginResponse> {
        let request = Request::<(), _> {
            method: Method::POST,
            rel_url: "authentication",
            query: None,
            payload: Some(login),
        };
        let response: LoginResponse = self.execute(request).await?;
        self.access_token = Some(response.access_token.clone());
        Ok(response)
    }
}

impl WasteClient {
    #[instrument(level = Level::INFO, skip(self))]
    pub async fn get_bin_location(&self, id: Id) -> Result<BinLocation> {
        self.get(&format!("api/v1/BinLocation/get/{id}")).await
    }

    #[instrument(level = Level::INFO, skip(self))]
    pub async fn list_bin_locations(&self) -> Result<Vec<BinLocation>> {
        self.get("api/v1/BinLocation/get-all").await
    }

    #[instrument(level = Level::INFO, skip(self))]
    pub async fn list_nearest_bins(&self, query: &NearestQuery) -> Result<Vec<NearbyBin>> {
        let request = RequestWithoutPayload {
            method: Method::GET,
            rel_url: "api/v1/BinLocation/nearest",
            query: Some(query),
            payload: None,
        };
        self.execute(request).await
    }

    #[instrument(level = Level::INFO, skip(self, spec))]
    pub async fn insert_bin_location(&self, spec: &BinLocationSpec) -> Result<Message> {
        self.send(Method::POST, "api/v1/BinLocation/save", spec).await
    }

    #[instrument(level = Level::INFO, skip(self, spec))]
    pub async fn update_bin_location(
        &self,
        id: Id,
        spec: &BinLocationSpec,
    ) -> Result<BinLocation> {
        self.send(Method::PUT, &format!("api/v1/BinLocation/update/{id}"), spec).await
    }

    #[instrument(level = Level::INFO, skip(self))]
    pub async fn remove_bin_location(&self, id: Id) -> Result<Message> {
        self.delete(&format!("api/v1/BinLocation/delete/{id}")).await
    }
}

impl WasteClient {
    #[instrument(level = Level::INFO, skip(self))]
    pub async fn list_feedback(&self) -> Result<Vec<Feedback>> {
        self.get("api/v1/feedback/get-all-FeedBack").await
    }

    #[instrument(level = Level::INFO, skip(self))]
    pub async fn summarize_feedback(&self) -> Result<FeedbackSummary> {
        self.get("api/v1/feedback/summary").await
    }

    #[instrument(level = Level::INFO, skip(self, spec))]
    pub async fn insert_feedback(&self, spec: &FeedbackSpec) -> Result<Message> {
        self.send(Method::POST, "api/v1/feedback/saved", spec).await
    }

    #[instrument(level = Level::INFO, skip(self, spec))]
    pub async fn update_feedback(&self, id: Id, spec: &FeedbackSpec) -> Result<Feedback> {
        self.send(Method::PUT, &format!("api/v1/feedback/update/{id}"), spec).await
    }

    #[instrument(level = Level::INFO, skip(self))]
    pub async fn remove_feedback(&self, id: Id) -> Result<Message> {
        self.delete(&format!("api/v1/feedback/delete-feedBack/{id}")).await
    }
}

impl WasteClient {
    #[instrument(level = Level::INFO, skip(self))]
    pub async fn list_complaints(&self) -> Result<Vec<Complaint>> {
        self.get("api/v1/complains/get-all-complains").await
    }

    #[instrument(level = Level::INFO, skip(self, spec))]
    pub async fn insert_complaint(&self, spec: &ComplaintSpec) -> Result<Message> {
        self.send(Method::POST, "api/v1/complains/saved", spec).await
    }

    #[instrument(level = Level::INFO, skip(self, spec))]
    pub async fn update_complaint(&self, id: Id, spec: &ComplaintSpec) -> Result<Complaint> {
        self.send(Method::PUT, &format!("api/v1/complains/update-complain/{id}"), spec).await
    }

    #[instrument(level = Level::INFO, skip(self))]
    pub async fn remove_complaint(&self, id: Id) -> Result<Message> {
        self.delete(&format!("api/v1/complains/delete-complain/{id}")).await
    }
}

impl WasteClient {
    #[instrument(level = Level::INFO, skip(self))]
    pub async fn list_requests(&self, filter: &RequestFilter) -> Result<Vec<ServiceRequest>> {
        let request = RequestWithoutPayload {
            method: Method::GET,
            rel_url: "api/v1/request/get-all-request",
            query: Some(filter),
            payload: None,
        };
        self.execute(request).await
    }

    #[instrument(level = Level::INFO, skip(self))]
    pub async fn request_stats(&self) -> Result<RequestStats> {
        self.get("api/v1/request/stats").await
    }

    #[instrument(level = Level::INFO, skip(self, draft))]
    pub async fn insert_request(&self, draft: &RequestDraft) -> Result<Message> {
        self.send(Method::POST, "api/v1/request/save", draft).await
    }

    #[instrument(level = Level::INFO, skip(self, draft))]
    pub async fn update_request(&self, id: Id, draft: &RequestDraft) -> Result<ServiceRequest> {
        self.send(Method::PUT, &format!("api/v1/request/update/{id}"), draft).await
    }

    #[instrument(level = Level::INFO, skip(self))]
    pub async fn update_request_status(
        &self,
        id: Id,
        status: RequestStatus,
    ) -> Result<ServiceRequest> {
        let update = RequestStatusUpdate {
            status: Some(status),
        };
        self.send(Method::PUT, &format!("api/v1/request/{id}/update-status"), &update).await
    }

    #[instrument(level = Level::INFO, skip(self, assignment))]
    pub async fn assign_request(
        &self,
        id: Id,
        assignment: &RequestAssignment,
    ) -> Result<ServiceRequest> {
        self.send(Method::PUT, &format!("api/v1/request/{id}/assign"), assignment).await
    }

    #[instrument(level = Level::INFO, skip(self))]
    pub async fn remove_request(&self, id: Id) -> Result<Message> {
        self.delete(&format!("api/v1/request/delete-request/{id}")).await
    }
}

impl WasteClient {
    #[instrument(level = Level::INFO, skip(self))]
    pub async fn list_schedules(&self) -> Result<Vec<Schedule>> {
        self.get("api/v1/shedule/get-all-schedule").await
    }

    #[instrument(level = Level::INFO, skip(self, spec))]
    pub async fn insert_schedule(&self, spec: &ScheduleSpec) -> Result<Message> {
        self.send(Method::POST, "api/v1/shedule/saved", spec).await
    }

    #[instrument(level = Level::INFO, skip(self, spec))]
    pub async fn update_schedule(&self, id: Id, spec: &ScheduleSpec) -> Result<Schedule> {
        self.send(Method::PUT, &format!("api/v1/shedule/update/{id}"), spec).await
    }

    #[instrument(level = Level::INFO, skip(self))]
    pub async fn remove_schedule(&self, id: Id) -> Result<Message> {
        self.delete(&format!("api/v1/shedule/delete-schedule/{id}")).await
    }

    #[instrument(level = Level::INFO, skip(self))]
    pub async fn calendar_day(&self, query: &CalendarQuery) -> Result<CalendarDay> {
        let request = RequestWithoutPayload {
            method: Method::GET,
            rel_url: "api/v1/shedule/calendar",
            query: Some(query),
            payload: None,
        };
        self.execute(request).await
    }

    #[instrument(level = Level::INFO, skip(self))]
    pub async fn calendar_week(&self, query: &CalendarQuery) -> Result<Vec<CalendarDay>> {
        let request = RequestWithoutPayload {
            method: Method::GET,
            rel_url: "api/v1/shedule/calendar/week",
            query: Some(query),
            payload: None,
        };
        self.execute(request).await
    }
}

impl WasteClient {
    #[instrument(level = Level::INFO, skip(self))]
    pub async fn toggle_reminder(&self, request: &ReminderRequest) -> Result<ReminderState> {
        self.send(Method::POST, "api/v1/reminder/toggle", request).await
    }

    #[instrument(level = Level::INFO, skip(self))]
    pub async fn drain_notifications(&self) -> Result<Vec<Notification>> {
        self.get("api/v1/reminder/notifications").await
    }
}

impl WasteClient {
    async fn get<R>(&self, rel_url: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let request = Request::<(), ()> {
            method: Method::GET,
            rel_url,
            query: None,
            payload: None,
        };
        self.execute(request).await
    }

    async fn delete<R>(&self, rel_url: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let request = Request::<(), ()> {
            method: Method::DELETE,
            rel_url,
            query: None,
            payload: None,
        };
        self.execute(request).await
    }

    async fn send<T, R>(&self, method: Method, rel_url: &str, payload: &T) -> Result<R>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let request = Request::<(), T> {
            method,
            rel_url,
            query: None,
            payload: Some(payload),
        };
        self.execute(request).await
    }

    #[instrument(level = Level::INFO, skip(self, request))]
    async fn execute<Q, T, R>(&self, request: Request<'_, Q, T>) -> Result<R>
    where
        Q: Serialize,
        T: Serialize,
        R: DeserializeOwned,
    {
        let Request {
            method,
            rel_url,
            query,
            payload,
        } = request;

        let url = self.args.endpoint.join(rel_url)?;
        let mut request = match method.as_str() {
            "GET" => self.session.get(url),
            "DELETE" => self.session.delete(url),
            "POST" => self.session.post(url),
            "PUT" => self.session.put(url),
            _ => bail!("unsupported method: {method}"),
        };
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(payload) = payload {
            request = request.json(payload);
        }

        request
            .send()
            .await?
            .json::<::wastewise_core::result::Result<R>>()
            .await
            .map_err(Into::into)
            .and_then(::wastewise_core::result::Result::<R>::into_anyhow)
    }
}

type RequestWithoutPayload<'a, Q> = Request<'a, Q, ()>;

struct Request<'a, Q, T> {
    method: Method,
    rel_url: &'a str,
    query: Option<&'a Q>,
    payload: Option<&'a T>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Parser)]
#[clap(rename_all = "kebab-case")]
#[serde(rename_all = "camelCase")]
pub struct WasteClientArgs {
    #[arg(
        long,
        env = "WASTEWISE_CLIENT_ENDPOINT",
        value_name = "URL",
        default_value = "http://localhost:8045",
    )]
    pub endpoint: Url,
}
