//! Meetings and user resources
//!
//! Thin call sites over the request template: each operation builds one
//! request, sends it, and returns the response JSON as the service sent it.

use std::fmt::Display;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use transport::Method;

use crate::client::Client;
use crate::date::{DateInput, normalize_lenient, normalize_strict};
use crate::error::Result;

/// Body for starting an ad-hoc meeting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartMeeting {
    pub start_with_personal_url: bool,
}

/// Partial update of a scheduled meeting.
///
/// Dates are normalized leniently: an unparseable date is dropped rather
/// than failing the update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeetingUpdate {
    pub name: Option<String>,
    pub participants: Option<Vec<String>>,
    pub start: Option<DateInput>,
    pub end: Option<DateInput>,
}

impl MeetingUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn participants(mut self, participants: Vec<String>) -> Self {
        self.participants = Some(participants);
        self
    }

    pub fn start(mut self, start: impl Into<DateInput>) -> Self {
        self.start = Some(start.into());
        self
    }

    pub fn end(mut self, end: impl Into<DateInput>) -> Self {
        self.end = Some(end.into());
        self
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleMeeting<'a> {
    start_with_personal_url: bool,
    meeting_start: String,
    meeting_end: String,
    meeting_name: &'a str,
    participants: &'a [String],
}

// meetingStart/meetingEnd/meetingName go out as null when absent;
// participants is left out entirely unless given.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateMeetingBody<'a> {
    meeting_start: Option<String>,
    meeting_end: Option<String>,
    meeting_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    participants: Option<&'a [String]>,
}

impl Client {
    /// Start a new ad-hoc meeting. Pass `StartMeeting::default()` for the
    /// usual `{"startWithPersonalUrl": false}` body.
    pub async fn start_meeting(&self, body: &StartMeeting) -> Result<Value> {
        let request = self.requests().build_json(body)?;
        self.send(Method::Post, "/meetings/start", request).await
    }

    pub async fn start_scheduled_meeting(&self, id: impl Display) -> Result<Value> {
        let path = format!("/meetings/{id}/start");
        self.send(Method::Post, &path, self.requests().build()).await
    }

    pub async fn get_scheduled_meeting(&self, id: impl Display) -> Result<Value> {
        let path = format!("/meetings/{id}");
        self.send(Method::Get, &path, self.requests().build()).await
    }

    /// List scheduled meetings.
    ///
    /// `end_date` is passed through untouched as an `endDate` request header,
    /// not as a query parameter. That is how the service has always been
    /// called from this client; it may not be what the API intends.
    pub async fn list_scheduled_meetings(&self, end_date: Option<&str>) -> Result<Value> {
        let request = match end_date {
            Some(end_date) => self.requests().build_with_headers(&[("endDate", end_date)])?,
            None => self.requests().build(),
        };
        self.send(Method::Get, "/meetings", request).await
    }

    /// Schedule a meeting. Both dates are required.
    ///
    /// Fails with [`crate::Error::BadInputDate`] before any request is sent
    /// if either date is missing or unparseable.
    pub async fn schedule_meeting(
        &self,
        name: &str,
        participants: &[String],
        start: Option<&DateInput>,
        end: Option<&DateInput>,
    ) -> Result<Value> {
        let body = ScheduleMeeting {
            start_with_personal_url: false,
            meeting_start: normalize_strict(start)?,
            meeting_end: normalize_strict(end)?,
            meeting_name: name,
            participants,
        };
        debug!(participants = participants.len(), "scheduling meeting");
        let request = self.requests().build_json(&body)?;
        self.send(Method::Post, "/meetings", request).await
    }

    pub async fn update_meeting(&self, id: impl Display, update: &MeetingUpdate) -> Result<Value> {
        let body = UpdateMeetingBody {
            meeting_start: normalize_lenient(update.start.as_ref()),
            meeting_end: normalize_lenient(update.end.as_ref()),
            meeting_name: update.name.as_deref(),
            participants: update.participants.as_deref(),
        };
        let request = self.requests().build_json(&body)?;
        let path = format!("/meetings/{id}");
        self.send(Method::Patch, &path, request).await
    }

    pub async fn delete_meeting(&self, id: impl Display) -> Result<Value> {
        let path = format!("/meetings/{id}");
        self.send(Method::Delete, &path, self.requests().build()).await
    }

    /// Profile of the user the bearer token belongs to.
    pub async fn get_user(&self) -> Result<Value> {
        self.send(Method::Get, "/user", self.requests().build()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Options;
    use crate::error::Error;
    use crate::testing::recording_client;
    use serde_json::json;

    #[tokio::test]
    async fn start_meeting_default_body() {
        let (client, transport) = recording_client(&Options::new());
        let response = client.start_meeting(&StartMeeting::default()).await.unwrap();
        assert_eq!(response, json!({"ok": true}));

        let call = transport.last_call();
        assert_eq!(call.method, Method::Post);
        assert_eq!(call.path, "/meetings/start");
        assert_eq!(
            call.request.body.as_deref(),
            Some("{\"startWithPersonalUrl\":false}")
        );
        assert_eq!(call.header("content-type"), Some("application/json"));
        assert_eq!(call.header("user-agent"), Some("X-JOINME-CLIENT"));
    }

    #[tokio::test]
    async fn start_meeting_with_personal_url() {
        let (client, transport) = recording_client(&Options::new());
        client
            .start_meeting(&StartMeeting {
                start_with_personal_url: true,
            })
            .await
            .unwrap();
        assert_eq!(
            transport.last_call().body_json(),
            json!({"startWithPersonalUrl": true})
        );
    }

    #[tokio::test]
    async fn id_based_paths() {
        let (client, transport) = recording_client(&Options::new());
        client.start_scheduled_meeting(42).await.unwrap();
        client.get_scheduled_meeting("42").await.unwrap();
        client.delete_meeting(42u64).await.unwrap();
        client.get_user().await.unwrap();

        let calls: Vec<(Method, String, bool)> = transport
            .calls()
            .into_iter()
            .map(|c| (c.method, c.path, c.request.body.is_some()))
            .collect();
        assert_eq!(
            calls,
            vec![
                (Method::Post, "/meetings/42/start".to_string(), false),
                (Method::Get, "/meetings/42".to_string(), false),
                (Method::Delete, "/meetings/42".to_string(), false),
                (Method::Get, "/user".to_string(), false),
            ]
        );
        for call in transport.calls() {
            assert_eq!(call.header("authorization"), Some("Bearer tok_test"));
        }
    }

    #[tokio::test]
    async fn list_meetings_passes_end_date_as_header() {
        let (client, transport) = recording_client(&Options::new());
        client
            .list_scheduled_meetings(Some("2024-01-31"))
            .await
            .unwrap();
        client.list_scheduled_meetings(None).await.unwrap();

        let calls = transport.calls();
        assert_eq!(calls[0].method, Method::Get);
        assert_eq!(calls[0].path, "/meetings");
        assert_eq!(calls[0].header("enddate"), Some("2024-01-31"));
        // Header is per call, never remembered
        assert_eq!(calls[1].header("enddate"), None);
    }

    #[tokio::test]
    async fn schedule_meeting_normalizes_dates() {
        let (client, transport) = recording_client(&Options::new());
        let participants = vec!["a@x.com".to_string(), "b@x.com".to_string()];
        client
            .schedule_meeting(
                "Standup",
                &participants,
                Some(&"2024-01-15T10:00:00Z".into()),
                Some(&"2024-01-15 10:30".into()),
            )
            .await
            .unwrap();

        let call = transport.last_call();
        assert_eq!(call.method, Method::Post);
        assert_eq!(call.path, "/meetings");
        assert_eq!(
            call.request.body.as_deref(),
            Some(
                "{\"startWithPersonalUrl\":false,\
                 \"meetingStart\":\"2024-01-15T10:00:00+00:00\",\
                 \"meetingEnd\":\"2024-01-15T10:30:00+00:00\",\
                 \"meetingName\":\"Standup\",\
                 \"participants\":[\"a@x.com\",\"b@x.com\"]}"
            )
        );
    }

    #[tokio::test]
    async fn schedule_meeting_requires_start_date() {
        let (client, transport) = recording_client(&Options::new());
        let err = client
            .schedule_meeting("Standup", &[], None, Some(&"2024-01-15T10:00:00Z".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::BadInputDate(_)), "got: {err:?}");
        assert!(transport.calls().is_empty(), "nothing may be sent");
    }

    #[tokio::test]
    async fn schedule_meeting_rejects_unparseable_end_date() {
        let (client, transport) = recording_client(&Options::new());
        let err = client
            .schedule_meeting(
                "Standup",
                &[],
                Some(&"2024-01-15T10:00:00Z".into()),
                Some(&"whenever".into()),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::BadInputDate(_)));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn update_meeting_with_participants_only() {
        let (client, transport) = recording_client(&Options::new());
        client
            .update_meeting(
                7,
                &MeetingUpdate::new().participants(vec!["a@x.com".to_string()]),
            )
            .await
            .unwrap();

        let call = transport.last_call();
        assert_eq!(call.method, Method::Patch);
        assert_eq!(call.path, "/meetings/7");
        assert_eq!(
            call.body_json(),
            json!({
                "meetingStart": null,
                "meetingEnd": null,
                "meetingName": null,
                "participants": ["a@x.com"],
            })
        );
    }

    #[tokio::test]
    async fn update_meeting_omits_participants_when_not_given() {
        let (client, transport) = recording_client(&Options::new());
        client
            .update_meeting(
                7,
                &MeetingUpdate::new()
                    .name("Retro")
                    .start("2024-01-15T10:00:00+01:00")
                    .end("not a date"),
            )
            .await
            .unwrap();

        let body = transport.last_call().body_json();
        assert_eq!(
            body,
            json!({
                "meetingStart": "2024-01-15T10:00:00+01:00",
                "meetingEnd": null,
                "meetingName": "Retro",
            })
        );
        assert!(body.get("participants").is_none());
    }

    #[tokio::test]
    async fn update_meeting_with_empty_participant_list_keeps_it() {
        let (client, transport) = recording_client(&Options::new());
        client
            .update_meeting(7, &MeetingUpdate::new().participants(Vec::new()))
            .await
            .unwrap();
        assert_eq!(transport.last_call().body_json()["participants"], json!([]));
    }
}
