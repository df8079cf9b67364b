use std::sync::Arc;

use asana_abstractions::{
    AdditionalData, AdditionalDataHolder, HttpMethod, RequestAdapter, RequestError,
    RequestInformation, TaskGid,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Request builders
// ---------------------------------------------------------------------------

/// Builds requests against `/tasks`.
#[derive(Clone)]
pub struct TasksRequestBuilder {
    request_adapter: Arc<dyn RequestAdapter>,
    url: String,
}

impl TasksRequestBuilder {
    pub(crate) fn new(request_adapter: Arc<dyn RequestAdapter>, url: String) -> Self {
        Self {
            request_adapter,
            url,
        }
    }

    /// Builds requests against `/tasks/{task_gid}`.
    pub fn by_task_gid(&self, task_gid: &TaskGid) -> TaskItemRequestBuilder {
        TaskItemRequestBuilder {
            request_adapter: Arc::clone(&self.request_adapter),
            url: format!("{}/{}", self.url, task_gid),
            opt_fields: Vec::new(),
        }
    }

    /// Describes `POST /tasks` without sending it.
    pub fn to_post_request_information(
        &self,
        body: &TasksPostRequestBody,
    ) -> Result<RequestInformation, RequestError> {
        let mut request = RequestInformation::new(HttpMethod::Post, self.url.clone());
        request.set_json_content(body)?;
        Ok(request)
    }

    /// Creates a task.
    pub async fn post(&self, body: &TasksPostRequestBody) -> Result<Option<Value>, RequestError> {
        let request = self.to_post_request_information(body)?;
        self.request_adapter.send(request).await
    }
}

/// Builds requests against `/tasks/{task_gid}`.
#[derive(Clone)]
pub struct TaskItemRequestBuilder {
    request_adapter: Arc<dyn RequestAdapter>,
    url: String,
    opt_fields: Vec<String>,
}

impl TaskItemRequestBuilder {
    /// Asks the service to include these optional properties in the response.
    #[must_use]
    pub fn with_opt_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.opt_fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Describes `GET /tasks/{task_gid}` without sending it.
    pub fn to_get_request_information(&self) -> RequestInformation {
        let mut request = RequestInformation::new(HttpMethod::Get, self.url.clone());
        if !self.opt_fields.is_empty() {
            request.add_query("opt_fields", self.opt_fields.join(","));
        }
        request
    }

    /// Describes `DELETE /tasks/{task_gid}` without sending it.
    pub fn to_delete_request_information(&self) -> RequestInformation {
        RequestInformation::new(HttpMethod::Delete, self.url.clone())
    }

    /// Fetches the task.
    pub async fn get(&self) -> Result<Option<Value>, RequestError> {
        self.request_adapter
            .send(self.to_get_request_information())
            .await
    }

    /// Deletes the task.
    pub async fn delete(&self) -> Result<Option<Value>, RequestError> {
        self.request_adapter
            .send(self.to_delete_request_information())
            .await
    }
}

// ---------------------------------------------------------------------------
// Models
// ---------------------------------------------------------------------------

/// Body of `POST /tasks`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TasksPostRequestBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<TasksPostRequestBodyData>,
}

impl TasksPostRequestBody {
    /// Wraps `data` in the `{"data": ...}` envelope.
    pub fn new(data: TasksPostRequestBodyData) -> Self {
        Self { data: Some(data) }
    }
}

/// The `data` object of `POST /tasks`.
///
/// Properties outside the schema below are kept in [`Self::additional_data`]
/// and serialised inline with the schema properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TasksPostRequestBodyData {
    /// Gid of the user to assign the task to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// Gid of the parent task, for subtasks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Gids of the projects the task is added to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<String>>,
    /// Gid of the workspace the task is created in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,
    /// Properties not covered by the schema.
    #[serde(flatten)]
    pub additional_data: AdditionalData,
}

impl AdditionalDataHolder for TasksPostRequestBodyData {
    fn additional_data(&self) -> &AdditionalData {
        &self.additional_data
    }

    fn additional_data_mut(&mut self) -> &mut AdditionalData {
        &mut self.additional_data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_additional_data_is_serialised_inline() {
        let mut data = TasksPostRequestBodyData {
            workspace: Some("12345".into()),
            ..Default::default()
        };
        data.additional_data
            .insert("name".into(), Value::String("Write docs".into()));

        let value = serde_json::to_value(TasksPostRequestBody::new(data)).unwrap();

        assert_eq!(
            value,
            json!({ "data": { "workspace": "12345", "name": "Write docs" } })
        );
    }

    #[test]
    fn test_unknown_properties_land_in_additional_data() {
        let body: TasksPostRequestBody = serde_json::from_value(json!({
            "data": {
                "projects": ["1", "2"],
                "name": "Write docs",
                "completed": true
            }
        }))
        .unwrap();

        let data = body.data.unwrap();
        assert_eq!(data.projects, Some(vec!["1".to_owned(), "2".to_owned()]));
        assert_eq!(data.additional_data.len(), 2);
        assert_eq!(data.additional_data["completed"], Value::Bool(true));
    }

    fn tag<H: AdditionalDataHolder>(holder: &mut H, key: &str) {
        holder
            .additional_data_mut()
            .insert(key.to_owned(), Value::Bool(true));
    }

    #[test]
    fn test_holder_trait_exposes_the_flattened_map() {
        let mut data = TasksPostRequestBodyData::default();

        tag(&mut data, "liked");

        assert_eq!(data.additional_data().len(), 1);
        assert_eq!(data.liked(), Some(true));
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({ "liked": true })
        );
    }

    #[test]
    fn test_empty_body_serialises_to_empty_object() {
        let value = serde_json::to_value(TasksPostRequestBody::default()).unwrap();
        assert_eq!(value, json!({}));
    }
}
