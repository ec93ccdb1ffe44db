pub mod types;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::api::types::*;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("ошибка сети: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{message}")]
    Backend { status: StatusCode, message: String },
}

/// Достаёт человекочитаемое сообщение из тела ошибки бэкенда.
/// Поддерживаются формы: голая строка, объект с `message`, массив
/// объектов с `message`; всё остальное отдаётся сырым JSON.
pub fn extract_error_message(body: &Value) -> String {
    match body {
        Value::String(s) => s.clone(),
        Value::Object(map) => match map.get("message") {
            Some(Value::String(m)) => m.clone(),
            _ => body.to_string(),
        },
        Value::Array(items) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Object(map) => map
                        .get("message")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    _ => None,
                })
                .collect();
            if messages.is_empty() {
                body.to_string()
            } else {
                messages.join("; ")
            }
        }
        _ => body.to_string(),
    }
}

/// Тонкий клиент REST-бэкенда. Всё состояние платформы живёт на сервере,
/// клиент только запрашивает списки и отправляет изменения.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    pub fn from_env() -> Self {
        let base_url =
            std::env::var("PLATFORM_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(base_url)
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn read<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            log::warn!("бэкенд ответил {status}: {body}");
            Err(ApiError::Backend {
                status,
                message: extract_error_message(&body),
            })
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        Self::read(self.request(Method::GET, path).send().await?).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        Self::read(self.request(Method::POST, path).json(body).send().await?).await
    }

    async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        Self::read(self.request(Method::PUT, path).json(body).send().await?).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.request(Method::DELETE, path).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            Err(ApiError::Backend {
                status,
                message: extract_error_message(&body),
            })
        }
    }

    // --- Аутентификация ---

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        self.post(
            "/auth/login",
            &serde_json::json!({ "email": email, "password": password }),
        )
        .await
    }

    // --- Пользователи ---

    pub async fn fetch_users(&self) -> Result<Vec<UserRecord>, ApiError> {
        self.get("/users").await
    }

    pub async fn create_user(&self, payload: &UserPayload) -> Result<Value, ApiError> {
        self.post("/users", payload).await
    }

    pub async fn update_user(&self, id: i64, payload: &UserPayload) -> Result<Value, ApiError> {
        self.put(&format!("/users/{id}"), payload).await
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/users/{id}")).await
    }

    // --- Классы ---

    pub async fn fetch_classes(&self) -> Result<Vec<ClassRecord>, ApiError> {
        self.get("/classes").await
    }

    pub async fn create_class(&self, payload: &ClassPayload) -> Result<Value, ApiError> {
        self.post("/classes", payload).await
    }

    pub async fn update_class(&self, id: i64, payload: &ClassPayload) -> Result<Value, ApiError> {
        self.put(&format!("/classes/{id}"), payload).await
    }

    pub async fn delete_class(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/classes/{id}")).await
    }

    /// Списочный состав класса.
    pub async fn fetch_roster(&self, class_id: i64) -> Result<Vec<RosterEntry>, ApiError> {
        self.get(&format!("/classes/{class_id}/students")).await
    }

    // --- Расписание ---

    pub async fn fetch_schedules(&self) -> Result<Vec<ScheduleRecord>, ApiError> {
        self.get("/schedules").await
    }

    pub async fn fetch_schedule(&self, id: i64) -> Result<ScheduleRecord, ApiError> {
        self.get(&format!("/schedules/{id}")).await
    }

    pub async fn create_schedule(&self, payload: &SchedulePayload) -> Result<Value, ApiError> {
        self.post("/schedules", payload).await
    }

    pub async fn update_schedule(
        &self,
        id: i64,
        payload: &SchedulePayload,
    ) -> Result<Value, ApiError> {
        self.put(&format!("/schedules/{id}"), payload).await
    }

    pub async fn delete_schedule(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/schedules/{id}")).await
    }

    // --- Посещаемость ---

    /// Все записи посещаемости занятия. Гранулярность запроса — занятие
    /// целиком; фильтрация по дате остаётся на вызывающей стороне.
    pub async fn fetch_attendance(
        &self,
        schedule_id: i64,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        self.get(&format!("/attendances?schedule_id={schedule_id}"))
            .await
    }

    pub async fn batch_create_attendance(
        &self,
        body: &BatchCreateAttendance,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        self.post("/attendances/batch", body).await
    }

    pub async fn late_edit_attendance(
        &self,
        body: &LateEditAttendance,
    ) -> Result<AttendanceRecord, ApiError> {
        self.put("/attendances/late-edit", body).await
    }

    // --- Оплата обучения ---

    pub async fn fetch_tuitions(&self) -> Result<Vec<TuitionInvoice>, ApiError> {
        self.get("/tuitions").await
    }

    pub async fn create_tuition(&self, payload: &TuitionPayload) -> Result<Value, ApiError> {
        self.post("/tuitions", payload).await
    }

    pub async fn update_tuition(
        &self,
        id: i64,
        payload: &TuitionPayload,
    ) -> Result<Value, ApiError> {
        self.put(&format!("/tuitions/{id}"), payload).await
    }

    pub async fn delete_tuition(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/tuitions/{id}")).await
    }

    // --- Зарплата ---

    pub async fn fetch_payrolls(&self) -> Result<Vec<PayrollEntry>, ApiError> {
        self.get("/payrolls").await
    }

    pub async fn create_payroll(&self, payload: &PayrollPayload) -> Result<Value, ApiError> {
        self.post("/payrolls", payload).await
    }

    pub async fn update_payroll(
        &self,
        id: i64,
        payload: &PayrollPayload,
    ) -> Result<Value, ApiError> {
        self.put(&format!("/payrolls/{id}"), payload).await
    }

    pub async fn delete_payroll(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/payrolls/{id}")).await
    }

    // --- Отзывы о преподавателях ---

    pub async fn fetch_reviews(&self) -> Result<Vec<TeacherReview>, ApiError> {
        self.get("/reviews").await
    }

    pub async fn create_review(&self, payload: &ReviewPayload) -> Result<Value, ApiError> {
        self.post("/reviews", payload).await
    }

    pub async fn update_review(&self, id: i64, payload: &ReviewPayload) -> Result<Value, ApiError> {
        self.put(&format!("/reviews/{id}"), payload).await
    }

    pub async fn delete_review(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/reviews/{id}")).await
    }

    // --- Оценки ---

    pub async fn fetch_evaluations(&self) -> Result<Vec<Evaluation>, ApiError> {
        self.get("/evaluations").await
    }

    pub async fn create_evaluation(
        &self,
        payload: &EvaluationPayload,
    ) -> Result<Value, ApiError> {
        self.post("/evaluations", payload).await
    }

    pub async fn update_evaluation(
        &self,
        id: i64,
        payload: &EvaluationPayload,
    ) -> Result<Value, ApiError> {
        self.put(&format!("/evaluations/{id}"), payload).await
    }

    pub async fn delete_evaluation(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/evaluations/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_message_from_plain_string() {
        assert_eq!(extract_error_message(&json!("нет доступа")), "нет доступа");
    }

    #[test]
    fn error_message_from_object() {
        assert_eq!(
            extract_error_message(&json!({"message": "класс не найден", "code": 404})),
            "класс не найден"
        );
    }

    #[test]
    fn error_message_from_array_of_objects() {
        let body = json!([
            {"field": "email", "message": "email уже занят"},
            {"field": "phone", "message": "неверный формат"}
        ]);
        assert_eq!(
            extract_error_message(&body),
            "email уже занят; неверный формат"
        );
    }

    #[test]
    fn error_message_falls_back_to_raw_json() {
        let body = json!({"weird": {"nested": true}});
        assert_eq!(extract_error_message(&body), body.to_string());
        assert_eq!(extract_error_message(&json!(42)), "42");
    }
}
