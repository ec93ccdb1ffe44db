use std::fmt;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde::de::Error as DeError;

/// Роль пользователя. Бэкенд исторически присылает роль в трёх видах:
/// строкой, массивом строк или объектом с полем `name`/`role`.
/// Нормализация выполняется один раз здесь, при десериализации.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Manager,
    Teacher,
    Student,
    Parent,
}

impl Role {
    pub const ALL: &'static [Role] = &[
        Role::Manager,
        Role::Teacher,
        Role::Student,
        Role::Parent,
    ];

    pub fn parse(raw: &str) -> Option<Role> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "manager" | "admin" => Some(Role::Manager),
            "teacher" => Some(Role::Teacher),
            "student" => Some(Role::Student),
            "parent" => Some(Role::Parent),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manager => "manager",
            Role::Teacher => "teacher",
            Role::Student => "student",
            Role::Parent => "parent",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", match self {
            Role::Manager => "Менеджер",
            Role::Teacher => "Преподаватель",
            Role::Student => "Студент",
            Role::Parent => "Родитель",
        })
    }
}

impl Serialize for Role {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RoleWire {
            Name(String),
            List(Vec<String>),
            Object {
                name: Option<String>,
                role: Option<String>,
            },
        }

        let raw = match RoleWire::deserialize(deserializer)? {
            RoleWire::Name(s) => Some(s),
            RoleWire::List(list) => list.into_iter().next(),
            RoleWire::Object { name, role } => name.or(role),
        };

        raw.as_deref()
            .and_then(Role::parse)
            .ok_or_else(|| D::Error::custom("неизвестная роль пользователя"))
    }
}

/// Статус посещаемости. Пустая строка на проводе означает "не отмечен"
/// и разворачивается в `None` на уровне поля.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
        }
    }

    pub fn parse(raw: &str) -> Option<AttendanceStatus> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "present" => Some(AttendanceStatus::Present),
            "absent" => Some(AttendanceStatus::Absent),
            _ => None,
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", match self {
            AttendanceStatus::Present => "Присутствует",
            AttendanceStatus::Absent => "Отсутствует",
        })
    }
}

impl Serialize for AttendanceStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

pub fn status_opt<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<AttendanceStatus>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => AttendanceStatus::parse(s)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("неизвестный статус посещаемости: {s}"))),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    pub role: Role,
}

impl fmt::Display for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

// PickList сравнивает выбранный элемент, сравниваем по ID
impl PartialEq for UserRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserRecord,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
    pub dob: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub role: Role,
}

/// Студент из списочного состава класса. Внутри одной сессии модального
/// окна список неизменяем.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RosterEntry {
    #[serde(alias = "id")]
    pub student_id: i64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub teacher_id: Option<i64>,
    #[serde(default)]
    pub teacher_name: Option<String>,
    #[serde(default)]
    pub student_count: Option<i64>,
}

impl fmt::Display for ClassRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl PartialEq for ClassRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassPayload {
    pub name: String,
    pub grade: Option<String>,
    pub teacher_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScheduleRecord {
    pub id: i64,
    #[serde(default)]
    pub original_schedule_id: Option<i64>,
    #[serde(default)]
    pub schedule_id: Option<i64>,
    #[serde(default)]
    pub class_id: Option<i64>,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub teacher_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SchedulePayload {
    pub class_id: i64,
    pub room: Option<String>,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
}

/// Один сохранённый факт посещаемости. Бэкенд гарантирует не больше одной
/// записи на тройку (студент, занятие, дата); локальный поиск ключуется так же.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AttendanceRecord {
    #[serde(alias = "id")]
    pub attendance_id: Option<i64>,
    pub student_id: i64,
    #[serde(default, deserialize_with = "status_opt")]
    pub status: Option<AttendanceStatus>,
    #[serde(default)]
    pub checkin_time: Option<String>,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewAttendance {
    pub student_id: i64,
    pub status: AttendanceStatus,
    pub checkin_time: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchCreateAttendance {
    pub schedule_id: i64,
    pub date: NaiveDate,
    pub records: Vec<NewAttendance>,
}

/// Запрос "поздней отметки". Это единственный путь обновления уже
/// существующей записи: время прихода выставляется сейчас для
/// присутствующих и очищается для остальных.
#[derive(Debug, Clone, Serialize)]
pub struct LateEditAttendance {
    pub student_id: i64,
    pub schedule_id: i64,
    pub checkin_time: Option<String>,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TuitionInvoice {
    pub id: i64,
    pub student_id: i64,
    pub student_name: String,
    #[serde(default)]
    pub class_name: Option<String>,
    pub amount: f64,
    pub month: String,
    pub status: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TuitionPayload {
    pub student_id: i64,
    pub class_id: Option<i64>,
    pub amount: f64,
    pub month: String,
    pub status: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PayrollEntry {
    pub id: i64,
    pub teacher_id: i64,
    pub teacher_name: String,
    pub month: String,
    pub base_salary: f64,
    #[serde(default)]
    pub bonus: f64,
    #[serde(default)]
    pub deductions: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PayrollPayload {
    pub teacher_id: i64,
    pub month: String,
    pub base_salary: f64,
    pub bonus: f64,
    pub deductions: f64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Evaluation {
    pub id: i64,
    pub student_id: i64,
    pub student_name: String,
    #[serde(default)]
    pub class_id: Option<i64>,
    #[serde(default)]
    pub class_name: Option<String>,
    pub score: f64,
    #[serde(default)]
    pub comment: Option<String>,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationPayload {
    pub student_id: i64,
    pub class_id: Option<i64>,
    pub score: f64,
    pub comment: Option<String>,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TeacherReview {
    pub id: i64,
    pub teacher_id: i64,
    pub teacher_name: String,
    pub rating: i32,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewPayload {
    pub teacher_id: i64,
    pub rating: i32,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_from_plain_string() {
        let role: Role = serde_json::from_value(serde_json::json!("teacher")).unwrap();
        assert_eq!(role, Role::Teacher);
        // admin считается синонимом менеджера
        let role: Role = serde_json::from_value(serde_json::json!("Admin")).unwrap();
        assert_eq!(role, Role::Manager);
    }

    #[test]
    fn role_from_string_array() {
        let role: Role = serde_json::from_value(serde_json::json!(["student", "parent"])).unwrap();
        assert_eq!(role, Role::Student);
    }

    #[test]
    fn role_from_object() {
        let role: Role = serde_json::from_value(serde_json::json!({"name": "parent"})).unwrap();
        assert_eq!(role, Role::Parent);
        let role: Role = serde_json::from_value(serde_json::json!({"role": "manager"})).unwrap();
        assert_eq!(role, Role::Manager);
    }

    #[test]
    fn role_unknown_is_an_error() {
        assert!(serde_json::from_value::<Role>(serde_json::json!("janitor")).is_err());
        assert!(serde_json::from_value::<Role>(serde_json::json!([])).is_err());
    }

    #[test]
    fn attendance_record_empty_status_is_none() {
        let record: AttendanceRecord = serde_json::from_value(serde_json::json!({
            "id": 5,
            "student_id": 10,
            "status": "",
            "date": "2025-09-01"
        }))
        .unwrap();
        assert_eq!(record.attendance_id, Some(5));
        assert_eq!(record.status, None);
        assert_eq!(record.checkin_time, None);
    }

    #[test]
    fn attendance_record_parses_status() {
        let record: AttendanceRecord = serde_json::from_value(serde_json::json!({
            "attendance_id": 7,
            "student_id": 3,
            "status": "Present",
            "checkin_time": "2025-09-01 08:02:11",
            "date": "2025-09-01"
        }))
        .unwrap();
        assert_eq!(record.status, Some(AttendanceStatus::Present));
    }

    #[test]
    fn batch_create_serializes_status_as_string() {
        let body = BatchCreateAttendance {
            schedule_id: 12,
            date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            records: vec![NewAttendance {
                student_id: 1,
                status: AttendanceStatus::Absent,
                checkin_time: None,
            }],
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["records"][0]["status"], "absent");
        assert_eq!(value["date"], "2025-09-01");
    }
}
