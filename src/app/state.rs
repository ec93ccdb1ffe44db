use iced::Theme;
use iced_aw::date_picker::Date;

use crate::api::ApiClient;
use crate::api::types::{
    ClassRecord, Evaluation, PayrollEntry, Role, ScheduleRecord, TeacherReview, TuitionInvoice,
    UserRecord,
};
use crate::attendance::{AttendanceSheet, ScheduleRef};
use crate::config::load_theme;
use crate::session::Session;

#[derive(PartialEq, Default, Debug, Clone, Copy)]
pub enum Screen {
    #[default]
    Login,
    Profile,
    Settings,
    Users,
    Classes,
    Schedules,
    Tuition,
    Payroll,
    Reviews,
    Evaluations,
}

/// Какой из календарей открыт. Одновременно может быть открыт
/// только один.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DatePickerOpen {
    #[default]
    None,
    ScheduleForm,
    AttendanceDate,
}

pub struct App {
    pub current_screen: Screen,
    pub theme: Theme,
    pub api: ApiClient,
    pub session: Option<Session>,
    // уведомления: ошибка и статус последней операции
    pub error_message: String,
    pub status_message: String,
    // --- Вход ---
    pub login_email: String,
    pub login_password: String,
    pub login_in_progress: bool,
    // --- Пользователи ---
    pub users: Vec<UserRecord>,
    pub user_filter_text: String,
    pub user_role_filter: Option<Role>,
    pub show_user_modal: bool,
    pub editing_user_id: Option<i64>,
    pub user_form_name: String,
    pub user_form_email: String,
    pub user_form_dob: String,
    pub user_form_phone: String,
    pub user_form_gender: String,
    pub user_form_role: Option<Role>,
    pub user_form_error: Option<String>,
    pub confirm_delete_user: Option<UserRecord>,
    // --- Классы ---
    pub classes: Vec<ClassRecord>,
    pub class_filter_text: String,
    pub show_class_modal: bool,
    pub editing_class_id: Option<i64>,
    pub class_form_name: String,
    pub class_form_grade: String,
    pub class_form_teacher: Option<UserRecord>,
    pub class_form_error: Option<String>,
    pub confirm_delete_class: Option<ClassRecord>,
    // --- Расписание ---
    pub schedules: Vec<ScheduleRecord>,
    pub schedule_filter_text: String,
    pub show_schedule_modal: bool,
    pub editing_schedule_id: Option<i64>,
    pub schedule_form_class: Option<ClassRecord>,
    pub schedule_form_room: String,
    pub schedule_form_date: Date,
    pub schedule_form_start: String,
    pub schedule_form_end: String,
    pub schedule_form_error: Option<String>,
    pub confirm_delete_schedule: Option<ScheduleRecord>,
    pub date_picker_open: DatePickerOpen,
    // --- Табель посещаемости ---
    // целевая дата выбирается на экране расписания до открытия окна
    pub attendance_date: Date,
    pub show_attendance_modal: bool,
    pub attendance_loading: bool,
    pub attendance_submitting: bool,
    pub attendance_sheet: Option<AttendanceSheet>,
    pub attendance_ref: Option<ScheduleRef>,
    pub attendance_class_name: String,
    // штамп поколения: устаревший ответ загрузки отбрасывается
    pub attendance_load_seq: u64,
    // --- Оплата обучения ---
    pub tuitions: Vec<TuitionInvoice>,
    pub tuition_filter_text: String,
    pub tuition_status_filter: Option<String>,
    pub tuition_min_amount: String,
    pub tuition_max_amount: String,
    pub show_tuition_modal: bool,
    pub editing_tuition_id: Option<i64>,
    pub tuition_form_student: Option<UserRecord>,
    pub tuition_form_class: Option<ClassRecord>,
    pub tuition_form_amount: String,
    pub tuition_form_month: String,
    pub tuition_form_status: Option<String>,
    pub tuition_form_error: Option<String>,
    pub confirm_delete_tuition: Option<TuitionInvoice>,
    // --- Зарплата ---
    pub payrolls: Vec<PayrollEntry>,
    pub payroll_filter_text: String,
    pub payroll_month_filter: String,
    pub show_payroll_modal: bool,
    pub editing_payroll_id: Option<i64>,
    pub payroll_form_teacher: Option<UserRecord>,
    pub payroll_form_month: String,
    pub payroll_form_base: String,
    pub payroll_form_bonus: String,
    pub payroll_form_deductions: String,
    pub payroll_form_error: Option<String>,
    pub confirm_delete_payroll: Option<PayrollEntry>,
    // --- Отзывы о преподавателях ---
    pub reviews: Vec<TeacherReview>,
    pub review_filter_text: String,
    pub review_min_rating: Option<i32>,
    pub show_review_modal: bool,
    pub editing_review_id: Option<i64>,
    pub review_form_teacher: Option<UserRecord>,
    pub review_form_rating: Option<i32>,
    pub review_form_comment: String,
    pub review_form_error: Option<String>,
    pub confirm_delete_review: Option<TeacherReview>,
    // --- Оценки ---
    pub evaluations: Vec<Evaluation>,
    pub evaluation_filter_text: String,
    pub show_evaluation_modal: bool,
    pub editing_evaluation_id: Option<i64>,
    pub evaluation_form_student: Option<UserRecord>,
    pub evaluation_form_class: Option<ClassRecord>,
    pub evaluation_form_score: String,
    pub evaluation_form_comment: String,
    pub evaluation_form_error: Option<String>,
    pub confirm_delete_evaluation: Option<Evaluation>,
}

impl Default for App {
    fn default() -> Self {
        let theme = load_theme().unwrap_or(Theme::Light);
        let session = Session::load();
        let mut api = ApiClient::from_env();
        api.set_token(session.as_ref().map(|s| s.token.clone()));
        let current_screen = if session.is_some() {
            Screen::Profile
        } else {
            Screen::Login
        };
        Self {
            current_screen,
            theme,
            api,
            session,
            error_message: String::new(),
            status_message: String::new(),
            login_email: String::new(),
            login_password: String::new(),
            login_in_progress: false,
            users: vec![],
            user_filter_text: String::new(),
            user_role_filter: None,
            show_user_modal: false,
            editing_user_id: None,
            user_form_name: String::new(),
            user_form_email: String::new(),
            user_form_dob: String::new(),
            user_form_phone: String::new(),
            user_form_gender: String::new(),
            user_form_role: None,
            user_form_error: None,
            confirm_delete_user: None,
            classes: vec![],
            class_filter_text: String::new(),
            show_class_modal: false,
            editing_class_id: None,
            class_form_name: String::new(),
            class_form_grade: String::new(),
            class_form_teacher: None,
            class_form_error: None,
            confirm_delete_class: None,
            schedules: vec![],
            schedule_filter_text: String::new(),
            show_schedule_modal: false,
            editing_schedule_id: None,
            schedule_form_class: None,
            schedule_form_room: String::new(),
            schedule_form_date: Date::today(),
            schedule_form_start: String::new(),
            schedule_form_end: String::new(),
            schedule_form_error: None,
            confirm_delete_schedule: None,
            date_picker_open: DatePickerOpen::None,
            attendance_date: Date::today(),
            show_attendance_modal: false,
            attendance_loading: false,
            attendance_submitting: false,
            attendance_sheet: None,
            attendance_ref: None,
            attendance_class_name: String::new(),
            attendance_load_seq: 0,
            tuitions: vec![],
            tuition_filter_text: String::new(),
            tuition_status_filter: None,
            tuition_min_amount: String::new(),
            tuition_max_amount: String::new(),
            show_tuition_modal: false,
            editing_tuition_id: None,
            tuition_form_student: None,
            tuition_form_class: None,
            tuition_form_amount: String::new(),
            tuition_form_month: String::new(),
            tuition_form_status: None,
            tuition_form_error: None,
            confirm_delete_tuition: None,
            payrolls: vec![],
            payroll_filter_text: String::new(),
            payroll_month_filter: String::new(),
            show_payroll_modal: false,
            editing_payroll_id: None,
            payroll_form_teacher: None,
            payroll_form_month: String::new(),
            payroll_form_base: String::new(),
            payroll_form_bonus: String::new(),
            payroll_form_deductions: String::new(),
            payroll_form_error: None,
            confirm_delete_payroll: None,
            reviews: vec![],
            review_filter_text: String::new(),
            review_min_rating: None,
            show_review_modal: false,
            editing_review_id: None,
            review_form_teacher: None,
            review_form_rating: None,
            review_form_comment: String::new(),
            review_form_error: None,
            confirm_delete_review: None,
            evaluations: vec![],
            evaluation_filter_text: String::new(),
            show_evaluation_modal: false,
            editing_evaluation_id: None,
            evaluation_form_student: None,
            evaluation_form_class: None,
            evaluation_form_score: String::new(),
            evaluation_form_comment: String::new(),
            evaluation_form_error: None,
            confirm_delete_evaluation: None,
        }
    }
}

impl App {
    /// Роль текущего пользователя; до входа роли нет.
    pub fn role(&self) -> Option<Role> {
        self.session.as_ref().map(|s| s.user.role)
    }

    /// Преподаватели для выпадающих списков.
    pub fn teachers(&self) -> Vec<UserRecord> {
        self.users
            .iter()
            .filter(|u| u.role == Role::Teacher)
            .cloned()
            .collect()
    }

    /// Студенты для выпадающих списков.
    pub fn students(&self) -> Vec<UserRecord> {
        self.users
            .iter()
            .filter(|u| u.role == Role::Student)
            .cloned()
            .collect()
    }
}
