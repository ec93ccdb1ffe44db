use iced::Theme;
use iced_aw::date_picker::Date;

use crate::api::types::{
    AttendanceRecord, AttendanceStatus, ClassRecord, Evaluation, LoginResponse, PayrollEntry,
    Role, RosterEntry, ScheduleRecord, TeacherReview, TuitionInvoice, UserRecord,
};
use crate::app::state::{DatePickerOpen, Screen};
use crate::attendance::ScheduleRef;

#[derive(Debug, Clone)]
pub enum Message {
    // --- Навигация и уведомления ---
    Navigate(Screen),
    DismissNotice,
    // --- Вход / выход ---
    LoginEmailChanged(String),
    LoginPasswordChanged(String),
    SubmitLogin,
    LoginFinished(Result<LoginResponse, String>),
    Logout,
    // --- Настройки ---
    ThemeSelected(Theme),
    // --- Календари ---
    OpenDatePicker(DatePickerOpen),
    CancelDatePicker,
    DatePicked(Date),
    // --- Пользователи ---
    UsersLoaded(Result<Vec<UserRecord>, String>),
    UserFilterChanged(String),
    UserRoleFilterChanged(Role),
    ClearUserRoleFilter,
    OpenUserModal(Option<UserRecord>),
    CloseUserModal,
    UserFormNameChanged(String),
    UserFormEmailChanged(String),
    UserFormDobChanged(String),
    UserFormPhoneChanged(String),
    UserFormGenderChanged(String),
    UserFormRoleChanged(Role),
    SubmitUserForm,
    UserSaved(Result<(), String>),
    AskDeleteUser(UserRecord),
    CancelDeleteUser,
    ConfirmDeleteUser,
    UserDeleted(Result<(), String>),
    // --- Классы ---
    ClassesLoaded(Result<Vec<ClassRecord>, String>),
    ClassFilterChanged(String),
    OpenClassModal(Option<ClassRecord>),
    CloseClassModal,
    ClassFormNameChanged(String),
    ClassFormGradeChanged(String),
    ClassFormTeacherChanged(UserRecord),
    SubmitClassForm,
    ClassSaved(Result<(), String>),
    AskDeleteClass(ClassRecord),
    CancelDeleteClass,
    ConfirmDeleteClass,
    ClassDeleted(Result<(), String>),
    // --- Расписание ---
    SchedulesLoaded(Result<Vec<ScheduleRecord>, String>),
    ScheduleFilterChanged(String),
    OpenScheduleModal(Option<ScheduleRecord>),
    CloseScheduleModal,
    ScheduleFormClassChanged(ClassRecord),
    ScheduleFormRoomChanged(String),
    ScheduleFormStartChanged(String),
    ScheduleFormEndChanged(String),
    SubmitScheduleForm,
    ScheduleSaved(Result<(), String>),
    AskDeleteSchedule(ScheduleRecord),
    CancelDeleteSchedule,
    ConfirmDeleteSchedule,
    ScheduleDeleted(Result<(), String>),
    // --- Табель посещаемости ---
    OpenAttendanceModal(ScheduleRecord),
    AttendanceLoaded(
        u64,
        Result<(ScheduleRef, Vec<RosterEntry>, Vec<AttendanceRecord>), String>,
    ),
    SetAttendanceStatus(i64, Option<AttendanceStatus>),
    MarkAllAbsent,
    SubmitAttendance,
    AttendanceSubmitted(Result<Vec<AttendanceRecord>, String>),
    CloseAttendanceModal,
    // --- Оплата обучения ---
    TuitionsLoaded(Result<Vec<TuitionInvoice>, String>),
    TuitionFilterChanged(String),
    TuitionStatusFilterChanged(String),
    ClearTuitionStatusFilter,
    TuitionMinAmountChanged(String),
    TuitionMaxAmountChanged(String),
    OpenTuitionModal(Option<TuitionInvoice>),
    CloseTuitionModal,
    TuitionFormStudentChanged(UserRecord),
    TuitionFormClassChanged(ClassRecord),
    TuitionFormAmountChanged(String),
    TuitionFormMonthChanged(String),
    TuitionFormStatusChanged(String),
    SubmitTuitionForm,
    TuitionSaved(Result<(), String>),
    AskDeleteTuition(TuitionInvoice),
    CancelDeleteTuition,
    ConfirmDeleteTuition,
    TuitionDeleted(Result<(), String>),
    // --- Зарплата ---
    PayrollsLoaded(Result<Vec<PayrollEntry>, String>),
    PayrollFilterChanged(String),
    PayrollMonthFilterChanged(String),
    OpenPayrollModal(Option<PayrollEntry>),
    ClosePayrollModal,
    PayrollFormTeacherChanged(UserRecord),
    PayrollFormMonthChanged(String),
    PayrollFormBaseChanged(String),
    PayrollFormBonusChanged(String),
    PayrollFormDeductionsChanged(String),
    SubmitPayrollForm,
    PayrollSaved(Result<(), String>),
    AskDeletePayroll(PayrollEntry),
    CancelDeletePayroll,
    ConfirmDeletePayroll,
    PayrollDeleted(Result<(), String>),
    // --- Отзывы о преподавателях ---
    ReviewsLoaded(Result<Vec<TeacherReview>, String>),
    ReviewFilterChanged(String),
    ReviewMinRatingChanged(i32),
    ClearReviewRatingFilter,
    OpenReviewModal(Option<TeacherReview>),
    CloseReviewModal,
    ReviewFormTeacherChanged(UserRecord),
    ReviewFormRatingChanged(i32),
    ReviewFormCommentChanged(String),
    SubmitReviewForm,
    ReviewSaved(Result<(), String>),
    AskDeleteReview(TeacherReview),
    CancelDeleteReview,
    ConfirmDeleteReview,
    ReviewDeleted(Result<(), String>),
    // --- Оценки ---
    EvaluationsLoaded(Result<Vec<Evaluation>, String>),
    EvaluationFilterChanged(String),
    OpenEvaluationModal(Option<Evaluation>),
    CloseEvaluationModal,
    EvaluationFormStudentChanged(UserRecord),
    EvaluationFormClassChanged(ClassRecord),
    EvaluationFormScoreChanged(String),
    EvaluationFormCommentChanged(String),
    SubmitEvaluationForm,
    EvaluationSaved(Result<(), String>),
    AskDeleteEvaluation(Evaluation),
    CancelDeleteEvaluation,
    ConfirmDeleteEvaluation,
    EvaluationDeleted(Result<(), String>),
}
